//! Visibility oracle.

use autolabel_config::VisibilityConfig;
use autolabel_protocols::{Document, NodeId};

/// Decides whether an element is rendered.
///
/// `aria-hidden` is not consulted here; it only excludes top-level
/// candidates.
#[derive(Debug, Clone)]
pub struct VisibilityOracle {
    min_opacity: f64,
}

impl VisibilityOracle {
    pub fn new(config: &VisibilityConfig) -> Self {
        Self {
            min_opacity: config.min_opacity,
        }
    }

    /// Check if `node` is a rendered element.
    ///
    /// With `check_viewport`, an element lying entirely outside the viewport
    /// is also invisible. Subtree text aggregation never sets it, so text can
    /// still be pulled from off-screen descendants of an on-screen container.
    pub fn is_visible<D: Document + ?Sized>(&self, doc: &D, node: NodeId, check_viewport: bool) -> bool {
        let Some(style) = doc.computed_style(node) else {
            return false;
        };

        if style.display == "none" || style.visibility != "visible" || style.opacity < self.min_opacity {
            return false;
        }

        let Some(rect) = doc.bounding_rect(node) else {
            return false;
        };
        if rect.is_empty() {
            return false;
        }

        if check_viewport && rect.is_outside(&doc.viewport()) {
            return false;
        }

        true
    }
}

impl Default for VisibilityOracle {
    fn default() -> Self {
        Self::new(&VisibilityConfig::default())
    }
}
