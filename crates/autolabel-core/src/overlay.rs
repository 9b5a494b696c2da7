//! Overlay renderer.
//!
//! Paints one positioned marker per labeled element. Markers are collected
//! into a detached wrapper which is appended to `<body>` once, after every
//! marker has been built.

use tracing::debug;

use autolabel_config::OverlayConfig;
use autolabel_protocols::{Document, NodeId, Rect, Selector};

use crate::error::LabelError;

/// One marker to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    /// Position of the element among the selector matches.
    pub index: usize,
    pub label: String,
    /// Bounding box in document coordinates.
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    wrapper_class: String,
    marker_class: String,
    badge_class: String,
    z_index_base: i64,
}

impl OverlayRenderer {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            wrapper_class: config.wrapper_class.clone(),
            marker_class: config.marker_class.clone(),
            badge_class: config.badge_class(),
            z_index_base: config.z_index_base,
        }
    }

    /// Build a wrapper holding one marker per entry and attach it to `<body>`.
    ///
    /// A new wrapper is created on every call, so rendering twice without
    /// [`remove`](Self::remove) leaves two overlays in the document.
    pub fn render<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        markers: &[MarkerSpec],
    ) -> Result<NodeId, LabelError> {
        let body = doc.body().ok_or(LabelError::MissingBody)?;

        let wrapper = doc.create_element("div");
        doc.set_attribute(wrapper, "class", &self.wrapper_class)?;

        for spec in markers {
            let marker = self.marker(doc, spec)?;
            doc.append_child(wrapper, marker)?;
        }

        doc.append_child(body, wrapper)?;
        debug!("Attached overlay {} with {} markers", wrapper, markers.len());
        Ok(wrapper)
    }

    fn marker<D: Document + ?Sized>(&self, doc: &mut D, spec: &MarkerSpec) -> Result<NodeId, LabelError> {
        let marker = doc.create_element("div");
        doc.set_attribute(marker, "class", &self.marker_class)?;
        doc.set_attribute(marker, "style", &self.marker_style(spec))?;
        doc.set_attribute(marker, "data-label", &spec.label)?;

        let badge = doc.create_element("span");
        doc.set_attribute(badge, "class", &self.badge_class)?;
        let text = doc.create_text(&spec.label);
        doc.append_child(badge, text)?;
        doc.append_child(marker, badge)?;

        Ok(marker)
    }

    fn marker_style(&self, spec: &MarkerSpec) -> String {
        format!(
            "left: {}px; top: {}px; width: {}px; height: {}px; z-index: {};",
            spec.rect.x,
            spec.rect.y,
            spec.rect.width,
            spec.rect.height,
            self.z_index(spec.index)
        )
    }

    /// Stacking index of the marker for the `index`-th selector match.
    pub fn z_index(&self, index: usize) -> i64 {
        self.z_index_base
            .saturating_add(i64::try_from(index).unwrap_or(i64::MAX))
    }

    /// Detach every overlay wrapper from the document.
    ///
    /// Returns how many wrappers were removed.
    pub fn remove<D: Document + ?Sized>(&self, doc: &mut D) -> Result<usize, LabelError> {
        let selector = Selector::class(&self.wrapper_class)?;
        let wrappers = doc.query_selector_all(&selector);
        for &wrapper in &wrappers {
            doc.remove(wrapper)?;
        }
        Ok(wrappers.len())
    }
}
