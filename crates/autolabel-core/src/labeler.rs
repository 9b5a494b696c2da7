//! Labeling entry points.
//!
//! [`Labeler`] owns the per-document state (configured selector, visibility
//! oracle, resolution cache) and exposes the `draw_labels` / `remove_labels`
//! pair plus the explicit stylesheet [`init`](Labeler::init) and cache
//! [`reset`](Labeler::reset).

use serde::Serialize;
use tracing::{debug, info, warn};

use autolabel_config::Config;
use autolabel_protocols::{Document, NodeId, Rect, Selector};

use crate::assigner::{Assignment, LabelAssigner, LabelRegistry, LabelSource, SkipReason};
use crate::cache::ResolutionCache;
use crate::error::LabelError;
use crate::overlay::{MarkerSpec, OverlayRenderer};
use crate::resolver::{ResolveStats, Resolver};
use crate::stylesheet;
use crate::visibility::VisibilityOracle;

/// A candidate that received a label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledElement {
    pub node: NodeId,
    /// Position among the selector matches.
    pub index: usize,
    pub label: String,
    pub source: LabelSource,
    /// Bounding box in document coordinates.
    pub rect: Rect,
    /// Whether a marker was painted for it.
    pub overlay: bool,
}

/// A candidate that was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedElement {
    pub node: NodeId,
    pub index: usize,
    pub reason: SkipReason,
}

/// Outcome of one `draw_labels` pass.
#[derive(Debug, Clone, Serialize)]
pub struct DrawReport {
    /// Number of selector matches.
    pub candidates: usize,
    pub labeled: Vec<LabeledElement>,
    pub skipped: Vec<SkippedElement>,
    pub stats: ResolveStats,
    /// The overlay wrapper attached by this pass.
    pub wrapper: NodeId,
}

impl DrawReport {
    pub fn marker_count(&self) -> usize {
        self.labeled.iter().filter(|e| e.overlay).count()
    }

    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }

    pub fn label_of(&self, node: NodeId) -> Option<&str> {
        self.labeled
            .iter()
            .find(|e| e.node == node)
            .map(|e| e.label.as_str())
    }
}

pub struct Labeler {
    config: Config,
    selector: Selector,
    oracle: VisibilityOracle,
    cache: ResolutionCache,
    renderer: OverlayRenderer,
}

impl Labeler {
    /// Create a labeler; fails if the configured interactive selector does not parse.
    pub fn new(config: &Config) -> Result<Self, LabelError> {
        let selector = Selector::parse(&config.selector.interactive)?;

        Ok(Self {
            config: config.clone(),
            selector,
            oracle: VisibilityOracle::new(&config.visibility),
            cache: ResolutionCache::new(&config.attributes),
            renderer: OverlayRenderer::new(&config.overlay),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    /// CSS injected by [`init`](Self::init).
    pub fn stylesheet(&self) -> String {
        stylesheet::overlay_css(&self.config.overlay)
    }

    /// Install the overlay stylesheet. Safe to call repeatedly.
    pub fn init<D: Document + ?Sized>(&self, doc: &mut D) -> Result<bool, LabelError> {
        stylesheet::install(doc, &self.config.overlay)
    }

    /// Label every eligible interactive element and paint the overlay.
    ///
    /// Elements touched by an earlier pass are skipped, and each call attaches
    /// a fresh overlay wrapper. A document without `<head>` is still labeled,
    /// just without the overlay stylesheet.
    pub fn draw_labels<D: Document + ?Sized>(&mut self, doc: &mut D) -> Result<DrawReport, LabelError> {
        if let Err(e) = self.init(doc) {
            warn!("Failed to install overlay stylesheet: {}", e);
        }
        if doc.body().is_none() {
            return Err(LabelError::MissingBody);
        }

        let candidates = doc.query_selector_all(&self.selector);
        let viewport = doc.viewport();
        debug!("Selector {:?} matched {} candidates", self.selector.as_str(), candidates.len());

        let assigner = LabelAssigner::new(&self.oracle, &self.config.attributes.label);
        let mut resolver = Resolver::new(&self.oracle, &mut self.cache);
        let mut registry = LabelRegistry::new();

        let mut labeled = vec![];
        let mut skipped = vec![];
        let mut markers = vec![];

        for (index, &node) in candidates.iter().enumerate() {
            let assignment = assigner.assign(doc, &mut resolver, &mut registry, node, index);
            let (label, source, overlay) = match assignment {
                Assignment::Skipped { reason } => {
                    skipped.push(SkippedElement { node, index, reason });
                    continue;
                }
                Assignment::Direct { label, source } => (label, source, false),
                Assignment::Labeled { label, source, .. } => (label, source, true),
            };

            let rect = doc
                .bounding_rect(node)
                .unwrap_or_default()
                .translate(viewport.scroll_x, viewport.scroll_y);

            if overlay {
                markers.push(MarkerSpec {
                    index,
                    label: label.clone(),
                    rect,
                });
            }
            labeled.push(LabeledElement {
                node,
                index,
                label,
                source,
                rect,
                overlay,
            });
        }

        let stats = resolver.stats();
        let wrapper = self.renderer.render(doc, &markers)?;

        info!(
            "Labeled {} of {} candidates ({} markers, {} skipped)",
            labeled.len(),
            candidates.len(),
            markers.len(),
            skipped.len()
        );
        debug!(
            "Resolver entered {} nodes, {} cache hits, max depth {}",
            stats.nodes_entered, stats.cache_hits, stats.max_depth
        );

        Ok(DrawReport {
            candidates: candidates.len(),
            labeled,
            skipped,
            stats,
            wrapper,
        })
    }

    /// Remove every overlay wrapper. Cache and label attributes are kept.
    pub fn remove_labels<D: Document + ?Sized>(&self, doc: &mut D) -> Result<usize, LabelError> {
        let removed = self.renderer.remove(doc)?;
        info!("Removed {} overlay wrappers", removed);
        Ok(removed)
    }

    /// Forget every resolved element so the next pass labels from scratch.
    ///
    /// Clears the resolution cache and strips the cache and final-label
    /// attributes from the document. Overlays are left alone. Returns how
    /// many elements carried one of the attributes.
    pub fn reset<D: Document + ?Sized>(&mut self, doc: &mut D) -> Result<usize, LabelError> {
        let [visible_text, aria_label] = self.cache.attribute_names();
        let label = self.config.attributes.label.as_str();
        let selector = Selector::any_attribute(&[visible_text, aria_label, label])?;
        let marked = doc.query_selector_all(&selector);

        self.cache.clear(doc, &marked);
        for &node in &marked {
            if let Err(e) = doc.remove_attribute(node, &self.config.attributes.label) {
                warn!("Failed to clear label on {}: {}", node, e);
            }
        }

        info!("Reset {} labeled elements", marked.len());
        Ok(marked.len())
    }
}
