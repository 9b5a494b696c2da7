//! Resolution cache.
//!
//! A side-table keyed by node identity holding the resolved text and label of
//! every element the resolver has finished. An element present in the table
//! is "touched": its entry is ground truth and its subtree is never walked
//! again.
//!
//! With mirroring enabled the table is also written onto the DOM as the two
//! cache attributes, and a table miss falls back to reading them, so a
//! document that already carries both markers is treated as touched.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use autolabel_config::AttributesConfig;
use autolabel_protocols::{Document, NodeId};

/// Resolved text and accessible label of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomAttrs {
    pub visible_text: String,
    pub aria_label: String,
}

impl DomAttrs {
    pub fn text(visible_text: impl Into<String>) -> Self {
        Self {
            visible_text: visible_text.into(),
            aria_label: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolutionCache {
    entries: HashMap<NodeId, DomAttrs>,
    visible_text_attr: String,
    aria_label_attr: String,
    mirror: bool,
}

impl ResolutionCache {
    pub fn new(config: &AttributesConfig) -> Self {
        Self {
            entries: HashMap::new(),
            visible_text_attr: config.visible_text.clone(),
            aria_label_attr: config.aria_label.clone(),
            mirror: config.mirror_cache,
        }
    }

    /// Cached attrs for `node`, if it has been touched.
    pub fn lookup<D: Document + ?Sized>(&mut self, doc: &D, node: NodeId) -> Option<DomAttrs> {
        if let Some(attrs) = self.entries.get(&node) {
            return Some(attrs.clone());
        }

        if !self.mirror {
            return None;
        }

        let visible_text = doc.attribute(node, &self.visible_text_attr)?;
        let aria_label = doc.attribute(node, &self.aria_label_attr)?;
        let attrs = DomAttrs {
            visible_text: visible_text.to_string(),
            aria_label: aria_label.to_string(),
        };
        self.entries.insert(node, attrs.clone());
        Some(attrs)
    }

    pub fn is_touched<D: Document + ?Sized>(&mut self, doc: &D, node: NodeId) -> bool {
        self.lookup(doc, node).is_some()
    }

    /// Mark `node` as touched with `attrs`.
    ///
    /// A failed mirror write is logged; the side-table entry still stands.
    pub fn store<D: Document + ?Sized>(&mut self, doc: &mut D, node: NodeId, attrs: DomAttrs) {
        if self.mirror {
            let written = doc
                .set_attribute(node, &self.visible_text_attr, &attrs.visible_text)
                .and_then(|_| doc.set_attribute(node, &self.aria_label_attr, &attrs.aria_label));
            if let Err(e) = written {
                warn!("Failed to mirror cache attributes onto {}: {}", node, e);
            }
        }
        self.entries.insert(node, attrs);
    }

    /// Forget every entry and strip mirrored cache attributes from `nodes`.
    pub fn clear<D: Document + ?Sized>(&mut self, doc: &mut D, nodes: &[NodeId]) {
        if self.mirror {
            for &node in self.entries.keys().chain(nodes) {
                for name in [&self.visible_text_attr, &self.aria_label_attr] {
                    if let Err(e) = doc.remove_attribute(node, name) {
                        warn!("Failed to clear cache attribute {} on {}: {}", name, node, e);
                    }
                }
            }
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attribute names this cache mirrors onto the DOM.
    pub fn attribute_names(&self) -> [&str; 2] {
        [self.visible_text_attr.as_str(), self.aria_label_attr.as_str()]
    }
}
