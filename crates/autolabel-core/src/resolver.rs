//! Text/label resolver.
//!
//! Computes an element's aggregated visible text and best-match accessible
//! label. The walk is an explicit depth-first post-order traversal over a
//! frame stack: each node is checked for visibility and for a cache hit on
//! entry, and an element's result is stored in the [`ResolutionCache`] once
//! all of its children have been folded in.

use std::collections::HashSet;

use serde::Serialize;
use tracing::trace;

use autolabel_protocols::{Document, NodeId, NodeKind};

use crate::cache::{DomAttrs, ResolutionCache};
use crate::sanitize::sanitize;
use crate::visibility::VisibilityOracle;

/// Counters describing the work done by one resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Nodes visited, including text nodes and cache hits.
    pub nodes_entered: usize,
    /// Elements answered from the cache.
    pub cache_hits: usize,
    /// Elements resolved and stored.
    pub resolved: usize,
    /// Deepest frame stack seen.
    pub max_depth: usize,
}

/// Element awaiting its children.
struct Frame {
    node: NodeId,
    children: Vec<NodeId>,
    next: usize,
    visible_text: String,
    aria_label: String,
}

impl Frame {
    fn next_child(&mut self) -> Option<NodeId> {
        let child = self.children.get(self.next).copied()?;
        self.next += 1;
        Some(child)
    }

    fn absorb(&mut self, child: DomAttrs) {
        let joined = format!("{} {}", self.visible_text, child.visible_text);
        self.visible_text = joined.trim().to_string();

        if self.aria_label.is_empty() && !child.aria_label.is_empty() {
            self.aria_label = child.aria_label;
        }
    }
}

enum Entry {
    Resolved(DomAttrs),
    Open(Frame),
}

pub struct Resolver<'a> {
    oracle: &'a VisibilityOracle,
    cache: &'a mut ResolutionCache,
    stats: ResolveStats,
}

impl<'a> Resolver<'a> {
    pub fn new(oracle: &'a VisibilityOracle, cache: &'a mut ResolutionCache) -> Self {
        Self {
            oracle,
            cache,
            stats: ResolveStats::default(),
        }
    }

    pub fn stats(&self) -> ResolveStats {
        self.stats
    }

    pub fn is_touched<D: Document + ?Sized>(&mut self, doc: &D, node: NodeId) -> bool {
        self.cache.is_touched(doc, node)
    }

    /// Resolve the visible text and accessible label of `node`.
    ///
    /// Invisible elements resolve to empty attrs and are not cached. Touched
    /// elements return their cached attrs without walking their subtree.
    pub fn resolve<D: Document + ?Sized>(&mut self, doc: &mut D, node: NodeId) -> DomAttrs {
        let mut stack = match self.enter(&*doc, node) {
            Entry::Resolved(attrs) => return attrs,
            Entry::Open(frame) => vec![frame],
        };
        self.stats.max_depth = self.stats.max_depth.max(1);

        while let Some(top) = stack.last_mut() {
            match top.next_child() {
                Some(child) => match self.enter(&*doc, child) {
                    Entry::Resolved(attrs) => top.absorb(attrs),
                    Entry::Open(frame) => {
                        stack.push(frame);
                        self.stats.max_depth = self.stats.max_depth.max(stack.len());
                    }
                },
                None => {
                    let Some(done) = stack.pop() else { break };
                    let attrs = self.finish(doc, done);
                    match stack.last_mut() {
                        Some(parent) => parent.absorb(attrs),
                        None => return attrs,
                    }
                }
            }
        }

        DomAttrs::default()
    }

    fn enter<D: Document + ?Sized>(&mut self, doc: &D, node: NodeId) -> Entry {
        self.stats.nodes_entered += 1;

        match doc.kind(node) {
            Some(NodeKind::Text) => Entry::Resolved(DomAttrs::text(doc.text(node).unwrap_or_default())),
            Some(NodeKind::Element) => {
                if !self.oracle.is_visible(doc, node, false) {
                    return Entry::Resolved(DomAttrs::default());
                }

                if let Some(cached) = self.cache.lookup(doc, node) {
                    self.stats.cache_hits += 1;
                    return Entry::Resolved(cached);
                }

                let aria_label = accessible_label(doc, node);
                // Never descend into SVG for text.
                let children = if doc.tag_name(node) == Some("svg") {
                    vec![]
                } else {
                    doc.children(node)
                };

                Entry::Open(Frame {
                    node,
                    children,
                    next: 0,
                    visible_text: String::new(),
                    aria_label,
                })
            }
            None => Entry::Resolved(DomAttrs::default()),
        }
    }

    fn finish<D: Document + ?Sized>(&mut self, doc: &mut D, frame: Frame) -> DomAttrs {
        let attrs = DomAttrs {
            visible_text: sanitize(&frame.visible_text),
            aria_label: frame.aria_label,
        };
        trace!("Resolved {} as {:?}", frame.node, attrs.visible_text);
        self.cache.store(doc, frame.node, attrs.clone());
        self.stats.resolved += 1;
        attrs
    }
}

/// Whether `node` takes typed text directly (`input`, `textarea`).
pub fn accepts_text_input<D: Document + ?Sized>(doc: &D, node: NodeId) -> bool {
    matches!(doc.tag_name(node), Some("input" | "textarea"))
}

/// The element's own accessible label.
///
/// `aria-labelledby` wins when it yields any text: each distinct referenced
/// id contributes the target's current value (text inputs) or full text
/// content, whatever the target's visibility. Unknown ids contribute nothing.
/// Otherwise a non-empty `aria-label` is used.
pub fn accessible_label<D: Document + ?Sized>(doc: &D, node: NodeId) -> String {
    if let Some(ids) = doc.attribute(node, "aria-labelledby") {
        let mut seen = HashSet::new();
        let parts: Vec<String> = ids
            .split_whitespace()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| doc.element_by_id(id))
            .map(|target| {
                if accepts_text_input(doc, target) {
                    doc.value(target).unwrap_or_default().to_string()
                } else {
                    doc.text_content(target)
                }
            })
            .collect();

        let label = parts.join(" ").trim().to_string();
        if !label.is_empty() {
            return label;
        }
    }

    doc.attribute(node, "aria-label")
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
