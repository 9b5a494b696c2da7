//! Label assigner.
//!
//! Turns one candidate element into exactly one final label, or skips it.
//!
//! ## Precedence
//!
//! 1. Text inputs: current value, then placeholder (no overlay, no registry)
//! 2. Aggregated visible text
//! 3. Accessible label
//! 4. Tag name plus selector-match index (`a` reads as `button`)
//!
//! Cases 2-4 pass through the [`LabelRegistry`]: the first occurrence of a
//! base is used as is, the Nth occurrence becomes `base#N`.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use autolabel_protocols::{Document, NodeId};

use crate::resolver::{accepts_text_input, Resolver};
use crate::sanitize::sanitize;
use crate::visibility::VisibilityOracle;

/// Why a candidate received no label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Already resolved earlier, e.g. as a descendant of another candidate.
    AlreadyTouched,
    AriaHidden,
    NegativeTabIndex,
    /// Not rendered, or entirely outside the viewport.
    NotVisible,
}

/// Where a label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    Value,
    Placeholder,
    VisibleText,
    AriaLabel,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Assignment {
    Skipped { reason: SkipReason },
    /// Text-input fast path; receives no overlay.
    Direct { label: String, source: LabelSource },
    Labeled {
        label: String,
        base: String,
        source: LabelSource,
    },
}

impl Assignment {
    pub fn label(&self) -> Option<&str> {
        match self {
            Assignment::Skipped { .. } => None,
            Assignment::Direct { label, .. } | Assignment::Labeled { label, .. } => Some(label),
        }
    }

    /// Whether the element gets an overlay marker.
    pub fn has_overlay(&self) -> bool {
        matches!(self, Assignment::Labeled { .. })
    }
}

/// Occurrence counts of label bases within one `draw_labels` pass.
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    counts: HashMap<String, usize>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next label for `base`: `base`, then `base#2`, `base#3`, ...
    pub fn claim(&mut self, base: &str) -> String {
        let count = self.counts.entry(base.to_string()).or_insert(0);
        let label = if *count == 0 {
            base.to_string()
        } else {
            format!("{}#{}", base, *count + 1)
        };
        *count += 1;
        label
    }

    pub fn count(&self, base: &str) -> usize {
        self.counts.get(base).copied().unwrap_or(0)
    }
}

pub struct LabelAssigner<'a> {
    oracle: &'a VisibilityOracle,
    label_attr: &'a str,
}

impl<'a> LabelAssigner<'a> {
    pub fn new(oracle: &'a VisibilityOracle, label_attr: &'a str) -> Self {
        Self { oracle, label_attr }
    }

    /// Label the candidate at selector-match position `index`.
    pub fn assign<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        resolver: &mut Resolver<'_>,
        registry: &mut LabelRegistry,
        node: NodeId,
        index: usize,
    ) -> Assignment {
        if let Some(reason) = self.skip_reason(&*doc, resolver, node) {
            debug!("Skipping candidate {} ({}): {:?}", index, node, reason);
            return Assignment::Skipped { reason };
        }

        if let Some((label, source)) = direct_input_label(&*doc, node) {
            self.write_label(doc, node, &label);
            return Assignment::Direct { label, source };
        }

        let attrs = resolver.resolve(doc, node);
        let (base, source) = if !attrs.visible_text.is_empty() {
            (attrs.visible_text, LabelSource::VisibleText)
        } else if !attrs.aria_label.is_empty() {
            (attrs.aria_label, LabelSource::AriaLabel)
        } else {
            (fallback_base(&*doc, node, index), LabelSource::Fallback)
        };

        let label = registry.claim(&base);
        debug!("Labeled candidate {} ({}) as {:?}", index, node, label);
        self.write_label(doc, node, &label);

        Assignment::Labeled {
            label,
            base,
            source,
        }
    }

    fn skip_reason<D: Document + ?Sized>(
        &self,
        doc: &D,
        resolver: &mut Resolver<'_>,
        node: NodeId,
    ) -> Option<SkipReason> {
        if resolver.is_touched(doc, node) {
            return Some(SkipReason::AlreadyTouched);
        }
        if doc.attribute(node, "aria-hidden") == Some("true") {
            return Some(SkipReason::AriaHidden);
        }
        if doc
            .attribute(node, "tabindex")
            .and_then(parse_int_prefix)
            .is_some_and(|tabindex| tabindex < 0)
        {
            return Some(SkipReason::NegativeTabIndex);
        }
        if !self.oracle.is_visible(doc, node, true) {
            return Some(SkipReason::NotVisible);
        }
        None
    }

    fn write_label<D: Document + ?Sized>(&self, doc: &mut D, node: NodeId, label: &str) {
        if let Err(e) = doc.set_attribute(node, self.label_attr, label) {
            warn!("Failed to write label onto {}: {}", node, e);
        }
    }
}

/// Value, then placeholder, of a text input.
fn direct_input_label<D: Document + ?Sized>(doc: &D, node: NodeId) -> Option<(String, LabelSource)> {
    if !accepts_text_input(doc, node) {
        return None;
    }

    if let Some(value) = doc.value(node).filter(|v| !v.is_empty()) {
        return Some((sanitize(value), LabelSource::Value));
    }

    doc.attribute(node, "placeholder")
        .filter(|p| !p.is_empty())
        .map(|placeholder| (sanitize(placeholder), LabelSource::Placeholder))
}

fn fallback_base<D: Document + ?Sized>(doc: &D, node: NodeId, index: usize) -> String {
    let tag = match doc.tag_name(node) {
        Some("a") => "button",
        Some(tag) => tag,
        None => "node",
    };
    format!("{}#{}", tag.to_ascii_lowercase(), index)
}

/// Leading integer of `s`, ignoring leading whitespace and trailing junk.
///
/// `"-1"` and `" -2px"` parse; `"abc"` and `""` do not, and such a
/// `tabindex` leaves the element eligible. Out-of-range values saturate.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Only overflow can fail here; saturate so the sign survives.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

#[cfg(test)]
#[path = "assigner_tests.rs"]
mod tests;
