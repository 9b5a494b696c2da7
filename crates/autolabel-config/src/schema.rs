//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// The interactive-element selector scanned by `draw_labels`.
pub const DEFAULT_INTERACTIVE_SELECTOR: &str = "a, button, details, input, label, option, select, \
    textarea, [onclick], [onmouseover], [onmousedown], [onmouseup], [role=\"button\"], \
    [role=\"link\"], [role=\"textbox\"]";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub attributes: AttributesConfig,

    #[serde(default)]
    pub selector: SelectorConfig,

    #[serde(default)]
    pub visibility: VisibilityConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Names of the DOM attributes written onto processed elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributesConfig {
    /// Cached aggregated visible text.
    #[serde(default = "default_visible_text_attr")]
    pub visible_text: String,

    /// Cached accessible label.
    #[serde(default = "default_aria_label_attr")]
    pub aria_label: String,

    /// Final label, used by automation to re-select the element.
    #[serde(default = "default_label_attr")]
    pub label: String,

    /// Mirror the resolution cache onto the DOM as the two cache attributes.
    #[serde(default = "default_true")]
    pub mirror_cache: bool,
}

impl Default for AttributesConfig {
    fn default() -> Self {
        Self {
            visible_text: default_visible_text_attr(),
            aria_label: default_aria_label_attr(),
            label: default_label_attr(),
            mirror_cache: true,
        }
    }
}

fn default_visible_text_attr() -> String {
    "data-autolabel-text".to_string()
}

fn default_aria_label_attr() -> String {
    "data-autolabel-aria".to_string()
}

fn default_label_attr() -> String {
    "data-autolabel".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_interactive")]
    pub interactive: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            interactive: default_interactive(),
        }
    }
}

fn default_interactive() -> String {
    DEFAULT_INTERACTIVE_SELECTOR.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityConfig {
    /// Elements with a resolved opacity below this are invisible.
    #[serde(default = "default_min_opacity")]
    pub min_opacity: f64,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            min_opacity: default_min_opacity(),
        }
    }
}

fn default_min_opacity() -> f64 {
    0.1
}

/// Overlay presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Structural class of the wrapper; `remove_labels` deletes every element carrying it.
    #[serde(default = "default_wrapper_class")]
    pub wrapper_class: String,

    #[serde(default = "default_marker_class")]
    pub marker_class: String,

    /// Id of the injected `<style>` element.
    #[serde(default = "default_style_id")]
    pub style_id: String,

    /// Stacking index of the marker for the first selector match.
    #[serde(default = "default_z_index_base")]
    pub z_index_base: i64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            wrapper_class: default_wrapper_class(),
            marker_class: default_marker_class(),
            style_id: default_style_id(),
            z_index_base: default_z_index_base(),
        }
    }
}

impl OverlayConfig {
    /// Class of the badge element inside each marker.
    pub fn badge_class(&self) -> String {
        format!("{}-badge", self.marker_class)
    }
}

fn default_wrapper_class() -> String {
    "autolabel-overlay".to_string()
}

fn default_marker_class() -> String {
    "autolabel-marker".to_string()
}

fn default_style_id() -> String {
    "autolabel-style".to_string()
}

fn default_z_index_base() -> i64 {
    10000
}
