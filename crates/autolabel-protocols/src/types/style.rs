//! Resolved style.

use serde::{Deserialize, Serialize};

/// The subset of an element's resolved style that decides whether it renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    #[serde(default = "default_display")]
    pub display: String,

    #[serde(default = "default_visibility")]
    pub visibility: String,

    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: default_display(),
            visibility: default_visibility(),
            opacity: default_opacity(),
        }
    }
}

impl ComputedStyle {
    pub fn hidden() -> Self {
        Self {
            display: "none".to_string(),
            ..Self::default()
        }
    }

    pub fn with_opacity(opacity: f64) -> Self {
        Self {
            opacity,
            ..Self::default()
        }
    }
}

fn default_display() -> String {
    "block".to_string()
}

fn default_visibility() -> String {
    "visible".to_string()
}

fn default_opacity() -> f64 {
    1.0
}
