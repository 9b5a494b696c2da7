//! # Autolabel Protocols
//!
//! Document abstraction for the autolabel engine.
//! Contains only interface definitions and value types - no labeling logic.
//!
//! ## Core Types
//!
//! - [`Document`] - Trait over a live (or snapshotted) document tree
//! - [`Selector`] - The interactive-element selector grammar
//! - [`Rect`] / [`Viewport`] - Geometry in viewport coordinates
//! - [`ComputedStyle`] - Resolved style properties relevant to visibility

pub mod document;
pub mod error;
pub mod selector;
pub mod types;

pub use document::Document;
pub use error::{DocumentError, SelectorError};
pub use selector::Selector;
pub use types::*;
