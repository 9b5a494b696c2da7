//! # Autolabel Core
//!
//! The labeling engine. Annotates every interactive element of a document
//! with a stable, human-readable label and paints positioned overlay markers
//! so an automation agent can address elements by label.
//!
//! ## Components
//!
//! - [`VisibilityOracle`] - Is an element rendered (and optionally on screen)
//! - [`sanitize`] - Strips decorative glyphs from resolved text
//! - [`ResolutionCache`] - Per-node memo of resolved text and label
//! - [`Resolver`] - Aggregated visible text and accessible label of a subtree
//! - [`LabelAssigner`] / [`LabelRegistry`] - Label precedence and uniqueness
//! - [`OverlayRenderer`] - Marker placement and teardown
//! - [`Labeler`] - The `draw_labels` / `remove_labels` entry points

pub mod assigner;
pub mod cache;
pub mod error;
pub mod labeler;
pub mod overlay;
pub mod resolver;
pub mod sanitize;
pub mod stylesheet;
pub mod visibility;

pub use assigner::{Assignment, LabelAssigner, LabelRegistry, LabelSource, SkipReason};
pub use cache::{DomAttrs, ResolutionCache};
pub use error::LabelError;
pub use labeler::{DrawReport, LabeledElement, Labeler, SkippedElement};
pub use overlay::{MarkerSpec, OverlayRenderer};
pub use resolver::{ResolveStats, Resolver};
pub use sanitize::sanitize;
pub use visibility::VisibilityOracle;
