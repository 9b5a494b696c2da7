//! Shared value types.

mod geometry;
mod node;
mod style;

pub use geometry::{Rect, Viewport};
pub use node::{NodeId, NodeKind};
pub use style::ComputedStyle;
