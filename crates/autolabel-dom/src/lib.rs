//! In-memory document model for the autolabel engine.
//!
//! [`MemoryDocument`] implements [`autolabel_protocols::Document`] over an
//! arena of nodes. Pages captured from a browser are exchanged as JSON
//! [`PageSnapshot`]s carrying each element's attributes, resolved style and
//! viewport-relative rectangle.

mod error;
mod memory;
mod snapshot;

pub use error::SnapshotError;
pub use memory::MemoryDocument;
pub use snapshot::{PageSnapshot, SnapshotElement, SnapshotNode};

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
