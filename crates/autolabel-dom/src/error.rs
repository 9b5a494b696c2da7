//! Snapshot errors.

use thiserror::Error;

use autolabel_protocols::DocumentError;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot root must be an element")]
    TextRoot,

    #[error(transparent)]
    Document(#[from] DocumentError),
}
