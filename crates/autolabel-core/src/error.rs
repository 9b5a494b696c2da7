//! Labeling errors.
//!
//! A labeling pass degrades instead of failing: per-element problems become
//! skips or fallbacks. Only a document missing the structure the overlay needs,
//! or an unusable configured selector, fails a pass.

use thiserror::Error;

use autolabel_protocols::{DocumentError, SelectorError};

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Document has no <head> to hold the overlay stylesheet")]
    MissingHead,

    #[error("Document has no <body> to hold the overlay")]
    MissingBody,

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Invalid selector: {0}")]
    InvalidSelector(#[from] SelectorError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use autolabel_protocols::NodeId;

    #[test]
    fn test_missing_body_display() {
        assert!(LabelError::MissingBody.to_string().contains("<body>"));
    }

    #[test]
    fn test_from_document_error() {
        let err: LabelError = DocumentError::NodeNotFound(NodeId(3)).into();
        assert!(matches!(err, LabelError::Document(_)));
        assert!(err.to_string().contains("#3"));
    }

    #[test]
    fn test_from_selector_error() {
        let err: LabelError = SelectorError::new("[", 1, "expected attribute name").into();
        assert!(err.to_string().contains("Invalid selector"));
    }
}
