//! Document and selector errors.

use thiserror::Error;

use crate::types::NodeId;

/// Selector parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid selector {input:?} at offset {position}: {message}")]
pub struct SelectorError {
    pub input: String,
    pub position: usize,
    pub message: String,
}

impl SelectorError {
    pub fn new(input: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            position,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node is not an element: {0}")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child} under {parent}: it would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("The document root cannot be removed")]
    CannotRemoveRoot,

    #[error(transparent)]
    InvalidSelector(#[from] SelectorError),
}
