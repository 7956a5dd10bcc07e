//! Error types for DOM operations.

use thiserror::Error;

/// Errors raised by tree mutations on [`Node`](crate::dom::Node).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The insertion would produce an invalid tree: a node inside itself or
    /// one of its descendants, or a child under a text node.
    #[error("hierarchy request error: cannot insert {child} into {parent}")]
    HierarchyRequest { parent: String, child: String },

    /// The reference node is not a child of the node being mutated.
    #[error("not found: {child} is not a child of {parent}")]
    NotFound { parent: String, child: String },
}

pub type Result<T> = std::result::Result<T, DomError>;
