//! Error type shared by the graph and its adjacency sets.
//!
//! Only caller mistakes surface as [`GraphError`]. Broken internal invariants are
//! delivered to the graph's [`ViolationReporter`](crate::graph::ViolationReporter)
//! instead.

use thiserror::Error;

/// Errors returned by graph and neighborhood operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The vertex is already present.
    #[error("vertex already exists: {0}")]
    DuplicateVertex(String),
    /// The vertex is not present.
    #[error("vertex does not exist: {0}")]
    UnknownVertex(String),
    /// An undefined identity (for example a negative signed id) was supplied.
    #[error("element must be a defined vertex identity")]
    UndefinedElement,
    /// A physical slot outside `[0, vertex_count)` was requested.
    #[error("physical slot {slot} out of range for {vertex_count} vertices")]
    SlotOutOfRange {
        /// The requested slot.
        slot: usize,
        /// Number of occupied slots at the time of the request.
        vertex_count: usize,
    },
    /// A configuration document could not be parsed.
    #[error("invalid graph configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn duplicate(id: &impl core::fmt::Debug) -> Self {
        GraphError::DuplicateVertex(format!("{id:?}"))
    }

    pub(crate) fn unknown(id: &impl core::fmt::Debug) -> Self {
        GraphError::UnknownVertex(format!("{id:?}"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
