//! Errors reported by graph operations and metrics.

use thiserror::Error;

use crate::graph::VertexIndex;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex index outside `[0, size)` was passed in.
    #[error("vertex {vertex} is out of range for a graph of size {size}")]
    VertexOutOfRange { vertex: VertexIndex, size: usize },

    /// The vertex classes handed to a community metric don't partition the graph.
    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    /// A per-vertex input vector doesn't have one entry per vertex.
    #[error("expected {expected} per-vertex values, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

impl GraphError {
    pub fn invalid_partition<S: Into<String>>(msg: S) -> Self {
        GraphError::InvalidPartition(msg.into())
    }
}
