//! Error types for graph construction and search.
//!
//! Only malformed construction calls and the recursion guard are errors.
//! Empty inputs and zero overlap are ordinary results.

use thiserror::Error;

use crate::node::NodeId;

/// Errors raised while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge referenced a node id that does not exist in the graph.
    #[error("invalid edge {from} -> {to}: one or both nodes not in the graph")]
    InvalidReference { from: NodeId, to: NodeId },
}

impl GraphError {
    /// Create an invalid reference error.
    pub const fn invalid_reference(from: NodeId, to: NodeId) -> Self {
        Self::InvalidReference { from, to }
    }
}

/// Errors raised by the maximum common subgraph search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The recursion guard tripped.
    #[error("search depth {depth} exceeds the configured limit of {limit}")]
    ResourceExceeded { depth: usize, limit: usize },
}

impl SearchError {
    /// Create a resource exceeded error.
    pub const fn resource_exceeded(depth: usize, limit: usize) -> Self {
        Self::ResourceExceeded { depth, limit }
    }
}
