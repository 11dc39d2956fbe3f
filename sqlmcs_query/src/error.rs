//! Error types for turning SQL text into a query graph.

use sqlmcs_subgraph::GraphError;
use thiserror::Error;

/// Errors raised while parsing a query or building its graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The text is not valid for the supported grammar.
    #[error("parse error at offset {position}: {message}")]
    Parse { position: usize, message: String },

    /// Valid SQL this crate does not turn into a graph.
    #[error("unsupported query: {0}")]
    Unsupported(String),

    /// The builder produced an invalid edge.
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
}

impl QueryError {
    /// Create a parse error.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create an unsupported query error.
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }
}
