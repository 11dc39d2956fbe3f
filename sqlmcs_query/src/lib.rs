//! SQL to query graph conversion.
//!
//! A SELECT statement is parsed with a pest grammar into a small syntax tree,
//! then turned into a [`Graph`] of TABLE, COLUMN and FILTER nodes:
//!
//! ```ignore
//! let graph = sqlmcs_query::query_graph(
//!     "SELECT u.name FROM users u WHERE u.status = 'active'",
//! )?;
//! assert_eq!(graph.len(), 4);
//! ```

pub mod ast;
mod builder;
mod error;
mod parser;

use sqlmcs_subgraph::Graph;

pub use crate::builder::{FilterKind, FilterPredicate, build_graph, filter_predicates};
pub use crate::error::QueryError;
pub use crate::parser::parse_select;

/// Parse `sql` and build its query graph.
///
/// # Errors
///
/// See [`parse_select`] and [`build_graph`].
pub fn query_graph(sql: &str) -> Result<Graph, QueryError> {
    let statement = parse_select(sql)?;
    let graph = build_graph(&statement)?;
    tracing::debug!("query graph for '{}': {}", sql.trim(), graph);
    Ok(graph)
}
