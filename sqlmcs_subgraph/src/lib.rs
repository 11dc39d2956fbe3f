//! Maximum common subgraph search over SQL query graphs.
//!
//! A query is modelled as a small directed [`Graph`] of tables, columns and
//! filter predicates. [`McsMatcher`] finds the largest induced subgraph two such
//! graphs have in common, and [`compare`] turns that into a similarity score:
//!
//! ```ignore
//! use sqlmcs_common::Config;
//! use sqlmcs_subgraph::{Graph, NodeKind, compare};
//!
//! let mut a = Graph::new();
//! let users = a.add_node(NodeKind::Table, "users");
//! let status = a.add_node(NodeKind::Column, "status");
//! a.add_edge(users, status)?;
//!
//! let mut b = Graph::new();
//! b.add_node(NodeKind::Table, "users");
//!
//! let result = compare(&a, &b, &Config::default())?;
//! assert_eq!(result.similarity, 100.0);
//! ```

mod candidates;
mod constraints;
mod error;
mod graph;
mod index;
mod mapping;
mod matcher;
mod node;
mod progress;
mod similarity;
mod state;

pub use constraints::{ExactMatch, FnMatcher, KindMatch, NodeMatcher};
pub use error::{GraphError, SearchError};
pub use graph::Graph;
pub use mapping::Mapping;
pub use matcher::{McsMatcher, McsOutcome};
pub use node::{Node, NodeId, NodeKind};
pub use progress::{CancellationFlag, Progress, ProgressSnapshot};
pub use similarity::{
    Comparison, compare, compare_with, extract_mcs, score, similarity_percentage,
};
