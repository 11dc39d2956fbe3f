//! Common configuration and shared test cases for the SQLMCS workspace.
//!
//! This crate provides the search configuration consumed by the matcher and the
//! CLI, together with a collection of SQL query pairs used as end-to-end cases.

mod config;
mod test_cases;

pub use crate::config::*;
pub use crate::test_cases::*;
