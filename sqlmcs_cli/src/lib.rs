//! Library side of the `sqlmcs` binary: argument parsing, batch processing
//! of query pair files and DOT rendering.

pub mod args;
pub mod batch;
pub mod render;
