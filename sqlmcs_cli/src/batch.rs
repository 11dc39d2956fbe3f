//! Batch comparison of query pair files.
//!
//! Each file holds two SQL queries separated by `;`. A file that cannot be
//! read, split, parsed or searched is reported and skipped; it never stops
//! the rest of the batch.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sqlmcs_common::Config;
use sqlmcs_query::{QueryError, query_graph};
use sqlmcs_subgraph::{Comparison, Graph, SearchError, compare};
use thiserror::Error;

use crate::render;

/// Why a single file was skipped.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The file could not be read.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not split into exactly two queries.
    #[error("'{}' must contain exactly 2 SQL queries separated by ';', found {found}", path.display())]
    QueryCount { path: PathBuf, found: usize },

    /// One of the queries could not be turned into a graph.
    #[error("query {index} of '{}': {source}", path.display())]
    Query {
        path: PathBuf,
        index: usize,
        #[source]
        source: QueryError,
    },

    /// The search tripped its recursion guard.
    #[error("comparison of '{}' failed: {source}", path.display())]
    Search {
        path: PathBuf,
        #[source]
        source: SearchError,
    },
}

impl BatchError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Split file contents on `;`, dropping empty fragments.
pub fn split_queries(contents: &str) -> Vec<&str> {
    contents
        .split(';')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .collect()
}

/// Read the two queries of a pair file.
///
/// # Errors
///
/// [`BatchError::Io`] if the file cannot be read and
/// [`BatchError::QueryCount`] unless it holds exactly two queries.
pub fn read_queries(path: &Path) -> Result<[String; 2], BatchError> {
    let contents = fs::read_to_string(path).map_err(|e| BatchError::io(path, e))?;
    match split_queries(&contents).as_slice() {
        [left, right] => Ok([(*left).to_string(), (*right).to_string()]),
        other => Err(BatchError::QueryCount {
            path: path.to_path_buf(),
            found: other.len(),
        }),
    }
}

/// Everything computed for one pair file.
#[derive(Debug)]
pub struct FileReport {
    pub left_sql: String,
    pub right_sql: String,
    pub left: Graph,
    pub right: Graph,
    pub comparison: Comparison,
    /// Where the common subgraph was written, if it was.
    pub visualization: Option<PathBuf>,
}

/// Compare the two queries of `path`.
///
/// When `visualization_dir` is set and the queries share a subgraph, it is
/// written there as `<file stem>.mcs.dot`.
///
/// # Errors
///
/// Any [`BatchError`] describing why the file was skipped.
pub fn compare_file(
    path: &Path,
    config: &Config,
    visualization_dir: Option<&Path>,
) -> Result<FileReport, BatchError> {
    let [left_sql, right_sql] = read_queries(path)?;

    let graph_of = |index: usize, sql: &str| {
        query_graph(sql).map_err(|source| BatchError::Query {
            path: path.to_path_buf(),
            index,
            source,
        })
    };
    let left = graph_of(1, &left_sql)?;
    let right = graph_of(2, &right_sql)?;

    let comparison = compare(&left, &right, config).map_err(|source| BatchError::Search {
        path: path.to_path_buf(),
        source,
    })?;

    // A failed write costs the picture, not the comparison.
    let visualization = match (visualization_dir, &comparison.mcs) {
        (Some(dir), Some(mcs)) => {
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            let target = dir.join(format!("{stem}.mcs.dot"));
            let title = format!("MCS - {}", file_name(path));
            match render::write_dot(mcs, &title, &target) {
                Ok(()) => {
                    tracing::debug!("wrote visualization to {}", target.display());
                    Some(target)
                }
                Err(e) => {
                    tracing::warn!("{}", BatchError::io(&target, e));
                    None
                }
            }
        }
        _ => None,
    };

    Ok(FileReport {
        left_sql,
        right_sql,
        left,
        right,
        comparison,
        visualization,
    })
}

/// Outcome for one input file, in input order.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<FileReport, BatchError>,
}

/// Compare every file, concurrently when `config.parallel` is set.
pub fn run_batch(files: &[PathBuf], config: &Config, visualization_dir: Option<&Path>) -> Vec<FileOutcome> {
    let run = |path: &PathBuf| {
        let result = compare_file(path, config, visualization_dir);
        match &result {
            Ok(report) => tracing::info!(
                "{}: similarity {:.2}%",
                path.display(),
                report.comparison.similarity
            ),
            Err(e) => tracing::warn!("skipping {}: {e}", path.display()),
        }
        FileOutcome {
            path: path.clone(),
            result,
        }
    };

    if config.parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = file_name(&self.path);
        writeln!(f, "--- Processing test case: {name} ---")?;

        match &self.result {
            Ok(report) => {
                writeln!(f, "Query A: {}", report.left_sql)?;
                writeln!(f, "Query B: {}", report.right_sql)?;
                writeln!(f, "Graph A: {}", report.left)?;
                writeln!(f, "Graph B: {}", report.right)?;
                writeln!(f)?;

                let comparison = &report.comparison;
                writeln!(f, "Equivalence level: {:.2}%", comparison.similarity)?;
                if comparison.mcs_len() > 0 {
                    writeln!(f, "   (found an MCS with {} nodes)", comparison.mcs_len())?;
                } else {
                    writeln!(f, "   (no significant common subgraph found)")?;
                }
                if comparison.truncated {
                    writeln!(f, "   (search stopped early, score is a lower bound)")?;
                }
                if let Some(target) = &report.visualization {
                    writeln!(f, "   (visualization written to {})", target.display())?;
                }
            }
            Err(e) => writeln!(f, "Error: {e}")?,
        }

        write!(f, "{}", "-".repeat(name.len() + 29))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragments_are_dropped() {
        assert_eq!(
            split_queries("SELECT a FROM t;;\n  SELECT b FROM u ;\n"),
            ["SELECT a FROM t", "SELECT b FROM u"]
        );
        assert!(split_queries(" ; ;").is_empty());
    }
}
