//! SQLMCS CLI
//!
//! Entry point for the `sqlmcs` command-line tool. Reads files of SQL query
//! pairs, compares each pair by maximum common subgraph and prints a
//! similarity report per file.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};

use clap::Parser;
use sqlmcs_cli::args::Args;
use sqlmcs_cli::batch;
use tracing::info;

/// Runs the batch.
///
/// Logging goes to stderr so stdout carries only the report. Files that fail
/// are reported in place; the exit status stays successful.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.to_config();
    let visualization_dir = args.visualization_dir();

    if let Some(dir) = visualization_dir {
        std::fs::create_dir_all(dir)?;
    }

    info!(
        "comparing {} file(s) with {} matching",
        args.files.len(),
        config.node_match
    );

    let outcomes = batch::run_batch(&args.files, &config, visualization_dir);

    let mut stdout = io::stdout().lock();
    for outcome in &outcomes {
        writeln!(stdout, "{outcome}\n")?;
    }

    let skipped = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!("done: {} compared, {} skipped", outcomes.len() - skipped, skipped);

    Ok(())
}
