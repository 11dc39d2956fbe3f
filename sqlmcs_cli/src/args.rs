use std::path::{Path, PathBuf};

use clap::Parser;
use sqlmcs_common::*;

/// SQLMCS - Score the structural similarity of SQL query pairs
#[derive(Parser, Debug)]
#[command(name = "sqlmcs")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Files holding exactly two SQL queries separated by ';'
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Do not write the common subgraph visualization
    #[arg(long, default_value_t = false)]
    pub no_visualize: bool,
    /// Directory receiving `<file stem>.mcs.dot` visualizations
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Node-equivalence predicate
    #[arg(short = 'm', long = "match", value_enum, default_value = "exact")]
    pub node_match: MatchArg,
    /// Stop each search after this many states and report the best so far
    #[arg(long)]
    pub call_limit: Option<usize>,
    /// Fail a comparison whose smaller graph is deeper than this
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Compare files concurrently (report order is kept)
    #[arg(short = 'p', long, default_value_t = false)]
    pub parallel: bool,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        Config::builder()
            .node_match(self.node_match.clone().into())
            .call_limit(self.call_limit)
            .max_depth(self.max_depth)
            .parallel(self.parallel)
            .build()
    }

    /// Where visualizations go, `None` when disabled.
    pub fn visualization_dir(&self) -> Option<&Path> {
        (!self.no_visualize).then_some(self.output_dir.as_path())
    }
}

/// Command-line argument wrapper for NodeMatchMode
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum MatchArg {
    /// Type and label must both agree
    #[value(name = "exact")]
    Exact,
    /// Only the node type must agree
    #[value(name = "kind")]
    Kind,
}

impl From<MatchArg> for NodeMatchMode {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Exact => NodeMatchMode::Exact,
            MatchArg::Kind => NodeMatchMode::KindOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        let args = Args::try_parse_from(["sqlmcs", "a.txt"]).unwrap();
        assert_eq!(args.to_config(), Config::default());
        assert_eq!(args.visualization_dir(), Some(Path::new(".")));
    }

    #[test]
    fn flags_flow_into_config() {
        let args = Args::try_parse_from([
            "sqlmcs",
            "--no-visualize",
            "--match",
            "kind",
            "--call-limit",
            "500",
            "--max-depth",
            "64",
            "--parallel",
            "a.txt",
            "b.txt",
        ])
        .unwrap();

        assert_eq!(args.files.len(), 2);
        assert_eq!(args.visualization_dir(), None);
        assert_eq!(
            args.to_config(),
            Config::builder()
                .node_match(NodeMatchMode::KindOnly)
                .call_limit(Some(500))
                .max_depth(64)
                .parallel(true)
                .build()
        );
    }

    #[test]
    fn at_least_one_file_is_required() {
        assert!(Args::try_parse_from(["sqlmcs"]).is_err());
    }
}
