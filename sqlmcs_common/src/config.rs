//! Configuration for the maximum common subgraph search.
//!
//! The matcher and the CLI both read from a single [`Config`]. The knobs are:
//! - node_match: which node attributes must agree for two nodes to be paired.
//! - call_limit: an optional cap on the number of search states visited. When
//!   the cap is hit the best mapping found so far is returned, flagged as
//!   truncated.
//! - max_depth: hard guard on recursion depth. Searches whose smaller graph is
//!   larger than this fail up front instead of risking stack exhaustion.
//! - parallel: whether independent comparisons in a batch may run concurrently.
//!
//! ```ignore
//! use sqlmcs_common::{Config, NodeMatchMode};
//! let cfg = Config::builder()
//!     .node_match(NodeMatchMode::KindOnly)
//!     .call_limit(Some(100_000))
//!     .build();
//! ```

use std::fmt;
use std::str::FromStr;

/// Default recursion guard for the search.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Global search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Node-equivalence predicate used by the semantic check.
    pub node_match: NodeMatchMode,
    /// Maximum number of search states to visit, `None` for an exhaustive search.
    pub call_limit: Option<usize>,
    /// Maximum recursion depth before the search fails.
    pub max_depth: usize,
    /// Run independent comparisons of a batch concurrently.
    pub parallel: bool,
}

impl Config {
    /// Create a new configuration.
    pub const fn new(
        node_match: NodeMatchMode,
        call_limit: Option<usize>,
        max_depth: usize,
        parallel: bool,
    ) -> Self {
        Self {
            node_match,
            call_limit,
            max_depth,
            parallel,
        }
    }

    /// Start building a configuration from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Convenience: default configuration with the provided node match mode.
    pub fn with_node_match(node_match: NodeMatchMode) -> Self {
        Self {
            node_match,
            ..Self::default()
        }
    }
}

impl Default for Config {
    /// Exact matching, exhaustive search, sequential batches.
    fn default() -> Self {
        Self::new(NodeMatchMode::Exact, None, DEFAULT_MAX_DEPTH, false)
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the node-equivalence predicate.
    pub fn node_match(mut self, node_match: NodeMatchMode) -> Self {
        self.config.node_match = node_match;
        self
    }

    /// Set (or clear) the search call limit.
    pub fn call_limit(mut self, call_limit: Option<usize>) -> Self {
        self.config.call_limit = call_limit;
        self
    }

    /// Set the recursion guard.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Allow batch comparisons to run concurrently.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Finish building.
    pub fn build(self) -> Config {
        self.config
    }
}

/// Control which node attributes decide equivalence.
///
/// - Exact:
///     Type and label must both be equal. A `users` table only pairs with a
///     `users` table.
/// - KindOnly:
///     Only the type must be equal. Queries over different schemas that share
///     a shape (table, selected columns, filters) still overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeMatchMode {
    /// Type and label must match.
    #[default]
    Exact,
    /// Type must match, labels are ignored.
    KindOnly,
}

impl fmt::Display for NodeMatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::KindOnly => write!(f, "kind"),
        }
    }
}

impl FromStr for NodeMatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "kind" | "kind-only" | "kind_only" => Ok(Self::KindOnly),
            other => Err(format!("unknown node match mode '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_exhaustive_exact() {
        let cfg = Config::default();
        assert_eq!(cfg.node_match, NodeMatchMode::Exact);
        assert_eq!(cfg.call_limit, None);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!cfg.parallel);
    }

    #[test]
    fn builder_overrides_fields() {
        let cfg = Config::builder()
            .node_match(NodeMatchMode::KindOnly)
            .call_limit(Some(10))
            .max_depth(8)
            .parallel(true)
            .build();
        assert_eq!(cfg, Config::new(NodeMatchMode::KindOnly, Some(10), 8, true));
    }

    #[rstest]
    #[case("exact", NodeMatchMode::Exact)]
    #[case("EXACT", NodeMatchMode::Exact)]
    #[case("kind", NodeMatchMode::KindOnly)]
    #[case("kind-only", NodeMatchMode::KindOnly)]
    fn parses_node_match_mode(#[case] input: &str, #[case] expected: NodeMatchMode) {
        assert_eq!(input.parse::<NodeMatchMode>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_node_match_mode() {
        assert!("fuzzy".parse::<NodeMatchMode>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for mode in [NodeMatchMode::Exact, NodeMatchMode::KindOnly] {
            assert_eq!(mode.to_string().parse::<NodeMatchMode>(), Ok(mode));
        }
    }
}
