//! Shared SQL comparison cases.
//!
//! Each case pairs two queries with the common subgraph size and similarity
//! the full pipeline (parse, build graph, search, score) must produce.

use crate::config::{Config, NodeMatchMode};

/// A query pair and its expected comparison result.
#[derive(Debug, Clone)]
pub struct SqlTestCase {
    /// The name of the test case.
    pub name: &'static str,
    /// First query of the pair.
    pub left: &'static str,
    /// Second query of the pair.
    pub right: &'static str,
    /// The configuration for the search.
    pub config: Config,
    /// Expected number of nodes in the common subgraph.
    pub expected_mcs_nodes: usize,
    /// Expected similarity percentage.
    pub expected_similarity: f64,
}

lazy_static::lazy_static! {
    /// Every shared case.
    pub static ref ALL_TEST_CASES: Vec<SqlTestCase> = vec![
        SqlTestCase {
            name: "direct_subquery",
            left: "SELECT u.id, u.name, u.email FROM users u WHERE u.status = 'active' AND u.age > 25",
            right: "SELECT u.name FROM users u WHERE u.status = 'active'",
            config: Config::default(),
            expected_mcs_nodes: 4,
            expected_similarity: 100.0,
        },
        SqlTestCase {
            name: "disjoint_schemas",
            left: "SELECT a.x FROM alpha a",
            right: "SELECT b.y FROM beta b",
            config: Config::default(),
            expected_mcs_nodes: 0,
            expected_similarity: 0.0,
        },
        SqlTestCase {
            name: "renamed_aliases",
            left: "SELECT o.id, o.total FROM orders o WHERE o.status IN ('new', 'paid')",
            right: "SELECT x.id, x.total FROM orders AS x WHERE x.status IN ('paid', 'new')",
            config: Config::default(),
            expected_mcs_nodes: 5,
            expected_similarity: 100.0,
        },
        SqlTestCase {
            name: "join_against_filter",
            left: "SELECT c.name FROM customers c JOIN orders o ON o.customer_id = c.id WHERE o.status = 'shipped'",
            right: "SELECT c.name FROM customers c WHERE c.city = 'Paris'",
            config: Config::default(),
            expected_mcs_nodes: 3,
            expected_similarity: 75.0,
        },
        SqlTestCase {
            name: "same_shape_exact",
            left: "SELECT c.name FROM customers c WHERE c.state = 'CA'",
            right: "SELECT u.name FROM users u WHERE u.status = 'active'",
            config: Config::default(),
            expected_mcs_nodes: 2,
            expected_similarity: 50.0,
        },
        SqlTestCase {
            name: "same_shape_kind_only",
            left: "SELECT c.name FROM customers c WHERE c.state = 'CA'",
            right: "SELECT u.name FROM users u WHERE u.status = 'active'",
            config: Config::with_node_match(NodeMatchMode::KindOnly),
            expected_mcs_nodes: 4,
            expected_similarity: 100.0,
        },
    ];

    /// Cases compared with exact node matching.
    pub static ref EXACT_TEST_CASES: Vec<SqlTestCase> = ALL_TEST_CASES
        .iter()
        .filter(|case| case.config.node_match == NodeMatchMode::Exact)
        .cloned()
        .collect();
}
