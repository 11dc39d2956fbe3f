#![allow(dead_code)]

use std::sync::OnceLock;

use sqlmcs_subgraph::{Graph, NodeId, NodeKind};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a graph from `(kind, label)` nodes and `(from, to)` index edges.
pub fn build(nodes: &[(&str, &str)], edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new();
    for &(kind, label) in nodes {
        graph.add_node(NodeKind::from(kind), label);
    }
    for &(from, to) in edges {
        graph
            .add_edge(NodeId::new(from), NodeId::new(to))
            .expect("test edge endpoints exist");
    }
    graph
}

/// Every mapped pair agrees on edges in both directions, self-loops included.
pub fn is_induced_consistent(first: &Graph, second: &Graph, pairs: &[(NodeId, NodeId)]) -> bool {
    pairs.iter().all(|&(a1, b1)| {
        pairs
            .iter()
            .all(|&(a2, b2)| first.has_edge(a1, a2) == second.has_edge(b1, b2))
    })
}
