//! Turning a winning mapping into a common subgraph and a similarity score.

use sqlmcs_common::Config;

use crate::constraints::NodeMatcher;
use crate::error::SearchError;
use crate::graph::Graph;
use crate::mapping::Mapping;
use crate::matcher::{McsMatcher, McsOutcome};

/// Outcome of comparing two query graphs.
#[derive(Clone, Debug, Default)]
pub struct Comparison {
    /// Best mapping, first graph ids to second graph ids.
    pub mapping: Mapping,
    /// The common subgraph, carved out of the larger input. `None` when the
    /// inputs share nothing or one of them is empty.
    pub mcs: Option<Graph>,
    /// Percentage of the smaller graph covered by the common subgraph.
    pub similarity: f64,
    /// The search was cut short and the score is a lower bound.
    pub truncated: bool,
}

impl Comparison {
    pub fn mcs_len(&self) -> usize {
        self.mcs.as_ref().map_or(0, Graph::len)
    }
}

/// Materialise the common subgraph from the larger of the two graphs.
///
/// Node ids are renumbered following the ascending ids of the larger graph.
pub fn extract_mcs(first: &Graph, second: &Graph, outcome: &McsOutcome) -> Graph {
    if outcome.swapped {
        second.subgraph(&outcome.mapping.image())
    } else {
        first.subgraph(&outcome.mapping.domain())
    }
}

/// `100 * mcs_len / min(|first|, |second|)`, or 0 for empty inputs.
pub fn similarity_percentage(first: &Graph, second: &Graph, mcs_len: usize) -> f64 {
    let denominator = first.len().min(second.len());
    if mcs_len == 0 || denominator == 0 {
        return 0.0;
    }
    (mcs_len as f64 / denominator as f64) * 100.0
}

/// Search, extract and score in one call, using the predicate from `config`.
///
/// # Errors
///
/// Propagates [`SearchError`] from the search.
pub fn compare(first: &Graph, second: &Graph, config: &Config) -> Result<Comparison, SearchError> {
    let outcome = McsMatcher::new(first, second, config).find_mcs_mapping()?;
    Ok(score(first, second, outcome))
}

/// Like [`compare`] with a custom node-equivalence predicate.
///
/// # Errors
///
/// Propagates [`SearchError`] from the search.
pub fn compare_with<M: NodeMatcher>(
    first: &Graph,
    second: &Graph,
    config: &Config,
    matcher: M,
) -> Result<Comparison, SearchError> {
    let outcome = McsMatcher::new(first, second, config)
        .with_node_matcher(matcher)
        .find_mcs_mapping()?;
    Ok(score(first, second, outcome))
}

/// Score an already computed search outcome.
pub fn score(first: &Graph, second: &Graph, outcome: McsOutcome) -> Comparison {
    if outcome.is_empty() {
        tracing::debug!("no common subgraph found");
        return Comparison {
            truncated: outcome.truncated,
            ..Comparison::default()
        };
    }

    let mcs = extract_mcs(first, second, &outcome);
    let similarity = similarity_percentage(first, second, mcs.len());
    tracing::debug!(
        "mcs with {} nodes, similarity {:.2}%",
        mcs.len(),
        similarity
    );

    Comparison {
        mapping: outcome.mapping,
        mcs: Some(mcs),
        similarity,
        truncated: outcome.truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn users_with_status() -> Graph {
        let mut graph = Graph::new();
        let users = graph.add_node(NodeKind::Table, "users");
        let status = graph.add_node(NodeKind::Column, "status");
        graph.add_edge(users, status).unwrap();
        graph
    }

    #[test]
    fn percentage_uses_smaller_graph() {
        let big = users_with_status();
        let mut small = Graph::new();
        small.add_node(NodeKind::Table, "users");
        assert_eq!(similarity_percentage(&big, &small, 1), 100.0);
        assert_eq!(similarity_percentage(&big, &big, 1), 50.0);
        assert_eq!(similarity_percentage(&big, &small, 0), 0.0);
        assert_eq!(similarity_percentage(&big, &Graph::new(), 1), 0.0);
    }

    #[test]
    fn extraction_comes_from_larger_graph() {
        let small = {
            let mut g = Graph::new();
            g.add_node(NodeKind::Column, "status");
            g
        };
        let big = users_with_status();
        let config = Config::default();

        let forward = compare(&small, &big, &config).unwrap();
        let mcs = forward.mcs.as_ref().unwrap();
        assert_eq!(mcs.len(), 1);
        assert_eq!(mcs.nodes().next().map(|n| n.label.as_str()), Some("status"));
        assert_eq!(forward.similarity, 100.0);

        let backward = compare(&big, &small, &config).unwrap();
        assert_eq!(backward.mcs_len(), 1);
        assert_eq!(backward.similarity, forward.similarity);
    }

    #[test]
    fn extracted_edges_survive() {
        let g1 = users_with_status();
        let g2 = users_with_status();
        let comparison = compare(&g1, &g2, &Config::default()).unwrap();
        let mcs = comparison.mcs.unwrap();
        assert_eq!(mcs.len(), 2);
        assert_eq!(mcs.edge_count(), 1);
    }

    #[test]
    fn empty_inputs_score_zero() {
        let comparison = compare(&Graph::new(), &users_with_status(), &Config::default()).unwrap();
        assert!(comparison.mcs.is_none());
        assert_eq!(comparison.similarity, 0.0);
    }
}
