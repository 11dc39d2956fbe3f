//! Candidate pair generation for the next search step.
//!
//! Growth is kept attached to the already matched region: when both graphs
//! have unmatched successors of matched nodes, only those are paired. Otherwise
//! every unmatched pattern node is paired with every unmatched host node, which
//! is also how the very first step starts.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::index::GraphIndex;
use crate::mapping::Mapping;
use crate::node::NodeId;

/// Frontiers of the matched region in both graphs.
///
/// A node is in an outgoing terminal set when it is reachable from a mapped node
/// by one outgoing edge and is not itself mapped; incoming sets are the same via
/// predecessor edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TerminalSets {
    pub(crate) pattern_out: BTreeSet<NodeId>,
    pub(crate) host_out: BTreeSet<NodeId>,
    pub(crate) pattern_in: BTreeSet<NodeId>,
    pub(crate) host_in: BTreeSet<NodeId>,
}

impl TerminalSets {
    /// Terminal sets of `mapping`, keyed pattern to host.
    pub(crate) fn compute(pattern: &GraphIndex<'_>, host: &GraphIndex<'_>, mapping: &Mapping) -> Self {
        if mapping.is_empty() {
            return Self::default();
        }

        let pairs = mapping.pairs();
        let is_pattern_free = |id: &NodeId| !mapping.contains(*id);
        let is_host_free = |id: &NodeId| !mapping.contains_reverse(*id);

        Self {
            pattern_out: frontier(pairs.iter().map(|&(q, _)| pattern.fanout(q)), is_pattern_free),
            host_out: frontier(pairs.iter().map(|&(_, h)| host.fanout(h)), is_host_free),
            pattern_in: frontier(pairs.iter().map(|&(q, _)| pattern.fanin(q)), is_pattern_free),
            host_in: frontier(pairs.iter().map(|&(_, h)| host.fanin(h)), is_host_free),
        }
    }

    fn has_outgoing_frontier(&self) -> bool {
        !self.pattern_out.is_empty() && !self.host_out.is_empty()
    }
}

fn frontier<'s>(
    adjacent: impl Iterator<Item = &'s [NodeId]>,
    is_free: impl Fn(&NodeId) -> bool,
) -> BTreeSet<NodeId> {
    adjacent.flatten().copied().filter(|id| is_free(id)).collect()
}

/// Pairs `(pattern, host)` eligible for the next step, in ascending order.
pub(crate) fn candidate_pairs(
    pattern: &GraphIndex<'_>,
    host: &GraphIndex<'_>,
    mapping: &Mapping,
    terminals: &TerminalSets,
) -> Vec<(NodeId, NodeId)> {
    if !mapping.is_empty() && terminals.has_outgoing_frontier() {
        return terminals
            .pattern_out
            .iter()
            .copied()
            .cartesian_product(terminals.host_out.iter().copied())
            .collect();
    }

    let unmapped_pattern: Vec<NodeId> = pattern.node_ids().filter(|&q| !mapping.contains(q)).collect();
    let unmapped_host: Vec<NodeId> = host
        .node_ids()
        .filter(|&h| !mapping.contains_reverse(h))
        .collect();

    unmapped_pattern
        .into_iter()
        .cartesian_product(unmapped_host)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn id(raw: usize) -> NodeId {
        NodeId::new(raw)
    }

    /// users -> {name, status}, status -> EQUALS
    fn query_graph() -> Graph {
        let mut graph = Graph::new();
        let users = graph.add_node("TABLE", "users");
        let name = graph.add_node("COLUMN", "name");
        let status = graph.add_node("COLUMN", "status");
        let filter = graph.add_node("FILTER", "EQUALS");
        graph.add_edge(users, name).unwrap();
        graph.add_edge(users, status).unwrap();
        graph.add_edge(status, filter).unwrap();
        graph
    }

    #[test]
    fn first_step_pairs_everything() {
        let pattern = query_graph();
        let mut host = query_graph();
        host.add_node("COLUMN", "age");
        let (p, h) = (GraphIndex::build(&pattern), GraphIndex::build(&host));

        let mapping = Mapping::new();
        let terminals = TerminalSets::compute(&p, &h, &mapping);
        assert_eq!(terminals, TerminalSets::default());

        let pairs = candidate_pairs(&p, &h, &mapping, &terminals);
        assert_eq!(pairs.len(), 4 * 5);
        assert_eq!(pairs[0], (id(0), id(0)));
        assert_eq!(pairs[1], (id(0), id(1)));
        assert!(pairs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn outgoing_frontier_restricts_pairs() {
        let pattern = query_graph();
        let host = query_graph();
        let (p, h) = (GraphIndex::build(&pattern), GraphIndex::build(&host));

        let mapping: Mapping = [(id(0), id(0))].into_iter().collect();
        let terminals = TerminalSets::compute(&p, &h, &mapping);
        assert_eq!(terminals.pattern_out, [id(1), id(2)].into_iter().collect());
        assert!(terminals.pattern_in.is_empty());

        let pairs = candidate_pairs(&p, &h, &mapping, &terminals);
        assert_eq!(
            pairs,
            vec![(id(1), id(1)), (id(1), id(2)), (id(2), id(1)), (id(2), id(2))]
        );
    }

    #[test]
    fn falls_back_to_unmapped_when_frontier_is_empty() {
        let pattern = query_graph();
        let host = query_graph();
        let (p, h) = (GraphIndex::build(&pattern), GraphIndex::build(&host));

        // A mapped leaf has no outgoing frontier, only an incoming one.
        let mapping: Mapping = [(id(3), id(3))].into_iter().collect();
        let terminals = TerminalSets::compute(&p, &h, &mapping);
        assert!(terminals.pattern_out.is_empty());
        assert_eq!(terminals.host_in, [id(2)].into_iter().collect());

        let pairs = candidate_pairs(&p, &h, &mapping, &terminals);
        assert_eq!(pairs.len(), 3 * 3);
        assert!(pairs.iter().all(|&(q, h)| q != id(3) && h != id(3)));
    }
}
