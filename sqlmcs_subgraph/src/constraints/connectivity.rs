use super::Constraint;
use crate::index::GraphIndex;
use crate::mapping::Mapping;
use crate::node::NodeId;

/// Look-back check against the already mapped region.
///
/// Every edge between `q` and a mapped pattern node must have a counterpart
/// between `h` and that node's image, and vice versa. Checking both graphs
/// keeps the mapping an induced common subgraph.
pub(crate) struct ConnectivityConstraint<'a, 'g> {
    pattern: &'a GraphIndex<'g>,
    host: &'a GraphIndex<'g>,
    mapping: &'a Mapping,
}

impl<'a, 'g> ConnectivityConstraint<'a, 'g> {
    pub(crate) const fn new(
        pattern: &'a GraphIndex<'g>,
        host: &'a GraphIndex<'g>,
        mapping: &'a Mapping,
    ) -> Self {
        Self {
            pattern,
            host,
            mapping,
        }
    }

    fn validate_pattern_edges(&self, q: NodeId, h: NodeId) -> bool {
        let fanout_ok = self
            .pattern
            .fanout(q)
            .iter()
            .filter_map(|&q_sink| self.mapping.get(q_sink))
            .all(|h_sink| self.host.has_edge(h, h_sink));

        let fanin_ok = self
            .pattern
            .fanin(q)
            .iter()
            .filter_map(|&q_source| self.mapping.get(q_source))
            .all(|h_source| self.host.has_edge(h_source, h));

        fanout_ok && fanin_ok
    }

    fn validate_host_edges(&self, q: NodeId, h: NodeId) -> bool {
        let fanout_ok = self
            .host
            .fanout(h)
            .iter()
            .filter_map(|&h_sink| self.mapping.get_reverse(h_sink))
            .all(|q_sink| self.pattern.has_edge(q, q_sink));

        let fanin_ok = self
            .host
            .fanin(h)
            .iter()
            .filter_map(|&h_source| self.mapping.get_reverse(h_source))
            .all(|q_source| self.pattern.has_edge(q_source, q));

        fanout_ok && fanin_ok
    }

    fn validate_self_loop(&self, q: NodeId, h: NodeId) -> bool {
        self.pattern.has_edge(q, q) == self.host.has_edge(h, h)
    }
}

impl Constraint for ConnectivityConstraint<'_, '_> {
    fn pair_is_valid(&self, q: NodeId, h: NodeId) -> bool {
        self.validate_self_loop(q, h)
            && self.validate_pattern_edges(q, h)
            && self.validate_host_edges(q, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn id(raw: usize) -> NodeId {
        NodeId::new(raw)
    }

    fn chain(labels: &[&str]) -> Graph {
        let mut graph = Graph::new();
        let ids: Vec<NodeId> = labels.iter().map(|l| graph.add_node("T", *l)).collect();
        for pair in ids.windows(2) {
            graph.add_edge(pair[0], pair[1]).unwrap();
        }
        graph
    }

    #[test]
    fn accepts_matching_edges() {
        let pattern = chain(&["a", "b"]);
        let host = chain(&["a", "b"]);
        let (p, h) = (GraphIndex::build(&pattern), GraphIndex::build(&host));
        let mapping: Mapping = [(id(0), id(0))].into_iter().collect();
        assert!(ConnectivityConstraint::new(&p, &h, &mapping).pair_is_valid(id(1), id(1)));
    }

    #[test]
    fn rejects_edge_missing_in_host() {
        let pattern = chain(&["a", "b"]);
        let mut host = Graph::new();
        host.add_node("T", "a");
        host.add_node("T", "b");
        let (p, h) = (GraphIndex::build(&pattern), GraphIndex::build(&host));
        let mapping: Mapping = [(id(0), id(0))].into_iter().collect();
        assert!(!ConnectivityConstraint::new(&p, &h, &mapping).pair_is_valid(id(1), id(1)));
    }

    #[test]
    fn rejects_edge_missing_in_pattern() {
        let mut pattern = Graph::new();
        pattern.add_node("T", "a");
        pattern.add_node("T", "b");
        let host = chain(&["a", "b"]);
        let (p, h) = (GraphIndex::build(&pattern), GraphIndex::build(&host));
        let mapping: Mapping = [(id(0), id(0))].into_iter().collect();
        assert!(!ConnectivityConstraint::new(&p, &h, &mapping).pair_is_valid(id(1), id(1)));
    }

    #[test]
    fn rejects_reversed_edge() {
        let pattern = chain(&["a", "b"]);
        let host = chain(&["b", "a"]);
        let (p, h) = (GraphIndex::build(&pattern), GraphIndex::build(&host));
        // pattern a(0) -> b(1); host b(0) -> a(1)
        let mapping: Mapping = [(id(0), id(1))].into_iter().collect();
        assert!(!ConnectivityConstraint::new(&p, &h, &mapping).pair_is_valid(id(1), id(0)));
    }

    #[test]
    fn self_loops_must_agree() {
        let mut pattern = Graph::new();
        let a = pattern.add_node("T", "a");
        pattern.add_edge(a, a).unwrap();
        let mut host = Graph::new();
        host.add_node("T", "a");
        let (p, h) = (GraphIndex::build(&pattern), GraphIndex::build(&host));
        let mapping = Mapping::new();
        assert!(!ConnectivityConstraint::new(&p, &h, &mapping).pair_is_valid(id(0), id(0)));
    }
}
