use crate::graph::Graph;
use crate::node::{Node, NodeId};

/// Read-only adjacency index over a [`Graph`], built once per search.
///
/// The graph itself only stores outgoing edges. The search asks for
/// predecessors at every step, so the index materialises both directions up
/// front instead of rescanning the graph each time.
#[derive(Clone, Debug)]
pub(crate) struct GraphIndex<'a> {
    graph: &'a Graph,
    /// Maps each node to its successors, ascending
    fanout: Vec<Vec<NodeId>>,
    /// Maps each node to its predecessors, ascending
    fanin: Vec<Vec<NodeId>>,
}

impl<'a> GraphIndex<'a> {
    pub(crate) fn build(graph: &'a Graph) -> Self {
        let mut fanout: Vec<Vec<NodeId>> = vec![Vec::new(); graph.len()];
        let mut fanin: Vec<Vec<NodeId>> = vec![Vec::new(); graph.len()];

        // `edges` yields ascending (from, to), so both lists stay sorted.
        for (from, to) in graph.edges() {
            fanout[from.index()].push(to);
            fanin[to.index()].push(from);
        }

        Self {
            graph,
            fanout,
            fanin,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.fanout.len()
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&'a Node> {
        self.graph.get_node(id)
    }

    pub(crate) fn fanout(&self, id: NodeId) -> &[NodeId] {
        self.fanout.get(id.index()).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn fanin(&self, id: NodeId) -> &[NodeId] {
        self.fanin.get(id.index()).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.fanout(from).binary_search(&to).is_ok()
    }

    pub(crate) fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.len()).map(NodeId::new)
    }
}
