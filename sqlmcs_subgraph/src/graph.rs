//! Attributed directed graph built from a single SQL query.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::error::GraphError;
use crate::node::{Node, NodeId, NodeKind};

static NO_NEIGHBORS: BTreeSet<NodeId> = BTreeSet::new();

/// A directed graph of tables, columns and filter predicates.
///
/// The graph owns its nodes and their outgoing adjacency. There is no reverse
/// index: predecessors are found by scanning every adjacency set, which is fine
/// for query-sized graphs.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// Nodes indexed by their id.
    nodes: Vec<Node>,
    /// Outgoing edges, indexed like `nodes`.
    adjacency: Vec<BTreeSet<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node with the next sequential id.
    pub fn add_node(&mut self, kind: impl Into<NodeKind>, label: impl Into<String>) -> NodeId {
        self.add_attributed_node(kind, label, None, false)
    }

    /// Append a node carrying an optional value and selection flag.
    pub fn add_attributed_node(
        &mut self,
        kind: impl Into<NodeKind>,
        label: impl Into<String>,
        value: Option<String>,
        selected: bool,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let mut node = Node::new(id, kind.into(), label);
        node.value = value;
        node.selected = selected;
        self.nodes.push(node);
        self.adjacency.push(BTreeSet::new());
        id
    }

    /// Insert the directed edge `from -> to`.
    ///
    /// Inserting an existing edge is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidReference`] if either endpoint is absent.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        if !self.contains(to) {
            return Err(GraphError::invalid_reference(from, to));
        }
        let Some(targets) = self.adjacency.get_mut(from.index()) else {
            return Err(GraphError::invalid_reference(from, to));
        };
        targets.insert(to);
        Ok(())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Outgoing neighbours of `id`; empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> &BTreeSet<NodeId> {
        self.adjacency.get(id.index()).unwrap_or(&NO_NEIGHBORS)
    }

    /// Incoming neighbours of `id`, found by a full scan; empty for unknown ids.
    pub fn predecessors(&self, id: NodeId) -> BTreeSet<NodeId> {
        self.adjacency
            .iter()
            .enumerate()
            .filter(|(_, targets)| targets.contains(&id))
            .map(|(from, _)| NodeId::new(from))
            .collect()
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// All edges in ascending `(from, to)` order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(from, targets)| {
            targets.iter().map(move |&to| (NodeId::new(from), to))
        })
    }

    /// Build the induced subgraph over `ids`.
    ///
    /// The result is an independent graph whose ids are renumbered from 0 in
    /// the order the ids were supplied. Unknown and repeated ids are skipped.
    /// An edge survives only if both of its endpoints do.
    pub fn subgraph(&self, ids: &[NodeId]) -> Self {
        let mut sub = Self::new();
        let mut old_to_new: HashMap<NodeId, NodeId> = HashMap::with_capacity(ids.len());
        let mut kept: Vec<NodeId> = Vec::with_capacity(ids.len());

        for &old in ids {
            if old_to_new.contains_key(&old) {
                continue;
            }
            let Some(node) = self.get_node(old) else {
                continue;
            };
            let new = sub.add_attributed_node(
                node.kind.clone(),
                node.label.clone(),
                node.value.clone(),
                node.selected,
            );
            old_to_new.insert(old, new);
            kept.push(old);
        }

        for old_from in kept {
            let new_from = old_to_new[&old_from];
            for old_to in self.neighbors(old_from) {
                if let Some(&new_to) = old_to_new.get(old_to) {
                    sub.adjacency[new_from.index()].insert(new_to);
                }
            }
        }

        sub
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Graph(nodes={}, edges={})",
            self.len(),
            self.edge_count()
        )
    }
}
