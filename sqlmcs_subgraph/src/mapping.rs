use std::collections::HashMap;

use crate::node::NodeId;

/// Partial injective function between the node ids of two graphs.
///
/// Both directions are kept so that "is this right-hand node already taken"
/// is a constant time lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mapping {
    /// Left to right node mapping
    forward: HashMap<NodeId, NodeId>,
    /// Right to left node mapping
    reverse: HashMap<NodeId, NodeId>,
}

impl Mapping {
    #[contracts::debug_ensures(ret.forward.is_empty())]
    #[contracts::debug_ensures(ret.reverse.is_empty())]
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    #[contracts::debug_requires(!self.contains(left))]
    #[contracts::debug_requires(!self.contains_reverse(right))]
    #[contracts::debug_ensures(self.forward.len() == self.reverse.len())]
    pub fn insert(&mut self, left: NodeId, right: NodeId) {
        self.forward.insert(left, right);
        self.reverse.insert(right, left);
    }

    /// Remove the pair keyed by `left`, returning its image.
    #[contracts::debug_ensures(!self.contains(left))]
    #[contracts::debug_ensures(self.forward.len() == self.reverse.len())]
    pub fn remove(&mut self, left: NodeId) -> Option<NodeId> {
        let right = self.forward.remove(&left)?;
        self.reverse.remove(&right);
        Some(right)
    }

    // debug ensure that both directions agree
    #[contracts::debug_ensures(ret.is_none_or(|r| self.reverse.get(&r) == Some(&left)))]
    pub fn get(&self, left: NodeId) -> Option<NodeId> {
        self.forward.get(&left).copied()
    }

    #[contracts::debug_ensures(ret.is_none_or(|l| self.forward.get(&l) == Some(&right)))]
    pub fn get_reverse(&self, right: NodeId) -> Option<NodeId> {
        self.reverse.get(&right).copied()
    }

    pub fn contains(&self, left: NodeId) -> bool {
        self.forward.contains_key(&left)
    }

    pub fn contains_reverse(&self, right: NodeId) -> bool {
        self.reverse.contains_key(&right)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.forward.len(), self.reverse.len());
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Pairs in ascending left id order.
    pub fn pairs(&self) -> Vec<(NodeId, NodeId)> {
        let mut pairs: Vec<(NodeId, NodeId)> =
            self.forward.iter().map(|(&l, &r)| (l, r)).collect();
        pairs.sort_unstable();
        pairs
    }

    /// Left-hand ids in ascending order.
    pub fn domain(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.forward.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Right-hand ids in ascending order.
    pub fn image(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.reverse.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// The same pairs with left and right swapped.
    #[contracts::debug_ensures(ret.len() == self.len())]
    pub fn inverted(&self) -> Self {
        Self {
            forward: self.reverse.clone(),
            reverse: self.forward.clone(),
        }
    }
}

impl FromIterator<(NodeId, NodeId)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (NodeId, NodeId)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (left, right) in iter {
            mapping.insert(left, right);
        }
        mapping
    }
}
