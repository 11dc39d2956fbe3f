use crate::mapping::Mapping;
use crate::node::NodeId;

/// Scratch state of one search, owned by a single matcher invocation.
pub(crate) struct SearchState {
    // Pattern node -> Host node, mutated and backtracked in place
    mapping: Mapping,
    // Largest mapping seen so far; first found wins ties
    best: Mapping,

    // No mapping can exceed the pattern size
    target: usize,
    states_visited: u64,
    truncated: bool,
}

impl SearchState {
    /// Fresh mapping, with the visit counter continuing from `states_visited`.
    pub(crate) fn resume(target: usize, states_visited: u64) -> Self {
        Self {
            mapping: Mapping::new(),
            best: Mapping::new(),
            target,
            states_visited,
            truncated: false,
        }
    }

    pub(crate) const fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub(crate) fn depth(&self) -> usize {
        self.mapping.len()
    }

    pub(crate) fn best_len(&self) -> usize {
        self.best.len()
    }

    /// Replace the best mapping if the current one is strictly larger.
    #[contracts::debug_ensures(self.best.len() >= self.mapping.len())]
    pub(crate) fn record_if_better(&mut self) -> bool {
        if self.mapping.len() > self.best.len() {
            self.best = self.mapping.clone();
            return true;
        }
        false
    }

    #[contracts::debug_requires(!self.mapping.contains(q))]
    #[contracts::debug_requires(!self.mapping.contains_reverse(h))]
    #[contracts::debug_ensures(self.mapping.get(q) == Some(h))]
    pub(crate) fn map(&mut self, q: NodeId, h: NodeId) {
        self.mapping.insert(q, h);
    }

    #[contracts::debug_requires(self.mapping.get(q) == Some(h))]
    #[contracts::debug_ensures(!self.mapping.contains(q) && !self.mapping.contains_reverse(h))]
    pub(crate) fn unmap(&mut self, q: NodeId, h: NodeId) {
        let removed = self.mapping.remove(q);
        debug_assert_eq!(removed, Some(h));
    }

    /// No larger mapping exists than the one already recorded.
    pub(crate) fn done(&self) -> bool {
        self.best.len() >= self.target
    }

    pub(crate) fn visit(&mut self) -> u64 {
        self.states_visited += 1;
        self.states_visited
    }

    pub(crate) const fn states_visited(&self) -> u64 {
        self.states_visited
    }

    pub(crate) fn truncate(&mut self) {
        self.truncated = true;
    }

    pub(crate) const fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub(crate) fn into_best(self) -> Mapping {
        self.best
    }
}
