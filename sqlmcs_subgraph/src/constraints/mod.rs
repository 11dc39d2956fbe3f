//! Pairwise feasibility checks used by the search.
//!
//! A candidate pair `(q, h)` is added to the mapping only if every constraint
//! accepts it: the nodes must be equivalent, their edges to the already mapped
//! region must agree, and the look-ahead cut rule must not prove the branch
//! dead.

mod connectivity;
mod semantic;
mod terminal;

pub use semantic::{ExactMatch, FnMatcher, KindMatch, NodeMatcher};

pub(crate) use connectivity::ConnectivityConstraint;
pub(crate) use semantic::SemanticConstraint;
pub(crate) use terminal::TerminalConstraint;

use crate::candidates::TerminalSets;
use crate::index::GraphIndex;
use crate::mapping::Mapping;
use crate::node::NodeId;

pub(crate) trait Constraint {
    fn pair_is_valid(&self, q: NodeId, h: NodeId) -> bool;
}

/// Runs the three constraints in order, cheapest first.
pub(crate) struct ConsistencyChecker<'a, 'g, M> {
    pattern: &'a GraphIndex<'g>,
    host: &'a GraphIndex<'g>,
    matcher: &'a M,
    swapped: bool,
}

impl<'a, 'g, M: NodeMatcher> ConsistencyChecker<'a, 'g, M> {
    pub(crate) const fn new(
        pattern: &'a GraphIndex<'g>,
        host: &'a GraphIndex<'g>,
        matcher: &'a M,
        swapped: bool,
    ) -> Self {
        Self {
            pattern,
            host,
            matcher,
            swapped,
        }
    }

    pub(crate) fn is_feasible(
        &self,
        q: NodeId,
        h: NodeId,
        mapping: &Mapping,
        terminals: &TerminalSets,
    ) -> bool {
        let semantic = SemanticConstraint::new(self.pattern, self.host, self.matcher, self.swapped);
        if !semantic.pair_is_valid(q, h) {
            return false;
        }

        let connectivity = ConnectivityConstraint::new(self.pattern, self.host, mapping);
        if !connectivity.pair_is_valid(q, h) {
            return false;
        }

        TerminalConstraint::new(self.pattern, self.host, terminals).pair_is_valid(q, h)
    }
}
