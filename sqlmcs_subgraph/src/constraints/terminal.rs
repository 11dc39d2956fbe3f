use std::collections::BTreeSet;

use super::Constraint;
use crate::candidates::TerminalSets;
use crate::index::GraphIndex;
use crate::node::NodeId;

/// Look-ahead cut rule.
///
/// `q` may not have more successors in the pattern's outgoing frontier than `h`
/// has in the host's, and likewise for predecessors and incoming frontiers.
pub(crate) struct TerminalConstraint<'a, 'g> {
    pattern: &'a GraphIndex<'g>,
    host: &'a GraphIndex<'g>,
    terminals: &'a TerminalSets,
}

impl<'a, 'g> TerminalConstraint<'a, 'g> {
    pub(crate) const fn new(
        pattern: &'a GraphIndex<'g>,
        host: &'a GraphIndex<'g>,
        terminals: &'a TerminalSets,
    ) -> Self {
        Self {
            pattern,
            host,
            terminals,
        }
    }
}

fn count_in(adjacent: &[NodeId], frontier: &BTreeSet<NodeId>) -> usize {
    adjacent.iter().filter(|&id| frontier.contains(id)).count()
}

impl Constraint for TerminalConstraint<'_, '_> {
    fn pair_is_valid(&self, q: NodeId, h: NodeId) -> bool {
        let t = self.terminals;

        let q_out = count_in(self.pattern.fanout(q), &t.pattern_out);
        let h_out = count_in(self.host.fanout(h), &t.host_out);
        if q_out > h_out {
            return false;
        }

        let q_in = count_in(self.pattern.fanin(q), &t.pattern_in);
        let h_in = count_in(self.host.fanin(h), &t.host_in);
        q_in <= h_in
    }
}
