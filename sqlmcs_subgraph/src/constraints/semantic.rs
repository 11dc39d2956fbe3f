use sqlmcs_common::NodeMatchMode;

use super::Constraint;
use crate::index::GraphIndex;
use crate::node::{Node, NodeId};

/// Node-equivalence predicate.
///
/// `left` always comes from the first graph handed to the matcher and `right`
/// from the second, whichever of the two ends up as the search host.
pub trait NodeMatcher {
    fn matches(&self, left: &Node, right: &Node) -> bool;
}

/// Type and label must both be equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactMatch;

impl NodeMatcher for ExactMatch {
    fn matches(&self, left: &Node, right: &Node) -> bool {
        left.kind == right.kind && left.label == right.label
    }
}

/// Only the type must be equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct KindMatch;

impl NodeMatcher for KindMatch {
    fn matches(&self, left: &Node, right: &Node) -> bool {
        left.kind == right.kind
    }
}

/// Wraps a closure as a [`NodeMatcher`].
///
/// ```ignore
/// let matcher = FnMatcher(|l: &Node, r: &Node| l.label.eq_ignore_ascii_case(&r.label));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnMatcher<F>(pub F);

impl<F> NodeMatcher for FnMatcher<F>
where
    F: Fn(&Node, &Node) -> bool,
{
    fn matches(&self, left: &Node, right: &Node) -> bool {
        (self.0)(left, right)
    }
}

impl NodeMatcher for NodeMatchMode {
    fn matches(&self, left: &Node, right: &Node) -> bool {
        match self {
            Self::Exact => ExactMatch.matches(left, right),
            Self::KindOnly => KindMatch.matches(left, right),
        }
    }
}

pub(crate) struct SemanticConstraint<'a, 'g, M> {
    pattern: &'a GraphIndex<'g>,
    host: &'a GraphIndex<'g>,
    matcher: &'a M,
    swapped: bool,
}

impl<'a, 'g, M: NodeMatcher> SemanticConstraint<'a, 'g, M> {
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
}

impl<M: NodeMatcher> Constraint for SemanticConstraint<'_, '_, M> {
    fn pair_is_valid(&self, q: NodeId, h: NodeId) -> bool {
        let (Some(q_node), Some(h_node)) = (self.pattern.node(q), self.host.node(h)) else {
            return false;
        };
        // Unswapped, the host is the first graph.
        if self.swapped {
            self.matcher.matches(q_node, h_node)
        } else {
            self.matcher.matches(h_node, q_node)
        }
    }
}
