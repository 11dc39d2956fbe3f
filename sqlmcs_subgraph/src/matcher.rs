//! Maximum common subgraph search.
//!
//! This module provides the backtracking engine that finds the largest induced
//! common subgraph of two query graphs. The smaller graph is explored as the
//! pattern and the larger one serves as the host, which bounds the recursion
//! depth by the size of the smaller graph. Candidate pairs come from the VF2
//! style terminal sets and each pair must pass the consistency checker before
//! the search descends.

use sqlmcs_common::{Config, NodeMatchMode};

use crate::candidates::{TerminalSets, candidate_pairs};
use crate::constraints::{ConsistencyChecker, NodeMatcher};
use crate::error::SearchError;
use crate::graph::Graph;
use crate::index::GraphIndex;
use crate::mapping::Mapping;
use crate::progress::{CancellationFlag, Progress};
use crate::state::SearchState;

/// Result of a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct McsOutcome {
    /// Best mapping found, from the first graph's ids to the second graph's ids.
    pub mapping: Mapping,
    /// Whether the second graph was used as the search host.
    pub swapped: bool,
    /// The search stopped early (call limit or cancellation); `mapping` is the
    /// best found up to that point and may not be maximum.
    pub truncated: bool,
    /// Number of search states entered.
    pub states_visited: u64,
}

impl McsOutcome {
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Entry point for maximum common subgraph searches.
pub struct McsMatcher<'g, 'cfg, M = NodeMatchMode> {
    /// The first graph handed in by the caller.
    first: &'g Graph,
    /// The second graph handed in by the caller.
    second: &'g Graph,
    /// Configuration settings for the search.
    config: &'cfg Config,
    /// Node-equivalence predicate.
    matcher: M,
    cancellation: Option<CancellationFlag>,
    progress: Option<&'cfg Progress>,
}

impl<'g, 'cfg> McsMatcher<'g, 'cfg> {
    /// Create a matcher using the node-equivalence predicate from `config`.
    pub const fn new(first: &'g Graph, second: &'g Graph, config: &'cfg Config) -> Self {
        Self {
            first,
            second,
            config,
            matcher: config.node_match,
            cancellation: None,
            progress: None,
        }
    }
}

impl<'g, 'cfg, M: NodeMatcher> McsMatcher<'g, 'cfg, M> {
    /// Replace the node-equivalence predicate.
    pub fn with_node_matcher<N: NodeMatcher>(self, matcher: N) -> McsMatcher<'g, 'cfg, N> {
        McsMatcher {
            first: self.first,
            second: self.second,
            config: self.config,
            matcher,
            cancellation: self.cancellation,
            progress: self.progress,
        }
    }

    /// Poll `flag` between candidate attempts and stop when it is raised.
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Report search counters into `progress`.
    pub fn with_progress(mut self, progress: &'cfg Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Run the search and return the best mapping, keyed first graph to second.
    ///
    /// An empty mapping means the graphs share no structure; it is not an error.
    /// When both graphs have the same size each one is tried as the host, and
    /// the larger mapping wins (the first graph hosting on a tie).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ResourceExceeded`] when the smaller graph is
    /// larger than `config.max_depth`.
    pub fn find_mcs_mapping(&self) -> Result<McsOutcome, SearchError> {
        // Larger graph hosts, ties keep the caller's order.
        let swapped = self.first.len() < self.second.len();
        let pattern_len = self.first.len().min(self.second.len());

        if pattern_len == 0 {
            tracing::debug!("one or both graphs are empty, skipping search");
            return Ok(McsOutcome {
                swapped,
                ..McsOutcome::default()
            });
        }

        if pattern_len > self.config.max_depth {
            return Err(SearchError::resource_exceeded(
                pattern_len,
                self.config.max_depth,
            ));
        }

        let primary = self.search(swapped, 0)?;

        // The candidate restriction and cut rule depend on which graph hosts.
        let outcome = if self.first.len() == self.second.len()
            && !primary.truncated
            && primary.len() < pattern_len
        {
            let reverse = self.search(true, primary.states_visited)?;
            let (states_visited, truncated) = (reverse.states_visited, reverse.truncated);
            let mut best = if reverse.len() > primary.len() {
                reverse
            } else {
                primary
            };
            best.states_visited = states_visited;
            best.truncated = truncated;
            best
        } else {
            primary
        };

        tracing::info!(
            "search complete: mcs size {}, states visited {}, truncated: {}",
            outcome.len(),
            outcome.states_visited,
            outcome.truncated
        );
        Ok(outcome)
    }

    /// One search with the chosen host. `visited` carries the states already
    /// spent so the call limit covers every orientation tried.
    fn search(&self, swapped: bool, visited: u64) -> Result<McsOutcome, SearchError> {
        let (host, pattern) = if swapped {
            (self.second, self.first)
        } else {
            (self.first, self.second)
        };

        tracing::info!(
            "starting mcs search: pattern nodes: {}, host nodes: {}, swapped: {}",
            pattern.len(),
            host.len(),
            swapped
        );

        let core = McsMatcherCore {
            pattern: GraphIndex::build(pattern),
            host: GraphIndex::build(host),
            matcher: &self.matcher,
            config: self.config,
            cancellation: self.cancellation.as_ref(),
            progress: self.progress,
            swapped,
        };

        let mut st = SearchState::resume(pattern.len(), visited);
        core.solve(&mut st)?;

        let truncated = st.is_truncated();
        let states_visited = st.states_visited();
        let best = st.into_best();

        // `best` is keyed pattern -> host.
        let mapping = if swapped { best } else { best.inverted() };

        Ok(McsOutcome {
            mapping,
            swapped,
            truncated,
            states_visited,
        })
    }
}

/// Per-invocation search context.
struct McsMatcherCore<'a, 'g, M> {
    pattern: GraphIndex<'g>,
    host: GraphIndex<'g>,
    matcher: &'a M,
    config: &'a Config,
    cancellation: Option<&'a CancellationFlag>,
    progress: Option<&'a Progress>,
    swapped: bool,
}

impl<M: NodeMatcher> McsMatcherCore<'_, '_, M> {
    /// Recursively extends the mapping, recording the largest one seen.
    fn solve(&self, st: &mut SearchState) -> Result<(), SearchError> {
        if st.record_if_better() {
            tracing::trace!("new best mapping of size {}", st.best_len());
        }

        if st.done() {
            return Ok(());
        }

        if st.depth() > self.config.max_depth {
            return Err(SearchError::resource_exceeded(
                st.depth(),
                self.config.max_depth,
            ));
        }

        let visited = st.visit();
        if let Some(progress) = self.progress {
            progress.inc_states(1);
        }
        if self.config.call_limit.is_some_and(|limit| visited > limit as u64) {
            tracing::debug!("call limit reached after {} states, truncating", visited - 1);
            st.truncate();
            return Ok(());
        }

        // Even mapping every remaining node could not beat the best.
        let remaining = (self.pattern.len() - st.depth()).min(self.host.len() - st.depth());
        if st.depth() + remaining <= st.best_len() {
            return Ok(());
        }

        let terminals = TerminalSets::compute(&self.pattern, &self.host, st.mapping());
        let candidates = candidate_pairs(&self.pattern, &self.host, st.mapping(), &terminals);
        let checker =
            ConsistencyChecker::new(&self.pattern, &self.host, self.matcher, self.swapped);

        for (q, h) in candidates {
            if self.should_stop(st) {
                break;
            }
            if let Some(progress) = self.progress {
                progress.inc_pairs(1);
            }
            if !checker.is_feasible(q, h, st.mapping(), &terminals) {
                continue;
            }

            st.map(q, h);
            let result = self.solve(st);
            st.unmap(q, h);
            result?;
        }

        if st.depth() > 0 {
            tracing::trace!("backtracking from depth {}", st.depth());
        }
        Ok(())
    }

    fn should_stop(&self, st: &mut SearchState) -> bool {
        if st.is_truncated() || st.done() {
            return true;
        }
        if self.cancellation.is_some_and(CancellationFlag::is_cancelled) {
            tracing::debug!("search cancelled at depth {}", st.depth());
            st.truncate();
            return true;
        }
        false
    }
}
