use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Search counters that can be shared across comparisons for reporting.
#[derive(Debug, Default)]
pub struct Progress {
    states_visited: AtomicU64,
    pairs_considered: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub states_visited: u64,
    pub pairs_considered: u64,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more entry into the recursive search.
    pub fn inc_states(&self, by: u64) {
        self.states_visited.fetch_add(by, Ordering::Relaxed);
    }

    /// Count candidate pairs handed to the feasibility check (even if later rejected).
    pub fn inc_pairs(&self, by: u64) {
        self.pairs_considered.fetch_add(by, Ordering::Relaxed);
    }

    /// Read a snapshot for display/reporting.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            states_visited: self.states_visited.load(Ordering::Relaxed),
            pairs_considered: self.pairs_considered.load(Ordering::Relaxed),
        }
    }
}

/// Shared flag asking a running search to stop.
///
/// The search polls it between sibling candidates only, so a raised flag never
/// interrupts a half-applied mapping update.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
