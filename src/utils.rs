//! Utility functions shared by the engine and the anytime controllers

use std::time::{Duration, Instant};

use crate::node::SearchNode;

/// The zero heuristic, used when none is supplied
///
/// With it, A* degenerates into uniform-cost search.
pub fn zero_heuristic<S>(_state: &S) -> f64 {
    0.0
}

/// The default custom score: the node's heuristic value
///
/// Custom ordering without a scoring function therefore behaves like greedy
/// best-first search.
pub fn heuristic_score(node: &SearchNode) -> f64 {
    node.h
}

/// Deadline `bound` after `start`, or None if it cannot be represented
pub fn deadline_after(start: Instant, bound: Duration) -> Option<Instant> {
    start.checked_add(bound)
}

/// Time left until `deadline`, or None once it has passed
pub fn remaining_time(deadline: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    if remaining.is_zero() {
        None
    } else {
        Some(remaining)
    }
}
