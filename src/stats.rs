//! Statistics collection for search runs
//!
//! This module provides the passive counters reported after each search
//! invocation.

use std::fmt;
use std::time::Duration;

/// Statistics collected during one search invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    /// Nodes whose successors were enumerated
    pub expanded: usize,

    /// States produced, counting the initial state and every successor
    pub generated: usize,

    /// Successors rejected by cycle checking
    pub pruned_cycles: usize,

    /// Successors rejected by the cost bound
    pub pruned_cost: usize,

    /// Popped nodes skipped because a cheaper copy was recorded later
    pub stale_skipped: usize,

    /// Largest frontier size observed
    pub frontier_high_water: usize,

    /// Wall-clock time spent searching
    pub total_time: Duration,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of expansions per second
    pub fn expansions_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.expanded as f64 / self.total_time.as_secs_f64()
    }

    /// Total successors rejected for any reason
    pub fn pruned(&self) -> usize {
        self.pruned_cycles + self.pruned_cost
    }

    /// Adds another run's counters to this one
    ///
    /// Times add up; the frontier high-water mark keeps the larger value.
    pub fn accumulate(&mut self, other: &SearchStatistics) {
        self.expanded += other.expanded;
        self.generated += other.generated;
        self.pruned_cycles += other.pruned_cycles;
        self.pruned_cost += other.pruned_cost;
        self.stale_skipped += other.stale_skipped;
        self.frontier_high_water = self.frontier_high_water.max(other.frontier_high_water);
        self.total_time += other.total_time;
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "Search Statistics:\n\
             - States generated: {}\n\
             - States expanded: {}\n\
             - Pruned by cycle checking: {}\n\
             - Pruned by cost bound: {}\n\
             - Stale nodes skipped: {}\n\
             - Frontier high water: {}\n\
             - Total time: {:.3} seconds\n\
             - Expansions per second: {:.1}",
            self.generated,
            self.expanded,
            self.pruned_cycles,
            self.pruned_cost,
            self.stale_skipped,
            self.frontier_high_water,
            self.total_time.as_secs_f64(),
            self.expansions_per_second()
        )
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expanded={} generated={} pruned_cycles={} pruned_cost={} time={:.3}s",
            self.expanded,
            self.generated,
            self.pruned_cycles,
            self.pruned_cost,
            self.total_time.as_secs_f64()
        )
    }
}
