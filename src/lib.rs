//! # statespace-search
//!
//! A generic, pluggable state-space search engine.
//!
//! Give the engine an initial state that knows how to enumerate its successors,
//! pick an exploration order, and it walks the implicit state graph until a goal
//! predicate is satisfied, the frontier runs dry, or a deadline passes.
//!
//! ## Features
//!
//! - Six exploration orders behind one frontier: depth-first, breadth-first,
//!   uniform-cost, greedy best-first, A* and caller-scored custom ordering
//! - Three cycle-checking regimes (none, path, full) with lazy re-expansion of
//!   cheaper rediscovered paths under full checking
//! - Optional wall-clock and `(g, h, g + h)` cost bounds
//! - Anytime controllers (weighted A*, iterative weighted A*, iterative greedy
//!   best-first) that keep the best solution found under a total time budget
//! - Per-run search statistics and opt-in diagnostic tracing through `log`
//!
//! ## Basic Usage
//!
//! ```
//! use statespace_search::{CycleCheck, SearchEngine, SearchState, Strategy, Transition};
//!
//! // Reach 10 from 1 using "+1" and "*2" moves.
//! #[derive(Clone, Debug)]
//! struct Counter(u32);
//!
//! impl SearchState for Counter {
//!     type Action = &'static str;
//!     type Identity = u32;
//!
//!     fn successors(&self) -> Vec<Transition<Self>> {
//!         vec![
//!             Transition::new("inc", Counter(self.0 + 1), 1.0),
//!             Transition::new("double", Counter(self.0 * 2), 1.0),
//!         ]
//!     }
//!
//!     fn identity(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let mut engine = SearchEngine::new(Strategy::AStar, CycleCheck::Full)
//!     .with_goal(|s: &Counter| s.0 == 10)
//!     .with_heuristic(|s: &Counter| if s.0 > 10 { f64::INFINITY } else { 0.0 });
//!
//! engine.init_search(Counter(1));
//! let result = engine.search();
//!
//! let solution = result.solution.expect("10 is reachable");
//! assert_eq!(solution.cost(), 4.0);
//! println!("{}", result.statistics.summary());
//! ```
//!
//! ## Anytime search
//!
//! ```
//! use std::time::Duration;
//! use statespace_search::{anytime, AnytimeConfig, SearchState, Transition};
//!
//! #[derive(Clone, Debug)]
//! struct Counter(u32);
//!
//! impl SearchState for Counter {
//!     type Action = &'static str;
//!     type Identity = u32;
//!
//!     fn successors(&self) -> Vec<Transition<Self>> {
//!         if self.0 > 40 {
//!             return Vec::new();
//!         }
//!         vec![
//!             Transition::new("inc", Counter(self.0 + 1), 1.0),
//!             Transition::new("double", Counter(self.0 * 2), 1.0),
//!         ]
//!     }
//!
//!     fn identity(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! fn main() -> Result<(), statespace_search::SearchError> {
//!     let config = AnytimeConfig::default()
//!         .with_time_bound(Duration::from_millis(200))
//!         .with_weight(3.0);
//!
//!     let report = anytime::iterative_astar(
//!         Counter(1),
//!         |s: &Counter| s.0 == 20,
//!         |s: &Counter| if s.0 >= 20 { 0.0 } else { 1.0 },
//!         &config,
//!     )?;
//!
//!     // Successive solutions only ever get cheaper.
//!     assert!(report.improvements.windows(2).all(|w| w[1] < w[0]));
//!     assert!(report.solution.is_some());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Each run pops the next node from the frontier, tests it against the goal,
//! polls the deadline, skips it if a cheaper copy of its state has since been
//! recorded, and otherwise expands it. Every successor passes through the
//! cycle check and the cost bound before it is admitted to the frontier.
//!
//! States live in an arena indexed by creation order; parent links are arena
//! indices, and solutions are reconstructed by walking them back to the root.

pub mod anytime;
pub mod config;
pub mod engine;
pub mod frontier;
pub mod ledger;
pub mod node;
pub mod state;
pub mod stats;
pub mod utils;

pub use anytime::AnytimeResult;
pub use config::{AnytimeConfig, CostBound, CycleCheck, SearchConfig, Strategy, TraceLevel};
pub use engine::{PathStep, SearchEngine, SearchResult, Solution, Termination};
pub use frontier::Frontier;
pub use ledger::CycleLedger;
pub use node::{OrderingMode, SearchNode, StateId};
pub use state::{SearchState, Transition};
pub use stats::SearchStatistics;

/// Error types for configuring a search
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The strategy identifier is not one of the known strategies
    #[error("Unknown search strategy '{0}'")]
    UnknownStrategy(String),

    /// The cycle-check identifier is not one of the known levels
    #[error("Unknown cycle check level '{0}'")]
    UnknownCycleCheck(String),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
