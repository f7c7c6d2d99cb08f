//! Configuration options for the search engine and the anytime controllers
//!
//! This module defines the strategy and cycle-check enumerations, the
//! optional cost bound, and the builder-style configuration structs.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{Result, SearchError};

/// Order in which the frontier hands out nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Most recently inserted node first (stack)
    DepthFirst,

    /// Least recently inserted node first (queue)
    BreadthFirst,

    /// Lowest heuristic value first, ignoring path cost
    BestFirst,

    /// Lowest `g + h` first
    AStar,

    /// Lowest path cost first
    UniformCost,

    /// Lowest caller-supplied score first
    Custom,
}

impl Strategy {
    /// Every strategy, in identifier order
    pub const ALL: [Strategy; 6] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::BestFirst,
        Strategy::AStar,
        Strategy::UniformCost,
        Strategy::Custom,
    ];

    /// Returns the string identifier of this strategy
    pub fn name(self) -> &'static str {
        match self {
            Strategy::DepthFirst => "depth_first",
            Strategy::BreadthFirst => "breadth_first",
            Strategy::BestFirst => "best_first",
            Strategy::AStar => "astar",
            Strategy::UniformCost => "ucs",
            Strategy::Custom => "custom",
        }
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| SearchError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How aggressively duplicate states are detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleCheck {
    /// No duplicate detection at all
    None,

    /// Reject a successor that repeats a state on its own path
    Path,

    /// Reject or supersede via the cycle ledger
    Full,

    /// `Path` for depth-first search, `Full` for everything else
    Default,
}

impl CycleCheck {
    /// Every cycle-check level, in identifier order
    pub const ALL: [CycleCheck; 4] = [
        CycleCheck::None,
        CycleCheck::Path,
        CycleCheck::Full,
        CycleCheck::Default,
    ];

    /// Returns the string identifier of this level
    pub fn name(self) -> &'static str {
        match self {
            CycleCheck::None => "none",
            CycleCheck::Path => "path",
            CycleCheck::Full => "full",
            CycleCheck::Default => "default",
        }
    }

    /// Resolves `Default` against the given strategy
    ///
    /// The other levels are returned unchanged.
    pub fn resolve(self, strategy: Strategy) -> CycleCheck {
        match (self, strategy) {
            (CycleCheck::Default, Strategy::DepthFirst) => CycleCheck::Path,
            (CycleCheck::Default, _) => CycleCheck::Full,
            (level, _) => level,
        }
    }
}

impl FromStr for CycleCheck {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        CycleCheck::ALL
            .into_iter()
            .find(|level| level.name() == s)
            .ok_or_else(|| SearchError::UnknownCycleCheck(s.to_string()))
    }
}

impl fmt::Display for CycleCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Upper limits on `g`, `h` and `g + h` for admitted successors
///
/// A successor exceeding any one of the three components is pruned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBound {
    /// Limit on the accumulated path cost
    pub g: f64,

    /// Limit on the heuristic estimate
    pub h: f64,

    /// Limit on `g + h`
    pub f: f64,
}

impl CostBound {
    /// Creates a bound from its three components
    pub fn new(g: f64, h: f64, f: f64) -> Self {
        CostBound { g, h, f }
    }

    /// A bound that admits every finite successor
    pub fn unbounded() -> Self {
        CostBound::new(f64::INFINITY, f64::INFINITY, f64::INFINITY)
    }

    /// Sets the limit on `g`
    pub fn with_g(mut self, g: f64) -> Self {
        self.g = g;
        self
    }

    /// Sets the limit on `h`
    pub fn with_h(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Sets the limit on `g + h`
    pub fn with_f(mut self, f: f64) -> Self {
        self.f = f;
        self
    }

    /// Returns true if a successor with these values stays within the bound
    pub fn admits(&self, g: f64, h: f64) -> bool {
        !(g > self.g || h > self.h || g + h > self.f)
    }
}

impl Default for CostBound {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Verbosity of the diagnostic trace emitted through `log`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TraceLevel {
    /// No trace output
    #[default]
    Off,

    /// Initial frontier and every node chosen for expansion
    Frontier,

    /// Additionally, every successor and the pruning decision taken for it
    Expansions,
}

/// Configuration for a single search run
///
/// # Example
///
/// ```
/// use statespace_search::{CostBound, CycleCheck, SearchConfig, Strategy};
/// use std::time::Duration;
///
/// let config = SearchConfig::default()
///     .with_strategy(Strategy::AStar)
///     .with_cycle_check(CycleCheck::Full)
///     .with_time_bound(Duration::from_secs(2))
///     .with_cost_bound(CostBound::unbounded().with_f(40.0));
///
/// assert_eq!(config.describe(), "astar with full cycle checking");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Exploration order
    pub strategy: Strategy,

    /// Requested cycle-check level (`Default` is resolved per strategy)
    pub cycle_check: CycleCheck,

    /// Wall-clock limit applied by [`SearchEngine::search`](crate::SearchEngine::search)
    pub time_bound: Option<Duration>,

    /// Cost bound applied by [`SearchEngine::search`](crate::SearchEngine::search)
    pub cost_bound: Option<CostBound>,

    /// Diagnostic trace verbosity
    pub trace: TraceLevel,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            strategy: Strategy::BreadthFirst,
            cycle_check: CycleCheck::Default,
            time_bound: None,
            cost_bound: None,
            trace: TraceLevel::Off,
        }
    }
}

impl SearchConfig {
    /// Builds a configuration from string identifiers
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownStrategy`] or
    /// [`SearchError::UnknownCycleCheck`] for unrecognised identifiers.
    pub fn from_names(strategy: &str, cycle_check: &str) -> Result<Self> {
        Ok(SearchConfig::default()
            .with_strategy(strategy.parse()?)
            .with_cycle_check(cycle_check.parse()?))
    }

    /// Sets the exploration order
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the cycle-check level
    pub fn with_cycle_check(mut self, cycle_check: CycleCheck) -> Self {
        self.cycle_check = cycle_check;
        self
    }

    /// Sets the wall-clock limit
    pub fn with_time_bound(mut self, time_bound: Duration) -> Self {
        self.time_bound = Some(time_bound);
        self
    }

    /// Sets the cost bound
    pub fn with_cost_bound(mut self, cost_bound: CostBound) -> Self {
        self.cost_bound = Some(cost_bound);
        self
    }

    /// Sets the diagnostic trace verbosity
    pub fn with_trace(mut self, trace: TraceLevel) -> Self {
        self.trace = trace;
        self
    }

    /// The cycle-check level actually used for this strategy
    pub fn effective_cycle_check(&self) -> CycleCheck {
        self.cycle_check.resolve(self.strategy)
    }

    /// Human-readable description, e.g. `"ucs with full cycle checking"`
    pub fn describe(&self) -> String {
        format!(
            "{} with {} cycle checking",
            self.strategy,
            self.effective_cycle_check()
        )
    }
}

/// Configuration shared by the iterative anytime controllers
#[derive(Debug, Clone, PartialEq)]
pub struct AnytimeConfig {
    /// Total wall-clock budget across all iterations
    pub time_bound: Duration,

    /// Initial heuristic weight for weighted A* (must be at least 1)
    pub weight: f64,

    /// Factor applied to the weight after every improvement, in `(0, 1]`
    ///
    /// The weight never drops below 1.
    pub weight_decay: f64,

    /// How much cheaper the next solution must be than the current best
    pub improvement_epsilon: f64,

    /// Diagnostic trace verbosity for every inner run
    pub trace: TraceLevel,
}

impl Default for AnytimeConfig {
    fn default() -> Self {
        AnytimeConfig {
            time_bound: Duration::from_secs(5),
            weight: 1.0,
            weight_decay: 1.0,
            improvement_epsilon: 1e-6,
            trace: TraceLevel::Off,
        }
    }
}

impl AnytimeConfig {
    /// Sets the total wall-clock budget
    pub fn with_time_bound(mut self, time_bound: Duration) -> Self {
        self.time_bound = time_bound;
        self
    }

    /// Sets the initial heuristic weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the per-improvement weight decay
    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }

    /// Sets the minimum improvement between successive solutions
    pub fn with_improvement_epsilon(mut self, improvement_epsilon: f64) -> Self {
        self.improvement_epsilon = improvement_epsilon;
        self
    }

    /// Sets the diagnostic trace verbosity
    pub fn with_trace(mut self, trace: TraceLevel) -> Self {
        self.trace = trace;
        self
    }

    /// Checks that every numeric parameter is in range
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        validate_weight(self.weight)?;
        if !(self.weight_decay > 0.0 && self.weight_decay <= 1.0) {
            return Err(SearchError::InvalidConfiguration(format!(
                "weight_decay must be in (0, 1], got {}",
                self.weight_decay
            )));
        }
        if !(self.improvement_epsilon.is_finite() && self.improvement_epsilon > 0.0) {
            return Err(SearchError::InvalidConfiguration(format!(
                "improvement_epsilon must be positive and finite, got {}",
                self.improvement_epsilon
            )));
        }
        Ok(())
    }
}

/// Rejects weights that would break weighted A* ordering
pub(crate) fn validate_weight(weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 1.0 {
        Ok(())
    } else {
        Err(SearchError::InvalidConfiguration(format!(
            "weight must be finite and at least 1, got {weight}"
        )))
    }
}
