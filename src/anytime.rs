//! Deadline-bounded anytime controllers built on the search engine
//!
//! These drive fresh [`SearchEngine`] runs one after another, tightening a
//! cost bound after each solution so that later runs only look for strictly
//! cheaper ones. Every controller measures its budget from a single start
//! instant across all iterations and hands back the best solution it saw.

use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::{
    config::{validate_weight, AnytimeConfig, CostBound, CycleCheck, SearchConfig, Strategy},
    engine::{SearchEngine, SearchResult, Solution, Termination},
    node::SearchNode,
    state::SearchState,
    stats::SearchStatistics,
    utils, Result,
};

/// Weighted f-value: `g + weight * h`
///
/// A weight of 1 gives plain A* ordering; larger weights lean on the heuristic
/// and usually find a first solution sooner at the price of optimality.
pub fn weighted_fval(node: &SearchNode, weight: f64) -> f64 {
    node.g + weight * node.h
}

/// Outcome of an anytime controller
#[derive(Debug, Clone)]
pub struct AnytimeResult<S: SearchState> {
    /// The cheapest solution found, if any
    pub solution: Option<Solution<S>>,

    /// Cost of every improving solution, in the order they were found
    pub improvements: Vec<f64>,

    /// Number of engine runs performed
    pub iterations: usize,

    /// How the last engine run ended
    pub termination: Termination,

    /// Counters summed over every run
    pub statistics: SearchStatistics,
}

impl<S: SearchState> AnytimeResult<S> {
    fn new() -> Self {
        AnytimeResult {
            solution: None,
            improvements: Vec::new(),
            iterations: 0,
            termination: Termination::FrontierExhausted,
            statistics: SearchStatistics::new(),
        }
    }

    /// Cost of the best solution, if any
    pub fn cost(&self) -> Option<f64> {
        self.solution.as_ref().map(Solution::cost)
    }
}

/// Single weighted A* run: custom ordering by [`weighted_fval`] with full
/// cycle checking
///
/// Returns the first goal found, or no solution if the frontier empties or
/// `time_bound` passes first.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfiguration`](crate::SearchError::InvalidConfiguration)
/// if `weight` is not finite or is below 1.
pub fn weighted_astar<S, G, H>(
    initial_state: S,
    goal: G,
    heuristic: H,
    weight: f64,
    time_bound: Duration,
) -> Result<SearchResult<S>>
where
    S: SearchState + 'static,
    G: Fn(&S) -> bool + 'static,
    H: Fn(&S) -> f64 + 'static,
{
    validate_weight(weight)?;
    let mut engine = weighted_engine::<S>(weight)
        .with_goal(goal)
        .with_heuristic(heuristic);
    engine.init_search(initial_state);
    Ok(engine.search_with_bounds(Some(time_bound), None))
}

/// Anytime weighted A*
///
/// Repeats weighted A* until the total time budget runs out. After a solution
/// of cost `c`, the next run prunes every successor with
/// `g + h > c - improvement_epsilon` and the weight is multiplied by
/// `weight_decay` (never below 1). Stops early once a run exhausts its
/// frontier or fails to improve.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfiguration`](crate::SearchError::InvalidConfiguration)
/// if `config` does not validate.
pub fn iterative_astar<S, G, H>(
    initial_state: S,
    goal: G,
    heuristic: H,
    config: &AnytimeConfig,
) -> Result<AnytimeResult<S>>
where
    S: SearchState + 'static,
    G: Fn(&S) -> bool + 'static,
    H: Fn(&S) -> f64 + 'static,
{
    config.validate()?;
    Ok(refine(
        initial_state,
        Rc::new(goal),
        Rc::new(heuristic),
        config,
        Refinement::WeightedAStar,
    ))
}

/// Anytime greedy best-first search
///
/// Same control loop as [`iterative_astar`], but each run orders by `h` alone
/// and the bound after a solution of cost `c` prunes successors with
/// `g > c - improvement_epsilon`.
///
/// # Errors
///
/// Returns [`SearchError::InvalidConfiguration`](crate::SearchError::InvalidConfiguration)
/// if `config` does not validate.
pub fn iterative_gbfs<S, G, H>(
    initial_state: S,
    goal: G,
    heuristic: H,
    config: &AnytimeConfig,
) -> Result<AnytimeResult<S>>
where
    S: SearchState + 'static,
    G: Fn(&S) -> bool + 'static,
    H: Fn(&S) -> f64 + 'static,
{
    config.validate()?;
    Ok(refine(
        initial_state,
        Rc::new(goal),
        Rc::new(heuristic),
        config,
        Refinement::GreedyBestFirst,
    ))
}

/// Which search each anytime iteration runs and how it tightens the bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refinement {
    WeightedAStar,
    GreedyBestFirst,
}

impl Refinement {
    fn name(self) -> &'static str {
        match self {
            Refinement::WeightedAStar => "iterative weighted A*",
            Refinement::GreedyBestFirst => "iterative greedy best-first",
        }
    }

    fn engine<S: SearchState + 'static>(self, weight: f64) -> SearchEngine<S> {
        match self {
            Refinement::WeightedAStar => weighted_engine(weight),
            Refinement::GreedyBestFirst => SearchEngine::with_config(
                SearchConfig::default()
                    .with_strategy(Strategy::BestFirst)
                    .with_cycle_check(CycleCheck::Full),
            ),
        }
    }

    /// Bound that only admits paths strictly cheaper than `best`
    fn bound(self, best: f64, epsilon: f64) -> CostBound {
        let limit = best - epsilon;
        match self {
            Refinement::WeightedAStar => CostBound::unbounded().with_f(limit),
            Refinement::GreedyBestFirst => CostBound::unbounded().with_g(limit),
        }
    }
}

fn weighted_engine<S: SearchState + 'static>(weight: f64) -> SearchEngine<S> {
    SearchEngine::with_config(
        SearchConfig::default()
            .with_strategy(Strategy::Custom)
            .with_cycle_check(CycleCheck::Full),
    )
    .with_scoring(move |node| weighted_fval(node, weight))
}

/// The shared anytime loop
fn refine<S, G, H>(
    initial_state: S,
    goal: Rc<G>,
    heuristic: Rc<H>,
    config: &AnytimeConfig,
    refinement: Refinement,
) -> AnytimeResult<S>
where
    S: SearchState + 'static,
    G: Fn(&S) -> bool + 'static,
    H: Fn(&S) -> f64 + 'static,
{
    let start = Instant::now();
    let deadline = utils::deadline_after(start, config.time_bound);
    let mut weight = config.weight;
    let mut bound: Option<CostBound> = None;
    let mut report = AnytimeResult::new();

    loop {
        let time_bound = match deadline {
            Some(deadline) => match utils::remaining_time(deadline) {
                Some(remaining) => Some(remaining),
                None => {
                    report.termination = Termination::TimedOut;
                    break;
                }
            },
            None => None,
        };

        // A fresh engine per run: a ledger filled under one bound must not
        // suppress states under the next.
        let mut engine = refinement.engine::<S>(weight);
        engine.set_trace(config.trace);
        let run_goal = Rc::clone(&goal);
        let run_heuristic = Rc::clone(&heuristic);
        engine.set_goal(move |state: &S| (*run_goal)(state));
        engine.set_heuristic(move |state: &S| (*run_heuristic)(state));
        engine.init_search(initial_state.clone());

        let result = engine.search_with_bounds(time_bound, bound);
        report.iterations += 1;
        report.termination = result.termination;
        report.statistics.accumulate(&result.statistics);

        let Some(solution) = result.solution else {
            debug!(
                "{}: run {} ended without a solution ({:?})",
                refinement.name(),
                report.iterations,
                result.termination
            );
            break;
        };

        let cost = solution.cost();
        // Safeguard only: the bound already keeps later solutions strictly
        // cheaper
        if report.cost().is_some_and(|best| cost >= best) {
            debug!(
                "{}: run {} found cost {} which does not improve on the best",
                refinement.name(),
                report.iterations,
                cost
            );
            break;
        }

        info!(
            "{}: run {} improved the best cost to {} (weight {})",
            refinement.name(),
            report.iterations,
            cost,
            weight
        );
        report.improvements.push(cost);
        report.solution = Some(solution);
        if cost <= 0.0 {
            debug!(
                "{}: run {} found a zero-cost solution, nothing left to improve",
                refinement.name(),
                report.iterations
            );
            break;
        }
        bound = Some(refinement.bound(cost, config.improvement_epsilon));
        weight = (weight * config.weight_decay).max(1.0);
    }

    report.statistics.total_time = start.elapsed();
    report
}
