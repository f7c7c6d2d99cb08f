//! Main implementation of the search engine
//!
//! This module orchestrates the frontier, the cycle ledger, the goal test,
//! pruning and the deadline for a single search invocation.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::{
    config::{CostBound, CycleCheck, SearchConfig, Strategy, TraceLevel},
    frontier::Frontier,
    ledger::CycleLedger,
    node::{SearchNode, StateArena, StateId, StateRecord},
    state::{SearchState, Transition},
    stats::SearchStatistics,
    utils,
};

type GoalFn<S> = Box<dyn Fn(&S) -> bool>;
type HeuristicFn<S> = Box<dyn Fn(&S) -> f64>;
type ScoringFn = Box<dyn Fn(&SearchNode) -> f64>;

/// Why a search invocation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A node satisfying the goal predicate was extracted
    GoalReached,

    /// The frontier ran dry: no goal is reachable within the pruning rules
    FrontierExhausted,

    /// The deadline passed before a goal was extracted
    TimedOut,
}

/// One state on a solution path
#[derive(Debug, Clone)]
pub struct PathStep<S: SearchState> {
    /// Action that led here (None for the initial state)
    pub action: Option<S::Action>,

    /// The state reached
    pub state: S,

    /// Accumulated path cost at this state
    pub g: f64,
}

/// A path from the initial state to a goal
///
/// The path always holds at least the initial state.
#[derive(Debug, Clone)]
pub struct Solution<S: SearchState> {
    steps: Vec<PathStep<S>>,
}

impl<S: SearchState> Solution<S> {
    fn from_arena(arena: &StateArena<S>, goal: StateId) -> Self {
        let steps = arena
            .path_to(goal)
            .into_iter()
            .map(|id| {
                let record = arena.get(id);
                PathStep {
                    action: record.action.clone(),
                    state: record.state.clone(),
                    g: record.g,
                }
            })
            .collect();
        Solution { steps }
    }

    /// The goal state at the end of the path
    pub fn goal(&self) -> &S {
        &self.steps[self.steps.len() - 1].state
    }

    /// Accumulated cost of the whole path
    pub fn cost(&self) -> f64 {
        self.steps[self.steps.len() - 1].g
    }

    /// Number of actions on the path
    pub fn depth(&self) -> usize {
        self.steps.len() - 1
    }

    /// Every step, initial state first
    pub fn steps(&self) -> &[PathStep<S>] {
        &self.steps
    }

    /// Every state on the path, initial state first
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.steps.iter().map(|step| &step.state)
    }

    /// The actions taken, in order
    pub fn actions(&self) -> impl Iterator<Item = &S::Action> + '_ {
        self.steps.iter().filter_map(|step| step.action.as_ref())
    }

    /// Consumes the solution, keeping only the goal state
    pub fn into_goal(mut self) -> S {
        let last = self.steps.len() - 1;
        self.steps.swap_remove(last).state
    }
}

/// Outcome of one search invocation
#[derive(Debug, Clone)]
pub struct SearchResult<S: SearchState> {
    /// The path to the goal, when one was reached
    pub solution: Option<Solution<S>>,

    /// Why the search stopped
    pub termination: Termination,

    /// Counters for this invocation
    pub statistics: SearchStatistics,
}

impl<S: SearchState> SearchResult<S> {
    /// Returns true if a goal was reached
    pub fn is_goal_reached(&self) -> bool {
        self.termination == Termination::GoalReached
    }

    /// Returns true if the deadline cut the search short
    pub fn is_timed_out(&self) -> bool {
        self.termination == Termination::TimedOut
    }

    /// Cost of the solution, if any
    pub fn cost(&self) -> Option<f64> {
        self.solution.as_ref().map(Solution::cost)
    }
}

/// The state-space search engine
///
/// An engine owns its frontier, cycle ledger, state arena and counters, all
/// of which are reset by [`SearchEngine::init_search`]. It is meant for one
/// search at a time.
pub struct SearchEngine<S: SearchState> {
    /// Configuration for the search
    config: SearchConfig,

    /// `config.cycle_check` resolved against the strategy
    cycle_check: CycleCheck,

    goal: Option<GoalFn<S>>,
    heuristic: HeuristicFn<S>,
    scoring: ScoringFn,

    arena: StateArena<S>,
    frontier: Frontier,
    ledger: CycleLedger<S::Identity>,

    /// Creation counter for nodes, reset per run
    next_index: u64,

    /// Counters carried from `init_search` into the next `search`
    statistics: SearchStatistics,

    initialized: bool,
}

impl<S: SearchState + 'static> SearchEngine<S> {
    /// Creates an engine for the given strategy and cycle-check level
    pub fn new(strategy: Strategy, cycle_check: CycleCheck) -> Self {
        Self::with_config(
            SearchConfig::default()
                .with_strategy(strategy)
                .with_cycle_check(cycle_check),
        )
    }

    /// Creates an engine from a full configuration
    pub fn with_config(config: SearchConfig) -> Self {
        SearchEngine {
            cycle_check: config.effective_cycle_check(),
            frontier: Frontier::new(config.strategy),
            config,
            goal: None,
            heuristic: Box::new(utils::zero_heuristic::<S>),
            scoring: Box::new(utils::heuristic_score),
            arena: StateArena::new(),
            ledger: CycleLedger::new(),
            next_index: 0,
            statistics: SearchStatistics::new(),
            initialized: false,
        }
    }

    /// Sets the goal predicate
    pub fn with_goal<G: Fn(&S) -> bool + 'static>(mut self, goal: G) -> Self {
        self.set_goal(goal);
        self
    }

    /// Sets the heuristic function (zero by default)
    pub fn with_heuristic<H: Fn(&S) -> f64 + 'static>(mut self, heuristic: H) -> Self {
        self.set_heuristic(heuristic);
        self
    }

    /// Sets the scoring function used by [`Strategy::Custom`] (`h` by default)
    pub fn with_scoring<F: Fn(&SearchNode) -> f64 + 'static>(mut self, scoring: F) -> Self {
        self.set_scoring(scoring);
        self
    }

    /// Replaces the goal predicate
    pub fn set_goal<G: Fn(&S) -> bool + 'static>(&mut self, goal: G) {
        self.goal = Some(Box::new(goal));
    }

    /// Replaces the heuristic function
    ///
    /// The initial node's estimate is computed by `init_search`, so set the
    /// heuristic before calling it.
    pub fn set_heuristic<H: Fn(&S) -> f64 + 'static>(&mut self, heuristic: H) {
        self.heuristic = Box::new(heuristic);
    }

    /// Replaces the custom scoring function
    pub fn set_scoring<F: Fn(&SearchNode) -> f64 + 'static>(&mut self, scoring: F) {
        self.scoring = Box::new(scoring);
    }

    /// Sets the diagnostic trace verbosity
    pub fn set_trace(&mut self, trace: TraceLevel) {
        self.config.trace = trace;
    }

    /// Returns the configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the cycle-check level in effect
    pub fn cycle_check(&self) -> CycleCheck {
        self.cycle_check
    }

    /// Returns the frontier of the current run
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Returns the cycle ledger of the current run
    pub fn ledger(&self) -> &CycleLedger<S::Identity> {
        &self.ledger
    }

    /// Returns every state admitted during the current run
    pub fn arena(&self) -> &StateArena<S> {
        &self.arena
    }

    /// Prepares a new run from `initial_state`
    ///
    /// Clears the frontier, ledger, arena and counters, seeds the frontier with
    /// the initial node and, under full cycle checking, records the initial
    /// identity at cost 0.
    pub fn init_search(&mut self, initial_state: S) {
        self.arena.clear();
        self.ledger.clear();
        self.frontier = Frontier::new(self.config.strategy);
        self.next_index = 0;
        self.statistics = SearchStatistics {
            generated: 1,
            ..SearchStatistics::new()
        };

        if self.config.trace >= TraceLevel::Frontier {
            debug!("   TRACE: Search Strategy: {}", self.config.describe());
            debug!("   TRACE: Initial State: {:?}", initial_state);
        }

        let identity = initial_state.identity();
        let h = (self.heuristic)(&initial_state);
        if self.cycle_check == CycleCheck::Full {
            self.ledger.record(identity.clone(), 0.0);
        }

        let id = self.arena.push(StateRecord {
            state: initial_state,
            identity,
            parent: None,
            action: None,
            g: 0.0,
            depth: 0,
        });
        let root = self.make_node(id, 0.0, h, 0);
        self.frontier.insert(root);
        self.initialized = true;
    }

    /// Runs the search with the configured time and cost bounds
    ///
    /// # Panics
    ///
    /// Panics if no goal predicate was set or `init_search` was never called.
    pub fn search(&mut self) -> SearchResult<S> {
        let time_bound = self.config.time_bound;
        let cost_bound = self.config.cost_bound;
        self.search_with_bounds(time_bound, cost_bound)
    }

    /// Runs the search with explicit bounds
    ///
    /// Calling it again after it returns resumes from whatever is left on the
    /// frontier, with fresh statistics.
    ///
    /// # Panics
    ///
    /// Panics if no goal predicate was set or `init_search` was never called.
    pub fn search_with_bounds(
        &mut self,
        time_bound: Option<Duration>,
        cost_bound: Option<CostBound>,
    ) -> SearchResult<S> {
        assert!(self.initialized, "search invoked before init_search");
        assert!(
            self.goal.is_some(),
            "search invoked without a goal predicate"
        );

        let start = Instant::now();
        let deadline = time_bound.and_then(|bound| utils::deadline_after(start, bound));
        let mut statistics = std::mem::take(&mut self.statistics);
        self.frontier.reset_high_water();

        debug!(
            "Starting {} (time bound: {:?}, cost bound: {:?})",
            self.config.describe(),
            time_bound,
            cost_bound
        );
        if self.config.trace >= TraceLevel::Frontier {
            self.trace_frontier();
        }

        let (termination, goal) = loop {
            let Some(node) = self.frontier.pop() else {
                break (Termination::FrontierExhausted, None);
            };

            if self.config.trace >= TraceLevel::Frontier {
                debug!("   TRACE: Next State to expand: {}", self.describe_node(&node));
            }

            if self.is_goal(node.state) {
                break (Termination::GoalReached, Some(node.state));
            }

            if deadline.is_some_and(|deadline| Instant::now() > deadline) {
                info!("Search has exceeded the time bound provided");
                // Unexpanded, so a resumed run must see it again
                self.frontier.restore(node);
                break (Termination::TimedOut, None);
            }

            // A cheaper copy of this state was queued after this one
            if self.cycle_check == CycleCheck::Full
                && self
                    .ledger
                    .is_superseded(&self.arena.get(node.state).identity, node.g)
            {
                statistics.stale_skipped += 1;
                if self.config.trace >= TraceLevel::Frontier {
                    debug!("   TRACE: Skipping superseded node S{}", node.index);
                }
                continue;
            }

            self.expand(&node, cost_bound.as_ref(), &mut statistics);
        };

        statistics.frontier_high_water = self.frontier.high_water();
        statistics.total_time = start.elapsed();

        let solution = goal.map(|id| Solution::from_arena(&self.arena, id));
        debug!(
            "Search finished: {:?} (cost: {:?}, {})",
            termination,
            solution.as_ref().map(Solution::cost),
            statistics
        );

        SearchResult {
            solution,
            termination,
            statistics,
        }
    }

    /// Generates and filters the successors of `node`
    fn expand(
        &mut self,
        node: &SearchNode,
        cost_bound: Option<&CostBound>,
        statistics: &mut SearchStatistics,
    ) {
        let successors = self.arena.get(node.state).state.successors();
        statistics.expanded += 1;
        statistics.generated += successors.len();

        let tracing = self.config.trace >= TraceLevel::Expansions;
        if tracing {
            debug!("   TRACE: Expanding Node. {} successors", successors.len());
        }

        for Transition {
            action,
            state,
            cost,
        } in successors
        {
            let identity = state.identity();
            let g = node.g + cost;

            if self.is_prunable(node.state, &identity, g) {
                statistics.pruned_cycles += 1;
                if tracing {
                    debug!(
                        "   TRACE: Successor {:?}:{:?} (g={}) pruned by cycle checking (ledger g={:?})",
                        action,
                        identity,
                        g,
                        self.ledger.best_cost(&identity)
                    );
                }
                continue;
            }

            let h = (self.heuristic)(&state);
            if let Some(bound) = cost_bound {
                if !bound.admits(g, h) {
                    statistics.pruned_cost += 1;
                    if tracing {
                        debug!(
                            "   TRACE: Successor {:?}:{:?} (g={}, h={}) pruned, over cost bound {:?}",
                            action, identity, g, h, bound
                        );
                    }
                    continue;
                }
            }

            if tracing {
                debug!(
                    "   TRACE: Successor {:?}:{:?} (g={}, h={}, f=g+h={}) added to OPEN",
                    action,
                    identity,
                    g,
                    h,
                    g + h
                );
            }

            if self.cycle_check == CycleCheck::Full {
                self.ledger.record(identity.clone(), g);
            }

            let depth = node.depth + 1;
            let id = self.arena.push(StateRecord {
                state,
                identity,
                parent: Some(node.state),
                action: Some(action),
                g,
                depth,
            });
            let child = self.make_node(id, g, h, depth);
            self.frontier.insert(child);
        }
    }

    /// Cycle-check test for a successor of `parent`
    fn is_prunable(&self, parent: StateId, identity: &S::Identity, g: f64) -> bool {
        match self.cycle_check {
            CycleCheck::Full => self.ledger.blocks(identity, g),
            CycleCheck::Path => self.arena.path_contains(parent, identity),
            CycleCheck::None | CycleCheck::Default => false,
        }
    }

    fn is_goal(&self, id: StateId) -> bool {
        self.goal
            .as_ref()
            .is_some_and(|goal| goal(&self.arena.get(id).state))
    }

    fn make_node(&mut self, id: StateId, g: f64, h: f64, depth: usize) -> SearchNode {
        let node = SearchNode::new(id, g, h, depth, self.next_index);
        self.next_index += 1;
        if self.config.strategy == Strategy::Custom {
            let score = (self.scoring)(&node);
            node.with_score(score)
        } else {
            node
        }
    }

    fn describe_node(&self, node: &SearchNode) -> String {
        let record = self.arena.get(node.state);
        format!(
            "<S{}:{:?}:{:?}, g={}, h={}, f=g+h={}>",
            node.index,
            record.action,
            record.identity,
            node.g,
            node.h,
            node.f()
        )
    }

    fn trace_frontier(&self) {
        debug!("   TRACE: OPEN ({} nodes):", self.frontier.len());
        for node in self.frontier.iter() {
            debug!("   {}", self.describe_node(node));
        }
        if self.cycle_check == CycleCheck::Full {
            debug!("   TRACE: Cycle ledger holds {} states", self.ledger.len());
        }
    }
}
