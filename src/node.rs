//! Search nodes, their ordering, and the state arena they point into
//!
//! States are stored once in a [`StateArena`] indexed by creation order.
//! Parent links are arena indices, so a path is reconstructed by walking
//! indices back to the root instead of following shared pointers.

use std::cmp::Ordering;

use crate::config::Strategy;
use crate::state::SearchState;

/// Index of a state in the [`StateArena`]
pub type StateId = usize;

/// A state admitted to the search, with its bookkeeping
#[derive(Debug, Clone)]
pub struct StateRecord<S: SearchState> {
    /// The state itself
    pub state: S,

    /// Cached canonical identity of `state`
    pub identity: S::Identity,

    /// The state this one was generated from (None for the initial state)
    pub parent: Option<StateId>,

    /// The action that led here from `parent`
    pub action: Option<S::Action>,

    /// Accumulated path cost from the initial state
    pub g: f64,

    /// Number of actions from the initial state
    pub depth: usize,
}

/// Append-only storage for every state admitted during one run
#[derive(Debug)]
pub struct StateArena<S: SearchState> {
    records: Vec<StateRecord<S>>,
}

impl<S: SearchState> StateArena<S> {
    /// Creates an empty arena
    pub fn new() -> Self {
        StateArena {
            records: Vec::new(),
        }
    }

    /// Stores a record and returns its index
    pub fn push(&mut self, record: StateRecord<S>) -> StateId {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Returns the record stored at `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this arena.
    pub fn get(&self, id: StateId) -> &StateRecord<S> {
        &self.records[id]
    }

    /// Number of stored states
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no state has been stored
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every stored state
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Iterates over `id` and its ancestors, nearest first
    pub fn ancestors(&self, id: StateId) -> Ancestors<'_, S> {
        Ancestors {
            arena: self,
            next: Some(id),
        }
    }

    /// Returns true if `identity` matches `id` or any of its ancestors
    pub fn path_contains(&self, id: StateId, identity: &S::Identity) -> bool {
        self.ancestors(id)
            .any(|ancestor| &self.get(ancestor).identity == identity)
    }

    /// Indices from the initial state down to `id`
    pub fn path_to(&self, id: StateId) -> Vec<StateId> {
        let mut path: Vec<StateId> = self.ancestors(id).collect();
        path.reverse();
        path
    }
}

impl<S: SearchState> Default for StateArena<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a state and its ancestors
pub struct Ancestors<'a, S: SearchState> {
    arena: &'a StateArena<S>,
    next: Option<StateId>,
}

impl<S: SearchState> Iterator for Ancestors<'_, S> {
    type Item = StateId;

    fn next(&mut self) -> Option<StateId> {
        let current = self.next?;
        self.next = self.arena.get(current).parent;
        Some(current)
    }
}

/// A frontier entry: an arena index plus the values it is ordered by
///
/// `g` is a snapshot of the state's path cost taken when the node was created;
/// `h` is computed once at the same moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    /// Arena index of the wrapped state
    pub state: StateId,

    /// Path cost at creation
    pub g: f64,

    /// Heuristic estimate at creation
    pub h: f64,

    /// Depth of the wrapped state
    pub depth: usize,

    /// Per-run creation counter
    pub index: u64,

    /// Priority used by the custom ordering
    pub score: f64,
}

impl SearchNode {
    /// Creates a node whose custom score defaults to `h`
    pub fn new(state: StateId, g: f64, h: f64, depth: usize, index: u64) -> Self {
        SearchNode {
            state,
            g,
            h,
            depth,
            index,
            score: h,
        }
    }

    /// Replaces the custom score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// `g + h`
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Which value a priority frontier orders nodes by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingMode {
    /// `g` alone (uniform-cost)
    PathCost,

    /// `h` alone (greedy best-first)
    Heuristic,

    /// `g + h` (A*)
    PathPlusHeuristic,

    /// The node's custom score
    Custom,
}

impl OrderingMode {
    /// The ordering used by a strategy, or None for the insertion-ordered ones
    pub fn for_strategy(strategy: Strategy) -> Option<Self> {
        match strategy {
            Strategy::DepthFirst | Strategy::BreadthFirst => None,
            Strategy::UniformCost => Some(OrderingMode::PathCost),
            Strategy::BestFirst => Some(OrderingMode::Heuristic),
            Strategy::AStar => Some(OrderingMode::PathPlusHeuristic),
            Strategy::Custom => Some(OrderingMode::Custom),
        }
    }

    /// Builds the key a node is ordered by under this mode
    pub fn key(self, node: &SearchNode) -> PriorityKey {
        let primary = match self {
            OrderingMode::PathCost => node.g,
            OrderingMode::Heuristic => node.h,
            OrderingMode::PathPlusHeuristic => node.f(),
            OrderingMode::Custom => node.score,
        };
        PriorityKey {
            primary,
            g: node.g,
            index: node.index,
        }
    }
}

/// Ordering key for priority frontiers
///
/// Lower `primary` first; ties go to the larger `g` (deeper progress), then to
/// the older node. Keys compare with `f64::total_cmp`, so infinite estimates
/// sort after every finite one.
#[derive(Debug, Clone, Copy)]
pub struct PriorityKey {
    pub primary: f64,
    pub g: f64,
    pub index: u64,
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.primary
            .total_cmp(&other.primary)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| self.index.cmp(&other.index))
    }
}
