//! Traits defining the problem state representation for search.
//!
//! The `SearchState` trait is the only interface a problem domain has to
//! implement. The engine never mutates a state once it has been created, and it
//! keeps track of parents and path costs itself, so implementations only have
//! to describe how one configuration leads to the next.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait defining the problem state interface required for search
///
/// Implementations are domain collaborators: they generate successors and
/// expose a canonical identity, nothing more. Any panic raised here propagates
/// straight through the engine to the caller.
pub trait SearchState: Clone + Debug {
    /// The type of actions that lead from one state to the next
    type Action: Clone + Debug;

    /// Canonical identity used for duplicate detection
    ///
    /// Two states describing the same problem configuration must produce equal
    /// identities no matter which path reached them.
    type Identity: Hash + Eq + Clone + Debug;

    /// Returns every state reachable from this one in a single step
    ///
    /// Each transition carries the action that produced it and its
    /// non-negative incremental cost. The list may be empty but must be finite.
    ///
    /// # Example
    ///
    /// ```
    /// # use statespace_search::{SearchState, Transition};
    /// # #[derive(Clone, Debug)]
    /// # struct Light(bool);
    /// # impl SearchState for Light {
    /// # type Action = &'static str;
    /// # type Identity = bool;
    /// fn successors(&self) -> Vec<Transition<Self>> {
    ///     // Flipping the switch costs one unit either way
    ///     vec![Transition::new("flip", Light(!self.0), 1.0)]
    /// }
    /// # fn identity(&self) -> bool { self.0 }
    /// # }
    /// ```
    fn successors(&self) -> Vec<Transition<Self>>;

    /// Returns the canonical identity of this state
    fn identity(&self) -> Self::Identity;
}

/// One step out of a state: the action taken, the resulting state and its cost
#[derive(Debug, Clone)]
pub struct Transition<S: SearchState> {
    /// The action that produced `state`
    pub action: S::Action,

    /// The resulting state
    pub state: S,

    /// Incremental cost of taking `action`
    pub cost: f64,
}

impl<S: SearchState> Transition<S> {
    /// Creates a new transition
    pub fn new(action: S::Action, state: S, cost: f64) -> Self {
        Transition {
            action,
            state,
            cost,
        }
    }
}
