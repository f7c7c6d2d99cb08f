//! Cheapest-known path cost per state identity, used by full cycle checking

use std::collections::HashMap;
use std::hash::Hash;

/// Map from state identity to the lowest path cost it was admitted at
///
/// Entries only ever move down. A node popped from the frontier is checked
/// against its entry before expansion, because a cheaper copy may have been
/// recorded after it was queued.
#[derive(Debug, Clone)]
pub struct CycleLedger<I: Hash + Eq> {
    costs: HashMap<I, f64>,
}

impl<I: Hash + Eq> CycleLedger<I> {
    /// Creates an empty ledger
    pub fn new() -> Self {
        CycleLedger {
            costs: HashMap::new(),
        }
    }

    /// Records `cost` for `identity` unless an equal or cheaper entry exists
    ///
    /// Returns true if the ledger changed.
    pub fn record(&mut self, identity: I, cost: f64) -> bool {
        match self.costs.get_mut(&identity) {
            Some(existing) if *existing <= cost => false,
            Some(existing) => {
                *existing = cost;
                true
            }
            None => {
                self.costs.insert(identity, cost);
                true
            }
        }
    }

    /// The recorded cost for `identity`, if any
    pub fn best_cost(&self, identity: &I) -> Option<f64> {
        self.costs.get(identity).copied()
    }

    /// Returns true if an entry at `cost` or cheaper already exists
    pub fn blocks(&self, identity: &I, cost: f64) -> bool {
        self.best_cost(identity).is_some_and(|best| best <= cost)
    }

    /// Returns true if the entry is strictly cheaper than `cost`
    pub fn is_superseded(&self, identity: &I, cost: f64) -> bool {
        self.best_cost(identity).is_some_and(|best| best < cost)
    }

    /// Number of distinct identities recorded
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Returns true if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Forgets every entry
    pub fn clear(&mut self) {
        self.costs.clear();
    }
}

impl<I: Hash + Eq> Default for CycleLedger<I> {
    fn default() -> Self {
        Self::new()
    }
}
