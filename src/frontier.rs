//! The open collection of generated-but-unexpanded nodes
//!
//! The backing structure is chosen once from the [`Strategy`] and never
//! changes during a run: a stack for depth-first, a queue for breadth-first,
//! and a binary heap keyed by an explicit [`OrderingMode`] for the rest.
//! The frontier does no deduplication of its own.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::config::Strategy;
use crate::node::{OrderingMode, PriorityKey, SearchNode};

/// A heap entry wrapping a node with its ordering key
///
/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// lowest key first.
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<PriorityKey>,
    node: SearchNode,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

#[derive(Debug)]
enum Store {
    Stack(Vec<SearchNode>),
    Queue(VecDeque<SearchNode>),
    Priority {
        heap: BinaryHeap<FrontierEntry>,
        mode: OrderingMode,
    },
}

/// Strategy-selected open collection
#[derive(Debug)]
pub struct Frontier {
    store: Store,
    high_water: usize,
}

impl Frontier {
    /// Creates an empty frontier for the given strategy
    pub fn new(strategy: Strategy) -> Self {
        let store = match (strategy, OrderingMode::for_strategy(strategy)) {
            (_, Some(mode)) => Store::Priority {
                heap: BinaryHeap::new(),
                mode,
            },
            (Strategy::DepthFirst, None) => Store::Stack(Vec::new()),
            (_, None) => Store::Queue(VecDeque::new()),
        };
        Frontier {
            store,
            high_water: 0,
        }
    }

    /// The ordering mode, for heap-backed frontiers
    pub fn ordering(&self) -> Option<OrderingMode> {
        match &self.store {
            Store::Priority { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    /// Adds a node
    ///
    /// Amortised O(1) for the stack and queue, O(log n) for the heap.
    pub fn insert(&mut self, node: SearchNode) {
        match &mut self.store {
            Store::Stack(stack) => stack.push(node),
            Store::Queue(queue) => queue.push_back(node),
            Store::Priority { heap, mode } => heap.push(FrontierEntry {
                key: Reverse(mode.key(&node)),
                node,
            }),
        }
        self.high_water = self.high_water.max(self.len());
    }

    /// Removes the next node in strategy order, or None when empty
    pub fn pop(&mut self) -> Option<SearchNode> {
        match &mut self.store {
            Store::Stack(stack) => stack.pop(),
            Store::Queue(queue) => queue.pop_front(),
            Store::Priority { heap, .. } => heap.pop().map(|entry| entry.node),
        }
    }

    /// Puts a just-popped node back so it is the next one popped again
    pub fn restore(&mut self, node: SearchNode) {
        match &mut self.store {
            Store::Queue(queue) => queue.push_front(node),
            _ => self.insert(node),
        }
    }

    /// Removes the next node in strategy order
    ///
    /// # Panics
    ///
    /// Panics if the frontier is empty.
    pub fn extract(&mut self) -> SearchNode {
        self.pop()
            .unwrap_or_else(|| panic!("extract called on an empty frontier"))
    }

    /// Number of nodes waiting
    pub fn len(&self) -> usize {
        match &self.store {
            Store::Stack(stack) => stack.len(),
            Store::Queue(queue) => queue.len(),
            Store::Priority { heap, .. } => heap.len(),
        }
    }

    /// Returns true if no node is waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size the frontier has reached
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Restarts high-water tracking from the current size
    pub fn reset_high_water(&mut self) {
        self.high_water = self.len();
    }

    /// Iterates over the waiting nodes in storage order (not extraction order)
    pub fn iter(&self) -> Box<dyn Iterator<Item = &SearchNode> + '_> {
        match &self.store {
            Store::Stack(stack) => Box::new(stack.iter()),
            Store::Queue(queue) => Box::new(queue.iter()),
            Store::Priority { heap, .. } => Box::new(heap.iter().map(|entry| &entry.node)),
        }
    }
}
