//! Test domains shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statespace_search::{SearchState, Transition};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// Weighted directed graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub cost: f64,
}

#[derive(Debug, Default)]
pub struct Graph {
    pub edges: Vec<Vec<Edge>>,
}

impl Graph {
    pub fn new(nodes: usize) -> Self {
        Graph {
            edges: vec![Vec::new(); nodes],
        }
    }

    pub fn with_edges(nodes: usize, edges: &[(usize, usize, f64)]) -> Self {
        let mut graph = Graph::new(nodes);
        for &(from, to, cost) in edges {
            graph.add_edge(from, to, cost);
        }
        graph
    }

    pub fn add_edge(&mut self, from: usize, to: usize, cost: f64) {
        self.edges[from].push(Edge { from, to, cost });
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Random graph with integer edge costs in `1..=9`, cycles included
    pub fn random(seed: u64, nodes: usize, edges_per_node: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = Graph::new(nodes);
        for from in 0..nodes {
            for _ in 0..edges_per_node {
                let to = rng.gen_range(0..nodes);
                let cost = f64::from(rng.gen_range(1..=9u32));
                graph.add_edge(from, to, cost);
            }
        }
        graph
    }

    /// Cheapest path cost from `start` to `goal`, by plain Dijkstra
    pub fn shortest_path(&self, start: usize, goal: usize) -> Option<f64> {
        let mut dist = vec![f64::INFINITY; self.len()];
        let mut done = vec![false; self.len()];
        dist[start] = 0.0;
        loop {
            let next = (0..self.len())
                .filter(|&n| !done[n] && dist[n].is_finite())
                .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
            let Some(node) = next else { break };
            done[node] = true;
            for edge in &self.edges[node] {
                let candidate = dist[node] + edge.cost;
                if candidate < dist[edge.to] {
                    dist[edge.to] = candidate;
                }
            }
        }
        dist[goal].is_finite().then_some(dist[goal])
    }
}

/// A position in a [`Graph`]
///
/// Tracks its own path cost so tests can compare it with the engine's, and
/// logs `(node, g)` every time it is expanded.
#[derive(Debug, Clone)]
pub struct GraphState {
    pub graph: Rc<Graph>,
    pub node: usize,
    pub g: f64,
    pub expansions: Rc<RefCell<Vec<(usize, f64)>>>,
}

impl GraphState {
    pub fn start(graph: Graph, node: usize) -> Self {
        GraphState {
            graph: Rc::new(graph),
            node,
            g: 0.0,
            expansions: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn expansion_log(&self) -> Vec<(usize, f64)> {
        self.expansions.borrow().clone()
    }
}

impl SearchState for GraphState {
    type Action = Edge;
    type Identity = usize;

    fn successors(&self) -> Vec<Transition<Self>> {
        self.expansions.borrow_mut().push((self.node, self.g));
        self.graph.edges[self.node]
            .iter()
            .map(|edge| {
                let next = GraphState {
                    graph: Rc::clone(&self.graph),
                    node: edge.to,
                    g: self.g + edge.cost,
                    expansions: Rc::clone(&self.expansions),
                };
                Transition::new(*edge, next, edge.cost)
            })
            .collect()
    }

    fn identity(&self) -> usize {
        self.node
    }
}

// ---------------------------------------------------------------------------
// Sokoban
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn step(self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Direction::Up => (x, y - 1),
            Direction::Right => (x + 1, y),
            Direction::Down => (x, y + 1),
            Direction::Left => (x - 1, y),
        }
    }
}

#[derive(Debug)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub storage: BTreeSet<(i32, i32)>,
    pub obstacles: BTreeSet<(i32, i32)>,
}

#[derive(Debug, Clone)]
pub struct Sokoban {
    pub board: Rc<Board>,
    pub robots: Vec<(i32, i32)>,
    pub boxes: BTreeSet<(i32, i32)>,
}

impl Sokoban {
    pub fn new(
        width: i32,
        height: i32,
        robots: &[(i32, i32)],
        boxes: &[(i32, i32)],
        storage: &[(i32, i32)],
        obstacles: &[(i32, i32)],
    ) -> Self {
        Sokoban {
            board: Rc::new(Board {
                width,
                height,
                storage: storage.iter().copied().collect(),
                obstacles: obstacles.iter().copied().collect(),
            }),
            robots: robots.to_vec(),
            boxes: boxes.iter().copied().collect(),
        }
    }

    fn free(&self, (x, y): (i32, i32)) -> bool {
        x >= 0
            && y >= 0
            && x < self.board.width
            && y < self.board.height
            && !self.board.obstacles.contains(&(x, y))
    }

    pub fn is_solved(&self) -> bool {
        self.boxes.iter().all(|b| self.board.storage.contains(b))
    }

    /// Sum over unstored boxes of the distance to the nearest storage cell
    pub fn manhattan(&self) -> f64 {
        self.boxes
            .iter()
            .filter(|b| !self.board.storage.contains(b))
            .map(|&(bx, by)| {
                self.board
                    .storage
                    .iter()
                    .map(|&(sx, sy)| (bx - sx).abs() + (by - sy).abs())
                    .min()
                    .unwrap_or(0)
            })
            .map(f64::from)
            .sum()
    }
}

impl SearchState for Sokoban {
    type Action = (usize, Direction);
    type Identity = (Vec<(i32, i32)>, BTreeSet<(i32, i32)>);

    fn successors(&self) -> Vec<Transition<Self>> {
        let mut successors = Vec::new();
        for (index, &robot) in self.robots.iter().enumerate() {
            for direction in Direction::ALL {
                let target = direction.step(robot);
                if !self.free(target) || self.robots.contains(&target) {
                    continue;
                }
                let mut boxes = self.boxes.clone();
                if boxes.contains(&target) {
                    let dest = direction.step(target);
                    if !self.free(dest) || boxes.contains(&dest) || self.robots.contains(&dest) {
                        continue;
                    }
                    boxes.remove(&target);
                    boxes.insert(dest);
                }
                let mut robots = self.robots.clone();
                robots[index] = target;
                successors.push(Transition::new(
                    (index, direction),
                    Sokoban {
                        board: Rc::clone(&self.board),
                        robots,
                        boxes,
                    },
                    1.0,
                ));
            }
        }
        successors
    }

    fn identity(&self) -> Self::Identity {
        (self.robots.clone(), self.boxes.clone())
    }
}

// ---------------------------------------------------------------------------
// Unbounded walk on the integer plane
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Walk {
    pub x: i64,
    pub y: i64,
}

impl Walk {
    pub fn origin() -> Self {
        Walk { x: 0, y: 0 }
    }
}

impl SearchState for Walk {
    type Action = Direction;
    type Identity = (i64, i64);

    fn successors(&self) -> Vec<Transition<Self>> {
        Direction::ALL
            .into_iter()
            .map(|direction| {
                let next = match direction {
                    Direction::Up => Walk { x: self.x, y: self.y - 1 },
                    Direction::Right => Walk { x: self.x + 1, y: self.y },
                    Direction::Down => Walk { x: self.x, y: self.y + 1 },
                    Direction::Left => Walk { x: self.x - 1, y: self.y },
                };
                Transition::new(direction, next, 1.0)
            })
            .collect()
    }

    fn identity(&self) -> (i64, i64) {
        (self.x, self.y)
    }
}
