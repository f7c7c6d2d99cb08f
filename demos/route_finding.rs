//! Route-finding example for the search engine
//!
//! Finds a road route between two towns with every strategy and compares
//! path cost against work done. A* uses straight-line distance, which never
//! overestimates a road distance. Run with `RUST_LOG=debug` to see the
//! traced A* run.

use std::rc::Rc;

use statespace_search::{
    CycleCheck, SearchConfig, SearchEngine, SearchState, Strategy, TraceLevel, Transition,
};

const TOWNS: [(&str, f64, f64); 10] = [
    ("Arden", 0.0, 0.0),
    ("Brill", 4.0, 1.0),
    ("Corby", 2.0, 5.0),
    ("Dunmow", 7.0, 4.0),
    ("Eltham", 5.0, 8.0),
    ("Frome", 10.0, 1.0),
    ("Goole", 9.0, 8.0),
    ("Hythe", 13.0, 5.0),
    ("Ilkley", 12.0, 10.0),
    ("Jarrow", 16.0, 8.0),
];

/// Undirected roads as (town, town, winding factor over the straight line)
const ROADS: [(usize, usize, f64); 15] = [
    (0, 1, 1.1),
    (0, 2, 1.3),
    (1, 2, 1.0),
    (1, 3, 1.2),
    (1, 5, 1.5),
    (2, 4, 1.1),
    (3, 4, 1.0),
    (3, 5, 1.0),
    (3, 6, 1.4),
    (4, 6, 1.2),
    (5, 7, 1.1),
    (6, 7, 1.0),
    (6, 8, 1.3),
    (7, 9, 1.6),
    (8, 9, 1.1),
];

fn straight_line(a: usize, b: usize) -> f64 {
    let (_, ax, ay) = TOWNS[a];
    let (_, bx, by) = TOWNS[b];
    (ax - bx).hypot(ay - by)
}

#[derive(Debug)]
struct RoadMap {
    roads: Vec<Vec<(usize, f64)>>,
}

impl RoadMap {
    fn new() -> Self {
        let mut roads = vec![Vec::new(); TOWNS.len()];
        for (a, b, winding) in ROADS {
            let length = straight_line(a, b) * winding;
            roads[a].push((b, length));
            roads[b].push((a, length));
        }
        RoadMap { roads }
    }
}

#[derive(Debug, Clone)]
struct Position {
    map: Rc<RoadMap>,
    town: usize,
}

impl SearchState for Position {
    type Action = &'static str;
    type Identity = usize;

    fn successors(&self) -> Vec<Transition<Self>> {
        self.map.roads[self.town]
            .iter()
            .map(|&(town, length)| {
                let next = Position {
                    map: Rc::clone(&self.map),
                    town,
                };
                Transition::new(TOWNS[town].0, next, length)
            })
            .collect()
    }

    fn identity(&self) -> usize {
        self.town
    }
}

fn main() {
    // Initialize logging
    env_logger::init();

    let start = Position {
        map: Rc::new(RoadMap::new()),
        town: 0,
    };
    let goal = TOWNS.len() - 1;

    println!("Route Finding Example");
    println!("=====================");
    println!("From {} to {}", TOWNS[0].0, TOWNS[goal].0);
    println!();
    println!(
        "{:<40} {:>8} {:>9} {:>9} {:>7}",
        "configuration", "cost", "expanded", "generated", "pruned"
    );

    for strategy in Strategy::ALL {
        for cycle_check in [CycleCheck::Path, CycleCheck::Full] {
            let config = SearchConfig::default()
                .with_strategy(strategy)
                .with_cycle_check(cycle_check);
            let description = config.describe();

            let mut engine = SearchEngine::with_config(config)
                .with_goal(move |p: &Position| p.town == goal)
                .with_heuristic(move |p: &Position| straight_line(p.town, goal))
                .with_scoring(|node| node.g + 2.0 * node.h);
            engine.init_search(start.clone());
            let result = engine.search();

            let cost = result
                .cost()
                .map_or_else(|| "-".to_string(), |cost| format!("{:.2}", cost));
            println!(
                "{:<40} {:>8} {:>9} {:>9} {:>7}",
                description,
                cost,
                result.statistics.expanded,
                result.statistics.generated,
                result.statistics.pruned()
            );
        }
    }
    println!();

    // One traced run; the trace goes to the logger at debug level
    let config = SearchConfig::default()
        .with_strategy(Strategy::AStar)
        .with_trace(TraceLevel::Expansions);
    let mut engine = SearchEngine::with_config(config)
        .with_goal(move |p: &Position| p.town == goal)
        .with_heuristic(move |p: &Position| straight_line(p.town, goal));
    engine.init_search(start);
    let result = engine.search();

    match result.solution {
        Some(solution) => {
            let route: Vec<&str> = solution.states().map(|p| TOWNS[p.town].0).collect();
            println!("Best route: {} ({:.2})", route.join(" -> "), solution.cost());
        }
        None => println!("No route found"),
    }
    println!("{}", result.statistics.summary());
}
