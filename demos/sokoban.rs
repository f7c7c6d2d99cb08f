//! Sokoban example for the search engine
//!
//! Robots push boxes around a walled room until every box sits on a storage
//! cell. Each puzzle is solved with a plain engine run and then with the
//! anytime controllers.
//!
//! Usage: `cargo run --example sokoban -- [strategy] [cycle_check]`
//! (defaults: `astar default`). Set `RUST_LOG=info` to watch the anytime
//! controllers improve their solutions.

use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use statespace_search::{
    anytime, AnytimeConfig, SearchConfig, SearchEngine, SearchError, SearchState, Solution,
    Transition,
};

fn main() -> Result<(), SearchError> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let strategy = args.next().unwrap_or_else(|| "astar".to_string());
    let cycle_check = args.next().unwrap_or_else(|| "default".to_string());
    let config = SearchConfig::from_names(&strategy, &cycle_check)?
        .with_time_bound(Duration::from_secs(10));

    println!("Sokoban Search Example");
    println!("======================");
    println!();

    for (name, rows) in PUZZLES {
        let puzzle = SokobanState::parse(rows);
        println!("Puzzle: {}", name);
        println!("{}", puzzle);

        // Plain search with the admissible heuristic
        let mut engine = SearchEngine::with_config(config.clone())
            .with_goal(SokobanState::is_solved)
            .with_heuristic(SokobanState::manhattan);
        engine.init_search(puzzle.clone());
        let result = engine.search();
        println!("{} (manhattan):", config.describe());
        report(result.solution.as_ref());
        println!("{}", result.statistics.summary());
        println!();

        // One weighted A* run with the deadlock-aware heuristic
        let result = anytime::weighted_astar(
            puzzle.clone(),
            SokobanState::is_solved,
            SokobanState::alternate,
            5.0,
            Duration::from_secs(2),
        )?;
        println!("weighted A* (weight 5, alternate):");
        report(result.solution.as_ref());
        println!("  {}", result.statistics);

        let anytime_config = AnytimeConfig::default()
            .with_time_bound(Duration::from_secs(2))
            .with_weight(10.0)
            .with_weight_decay(0.5);

        let result = anytime::iterative_astar(
            puzzle.clone(),
            SokobanState::is_solved,
            SokobanState::alternate,
            &anytime_config,
        )?;
        println!("iterative weighted A* (alternate):");
        report(result.solution.as_ref());
        println!(
            "  {} runs, improvements {:?}, {}",
            result.iterations, result.improvements, result.statistics
        );

        let result = anytime::iterative_gbfs(
            puzzle,
            SokobanState::is_solved,
            SokobanState::alternate,
            &anytime_config,
        )?;
        println!("iterative greedy best-first (alternate):");
        report(result.solution.as_ref());
        println!(
            "  {} runs, improvements {:?}, {}",
            result.iterations, result.improvements, result.statistics
        );
        println!();
    }

    Ok(())
}

fn report(solution: Option<&Solution<SokobanState>>) {
    match solution {
        Some(solution) => {
            let moves: Vec<String> = solution
                .actions()
                .map(|(robot, direction)| format!("{}{}", robot, direction))
                .collect();
            println!("  solved with cost {}: {}", solution.cost(), moves.join(" "));
        }
        None => println!("  not solved"),
    }
}

/// Puzzles drawn inside an implicit outer wall
///
/// `#` obstacle, `$` box, `.` storage, `*` box on storage, `a`-`z` robot,
/// `A`-`Z` robot on storage.
const PUZZLES: [(&str, &[&str]); 4] = [
    ("warm-up", &["     ", " $ . ", " a   ", "     "]),
    (
        "two boxes",
        &["      ", " $  . ", "  #   ", " a$ . ", "      "],
    ),
    (
        "two robots",
        &["       ", "a  $  .", "       ", "b $  . ", "       "],
    ),
    (
        "detour",
        &["a     ", "### # ", "  .$  ", "  #   ", "      "],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    fn step(self, (x, y): (i32, i32)) -> (i32, i32) {
        match self {
            Direction::Up => (x, y - 1),
            Direction::Right => (x + 1, y),
            Direction::Down => (x, y + 1),
            Direction::Left => (x - 1, y),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Direction::Up => "U",
            Direction::Right => "R",
            Direction::Down => "D",
            Direction::Left => "L",
        };
        f.write_str(symbol)
    }
}

/// The fixed parts of a puzzle
#[derive(Debug)]
struct Room {
    width: i32,
    height: i32,
    storage: BTreeSet<(i32, i32)>,
    obstacles: BTreeSet<(i32, i32)>,
}

#[derive(Debug, Clone)]
struct SokobanState {
    room: Rc<Room>,
    robots: Vec<(i32, i32)>,
    boxes: BTreeSet<(i32, i32)>,
}

impl SokobanState {
    fn parse(rows: &[&str]) -> Self {
        let mut storage = BTreeSet::new();
        let mut obstacles = BTreeSet::new();
        let mut boxes = BTreeSet::new();
        let mut robots = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.chars().enumerate() {
                let pos = (x as i32, y as i32);
                match cell {
                    '#' => {
                        obstacles.insert(pos);
                    }
                    '$' => {
                        boxes.insert(pos);
                    }
                    '.' => {
                        storage.insert(pos);
                    }
                    '*' => {
                        boxes.insert(pos);
                        storage.insert(pos);
                    }
                    'a'..='z' => robots.push((cell as u8 - b'a', pos)),
                    'A'..='Z' => {
                        robots.push((cell as u8 - b'A', pos));
                        storage.insert(pos);
                    }
                    _ => {}
                }
            }
        }
        robots.sort();

        SokobanState {
            room: Rc::new(Room {
                width: rows.iter().map(|row| row.len()).max().unwrap_or(0) as i32,
                height: rows.len() as i32,
                storage,
                obstacles,
            }),
            robots: robots.into_iter().map(|(_, pos)| pos).collect(),
            boxes,
        }
    }

    fn in_bounds(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && x < self.room.width && y < self.room.height
    }

    fn is_wall(&self, pos: (i32, i32)) -> bool {
        !self.in_bounds(pos) || self.room.obstacles.contains(&pos)
    }

    fn is_solved(&self) -> bool {
        self.boxes.iter().all(|b| self.room.storage.contains(b))
    }

    fn unstored(&self) -> impl Iterator<Item = &(i32, i32)> + '_ {
        self.boxes
            .iter()
            .filter(|b| !self.room.storage.contains(b))
    }

    fn nearest_storage(&self, (bx, by): (i32, i32)) -> i32 {
        self.room
            .storage
            .iter()
            .map(|&(sx, sy)| (bx - sx).abs() + (by - sy).abs())
            .min()
            .unwrap_or(0)
    }

    /// Sum over unstored boxes of the Manhattan distance to the nearest
    /// storage cell, ignoring obstacles. Admissible.
    fn manhattan(&self) -> f64 {
        self.unstored()
            .map(|&b| f64::from(self.nearest_storage(b)))
            .sum()
    }

    /// Manhattan distance plus deadlock detection
    ///
    /// Infinite when an unstored box is stuck in a corner, pinned against an
    /// edge that has no storage, or part of an immovable 2x2 block. Adds a
    /// small term for the closest robot's distance to a box. Not admissible.
    fn alternate(&self) -> f64 {
        if self.is_solved() {
            return 0.0;
        }

        let (w, h) = (self.room.width, self.room.height);
        let storage = &self.room.storage;
        let top = storage.iter().any(|s| s.1 == 0);
        let bottom = storage.iter().any(|s| s.1 == h - 1);
        let left = storage.iter().any(|s| s.0 == 0);
        let right = storage.iter().any(|s| s.0 == w - 1);

        let mut estimate = 0.0;
        for &(x, y) in self.unstored() {
            let vertical = self.is_wall((x, y - 1)) || self.is_wall((x, y + 1));
            let horizontal = self.is_wall((x - 1, y)) || self.is_wall((x + 1, y));
            if vertical && horizontal {
                return f64::INFINITY;
            }

            let against_edge = (y == 0 && !top)
                || (y == h - 1 && !bottom)
                || (x == 0 && !left)
                || (x == w - 1 && !right);
            if against_edge {
                return f64::INFINITY;
            }

            let solid = |pos| self.is_wall(pos) || self.boxes.contains(&pos);
            for (dx, dy) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
                if solid((x + dx, y)) && solid((x, y + dy)) && solid((x + dx, y + dy)) {
                    return f64::INFINITY;
                }
            }

            estimate += f64::from(self.nearest_storage((x, y)));
        }

        let closest_robot = self
            .robots
            .iter()
            .flat_map(move |&(rx, ry)| {
                self.unstored()
                    .map(move |&(bx, by)| (rx - bx).abs() + (ry - by).abs())
            })
            .min();
        if let Some(distance) = closest_robot {
            estimate += f64::from(distance - 1) * 0.3;
        }
        estimate
    }
}

impl SearchState for SokobanState {
    type Action = (usize, Direction);
    type Identity = (Vec<(i32, i32)>, BTreeSet<(i32, i32)>);

    fn successors(&self) -> Vec<Transition<Self>> {
        let mut successors = Vec::new();
        for (index, &robot) in self.robots.iter().enumerate() {
            for direction in Direction::ALL {
                let target = direction.step(robot);
                if self.is_wall(target) || self.robots.contains(&target) {
                    continue;
                }

                let mut boxes = self.boxes.clone();
                if boxes.remove(&target) {
                    let dest = direction.step(target);
                    if self.is_wall(dest) || boxes.contains(&dest) || self.robots.contains(&dest)
                    {
                        continue;
                    }
                    boxes.insert(dest);
                }

                let mut robots = self.robots.clone();
                robots[index] = target;
                successors.push(Transition::new(
                    (index, direction),
                    SokobanState {
                        room: Rc::clone(&self.room),
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

impl fmt::Display for SokobanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "#".repeat(self.room.width as usize + 2);
        writeln!(f, "{}", border)?;
        for y in 0..self.room.height {
            write!(f, "#")?;
            for x in 0..self.room.width {
                let pos = (x, y);
                let stored = self.room.storage.contains(&pos);
                let robot = self.robots.iter().position(|&r| r == pos);
                let symbol = match robot {
                    Some(i) if stored => (b'A' + i as u8) as char,
                    Some(i) => (b'a' + i as u8) as char,
                    None if self.boxes.contains(&pos) && stored => '*',
                    None if self.boxes.contains(&pos) => '$',
                    None if stored => '.',
                    None if self.room.obstacles.contains(&pos) => '#',
                    None => ' ',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f, "#")?;
        }
        write!(f, "{}", border)
    }
}
