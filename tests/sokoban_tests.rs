mod common;

use common::{Direction, Sokoban};
use statespace_search::{CycleCheck, SearchEngine, SearchResult, Strategy, Termination};

fn solve(puzzle: &Sokoban, strategy: Strategy, cycle_check: CycleCheck) -> SearchResult<Sokoban> {
    let mut engine = SearchEngine::new(strategy, cycle_check)
        .with_goal(Sokoban::is_solved)
        .with_heuristic(Sokoban::manhattan);
    engine.init_search(puzzle.clone());
    engine.search()
}

#[test]
fn test_single_push_to_storage() {
    // Robot, box and storage side by side on a 3x1 strip
    let puzzle = Sokoban::new(3, 1, &[(0, 0)], &[(1, 0)], &[(2, 0)], &[]);
    assert_eq!(puzzle.manhattan(), 1.0);

    for strategy in [Strategy::UniformCost, Strategy::AStar] {
        let result = solve(&puzzle, strategy, CycleCheck::Default);
        let solution = result.solution.expect("one push solves it");

        assert_eq!(solution.cost(), 1.0, "{strategy}");
        assert_eq!(
            solution.actions().copied().collect::<Vec<_>>(),
            vec![(0, Direction::Right)]
        );
        assert!(solution.goal().is_solved());
        assert_eq!(solution.goal().manhattan(), 0.0);
    }
}

#[test]
fn test_box_wedged_in_corner_exhausts_frontier() {
    let puzzle = Sokoban::new(3, 3, &[(1, 1)], &[(0, 0)], &[(2, 2)], &[]);

    for strategy in Strategy::ALL {
        let result = solve(&puzzle, strategy, CycleCheck::Full);

        assert_eq!(result.termination, Termination::FrontierExhausted, "{strategy}");
        assert!(result.solution.is_none());
        // The robot can reach every other cell, but the box never moves
        assert!(result.statistics.expanded >= 8, "{strategy}");
        if matches!(
            strategy,
            Strategy::BreadthFirst | Strategy::UniformCost | Strategy::AStar
        ) {
            assert_eq!(result.statistics.expanded, 8, "{strategy}");
        }
        assert!(result.statistics.pruned_cycles > 0);
    }
}

#[test]
fn test_optimal_strategies_agree_on_open_board() {
    // The robot walks round to the box's left side, then pushes twice
    let puzzle = Sokoban::new(5, 5, &[(0, 0)], &[(2, 2)], &[(4, 2)], &[]);

    let ucs = solve(&puzzle, Strategy::UniformCost, CycleCheck::Full);
    let astar = solve(&puzzle, Strategy::AStar, CycleCheck::Full);
    let bfs = solve(&puzzle, Strategy::BreadthFirst, CycleCheck::Full);

    assert_eq!(ucs.cost(), Some(5.0));
    assert_eq!(astar.cost(), Some(5.0));
    assert_eq!(bfs.cost(), Some(5.0));
    assert!(astar.statistics.expanded <= ucs.statistics.expanded);
}

#[test]
fn test_obstacles_force_a_detour() {
    // The box can only be pushed from its right, so the robot has to walk
    // round the wall first
    //
    //   R . . . .
    //   # # # . .
    //   S . B . .
    let puzzle = Sokoban::new(
        5,
        3,
        &[(0, 0)],
        &[(2, 2)],
        &[(0, 2)],
        &[(0, 1), (1, 1), (2, 1)],
    );

    let result = solve(&puzzle, Strategy::AStar, CycleCheck::Full);
    let solution = result.solution.expect("reachable by going round the wall");

    assert_eq!(solution.cost(), 7.0);
    assert!(solution.goal().is_solved());
    for state in solution.states() {
        assert!(state
            .robots
            .iter()
            .all(|cell| !puzzle.board.obstacles.contains(cell)));
    }

    let dfs = solve(&puzzle, Strategy::DepthFirst, CycleCheck::Default);
    assert!(dfs.is_goal_reached());
    assert!(dfs.cost().unwrap() >= 7.0);
}

#[test]
fn test_two_robots_share_the_board() {
    let puzzle = Sokoban::new(
        4,
        2,
        &[(0, 0), (0, 1)],
        &[(1, 1)],
        &[(3, 1)],
        &[],
    );

    let result = solve(&puzzle, Strategy::AStar, CycleCheck::Full);
    let solution = result.solution.unwrap();

    assert_eq!(solution.cost(), 2.0);
    assert!(solution.actions().all(|(robot, _)| *robot == 1));
}
