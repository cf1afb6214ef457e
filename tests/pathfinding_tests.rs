mod common;

use common::{assert_connected, dijkstra, grid_with_obstacle, open_grid};
use navgrid::pathfinding::{distance, path_cost, PathFinder};
use navgrid::render::grid_to_string;
use navgrid::{find_path, CellCoord, Obstacle, WorldPoint};

#[test]
fn test_path_endpoints_on_open_grid() {
    let grid = open_grid(10);
    let start = CellCoord::new(0, 0);
    let goal = CellCoord::new(9, 9);

    let path = find_path(&grid, start, goal).expect("open grid must have a path");

    assert_eq!(path.goal(), Some(goal));
    assert!(!path.cells().contains(&start), "path must exclude the start cell");
    assert_eq!(path.len(), 9);
    assert_eq!(path.cost(), 126);
    assert_connected(&grid, start, path.cells());
}

#[test]
fn test_straight_line_prefers_axis_cells() {
    let grid = open_grid(10);
    let path = find_path(&grid, CellCoord::new(0, 0), CellCoord::new(9, 0)).unwrap();

    let expected: Vec<CellCoord> = (1..=9).map(|c| CellCoord::new(c, 0)).collect();
    assert_eq!(path.cells(), expected.as_slice());
    assert_eq!(path.cost(), 90);
}

#[test]
fn test_open_grid_cost_matches_heuristic() {
    let grid = open_grid(12);
    let pairs = [
        (CellCoord::new(0, 0), CellCoord::new(11, 4)),
        (CellCoord::new(3, 9), CellCoord::new(10, 1)),
        (CellCoord::new(11, 11), CellCoord::new(0, 7)),
        (CellCoord::new(5, 5), CellCoord::new(5, 0)),
    ];

    for (start, goal) in pairs {
        let path = find_path(&grid, start, goal).unwrap();
        assert_eq!(path.cost(), distance(start, goal), "{:?} -> {:?}", start, goal);

        let mut chain = vec![start];
        chain.extend_from_slice(path.cells());
        assert_eq!(path_cost(&chain), path.cost());
    }
}

#[test]
fn test_heuristic_is_admissible_and_search_optimal() {
    // 8x8 unit cells; buffered box [-1.5, 1.5] blocks the central 4x4 block
    let grid = grid_with_obstacle(8, Obstacle::new(WorldPoint::new(0.0, 0.0), 1.0, 1.0));
    assert_eq!(grid.walkable_count(), 64 - 16);

    let walkable: Vec<CellCoord> = grid.cells().filter(|c| c.walkable).map(|c| c.coord).collect();
    let finder = PathFinder::new(&grid);

    for &start in &walkable {
        let exact = dijkstra(&grid, start);
        for &goal in &walkable {
            let truth = exact[grid.index_of(goal).unwrap()]
                .expect("every walkable cell is reachable around a central block");
            assert!(distance(start, goal) <= truth, "{:?} -> {:?}", start, goal);

            let path = finder.find_path(start, goal).unwrap();
            assert_eq!(path.cost(), truth, "{:?} -> {:?}", start, goal);
        }
    }
}

#[test]
fn test_path_goes_around_obstacle() {
    let grid = grid_with_obstacle(10, Obstacle::new(WorldPoint::new(0.0, 0.0), 1.0, 1.0));
    let start = CellCoord::new(0, 5);
    let goal = CellCoord::new(9, 5);

    let path = find_path(&grid, start, goal).unwrap();
    println!("{}", grid_to_string(&grid, path.cells(), Some(start), Some(goal)));

    assert_connected(&grid, start, path.cells());
    assert_eq!(path.cost(), 106);
    assert_eq!(path.goal(), Some(goal));
}

#[test]
fn test_no_path_across_blocking_band() {
    // Obstacle wider than the world splits it into two halves
    let grid = grid_with_obstacle(10, Obstacle::new(WorldPoint::new(0.0, 0.0), 20.0, 1.0));

    let result = find_path(&grid, CellCoord::new(2, 0), CellCoord::new(7, 9));
    assert!(result.is_none());

    // Same side still works
    assert!(find_path(&grid, CellCoord::new(2, 0), CellCoord::new(7, 1)).is_some());
}

#[test]
fn test_no_path_to_enclosed_goal() {
    let grid = grid_with_obstacle(10, Obstacle::new(WorldPoint::new(0.0, 0.0), 2.0, 2.0));
    let goal = CellCoord::new(5, 5);

    assert!(!grid.is_walkable(goal));
    assert!(grid.neighbors(goal).all(|n| !grid.is_walkable(n)));

    let (result, stats) = PathFinder::new(&grid).find_path_with_stats(CellCoord::new(0, 0), goal);
    assert!(result.is_none());
    // Every walkable cell gets expanded before giving up
    assert_eq!(stats.expanded, grid.walkable_count());
}

#[test]
fn test_search_leaves_an_unwalkable_start() {
    // Buffered box [-1.5, 1.5] blocks cols/rows 3..=6; (3,3) is its lower-left corner
    let grid = grid_with_obstacle(10, Obstacle::new(WorldPoint::new(0.0, 0.0), 1.0, 1.0));
    let start = CellCoord::new(3, 3);
    let goal = CellCoord::new(0, 0);
    assert!(!grid.is_walkable(start));

    let path = find_path(&grid, start, goal).expect("start in the buffer still has a way out");

    assert!(!path.cells().contains(&start));
    assert_eq!(path.cells().first(), Some(&CellCoord::new(2, 2)));
    assert_eq!(path.goal(), Some(goal));
    assert_eq!(path.cost(), 42);
    assert_connected(&grid, start, path.cells());
}

#[test]
fn test_enclosed_unwalkable_start_finds_nothing() {
    let grid = grid_with_obstacle(10, Obstacle::new(WorldPoint::new(0.0, 0.0), 2.0, 2.0));
    let start = CellCoord::new(5, 5);
    assert!(grid.neighbors(start).all(|n| !grid.is_walkable(n)));

    assert!(find_path(&grid, start, CellCoord::new(0, 0)).is_none());
}

#[test]
fn test_start_equals_goal_gives_empty_path() {
    let grid = open_grid(5);
    let cell = CellCoord::new(2, 3);

    let path = find_path(&grid, cell, cell).unwrap();
    assert!(path.is_empty());
    assert_eq!(path.cost(), 0);
}

#[test]
fn test_out_of_bounds_coords_find_nothing() {
    let grid = open_grid(5);
    assert!(find_path(&grid, CellCoord::new(-1, 0), CellCoord::new(2, 2)).is_none());
    assert!(find_path(&grid, CellCoord::new(0, 0), CellCoord::new(5, 2)).is_none());
}

#[test]
fn test_repeated_searches_are_identical() {
    let grid = grid_with_obstacle(16, Obstacle::new(WorldPoint::new(1.0, -0.5), 3.0, 2.0));
    let finder = PathFinder::new(&grid);
    let start = CellCoord::new(0, 3);
    let goal = CellCoord::new(15, 12);

    let first = finder.find_path(start, goal);
    // An unrelated query in between must not leak state into the next run
    let _ = finder.find_path(CellCoord::new(15, 0), CellCoord::new(0, 15));
    let second = finder.find_path(start, goal);
    let third = find_path(&grid, start, goal);

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn test_concurrent_searches_share_one_grid() {
    let grid = grid_with_obstacle(20, Obstacle::new(WorldPoint::new(0.0, 0.0), 4.0, 2.0));
    let start = CellCoord::new(0, 0);
    let goal = CellCoord::new(19, 19);
    let expected = find_path(&grid, start, goal);
    let grid = &grid;

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(move |_| s.spawn(move || find_path(grid, start, goal)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_world_query_returns_cell_centers() {
    let grid = grid_with_obstacle(10, Obstacle::new(WorldPoint::new(0.0, 0.0), 1.0, 1.0));
    let finder = PathFinder::new(&grid);

    let waypoints = finder
        .find_path_world(WorldPoint::new(-4.6, 0.6), WorldPoint::new(4.6, 0.4))
        .unwrap();

    assert_eq!(waypoints.len(), 9);
    assert_eq!(waypoints.last(), Some(&WorldPoint::new(4.5, 0.5)));
    for p in &waypoints {
        assert!(grid.cell_from_world_point(*p).walkable);
    }
}
