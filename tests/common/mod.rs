#![allow(dead_code)]

use navgrid::{CellCoord, Grid, GridBuilder, Obstacle, WorldPoint};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// An `n`x`n` grid of unit cells whose obstacle lies far outside the world
pub fn open_grid(n: i32) -> Grid {
    let size = n as f32;
    GridBuilder::new((size, size), 0.5)
        .build(&Obstacle::new(WorldPoint::new(1000.0, 1000.0), 0.0, 0.0))
        .unwrap()
}

/// An `n`x`n` grid of unit cells around `obstacle`
pub fn grid_with_obstacle(n: i32, obstacle: Obstacle) -> Grid {
    let size = n as f32;
    GridBuilder::new((size, size), 0.5).build(&obstacle).unwrap()
}

/// Exact cheapest cost from `source` to every cell, by plain Dijkstra over
/// walkable cells with the 10/14 step costs
pub fn dijkstra(grid: &Grid, source: CellCoord) -> Vec<Option<u32>> {
    let mut best: Vec<Option<u32>> = vec![None; grid.len()];
    let mut heap = BinaryHeap::new();

    let source_id = grid.index_of(source).unwrap();
    best[source_id] = Some(0);
    heap.push(Reverse((0u32, source_id)));

    while let Some(Reverse((cost, id))) = heap.pop() {
        if best[id].map_or(false, |b| cost > b) {
            continue;
        }
        let here = grid.coord_of(id).unwrap();
        for next in grid.neighbors(here) {
            if !grid.is_walkable(next) {
                continue;
            }
            let step = if here.is_diagonal_to(&next) { 14 } else { 10 };
            let next_id = grid.index_of(next).unwrap();
            let candidate = cost + step;
            if best[next_id].map_or(true, |b| candidate < b) {
                best[next_id] = Some(candidate);
                heap.push(Reverse((candidate, next_id)));
            }
        }
    }

    best
}

/// Panics unless `path` is a chain of adjacent walkable cells leading away from `start`
pub fn assert_connected(grid: &Grid, start: CellCoord, path: &[CellCoord]) {
    let mut prev = start;
    for &cell in path {
        assert!(grid.is_walkable(cell), "path enters unwalkable cell {:?}", cell);
        let dc = (cell.col - prev.col).abs();
        let dr = (cell.row - prev.row).abs();
        assert!(
            dc <= 1 && dr <= 1 && (dc, dr) != (0, 0),
            "path jumps from {:?} to {:?}",
            prev,
            cell
        );
        prev = cell;
    }
}
