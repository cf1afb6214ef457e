use crate::geometry::{CellCoord, WorldPoint};
use crate::grid::Grid;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Cost of a step to an orthogonal neighbor
pub const STRAIGHT_COST: u32 = 10;
/// Cost of a step to a diagonal neighbor (10 * sqrt(2), rounded down)
pub const DIAGONAL_COST: u32 = 14;

/// Octile distance between two cells in the same integer units as movement cost
pub fn distance(a: CellCoord, b: CellCoord) -> u32 {
    let dx = (a.col - b.col).unsigned_abs();
    let dz = (a.row - b.row).unsigned_abs();

    if dx > dz {
        DIAGONAL_COST * dz + STRAIGHT_COST * (dx - dz)
    } else {
        DIAGONAL_COST * dx + STRAIGHT_COST * (dz - dx)
    }
}

/// Cost of a single step between two adjacent cells
fn step_cost(from: CellCoord, to: CellCoord) -> u32 {
    if from.is_diagonal_to(&to) {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}

/// Sum of step costs along a chain of adjacent cells
pub fn path_cost(cells: &[CellCoord]) -> u32 {
    cells.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}

/// A found path: cells after the start up to and including the goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<CellCoord>,
    cost: u32,
}

impl Path {
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Total movement cost from the start cell to the goal
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Empty only when start and goal are the same cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn goal(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Cell centers in traversal order
    pub fn waypoints(&self, grid: &Grid) -> Vec<WorldPoint> {
        self.cells
            .iter()
            .filter_map(|&c| grid.cell(c).map(|cell| cell.world_position))
            .collect()
    }
}

/// Counters from one search run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells moved to the closed set
    pub expanded: usize,
    /// Cells that entered the open set at least once
    pub discovered: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    Open,
    Closed,
}

/// Per-call scratch record for one cell, indexed by cell id
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    g_cost: u32,
    h_cost: u32,
    parent: Option<usize>,
    /// Order in which the cell first entered the open set
    order: u32,
    visit: Visit,
}

impl SearchNode {
    const UNSEEN: SearchNode = SearchNode {
        g_cost: u32::MAX,
        h_cost: 0,
        parent: None,
        order: 0,
        visit: Visit::Unseen,
    };
}

/// Heap entry for the open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f_cost: u32,
    h_cost: u32,
    g_cost: u32,
    order: u32,
    index: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.h_cost.cmp(&self.h_cost))
            // Remaining ties go to the cell discovered first
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search over a [`Grid`] with 8-directional movement.
///
/// All search state is allocated per call, so one grid can serve any number
/// of queries, including concurrent ones.
pub struct PathFinder<'a> {
    grid: &'a Grid,
}

impl<'a> PathFinder<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        PathFinder { grid }
    }

    /// Find the cheapest path from `start` to `goal`.
    ///
    /// Returns `None` when the goal cannot be reached. The returned path excludes
    /// the start cell and ends with the goal cell.
    pub fn find_path(&self, start: CellCoord, goal: CellCoord) -> Option<Path> {
        self.find_path_with_stats(start, goal).0
    }

    pub fn find_path_with_stats(
        &self,
        start: CellCoord,
        goal: CellCoord,
    ) -> (Option<Path>, SearchStats) {
        let grid = self.grid;
        let mut stats = SearchStats::default();

        let (Some(start_id), Some(goal_id)) = (grid.index_of(start), grid.index_of(goal)) else {
            debug!(
                "[AStar] start ({},{}) or goal ({},{}) outside {}x{} grid",
                start.col,
                start.row,
                goal.col,
                goal.row,
                grid.cols(),
                grid.rows()
            );
            return (None, stats);
        };

        trace!(
            "[AStar] find_path: start=({},{}) goal=({},{})",
            start.col,
            start.row,
            goal.col,
            goal.row
        );

        let mut nodes = vec![SearchNode::UNSEEN; grid.len()];
        let mut open_set = BinaryHeap::new();
        let mut next_order: u32 = 0;

        let h_start = distance(start, goal);
        nodes[start_id] = SearchNode {
            g_cost: 0,
            h_cost: h_start,
            parent: None,
            order: next_order,
            visit: Visit::Open,
        };
        next_order += 1;
        stats.discovered += 1;
        open_set.push(OpenEntry {
            f_cost: h_start,
            h_cost: h_start,
            g_cost: 0,
            order: 0,
            index: start_id,
        });

        while let Some(entry) = open_set.pop() {
            let node = nodes[entry.index];
            // Superseded by a cheaper entry for the same cell
            if node.visit == Visit::Closed || entry.g_cost != node.g_cost {
                continue;
            }

            nodes[entry.index].visit = Visit::Closed;
            stats.expanded += 1;

            if entry.index == goal_id {
                let path = retrace(grid, &nodes, start_id, goal_id);
                debug!(
                    "[AStar] found path: {} steps, cost {}, expanded {} of {} discovered",
                    path.len(),
                    path.cost(),
                    stats.expanded,
                    stats.discovered
                );
                return (Some(path), stats);
            }

            let current = grid.cell_at(entry.index).coord;
            trace!(
                "[AStar] expanding ({},{}) g={} h={}",
                current.col,
                current.row,
                node.g_cost,
                node.h_cost
            );

            for neighbor in grid.neighbors(current) {
                let Some(neighbor_id) = grid.index_of(neighbor) else {
                    continue;
                };
                if !grid.cell_at(neighbor_id).walkable {
                    continue;
                }

                let known = nodes[neighbor_id];
                if known.visit == Visit::Closed {
                    continue;
                }

                let tentative_g = node.g_cost + step_cost(current, neighbor);
                if tentative_g < known.g_cost || known.visit != Visit::Open {
                    let h_cost = distance(neighbor, goal);
                    let order = if known.visit == Visit::Unseen {
                        stats.discovered += 1;
                        next_order += 1;
                        next_order - 1
                    } else {
                        known.order
                    };

                    nodes[neighbor_id] = SearchNode {
                        g_cost: tentative_g,
                        h_cost,
                        parent: Some(entry.index),
                        order,
                        visit: Visit::Open,
                    };
                    open_set.push(OpenEntry {
                        f_cost: tentative_g + h_cost,
                        h_cost,
                        g_cost: tentative_g,
                        order,
                        index: neighbor_id,
                    });
                }
            }
        }

        debug!(
            "[AStar] no path from ({},{}) to ({},{}) after expanding {} cells",
            start.col, start.row, goal.col, goal.row, stats.expanded
        );
        (None, stats)
    }

    /// Find a path between two world points, returning cell-center waypoints.
    ///
    /// Both points are snapped to their nearest cell (clamped onto the grid).
    pub fn find_path_world(&self, start: WorldPoint, goal: WorldPoint) -> Option<Vec<WorldPoint>> {
        let start_cell = self.grid.cell_from_world_point(start).coord;
        let goal_cell = self.grid.cell_from_world_point(goal).coord;
        self.find_path(start_cell, goal_cell)
            .map(|path| path.waypoints(self.grid))
    }
}

/// Follow parent links from the goal back to the start, then reverse
fn retrace(grid: &Grid, nodes: &[SearchNode], start_id: usize, goal_id: usize) -> Path {
    let mut cells = Vec::new();
    let mut current = goal_id;

    while current != start_id {
        cells.push(grid.cell_at(current).coord);
        match nodes[current].parent {
            Some(parent) => current = parent,
            None => break,
        }
    }
    cells.reverse();

    Path {
        cells,
        cost: nodes[goal_id].g_cost,
    }
}

/// Find the cheapest path from `start` to `goal` on `grid`
pub fn find_path(grid: &Grid, start: CellCoord, goal: CellCoord) -> Option<Path> {
    PathFinder::new(grid).find_path(start, goal)
}

/// Format a search result for display
pub fn format_path(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return "No path".to_string();
    };
    if path.is_empty() {
        return "Already at goal".to_string();
    }

    path.cells
        .iter()
        .map(|c| format!("({},{})", c.col, c.row))
        .collect::<Vec<_>>()
        .join(" -> ")
}
