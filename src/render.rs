use crate::geometry::CellCoord;
use crate::grid::Grid;
use std::collections::HashSet;

/// Render the grid as text, highest row first so +Z points up.
///
/// `S` start, `G` goal, `*` path, `#` unwalkable, `.` free.
pub fn grid_to_string(
    grid: &Grid,
    path: &[CellCoord],
    start: Option<CellCoord>,
    goal: Option<CellCoord>,
) -> String {
    let on_path: HashSet<CellCoord> = path.iter().copied().collect();
    let mut result = String::with_capacity(((grid.cols() + 1) * grid.rows()) as usize);

    for row in (0..grid.rows()).rev() {
        for col in 0..grid.cols() {
            let coord = CellCoord::new(col, row);
            let symbol = if Some(coord) == start {
                'S'
            } else if Some(coord) == goal {
                'G'
            } else if on_path.contains(&coord) {
                '*'
            } else if !grid.is_walkable(coord) {
                '#'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}
