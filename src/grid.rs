use crate::error::{NavError, Result};
use crate::geometry::{CellCoord, Obstacle, WorldPoint};
use log::debug;

/// Clearance added around the obstacle footprint on every side, in world units
pub const OBSTACLE_BUFFER: f32 = 1.0;

/// Largest grid `GridBuilder` will allocate. Keeps every row-major id inside `i32`.
pub const MAX_CELLS: usize = 1 << 26;

/// A single lattice element. Immutable once the grid is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub coord: CellCoord,
    /// Center of the cell in world space
    pub world_position: WorldPoint,
    pub walkable: bool,
}

/// Rasterizes a world rectangle centered at the origin into cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBuilder {
    world_width: f32,
    world_depth: f32,
    cell_radius: f32,
}

impl GridBuilder {
    pub fn new(world_size: (f32, f32), cell_radius: f32) -> Self {
        GridBuilder {
            world_width: world_size.0,
            world_depth: world_size.1,
            cell_radius,
        }
    }

    /// Build a grid with every cell inside the buffered obstacle box marked unwalkable
    pub fn build(&self, obstacle: &Obstacle) -> Result<Grid> {
        self.validate(obstacle)?;

        let diameter = self.cell_radius * 2.0;
        let cols = self.cell_count(self.world_width, diameter)?;
        let rows = self.cell_count(self.world_depth, diameter)?;
        let total = (cols as usize)
            .checked_mul(rows as usize)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(|| {
                NavError::InvalidArgument(format!(
                    "{}x{} cells exceeds the limit of {}",
                    cols, rows, MAX_CELLS
                ))
            })?;

        let (min, max) = obstacle.inflated_bounds(OBSTACLE_BUFFER);
        let left = -self.world_width / 2.0;
        let bottom = -self.world_depth / 2.0;

        let mut cells = Vec::with_capacity(total);
        for row in 0..rows {
            for col in 0..cols {
                let world_position = WorldPoint::new(
                    left + diameter * col as f32 + self.cell_radius,
                    bottom + diameter * row as f32 + self.cell_radius,
                );
                let inside = world_position.x >= min.x
                    && world_position.x <= max.x
                    && world_position.z >= min.z
                    && world_position.z <= max.z;

                cells.push(Cell {
                    coord: CellCoord::new(col, row),
                    world_position,
                    walkable: !inside,
                });
            }
        }

        let grid = Grid {
            cols,
            rows,
            cells,
            world_width: self.world_width,
            world_depth: self.world_depth,
            cell_radius: self.cell_radius,
            obstacle: *obstacle,
        };

        debug!(
            "[Grid] built {}x{} cells, {} walkable, obstacle at ({:.2},{:.2}) size {:.2}x{:.2}",
            cols,
            rows,
            grid.walkable_count(),
            obstacle.x,
            obstacle.z,
            obstacle.width,
            obstacle.depth
        );

        Ok(grid)
    }

    /// Cells along one axis, rejecting extents that round to zero or overflow `i32`
    fn cell_count(&self, extent: f32, diameter: f32) -> Result<i32> {
        let count = (extent / diameter).round();
        if !(count >= 1.0 && count < i32::MAX as f32) {
            return Err(NavError::InvalidArgument(format!(
                "world {}x{} with cells of diameter {} gives {} cells along one axis",
                self.world_width, self.world_depth, diameter, count
            )));
        }
        Ok(count as i32)
    }

    fn validate(&self, obstacle: &Obstacle) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.world_width) || !positive(self.world_depth) {
            return Err(NavError::InvalidArgument(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_depth
            )));
        }
        if !positive(self.cell_radius) {
            return Err(NavError::InvalidArgument(format!(
                "cell radius must be positive, got {}",
                self.cell_radius
            )));
        }
        if !(obstacle.width >= 0.0 && obstacle.depth >= 0.0) {
            return Err(NavError::InvalidArgument(format!(
                "obstacle footprint must be non-negative, got {}x{}",
                obstacle.width, obstacle.depth
            )));
        }
        Ok(())
    }
}

/// Convenience wrapper around [`GridBuilder`]
pub fn build_grid(
    world_size: (f32, f32),
    cell_radius: f32,
    obstacle_center: WorldPoint,
    obstacle_footprint: (f32, f32),
) -> Result<Grid> {
    let obstacle = Obstacle::new(obstacle_center, obstacle_footprint.0, obstacle_footprint.1);
    GridBuilder::new(world_size, cell_radius).build(&obstacle)
}

/// Walkability lattice over a world rectangle centered at the origin.
///
/// Cells are stored row-major. The grid is never patched in place: when the
/// obstacle changes, call [`Grid::rebuild`] and replace the old grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: i32,
    rows: i32,
    cells: Vec<Cell>,
    world_width: f32,
    world_depth: f32,
    cell_radius: f32,
    obstacle: Obstacle,
}

impl Grid {
    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn world_size(&self) -> (f32, f32) {
        (self.world_width, self.world_depth)
    }

    pub fn cell_radius(&self) -> f32 {
        self.cell_radius
    }

    pub fn cell_diameter(&self) -> f32 {
        self.cell_radius * 2.0
    }

    /// The obstacle this grid was built around
    pub fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }

    pub fn in_bounds(&self, coord: CellCoord) -> bool {
        coord.col >= 0 && coord.col < self.cols && coord.row >= 0 && coord.row < self.rows
    }

    /// Row-major cell id, `None` when out of bounds
    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some((coord.col + coord.row * self.cols) as usize)
    }

    /// Convert a cell id back to coordinates, `None` when out of range
    pub fn coord_of(&self, index: usize) -> Option<CellCoord> {
        self.cells.get(index).map(|c| c.coord)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index_of(coord).map(|id| &self.cells[id])
    }

    /// Cell by id; callers hold an id obtained from `index_of`
    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Out of bounds is considered unwalkable
    pub fn is_walkable(&self, coord: CellCoord) -> bool {
        self.cell(coord).map(|c| c.walkable).unwrap_or(false)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }

    /// Up to 8 in-bounds neighbors of `coord`, column offset outer, row offset inner
    pub fn neighbors(&self, coord: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        (-1..=1)
            .flat_map(move |dc| (-1..=1).map(move |dr| (dc, dr)))
            .filter(|&(dc, dr)| dc != 0 || dr != 0)
            .map(move |(dc, dr)| CellCoord::new(coord.col + dc, coord.row + dr))
            .filter(move |&c| self.in_bounds(c))
    }

    /// Nearest cell to an arbitrary world point.
    ///
    /// Points outside the world are clamped onto the edge cells rather than
    /// rejected, so a query from off the map still lands on the grid.
    pub fn cell_from_world_point(&self, point: WorldPoint) -> &Cell {
        let percent_x = ((point.x + self.world_width / 2.0) / self.world_width).clamp(0.0, 1.0);
        let percent_z = ((point.z + self.world_depth / 2.0) / self.world_depth).clamp(0.0, 1.0);

        let col = ((self.cols - 1) as f32 * percent_x).round() as i32;
        let row = ((self.rows - 1) as f32 * percent_z).round() as i32;

        // col/row are within bounds after the clamp above
        &self.cells[(col + row * self.cols) as usize]
    }

    /// Build a fresh grid with the same world size and cell radius around a new obstacle.
    /// `self` is left untouched.
    pub fn rebuild(&self, obstacle: &Obstacle) -> Result<Grid> {
        GridBuilder::new((self.world_width, self.world_depth), self.cell_radius).build(obstacle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_skip_center_and_out_of_bounds() {
        let grid = GridBuilder::new((4.0, 4.0), 0.5)
            .build(&Obstacle::new(WorldPoint::new(100.0, 100.0), 0.0, 0.0))
            .unwrap();

        let corner: Vec<_> = grid.neighbors(CellCoord::new(0, 0)).collect();
        assert_eq!(
            corner,
            vec![CellCoord::new(0, 1), CellCoord::new(1, 0), CellCoord::new(1, 1)]
        );

        let inner: Vec<_> = grid.neighbors(CellCoord::new(1, 1)).collect();
        assert_eq!(inner.len(), 8);
        assert!(!inner.contains(&CellCoord::new(1, 1)));
    }

    #[test]
    fn index_round_trips_through_coord() {
        let grid = GridBuilder::new((3.0, 2.0), 0.5)
            .build(&Obstacle::default())
            .unwrap();
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 2);
        for id in 0..grid.len() {
            assert_eq!(grid.coord_of(id).and_then(|c| grid.index_of(c)), Some(id));
            assert_eq!(grid.cell_at(id).coord, CellCoord::new(id as i32 % 3, id as i32 / 3));
        }
        assert_eq!(grid.index_of(CellCoord::new(3, 0)), None);
        assert_eq!(grid.coord_of(grid.len()), None);
    }
}
