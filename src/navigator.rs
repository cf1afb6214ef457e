use crate::error::Result;
use crate::geometry::{Obstacle, WorldPoint};
use crate::grid::{Grid, GridBuilder};
use crate::pathfinding::PathFinder;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// World extent and resolution shared by every grid a [`Navigator`] builds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    pub width: f32,
    pub depth: f32,
    pub cell_radius: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            width: 20.0,
            depth: 20.0,
            cell_radius: 0.125,
        }
    }
}

impl GridSettings {
    pub fn builder(&self) -> GridBuilder {
        GridBuilder::new((self.width, self.depth), self.cell_radius)
    }
}

/// Owns the current grid on behalf of a host and answers world-space path queries.
///
/// The host signals obstacle changes through [`Navigator::rebuild`]; the grid is
/// replaced as a whole and never observed half-built.
#[derive(Debug, Clone)]
pub struct Navigator {
    settings: GridSettings,
    grid: Grid,
    /// Incremented on every successful rebuild
    revision: u64,
}

impl Navigator {
    pub fn new(settings: GridSettings, obstacle: Obstacle) -> Result<Self> {
        let grid = settings.builder().build(&obstacle)?;
        info!(
            "[Navigator] initial grid {}x{} ({} walkable)",
            grid.cols(),
            grid.rows(),
            grid.walkable_count()
        );
        Ok(Navigator {
            settings,
            grid,
            revision: 0,
        })
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the grid with one built around `obstacle`.
    ///
    /// On error the previous grid stays in place.
    pub fn rebuild(&mut self, obstacle: Obstacle) -> Result<()> {
        match self.grid.rebuild(&obstacle) {
            Ok(grid) => {
                self.grid = grid;
                self.revision += 1;
                info!(
                    "[Navigator] rebuilt grid (rev {}) for obstacle at ({:.2},{:.2}) size {:.2}x{:.2}",
                    self.revision, obstacle.x, obstacle.z, obstacle.width, obstacle.depth
                );
                Ok(())
            }
            Err(e) => {
                warn!("[Navigator] rebuild rejected, keeping rev {}: {}", self.revision, e);
                Err(e)
            }
        }
    }

    /// Waypoints from `start` to `goal`, or `None` when the goal is unreachable.
    ///
    /// Points outside the world snap to the nearest edge cell.
    pub fn find_path(&self, start: WorldPoint, goal: WorldPoint) -> Option<Vec<WorldPoint>> {
        PathFinder::new(&self.grid).find_path_world(start, goal)
    }
}
