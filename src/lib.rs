pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod navigator;
pub mod pathfinding;
pub mod render;
pub mod scenario;

pub use error::{NavError, Result};
pub use geometry::{CellCoord, Obstacle, WorldPoint};
pub use grid::{build_grid, Cell, Grid, GridBuilder, OBSTACLE_BUFFER};
pub use navigator::{GridSettings, Navigator};
pub use pathfinding::{find_path, Path, PathFinder};
pub use scenario::Scenario;
