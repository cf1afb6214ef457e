use crate::error::Result;
use crate::geometry::{CellCoord, Obstacle, WorldPoint};
use crate::grid::Grid;
use crate::navigator::GridSettings;
use crate::pathfinding::{Path, PathFinder, SearchStats};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path as FsPath;

/// A self-contained path query: world, obstacle, endpoints and optionally the expected answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub world: GridSettings,
    pub obstacle: Obstacle,
    pub start: WorldPoint,
    pub goal: WorldPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Expectation>,
}

/// Recorded outcome a scenario should reproduce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectation {
    pub reachable: bool,
    /// Total movement cost in 10/14 units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    /// Number of cells in the path (start excluded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

/// Result of running a scenario
#[derive(Debug, Clone)]
pub struct Outcome {
    pub grid: Grid,
    pub start: CellCoord,
    pub goal: CellCoord,
    pub path: Option<Path>,
    pub stats: SearchStats,
}

impl Outcome {
    pub fn expectation(&self) -> Expectation {
        Expectation {
            reachable: self.path.is_some(),
            cost: self.path.as_ref().map(|p| p.cost()),
            steps: self.path.as_ref().map(|p| p.len()),
        }
    }
}

impl Scenario {
    pub fn build_grid(&self) -> Result<Grid> {
        self.world.builder().build(&self.obstacle)
    }

    /// Build the grid and search it
    pub fn run(&self) -> Result<Outcome> {
        let grid = self.build_grid()?;
        let start = grid.cell_from_world_point(self.start).coord;
        let goal = grid.cell_from_world_point(self.goal).coord;
        let (path, stats) = PathFinder::new(&grid).find_path_with_stats(start, goal);

        Ok(Outcome {
            grid,
            start,
            goal,
            path,
            stats,
        })
    }

    /// Differences between the recorded expectation and `outcome`; empty when they agree
    /// or when nothing was recorded
    pub fn mismatches(&self, outcome: &Outcome) -> Vec<String> {
        let Some(expected) = &self.expected else {
            return Vec::new();
        };
        let actual = outcome.expectation();
        let mut problems = Vec::new();

        if expected.reachable != actual.reachable {
            problems.push(format!(
                "reachable: expected {}, got {}",
                expected.reachable, actual.reachable
            ));
        }
        if expected.cost.is_some() && expected.cost != actual.cost {
            problems.push(format!("cost: expected {:?}, got {:?}", expected.cost, actual.cost));
        }
        if expected.steps.is_some() && expected.steps != actual.steps {
            problems.push(format!("steps: expected {:?}, got {:?}", expected.steps, actual.steps));
        }
        problems
    }

    /// Save to file
    pub fn save_to_file(&self, path: impl AsRef<FsPath>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: impl AsRef<FsPath>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&json)?;
        Ok(scenario)
    }
}
