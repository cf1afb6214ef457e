use serde::{Deserialize, Serialize};

/// A point on the ground plane (X/Z, height ignored)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub z: f32,
}

impl WorldPoint {
    pub fn new(x: f32, z: f32) -> Self {
        WorldPoint { x, z }
    }
}

/// Integer lattice coordinates of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub col: i32,
    pub row: i32,
}

impl CellCoord {
    pub fn new(col: i32, row: i32) -> Self {
        CellCoord { col, row }
    }

    /// True when `other` differs in both coordinates by exactly one
    pub fn is_diagonal_to(&self, other: &CellCoord) -> bool {
        (self.col - other.col).abs() == 1 && (self.row - other.row).abs() == 1
    }
}

/// Axis-aligned rectangular obstacle on the ground plane
///
/// `x`/`z` is the center, `width` spans X and `depth` spans Z.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
}

impl Obstacle {
    pub fn new(center: WorldPoint, width: f32, depth: f32) -> Self {
        Obstacle {
            x: center.x,
            z: center.z,
            width,
            depth,
        }
    }

    /// Returns `(min, max)` corners of the footprint grown by `margin` on every side
    pub fn inflated_bounds(&self, margin: f32) -> (WorldPoint, WorldPoint) {
        let min = WorldPoint::new(
            self.x - self.width / 2.0 - margin,
            self.z - self.depth / 2.0 - margin,
        );
        let max = WorldPoint::new(
            self.x + self.width / 2.0 + margin,
            self.z + self.depth / 2.0 + margin,
        );
        (min, max)
    }

    /// Same obstacle moved by `(dx, dz)`
    pub fn translated(&self, dx: f32, dz: f32) -> Self {
        Obstacle {
            x: self.x + dx,
            z: self.z + dz,
            ..*self
        }
    }

    /// Same obstacle with its footprint grown (or shrunk) by `delta`, never below zero
    pub fn resized(&self, delta: f32) -> Self {
        Obstacle {
            width: (self.width + delta).max(0.0),
            depth: (self.depth + delta).max(0.0),
            ..*self
        }
    }
}
