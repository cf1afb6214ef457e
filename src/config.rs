use crate::error::Result;
use crate::geometry::{Obstacle, WorldPoint};
use crate::navigator::GridSettings;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub obstacle: ObstacleConfig,
    #[serde(default = "default_agent")]
    pub agent: PointConfig,
    #[serde(default = "default_target")]
    pub target: PointConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct WorldConfig {
    #[serde(default = "default_world_width")]
    pub width: f32,
    #[serde(default = "default_world_depth")]
    pub depth: f32,
    #[serde(default = "default_cell_radius")]
    pub cell_radius: f32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ObstacleConfig {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default = "default_obstacle_size")]
    pub width: f32,
    #[serde(default = "default_obstacle_size")]
    pub depth: f32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct PointConfig {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub z: f32,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct VisualConfig {
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f32,
    #[serde(default = "default_bg")]
    pub background_r: u8,
    #[serde(default = "default_bg")]
    pub background_g: u8,
    #[serde(default = "default_bg")]
    pub background_b: u8,
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
}

// Default values
fn default_world_width() -> f32 { 20.0 }
fn default_world_depth() -> f32 { 20.0 }
fn default_cell_radius() -> f32 { 0.125 }
fn default_obstacle_size() -> f32 { 2.0 }
fn default_agent() -> PointConfig { PointConfig { x: -8.0, z: -8.0 } }
fn default_target() -> PointConfig { PointConfig { x: 8.0, z: 8.0 } }
fn default_pixels_per_unit() -> f32 { 36.0 }
fn default_bg() -> u8 { 30 }
fn default_show_grid() -> bool { false }

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_width(),
            depth: default_world_depth(),
            cell_radius: default_cell_radius(),
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            width: default_obstacle_size(),
            depth: default_obstacle_size(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: default_pixels_per_unit(),
            background_r: default_bg(),
            background_g: default_bg(),
            background_b: default_bg(),
            show_grid: default_show_grid(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            obstacle: ObstacleConfig::default(),
            agent: default_agent(),
            target: default_target(),
            visual: VisualConfig::default(),
        }
    }
}

impl PointConfig {
    pub fn to_point(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.z)
    }
}

impl Config {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from `path`
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from config.toml, or use defaults if it is missing or invalid
    pub fn load() -> Self {
        if !Path::new(DEFAULT_CONFIG_PATH).exists() {
            info!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
            return Config::default();
        }
        match Self::load_from(DEFAULT_CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded configuration from {}", DEFAULT_CONFIG_PATH);
                config
            }
            Err(e) => {
                warn!("Failed to load {}: {}; using default configuration", DEFAULT_CONFIG_PATH, e);
                Config::default()
            }
        }
    }

    pub fn grid_settings(&self) -> GridSettings {
        GridSettings {
            width: self.world.width,
            depth: self.world.depth,
            cell_radius: self.world.cell_radius,
        }
    }

    pub fn obstacle(&self) -> Obstacle {
        Obstacle {
            x: self.obstacle.x,
            z: self.obstacle.z,
            width: self.obstacle.width,
            depth: self.obstacle.depth,
        }
    }
}
