use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::action::Direction;

/// Largest grid side accepted; keeps coordinates in `i32` and the board
/// drawable in a terminal
pub const MAX_GRID_SIDE: usize = 1024;

/// Reasons a configuration cannot be played
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid needs room for the snake and its food, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    #[error("grid sides are limited to {max} cells, got {width}x{height}")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("start cell ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("food placement needs at least one random attempt")]
    ZeroFoodAttempts,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Column of the single starting cell
    pub start_x: i32,
    /// Row of the single starting cell
    pub start_y: i32,
    /// Direction the snake heads in after a reset
    pub initial_direction: Direction,
    /// Points awarded per food eaten
    pub food_score: u32,
    /// Milliseconds between two ticks
    pub tick_interval_ms: u64,
    /// Random cells tried before falling back to a scan of the free cells
    pub max_food_attempts: u32,
    /// Ticks the game-over notice stays up before the automatic reset
    pub game_over_ticks: u32,
    /// Fixed seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 18,
            start_x: 10,
            start_y: 10,
            initial_direction: Direction::Right,
            food_score: 10,
            tick_interval_ms: 200,
            max_food_attempts: 64,
            game_over_ticks: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self::default().with_grid(width, height)
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Resize the grid, moving the start cell to the center when it would
    /// no longer fit.
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        if !self.start_in_grid() {
            self.start_x = (width / 2) as i32;
            self.start_y = (height / 2) as i32;
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check that a game can be played with these settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_SIDE,
            });
        }
        let cells = self.grid_width.checked_mul(self.grid_height).unwrap_or(usize::MAX);
        if cells < 2 {
            return Err(ConfigError::GridTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if !self.start_in_grid() {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start_x,
                y: self.start_y,
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.max_food_attempts == 0 {
            return Err(ConfigError::ZeroFoodAttempts);
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults, so a file may override
    /// only what it cares about. The result is not validated; callers merge
    /// their own overrides first and call [`GameConfig::validate`] after.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&json).context("Failed to deserialize config")
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {:?}", parent))?;
            }
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }

    fn start_in_grid(&self) -> bool {
        self.start_x >= 0
            && self.start_y >= 0
            && (self.start_x as usize) < self.grid_width
            && (self.start_y as usize) < self.grid_height
    }
}
