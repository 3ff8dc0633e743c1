//! Torus Snake - A snake simulation on a wrap-around grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, food, obstacles, round tick)
//! - `settings`: Data-driven rules and difficulty presets

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings, SettingsError};

use glam::IVec2;

/// A cell on the grid, `x` is the column and `y` the row
pub type Position = IVec2;

/// Game configuration constants
pub mod consts {
    /// Screen extent in pixels (the grid is derived from it)
    pub const SCREEN_WIDTH: u32 = 640;
    pub const SCREEN_HEIGHT: u32 = 480;
    /// Edge length of one cell in pixels
    pub const CELL_SIZE: u32 = 20;

    /// Starting tick rate (ticks per second)
    pub const BASE_SPEED: f32 = 20.0;
    /// Tick rate multiplier applied on every food eaten
    pub const SPEED_GROWTH: f32 = 1.05;

    /// Points awarded per food item
    pub const SCORE_PER_FOOD: u64 = 10;

    /// Obstacles placed at round start
    pub const INITIAL_OBSTACLES: usize = 2;
    /// Food items eaten between two obstacle spawns
    pub const FOODS_PER_OBSTACLE: u32 = 3;
}
