//! Game settings and difficulty presets
//!
//! Settings are plain JSON. Loading never fails: a missing, unreadable or
//! invalid file falls back to defaults with a warning.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Grid, Rules};

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Starting ticks per second
    pub fn base_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 10.0,
            Difficulty::Normal => BASE_SPEED,
            Difficulty::Hard => 25.0,
        }
    }

    /// Speed multiplier per food eaten
    pub fn speed_growth(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.03,
            Difficulty::Normal => SPEED_GROWTH,
            Difficulty::Hard => 1.08,
        }
    }

    /// Obstacles present when a round starts
    pub fn initial_obstacles(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => INITIAL_OBSTACLES,
            Difficulty::Hard => 5,
        }
    }

    /// Food eaten between obstacle spawns
    pub fn foods_per_obstacle(&self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal => FOODS_PER_OBSTACLE,
            Difficulty::Hard => 2,
        }
    }
}

/// Invalid settings values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("cell size must be at least 1 pixel")]
    ZeroCellSize,
    #[error("screen {}x{} cannot hold a single {cell_size}px cell", .screen.0, .screen.1)]
    ScreenSmallerThanCell { screen: (u32, u32), cell_size: u32 },
    #[error("base speed must be positive, got {0}")]
    NonPositiveSpeed(f32),
    #[error("speed growth must be at least 1.0, got {0}")]
    ShrinkingSpeed(f32),
    #[error("foods per obstacle must be at least 1")]
    ZeroFoodsPerObstacle,
    #[error("{requested} initial obstacles leave no room for snake and food on {cells} cells")]
    TooManyObstacles { requested: usize, cells: usize },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the tuning values were taken from
    pub difficulty: Difficulty,

    // === Geometry ===
    /// Screen width in pixels
    pub screen_width: u32,
    /// Screen height in pixels
    pub screen_height: u32,
    /// Cell edge in pixels
    pub cell_size: u32,

    // === Progression ===
    /// Starting ticks per second
    pub base_speed: f32,
    /// Speed multiplier per food eaten
    pub speed_growth: f32,
    /// Points per food
    pub score_per_food: u64,
    /// Obstacles at round start
    pub initial_obstacles: usize,
    /// Food eaten between obstacle spawns
    pub foods_per_obstacle: u32,

    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(Difficulty::Normal)
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: Difficulty) -> Self {
        let mut settings = Self {
            difficulty: preset,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            base_speed: BASE_SPEED,
            speed_growth: SPEED_GROWTH,
            score_per_food: SCORE_PER_FOOD,
            initial_obstacles: INITIAL_OBSTACLES,
            foods_per_obstacle: FOODS_PER_OBSTACLE,
            seed: None,
        };
        settings.apply_preset(preset);
        settings
    }

    /// Apply a difficulty preset (updates progression settings only)
    pub fn apply_preset(&mut self, preset: Difficulty) {
        self.difficulty = preset;
        self.base_speed = preset.base_speed();
        self.speed_growth = preset.speed_growth();
        self.initial_obstacles = preset.initial_obstacles();
        self.foods_per_obstacle = preset.foods_per_obstacle();
    }

    /// Grid derived from the screen extent
    pub fn grid(&self) -> Grid {
        Grid::from_screen(self.screen_width, self.screen_height, self.cell_size)
    }

    /// Progression rules for a round
    pub fn rules(&self) -> Rules {
        Rules {
            base_speed: self.base_speed,
            speed_growth: self.speed_growth,
            score_per_food: self.score_per_food,
            initial_obstacles: self.initial_obstacles,
            foods_per_obstacle: self.foods_per_obstacle,
        }
    }

    /// Check that a round can be played with these values
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cell_size == 0 {
            return Err(SettingsError::ZeroCellSize);
        }
        if self.screen_width < self.cell_size || self.screen_height < self.cell_size {
            return Err(SettingsError::ScreenSmallerThanCell {
                screen: (self.screen_width, self.screen_height),
                cell_size: self.cell_size,
            });
        }
        if !(self.base_speed > 0.0) {
            return Err(SettingsError::NonPositiveSpeed(self.base_speed));
        }
        if !(self.speed_growth >= 1.0) {
            return Err(SettingsError::ShrinkingSpeed(self.speed_growth));
        }
        if self.foods_per_obstacle == 0 {
            return Err(SettingsError::ZeroFoodsPerObstacle);
        }
        // Snake head and food need a cell each
        let cells = self.grid().cell_count();
        if self.initial_obstacles + 2 > cells {
            return Err(SettingsError::TooManyObstacles {
                requested: self.initial_obstacles,
                cells,
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings from {}: {e}", path.display());
                return Self::default();
            }
        };

        let settings = match Self::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings in {}: {e}", path.display());
                return Self::default();
            }
        };

        if let Err(e) = settings.validate() {
            log::warn!("Rejected settings from {}: {e}", path.display());
            return Self::default();
        }

        log::info!(
            "Loaded settings from {} ({} difficulty)",
            path.display(),
            settings.difficulty.as_str()
        );
        settings
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
