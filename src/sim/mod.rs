//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (snake head first, obstacles by insertion)
//! - No rendering or platform dependencies

pub mod direction;
pub mod food;
pub mod grid;
pub mod obstacles;
pub mod placement;
pub mod snake;
pub mod state;
pub mod tick;

pub use direction::Direction;
pub use food::Food;
pub use grid::Grid;
pub use obstacles::ObstacleSet;
pub use placement::{Occupies, free_cell_count, occupied_by, place, try_place};
pub use snake::{MoveOutcome, Snake, SnakeState};
pub use state::{CollisionKind, GameEvent, Round, Rules, Snapshot};
pub use tick::{TickInput, TickReport, tick};
