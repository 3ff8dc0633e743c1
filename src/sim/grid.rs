//! Toroidal grid geometry
//!
//! The grid is `width` x `height` cells. Moving off one edge re-enters on the
//! opposite edge, so every coordinate produced here lies in
//! `[0, width) x [0, height)`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::Position;

/// Fixed-size wrap-around grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Width in cells
    pub width: i32,
    /// Height in cells
    pub height: i32,
    /// Edge length of one cell in pixels (renderer hint only)
    pub cell_size: u32,
}

impl Grid {
    /// Create a grid measured in cells. Both dimensions must be positive.
    pub fn new(width: i32, height: i32, cell_size: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "grid must have at least one cell");
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Derive the grid from a screen extent in pixels
    pub fn from_screen(screen_width: u32, screen_height: u32, cell_size: u32) -> Self {
        let cell = cell_size.max(1);
        Self::new(
            (screen_width / cell).max(1) as i32,
            (screen_height / cell).max(1) as i32,
            cell,
        )
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if a position lies on the grid
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Add `delta` to `pos`, wrapping around both axes
    #[inline]
    pub fn wrap_add(&self, pos: Position, delta: IVec2) -> Position {
        (pos + delta).rem_euclid(self.size())
    }

    /// Canonical start cell
    pub fn center(&self) -> Position {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Top-left pixel of a cell
    pub fn cell_to_pixel(&self, pos: Position) -> IVec2 {
        pos * self.cell_size as i32
    }
}

impl Default for Grid {
    fn default() -> Self {
        use crate::consts::*;
        Self::from_screen(SCREEN_WIDTH, SCREEN_HEIGHT, CELL_SIZE)
    }
}
