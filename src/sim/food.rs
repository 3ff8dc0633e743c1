//! The single food item

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::placement::{Occupies, try_place};
use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Move to a random cell outside `occupied`.
    ///
    /// Returns false and stays put when every cell is taken.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> bool {
        let Some(cell) = try_place(grid, occupied, rng) else {
            return false;
        };
        self.position = cell;
        log::debug!("Food spawned at ({}, {})", cell.x, cell.y);
        true
    }
}

impl Occupies for Food {
    fn occupies(&self, cell: Position) -> bool {
        self.position == cell
    }

    fn extend_occupied(&self, occupied: &mut HashSet<Position>) {
        occupied.insert(self.position);
    }
}
