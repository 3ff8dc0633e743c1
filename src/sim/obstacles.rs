//! Static obstacle cells
//!
//! Obstacles never move or expire. New ones are folded into the occupied set
//! as they are placed so two obstacles never share a cell.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::placement::{Occupies, try_place};
use crate::Position;

/// Obstacle cells in placement order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSet {
    cells: Vec<Position>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Add an obstacle at a known cell. Duplicates are ignored.
    pub fn insert(&mut self, cell: Position) -> bool {
        if self.cells.contains(&cell) {
            return false;
        }
        self.cells.push(cell);
        true
    }

    /// Place up to `count` obstacles on free cells.
    ///
    /// `occupied` should hold the snake and food cells; existing obstacles are
    /// added here. Returns how many were placed, which is less than `count`
    /// only when the grid ran out of free cells.
    pub fn grow<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        grid: &Grid,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) -> usize {
        let mut taken = occupied.clone();
        self.extend_occupied(&mut taken);

        let mut placed = 0;
        for _ in 0..count {
            let Some(cell) = try_place(grid, &taken, rng) else {
                log::warn!("No free cell left for obstacle ({placed}/{count} placed)");
                break;
            };
            taken.insert(cell);
            self.cells.push(cell);
            placed += 1;
            log::debug!("Obstacle placed at ({}, {})", cell.x, cell.y);
        }
        placed
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl Occupies for ObstacleSet {
    fn occupies(&self, cell: Position) -> bool {
        self.cells.contains(&cell)
    }

    fn extend_occupied(&self, occupied: &mut HashSet<Position>) {
        occupied.extend(self.cells.iter().copied());
    }
}
