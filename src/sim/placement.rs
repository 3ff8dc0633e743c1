//! Collision-free random placement
//!
//! Food and obstacles are spawned on a uniformly random cell that no entity
//! currently occupies. Sampling is plain rejection: draw a cell, retry while it
//! is taken. The caller must make sure at least one cell is free; `try_place`
//! checks that up front instead of spinning forever.

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;

use super::grid::Grid;
use crate::Position;

/// Anything that covers grid cells and must be avoided when placing
pub trait Occupies {
    /// True if this entity covers `cell`
    fn occupies(&self, cell: Position) -> bool;

    /// Add every covered cell to `occupied`
    fn extend_occupied(&self, occupied: &mut HashSet<Position>);
}

/// Union of the cells covered by `entities`
pub fn occupied_by(entities: &[&dyn Occupies]) -> HashSet<Position> {
    let mut occupied = HashSet::new();
    for entity in entities {
        entity.extend_occupied(&mut occupied);
    }
    occupied
}

/// Number of grid cells not in `occupied` (off-grid entries are ignored)
pub fn free_cell_count(grid: &Grid, occupied: &HashSet<Position>) -> usize {
    let taken = occupied.iter().filter(|p| grid.contains(**p)).count();
    grid.cell_count() - taken
}

/// Sample a uniformly random free cell.
///
/// Requires at least one free cell; with a full grid this never returns.
pub fn place<R: Rng + ?Sized>(grid: &Grid, occupied: &HashSet<Position>, rng: &mut R) -> Position {
    debug_assert!(
        free_cell_count(grid, occupied) > 0,
        "placement requested on a full grid"
    );
    loop {
        let cell = IVec2::new(
            rng.random_range(0..grid.width),
            rng.random_range(0..grid.height),
        );
        if !occupied.contains(&cell) {
            return cell;
        }
    }
}

/// Like [`place`], but returns `None` when no free cell exists
pub fn try_place<R: Rng + ?Sized>(
    grid: &Grid,
    occupied: &HashSet<Position>,
    rng: &mut R,
) -> Option<Position> {
    if free_cell_count(grid, occupied) == 0 {
        return None;
    }
    Some(place(grid, occupied, rng))
}
