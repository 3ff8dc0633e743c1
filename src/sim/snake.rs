//! The snake: body segments, direction, growth and self-collision
//!
//! The body is a deque with the head at the front. A move pushes the new head
//! and pops the tail unless growth is pending. Growth is tracked as a target
//! length, so `grow()` on tick T shows up as a longer body from tick T+1.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::grid::Grid;
use super::placement::Occupies;
use crate::Position;

/// Lifecycle of the snake within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeState {
    /// Moving normally
    Alive,
    /// Ate this tick; collapses back to `Alive` once the round has done its bookkeeping
    JustAte,
    /// Ran into itself; the round must reset before the next move
    Collided,
}

/// Result of a single `move_forward`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Head advanced; `grew` is true when the tail was kept
    Moved { grew: bool },
    /// New head would overlap the body, nothing was committed
    Collided,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snake {
    grid: Grid,
    /// Segments, head first
    body: VecDeque<Position>,
    /// Current heading, applied on the next move
    direction: Direction,
    /// Length the body grows toward
    target_len: usize,
    /// Cell freed by the last move, for renderers
    vacated: Option<Position>,
    state: SnakeState,
}

impl Snake {
    /// Single-segment snake at the grid center with a random heading
    pub fn new<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Self {
        let direction = Direction::random(rng);
        Self::from_segments(grid, [grid.center()], direction)
    }

    /// Build a snake from explicit segments (head first). The target length is
    /// the current length, so no growth is pending.
    pub fn from_segments(
        grid: Grid,
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        let mut body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            body.push_back(grid.center());
        }
        let target_len = body.len();
        Self {
            grid,
            body,
            direction,
            target_len,
            vacated: None,
            state: SnakeState::Alive,
        }
    }

    #[inline]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    #[inline]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Moves left that will keep the tail
    pub fn pending_growth(&self) -> usize {
        self.target_len.saturating_sub(self.body.len())
    }

    pub fn vacated(&self) -> Option<Position> {
        self.vacated
    }

    pub fn state(&self) -> SnakeState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state != SnakeState::Collided
    }

    /// Request a new heading. The exact reverse of the current direction is
    /// silently ignored; the last accepted direction applies on the next move.
    ///
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance one cell in the current direction
    pub fn move_forward(&mut self) -> MoveOutcome {
        if self.state == SnakeState::Collided {
            return MoveOutcome::Collided;
        }

        let new_head = self.grid.wrap_add(self.head(), self.direction.delta());
        let grows = self.body.len() < self.target_len;

        // The tail leaves its cell this tick unless we are growing
        let checked = if grows {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        if self.body.iter().take(checked).any(|p| *p == new_head) {
            self.state = SnakeState::Collided;
            return MoveOutcome::Collided;
        }

        self.body.push_front(new_head);
        self.vacated = if grows { None } else { self.body.pop_back() };
        self.state = SnakeState::Alive;

        MoveOutcome::Moved { grew: grows }
    }

    /// Lengthen by one on the next move
    pub fn grow(&mut self) {
        self.target_len += 1;
        if self.state == SnakeState::Alive {
            self.state = SnakeState::JustAte;
        }
    }

    /// End of eat bookkeeping
    pub fn settle(&mut self) {
        if self.state == SnakeState::JustAte {
            self.state = SnakeState::Alive;
        }
    }

    /// Back to a single segment at the start cell with a random heading
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let direction = Direction::random(rng);
        self.body.clear();
        self.body.push_back(self.grid.center());
        self.direction = direction;
        self.target_len = 1;
        self.vacated = None;
        self.state = SnakeState::Alive;
    }
}

impl Occupies for Snake {
    fn occupies(&self, cell: Position) -> bool {
        self.body.contains(&cell)
    }

    fn extend_occupied(&self, occupied: &mut HashSet<Position>) {
        occupied.extend(self.body.iter().copied());
    }
}
