//! Discrete simulation tick
//!
//! Core game loop that advances a round by exactly one cell.

use rand::Rng;

use super::direction::Direction;
use super::placement::Occupies;
use super::snake::MoveOutcome;
use super::state::{CollisionKind, GameEvent, Round, Snapshot};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Latest direction intent from the input source
    pub direction: Option<Direction>,
}

impl TickInput {
    pub fn turn(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
        }
    }
}

/// Everything a host needs after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub snapshot: Snapshot,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    /// What the snake hit, if the round was lost (and reset) this tick
    pub fn collided(&self) -> Option<CollisionKind> {
        self.events.iter().find_map(|e| match e {
            GameEvent::Collided { kind, .. } => Some(*kind),
            _ => None,
        })
    }

    pub fn ate_food(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::AteFood { .. }))
    }

    /// True if no free cell was left for the food
    pub fn grid_full(&self) -> bool {
        self.events.contains(&GameEvent::GridFull)
    }
}

/// Advance the round by one tick.
///
/// Order: apply intent, move, then food, then obstacles. A collision resets
/// the round in the same tick; the returned snapshot shows the fresh round.
pub fn tick<R: Rng>(round: &mut Round<R>, input: &TickInput) -> TickReport {
    let mut events = Vec::new();
    round.ticks += 1;

    if let Some(direction) = input.direction {
        round.set_direction(direction);
    }

    match round.snake.move_forward() {
        MoveOutcome::Collided => {
            let at = round.grid.wrap_add(round.snake.head(), round.snake.direction().delta());
            round.lose(CollisionKind::SelfCollision, at, &mut events);
        }
        MoveOutcome::Moved { .. } => {
            let head = round.snake.head();
            if head == round.food.position {
                round.eat(&mut events);
            } else if round.obstacles.occupies(head) {
                round.lose(CollisionKind::ObstacleCollision, head, &mut events);
            }
        }
    }

    TickReport {
        snapshot: round.snapshot(),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Grid, Rules, Snake, SnakeState};
    use glam::IVec2;

    fn quiet_rules() -> Rules {
        Rules {
            initial_obstacles: 0,
            ..Rules::default()
        }
    }

    fn round_4x3() -> Round {
        Round::new(Grid::new(4, 3, 20), quiet_rules(), 12345)
    }

    #[test]
    fn test_tick_moves_one_cell() {
        let mut round = round_4x3();
        round.snake = Snake::from_segments(round.grid, [IVec2::new(1, 1)], Direction::Right);
        round.food.position = IVec2::new(3, 2);

        let report = tick(&mut round, &TickInput::default());

        assert!(report.events.is_empty());
        assert_eq!(report.snapshot.segments, vec![IVec2::new(2, 1)]);
        assert_eq!(report.snapshot.vacated, Some(IVec2::new(1, 1)));
        assert_eq!(report.snapshot.tick, 1);
    }

    #[test]
    fn test_tick_eats_food() {
        let mut round = round_4x3();
        round.snake = Snake::from_segments(round.grid, [IVec2::new(1, 1)], Direction::Right);
        round.food.position = IVec2::new(2, 1);

        let report = tick(&mut round, &TickInput::default());

        assert!(report.ate_food());
        assert_eq!(report.snapshot.score, SCORE_PER_FOOD);
        assert_eq!(report.snapshot.record, SCORE_PER_FOOD);
        assert!(report.snapshot.speed > BASE_SPEED);
        assert_eq!(round.snake.state(), SnakeState::Alive);
        // Body grows on the following tick
        assert_eq!(round.snake.len(), 1);
        assert!(!round.snake.occupies(round.food.position));

        tick(&mut round, &TickInput::turn(Direction::Down));
        assert_eq!(round.snake.len(), 2);
    }

    #[test]
    fn test_tick_rejects_reverse_intent() {
        let mut round = round_4x3();
        round.snake = Snake::from_segments(
            round.grid,
            [IVec2::new(2, 1), IVec2::new(1, 1)],
            Direction::Right,
        );
        round.food.position = IVec2::new(0, 0);

        let report = tick(&mut round, &TickInput::turn(Direction::Left));

        assert!(report.collided().is_none());
        assert_eq!(round.snake.direction(), Direction::Right);
        assert_eq!(round.snake.head(), IVec2::new(3, 1));
    }

    #[test]
    fn test_tick_obstacle_resets_round() {
        let rules = Rules {
            initial_obstacles: 1,
            ..Rules::default()
        };
        let mut round = Round::new(Grid::new(8, 8, 20), rules, 77);
        round.snake = Snake::from_segments(
            round.grid,
            [IVec2::new(1, 1), IVec2::new(0, 1)],
            Direction::Right,
        );
        round.obstacles.clear();
        round.obstacles.insert(IVec2::new(2, 1));
        round.food.position = IVec2::new(6, 6);
        round.score = 30;
        round.record = 30;
        round.speed = 40.0;

        let report = tick(&mut round, &TickInput::default());

        assert_eq!(report.collided(), Some(CollisionKind::ObstacleCollision));
        assert_eq!(round.snake.len(), 1);
        assert_eq!(round.score, 0);
        assert_eq!(round.record, 30);
        assert_eq!(round.speed, BASE_SPEED);
        assert_eq!(round.obstacles.len(), 1);
        assert_eq!(round.losses, 1);
    }

    #[test]
    fn test_tick_self_collision_resets_round() {
        let mut round = Round::new(Grid::new(6, 6, 20), quiet_rules(), 3);
        // Head at (1,0) turning Down into (1,1), which is mid-body
        round.snake = Snake::from_segments(
            round.grid,
            [
                IVec2::new(1, 0),
                IVec2::new(0, 0),
                IVec2::new(0, 1),
                IVec2::new(1, 1),
                IVec2::new(2, 1),
            ],
            Direction::Left,
        );
        round.food.position = IVec2::new(5, 5);

        let report = tick(&mut round, &TickInput::turn(Direction::Down));

        assert_eq!(report.collided(), Some(CollisionKind::SelfCollision));
        assert!(report.events.contains(&GameEvent::Collided {
            kind: CollisionKind::SelfCollision,
            at: IVec2::new(1, 1),
            score: 0,
        }));
        assert_eq!(report.snapshot.segments, vec![round.grid.center()]);
    }

    #[test]
    fn test_obstacle_added_every_nth_food() {
        let rules = Rules {
            initial_obstacles: 0,
            foods_per_obstacle: 3,
            ..Rules::default()
        };
        let mut round = Round::new(Grid::new(10, 10, 20), rules, 8);
        round.snake = Snake::from_segments(round.grid, [IVec2::new(0, 5)], Direction::Right);

        let mut added = 0;
        for _ in 0..3 {
            let next = round.grid.wrap_add(round.snake.head(), round.snake.direction().delta());
            round.food.position = next;
            round.obstacles.clear();
            let report = tick(&mut round, &TickInput::default());
            assert!(report.ate_food());
            added += report
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstacleAdded(_)))
                .count();
        }

        assert_eq!(added, 1);
        assert_eq!(round.eaten_since_obstacle, 0);
        assert_eq!(round.score, 3 * SCORE_PER_FOOD);
    }

    #[test]
    fn test_tick_reports_full_grid() {
        let mut round = Round::new(Grid::new(2, 1, 20), quiet_rules(), 21);
        round.snake = Snake::from_segments(round.grid, [IVec2::new(1, 0)], Direction::Right);
        round.food.position = IVec2::new(0, 0);

        let first = tick(&mut round, &TickInput::default());
        assert!(first.ate_food());
        assert!(!first.grid_full());
        assert_eq!(first.snapshot.food, IVec2::new(1, 0));

        // Second food fills the grid: snake covers both cells
        let second = tick(&mut round, &TickInput::default());
        assert!(second.ate_food());
        assert!(second.grid_full());
        assert_eq!(second.collided(), None);
        assert_eq!(second.snapshot.food, round.snake.head());
    }

    #[test]
    fn test_determinism() {
        // Two rounds with same seed should produce identical results
        let mut round1 = Round::new(Grid::default(), Rules::default(), 99999);
        let mut round2 = Round::new(Grid::default(), Rules::default(), 99999);

        let inputs = [
            TickInput::turn(Direction::Up),
            TickInput::default(),
            TickInput::turn(Direction::Left),
            TickInput::default(),
            TickInput::turn(Direction::Down),
        ];

        for input in inputs.iter().cycle().take(200) {
            let a = tick(&mut round1, input);
            let b = tick(&mut round2, input);
            assert_eq!(a, b);
        }
    }
}
