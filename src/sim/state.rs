//! Round state and core simulation types
//!
//! A `Round` owns everything the simulation mutates: grid, RNG, snake, food,
//! obstacles and the score/speed progression. Renderers only ever see
//! `Snapshot` values.

use std::collections::HashSet;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::food::Food;
use super::grid::Grid;
use super::obstacles::ObstacleSet;
use super::placement::occupied_by;
use super::snake::Snake;
use crate::consts::*;
use crate::{Position, Settings};

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    SelfCollision,
    ObstacleCollision,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Food eaten at `at`, score after eating
    AteFood { at: Position, score: u64 },
    /// Record raised to this score
    NewRecord(u64),
    /// Obstacle placed
    ObstacleAdded(Position),
    /// Food could not be respawned: snake and obstacles cover every cell.
    /// The food stays under the head; the host decides how to end the game.
    GridFull,
    /// Round lost; `score` is the score before the reset
    Collided {
        kind: CollisionKind,
        at: Position,
        score: u64,
    },
}

/// Scoring and difficulty progression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Ticks per second at round start
    pub base_speed: f32,
    /// Speed multiplier per food eaten (no upper bound)
    pub speed_growth: f32,
    /// Points per food
    pub score_per_food: u64,
    /// Obstacles placed at round start
    pub initial_obstacles: usize,
    /// Food eaten between obstacle spawns
    pub foods_per_obstacle: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            speed_growth: SPEED_GROWTH,
            score_per_food: SCORE_PER_FOOD,
            initial_obstacles: INITIAL_OBSTACLES,
            foods_per_obstacle: FOODS_PER_OBSTACLE,
        }
    }
}

/// Read-only view of a round, handed to the renderer once per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snake cells, head first
    pub segments: Vec<Position>,
    /// Cell freed by the last move
    pub vacated: Option<Position>,
    pub food: Position,
    pub obstacles: Vec<Position>,
    pub score: u64,
    pub record: u64,
    /// Ticks per second
    pub speed: f32,
    /// Ticks since the round controller was created
    pub tick: u64,
}

/// Session controller: one snake, one food item, a set of obstacles
#[derive(Debug, Clone)]
pub struct Round<R = Pcg32> {
    pub grid: Grid,
    pub rules: Rules,
    pub snake: Snake,
    pub food: Food,
    pub obstacles: ObstacleSet,
    /// Current score
    pub score: u64,
    /// Best score seen by this controller (survives resets)
    pub record: u64,
    /// Ticks per second
    pub speed: f32,
    /// Food eaten since the last obstacle spawn
    pub eaten_since_obstacle: u32,
    /// Simulation tick counter
    pub ticks: u64,
    /// Rounds lost so far
    pub losses: u32,
    rng: R,
}

impl Round<Pcg32> {
    /// Create a round with a seeded PCG generator
    pub fn new(grid: Grid, rules: Rules, seed: u64) -> Self {
        log::info!("New round with seed {seed}");
        Self::with_rng(grid, rules, Pcg32::seed_from_u64(seed))
    }

    /// Create a round from settings (random seed unless one is configured)
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::new(settings.grid(), settings.rules(), seed)
    }
}

impl<R: Rng> Round<R> {
    /// Create a round drawing randomness from `rng`
    pub fn with_rng(grid: Grid, rules: Rules, mut rng: R) -> Self {
        let snake = Snake::new(grid, &mut rng);
        let mut round = Self {
            grid,
            rules,
            snake,
            food: Food::new(grid.center()),
            obstacles: ObstacleSet::new(),
            score: 0,
            record: 0,
            speed: rules.base_speed,
            eaten_since_obstacle: 0,
            ticks: 0,
            losses: 0,
            rng,
        };
        round.restart();
        round
    }

    /// Forward a direction intent to the snake; reversals are ignored
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        self.snake.set_direction(direction)
    }

    /// Back to start-of-round values. Record, tick and loss counters persist.
    pub fn restart(&mut self) {
        self.snake.reset(&mut self.rng);
        self.obstacles.clear();
        self.score = 0;
        self.speed = self.rules.base_speed;
        self.eaten_since_obstacle = 0;
        // Settings validation keeps a free cell for the first food
        self.respawn_food();
        self.add_obstacles(self.rules.initial_obstacles);

        log::info!(
            "Round started: {}x{} grid, {} obstacles",
            self.grid.width,
            self.grid.height,
            self.obstacles.len()
        );
    }

    /// Cells covered by the snake and obstacles
    fn blocked_cells(&self) -> HashSet<Position> {
        occupied_by(&[&self.snake, &self.obstacles])
    }

    /// Move the food to a free cell. Returns false, leaving the food in
    /// place, when snake and obstacles cover the whole grid.
    pub(crate) fn respawn_food(&mut self) -> bool {
        let occupied = self.blocked_cells();
        let placed = self.food.spawn(&self.grid, &occupied, &mut self.rng);
        if !placed {
            log::error!(
                "No free cell for food: {} of {} cells occupied",
                occupied.len(),
                self.grid.cell_count()
            );
        }
        placed
    }

    /// Place up to `count` obstacles away from snake and food
    pub(crate) fn add_obstacles(&mut self, count: usize) -> &[Position] {
        let occupied = occupied_by(&[&self.snake, &self.obstacles, &self.food]);

        let before = self.obstacles.len();
        self.obstacles.grow(count, &self.grid, &occupied, &mut self.rng);
        &self.obstacles.cells()[before..]
    }

    /// Head-on-food bookkeeping
    pub(crate) fn eat(&mut self, events: &mut Vec<GameEvent>) {
        let at = self.snake.head();
        self.snake.grow();
        if !self.respawn_food() {
            events.push(GameEvent::GridFull);
        }

        self.score += self.rules.score_per_food;
        events.push(GameEvent::AteFood {
            at,
            score: self.score,
        });
        if self.score > self.record {
            self.record = self.score;
            events.push(GameEvent::NewRecord(self.record));
            log::debug!("New record: {}", self.record);
        }

        self.speed *= self.rules.speed_growth;

        self.eaten_since_obstacle += 1;
        if self.eaten_since_obstacle >= self.rules.foods_per_obstacle {
            self.eaten_since_obstacle = 0;
            let added: Vec<Position> = self.add_obstacles(1).to_vec();
            events.extend(added.into_iter().map(GameEvent::ObstacleAdded));
        }

        self.snake.settle();
    }

    /// Loss: record the event and reset the round
    pub(crate) fn lose(&mut self, kind: CollisionKind, at: Position, events: &mut Vec<GameEvent>) {
        log::warn!(
            "{kind:?} at ({}, {}) with score {} (record {})",
            at.x,
            at.y,
            self.score,
            self.record
        );
        events.push(GameEvent::Collided {
            kind,
            at,
            score: self.score,
        });
        self.losses += 1;
        self.restart();
    }

    /// Immutable view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.segments().collect(),
            vacated: self.snake.vacated(),
            food: self.food.position,
            obstacles: self.obstacles.cells().to_vec(),
            score: self.score,
            record: self.record,
            speed: self.speed,
            tick: self.ticks,
        }
    }

    /// Time between ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Occupies;

    #[test]
    fn test_new_round_layout() {
        let round = Round::new(Grid::default(), Rules::default(), 12345);

        assert_eq!(round.snake.len(), 1);
        assert_eq!(round.snake.head(), round.grid.center());
        assert_eq!(round.score, 0);
        assert_eq!(round.speed, BASE_SPEED);
        assert_eq!(round.obstacles.len(), INITIAL_OBSTACLES);

        // Food and obstacles never overlap each other or the snake
        assert!(!round.snake.occupies(round.food.position));
        assert!(!round.obstacles.occupies(round.food.position));
        for cell in round.obstacles.cells() {
            assert!(!round.snake.occupies(*cell));
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Round::new(Grid::default(), Rules::default(), 777);
        let b = Round::new(Grid::default(), Rules::default(), 777);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.snake.direction(), b.snake.direction());
    }

    #[test]
    fn test_from_settings_uses_seed_and_rules() {
        let mut settings = Settings::from_preset(crate::Difficulty::Hard);
        settings.seed = Some(5);
        let round = Round::from_settings(&settings);

        assert_eq!(round.rules, settings.rules());
        assert_eq!(round.obstacles.len(), 5);
        assert_eq!(round.snapshot(), Round::from_settings(&settings).snapshot());
    }

    #[test]
    fn test_eat_progression() {
        let rules = Rules {
            foods_per_obstacle: 2,
            initial_obstacles: 0,
            ..Rules::default()
        };
        let mut round = Round::new(Grid::default(), rules, 1);
        let mut events = Vec::new();

        round.eat(&mut events);
        assert_eq!(round.score, SCORE_PER_FOOD);
        assert_eq!(round.record, SCORE_PER_FOOD);
        assert_eq!(round.eaten_since_obstacle, 1);
        assert_eq!(round.snake.target_len(), 2);
        assert!(round.obstacles.is_empty());
        assert!(round.speed > BASE_SPEED);

        round.eat(&mut events);
        assert_eq!(round.eaten_since_obstacle, 0);
        assert_eq!(round.obstacles.len(), 1);
        assert!(matches!(events.last(), Some(GameEvent::ObstacleAdded(_))));
    }

    #[test]
    fn test_lose_keeps_record() {
        let mut round = Round::new(Grid::default(), Rules::default(), 2);
        let mut events = Vec::new();
        round.eat(&mut events);
        round.eat(&mut events);
        events.clear();

        let head = round.snake.head();
        round.lose(CollisionKind::SelfCollision, head, &mut events);

        assert_eq!(round.score, 0);
        assert_eq!(round.record, 2 * SCORE_PER_FOOD);
        assert_eq!(round.speed, BASE_SPEED);
        assert_eq!(round.losses, 1);
        assert_eq!(
            events,
            vec![GameEvent::Collided {
                kind: CollisionKind::SelfCollision,
                at: head,
                score: 2 * SCORE_PER_FOOD
            }]
        );
    }

    #[test]
    fn test_tick_interval_follows_speed() {
        let mut round = Round::new(Grid::default(), Rules::default(), 3);
        round.speed = 4.0;
        assert_eq!(round.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_respawn_food_on_full_grid_keeps_food() {
        let rules = Rules {
            initial_obstacles: 0,
            ..Rules::default()
        };
        let mut round = Round::new(Grid::new(2, 1, 20), rules, 4);
        // Snake covers one cell, fill the other with an obstacle
        let free = round.food.position;
        round.obstacles.insert(free);

        assert!(!round.respawn_food());
        assert_eq!(round.food.position, free);
    }

    #[test]
    fn test_eat_on_full_grid_reports_event() {
        let rules = Rules {
            initial_obstacles: 0,
            ..Rules::default()
        };
        let mut round = Round::new(Grid::new(2, 1, 20), rules, 6);
        round.obstacles.insert(round.food.position);
        let mut events = Vec::new();

        round.eat(&mut events);

        assert!(events.contains(&GameEvent::GridFull));
        assert_eq!(round.score, SCORE_PER_FOOD);
    }
}
