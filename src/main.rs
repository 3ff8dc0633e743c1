//! Torus Snake headless entry point
//!
//! Runs a round with a greedy autopilot instead of a keyboard and a renderer,
//! logging events as they happen and printing the final snapshot as JSON.
//!
//! Usage: `torus-snake [settings.json] [ticks]`

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use torus_snake::Position;
use torus_snake::Settings;
use torus_snake::sim::{Direction, GameEvent, Occupies, Round, TickInput, tick};

const DEFAULT_TICKS: u64 = 2_000;

fn main() {
    env_logger::init();
    log::info!("Torus Snake (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(DEFAULT_TICKS);

    let mut round = Round::from_settings(&settings);
    let mut played = Duration::ZERO;

    for _ in 0..ticks {
        // The pacer would sleep this long before the tick
        played += round.tick_interval();

        let input = TickInput {
            direction: autopilot(&round),
        };
        let report = tick(&mut round, &input);

        for event in &report.events {
            match event {
                GameEvent::AteFood { score, .. } => log::debug!("Ate food, score {score}"),
                GameEvent::NewRecord(record) => log::info!("New record: {record}"),
                GameEvent::ObstacleAdded(at) => {
                    log::debug!("Obstacle added at ({}, {})", at.x, at.y)
                }
                GameEvent::Collided { kind, score, .. } => {
                    log::info!("Lost round ({kind:?}) with score {score}")
                }
                GameEvent::GridFull => log::error!("No free cell left for food"),
            }
        }
        // Placement needs a free cell; a full grid ends the demo
        assert!(
            !report.grid_full(),
            "grid filled up after {} ticks",
            round.ticks
        );
    }

    log::info!(
        "Finished {} ticks ({:.1}s of play): record {}, {} rounds lost",
        round.ticks,
        played.as_secs_f32(),
        round.record,
        round.losses
    );

    match serde_json::to_string_pretty(&round.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize snapshot: {e}"),
    }
}

/// Steer toward the food along the shortest wrapped path, avoiding cells
/// that would end the round when possible.
fn autopilot(round: &Round) -> Option<Direction> {
    let snake = &round.snake;
    let head = snake.head();

    // The tail moves away this tick unless growth is pending
    let mut blocked: HashSet<Position> = HashSet::new();
    snake.extend_occupied(&mut blocked);
    if snake.pending_growth() == 0 {
        blocked.remove(&snake.tail());
    }
    round.obstacles.extend_occupied(&mut blocked);

    Direction::ALL
        .into_iter()
        .filter(|d| !d.is_opposite(snake.direction()))
        .map(|d| (d, round.grid.wrap_add(head, d.delta())))
        .filter(|(_, cell)| !blocked.contains(cell))
        .min_by_key(|(_, cell)| wrapped_distance(round, *cell, round.food.position))
        .map(|(d, _)| d)
}

/// Manhattan distance on the torus
fn wrapped_distance(round: &Round, a: Position, b: Position) -> i32 {
    let d = (a - b).abs();
    let dx = d.x.min(round.grid.width - d.x);
    let dy = d.y.min(round.grid.height - d.y);
    dx + dy
}
