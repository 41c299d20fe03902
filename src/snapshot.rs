use serde::{Deserialize, Serialize};

use crate::config::Level;
use crate::food::Food;
use crate::game::{DeathReason, Game, GameStatus};
use crate::input::Direction;
use crate::snake::Position;

/// Owned copy of everything a driver needs to draw one frame.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub body: Vec<Position>,
    pub foods: Vec<Food>,
    pub obstacles: Vec<Position>,
    pub score: u32,
    pub best_score: u32,
    pub length: usize,
    pub direction: Direction,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub level: Level,
    pub ticks: u64,
}

impl<R> Game<R> {
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.body().collect(),
            foods: self.foods().to_vec(),
            obstacles: self.obstacles().to_vec(),
            score: self.score(),
            best_score: self.best_score(),
            length: self.len(),
            direction: self.direction(),
            status: self.status(),
            death_reason: self.death_reason(),
            level: self.level(),
            ticks: self.ticks(),
        }
    }
}
