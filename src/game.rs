use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use crate::config::{ConfigError, FOOD_MARGIN, GameConfig, Level, OBSTACLE_MARGIN};
use crate::food::{Food, FruitEaten};
use crate::input::Direction;
use crate::placement::{self, Entity, PlacementError, Region};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// The head hit an obstacle or its own body.
    GameOver,
    /// The snake filled the board so no food slot could be refilled.
    Victory,
}

/// Why the last game ended in a collision.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeathReason {
    ObstacleCollision,
    SelfCollision,
}

/// Everything a single tick reports back to the driver.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickOutcome {
    pub fruit_eaten: Option<FruitEaten>,
    pub death: Option<DeathReason>,
}

/// The simulation engine.
///
/// The driver calls [`Game::reset`], [`Game::change_direction`] and
/// [`Game::tick`]; everything else is read-only.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    config: GameConfig,
    snake: Snake,
    foods: Vec<Food>,
    obstacles: Vec<Position>,
    score: u32,
    best_score: u32,
    ticks: u64,
    level: Level,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    rng: R,
}

impl Game<StdRng> {
    /// Creates a deterministic game for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a game seeded from the operating system.
    pub fn from_entropy(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    /// Validates `config` and starts a fresh game drawing from `rng`.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut game = Self {
            config,
            snake: start_snake(&config),
            foods: Vec::with_capacity(config.food_count),
            obstacles: Vec::with_capacity(config.obstacle_count),
            score: 0,
            best_score: 0,
            ticks: 0,
            level: Level::default(),
            status: GameStatus::Playing,
            death_reason: None,
            rng,
        };
        game.populate();
        Ok(game)
    }

    /// Re-seeds the snake at the grid center heading right, then places food
    /// and obstacles, in that order.
    pub fn reset(&mut self) {
        self.snake = start_snake(&self.config);
        self.score = 0;
        self.ticks = 0;
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.populate();
    }

    /// Replaces every food slot, then every obstacle, around the current snake.
    fn populate(&mut self) {
        self.foods.clear();
        self.obstacles.clear();
        for _ in 0..self.config.food_count {
            let food = self
                .place_food(None)
                .expect("validated config always leaves room for food at reset");
            self.foods.push(food);
        }
        self.generate_obstacles();

        debug!(
            head = ?self.snake.head(),
            foods = self.foods.len(),
            obstacles = self.obstacles.len(),
            "game reset"
        );
    }

    /// Records the direction for the next tick; exact reversals are ignored.
    pub fn change_direction(&mut self, direction: Direction) {
        if !self.snake.change_direction(direction) {
            trace!(?direction, current = ?self.snake.direction(), "reversal ignored");
        }
    }

    /// Advances simulation by one cell. No-op once the game has ended.
    #[instrument(level = "trace", skip_all)]
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.status != GameStatus::Playing {
            return outcome;
        }

        self.ticks += 1;
        let head = self.snake.advance(self.config.grid);

        match self.foods.iter().position(|food| food.position == head) {
            Some(index) => outcome.fruit_eaten = Some(self.consume_food(index)),
            None => self.snake.trim_tail(),
        }

        if self.status == GameStatus::Playing {
            if let Some(reason) = self.detect_collision() {
                self.status = GameStatus::GameOver;
                self.death_reason = Some(reason);
                outcome.death = Some(reason);
                info!(
                    ?reason,
                    score = self.score,
                    length = self.snake.len(),
                    "game over"
                );
            }
        }

        trace!(?head, length = self.snake.len(), "tick");
        outcome
    }

    /// Changes the advised tick cadence.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    fn consume_food(&mut self, index: usize) -> FruitEaten {
        let food = self.foods[index];
        let points = food.points(self.config.fruit_points);
        self.score = self.score.saturating_add(points);
        self.best_score = self.best_score.max(self.score);

        let event = FruitEaten {
            position: food.position,
            points,
            kind: food.kind,
        };
        debug!(position = ?event.position, kind = ?event.kind, points, score = self.score, "fruit eaten");

        match self.place_food(Some(index)) {
            Ok(replacement) => self.foods[index] = replacement,
            Err(error) => {
                self.foods.remove(index);
                self.status = GameStatus::Victory;
                info!(%error, score = self.score, length = self.snake.len(), "board filled");
            }
        }

        event
    }

    /// Finds a free food cell, ignoring the slot at `skip` when one is being
    /// regenerated.
    fn place_food(&mut self, skip: Option<usize>) -> Result<Food, PlacementError> {
        let Self {
            config,
            snake,
            foods,
            obstacles,
            rng,
            ..
        } = self;

        let position = placement::place(
            rng,
            Region::inset(config.grid, FOOD_MARGIN),
            Entity::Food,
            |cell| {
                !snake.occupies(cell)
                    && !obstacles.contains(&cell)
                    && !foods
                        .iter()
                        .enumerate()
                        .any(|(slot, food)| Some(slot) != skip && food.position == cell)
            },
        )?;

        Ok(Food::new(position, rng.r#gen()))
    }

    fn generate_obstacles(&mut self) {
        self.obstacles.clear();
        let region = Region::inset(self.config.grid, OBSTACLE_MARGIN);

        for _ in 0..self.config.obstacle_count {
            let Self {
                snake,
                foods,
                obstacles,
                rng,
                ..
            } = self;

            let position = placement::place(rng, region, Entity::Obstacle, |cell| {
                !snake.occupies(cell)
                    && !obstacles.contains(&cell)
                    && !foods.iter().any(|food| food.position == cell)
            })
            .expect("validated config always leaves room for obstacles at reset");
            obstacles.push(position);
        }
    }
}

impl<R> Game<R> {
    fn detect_collision(&self) -> Option<DeathReason> {
        let head = self.snake.head();
        if self.obstacles.contains(&head) {
            Some(DeathReason::ObstacleCollision)
        } else if self.snake.head_overlaps_body() {
            Some(DeathReason::SelfCollision)
        } else {
            None
        }
    }

    /// Body cells from head to tail.
    pub fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.segments().copied()
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.snake.head()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snake.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    #[must_use]
    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Position] {
        &self.obstacles
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest score reached since this engine was created.
    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.snake.pending_direction()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once the head has collided; victory does not count.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Interval the driver should leave between ticks at the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.level.tick_interval(self.config.base_tick_interval())
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Snake at the grid center heading right, tail trailing to the left.
fn start_snake(config: &GameConfig) -> Snake {
    let head = Position::new(
        i32::from(config.grid.width / 2),
        i32::from(config.grid.height / 2),
    );
    Snake::new(head, Direction::Right, config.initial_length)
}
