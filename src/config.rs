use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::food::FruitKind;
use crate::placement::Region;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 25;

/// Number of simultaneously active food slots.
pub const DEFAULT_FOOD_COUNT: usize = 3;

/// Number of obstacles generated per game.
pub const DEFAULT_OBSTACLE_COUNT: usize = 8;

/// Snake length right after a reset.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 160;

/// Cells kept free of food around the grid edge.
pub const FOOD_MARGIN: u16 = 1;

/// Cells kept free of obstacles around the grid edge.
pub const OBSTACLE_MARGIN: u16 = 2;

/// Smallest width or height for which both placement regions are non-empty.
pub const MIN_GRID_DIMENSION: u16 = 2 * OBSTACLE_MARGIN + 1;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Points awarded per fruit kind.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FruitPoints {
    pub apple: u32,
    pub banana: u32,
    pub pineapple: u32,
}

impl FruitPoints {
    #[must_use]
    pub fn for_kind(self, kind: FruitKind) -> u32 {
        match kind {
            FruitKind::Apple => self.apple,
            FruitKind::Banana => self.banana,
            FruitKind::Pineapple => self.pineapple,
        }
    }
}

impl Default for FruitPoints {
    fn default() -> Self {
        Self {
            apple: 10,
            banana: 15,
            pineapple: 25,
        }
    }
}

/// Construction-time parameters of one engine instance.
///
/// Every field has a default, so a JSON file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub food_count: usize,
    pub obstacle_count: usize,
    pub initial_length: usize,
    pub fruit_points: FruitPoints,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            food_count: DEFAULT_FOOD_COUNT,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            initial_length: DEFAULT_INITIAL_LENGTH,
            fruit_points: FruitPoints::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(
        "grid {width}x{height} is too small, both dimensions must be at least {min}",
        min = MIN_GRID_DIMENSION
    )]
    GridTooSmall { width: u16, height: u16 },
    #[error("initial length {length} does not fit a grid {width} cells wide")]
    InvalidInitialLength { length: usize, width: u16 },
    #[error("{required} entities do not fit into {available} placeable cells")]
    Overcrowded { required: usize, available: usize },
    #[error("level must be 1, 2 or 3, got {0}")]
    InvalidLevel(u8),
}

impl GameConfig {
    /// Reads a JSON config file, filling missing fields with defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<Self>(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that a reset can always place the snake, every food slot and
    /// every obstacle.
    ///
    /// The obstacle region is the smaller of the two placement regions and is
    /// contained in the food region, so requiring all entities to fit there
    /// covers both passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
            return Err(ConfigError::GridTooSmall { width, height });
        }

        if self.initial_length == 0 || self.initial_length > usize::from(width / 2) + 1 {
            return Err(ConfigError::InvalidInitialLength {
                length: self.initial_length,
                width,
            });
        }

        let available = Region::inset(self.grid, OBSTACLE_MARGIN).area();
        let required = self
            .initial_length
            .checked_add(self.food_count)
            .and_then(|sum| sum.checked_add(self.obstacle_count))
            .unwrap_or(usize::MAX);
        if required > available {
            return Err(ConfigError::Overcrowded {
                required,
                available,
            });
        }

        Ok(())
    }

    /// Base interval between ticks before the level is applied.
    #[must_use]
    pub fn base_tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Difficulty level selected by the driver; only changes the advised cadence.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    #[default]
    One,
    Two,
    Three,
}

impl Level {
    /// Returns the following level, wrapping from three back to one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::Three,
            Self::Three => Self::One,
        }
    }

    /// Scales the base interval: full, three quarters, half.
    #[must_use]
    pub fn tick_interval(self, base: Duration) -> Duration {
        match self {
            Self::One => base,
            Self::Two => base * 3 / 4,
            Self::Three => base / 2,
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(ConfigError::InvalidLevel(other)),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        match level {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }
}
