use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FruitPoints;
use crate::snake::Position;

/// Fruit variety; decides how many points a slot is worth.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Apple,
    Banana,
    Pineapple,
}

impl FruitKind {
    pub const ALL: [Self; 3] = [Self::Apple, Self::Banana, Self::Pineapple];
}

/// Picks one of the three kinds with equal probability.
impl Distribution<FruitKind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FruitKind {
        FruitKind::ALL[rng.gen_range(0..FruitKind::ALL.len())]
    }
}

/// One active food slot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Position,
    pub kind: FruitKind,
}

impl Food {
    #[must_use]
    pub fn new(position: Position, kind: FruitKind) -> Self {
        Self { position, kind }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self, table: FruitPoints) -> u32 {
        table.for_kind(self.kind)
    }
}

/// Emitted by the tick that consumed a fruit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct FruitEaten {
    pub position: Position,
    pub points: u32,
    pub kind: FruitKind,
}
