use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::warn;

use crate::config::GridSize;
use crate::snake::Position;

/// Random samples tried before falling back to scanning every cell.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 4096;

/// What is being placed, for diagnostics.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Entity {
    Food,
    Obstacle,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Food => f.write_str("food"),
            Self::Obstacle => f.write_str("obstacle"),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum PlacementError {
    #[error("cannot place {entity}: grid saturated")]
    GridSaturated { entity: Entity },
}

/// Inclusive rectangle of cells eligible for placement.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Region {
    min: Position,
    max: Position,
}

impl Region {
    /// The grid with `margin` cells removed from every edge.
    #[must_use]
    pub fn inset(bounds: GridSize, margin: u16) -> Self {
        let margin = i32::from(margin);
        Self {
            min: Position::new(margin, margin),
            max: Position::new(
                i32::from(bounds.width) - 1 - margin,
                i32::from(bounds.height) - 1 - margin,
            ),
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    #[cfg(test)]
    fn contains(self, position: Position) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
    }

    #[must_use]
    pub fn area(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let width = (self.max.x - self.min.x + 1) as usize;
        let height = (self.max.y - self.min.y + 1) as usize;
        width * height
    }

    /// Iterates the region row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Position::new(x, y)))
    }

    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        let x = rng.gen_range(self.min.x..=self.max.x);
        let y = rng.gen_range(self.min.y..=self.max.y);
        Position::new(x, y)
    }
}

/// Picks a uniformly random cell of `region` for which `is_free` holds.
///
/// Rejection sampling runs for up to [`MAX_PLACEMENT_ATTEMPTS`] candidates;
/// after that every free cell is collected and one is drawn from the list.
/// Fails only when the region holds no free cell at all.
pub fn place<R, F>(
    rng: &mut R,
    region: Region,
    entity: Entity,
    is_free: F,
) -> Result<Position, PlacementError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    if region.is_empty() {
        return Err(PlacementError::GridSaturated { entity });
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = region.sample(rng);
        if is_free(candidate) {
            return Ok(candidate);
        }
    }

    warn!(%entity, attempts = MAX_PLACEMENT_ATTEMPTS, "random placement exhausted, scanning free cells");

    let candidates: Vec<Position> = region.cells().filter(|cell| is_free(*cell)).collect();
    if candidates.is_empty() {
        return Err(PlacementError::GridSaturated { entity });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{place, Entity, PlacementError, Region};
    use crate::config::GridSize;
    use crate::snake::Position;

    const BOUNDS: GridSize = GridSize {
        width: 8,
        height: 6,
    };

    #[test]
    fn inset_region_excludes_the_outer_rings() {
        let food = Region::inset(BOUNDS, 1);
        let obstacles = Region::inset(BOUNDS, 2);

        assert_eq!(food.area(), 6 * 4);
        assert_eq!(obstacles.area(), 4 * 2);
        assert!(food.contains(Position::new(1, 1)));
        assert!(food.contains(Position::new(6, 4)));
        assert!(!food.contains(Position::new(0, 3)));
        assert!(!food.contains(Position::new(7, 3)));
        assert!(!obstacles.contains(Position::new(1, 2)));
        assert_eq!(obstacles.cells().count(), obstacles.area());
    }

    #[test]
    fn placement_respects_region_and_predicate() {
        let mut rng = StdRng::seed_from_u64(7);
        let region = Region::inset(BOUNDS, 1);
        let taken = Position::new(3, 3);

        for _ in 0..200 {
            let cell = place(&mut rng, region, Entity::Food, |cell| cell != taken)
                .expect("placement should succeed");
            assert!(region.contains(cell));
            assert_ne!(cell, taken);
        }
    }

    #[test]
    fn crowded_region_falls_back_to_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let region = Region::inset(BOUNDS, 1);
        let only_free = Position::new(5, 2);

        let cell = place(&mut rng, region, Entity::Obstacle, |cell| cell == only_free)
            .expect("one free cell should be found");

        assert_eq!(cell, only_free);
    }

    #[test]
    fn full_region_reports_saturation() {
        let mut rng = StdRng::seed_from_u64(5);
        let region = Region::inset(BOUNDS, 1);

        let error = place(&mut rng, region, Entity::Food, |_| false)
            .expect_err("nothing is free");

        assert_eq!(error, PlacementError::GridSaturated { entity: Entity::Food });
        assert_eq!(error.to_string(), "cannot place food: grid saturated");
    }

    #[test]
    fn empty_region_reports_saturation() {
        let mut rng = StdRng::seed_from_u64(5);
        let region = Region::inset(GridSize { width: 3, height: 3 }, 2);

        assert!(region.is_empty());
        assert!(place(&mut rng, region, Entity::Obstacle, |_| true).is_err());
    }
}
