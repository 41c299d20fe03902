use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`, without wrapping.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }
}

fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    let wrapped = value % upper_bound;
    if wrapped < 0 {
        wrapped + upper_bound
    } else {
        wrapped
    }
}

/// Snake body plus the applied and pending directions.
///
/// The head is the front of the deque. Between ticks the body always holds at
/// least one segment.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a snake of `length` segments with its head at `head`, the rest
    /// trailing behind it against `direction`.
    #[must_use]
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut segment = head;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.step(behind);
            body.push_back(segment);
        }

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        }
    }

    /// Records a new intent unless it reverses the applied direction.
    ///
    /// Returns whether the intent was accepted. Only the latest accepted
    /// intent survives until the next [`Snake::advance`].
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Commits the pending direction and prepends the next head, wrapped into
    /// `bounds`. The tail is left in place; call [`Snake::trim_tail`] to move
    /// without growing.
    pub fn advance(&mut self, bounds: GridSize) -> Position {
        debug_assert!(bounds.width > 0 && bounds.height > 0);

        self.direction = self.pending_direction;
        let next_head = self.head().step(self.direction).wrapped(bounds);
        self.body.push_front(next_head);
        next_head
    }

    /// Drops the last segment.
    pub fn trim_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps a non-adjacent segment.
    ///
    /// The neck (index 1) always neighbours the head, so the scan starts at
    /// index 2. Snakes shorter than three segments never collide with
    /// themselves.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(2).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Direction applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction that the next tick will apply.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
