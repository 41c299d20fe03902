use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit offset of one step, with y growing downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Rejected character in a move script.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("unexpected move '{symbol}' at position {index}")]
pub struct ParseMoveError {
    pub symbol: char,
    pub index: usize,
}

/// One step of a move script: either a direction change or "keep course".
pub type ScriptedMove = Option<Direction>;

/// Maps a single script character onto a move.
///
/// Letters are case-insensitive; arrows `^ v < >` are accepted as well.
#[must_use]
pub fn parse_move(symbol: char) -> Option<ScriptedMove> {
    match symbol.to_ascii_uppercase() {
        'U' | '^' => Some(Some(Direction::Up)),
        'D' | 'V' => Some(Some(Direction::Down)),
        'L' | '<' => Some(Some(Direction::Left)),
        'R' | '>' => Some(Some(Direction::Right)),
        '.' => Some(None),
        _ => None,
    }
}

/// Parses a whole move script, one entry per tick. Whitespace is ignored.
pub fn parse_script(script: &str) -> Result<Vec<ScriptedMove>, ParseMoveError> {
    script
        .chars()
        .filter(|symbol| !symbol.is_whitespace())
        .enumerate()
        .map(|(index, symbol)| parse_move(symbol).ok_or(ParseMoveError { symbol, index }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{direction_change_is_valid, parse_script, Direction, ParseMoveError};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(Direction::Down, Direction::Up));
        assert!(!direction_change_is_valid(
            Direction::Left,
            Direction::Right
        ));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn script_accepts_letters_arrows_and_keep_course() {
        let moves = parse_script("u.>\n v<").expect("script should parse");

        assert_eq!(
            moves,
            vec![
                Some(Direction::Up),
                None,
                Some(Direction::Right),
                Some(Direction::Down),
                Some(Direction::Left),
            ]
        );
    }

    #[test]
    fn script_reports_first_bad_symbol() {
        assert_eq!(
            parse_script("RRxU"),
            Err(ParseMoveError {
                symbol: 'x',
                index: 2
            })
        );
    }
}
