//! Move type exchanged with callers of the engine.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::square::{Square, SquareError};

/// A move: place a disc on a square, or pass.
///
/// In `(column, row)` form a pass is `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Square),
    Pass,
}

impl Move {
    /// Creates a move from 1-based `(column, row)` coordinates.
    ///
    /// # Returns
    ///
    /// `Some(Move::Pass)` for `(0, 0)`, `Some(Move::Play)` for on-board
    /// coordinates, `None` for anything else.
    pub fn from_coords(column: u8, row: u8) -> Option<Move> {
        if (column, row) == (0, 0) {
            return Some(Move::Pass);
        }
        Square::from_coords(column, row).map(Move::Play)
    }

    /// Returns the 1-based `(column, row)` coordinates; `(0, 0)` for a pass.
    pub fn coords(self) -> (u8, u8) {
        match self {
            Move::Play(sq) => sq.coords(),
            Move::Pass => (0, 0),
        }
    }

    /// Returns the target square, or `None` for a pass.
    pub fn square(self) -> Option<Square> {
        match self {
            Move::Play(sq) => Some(sq),
            Move::Pass => None,
        }
    }

    /// Returns `true` for a pass.
    pub fn is_pass(self) -> bool {
        self == Move::Pass
    }
}

impl From<Square> for Move {
    fn from(sq: Square) -> Self {
        match sq {
            Square::None => Move::Pass,
            sq => Move::Play(sq),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(sq) => write!(f, "{sq}"),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// Error returned when a move string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid move '{input}': {source}")]
pub struct ParseMoveError {
    input: String,
    source: SquareError,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parses `"pass"` (any case, also `"ps"`) or a square such as `"c4"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("pass") || trimmed.eq_ignore_ascii_case("ps") {
            return Ok(Move::Pass);
        }
        trimmed.parse::<Square>().map(Move::Play).map_err(|source| ParseMoveError {
            input: s.to_string(),
            source,
        })
    }
}
