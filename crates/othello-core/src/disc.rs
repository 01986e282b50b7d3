//! Disc colours and the side to move.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Represents the content of a single cell.
///
/// * `Empty` - No disc on the cell.
/// * `Dark` - A dark disc.
/// * `Light` - A light disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disc {
    Empty,
    Dark,
    Light,
}

impl Disc {
    /// Converts the disc to its character representation.
    ///
    /// # Returns
    ///
    /// * `'-'` for `Disc::Empty`
    /// * `'X'` for `Disc::Dark`
    /// * `'O'` for `Disc::Light`
    pub fn to_char(self) -> char {
        match self {
            Disc::Empty => '-',
            Disc::Dark => 'X',
            Disc::Light => 'O',
        }
    }

    /// Parses a disc from its character representation.
    ///
    /// Both `'-'` and `'.'` are accepted for empty cells.
    pub fn from_char(c: char) -> Option<Disc> {
        match c {
            '-' | '.' => Some(Disc::Empty),
            'X' | 'x' | '*' => Some(Disc::Dark),
            'O' | 'o' => Some(Disc::Light),
            _ => None,
        }
    }

    /// Returns the side owning this disc, or `None` for an empty cell.
    pub fn side(self) -> Option<Side> {
        match self {
            Disc::Empty => None,
            Disc::Dark => Some(Side::Dark),
            Disc::Light => Some(Side::Light),
        }
    }

    /// Returns the opposite disc. `Empty` stays `Empty`.
    pub fn opposite(self) -> Disc {
        match self {
            Disc::Dark => Disc::Light,
            Disc::Light => Disc::Dark,
            Disc::Empty => Disc::Empty,
        }
    }
}

/// One of the two players.
///
/// Light moves first from the initial position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    /// The side that makes the first move of a game.
    pub const FIRST: Side = Side::Light;

    /// Returns the other side.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    /// Returns the disc colour played by this side.
    #[inline]
    pub fn disc(self) -> Disc {
        match self {
            Side::Dark => Disc::Dark,
            Side::Light => Disc::Light,
        }
    }

    /// Returns the board character used for this side's discs.
    pub fn to_char(self) -> char {
        self.disc().to_char()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Dark => write!(f, "dark"),
            Side::Light => write!(f, "light"),
        }
    }
}

/// Error returned when a side name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid side '{0}': expected dark/light or X/O")]
pub struct ParseSideError(pub String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" | "black" | "x" => Ok(Side::Dark),
            "light" | "white" | "o" => Ok(Side::Light),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}
