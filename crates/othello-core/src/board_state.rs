//! Absolute board state: discs by colour rather than by side to move.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::constants::BOARD_SQUARES;
use crate::disc::{Disc, Side};
use crate::square::Square;

/// The authoritative board handed between a game driver and the engine.
///
/// `dark` and `light` never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub dark: Bitboard,
    pub light: Bitboard,
}

/// Error returned when a board string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("board string must contain 64 cells, found {0}")]
    InvalidLength(usize),
    #[error("invalid character '{ch}' at {square}")]
    InvalidCharacter { ch: char, square: Square },
}

impl Default for BoardState {
    /// The starting position: Light on D4 and E5, Dark on D5 and E4.
    fn default() -> Self {
        BoardState {
            dark: Square::D5.bitboard() | Square::E4.bitboard(),
            light: Square::D4.bitboard() | Square::E5.bitboard(),
        }
    }
}

impl BoardState {
    /// Creates the starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from colour bitboards.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the bitboards overlap.
    pub fn from_bitboards(dark: impl Into<Bitboard>, light: impl Into<Bitboard>) -> Self {
        let (dark, light) = (dark.into(), light.into());
        debug_assert!((dark & light).is_empty(), "dark and light overlap");
        BoardState { dark, light }
    }

    /// Returns the discs of `side`.
    #[inline]
    pub fn discs(&self, side: Side) -> Bitboard {
        match side {
            Side::Dark => self.dark,
            Side::Light => self.light,
        }
    }

    /// Returns the content of a square.
    pub fn get(&self, sq: Square) -> Disc {
        if self.dark.contains(sq) {
            Disc::Dark
        } else if self.light.contains(sq) {
            Disc::Light
        } else {
            Disc::Empty
        }
    }

    /// Returns the number of discs of `side`.
    #[inline]
    pub fn count(&self, side: Side) -> u32 {
        self.discs(side).count()
    }

    /// Returns the empty squares.
    #[inline]
    pub fn empty(&self) -> Bitboard {
        !(self.dark | self.light)
    }

    /// Returns the number of empty squares.
    #[inline]
    pub fn empty_count(&self) -> u32 {
        self.empty().count()
    }

    /// Converts to a side-relative board with `side` to move.
    #[inline]
    pub fn to_relative(&self, side: Side) -> Board {
        Board::from_bitboards(self.discs(side), self.discs(side.opposite()))
    }

    /// Converts a side-relative board back, given the side the player bitboard belongs to.
    #[inline]
    pub fn from_relative(board: &Board, side: Side) -> Self {
        match side {
            Side::Dark => BoardState {
                dark: board.player,
                light: board.opponent,
            },
            Side::Light => BoardState {
                dark: board.opponent,
                light: board.player,
            },
        }
    }

    /// Rotates the board 180 degrees.
    pub fn rotate_180(&self) -> Self {
        BoardState {
            dark: self.dark.rotate_180(),
            light: self.light.rotate_180(),
        }
    }

    /// Exchanges the colour of every disc.
    pub fn swap_colors(&self) -> Self {
        BoardState {
            dark: self.light,
            light: self.dark,
        }
    }

    /// Returns the board as a single 64-character line, A1..H8.
    pub fn to_compact_string(&self) -> String {
        Square::iter().map(|sq| self.get(sq).to_char()).collect()
    }
}

impl FromStr for BoardState {
    type Err = ParseBoardError;

    /// Parses 64 cells in A1..H8 order. Whitespace is ignored; `X`/`*` are
    /// Dark, `O` is Light and `-`/`.` are empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != BOARD_SQUARES {
            return Err(ParseBoardError::InvalidLength(cells.len()));
        }

        let mut state = BoardState {
            dark: Bitboard::new(0),
            light: Bitboard::new(0),
        };
        for (sq, ch) in Square::iter().zip(cells) {
            match Disc::from_char(ch) {
                Some(Disc::Dark) => state.dark = state.dark.set(sq),
                Some(Disc::Light) => state.light = state.light.set(sq),
                Some(Disc::Empty) => {}
                None => return Err(ParseBoardError::InvalidCharacter { ch, square: sq }),
            }
        }
        Ok(state)
    }
}

impl fmt::Display for BoardState {
    /// Renders an 8×8 grid with column letters and row numbers, row 1 on top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in 0..8 {
            write!(f, "{}", rank + 1)?;
            for file in 0..8 {
                let sq = Square::from_usize_unchecked(rank * 8 + file);
                write!(f, " {}", self.get(sq).to_char())?;
            }
            writeln!(f, " {}", rank + 1)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
