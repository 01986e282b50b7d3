use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::constants::{BOARD_SIZE, BOARD_SQUARES};

/// Represents a square on the board, ranging from A1 to H8.
///
/// Files (columns) are labeled A-H and ranks (rows) 1-8. The engine also uses
/// 1-based `(column, row)` coordinates, so `A1` is `(1, 1)` and `H8` is `(8, 8)`.
///
/// ```text
///   A  B  C  D  E  F  G  H
/// 1 00 01 02 03 04 05 06 07
/// 2 08 09 10 11 12 13 14 15
/// 3 16 17 18 19 20 21 22 23
/// 4 24 25 26 27 28 29 30 31
/// 5 32 33 34 35 36 37 38 39
/// 6 40 41 42 43 44 45 46 47
/// 7 48 49 50 51 52 53 54 55
/// 8 56 57 58 59 60 61 62 63
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
    None,
}

impl Square {
    /// The four corner squares.
    pub const CORNERS: [Square; 4] = [Square::A1, Square::H1, Square::A8, Square::H8];

    /// Returns a bitboard with only this square set.
    #[inline]
    pub fn bitboard(self) -> Bitboard {
        debug_assert!(self != Square::None, "Square::None has no bitboard");
        Bitboard::from_square(self)
    }

    /// Converts the `Square` into a `usize` index (64 for `Square::None`).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a `usize` value into a `Square` without bounds checking.
    ///
    /// Callers guarantee `index <= 64`.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `index` > 64.
    #[inline]
    pub(crate) fn from_usize_unchecked(index: usize) -> Square {
        debug_assert!(
            index <= BOARD_SQUARES,
            "Index out of bounds for Square enum. index: {index:?}"
        );
        // SAFETY: Square is repr(u8) with contiguous discriminants 0..=64.
        unsafe { std::mem::transmute(index as u8) }
    }

    /// Returns the file (0-7, A-H) of this square.
    ///
    /// # Panics
    ///
    /// Panics if called on `Square::None`.
    #[inline]
    pub fn file(self) -> usize {
        assert!(self != Square::None, "Square::file called on Square::None");
        self.index() % BOARD_SIZE
    }

    /// Returns the rank (0-7, 1-8) of this square.
    ///
    /// # Panics
    ///
    /// Panics if called on `Square::None`.
    #[inline]
    pub fn rank(self) -> usize {
        assert!(self != Square::None, "Square::rank called on Square::None");
        self.index() / BOARD_SIZE
    }

    /// Creates a square from 1-based `(column, row)` coordinates.
    ///
    /// # Arguments
    ///
    /// * `column` - Column from 1 (A) to 8 (H).
    /// * `row` - Row from 1 to 8.
    ///
    /// # Returns
    ///
    /// `Some(Square)` when both coordinates are on the board, `None` otherwise.
    pub fn from_coords(column: u8, row: u8) -> Option<Square> {
        if (1..=BOARD_SIZE as u8).contains(&column) && (1..=BOARD_SIZE as u8).contains(&row) {
            Some(Square::from_usize_unchecked(
                (row as usize - 1) * BOARD_SIZE + (column as usize - 1),
            ))
        } else {
            None
        }
    }

    /// Returns the 1-based `(column, row)` coordinates of this square.
    #[inline]
    pub fn coords(self) -> (u8, u8) {
        (self.file() as u8 + 1, self.rank() as u8 + 1)
    }

    /// Returns `true` for A1, H1, A8 and H8.
    #[inline]
    pub fn is_corner(self) -> bool {
        matches!(self, Square::A1 | Square::H1 | Square::A8 | Square::H8)
    }

    /// Returns the corner this square touches, if it is an X or C square.
    ///
    /// X squares are diagonal neighbours of a corner (B2, G2, B7, G7); C squares
    /// are the edge squares next to a corner (B1, A2, G1, H2, A7, B8, H7, G8).
    pub fn danger_kind(self) -> Option<(Square, DangerKind)> {
        use Square::*;
        match self {
            B2 => Some((A1, DangerKind::X)),
            G2 => Some((H1, DangerKind::X)),
            B7 => Some((A8, DangerKind::X)),
            G7 => Some((H8, DangerKind::X)),
            B1 | A2 => Some((A1, DangerKind::C)),
            G1 | H2 => Some((H1, DangerKind::C)),
            A7 | B8 => Some((A8, DangerKind::C)),
            H7 | G8 => Some((H8, DangerKind::C)),
            _ => Option::None,
        }
    }

    /// Returns an iterator over all 64 squares from A1 to H8.
    #[inline]
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..BOARD_SQUARES).map(Square::from_usize_unchecked)
    }
}

/// Kind of square adjacent to a corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DangerKind {
    /// Diagonal neighbour of the corner.
    X,
    /// Edge neighbour of the corner.
    C,
}

// Square::None rather than A1 as the default.
#[allow(clippy::derivable_impls)]
impl Default for Square {
    fn default() -> Self {
        Square::None
    }
}

/// Error type for square parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    #[error("Invalid square format: must be 2 characters (e.g., 'a1')")]
    InvalidFormat,
    #[error("Invalid file '{0}': must be a-h or A-H")]
    InvalidFile(char),
    #[error("Invalid rank '{0}': must be 1-8")]
    InvalidRank(char),
}

impl FromStr for Square {
    type Err = SquareError;

    /// Parses a square in algebraic notation (e.g. "a1", "H8").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(file_char), Some(rank_char), Option::None) =
            (chars.next(), chars.next(), chars.next())
        else {
            return Err(SquareError::InvalidFormat);
        };

        let file = file_char.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(SquareError::InvalidFile(file_char));
        }
        if !('1'..='8').contains(&rank_char) {
            return Err(SquareError::InvalidRank(rank_char));
        }

        let file = file as u8 - b'a';
        let rank = rank_char as u8 - b'1';
        Ok(Square::from_usize_unchecked(
            rank as usize * BOARD_SIZE + file as usize,
        ))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Square::None {
            return write!(f, "None");
        }

        let file = (self.file() as u8 + b'a') as char;
        let rank = (self.rank() as u8 + b'1') as char;
        write!(f, "{file}{rank}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords() {
        assert_eq!(Square::A1.coords(), (1, 1));
        assert_eq!(Square::H1.coords(), (8, 1));
        assert_eq!(Square::A8.coords(), (1, 8));
        assert_eq!(Square::C4.coords(), (3, 4));
        for sq in Square::iter() {
            let (c, r) = sq.coords();
            assert_eq!(Square::from_coords(c, r), Some(sq));
        }
    }

    #[test]
    fn test_from_coords_off_board() {
        assert_eq!(Square::from_coords(0, 0), None);
        assert_eq!(Square::from_coords(9, 1), None);
        assert_eq!(Square::from_coords(1, 9), None);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("a1".parse::<Square>(), Ok(Square::A1));
        assert_eq!("H8".parse::<Square>(), Ok(Square::H8));
        assert_eq!(" d3 ".parse::<Square>(), Ok(Square::D3));
        assert_eq!("i1".parse::<Square>(), Err(SquareError::InvalidFile('i')));
        assert_eq!("a9".parse::<Square>(), Err(SquareError::InvalidRank('9')));
        assert_eq!("a10".parse::<Square>(), Err(SquareError::InvalidFormat));
        assert_eq!(Square::E6.to_string(), "e6");
        assert_eq!(Square::None.to_string(), "None");
    }

    #[test]
    fn test_corners() {
        let corners: Vec<Square> = Square::iter().filter(|sq| sq.is_corner()).collect();
        assert_eq!(corners, vec![Square::A1, Square::H1, Square::A8, Square::H8]);
    }

    #[test]
    fn test_danger_kind() {
        assert_eq!(Square::B2.danger_kind(), Some((Square::A1, DangerKind::X)));
        assert_eq!(Square::G8.danger_kind(), Some((Square::H8, DangerKind::C)));
        assert_eq!(Square::D4.danger_kind(), None);
        let n = Square::iter().filter(|sq| sq.danger_kind().is_some()).count();
        assert_eq!(n, 12);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(Square::default(), Square::None);
    }

    #[test]
    fn test_iter_is_in_index_order() {
        let squares: Vec<Square> = Square::iter().collect();
        assert_eq!(squares.len(), BOARD_SQUARES);
        assert!(!squares.contains(&Square::None));
        for (i, sq) in squares.iter().enumerate() {
            assert_eq!(sq.index(), i);
        }
        assert_eq!(squares[0], Square::A1);
        assert_eq!(squares[63], Square::H8);
    }
}
