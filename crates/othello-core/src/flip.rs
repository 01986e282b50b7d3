//! Disc flip calculation for move execution.

use crate::bitboard::{Bitboard, shift};
use crate::square::Square;

/// Calculates which opponent discs would be flipped by placing a disc at the given square.
///
/// Every one of the eight directions is resolved independently: a maximal run
/// of opponent discs starting next to `sq` is flipped when it is closed by one
/// of the player's discs.
///
/// # Arguments
///
/// * `sq` - The square where the disc is being placed
/// * `p` - Bitboard representing the current player's discs
/// * `o` - Bitboard representing the opponent's discs
///
/// # Returns
///
/// A bitboard representing all opponent discs that would be flipped by this move.
/// Returns an empty bitboard if no discs would be flipped (invalid move).
#[inline]
pub fn flip(sq: Square, p: Bitboard, o: Bitboard) -> Bitboard {
    let (p, o) = (p.bits(), o.bits());
    let origin = sq.bitboard().bits();
    let mut flipped = 0u64;

    for dir in 0..8 {
        let mut run = 0u64;
        let mut cur = shift(origin, dir);
        while cur & o != 0 {
            run |= cur;
            cur = shift(cur, dir);
        }
        if cur & p != 0 {
            flipped |= run;
        }
    }

    Bitboard::new(flipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_initial_position() {
        let p = Square::D5.bitboard() | Square::E4.bitboard();
        let o = Square::D4.bitboard() | Square::E5.bitboard();
        assert_eq!(flip(Square::C4, p, o), Square::D4.bitboard());
        assert_eq!(flip(Square::D3, p, o), Square::D4.bitboard());
        assert_eq!(flip(Square::E6, p, o), Square::E5.bitboard());
        assert_eq!(flip(Square::F5, p, o), Square::E5.bitboard());
        assert!(flip(Square::A1, p, o).is_empty());
    }

    #[test]
    fn test_flip_multiple_directions() {
        // C3 closes rays towards A1, C1 and A3.
        let p = Square::A1.bitboard() | Square::C1.bitboard() | Square::A3.bitboard();
        let o = Square::B2.bitboard() | Square::C2.bitboard() | Square::B3.bitboard();
        let flipped = flip(Square::C3, p, o);
        assert_eq!(flipped, o);
    }

    #[test]
    fn test_flip_requires_closing_disc() {
        // Run of opponent discs reaching the edge is not flipped.
        let p = Square::A1.bitboard();
        let o = Square::F1.bitboard() | Square::G1.bitboard() | Square::H1.bitboard();
        assert!(flip(Square::E1, p, o).is_empty());
    }

    #[test]
    fn test_flip_stops_at_gap() {
        let p = Square::A4.bitboard();
        let o = Square::B4.bitboard() | Square::D4.bitboard();
        // Gap on C4 so playing E4 does not reach A4.
        assert!(flip(Square::E4, p, o).is_empty());
        assert_eq!(flip(Square::C4, p, o), Square::B4.bitboard());
    }

    #[test]
    fn test_flip_does_not_wrap() {
        // H3 -> A4 would be adjacent in bit order.
        let p = Square::B4.bitboard();
        let o = Square::A4.bitboard();
        assert!(flip(Square::H3, p, o).is_empty());
    }
}
