//! Bitboard operations and types.
//!
//! This module provides a [`Bitboard`] type that represents a 64-square board
//! using a single `u64`, where each bit corresponds to a square (bit 0 = A1, bit 63 = H8).

use crate::square::Square;

/// Bitboard mask representing the four corner squares (A1, H1, A8, H8).
const CORNER_MASK: u64 = 0x8100000000000081;

/// All squares except file A.
const NOT_A_FILE: u64 = 0xfefefefefefefefe;

/// All squares except file H.
const NOT_H_FILE: u64 = 0x7f7f7f7f7f7f7f7f;

/// Newtype wrapper for a 64-bit bitboard (bit 0 = A1, bit 63 = H8).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(pub(crate) u64);

impl Bitboard {
    /// Creates a new bitboard from raw bits.
    ///
    /// # Arguments
    ///
    /// * `bits` - Raw 64-bit value where each bit represents a square.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    /// Returns the raw 64-bit value.
    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Creates a bitboard with a single bit set at the given square.
    #[inline(always)]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1 << sq as u8)
    }

    /// Returns a new bitboard with the bit at the given square set.
    #[inline(always)]
    pub fn set(self, sq: Square) -> Self {
        Bitboard(self.0 | sq.bitboard().0)
    }

    /// Returns a new bitboard with the bit at the given square removed.
    #[inline(always)]
    pub fn remove(self, sq: Square) -> Self {
        Bitboard(self.0 & !sq.bitboard().0)
    }

    /// Checks if the bitboard contains the bit at the given square.
    #[inline(always)]
    pub fn contains(self, sq: Square) -> bool {
        self.0 & sq.bitboard().0 != 0
    }

    /// Checks if the bitboard has no bits set.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of set bits (population count).
    #[inline(always)]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns the square corresponding to the least significant set bit.
    ///
    /// # Returns
    ///
    /// `Some(Square)` for the LSB position, or `None` if the bitboard is empty.
    #[inline(always)]
    pub fn lsb_square(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_usize_unchecked(self.0.trailing_zeros() as usize))
        }
    }

    /// Removes and returns the least significant set bit as a square,
    /// along with the updated bitboard.
    ///
    /// # Panics
    ///
    /// Panics if the bitboard is empty in debug mode.
    #[inline(always)]
    pub fn pop_lsb(self) -> (Square, Self) {
        debug_assert!(!self.is_empty(), "pop_lsb called on empty bitboard");
        let sq = Square::from_usize_unchecked(self.0.trailing_zeros() as usize);
        (sq, Bitboard(self.0 & self.0.wrapping_sub(1)))
    }

    /// Flips the bitboard vertically (rank 1 ↔ rank 8).
    #[inline(always)]
    pub fn flip_vertical(self) -> Self {
        Bitboard(self.0.swap_bytes())
    }

    /// Flips the bitboard horizontally (file A ↔ file H).
    #[inline(always)]
    pub fn flip_horizontal(self) -> Self {
        const MASK1: u64 = 0x5555555555555555;
        const MASK2: u64 = 0x3333333333333333;
        const MASK3: u64 = 0x0f0f0f0f0f0f0f0f;

        let mut b = self.0;
        b = ((b >> 1) & MASK1) | ((b & MASK1) << 1);
        b = ((b >> 2) & MASK2) | ((b & MASK2) << 2);
        b = ((b >> 4) & MASK3) | ((b & MASK3) << 4);
        Bitboard(b)
    }

    /// Rotates the bitboard 180 degrees (A1 ↔ H8).
    #[inline(always)]
    pub fn rotate_180(self) -> Self {
        Bitboard(self.0.reverse_bits())
    }

    /// Returns every square adjacent (including diagonally) to a set square.
    ///
    /// The result may include squares that are themselves set.
    #[inline(always)]
    pub fn adjacent(self) -> Self {
        let b = self.0;
        let horizontal = ((b << 1) & NOT_A_FILE) | ((b >> 1) & NOT_H_FILE);
        let row = b | horizontal;
        Bitboard(horizontal | (row << 8) | (row >> 8))
    }

    /// Checks whether any square adjacent to `sq` is set.
    #[inline(always)]
    pub fn has_adjacent_bit(self, sq: Square) -> bool {
        !(sq.bitboard().adjacent() & self).is_empty()
    }

    /// Returns a new bitboard with only the corner squares (A1, H1, A8, H8).
    #[inline(always)]
    pub const fn corners(self) -> Self {
        Bitboard(self.0 & CORNER_MASK)
    }

    /// Returns an iterator over all set squares in LSB-first (A1..H8) order.
    #[inline(always)]
    pub fn iter(self) -> BitboardIterator {
        BitboardIterator::new(self)
    }

    /// Returns a new bitboard after applying a player's move.
    ///
    /// XORs the current bitboard with both the flipped discs and the placed disc.
    ///
    /// # Arguments
    ///
    /// * `flipped` - Bitboard of opponent discs flipped by this move.
    /// * `sq` - Square where the disc was placed.
    #[inline(always)]
    pub fn apply_move(self, flipped: Bitboard, sq: Square) -> Bitboard {
        self ^ flipped ^ sq.bitboard()
    }

    /// Returns a new bitboard with the flipped discs toggled.
    #[inline(always)]
    pub fn apply_flip(self, flipped: Bitboard) -> Bitboard {
        self ^ flipped
    }

    /// Gets the legal moves for the player owning this bitboard.
    ///
    /// # Arguments
    ///
    /// * `opponent` - The opponent's bitboard.
    ///
    /// # Returns
    ///
    /// A `Bitboard` with bits set for each legal move position.
    #[inline(always)]
    pub fn get_moves(self, opponent: Bitboard) -> Bitboard {
        Bitboard(get_moves(self.0, opponent.0))
    }

    /// Gets the potential moves for the player.
    ///
    /// Potential moves are empty squares adjacent to at least one opponent disc.
    #[inline(always)]
    pub fn get_potential_moves(self, opponent: Bitboard) -> Bitboard {
        opponent.adjacent() & !(self | opponent)
    }
}

/// Shifts every set bit one step in direction `dir` (0-7), dropping bits that
/// would wrap around a file edge.
///
/// Directions: 0 east, 1 west, 2 north, 3 south, 4 north-east, 5 north-west,
/// 6 south-east, 7 south-west.
#[inline(always)]
pub(crate) fn shift(b: u64, dir: usize) -> u64 {
    match dir {
        0 => (b << 1) & NOT_A_FILE,
        1 => (b >> 1) & NOT_H_FILE,
        2 => b << 8,
        3 => b >> 8,
        4 => (b << 9) & NOT_A_FILE,
        5 => (b << 7) & NOT_H_FILE,
        6 => (b >> 7) & NOT_A_FILE,
        _ => (b >> 9) & NOT_H_FILE,
    }
}

/// Gets the legal moves for the player.
///
/// Reference: <https://github.com/abulmo/edax-reversi/blob/14f048c05ddfa385b6bf954a9c2905bbe677e9d3/src/board.c#L822>
#[inline(always)]
fn get_moves(player: u64, opponent: u64) -> u64 {
    let empty = !(player | opponent);
    (get_some_moves(player, opponent & 0x007E7E7E7E7E7E00, 7) & empty)
        | (get_some_moves(player, opponent & 0x007E7E7E7E7E7E00, 9) & empty)
        | (get_some_moves(player, opponent & 0x7E7E7E7E7E7E7E7E, 1) & empty)
        | (get_some_moves(player, opponent & 0x00FFFFFFFFFFFF00, 8) & empty)
}

/// Propagates runs of opponent discs from the player's discs along one axis,
/// in both senses at once.
///
/// # Arguments
///
/// * `b` - The player's bitboard.
/// * `mask` - Opponent discs with the wrap-around edges masked out.
/// * `dir` - The shift distance (1, 7, 8 or 9).
#[inline(always)]
fn get_some_moves(b: u64, mask: u64, dir: u32) -> u64 {
    let mut flip = ((b << dir) | (b >> dir)) & mask;
    flip |= ((flip << dir) | (flip >> dir)) & mask;
    flip |= ((flip << dir) | (flip >> dir)) & mask;
    flip |= ((flip << dir) | (flip >> dir)) & mask;
    flip |= ((flip << dir) | (flip >> dir)) & mask;
    flip |= ((flip << dir) | (flip >> dir)) & mask;
    (flip << dir) | (flip >> dir)
}

impl std::ops::BitAnd for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl std::ops::BitOr for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl std::ops::BitXor for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl std::ops::Not for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl std::ops::BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl std::ops::BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitXorAssign for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl From<u64> for Bitboard {
    #[inline(always)]
    fn from(bits: u64) -> Self {
        Bitboard(bits)
    }
}

impl From<Bitboard> for u64 {
    #[inline(always)]
    fn from(bb: Bitboard) -> Self {
        bb.0
    }
}

impl From<Square> for Bitboard {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        sq.bitboard()
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIterator;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIterator::new(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard(0), |bb, sq| bb.set(sq))
    }
}

impl std::fmt::Display for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = rank * 8 + file;
                if (self.0 >> sq) & 1 != 0 {
                    write!(f, "1")?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// An iterator that yields each set bit position in a bitboard as a `Square`.
pub struct BitboardIterator {
    bitboard: Bitboard,
}

impl BitboardIterator {
    /// Creates a new `BitboardIterator`.
    #[inline(always)]
    pub fn new(bitboard: Bitboard) -> BitboardIterator {
        BitboardIterator { bitboard }
    }
}

impl Iterator for BitboardIterator {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bitboard.is_empty() {
            return None;
        }

        let (square, rest) = self.bitboard.pop_lsb();
        self.bitboard = rest;
        Some(square)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bitboard.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitboardIterator {}
