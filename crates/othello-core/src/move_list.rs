//! Legal move generation with ordering values for the search.

use std::slice;

use arrayvec::ArrayVec;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::flip;
use crate::ordering::OrderingHeuristic;
use crate::square::Square;

/// Maximum number of moves possible in a Reversi position.
const MAX_MOVES: usize = 34;

/// A legal move with its flips and ordering value.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoredMove {
    /// The square where the disc is placed.
    pub sq: Square,
    /// Opponent discs flipped by this move.
    pub flipped: Bitboard,
    /// Ordering value (higher = tried earlier).
    pub value: i32,
}

impl ScoredMove {
    /// Creates a move with a zero ordering value.
    #[inline]
    pub fn new(sq: Square, flipped: Bitboard) -> ScoredMove {
        debug_assert!(sq != Square::None, "ScoredMove cannot have Square::None");
        debug_assert!(!flipped.is_empty(), "ScoredMove must flip at least one disc");
        ScoredMove {
            sq,
            flipped,
            value: 0,
        }
    }
}

/// All legal moves of a position, in A1..H8 order until sorted.
#[derive(Clone, Debug)]
pub struct MoveList {
    moves: ArrayVec<ScoredMove, MAX_MOVES>,
}

impl MoveList {
    /// Generates all legal moves for the side to move.
    #[inline]
    pub fn new(board: &Board) -> MoveList {
        Self::with_moves(board, board.get_moves())
    }

    /// Creates a move list from a precomputed legal-move bitboard.
    ///
    /// # Arguments
    ///
    /// * `board` - Current position.
    /// * `moves_bb` - Legal moves, as returned by `board.get_moves()`.
    #[inline]
    pub fn with_moves(board: &Board, moves_bb: Bitboard) -> MoveList {
        let moves = moves_bb
            .iter()
            .map(|sq| ScoredMove::new(sq, flip::flip(sq, board.player, board.opponent)))
            .collect();
        MoveList { moves }
    }

    /// Returns the number of legal moves.
    #[inline]
    pub fn count(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if there is no legal move.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the first move, which is the best one once sorted.
    #[inline]
    pub fn first(&self) -> Option<&ScoredMove> {
        self.moves.first()
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, ScoredMove> {
        self.moves.iter()
    }

    /// Returns a mutable iterator over the moves.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, ScoredMove> {
        self.moves.iter_mut()
    }

    /// Sets every move's value to its static priority.
    pub fn evaluate_moves<O: OrderingHeuristic + ?Sized>(&mut self, board: &Board, ordering: &O) {
        for mv in self.moves.iter_mut() {
            mv.value = ordering.priority(board, mv.sq, mv.flipped);
        }
    }

    /// Sorts the moves by descending value. Equal values keep their order.
    #[inline]
    pub fn sort(&mut self) {
        self.moves.sort_by(|a, b| b.value.cmp(&a.value));
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a ScoredMove;
    type IntoIter = slice::Iter<'a, ScoredMove>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::{CornerFirstOrdering, FlipCountOrdering};

    #[test]
    fn test_move_list_new() {
        let board = Board::new();
        let list = MoveList::new(&board);
        assert_eq!(list.count(), 4);
        let squares: Vec<Square> = list.iter().map(|m| m.sq).collect();
        assert_eq!(squares, vec![Square::E3, Square::F4, Square::C5, Square::D6]);
        for mv in &list {
            assert_eq!(mv.flipped.count(), 1);
        }
    }

    #[test]
    fn test_move_list_no_moves() {
        let board = Board::from_bitboards(Square::A1.bitboard(), Square::H8.bitboard());
        let list = MoveList::new(&board);
        assert!(list.is_empty());
        assert!(list.first().is_none());
    }

    #[test]
    fn test_sort_is_stable() {
        let board = Board::new();
        let mut list = MoveList::new(&board);
        list.evaluate_moves(&board, &FlipCountOrdering);
        list.sort();
        // All four moves flip one disc: original order is kept.
        let squares: Vec<Square> = list.iter().map(|m| m.sq).collect();
        assert_eq!(squares, vec![Square::E3, Square::F4, Square::C5, Square::D6]);
    }

    #[test]
    fn test_sort_descending() {
        // Player can take the A1 corner or play next to the open H8 corner.
        let board = Board::from_bitboards(
            Square::C3.bitboard() | Square::E5.bitboard(),
            Square::B2.bitboard() | Square::F6.bitboard(),
        );
        let mut list = MoveList::new(&board);
        list.evaluate_moves(&board, &CornerFirstOrdering::default());
        list.sort();
        let squares: Vec<Square> = list.iter().map(|m| m.sq).collect();
        assert_eq!(squares, vec![Square::A1, Square::G7]);
        assert!(list.iter().zip(list.iter().skip(1)).all(|(a, b)| a.value >= b.value));
    }
}
