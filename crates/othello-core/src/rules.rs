//! Game rules on the absolute [`BoardState`].
//!
//! These functions are the authoritative referee: they validate every move
//! and fail loudly on misuse, unlike the search which works on the unchecked
//! relative [`Board`](crate::board::Board).

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::board_state::BoardState;
use crate::disc::Side;
use crate::flip;
use crate::moves::Move;
use crate::square::Square;
use crate::types::Score;

/// Error returned when a move cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMoveError {
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("playing {0} flips no disc")]
    NoFlips(Square),
    #[error("cannot pass while legal moves are available")]
    PassWithLegalMoves,
    #[error("move does not name a board square")]
    InvalidSquare,
}

/// A move that was played, with what is needed to take it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub side: Side,
    pub mv: Move,
    pub flipped: Bitboard,
}

impl MoveRecord {
    /// Returns the `(column, row)` coordinates of every flipped disc, A1..H8.
    pub fn flipped_squares(&self) -> Vec<(u8, u8)> {
        self.flipped.iter().map(Square::coords).collect()
    }

    /// Returns the square the disc was placed on, or `None` for a pass.
    pub fn placed(&self) -> Option<Square> {
        self.mv.square()
    }
}

/// Returns the starting position.
pub fn initial_board() -> BoardState {
    BoardState::new()
}

/// Returns the legal target squares of `side` as a bitboard.
#[inline]
pub fn legal_move_mask(side: Side, board: &BoardState) -> Bitboard {
    board
        .discs(side)
        .get_moves(board.discs(side.opposite()))
}

/// Returns every legal move of `side`, A1..H8.
///
/// An empty list means `side` has to pass.
pub fn legal_moves(side: Side, board: &BoardState) -> Vec<Move> {
    legal_move_mask(side, board).iter().map(Move::Play).collect()
}

/// Checks whether `mv` is legal for `side`. A pass is legal only without any
/// other legal move.
pub fn is_legal(side: Side, board: &BoardState, mv: Move) -> bool {
    match mv {
        Move::Pass => legal_move_mask(side, board).is_empty(),
        Move::Play(Square::None) => false,
        Move::Play(sq) => legal_move_mask(side, board).contains(sq),
    }
}

/// Validates `mv` and computes the discs it flips.
fn flips_for(side: Side, board: &BoardState, mv: Move) -> Result<Bitboard, IllegalMoveError> {
    match mv {
        Move::Pass => {
            if legal_move_mask(side, board).is_empty() {
                Ok(Bitboard::new(0))
            } else {
                Err(IllegalMoveError::PassWithLegalMoves)
            }
        }
        Move::Play(Square::None) => Err(IllegalMoveError::InvalidSquare),
        Move::Play(sq) => {
            if !board.empty().contains(sq) {
                return Err(IllegalMoveError::Occupied(sq));
            }
            let flipped = flip::flip(sq, board.discs(side), board.discs(side.opposite()));
            if flipped.is_empty() {
                return Err(IllegalMoveError::NoFlips(sq));
            }
            Ok(flipped)
        }
    }
}

/// Toggles a validated move onto the board. Applying it twice restores the board.
fn toggle(side: Side, board: &mut BoardState, sq: Square, flipped: Bitboard) {
    let placed = sq.bitboard();
    match side {
        Side::Dark => {
            board.dark ^= flipped | placed;
            board.light ^= flipped;
        }
        Side::Light => {
            board.light ^= flipped | placed;
            board.dark ^= flipped;
        }
    }
}

/// Plays `mv` for `side` on a copy of `board`.
///
/// The disc is placed and every bracketed opposite disc is flipped in all
/// eight directions at once. A legal pass returns the board unchanged.
///
/// # Errors
///
/// Returns an [`IllegalMoveError`] if the move is not legal for `side`.
pub fn apply_move(side: Side, board: &BoardState, mv: Move) -> Result<BoardState, IllegalMoveError> {
    let mut next = *board;
    make_move(side, &mut next, mv)?;
    Ok(next)
}

/// Plays `mv` for `side` in place.
///
/// # Returns
///
/// The record to hand to [`undo_move`].
///
/// # Errors
///
/// Returns an [`IllegalMoveError`] and leaves `board` untouched if the move is
/// not legal for `side`.
pub fn make_move(side: Side, board: &mut BoardState, mv: Move) -> Result<MoveRecord, IllegalMoveError> {
    let flipped = flips_for(side, board, mv)?;
    if let Move::Play(sq) = mv {
        toggle(side, board, sq, flipped);
    }
    Ok(MoveRecord { side, mv, flipped })
}

/// Takes back a move made with [`make_move`]. The board is restored exactly.
pub fn undo_move(board: &mut BoardState, record: &MoveRecord) {
    if let Move::Play(sq) = record.mv {
        toggle(record.side, board, sq, record.flipped);
    }
}

/// Checks whether neither side has a legal move.
pub fn is_terminal(board: &BoardState) -> bool {
    legal_move_mask(Side::Dark, board).is_empty() && legal_move_mask(Side::Light, board).is_empty()
}

/// Returns the disc counts as `(light, dark)`.
pub fn score(board: &BoardState) -> (u32, u32) {
    (board.count(Side::Light), board.count(Side::Dark))
}

/// Returns the final disc margin for `side`, with empty squares awarded to the
/// side ahead.
pub fn final_margin(side: Side, board: &BoardState) -> Score {
    board.to_relative(side).final_score()
}
