//! Static move ordering heuristics.
//!
//! An [`OrderingHeuristic`] gives every legal move a priority; the search
//! tries moves from highest to lowest. The search adds its own dynamic
//! bonuses (transposition table move, killers, history) on top.

use std::sync::Arc;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::eval::EvalWeights;
use crate::square::{DangerKind, Square};

/// Base priority of a corner move.
pub const CORNER_PRIORITY: i32 = 1_000_000;

/// Base priority of an X or C square next to an empty corner.
pub const DANGER_PRIORITY: i32 = -100_000;

/// Extra penalty for an X square next to an empty corner.
pub const X_SQUARE_PENALTY: i32 = 25_000;

/// Extra penalty for a C square next to an empty corner.
pub const C_SQUARE_PENALTY: i32 = 15_000;

/// Band a move falls in under [`CornerFirstOrdering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveClass {
    Corner,
    /// X or C square whose corner is still empty.
    Danger(DangerKind),
    Ordinary,
}

/// Classifies a move on `board`.
///
/// X and C squares only count as dangerous while their corner is empty.
#[inline]
pub fn classify(board: &Board, sq: Square) -> MoveClass {
    if sq.is_corner() {
        return MoveClass::Corner;
    }
    match sq.danger_kind() {
        Some((corner, kind)) if board.is_square_empty(corner) => MoveClass::Danger(kind),
        _ => MoveClass::Ordinary,
    }
}

/// Assigns a static priority to a legal move.
pub trait OrderingHeuristic {
    /// Returns the priority of playing `sq`, which flips `flipped`. Higher is tried first.
    fn priority(&self, board: &Board, sq: Square, flipped: Bitboard) -> i32;
}

/// Corners first, X/C squares next to an open corner last, everything else by
/// square weight plus the number of flipped discs.
#[derive(Debug, Clone, Default)]
pub struct CornerFirstOrdering {
    weights: Arc<EvalWeights>,
}

impl CornerFirstOrdering {
    /// Creates the ordering with the given square weights.
    pub fn new(weights: Arc<EvalWeights>) -> Self {
        CornerFirstOrdering { weights }
    }
}

impl OrderingHeuristic for CornerFirstOrdering {
    fn priority(&self, board: &Board, sq: Square, flipped: Bitboard) -> i32 {
        let weight = self.weights.square_weight(sq);
        match classify(board, sq) {
            MoveClass::Corner => CORNER_PRIORITY + weight,
            MoveClass::Danger(DangerKind::X) => DANGER_PRIORITY + weight - X_SQUARE_PENALTY,
            MoveClass::Danger(DangerKind::C) => DANGER_PRIORITY + weight - C_SQUARE_PENALTY,
            MoveClass::Ordinary => weight + flipped.count() as i32,
        }
    }
}

/// Orders by number of flipped discs only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipCountOrdering;

impl OrderingHeuristic for FlipCountOrdering {
    fn priority(&self, _board: &Board, _sq: Square, flipped: Bitboard) -> i32 {
        flipped.count() as i32
    }
}
