//! Static evaluation of positions.
//!
//! An [`Evaluator`] scores a side-relative [`Board`] for the side to move.
//! Finished games get [`terminal_score`], which dominates every heuristic
//! value so a forced win is always preferred to a good-looking position.

mod weights;

use std::sync::Arc;

pub use weights::{EvalWeights, POSITION_WEIGHTS, PhaseScale};

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::board_state::BoardState;
use crate::constants::{HEURISTIC_LIMIT, WIN_MARGIN_SCALE, WIN_SCORE};
use crate::disc::Side;
use crate::stability::get_stable_discs;
use crate::types::Score;

/// Scores positions for the side to move. Higher is better.
///
/// Implementations must be pure: the same board always gets the same score.
pub trait Evaluator {
    /// Scores a side-relative board for its side to move.
    fn evaluate(&self, board: &Board) -> Score;

    /// Scores an absolute board for `side`.
    fn evaluate_side(&self, side: Side, board: &BoardState) -> Score {
        self.evaluate(&board.to_relative(side))
    }
}

/// Score of a finished game for the side to move.
///
/// A win is worth `WIN_SCORE` plus `WIN_MARGIN_SCALE` per disc of margin, a
/// loss the negation, a draw 0.
#[inline]
pub fn terminal_score(board: &Board) -> Score {
    let margin = board.final_score();
    match margin {
        m if m > 0 => WIN_SCORE + WIN_MARGIN_SCALE * m,
        m if m < 0 => -WIN_SCORE + WIN_MARGIN_SCALE * m,
        _ => 0,
    }
}

/// The default heuristic: positional table, mobility, corners, stability,
/// frontier and material, with phase-dependent scaling.
#[derive(Debug, Clone, Default)]
pub struct WeightedEvaluator {
    weights: Arc<EvalWeights>,
}

impl WeightedEvaluator {
    /// Creates an evaluator sharing the given weights.
    pub fn new(weights: Arc<EvalWeights>) -> Self {
        WeightedEvaluator { weights }
    }

    /// Returns the weights in use.
    pub fn weights(&self) -> &Arc<EvalWeights> {
        &self.weights
    }

    fn table_sum(&self, discs: Bitboard) -> Score {
        discs.iter().map(|sq| self.weights.square_weight(sq)).sum()
    }

    /// Evaluates a position known not to be over.
    fn heuristic(&self, board: &Board, player_moves: Bitboard, opponent_moves: Bitboard) -> Score {
        let w = &*self.weights;
        let scale = w.phase_scale(board.get_empty_count());
        let (p, o) = (board.player, board.opponent);

        let positional = (self.table_sum(p) - self.table_sum(o)) * w.positional * scale.positional / 100;
        let mobility = (player_moves.count() as Score - opponent_moves.count() as Score)
            * w.mobility
            * scale.mobility
            / 100;
        let corner = (p.corners().count() as Score - o.corners().count() as Score) * w.corner;
        let stability = (get_stable_discs(p, o).count() as Score
            - get_stable_discs(o, p).count() as Score)
            * w.stability;

        let empty_neighbours = board.get_empty().adjacent();
        let frontier = ((o & empty_neighbours).count() as Score
            - (p & empty_neighbours).count() as Score)
            * w.frontier;
        let parity = (p.count() as Score - o.count() as Score) * w.parity * scale.parity / 100;

        (positional + mobility + corner + stability + frontier + parity)
            .clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT)
    }
}

impl Evaluator for WeightedEvaluator {
    fn evaluate(&self, board: &Board) -> Score {
        let player_moves = board.get_moves();
        let opponent_moves = board.switch_players().get_moves();
        if player_moves.is_empty() && opponent_moves.is_empty() {
            return terminal_score(board);
        }
        self.heuristic(board, player_moves, opponent_moves)
    }
}

/// Material only: disc difference, or the terminal score once the game is over.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscCountEvaluator;

impl Evaluator for DiscCountEvaluator {
    fn evaluate(&self, board: &Board) -> Score {
        if board.is_game_over() {
            return terminal_score(board);
        }
        board.get_player_count() as Score - board.get_opponent_count() as Score
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Arc<E> {
    fn evaluate(&self, board: &Board) -> Score {
        (**self).evaluate(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn test_initial_position_is_balanced() {
        let eval = WeightedEvaluator::default();
        let board = Board::new();
        assert_eq!(eval.evaluate(&board), 0);
        assert_eq!(eval.evaluate(&board.switch_players()), 0);
        assert_eq!(DiscCountEvaluator.evaluate(&board), 0);
    }

    #[test]
    fn test_evaluation_is_pure() {
        let eval = WeightedEvaluator::default();
        let board = Board::new().make_move(Square::E3);
        assert_eq!(eval.evaluate(&board), eval.evaluate(&board));
    }

    #[test]
    fn test_corner_is_valued() {
        let eval = WeightedEvaluator::default();
        let board = Board::from_bitboards(
            Square::A1.bitboard() | Square::D4.bitboard(),
            Square::D5.bitboard() | Square::E5.bitboard() | Square::E4.bitboard(),
        );
        assert!(eval.evaluate(&board) > 0);
        assert!(eval.evaluate(&board.switch_players()) < 0);
    }

    #[test]
    fn test_terminal_score() {
        let win = Board::from_bitboards(0xffff_ffff_ffff_0000u64, 0x0000_0000_0000_ffffu64);
        assert_eq!(terminal_score(&win), WIN_SCORE + WIN_MARGIN_SCALE * 32);
        assert_eq!(terminal_score(&win.switch_players()), -WIN_SCORE - WIN_MARGIN_SCALE * 32);

        let draw = Board::from_bitboards(0xffff_ffff_0000_0000u64, 0x0000_0000_ffff_ffffu64);
        assert_eq!(terminal_score(&draw), 0);
    }

    #[test]
    fn test_terminal_dominates_heuristic() {
        let eval = WeightedEvaluator::default();
        // A one-disc win beats every clamped heuristic value.
        let narrow_win = Board::from_bitboards(Square::A1.bitboard() | Square::B1.bitboard(), Square::H8.bitboard());
        assert!(narrow_win.is_game_over());
        assert!(eval.evaluate(&narrow_win) > HEURISTIC_LIMIT);
        assert!(eval.evaluate(&narrow_win.switch_players()) < -HEURISTIC_LIMIT);
    }

    #[test]
    fn test_evaluate_side_matches_relative() {
        let eval = WeightedEvaluator::default();
        let state = BoardState::new();
        assert_eq!(
            eval.evaluate_side(Side::Dark, &state),
            eval.evaluate(&state.to_relative(Side::Dark))
        );
    }

    #[test]
    fn test_custom_weights() {
        let weights = EvalWeights {
            mobility: 0,
            ..EvalWeights::default()
        };
        let eval = WeightedEvaluator::new(Arc::new(weights));
        assert_eq!(eval.weights().mobility, 0);
    }
}
