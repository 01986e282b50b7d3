//! Exact endgame search.
//!
//! Scores are final disc margins from the side to move's point of view, so
//! the score of a completed solve is the game-theoretic result.

use tracing::{debug, trace};

use crate::board::Board;
use crate::constants::SCORE_INF;
use crate::flip;
use crate::search::root_move::RootMove;
use crate::search::search_context::SearchContext;
use crate::search::search_root;
use crate::search::search_strategy::EndGameStrategy;
use crate::types::Score;

/// Solves the root position to the end of the game.
///
/// # Arguments
///
/// * `ctx` - Search context.
/// * `board` - Root position; it has at least one legal move.
///
/// # Returns
///
/// The best move and its exact margin, `None` if the solve was interrupted.
pub fn solve(ctx: &mut SearchContext<'_>, board: &mut Board) -> Option<RootMove> {
    let n_empties = board.get_empty_count();
    let result = search_root::<EndGameStrategy>(ctx, board, n_empties);
    match result {
        Some(root_move) => debug!(
            n_empties,
            score = root_move.score,
            best_move = %root_move.sq,
            nodes = ctx.n_nodes,
            elapsed_ms = ctx.elapsed().as_millis() as u64,
            "endgame solved"
        ),
        None => trace!(n_empties, nodes = ctx.n_nodes, "endgame solve aborted"),
    }
    result
}

/// Alpha-beta to the end of the game without the transposition table or
/// move sorting, for the last few empty squares.
///
/// Corners are tried first, then the remaining moves in square order.
///
/// # Arguments
///
/// * `ctx` - Search context.
/// * `board` - Current position.
/// * `alpha` - Alpha bound.
/// * `beta` - Beta bound.
///
/// # Returns
///
/// Exact margin if it lies inside `(alpha, beta)`, otherwise a bound on the failing side.
pub fn shallow_search(ctx: &mut SearchContext<'_>, board: &mut Board, mut alpha: Score, beta: Score) -> Score {
    let moves = board.get_moves();
    if moves.is_empty() {
        if board.switch_players().has_legal_moves() {
            ctx.update_pass(board);
            let score = -shallow_search(ctx, board, -beta, -alpha);
            ctx.undo_pass(board);
            return score;
        }
        return board.final_score();
    }

    let mut best_score = -SCORE_INF;
    let corners = moves.corners();
    for sq in corners.iter().chain((moves ^ corners).iter()) {
        let flipped = flip::flip(sq, board.player, board.opponent);
        ctx.increment_nodes();
        board.play(flipped, sq);
        let score = -shallow_search(ctx, board, -beta, -alpha);
        board.undo(flipped, sq);

        if score > best_score {
            best_score = score;
            if score >= beta {
                break;
            }
            if score > alpha {
                alpha = score;
            }
        }
    }
    best_score
}
