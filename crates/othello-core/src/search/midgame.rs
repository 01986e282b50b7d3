//! Midgame search: iterative deepening with heuristic leaves.

use tracing::{debug, trace};

use crate::board::Board;
use crate::constants::{HEURISTIC_LIMIT, SCORE_INF, WIN_SCORE};
use crate::search::root_move::RootMove;
use crate::search::search_context::SearchContext;
use crate::search::search_root;
use crate::search::search_strategy::MidGameStrategy;
use crate::types::{Depth, Score};

/// Iterative deepening from depth 1 to `max_depth`.
///
/// An iteration interrupted by the clock is discarded.
///
/// # Arguments
///
/// * `ctx` - Search context.
/// * `board` - Root position; it has at least one legal move.
/// * `max_depth` - Deepest iteration to run.
///
/// # Returns
///
/// The result of the deepest completed iteration, `None` if even depth 1 was interrupted.
pub fn search_iterative(ctx: &mut SearchContext<'_>, board: &mut Board, max_depth: Depth) -> Option<RootMove> {
    search_iterative_within(ctx, board, max_depth, 1.0)
}

/// Iterative deepening that stops starting iterations once `budget_ratio`
/// of the soft time budget is spent.
pub fn search_iterative_within(
    ctx: &mut SearchContext<'_>,
    board: &mut Board,
    max_depth: Depth,
    budget_ratio: f64,
) -> Option<RootMove> {
    let mut best = None;
    for depth in 1..=max_depth {
        match search_root::<MidGameStrategy>(ctx, board, depth) {
            Some(root_move) => {
                debug!(
                    depth,
                    score = root_move.score,
                    best_move = %root_move.sq,
                    nodes = ctx.n_nodes,
                    elapsed_ms = ctx.elapsed().as_millis() as u64,
                    "iteration completed"
                );
                best = Some(root_move);
            }
            None => {
                trace!(depth, nodes = ctx.n_nodes, "iteration aborted");
                break;
            }
        }

        if !ctx.should_start_iteration_within(depth, budget_ratio) {
            break;
        }
    }
    best
}

/// Evaluates a leaf for the side to move.
///
/// Heuristic values are clamped to `±HEURISTIC_LIMIT`; terminal scores pass
/// through so a forced win keeps dominating.
///
/// # Arguments
///
/// * `ctx` - Search context.
/// * `board` - Current board position.
///
/// # Returns
///
/// Position score.
#[inline(always)]
pub fn evaluate(ctx: &SearchContext<'_>, board: &Board) -> Score {
    let score = ctx.evaluate(board);
    if score.abs() < WIN_SCORE {
        score.clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT)
    } else {
        score.clamp(-SCORE_INF + 1, SCORE_INF - 1)
    }
}
