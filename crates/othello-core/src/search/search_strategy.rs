//! Compile-time specialization of the shared alpha-beta search for the
//! midgame and the exact endgame.

use crate::board::Board;
use crate::search::search_context::SearchContext;
use crate::search::{endgame, midgame};
use crate::stability::stability_cutoff;
use crate::types::{Depth, Score};

/// What differs between a heuristic and an exact search.
pub trait SearchStrategy {
    /// Scores are final disc margins rather than heuristic values.
    const IS_ENDGAME: bool;
    /// NonPV nodes at this depth or below use [`SearchStrategy::shallow_search`].
    const DEPTH_TO_SHALLOW: Depth;

    /// Score of a node at depth 0.
    fn evaluate(ctx: &SearchContext<'_>, board: &Board) -> Score;

    /// Score of a finished game.
    fn terminal_score(board: &Board) -> Score;

    /// Searches a node near the leaves without the transposition table.
    fn shallow_search(ctx: &mut SearchContext<'_>, board: &mut Board, depth: Depth, alpha: Score, beta: Score) -> Score;

    /// Upper bound proving a fail-low from stable discs alone.
    fn stability_cutoff(board: &Board, alpha: Score) -> Option<Score>;
}

/// Depth-limited search scored by the evaluator.
pub struct MidGameStrategy;

impl SearchStrategy for MidGameStrategy {
    const IS_ENDGAME: bool = false;
    const DEPTH_TO_SHALLOW: Depth = 0;

    #[inline]
    fn evaluate(ctx: &SearchContext<'_>, board: &Board) -> Score {
        midgame::evaluate(ctx, board)
    }

    #[inline]
    fn terminal_score(board: &Board) -> Score {
        crate::eval::terminal_score(board)
    }

    #[inline]
    fn shallow_search(ctx: &mut SearchContext<'_>, board: &mut Board, _depth: Depth, _alpha: Score, _beta: Score) -> Score {
        midgame::evaluate(ctx, board)
    }

    #[inline]
    fn stability_cutoff(_board: &Board, _alpha: Score) -> Option<Score> {
        None
    }
}

/// Search to the end of the game scored by the final disc margin.
pub struct EndGameStrategy;

impl SearchStrategy for EndGameStrategy {
    const IS_ENDGAME: bool = true;
    const DEPTH_TO_SHALLOW: Depth = 5;

    #[inline]
    fn evaluate(_ctx: &SearchContext<'_>, board: &Board) -> Score {
        board.final_score()
    }

    #[inline]
    fn terminal_score(board: &Board) -> Score {
        board.final_score()
    }

    #[inline]
    fn shallow_search(ctx: &mut SearchContext<'_>, board: &mut Board, _depth: Depth, alpha: Score, beta: Score) -> Score {
        endgame::shallow_search(ctx, board, alpha, beta)
    }

    #[inline]
    fn stability_cutoff(board: &Board, alpha: Score) -> Option<Score> {
        stability_cutoff(board, alpha)
    }
}
