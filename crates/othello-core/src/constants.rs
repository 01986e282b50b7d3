//! Global constants

use crate::types::Score;

/// Number of squares on the Reversi board.
pub const BOARD_SQUARES: usize = 64;

/// Number of squares along one side of the board.
pub const BOARD_SIZE: usize = 8;

/// Maximum number of plies stored in the search stack.
pub const MAX_PLY: usize = 64;

/// Maximum possible final disc margin.
pub const SCORE_MAX: Score = 64;

/// Minimum possible final disc margin.
pub const SCORE_MIN: Score = -64;

/// Infinity score for search windows. Larger than any evaluation.
pub const SCORE_INF: Score = 10_000_000;

/// Base score of a finished game that the player to move has won.
pub const WIN_SCORE: Score = 1_000_000;

/// Multiplier applied to the final margin on top of [`WIN_SCORE`].
pub const WIN_MARGIN_SCALE: Score = 100;

/// Bound on the magnitude of any heuristic (non-terminal) score.
///
/// Always below `WIN_SCORE`, so a proven win outranks every heuristic.
pub const HEURISTIC_LIMIT: Score = 500_000;
