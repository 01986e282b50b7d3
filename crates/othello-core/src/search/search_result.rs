//! Search result type.

use std::time::Duration;

use crate::moves::Move;
use crate::types::{Depth, Score};

/// Outcome of one decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Always legal, or `Move::Pass` iff there was no legal move.
    pub best_move: Move,
    /// Exact final disc margin if `is_endgame`, heuristic score otherwise.
    pub score: Score,
    /// Depth of the deepest completed iteration, 0 if none completed.
    pub depth: Depth,
    pub elapsed: Duration,
    pub n_nodes: u64,
    pub is_endgame: bool,
    /// Whether `best_move` comes from a completed search rather than the static fallback.
    pub completed: bool,
}

impl SearchResult {
    /// Result when the side to move has no legal move.
    pub fn new_pass() -> Self {
        Self::new_forced(Move::Pass)
    }

    /// Result of a move chosen without searching because it is the only option.
    pub fn new_forced(best_move: Move) -> Self {
        SearchResult {
            best_move,
            score: 0,
            depth: 0,
            elapsed: Duration::ZERO,
            n_nodes: 0,
            is_endgame: false,
            completed: true,
        }
    }

    /// Result of the static ordering when no iteration completed.
    pub fn new_fallback(best_move: Move) -> Self {
        SearchResult {
            completed: false,
            ..Self::new_forced(best_move)
        }
    }

    /// Nodes searched per second.
    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.n_nodes as f64 / secs) as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn test_constructors() {
        let pass = SearchResult::new_pass();
        assert_eq!(pass.best_move, Move::Pass);
        assert!(pass.completed);

        let fallback = SearchResult::new_fallback(Move::Play(Square::C4));
        assert!(!fallback.completed);
        assert_eq!(fallback.depth, 0);
    }

    #[test]
    fn test_nodes_per_second() {
        let mut result = SearchResult::new_forced(Move::Play(Square::C4));
        assert_eq!(result.nodes_per_second(), 0);
        result.n_nodes = 1000;
        result.elapsed = Duration::from_millis(500);
        assert_eq!(result.nodes_per_second(), 2000);
    }
}
