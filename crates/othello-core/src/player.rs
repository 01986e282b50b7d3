//! Move providers: anything that can pick a move for a side.

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{RngExt, SeedableRng};

use crate::board_state::BoardState;
use crate::disc::Side;
use crate::moves::Move;
use crate::rules;

/// Picks a move for `side` on `board`.
///
/// Implementations must return a legal move, or `Move::Pass` iff `side` has
/// no legal move, and must not modify `board`.
pub trait MoveProvider {
    fn decide(&mut self, side: Side, board: &BoardState) -> Move;
}

/// Plays a uniformly random legal move.
#[derive(Debug)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    /// Creates a player seeded from the thread-local generator.
    pub fn new() -> Self {
        let seed = rand::rng().random_range(0..u64::MAX);
        Self::with_seed(seed)
    }

    /// Creates a player whose moves are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl MoveProvider for RandomPlayer {
    fn decide(&mut self, side: Side, board: &BoardState) -> Move {
        rules::legal_move_mask(side, board)
            .iter()
            .choose(&mut self.rng)
            .map_or(Move::Pass, Move::Play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    #[test]
    fn test_random_player_plays_legal_moves() {
        let mut player = RandomPlayer::with_seed(7);
        let board = BoardState::new();
        for _ in 0..20 {
            let mv = player.decide(Side::Light, &board);
            assert!(rules::is_legal(Side::Light, &board, mv));
        }
    }

    #[test]
    fn test_unseeded_player_plays_legal_moves() {
        let mut player = RandomPlayer::default();
        let board = rules::initial_board();
        let mv = player.decide(Side::Light, &board);
        assert!(rules::legal_moves(Side::Light, &board).contains(&mv));
    }

    #[test]
    fn test_random_player_passes_without_moves() {
        let board = BoardState::from_bitboards(Square::A1.bitboard(), Square::H8.bitboard());
        let mut player = RandomPlayer::with_seed(1);
        assert_eq!(player.decide(Side::Dark, &board), Move::Pass);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let board = BoardState::new();
        let mut a = RandomPlayer::with_seed(42);
        let mut b = RandomPlayer::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.decide(Side::Light, &board), b.decide(Side::Light, &board));
        }
    }
}
