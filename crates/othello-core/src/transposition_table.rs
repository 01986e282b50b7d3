//! Transposition table.
//!
//! A fixed-size, direct-mapped cache of search results keyed by the board
//! hash. Entries keep the full board, so a hash collision is never mistaken
//! for a hit. The table is advisory: a missing or overwritten entry only
//! costs search time.

use std::mem;

use crate::board::Board;
use crate::square::Square;
use crate::types::{Depth, Score};

/// Bound type for transposition table entries.
///
/// - `None`: No valid entry
/// - `Lower`: Score is a lower bound (fail-high occurred)
/// - `Upper`: Score is an upper bound (fail-low)
/// - `Exact`: Score is the exact value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Bound {
    #[default]
    None = 0,
    Lower = 1,
    Upper = 2,
    Exact = 3,
}

impl Bound {
    /// Determines the bound type of a search result.
    ///
    /// # Arguments
    ///
    /// * `best_score` - The best score found
    /// * `alpha` - The alpha value the node was entered with
    /// * `beta` - The beta value the node was entered with
    #[inline]
    pub fn determine_bound(best_score: Score, alpha: Score, beta: Score) -> Bound {
        if best_score >= beta {
            Bound::Lower
        } else if best_score <= alpha {
            Bound::Upper
        } else {
            Bound::Exact
        }
    }
}

/// Data stored for one position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TTData {
    pub score: Score,
    pub depth: Depth,
    pub bound: Bound,
    pub best_move: Square,
    /// Whether `score` is an exact final disc margin rather than a heuristic value.
    pub endgame: bool,
}

impl TTData {
    /// Returns a score usable as a cutoff for a node searched at `depth`
    /// with window `(alpha, beta)`, if this entry proves one.
    ///
    /// Entries from the other search mode are never used for cutoffs since
    /// their scores are on a different scale.
    #[inline]
    pub fn cutoff(&self, depth: Depth, alpha: Score, beta: Score, endgame: bool) -> Option<Score> {
        if self.endgame != endgame || self.depth < depth {
            return None;
        }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct TTEntry {
    player: u64,
    opponent: u64,
    data: TTData,
}

impl TTEntry {
    #[inline]
    fn matches(&self, board: &Board) -> bool {
        self.data.bound != Bound::None
            && self.player == board.player.bits()
            && self.opponent == board.opponent.bits()
    }
}

/// Fixed-size transposition table.
pub struct TranspositionTable {
    entries: Box<[TTEntry]>,
    mask: u64,
}

impl TranspositionTable {
    /// Creates a table using at most `mb_size` megabytes.
    ///
    /// The entry count is rounded down to a power of two, with a minimum of 1024 entries.
    pub fn new(mb_size: usize) -> Self {
        let bytes = mb_size.saturating_mul(1024 * 1024);
        let wanted = (bytes / mem::size_of::<TTEntry>()).max(1024);
        let count = 1usize << (usize::BITS - 1 - wanted.leading_zeros());
        TranspositionTable {
            entries: vec![TTEntry::default(); count].into_boxed_slice(),
            mask: (count - 1) as u64,
        }
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::default());
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash & self.mask) as usize
    }

    /// Looks up `board`.
    ///
    /// # Arguments
    ///
    /// * `board` - The position.
    /// * `hash` - `board.hash()`.
    #[inline]
    pub fn probe(&self, board: &Board, hash: u64) -> Option<TTData> {
        let entry = &self.entries[self.index(hash)];
        entry.matches(board).then_some(entry.data)
    }

    /// Stores a result for `board`.
    ///
    /// A slot holding a deeper result is kept unless it is for the same
    /// position in the same search mode.
    #[inline]
    pub fn store(&mut self, board: &Board, hash: u64, data: TTData) {
        debug_assert!(data.bound != Bound::None);
        let index = self.index(hash);
        let entry = &mut self.entries[index];
        let same_position = entry.matches(board) && entry.data.endgame == data.endgame;
        if entry.data.bound == Bound::None || same_position || data.depth >= entry.data.depth {
            *entry = TTEntry {
                player: board.player.bits(),
                opponent: board.opponent.bits(),
                data,
            };
        }
    }

    /// Returns the number of occupied slots per thousand, sampled over the first thousand slots.
    pub fn hashfull(&self) -> usize {
        let sample = self.entries.len().min(1000);
        let used = self.entries[..sample]
            .iter()
            .filter(|e| e.data.bound != Bound::None)
            .count();
        used * 1000 / sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(score: Score, depth: Depth, bound: Bound) -> TTData {
        TTData {
            score,
            depth,
            bound,
            best_move: Square::E3,
            endgame: false,
        }
    }

    #[test]
    fn test_determine_bound() {
        assert_eq!(Bound::determine_bound(10, 0, 10), Bound::Lower);
        assert_eq!(Bound::determine_bound(0, 0, 10), Bound::Upper);
        assert_eq!(Bound::determine_bound(5, 0, 10), Bound::Exact);
    }

    #[test]
    fn test_size_is_power_of_two() {
        let tt = TranspositionTable::new(1);
        assert!(tt.capacity().is_power_of_two());
        assert!(tt.capacity() * mem::size_of::<TTEntry>() <= 1024 * 1024);
        assert_eq!(TranspositionTable::new(0).capacity(), 1024);
    }

    #[test]
    fn test_store_and_probe() {
        let mut tt = TranspositionTable::new(1);
        let board = Board::new();
        // Inside the slots sampled by hashfull.
        let hash = board.hash() % 1000;
        assert!(tt.probe(&board, hash).is_none());

        tt.store(&board, hash, data(42, 3, Bound::Exact));
        assert_eq!(tt.probe(&board, hash), Some(data(42, 3, Bound::Exact)));
        assert_eq!(tt.hashfull(), 1);

        tt.clear();
        assert!(tt.probe(&board, hash).is_none());
    }

    #[test]
    fn test_probe_verifies_board() {
        let mut tt = TranspositionTable::new(1);
        let board = Board::new();
        let other = board.switch_players();
        // Force both boards onto the same slot.
        tt.store(&board, 7, data(1, 1, Bound::Exact));
        assert!(tt.probe(&other, 7).is_none());
    }

    #[test]
    fn test_depth_preferred_replacement() {
        let mut tt = TranspositionTable::new(1);
        let board = Board::new();
        let other = board.switch_players();
        tt.store(&board, 7, data(1, 5, Bound::Exact));
        tt.store(&other, 7, data(2, 2, Bound::Exact));
        assert!(tt.probe(&board, 7).is_some());
        assert!(tt.probe(&other, 7).is_none());

        // Same position always refreshes.
        tt.store(&board, 7, data(3, 1, Bound::Lower));
        assert_eq!(tt.probe(&board, 7).map(|d| d.score), Some(3));

        tt.store(&other, 7, data(4, 2, Bound::Exact));
        assert!(tt.probe(&other, 7).is_some());
    }

    #[test]
    fn test_cutoff() {
        let exact = data(10, 4, Bound::Exact);
        assert_eq!(exact.cutoff(4, 0, 20, false), Some(10));
        assert_eq!(exact.cutoff(5, 0, 20, false), None);
        assert_eq!(exact.cutoff(4, 0, 20, true), None);

        let lower = data(10, 4, Bound::Lower);
        assert_eq!(lower.cutoff(3, 0, 10, false), Some(10));
        assert_eq!(lower.cutoff(3, 0, 11, false), None);

        let upper = data(10, 4, Bound::Upper);
        assert_eq!(upper.cutoff(3, 10, 20, false), Some(10));
        assert_eq!(upper.cutoff(3, 9, 20, false), None);
    }
}
