//! History heuristic: squares that caused cutoffs earlier get tried earlier.

use crate::constants::BOARD_SQUARES;
use crate::square::Square;
use crate::types::Depth;

/// Upper bound of a history value.
pub const HISTORY_MAX: i32 = 40_000;

/// History values are multiplied by this (in percent) after each decision.
const DECAY_PERCENT: i32 = 85;

/// Per-square cutoff history, kept across decisions of one engine.
#[derive(Debug, Clone)]
pub struct HistoryTable {
    table: [i32; BOARD_SQUARES],
}

impl Default for HistoryTable {
    fn default() -> Self {
        HistoryTable {
            table: [0; BOARD_SQUARES],
        }
    }
}

impl HistoryTable {
    /// Ordering bonus of `sq`.
    #[inline]
    pub fn get(&self, sq: Square) -> i32 {
        self.table[sq.index()]
    }

    /// Credits `sq` with a cutoff at `depth`.
    #[inline]
    pub fn update(&mut self, sq: Square, depth: Depth) {
        let bonus = (depth * depth).min(HISTORY_MAX as Depth) as i32;
        let value = &mut self.table[sq.index()];
        *value = (*value + bonus).min(HISTORY_MAX);
    }

    /// Ages every value so older decisions weigh less.
    pub fn decay(&mut self) {
        for value in self.table.iter_mut() {
            *value = *value * DECAY_PERCENT / 100;
        }
    }

    pub fn clear(&mut self) {
        self.table = [0; BOARD_SQUARES];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_cap() {
        let mut history = HistoryTable::default();
        history.update(Square::C4, 3);
        assert_eq!(history.get(Square::C4), 9);
        for _ in 0..100 {
            history.update(Square::C4, 60);
        }
        assert_eq!(history.get(Square::C4), HISTORY_MAX);
        assert_eq!(history.get(Square::D3), 0);
    }

    #[test]
    fn test_decay() {
        let mut history = HistoryTable::default();
        history.update(Square::C4, 10);
        history.decay();
        assert_eq!(history.get(Square::C4), 85);
        history.clear();
        assert_eq!(history.get(Square::C4), 0);
    }
}
