//! Strength levels and search depth configuration.

use crate::types::Depth;

/// More empty squares than this is the opening, where `opening_depth` applies.
pub const OPENING_EMPTIES: u32 = 44;

/// Depth caps for each phase of the game.
///
/// With a time budget the caps rarely bind at the higher levels; with
/// [`Level::default`] they never do and the clock alone stops the search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Level {
    /// Depth cap while more than [`OPENING_EMPTIES`] squares are empty.
    pub opening_depth: Depth,
    /// Depth cap for the rest of the midgame.
    pub mid_depth: Depth,
    /// At or below this many empty squares the engine solves exactly.
    pub end_empties: u32,
}

impl Default for Level {
    /// No depth restriction; exact solving from 14 empties.
    fn default() -> Self {
        Level {
            opening_depth: 60,
            mid_depth: 60,
            end_empties: 14,
        }
    }
}

impl Level {
    /// Returns the depth cap for a position with `n_empties` empty squares.
    #[inline]
    pub fn depth_for(&self, n_empties: u32) -> Depth {
        if n_empties > OPENING_EMPTIES {
            self.opening_depth
        } else {
            self.mid_depth
        }
    }

    /// Returns `true` if a position with `n_empties` empty squares is solved exactly.
    #[inline]
    pub fn is_endgame(&self, n_empties: u32) -> bool {
        n_empties <= self.end_empties
    }
}

/// Number of preset levels.
pub const NUM_LEVELS: usize = LEVELS.len();

/// Retrieves the configuration for a preset level.
///
/// # Arguments
///
/// * `lv` - The level index, 0 (weakest) to 12 (strongest). Larger values
///   are clamped to the strongest level.
///
/// # Returns
///
/// A `Level` with the depth caps of that preset.
pub fn get_level(lv: usize) -> Level {
    LEVELS[lv.min(LEVELS.len() - 1)]
}

#[rustfmt::skip]
const LEVELS: [Level; 13] = [
    Level { opening_depth:  1, mid_depth:  1, end_empties:  0 },
    Level { opening_depth:  1, mid_depth:  1, end_empties:  2 },
    Level { opening_depth:  2, mid_depth:  2, end_empties:  4 },
    Level { opening_depth:  3, mid_depth:  3, end_empties:  6 },
    Level { opening_depth:  4, mid_depth:  4, end_empties:  8 },
    Level { opening_depth:  4, mid_depth:  5, end_empties: 10 },
    Level { opening_depth:  5, mid_depth:  6, end_empties: 12 },
    Level { opening_depth:  6, mid_depth:  7, end_empties: 14 },
    Level { opening_depth:  6, mid_depth:  8, end_empties: 16 },
    Level { opening_depth:  7, mid_depth:  9, end_empties: 18 },
    Level { opening_depth:  8, mid_depth: 10, end_empties: 20 },
    Level { opening_depth:  9, mid_depth: 11, end_empties: 22 },
    Level { opening_depth: 10, mid_depth: 12, end_empties: 24 },
];
