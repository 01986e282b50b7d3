//! Tunable evaluation weights.

use serde::{Deserialize, Serialize};

use crate::square::Square;
use crate::types::Score;

/// Static value of every square, indexed `[row - 1][column - 1]`.
///
/// Corners are worth the most; the X and C squares next to them are the worst
/// places to play while the corner is open.
#[rustfmt::skip]
pub const POSITION_WEIGHTS: [[Score; 8]; 8] = [
    [1000, -300, 100,  80,  80, 100, -300, 1000],
    [-300, -500, -50, -20, -20, -50, -500, -300],
    [ 100,  -50,  30,  10,  10,  30,  -50,  100],
    [  80,  -20,  10,   5,   5,  10,  -20,   80],
    [  80,  -20,  10,   5,   5,  10,  -20,   80],
    [ 100,  -50,  30,  10,  10,  30,  -50,  100],
    [-300, -500, -50, -20, -20, -50, -500, -300],
    [1000, -300, 100,  80,  80, 100, -300, 1000],
];

/// Percentage multipliers applied to the phase-sensitive terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseScale {
    pub parity: Score,
    pub mobility: Score,
    pub positional: Score,
}

impl PhaseScale {
    const fn percent(parity: Score, mobility: Score, positional: Score) -> Self {
        PhaseScale {
            parity,
            mobility,
            positional,
        }
    }
}

/// Weights of the heuristic evaluation.
///
/// Every field has a default, so a TOML file only needs to list the values
/// it changes:
///
/// ```toml
/// mobility = 120
///
/// [endgame]
/// parity = 500
/// mobility = 60
/// positional = 80
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalWeights {
    /// Square values, `[row - 1][column - 1]`.
    pub table: [[Score; 8]; 8],
    /// Multiplier of the positional table difference.
    pub positional: Score,
    /// Per legal move of difference.
    pub mobility: Score,
    /// Per corner of difference.
    pub corner: Score,
    /// Per stable disc of difference.
    pub stability: Score,
    /// Per frontier disc of difference (fewer own frontier discs is better).
    pub frontier: Score,
    /// Per disc of difference.
    pub parity: Score,
    /// More empty squares than this is the opening.
    pub opening_empties: u32,
    /// This many empty squares or fewer is the endgame.
    pub endgame_empties: u32,
    pub opening: PhaseScale,
    pub midgame: PhaseScale,
    pub endgame: PhaseScale,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            table: POSITION_WEIGHTS,
            positional: 10,
            mobility: 90,
            corner: 1500,
            stability: 120,
            frontier: 75,
            parity: 150,
            opening_empties: 40,
            endgame_empties: 16,
            opening: PhaseScale::percent(10, 150, 120),
            midgame: PhaseScale::percent(30, 100, 100),
            endgame: PhaseScale::percent(400, 60, 80),
        }
    }
}

impl EvalWeights {
    /// Returns the static value of a square.
    #[inline]
    pub fn square_weight(&self, sq: Square) -> Score {
        self.table[sq.rank()][sq.file()]
    }

    /// Returns the phase multipliers for a position with `n_empties` empty squares.
    #[inline]
    pub fn phase_scale(&self, n_empties: u32) -> PhaseScale {
        if n_empties > self.opening_empties {
            self.opening
        } else if n_empties <= self.endgame_empties {
            self.endgame
        } else {
            self.midgame
        }
    }
}
