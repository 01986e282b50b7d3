use crate::square::Square;
use crate::types::{Depth, Score};

/// Best root move of a completed iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootMove {
    pub sq: Square,
    pub score: Score,
    pub depth: Depth,
}
