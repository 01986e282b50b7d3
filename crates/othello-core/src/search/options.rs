use crate::level::Level;
use crate::search::time_control::TimeControl;
use crate::types::Depth;

/// Configuration of a [`SearchEngine`](crate::search::SearchEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub tt_mb_size: usize,
    pub level: Level,
    /// Per-move time limit in milliseconds; `None` searches to the level's depth caps.
    pub move_time: Option<u64>,
    /// Nodes between two clock checks.
    pub check_interval: u64,
}

impl SearchOptions {
    /// Create search options with the desired transposition-table size while
    /// relying on defaults for everything else.
    #[must_use]
    pub fn new(tt_mb_size: usize) -> Self {
        SearchOptions {
            tt_mb_size,
            ..Default::default()
        }
    }

    /// Replace the depth caps, typically with a preset from `get_level`.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the per-move time limit; `None` removes the clock.
    #[must_use]
    pub fn with_move_time(mut self, move_time: Option<u64>) -> Self {
        self.move_time = move_time;
        self
    }

    #[must_use]
    pub fn with_check_interval(mut self, check_interval: u64) -> Self {
        self.check_interval = check_interval;
        self
    }

    /// Time control implied by `move_time`.
    pub fn time_control(&self) -> TimeControl {
        match self.move_time {
            Some(ms) => TimeControl::MoveTime(ms),
            None => TimeControl::Infinite,
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            tt_mb_size: 16,
            level: Level::default(),
            move_time: Some(1000),
            check_interval: 1024,
        }
    }
}

/// What stops the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchConstraint {
    /// Iterative deepening under a clock, capped by the engine's level.
    Time(TimeControl),
    /// Iterative deepening to a fixed depth without a clock.
    Depth(Depth),
}

/// Per-call options of [`SearchEngine::run`](crate::search::SearchEngine::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRunOptions {
    pub constraint: SearchConstraint,
}

impl SearchRunOptions {
    pub fn with_time(control: TimeControl) -> Self {
        SearchRunOptions {
            constraint: SearchConstraint::Time(control),
        }
    }

    pub fn with_depth(depth: Depth) -> Self {
        SearchRunOptions {
            constraint: SearchConstraint::Depth(depth),
        }
    }
}

impl From<&SearchOptions> for SearchRunOptions {
    fn from(options: &SearchOptions) -> Self {
        SearchRunOptions::with_time(options.time_control())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::get_level;

    #[test]
    fn test_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.tt_mb_size, 16);
        assert_eq!(options.move_time, Some(1000));
        assert_eq!(options.check_interval, 1024);
        assert_eq!(options.level, Level::default());
    }

    #[test]
    fn test_builders() {
        let options = SearchOptions::new(4)
            .with_level(get_level(3))
            .with_move_time(None)
            .with_check_interval(64);
        assert_eq!(options.tt_mb_size, 4);
        assert_eq!(options.level, get_level(3));
        assert_eq!(options.time_control(), TimeControl::Infinite);
        assert_eq!(options.check_interval, 64);
        assert_eq!(
            SearchRunOptions::from(&options).constraint,
            SearchConstraint::Time(TimeControl::Infinite)
        );
    }
}
