//! Time control for a single decision.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::level::OPENING_EMPTIES;
use crate::types::Depth;

/// Safety buffer in milliseconds subtracted from the move time.
pub const TIME_BUFFER_MS: u64 = 10;

/// Fraction of the soft budget after which no new iteration is started.
const SOFT_STOP_RATIO: f64 = 0.75;

/// Minimum depth before the soft stop ratio applies.
const SOFT_STOP_MIN_DEPTH: Depth = 3;

/// An iteration is predicted to take this many times the elapsed time so far.
const NEXT_ITERATION_RATIO: f64 = 1.5;

/// Calculates a time allocation factor based on game phase.
///
/// # Arguments
///
/// * `n_empties` - Number of empty squares on the board
///
/// # Returns
///
/// A multiplier of the move time for the soft budget.
fn get_time_allocation_factor(n_empties: u32) -> f64 {
    if n_empties > OPENING_EMPTIES { 0.5 } else { 1.0 }
}

/// Time limit of one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeControl {
    /// No time limit.
    #[default]
    Infinite,
    /// Fixed time per move, in milliseconds.
    MoveTime(u64),
}

/// Tracks the clock and the abort flag during one decision.
#[derive(Debug)]
pub struct TimeManager {
    start_time: Instant,
    /// Iterations should not start past this.
    soft_limit: Option<Duration>,
    /// The search aborts past this.
    hard_limit: Option<Duration>,
    abort_flag: Arc<AtomicBool>,
}

impl TimeManager {
    /// Starts the clock.
    ///
    /// # Arguments
    ///
    /// * `control` - The time limit
    /// * `abort_flag` - Shared flag that aborts the search when set
    /// * `n_empties` - Number of empty squares on the board
    pub fn new(control: TimeControl, abort_flag: Arc<AtomicBool>, n_empties: u32) -> Self {
        let (soft_limit, hard_limit) = match control {
            TimeControl::Infinite => (None, None),
            TimeControl::MoveTime(ms) => {
                let hard = ms.saturating_sub(TIME_BUFFER_MS).max(1);
                let soft = (ms as f64 * get_time_allocation_factor(n_empties)) as u64;
                (
                    Some(Duration::from_millis(soft.min(hard))),
                    Some(Duration::from_millis(hard)),
                )
            }
        };

        TimeManager {
            start_time: Instant::now(),
            soft_limit,
            hard_limit,
            abort_flag,
        }
    }

    /// Time since the clock started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns `true` once the hard deadline has passed or an abort was requested.
    #[inline]
    pub fn is_time_up(&self) -> bool {
        if self.abort_flag.load(Ordering::Relaxed) {
            return true;
        }
        match self.hard_limit {
            Some(limit) => self.elapsed() >= limit,
            None => false,
        }
    }

    /// Returns `true` if the decision runs against a clock.
    #[inline]
    pub fn has_deadline(&self) -> bool {
        self.hard_limit.is_some()
    }

    /// Decides whether another iteration is worth starting after completing `depth`.
    pub fn should_start_iteration(&self, depth: Depth) -> bool {
        self.should_start_iteration_within(depth, 1.0)
    }

    /// Like [`should_start_iteration`](Self::should_start_iteration), but
    /// against `budget_ratio` times the soft budget, leaving the rest of the
    /// time to a later phase of the decision.
    pub fn should_start_iteration_within(&self, depth: Depth, budget_ratio: f64) -> bool {
        if self.is_time_up() {
            return false;
        }
        let Some(soft) = self.soft_limit else {
            return true;
        };
        let elapsed = self.elapsed().as_secs_f64();
        let soft = soft.as_secs_f64() * budget_ratio;
        if depth >= SOFT_STOP_MIN_DEPTH && elapsed > soft * SOFT_STOP_RATIO {
            return false;
        }
        elapsed * NEXT_ITERATION_RATIO < soft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(control: TimeControl, n_empties: u32) -> TimeManager {
        TimeManager::new(control, Arc::new(AtomicBool::new(false)), n_empties)
    }

    #[test]
    fn test_time_allocation_factor() {
        assert_eq!(get_time_allocation_factor(60), 0.5);
        assert_eq!(get_time_allocation_factor(OPENING_EMPTIES + 1), 0.5);
        assert_eq!(get_time_allocation_factor(OPENING_EMPTIES), 1.0);
        assert_eq!(get_time_allocation_factor(10), 1.0);
    }

    #[test]
    fn test_limits() {
        let tm = manager(TimeControl::MoveTime(1000), 60);
        assert_eq!(tm.hard_limit, Some(Duration::from_millis(990)));
        assert_eq!(tm.soft_limit, Some(Duration::from_millis(500)));

        let tm = manager(TimeControl::MoveTime(1000), 30);
        assert_eq!(tm.soft_limit, Some(Duration::from_millis(990)));

        let tm = manager(TimeControl::MoveTime(5), 30);
        assert_eq!(tm.hard_limit, Some(Duration::from_millis(1)));
    }

    #[test]
    fn test_infinite_never_expires() {
        let tm = manager(TimeControl::Infinite, 30);
        assert!(!tm.is_time_up());
        assert!(!tm.has_deadline());
        assert!(tm.should_start_iteration(40));
        assert!(tm.should_start_iteration_within(40, 0.1));
    }

    #[test]
    fn test_budget_ratio_shrinks_soft_limit() {
        let tm = manager(TimeControl::MoveTime(1000), 30);
        assert!(tm.has_deadline());
        std::thread::sleep(Duration::from_millis(250));
        // 250 ms * 1.5 fits in the full 990 ms, not in 30% of it.
        assert!(tm.should_start_iteration(1));
        assert!(!tm.should_start_iteration_within(1, 0.3));
    }

    #[test]
    fn test_abort_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let tm = TimeManager::new(TimeControl::Infinite, flag.clone(), 30);
        assert!(!tm.is_time_up());
        flag.store(true, Ordering::Relaxed);
        assert!(tm.is_time_up());
        assert!(!tm.should_start_iteration(1));
    }

    #[test]
    fn test_deadline_passes() {
        let tm = manager(TimeControl::MoveTime(1), 30);
        std::thread::sleep(Duration::from_millis(5));
        assert!(tm.is_time_up());
        assert!(!tm.should_start_iteration(1));
    }
}
