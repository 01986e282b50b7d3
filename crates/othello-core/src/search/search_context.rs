//! Search context for maintaining state during one decision.

use std::time::Duration;

use crate::board::Board;
use crate::constants::MAX_PLY;
use crate::eval::Evaluator;
use crate::move_list::{MoveList, ScoredMove};
use crate::ordering::{MoveClass, OrderingHeuristic, classify};
use crate::search::history::HistoryTable;
use crate::search::time_control::TimeManager;
use crate::square::Square;
use crate::transposition_table::TranspositionTable;
use crate::types::{Depth, Score};

/// Ordering bonus of the transposition table move. Larger than any static priority.
pub const TT_MOVE_BONUS: i32 = 2_000_000;

/// Ordering bonus of the first and second killer move.
pub const KILLER_BONUS: [i32; 2] = [50_000, 45_000];

/// State shared by every node of one decision.
///
/// Borrows the engine's long-lived tables and owns what lives only for the
/// decision: killers, node count and the abort state.
pub struct SearchContext<'a> {
    /// Number of nodes searched in this context
    pub n_nodes: u64,
    /// Plies played from the root, passes excluded
    ply: usize,
    /// Set once the clock ran out or an abort was requested; never cleared
    aborted: bool,
    check_interval: u64,
    time_manager: &'a TimeManager,
    pub tt: &'a mut TranspositionTable,
    history: &'a mut HistoryTable,
    killers: [[Square; 2]; MAX_PLY + 1],
    evaluator: &'a dyn Evaluator,
    ordering: &'a dyn OrderingHeuristic,
}

impl<'a> SearchContext<'a> {
    /// Creates a context for one decision.
    ///
    /// # Arguments
    /// * `tt` - Transposition table, already cleared for this decision.
    /// * `history` - History table of the engine.
    /// * `evaluator` - Leaf evaluator.
    /// * `ordering` - Static move ordering.
    /// * `time_manager` - Clock of this decision.
    /// * `check_interval` - Nodes between two clock checks.
    pub fn new(
        tt: &'a mut TranspositionTable,
        history: &'a mut HistoryTable,
        evaluator: &'a dyn Evaluator,
        ordering: &'a dyn OrderingHeuristic,
        time_manager: &'a TimeManager,
        check_interval: u64,
    ) -> SearchContext<'a> {
        SearchContext {
            n_nodes: 0,
            ply: 0,
            aborted: false,
            check_interval: check_interval.max(1),
            time_manager,
            tt,
            history,
            killers: [[Square::None; 2]; MAX_PLY + 1],
            evaluator,
            ordering,
        }
    }

    /// Counts a node and checks the clock every `check_interval` nodes.
    #[inline]
    pub fn increment_nodes(&mut self) {
        self.n_nodes += 1;
        if self.n_nodes % self.check_interval == 0 && self.time_manager.is_time_up() {
            self.aborted = true;
        }
    }

    /// Whether the current iteration must be abandoned.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Time since the decision started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.time_manager.elapsed()
    }

    /// Whether another iteration should start after completing `depth`.
    pub fn should_start_iteration(&self, depth: Depth) -> bool {
        !self.aborted && self.time_manager.should_start_iteration(depth)
    }

    /// Whether another iteration fits in `budget_ratio` of the soft budget.
    pub fn should_start_iteration_within(&self, depth: Depth, budget_ratio: f64) -> bool {
        !self.aborted && self.time_manager.should_start_iteration_within(depth, budget_ratio)
    }

    /// Whether the decision runs against a clock.
    #[inline]
    pub fn has_deadline(&self) -> bool {
        self.time_manager.has_deadline()
    }

    /// Plays `mv` on `board`.
    #[inline]
    pub fn update(&mut self, board: &mut Board, mv: &ScoredMove) {
        self.increment_nodes();
        board.play(mv.flipped, mv.sq);
        self.ply += 1;
    }

    /// Takes back `mv` from `board`.
    #[inline]
    pub fn undo(&mut self, board: &mut Board, mv: &ScoredMove) {
        self.ply -= 1;
        board.undo(mv.flipped, mv.sq);
    }

    /// Passes on `board`. Passing again restores it.
    #[inline]
    pub fn update_pass(&mut self, board: &mut Board) {
        self.increment_nodes();
        board.pass();
    }

    #[inline]
    pub fn undo_pass(&mut self, board: &mut Board) {
        board.pass();
    }

    /// Static evaluation of a leaf for the side to move.
    #[inline]
    pub fn evaluate(&self, board: &Board) -> Score {
        self.evaluator.evaluate(board)
    }

    /// Scores and sorts `move_list`: static priority, then the dynamic bonuses.
    ///
    /// Killer and history bonuses only apply to ordinary squares, so a
    /// dangerous square stays last unless the transposition table suggests it.
    ///
    /// # Arguments
    /// * `board` - Position the moves belong to.
    /// * `move_list` - Moves to order.
    /// * `tt_move` - Best move stored for this position, or `Square::None`.
    pub fn order_moves(&self, board: &Board, move_list: &mut MoveList, tt_move: Square) {
        let killers = self.killers[self.ply.min(MAX_PLY)];
        for mv in move_list.iter_mut() {
            let mut value = self.ordering.priority(board, mv.sq, mv.flipped);
            if mv.sq == tt_move {
                value += TT_MOVE_BONUS;
            } else if classify(board, mv.sq) == MoveClass::Ordinary {
                if mv.sq == killers[0] {
                    value += KILLER_BONUS[0];
                } else if mv.sq == killers[1] {
                    value += KILLER_BONUS[1];
                }
                value += self.history.get(mv.sq);
            }
            mv.value = value;
        }
        move_list.sort();
    }

    /// Records a beta cutoff by `sq` at `depth` in the killers and history.
    pub fn record_cutoff(&mut self, sq: Square, depth: Depth) {
        let killers = &mut self.killers[self.ply.min(MAX_PLY)];
        if killers[0] != sq {
            killers[1] = killers[0];
            killers[0] = sq;
        }
        self.history.update(sq, depth);
    }
}
