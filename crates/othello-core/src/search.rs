//! Alpha-beta search engine.
//!
//! Principal variation search over a side-relative [`Board`] with make/unmake,
//! iterative deepening under a deadline, and an exact solver for the last
//! empty squares.

pub mod endgame;
pub mod history;
pub mod midgame;
pub mod node_type;
pub mod options;
pub mod root_move;
pub mod search_context;
pub mod search_result;
pub mod search_strategy;
pub mod time_control;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::board::Board;
use crate::board_state::BoardState;
use crate::constants::SCORE_INF;
use crate::disc::Side;
use crate::eval::{EvalWeights, Evaluator, WeightedEvaluator};
use crate::move_list::MoveList;
use crate::moves::Move;
use crate::ordering::{CornerFirstOrdering, OrderingHeuristic};
use crate::player::MoveProvider;
use crate::search::history::HistoryTable;
use crate::search::node_type::{NodeType, NonPV, PV};
use crate::search::root_move::RootMove;
use crate::search::search_context::SearchContext;
use crate::search::search_strategy::{MidGameStrategy, SearchStrategy};
use crate::square::Square;
use crate::transposition_table::{Bound, TTData, TranspositionTable};
use crate::types::{Depth, Score};

pub use crate::search::options::{SearchConstraint, SearchOptions, SearchRunOptions};
pub use crate::search::search_result::SearchResult;
pub use crate::search::time_control::{TimeControl, TimeManager};

/// Depth cap of the midgame pass run before an exact solve without a clock.
const ENDGAME_PRE_SEARCH_DEPTH: Depth = 4;

/// Share of the soft budget the midgame pass may use before an exact solve.
const ENDGAME_PRE_SEARCH_BUDGET: f64 = 0.3;

/// Main search engine structure.
///
/// Owns its transposition table and history, so engines for independent
/// games can run on separate threads.
pub struct SearchEngine<E: Evaluator = WeightedEvaluator, O: OrderingHeuristic = CornerFirstOrdering> {
    options: SearchOptions,
    tt: TranspositionTable,
    history: HistoryTable,
    evaluator: E,
    ordering: O,
    abort_flag: Arc<AtomicBool>,
}

impl SearchEngine {
    /// Creates an engine with the default evaluator and ordering.
    pub fn new(options: SearchOptions) -> Self {
        Self::with_weights(options, Arc::new(EvalWeights::default()))
    }

    /// Creates an engine whose evaluator and ordering share `weights`.
    pub fn with_weights(options: SearchOptions, weights: Arc<EvalWeights>) -> Self {
        let ordering = CornerFirstOrdering::new(weights.clone());
        Self::with_components(options, WeightedEvaluator::new(weights), ordering)
    }
}

impl<E: Evaluator, O: OrderingHeuristic> SearchEngine<E, O> {
    /// Creates an engine with a custom evaluator and move ordering.
    pub fn with_components(options: SearchOptions, evaluator: E, ordering: O) -> Self {
        SearchEngine {
            tt: TranspositionTable::new(options.tt_mb_size),
            history: HistoryTable::default(),
            evaluator,
            ordering,
            options,
            abort_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Replaces the options. The transposition table is reallocated if its size changes.
    pub fn set_options(&mut self, options: SearchOptions) {
        if options.tt_mb_size != self.options.tt_mb_size {
            self.tt = TranspositionTable::new(options.tt_mb_size);
        }
        self.options = options;
    }

    /// Returns a handle that aborts the running search when set.
    ///
    /// The flag is cleared at the start of every search.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        self.abort_flag.clone()
    }

    /// Forgets everything learned in earlier decisions.
    pub fn init(&mut self) {
        self.tt.clear();
        self.history.clear();
    }

    /// Picks a move for `side` under the configured time and level.
    ///
    /// Returns `Move::Pass` iff `side` has no legal move.
    pub fn decide(&mut self, side: Side, board: &BoardState) -> Move {
        let run_options = SearchRunOptions::from(&self.options);
        self.run(side, board, &run_options).best_move
    }

    /// Runs a search for `side` on `board`.
    ///
    /// # Arguments
    ///
    /// * `side` - Side to move.
    /// * `board` - Position; it is not modified.
    /// * `run_options` - What stops the search.
    ///
    /// # Returns
    ///
    /// The chosen move with its score and statistics.
    pub fn run(&mut self, side: Side, board: &BoardState, run_options: &SearchRunOptions) -> SearchResult {
        let board = board.to_relative(side);
        match run_options.constraint {
            SearchConstraint::Time(control) => self.search_timed(board, control),
            SearchConstraint::Depth(depth) => {
                self.search_with(board, TimeControl::Infinite, |ctx, board| {
                    let max_depth = depth.min(board.get_empty_count()).max(1);
                    midgame::search_iterative(ctx, board, max_depth).map(|rm| (rm, false))
                })
            }
        }
    }

    /// One full-window root search at exactly `depth`, without a clock.
    pub fn search_depth(&mut self, side: Side, board: &BoardState, depth: Depth) -> SearchResult {
        let board = board.to_relative(side);
        self.search_with(board, TimeControl::Infinite, |ctx, board| {
            search_root::<MidGameStrategy>(ctx, board, depth.max(1)).map(|rm| (rm, false))
        })
    }

    /// Solves the position exactly, without a clock.
    ///
    /// The score of the result is the final disc margin for `side` under perfect play.
    pub fn solve(&mut self, side: Side, board: &BoardState) -> SearchResult {
        let board = board.to_relative(side);
        self.search_with(board, TimeControl::Infinite, |ctx, board| {
            endgame::solve(ctx, board).map(|rm| (rm, true))
        })
    }

    /// Best move of the static ordering, without searching.
    ///
    /// # Returns
    ///
    /// `None` if the side to move has no legal move.
    pub fn quick_move(&self, board: &Board) -> Option<Square> {
        let mut move_list = MoveList::new(board);
        move_list.evaluate_moves(board, &self.ordering);
        move_list.sort();
        move_list.first().map(|mv| mv.sq)
    }

    fn search_timed(&mut self, board: Board, control: TimeControl) -> SearchResult {
        let level = self.options.level;
        self.search_with(board, control, |ctx, board| {
            let n_empties = board.get_empty_count();
            if !level.is_endgame(n_empties) {
                let max_depth = level.depth_for(n_empties).min(n_empties).max(1);
                return midgame::search_iterative(ctx, board, max_depth).map(|rm| (rm, false));
            }

            // With a clock the midgame pass deepens within part of the budget,
            // so an unfinished solve still leaves a deep move behind.
            let safe_move = if ctx.has_deadline() {
                let pre_depth = level.mid_depth.min(n_empties).max(1);
                midgame::search_iterative_within(ctx, board, pre_depth, ENDGAME_PRE_SEARCH_BUDGET)
            } else {
                let pre_depth = ENDGAME_PRE_SEARCH_DEPTH.min(level.mid_depth).min(n_empties).max(1);
                midgame::search_iterative(ctx, board, pre_depth)
            };
            if safe_move.is_none() || ctx.is_aborted() {
                return safe_move.map(|rm| (rm, false));
            }
            match endgame::solve(ctx, board) {
                Some(rm) => Some((rm, true)),
                None => safe_move.map(|rm| (rm, false)),
            }
        })
    }

    /// Shared driver of every search: handles forced moves, prepares the
    /// per-decision state, runs `search_fn` and falls back to the static
    /// ordering if it completes nothing.
    fn search_with<F>(&mut self, mut board: Board, control: TimeControl, search_fn: F) -> SearchResult
    where
        F: FnOnce(&mut SearchContext<'_>, &mut Board) -> Option<(RootMove, bool)>,
    {
        let moves = board.get_moves();
        let Some(first_move) = moves.lsb_square() else {
            return SearchResult::new_pass();
        };
        if moves.count() == 1 {
            return SearchResult::new_forced(Move::Play(first_move));
        }

        self.abort_flag.store(false, Ordering::Relaxed);
        self.tt.clear();
        let fallback = self.quick_move(&board).map_or(Move::Pass, Move::Play);

        let n_empties = board.get_empty_count();
        let time_manager = TimeManager::new(control, self.abort_flag.clone(), n_empties);
        let mut ctx = SearchContext::new(
            &mut self.tt,
            &mut self.history,
            &self.evaluator,
            &self.ordering,
            &time_manager,
            self.options.check_interval,
        );

        let root_board = board;
        let outcome = search_fn(&mut ctx, &mut board);
        debug_assert_eq!(board, root_board, "search must restore the root position");
        let n_nodes = ctx.n_nodes;

        let result = match outcome {
            Some((root_move, is_endgame)) => SearchResult {
                best_move: Move::Play(root_move.sq),
                score: root_move.score,
                depth: root_move.depth,
                elapsed: time_manager.elapsed(),
                n_nodes,
                is_endgame,
                completed: true,
            },
            None => {
                debug!(best_move = %fallback, "no iteration completed, using static ordering");
                SearchResult {
                    elapsed: time_manager.elapsed(),
                    n_nodes,
                    ..SearchResult::new_fallback(fallback)
                }
            }
        };

        self.history.decay();
        result
    }
}

impl<E: Evaluator, O: OrderingHeuristic> MoveProvider for SearchEngine<E, O> {
    fn decide(&mut self, side: Side, board: &BoardState) -> Move {
        SearchEngine::decide(self, side, board)
    }
}

/// Searches the root position with a full window.
///
/// # Arguments
///
/// * `ctx` - Search context.
/// * `board` - Root position; it has at least one legal move.
/// * `depth` - Remaining search depth (for endgame, equals n_empties).
///
/// # Returns
///
/// The best move and its score, or `None` if the search was aborted.
pub fn search_root<SS: SearchStrategy>(
    ctx: &mut SearchContext<'_>,
    board: &mut Board,
    depth: Depth,
) -> Option<RootMove> {
    debug_assert!(depth >= 1);
    let tt_key = board.hash();
    let tt_move = ctx.tt.probe(board, tt_key).map_or(Square::None, |data| data.best_move);

    let mut move_list = MoveList::new(board);
    ctx.order_moves(board, &mut move_list, tt_move);

    let beta = SCORE_INF;
    let mut alpha = -SCORE_INF;
    let mut best = RootMove {
        sq: Square::None,
        score: -SCORE_INF,
        depth,
    };

    for (i, mv) in move_list.iter().enumerate() {
        ctx.update(board, mv);
        let score = if i == 0 {
            -search::<PV, SS>(ctx, board, depth - 1, -beta, -alpha)
        } else {
            let score = -search::<NonPV, SS>(ctx, board, depth - 1, -(alpha + 1), -alpha);
            if score > alpha && score < beta {
                -search::<PV, SS>(ctx, board, depth - 1, -beta, -alpha)
            } else {
                score
            }
        };
        ctx.undo(board, mv);

        if ctx.is_aborted() {
            return None;
        }

        if score > best.score {
            best.sq = mv.sq;
            best.score = score;
            if score > alpha {
                alpha = score;
            }
        }
    }

    ctx.tt.store(
        board,
        tt_key,
        TTData {
            score: best.score,
            depth,
            bound: Bound::Exact,
            best_move: best.sq,
            endgame: SS::IS_ENDGAME,
        },
    );
    Some(best)
}

/// Alpha-beta search function for midgame and endgame positions.
///
/// # Arguments
///
/// * `ctx` - Search context.
/// * `board` - Current board position; restored before returning.
/// * `depth` - Remaining search depth (for endgame, equals n_empties).
/// * `alpha` - Alpha bound.
/// * `beta` - Beta bound.
///
/// # Returns
///
/// Best score found. Meaningless once `ctx.is_aborted()`.
pub fn search<NT: NodeType, SS: SearchStrategy>(
    ctx: &mut SearchContext<'_>,
    board: &mut Board,
    depth: Depth,
    mut alpha: Score,
    beta: Score,
) -> Score {
    let org_alpha = alpha;

    if depth == 0 {
        return SS::evaluate(ctx, board);
    }
    if !NT::PV_NODE {
        if depth <= SS::DEPTH_TO_SHALLOW {
            return SS::shallow_search(ctx, board, depth, alpha, beta);
        }
        if let Some(score) = SS::stability_cutoff(board, alpha) {
            return score;
        }
    }

    let moves = board.get_moves();
    if moves.is_empty() {
        if board.switch_players().has_legal_moves() {
            ctx.update_pass(board);
            let score = -search::<NT, SS>(ctx, board, depth, -beta, -alpha);
            ctx.undo_pass(board);
            return score;
        }
        return SS::terminal_score(board);
    }

    // Transposition table probe
    let tt_key = board.hash();
    let tt_data = ctx.tt.probe(board, tt_key);
    let tt_move = tt_data.map_or(Square::None, |data| data.best_move);

    if !NT::PV_NODE
        && let Some(score) = tt_data.and_then(|data| data.cutoff(depth, alpha, beta, SS::IS_ENDGAME))
    {
        return score;
    }

    let mut move_list = MoveList::with_moves(board, moves);
    if move_list.count() > 1 {
        ctx.order_moves(board, &mut move_list, tt_move);
    }

    let mut best_score = -SCORE_INF;
    let mut best_move = Square::None;
    for (i, mv) in move_list.iter().enumerate() {
        ctx.update(board, mv);
        let mut score = -SCORE_INF;
        if !NT::PV_NODE || i > 0 {
            score = -search::<NonPV, SS>(ctx, board, depth - 1, -(alpha + 1), -alpha);
        }
        if NT::PV_NODE && (i == 0 || (score > alpha && score < beta)) {
            score = -search::<PV, SS>(ctx, board, depth - 1, -beta, -alpha);
        }
        ctx.undo(board, mv);

        if ctx.is_aborted() {
            return 0;
        }

        if score > best_score {
            best_score = score;
            if score > alpha {
                best_move = mv.sq;
                if NT::PV_NODE && score < beta {
                    alpha = score;
                } else {
                    ctx.record_cutoff(mv.sq, depth);
                    break;
                }
            }
        }
    }

    ctx.tt.store(
        board,
        tt_key,
        TTData {
            score: best_score,
            depth,
            bound: Bound::determine_bound(best_score, org_alpha, beta),
            best_move,
            endgame: SS::IS_ENDGAME,
        },
    );

    best_score
}
