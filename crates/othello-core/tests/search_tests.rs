use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;

use othello_core::board::Board;
use othello_core::board_state::BoardState;
use othello_core::disc::Side;
use othello_core::eval::{Evaluator, WeightedEvaluator, terminal_score};
use othello_core::level::get_level;
use othello_core::moves::Move;
use othello_core::ordering::CornerFirstOrdering;
use othello_core::rules;
use othello_core::search::{SearchEngine, SearchOptions, SearchRunOptions, TimeControl};
use othello_core::square::Square;
use othello_core::types::{Depth, Score};

/// Position after `plies` random moves from the start, with the side to move.
fn random_position(seed: u64, plies: usize) -> (Side, BoardState) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = rules::initial_board();
    let mut side = Side::FIRST;
    for _ in 0..plies {
        if rules::is_terminal(&board) {
            break;
        }
        let mv = rules::legal_moves(side, &board)
            .into_iter()
            .choose(&mut rng)
            .unwrap_or(Move::Pass);
        board = rules::apply_move(side, &board, mv).unwrap();
        side = side.opposite();
    }
    (side, board)
}

/// Unpruned negamax with the same leaf and pass rules as the engine.
fn minimax(eval: &WeightedEvaluator, board: &Board, depth: Depth) -> Score {
    if depth == 0 {
        return eval.evaluate(board);
    }
    let moves = board.get_moves();
    if moves.is_empty() {
        let next = board.switch_players();
        if next.has_legal_moves() {
            return -minimax(eval, &next, depth);
        }
        return terminal_score(board);
    }
    moves
        .iter()
        .map(|sq| -minimax(eval, &board.make_move(sq), depth - 1))
        .max()
        .unwrap()
}

/// Like [`random_position`], but skipping positions with fewer than two legal moves.
fn branching_position(seed: u64, plies: usize) -> (Side, BoardState) {
    (seed..)
        .map(|s| random_position(s, plies))
        .find(|(side, state)| rules::legal_move_mask(*side, state).count() >= 2)
        .unwrap()
}

fn fixed_depth_engine() -> SearchEngine {
    SearchEngine::new(SearchOptions::new(1).with_move_time(None))
}

#[test]
fn test_alpha_beta_matches_minimax() {
    let eval = WeightedEvaluator::default();
    let mut engine = fixed_depth_engine();
    let mut checked = 0;
    for seed in 0..12 {
        let (side, state) = random_position(seed, 8 + seed as usize * 3);
        let board = state.to_relative(side);
        if board.get_moves().count() < 2 {
            continue;
        }
        for depth in 1..=4 {
            let result = engine.search_depth(side, &state, depth);
            let expected = minimax(&eval, &board, depth);
            assert_eq!(result.score, expected, "seed {seed} depth {depth}");

            // The chosen move achieves the reported value.
            let sq = result.best_move.square().unwrap();
            assert_eq!(-minimax(&eval, &board.make_move(sq), depth - 1), expected);
            checked += 1;
        }
    }
    assert!(checked > 0);
}

/// Counts the positions within `depth` plies where the side to move must pass.
fn count_passes(board: &Board, depth: Depth) -> usize {
    if depth == 0 {
        return 0;
    }
    let moves = board.get_moves();
    if moves.is_empty() {
        let next = board.switch_players();
        return if next.has_legal_moves() { 1 + count_passes(&next, depth) } else { 0 };
    }
    moves.iter().map(|sq| count_passes(&board.make_move(sq), depth - 1)).sum()
}

#[test]
fn test_alpha_beta_matches_minimax_through_passes() {
    // Light to move; two lines within three plies force a pass.
    let state: BoardState = "---XO-------X-------OX-----OO------OO------O--------------------"
        .parse()
        .unwrap();
    let side = Side::Light;
    let board = state.to_relative(side);
    assert!(board.get_moves().count() >= 2);
    assert!(count_passes(&board, 3) > 0);

    let eval = WeightedEvaluator::default();
    let mut engine = fixed_depth_engine();
    for depth in 1..=5 {
        let result = engine.search_depth(side, &state, depth);
        assert_eq!(result.score, minimax(&eval, &board, depth), "depth {depth}");
    }
}

#[test]
fn test_strong_level_searches_deep_in_endgame_window() {
    let level = get_level(12);
    let (side, state) = (0..)
        .map(|seed| random_position(seed, 38))
        .find(|(side, state)| {
            state.empty_count() <= level.end_empties && rules::legal_move_mask(*side, state).count() >= 2
        })
        .unwrap();
    assert!(state.empty_count() > 20);

    let options = SearchOptions::default().with_level(level).with_move_time(Some(2_000));
    let run_options = SearchRunOptions::from(&options);
    let mut engine = SearchEngine::new(options);
    let result = engine.run(side, &state, &run_options);
    assert!(result.completed);
    assert!(result.depth > 4, "depth {}", result.depth);
    assert!(rules::is_legal(side, &state, result.best_move));
}

#[test]
fn test_pass_iff_no_moves() {
    // Dark cannot move, Light can.
    let state: BoardState = "OX-----------------------------------------------------------O-"
        .parse()
        .unwrap();
    let mut engine = SearchEngine::new(SearchOptions::default());
    assert_eq!(engine.decide(Side::Dark, &state), Move::Pass);
    assert_ne!(engine.decide(Side::Light, &state), Move::Pass);

    let result = engine.run(Side::Dark, &state, &SearchRunOptions::with_depth(5));
    assert_eq!(result.best_move, Move::Pass);
    assert_eq!(result.n_nodes, 0);
}

#[test]
fn test_single_move_short_circuit() {
    // Dark's only move is C1.
    let state = BoardState::from_bitboards(Square::A1.bitboard(), Square::B1.bitboard());
    let mut engine = SearchEngine::new(SearchOptions::default());
    let result = engine.run(Side::Dark, &state, &SearchRunOptions::with_depth(10));
    assert_eq!(result.best_move, Move::Play(Square::C1));
    assert_eq!(result.depth, 0);
    assert_eq!(result.n_nodes, 0);
}

#[test]
fn test_decide_returns_legal_move_and_keeps_board() {
    let mut engine = SearchEngine::new(SearchOptions::default().with_move_time(Some(30)));
    for seed in 0..8 {
        let (side, state) = random_position(100 + seed, 4 + seed as usize * 6);
        let before = state;
        let mv = engine.decide(side, &state);
        assert_eq!(state, before);
        assert!(rules::is_legal(side, &state, mv), "seed {seed}: {mv}");
    }
}

#[test]
fn test_deadline_respected() {
    let mut engine = SearchEngine::new(SearchOptions::default().with_move_time(Some(100)));
    let (side, state) = branching_position(5, 20);
    let start = Instant::now();
    let result = engine.run(side, &state, &SearchRunOptions::with_time(TimeControl::MoveTime(100)));
    assert!(start.elapsed() < Duration::from_millis(400), "took {:?}", start.elapsed());
    assert!(rules::is_legal(side, &state, result.best_move));
}

#[test]
fn test_external_abort() {
    let mut engine = SearchEngine::new(SearchOptions::new(1).with_move_time(None));
    let handle = engine.abort_handle();
    let done = Arc::new(AtomicBool::new(false));

    let aborter = {
        let done = done.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            while !done.load(Ordering::Relaxed) {
                handle.store(true, Ordering::Relaxed);
                thread::sleep(Duration::from_millis(5));
            }
        })
    };

    let (side, state) = branching_position(9, 10);
    let start = Instant::now();
    let mv = engine.decide(side, &state);
    done.store(true, Ordering::Relaxed);
    aborter.join().unwrap();

    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(rules::is_legal(side, &state, mv));
}

/// Evaluator slow enough that no iteration can finish in time.
struct SlowEvaluator;

impl Evaluator for SlowEvaluator {
    fn evaluate(&self, board: &Board) -> Score {
        thread::sleep(Duration::from_millis(5));
        board.get_player_count() as Score - board.get_opponent_count() as Score
    }
}

#[test]
fn test_fallback_to_static_ordering() {
    let options = SearchOptions::new(1).with_move_time(Some(1)).with_check_interval(1);
    let mut engine = SearchEngine::with_components(options, SlowEvaluator, CornerFirstOrdering::default());
    let (side, state) = branching_position(3, 12);
    let board = state.to_relative(side);
    assert!(board.get_moves().count() > 1);

    let result = engine.run(side, &state, &SearchRunOptions::with_time(TimeControl::MoveTime(1)));
    assert!(!result.completed);
    assert_eq!(result.depth, 0);
    assert_eq!(result.best_move, Move::Play(engine.quick_move(&board).unwrap()));
}

#[test]
fn test_level_caps_depth() {
    let options = SearchOptions::new(1).with_move_time(None).with_level(get_level(2));
    let mut engine = SearchEngine::new(options);
    let (side, state) = branching_position(1, 20);
    let result = engine.run(side, &state, &SearchRunOptions::with_time(TimeControl::Infinite));
    assert!(result.completed);
    assert_eq!(result.depth, 2);
    assert!(!result.is_endgame);
}

#[test]
fn test_depth_constraint() {
    let mut engine = fixed_depth_engine();
    let (side, state) = branching_position(2, 16);
    let result = engine.run(side, &state, &SearchRunOptions::with_depth(3));
    assert!(result.completed);
    assert_eq!(result.depth, 3);
    assert!(result.n_nodes > 0);
}

#[test]
fn test_evaluation_is_pure_and_terminal_dominates() {
    let eval = WeightedEvaluator::default();
    let (side, state) = random_position(4, 30);
    let board = state.to_relative(side);
    assert_eq!(eval.evaluate(&board), eval.evaluate(&board));
    assert_eq!(eval.evaluate_side(side, &state), eval.evaluate(&board));

    let win = Board::from_bitboards(Square::A1.bitboard() | Square::B1.bitboard(), Square::H8.bitboard());
    assert!(eval.evaluate(&win) > eval.evaluate(&board).abs());
}
