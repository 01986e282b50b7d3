use othello_core::board_state::BoardState;
use othello_core::disc::Side;
use othello_core::moves::Move;
use othello_core::rules;
use othello_core::search::{SearchEngine, SearchOptions};
use othello_core::square::Square;

#[test]
fn test_solve_9() {
    let mut engine = SearchEngine::new(SearchOptions::default());
    let board: BoardState = "--O--O----OOOOO-XOOOOOOOXXOOXOOOXXXXXOXXXOXXOOXXXXXXOXOXXOOOOOOX"
        .parse()
        .unwrap();
    let result = engine.solve(Side::Dark, &board);

    assert!(result.completed);
    assert!(result.is_endgame);
    assert_eq!(result.score, 28);
    assert_eq!(result.depth, 9);
    assert!(rules::is_legal(Side::Dark, &board, result.best_move));
}

#[test]
fn test_solve_11() {
    let mut engine = SearchEngine::new(SearchOptions::default());
    let board: BoardState = "X-XXXXXOOXOOOXOOOOOOOOXOX-XXOOXOXXXXXXXXX--XOXXX---OXXXX--OX-X-X"
        .parse()
        .unwrap();
    let result = engine.solve(Side::Dark, &board);

    assert_eq!(result.score, -18);
    // B1 is the only move that holds the loss to 18.
    assert_eq!(result.best_move, Move::Play(Square::B1));
}

#[test]
fn test_decide_solves_within_end_empties() {
    let mut engine = SearchEngine::new(SearchOptions::default().with_move_time(Some(5_000)));
    let board: BoardState = "X-XXXXXOOXOOOXOOOOOOOOXOX-XXOOXOXXXXXXXXX--XOXXX---OXXXX--OX-X-X"
        .parse()
        .unwrap();
    assert_eq!(engine.decide(Side::Dark, &board), Move::Play(Square::B1));
}

#[test]
fn test_solve_result_matches_played_out_margin() {
    // Both sides following the solver reach the predicted margin.
    let mut engine = SearchEngine::new(SearchOptions::default());
    let mut board: BoardState = "--O--O----OOOOO-XOOOOOOOXXOOXOOOXXXXXOXXXOXXOOXXXXXXOXOXXOOOOOOX"
        .parse()
        .unwrap();
    let predicted = engine.solve(Side::Dark, &board).score;

    let mut side = Side::Dark;
    while !rules::is_terminal(&board) {
        let mv = engine.solve(side, &board).best_move;
        board = rules::apply_move(side, &board, mv).unwrap();
        side = side.opposite();
    }
    assert_eq!(rules::final_margin(Side::Dark, &board), predicted);
}
