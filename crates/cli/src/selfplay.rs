//! Engine-vs-engine games in the terminal.

use anyhow::{Context, Result};
use colored::Colorize;
use othello_core::disc::{Disc, Side};
use othello_core::game_state::GameState;
use othello_core::player::{MoveProvider, RandomPlayer};
use othello_core::rules;
use othello_core::search::{SearchEngine, SearchRunOptions};
use othello_core::square::Square;
use tracing::info;

/// Plays one game of the engine against itself from the initial position.
///
/// # Arguments
///
/// * `engine` - Engine used for both sides
/// * `random_plies` - Number of uniformly random moves played first
/// * `seed` - Seed of the random moves, drawn from the thread generator if `None`
pub fn selfplay(engine: &mut SearchEngine, random_plies: u32, seed: Option<u64>) -> Result<()> {
    let mut opening = seed.map_or_else(RandomPlayer::new, RandomPlayer::with_seed);
    let run_options = SearchRunOptions::from(engine.options());
    let mut game = GameState::new();
    let mut ply = 0u32;

    print_board(&game);
    while !game.is_game_over() {
        let side = game.side_to_move();
        let mv = if ply < random_plies {
            let mv = opening.decide(side, game.board());
            info!(ply, %side, %mv, "random move");
            mv
        } else {
            let result = engine.run(side, game.board(), &run_options);
            info!(
                ply,
                %side,
                mv = %result.best_move,
                score = result.score,
                depth = result.depth,
                nodes = result.n_nodes,
                "engine move"
            );
            result.best_move
        };

        game.make_move(mv).with_context(|| format!("{side} played {mv} at ply {ply}"))?;
        ply += 1;
        print_board(&game);
    }

    let (light, dark) = game.get_score();
    println!("Final score: Dark {dark} - Light {light}");
    Ok(())
}

/// Prints a colored board with the legal moves of the side to move marked.
fn print_board(game: &GameState) {
    let board = game.board();
    let side = game.side_to_move();
    let legal = if game.is_game_over() {
        0u64.into()
    } else {
        rules::legal_move_mask(side, board)
    };
    let last_move = game.last_move();
    let (light_count, dark_count) = game.get_score();

    println!("      a   b   c   d   e   f   g   h");
    println!("    ┌───┬───┬───┬───┬───┬───┬───┬───┐");

    let squares: Vec<Square> = Square::iter().collect();
    for (y, row) in squares.chunks(8).enumerate() {
        print!("  {} │", y + 1);

        for &sq in row {
            let is_last_move = last_move == Some(sq);

            let symbol = match board.get(sq) {
                Disc::Dark if is_last_move => " X ".on_bright_black().bright_green(),
                Disc::Light if is_last_move => " O ".on_bright_black().bright_yellow(),
                Disc::Dark => " X ".bright_green(),
                Disc::Light => " O ".bright_yellow(),
                Disc::Empty if legal.contains(sq) => " · ".bright_cyan(),
                Disc::Empty => "   ".black(),
            };
            print!("{symbol}│");
        }

        match y {
            2 if !game.is_game_over() => {
                let turn = match side {
                    Side::Dark => "Dark to move (X)".bright_green(),
                    Side::Light => "Light to move (O)".bright_yellow(),
                };
                println!("   {turn}");
            }
            3 => println!("   Dark:  {}", format!("{dark_count:2}").bright_green()),
            4 => println!("   Light: {}", format!("{light_count:2}").bright_yellow()),
            6 if game.is_game_over() => match game.leader() {
                Some(Side::Dark) => println!("   {}", "Dark wins!".bright_green()),
                Some(Side::Light) => println!("   {}", "Light wins!".bright_yellow()),
                None => println!("   {}", "Draw".bright_cyan()),
            },
            _ => println!(),
        }

        if y < 7 {
            println!("    ├───┼───┼───┼───┼───┼───┼───┼───┤");
        }
    }

    println!("    └───┴───┴───┴───┴───┴───┴───┴───┘");
}
