use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use othello_core::board_state::BoardState;
use othello_core::disc::Side;
use othello_core::search::SearchEngine;
use tracing::warn;

/// Solves every position listed in `file_path` and prints one table row per position.
///
/// # Arguments
///
/// * `file_path` - Positions, one `<64 cells> <X|O>` per line. Text after `%` is ignored.
/// * `engine` - Engine used for the exact solves
pub fn solve(file_path: &Path, engine: &mut SearchEngine) -> Result<()> {
    let file = File::open(file_path).with_context(|| format!("cannot open {}", file_path.display()))?;
    let reader = BufReader::new(file);

    println!(
        "| {:^3} | {:^6} | {:^5} | {:^9} | {:^11} | {:^10} | {:^4} |",
        "#", "Depth", "Score", "Time", "Nodes", "N/s", "Move"
    );
    println!("|-----|--------|-------|-----------|-------------|------------|------|");

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = match line.find('%') {
            Some(comment_pos) => &line[..comment_pos],
            None => &line,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_position_line(line) {
            Ok((board, side)) => solve_position(engine, &board, side, line_num + 1),
            Err(e) => warn!("skipping line {}: {e:#}", line_num + 1),
        }
    }

    Ok(())
}

fn parse_position_line(line: &str) -> Result<(BoardState, Side)> {
    let mut fields = line.split_whitespace();
    let board_field = fields.next().ok_or_else(|| anyhow!("empty line"))?;
    let side_field = fields.next().ok_or_else(|| anyhow!("missing side to move"))?;
    if let Some(extra) = fields.next() {
        bail!("unexpected field '{extra}'");
    }

    let board = board_field.parse::<BoardState>()?;
    let side = side_field.parse::<Side>()?;
    Ok((board, side))
}

fn solve_position(engine: &mut SearchEngine, board: &BoardState, side: Side, position_num: usize) {
    let result = engine.solve(side, board);
    let elapsed = result.elapsed;

    let depth = if result.completed {
        format!("{}", result.depth)
    } else {
        format!("{}?", result.depth)
    };

    println!(
        "| {:^3} | {:^6} | {:^+5} | {:>2}:{:06.3} | {:>11} | {:>10} | {:^4} |",
        position_num,
        depth,
        result.score,
        elapsed.as_secs() / 60,
        elapsed.as_secs_f64() % 60.0,
        result.n_nodes,
        result.nodes_per_second(),
        result.best_move.to_string()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "---------------------------OX------XO---------------------------";

    #[test]
    fn test_parse_position_line() {
        let (board, side) = parse_position_line(&format!("{START} X")).unwrap();
        assert_eq!(board, BoardState::default());
        assert_eq!(side, Side::Dark);

        let (_, side) = parse_position_line(&format!("  {START}   O ")).unwrap();
        assert_eq!(side, Side::Light);
    }

    #[test]
    fn test_parse_position_line_errors() {
        assert!(parse_position_line("").is_err());
        assert!(parse_position_line(START).is_err());
        assert!(parse_position_line(&format!("{START} Z")).is_err());
        assert!(parse_position_line(&format!("{START} X extra")).is_err());
        assert!(parse_position_line("XO-- X").is_err());
    }
}
