//! Move generator node counting.

use crate::board::Board;
use crate::move_list::MoveList;
use crate::square::Square;

/// Executes a perft run starting from the standard initial position.
///
/// # Arguments
///
/// * `depth` - Number of plies to expand from the initial position. A depth of
///   `1` counts the immediate legal moves; larger values walk the tree
///   recursively.
///
/// # Returns
///
/// The total node count the search visits from the initial position.
pub fn perft_root(depth: u32) -> u64 {
    perft(&Board::new(), depth)
}

/// Counts the leaves `depth` plies below `board`.
///
/// A forced pass does not use up a ply, and a finished game counts as a
/// single leaf wherever it occurs.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let move_list = MoveList::new(board);
    if move_list.is_empty() {
        let next = board.switch_players();
        return if next.has_legal_moves() {
            perft(&next, depth)
        } else {
            1
        };
    }

    if depth == 1 {
        return move_list.count() as u64;
    }
    move_list
        .iter()
        .map(|m| perft(&board.make_move_with_flipped(m.flipped, m.sq), depth - 1))
        .sum()
}

/// Per-move node counts of `board` at `depth`, in square order.
///
/// Empty if the side to move has to pass or the game is over.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(Square, u64)> {
    MoveList::new(board)
        .iter()
        .map(|m| {
            let next = board.make_move_with_flipped(m.flipped, m.sq);
            (m.sq, perft(&next, depth.saturating_sub(1)))
        })
        .collect()
}
