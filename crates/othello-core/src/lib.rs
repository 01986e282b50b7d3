pub mod bitboard;
pub mod board;
pub mod board_state;
pub mod constants;
pub mod disc;
pub mod eval;
pub mod flip;
pub mod game_state;
pub mod level;
pub mod move_list;
pub mod moves;
pub mod ordering;
pub mod perft;
pub mod player;
pub mod rules;
pub mod search;
pub mod square;
pub mod stability;
pub mod transposition_table;
pub mod types;

/// Builds the lookup tables ahead of the first search.
///
/// Calling it is optional; the tables are otherwise built on first use.
pub fn init() {
    stability::init();
}
