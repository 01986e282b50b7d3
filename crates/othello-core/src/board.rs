//! Side-relative board representation used inside the search.

use std::fmt;
use std::hash::Hash;

use crate::bitboard::Bitboard;
use crate::constants::BOARD_SQUARES;
use crate::disc::Disc;
use crate::flip;
use crate::square::Square;
use crate::types::Score;

/// A board seen from the side to move.
///
/// `player` holds the discs of the side to move and `opponent` those of the
/// other side. Playing a move swaps the two, so the same code serves both
/// colours and the side to move is implied by which bitboard is which.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Bitboard representing the discs of the side to move.
    pub player: Bitboard,
    /// Bitboard representing the other side's discs.
    pub opponent: Bitboard,
}

impl Default for Board {
    /// Creates a board with the starting position, Light to move.
    ///
    /// Light holds D4 and E5, Dark holds D5 and E4.
    fn default() -> Self {
        Board {
            player: Square::D4.bitboard() | Square::E5.bitboard(),
            opponent: Square::D5.bitboard() | Square::E4.bitboard(),
        }
    }
}

impl Board {
    /// Creates a new `Board` with the starting position.
    pub fn new() -> Board {
        Default::default()
    }

    /// Creates a `Board` from given bitboards.
    ///
    /// # Arguments
    /// * `player` - Bitboard representing the side to move.
    /// * `opponent` - Bitboard representing the other side.
    pub fn from_bitboards(player: impl Into<Bitboard>, opponent: impl Into<Bitboard>) -> Board {
        Board {
            player: player.into(),
            opponent: opponent.into(),
        }
    }

    /// Creates a `Board` from a 64-character string (A1..H8).
    ///
    /// Characters equal to `side_to_move` become player discs, any other
    /// disc character becomes an opponent disc, and `-`/`.` are empty.
    ///
    /// # Arguments
    /// * `board_string` - A string representing the board.
    /// * `side_to_move` - Disc colour of the side to move.
    pub fn from_string(board_string: &str, side_to_move: Disc) -> Board {
        let mut player = Bitboard::new(0);
        let mut opponent = Bitboard::new(0);
        for (sq, c) in board_string.chars().take(BOARD_SQUARES).enumerate() {
            let square = Square::from_usize_unchecked(sq);
            match Disc::from_char(c) {
                Some(Disc::Empty) | None => {}
                Some(disc) if disc == side_to_move => player = player.set(square),
                Some(_) => opponent = opponent.set(square),
            }
        }
        Board { player, opponent }
    }

    /// Gets the disc at a specific square.
    ///
    /// # Arguments
    /// * `sq` - The square to check.
    /// * `side_to_move` - Disc colour of the side to move.
    #[inline]
    pub fn get_disc_at(&self, sq: Square, side_to_move: Disc) -> Disc {
        if self.player.contains(sq) {
            side_to_move
        } else if self.opponent.contains(sq) {
            side_to_move.opposite()
        } else {
            Disc::Empty
        }
    }

    /// Checks if the game is over (neither side can move).
    #[inline]
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_moves() && !self.switch_players().has_legal_moves()
    }

    /// Gets the empty squares.
    #[inline(always)]
    pub fn get_empty(&self) -> Bitboard {
        !(self.player | self.opponent)
    }

    /// Returns the number of discs of the side to move.
    #[inline(always)]
    pub fn get_player_count(&self) -> u32 {
        self.player.count()
    }

    /// Returns the number of discs of the other side.
    #[inline(always)]
    pub fn get_opponent_count(&self) -> u32 {
        self.opponent.count()
    }

    /// Returns the number of empty squares on the board.
    #[inline(always)]
    pub fn get_empty_count(&self) -> u32 {
        self.get_empty().count()
    }

    /// Returns the board with the roles of the two sides exchanged.
    #[inline(always)]
    pub fn switch_players(&self) -> Board {
        Board {
            player: self.opponent,
            opponent: self.player,
        }
    }

    /// Attempts to make a move for the side to move.
    ///
    /// # Arguments
    /// * `sq` - The square where the disc is placed.
    ///
    /// # Returns
    /// `Some(Board)` with the updated board if the move is valid, `None` otherwise.
    #[inline]
    pub fn try_make_move(&self, sq: Square) -> Option<Board> {
        if !self.get_empty().contains(sq) || !self.opponent.has_adjacent_bit(sq) {
            return None;
        }

        let flipped = flip::flip(sq, self.player, self.opponent);
        if flipped.is_empty() {
            return None;
        }

        Some(self.make_move_with_flipped(flipped, sq))
    }

    /// Makes a move for the side to move and returns the resulting board.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the move flips nothing.
    #[inline(always)]
    pub fn make_move(&self, sq: Square) -> Board {
        let flipped = flip::flip(sq, self.player, self.opponent);
        debug_assert!(!flipped.is_empty(), "{sq} is not a legal move\n{self}");
        self.make_move_with_flipped(flipped, sq)
    }

    /// Makes a move given the already calculated flipped discs.
    ///
    /// # Arguments
    /// * `flipped` - The discs flipped by the move.
    /// * `sq` - The square where the disc is placed.
    #[inline(always)]
    pub fn make_move_with_flipped(&self, flipped: Bitboard, sq: Square) -> Board {
        Board {
            player: self.opponent.apply_flip(flipped),
            opponent: self.player.apply_move(flipped, sq),
        }
    }

    /// Plays a move in place; the other side is to move afterwards.
    ///
    /// # Arguments
    /// * `flipped` - The discs flipped by the move, as returned by [`flip::flip`].
    /// * `sq` - The square where the disc is placed.
    #[inline(always)]
    pub fn play(&mut self, flipped: Bitboard, sq: Square) {
        *self = self.make_move_with_flipped(flipped, sq);
    }

    /// Takes back a move made with [`Board::play`] using the same arguments.
    ///
    /// The restored board is bit-for-bit identical to the board before `play`.
    #[inline(always)]
    pub fn undo(&mut self, flipped: Bitboard, sq: Square) {
        *self = Board {
            player: self.opponent.apply_move(flipped, sq),
            opponent: self.player.apply_flip(flipped),
        };
    }

    /// Passes in place: the other side becomes the side to move.
    #[inline(always)]
    pub fn pass(&mut self) {
        std::mem::swap(&mut self.player, &mut self.opponent);
    }

    /// Returns a bitboard of the legal moves of the side to move.
    #[inline(always)]
    pub fn get_moves(&self) -> Bitboard {
        self.player.get_moves(self.opponent)
    }

    /// Checks if the side to move has any legal move.
    #[inline(always)]
    pub fn has_legal_moves(&self) -> bool {
        !self.get_moves().is_empty()
    }

    /// Gets the potential moves (empty squares next to an opponent disc).
    #[inline(always)]
    pub fn get_potential_moves(&self) -> Bitboard {
        self.player.get_potential_moves(self.opponent)
    }

    /// Gets the frontier discs of the side to move: discs next to an empty square.
    #[inline]
    pub fn get_frontier(&self) -> Bitboard {
        self.player & self.get_empty().adjacent()
    }

    /// Checks if a given square is empty.
    #[inline]
    pub fn is_square_empty(&self, sq: Square) -> bool {
        self.get_empty().contains(sq)
    }

    /// Final disc margin for the side to move, as if the game ended now.
    ///
    /// Empty squares are awarded to the side ahead; a draw stays 0.
    #[inline]
    pub fn final_score(&self) -> Score {
        let diff = self.get_player_count() as Score - self.get_opponent_count() as Score;
        let empties = self.get_empty_count() as Score;
        match diff {
            d if d > 0 => d + empties,
            d if d < 0 => d - empties,
            _ => 0,
        }
    }

    /// Calculates a hash of the current board position.
    ///
    /// The hash depends on which bitboard is the player's, so it also encodes
    /// the side to move.
    #[inline]
    pub fn hash(&self) -> u64 {
        use rapidhash::v3;
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.player.bits().to_le_bytes());
        bytes[8..].copy_from_slice(&self.opponent.bits().to_le_bytes());
        v3::rapidhash_v3_nano_inline::<true, false>(&bytes, &v3::DEFAULT_RAPID_SECRETS)
    }

    /// Rotates the board 180 degrees.
    #[inline]
    pub fn rotate_180(&self) -> Board {
        Board {
            player: self.player.rotate_180(),
            opponent: self.opponent.rotate_180(),
        }
    }

    /// Flips the board vertically (rank 1 ↔ rank 8).
    pub fn flip_vertical(&self) -> Board {
        Board {
            player: self.player.flip_vertical(),
            opponent: self.opponent.flip_vertical(),
        }
    }

    /// Flips the board horizontally (file A ↔ file H).
    pub fn flip_horizontal(&self) -> Board {
        Board {
            player: self.player.flip_horizontal(),
            opponent: self.opponent.flip_horizontal(),
        }
    }

    /// Converts the board to a 64-character string, A1..H8, with rows
    /// separated by newlines.
    ///
    /// # Arguments
    /// * `side_to_move` - Disc colour used for the player's discs.
    pub fn to_string_as_board(&self, side_to_move: Disc) -> String {
        let mut s = String::with_capacity(64 + 8);
        for (i, sq) in Square::iter().enumerate() {
            if i > 0 && i % 8 == 0 {
                s.push('\n');
            }
            s.push(self.get_disc_at(sq, side_to_move).to_char());
        }
        s
    }
}

impl fmt::Display for Board {
    /// Formats the board with the side to move shown as Light (`O`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_as_board(Disc::Light))
    }
}
