//! Game state management.
//!
//! [`GameState`] tracks the authoritative board, the side to move and the
//! history of played moves. Forced passes are inserted automatically, so a
//! driver only ever supplies real moves.

use crate::board_state::BoardState;
use crate::disc::Side;
use crate::moves::Move;
use crate::rules::{self, IllegalMoveError, MoveRecord};
use crate::square::Square;

/// A game in progress.
#[derive(Clone, Debug)]
pub struct GameState {
    /// The current board position.
    board: BoardState,
    /// Which side plays next.
    side_to_move: Side,
    /// Every move played so far, forced passes included.
    history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game in the starting position with Light to move.
    pub fn new() -> Self {
        Self::from_board(rules::initial_board(), Side::FIRST)
    }

    /// Creates a game from an existing position.
    ///
    /// # Arguments
    ///
    /// * `board` - The board position to start from
    /// * `side_to_move` - Which side moves next
    pub fn from_board(board: BoardState, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            history: Vec::new(),
        }
    }

    /// Returns the current board position.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Returns which side plays next.
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Returns the legal moves of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves(self.side_to_move, &self.board)
    }

    /// Plays a move for the side to move.
    ///
    /// If the other side is then left without a legal move while the game
    /// is not over, its pass is recorded automatically.
    ///
    /// # Arguments
    ///
    /// * `mv` - The move to play. A pass is accepted only when forced.
    ///
    /// # Errors
    ///
    /// Returns an [`IllegalMoveError`] if the move is not legal; the game is left unchanged.
    pub fn make_move(&mut self, mv: Move) -> Result<(), IllegalMoveError> {
        let record = rules::make_move(self.side_to_move, &mut self.board, mv)?;
        self.history.push(record);
        self.side_to_move = self.side_to_move.opposite();

        if !rules::is_terminal(&self.board)
            && rules::legal_move_mask(self.side_to_move, &self.board).is_empty()
        {
            let pass = rules::make_move(self.side_to_move, &mut self.board, Move::Pass)?;
            self.history.push(pass);
            self.side_to_move = self.side_to_move.opposite();
        }

        Ok(())
    }

    /// Checks if neither side can move.
    pub fn is_game_over(&self) -> bool {
        rules::is_terminal(&self.board)
    }

    /// Returns the disc counts as `(light, dark)`.
    pub fn get_score(&self) -> (u32, u32) {
        rules::score(&self.board)
    }

    /// Returns the side with more discs, or `None` for a draw.
    pub fn leader(&self) -> Option<Side> {
        let (light, dark) = self.get_score();
        match light.cmp(&dark) {
            std::cmp::Ordering::Greater => Some(Side::Light),
            std::cmp::Ordering::Less => Some(Side::Dark),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Returns the square of the last move, or `None` if it was a pass or
    /// nothing has been played.
    pub fn last_move(&self) -> Option<Square> {
        self.history.last().and_then(MoveRecord::placed)
    }

    /// Returns the moves played so far.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Undoes the last move, and the forced pass that preceded it if any.
    ///
    /// # Returns
    ///
    /// `true` if a move was undone, `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };
        rules::undo_move(&mut self.board, &record);
        self.side_to_move = record.side;

        if record.mv.is_pass() {
            if let Some(previous) = self.history.pop() {
                rules::undo_move(&mut self.board, &previous);
                self.side_to_move = previous.side;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = GameState::new();
        assert_eq!(game.side_to_move(), Side::Light);
        assert!(!game.is_game_over());
        assert_eq!(game.get_score(), (2, 2));
        assert_eq!(game.leader(), None);
    }

    #[test]
    fn test_make_move() {
        let mut game = GameState::new();
        assert!(game.make_move(Move::Play(Square::E3)).is_ok());
        assert_eq!(game.side_to_move(), Side::Dark);
        assert_eq!(game.get_score(), (4, 1));
        assert_eq!(game.last_move(), Some(Square::E3));
        assert_eq!(game.leader(), Some(Side::Light));
    }

    #[test]
    fn test_illegal_move() {
        let mut game = GameState::new();
        assert_eq!(
            game.make_move(Move::Play(Square::A1)),
            Err(IllegalMoveError::NoFlips(Square::A1))
        );
        assert_eq!(game.side_to_move(), Side::Light);
        assert!(game.move_history().is_empty());
    }

    #[test]
    fn test_undo() {
        let mut game = GameState::new();
        assert!(!game.undo());
        game.make_move(Move::Play(Square::E3)).unwrap();
        game.make_move(Move::Play(Square::F3)).unwrap();
        assert!(game.undo());
        assert!(game.undo());
        assert_eq!(*game.board(), BoardState::new());
        assert_eq!(game.side_to_move(), Side::Light);
    }

    #[test]
    fn test_automatic_pass() {
        // After C1 takes B1, Dark's lone G7 disc brackets nothing while Light
        // can still take it from F6.
        let board: BoardState = "OX------\
                                 --------\
                                 --------\
                                 --------\
                                 --------\
                                 --------\
                                 ------X-\
                                 -------O"
            .parse()
            .unwrap();
        let mut game = GameState::from_board(board, Side::Light);
        game.make_move(Move::Play(Square::C1)).unwrap();
        // Dark had to pass, Light is to move again and can still capture G7.
        assert_eq!(game.side_to_move(), Side::Light);
        assert_eq!(game.move_history().len(), 2);
        assert!(game.move_history()[1].mv.is_pass());

        assert!(game.undo());
        assert_eq!(*game.board(), board);
        assert_eq!(game.side_to_move(), Side::Light);
    }

    #[test]
    fn test_game_ends() {
        let board: BoardState = "OX------\
                                 --------\
                                 --------\
                                 --------\
                                 --------\
                                 --------\
                                 --------\
                                 --------"
            .parse()
            .unwrap();
        let mut game = GameState::from_board(board, Side::Light);
        game.make_move(Move::Play(Square::C1)).unwrap();
        assert!(game.is_game_over());
        assert_eq!(game.get_score(), (3, 0));
    }
}
