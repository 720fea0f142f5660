//! Game controller: move validation, move log and end-of-game detection

use tracing::debug;

use crate::board::{Board, Move};
use crate::config::{BoardConfig, DEFAULT_NONCAPTURE_MOVE_LIMIT};
use crate::error::CheckersError;
use crate::piece::Player;

/// A game in progress.
///
/// Holds the current board, every move played so far, and the number of
/// consecutive plies without a capture.
#[derive(Clone, Debug)]
pub struct GameController {
    board: Board,
    moves: Vec<Move>,
    consecutive_noncapture_move_limit: u32,
    moves_since_last_capture: u32,
}

impl GameController {
    /// Standard game from the starting position
    pub fn new() -> Self {
        Self::from_board(Board::new(), DEFAULT_NONCAPTURE_MOVE_LIMIT)
    }

    pub fn with_config(config: &BoardConfig) -> Result<Self, CheckersError> {
        let board = Board::with_config(config)?;
        Ok(Self::from_board(board, config.noncapture_move_limit))
    }

    /// Continue from an arbitrary board with a fresh move log
    pub fn from_board(board: Board, noncapture_move_limit: u32) -> Self {
        Self {
            board,
            moves: Vec::new(),
            consecutive_noncapture_move_limit: noncapture_move_limit,
            moves_since_last_capture: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every move applied so far, oldest first
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn moves_since_last_capture(&self) -> u32 {
        self.moves_since_last_capture
    }

    pub fn noncapture_move_limit(&self) -> u32 {
        self.consecutive_noncapture_move_limit
    }

    pub fn whose_turn(&self) -> Player {
        self.board.whose_turn()
    }

    pub fn get_possible_moves(&self) -> Vec<Move> {
        self.board.get_possible_moves()
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Play `mv` if it is legal.
    ///
    /// Rejects anything outside [`GameController::get_possible_moves`], which
    /// covers skipping a pending capture and moving another piece mid-chain.
    pub fn make_move(&mut self, mv: Move) -> Result<&mut Self, CheckersError> {
        if !self.get_possible_moves().contains(&mv) {
            return Err(CheckersError::InvalidMove(mv));
        }

        self.board = self.board.create_new_board_from_move(mv);
        self.moves.push(mv);

        if self.board.previous_move_was_capture() {
            self.moves_since_last_capture = 0;
        } else {
            self.moves_since_last_capture += 1;
        }

        debug!(
            ply = self.moves.len(),
            %mv,
            capture = self.board.previous_move_was_capture(),
            next = %self.whose_turn(),
            "move applied"
        );

        Ok(self)
    }

    // ========================================================================
    // GAME END
    // ========================================================================

    /// True once too many consecutive plies passed without a capture
    pub fn move_limit_reached(&self) -> bool {
        self.moves_since_last_capture >= self.consecutive_noncapture_move_limit
    }

    pub fn is_over(&self) -> bool {
        self.move_limit_reached() || self.get_possible_moves().is_empty()
    }

    /// Winner by immobilization: the opponent of a side to move that has no
    /// movable piece.
    ///
    /// `None` means either "still playing" or "drawn by the move limit";
    /// check [`GameController::is_over`] and
    /// [`GameController::move_limit_reached`] to tell them apart.
    pub fn get_winner(&self) -> Option<Player> {
        let turn = self.whose_turn();
        if self.board.count_movable_player_pieces(turn) == 0 {
            Some(turn.opponent())
        } else {
            None
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PieceSetup;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn custom_game(player_turn: Player, setup: &[PieceSetup], limit: u32) -> GameController {
        let board = Board::from_pieces(&BoardConfig::default(), player_turn, setup).unwrap();
        GameController::from_board(board, limit)
    }

    /// One king per side in opposite corners
    fn shuffling_kings() -> GameController {
        custom_game(
            Player::One,
            &[
                PieceSetup::king(Player::One, 1),
                PieceSetup::king(Player::Two, 32),
            ],
            DEFAULT_NONCAPTURE_MOVE_LIMIT,
        )
    }

    #[test]
    fn test_game_creation() {
        let game = GameController::new();
        assert_eq!(game.whose_turn(), Player::One);
        assert!(!game.is_over());
        assert_eq!(game.get_winner(), None);
        assert!(game.moves().is_empty());
        assert_eq!(game.get_possible_moves().len(), 7);
    }

    #[test]
    fn test_make_move_records_log() {
        let mut game = GameController::new();
        game.make_move(Move::new(9, 13))
            .unwrap()
            .make_move(Move::new(22, 18))
            .unwrap();

        assert_eq!(game.moves(), &[Move::new(9, 13), Move::new(22, 18)]);
        assert_eq!(game.whose_turn(), Player::One);
        assert_eq!(game.moves_since_last_capture(), 2);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut game = GameController::new();
        let err = game.make_move(Move::new(9, 18)).unwrap_err();
        assert_eq!(err, CheckersError::InvalidMove(Move::new(9, 18)));
        assert_eq!(err.to_string(), "The provided move 9-18 is not possible");
        assert!(game.moves().is_empty());
        assert_eq!(game.whose_turn(), Player::One);
    }

    #[test]
    fn test_pending_capture_rejects_positional_move() {
        let mut game = custom_game(
            Player::One,
            &[
                PieceSetup::man(Player::One, 9),
                PieceSetup::man(Player::One, 11),
                PieceSetup::man(Player::Two, 14),
                PieceSetup::man(Player::Two, 30),
            ],
            DEFAULT_NONCAPTURE_MOVE_LIMIT,
        );
        assert!(game.make_move(Move::new(11, 15)).is_err());
        assert!(game.make_move(Move::new(9, 18)).is_ok());
        assert_eq!(game.moves_since_last_capture(), 0);
    }

    #[test]
    fn test_capture_resets_counter() {
        let mut game = custom_game(
            Player::One,
            &[
                PieceSetup::man(Player::One, 9),
                PieceSetup::man(Player::Two, 22),
                PieceSetup::man(Player::Two, 32),
            ],
            DEFAULT_NONCAPTURE_MOVE_LIMIT,
        );
        game.make_move(Move::new(9, 14)).unwrap();
        game.make_move(Move::new(22, 18)).unwrap();
        assert_eq!(game.moves_since_last_capture(), 2);

        game.make_move(Move::new(14, 23)).unwrap();
        assert_eq!(game.moves_since_last_capture(), 0);
        assert_eq!(game.whose_turn(), Player::Two);
    }

    #[test]
    fn test_move_limit_draw() {
        let mut game = shuffling_kings();
        let shuffle = [
            Move::new(1, 5),
            Move::new(32, 28),
            Move::new(5, 1),
            Move::new(28, 32),
        ];

        for ply in 0..40 {
            assert!(!game.move_limit_reached());
            assert!(!game.is_over());
            game.make_move(shuffle[ply % shuffle.len()]).unwrap();
        }

        assert!(game.move_limit_reached());
        assert!(game.is_over());
        assert_eq!(game.get_winner(), None);

        // Stays reached until a capture
        game.make_move(shuffle[0]).unwrap();
        assert!(game.move_limit_reached());
        assert_eq!(game.moves_since_last_capture(), 41);
    }

    #[test]
    fn test_capture_after_limit_clears_draw() {
        let mut game = custom_game(
            Player::One,
            &[
                PieceSetup::man(Player::One, 9),
                PieceSetup::man(Player::Two, 22),
                PieceSetup::man(Player::Two, 32),
            ],
            2,
        );
        game.make_move(Move::new(9, 14)).unwrap();
        game.make_move(Move::new(22, 18)).unwrap();
        assert!(game.move_limit_reached());
        assert!(game.is_over());
        assert_eq!(game.get_possible_moves(), vec![Move::new(14, 23)]);

        game.make_move(Move::new(14, 23)).unwrap();
        assert_eq!(game.moves_since_last_capture(), 0);
        assert!(!game.move_limit_reached());
        assert!(!game.is_over());
        assert_eq!(game.get_winner(), None);
    }

    #[test]
    fn test_immobilized_side_loses() {
        // Player two on 25 is boxed in: 21 and 22 are taken, the jump over
        // 21 leaves the board and the one over 22 lands on 18
        let game = custom_game(
            Player::Two,
            &[
                PieceSetup::man(Player::One, 18),
                PieceSetup::man(Player::One, 21),
                PieceSetup::man(Player::One, 22),
                PieceSetup::man(Player::Two, 25),
            ],
            DEFAULT_NONCAPTURE_MOVE_LIMIT,
        );
        assert_eq!(game.board().count_movable_player_pieces(Player::Two), 0);
        assert!(game.is_over());
        assert_eq!(game.get_winner(), Some(Player::One));
    }

    #[test]
    fn test_side_without_pieces_loses() {
        let game = custom_game(
            Player::One,
            &[PieceSetup::man(Player::Two, 20)],
            DEFAULT_NONCAPTURE_MOVE_LIMIT,
        );
        assert!(game.is_over());
        assert_eq!(game.get_winner(), Some(Player::Two));
    }

    #[test]
    fn test_with_config_uses_limit() {
        let config = BoardConfig {
            noncapture_move_limit: 2,
            ..Default::default()
        };
        let mut game = GameController::with_config(&config).unwrap();
        game.make_move(Move::new(9, 13)).unwrap();
        assert!(!game.move_limit_reached());
        game.make_move(Move::new(21, 17)).unwrap();
        assert!(game.move_limit_reached());
        assert!(game.is_over());
    }

    #[test]
    fn test_random_games_terminate() {
        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut game = GameController::new();

            while !game.is_over() {
                let mv = *game.get_possible_moves().choose(&mut rng).unwrap();
                game.make_move(mv).unwrap();
            }

            // An unfinished draw count means someone was immobilized
            if !game.move_limit_reached() {
                assert_eq!(game.get_winner(), Some(game.whose_turn().opponent()));
            }
        }
    }
}
