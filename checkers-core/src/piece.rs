//! Pieces and per-piece move enumeration

use std::fmt;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::Move;
use crate::geometry::{Layout, Position};
use crate::index::BoardIndex;

/// Index of a piece inside the owning board's piece list
pub type PieceId = usize;

/// Player identifier. Player one moves toward increasing rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric id, 1 or 2
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Row step taken when moving forward
    pub fn direction(self) -> i16 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Where a piece is. Capture is permanent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceState {
    OnBoard(Position),
    Captured,
}

/// Capture moves plus the enemy each landing square would remove
#[derive(Debug, Default)]
struct CaptureMoves {
    moves: Vec<Move>,
    enemies: FxHashMap<Position, PieceId>,
}

/// A single checker.
///
/// Move lists are memoized against the index of the board that owns the
/// piece. Cloning a piece never carries them over.
#[derive(Debug)]
pub struct Piece {
    player: Player,
    other_player: Player,
    king: bool,
    state: PieceState,
    positional_moves: OnceLock<Vec<Move>>,
    capture_moves: OnceLock<CaptureMoves>,
}

impl Piece {
    pub fn new(player: Player, position: Position) -> Self {
        Self {
            player,
            other_player: player.opponent(),
            king: false,
            state: PieceState::OnBoard(position),
            positional_moves: OnceLock::new(),
            capture_moves: OnceLock::new(),
        }
    }

    /// Same piece, already promoted
    pub fn crowned(mut self) -> Self {
        self.king = true;
        self
    }

    /// Assign the owner and derive the opponent from it
    pub fn set_owner(&mut self, player: Player) {
        self.player = player;
        self.other_player = player.opponent();
        self.reset_for_new_board();
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn other_player(&self) -> Player {
        self.other_player
    }

    pub fn is_king(&self) -> bool {
        self.king
    }

    pub fn is_captured(&self) -> bool {
        self.state == PieceState::Captured
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    /// Current square, `None` once captured
    pub fn position(&self) -> Option<Position> {
        match self.state {
            PieceState::OnBoard(position) => Some(position),
            PieceState::Captured => None,
        }
    }

    /// Drop memoized move lists
    pub fn reset_for_new_board(&mut self) {
        self.positional_moves = OnceLock::new();
        self.capture_moves = OnceLock::new();
    }

    /// True if the piece is still on the board and has any move
    pub fn is_movable(&self, layout: &Layout, index: &BoardIndex) -> bool {
        !self.is_captured()
            && (!self.get_possible_capture_moves(layout, index).is_empty()
                || !self.get_possible_positional_moves(layout, index).is_empty())
    }

    /// Remove the piece from the board for good
    pub fn capture(&mut self) {
        self.state = PieceState::Captured;
    }

    /// Relocate, crowning the piece if it lands on the opponent's home row
    pub fn move_to(&mut self, position: Position, layout: &Layout) {
        self.state = PieceState::OnBoard(position);
        self.king = self.king || self.is_on_enemy_home_row(layout);
    }

    pub fn is_on_enemy_home_row(&self, layout: &Layout) -> bool {
        self.position()
            .is_some_and(|position| layout.row_of(position) == layout.promotion_row(self.player))
    }

    /// Squares this piece could step to or jump over
    pub fn adjacent_positions(&self, layout: &Layout) -> Vec<Position> {
        match self.position() {
            Some(position) => layout.adjacent_positions(position, self.player, self.king),
            None => Vec::new(),
        }
    }

    /// Non-capturing steps onto open neighbouring squares
    pub fn get_possible_positional_moves(&self, layout: &Layout, index: &BoardIndex) -> &[Move] {
        self.positional_moves
            .get_or_init(|| self.build_possible_positional_moves(layout, index))
    }

    /// Jumps over an adjacent enemy onto the open square behind it
    pub fn get_possible_capture_moves(&self, layout: &Layout, index: &BoardIndex) -> &[Move] {
        &self.capture_moves(layout, index).moves
    }

    /// Enemy removed by the capture landing on `landing`
    pub fn captured_enemy(&self, layout: &Layout, index: &BoardIndex, landing: Position) -> Option<PieceId> {
        self.capture_moves(layout, index).enemies.get(&landing).copied()
    }

    fn capture_moves(&self, layout: &Layout, index: &BoardIndex) -> &CaptureMoves {
        self.capture_moves
            .get_or_init(|| self.build_possible_capture_moves(layout, index))
    }

    fn build_possible_positional_moves(&self, layout: &Layout, index: &BoardIndex) -> Vec<Move> {
        let Some(from) = self.position() else {
            return Vec::new();
        };

        self.adjacent_positions(layout)
            .into_iter()
            .filter(|&position| index.is_open(position))
            .map(|to| Move::new(from, to))
            .collect()
    }

    fn build_possible_capture_moves(&self, layout: &Layout, index: &BoardIndex) -> CaptureMoves {
        let mut captures = CaptureMoves::default();
        let Some(from) = self.position() else {
            return captures;
        };

        let enemy_positions = index.positions_by_player(self.other_player);
        for enemy_position in self.adjacent_positions(layout) {
            if !enemy_positions.contains(&enemy_position) {
                continue;
            }
            let Some(landing) = layout.position_behind(from, enemy_position) else {
                continue;
            };
            if !index.is_open(landing) {
                continue;
            }
            if let Some(enemy) = index.piece_at(enemy_position) {
                captures.moves.push(Move::new(from, landing));
                captures.enemies.insert(landing, enemy);
            }
        }

        captures
    }
}

impl Clone for Piece {
    /// Copies identity and state; move caches start empty.
    fn clone(&self) -> Self {
        Self {
            player: self.player,
            other_player: self.other_player,
            king: self.king,
            state: self.state,
            positional_moves: OnceLock::new(),
            capture_moves: OnceLock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_for(pieces: &[Piece]) -> BoardIndex {
        BoardIndex::build(&Layout::standard(), pieces)
    }

    #[test]
    fn test_player_numbers() {
        assert_eq!(Player::One.number(), 1);
        assert_eq!(Player::Two.number(), 2);
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::from_number(2), Some(Player::Two));
        assert_eq!(Player::from_number(3), None);
    }

    #[test]
    fn test_set_owner_derives_opponent() {
        let piece = Piece::new(Player::Two, 21);
        assert_eq!(piece.player(), Player::Two);
        assert_eq!(piece.other_player(), Player::One);
        assert_eq!(piece.position(), Some(21));
        assert!(!piece.is_king());

        let mut piece = Piece::new(Player::One, 9);
        assert_eq!(piece.other_player(), Player::Two);
        piece.set_owner(Player::Two);
        assert_eq!(piece.player(), Player::Two);
        assert_eq!(piece.other_player(), Player::One);
    }

    #[test]
    fn test_positional_moves_from_nine() {
        let layout = Layout::standard();
        let pieces = vec![Piece::new(Player::One, 9)];
        let index = index_for(&pieces);
        assert_eq!(
            pieces[0].get_possible_positional_moves(&layout, &index),
            &[Move::new(9, 13), Move::new(9, 14)]
        );
        assert!(pieces[0].get_possible_capture_moves(&layout, &index).is_empty());
    }

    #[test]
    fn test_blocked_square_is_not_a_positional_move() {
        let layout = Layout::standard();
        let pieces = vec![Piece::new(Player::One, 9), Piece::new(Player::One, 14)];
        let index = index_for(&pieces);
        assert_eq!(
            pieces[0].get_possible_positional_moves(&layout, &index),
            &[Move::new(9, 13)]
        );
    }

    #[test]
    fn test_capture_records_enemy() {
        let layout = Layout::standard();
        let pieces = vec![Piece::new(Player::One, 9), Piece::new(Player::Two, 14)];
        let index = index_for(&pieces);
        assert_eq!(
            pieces[0].get_possible_capture_moves(&layout, &index),
            &[Move::new(9, 18)]
        );
        assert_eq!(pieces[0].captured_enemy(&layout, &index, 18), Some(1));
        assert_eq!(pieces[0].captured_enemy(&layout, &index, 13), None);
    }

    #[test]
    fn test_no_capture_when_landing_is_filled() {
        let layout = Layout::standard();
        let pieces = vec![
            Piece::new(Player::One, 9),
            Piece::new(Player::Two, 14),
            Piece::new(Player::Two, 18),
        ];
        let index = index_for(&pieces);
        assert!(pieces[0].get_possible_capture_moves(&layout, &index).is_empty());
    }

    #[test]
    fn test_own_piece_is_not_captured() {
        let layout = Layout::standard();
        let pieces = vec![Piece::new(Player::One, 9), Piece::new(Player::One, 14)];
        let index = index_for(&pieces);
        assert!(pieces[0].get_possible_capture_moves(&layout, &index).is_empty());
    }

    #[test]
    fn test_king_captures_backward() {
        let layout = Layout::standard();
        let pieces = vec![Piece::new(Player::One, 18).crowned(), Piece::new(Player::Two, 14)];
        let index = index_for(&pieces);
        assert_eq!(
            pieces[0].get_possible_capture_moves(&layout, &index),
            &[Move::new(18, 9)]
        );
    }

    #[test]
    fn test_move_to_home_row_crowns() {
        let layout = Layout::standard();
        let mut piece = Piece::new(Player::One, 26);
        piece.move_to(30, &layout);
        assert!(piece.is_king());

        let mut piece = Piece::new(Player::Two, 6);
        piece.move_to(2, &layout);
        assert!(piece.is_king());

        // Crowning never reverts
        piece.move_to(6, &layout);
        assert!(piece.is_king());
    }

    #[test]
    fn test_capture_is_permanent() {
        let layout = Layout::standard();
        let mut piece = Piece::new(Player::Two, 14);
        piece.capture();
        assert!(piece.is_captured());
        assert_eq!(piece.position(), None);

        let index = index_for(std::slice::from_ref(&piece));
        assert!(!piece.is_movable(&layout, &index));
    }

    #[test]
    fn test_clone_starts_with_empty_caches() {
        let layout = Layout::standard();
        let pieces = vec![Piece::new(Player::One, 9)];
        let index = index_for(&pieces);
        let _ = pieces[0].get_possible_positional_moves(&layout, &index);
        assert!(pieces[0].positional_moves.get().is_some());

        let copy = pieces[0].clone();
        assert!(copy.positional_moves.get().is_none());
        assert!(copy.capture_moves.get().is_none());
        assert_eq!(copy.position(), Some(9));
    }
}
