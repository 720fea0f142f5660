//! Board state, legal move aggregation and move application

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{BoardConfig, PieceSetup};
use crate::error::CheckersError;
use crate::geometry::{Layout, Position};
use crate::index::BoardIndex;
use crate::piece::{Piece, PieceId, Player};

/// A move between two serial positions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl From<(Position, Position)> for Move {
    fn from((from, to): (Position, Position)) -> Self {
        Self::new(from, to)
    }
}

/// Checkers board (clone to mutate).
///
/// Every board owns its pieces outright. `create_new_board_from_move` clones
/// the whole board and mutates only the copy, so any number of boards can be
/// held or searched side by side.
#[derive(Debug)]
pub struct Board {
    layout: Layout,
    pieces: Vec<Piece>,
    index: BoardIndex,
    player_turn: Player,
    /// Piece that must keep jumping before the turn can pass
    piece_requiring_further_capture: Option<PieceId>,
    previous_move_was_capture: bool,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard 4x8 board in the starting position, player one to move
    pub fn new() -> Self {
        let config = BoardConfig::default();
        let mut board = Self::empty(Layout::standard(), Player::One);
        board.set_pieces(starting_pieces(&config).expect("standard config is valid"));
        board
    }

    /// Starting position for an arbitrary board configuration
    pub fn with_config(config: &BoardConfig) -> Result<Self, CheckersError> {
        let layout = config.layout()?;
        let mut board = Self::empty(layout, Player::One);
        board.set_pieces(starting_pieces(config)?);
        Ok(board)
    }

    /// Custom position, e.g. for endgames or tests
    pub fn from_pieces(
        config: &BoardConfig,
        player_turn: Player,
        setup: &[PieceSetup],
    ) -> Result<Self, CheckersError> {
        let layout = config.layout()?;
        let mut pieces: Vec<Piece> = Vec::with_capacity(setup.len());

        for entry in setup {
            if !layout.is_valid(entry.position) {
                return Err(CheckersError::PositionOutOfRange {
                    position: entry.position,
                    max: layout.position_count(),
                });
            }
            if pieces.iter().any(|piece| piece.position() == Some(entry.position)) {
                return Err(CheckersError::DuplicatePosition(entry.position));
            }

            let piece = Piece::new(entry.player, entry.position);
            pieces.push(if entry.king { piece.crowned() } else { piece });
        }

        let mut board = Self::empty(layout, player_turn);
        board.set_pieces(pieces);
        Ok(board)
    }

    fn empty(layout: Layout, player_turn: Player) -> Self {
        Self {
            layout,
            pieces: Vec::new(),
            index: BoardIndex::default(),
            player_turn,
            piece_requiring_further_capture: None,
            previous_move_was_capture: false,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn index(&self) -> &BoardIndex {
        &self.index
    }

    pub fn whose_turn(&self) -> Player {
        self.player_turn
    }

    pub fn previous_move_was_capture(&self) -> bool {
        self.previous_move_was_capture
    }

    /// All pieces, captured ones included
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.index.piece_at(position).map(|id| &self.pieces[id])
    }

    /// Piece in the middle of a capture chain, if any
    pub fn piece_requiring_further_capture(&self) -> Option<&Piece> {
        self.piece_requiring_further_capture.map(|id| &self.pieces[id])
    }

    pub fn position_is_open(&self, position: Position) -> bool {
        self.index.piece_at(position).is_none()
    }

    pub fn count_movable_player_pieces(&self, player: Player) -> usize {
        self.index
            .pieces_by_player(player)
            .iter()
            .filter(|&&id| self.pieces[id].is_movable(&self.layout, &self.index))
            .count()
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Legal moves: captures when any exist, positional moves otherwise
    pub fn get_possible_moves(&self) -> Vec<Move> {
        let capture_moves = self.get_possible_capture_moves();
        if capture_moves.is_empty() {
            self.get_possible_positional_moves()
        } else {
            capture_moves
        }
    }

    pub fn get_possible_capture_moves(&self) -> Vec<Move> {
        self.pieces_in_play()
            .iter()
            .flat_map(|&id| self.pieces[id].get_possible_capture_moves(&self.layout, &self.index))
            .copied()
            .collect()
    }

    pub fn get_possible_positional_moves(&self) -> Vec<Move> {
        self.pieces_in_play()
            .iter()
            .flat_map(|&id| self.pieces[id].get_possible_positional_moves(&self.layout, &self.index))
            .copied()
            .collect()
    }

    fn pieces_in_play(&self) -> &[PieceId] {
        self.index
            .pieces_in_play(self.player_turn, self.piece_requiring_further_capture.as_ref())
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply `mv` to a copy of this board and return the copy.
    ///
    /// # Panics
    ///
    /// If no piece stands on `mv.from`. Callers are expected to pass a move
    /// taken from [`Board::get_possible_moves`].
    pub fn create_new_board_from_move(&self, mv: Move) -> Board {
        let mut new_board = self.clone();

        if self.get_possible_capture_moves().contains(&mv) {
            new_board.perform_capture_move(mv);
        } else {
            new_board.perform_positional_move(mv);
        }

        new_board
    }

    fn perform_capture_move(&mut self, mv: Move) {
        self.previous_move_was_capture = true;

        let mover = self
            .index
            .piece_at(mv.from)
            .expect("No piece at capture origin");
        let originally_was_king = self.pieces[mover].is_king();
        let enemy = self.pieces[mover]
            .captured_enemy(&self.layout, &self.index, mv.to)
            .expect("Capture move has no enemy piece");

        self.pieces[enemy].capture();
        self.move_piece(mover, mv.to);

        let further_capture = self
            .get_possible_capture_moves()
            .iter()
            .any(|capture| capture.from == mv.to);

        if further_capture && originally_was_king == self.pieces[mover].is_king() {
            debug!(piece = %mv.to, player = %self.player_turn, "capture chain continues");
            self.piece_requiring_further_capture = Some(mover);
        } else {
            self.piece_requiring_further_capture = None;
            self.switch_turn();
        }
    }

    fn perform_positional_move(&mut self, mv: Move) {
        self.previous_move_was_capture = false;

        let mover = self
            .index
            .piece_at(mv.from)
            .expect("No piece at move origin");
        self.move_piece(mover, mv.to);

        self.piece_requiring_further_capture = None;
        self.switch_turn();
    }

    fn move_piece(&mut self, id: PieceId, to: Position) {
        self.pieces[id].move_to(to, &self.layout);
        let pieces = std::mem::take(&mut self.pieces);
        self.set_pieces(pieces);
    }

    fn switch_turn(&mut self) {
        self.player_turn = self.player_turn.opponent();
    }

    /// Replace the piece collection: drop every memoized move list, then
    /// rebuild the index from scratch.
    pub(crate) fn set_pieces(&mut self, mut pieces: Vec<Piece>) {
        for piece in &mut pieces {
            piece.reset_for_new_board();
        }
        self.pieces = pieces;
        self.index = BoardIndex::build(&self.layout, &self.pieces);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Board {
    /// Deep copy: fresh pieces and a freshly built index.
    fn clone(&self) -> Self {
        let mut board = Self {
            piece_requiring_further_capture: self.piece_requiring_further_capture,
            previous_move_was_capture: self.previous_move_was_capture,
            ..Self::empty(self.layout, self.player_turn)
        };
        board.set_pieces(self.pieces.clone());
        board
    }
}

/// Player one on the first `rows_per_player` rows, player two on the last
fn starting_pieces(config: &BoardConfig) -> Result<Vec<Piece>, CheckersError> {
    let mut pieces = Vec::new();
    for player in [Player::One, Player::Two] {
        pieces.extend(
            config
                .starting_positions(player)?
                .map(|position| Piece::new(player, position)),
        );
    }
    Ok(pieces)
}
