//! Derived lookup tables over a board's pieces
//!
//! A `BoardIndex` is never updated in place. The owning board rebuilds it
//! from scratch whenever its piece collection changes.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::geometry::{Layout, Position};
use crate::piece::{Piece, PieceId, Player};

#[derive(Clone, Debug, Default)]
pub struct BoardIndex {
    filled_positions: FxHashSet<Position>,
    open_positions: Vec<Position>,
    player_positions: [Vec<Position>; 2],
    player_pieces: [Vec<PieceId>; 2],
    position_pieces: FxHashMap<Position, PieceId>,
}

fn slot(player: Player) -> usize {
    match player {
        Player::One => 0,
        Player::Two => 1,
    }
}

impl BoardIndex {
    /// Build every table from the uncaptured pieces in `pieces`
    pub fn build(layout: &Layout, pieces: &[Piece]) -> Self {
        let mut index = Self::default();

        let mut uncaptured: Vec<(Position, PieceId, Player)> = pieces
            .iter()
            .enumerate()
            .filter_map(|(id, piece)| piece.position().map(|position| (position, id, piece.player())))
            .collect();
        uncaptured.sort_unstable_by_key(|&(position, _, _)| position);

        for (position, id, player) in uncaptured {
            debug_assert!(
                layout.is_valid(position),
                "piece {id} sits on position {position}, outside the board"
            );
            let previous = index.position_pieces.insert(position, id);
            debug_assert!(previous.is_none(), "position {position} holds more than one piece");

            index.filled_positions.insert(position);
            index.player_positions[slot(player)].push(position);
            index.player_pieces[slot(player)].push(id);
        }

        index.open_positions = layout
            .positions()
            .filter(|position| !index.filled_positions.contains(position))
            .collect();

        tracing::trace!(
            filled = index.filled_positions.len(),
            open = index.open_positions.len(),
            "rebuilt board index"
        );

        index
    }

    pub fn filled_positions(&self) -> &FxHashSet<Position> {
        &self.filled_positions
    }

    /// Empty squares over the full range `1..=width*height`, ascending
    pub fn open_positions(&self) -> &[Position] {
        &self.open_positions
    }

    pub fn is_open(&self, position: Position) -> bool {
        !self.filled_positions.contains(&position)
    }

    /// Positions of a player's uncaptured pieces, ascending
    pub fn positions_by_player(&self, player: Player) -> &[Position] {
        &self.player_positions[slot(player)]
    }

    /// A player's uncaptured pieces, ordered by position
    pub fn pieces_by_player(&self, player: Player) -> &[PieceId] {
        &self.player_pieces[slot(player)]
    }

    pub fn piece_at(&self, position: Position) -> Option<PieceId> {
        self.position_pieces.get(&position).copied()
    }

    /// Pieces allowed to move: the one finishing a capture chain if there
    /// is one, otherwise every piece of the player to move.
    pub fn pieces_in_play<'a>(&'a self, player_turn: Player, chain_piece: Option<&'a PieceId>) -> &'a [PieceId] {
        match chain_piece {
            Some(id) => std::slice::from_ref(id),
            None => self.pieces_by_player(player_turn),
        }
    }
}
