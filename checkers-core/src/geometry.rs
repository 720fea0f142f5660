//! Board geometry on the folded serial numbering
//!
//! Only the playable (dark) squares are numbered, `width` per row, starting at
//! 1 in the first row. Even rows are shifted half a square relative to odd
//! rows, so the diagonal neighbours of a square depend on its row parity.

use serde::{Deserialize, Serialize};

use crate::error::CheckersError;
use crate::piece::Player;

/// 1-based serial position of a playable square
pub type Position = u8;

/// Playable squares per row on the standard board
pub const STANDARD_WIDTH: u8 = 4;

/// Rows on the standard board
pub const STANDARD_HEIGHT: u8 = 8;

/// Maps (row, column) pairs to serial positions and back.
///
/// Rows and columns are signed so that neighbour arithmetic can step off the
/// board; such coordinates simply have no position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LayoutDimensions")]
pub struct Layout {
    width: u8,
    height: u8,
}

/// Unchecked dimensions as read from serialized data
#[derive(Deserialize)]
struct LayoutDimensions {
    width: u8,
    height: u8,
}

impl TryFrom<LayoutDimensions> for Layout {
    type Error = CheckersError;

    fn try_from(dimensions: LayoutDimensions) -> Result<Self, Self::Error> {
        Layout::new(dimensions.width, dimensions.height)
    }
}

impl Layout {
    /// Create a layout, rejecting empty boards and boards with more cells
    /// than a `Position` can number.
    pub fn new(width: u8, height: u8) -> Result<Self, CheckersError> {
        let cells = u16::from(width) * u16::from(height);
        if width == 0 || height == 0 || cells > u16::from(Position::MAX) {
            return Err(CheckersError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// The standard 4x8 layout (32 playable squares)
    pub const fn standard() -> Self {
        Self {
            width: STANDARD_WIDTH,
            height: STANDARD_HEIGHT,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of playable squares, which is also the last valid position
    pub fn position_count(&self) -> Position {
        self.width * self.height
    }

    /// All valid positions, `1..=width*height`
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        1..=self.position_count()
    }

    pub fn is_valid(&self, position: Position) -> bool {
        position >= 1 && position <= self.position_count()
    }

    /// Row index: `ceil(position / width) - 1`
    pub fn row_of(&self, position: Position) -> i16 {
        let width = i16::from(self.width);
        (i16::from(position) + width - 1) / width - 1
    }

    /// Column index: `(position - 1) mod width`
    pub fn column_of(&self, position: Position) -> i16 {
        (i16::from(position) - 1).rem_euclid(i16::from(self.width))
    }

    /// Position at (row, column), if that cell is on the board
    pub fn position_at(&self, row: i16, column: i16) -> Option<Position> {
        if row < 0 || row >= i16::from(self.height) {
            return None;
        }
        if column < 0 || column >= i16::from(self.width) {
            return None;
        }
        let position = row * i16::from(self.width) + column + 1;
        Position::try_from(position).ok()
    }

    /// Row a piece of `player` is promoted on: the opponent's home row
    pub fn promotion_row(&self, player: Player) -> i16 {
        match player.opponent() {
            Player::One => 0,
            Player::Two => i16::from(self.height) - 1,
        }
    }

    /// Neighbouring positions one row ahead of (or behind, when `forward` is
    /// false) a piece of `player` standing on `position`.
    pub fn directional_adjacent_positions(
        &self,
        position: Position,
        player: Player,
        forward: bool,
    ) -> Vec<Position> {
        let current_row = self.row_of(position);
        let forward_sign = if forward { 1 } else { -1 };
        let next_row = current_row + player.direction() * forward_sign;

        next_columns(current_row, self.column_of(position))
            .into_iter()
            .filter_map(|column| self.position_at(next_row, column))
            .collect()
    }

    /// Forward neighbours, followed by backward ones for kings
    pub fn adjacent_positions(&self, position: Position, player: Player, king: bool) -> Vec<Position> {
        let mut positions = self.directional_adjacent_positions(position, player, true);
        if king {
            positions.extend(self.directional_adjacent_positions(position, player, false));
        }
        positions
    }

    /// Landing square when jumping from `position` over the piece on `enemy`
    pub fn position_behind(&self, position: Position, enemy: Position) -> Option<Position> {
        let current_row = self.row_of(position);
        let current_column = self.column_of(position);
        let enemy_row = self.row_of(enemy);
        let enemy_column = self.column_of(enemy);

        let column_adjustment = if current_row % 2 == 0 { -1 } else { 1 };
        let column_behind = if current_column == enemy_column {
            current_column + column_adjustment
        } else {
            enemy_column
        };
        let row_behind = enemy_row + (enemy_row - current_row);

        self.position_at(row_behind, column_behind)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

/// Candidate columns in the next row; may fall outside the board
fn next_columns(current_row: i16, current_column: i16) -> [i16; 2] {
    if current_row % 2 == 0 {
        [current_column, current_column + 1]
    } else {
        [current_column - 1, current_column]
    }
}
