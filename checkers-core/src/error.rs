//! Error types

use crate::board::Move;
use crate::geometry::Position;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckersError {
    /// Move is not in the current legal move set
    #[error("The provided move {0} is not possible")]
    InvalidMove(Move),

    #[error("Position {position} is outside the board (1..={max})")]
    PositionOutOfRange { position: Position, max: Position },

    #[error("Position {0} is occupied by more than one piece")]
    DuplicatePosition(Position),

    #[error("A {width}x{height} board is not supported")]
    InvalidDimensions { width: u8, height: u8 },

    #[error("{rows} starting rows per player do not fit on {height} rows")]
    InvalidStartingRows { rows: u8, height: u8 },
}
