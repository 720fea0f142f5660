//! Checkers Core - Rules engine for English draughts
//!
//! This crate provides the move generation and state transitions:
//! - Board geometry on the folded 1-based serial numbering
//! - Per-piece positional and capture move enumeration
//! - Forced captures, multi-jump chains and promotion to king
//! - Game control with a move log, draw limit and winner detection
//!
//! Boards are values: applying a move clones the board and mutates the copy,
//! so boards can be held and searched independently.

pub mod geometry;
pub mod piece;
pub mod index;
pub mod board;
pub mod game;
pub mod config;
pub mod error;
pub mod perft;

// Re-exports for convenient access
pub use geometry::{Layout, Position, STANDARD_HEIGHT, STANDARD_WIDTH};
pub use piece::{Piece, PieceId, PieceState, Player};
pub use index::BoardIndex;
pub use board::{Board, Move};
pub use game::GameController;
pub use config::{BoardConfig, PieceSetup, DEFAULT_NONCAPTURE_MOVE_LIMIT};
pub use error::CheckersError;
