//! Board configuration and custom setups

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::CheckersError;
use crate::geometry::{Layout, Position, STANDARD_HEIGHT, STANDARD_WIDTH};
use crate::piece::Player;

/// Plies without a capture before the game is drawn
pub const DEFAULT_NONCAPTURE_MOVE_LIMIT: u32 = 40;

/// Rows each player fills at the start of a standard game
pub const DEFAULT_ROWS_PER_PLAYER: u8 = 3;

/// Board dimensions and game limits
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Playable squares per row
    pub width: u8,
    pub height: u8,
    /// Rows filled by each player in the starting position
    pub rows_per_player: u8,
    pub noncapture_move_limit: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: STANDARD_WIDTH,
            height: STANDARD_HEIGHT,
            rows_per_player: DEFAULT_ROWS_PER_PLAYER,
            noncapture_move_limit: DEFAULT_NONCAPTURE_MOVE_LIMIT,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), CheckersError> {
        self.layout().map(|_| ())
    }

    /// Checked layout for these dimensions
    pub fn layout(&self) -> Result<Layout, CheckersError> {
        let layout = Layout::new(self.width, self.height)?;
        if u16::from(self.rows_per_player) * 2 >= u16::from(self.height) {
            return Err(CheckersError::InvalidStartingRows {
                rows: self.rows_per_player,
                height: self.height,
            });
        }
        Ok(layout)
    }

    /// Starting squares of `player`: the first `width * rows_per_player`
    /// positions for player one, the last ones for player two.
    pub fn starting_positions(
        &self,
        player: Player,
    ) -> Result<impl Iterator<Item = Position>, CheckersError> {
        let layout = self.layout()?;
        let total = layout.position_count();
        // Fewer than half the rows, so this stays below `total`
        let count = layout.width() * self.rows_per_player;
        Ok((1..=total).filter(move |&position| match player {
            Player::One => position <= count,
            Player::Two => position > total - count,
        }))
    }

    /// Load from a JSON file. Missing fields take their standard values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: BoardConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// One piece of a custom starting position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSetup {
    pub player: Player,
    pub position: Position,
    #[serde(default)]
    pub king: bool,
}

impl PieceSetup {
    pub fn man(player: Player, position: Position) -> Self {
        Self {
            player,
            position,
            king: false,
        }
    }

    pub fn king(player: Player, position: Position) -> Self {
        Self {
            player,
            position,
            king: true,
        }
    }
}
