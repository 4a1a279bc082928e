//! Move table loading

use super::ConfigError;
use crate::moves::Move;
use crate::reference::MoveTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for move definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovesConfig {
    pub moves: Vec<Move>,
}

fn into_table(config: MovesConfig) -> MoveTable {
    let mut table = MoveTable::new();
    for mv in config.moves {
        table.register(mv);
    }
    table
}

/// Load move definitions from a TOML file
pub fn load_move_table(path: &Path) -> Result<MoveTable, ConfigError> {
    let config: MovesConfig = super::load_toml(path)?;
    Ok(into_table(config))
}

/// Load move definitions from a TOML string
pub fn parse_move_table(content: &str) -> Result<MoveTable, ConfigError> {
    let config: MovesConfig = super::parse_toml(content)?;
    Ok(into_table(config))
}

/// Bundled move definitions
pub fn default_moves() -> MoveTable {
    let toml = include_str!("../../config/moves.toml");
    parse_move_table(toml).unwrap_or_else(|err| {
        tracing::error!(%err, "bundled moves failed to parse");
        MoveTable::new()
    })
}
