//! Configuration loading from TOML files

mod constants;
mod demons;
mod moves;
mod status_effects;

pub use constants::{
    AilmentConstants, BattleConstants, CombatConstants, PolicyConstants, TurnConstants,
};
pub use demons::{default_roster, load_demon_roster, parse_demon_roster, DemonRoster, DemonTemplate};
pub use moves::{default_moves, load_move_table, parse_move_table};
pub use status_effects::{default_statuses, load_status_table, parse_status_table};

use crate::reference::{MoveTable, ReferenceTables};
use crate::status::StatusRegistry;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load battle constants, falling back to defaults for missing keys
pub fn load_constants(path: &Path) -> Result<BattleConstants, ConfigError> {
    load_toml(path)
}

/// Bundled battle constants
pub fn default_constants() -> BattleConstants {
    let toml = include_str!("../../config/constants.toml");
    parse_toml(toml).unwrap_or_default()
}

/// Check that every status a move references exists
pub fn validate_tables(moves: &MoveTable, statuses: &StatusRegistry) -> Result<(), ConfigError> {
    for mv in moves.iter() {
        let referenced = [&mv.ailment, &mv.buff, &mv.debuff, &mv.cures_ailment];
        for id in referenced.into_iter().flatten() {
            if statuses.get(id).is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "move '{}' references unknown status '{}'",
                    mv.name, id
                )));
            }
        }
    }

    for status in statuses.iter() {
        if status.max_stacks == 0 {
            return Err(ConfigError::ValidationError(format!(
                "status '{}' has max_stacks = 0",
                status.id
            )));
        }
    }

    Ok(())
}

/// Check that every demon's abilities exist in the move table
pub fn validate_roster(roster: &DemonRoster, moves: &MoveTable) -> Result<(), ConfigError> {
    for demon in roster.iter() {
        if let Some(missing) = demon.abilities.iter().find(|a| moves.get(a).is_none()) {
            return Err(ConfigError::ValidationError(format!(
                "demon '{}' knows unknown move '{}'",
                demon.name, missing
            )));
        }
    }
    Ok(())
}

/// Load and validate reference tables from a directory holding
/// `moves.toml` and `status_effects.toml`
pub fn load_reference_tables(dir: &Path) -> Result<ReferenceTables, ConfigError> {
    let moves = load_move_table(&dir.join("moves.toml"))?;
    let statuses = load_status_table(&dir.join("status_effects.toml"))?;
    validate_tables(&moves, &statuses)?;
    Ok(ReferenceTables::new(moves, statuses))
}

/// Bundled reference tables
pub fn default_reference_tables() -> ReferenceTables {
    ReferenceTables::new(default_moves(), default_statuses())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_data_is_consistent() {
        let tables = default_reference_tables();
        assert!(!tables.moves.is_empty());
        assert!(!tables.statuses.is_empty());
        validate_tables(&tables.moves, &tables.statuses).unwrap();
        validate_roster(&default_roster(), &tables.moves).unwrap();
    }

    #[test]
    fn test_validation_catches_missing_status() {
        let moves = parse_move_table(
            r#"
[[moves]]
name = "Stone Gaze"
type = "Ailment"
ailment = "stone"
"#,
        )
        .unwrap();

        let err = validate_tables(&moves, &StatusRegistry::new()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_bundled_constants_match_defaults() {
        let constants = default_constants();
        assert!((constants.combat.guard_multiplier - 0.8).abs() < f64::EPSILON);
        assert_eq!(constants.turn.timeout_secs, 30);
    }
}
