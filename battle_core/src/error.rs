//! Battle error taxonomy
//!
//! None of these end a battle. The resolver turns them into narration and the
//! turn cycle continues; only hp reaching zero terminates a battle.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BattleError {
    #[error("unknown move: {0}")]
    UnknownMove(String),
    #[error("unknown status effect: {0}")]
    UnknownStatusEffect(String),
    #[error("not enough SP (needs {needed}, has {available})")]
    InsufficientResource { needed: u32, available: u32 },
    #[error("invalid selection: {0}")]
    InvalidSelection(String),
    #[error("no input before the turn deadline")]
    Timeout,
    #[error("target is immune to {0}")]
    Immune(String),
    #[error("target is already afflicted with {0}")]
    AlreadyAfflicted(String),
    #[error("{0} is already at maximum stacks")]
    MaxStacks(String),
    #[error("a battle is already in progress in {0}")]
    BattleInProgress(String),
}

impl BattleError {
    /// Whether the failed selection leaves the actor's turn unconsumed
    pub fn keeps_turn(&self) -> bool {
        matches!(
            self,
            BattleError::UnknownMove(_)
                | BattleError::InsufficientResource { .. }
                | BattleError::InvalidSelection(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_turn() {
        assert!(BattleError::InsufficientResource { needed: 10, available: 3 }.keeps_turn());
        assert!(BattleError::InvalidSelection("9".into()).keeps_turn());
        assert!(!BattleError::Immune("poison".into()).keeps_turn());
        assert!(!BattleError::Timeout.keeps_turn());
    }

    #[test]
    fn test_messages() {
        let err = BattleError::InsufficientResource { needed: 12, available: 4 };
        assert_eq!(err.to_string(), "not enough SP (needs 12, has 4)");
    }
}
