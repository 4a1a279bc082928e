//! Reference data provider - immutable Move and StatusEffectDefinition lookup
//!
//! Tables are built once and shared read-only (behind an `Arc`) by every
//! battle in the process.

use crate::error::{BattleError, Result};
use crate::moves::{Move, BASIC_ATTACK};
use crate::status::{StatusEffectDefinition, StatusRegistry};
use std::collections::HashMap;

/// Lookup interface for immutable reference records
pub trait ReferenceData: Send + Sync {
    /// Find a move by exact name
    fn find_move(&self, name: &str) -> Option<&Move>;

    /// Find a status effect definition by id (case-insensitive)
    fn find_status(&self, id: &str) -> Option<&StatusEffectDefinition>;

    /// Find a move or report `UnknownMove`
    fn move_named(&self, name: &str) -> Result<&Move> {
        self.find_move(name)
            .ok_or_else(|| BattleError::UnknownMove(name.to_string()))
    }

    /// Find a status or report `UnknownStatusEffect`
    fn status_named(&self, id: &str) -> Result<&StatusEffectDefinition> {
        self.find_status(id)
            .ok_or_else(|| BattleError::UnknownStatusEffect(id.to_string()))
    }
}

/// Move table keyed by name
#[derive(Debug, Clone, Default)]
pub struct MoveTable {
    moves: HashMap<String, Move>,
}

impl MoveTable {
    pub fn new() -> Self {
        MoveTable {
            moves: HashMap::new(),
        }
    }

    /// Register a move, replacing any with the same name
    pub fn register(&mut self, mv: Move) {
        self.moves.insert(mv.name.clone(), mv);
    }

    pub fn get(&self, name: &str) -> Option<&Move> {
        self.moves.get(name)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.values()
    }
}

/// In-memory reference tables
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub moves: MoveTable,
    pub statuses: StatusRegistry,
    basic_attack: Option<Move>,
}

impl ReferenceTables {
    pub fn new(moves: MoveTable, statuses: StatusRegistry) -> Self {
        ReferenceTables {
            moves,
            statuses,
            basic_attack: Some(Move::basic_attack()),
        }
    }
}

impl ReferenceData for ReferenceTables {
    fn find_move(&self, name: &str) -> Option<&Move> {
        self.moves.get(name).or_else(|| {
            if name == BASIC_ATTACK {
                self.basic_attack.as_ref()
            } else {
                None
            }
        })
    }

    fn find_status(&self, id: &str) -> Option<&StatusEffectDefinition> {
        self.statuses.get(id)
    }
}
