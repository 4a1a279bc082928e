//! Status effect engine
//!
//! Application with stacking/refresh rules, multiplier folding, start and end
//! of turn processing, and break-on-damage. Every operation returns its
//! narration as [`BattleEvent`](crate::event::BattleEvent)s instead of
//! printing, so callers control ordering.

mod active;
mod apply;
pub mod tick;
mod types;

pub use active::StatusEffectInstance;
pub use apply::{
    add_status_effect, apply_status_from_skill, handle_break_on_damage, remove_status_effect,
    resolve_redirection, take_burst_multiplier, Redirection, StatusApplication,
};
pub use tick::{process_end, process_start, TurnStart};
pub use types::{BurstScope, RedirectKind, StatusCategory, StatusEffectDefinition, TurnEffect};

use crate::combatant::Combatant;
use crate::types::StatKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Status definition registry keyed by lower-cased id
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    definitions: HashMap<String, StatusEffectDefinition>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        StatusRegistry {
            definitions: HashMap::new(),
        }
    }

    /// Register a definition, replacing any with the same id
    pub fn register(&mut self, definition: StatusEffectDefinition) {
        self.definitions
            .insert(definition.id.to_lowercase(), definition);
    }

    /// Look up a definition by id (case-insensitive)
    pub fn get(&self, id: &str) -> Option<&StatusEffectDefinition> {
        self.definitions.get(&id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectDefinition> {
        self.definitions.values()
    }
}

/// Folded stat multipliers of every active status on a combatant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatMultipliers {
    values: BTreeMap<StatKey, f64>,
}

impl StatMultipliers {
    /// Multiplier for a key, 1.0 when no status touches it
    pub fn get(&self, key: StatKey) -> f64 {
        self.values.get(&key).copied().unwrap_or(1.0)
    }

    fn combine(&mut self, key: StatKey, value: f64) {
        *self.values.entry(key).or_insert(1.0) *= value;
    }
}

/// Fold all active instances into one multiplier map
///
/// Contributions from different instances multiply together. Stacks of the
/// same instance are already folded linearly into its own multipliers.
pub fn get_status_multipliers(combatant: &Combatant) -> StatMultipliers {
    let mut multipliers = StatMultipliers::default();

    for status in combatant.status_effects.iter().filter(|s| s.is_active()) {
        for (key, value) in &status.battle_effect {
            multipliers.combine(*key, *value);
        }
    }

    multipliers
}
