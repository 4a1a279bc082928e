//! battle_core - Turn-based demon combat resolution
//!
//! This library provides:
//! - Status effect engine: application, stacking, ticking and break-on-damage
//! - Damage calculator: offense/vitality curve with a multiplier chain
//! - Action resolver: menu state machine, attacks, guard and skills
//! - Enemy policy: prioritized rules for AI-controlled demons
//! - Turn driver: strict alternation with per-turn deadlines

pub mod battle;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod damage;
pub mod error;
pub mod event;
pub mod moves;
pub mod policy;
pub mod prelude;
pub mod reference;
pub mod rng;
pub mod status;
pub mod types;

// Re-export core types for convenience
pub use battle::{BattleOutcome, BattleRegistry, BattleState, TurnDriver};
pub use combat::{ActionOutcome, ActionResolver, Affinity, TurnProgress};
pub use combatant::{Combatant, Resistances};
pub use config::{default_constants, default_reference_tables, BattleConstants};
pub use error::{BattleError, Result};
pub use event::BattleEvent;
pub use moves::Move;
pub use policy::{Decision, EnemyPolicy};
pub use reference::{ReferenceData, ReferenceTables};
pub use types::{Element, ParticipantId, Side};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::combatant::{Combatant, Resistances};
    use crate::reference::ReferenceTables;

    /// Plain demon with flat stats and no abilities
    pub fn make_combatant(name: &str, level: u32) -> Combatant {
        Combatant {
            name: name.to_string(),
            level,
            hp: 200,
            max_hp: 200,
            sp: 100,
            max_sp: 100,
            strength: 20,
            magic: 20,
            vitality: 15,
            speed: 15,
            abilities: Vec::new(),
            resistances: Resistances::default(),
            status_effects: Vec::new(),
            is_guarding: false,
            owner: None,
        }
    }

    pub fn test_tables() -> ReferenceTables {
        crate::config::default_reference_tables()
    }
}
