//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Core types
pub use crate::combatant::{Combatant, Resistances};
pub use crate::moves::Move;
pub use crate::types::{Element, ParticipantId, Side};

// Status engine
pub use crate::status::{
    add_status_effect, process_end, process_start, StatusApplication, StatusEffectDefinition,
    StatusEffectInstance,
};

// Damage system
pub use crate::damage::{calculate_damage, DamageContext};

// Combat
pub use crate::combat::{ActionOutcome, ActionResolver, Affinity, Choice, Menu, MenuBook};
pub use crate::policy::{Decision, EnemyPolicy};

// Battles
pub use crate::battle::{
    BattleOutcome, BattleRegistry, BattleState, ChannelInput, InputProvider, Narrator,
    PlayerInput, TurnDriver,
};
pub use crate::event::BattleEvent;

// Config and reference data
pub use crate::config::{default_constants, default_reference_tables, BattleConstants, DemonRoster};
pub use crate::reference::{ReferenceData, ReferenceTables};
pub use crate::error::{BattleError, Result};
