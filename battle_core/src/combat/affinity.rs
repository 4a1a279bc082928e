//! Elemental affinity lookup

use crate::combatant::Resistances;
use crate::config::CombatConstants;
use crate::types::Element;
use serde::{Deserialize, Serialize};

/// How a defender reacts to an incoming element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affinity {
    Weak,
    Resist,
    Null,
    Drain,
    Repel,
    Neutral,
}

impl Affinity {
    /// Damage multiplier for the affinities that scale rather than divert
    pub fn multiplier(self, constants: &CombatConstants) -> f64 {
        match self {
            Affinity::Weak => constants.weak_multiplier,
            Affinity::Resist => constants.resist_multiplier,
            Affinity::Neutral => 1.0,
            Affinity::Null | Affinity::Drain | Affinity::Repel => 0.0,
        }
    }

    /// Whether the hit is turned away from the defender entirely
    pub fn diverts(self) -> bool {
        matches!(self, Affinity::Null | Affinity::Drain | Affinity::Repel)
    }
}

/// Resolve the defender's affinity to an element
///
/// Almighty ignores affinities. When an element sits in several sets the
/// strongest reaction wins: repel, drain, null, resist, then weak.
pub fn affinity_of(resistances: &Resistances, element: Element) -> Affinity {
    if element == Element::Almighty {
        return Affinity::Neutral;
    }

    if resistances.repel.contains(&element) {
        Affinity::Repel
    } else if resistances.drain.contains(&element) {
        Affinity::Drain
    } else if resistances.null.contains(&element) {
        Affinity::Null
    } else if resistances.resist.contains(&element) {
        Affinity::Resist
    } else if resistances.weak.contains(&element) {
        Affinity::Weak
    } else {
        Affinity::Neutral
    }
}
