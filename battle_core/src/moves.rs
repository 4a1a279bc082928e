//! Move - immutable ability definitions looked up by name

use crate::types::Element;
use serde::{Deserialize, Serialize};

/// Name of the built-in basic attack
pub const BASIC_ATTACK: &str = "Attack";

/// Base stat a damaging move scales with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffenseStat {
    Strength,
    Magic,
}

/// A named action definition (damage, healing, or status) gated by an SP cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Display name and lookup key
    pub name: String,
    /// Damage/element type
    #[serde(rename = "type")]
    pub element: Element,
    /// Move power (100 = neutral)
    #[serde(default)]
    pub power: u32,
    /// SP cost
    #[serde(default)]
    pub sp: u32,
    /// Hit chance in percent
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
    #[serde(default)]
    pub uses_strength: bool,
    #[serde(default)]
    pub uses_magic: bool,
    #[serde(default)]
    pub is_pure_status: bool,
    #[serde(default)]
    pub instakill: bool,
    /// Status removed from the user after a heal
    #[serde(default)]
    pub cures_ailment: Option<String>,
    /// Ailment inflicted on the target
    #[serde(default)]
    pub ailment: Option<String>,
    /// Overrides the ailment definition's base chance
    #[serde(default)]
    pub ailment_chance: Option<f64>,
    /// Buff granted to the user
    #[serde(default)]
    pub buff: Option<String>,
    /// Debuff inflicted on the target
    #[serde(default)]
    pub debuff: Option<String>,
    /// Fraction of max HP restored by healing moves
    #[serde(default)]
    pub healing_percent: f64,
    /// Number of hits for multi-hit moves
    #[serde(default = "default_hits")]
    pub hits: u32,
    /// Move-specific critical chance in percent
    #[serde(default)]
    pub crit_chance: Option<f64>,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub desc: String,
}

fn default_accuracy() -> f64 {
    100.0
}

fn default_hits() -> u32 {
    1
}

impl Move {
    /// The fixed basic attack: 100 power physical, 0 SP, 95 accuracy
    pub fn basic_attack() -> Self {
        Move {
            name: BASIC_ATTACK.to_string(),
            element: Element::Physical,
            power: 100,
            sp: 0,
            accuracy: 95.0,
            uses_strength: true,
            uses_magic: false,
            is_pure_status: false,
            instakill: false,
            cures_ailment: None,
            ailment: None,
            ailment_chance: None,
            buff: None,
            debuff: None,
            healing_percent: 0.0,
            hits: 1,
            crit_chance: None,
            emoji: "🗡️".to_string(),
            desc: "A basic physical strike.".to_string(),
        }
    }

    /// Display label with emoji prefix when one is set
    pub fn label(&self) -> String {
        if self.emoji.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.emoji, self.name)
        }
    }

    pub fn is_healing(&self) -> bool {
        self.element == Element::Healing
    }

    /// Moves that apply status without running the damage formula
    pub fn is_status_only(&self) -> bool {
        !self.is_healing() && (self.power == 0 || self.is_pure_status)
    }

    pub fn is_damaging(&self) -> bool {
        !self.is_healing() && !self.is_status_only()
    }

    /// Stat used for offense, ailment chance and burst matching
    ///
    /// Explicit flags win; otherwise physical and gun moves use strength.
    pub fn offense_stat(&self) -> OffenseStat {
        if self.uses_strength {
            OffenseStat::Strength
        } else if self.uses_magic {
            OffenseStat::Magic
        } else if matches!(self.element, Element::Physical | Element::Gun) {
            OffenseStat::Strength
        } else {
            OffenseStat::Magic
        }
    }

    /// Whether this move can inflict an ailment or debuff on the target
    pub fn inflicts_status(&self) -> bool {
        self.ailment.is_some() || self.debuff.is_some()
    }
}
