//! Status effect definitions

use crate::types::{Element, ResistStat, StatKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status effect category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Disabling effect; only one may be active on a combatant
    Ailment,
    Buff,
    Debuff,
}

/// Damage dealt at the end of the afflicted combatant's turn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnEffect {
    /// Fraction of max HP lost per turn
    pub damage_percent: f64,
}

/// Kind of target redirection a status causes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectKind {
    /// Attacks an ally instead of the opponent
    Charm,
    /// Heals the opponent instead of acting
    Brainwash,
}

/// Which moves a one-shot burst buff empowers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurstScope {
    /// Strength-based moves (charge)
    Physical,
    /// Magic-based moves (concentrate)
    Magical,
}

/// Immutable status effect reference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectDefinition {
    /// Lookup key (e.g. "poison")
    pub id: String,
    /// Display name
    pub name: String,
    pub category: StatusCategory,
    /// Turns an instance lasts after application
    pub turn_duration: u32,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default = "default_max_stacks")]
    pub max_stacks: u32,
    /// Stat multipliers at one stack
    #[serde(default)]
    pub battle_effect: BTreeMap<StatKey, f64>,
    #[serde(default = "default_can_act")]
    pub can_act: bool,
    /// Percent chance to lose the turn even when able to act
    #[serde(default)]
    pub skip_turn_chance: f64,
    #[serde(default)]
    pub break_on_damage: bool,
    /// Removed when hit by this element
    #[serde(default)]
    pub weak_to: Option<Element>,
    #[serde(default)]
    pub resist_stat: ResistStat,
    /// Base application chance in percent
    #[serde(default)]
    pub chance: Option<f64>,
    #[serde(default)]
    pub turn_effect: Option<TurnEffect>,
    #[serde(default)]
    pub redirect: Option<RedirectKind>,
    /// Percent chance the redirect triggers on each action
    #[serde(default = "default_redirect_chance")]
    pub redirect_chance: f64,
    #[serde(default)]
    pub burst: Option<BurstScope>,
    /// Damage multiplier of a burst buff; falls back to the battle constant
    #[serde(default)]
    pub burst_multiplier: Option<f64>,
    #[serde(default)]
    pub emoji: String,
}

fn default_max_stacks() -> u32 {
    1
}

fn default_can_act() -> bool {
    true
}

fn default_redirect_chance() -> f64 {
    50.0
}

impl StatusEffectDefinition {
    /// Minimal definition; remaining fields take their serde defaults
    pub fn new(id: &str, name: &str, category: StatusCategory, turn_duration: u32) -> Self {
        StatusEffectDefinition {
            id: id.to_string(),
            name: name.to_string(),
            category,
            turn_duration,
            stackable: false,
            max_stacks: default_max_stacks(),
            battle_effect: BTreeMap::new(),
            can_act: true,
            skip_turn_chance: 0.0,
            break_on_damage: false,
            weak_to: None,
            resist_stat: ResistStat::default(),
            chance: None,
            turn_effect: None,
            redirect: None,
            redirect_chance: default_redirect_chance(),
            burst: None,
            burst_multiplier: None,
            emoji: String::new(),
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_defaults_from_toml() {
        let def: StatusEffectDefinition = toml::from_str(
            r#"
id = "tarukaja"
name = "Tarukaja"
category = "buff"
turn_duration = 3
stackable = true
max_stacks = 2

[battle_effect]
strength_multiplier = 1.25
"#,
        )
        .unwrap();

        assert!(def.can_act);
        assert_eq!(def.max_stacks, 2);
        assert_eq!(def.resist_stat, ResistStat::Vitality);
        assert!((def.battle_effect[&StatKey::StrengthMultiplier] - 1.25).abs() < f64::EPSILON);
        assert!((def.redirect_chance - 50.0).abs() < f64::EPSILON);
    }
}
