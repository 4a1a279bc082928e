//! Battle constants configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable battle constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleConstants {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub ailments: AilmentConstants,
    #[serde(default)]
    pub turn: TurnConstants,
    #[serde(default)]
    pub policy: PolicyConstants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Damage multiplier against a guarding defender
    #[serde(default = "default_guard_multiplier")]
    pub guard_multiplier: f64,
    /// Default critical chance in percent
    #[serde(default = "default_crit_chance")]
    pub crit_chance: f64,
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
    #[serde(default = "default_weak_multiplier")]
    pub weak_multiplier: f64,
    #[serde(default = "default_resist_multiplier")]
    pub resist_multiplier: f64,
    /// Charge/concentrate multiplier when the status does not set one
    #[serde(default = "default_burst_multiplier")]
    pub burst_multiplier: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            guard_multiplier: 0.8,
            crit_chance: 10.0,
            crit_multiplier: 1.5,
            weak_multiplier: 1.25,
            resist_multiplier: 0.5,
            burst_multiplier: 2.5,
        }
    }
}

fn default_guard_multiplier() -> f64 {
    0.8
}
fn default_crit_chance() -> f64 {
    10.0
}
fn default_crit_multiplier() -> f64 {
    1.5
}
fn default_weak_multiplier() -> f64 {
    1.25
}
fn default_resist_multiplier() -> f64 {
    0.5
}
fn default_burst_multiplier() -> f64 {
    2.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AilmentConstants {
    /// Application chance when neither move nor status sets one
    #[serde(default = "default_ailment_chance")]
    pub default_chance: f64,
    #[serde(default = "default_instakill_base")]
    pub instakill_base_chance: f64,
    /// Bonus per level of advantage
    #[serde(default = "default_instakill_per_level")]
    pub instakill_per_level: f64,
    #[serde(default = "default_instakill_max_bonus")]
    pub instakill_max_bonus: f64,
    #[serde(default = "default_instakill_min")]
    pub instakill_min_chance: f64,
    /// Fraction of the opponent's max HP healed by a brainwashed status move
    #[serde(default = "default_brainwash_heal")]
    pub brainwash_heal_fraction: f64,
}

impl Default for AilmentConstants {
    fn default() -> Self {
        AilmentConstants {
            default_chance: 40.0,
            instakill_base_chance: 15.0,
            instakill_per_level: 2.0,
            instakill_max_bonus: 20.0,
            instakill_min_chance: 5.0,
            brainwash_heal_fraction: 0.15,
        }
    }
}

fn default_ailment_chance() -> f64 {
    40.0
}
fn default_instakill_base() -> f64 {
    15.0
}
fn default_instakill_per_level() -> f64 {
    2.0
}
fn default_instakill_max_bonus() -> f64 {
    20.0
}
fn default_instakill_min() -> f64 {
    5.0
}
fn default_brainwash_heal() -> f64 {
    0.15
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnConstants {
    /// Seconds a participant has to complete their turn
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Abilities listed per skills-menu page
    #[serde(default = "default_page_size")]
    pub skills_page_size: usize,
}

impl TurnConstants {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TurnConstants {
    fn default() -> Self {
        TurnConstants {
            timeout_secs: 30,
            skills_page_size: 6,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_page_size() -> usize {
    6
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConstants {
    /// HP fraction below which the AI heals
    #[serde(default = "default_heal_threshold")]
    pub heal_threshold: f64,
    /// Percent chance to guard
    #[serde(default = "default_guard_chance")]
    pub guard_chance: f64,
    /// Percent chance to open with an ailment or debuff
    #[serde(default = "default_status_chance")]
    pub status_chance: f64,
}

impl Default for PolicyConstants {
    fn default() -> Self {
        PolicyConstants {
            heal_threshold: 0.3,
            guard_chance: 15.0,
            status_chance: 40.0,
        }
    }
}

fn default_heal_threshold() -> f64 {
    0.3
}
fn default_guard_chance() -> f64 {
    15.0
}
fn default_status_chance() -> f64 {
    40.0
}
