//! DamageContext - caller-supplied modifiers for one hit

use crate::config::CombatConstants;
use serde::{Deserialize, Serialize};

/// Modifiers the caller knows about that the combatants do not carry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageContext {
    /// Attack-stage multiplier
    pub attack_stage: f64,
    /// Defense-stage multiplier
    pub defense_stage: f64,
    /// Whether the defender is guarding this hit
    pub is_guarding: bool,
    /// Applied when `is_guarding` is set
    pub guard_multiplier: f64,
    /// One-shot charge/concentrate multiplier
    pub burst: f64,
    /// Product of any other caller multipliers (difficulty, exploit, ...)
    pub extra: f64,
}

impl Default for DamageContext {
    fn default() -> Self {
        DamageContext {
            attack_stage: 1.0,
            defense_stage: 1.0,
            is_guarding: false,
            guard_multiplier: 0.8,
            burst: 1.0,
            extra: 1.0,
        }
    }
}

impl DamageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context using the configured guard multiplier
    pub fn from_constants(constants: &CombatConstants) -> Self {
        DamageContext {
            guard_multiplier: constants.guard_multiplier,
            ..Self::default()
        }
    }

    pub fn guarding(mut self, is_guarding: bool) -> Self {
        self.is_guarding = is_guarding;
        self
    }

    pub fn with_burst(mut self, burst: f64) -> Self {
        self.burst = burst;
        self
    }

    /// Fold another caller multiplier into the chain
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.extra *= multiplier;
        self
    }

    /// Guard factor for this hit
    pub fn guard_factor(&self) -> f64 {
        if self.is_guarding {
            self.guard_multiplier
        } else {
            1.0
        }
    }

    /// Burst and other caller multipliers combined
    pub fn caller_factor(&self) -> f64 {
        self.burst * self.extra
    }
}
