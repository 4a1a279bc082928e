//! StatusEffectInstance - an applied status on a combatant

use super::{StatusCategory, StatusEffectDefinition};
use crate::types::StatKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An active status effect, exclusively owned by the afflicted combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    /// Snapshot of the definition at application time
    pub definition: StatusEffectDefinition,
    /// Turns left; the instance is removed when this reaches 0
    pub turns_remaining: u32,
    /// Current stack count (>= 1)
    pub stacks: u32,
    /// Name of whoever applied it
    pub source: Option<String>,
    /// Stack-scaled multipliers
    pub battle_effect: BTreeMap<StatKey, f64>,
}

impl StatusEffectInstance {
    /// Create a fresh single-stack instance
    pub fn new(definition: &StatusEffectDefinition, source: Option<String>) -> Self {
        StatusEffectInstance {
            turns_remaining: definition.turn_duration,
            stacks: 1,
            source,
            battle_effect: definition.battle_effect.clone(),
            definition: definition.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn label(&self) -> String {
        self.definition.label()
    }

    pub fn is_active(&self) -> bool {
        self.turns_remaining > 0 && self.stacks > 0
    }

    pub fn is_ailment(&self) -> bool {
        self.definition.category == StatusCategory::Ailment
    }

    /// Add a stack and rescale multipliers linearly around 1.0
    ///
    /// `1 + (base - 1) * stacks`, so two stacks of a 1.25 buff give 1.5.
    pub fn add_stack(&mut self) {
        self.stacks += 1;
        self.refresh();
        for (key, base) in &self.definition.battle_effect {
            self.battle_effect
                .insert(*key, 1.0 + (base - 1.0) * self.stacks as f64);
        }
    }

    /// Reset the duration to the definition's full length
    pub fn refresh(&mut self) {
        self.turns_remaining = self.definition.turn_duration;
    }

    /// Count down one turn, returning true if the instance expired
    pub fn tick(&mut self) -> bool {
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        self.turns_remaining == 0
    }

    /// Damage dealt at turn end for a given max HP
    pub fn turn_damage(&self, max_hp: i32) -> u32 {
        match self.definition.turn_effect {
            Some(effect) if effect.damage_percent > 0.0 => {
                (max_hp.max(0) as f64 * effect.damage_percent).floor() as u32
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tarukaja() -> StatusEffectDefinition {
        let mut def = StatusEffectDefinition::new("tarukaja", "Tarukaja", StatusCategory::Buff, 3);
        def.stackable = true;
        def.max_stacks = 3;
        def.battle_effect.insert(StatKey::StrengthMultiplier, 1.25);
        def
    }

    #[test]
    fn test_linear_stack_scaling() {
        let mut inst = StatusEffectInstance::new(&tarukaja(), None);
        inst.add_stack();
        assert_eq!(inst.stacks, 2);
        assert!((inst.battle_effect[&StatKey::StrengthMultiplier] - 1.5).abs() < 1e-9);

        inst.add_stack();
        assert!((inst.battle_effect[&StatKey::StrengthMultiplier] - 1.75).abs() < 1e-9);
    }

    #[test]
    fn test_debuff_scaling_goes_below_one() {
        let mut def = StatusEffectDefinition::new("rakunda", "Rakunda", StatusCategory::Debuff, 3);
        def.stackable = true;
        def.max_stacks = 2;
        def.battle_effect.insert(StatKey::DefenseMultiplier, 0.8);

        let mut inst = StatusEffectInstance::new(&def, None);
        inst.add_stack();
        assert!((inst.battle_effect[&StatKey::DefenseMultiplier] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_tick_expires_at_zero() {
        let mut inst = StatusEffectInstance::new(&tarukaja(), None);
        assert!(!inst.tick());
        assert!(!inst.tick());
        assert!(inst.tick());
        assert!(!inst.is_active());
    }

    #[test]
    fn test_turn_damage_floors() {
        let mut def = StatusEffectDefinition::new("poison", "Poison", StatusCategory::Ailment, 3);
        def.turn_effect = Some(super::super::TurnEffect { damage_percent: 0.08 });
        let inst = StatusEffectInstance::new(&def, None);
        assert_eq!(inst.turn_damage(99), 7);
    }
}
