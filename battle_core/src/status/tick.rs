//! Start and end of turn status processing

use crate::combatant::Combatant;
use crate::event::BattleEvent;
use rand::Rng;

/// Outcome of start-of-turn processing
#[derive(Debug, Clone, PartialEq)]
pub struct TurnStart {
    /// Whether the combatant may act this turn
    pub acted: bool,
    /// Narration explaining a lost turn
    pub events: Vec<BattleEvent>,
}

impl TurnStart {
    fn free() -> Self {
        TurnStart {
            acted: true,
            events: Vec::new(),
        }
    }
}

/// Decide whether the combatant may act this turn
///
/// Any active status with `can_act = false` blocks the turn. Otherwise each
/// status with a skip chance rolls independently.
pub fn process_start(combatant: &Combatant, rng: &mut impl Rng) -> TurnStart {
    let actor = combatant.display_name();
    let active = || combatant.status_effects.iter().filter(|s| s.is_active());

    if let Some(blocking) = active().find(|s| !s.definition.can_act) {
        return TurnStart {
            acted: false,
            events: vec![BattleEvent::CannotAct {
                actor,
                status: blocking.label(),
            }],
        };
    }

    for status in active().filter(|s| s.definition.skip_turn_chance > 0.0) {
        let roll = rng.gen::<f64>() * 100.0;
        if roll < status.definition.skip_turn_chance {
            return TurnStart {
                acted: false,
                events: vec![BattleEvent::TurnSkipped {
                    actor,
                    status: status.label(),
                }],
            };
        }
    }

    TurnStart::free()
}

/// Apply damage over time, count durations down and drop expired statuses
///
/// Status damage never takes hp below 1. Damage lines come before expiry lines.
pub fn process_end(combatant: &mut Combatant) -> Vec<BattleEvent> {
    let target = combatant.display_name();
    let mut damage_events = Vec::new();
    let mut expired_events = Vec::new();

    let max_hp = combatant.max_hp;
    let mut hp = combatant.hp;

    for status in combatant.status_effects.iter_mut() {
        let damage = status.turn_damage(max_hp);
        if damage > 0 && hp > 0 {
            hp = hp.saturating_sub(damage.min(i32::MAX as u32) as i32).max(1);
            damage_events.push(BattleEvent::StatusDamage {
                target: target.clone(),
                status: status.label(),
                amount: damage,
            });
        }

        if status.tick() {
            expired_events.push(BattleEvent::StatusExpired {
                target: target.clone(),
                status: status.label(),
            });
        }
    }

    combatant.hp = hp;
    combatant.status_effects.retain(|s| s.is_active());

    damage_events.extend(expired_events);
    damage_events
}
