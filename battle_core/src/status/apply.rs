//! Status application, removal, break-on-damage and redirection

use super::{BurstScope, RedirectKind, StatusCategory, StatusEffectInstance};
use crate::combatant::Combatant;
use crate::config::BattleConstants;
use crate::error::{BattleError, Result};
use crate::event::{BattleEvent, StatusFailure};
use crate::moves::{Move, OffenseStat};
use crate::reference::ReferenceData;
use crate::types::Element;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Successful outcome of [`add_status_effect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusApplication {
    /// A new instance was created
    Applied,
    /// An existing stackable instance gained a stack (new count)
    Stacked(u32),
    /// An existing non-stackable instance had its duration reset
    Refreshed,
}

/// Apply a status effect by id to a target
///
/// Fails with `Immune` when the target is immune, `UnknownStatusEffect` on a
/// reference miss, `MaxStacks` when a stackable instance is full, and
/// `AlreadyAfflicted` when a different ailment is already active.
pub fn add_status_effect(
    target: &mut Combatant,
    id: &str,
    source: Option<&str>,
    refs: &dyn ReferenceData,
) -> Result<StatusApplication> {
    if target
        .resistances
        .immune
        .iter()
        .any(|s| s.eq_ignore_ascii_case(id))
    {
        return Err(BattleError::Immune(id.to_string()));
    }

    let definition = refs.status_named(id)?;

    if let Some(existing) = target
        .status_effects
        .iter_mut()
        .find(|s| s.is_active() && s.id().eq_ignore_ascii_case(&definition.id))
    {
        if !definition.stackable {
            existing.refresh();
            return Ok(StatusApplication::Refreshed);
        }
        if existing.stacks < definition.max_stacks {
            existing.add_stack();
            return Ok(StatusApplication::Stacked(existing.stacks));
        }
        return Err(BattleError::MaxStacks(definition.id.clone()));
    }

    if definition.category == StatusCategory::Ailment && target.has_ailment() {
        return Err(BattleError::AlreadyAfflicted(definition.id.clone()));
    }

    target.status_effects.retain(|s| s.is_active());
    target.status_effects.push(StatusEffectInstance::new(
        definition,
        source.map(str::to_string),
    ));
    tracing::debug!(combatant = %target.name, status = %definition.id, "status applied");

    Ok(StatusApplication::Applied)
}

/// Remove a status by id, returning the removed instance
pub fn remove_status_effect(target: &mut Combatant, id: &str) -> Option<StatusEffectInstance> {
    let index = target
        .status_effects
        .iter()
        .position(|s| s.id().eq_ignore_ascii_case(id))?;
    Some(target.status_effects.remove(index))
}

/// Remove statuses broken by a hit of the given element
///
/// Breaks anything flagged `break_on_damage` or weak to the element.
pub fn handle_break_on_damage(target: &mut Combatant, element: Element) -> Vec<BattleEvent> {
    let target_name = target.display_name();
    let mut events = Vec::new();

    target.status_effects.retain(|status| {
        let definition = &status.definition;
        let breaks = definition.break_on_damage || definition.weak_to == Some(element);
        if breaks {
            events.push(BattleEvent::StatusBroken {
                target: target_name.clone(),
                status: status.definition.name.clone(),
            });
        }
        !breaks
    });

    events
}

/// Result of the pre-resolution redirection hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirection {
    None,
    /// The action strikes an ally instead; nothing reaches the opponent
    Charmed,
    /// The action heals the opponent by this amount instead
    Brainwashed { heal: u32 },
}

/// Decide whether charm or brainwash diverts this action
///
/// Runs once before any accuracy or damage math. Each redirect status rolls
/// its own chance; charm is checked first. Healing moves are never diverted.
pub fn resolve_redirection(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    constants: &BattleConstants,
    rng: &mut impl Rng,
) -> Redirection {
    if mv.is_healing() {
        return Redirection::None;
    }

    for kind in [RedirectKind::Charm, RedirectKind::Brainwash] {
        let Some(status) = attacker
            .status_effects
            .iter()
            .find(|s| s.is_active() && s.definition.redirect == Some(kind))
        else {
            continue;
        };

        if rng.gen::<f64>() * 100.0 < status.definition.redirect_chance {
            return match kind {
                RedirectKind::Charm => Redirection::Charmed,
                RedirectKind::Brainwash => {
                    let heal = if mv.power > 0 {
                        mv.power / 2
                    } else {
                        (defender.max_hp.max(0) as f64 * constants.ailments.brainwash_heal_fraction)
                            .floor() as u32
                    };
                    Redirection::Brainwashed { heal: heal.max(1) }
                }
            };
        }
    }

    Redirection::None
}

/// Consume a one-shot burst buff matching the move, returning its multiplier
///
/// Charge empowers strength moves and concentrate magic moves. The instance is
/// deleted on use regardless of stacks or turns left. Returns 1.0 when none
/// applies.
pub fn take_burst_multiplier(attacker: &mut Combatant, mv: &Move, default: f64) -> f64 {
    let scope = match mv.offense_stat() {
        OffenseStat::Strength => BurstScope::Physical,
        OffenseStat::Magic => BurstScope::Magical,
    };

    let Some(index) = attacker
        .status_effects
        .iter()
        .position(|s| s.is_active() && s.definition.burst == Some(scope))
    else {
        return 1.0;
    };

    let burst = attacker.status_effects.remove(index);
    tracing::debug!(combatant = %attacker.name, status = %burst.id(), "burst consumed");
    burst.definition.burst_multiplier.unwrap_or(default)
}

/// Apply a move's ailment, buff and debuff
///
/// Ailments roll a chance scaled by the attacker's offense stat against the
/// target's resist stat; buffs go on the attacker and debuffs on the target.
pub fn apply_status_from_skill(
    attacker: &mut Combatant,
    target: &mut Combatant,
    mv: &Move,
    refs: &dyn ReferenceData,
    constants: &BattleConstants,
    rng: &mut impl Rng,
) -> Vec<BattleEvent> {
    let mut events = Vec::new();

    if let Some(ailment) = &mv.ailment {
        apply_ailment(attacker, target, mv, ailment, refs, constants, rng, &mut events);
    }

    if let Some(buff) = &mv.buff {
        let source = attacker.name.clone();
        push_application(attacker, buff, &source, refs, &mut events);
    }

    if let Some(debuff) = &mv.debuff {
        push_application(target, debuff, &attacker.name, refs, &mut events);
    }

    events
}

#[allow(clippy::too_many_arguments)]
fn apply_ailment(
    attacker: &Combatant,
    target: &mut Combatant,
    mv: &Move,
    ailment: &str,
    refs: &dyn ReferenceData,
    constants: &BattleConstants,
    rng: &mut impl Rng,
    events: &mut Vec<BattleEvent>,
) {
    let definition = match refs.status_named(ailment) {
        Ok(def) => def,
        Err(err) => {
            tracing::warn!(%err, "skipping ailment");
            return;
        }
    };
    let target_name = target.display_name();
    let label = definition.label();

    if target.has_status(ailment) {
        events.push(BattleEvent::StatusFailed {
            target: target_name,
            status: label,
            reason: StatusFailure::AlreadyAffected,
        });
        return;
    }

    if target
        .resistances
        .ailment_null
        .iter()
        .any(|s| s.eq_ignore_ascii_case(ailment))
    {
        events.push(BattleEvent::StatusFailed {
            target: target_name,
            status: label,
            reason: StatusFailure::Immune,
        });
        return;
    }

    let mut chance = mv
        .ailment_chance
        .or(definition.chance)
        .unwrap_or(constants.ailments.default_chance);

    let attack_stat = match mv.offense_stat() {
        OffenseStat::Strength => attacker.strength,
        OffenseStat::Magic => attacker.magic,
    };
    let resist_value = match target.stat(definition.resist_stat) {
        0 => 10,
        v => v,
    };
    let stat_ratio = attack_stat as f64 / resist_value as f64;
    chance *= stat_ratio.sqrt().min(1.5);

    if target
        .resistances
        .ailment_resist
        .iter()
        .any(|s| s.eq_ignore_ascii_case(ailment))
    {
        chance *= 0.5;
    }

    let roll = rng.gen::<f64>() * 100.0;
    tracing::trace!(ailment, chance, roll, "ailment roll");
    if roll > chance {
        events.push(BattleEvent::StatusFailed {
            target: target_name,
            status: label,
            reason: StatusFailure::Resisted,
        });
        return;
    }

    push_application(target, ailment, &attacker.name, refs, events);
}

fn push_application(
    target: &mut Combatant,
    id: &str,
    source: &str,
    refs: &dyn ReferenceData,
    events: &mut Vec<BattleEvent>,
) {
    let Some(definition) = refs.find_status(id) else {
        tracing::warn!(status = id, "move references an unknown status");
        return;
    };
    let target_name = target.display_name();
    let (label, category) = (definition.label(), definition.category);

    match add_status_effect(target, id, Some(source), refs) {
        Ok(outcome) => events.push(BattleEvent::StatusApplied {
            target: target_name,
            status: label,
            outcome,
            category,
        }),
        Err(err) => {
            let reason = match err {
                BattleError::Immune(_) => StatusFailure::Immune,
                BattleError::AlreadyAfflicted(_) => StatusFailure::AlreadyAfflicted,
                BattleError::MaxStacks(_) => StatusFailure::MaxStacks,
                other => {
                    tracing::warn!(err = %other, "status application skipped");
                    return;
                }
            };
            events.push(BattleEvent::StatusFailed {
                target: target_name,
                status: label,
                reason,
            });
        }
    }
}
