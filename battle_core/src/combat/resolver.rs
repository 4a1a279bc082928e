//! Action resolver - attack, guard and ability execution plus menu input

use super::menu::page_count;
use super::{affinity_of, ActionOutcome, Affinity, Choice, Menu, MenuBook, TurnProgress};
use crate::combatant::Combatant;
use crate::config::{AilmentConstants, BattleConstants};
use crate::damage::{calculate_damage, hit_chance, DamageContext};
use crate::error::{BattleError, Result};
use crate::event::BattleEvent;
use crate::moves::Move;
use crate::reference::ReferenceData;
use crate::status::{
    apply_status_from_skill, get_status_multipliers, handle_break_on_damage, remove_status_effect,
    resolve_redirection, take_burst_multiplier, Redirection,
};
use crate::types::ParticipantId;
use rand::Rng;

/// Percent chance for an instakill move to land
///
/// A level advantage adds a capped bonus; a disadvantage subtracts one point
/// per level down to a floor.
pub fn instakill_chance(
    attacker_level: u32,
    defender_level: u32,
    constants: &AilmentConstants,
) -> f64 {
    let diff = attacker_level as f64 - defender_level as f64;
    if diff > 0.0 {
        let bonus = (constants.instakill_per_level * diff).min(constants.instakill_max_bonus);
        constants.instakill_base_chance + bonus
    } else {
        (constants.instakill_base_chance + diff).max(constants.instakill_min_chance)
    }
}

/// Resolves actions against shared reference data
///
/// Holds no battle state; combatants and menus are passed in per call.
#[derive(Clone, Copy)]
pub struct ActionResolver<'a> {
    refs: &'a dyn ReferenceData,
    constants: &'a BattleConstants,
}

impl<'a> ActionResolver<'a> {
    pub fn new(refs: &'a dyn ReferenceData, constants: &'a BattleConstants) -> Self {
        ActionResolver { refs, constants }
    }

    pub fn constants(&self) -> &BattleConstants {
        self.constants
    }

    /// Current menu text for a human participant
    pub fn menu_text(
        &self,
        menus: &MenuBook,
        participant: &ParticipantId,
        actor: &Combatant,
    ) -> String {
        menus
            .get(participant)
            .render(actor, self.refs, self.constants.turn.skills_page_size)
    }

    /// Feed one input from a human participant to their menu
    pub fn process_input(
        &self,
        menus: &mut MenuBook,
        participant: &ParticipantId,
        input: &str,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        rng: &mut impl Rng,
    ) -> TurnProgress {
        let actor = attacker.display_name();
        let invalid = || {
            TurnProgress::pending(vec![BattleEvent::InvalidSelection {
                actor: actor.clone(),
                input: input.trim().to_string(),
            }])
        };

        let Ok(choice) = input.parse::<Choice>() else {
            return invalid();
        };

        let page_size = self.constants.turn.skills_page_size;
        let state = menus.entry(participant);

        match (state.current, choice) {
            (Menu::Main, Choice::Index(1)) => {
                TurnProgress::completed(self.execute_basic_attack(attacker, defender, rng))
            }
            (Menu::Main, Choice::Index(2)) => {
                state.open_skills();
                TurnProgress::pending(vec![BattleEvent::Prompt {
                    text: state.render(attacker, self.refs, page_size),
                }])
            }
            (Menu::Main, Choice::Index(3)) => TurnProgress::completed(self.execute_guard(attacker)),
            (Menu::Skills, Choice::Back) => {
                state.reset();
                TurnProgress::pending(vec![BattleEvent::Prompt {
                    text: state.render(attacker, self.refs, page_size),
                }])
            }
            (Menu::Skills, Choice::NextPage | Choice::PrevPage) => {
                if choice == Choice::NextPage {
                    state.next_page(page_count(attacker.abilities.len(), page_size));
                } else {
                    state.prev_page();
                }
                TurnProgress::pending(vec![BattleEvent::Prompt {
                    text: state.render(attacker, self.refs, page_size),
                }])
            }
            (Menu::Skills, Choice::Index(n)) if n <= attacker.abilities.len() => {
                let name = attacker.abilities[n - 1].clone();
                let result = self.execute_ability(attacker, defender, &name, rng);
                state.reset();

                match result {
                    Ok(outcome) => TurnProgress::completed(outcome),
                    Err(err) => {
                        let mut events = vec![self.rejection_event(attacker, &name, &err)];
                        if !err.keeps_turn() {
                            return TurnProgress {
                                completed: true,
                                events,
                            };
                        }
                        events.push(BattleEvent::Prompt {
                            text: state.render(attacker, self.refs, page_size),
                        });
                        TurnProgress::pending(events)
                    }
                }
            }
            _ => invalid(),
        }
    }

    fn rejection_event(&self, actor: &Combatant, name: &str, err: &BattleError) -> BattleEvent {
        match err {
            BattleError::InsufficientResource { .. } => BattleEvent::InsufficientSp {
                actor: actor.display_name(),
                name: name.to_string(),
            },
            BattleError::UnknownMove(name) => BattleEvent::UnknownMove { name: name.clone() },
            other => BattleEvent::InvalidSelection {
                actor: actor.display_name(),
                input: other.to_string(),
            },
        }
    }

    /// The fixed 100 power physical attack
    pub fn execute_basic_attack(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        rng: &mut impl Rng,
    ) -> ActionOutcome {
        let attack = Move::basic_attack();
        let mut outcome = ActionOutcome::new();

        if self.redirected(attacker, defender, &attack, rng, &mut outcome) {
            return outcome;
        }

        self.strike(attacker, defender, &attack, true, rng, &mut outcome);
        outcome
    }

    /// Raise guard until the next hit against this combatant
    pub fn execute_guard(&self, attacker: &mut Combatant) -> ActionOutcome {
        attacker.is_guarding = true;
        let mut outcome = ActionOutcome::new();
        outcome.push(BattleEvent::Guarding {
            actor: attacker.display_name(),
        });
        outcome
    }

    /// Use a named ability
    ///
    /// Fails without side effects on an unknown move or insufficient SP.
    /// Otherwise SP is spent before redirection and accuracy are checked.
    pub fn execute_ability(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        name: &str,
        rng: &mut impl Rng,
    ) -> Result<ActionOutcome> {
        let mv = match self.refs.move_named(name) {
            Ok(mv) => mv,
            Err(err) => {
                tracing::warn!(%err, combatant = %attacker.name, "ability lookup failed");
                return Err(err);
            }
        };

        if attacker.sp < mv.sp {
            return Err(BattleError::InsufficientResource {
                needed: mv.sp,
                available: attacker.sp,
            });
        }
        attacker.sp -= mv.sp;
        tracing::debug!(
            combatant = %attacker.name,
            ability = %mv.name,
            sp_left = attacker.sp,
            "ability used"
        );

        let mut outcome = ActionOutcome::new();
        outcome.push(BattleEvent::UsesMove {
            actor: attacker.display_name(),
            name: mv.label(),
        });

        if self.redirected(attacker, defender, mv, rng, &mut outcome) {
            return Ok(outcome);
        }

        if mv.is_healing() {
            self.heal(attacker, mv, &mut outcome);
        } else if mv.is_status_only() {
            self.status_move(attacker, defender, mv, rng, &mut outcome);
        } else {
            self.strike(attacker, defender, mv, false, rng, &mut outcome);
        }

        Ok(outcome)
    }

    fn redirected(
        &self,
        attacker: &Combatant,
        defender: &mut Combatant,
        mv: &Move,
        rng: &mut impl Rng,
        outcome: &mut ActionOutcome,
    ) -> bool {
        match resolve_redirection(attacker, defender, mv, self.constants, rng) {
            Redirection::None => false,
            Redirection::Charmed => {
                outcome.push(BattleEvent::Charmed {
                    actor: attacker.display_name(),
                });
                true
            }
            Redirection::Brainwashed { heal } => {
                outcome.push(BattleEvent::Brainwashed {
                    actor: attacker.display_name(),
                });
                outcome.healed = defender.heal(heal);
                outcome.push(BattleEvent::Healed {
                    target: defender.display_name(),
                    amount: outcome.healed,
                });
                true
            }
        }
    }

    fn heal(&self, user: &mut Combatant, mv: &Move, outcome: &mut ActionOutcome) {
        let percent = (user.max_hp.max(0) as f64 * mv.healing_percent).floor() as u32;
        outcome.healed = user.heal(mv.power.saturating_add(percent));
        outcome.push(BattleEvent::Healed {
            target: user.display_name(),
            amount: outcome.healed,
        });

        if let Some(cure) = &mv.cures_ailment {
            if let Some(removed) = remove_status_effect(user, cure) {
                outcome.push(BattleEvent::Cured {
                    target: user.display_name(),
                    status: removed.label(),
                });
            }
        }
    }

    fn accuracy_passes(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        mv: &Move,
        rng: &mut impl Rng,
    ) -> bool {
        let chance = hit_chance(
            mv,
            &get_status_multipliers(attacker),
            &get_status_multipliers(defender),
        );
        rng.gen::<f64>() * 100.0 <= chance
    }

    fn status_move(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        mv: &Move,
        rng: &mut impl Rng,
        outcome: &mut ActionOutcome,
    ) {
        if !self.accuracy_passes(attacker, defender, mv, rng) {
            outcome.missed = true;
            outcome.push(BattleEvent::Missed {
                actor: attacker.display_name(),
            });
            return;
        }

        outcome.extend(apply_status_from_skill(
            attacker,
            defender,
            mv,
            self.refs,
            self.constants,
            rng,
        ));
    }

    /// Accuracy, damage, affinity, crit, break, instakill, secondary status
    fn strike(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        mv: &Move,
        basic: bool,
        rng: &mut impl Rng,
        outcome: &mut ActionOutcome,
    ) {
        let combat = &self.constants.combat;

        if !self.accuracy_passes(attacker, defender, mv, rng) {
            outcome.missed = true;
            outcome.push(BattleEvent::Missed {
                actor: attacker.display_name(),
            });
            return;
        }

        let burst = take_burst_multiplier(attacker, mv, combat.burst_multiplier);
        let ctx = DamageContext::from_constants(combat)
            .guarding(defender.is_guarding)
            .with_burst(burst);
        defender.is_guarding = false;

        let mut raw = 0u32;
        for _ in 0..mv.hits.max(1) {
            raw = raw.saturating_add(calculate_damage(attacker, defender, mv, &ctx, rng));
        }

        let affinity = affinity_of(&defender.resistances, mv.element);
        outcome.affinity = Some(affinity);
        if affinity != Affinity::Neutral {
            outcome.push(BattleEvent::Affinity {
                target: defender.display_name(),
                affinity,
            });
        }

        if affinity.diverts() {
            divert(attacker, defender, affinity, raw, outcome);
            return;
        }

        let mut damage = ((raw as f64 * affinity.multiplier(combat)).floor() as u32).max(1);

        let crit_chance = mv.crit_chance.unwrap_or(combat.crit_chance);
        if rng.gen::<f64>() * 100.0 < crit_chance {
            damage = (damage as f64 * combat.crit_multiplier).floor() as u32;
            outcome.critical = true;
            outcome.push(BattleEvent::Critical);
        }

        defender.take_damage(damage);
        outcome.damage = damage;
        outcome.push(if basic {
            BattleEvent::AttackDamage {
                actor: attacker.display_name(),
                amount: damage,
            }
        } else {
            BattleEvent::Damage {
                target: defender.display_name(),
                amount: damage,
            }
        });

        outcome.extend(handle_break_on_damage(defender, mv.element));

        if mv.instakill && defender.is_alive() {
            self.try_instakill(attacker, defender, mv, rng, outcome);
        }

        let has_secondary = mv.ailment.is_some() || mv.buff.is_some() || mv.debuff.is_some();
        if has_secondary && defender.is_alive() {
            outcome.extend(apply_status_from_skill(
                attacker,
                defender,
                mv,
                self.refs,
                self.constants,
                rng,
            ));
        }
    }

    fn try_instakill(
        &self,
        attacker: &Combatant,
        defender: &mut Combatant,
        mv: &Move,
        rng: &mut impl Rng,
        outcome: &mut ActionOutcome,
    ) {
        if defender.resistances.blocks(mv.element) {
            return;
        }

        let chance = instakill_chance(attacker.level, defender.level, &self.constants.ailments);
        let roll = rng.gen::<f64>() * 100.0;
        tracing::trace!(chance, roll, "instakill roll");
        if roll <= chance {
            defender.hp = 0;
            outcome.instakill = true;
            outcome.push(BattleEvent::Instakill {
                target: defender.display_name(),
                name: mv.label(),
            });
        }
    }
}

/// Null swallows the hit, drain heals the defender, repel hurts the attacker
fn divert(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    affinity: Affinity,
    raw: u32,
    outcome: &mut ActionOutcome,
) {
    match affinity {
        Affinity::Drain => {
            outcome.healed = defender.heal(raw);
            outcome.push(BattleEvent::Healed {
                target: defender.display_name(),
                amount: outcome.healed,
            });
        }
        Affinity::Repel => {
            attacker.take_damage(raw);
            outcome.reflected = raw;
            outcome.push(BattleEvent::Damage {
                target: attacker.display_name(),
                amount: raw,
            });
        }
        Affinity::Null | Affinity::Weak | Affinity::Resist | Affinity::Neutral => {}
    }
}
