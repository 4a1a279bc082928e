//! Enemy decision policy
//!
//! A fixed list of rules evaluated in priority order against a snapshot of
//! the automated combatant. The first rule that yields a decision wins.

use crate::combat::{ActionOutcome, ActionResolver};
use crate::combatant::Combatant;
use crate::config::PolicyConstants;
use crate::moves::Move;
use crate::reference::ReferenceData;
use rand::Rng;

/// Action chosen for an automated turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    UseMove(String),
    Guard,
    Attack,
}

/// Policy rules in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Heal when hp is below the threshold and a heal is affordable
    HealWhenLow,
    /// Flat chance to guard
    Guard,
    /// Chance to open with an ailment or debuff on an unafflicted opponent
    Inflict,
    /// Any affordable non-healing ability
    Ability,
    /// Basic attack
    Attack,
}

impl Rule {
    pub const PRIORITY: [Rule; 5] = [
        Rule::HealWhenLow,
        Rule::Guard,
        Rule::Inflict,
        Rule::Ability,
        Rule::Attack,
    ];
}

/// What the policy knows about the battle at decision time
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub hp_fraction: f64,
    pub opponent_afflicted: bool,
    /// Affordable healing moves in ability order
    pub heals: Vec<&'a Move>,
    /// Affordable moves carrying an ailment or debuff
    pub inflicting: Vec<&'a Move>,
    /// Affordable non-healing moves
    pub abilities: Vec<&'a Move>,
}

impl<'a> Snapshot<'a> {
    pub fn capture(actor: &Combatant, opponent: &Combatant, refs: &'a dyn ReferenceData) -> Self {
        let affordable: Vec<&Move> = actor
            .abilities
            .iter()
            .filter_map(|name| refs.find_move(name))
            .filter(|mv| actor.sp >= mv.sp)
            .collect();

        Snapshot {
            hp_fraction: actor.hp_fraction(),
            opponent_afflicted: opponent.has_ailment(),
            heals: affordable.iter().copied().filter(|mv| mv.is_healing()).collect(),
            inflicting: affordable
                .iter()
                .copied()
                .filter(|mv| !mv.is_healing() && mv.inflicts_status())
                .collect(),
            abilities: affordable
                .iter()
                .copied()
                .filter(|mv| !mv.is_healing())
                .collect(),
        }
    }
}

fn pick<'m>(moves: &[&'m Move], rng: &mut impl Rng) -> Option<&'m Move> {
    if moves.is_empty() {
        return None;
    }
    let index = (rng.gen::<f64>() * moves.len() as f64).floor() as usize;
    moves.get(index.min(moves.len() - 1)).copied()
}

/// Decision policy for AI-controlled sides
#[derive(Debug, Clone, Default)]
pub struct EnemyPolicy {
    constants: PolicyConstants,
}

impl EnemyPolicy {
    pub fn new(constants: PolicyConstants) -> Self {
        EnemyPolicy { constants }
    }

    fn evaluate(
        &self,
        rule: Rule,
        snapshot: &Snapshot<'_>,
        rng: &mut impl Rng,
    ) -> Option<Decision> {
        match rule {
            Rule::HealWhenLow => {
                if snapshot.hp_fraction < self.constants.heal_threshold {
                    snapshot
                        .heals
                        .first()
                        .map(|mv| Decision::UseMove(mv.name.clone()))
                } else {
                    None
                }
            }
            Rule::Guard => {
                (rng.gen::<f64>() * 100.0 < self.constants.guard_chance).then_some(Decision::Guard)
            }
            Rule::Inflict => {
                if snapshot.opponent_afflicted || snapshot.inflicting.is_empty() {
                    return None;
                }
                if rng.gen::<f64>() * 100.0 >= self.constants.status_chance {
                    return None;
                }
                pick(&snapshot.inflicting, rng).map(|mv| Decision::UseMove(mv.name.clone()))
            }
            Rule::Ability => {
                pick(&snapshot.abilities, rng).map(|mv| Decision::UseMove(mv.name.clone()))
            }
            Rule::Attack => Some(Decision::Attack),
        }
    }

    /// Choose an action for the automated combatant
    pub fn decide(
        &self,
        actor: &Combatant,
        opponent: &Combatant,
        refs: &dyn ReferenceData,
        rng: &mut impl Rng,
    ) -> Decision {
        let snapshot = Snapshot::capture(actor, opponent, refs);

        for rule in Rule::PRIORITY {
            if let Some(decision) = self.evaluate(rule, &snapshot, rng) {
                tracing::debug!(combatant = %actor.name, ?rule, ?decision, "policy decision");
                return decision;
            }
        }

        Decision::Attack
    }

    /// Decide and resolve one automated turn
    pub fn act(
        &self,
        resolver: &ActionResolver<'_>,
        refs: &dyn ReferenceData,
        actor: &mut Combatant,
        opponent: &mut Combatant,
        rng: &mut impl Rng,
    ) -> ActionOutcome {
        match self.decide(actor, opponent, refs, rng) {
            Decision::Guard => resolver.execute_guard(actor),
            Decision::Attack => resolver.execute_basic_attack(actor, opponent, rng),
            Decision::UseMove(name) => match resolver.execute_ability(actor, opponent, &name, rng) {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(%err, combatant = %actor.name, "ability rejected, attacking");
                    resolver.execute_basic_attack(actor, opponent, rng)
                }
            },
        }
    }
}
