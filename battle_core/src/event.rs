//! Narration events emitted while a turn resolves
//!
//! Within one resolved action the order is fixed: miss/affinity, damage,
//! status break, instakill, secondary status.

use crate::combat::Affinity;
use crate::status::{StatusApplication, StatusCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a status did not take hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFailure {
    Immune,
    AlreadyAffected,
    AlreadyAfflicted,
    MaxStacks,
    Resisted,
}

/// One human-readable narration line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BattleEvent {
    /// Menu or board text shown to the acting participant
    Prompt { text: String },
    CannotAct { actor: String, status: String },
    TurnSkipped { actor: String, status: String },
    TurnTimedOut { actor: String },
    UsesMove { actor: String, name: String },
    Missed { actor: String },
    Charmed { actor: String },
    Brainwashed { actor: String },
    Affinity { target: String, affinity: Affinity },
    Critical,
    AttackDamage { actor: String, amount: u32 },
    Damage { target: String, amount: u32 },
    Healed { target: String, amount: u32 },
    Cured { target: String, status: String },
    Guarding { actor: String },
    StatusBroken { target: String, status: String },
    Instakill { target: String, name: String },
    StatusApplied {
        target: String,
        status: String,
        outcome: StatusApplication,
        category: StatusCategory,
    },
    StatusFailed {
        target: String,
        status: String,
        reason: StatusFailure,
    },
    StatusDamage { target: String, status: String, amount: u32 },
    StatusExpired { target: String, status: String },
    InsufficientSp { actor: String, name: String },
    UnknownMove { name: String },
    InvalidSelection { actor: String, input: String },
    Victory { winner: String, loser: String },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Prompt { text } => f.write_str(text),
            BattleEvent::CannotAct { actor, status } => {
                write!(f, "{} is afflicted with {} and cannot act!", actor, status)
            }
            BattleEvent::TurnSkipped { actor, status } => {
                write!(f, "{} is held by {} and loses their turn!", actor, status)
            }
            BattleEvent::TurnTimedOut { actor } => {
                write!(f, "{} didn't respond in time. Turn skipped.", actor)
            }
            BattleEvent::UsesMove { actor, name } => write!(f, "{} uses {}...", actor, name),
            BattleEvent::Missed { actor } => write!(f, "{} attacks... but it MISSES!", actor),
            BattleEvent::Charmed { actor } => {
                write!(f, "{} is charmed 💘 and attacks an ally instead!", actor)
            }
            BattleEvent::Brainwashed { actor } => {
                write!(f, "{} is brainwashed 🧠 and heals the enemy instead!", actor)
            }
            BattleEvent::Affinity { target, affinity } => match affinity {
                Affinity::Weak => f.write_str("It's super effective!"),
                Affinity::Resist => f.write_str("It's not very effective..."),
                Affinity::Null => write!(f, "{} is unaffected!", target),
                Affinity::Drain => write!(f, "{} absorbs the attack!", target),
                Affinity::Repel => write!(f, "{} repels the attack!", target),
                Affinity::Neutral => Ok(()),
            },
            BattleEvent::Critical => f.write_str("Critical hit! 💥"),
            BattleEvent::AttackDamage { actor, amount } => {
                write!(f, "{} attacks and deals {} damage!", actor, amount)
            }
            BattleEvent::Damage { target, amount } => {
                write!(f, "{} takes {} damage!", target, amount)
            }
            BattleEvent::Healed { target, amount } => {
                write!(f, "{} recovers {} HP!", target, amount)
            }
            BattleEvent::Cured { target, status } => {
                write!(f, "{} is no longer affected by {}!", target, status)
            }
            BattleEvent::Guarding { actor } => {
                write!(f, "{} assumes a defensive stance! 🛡️", actor)
            }
            BattleEvent::StatusBroken { target, status } => {
                write!(f, "{}'s {} status was broken by the attack!", target, status)
            }
            BattleEvent::Instakill { target, name } => {
                write!(f, "{} instantly defeats {}!", name, target)
            }
            BattleEvent::StatusApplied {
                target,
                status,
                outcome,
                category,
            } => match outcome {
                StatusApplication::Stacked(stacks) => {
                    write!(f, "{} on {} is strengthened! (×{})", status, target, stacks)
                }
                StatusApplication::Refreshed => {
                    write!(f, "{} on {} is extended!", status, target)
                }
                StatusApplication::Applied => match category {
                    StatusCategory::Ailment => {
                        write!(f, "{} is afflicted with {}!", target, status)
                    }
                    StatusCategory::Debuff => write!(f, "{} suffers from {}!", target, status),
                    StatusCategory::Buff => write!(f, "{} gains {}!", target, status),
                },
            },
            BattleEvent::StatusFailed {
                target,
                status,
                reason,
            } => match reason {
                StatusFailure::Immune => write!(f, "{} is immune to {}!", target, status),
                StatusFailure::AlreadyAffected => {
                    write!(f, "{} is already affected by {}!", target, status)
                }
                StatusFailure::AlreadyAfflicted => {
                    write!(f, "{} is already afflicted with another ailment!", target)
                }
                StatusFailure::MaxStacks => {
                    write!(f, "{} on {} can't stack any higher!", status, target)
                }
                StatusFailure::Resisted => {
                    write!(f, "{} resisted the {} effect!", target, status)
                }
            },
            BattleEvent::StatusDamage {
                target,
                status,
                amount,
            } => write!(f, "{} takes {} damage from {}!", target, amount, status),
            BattleEvent::StatusExpired { target, status } => {
                write!(f, "{} has worn off from {}!", status, target)
            }
            BattleEvent::InsufficientSp { actor, name } => {
                write!(f, "{} doesn't have enough SP to use {}!", actor, name)
            }
            BattleEvent::UnknownMove { name } => write!(f, "{} is not a known move.", name),
            BattleEvent::InvalidSelection { actor, input } => {
                write!(f, "{}: '{}' is not a valid choice.", actor, input)
            }
            BattleEvent::Victory { winner, loser } => {
                write!(f, "{} defeated {}!", winner, loser)
            }
        }
    }
}
