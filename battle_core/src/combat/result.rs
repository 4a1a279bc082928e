//! Outcomes of resolved actions and menu steps

use super::Affinity;
use crate::event::BattleEvent;

/// What one resolved action did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    /// Ordered narration
    pub events: Vec<BattleEvent>,
    /// Damage dealt to the defender
    pub damage: u32,
    /// Damage reflected onto the attacker
    pub reflected: u32,
    /// Hp restored to whoever was healed
    pub healed: u32,
    pub missed: bool,
    pub critical: bool,
    pub instakill: bool,
    /// Affinity of the defender to the move, for damaging moves that connected
    pub affinity: Option<Affinity>,
}

impl ActionOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = BattleEvent>) {
        self.events.extend(events);
    }
}

/// Result of feeding one input to the menu state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnProgress {
    /// Whether the actor's turn was consumed
    pub completed: bool,
    pub events: Vec<BattleEvent>,
}

impl TurnProgress {
    /// Menu navigation or a rejected selection; the turn continues
    pub fn pending(events: Vec<BattleEvent>) -> Self {
        TurnProgress {
            completed: false,
            events,
        }
    }

    /// A resolved action; the turn is over
    pub fn completed(outcome: ActionOutcome) -> Self {
        TurnProgress {
            completed: true,
            events: outcome.events,
        }
    }
}
