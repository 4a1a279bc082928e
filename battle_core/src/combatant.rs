//! Combatant - one side's active demon and its mutable battle state

use crate::config::DemonTemplate;
use crate::status::StatusEffectInstance;
use crate::types::{Element, ParticipantId, ResistStat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Elemental affinities and status immunities of a demon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resistances {
    #[serde(default)]
    pub weak: BTreeSet<Element>,
    #[serde(default)]
    pub resist: BTreeSet<Element>,
    #[serde(default)]
    pub null: BTreeSet<Element>,
    #[serde(default)]
    pub drain: BTreeSet<Element>,
    #[serde(default)]
    pub repel: BTreeSet<Element>,
    /// Status effects that can never be applied
    #[serde(default)]
    pub immune: BTreeSet<String>,
    /// Ailments a skill can never inflict
    #[serde(default)]
    pub ailment_null: BTreeSet<String>,
    /// Ailments inflicted at half chance
    #[serde(default)]
    pub ailment_resist: BTreeSet<String>,
}

impl Resistances {
    /// Whether the element is resisted, nulled, drained or repelled
    pub fn blocks(&self, element: Element) -> bool {
        self.resist.contains(&element)
            || self.null.contains(&element)
            || self.drain.contains(&element)
            || self.repel.contains(&element)
    }
}

/// Battle-scoped state of a demon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub sp: u32,
    pub max_sp: u32,
    pub strength: u32,
    pub magic: u32,
    pub vitality: u32,
    pub speed: u32,
    /// Ordered move names
    pub abilities: Vec<String>,
    pub resistances: Resistances,
    #[serde(default)]
    pub status_effects: Vec<StatusEffectInstance>,
    #[serde(default)]
    pub is_guarding: bool,
    /// Controlling participant; `None` for AI-controlled sides
    #[serde(default)]
    pub owner: Option<ParticipantId>,
}

impl Combatant {
    /// Instantiate a fresh combatant from a roster template
    pub fn from_template(template: &DemonTemplate, owner: Option<ParticipantId>) -> Self {
        Combatant {
            name: template.name.clone(),
            level: template.level.max(1),
            hp: template.hp,
            max_hp: template.hp,
            sp: template.sp,
            max_sp: template.sp,
            strength: template.strength,
            magic: template.magic,
            vitality: template.vitality,
            speed: template.speed,
            abilities: template.abilities.clone(),
            resistances: template.resistances.clone(),
            status_effects: Vec::new(),
            is_guarding: false,
            owner,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_automated(&self) -> bool {
        self.owner.is_none()
    }

    /// Name used in narration: `<@owner> (Name)` for human sides
    pub fn display_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("<@{}> ({})", owner, self.name),
            None => self.name.clone(),
        }
    }

    /// Current hp as a fraction of max
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    /// Subtract damage; hp may drop to zero or below
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount.min(i32::MAX as u32) as i32);
    }

    /// Restore hp capped at max, returning the amount actually restored
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        let amount = amount.min(i32::MAX as u32) as i32;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        (self.hp - before).max(0) as u32
    }

    /// Base value of a resist stat
    pub fn stat(&self, stat: ResistStat) -> u32 {
        match stat {
            ResistStat::Strength => self.strength,
            ResistStat::Magic => self.magic,
            ResistStat::Vitality => self.vitality,
            ResistStat::Speed => self.speed,
        }
    }

    /// Find an active status instance by id (case-insensitive)
    pub fn status(&self, id: &str) -> Option<&StatusEffectInstance> {
        self.status_effects
            .iter()
            .find(|s| s.id().eq_ignore_ascii_case(id) && s.is_active())
    }

    pub fn has_status(&self, id: &str) -> bool {
        self.status(id).is_some()
    }

    /// Whether any active ailment-category status is present
    pub fn has_ailment(&self) -> bool {
        self.status_effects
            .iter()
            .any(|s| s.is_active() && s.is_ailment())
    }
}
