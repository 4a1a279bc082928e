//! Core types shared across the battle system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Elemental type of a move, also used as the key for affinity sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Physical,
    Gun,
    Fire,
    Ice,
    Electric,
    Force,
    Light,
    Dark,
    Almighty,
    Ailment,
    Support,
    Healing,
}

impl Element {
    /// Get all element types
    pub fn all() -> &'static [Element] {
        &[
            Element::Physical,
            Element::Gun,
            Element::Fire,
            Element::Ice,
            Element::Electric,
            Element::Force,
            Element::Light,
            Element::Dark,
            Element::Almighty,
            Element::Ailment,
            Element::Support,
            Element::Healing,
        ]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Identifier of a human participant (chat user id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        ParticipantId(s.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        ParticipantId(s)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two sides of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Keys of the status multiplier map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    StrengthMultiplier,
    MagicMultiplier,
    DefenseMultiplier,
    AccuracyMultiplier,
    EvasionMultiplier,
    PhysicalVulnerability,
    MagicalVulnerability,
}

impl StatKey {
    pub fn all() -> &'static [StatKey] {
        &[
            StatKey::StrengthMultiplier,
            StatKey::MagicMultiplier,
            StatKey::DefenseMultiplier,
            StatKey::AccuracyMultiplier,
            StatKey::EvasionMultiplier,
            StatKey::PhysicalVulnerability,
            StatKey::MagicalVulnerability,
        ]
    }
}

/// Base stat a status application is resisted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistStat {
    Strength,
    Magic,
    #[default]
    Vitality,
    Speed,
}
