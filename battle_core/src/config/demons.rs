//! Demon roster templates

use super::ConfigError;
use crate::combatant::Resistances;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Immutable roster record a combatant is instantiated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemonTemplate {
    pub name: String,
    pub level: u32,
    /// Max HP
    pub hp: i32,
    /// Max SP
    pub sp: u32,
    pub strength: u32,
    pub magic: u32,
    pub vitality: u32,
    pub speed: u32,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub resistances: Resistances,
    #[serde(default)]
    pub emoji: String,
}

/// Demon templates keyed by name
#[derive(Debug, Clone, Default)]
pub struct DemonRoster {
    demons: BTreeMap<String, DemonTemplate>,
}

impl DemonRoster {
    pub fn new() -> Self {
        DemonRoster {
            demons: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, template: DemonTemplate) {
        self.demons.insert(template.name.clone(), template);
    }

    pub fn get(&self, name: &str) -> Option<&DemonTemplate> {
        self.demons.get(name)
    }

    pub fn len(&self) -> usize {
        self.demons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demons.is_empty()
    }

    /// Templates in name order
    pub fn iter(&self) -> impl Iterator<Item = &DemonTemplate> {
        self.demons.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.demons.keys().map(String::as_str).collect()
    }
}

/// Container for demon templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemonsConfig {
    pub demons: Vec<DemonTemplate>,
}

fn into_roster(config: DemonsConfig) -> DemonRoster {
    let mut roster = DemonRoster::new();
    for demon in config.demons {
        roster.register(demon);
    }
    roster
}

/// Load demon templates from a TOML file
pub fn load_demon_roster(path: &Path) -> Result<DemonRoster, ConfigError> {
    let config: DemonsConfig = super::load_toml(path)?;
    Ok(into_roster(config))
}

/// Load demon templates from a TOML string
pub fn parse_demon_roster(content: &str) -> Result<DemonRoster, ConfigError> {
    let config: DemonsConfig = super::parse_toml(content)?;
    Ok(into_roster(config))
}

/// Bundled demon templates
pub fn default_roster() -> DemonRoster {
    let toml = include_str!("../../config/demons.toml");
    parse_demon_roster(toml).unwrap_or_else(|err| {
        tracing::error!(%err, "bundled demons failed to parse");
        DemonRoster::new()
    })
}
