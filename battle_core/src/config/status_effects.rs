//! Status effect table loading

use super::ConfigError;
use crate::status::{StatusEffectDefinition, StatusRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for status effect definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEffectsConfig {
    pub status_effects: Vec<StatusEffectDefinition>,
}

fn into_registry(config: StatusEffectsConfig) -> StatusRegistry {
    let mut registry = StatusRegistry::new();
    for definition in config.status_effects {
        registry.register(definition);
    }
    registry
}

/// Load status effect definitions from a TOML file
pub fn load_status_table(path: &Path) -> Result<StatusRegistry, ConfigError> {
    let config: StatusEffectsConfig = super::load_toml(path)?;
    Ok(into_registry(config))
}

/// Load status effect definitions from a TOML string
pub fn parse_status_table(content: &str) -> Result<StatusRegistry, ConfigError> {
    let config: StatusEffectsConfig = super::parse_toml(content)?;
    Ok(into_registry(config))
}

/// Bundled status effect definitions
pub fn default_statuses() -> StatusRegistry {
    let toml = include_str!("../../config/status_effects.toml");
    parse_status_table(toml).unwrap_or_else(|err| {
        tracing::error!(%err, "bundled status effects failed to parse");
        StatusRegistry::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{BurstScope, RedirectKind, StatusCategory};
    use crate::types::Element;

    #[test]
    fn test_parse_statuses() {
        let toml = r#"
[[status_effects]]
id = "sleep"
name = "Sleep"
category = "ailment"
turn_duration = 3
can_act = false
break_on_damage = true

[[status_effects]]
id = "charge"
name = "Charge"
category = "buff"
turn_duration = 3
burst = "physical"
"#;

        let registry = parse_status_table(toml).unwrap();
        let sleep = registry.get("sleep").unwrap();
        assert_eq!(sleep.category, StatusCategory::Ailment);
        assert!(!sleep.can_act);
        assert!(sleep.break_on_damage);

        let charge = registry.get("charge").unwrap();
        assert_eq!(charge.burst, Some(BurstScope::Physical));
        assert!(charge.burst_multiplier.is_none());
    }

    #[test]
    fn test_default_statuses_load() {
        let registry = default_statuses();
        for id in [
            "poison", "sleep", "shock", "freeze", "charm", "brainwash", "tarukaja", "rakunda",
            "charge", "concentrate",
        ] {
            assert!(registry.get(id).is_some(), "Missing status: {}", id);
        }
        assert_eq!(registry.get("charm").unwrap().redirect, Some(RedirectKind::Charm));
        assert_eq!(registry.get("freeze").unwrap().weak_to, Some(Element::Physical));
    }
}
