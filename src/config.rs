//! One-time parse and validation of the host's match configuration.
//!
//! The engine describes units as an ordered `unitInformation` array whose
//! entries carry a `shorthand` identifier used on the wire. The catalog
//! resolves each archetype's shorthand once at game start; per-turn code
//! only ever sees [`UnitKind`].

use crate::error::ConfigError;
use crate::units::UnitKind;
use serde::Deserialize;

#[derive(Deserialize)]
struct RawConfig {
    #[serde(rename = "unitInformation")]
    unit_information: Vec<RawUnitInfo>,
}

#[derive(Deserialize)]
struct RawUnitInfo {
    #[serde(default)]
    shorthand: String,
}

/// Archetype to engine-shorthand mapping, validated at load.
#[derive(Clone, Debug)]
pub struct UnitCatalog {
    shorthands: [String; 6],
}

impl UnitCatalog {
    /// Parse the raw config JSON handed to `on_game_start`.
    ///
    /// The table may carry trailing entries (the engine appends
    /// pseudo-units for removal and upgrade markers); only the first six
    /// are archetypes the core deploys.
    pub fn from_config(raw: &str) -> Result<UnitCatalog, ConfigError> {
        let config: RawConfig = serde_json::from_str(raw)?;
        if config.unit_information.len() < UnitKind::ALL.len() {
            return Err(ConfigError::TruncatedUnitTable(
                config.unit_information.len(),
            ));
        }
        for (index, info) in config.unit_information[..UnitKind::ALL.len()]
            .iter()
            .enumerate()
        {
            if info.shorthand.is_empty() {
                return Err(ConfigError::EmptyShorthand(index));
            }
        }

        let mut shorthands: [String; 6] = Default::default();
        for kind in UnitKind::ALL {
            shorthands[kind.config_index()] =
                config.unit_information[kind.config_index()].shorthand.clone();
        }
        Ok(UnitCatalog { shorthands })
    }

    /// Engine identifier for an archetype.
    pub fn shorthand(&self, kind: UnitKind) -> &str {
        &self.shorthands[kind.config_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> String {
        let units = ["FF", "EF", "DF", "PI", "EI", "SI", "RM", "UP"]
            .iter()
            .map(|s| format!(r#"{{"shorthand":"{s}"}}"#))
            .collect::<Vec<_>>()
            .join(",");
        format!(r#"{{"unitInformation":[{units}]}}"#)
    }

    #[test]
    fn resolves_shorthands_in_config_order() {
        let catalog = UnitCatalog::from_config(&sample_config()).unwrap();
        assert_eq!(catalog.shorthand(UnitKind::Wall), "FF");
        assert_eq!(catalog.shorthand(UnitKind::Turret), "DF");
        assert_eq!(catalog.shorthand(UnitKind::Interceptor), "SI");
    }

    #[test]
    fn rejects_truncated_unit_table() {
        let raw = r#"{"unitInformation":[{"shorthand":"FF"}]}"#;
        assert!(matches!(
            UnitCatalog::from_config(raw),
            Err(ConfigError::TruncatedUnitTable(1))
        ));
    }

    #[test]
    fn rejects_missing_shorthand() {
        let raw = r#"{"unitInformation":[{"shorthand":"FF"},{"shorthand":"EF"},{},
            {"shorthand":"PI"},{"shorthand":"EI"},{"shorthand":"SI"}]}"#;
        assert!(matches!(
            UnitCatalog::from_config(raw),
            Err(ConfigError::EmptyShorthand(2))
        ));
    }

    #[test]
    fn rejects_non_json_config() {
        assert!(matches!(
            UnitCatalog::from_config("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
