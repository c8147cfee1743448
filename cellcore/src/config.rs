//! Session settings
//!
//! Settings are a JSON document; every field is optional:
//!
//! ```json
//! {
//!   "cycle_mode": "cathode",
//!   "raw_units": {"charge": "Ah"},
//!   "cellpy_units": {"mass": "g"},
//!   "output_units": {},
//!   "data_scale": {"mass": 1.2}
//! }
//! ```
//!
//! Unit overrides go through `UnitSystem::with_updates`, so an unknown
//! quantity name is an error rather than a silently ignored key.

use crate::mode::CyclingMode;
use cellcore_core::{CoreError, Result};
use cellcore_units::{DataScale, UnitSystem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use tracing::info;

/// Environment variable holding the path of the settings file
pub const CONFIG_ENV_VAR: &str = "CELLCORE_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub cycle_mode: CyclingMode,
    pub raw_units: BTreeMap<String, String>,
    pub cellpy_units: BTreeMap<String, String>,
    pub output_units: BTreeMap<String, String>,
    pub data_scale: DataScale,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::InvalidConfig(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| CoreError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Read the file named by `CELLCORE_CONFIG`, or defaults if it is unset
    pub fn from_env() -> Result<Self> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) => {
                info!(path = %path, "loading settings");
                Self::from_path(path)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn raw_unit_system(&self) -> Result<UnitSystem> {
        UnitSystem::default().with_updates(&self.raw_units)
    }

    pub fn cellpy_unit_system(&self) -> Result<UnitSystem> {
        UnitSystem::default().with_updates(&self.cellpy_units)
    }

    pub fn output_unit_system(&self) -> Result<UnitSystem> {
        UnitSystem::default().with_updates(&self.output_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellcore_units::UnitQuantity;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_json(
            r#"{"cycle_mode": "cathode", "raw_units": {"charge": "Ah"}, "data_scale": {"mass": 1.5}}"#,
        )
        .unwrap();

        assert_eq!(settings.cycle_mode, CyclingMode::Cathode);
        assert_eq!(settings.raw_unit_system().unwrap().get(UnitQuantity::Charge), "Ah");
        assert_eq!(settings.cellpy_unit_system().unwrap(), UnitSystem::default());
        assert_eq!(settings.data_scale.mass, Some(1.5));
    }

    #[test]
    fn test_unknown_quantity_is_an_error() {
        let settings = Settings::from_json(r#"{"output_units": {"charg": "Ah"}}"#).unwrap();
        assert_eq!(
            settings.output_unit_system(),
            Err(CoreError::UnknownUnitQuantity("charg".to_string()))
        );
    }

    #[test]
    fn test_unknown_field_is_invalid_config() {
        assert!(matches!(
            Settings::from_json(r#"{"cycling": "anode"}"#),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Settings::from_path("/nonexistent/cellcore.json"),
            Err(CoreError::InvalidConfig(_))
        ));
    }
}
