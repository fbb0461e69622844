// config.rs

// YAML configuration for a car session: which variant is installed, what the
// startup fingerprint saw, the stored driver preferences and any per-variant
// constant overrides. Also loads replay scripts for the demo binary.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::params::{
    resolve_with_preferences, Fingerprint, TuningProfile, VariantConstants, VariantTable,
    VehicleVariant,
};
use crate::preferences::MemoryParams;
use crate::{GmError, RawVehicleSnapshot};

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmConfig {
    /// Installed vehicle model
    pub variant: VehicleVariant,
    /// Message ids observed per bus at startup
    pub fingerprint: Fingerprint,
    /// Stored driver preferences
    pub preferences: MemoryParams,
    /// Constants replacing the built-in table entries
    pub variant_overrides: HashMap<VehicleVariant, VariantConstants>,
}

impl Default for GmConfig {
    fn default() -> Self {
        GmConfig {
            variant: VehicleVariant::Volt,
            fingerprint: Fingerprint::empty(),
            preferences: MemoryParams::new(),
            variant_overrides: HashMap::new(),
        }
    }
}

impl GmConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GmError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GmError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config: GmConfig = serde_yaml::from_reader(file)?;
        info!(
            "Loaded config from {} (variant {})",
            path.as_ref().display(),
            config.variant
        );
        Ok(config)
    }

    /// Built-in table with the overrides applied.
    pub fn variant_table(&self) -> VariantTable {
        let mut table = VariantTable::default();
        table.merge(&self.variant_overrides);
        table
    }

    pub fn resolve_profile(&self) -> TuningProfile {
        resolve_with_preferences(
            self.variant,
            &self.fingerprint,
            &self.preferences,
            &self.variant_table(),
        )
    }
}

/// Sequence of decoded snapshots fed to the interface one per cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub cycles: Vec<RawVehicleSnapshot>,
}

impl ReplayScript {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GmError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GmError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
}
