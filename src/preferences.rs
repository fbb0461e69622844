// preferences.rs

// Read-only access to the persisted driver preferences. Only the two
// lateral-tuning flags are consulted, once each, when the profile is built.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Preference key selecting the LQR lateral controller.
pub const LQR_SELECTED: &str = "LQR_Selected";
/// Preference key selecting the INDI lateral controller.
pub const INDI_SELECTED: &str = "INDI_Selected";

/// Boolean key/value preference source.
pub trait ParamStore {
    /// Value of `key`; a missing key reads as `false`.
    fn get_bool(&self, key: &str) -> bool;
}

/// In-memory preference store, usually filled from the YAML config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryParams {
    flags: HashMap<String, bool>,
}

impl MemoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: bool) {
        self.flags.insert(key.to_string(), value);
    }

    pub fn with(mut self, key: &str, value: bool) -> Self {
        self.set(key, value);
        self
    }
}

impl ParamStore for MemoryParams {
    fn get_bool(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_false() {
        let params = MemoryParams::new().with(LQR_SELECTED, true);
        assert!(params.get_bool(LQR_SELECTED));
        assert!(!params.get_bool(INDI_SELECTED));
    }

    #[test]
    fn loads_from_yaml_map() {
        let params: MemoryParams =
            serde_yaml::from_str("LQR_Selected: false\nINDI_Selected: true\n").unwrap();
        assert!(!params.get_bool(LQR_SELECTED));
        assert!(params.get_bool(INDI_SELECTED));
    }
}
