//! GM car interface core
//!
//! Sits between the bus decoder and the actuator encoder of a GM car port.
//! At startup it resolves the vehicle variant into a [`TuningProfile`]; on
//! every control cycle it turns the decoded [`RawVehicleSnapshot`] into
//! button events, steps the emulated adaptive-cruise engagement and reports
//! the cycle's status events.

#![warn(unused_extern_crates)]

pub mod buttons;
pub mod config;
pub mod engagement;
pub mod events;
pub mod interface;
pub mod params;
pub mod preferences;

// Re-export commonly used items for easier access
pub use buttons::{ButtonEvent, ButtonType, CruiseButtons};
pub use config::{GmConfig, ReplayScript};
pub use engagement::EngagementState;
pub use events::{CommonEventCheck, StandardEventChecks, StatusEvent};
pub use interface::{ActuatorEncoder, CarInterface, CarStateOutput, ControlRequest};
pub use params::{
    resolve, resolve_with_preferences, Fingerprint, LateralTuning, LateralTuningMode,
    TuningProfile, VariantConstants, VariantTable, VehicleVariant,
};
pub use preferences::{MemoryParams, ParamStore};

use serde::{Deserialize, Serialize};

/// Decoded vehicle state for one control cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawVehicleSnapshot {
    /// Vehicle speed (m/s)
    pub speed: f64,
    pub park_brake: bool,
    pub brake_pressed: bool,
    /// Stock cruise main switch
    pub main_on: bool,
    pub cruise_buttons: CruiseButtons,
    /// Bus checksums and counters were valid
    pub bus_valid: bool,
}

impl Default for RawVehicleSnapshot {
    fn default() -> Self {
        RawVehicleSnapshot {
            speed: 0.0,
            park_brake: false,
            brake_pressed: false,
            main_on: false,
            cruise_buttons: CruiseButtons::Unpress,
            bus_valid: true,
        }
    }
}

/// Crate error types. Only startup (configuration loading) can fail.
#[derive(Debug)]
pub enum GmError {
    /// Reading a config or replay file failed
    Io(std::io::Error),
    /// YAML could not be parsed into the expected shape
    Config(String),
}

impl std::fmt::Display for GmError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GmError::Io(err) => write!(f, "I/O error: {}", err),
            GmError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GmError::Io(err) => Some(err),
            GmError::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for GmError {
    fn from(err: std::io::Error) -> Self {
        GmError::Io(err)
    }
}

impl From<serde_yaml::Error> for GmError {
    fn from(err: serde_yaml::Error) -> Self {
        GmError::Config(err.to_string())
    }
}
