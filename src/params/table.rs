// params/table.rs

// Static per-variant physical constants. The resolver never branches on the
// variant; it looks the variant up here and feeds the record through the
// scaling formulas. Entries can be replaced or added from configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::scaling::{reference, LB_TO_KG, MPH_TO_MS, STD_CARGO_KG};

/// Supported GM vehicle models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleVariant {
    Volt,
    Bolt,
    Malibu,
    HoldenAstra,
    Acadia,
    BuickRegal,
    CadillacAts,
}

impl VehicleVariant {
    /// Every variant the default table knows about.
    pub const ALL: [VehicleVariant; 7] = [
        VehicleVariant::Volt,
        VehicleVariant::Bolt,
        VehicleVariant::Malibu,
        VehicleVariant::HoldenAstra,
        VehicleVariant::Acadia,
        VehicleVariant::BuickRegal,
        VehicleVariant::CadillacAts,
    ];

    /// Fingerprint model name.
    pub fn model_name(&self) -> &'static str {
        match self {
            VehicleVariant::Volt => "CHEVROLET VOLT PREMIER 2017",
            VehicleVariant::Bolt => "CHEVROLET BOLT EV 2018",
            VehicleVariant::Malibu => "CHEVROLET MALIBU PREMIER 2017",
            VehicleVariant::HoldenAstra => "HOLDEN ASTRA RS-V BK 2017",
            VehicleVariant::Acadia => "GMC ACADIA DENALI 2018",
            VehicleVariant::BuickRegal => "BUICK REGAL ESSENCE 2018",
            VehicleVariant::CadillacAts => "CADILLAC ATS Premium Performance 2018",
        }
    }
}

impl fmt::Display for VehicleVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.model_name())
    }
}

/// Physical and speed constants for one variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariantConstants {
    /// Lowest speed at which engagement is allowed (m/s); negative means any speed.
    pub min_enable_speed: f64,
    /// Lowest speed at which steering is applied (m/s).
    pub min_steer_speed: f64,
    /// Mass including standard cargo (kg).
    pub mass: f64,
    /// Wheelbase (m).
    pub wheelbase: f64,
    pub steer_ratio: f64,
    pub steer_ratio_rear: f64,
    /// Center of gravity to front axle, as a fraction of the wheelbase.
    pub center_to_front_ratio: f64,
    pub tire_stiffness_factor: f64,
}

impl VariantConstants {
    /// Center of gravity to front axle (m).
    pub fn center_to_front(&self) -> f64 {
        self.wheelbase * self.center_to_front_ratio
    }

    /// Constants used when a variant has no table entry.
    pub fn standard() -> Self {
        VariantConstants {
            min_enable_speed: -1.0,
            min_steer_speed: 0.0,
            mass: reference::MASS,
            wheelbase: reference::WHEELBASE,
            steer_ratio: reference::STEER_RATIO,
            steer_ratio_rear: 0.0,
            center_to_front_ratio: 0.4,
            tire_stiffness_factor: 1.0,
        }
    }
}

/// Lookup table from variant to constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariantTable {
    entries: HashMap<VehicleVariant, VariantConstants>,
}

impl VariantTable {
    /// A table with no entries; every lookup misses.
    pub fn empty() -> Self {
        VariantTable {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, variant: VehicleVariant) -> Option<&VariantConstants> {
        self.entries.get(&variant)
    }

    /// Insert or replace the entry for `variant`.
    pub fn insert(&mut self, variant: VehicleVariant, constants: VariantConstants) {
        self.entries.insert(variant, constants);
    }

    pub fn remove(&mut self, variant: VehicleVariant) -> Option<VariantConstants> {
        self.entries.remove(&variant)
    }

    /// Overlay `overrides` on top of this table.
    pub fn merge(&mut self, overrides: &HashMap<VehicleVariant, VariantConstants>) {
        for (variant, constants) in overrides {
            self.entries.insert(*variant, *constants);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VariantTable {
    fn default() -> Self {
        // Engagement above 18 mph includes some conservatism on the cars
        // that support stop and go.
        let engage_18mph = 18.0 * MPH_TO_MS;
        let steer_7mph = 7.0 * MPH_TO_MS;

        let entries = HashMap::from([
            (
                VehicleVariant::Volt,
                VariantConstants {
                    min_enable_speed: engage_18mph,
                    min_steer_speed: steer_7mph,
                    mass: 1607.0 + STD_CARGO_KG,
                    wheelbase: 2.69,
                    steer_ratio: 15.7,
                    steer_ratio_rear: 0.0,
                    center_to_front_ratio: 0.4,
                    tire_stiffness_factor: 0.444,
                },
            ),
            (
                VehicleVariant::Bolt,
                VariantConstants {
                    min_enable_speed: -1.0,
                    min_steer_speed: 5.0,
                    mass: 1625.0 + STD_CARGO_KG,
                    wheelbase: 2.60096,
                    steer_ratio: 16.8,
                    steer_ratio_rear: 0.0,
                    center_to_front_ratio: 0.49,
                    tire_stiffness_factor: 0.5,
                },
            ),
            (
                VehicleVariant::Malibu,
                VariantConstants {
                    min_enable_speed: engage_18mph,
                    min_steer_speed: steer_7mph,
                    mass: 1496.0 + STD_CARGO_KG,
                    wheelbase: 2.83,
                    steer_ratio: 15.8,
                    steer_ratio_rear: 0.0,
                    center_to_front_ratio: 0.4,
                    tire_stiffness_factor: 0.444,
                },
            ),
            (
                VehicleVariant::HoldenAstra,
                VariantConstants {
                    min_enable_speed: engage_18mph,
                    min_steer_speed: steer_7mph,
                    mass: 1363.0 + STD_CARGO_KG,
                    wheelbase: 2.662,
                    steer_ratio: 15.7,
                    steer_ratio_rear: 0.0,
                    center_to_front_ratio: 0.4,
                    tire_stiffness_factor: 0.444,
                },
            ),
            (
                // engage speed is decided by the PCM
                VehicleVariant::Acadia,
                VariantConstants {
                    min_enable_speed: -1.0,
                    min_steer_speed: steer_7mph,
                    mass: 4353.0 * LB_TO_KG + STD_CARGO_KG,
                    wheelbase: 2.86,
                    steer_ratio: 14.4,
                    steer_ratio_rear: 0.0,
                    center_to_front_ratio: 0.4,
                    tire_stiffness_factor: 0.444,
                },
            ),
            (
                VehicleVariant::BuickRegal,
                VariantConstants {
                    min_enable_speed: engage_18mph,
                    min_steer_speed: steer_7mph,
                    mass: 3779.0 * LB_TO_KG + STD_CARGO_KG,
                    wheelbase: 2.83,
                    steer_ratio: 14.4,
                    steer_ratio_rear: 0.0,
                    center_to_front_ratio: 0.4,
                    tire_stiffness_factor: 0.444,
                },
            ),
            (
                VehicleVariant::CadillacAts,
                VariantConstants {
                    min_enable_speed: engage_18mph,
                    min_steer_speed: steer_7mph,
                    mass: 1601.0 + STD_CARGO_KG,
                    wheelbase: 2.78,
                    steer_ratio: 15.3,
                    steer_ratio_rear: 0.0,
                    center_to_front_ratio: 0.49,
                    tire_stiffness_factor: 0.444,
                },
            ),
        ]);

        VariantTable { entries }
    }
}
