//! Tuning profile resolution
//!
//! Turns a vehicle variant, the startup fingerprint and the driver's
//! lateral-tuning preference into the immutable [`TuningProfile`] that the
//! lateral and longitudinal controllers run on for the rest of the drive.
pub mod scaling;
pub mod table;

use log::{info, warn};
use nalgebra::{Matrix2, RowVector2, Vector2};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::preferences::{ParamStore, INDI_SELECTED, LQR_SELECTED};
use scaling::{scale_rot_inertia, scale_tire_stiffness};
pub use table::{VariantConstants, VariantTable, VehicleVariant};

/// Message id published by the auxiliary pedal interceptor.
pub const GAS_INTERCEPTOR_MSG: u32 = 0x201;

/// Piecewise-linear gain schedule: `values[i]` applies at `breakpoints[i]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GainCurve {
    pub breakpoints: Vec<f64>,
    pub values: Vec<f64>,
}

impl GainCurve {
    pub fn new(breakpoints: &[f64], values: &[f64]) -> Self {
        GainCurve {
            breakpoints: breakpoints.to_vec(),
            values: values.to_vec(),
        }
    }

    /// Interpolated value at `x`, held constant outside the breakpoint range.
    pub fn at(&self, x: f64) -> f64 {
        let n = self.breakpoints.len().min(self.values.len());
        if n == 0 {
            return 0.0;
        }
        if x <= self.breakpoints[0] {
            return self.values[0];
        }
        for i in 1..n {
            let (x0, x1) = (self.breakpoints[i - 1], self.breakpoints[i]);
            if x <= x1 {
                let (y0, y1) = (self.values[i - 1], self.values[i]);
                if x1 == x0 {
                    return y1;
                }
                return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
            }
        }
        self.values[n - 1]
    }
}

/// PID steering gains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PidTuning {
    pub kp: GainCurve,
    pub ki: GainCurve,
    pub kd: GainCurve,
    pub kf: f64,
}

/// LQR steering gains with the state-space model used by the observer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LqrTuning {
    pub scale: f64,
    pub ki: f64,
    pub a: Matrix2<f64>,
    pub b: Vector2<f64>,
    pub c: RowVector2<f64>,
    pub k: RowVector2<f64>,
    pub l: Vector2<f64>,
    pub dc_gain: f64,
}

/// INDI steering gains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndiTuning {
    pub inner_loop_gain: GainCurve,
    pub outer_loop_gain: GainCurve,
    pub time_constant: GainCurve,
    pub actuator_effectiveness: GainCurve,
}

/// The one lateral control law in effect for the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "lowercase")]
pub enum LateralTuning {
    Pid(PidTuning),
    Lqr(LqrTuning),
    Indi(IndiTuning),
}

impl LateralTuning {
    pub fn mode(&self) -> LateralTuningMode {
        match self {
            LateralTuning::Pid(_) => LateralTuningMode::Pid,
            LateralTuning::Lqr(_) => LateralTuningMode::Lqr,
            LateralTuning::Indi(_) => LateralTuningMode::Indi,
        }
    }
}

/// Which lateral control family the driver selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LateralTuningMode {
    #[default]
    Pid,
    Lqr,
    Indi,
}

impl LateralTuningMode {
    /// LQR wins over INDI; with neither flag set the PID law is used.
    pub fn from_flags(lqr_selected: bool, indi_selected: bool) -> Self {
        if lqr_selected {
            LateralTuningMode::Lqr
        } else if indi_selected {
            LateralTuningMode::Indi
        } else {
            LateralTuningMode::Pid
        }
    }

    /// The fixed gain set for this family.
    pub fn tuning(self) -> LateralTuning {
        match self {
            LateralTuningMode::Lqr => LateralTuning::Lqr(LqrTuning {
                scale: 1950.0,
                ki: 0.055,
                a: Matrix2::new(0.0, 1.0, -0.22619643, 1.21822268),
                b: Vector2::new(-1.92006585e-04, 3.95603032e-05),
                c: RowVector2::new(1.0, 0.0),
                k: RowVector2::new(-110.73572306, 451.22718255),
                l: Vector2::new(0.3233671, 0.3185757),
                dc_gain: 0.002237852961363602,
            }),
            LateralTuningMode::Indi => LateralTuning::Indi(IndiTuning {
                inner_loop_gain: GainCurve::new(&[10.0, 30.0], &[5.5, 8.0]),
                outer_loop_gain: GainCurve::new(&[10.0, 30.0], &[4.5, 7.0]),
                time_constant: GainCurve::new(&[10.0, 30.0], &[1.8, 3.5]),
                actuator_effectiveness: GainCurve::new(&[0.0], &[2.0]),
            }),
            LateralTuningMode::Pid => LateralTuning::Pid(PidTuning {
                kp: GainCurve::new(&[10.0, 25.0], &[0.1, 0.12]),
                ki: GainCurve::new(&[10.0, 25.0], &[0.00624, 0.01248]),
                kd: GainCurve::new(&[0.0], &[0.7]),
                kf: 0.00055,
            }),
        }
    }
}

/// Longitudinal PI gains plus feedforward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalTuning {
    pub kp: GainCurve,
    pub ki: GainCurve,
    pub kf: f64,
}

impl Default for LongitudinalTuning {
    fn default() -> Self {
        LongitudinalTuning {
            kp: GainCurve::new(&[0.0, 30.0], &[0.4, 0.45]),
            ki: GainCurve::new(&[0.0], &[0.05]),
            kf: 0.5,
        }
    }
}

/// Message ids seen on each bus during startup detection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint {
    buses: BTreeMap<u8, BTreeSet<u32>>,
}

impl Fingerprint {
    /// Four empty buses.
    pub fn empty() -> Self {
        Fingerprint {
            buses: (0..4).map(|bus| (bus, BTreeSet::new())).collect(),
        }
    }

    pub fn observe(&mut self, bus: u8, msg_id: u32) {
        self.buses.entry(bus).or_default().insert(msg_id);
    }

    pub fn with(mut self, bus: u8, msg_id: u32) -> Self {
        self.observe(bus, msg_id);
        self
    }

    /// Whether `msg_id` was seen on any bus.
    pub fn contains(&self, msg_id: u32) -> bool {
        self.buses.values().any(|ids| ids.contains(&msg_id))
    }
}

/// Resolved physical model and controller tuning for one drive session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TuningProfile {
    pub car_name: String,
    pub car_fingerprint: VehicleVariant,
    pub safety_model: String,
    pub mass: f64,
    pub wheelbase: f64,
    pub steer_ratio: f64,
    pub steer_ratio_rear: f64,
    pub center_to_front: f64,
    pub rotational_inertia: f64,
    pub tire_stiffness_front: f64,
    pub tire_stiffness_rear: f64,
    pub min_enable_speed: f64,
    pub min_steer_speed: f64,
    pub longitudinal_tuning: LongitudinalTuning,
    /// Max gas schedule, populated only with a pedal interceptor.
    pub gas_max: Option<GainCurve>,
    pub lateral_tuning: LateralTuning,
    pub enable_gas_interceptor: bool,
    pub enable_camera: bool,
    pub openpilot_longitudinal_control: bool,
    /// Stock cruise control is kept off.
    pub enable_cruise: bool,
    pub community_feature: bool,
    pub stopping_control: bool,
    pub start_accel: f64,
    pub steer_rate_cost: f64,
    pub steer_actuator_delay: f64,
    pub steer_limit_timer: f64,
    pub radar_time_step: f64,
}

/// Builds the session profile. Never fails: a variant missing from `table`
/// is resolved with [`VariantConstants::standard`].
pub fn resolve(
    variant: VehicleVariant,
    fingerprint: &Fingerprint,
    mode: LateralTuningMode,
    table: &VariantTable,
) -> TuningProfile {
    let constants = match table.get(variant) {
        Some(constants) => *constants,
        None => {
            warn!("No table entry for {variant}, using standard constants");
            VariantConstants::standard()
        }
    };

    let center_to_front = constants.center_to_front();
    let rotational_inertia = scale_rot_inertia(constants.mass, constants.wheelbase);
    let (tire_stiffness_front, tire_stiffness_rear) = scale_tire_stiffness(
        constants.mass,
        constants.wheelbase,
        center_to_front,
        constants.tire_stiffness_factor,
    );

    // Camera harness is always present on this port.
    let enable_camera = true;
    let enable_gas_interceptor = fingerprint.contains(GAS_INTERCEPTOR_MSG);
    let gas_max = enable_gas_interceptor
        .then(|| GainCurve::new(&[0.0, 5.0, 9.0, 35.0], &[0.4, 0.5, 0.7, 0.7]));

    let profile = TuningProfile {
        car_name: "gm".to_string(),
        car_fingerprint: variant,
        safety_model: "gm".to_string(),
        mass: constants.mass,
        wheelbase: constants.wheelbase,
        steer_ratio: constants.steer_ratio,
        steer_ratio_rear: constants.steer_ratio_rear,
        center_to_front,
        rotational_inertia,
        tire_stiffness_front,
        tire_stiffness_rear,
        min_enable_speed: constants.min_enable_speed,
        min_steer_speed: constants.min_steer_speed,
        longitudinal_tuning: LongitudinalTuning::default(),
        gas_max,
        lateral_tuning: mode.tuning(),
        enable_gas_interceptor,
        enable_camera,
        openpilot_longitudinal_control: enable_camera && enable_gas_interceptor,
        enable_cruise: false,
        community_feature: true,
        stopping_control: true,
        start_accel: 1.0,
        steer_rate_cost: 1.0,
        steer_actuator_delay: 0.12,
        steer_limit_timer: 0.4,
        // GM radar runs at 15Hz
        radar_time_step: 0.0667,
    };

    info!(
        "Resolved profile for {}: lateral={:?}, interceptor={}, min_enable_speed={:.2}",
        variant, mode, enable_gas_interceptor, profile.min_enable_speed
    );
    profile
}

/// Like [`resolve`], reading the lateral-tuning flags from `store` once each.
pub fn resolve_with_preferences(
    variant: VehicleVariant,
    fingerprint: &Fingerprint,
    store: &dyn ParamStore,
    table: &VariantTable,
) -> TuningProfile {
    let lqr = store.get_bool(LQR_SELECTED);
    let indi = store.get_bool(INDI_SELECTED);
    resolve(
        variant,
        fingerprint,
        LateralTuningMode::from_flags(lqr, indi),
        table,
    )
}
