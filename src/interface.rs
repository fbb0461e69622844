// interface.rs

// Per-cycle driver for the GM port. Owns the session profile and the
// engagement state; `update` runs the translate -> step -> aggregate chain
// for one decoded snapshot and `apply` hands the controller's request to the
// actuator encoder.

use serde::{Deserialize, Serialize};

use crate::buttons::{translate, ButtonEvent};
use crate::engagement::{self, EngagementState};
use crate::events::{aggregate, CommonEventCheck, StandardEventChecks, StatusEvent};
use crate::params::TuningProfile;
use crate::RawVehicleSnapshot;

/// HUD set speeds above this (m/s) are treated as unset.
const MAX_HUD_SET_SPEED: f64 = 70.0;

/// Car state published after one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarStateOutput {
    pub speed: f64,
    pub brake_pressed: bool,
    /// Stock cruise or emulated adaptive cruise is on
    pub cruise_enabled: bool,
    pub adaptive_cruise_active: bool,
    pub lane_assist_enabled: bool,
    pub can_valid: bool,
    pub button_events: Vec<ButtonEvent>,
    pub events: Vec<StatusEvent>,
}

/// What the controller wants actuated this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlRequest {
    pub enabled: bool,
    pub gas: f64,
    pub brake: f64,
    pub steer: f64,
    /// Cruise set speed shown on the HUD (m/s)
    pub hud_set_speed: f64,
    pub lanes_visible: bool,
    pub lead_visible: bool,
}

/// Turns control requests into bus frames. Implemented outside this crate.
pub trait ActuatorEncoder {
    type Output;

    fn encode(
        &mut self,
        request: &ControlRequest,
        state: &EngagementState,
        frame: u64,
    ) -> Self::Output;
}

/// Session driver for one car.
pub struct CarInterface<C: CommonEventCheck = StandardEventChecks> {
    profile: TuningProfile,
    state: EngagementState,
    common: C,
    frame: u64,
}

impl CarInterface<StandardEventChecks> {
    pub fn new(profile: TuningProfile) -> Self {
        Self::with_common_checks(profile, StandardEventChecks)
    }
}

impl<C: CommonEventCheck> CarInterface<C> {
    pub fn with_common_checks(profile: TuningProfile, common: C) -> Self {
        CarInterface {
            profile,
            state: EngagementState::new(),
            common,
            frame: 0,
        }
    }

    /// Gas/brake ratio for a desired acceleration.
    pub fn compute_gb(accel: f64, _speed: f64) -> f64 {
        accel / 4.0
    }

    /// Runs one control cycle.
    pub fn update(&mut self, snapshot: &RawVehicleSnapshot) -> CarStateOutput {
        let button_events: Vec<ButtonEvent> =
            translate(self.state.previous_cruise_buttons, snapshot.cruise_buttons)
                .into_iter()
                .collect();

        let raised = engagement::step(&self.profile, &mut self.state, snapshot, &button_events);
        let events = aggregate(snapshot, &self.profile, &self.common, &raised);

        CarStateOutput {
            speed: snapshot.speed,
            brake_pressed: snapshot.brake_pressed,
            cruise_enabled: snapshot.main_on || self.state.adaptive_cruise_active,
            adaptive_cruise_active: self.state.adaptive_cruise_active,
            lane_assist_enabled: self.state.lane_assist_enabled,
            can_valid: snapshot.bus_valid,
            button_events,
            events,
        }
    }

    /// Sends `request` to `encoder` and advances the frame counter.
    pub fn apply<E: ActuatorEncoder>(&mut self, encoder: &mut E, request: &ControlRequest) -> E::Output {
        let mut request = *request;
        if request.hud_set_speed > MAX_HUD_SET_SPEED {
            request.hud_set_speed = 0.0;
        }
        let output = encoder.encode(&request, &self.state, self.frame);
        self.frame += 1;
        output
    }

    pub fn profile(&self) -> &TuningProfile {
        &self.profile
    }

    pub fn state(&self) -> &EngagementState {
        &self.state
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{resolve, Fingerprint, LateralTuningMode, VariantTable, VehicleVariant};

    struct Recorder {
        seen: Vec<(f64, u64)>,
    }

    impl ActuatorEncoder for Recorder {
        type Output = usize;

        fn encode(&mut self, request: &ControlRequest, _: &EngagementState, frame: u64) -> usize {
            self.seen.push((request.hud_set_speed, frame));
            self.seen.len()
        }
    }

    fn interface() -> CarInterface {
        CarInterface::new(resolve(
            VehicleVariant::Volt,
            &Fingerprint::empty(),
            LateralTuningMode::Pid,
            &VariantTable::default(),
        ))
    }

    #[test]
    fn apply_clamps_hud_speed_and_counts_frames() {
        let mut car = interface();
        let mut encoder = Recorder { seen: Vec::new() };

        let request = ControlRequest {
            hud_set_speed: 25.0,
            ..Default::default()
        };
        car.apply(&mut encoder, &request);
        let request = ControlRequest {
            hud_set_speed: 255.0,
            ..Default::default()
        };
        car.apply(&mut encoder, &request);

        assert_eq!(encoder.seen, vec![(25.0, 0), (0.0, 1)]);
        assert_eq!(car.frame(), 2);
    }

    #[test]
    fn cruise_enabled_follows_main_switch() {
        let mut car = interface();
        let out = car.update(&RawVehicleSnapshot {
            main_on: true,
            speed: 20.0,
            ..Default::default()
        });
        assert!(out.cruise_enabled);
        assert!(!out.adaptive_cruise_active);
        assert!(out.can_valid);
    }

    #[test]
    fn gas_brake_ratio() {
        assert_eq!(CarInterface::<StandardEventChecks>::compute_gb(2.0, 10.0), 0.5);
        assert_eq!(CarInterface::<StandardEventChecks>::compute_gb(-4.0, 0.0), -1.0);
    }
}
