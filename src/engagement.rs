// engagement.rs

// Software-emulated adaptive cruise for GM cars without native stop and go
// that carry a pedal interceptor. The driver engages it with the cruise
// stalk while the stock main switch is off; pressing the brake or turning
// the stock cruise on drops it again.

use log::info;
use serde::{Deserialize, Serialize};

use crate::buttons::{ButtonEvent, ButtonType, CruiseButtons};
use crate::events::StatusEvent;
use crate::params::TuningProfile;
use crate::RawVehicleSnapshot;

/// Session engagement state, owned by the control-loop driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementState {
    pub adaptive_cruise_active: bool,
    /// Whether steering may act while emulated cruise is engaged.
    pub lane_assist_enabled: bool,
    /// Raw button code of the last processed sample.
    pub previous_cruise_buttons: CruiseButtons,
}

impl EngagementState {
    pub fn new() -> Self {
        EngagementState {
            adaptive_cruise_active: false,
            lane_assist_enabled: true,
            previous_cruise_buttons: CruiseButtons::Init,
        }
    }

    fn engage(&mut self, lane_assist: bool) {
        self.adaptive_cruise_active = true;
        self.lane_assist_enabled = lane_assist;
    }

    fn disengage(&mut self) {
        self.adaptive_cruise_active = false;
        self.lane_assist_enabled = true;
    }
}

impl Default for EngagementState {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies one cycle of engagement rules to `state`.
///
/// Rules run in this order:
/// 1. brake pressed while active drops engagement (interceptor cars only);
/// 2. with the main switch off, stalk releases engage and a cancel press
///    disengages (interceptor cars only);
/// 3. with the main switch on, engagement is forced off without an event.
///
/// Returns the events raised, in the order they were raised.
pub fn step(
    profile: &TuningProfile,
    state: &mut EngagementState,
    snapshot: &RawVehicleSnapshot,
    buttons: &[ButtonEvent],
) -> Vec<StatusEvent> {
    let mut events = Vec::new();
    let interceptor = profile.enable_gas_interceptor;

    if interceptor && state.adaptive_cruise_active && snapshot.brake_pressed {
        state.disengage();
        events.push(StatusEvent::PedalPressed);
        info!("Adaptive cruise disengaged: brake pressed");
    }

    if !snapshot.main_on && interceptor {
        for button in buttons {
            match (button.kind, button.pressed) {
                (ButtonType::DecelCruise, false) if !state.adaptive_cruise_active => {
                    state.engage(false);
                    events.push(StatusEvent::ButtonEnable);
                    info!("Adaptive cruise engaged without lane assist");
                }
                (ButtonType::AccelCruise, false) if !state.adaptive_cruise_active => {
                    state.engage(true);
                    events.push(StatusEvent::ButtonEnable);
                    info!("Adaptive cruise engaged with lane assist");
                }
                (ButtonType::Cancel, true) if state.adaptive_cruise_active => {
                    state.disengage();
                    events.push(StatusEvent::ButtonCancel);
                    info!("Adaptive cruise cancelled");
                }
                _ => {}
            }
        }
    } else if snapshot.main_on {
        if state.adaptive_cruise_active {
            info!("Adaptive cruise stood down: main cruise switch on");
        }
        state.disengage();
    }

    state.previous_cruise_buttons = snapshot.cruise_buttons;
    events
}
