//! Per-cycle status events
//!
//! The list handed to the controller is ordered by detection, not severity:
//!
//! 1. events raised by the [`CommonEventCheck`],
//! 2. [`StatusEvent::BelowEngageSpeed`] when the car is slower than the
//!    profile's minimum enable speed,
//! 3. [`StatusEvent::ParkBrake`] when the park brake is set,
//! 4. whatever the engagement state machine raised this cycle, in the order
//!    it raised them.
//!
//! Nothing is deduplicated.

use serde::{Deserialize, Serialize};

use crate::params::TuningProfile;
use crate::RawVehicleSnapshot;

/// Driver/controller-facing status signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusEvent {
    /// Bus data failed validation.
    CanError,
    BelowEngageSpeed,
    ParkBrake,
    /// Brake pressed while emulated cruise was active.
    PedalPressed,
    ButtonEnable,
    ButtonCancel,
}

/// Checks shared by every car port, run before the GM-specific ones.
pub trait CommonEventCheck {
    fn check(&self, snapshot: &RawVehicleSnapshot) -> Vec<StatusEvent>;
}

/// Default common checks: flags invalid bus data.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEventChecks;

impl CommonEventCheck for StandardEventChecks {
    fn check(&self, snapshot: &RawVehicleSnapshot) -> Vec<StatusEvent> {
        let mut events = Vec::new();
        if !snapshot.bus_valid {
            events.push(StatusEvent::CanError);
        }
        events
    }
}

/// Builds the ordered event list for one cycle.
pub fn aggregate(
    snapshot: &RawVehicleSnapshot,
    profile: &TuningProfile,
    common: &dyn CommonEventCheck,
    engagement_events: &[StatusEvent],
) -> Vec<StatusEvent> {
    let mut events = common.check(snapshot);

    if snapshot.speed < profile.min_enable_speed {
        events.push(StatusEvent::BelowEngageSpeed);
    }
    if snapshot.park_brake {
        events.push(StatusEvent::ParkBrake);
    }
    events.extend_from_slice(engagement_events);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{resolve, Fingerprint, LateralTuningMode, VariantTable, VehicleVariant};

    fn profile_with_min_speed(min_enable_speed: f64) -> TuningProfile {
        let mut profile = resolve(
            VehicleVariant::Volt,
            &Fingerprint::empty(),
            LateralTuningMode::Pid,
            &VariantTable::default(),
        );
        profile.min_enable_speed = min_enable_speed;
        profile
    }

    #[test]
    fn below_engage_speed_depends_on_profile_threshold() {
        let profile = profile_with_min_speed(8.0);
        let slow = RawVehicleSnapshot {
            speed: 2.0,
            ..Default::default()
        };
        let fast = RawVehicleSnapshot {
            speed: 10.0,
            ..Default::default()
        };

        let events = aggregate(&slow, &profile, &StandardEventChecks, &[]);
        assert!(events.contains(&StatusEvent::BelowEngageSpeed));

        let events = aggregate(&fast, &profile, &StandardEventChecks, &[]);
        assert!(!events.contains(&StatusEvent::BelowEngageSpeed));
    }

    #[test]
    fn negative_threshold_never_fires() {
        let profile = profile_with_min_speed(-1.0);
        let stopped = RawVehicleSnapshot::default();
        assert!(aggregate(&stopped, &profile, &StandardEventChecks, &[]).is_empty());
    }

    #[test]
    fn events_follow_detection_order() {
        let profile = profile_with_min_speed(8.0);
        let snapshot = RawVehicleSnapshot {
            speed: 1.0,
            park_brake: true,
            bus_valid: false,
            ..Default::default()
        };

        let events = aggregate(
            &snapshot,
            &profile,
            &StandardEventChecks,
            &[StatusEvent::PedalPressed],
        );
        assert_eq!(
            events,
            vec![
                StatusEvent::CanError,
                StatusEvent::BelowEngageSpeed,
                StatusEvent::ParkBrake,
                StatusEvent::PedalPressed,
            ]
        );
    }
}
