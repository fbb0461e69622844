// src/main.rs
// Replays a scripted sequence of decoded snapshots through the GM interface
// and logs the engagement state and events of every cycle.
//
// Usage: gm-replay [config.yaml] [replay.yaml]

use gm_carcore::{CarInterface, GmConfig, ReplayScript};
use log::info;
use std::error::Error;

/// Stalk sequence used when no replay file is given: engage with RES/+, then
/// tap the brake.
const DEFAULT_REPLAY: &str = "
cycles:
  - {speed: 12.0, cruise_buttons: 1}
  - {speed: 12.0, cruise_buttons: 2}
  - {speed: 12.0, cruise_buttons: 1}
  - {speed: 12.0, cruise_buttons: 1}
  - {speed: 11.0, cruise_buttons: 1, brake_pressed: true}
";

/// Volt fitted with a pedal interceptor.
const DEFAULT_CONFIG: &str = "
variant: volt
fingerprint:
  0: [0x201]
";

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging; level comes from RUST_LOG
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GmConfig::load(path)?,
        None => GmConfig::from_yaml_str(DEFAULT_CONFIG)?,
    };
    let script = match args.next() {
        Some(path) => ReplayScript::load(path)?,
        None => ReplayScript::from_yaml_str(DEFAULT_REPLAY)?,
    };

    let profile = config.resolve_profile();
    info!("Profile:\n{}", serde_yaml::to_string(&profile)?);

    let mut car = CarInterface::new(profile);
    for (cycle, snapshot) in script.cycles.iter().enumerate() {
        let out = car.update(snapshot);
        info!(
            "cycle {}: acc={} lka={} buttons={:?} events={:?}",
            cycle, out.adaptive_cruise_active, out.lane_assist_enabled, out.button_events, out.events
        );
    }

    info!("Replay complete: {} cycles", script.cycles.len());
    Ok(())
}
