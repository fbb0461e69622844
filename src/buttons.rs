// buttons.rs

// Edge detection on the steering-wheel cruise buttons. The bus reports the
// currently held button as a small code; a change between two samples is
// turned into a single press or release event.

use log::debug;
use serde::{Deserialize, Serialize};

/// Raw GM cruise-button code as decoded from the bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CruiseButtons {
    /// No sample received yet.
    #[default]
    Init,
    Unpress,
    ResAccel,
    DecelSet,
    Main,
    Cancel,
    Other(u8),
}

impl From<u8> for CruiseButtons {
    fn from(code: u8) -> Self {
        match code {
            0 => CruiseButtons::Init,
            1 => CruiseButtons::Unpress,
            2 => CruiseButtons::ResAccel,
            3 => CruiseButtons::DecelSet,
            5 => CruiseButtons::Main,
            6 => CruiseButtons::Cancel,
            other => CruiseButtons::Other(other),
        }
    }
}

impl From<CruiseButtons> for u8 {
    fn from(button: CruiseButtons) -> Self {
        match button {
            CruiseButtons::Init => 0,
            CruiseButtons::Unpress => 1,
            CruiseButtons::ResAccel => 2,
            CruiseButtons::DecelSet => 3,
            CruiseButtons::Main => 5,
            CruiseButtons::Cancel => 6,
            CruiseButtons::Other(code) => code,
        }
    }
}

/// Semantic button identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonType {
    AccelCruise,
    DecelCruise,
    Cancel,
    MainToggle,
    Unknown,
}

impl From<CruiseButtons> for ButtonType {
    fn from(button: CruiseButtons) -> Self {
        match button {
            CruiseButtons::ResAccel => ButtonType::AccelCruise,
            CruiseButtons::DecelSet => ButtonType::DecelCruise,
            CruiseButtons::Cancel => ButtonType::Cancel,
            CruiseButtons::Main => ButtonType::MainToggle,
            _ => ButtonType::Unknown,
        }
    }
}

/// A press or release of one button during the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEvent {
    pub kind: ButtonType,
    pub pressed: bool,
}

impl ButtonEvent {
    pub fn press(kind: ButtonType) -> Self {
        ButtonEvent { kind, pressed: true }
    }

    pub fn release(kind: ButtonType) -> Self {
        ButtonEvent {
            kind,
            pressed: false,
        }
    }
}

/// Compares two consecutive samples.
///
/// Returns `None` when nothing changed or when `previous` is still
/// [`CruiseButtons::Init`]. A release is reported with the type of the
/// button that was held before it.
pub fn translate(previous: CruiseButtons, current: CruiseButtons) -> Option<ButtonEvent> {
    if current == previous || previous == CruiseButtons::Init {
        return None;
    }

    let event = if current != CruiseButtons::Unpress {
        ButtonEvent::press(current.into())
    } else {
        ButtonEvent::release(previous.into())
    };
    debug!("Button event {:?} ({:?} -> {:?})", event, previous, current);
    Some(event)
}
