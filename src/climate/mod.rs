//! Climate domain vocabulary shared by the control core and its adapters.
//!
//! ```text
//!   mode   (user intent)      OFF ──────────── HEAT
//!                              │                │
//!   action (actuated result)  OFF        IDLE ◀──▶ HEATING
//! ```
//!
//! `mode` is what the user asked for; `action` is what the relay is
//! actually doing.  Only the control loop writes `action`.

pub mod capabilities;
pub mod state;

use core::fmt;

use serde::{Deserialize, Serialize};

pub use capabilities::ClimateTraits;
pub use state::{ClimateSnapshot, ControlState};

/// Operating mode requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateMode {
    /// Regulation disabled; the relay is held released.
    Off,
    /// Regulate towards the target temperature by heating.
    Heat,
}

impl fmt::Display for ClimateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::Heat => write!(f, "HEAT"),
        }
    }
}

/// The last actuated decision of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateAction {
    /// Mode is OFF.
    Off,
    /// Mode is HEAT but the zone is warm enough; relay released.
    Idle,
    /// Mode is HEAT and the relay is energised.
    Heating,
}

impl ClimateAction {
    /// Whether this action requires the relay to be energised.
    pub const fn is_heating(self) -> bool {
        matches!(self, Self::Heating)
    }
}

impl fmt::Display for ClimateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::Idle => write!(f, "IDLE"),
            Self::Heating => write!(f, "HEATING"),
        }
    }
}
