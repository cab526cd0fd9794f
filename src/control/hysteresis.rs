//! Hysteresis (deadband) on/off controller for the heating relay
//!
//! ```text
//!            HEATING         hold          IDLE
//!   ◀───────────────────┤═════════════├───────────────────▶  °C
//!                  target-h     target     target+h
//! ```
//!
//! Inside the band the previous action is kept, which is what stops the
//! relay from short-cycling when the temperature sits on a threshold.

use crate::climate::{ClimateAction, ClimateMode};

/// Where a temperature lies relative to the deadband.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    /// Strictly below `target - hysteresis`.
    Below,
    /// Within `[target - hysteresis, target + hysteresis]`.
    Inside,
    /// Strictly above `target + hysteresis`.
    Above,
}

/// Closed interval around a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deadband {
    pub low: f32,
    pub high: f32,
}

impl Deadband {
    pub fn classify(&self, celsius: f32) -> BandPosition {
        if celsius < self.low {
            BandPosition::Below
        } else if celsius > self.high {
            BandPosition::Above
        } else {
            BandPosition::Inside
        }
    }
}

/// Bang-bang controller with a symmetric deadband.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisController {
    hysteresis: f32,
}

impl HysteresisController {
    pub fn new(hysteresis: f32) -> Self {
        Self { hysteresis }
    }

    /// Deadband around `target`.
    pub fn band(&self, target: f32) -> Deadband {
        Deadband {
            low: target - self.hysteresis,
            high: target + self.hysteresis,
        }
    }

    /// Compute the action the relay should be in.
    ///
    /// `current` is `None` when no valid reading has ever been seen; in
    /// that case the previous HEAT-mode action is held, and a previous
    /// `Off` (left over from OFF mode) becomes `Idle`.
    pub fn decide(
        &self,
        mode: ClimateMode,
        current: Option<f32>,
        target: f32,
        previous: ClimateAction,
    ) -> ClimateAction {
        if mode == ClimateMode::Off {
            return ClimateAction::Off;
        }

        let Some(celsius) = current else {
            return Self::hold(previous);
        };

        match self.band(target).classify(celsius) {
            BandPosition::Below => ClimateAction::Heating,
            BandPosition::Above => ClimateAction::Idle,
            BandPosition::Inside => Self::hold(previous),
        }
    }

    fn hold(previous: ClimateAction) -> ClimateAction {
        if previous == ClimateAction::Heating {
            ClimateAction::Heating
        } else {
            ClimateAction::Idle
        }
    }
}
