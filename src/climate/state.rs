//! The single mutable control record and its published view.
//!
//! `ControlState` lives as long as the controller instance.  Fields are
//! private so that the ownership rules hold by construction: the command
//! path may only touch `mode` and `target_temperature`, the control loop
//! may only touch `current_temperature` and `action`.

use serde::{Deserialize, Serialize};

use super::{ClimateAction, ClimateMode};

/// Target temperature applied at every boot (°C).
pub const DEFAULT_TARGET_C: f32 = 22.0;

/// Mode applied at every boot.
pub const DEFAULT_MODE: ClimateMode = ClimateMode::Off;

/// Mutable control state for one zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    mode: ClimateMode,
    target_temperature: f32,
    /// `None` until the first valid reading arrives.
    current_temperature: Option<f32>,
    action: ClimateAction,
    hysteresis: f32,
}

impl ControlState {
    /// Fresh state with the boot defaults and the configured band width.
    pub fn new(hysteresis: f32) -> Self {
        Self {
            mode: DEFAULT_MODE,
            target_temperature: DEFAULT_TARGET_C,
            current_temperature: None,
            action: ClimateAction::Off,
            hysteresis,
        }
    }

    pub fn mode(&self) -> ClimateMode {
        self.mode
    }

    pub fn target_temperature(&self) -> f32 {
        self.target_temperature
    }

    pub fn current_temperature(&self) -> Option<f32> {
        self.current_temperature
    }

    pub fn action(&self) -> ClimateAction {
        self.action
    }

    pub fn hysteresis(&self) -> f32 {
        self.hysteresis
    }

    // ── Command path ──────────────────────────────────────────

    pub(crate) fn set_mode(&mut self, mode: ClimateMode) {
        self.mode = mode;
    }

    pub(crate) fn set_target_temperature(&mut self, target: f32) {
        self.target_temperature = target;
    }

    // ── Control-loop path ─────────────────────────────────────

    /// Record a sensor reading.  Non-finite readings are ignored and the
    /// last valid value is kept.  Returns `true` if the reading was stored.
    pub(crate) fn record_reading(&mut self, celsius: f32) -> bool {
        if celsius.is_finite() {
            self.current_temperature = Some(celsius);
            true
        } else {
            false
        }
    }

    pub(crate) fn set_action(&mut self, action: ClimateAction) {
        self.action = action;
    }

    /// Serialisable copy for observers.
    pub fn snapshot(&self) -> ClimateSnapshot {
        ClimateSnapshot {
            mode: self.mode,
            action: self.action,
            target_temperature: self.target_temperature,
            current_temperature: self.current_temperature,
        }
    }
}

/// What observers receive on every publish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateSnapshot {
    pub mode: ClimateMode,
    pub action: ClimateAction,
    pub target_temperature: f32,
    /// Omitted from the JSON document while unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_temperature: Option<f32>,
}
