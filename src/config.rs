//! System configuration parameters
//!
//! Tunable parameters for the thermostat.  Values can be overridden via
//! NVS.  The user-facing target temperature and mode are deliberately not
//! part of this struct: they always boot from fixed defaults.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// How the relay is driven between decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActuationPolicy {
    /// Command the relay only when the action changes.
    EdgeTriggered,
    /// Re-assert the relay on every tick so external drift is corrected.
    LevelDriven,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermostatConfig {
    // --- Regulation ---
    /// Half-width of the deadband around the target (°C)
    pub hysteresis_c: f32,
    /// Relay drive policy
    pub actuation: ActuationPolicy,

    // --- Capability declaration ---
    /// Lowest target a client should offer (°C)
    pub visual_min_c: f32,
    /// Highest target a client should offer (°C)
    pub visual_max_c: f32,
    /// Target increment a client should offer (°C)
    pub visual_step_c: f32,

    // --- Sensor ---
    /// Readings below this are treated as invalid (°C)
    pub sensor_min_valid_c: f32,
    /// Readings above this are treated as invalid (°C)
    pub sensor_max_valid_c: f32,

    // --- Relay ---
    /// `true` if driving the GPIO high energises the relay
    pub relay_active_high: bool,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            // Regulation
            hysteresis_c: 0.5,
            actuation: ActuationPolicy::EdgeTriggered,

            // Capability declaration
            visual_min_c: 5.0,
            visual_max_c: 35.0,
            visual_step_c: 0.5,

            // Sensor (NTC usable range)
            sensor_min_valid_c: -40.0,
            sensor_max_valid_c: 125.0,

            // Relay
            relay_active_high: true,

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            telemetry_interval_secs: 60,    // 1/min
        }
    }
}

impl ThermostatConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hysteresis_c.is_finite() || self.hysteresis_c < 0.0 {
            return Err(ConfigError::ValidationFailed("hysteresis_c must be finite and >= 0"));
        }
        if !(self.visual_min_c.is_finite() && self.visual_max_c.is_finite())
            || self.visual_min_c >= self.visual_max_c
        {
            return Err(ConfigError::ValidationFailed("visual range must be finite and min < max"));
        }
        if !self.visual_step_c.is_finite() || self.visual_step_c <= 0.0 {
            return Err(ConfigError::ValidationFailed("visual_step_c must be > 0"));
        }
        if self.sensor_min_valid_c.is_nan()
            || self.sensor_max_valid_c.is_nan()
            || self.sensor_min_valid_c >= self.sensor_max_valid_c
        {
            return Err(ConfigError::ValidationFailed("sensor valid range must have min < max"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("control_loop_interval_ms must be > 0"));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("telemetry_interval_secs must be > 0"));
        }
        Ok(())
    }

    /// Control ticks between two telemetry reports (at least one).
    pub fn telemetry_every_ticks(&self) -> u64 {
        let ms = u64::from(self.telemetry_interval_secs) * 1000;
        (ms / u64::from(self.control_loop_interval_ms.max(1))).max(1)
    }
}
