//! Capability declaration for UI / remote clients.
//!
//! Static metadata only.  The controller does not enforce the visual
//! range; clients are expected to clamp their own input.

use heapless::Vec;
use serde::Serialize;

use super::ClimateMode;
use crate::config::ThermostatConfig;

/// What this controller can do, as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateTraits {
    pub supports_current_temperature: bool,
    pub visual_min_temperature: f32,
    pub visual_max_temperature: f32,
    pub visual_temperature_step: f32,
    pub supported_modes: Vec<ClimateMode, 2>,
}

impl ClimateTraits {
    pub fn from_config(config: &ThermostatConfig) -> Self {
        let mut supported_modes = Vec::new();
        // Capacity is exactly the number of modes.
        let _ = supported_modes.push(ClimateMode::Off);
        let _ = supported_modes.push(ClimateMode::Heat);
        Self {
            supports_current_temperature: true,
            visual_min_temperature: config.visual_min_c,
            visual_max_temperature: config.visual_max_c,
            visual_temperature_step: config.visual_step_c,
            supported_modes,
        }
    }

    pub fn supports_mode(&self, mode: ClimateMode) -> bool {
        self.supported_modes.contains(&mode)
    }

    /// Whether `celsius` lies inside the advertised visual range.
    pub fn in_visual_range(&self, celsius: f32) -> bool {
        (self.visual_min_temperature..=self.visual_max_temperature).contains(&celsius)
    }
}

impl Default for ClimateTraits {
    fn default() -> Self {
        Self::from_config(&ThermostatConfig::default())
    }
}
