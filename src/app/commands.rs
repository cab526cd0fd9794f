//! Inbound commands to the application service.
//!
//! A [`ClimateCall`] is what a UI or remote client sends to change the
//! user-facing settings.  Both fields are optional; absent fields leave
//! the current value untouched.
//!
//! Wire form (one JSON object per line on the console):
//!
//! ```json
//! {"target_temperature": 21.5, "mode": "heat"}
//! ```

use serde::{Deserialize, Serialize};

use crate::climate::ClimateMode;
use crate::error::CommandError;

/// Longest accepted JSON command line.
pub const MAX_COMMAND_LEN: usize = 256;

/// A requested change to mode and/or target temperature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ClimateMode>,
}

impl ClimateCall {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_target(mut self, celsius: f32) -> Self {
        self.target_temperature = Some(celsius);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ClimateMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Neither field present.  Still a valid call: it forces a publish.
    pub fn is_empty(&self) -> bool {
        self.target_temperature.is_none() && self.mode.is_none()
    }

    /// Decode a JSON command.  Range is not checked here.
    pub fn from_json(text: &str) -> Result<Self, CommandError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CommandError::Empty);
        }
        if text.len() > MAX_COMMAND_LEN {
            return Err(CommandError::TooLong);
        }
        serde_json::from_str(text).map_err(|_| CommandError::Malformed)
    }
}
