//! Outbound application events.
//!
//! The [`ThermostatService`](super::service::ThermostatService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them: log to serial, write JSON
//! to a client, update a display, etc.

use serde::Serialize;

use crate::climate::ClimateSnapshot;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", content = "state", rename_all = "snake_case")]
pub enum AppEvent {
    /// The service has started (carries the boot state).
    Started(ClimateSnapshot),

    /// Observable state changed; observers must refresh.
    StatePublished(ClimateSnapshot),

    /// Periodic telemetry snapshot.
    Telemetry(ClimateSnapshot),
}

impl AppEvent {
    /// The state carried by any event.
    pub fn snapshot(&self) -> &ClimateSnapshot {
        match self {
            Self::Started(s) | Self::StatePublished(s) | Self::Telemetry(s) => s,
        }
    }

    pub fn is_publish(&self) -> bool {
        matches!(self, Self::StatePublished(_))
    }
}
