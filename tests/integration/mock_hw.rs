//! Mock hardware adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO registers.

use std::collections::VecDeque;

use thermostat::app::events::AppEvent;
use thermostat::app::ports::{ActuatorPort, EventSink, SensorPort};
use thermostat::climate::ClimateSnapshot;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Activate,
    Deactivate,
}

// ── MockSensor ────────────────────────────────────────────────

/// Replays a scripted list of readings, then reports NaN.
pub struct MockSensor {
    readings: VecDeque<f32>,
    pub reads: u32,
}

#[allow(dead_code)]
impl MockSensor {
    pub fn scripted(readings: &[f32]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            reads: 0,
        }
    }

    pub fn push(&mut self, reading: f32) {
        self.readings.push_back(reading);
    }
}

impl SensorPort for MockSensor {
    fn read_temperature(&mut self) -> f32 {
        self.reads += 1;
        self.readings.pop_front().unwrap_or(f32::NAN)
    }
}

// ── MockRelay ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockRelay {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_call(&self) -> Option<ActuatorCall> {
        self.calls.last().copied()
    }

    /// Relay level implied by the call history (released at boot).
    pub fn is_on(&self) -> bool {
        self.last_call() == Some(ActuatorCall::Activate)
    }

    pub fn count(&self, call: ActuatorCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl ActuatorPort for MockRelay {
    fn activate(&mut self) {
        self.calls.push(ActuatorCall::Activate);
    }

    fn deactivate(&mut self) {
        self.calls.push(ActuatorCall::Deactivate);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publishes(&self) -> usize {
        self.events.iter().filter(|e| e.is_publish()).count()
    }

    pub fn last_published(&self) -> Option<&ClimateSnapshot> {
        self.events
            .iter()
            .rev()
            .find(|e| e.is_publish())
            .map(AppEvent::snapshot)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
