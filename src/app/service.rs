//! Application service — the hexagonal core.
//!
//! [`ThermostatService`] owns the control state (band width included) and
//! the sensor/actuator ports it was constructed with.  It exposes two
//! entry points, [`tick`](ThermostatService::tick) and
//! [`handle_command`](ThermostatService::handle_command), each of which
//! runs to completion; the event loop never interleaves them.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │    ThermostatService     │
//! ActuatorPort ◀──│ ControlState · Deadband  │ ◀── ClimateCall
//!                 └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::climate::{ClimateAction, ClimateSnapshot, ClimateTraits, ControlState};
use crate::config::{ActuationPolicy, ThermostatConfig};
use crate::control::hysteresis::HysteresisController;

use super::commands::ClimateCall;
use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// ThermostatService
// ───────────────────────────────────────────────────────────────

/// Single-zone heating controller.
///
/// A missing port (`None`) turns every tick into a no-op until the port is
/// attached; commands are still accepted and published.
pub struct ThermostatService<S, A> {
    state: ControlState,
    policy: ActuationPolicy,
    traits: ClimateTraits,
    sensor: Option<S>,
    actuator: Option<A>,
    tick_count: u64,
}

impl<S: SensorPort, A: ActuatorPort> ThermostatService<S, A> {
    /// Construct the service from configuration and its hardware ports.
    ///
    /// Does **not** touch the relay; call [`start`](Self::start) next.
    pub fn new(config: &ThermostatConfig, sensor: Option<S>, actuator: Option<A>) -> Self {
        Self {
            state: ControlState::new(config.hysteresis_c),
            policy: config.actuation,
            traits: ClimateTraits::from_config(config),
            sensor,
            actuator,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring the relay in line with the boot action (`Off`) and announce
    /// the initial state.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        if let Some(actuator) = self.actuator.as_mut() {
            actuator.deactivate();
        }
        sink.emit(&AppEvent::Started(self.state.snapshot()));
        info!(
            "ThermostatService started: mode={} target={:.1}\u{00b0}C hysteresis={:.2}",
            self.state.mode(),
            self.state.target_temperature(),
            self.state.hysteresis()
        );
    }

    // ── Control loop ──────────────────────────────────────────

    /// Run one decision step: read sensor → decide → actuate on change.
    ///
    /// Never blocks and never fails.  If either port is missing the step
    /// is skipped entirely.
    pub fn tick(&mut self, sink: &mut impl EventSink) {
        let (Some(sensor), Some(actuator)) = (self.sensor.as_mut(), self.actuator.as_mut()) else {
            debug!("tick skipped: sensor or actuator port unavailable");
            return;
        };
        self.tick_count += 1;

        // 1. Refresh current temperature (invalid readings are ignored)
        let reading = sensor.read_temperature();
        if !self.state.record_reading(reading) {
            debug!("invalid temperature reading ({}), keeping last value", reading);
        }

        // 2. Decide
        let previous = self.state.action();
        let next = HysteresisController::new(self.state.hysteresis()).decide(
            self.state.mode(),
            self.state.current_temperature(),
            self.state.target_temperature(),
            previous,
        );

        // 3. Actuate + publish only on transition
        if next != previous {
            self.state.set_action(next);
            Self::drive(actuator, next);
            info!(
                "action {} -> {} (T={:?} target={:.1})",
                previous,
                next,
                self.state.current_temperature(),
                self.state.target_temperature()
            );
            sink.emit(&AppEvent::StatePublished(self.state.snapshot()));
        } else if self.policy == ActuationPolicy::LevelDriven {
            Self::drive(actuator, next);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a requested change to mode and/or target and publish.
    ///
    /// The action and the relay are left for the next tick.
    pub fn handle_command(&mut self, call: ClimateCall, sink: &mut impl EventSink) {
        if let Some(target) = call.target_temperature {
            if !self.traits.in_visual_range(target) {
                warn!(
                    "target {:.1}\u{00b0}C outside advertised range [{:.1}, {:.1}], applying as-is",
                    target, self.traits.visual_min_temperature, self.traits.visual_max_temperature
                );
            }
            self.state.set_target_temperature(target);
        }
        if let Some(mode) = call.mode {
            self.state.set_mode(mode);
        }
        info!(
            "command applied: mode={} target={:.1}",
            self.state.mode(),
            self.state.target_temperature()
        );
        sink.emit(&AppEvent::StatePublished(self.state.snapshot()));
    }

    // ── Ports ─────────────────────────────────────────────────

    /// Install (or replace) the sensor port.
    pub fn attach_sensor(&mut self, sensor: S) {
        self.sensor = Some(sensor);
    }

    /// Install (or replace) the actuator port.
    ///
    /// The new relay is brought in line with the current action straight
    /// away so the physical state never lags the published one.
    pub fn attach_actuator(&mut self, mut actuator: A) {
        Self::drive(&mut actuator, self.state.action());
        self.actuator = Some(actuator);
    }

    pub fn sensor_mut(&mut self) -> Option<&mut S> {
        self.sensor.as_mut()
    }

    pub fn actuator(&self) -> Option<&A> {
        self.actuator.as_ref()
    }

    pub fn actuator_mut(&mut self) -> Option<&mut A> {
        self.actuator.as_mut()
    }

    // ── Queries ───────────────────────────────────────────────

    /// Static capability declaration.
    pub fn traits(&self) -> &ClimateTraits {
        &self.traits
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn action(&self) -> ClimateAction {
        self.state.action()
    }

    pub fn snapshot(&self) -> ClimateSnapshot {
        self.state.snapshot()
    }

    /// Telemetry snapshot for the periodic report.
    pub fn build_telemetry(&self) -> AppEvent {
        AppEvent::Telemetry(self.state.snapshot())
    }

    /// Control ticks that actually ran (skipped ticks are not counted).
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn drive(actuator: &mut A, action: ClimateAction) {
        if action.is_heating() {
            actuator.activate();
        } else {
            actuator.deactivate();
        }
    }
}
