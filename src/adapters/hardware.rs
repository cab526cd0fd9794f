//! Hardware adapters — bridge real peripherals to domain port traits.
//!
//! The thermistor becomes a [`SensorPort`], the relay an [`ActuatorPort`].
//! These are the only types in the system that touch actual hardware.
//! On non-espidf targets the underlying drivers use simulation stubs or
//! injected pins.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::sensors::temperature::TemperatureSensor;

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for TemperatureSensor {
    fn read_temperature(&mut self) -> f32 {
        self.read_celsius()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

/// Relay behind the actuator port.  GPIO failures are logged and counted;
/// the port contract has no error channel.
pub struct RelayActuator<P> {
    relay: RelayDriver<P>,
    write_failures: u32,
}

impl<P: OutputPin> RelayActuator<P> {
    pub fn new(relay: RelayDriver<P>) -> Self {
        Self {
            relay,
            write_failures: 0,
        }
    }

    pub fn relay(&self) -> &RelayDriver<P> {
        &self.relay
    }

    pub fn relay_mut(&mut self) -> &mut RelayDriver<P> {
        &mut self.relay
    }

    /// GPIO writes that failed since boot.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }
}

impl<P: OutputPin> ActuatorPort for RelayActuator<P> {
    fn activate(&mut self) {
        if let Err(e) = self.relay.energise() {
            self.write_failures = self.write_failures.saturating_add(1);
            warn!("relay energise failed: {}", e);
        }
    }

    fn deactivate(&mut self) {
        if let Err(e) = self.relay.release() {
            self.write_failures = self.write_failures.saturating_add(1);
            warn!("relay release failed: {}", e);
        }
    }
}
