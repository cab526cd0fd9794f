//! Heating relay driver.
//!
//! A single GPIO drives the relay coil (through a transistor / opto
//! stage).  Boards differ in polarity, so the driver maps "energised" to
//! the configured pin level.
//!
//! Generic over [`embedded_hal::digital::OutputPin`]: on ESP-IDF this is
//! an `esp_idf_hal::gpio::PinDriver`, on host a test double.

use embedded_hal::digital::OutputPin;
use log::info;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Released,
    Energised,
}

pub struct RelayDriver<P> {
    pin: P,
    active_high: bool,
    state: RelayState,
    switch_count: u32,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take ownership of the pin and drive it to the released level.
    pub fn new(pin: P, active_high: bool) -> Result<Self, ActuatorError> {
        let mut relay = Self {
            pin,
            active_high,
            state: RelayState::Released,
            switch_count: 0,
        };
        relay.write(false)?;
        Ok(relay)
    }

    pub fn energise(&mut self) -> Result<(), ActuatorError> {
        self.write(true)?;
        self.transition(RelayState::Energised);
        Ok(())
    }

    pub fn release(&mut self) -> Result<(), ActuatorError> {
        self.write(false)?;
        self.transition(RelayState::Released);
        Ok(())
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_energised(&self) -> bool {
        self.state == RelayState::Energised
    }

    /// Number of released↔energised changes since boot (contact wear).
    pub fn switch_count(&self) -> u32 {
        self.switch_count
    }

    /// Borrow the underlying pin (used by tests to inspect the level).
    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    fn transition(&mut self, next: RelayState) {
        if self.state != next {
            self.state = next;
            self.switch_count = self.switch_count.wrapping_add(1);
            info!("relay: {:?}", next);
        }
    }

    fn write(&mut self, energised: bool) -> Result<(), ActuatorError> {
        let high = energised == self.active_high;
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)
    }
}
