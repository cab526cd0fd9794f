//! GPIO / peripheral pin assignments for the stove controller board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Heating relay
// ---------------------------------------------------------------------------

/// Digital output driving the relay coil transistor.
/// `main` takes the matching `peripherals.pins.gpio4` and asserts the two
/// agree at compile time.
pub const RELAY_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor — 10 kΩ @ 25 °C, voltage-divider to ADC.
pub const TEMP_ADC_GPIO: i32 = 8;
/// ADC1 channel for GPIO 8 on the ESP32-S3.
pub const TEMP_ADC1_CHANNEL: u32 = 7;

// ESP32-S3: ADC1 channel n sits on GPIO n + 1.
const _: () = assert!(TEMP_ADC_GPIO == TEMP_ADC1_CHANNEL as i32 + 1);
