//! Sensor drivers.
//!
//! The zone has exactly one sensor: an NTC thermistor on ADC1.

pub mod temperature;
