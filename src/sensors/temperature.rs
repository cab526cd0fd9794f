//! NTC thermistor temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage-divider with a fixed 10 kOhm resistor, read via
//! the ESP32-S3 ADC. The simplified Beta (Steinhart-Hart) equation
//! converts resistance to temperature.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::drivers::hw_init;
use crate::error::SensorError;

/// Mid-scale (≈25 °C) until a test injects a value.
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(2048);

/// Inject the raw ADC value returned on host builds.
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
/// Volts from either rail that count as open/short.
const RAIL_MARGIN_V: f32 = 0.01;

pub struct TemperatureSensor {
    adc_channel: u32,
    min_valid_c: f32,
    max_valid_c: f32,
}

impl TemperatureSensor {
    pub fn new(adc_channel: u32, min_valid_c: f32, max_valid_c: f32) -> Self {
        Self {
            adc_channel,
            min_valid_c,
            max_valid_c,
        }
    }

    /// Read and convert, reporting why a reading is unusable.
    pub fn try_read(&self) -> Result<f32, SensorError> {
        let raw = self.read_adc()?;
        let celsius = adc_to_celsius(raw)?;
        if celsius < self.min_valid_c || celsius > self.max_valid_c {
            return Err(SensorError::OutOfRange);
        }
        Ok(celsius)
    }

    /// Reading in °C, or NaN when no valid measurement is available.
    pub fn read_celsius(&self) -> f32 {
        match self.try_read() {
            Ok(c) => c,
            Err(e) => {
                log::debug!("thermistor: {}", e);
                f32::NAN
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.adc_channel).ok_or(SensorError::AdcReadFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let _ = hw_init::adc1_read(self.adc_channel);
        Ok(SIM_TEMP_ADC.load(Ordering::Relaxed))
    }
}

/// Convert a 12-bit divider reading to °C.
pub fn adc_to_celsius(raw: u16) -> Result<f32, SensorError> {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= (V_REF - RAIL_MARGIN_V) {
        return Err(SensorError::Disconnected);
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Err(SensorError::OutOfRange);
    }
    Ok((1.0 / inv_t) - 273.15)
}
