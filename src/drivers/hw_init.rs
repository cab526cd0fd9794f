//! One-shot hardware peripheral initialization.
//!
//! Configures the ADC1 oneshot unit and the thermistor channel, and puts
//! the console behind a blocking driver, using raw ESP-IDF sys calls.
//! Called once from `main()` before the event loop starts.  The relay
//! output is owned by a HAL `PinDriver` instead.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    ConsoleInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::ConsoleInitFailed(rc) => write!(f, "console driver install failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(_) => Self::Init("ADC1 oneshot unit"),
            HwInitError::ConsoleInitFailed(_) => Self::Init("console driver"),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before event loop; single-threaded.
    unsafe { init_adc()? };
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static ADC1_HANDLE: core::sync::atomic::AtomicPtr<adc_oneshot_unit_ctx_t> =
    core::sync::atomic::AtomicPtr::new(core::ptr::null_mut());

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    let ret = unsafe { adc_oneshot_config_channel(handle, pins::TEMP_ADC1_CHANNEL, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    ADC1_HANDLE.store(handle, core::sync::atomic::Ordering::Release);
    info!(
        "hw_init: ADC1 configured (CH{}/GPIO{}=thermistor)",
        pins::TEMP_ADC1_CHANNEL,
        pins::TEMP_ADC_GPIO
    );
    Ok(())
}

/// Raw 12-bit sample, or `None` if the unit is not initialised or the
/// driver reported an error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let handle = ADC1_HANDLE.load(core::sync::atomic::Ordering::Acquire);
    if handle.is_null() {
        return None;
    }
    let mut raw: i32 = 0;
    // SAFETY: handle was produced by adc_oneshot_new_unit and is never freed.
    let ret = unsafe { adc_oneshot_read(handle, channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Option<u16> {
    None
}

// ── Console driver ────────────────────────────────────────────
//
// Without a driver the VFS console reads stdin non-blocking and the
// command reader sees EOF / EAGAIN forever.

#[cfg(target_os = "espidf")]
const CONSOLE_RX_BUF: u32 = 1024;

/// Install the console driver matching the sdkconfig console and route
/// stdin/stdout through it.
#[cfg(target_os = "espidf")]
pub fn init_console() -> Result<(), HwInitError> {
    // SAFETY: called once from main() before the reader thread starts.
    unsafe { install_console_driver() }
}

#[cfg(not(target_os = "espidf"))]
pub fn init_console() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): console driver skipped");
    Ok(())
}

#[cfg(all(target_os = "espidf", esp_idf_esp_console_usb_serial_jtag))]
unsafe fn install_console_driver() -> Result<(), HwInitError> {
    let mut cfg = usb_serial_jtag_driver_config_t {
        tx_buffer_size: CONSOLE_RX_BUF,
        rx_buffer_size: CONSOLE_RX_BUF,
    };
    let ret = unsafe { usb_serial_jtag_driver_install(&mut cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::ConsoleInitFailed(ret));
    }
    unsafe { esp_vfs_usb_serial_jtag_use_driver() };
    info!("hw_init: console on USB-Serial-JTAG driver");
    Ok(())
}

#[cfg(all(target_os = "espidf", not(esp_idf_esp_console_usb_serial_jtag)))]
unsafe fn install_console_driver() -> Result<(), HwInitError> {
    const CONSOLE_UART: uart_port_t = 0;
    let ret = unsafe {
        uart_driver_install(
            CONSOLE_UART,
            CONSOLE_RX_BUF as i32,
            0,
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::ConsoleInitFailed(ret));
    }
    unsafe { esp_vfs_dev_uart_use_driver(CONSOLE_UART) };
    info!("hw_init: console on UART{} driver", CONSOLE_UART);
    Ok(())
}
