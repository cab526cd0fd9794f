//! Task Watchdog Timer (TWDT) driver.
//!
//! Resets the device if the event loop stalls.  A stuck loop with the
//! relay energised would keep heating indefinitely; a reset boots with
//! the relay released.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{ESP_OK, esp_task_wdt_add, esp_task_wdt_config_t, esp_task_wdt_reconfigure, esp_task_wdt_reset};

/// Lower bound on the timeout, whatever the loop interval.
pub const MIN_TIMEOUT_MS: u32 = 10_000;

/// Missed loop iterations tolerated before the reset.
const MISSED_ITERATIONS: u32 = 5;

/// Timeout for a loop that sleeps `interval_ms` between iterations.
pub fn timeout_for_interval(interval_ms: u32) -> u32 {
    interval_ms
        .saturating_mul(MISSED_ITERATIONS)
        .max(MIN_TIMEOUT_MS)
}

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Configure the TWDT for a loop with the given interval and subscribe
    /// the calling task.
    pub fn for_interval(interval_ms: u32) -> Self {
        let timeout_ms = timeout_for_interval(interval_ms);

        #[cfg(target_os = "espidf")]
        {
            let cfg = esp_task_wdt_config_t {
                timeout_ms,
                idle_core_mask: 0,
                trigger_panic: true,
            };
            // SAFETY: called once from the main task before the event loop.
            let ret = unsafe { esp_task_wdt_reconfigure(&cfg) };
            if ret != ESP_OK {
                log::warn!("TWDT reconfigure returned {} (may already be configured)", ret);
            }

            // SAFETY: a null handle subscribes the calling task.
            let ret = unsafe { esp_task_wdt_add(core::ptr::null_mut()) };
            let subscribed = ret == ESP_OK;
            if subscribed {
                log::info!("Watchdog: subscribed ({} ms timeout)", timeout_ms);
            } else {
                log::warn!("Watchdog: failed to subscribe ({})", ret);
            }
            Self {
                timeout_ms,
                subscribed,
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): no-op ({} ms)", timeout_ms);
            Self { timeout_ms }
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Feed the watchdog once per loop iteration.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        if self.subscribed {
            // SAFETY: resets the TWDT for the subscribed calling task.
            unsafe {
                esp_task_wdt_reset();
            }
        }
    }
}
