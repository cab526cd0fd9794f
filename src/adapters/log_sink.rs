//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::climate::ClimateSnapshot;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn fmt_temp(t: Option<f32>) -> String {
    match t {
        Some(c) => format!("{:.1}\u{00b0}C", c),
        None => "--".into(),
    }
}

fn log_line(tag: &str, s: &ClimateSnapshot) {
    info!(
        "{} | mode={} action={} | T={} target={:.1}\u{00b0}C",
        tag,
        s.mode,
        s.action,
        fmt_temp(s.current_temperature),
        s.target_temperature,
    );
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(s) => log_line("START", s),
            AppEvent::StatePublished(s) => log_line("STATE", s),
            AppEvent::Telemetry(s) => log_line("TELEM", s),
        }
    }
}
