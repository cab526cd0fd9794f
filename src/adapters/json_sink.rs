//! JSON-lines event sink — the publish transport.
//!
//! Every [`AppEvent`] is written as one JSON document followed by `\n`,
//! which a host-side client (UI bridge, home automation) can consume from
//! the console.  Write errors are logged and dropped: a disconnected
//! client must never stall the control loop.
//!
//! ```text
//! {"event":"state_published","state":{"mode":"heat","action":"heating","target_temperature":22.0,"current_temperature":20.9}}
//! ```
//!
//! On the device this stream shares stdout with the log output.  Every
//! event line starts with [`LINE_PREFIX`]; log records never do, so a
//! client keeps exactly the lines with that prefix.

use std::io::Write;

use log::warn;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// First bytes of every line this sink writes.
pub const LINE_PREFIX: &str = "{\"event\"";

pub struct JsonLineSink<W> {
    out: W,
    dropped: u32,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, dropped: 0 }
    }

    /// Events that could not be written.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &AppEvent) -> std::io::Result<()> {
        let line = serde_json::to_string(event).map_err(|_| std::io::ErrorKind::InvalidData)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }
}

impl<W: Write> EventSink for JsonLineSink<W> {
    fn emit(&mut self, event: &AppEvent) {
        if let Err(e) = self.write_event(event) {
            self.dropped = self.dropped.saturating_add(1);
            warn!("json sink: dropped event ({})", e);
        }
    }
}
