//! Console command intake.
//!
//! Reads newline-terminated JSON commands from a byte stream (stdin on the
//! device, behind the UART / USB-Serial-JTAG driver installed by
//! [`hw_init::init_console`](crate::drivers::hw_init::init_console)) and
//! hands every non-blank line to a callback.
//!
//! A read that would block or was interrupted is not the end of the
//! stream: the partial line is kept and `on_idle` runs before the next
//! attempt.  Only end-of-stream or a hard I/O error returns.

use std::io::{BufRead, ErrorKind};

use crate::app::commands::MAX_COMMAND_LEN;

pub fn pump_lines<R: BufRead>(
    mut reader: R,
    mut on_line: impl FnMut(&str),
    mut on_idle: impl FnMut(),
) -> std::io::Result<()> {
    let mut line = String::with_capacity(MAX_COMMAND_LEN);
    loop {
        match reader.read_line(&mut line) {
            Ok(0) => {
                let rest = line.trim();
                if !rest.is_empty() {
                    on_line(rest);
                }
                return Ok(());
            }
            Ok(_) => {
                let text = line.trim();
                if !text.is_empty() {
                    on_line(text);
                }
                line.clear();
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                on_idle();
            }
            Err(e) => return Err(e),
        }
    }
}
