//! Event and command queues feeding the main loop.
//!
//! Events are produced by:
//! - the tick timer (control and telemetry ticks)
//! - the console reader thread (inbound commands)
//!
//! and consumed one at a time by the main loop, which is the only place
//! the [`ThermostatService`](crate::app::service::ThermostatService) is
//! touched.  That single consumer is what makes every tick and every
//! command a critical section with respect to the others.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Tick timer  │────▶│ Event Queue  │────▶│              │
//! │             │     │  (lock-free) │     │  Main Loop   │
//! │ Console RX  │────▶│ Command Box  │────▶│  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::mpmc::{Q32, Q8};

use crate::app::commands::ClimateCall;
use crate::error::{CommandError, Result};

/// System event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Control loop tick.
    ControlTick,
    /// A command is waiting in the command mailbox.
    CommandReceived,
    /// Telemetry report timer fired.
    TelemetryTick,
}

static EVENT_QUEUE: Q32<Event> = Q32::new();
static COMMAND_QUEUE: Q8<ClimateCall> = Q8::new();

/// Push an event into the queue.
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    EVENT_QUEUE.enqueue(event).is_ok()
}

/// Pop the next event from the queue.
pub fn pop_event() -> Option<Event> {
    EVENT_QUEUE.dequeue()
}

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Queue a command for the main loop and wake it.
pub fn submit_command(call: ClimateCall) -> core::result::Result<(), CommandError> {
    COMMAND_QUEUE
        .enqueue(call)
        .map_err(|_| CommandError::QueueFull)?;
    if !push_event(Event::CommandReceived) {
        log::warn!("event queue full; command will be picked up on the next wake");
    }
    Ok(())
}

/// Decode a JSON command line and queue it.
pub fn submit_json(line: &str) -> Result<()> {
    let call = ClimateCall::from_json(line)?;
    submit_command(call)?;
    Ok(())
}

/// Take the oldest pending command.
pub fn take_command() -> Option<ClimateCall> {
    COMMAND_QUEUE.dequeue()
}
