//! Fuzz target: `ClimateCall::from_json` → `ThermostatService::handle_command`
//!
//! Drives arbitrary console input through the command decoder and, when it
//! decodes, into a running service.  The service must never panic, must
//! publish exactly once per command, and must leave the action alone.
//!
//! cargo fuzz run fuzz_command_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermostat::app::commands::{ClimateCall, MAX_COMMAND_LEN};
use thermostat::app::events::AppEvent;
use thermostat::app::ports::{ActuatorPort, EventSink, SensorPort};
use thermostat::app::service::ThermostatService;
use thermostat::config::ThermostatConfig;

struct Fixed(f32);

impl SensorPort for Fixed {
    fn read_temperature(&mut self) -> f32 {
        self.0
    }
}

struct NullRelay;

impl ActuatorPort for NullRelay {
    fn activate(&mut self) {}
    fn deactivate(&mut self) {}
}

struct Count(usize);

impl EventSink for Count {
    fn emit(&mut self, event: &AppEvent) {
        if event.is_publish() {
            self.0 += 1;
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let Ok(call) = ClimateCall::from_json(text) else {
        return;
    };
    assert!(text.trim().len() <= MAX_COMMAND_LEN, "oversized command accepted");

    let config = ThermostatConfig::default();
    let mut app = ThermostatService::new(&config, Some(Fixed(20.0)), Some(NullRelay));
    let mut sink = Count(0);
    app.start(&mut sink);
    app.tick(&mut sink);
    let before = app.action();

    app.handle_command(call, &mut sink);
    assert_eq!(app.action(), before);
    assert_eq!(sink.0, 1);

    // Any accepted target, even far out of range, must survive a tick.
    app.tick(&mut sink);
});
