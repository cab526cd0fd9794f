//! Gazebo Stove Thermostat — Main Entry Point
//!
//! Hexagonal architecture with an event-driven main loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  TemperatureSensor  RelayActuator   LogEventSink  JsonLineSink │
//! │  (SensorPort)       (ActuatorPort)  (EventSink)   (EventSink)  │
//! │  NvsAdapter (ConfigPort)            Console reader (commands)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │           ThermostatService (pure logic)               │    │
//! │  │  ControlState · HysteresisController                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info, warn};

use thermostat::adapters::console;
use thermostat::adapters::hardware::RelayActuator;
use thermostat::adapters::json_sink::JsonLineSink;
use thermostat::adapters::log_sink::LogEventSink;
use thermostat::adapters::nvs::NvsAdapter;
use thermostat::app::events::AppEvent;
use thermostat::app::ports::{ConfigError, ConfigPort, EventSink};
use thermostat::app::service::ThermostatService;
use thermostat::config::ThermostatConfig;
use thermostat::drivers::hw_init;
use thermostat::drivers::relay::RelayDriver;
use thermostat::drivers::watchdog::Watchdog;
use thermostat::error::Error;
use thermostat::events::{self, Event, push_event};
use thermostat::pins;
use thermostat::sensors::temperature::TemperatureSensor;

// ── Fan-out sink ──────────────────────────────────────────────
//
// Every event goes to the serial log and, as JSON, to whatever client is
// attached to the console.  Both share stdout: clients keep only lines
// starting with `{"event"` (see `JsonLineSink`).

struct ConsoleSink<W> {
    log: LogEventSink,
    json: JsonLineSink<W>,
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: &AppEvent) {
        self.log.emit(event);
        self.json.emit(event);
    }
}

// ── Console command reader ────────────────────────────────────

const CONSOLE_IDLE: Duration = Duration::from_millis(50);

fn spawn_console_reader() -> Result<()> {
    if let Err(e) = hw_init::init_console() {
        warn!("{}; console commands may be unreliable", Error::from(e));
    }
    std::thread::Builder::new()
        .name("console-rx".into())
        .stack_size(6 * 1024)
        .spawn(|| {
            let stdin = std::io::stdin();
            loop {
                let result = console::pump_lines(
                    stdin.lock(),
                    |line| {
                        if let Err(e) = events::submit_json(line) {
                            warn!("console: rejected command ({})", e);
                        }
                    },
                    || std::thread::sleep(CONSOLE_IDLE),
                );
                if let Err(e) = result {
                    warn!("console: read failed ({}), retrying", e);
                }
                std::thread::sleep(CONSOLE_IDLE);
            }
        })?;
    Ok(())
}

fn load_config(nvs: Option<&NvsAdapter>) -> ThermostatConfig {
    let Some(nvs) = nvs else {
        return ThermostatConfig::default();
    };
    match nvs.load() {
        Ok(cfg) => {
            info!("Config loaded from NVS");
            cfg
        }
        Err(ConfigError::NotFound) => {
            info!("No stored config, writing defaults");
            let cfg = ThermostatConfig::default();
            if let Err(e) = nvs.save(&cfg) {
                warn!("{}", Error::from(e));
            }
            cfg
        }
        Err(e) => {
            warn!("{}, using defaults", Error::from(e));
            ThermostatConfig::default()
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Gazebo thermostat v{}", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;

    // ── 2. Config (tuning only; target/mode always boot at defaults) ──
    let nvs = match NvsAdapter::new() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            None
        }
    };
    let config = load_config(nvs.as_ref());
    let watchdog = Watchdog::for_interval(config.control_loop_interval_ms);

    // ── 3. Hardware ports (a failed port leaves the loop idle) ──
    let sensor = match hw_init::init_peripherals() {
        Ok(()) => Some(TemperatureSensor::new(
            pins::TEMP_ADC1_CHANNEL,
            config.sensor_min_valid_c,
            config.sensor_max_valid_c,
        )),
        Err(e) => {
            error!("Sensor unavailable: {}", Error::from(e));
            None
        }
    };

    const _: () = assert!(pins::RELAY_GPIO == 4, "relay pin below must be pins::RELAY_GPIO");
    let actuator = match PinDriver::output(peripherals.pins.gpio4)
        .map_err(|_| Error::Init("relay GPIO"))
        .and_then(|pin| RelayDriver::new(pin, config.relay_active_high).map_err(Error::from))
    {
        Ok(relay) => Some(RelayActuator::new(relay)),
        Err(e) => {
            error!("Relay on GPIO{} unavailable: {}", pins::RELAY_GPIO, e);
            None
        }
    };

    // ── 4. Service ────────────────────────────────────────────
    let mut sink = ConsoleSink {
        log: LogEventSink::new(),
        json: JsonLineSink::new(std::io::stdout()),
    };
    let mut app = ThermostatService::new(&config, sensor, actuator);
    app.start(&mut sink);

    spawn_console_reader()?;

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    let interval = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    let telemetry_every = config.telemetry_every_ticks();
    let mut ticks_since_telemetry: u64 = 0;

    loop {
        std::thread::sleep(interval);
        push_event(Event::ControlTick);

        ticks_since_telemetry += 1;
        if ticks_since_telemetry >= telemetry_every {
            push_event(Event::TelemetryTick);
            ticks_since_telemetry = 0;
        }

        events::drain_events(|event| match event {
            Event::ControlTick => app.tick(&mut sink),
            Event::CommandReceived => {
                while let Some(call) = events::take_command() {
                    app.handle_command(call, &mut sink);
                }
            }
            Event::TelemetryTick => {
                let telemetry = app.build_telemetry();
                sink.emit(&telemetry);
            }
        });

        watchdog.feed();
    }
}
