//! End-to-end pipelines on the host: console command → queues → service,
//! NVS config → service, and the real sensor/relay adapters in simulation.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::mock_hw::{ActuatorCall, MockRelay, MockSensor, RecordingSink};

use thermostat::adapters::hardware::RelayActuator;
use thermostat::adapters::json_sink::JsonLineSink;
use thermostat::adapters::nvs::NvsAdapter;
use thermostat::app::commands::ClimateCall;
use thermostat::app::ports::{ConfigError, ConfigPort, EventSink};
use thermostat::app::service::ThermostatService;
use thermostat::climate::{ClimateAction, ClimateMode};
use thermostat::config::{ActuationPolicy, ThermostatConfig};
use thermostat::drivers::relay::RelayDriver;
use thermostat::events::{self, Event, push_event};
use thermostat::pins;
use thermostat::sensors::temperature::{TemperatureSensor, adc_to_celsius, sim_set_temp_adc};

// ── Command queue → service ───────────────────────────────────

// The only test in this binary that touches the global queues.
#[test]
fn console_commands_flow_through_event_loop() {
    let config = ThermostatConfig::default();
    let mut app = ThermostatService::new(
        &config,
        Some(MockSensor::scripted(&[19.0, 19.0])),
        Some(MockRelay::new()),
    );
    let mut sink = RecordingSink::new();
    app.start(&mut sink);

    events::submit_json(r#"{"target_temperature":21.0,"mode":"heat"}"#).unwrap();
    assert!(events::submit_json(r#"{"mode":"cool"}"#).is_err());
    push_event(Event::ControlTick);

    // One loop iteration, as the firmware runs it.
    let mut order = Vec::new();
    events::drain_events(|event| {
        order.push(event);
        match event {
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
        }
    });

    assert_eq!(order, [Event::CommandReceived, Event::ControlTick]);
    assert_eq!(app.state().mode(), ClimateMode::Heat);
    assert_eq!(app.state().target_temperature(), 21.0);
    assert_eq!(app.action(), ClimateAction::Heating);
    assert_eq!(app.actuator().unwrap().last_call(), Some(ActuatorCall::Activate));
    assert_eq!(sink.publishes(), 2, "command + transition");
}

// ── NVS config → service ──────────────────────────────────────

#[test]
fn stored_config_shapes_the_service() {
    let nvs = NvsAdapter::new().unwrap();
    assert_eq!(nvs.load(), Err(ConfigError::NotFound));

    let stored = ThermostatConfig {
        hysteresis_c: 1.0,
        actuation: ActuationPolicy::LevelDriven,
        visual_max_c: 30.0,
        ..ThermostatConfig::default()
    };
    nvs.save(&stored).unwrap();
    let config = nvs.load().unwrap();

    let mut app = ThermostatService::new(
        &config,
        Some(MockSensor::scripted(&[21.2, 21.2, 21.2])),
        Some(MockRelay::new()),
    );
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    app.handle_command(
        ClimateCall::new()
            .with_target(22.0)
            .with_mode(ClimateMode::Heat),
        &mut sink,
    );

    assert_eq!(app.traits().visual_max_temperature, 30.0);
    assert_eq!(app.state().hysteresis(), 1.0);

    // 21.2 sits inside the wider band, so the action settles on IDLE and
    // the released level is re-asserted every tick.
    for _ in 0..3 {
        app.tick(&mut sink);
    }
    assert_eq!(app.action(), ClimateAction::Idle);
    assert_eq!(app.actuator().unwrap().count(ActuatorCall::Deactivate), 4);
    assert_eq!(app.actuator().unwrap().count(ActuatorCall::Activate), 0);
}

// ── Real adapters in simulation ───────────────────────────────

#[derive(Default)]
struct SimPin {
    high: bool,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

// The only test in this binary that touches the simulated ADC.
#[test]
fn thermistor_and_relay_adapters_close_the_loop() {
    let config = ThermostatConfig::default();
    let sensor = TemperatureSensor::new(
        pins::TEMP_ADC1_CHANNEL,
        config.sensor_min_valid_c,
        config.sensor_max_valid_c,
    );
    let relay = RelayDriver::new(SimPin::default(), config.relay_active_high).unwrap();
    let mut app = ThermostatService::new(&config, Some(sensor), Some(RelayActuator::new(relay)));
    let mut sink = JsonLineSink::new(Vec::new());
    app.start(&mut sink);

    // Higher raw counts mean a colder thermistor.
    let cold_raw = 2600;
    let cold_c = adc_to_celsius(cold_raw).unwrap();
    sim_set_temp_adc(cold_raw);
    app.handle_command(
        ClimateCall::new()
            .with_target(cold_c + 3.0)
            .with_mode(ClimateMode::Heat),
        &mut sink,
    );
    app.tick(&mut sink);

    assert_eq!(app.action(), ClimateAction::Heating);
    let actuator = app.actuator().unwrap();
    assert!(actuator.relay().is_energised());
    assert!(actuator.relay().pin().high);
    assert_eq!(actuator.write_failures(), 0);

    // Open circuit: the reading is discarded and the relay holds.
    sim_set_temp_adc(0);
    app.tick(&mut sink);
    assert_eq!(app.action(), ClimateAction::Heating);
    let current = app.snapshot().current_temperature.unwrap();
    assert!((current - cold_c).abs() < 1e-3);

    sim_set_temp_adc(2048);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3, "started, command, transition");
    assert!(lines[2].contains("\"action\":\"heating\""));
}
