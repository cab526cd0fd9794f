//! Control loop scenarios: ThermostatService → hysteresis → relay.
//!
//! Each test drives the service with a scripted sensor and inspects the
//! recorded relay calls and published events.

use crate::mock_hw::{ActuatorCall, MockRelay, MockSensor, RecordingSink};

use thermostat::app::commands::ClimateCall;
use thermostat::app::service::ThermostatService;
use thermostat::climate::{ClimateAction, ClimateMode};
use thermostat::config::ThermostatConfig;

type App = ThermostatService<MockSensor, MockRelay>;

/// Started service in HEAT at `target`, with start-up noise cleared.
fn heating_app(target: f32, readings: &[f32]) -> (App, RecordingSink) {
    let config = ThermostatConfig::default();
    let mut app = App::new(
        &config,
        Some(MockSensor::scripted(readings)),
        Some(MockRelay::new()),
    );
    let mut sink = RecordingSink::new();
    app.start(&mut sink);
    app.handle_command(
        ClimateCall::new()
            .with_target(target)
            .with_mode(ClimateMode::Heat),
        &mut sink,
    );
    app.actuator_mut().unwrap().calls.clear();
    sink.clear();
    (app, sink)
}

/// Tick once and return the relay calls that tick produced.
fn tick_calls(app: &mut App, sink: &mut RecordingSink) -> Vec<ActuatorCall> {
    let before = app.actuator().unwrap().calls.len();
    app.tick(sink);
    app.actuator().unwrap().calls[before..].to_vec()
}

#[test]
fn approach_from_above_holds_idle_until_below_band() {
    // One settling tick at 23.5 leaves the loop in a steady IDLE.
    let (mut app, mut sink) = heating_app(22.0, &[23.5, 23.0, 22.7, 22.3, 21.4]);
    app.tick(&mut sink);
    assert_eq!(app.action(), ClimateAction::Idle);
    app.actuator_mut().unwrap().calls.clear();
    sink.clear();

    let expected = [
        (ClimateAction::Idle, vec![]),
        (ClimateAction::Idle, vec![]),
        (ClimateAction::Idle, vec![]),
        (ClimateAction::Heating, vec![ActuatorCall::Activate]),
    ];
    for (i, (action, calls)) in expected.into_iter().enumerate() {
        let got = tick_calls(&mut app, &mut sink);
        assert_eq!(app.action(), action, "tick {}", i);
        assert_eq!(got, calls, "relay calls on tick {}", i);
    }

    assert_eq!(sink.publishes(), 1, "only IDLE -> HEATING");
}

#[test]
fn every_action_change_drives_the_relay_once() {
    let (mut app, mut sink) = heating_app(22.0, &[23.0, 23.0, 23.0]);

    // OFF -> IDLE
    let calls = tick_calls(&mut app, &mut sink);
    assert_eq!(app.action(), ClimateAction::Idle);
    assert_eq!(calls, [ActuatorCall::Deactivate]);

    // IDLE -> OFF
    app.handle_command(ClimateCall::new().with_mode(ClimateMode::Off), &mut sink);
    let calls = tick_calls(&mut app, &mut sink);
    assert_eq!(app.action(), ClimateAction::Off);
    assert_eq!(calls, [ActuatorCall::Deactivate]);

    // Steady OFF
    let calls = tick_calls(&mut app, &mut sink);
    assert!(calls.is_empty());
    assert_eq!(sink.publishes(), 3, "two transitions + one command");
}

#[test]
fn approach_from_below_heats_through_band() {
    let (mut app, mut sink) = heating_app(22.0, &[21.0, 21.6, 22.0, 22.5, 22.6]);

    let mut actions = Vec::new();
    for _ in 0..5 {
        app.tick(&mut sink);
        actions.push(app.action());
    }

    assert_eq!(
        actions,
        [
            ClimateAction::Heating,
            ClimateAction::Heating,
            ClimateAction::Heating,
            ClimateAction::Heating,
            ClimateAction::Idle,
        ]
    );
    assert_eq!(
        app.actuator().unwrap().calls,
        [ActuatorCall::Activate, ActuatorCall::Deactivate]
    );
}

#[test]
fn invalid_reading_while_heating_changes_nothing() {
    let (mut app, mut sink) = heating_app(22.0, &[18.0, f32::NAN]);

    app.tick(&mut sink);
    assert_eq!(app.action(), ClimateAction::Heating);
    let publishes = sink.publishes();

    let calls = tick_calls(&mut app, &mut sink);

    assert_eq!(app.action(), ClimateAction::Heating);
    assert!(calls.is_empty(), "no relay call on NaN");
    assert_eq!(sink.publishes(), publishes, "no publish on NaN");
    assert_eq!(app.snapshot().current_temperature, Some(18.0));
}

#[test]
fn heat_to_off_while_heating_releases_once() {
    let (mut app, mut sink) = heating_app(22.0, &[18.0, 18.0, 18.0]);
    app.tick(&mut sink);
    assert_eq!(app.action(), ClimateAction::Heating);
    sink.clear();

    app.handle_command(ClimateCall::new().with_mode(ClimateMode::Off), &mut sink);
    assert_eq!(app.action(), ClimateAction::Heating, "commands never actuate");
    assert_eq!(sink.publishes(), 1);

    let calls = tick_calls(&mut app, &mut sink);
    assert_eq!(app.action(), ClimateAction::Off);
    assert_eq!(calls, [ActuatorCall::Deactivate]);
    assert_eq!(sink.publishes(), 2);

    // Staying OFF is silent.
    let calls = tick_calls(&mut app, &mut sink);
    assert!(calls.is_empty());
    assert_eq!(sink.publishes(), 2);
}

#[test]
fn unknown_temperature_after_off_settles_on_idle() {
    let (mut app, mut sink) = heating_app(22.0, &[f32::NAN]);

    let calls = tick_calls(&mut app, &mut sink);

    assert_eq!(app.action(), ClimateAction::Idle);
    assert_eq!(calls, [ActuatorCall::Deactivate]);
    assert_eq!(sink.publishes(), 1);
    assert_eq!(sink.last_published().unwrap().current_temperature, None);
}

#[test]
fn target_change_takes_effect_on_next_tick() {
    let (mut app, mut sink) = heating_app(20.0, &[21.0, 21.0]);
    app.tick(&mut sink);
    assert_eq!(app.action(), ClimateAction::Idle);

    assert_eq!(app.actuator().unwrap().calls, [ActuatorCall::Deactivate]);

    app.handle_command(ClimateCall::new().with_target(23.0), &mut sink);
    assert_eq!(app.action(), ClimateAction::Idle);
    assert_eq!(app.actuator().unwrap().calls.len(), 1, "commands never actuate");

    app.tick(&mut sink);
    assert_eq!(app.action(), ClimateAction::Heating);
    assert_eq!(
        app.actuator().unwrap().calls,
        [ActuatorCall::Deactivate, ActuatorCall::Activate]
    );
}

#[test]
fn start_releases_relay_and_announces_boot_state() {
    let config = ThermostatConfig::default();
    let mut app = App::new(
        &config,
        Some(MockSensor::scripted(&[])),
        Some(MockRelay::new()),
    );
    let mut sink = RecordingSink::new();

    app.start(&mut sink);

    assert_eq!(app.actuator().unwrap().calls, [ActuatorCall::Deactivate]);
    assert_eq!(sink.events.len(), 1);
    assert_eq!(sink.publishes(), 0, "Started is not a state publish");
    let boot = sink.events[0].snapshot();
    assert_eq!(boot.mode, ClimateMode::Off);
    assert_eq!(boot.action, ClimateAction::Off);
    assert_eq!(boot.target_temperature, 22.0);
}

#[test]
fn missing_actuator_leaves_sensor_unread() {
    let config = ThermostatConfig::default();
    let mut app: App = ThermostatService::new(&config, Some(MockSensor::scripted(&[18.0])), None);
    let mut sink = RecordingSink::new();
    app.handle_command(ClimateCall::new().with_mode(ClimateMode::Heat), &mut sink);

    for _ in 0..3 {
        app.tick(&mut sink);
    }

    assert_eq!(app.sensor_mut().unwrap().reads, 0);
    assert_eq!(app.action(), ClimateAction::Off);
    assert_eq!(app.tick_count(), 0);
    assert_eq!(sink.publishes(), 1);

    app.attach_actuator(MockRelay::new());
    app.tick(&mut sink);
    assert_eq!(app.action(), ClimateAction::Heating);
    assert_eq!(
        app.actuator().unwrap().calls,
        [ActuatorCall::Deactivate, ActuatorCall::Activate]
    );
}
