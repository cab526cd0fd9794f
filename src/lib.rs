//! Gazebo stove thermostat firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod climate;
pub mod config;
pub mod control;
pub mod error;
pub mod events;

// Hardware-facing modules; simulated on host builds.
pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;
