//! Control algorithms.
//!
//! Pure functions of their inputs: no ports, no logging, no clocks.

pub mod hysteresis;
