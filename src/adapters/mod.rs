//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `hardware`     | SensorPort         | NTC thermistor on ADC1   |
//! |                | ActuatorPort       | Relay on a GPIO output   |
//! | `log_sink`     | EventSink          | Serial log output        |
//! | `json_sink`    | EventSink          | JSON lines to a client   |
//! | `nvs`          | ConfigPort         | NVS / in-memory store    |
//! | `console`      | (command intake)   | stdin line reader        |

pub mod console;
pub mod hardware;
pub mod json_sink;
pub mod log_sink;
pub mod nvs;
