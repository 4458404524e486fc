//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                    |
//! |------------|--------------|--------------------------------|
//! | `hardware` | SensorPort   | AHT + TSL2561 on the I2C bus   |
//! |            | ActuatorPort | Light and motor GPIO outputs   |
//! | `log_sink` | EventSink    | Serial log output              |
//! | `time`     | ClockPort    | ESP32 system wall clock        |

pub mod hardware;
pub mod log_sink;
pub mod time;
