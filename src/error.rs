//! Unified error types for the terrarium firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! driver loop's error handling uniform. All variants are `Copy` so they
//! can be carried through events and retry loops without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be initialised or read.
    Sensor(SensorError),
    /// An output pin could not be driven.
    Actuator(ActuatorError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Which physical device on the sensor bus an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorDevice {
    /// AHTX0 humidity / temperature sensor.
    Aht,
    /// TSL2561 light sensor.
    Tsl2561,
}

impl fmt::Display for SensorDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aht => write!(f, "AHT"),
            Self::Tsl2561 => write!(f, "TSL2561"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The device did not respond (or identified wrongly) during startup.
    InitFailed { device: SensorDevice },
    /// A bus transaction failed after successful initialisation.
    Bus { device: SensorDevice },
    /// A reading was requested before the sensors were initialised.
    NotInitialised,
    /// The device stayed busy longer than the allowed polling window.
    Timeout { device: SensorDevice },
}

impl SensorError {
    /// The device this error refers to, if it concerns a single one.
    pub fn device(&self) -> Option<SensorDevice> {
        match self {
            Self::InitFailed { device } | Self::Bus { device } | Self::Timeout { device } => {
                Some(*device)
            }
            Self::NotInitialised => None,
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed { device } => {
                write!(f, "{device} init failed - check wiring on pins")
            }
            Self::Bus { device } => write!(f, "{device} bus transaction failed"),
            Self::NotInitialised => write!(f, "sensors not initialised"),
            Self::Timeout { device } => write!(f, "{device} stayed busy"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Override document could not be parsed.
    Malformed,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed config document"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
