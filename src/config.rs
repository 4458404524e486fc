//! System configuration parameters
//!
//! All tunable parameters for the terrarium controller. The defaults
//! reproduce the factory thresholds exactly; a JSON override document can
//! replace any subset of fields at build or provisioning time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sensors::tsl2561::{Gain, IntegrationTime};

/// What the controller does with the light when the wall clock cannot
/// report the current hour (e.g. before the first time sync).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HourFallback {
    /// Reuse the last hour the clock reported. Light stays off until the
    /// clock has reported at least once.
    #[default]
    LastKnownHour,
    /// Treat an unknown hour as night: the light is forced off.
    LightsOff,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Lighting ---
    /// Ambient illuminance (lux) below which supplemental light is wanted
    pub lux_threshold: f32,
    /// First hour (0-23) of the daylight window, inclusive
    pub daylight_start_hour: u8,
    /// Hour (0-23) at which the daylight window ends, exclusive
    pub daylight_end_hour: u8,
    /// Behaviour when the clock has no current hour
    pub hour_fallback: HourFallback,

    // --- Ventilation ---
    /// Temperature (Celsius) above which the motors run
    pub max_temperature_c: f32,
    /// Relative humidity (%) above which the motors run
    pub max_humidity_percent: f32,

    // --- Sensor bus ---
    /// I2C bus clock (Hz)
    pub i2c_frequency_hz: u32,
    /// TSL2561 analog gain
    pub light_gain: Gain,
    /// TSL2561 integration time
    pub light_integration: IntegrationTime,

    // --- Startup ---
    /// How many times sensor initialisation is attempted before halting
    pub sensor_init_attempts: u8,
    /// Pause between sensor initialisation attempts (milliseconds)
    pub sensor_init_backoff_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Lighting
            lux_threshold: 25.0,
            daylight_start_hour: 7,
            daylight_end_hour: 19,
            hour_fallback: HourFallback::LastKnownHour,

            // Ventilation
            max_temperature_c: 33.0,
            max_humidity_percent: 75.0,

            // Sensor bus
            i2c_frequency_hz: 100_000,
            light_gain: Gain::X1,
            light_integration: IntegrationTime::Ms101,

            // Startup
            sensor_init_attempts: 3,
            sensor_init_backoff_ms: 1000,

            // Timing
            control_loop_interval_ms: 2000, // 0.5 Hz
            telemetry_interval_secs: 60,    // 1/min
        }
    }
}

impl SystemConfig {
    /// Parse a JSON override document. Missing fields keep their defaults.
    /// The result is validated before it is returned.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(doc).map_err(|_| ConfigError::Malformed)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field. Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lux_threshold.is_finite() || self.lux_threshold < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "lux_threshold must be a finite value >= 0",
            ));
        }
        if self.daylight_start_hour > 23 {
            return Err(ConfigError::ValidationFailed(
                "daylight_start_hour must be 0-23",
            ));
        }
        if self.daylight_end_hour > 23 {
            return Err(ConfigError::ValidationFailed(
                "daylight_end_hour must be 0-23",
            ));
        }
        if !(-40.0..=85.0).contains(&self.max_temperature_c) {
            return Err(ConfigError::ValidationFailed(
                "max_temperature_c must be -40.0-85.0",
            ));
        }
        if !(0.0..=100.0).contains(&self.max_humidity_percent) {
            return Err(ConfigError::ValidationFailed(
                "max_humidity_percent must be 0-100",
            ));
        }
        if !(10_000..=400_000).contains(&self.i2c_frequency_hz) {
            return Err(ConfigError::ValidationFailed(
                "i2c_frequency_hz must be 10 kHz-400 kHz",
            ));
        }
        if self.sensor_init_attempts == 0 {
            return Err(ConfigError::ValidationFailed(
                "sensor_init_attempts must be at least 1",
            ));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be > 0",
            ));
        }
        if self.telemetry_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_secs must be > 0",
            ));
        }
        Ok(())
    }
}
