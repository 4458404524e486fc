//! Threshold control rules.
//!
//! Pure decision logic: one [`Reading`] plus the hour-of-day in, one
//! [`Decision`] out. No state is carried between calls, so there is no
//! hysteresis and outputs will chatter when a value sits on a threshold.
//!
//! ```text
//!  light_on  = lux < 25  AND 7 <= hour < 19
//!  motors_on = temp > 33 OR  humidity > 75
//! ```

pub mod hour;

use serde::Serialize;

use crate::config::SystemConfig;
use crate::sensors::Reading;

/// Output state computed for one cycle. Both motors share `motors_on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Decision {
    pub light_on: bool,
    pub motors_on: bool,
}

/// Half-open hour range `[start_hour, end_hour)` during which
/// supplemental lighting is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaylightWindow {
    /// Start hour (0-23 inclusive).
    pub start_hour: u8,
    /// End hour (0-23 exclusive).
    pub end_hour: u8,
}

impl DaylightWindow {
    /// Check if the given hour lies inside the window.
    pub fn contains(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            // e.g., 7..19
            hour >= self.start_hour && hour < self.end_hour
        } else {
            // e.g., 20..6 (grow lights for a nocturnal schedule)
            hour < 24 && (hour >= self.start_hour || hour < self.end_hour)
        }
    }
}

/// The threshold set the controller applies every cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRules {
    pub lux_threshold: f32,
    pub daylight: DaylightWindow,
    pub max_temperature_c: f32,
    pub max_humidity_percent: f32,
}

impl Default for ControlRules {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

impl ControlRules {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            lux_threshold: config.lux_threshold,
            daylight: DaylightWindow {
                start_hour: config.daylight_start_hour,
                end_hour: config.daylight_end_hour,
            },
            max_temperature_c: config.max_temperature_c,
            max_humidity_percent: config.max_humidity_percent,
        }
    }

    /// Compute the outputs for one reading at the given hour.
    ///
    /// All comparisons are strict: a reading exactly on a threshold does
    /// not switch anything on.
    pub fn decide(&self, reading: &Reading, hour: u8) -> Decision {
        Decision {
            light_on: self.wants_light(reading) && self.daylight.contains(hour),
            motors_on: self.wants_ventilation(reading),
        }
    }

    /// Decision for a cycle where the hour is unknown: the light stays
    /// off, ventilation is unaffected.
    pub fn decide_without_hour(&self, reading: &Reading) -> Decision {
        Decision {
            light_on: false,
            motors_on: self.wants_ventilation(reading),
        }
    }

    fn wants_light(&self, reading: &Reading) -> bool {
        reading.illuminance_lux < self.lux_threshold
    }

    fn wants_ventilation(&self, reading: &Reading) -> bool {
        reading.temperature_c > self.max_temperature_c
            || reading.humidity_percent > self.max_humidity_percent
    }
}
