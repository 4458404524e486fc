//! Outbound application events.
//!
//! The [`ControlService`](super::service::ControlService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use serde::Serialize;

use crate::control::Decision;
use crate::error::SensorError;
use crate::sensors::Reading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controller started; all outputs were driven low.
    Started,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The computed outputs differ from the previous cycle.
    OutputsChanged { from: Decision, to: Decision },

    /// The sensors could not be read; outputs were left as they were.
    SensorReadFailed(SensorError),

    /// The clock stopped reporting an hour. Carries the hour the
    /// controller falls back to, if any.
    ClockLost { fallback_hour: Option<u8> },

    /// The clock is reporting again.
    ClockRestored { hour: u8 },

    /// The controller drove every output low and stopped.
    Stopped,
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryData {
    /// Control cycles completed since start.
    pub cycle: u64,
    /// Hour the rules were evaluated with (`None` = unknown, light forced off).
    pub hour: Option<u8>,
    pub reading: Reading,
    pub decision: Decision,
    /// Cycles skipped because the sensors could not be read.
    pub read_failures: u64,
}
