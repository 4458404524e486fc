//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlService (domain)
//! ```
//!
//! Driven adapters (sensors, outputs, clock, event sinks) implement these
//! traits. The [`ControlService`](super::service::ControlService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::error::SensorError;
use crate::sensors::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Poll every sensor and return one reading.
    fn read(&mut self) -> Result<Reading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The three digital outputs on the controller board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Supplemental light source.
    Light,
    /// First ventilation motor.
    MotorA,
    /// Second ventilation motor.
    MotorB,
}

impl Output {
    pub const ALL: [Output; 3] = [Output::Light, Output::MotorA, Output::MotorB];
}

/// Write-side port: the domain calls this to drive outputs.
pub trait ActuatorPort {
    /// Drive one output high (`true`) or low. Writing the current value
    /// again is allowed and must be harmless.
    fn set_output(&mut self, output: Output, on: bool);

    /// Drive every output low: safe shutdown.
    fn all_off(&mut self) {
        for output in Output::ALL {
            self.set_output(output, false);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: wall clock → domain)
// ───────────────────────────────────────────────────────────────

/// Local time-of-day source.
pub trait ClockPort {
    /// Current local hour (0-23), or `None` if the wall clock is not set.
    fn current_hour(&self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
