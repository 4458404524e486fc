//! Control service: the hexagonal core.
//!
//! [`ControlService`] owns the threshold rules and the little bookkeeping a
//! cycle needs (last decision, clock fallback, telemetry cadence). All I/O
//! flows through port traits injected at call sites, making the whole
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │     ControlService     │
//! ActuatorPort ◀──│  rules · hour fallback │
//!                 └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::hour::HourResolver;
use crate::control::{ControlRules, Decision};
use crate::sensors::Reading;

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, ClockPort, EventSink, Output, SensorPort};

// ───────────────────────────────────────────────────────────────
// ControlService
// ───────────────────────────────────────────────────────────────

/// Orchestrates one read → decide → write cycle at a time.
pub struct ControlService {
    rules: ControlRules,
    hours: HourResolver,
    /// Emit telemetry every N completed cycles.
    telemetry_every: u64,
    cycle_count: u64,
    read_failures: u64,
    clock_available: bool,
    last: Option<CycleRecord>,
}

/// What the most recent completed cycle saw and did.
#[derive(Debug, Clone, Copy)]
struct CycleRecord {
    reading: Reading,
    hour: Option<u8>,
    decision: Decision,
}

impl ControlService {
    pub fn new(config: &SystemConfig) -> Self {
        let interval_ms = u64::from(config.control_loop_interval_ms.max(1));
        let cycles_per_report = u64::from(config.telemetry_interval_secs) * 1000 / interval_ms;
        Self {
            rules: ControlRules::from_config(config),
            hours: HourResolver::new(config.hour_fallback),
            telemetry_every: cycles_per_report.max(1),
            cycle_count: 0,
            read_failures: 0,
            clock_available: true,
            last: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output to a known (off) state before the first cycle.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        sink.emit(&AppEvent::Started);
        info!("ControlService started, all outputs off");
    }

    /// Drive every output low, e.g. before halting.
    pub fn stop(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.last = None;
        sink.emit(&AppEvent::Stopped);
        info!("ControlService stopped, all outputs off");
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle: read sensors → resolve hour → decide →
    /// write all three outputs.
    ///
    /// Returns the applied decision, or `None` if the sensors could not be
    /// read (outputs are then left untouched).
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Option<Decision> {
        // 1. Read sensors via SensorPort
        let reading = match hw.read() {
            Ok(r) => r,
            Err(e) => {
                self.read_failures += 1;
                warn!("Sensor read failed ({}), skipping cycle", e);
                sink.emit(&AppEvent::SensorReadFailed(e));
                return None;
            }
        };

        // 2. Resolve the hour through the fallback policy
        let reported = clock.current_hour();
        let hour = self.hours.resolve(reported);
        self.track_clock(reported, hour, sink);

        // 3. Pure decision
        let decision = match hour {
            Some(h) => self.rules.decide(&reading, h),
            None => self.rules.decide_without_hour(&reading),
        };

        // 4. Apply every cycle, changed or not
        Self::apply(hw, decision);

        // 5. Report
        let previous = self.last.map(|r| r.decision);
        if previous != Some(decision) {
            sink.emit(&AppEvent::OutputsChanged {
                from: previous.unwrap_or_default(),
                to: decision,
            });
        }
        self.last = Some(CycleRecord {
            reading,
            hour,
            decision,
        });
        self.cycle_count += 1;
        if self.cycle_count % self.telemetry_every == 0 {
            if let Some(t) = self.build_telemetry() {
                sink.emit(&AppEvent::Telemetry(t));
            }
        }

        Some(decision)
    }

    /// Write a decision to the three outputs. Both motors always receive
    /// the same value.
    pub fn apply(hw: &mut impl ActuatorPort, decision: Decision) {
        hw.set_output(Output::Light, decision.light_on);
        hw.set_output(Output::MotorA, decision.motors_on);
        hw.set_output(Output::MotorB, decision.motors_on);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Telemetry for the most recent completed cycle.
    pub fn build_telemetry(&self) -> Option<TelemetryData> {
        self.last.map(|r| TelemetryData {
            cycle: self.cycle_count,
            hour: r.hour,
            reading: r.reading,
            decision: r.decision,
            read_failures: self.read_failures,
        })
    }

    /// Decision applied by the most recent completed cycle.
    pub fn last_decision(&self) -> Option<Decision> {
        self.last.map(|r| r.decision)
    }

    /// Completed cycles since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Cycles skipped because of sensor read failures.
    pub fn read_failures(&self) -> u64 {
        self.read_failures
    }

    pub fn rules(&self) -> &ControlRules {
        &self.rules
    }

    // ── Internal ──────────────────────────────────────────────

    fn track_clock(
        &mut self,
        reported: Option<u8>,
        resolved: Option<u8>,
        sink: &mut impl EventSink,
    ) {
        let available = reported.is_some_and(|h| h < 24);
        if available == self.clock_available {
            return;
        }
        self.clock_available = available;
        if available {
            if let Some(hour) = resolved {
                info!("Clock restored at hour {}", hour);
                sink.emit(&AppEvent::ClockRestored { hour });
            }
        } else {
            warn!("Clock unavailable, falling back to {:?}", resolved);
            sink.emit(&AppEvent::ClockLost {
                fallback_hour: resolved,
            });
        }
    }
}
