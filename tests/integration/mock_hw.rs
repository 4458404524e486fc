//! Mock adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO or I2C.

use std::collections::VecDeque;

use terrarium::app::events::AppEvent;
use terrarium::app::ports::{ActuatorPort, ClockPort, EventSink, Output, SensorPort};
use terrarium::error::SensorError;
use terrarium::sensors::Reading;

// ── MockHardware ──────────────────────────────────────────────

/// Sensor + actuator mock. Readings are served from a script; once the
/// script runs dry the last scripted value repeats.
pub struct MockHardware {
    pub calls: Vec<(Output, bool)>,
    pub reads: u32,
    script: VecDeque<Result<Reading, SensorError>>,
    fallback: Reading,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            reads: 0,
            script: VecDeque::new(),
            fallback: Reading::default(),
        }
    }

    /// Hardware that always reports `reading`.
    pub fn reporting(reading: Reading) -> Self {
        let mut hw = Self::new();
        hw.fallback = reading;
        hw
    }

    pub fn push_reading(&mut self, reading: Reading) {
        self.script.push_back(Ok(reading));
    }

    pub fn push_error(&mut self, error: SensorError) {
        self.script.push_back(Err(error));
    }

    /// Last value written to `output`, if it was ever written.
    pub fn level(&self, output: Output) -> Option<bool> {
        self.calls
            .iter()
            .rev()
            .find_map(|(o, on)| (*o == output).then_some(*on))
    }

    pub fn light_on(&self) -> bool {
        self.level(Output::Light).unwrap_or(false)
    }

    pub fn motors_on(&self) -> bool {
        self.level(Output::MotorA).unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.reads += 1;
        match self.script.pop_front() {
            Some(Ok(r)) => {
                self.fallback = r;
                Ok(r)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.fallback),
        }
    }
}

impl ActuatorPort for MockHardware {
    fn set_output(&mut self, output: Output, on: bool) {
        self.calls.push((output, on));
    }
}

// ── MockClock ─────────────────────────────────────────────────

pub struct MockClock {
    pub hour: Option<u8>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn at(hour: u8) -> Self {
        Self { hour: Some(hour) }
    }

    pub fn unset() -> Self {
        Self { hour: None }
    }
}

impl ClockPort for MockClock {
    fn current_hour(&self) -> Option<u8> {
        self.hour
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

#[allow(dead_code)]
pub fn reading(lux: f32, temp: f32, humidity: f32) -> Reading {
    Reading {
        illuminance_lux: lux,
        temperature_c: temp,
        humidity_percent: humidity,
    }
}
