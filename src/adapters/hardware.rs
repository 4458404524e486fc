//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the [`OutputBank`], exposing them through
//! [`SensorPort`] and [`ActuatorPort`]. This is the only module in the
//! system that touches actual hardware. Generic over the embedded-hal
//! traits, so host tests plug in mock buses and pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use log::error;

use crate::app::ports::{ActuatorPort, Output, SensorPort};
use crate::drivers::outputs::OutputBank;
use crate::error::SensorError;
use crate::sensors::{Reading, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, D, L, A, B> {
    sensors: SensorHub<I, D>,
    outputs: OutputBank<L, A, B>,
}

impl<I, D, L, A, B> HardwareAdapter<I, D, L, A, B>
where
    I: I2c,
    D: DelayNs,
    L: OutputPin,
    A: OutputPin,
    B: OutputPin,
{
    pub fn new(sensors: SensorHub<I, D>, outputs: OutputBank<L, A, B>) -> Self {
        Self { sensors, outputs }
    }

    /// Bring up both sensors. See [`SensorHub::init`].
    pub fn init_sensors(&mut self) -> Result<(), SensorError> {
        self.sensors.init()
    }

    pub fn sensors_ready(&self) -> bool {
        self.sensors.is_initialised()
    }

    /// Last level successfully written to `output`.
    pub fn is_on(&self, output: Output) -> bool {
        self.outputs.is_on(output)
    }

    pub fn into_parts(self) -> (SensorHub<I, D>, OutputBank<L, A, B>) {
        (self.sensors, self.outputs)
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I, D, L, A, B> SensorPort for HardwareAdapter<I, D, L, A, B>
where
    I: I2c,
    D: DelayNs,
{
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.sensors.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I, D, L, A, B> ActuatorPort for HardwareAdapter<I, D, L, A, B>
where
    L: OutputPin,
    A: OutputPin,
    B: OutputPin,
{
    fn set_output(&mut self, output: Output, on: bool) {
        // The next cycle rewrites every output, so a failed write is
        // retried without extra bookkeeping here.
        if let Err(e) = self.outputs.write(output, on) {
            error!("Failed to drive {:?} {}: {}", output, if on { "on" } else { "off" }, e);
        }
    }
}
