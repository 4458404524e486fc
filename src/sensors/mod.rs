//! Sensor subsystem: individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns the dedicated sensor I2C bus and both device drivers, and
//! produces one [`Reading`] per control cycle. There are no process-wide
//! device handles: the driver loop constructs the hub once and passes it
//! (inside the hardware adapter) to every cycle.

pub mod aht;
pub mod tsl2561;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::info;
use serde::Serialize;

use crate::config::SystemConfig;
use crate::error::SensorError;
use aht::Aht;
use tsl2561::Tsl2561;

/// One poll of every environmental sensor. Values are passed through
/// unvalidated; the devices may report physically implausible numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Reading {
    /// Ambient illuminance (lux).
    pub illuminance_lux: f32,
    /// Air temperature (°C).
    pub temperature_c: f32,
    /// Relative humidity (%).
    pub humidity_percent: f32,
}

/// Owns the sensor bus and produces a unified [`Reading`].
pub struct SensorHub<I, D> {
    bus: I,
    delay: D,
    aht: Aht,
    light: Tsl2561,
    initialised: bool,
}

impl<I: I2c, D: DelayNs> SensorHub<I, D> {
    /// Take ownership of the bus. No bus traffic happens until [`init`](Self::init).
    pub fn new(bus: I, delay: D, config: &SystemConfig) -> Self {
        Self {
            bus,
            delay,
            aht: Aht::new(),
            light: Tsl2561::new(config.light_gain, config.light_integration),
            initialised: false,
        }
    }

    /// Bring up both devices. Safe to call again after a failure.
    ///
    /// Returns `InitFailed` naming the first device that did not respond.
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.initialised = false;
        info!("Initializing sensors on dedicated I2C bus...");
        self.aht.init(&mut self.bus, &mut self.delay)?;
        self.light.init(&mut self.bus)?;
        self.initialised = true;
        info!(
            "Sensors initialized (AHT @ 0x{:02x}, TSL2561 @ 0x{:02x})",
            aht::ADDRESS,
            tsl2561::ADDRESS_FLOAT
        );
        Ok(())
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Poll the light sensor, then the humidity / temperature sensor.
    pub fn read(&mut self) -> Result<Reading, SensorError> {
        if !self.initialised {
            return Err(SensorError::NotInitialised);
        }
        let illuminance_lux = self.light.read_lux(&mut self.bus, &mut self.delay)?;
        let climate = self.aht.measure(&mut self.bus, &mut self.delay)?;
        Ok(Reading {
            illuminance_lux,
            temperature_c: climate.temperature_c,
            humidity_percent: climate.humidity_percent,
        })
    }

    /// Give the bus back (e.g. to tear down the driver).
    pub fn release(self) -> (I, D) {
        (self.bus, self.delay)
    }
}
