//! AHTX0 (AHT10 / AHT20) humidity and temperature sensor, I2C 0x38.
//!
//! Measurements are triggered on demand and read back as a 6-byte frame:
//! one status byte followed by two packed 20-bit values.
//!
//! ```text
//!  byte:   0        1        2        3        4        5
//!        status | hum[19:12] hum[11:4] hum[3:0]+tmp[19:16] tmp[15:8] tmp[7:0]
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, warn};

use crate::error::{SensorDevice, SensorError};

pub const ADDRESS: u8 = 0x38;

const CMD_SOFT_RESET: u8 = 0xBA;
const CMD_CALIBRATE: [u8; 3] = [0xE1, 0x08, 0x00];
const CMD_TRIGGER: [u8; 3] = [0xAC, 0x33, 0x00];

const STATUS_BUSY: u8 = 0x80;
const STATUS_CALIBRATED: u8 = 0x08;

const POWER_UP_MS: u32 = 20;
const SOFT_RESET_MS: u32 = 20;
const BUSY_POLL_MS: u32 = 10;
/// A measurement takes ~80 ms; give up after 200 ms.
const MAX_BUSY_POLLS: u8 = 20;

const FULL_SCALE: f32 = 1_048_576.0; // 2^20

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AhtReading {
    pub temperature_c: f32,
    pub humidity_percent: f32,
}

pub struct Aht {
    address: u8,
}

impl Default for Aht {
    fn default() -> Self {
        Self::new()
    }
}

impl Aht {
    pub fn new() -> Self {
        Self { address: ADDRESS }
    }

    /// Reset the device, load its calibration and confirm it is ready.
    pub fn init<I: I2c, D: DelayNs>(
        &mut self,
        i2c: &mut I,
        delay: &mut D,
    ) -> Result<(), SensorError> {
        let init_failed = SensorError::InitFailed {
            device: SensorDevice::Aht,
        };

        delay.delay_ms(POWER_UP_MS);
        i2c.write(self.address, &[CMD_SOFT_RESET]).map_err(|e| {
            warn!("AHT: soft reset failed: {:?}", e);
            init_failed
        })?;
        delay.delay_ms(SOFT_RESET_MS);
        self.wait_until_idle(i2c, delay).map_err(|_| init_failed)?;

        // AHT20 parts calibrate themselves and may NAK this command.
        if let Err(e) = i2c.write(self.address, &CMD_CALIBRATE) {
            debug!("AHT: calibrate command not acknowledged: {:?}", e);
        }

        let status = self.wait_until_idle(i2c, delay).map_err(|_| init_failed)?;
        if status & STATUS_CALIBRATED == 0 {
            warn!("AHT: calibration bit not set (status=0x{:02x})", status);
            return Err(init_failed);
        }
        Ok(())
    }

    /// Trigger a measurement and block until it is available.
    pub fn measure<I: I2c, D: DelayNs>(
        &mut self,
        i2c: &mut I,
        delay: &mut D,
    ) -> Result<AhtReading, SensorError> {
        i2c.write(self.address, &CMD_TRIGGER).map_err(|e| {
            warn!("AHT: trigger failed: {:?}", e);
            bus_error()
        })?;
        self.wait_until_idle(i2c, delay)?;

        let mut frame = [0u8; 6];
        i2c.read(self.address, &mut frame).map_err(|e| {
            warn!("AHT: frame read failed: {:?}", e);
            bus_error()
        })?;
        Ok(convert(&frame))
    }

    fn status<I: I2c>(&self, i2c: &mut I) -> Result<u8, SensorError> {
        let mut buf = [0u8; 1];
        i2c.read(self.address, &mut buf).map_err(|e| {
            warn!("AHT: status read failed: {:?}", e);
            bus_error()
        })?;
        Ok(buf[0])
    }

    /// Poll the status byte until the busy flag clears; returns the final status.
    fn wait_until_idle<I: I2c, D: DelayNs>(
        &self,
        i2c: &mut I,
        delay: &mut D,
    ) -> Result<u8, SensorError> {
        for _ in 0..MAX_BUSY_POLLS {
            let status = self.status(i2c)?;
            if status & STATUS_BUSY == 0 {
                return Ok(status);
            }
            delay.delay_ms(BUSY_POLL_MS);
        }
        Err(SensorError::Timeout {
            device: SensorDevice::Aht,
        })
    }
}

fn bus_error() -> SensorError {
    SensorError::Bus {
        device: SensorDevice::Aht,
    }
}

/// Unpack a measurement frame.
pub fn convert(frame: &[u8; 6]) -> AhtReading {
    let raw_humidity = (u32::from(frame[1]) << 12)
        | (u32::from(frame[2]) << 4)
        | (u32::from(frame[3]) >> 4);
    let raw_temperature = ((u32::from(frame[3]) & 0x0F) << 16)
        | (u32::from(frame[4]) << 8)
        | u32::from(frame[5]);

    AhtReading {
        humidity_percent: raw_humidity as f32 * 100.0 / FULL_SCALE,
        temperature_c: raw_temperature as f32 * 200.0 / FULL_SCALE - 50.0,
    }
}
