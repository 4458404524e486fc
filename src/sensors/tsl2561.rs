//! TSL2561 ambient light sensor (I2C, address "float" = 0x39).
//!
//! Two photodiode channels: CH0 sees visible + infrared, CH1 infrared
//! only. Lux is derived from the channel ratio with the datasheet's
//! fixed-point approximation for the T/FN/CL package.
//!
//! The driver does not own the bus. The [`SensorHub`](super::SensorHub)
//! lends it the shared I2C handle for each transaction, so both sensors
//! can live on one bus without a mutex.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{SensorDevice, SensorError};

/// Bus address with the ADDR pin left floating.
pub const ADDRESS_FLOAT: u8 = 0x39;

const COMMAND_BIT: u8 = 0x80;
const WORD_BIT: u8 = 0x20;

const REG_CONTROL: u8 = 0x00;
const REG_TIMING: u8 = 0x01;
const REG_ID: u8 = 0x0A;
const REG_CHAN0_LOW: u8 = 0x0C;
const REG_CHAN1_LOW: u8 = 0x0E;

const POWER_ON: u8 = 0x03;
const POWER_OFF: u8 = 0x00;

/// Upper nibble of the ID register for the TSL2561CS and TSL2561T/FN/CL.
const PART_NUMBERS_TSL2561: [u8; 2] = [0x1, 0x5];

/// Value reported when either channel is saturated.
pub const SATURATED_LUX: u32 = 65_536;

// Fixed-point scaling from the datasheet.
const LUX_SCALE: u32 = 14;
const RATIO_SCALE: u32 = 9;
const CH_SCALE: u32 = 10;
const CHSCALE_TINT0: u64 = 0x7517;
const CHSCALE_TINT1: u64 = 0x0FE7;

/// `(K, B, M)` breakpoints for the T, FN and CL packages.
const COEFFICIENTS_T: [(u64, u64, u64); 8] = [
    (0x0040, 0x01f2, 0x01be),
    (0x0080, 0x0214, 0x02d1),
    (0x00c0, 0x023f, 0x037b),
    (0x0100, 0x0270, 0x03fe),
    (0x0138, 0x016f, 0x01fc),
    (0x019a, 0x00d2, 0x00fb),
    (0x029a, 0x0018, 0x0012),
    (0x029a, 0x0000, 0x0000),
];

/// Analog gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gain {
    /// No gain, for bright conditions.
    X1,
    /// 16x gain, for dim conditions.
    X16,
}

impl Gain {
    fn bits(self) -> u8 {
        match self {
            Self::X1 => 0x00,
            Self::X16 => 0x10,
        }
    }
}

/// ADC integration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationTime {
    Ms13,
    Ms101,
    Ms402,
}

impl IntegrationTime {
    fn bits(self) -> u8 {
        match self {
            Self::Ms13 => 0x00,
            Self::Ms101 => 0x01,
            Self::Ms402 => 0x02,
        }
    }

    /// How long to wait after power-up before the channels hold a sample.
    pub fn wait_ms(self) -> u32 {
        match self {
            Self::Ms13 => 14,
            Self::Ms101 => 102,
            Self::Ms402 => 403,
        }
    }

    /// Raw count above which a channel is considered saturated.
    fn clip_threshold(self) -> u16 {
        match self {
            Self::Ms13 => 4900,
            Self::Ms101 => 37_000,
            Self::Ms402 => 65_000,
        }
    }

    fn channel_scale(self) -> u64 {
        match self {
            Self::Ms13 => CHSCALE_TINT0,
            Self::Ms101 => CHSCALE_TINT1,
            Self::Ms402 => 1 << CH_SCALE,
        }
    }
}

/// Raw channel counts from one integration cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channels {
    /// CH0: visible + infrared.
    pub broadband: u16,
    /// CH1: infrared only.
    pub infrared: u16,
}

pub struct Tsl2561 {
    address: u8,
    gain: Gain,
    integration: IntegrationTime,
}

impl Tsl2561 {
    pub fn new(gain: Gain, integration: IntegrationTime) -> Self {
        Self {
            address: ADDRESS_FLOAT,
            gain,
            integration,
        }
    }

    /// Identify the part and program gain / integration time.
    ///
    /// Leaves the device powered down between measurements.
    pub fn init<I: I2c>(&mut self, i2c: &mut I) -> Result<(), SensorError> {
        let init_failed = SensorError::InitFailed {
            device: SensorDevice::Tsl2561,
        };

        let mut id = [0u8; 1];
        i2c.write_read(self.address, &[COMMAND_BIT | REG_ID], &mut id)
            .map_err(|e| {
                warn!("TSL2561: ID read failed: {:?}", e);
                init_failed
            })?;
        if !PART_NUMBERS_TSL2561.contains(&(id[0] >> 4)) {
            warn!("TSL2561: unexpected ID 0x{:02x}", id[0]);
            return Err(init_failed);
        }

        self.power(i2c, true).map_err(|_| init_failed)?;
        let timing = self.integration.bits() | self.gain.bits();
        i2c.write(self.address, &[COMMAND_BIT | REG_TIMING, timing])
            .map_err(|e| {
                warn!("TSL2561: timing write failed: {:?}", e);
                init_failed
            })?;
        self.power(i2c, false).map_err(|_| init_failed)
    }

    /// Run one integration cycle and return the raw channel counts.
    pub fn read_channels<I: I2c, D: DelayNs>(
        &mut self,
        i2c: &mut I,
        delay: &mut D,
    ) -> Result<Channels, SensorError> {
        self.power(i2c, true)?;
        delay.delay_ms(self.integration.wait_ms());
        let broadband = self.read_word(i2c, REG_CHAN0_LOW)?;
        let infrared = self.read_word(i2c, REG_CHAN1_LOW)?;
        self.power(i2c, false)?;
        Ok(Channels {
            broadband,
            infrared,
        })
    }

    /// Run one integration cycle and convert it to lux.
    pub fn read_lux<I: I2c, D: DelayNs>(
        &mut self,
        i2c: &mut I,
        delay: &mut D,
    ) -> Result<f32, SensorError> {
        let ch = self.read_channels(i2c, delay)?;
        Ok(calculate_lux(ch, self.gain, self.integration) as f32)
    }

    fn power<I: I2c>(&self, i2c: &mut I, on: bool) -> Result<(), SensorError> {
        let value = if on { POWER_ON } else { POWER_OFF };
        i2c.write(self.address, &[COMMAND_BIT | REG_CONTROL, value])
            .map_err(|e| {
                warn!("TSL2561: power write failed: {:?}", e);
                bus_error()
            })
    }

    fn read_word<I: I2c>(&self, i2c: &mut I, reg: u8) -> Result<u16, SensorError> {
        let mut buf = [0u8; 2];
        i2c.write_read(self.address, &[COMMAND_BIT | WORD_BIT | reg], &mut buf)
            .map_err(|e| {
                warn!("TSL2561: word read 0x{:02x} failed: {:?}", reg, e);
                bus_error()
            })?;
        Ok(u16::from_le_bytes(buf))
    }
}

fn bus_error() -> SensorError {
    SensorError::Bus {
        device: SensorDevice::Tsl2561,
    }
}

/// Convert raw channel counts to lux (T/FN/CL package).
///
/// Returns [`SATURATED_LUX`] when either channel is clipped.
pub fn calculate_lux(ch: Channels, gain: Gain, integration: IntegrationTime) -> u32 {
    let clip = integration.clip_threshold();
    if ch.broadband > clip || ch.infrared > clip {
        return SATURATED_LUX;
    }

    let mut scale = integration.channel_scale();
    if gain == Gain::X1 {
        scale <<= 4;
    }

    let channel0 = (u64::from(ch.broadband) * scale) >> CH_SCALE;
    let channel1 = (u64::from(ch.infrared) * scale) >> CH_SCALE;

    let ratio1 = if channel0 == 0 {
        0
    } else {
        (channel1 << (RATIO_SCALE + 1)) / channel0
    };
    let ratio = (ratio1 + 1) >> 1;

    let (_, b, m) = COEFFICIENTS_T
        .iter()
        .copied()
        .find(|&(k, _, _)| ratio <= k)
        .unwrap_or((0, 0, 0));

    let temp = (channel0 * b).saturating_sub(channel1 * m);
    let lux = (temp + (1 << (LUX_SCALE - 1))) >> LUX_SCALE;
    lux as u32
}
