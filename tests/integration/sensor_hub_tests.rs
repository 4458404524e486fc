//! SensorHub against a scripted I2C bus.

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

use terrarium::config::SystemConfig;
use terrarium::error::{SensorDevice, SensorError};
use terrarium::sensors::SensorHub;

const AHT: u8 = 0x38;
const TSL: u8 = 0x39;

pub fn aht_init() -> Vec<Transaction> {
    vec![
        Transaction::write(AHT, vec![0xBA]),
        Transaction::read(AHT, vec![0x18]),
        Transaction::write(AHT, vec![0xE1, 0x08, 0x00]),
        Transaction::read(AHT, vec![0x18]),
    ]
}

pub fn tsl_init() -> Vec<Transaction> {
    vec![
        Transaction::write_read(TSL, vec![0x8A], vec![0x50]),
        Transaction::write(TSL, vec![0x80, 0x03]),
        Transaction::write(TSL, vec![0x81, 0x01]),
        Transaction::write(TSL, vec![0x80, 0x00]),
    ]
}

/// One full poll: ch0 = 1000, ch1 = 200 (1506 lux), then 50 % RH / 50 °C.
pub fn full_read() -> Vec<Transaction> {
    vec![
        Transaction::write(TSL, vec![0x80, 0x03]),
        Transaction::write_read(TSL, vec![0xAC], vec![0xE8, 0x03]),
        Transaction::write_read(TSL, vec![0xAE], vec![0xC8, 0x00]),
        Transaction::write(TSL, vec![0x80, 0x00]),
        Transaction::write(AHT, vec![0xAC, 0x33, 0x00]),
        Transaction::read(AHT, vec![0x18]),
        Transaction::read(AHT, vec![0x1C, 0x80, 0x00, 0x08, 0x00, 0x00]),
    ]
}

#[test]
fn read_before_init_touches_nothing() {
    let mut bus = I2cMock::new(&[]);
    let mut hub = SensorHub::new(bus.clone(), NoopDelay::new(), &SystemConfig::default());

    assert_eq!(hub.read(), Err(SensorError::NotInitialised));
    assert!(!hub.is_initialised());

    bus.done();
}

#[test]
fn init_then_read_produces_a_reading() {
    let mut expectations = aht_init();
    expectations.extend(tsl_init());
    expectations.extend(full_read());
    let mut bus = I2cMock::new(&expectations);
    let mut hub = SensorHub::new(bus.clone(), NoopDelay::new(), &SystemConfig::default());

    hub.init().unwrap();
    assert!(hub.is_initialised());
    let r = hub.read().unwrap();

    assert_eq!(r.illuminance_lux, 1506.0);
    assert_eq!(r.temperature_c, 50.0);
    assert_eq!(r.humidity_percent, 50.0);
    bus.done();
}

#[test]
fn missing_aht_is_named_in_the_error() {
    let expectations = [Transaction::write(AHT, vec![0xBA]).with_error(ErrorKind::Other)];
    let mut bus = I2cMock::new(&expectations);
    let mut hub = SensorHub::new(bus.clone(), NoopDelay::new(), &SystemConfig::default());

    let err = hub.init().unwrap_err();

    assert_eq!(
        err,
        SensorError::InitFailed {
            device: SensorDevice::Aht
        }
    );
    assert_eq!(err.device(), Some(SensorDevice::Aht));
    assert!(!hub.is_initialised());
    bus.done();
}

#[test]
fn missing_light_sensor_is_named_in_the_error() {
    let mut expectations = aht_init();
    expectations.push(
        Transaction::write_read(TSL, vec![0x8A], vec![0x00]).with_error(ErrorKind::Other),
    );
    let mut bus = I2cMock::new(&expectations);
    let mut hub = SensorHub::new(bus.clone(), NoopDelay::new(), &SystemConfig::default());

    assert_eq!(
        hub.init(),
        Err(SensorError::InitFailed {
            device: SensorDevice::Tsl2561
        })
    );
    assert!(!hub.is_initialised());
    bus.done();
}

#[test]
fn init_can_be_retried_after_failure() {
    let mut expectations = vec![Transaction::write(AHT, vec![0xBA]).with_error(ErrorKind::Other)];
    expectations.extend(aht_init());
    expectations.extend(tsl_init());
    let mut bus = I2cMock::new(&expectations);
    let mut hub = SensorHub::new(bus.clone(), NoopDelay::new(), &SystemConfig::default());

    assert!(hub.init().is_err());
    assert!(hub.init().is_ok());
    assert!(hub.is_initialised());
    bus.done();
}

#[test]
fn bus_error_mid_read_is_reported() {
    let mut expectations = aht_init();
    expectations.extend(tsl_init());
    expectations.push(Transaction::write(TSL, vec![0x80, 0x03]).with_error(ErrorKind::Other));
    let mut bus = I2cMock::new(&expectations);
    let mut hub = SensorHub::new(bus.clone(), NoopDelay::new(), &SystemConfig::default());

    hub.init().unwrap();
    assert_eq!(
        hub.read(),
        Err(SensorError::Bus {
            device: SensorDevice::Tsl2561
        })
    );
    bus.done();
}
