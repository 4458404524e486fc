//! One-shot hardware peripheral initialization.
//!
//! Builds the sensor I2C driver and the three output pin drivers from the
//! pin map. Called once from `main()` before the control loop starts; the
//! returned drivers are owned by the hardware adapter from then on.

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Output, PinDriver};
use esp_idf_hal::i2c::{I2C0, I2cConfig, I2cDriver};
use esp_idf_hal::units::Hertz;
use esp_idf_svc::sys::EspError;
use log::info;

use crate::adapters::hardware::HardwareAdapter;
use crate::config::SystemConfig;
use crate::drivers::outputs::OutputBank;
use crate::pins;
use crate::sensors::SensorHub;

pub type OutputPinDriver = PinDriver<'static, AnyOutputPin, Output>;

/// Concrete hardware adapter type for the ESP32-S3 board.
pub type BoardHardware =
    HardwareAdapter<I2cDriver<'static>, FreeRtos, OutputPinDriver, OutputPinDriver, OutputPinDriver>;

/// Configure the dedicated sensor bus on I2C0.
pub fn sensor_bus(i2c: I2C0, config: &SystemConfig) -> Result<I2cDriver<'static>, EspError> {
    // SAFETY: the pin numbers come from `pins`, which assigns each GPIO to
    // exactly one function; nothing else constructs drivers for them.
    let sda = unsafe { AnyIOPin::new(pins::SENSORS_SDA_GPIO) };
    let scl = unsafe { AnyIOPin::new(pins::SENSORS_SCL_GPIO) };
    let bus_config = I2cConfig::new().baudrate(Hertz(config.i2c_frequency_hz));
    let driver = I2cDriver::new(i2c, sda, scl, &bus_config)?;
    info!(
        "hw_init: sensor bus on SDA={}, SCL={} @ {} Hz",
        pins::SENSORS_SDA_GPIO,
        pins::SENSORS_SCL_GPIO,
        config.i2c_frequency_hz
    );
    Ok(driver)
}

/// Configure the light and motor outputs, all driven low.
pub fn output_bank() -> Result<OutputBank<OutputPinDriver, OutputPinDriver, OutputPinDriver>, EspError>
{
    let light = output_pin(pins::LIGHT_GPIO)?;
    let motor_a = output_pin(pins::MOTOR_A_GPIO)?;
    let motor_b = output_pin(pins::MOTOR_B_GPIO)?;
    info!(
        "hw_init: outputs light={}, motor_a={}, motor_b={}",
        pins::LIGHT_GPIO,
        pins::MOTOR_A_GPIO,
        pins::MOTOR_B_GPIO
    );
    Ok(OutputBank::new(light, motor_a, motor_b))
}

fn output_pin(gpio: i32) -> Result<OutputPinDriver, EspError> {
    // SAFETY: see `sensor_bus`; each output GPIO is claimed exactly once.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    let mut driver = PinDriver::output(pin)?;
    driver.set_low()?;
    Ok(driver)
}

/// Build the full board adapter. The sensors are not initialised yet.
pub fn board(i2c: I2C0, config: &SystemConfig) -> Result<BoardHardware, EspError> {
    let bus = sensor_bus(i2c, config)?;
    let sensors = SensorHub::new(bus, FreeRtos, config);
    Ok(HardwareAdapter::new(sensors, output_bank()?))
}
