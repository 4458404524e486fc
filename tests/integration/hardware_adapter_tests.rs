//! End-to-end cycle through the real HardwareAdapter with mocked bus and
//! pins: I2C transactions in, GPIO levels out.

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTx};
use embedded_hal_mock::eh1::i2c::Mock as I2cMock;

use terrarium::adapters::hardware::HardwareAdapter;
use terrarium::app::ports::Output;
use terrarium::app::service::ControlService;
use terrarium::config::SystemConfig;
use terrarium::drivers::outputs::OutputBank;
use terrarium::sensors::SensorHub;

use super::mock_hw::{MockClock, RecordingSink};
use super::sensor_hub_tests::{aht_init, full_read, tsl_init};

#[test]
fn bright_hot_reading_drives_motor_pins() {
    let config = SystemConfig::default();
    let mut expectations = aht_init();
    expectations.extend(tsl_init());
    expectations.extend(full_read());
    let mut bus = I2cMock::new(&expectations);

    // 1506 lux, 50 °C, 50 % RH at noon: light off, motors on.
    let mut light = PinMock::new(&[PinTx::set(State::Low)]);
    let mut motor_a = PinMock::new(&[PinTx::set(State::High)]);
    let mut motor_b = PinMock::new(&[PinTx::set(State::High)]);

    let sensors = SensorHub::new(bus.clone(), NoopDelay::new(), &config);
    let outputs = OutputBank::new(light.clone(), motor_a.clone(), motor_b.clone());
    let mut hw = HardwareAdapter::new(sensors, outputs);
    let mut app = ControlService::new(&config);
    let mut sink = RecordingSink::new();

    hw.init_sensors().unwrap();
    assert!(hw.sensors_ready());
    app.tick(&mut hw, &MockClock::at(12), &mut sink);

    assert!(!hw.is_on(Output::Light));
    assert!(hw.is_on(Output::MotorA));
    assert!(hw.is_on(Output::MotorB));

    bus.done();
    light.done();
    motor_a.done();
    motor_b.done();
}

#[test]
fn uninitialised_sensors_skip_the_cycle() {
    let config = SystemConfig::default();
    let mut bus = I2cMock::new(&[]);
    let mut light = PinMock::new(&[]);
    let mut motor_a = PinMock::new(&[]);
    let mut motor_b = PinMock::new(&[]);

    let sensors = SensorHub::new(bus.clone(), NoopDelay::new(), &config);
    let outputs = OutputBank::new(light.clone(), motor_a.clone(), motor_b.clone());
    let mut hw = HardwareAdapter::new(sensors, outputs);
    let mut app = ControlService::new(&config);
    let mut sink = RecordingSink::new();

    assert_eq!(app.tick(&mut hw, &MockClock::at(12), &mut sink), None);
    assert_eq!(app.read_failures(), 1);

    bus.done();
    light.done();
    motor_a.done();
    motor_b.done();
}
