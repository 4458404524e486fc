//! Digital output bank: light relay and two ventilation motor drivers.
//!
//! Plain on/off outputs, no PWM. Each write goes straight to the pin even
//! when the level does not change; the driver only mirrors the last
//! commanded level for queries.
//!
//! ## Dual-target design
//!
//! Generic over [`OutputPin`]: `PinDriver` on ESP-IDF, mock pins on host.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::Output;
use crate::error::ActuatorError;

pub struct OutputBank<L, A, B> {
    light: L,
    motor_a: A,
    motor_b: B,
    /// Last commanded level, indexed like [`Output::ALL`].
    levels: [bool; 3],
}

impl<L: OutputPin, A: OutputPin, B: OutputPin> OutputBank<L, A, B> {
    pub fn new(light: L, motor_a: A, motor_b: B) -> Self {
        Self {
            light,
            motor_a,
            motor_b,
            levels: [false; 3],
        }
    }

    /// Drive one output. The mirrored level only changes if the pin write
    /// succeeded.
    pub fn write(&mut self, output: Output, on: bool) -> Result<(), ActuatorError> {
        let state = PinState::from(on);
        let result = match output {
            Output::Light => self.light.set_state(state).map_err(|_| ()),
            Output::MotorA => self.motor_a.set_state(state).map_err(|_| ()),
            Output::MotorB => self.motor_b.set_state(state).map_err(|_| ()),
        };
        match result {
            Ok(()) => {
                self.levels[index(output)] = on;
                Ok(())
            }
            Err(()) => {
                warn!("Output {:?}: GPIO write failed", output);
                Err(ActuatorError::GpioWriteFailed)
            }
        }
    }

    pub fn is_on(&self, output: Output) -> bool {
        self.levels[index(output)]
    }

    /// Give the pins back.
    pub fn release(self) -> (L, A, B) {
        (self.light, self.motor_a, self.motor_b)
    }
}

fn index(output: Output) -> usize {
    match output {
        Output::Light => 0,
        Output::MotorA => 1,
        Output::MotorB => 2,
    }
}
