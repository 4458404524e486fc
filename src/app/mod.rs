//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control cycle for the terrarium: read the
//! sensors, resolve the hour, apply the threshold rules, drive the
//! outputs. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
