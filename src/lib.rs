//! Terrarium controller firmware library.
//!
//! Exposes the control core, drivers and adapters for integration testing
//! and host-side simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod startup;

// Generic over embedded-hal traits; the ESP-IDF wiring lives behind cfg
// attributes inside.
pub mod adapters;
pub mod drivers;
pub mod sensors;
