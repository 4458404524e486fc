//! Terrarium Firmware: main entry point
//!
//! Hexagonal architecture with a fixed-interval control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogEventSink        Esp32Clock       │
//! │  (Sensor+Actuator)        (EventSink)         (ClockPort)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ControlService (pure logic)                 │    │
//! │  │  ControlRules · HourResolver                           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info, warn};

use terrarium::adapters::log_sink::LogEventSink;
use terrarium::adapters::time::Esp32Clock;
use terrarium::app::service::ControlService;
use terrarium::config::SystemConfig;
use terrarium::drivers::hw_init;
use terrarium::startup;

/// Optional JSON override baked in at build time, e.g.
/// `TERRARIUM_CONFIG='{"lux_threshold": 40.0}' cargo build`.
const CONFIG_OVERRIDE: Option<&str> = option_env!("TERRARIUM_CONFIG");

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Terrarium v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    // ── 3. Hardware ───────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let mut hw = hw_init::board(peripherals.i2c0, &config)?;
    let clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();
    let mut app = ControlService::new(&config);
    app.start(&mut hw, &mut sink);

    // ── 4. Sensor bring-up (retry, then halt) ─────────────────
    let mut delay = FreeRtos;
    if let Err(e) = startup::init_with_retry(
        config.sensor_init_attempts,
        config.sensor_init_backoff_ms,
        &mut delay,
        || hw.init_sensors(),
    ) {
        error!("{}", e);
        app.stop(&mut hw, &mut sink);
        startup::halt(&mut delay);
    }

    // ── 5. Control loop ───────────────────────────────────────
    info!(
        "Entering control loop ({} ms interval, telemetry every {} s)",
        config.control_loop_interval_ms, config.telemetry_interval_secs
    );
    loop {
        app.tick(&mut hw, &clock, &mut sink);
        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}

fn load_config() -> SystemConfig {
    match CONFIG_OVERRIDE {
        Some(doc) => match SystemConfig::from_json(doc) {
            Ok(cfg) => {
                info!("Config override applied");
                cfg
            }
            Err(e) => {
                warn!("Config override rejected ({}), using defaults", e);
                SystemConfig::default()
            }
        },
        None => SystemConfig::default(),
    }
}
