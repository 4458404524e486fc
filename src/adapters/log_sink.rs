//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Telemetry is logged as a single JSON line so it can be scraped off the
//! serial console.

use log::{error, info, warn};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => info!("TELEM | {}", telemetry_line(t)),
            AppEvent::OutputsChanged { from, to } => {
                info!(
                    "OUTPUT | light {} -> {} | motors {} -> {}",
                    on_off(from.light_on),
                    on_off(to.light_on),
                    on_off(from.motors_on),
                    on_off(to.motors_on),
                );
            }
            AppEvent::SensorReadFailed(e) => error!("SENSOR | read failed: {}", e),
            AppEvent::ClockLost { fallback_hour } => match fallback_hour {
                Some(h) => warn!("CLOCK | lost, using last known hour {}", h),
                None => warn!("CLOCK | lost, light held off"),
            },
            AppEvent::ClockRestored { hour } => info!("CLOCK | restored, hour={}", hour),
            AppEvent::Started => info!("START | outputs off"),
            AppEvent::Stopped => info!("STOP | outputs off"),
        }
    }
}

/// Render telemetry as JSON, falling back to the `Debug` form.
pub fn telemetry_line(t: &TelemetryData) -> String {
    serde_json::to_string(t).unwrap_or_else(|_| format!("{:?}", t))
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
