//! ESP32 wall-clock adapter.
//!
//! Provides the local hour-of-day for the daylight window.
//!
//! - **`target_os = "espidf"`**: reads the system time with
//!   `gettimeofday()` and converts it with `localtime_r()`, so the board's
//!   `TZ` setting applies. Times before 2020 are treated as "never set".
//! - **`not(target_os = "espidf")`**: uses `std::time::SystemTime` (UTC)
//!   for host-side simulation.

use crate::app::ports::ClockPort;

/// Reject obviously unsynced time (e.g. before 2020-01-01).
const EPOCH_2020: i64 = 1_577_836_800;

/// Clock adapter for the ESP32-S3 platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct Esp32Clock;

impl Esp32Clock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockPort for Esp32Clock {
    #[cfg(target_os = "espidf")]
    fn current_hour(&self) -> Option<u8> {
        use core::ptr;
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, ptr::null_mut()) } != 0 {
            return None;
        }
        if i64::from(tv.tv_sec) < EPOCH_2020 {
            return None;
        }
        let secs = tv.tv_sec as esp_idf_svc::sys::time_t;
        let mut tm: esp_idf_svc::sys::tm = unsafe { core::mem::zeroed() };
        if unsafe { esp_idf_svc::sys::localtime_r(&secs, &mut tm) }.is_null() {
            return None;
        }
        u8::try_from(tm.tm_hour).ok().filter(|h| *h < 24)
    }

    #[cfg(not(target_os = "espidf"))]
    fn current_hour(&self) -> Option<u8> {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .ok()?
            .as_secs();
        hour_of_day(i64::try_from(secs).ok()?)
    }
}

/// UTC hour for a Unix timestamp, `None` if the timestamp predates 2020.
#[cfg_attr(target_os = "espidf", allow(dead_code))]
fn hour_of_day(unix_secs: i64) -> Option<u8> {
    if unix_secs < EPOCH_2020 {
        return None;
    }
    u8::try_from(unix_secs.rem_euclid(86_400) / 3_600).ok()
}
