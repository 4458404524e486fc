//! Boot-time helpers: bounded retry for sensor bring-up and the terminal
//! halt used when the hardware never comes up.

use core::fmt::Display;

use embedded_hal::delay::DelayNs;
use log::{error, warn};

/// Delay between halt-loop iterations.
const HALT_TICK_MS: u32 = 1000;

/// Run `init` up to `attempts` times, sleeping `backoff_ms` between tries.
///
/// Returns the last error if every attempt failed. `attempts` of zero is
/// treated as one.
pub fn init_with_retry<E, D, F>(
    attempts: u8,
    backoff_ms: u32,
    delay: &mut D,
    mut init: F,
) -> Result<(), E>
where
    E: Display,
    D: DelayNs,
    F: FnMut() -> Result<(), E>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match init() {
            Ok(()) => return Ok(()),
            Err(e) if attempt < attempts => {
                warn!("Init attempt {}/{} failed: {}, retrying in {} ms", attempt, attempts, e, backoff_ms);
                delay.delay_ms(backoff_ms);
                attempt += 1;
            }
            Err(e) => {
                error!("Init failed after {} attempt(s): {}", attempts, e);
                return Err(e);
            }
        }
    }
}

/// Park the firmware forever. Outputs must already be off.
pub fn halt<D: DelayNs>(delay: &mut D) -> ! {
    error!("Halted: sensors unavailable, power-cycle after checking wiring");
    loop {
        delay.delay_ms(HALT_TICK_MS);
    }
}
