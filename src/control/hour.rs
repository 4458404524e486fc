//! Hour-of-day resolution when the wall clock may be unavailable.

use log::debug;

use crate::config::HourFallback;

/// Turns the clock's `Option<u8>` into the hour the rules should use.
///
/// `None` from [`resolve`](Self::resolve) means "no usable hour": the
/// controller keeps the light off for that cycle.
#[derive(Debug, Clone)]
pub struct HourResolver {
    fallback: HourFallback,
    last_known: Option<u8>,
}

impl HourResolver {
    pub fn new(fallback: HourFallback) -> Self {
        Self {
            fallback,
            last_known: None,
        }
    }

    /// Resolve the clock report for this cycle. Out-of-range hours are
    /// treated the same as a missing report.
    pub fn resolve(&mut self, reported: Option<u8>) -> Option<u8> {
        match reported.filter(|h| *h < 24) {
            Some(hour) => {
                self.last_known = Some(hour);
                Some(hour)
            }
            None => {
                let fallback = match self.fallback {
                    HourFallback::LastKnownHour => self.last_known,
                    HourFallback::LightsOff => None,
                };
                debug!("Clock: no current hour, using {:?}", fallback);
                fallback
            }
        }
    }

    /// Last hour the clock actually reported.
    pub fn last_known(&self) -> Option<u8> {
        self.last_known
    }
}
