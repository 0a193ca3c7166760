//! Minimum-interval filter for the pushbutton.

use embassy_time::{Duration, Instant};

use crate::constants::DEBOUNCE_MS;

/// Accepts an event only if strictly more than `window` has passed since
/// the last accepted one.
///
/// The reference point starts at tick zero, so presses inside the first
/// window after boot are dropped as power-on noise.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Instant,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl Debouncer {
    /// Filter with the given minimum interval between accepted events.
    ///
    /// # Arguments
    /// * `window` — Events at most this long after the last accepted one
    ///   are dropped
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: Instant::from_ticks(0),
        }
    }

    /// Returns `true` and records `now` if the event passes the filter.
    ///
    /// A timestamp earlier than the last accepted one (clock wrap, bad
    /// caller) counts as zero elapsed time and is rejected.
    pub fn accept(&mut self, now: Instant) -> bool {
        let elapsed = now
            .checked_duration_since(self.last_accepted)
            .unwrap_or(Duration::from_ticks(0));
        if elapsed > self.window {
            self.last_accepted = now;
            true
        } else {
            false
        }
    }

    /// Minimum interval between accepted events.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time of the last accepted event, tick zero if none yet.
    pub fn last_accepted(&self) -> Instant {
        self.last_accepted
    }
}
