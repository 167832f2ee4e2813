//! Refresh ticker for the time readout
//!
//! A poll-driven repeating timer. The owner holds the handle for as long as
//! refreshes should happen; dropping or stopping it cancels the timer.

use std::time::{Duration, Instant};

/// How often the displayed time is recomputed
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(500);

/// Handle to an active repeating timer
#[derive(Debug)]
pub struct RefreshTicker {
    interval: Duration,
    /// Earliest instant the next poll may fire
    due_at: Instant,
    active: bool,
}

impl RefreshTicker {
    /// Start a timer; the first poll at or after `now` fires
    pub fn start(now: Instant, interval: Duration) -> Self {
        Self {
            interval,
            due_at: now,
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cancel the timer. A stopped ticker never fires again.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Returns true when the callback is due
    ///
    /// Several missed intervals collapse into a single fire.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.active || now < self.due_at {
            return false;
        }
        self.due_at = now + self.interval;
        true
    }
}
