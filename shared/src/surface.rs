//! Display surface state
//!
//! Everything the clock window shows, without the window: the preferences in
//! effect, the gesture transform, the refresh ticker and the current text.

use std::time::Instant;

use chrono::Timelike;
use log::debug;

use crate::preferences::ClockPreferences;
use crate::ticker::{RefreshTicker, REFRESH_INTERVAL};
use crate::time_format::format_time;
use crate::transform::{GestureEvent, ScreenBounds, TransformController, TransformState};

/// Font size of the readout, before the gesture scale
pub const CLOCK_FONT_SIZE: u32 = 30;
/// Size of the box the readout is laid out in
pub const CLOCK_BOX_WIDTH: f32 = 180.0;
pub const CLOCK_BOX_HEIGHT: f32 = 60.0;

/// The clock face and its live state
#[derive(Debug)]
pub struct ClockSurface {
    preferences: ClockPreferences,
    transform: TransformController,
    ticker: Option<RefreshTicker>,
    text: String,
}

impl ClockSurface {
    pub fn new(preferences: ClockPreferences, bounds: ScreenBounds) -> Self {
        Self {
            preferences,
            transform: TransformController::new(bounds),
            ticker: None,
            text: String::new(),
        }
    }

    pub fn preferences(&self) -> &ClockPreferences {
        &self.preferences
    }

    pub fn transform(&self) -> TransformState {
        self.transform.state()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_mounted(&self) -> bool {
        self.ticker.as_ref().is_some_and(RefreshTicker::is_active)
    }

    /// Start refreshing
    pub fn mount(&mut self, now: Instant) {
        self.ticker = Some(RefreshTicker::start(now, REFRESH_INTERVAL));
        debug!("Clock surface mounted");
    }

    /// Stop refreshing
    pub fn unmount(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
            debug!("Clock surface unmounted");
        }
    }

    /// Poll the ticker and re-format the readout when due
    ///
    /// Returns true if the displayed text changed.
    pub fn tick<T: Timelike>(&mut self, now: Instant, wall_time: &T) -> bool {
        let due = match self.ticker.as_mut() {
            Some(ticker) => ticker.poll(now),
            None => false,
        };
        if !due {
            return false;
        }

        let text = format_time(
            wall_time,
            self.preferences.show_seconds,
            self.preferences.use_12h_format,
        );
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }

    /// Replace the preferences in effect
    ///
    /// A change to the time format restarts the ticker so the next tick
    /// re-formats right away.
    pub fn apply_preferences(&mut self, preferences: ClockPreferences, now: Instant) {
        let format_changed = preferences.show_seconds != self.preferences.show_seconds
            || preferences.use_12h_format != self.preferences.use_12h_format;
        self.preferences = preferences;
        if format_changed && self.ticker.is_some() {
            self.unmount();
            self.mount(now);
        }
    }

    pub fn handle_gesture(&mut self, event: GestureEvent) {
        self.transform.apply(event);
    }

    pub fn set_bounds(&mut self, bounds: ScreenBounds) {
        if bounds != self.transform.bounds() {
            self.transform.set_bounds(bounds);
        }
    }
}
