//! Mouse to gesture mapping
//!
//! Left drag pans, right drag rotates, and each burst of wheel scrolling is
//! one pinch. Positions are nannou window coordinates (y up); emitted deltas
//! are screen space (y down).

use std::time::{Duration, Instant};

use shared::{GestureEvent, PAN_MIN_DISTANCE};

/// Horizontal drag needed for a full radian of rotation
const PIXELS_PER_RADIAN: f32 = 200.0;
/// Scale factor per wheel line
const WHEEL_STEP: f32 = 1.1;
/// Wheel quiet time that ends a pinch
const WHEEL_IDLE: Duration = Duration::from_millis(250);
/// Pixel scroll deltas per wheel line
pub const PIXELS_PER_LINE: f32 = 50.0;

#[derive(Debug, Clone, Copy)]
struct Drag {
    origin: (f32, f32),
    started: bool,
}

#[derive(Debug, Clone, Copy)]
struct WheelPinch {
    ratio: f32,
    last: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
}

#[derive(Debug, Default)]
pub struct MouseGestures {
    pan: Option<Drag>,
    rotate: Option<Drag>,
    wheel: Option<WheelPinch>,
}

impl MouseGestures {
    pub fn pressed(&mut self, button: Button, x: f32, y: f32) -> Vec<GestureEvent> {
        let drag = Drag {
            origin: (x, y),
            started: false,
        };
        match button {
            Button::Left => self.pan = Some(drag),
            Button::Right => {
                self.rotate = Some(Drag {
                    started: true,
                    ..drag
                });
                return vec![GestureEvent::RotationStarted];
            }
        }
        Vec::new()
    }

    pub fn released(&mut self, button: Button) -> Vec<GestureEvent> {
        match button {
            Button::Left => match self.pan.take() {
                Some(Drag { started: true, .. }) => vec![GestureEvent::PanEnded],
                _ => Vec::new(),
            },
            Button::Right => match self.rotate.take() {
                Some(_) => vec![GestureEvent::RotationEnded],
                None => Vec::new(),
            },
        }
    }

    pub fn moved(&mut self, x: f32, y: f32) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if let Some(pan) = self.pan.as_mut() {
            let dx = x - pan.origin.0;
            let dy = -(y - pan.origin.1);
            if !pan.started && (dx * dx + dy * dy).sqrt() >= PAN_MIN_DISTANCE {
                pan.started = true;
                events.push(GestureEvent::PanStarted);
            }
            if pan.started {
                events.push(GestureEvent::PanUpdated { dx, dy });
            }
        }
        if let Some(rotate) = self.rotate.as_ref() {
            events.push(GestureEvent::RotationUpdated {
                delta: (x - rotate.origin.0) / PIXELS_PER_RADIAN,
            });
        }
        events
    }

    /// Scroll by `lines` (positive grows the clock)
    pub fn wheel(&mut self, lines: f32, now: Instant) -> Vec<GestureEvent> {
        if lines == 0.0 || !lines.is_finite() {
            return Vec::new();
        }
        let mut events = Vec::new();
        let session = self.wheel.get_or_insert_with(|| {
            events.push(GestureEvent::PinchStarted);
            WheelPinch { ratio: 1.0, last: now }
        });
        session.ratio *= WHEEL_STEP.powf(lines);
        session.last = now;
        events.push(GestureEvent::PinchUpdated {
            ratio: session.ratio,
        });
        events
    }

    /// End a wheel pinch once scrolling has gone quiet
    pub fn poll(&mut self, now: Instant) -> Vec<GestureEvent> {
        match self.wheel {
            Some(session) if now.saturating_duration_since(session.last) >= WHEEL_IDLE => {
                self.wheel = None;
                vec![GestureEvent::PinchEnded]
            }
            _ => Vec::new(),
        }
    }
}
