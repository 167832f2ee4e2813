//! Gesture-driven transform of the clock face
//!
//! Pan, pinch and rotation recognizers each own one axis of a 2D transform.
//! All three may be active at once; every update is "baseline captured at
//! gesture start + cumulative delta", clamped to the screen.

/// Smallest allowed scale factor
pub const MIN_SCALE: f32 = 0.5;

/// Screen dimensions in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub width: f32,
    pub height: f32,
}

impl ScreenBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.abs(),
            height: height.abs(),
        }
    }

    /// Logical bounds from a physical pixel size and its scale factor
    ///
    /// `None` for empty sizes or nonsensical scale factors.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Option<Self> {
        if width == 0 || height == 0 || !scale_factor.is_finite() || scale_factor <= 0.0 {
            return None;
        }
        Some(Self::new(
            (width as f64 / scale_factor) as f32,
            (height as f64 / scale_factor) as f32,
        ))
    }

    /// Upper scale bound. Never below `MIN_SCALE`, even for degenerate screens.
    pub fn max_scale(&self) -> f32 {
        self.width.min(self.height).max(MIN_SCALE)
    }
}

/// Composed transform applied to the clock face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Horizontal offset from center, screen pixels (right is positive)
    pub translation_x: f32,
    /// Vertical offset from center, screen pixels (down is positive)
    pub translation_y: f32,
    /// Uniform scale factor
    pub scale: f32,
    /// Rotation in radians, unbounded
    pub angle: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            translation_x: 0.0,
            translation_y: 0.0,
            scale: 1.0,
            angle: 0.0,
        }
    }
}

impl TransformState {
    fn clamped(self, bounds: ScreenBounds) -> Self {
        Self {
            translation_x: self.translation_x.clamp(-bounds.width, bounds.width),
            translation_y: self.translation_y.clamp(-bounds.height, bounds.height),
            scale: self.scale.clamp(MIN_SCALE, bounds.max_scale()),
            angle: self.angle,
        }
    }
}

/// Events delivered by the gesture recognition layer
///
/// Update payloads are cumulative since the matching `*Started` event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PanStarted,
    PanUpdated { dx: f32, dy: f32 },
    PanEnded,
    PinchStarted,
    PinchUpdated { ratio: f32 },
    PinchEnded,
    RotationStarted,
    RotationUpdated { delta: f32 },
    RotationEnded,
}

/// Transform state plus per-recognizer baselines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformController {
    bounds: ScreenBounds,
    state: TransformState,
    pan_origin: Option<(f32, f32)>,
    pinch_origin: Option<f32>,
    rotation_origin: Option<f32>,
}

impl TransformController {
    pub fn new(bounds: ScreenBounds) -> Self {
        Self {
            bounds,
            state: TransformState::default().clamped(bounds),
            pan_origin: None,
            pinch_origin: None,
            rotation_origin: None,
        }
    }

    pub fn state(&self) -> TransformState {
        self.state
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    /// Replace the screen bounds and re-clamp the current transform
    pub fn set_bounds(&mut self, bounds: ScreenBounds) {
        self.bounds = bounds;
        self.state = self.state.clamped(bounds);
    }

    /// Pure reducer: `(controller, event) -> controller`
    pub fn reduce(mut self, event: GestureEvent) -> Self {
        self.apply(event);
        self
    }

    /// Apply one gesture event in place
    pub fn apply(&mut self, event: GestureEvent) {
        let bounds = self.bounds;
        match event {
            GestureEvent::PanStarted => {
                self.pan_origin = Some((self.state.translation_x, self.state.translation_y));
            }
            GestureEvent::PanUpdated { dx, dy } => {
                if !dx.is_finite() || !dy.is_finite() {
                    return;
                }
                let (x0, y0) = *self
                    .pan_origin
                    .get_or_insert((self.state.translation_x, self.state.translation_y));
                self.state.translation_x = (x0 + dx).clamp(-bounds.width, bounds.width);
                self.state.translation_y = (y0 + dy).clamp(-bounds.height, bounds.height);
            }
            GestureEvent::PanEnded => self.pan_origin = None,
            GestureEvent::PinchStarted => {
                self.pinch_origin = Some(self.state.scale);
            }
            GestureEvent::PinchUpdated { ratio } => {
                if !ratio.is_finite() || ratio < 0.0 {
                    return;
                }
                let base = *self.pinch_origin.get_or_insert(self.state.scale);
                self.state.scale = (base * ratio).clamp(MIN_SCALE, bounds.max_scale());
            }
            GestureEvent::PinchEnded => self.pinch_origin = None,
            GestureEvent::RotationStarted => {
                self.rotation_origin = Some(self.state.angle);
            }
            GestureEvent::RotationUpdated { delta } => {
                if !delta.is_finite() {
                    return;
                }
                let base = *self.rotation_origin.get_or_insert(self.state.angle);
                self.state.angle = base + delta;
            }
            GestureEvent::RotationEnded => self.rotation_origin = None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn phone() -> TransformController {
        TransformController::new(ScreenBounds::new(400.0, 800.0))
    }

    fn run(mut c: TransformController, events: &[GestureEvent]) -> TransformController {
        for &e in events {
            c = c.reduce(e);
        }
        c
    }

    #[test]
    fn test_pan_accumulates_across_sessions() {
        let c = run(
            phone(),
            &[
                GestureEvent::PanStarted,
                GestureEvent::PanUpdated { dx: 10.0, dy: 5.0 },
                GestureEvent::PanUpdated { dx: 30.0, dy: -20.0 },
                GestureEvent::PanEnded,
                GestureEvent::PanStarted,
                GestureEvent::PanUpdated { dx: 5.0, dy: 5.0 },
                GestureEvent::PanEnded,
            ],
        );
        assert_eq!(c.state().translation_x, 35.0);
        assert_eq!(c.state().translation_y, -15.0);
    }

    #[test]
    fn test_pan_clamps_each_axis() {
        let mut c = phone();
        let deltas = [
            (1000.0, 1000.0),
            (-5000.0, 20.0),
            (399.0, -3000.0),
            (f32::MAX, f32::MIN),
        ];
        for (dx, dy) in deltas {
            c.apply(GestureEvent::PanStarted);
            c.apply(GestureEvent::PanUpdated { dx, dy });
            c.apply(GestureEvent::PanEnded);
            let s = c.state();
            assert!(s.translation_x.abs() <= 400.0);
            assert!(s.translation_y.abs() <= 800.0);
        }
        assert_eq!(c.state().translation_x, 400.0);
        assert_eq!(c.state().translation_y, -800.0);
    }

    #[test]
    fn test_pinch_multiplies_baseline_not_previous_update() {
        let c = run(
            phone(),
            &[
                GestureEvent::PinchStarted,
                GestureEvent::PinchUpdated { ratio: 3.0 },
                GestureEvent::PinchUpdated { ratio: 2.0 },
                GestureEvent::PinchEnded,
                GestureEvent::PinchStarted,
                GestureEvent::PinchUpdated { ratio: 1.5 },
            ],
        );
        assert_eq!(c.state().scale, 3.0);
    }

    #[test]
    fn test_pinch_clamps_scale() {
        let mut c = phone();
        for ratio in [0.0, 0.01, 10.0, 1e6, 0.2, 7.0] {
            c.apply(GestureEvent::PinchStarted);
            c.apply(GestureEvent::PinchUpdated { ratio });
            c.apply(GestureEvent::PinchEnded);
            let scale = c.state().scale;
            assert!((MIN_SCALE..=400.0).contains(&scale), "scale {scale}");
        }
    }

    #[test]
    fn test_pinch_ignores_bad_ratio() {
        let c = run(
            phone(),
            &[
                GestureEvent::PinchStarted,
                GestureEvent::PinchUpdated { ratio: f32::NAN },
                GestureEvent::PinchUpdated { ratio: -2.0 },
            ],
        );
        assert_eq!(c.state().scale, 1.0);
    }

    #[test]
    fn test_rotation_is_unbounded() {
        let mut c = phone();
        for _ in 0..10 {
            c.apply(GestureEvent::RotationStarted);
            c.apply(GestureEvent::RotationUpdated { delta: PI });
            c.apply(GestureEvent::RotationEnded);
        }
        assert!((c.state().angle - 10.0 * PI).abs() < 1e-3);
    }

    #[test]
    fn test_simultaneous_recognizers_keep_own_baselines() {
        let c = run(
            phone(),
            &[
                GestureEvent::PinchStarted,
                GestureEvent::RotationStarted,
                GestureEvent::PanStarted,
                GestureEvent::PinchUpdated { ratio: 2.0 },
                GestureEvent::RotationUpdated { delta: 0.5 },
                GestureEvent::PanUpdated { dx: -12.0, dy: 4.0 },
                GestureEvent::PinchUpdated { ratio: 2.5 },
                GestureEvent::RotationUpdated { delta: 0.25 },
            ],
        );
        let s = c.state();
        assert_eq!(s.scale, 2.5);
        assert_eq!(s.angle, 0.25);
        assert_eq!((s.translation_x, s.translation_y), (-12.0, 4.0));
    }

    #[test]
    fn test_update_without_start_uses_current_value() {
        let c = run(
            phone(),
            &[
                GestureEvent::PinchStarted,
                GestureEvent::PinchUpdated { ratio: 2.0 },
                GestureEvent::PinchEnded,
                GestureEvent::PinchUpdated { ratio: 2.0 },
            ],
        );
        assert_eq!(c.state().scale, 4.0);
    }

    #[test]
    fn test_shrinking_bounds_reclamps() {
        let mut c = run(
            phone(),
            &[
                GestureEvent::PanStarted,
                GestureEvent::PanUpdated { dx: 390.0, dy: 700.0 },
                GestureEvent::PinchStarted,
                GestureEvent::PinchUpdated { ratio: 300.0 },
            ],
        );
        c.set_bounds(ScreenBounds::new(100.0, 200.0));
        let s = c.state();
        assert_eq!(s.translation_x, 100.0);
        assert_eq!(s.translation_y, 200.0);
        assert_eq!(s.scale, 100.0);
    }

    #[test]
    fn test_bounds_from_physical_monitor_size() {
        let bounds = ScreenBounds::from_physical(2560, 1440, 2.0).unwrap();
        assert_eq!(bounds, ScreenBounds::new(1280.0, 720.0));
        assert_eq!(bounds.max_scale(), 720.0);

        assert!(ScreenBounds::from_physical(0, 1440, 1.0).is_none());
        assert!(ScreenBounds::from_physical(1920, 1080, 0.0).is_none());
        assert!(ScreenBounds::from_physical(1920, 1080, f64::NAN).is_none());
    }

    #[test]
    fn test_degenerate_screen_keeps_min_scale() {
        let c = TransformController::new(ScreenBounds::new(0.2, 0.1));
        assert_eq!(c.state().scale, MIN_SCALE);
        let c = c.reduce(GestureEvent::PinchUpdated { ratio: 10.0 });
        assert_eq!(c.state().scale, MIN_SCALE);
    }
}
