//! Raw touch points to gesture events
//!
//! One finger pans. Two fingers pan (by their midpoint), pinch (by their
//! distance ratio) and rotate (by the angle of the line between them), all at
//! once. Whenever the finger set changes the running gestures end and new
//! ones start, so baselines are re-captured and the transform stays
//! continuous.

use std::collections::BTreeMap;
use std::f32::consts::{PI, TAU};

use crate::transform::GestureEvent;

/// Movement a single finger must make before a pan begins, in pixels
pub const PAN_MIN_DISTANCE: f32 = 1.0;

/// Below this finger spacing the pinch ratio is too noisy to use
const MIN_PINCH_SPAN: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
enum Session {
    Single {
        id: u64,
        origin: (f32, f32),
        panning: bool,
    },
    Double {
        ids: (u64, u64),
        origin_mid: (f32, f32),
        origin_span: f32,
        last_angle: f32,
        rotation: f32,
    },
}

/// Tracks active touch points and the gestures they drive
#[derive(Debug, Default)]
pub struct TouchTracker {
    points: BTreeMap<u64, (f32, f32)>,
    session: Option<Session>,
}

fn midpoint(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

fn span(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

fn heading(a: (f32, f32), b: (f32, f32)) -> f32 {
    (b.1 - a.1).atan2(b.0 - a.0)
}

/// Wrap an angle difference into (-PI, PI]
fn wrap(delta: f32) -> f32 {
    let mut d = delta % TAU;
    if d > PI {
        d -= TAU;
    } else if d <= -PI {
        d += TAU;
    }
    d
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingers currently down
    pub fn active_touches(&self) -> usize {
        self.points.len()
    }

    /// Feed one touch event, returning the gesture events it produces
    pub fn touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        match phase {
            TouchPhase::Started => {
                self.end_session(&mut events);
                self.points.insert(id, (x, y));
                self.begin_session(&mut events);
            }
            TouchPhase::Moved => {
                if let Some(point) = self.points.get_mut(&id) {
                    *point = (x, y);
                    self.update_session(&mut events);
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.points.remove(&id).is_some() {
                    self.end_session(&mut events);
                    self.begin_session(&mut events);
                }
            }
        }
        events
    }

    /// Drop all fingers, ending any running gestures
    pub fn reset(&mut self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.end_session(&mut events);
        self.points.clear();
        events
    }

    fn begin_session(&mut self, events: &mut Vec<GestureEvent>) {
        let mut fingers = self.points.iter().map(|(&id, &p)| (id, p));
        self.session = match (fingers.next(), fingers.next()) {
            (None, _) => None,
            (Some((id, origin)), None) => Some(Session::Single {
                id,
                origin,
                panning: false,
            }),
            (Some((id_a, a)), Some((id_b, b))) => {
                events.push(GestureEvent::PanStarted);
                events.push(GestureEvent::PinchStarted);
                events.push(GestureEvent::RotationStarted);
                Some(Session::Double {
                    ids: (id_a, id_b),
                    origin_mid: midpoint(a, b),
                    origin_span: span(a, b),
                    last_angle: heading(a, b),
                    rotation: 0.0,
                })
            }
        };
    }

    fn update_session(&mut self, events: &mut Vec<GestureEvent>) {
        let points = &self.points;
        match self.session.as_mut() {
            None => {}
            Some(Session::Single { id, origin, panning }) => {
                let Some(&(x, y)) = points.get(&*id) else {
                    return;
                };
                let (dx, dy) = (x - origin.0, y - origin.1);
                if !*panning {
                    if (dx * dx + dy * dy).sqrt() < PAN_MIN_DISTANCE {
                        return;
                    }
                    *panning = true;
                    events.push(GestureEvent::PanStarted);
                }
                events.push(GestureEvent::PanUpdated { dx, dy });
            }
            Some(Session::Double {
                ids,
                origin_mid,
                origin_span,
                last_angle,
                rotation,
            }) => {
                let (Some(&a), Some(&b)) = (points.get(&ids.0), points.get(&ids.1)) else {
                    return;
                };
                let mid = midpoint(a, b);
                events.push(GestureEvent::PanUpdated {
                    dx: mid.0 - origin_mid.0,
                    dy: mid.1 - origin_mid.1,
                });
                if *origin_span >= MIN_PINCH_SPAN {
                    events.push(GestureEvent::PinchUpdated {
                        ratio: span(a, b) / *origin_span,
                    });
                }
                let angle = heading(a, b);
                *rotation += wrap(angle - *last_angle);
                *last_angle = angle;
                events.push(GestureEvent::RotationUpdated { delta: *rotation });
            }
        }
    }

    fn end_session(&mut self, events: &mut Vec<GestureEvent>) {
        match self.session.take() {
            Some(Session::Single { panning: true, .. }) => events.push(GestureEvent::PanEnded),
            Some(Session::Double { .. }) => {
                events.push(GestureEvent::PanEnded);
                events.push(GestureEvent::PinchEnded);
                events.push(GestureEvent::RotationEnded);
            }
            _ => {}
        }
    }
}
