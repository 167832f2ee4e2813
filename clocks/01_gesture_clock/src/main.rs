//! Gesture Clock
//!
//! A full-screen time readout. Drag, pinch and twist the clock face to place
//! it; colors and time format live in the settings panel.

mod drawing;
mod input;
mod ui;

use std::time::Instant;

use chrono::Local;
use log::{info, warn};
use nannou::prelude::*;
use nannou::winit::event::{TouchPhase as WinitTouchPhase, WindowEvent};
use nannou_egui::{self, Egui};
use shared::{
    ClockPreferences, ClockSurface, FileStore, GestureEvent, MemoryStore, ScreenBounds,
    SettingsStore, TouchTracker,
};

use crate::drawing::{colors, draw_clock_face, hex_to_srgb};
use crate::input::{Button, MouseGestures, PIXELS_PER_LINE};
use crate::ui::{
    canvas_input_blocked, draw_alert, draw_header, draw_settings_panel, AlertQueue, SettingsPanel,
};

const CLOCK_NAME: &str = "gesture_clock";

fn main() {
    shared::logging::init();
    nannou::app(model).update(update).exit(exit).run();
}

/// Application state
struct Model {
    /// Clock face: preferences, transform, refresh ticker, text
    surface: ClockSurface,
    /// Where preferences are persisted
    store: Box<dyn SettingsStore>,
    /// Settings panel state
    panel: SettingsPanel,
    /// Validation notices waiting to be acknowledged
    alerts: AlertQueue,
    /// Mouse input mapped to gestures
    mouse: MouseGestures,
    /// Touch input mapped to gestures
    touches: TouchTracker,
    /// Whether egui claimed the pointer last frame
    ui_wants_pointer: bool,
    /// Whether egui claimed the keyboard last frame
    ui_wants_keyboard: bool,
    /// Holds the display awake while the clock is shown
    keep_awake: Option<keepawake::KeepAwake>,
    /// egui integration
    egui: Egui,
}

impl Model {
    fn apply_gestures(&mut self, events: Vec<GestureEvent>) {
        for event in events {
            self.surface.handle_gesture(event);
        }
    }

    fn input_blocked(&self) -> bool {
        self.ui_wants_pointer || canvas_input_blocked(&self.panel, &self.alerts)
    }

    fn open_settings(&mut self) {
        self.panel.open(self.surface.preferences());
    }

    fn save_settings(&mut self) {
        let outcome = ClockPreferences::save(self.store.as_mut(), &self.panel.draft);
        if !outcome.notices.is_empty() {
            warn!("Rejected settings: {:?}", outcome.notices);
        }
        self.alerts.push_all(outcome.notices);
        self.surface
            .apply_preferences(outcome.preferences, Instant::now());
        self.panel.close();
    }
}

fn open_store() -> Box<dyn SettingsStore> {
    match FileStore::for_clock(CLOCK_NAME) {
        Ok(store) => {
            info!("Using settings file {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            warn!("Settings will not persist: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Ask the OS to keep the display on. Best-effort: failure only loses the
/// screen-saver inhibit.
fn keep_display_awake() -> Option<keepawake::KeepAwake> {
    match keepawake::Builder::default()
        .display(true)
        .reason("Clock display")
        .app_name("Gesture Clock")
        .app_reverse_domain("com.clock-series.gesture-clock")
        .create()
    {
        Ok(guard) => {
            info!("Display will stay awake while the clock is shown");
            Some(guard)
        }
        Err(e) => {
            warn!("Could not keep the display awake: {}", e);
            None
        }
    }
}

/// Logical size of the monitor showing the clock, else the window size
fn screen_bounds(app: &App) -> ScreenBounds {
    let window = app.main_window();
    window
        .winit_window()
        .current_monitor()
        .and_then(|monitor| {
            let size = monitor.size();
            ScreenBounds::from_physical(size.width, size.height, monitor.scale_factor())
        })
        .unwrap_or_else(|| {
            let rect = window.rect();
            ScreenBounds::new(rect.w(), rect.h())
        })
}

fn model(app: &App) -> Model {
    // Create window
    let window_id = app
        .new_window()
        .title("Gesture Clock")
        .fullscreen()
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .mouse_wheel(mouse_wheel)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // Load preferences
    let store = open_store();
    let preferences = ClockPreferences::load(store.as_ref());
    info!("Loaded preferences: {:?}", preferences);

    let mut surface = ClockSurface::new(preferences, screen_bounds(app));
    surface.mount(Instant::now());

    Model {
        panel: SettingsPanel::new(surface.preferences()),
        surface,
        store,
        alerts: AlertQueue::default(),
        mouse: MouseGestures::default(),
        touches: TouchTracker::new(),
        ui_wants_pointer: false,
        ui_wants_keyboard: false,
        keep_awake: keep_display_awake(),
        egui,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    let now = Instant::now();

    model.surface.set_bounds(screen_bounds(app));
    model.surface.tick(now, &Local::now());
    let ended = model.mouse.poll(now);
    model.apply_gestures(ended);

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    // The header stays hidden while an alert is up.
    let settings_clicked = model.alerts.is_empty() && draw_header(&ctx);
    if settings_clicked {
        // The frame context still borrows the egui field, so go field by field.
        model.panel.open(model.surface.preferences());
    }

    let panel_result = draw_settings_panel(&ctx, &mut model.panel);
    let alert_acknowledged = draw_alert(&ctx, &model.alerts);

    model.ui_wants_pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
    model.ui_wants_keyboard = ctx.wants_keyboard_input();

    // Apply UI results after the egui frame is done
    drop(ctx);

    if panel_result.save {
        model.save_settings();
    } else if panel_result.close {
        model.panel.close();
    }
    if alert_acknowledged {
        model.alerts.dismiss();
    }
}

fn exit(_app: &App, mut model: Model) {
    model.surface.unmount();
    // Releases the display inhibit.
    drop(model.keep_awake.take());
    info!("Gesture clock closed");
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let prefs = model.surface.preferences();

    draw.background()
        .color(hex_to_srgb(&prefs.background_color, colors::BACKGROUND_FALLBACK));

    draw_clock_face(
        &draw,
        model.surface.text(),
        &model.surface.transform(),
        hex_to_srgb(&prefs.clock_color, colors::CLOCK_FALLBACK),
    );

    // Render to frame
    draw.to_frame(app, &frame).unwrap();

    // Render egui on top
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // Escape acknowledges the alert first, then closes the panel
        Key::Escape => {
            if !model.alerts.is_empty() {
                model.alerts.dismiss();
            } else if model.panel.is_open {
                model.panel.close();
            }
        }
        Key::S
            if !model.ui_wants_keyboard && !canvas_input_blocked(&model.panel, &model.alerts) =>
        {
            model.open_settings();
        }
        _ => {}
    }
}

fn mouse_button(button: MouseButton) -> Option<Button> {
    match button {
        MouseButton::Left => Some(Button::Left),
        MouseButton::Right => Some(Button::Right),
        _ => None,
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if model.input_blocked() {
        return;
    }
    if let Some(button) = mouse_button(button) {
        let pos = app.mouse.position();
        let events = model.mouse.pressed(button, pos.x, pos.y);
        model.apply_gestures(events);
    }
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if let Some(button) = mouse_button(button) {
        let events = model.mouse.released(button);
        model.apply_gestures(events);
    }
}

fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let events = model.mouse.moved(pos.x, pos.y);
    model.apply_gestures(events);
}

fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    if model.input_blocked() {
        return;
    }
    let lines = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
    };
    let events = model.mouse.wheel(lines, Instant::now());
    model.apply_gestures(events);
}

fn raw_window_event(app: &App, model: &mut Model, event: &WindowEvent) {
    // Let egui handle raw events for keyboard and mouse input
    model.egui.handle_raw_event(event);

    match event {
        WindowEvent::Touch(touch) => {
            let phase = match touch.phase {
                WinitTouchPhase::Started => shared::TouchPhase::Started,
                WinitTouchPhase::Moved => shared::TouchPhase::Moved,
                WinitTouchPhase::Ended => shared::TouchPhase::Ended,
                WinitTouchPhase::Cancelled => shared::TouchPhase::Cancelled,
            };
            if phase == shared::TouchPhase::Started && model.input_blocked() {
                return;
            }
            // Physical pixels to logical, keeping the top-left origin.
            let scale_factor = app.main_window().scale_factor();
            let x = touch.location.x as f32 / scale_factor;
            let y = touch.location.y as f32 / scale_factor;
            let events = model.touches.touch(touch.id, phase, x, y);
            model.apply_gestures(events);
        }
        WindowEvent::Focused(false) => {
            let events = model.touches.reset();
            model.apply_gestures(events);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_awake_is_best_effort() {
        // Headless machines have no session bus; either way nothing panics
        // and the guard releases cleanly.
        let guard = keep_display_awake();
        drop(guard);
    }
}
