//! UI module - egui header button, settings panel and validation alert

use std::collections::VecDeque;

use nannou_egui::egui;
use shared::{ClockPreferences, SettingsDraft, ValidationNotice};

/// State for the settings panel
pub struct SettingsPanel {
    /// Whether the panel is currently open
    pub is_open: bool,
    /// Values being edited; committed only on save
    pub draft: SettingsDraft,
}

impl SettingsPanel {
    pub fn new(prefs: &ClockPreferences) -> Self {
        Self {
            is_open: false,
            draft: SettingsDraft::from(prefs),
        }
    }

    /// Open with the draft re-synced to the committed preferences
    pub fn open(&mut self, prefs: &ClockPreferences) {
        self.draft = SettingsDraft::from(prefs);
        self.is_open = true;
    }

    /// Close, discarding unsaved edits
    pub fn close(&mut self) {
        self.is_open = false;
    }
}

/// Result of settings panel interactions
#[derive(Debug, Default)]
pub struct PanelResult {
    /// The user pressed Save
    pub save: bool,
    /// The panel should close without saving
    pub close: bool,
}

/// Validation notices waiting to be acknowledged, shown one at a time
#[derive(Default)]
pub struct AlertQueue {
    pending: VecDeque<ValidationNotice>,
}

impl AlertQueue {
    pub fn push_all(&mut self, notices: impl IntoIterator<Item = ValidationNotice>) {
        self.pending.extend(notices);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn dismiss(&mut self) {
        self.pending.pop_front();
    }
}

/// Whether gestures and shortcuts on the clock face are suspended
///
/// An open panel or an unacknowledged alert owns all input.
pub fn canvas_input_blocked(panel: &SettingsPanel, alerts: &AlertQueue) -> bool {
    panel.is_open || !alerts.is_empty()
}

/// Draw the settings button in the top-right corner
pub fn draw_header(ctx: &egui::Context) -> bool {
    let mut clicked = false;

    egui::Area::new("header")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .show(ctx, |ui| {
            let button = egui::Button::new(
                egui::RichText::new("⚙")
                    .size(40.0)
                    .color(egui::Color32::from_gray(0x99)),
            )
            .frame(false);
            if ui.add(button).on_hover_text("Settings (S)").clicked() {
                clicked = true;
            }
        });

    clicked
}

/// Draw the settings panel
pub fn draw_settings_panel(ctx: &egui::Context, panel: &mut SettingsPanel) -> PanelResult {
    let mut result = PanelResult::default();

    if !panel.is_open {
        return result;
    }

    let draft = &mut panel.draft;
    let response = egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .default_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.strong("Background Color:");
            ui.add(egui::TextEdit::singleline(&mut draft.background_color).hint_text("#000"));

            ui.strong("Clock Color:");
            ui.add(egui::TextEdit::singleline(&mut draft.clock_color).hint_text("#fff"));

            ui.separator();
            ui.checkbox(&mut draft.use_12h_format, "Show 12H Format");
            ui.checkbox(&mut draft.show_seconds, "Show Seconds");
            ui.separator();

            ui.horizontal(|ui| {
                let save = egui::Button::new(
                    egui::RichText::new("Save").color(egui::Color32::BLACK),
                )
                .fill(egui::Color32::from_rgb(0x1e, 0xd7, 0x60));
                if ui.add(save).clicked() {
                    result.save = true;
                }
                if ui.button("Close").clicked() {
                    result.close = true;
                }
            });
        });

    // A press anywhere outside the panel dismisses it.
    if let Some(inner) = response {
        let panel_rect = inner.response.rect;
        let pressed_outside = ctx.input(|i| {
            i.pointer.any_pressed()
                && i
                    .pointer
                    .interact_pos()
                    .map_or(false, |pos| !panel_rect.contains(pos))
        });
        if pressed_outside {
            result.close = true;
        }
    }

    result
}

/// Draw the front alert, if any. Returns true when it was acknowledged.
pub fn draw_alert(ctx: &egui::Context, alerts: &AlertQueue) -> bool {
    let Some(notice) = alerts.pending.front() else {
        return false;
    };
    let mut acknowledged = false;

    // Dim and swallow input everywhere behind the alert.
    egui::Area::new("alert_overlay")
        .order(egui::Order::Background)
        .fixed_pos(egui::Pos2::ZERO)
        .show(ctx, |ui| {
            let screen = ctx.screen_rect();
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(128));
            ui.allocate_rect(screen, egui::Sense::click_and_drag());
        });

    egui::Window::new(notice.title())
        .id(egui::Id::new("validation_alert"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(notice.message());
            ui.separator();
            if ui.button("OK").clicked() {
                acknowledged = true;
            }
        });

    acknowledged
}
