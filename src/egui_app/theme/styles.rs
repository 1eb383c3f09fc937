//! Theme Styling Functions
//!
//! Helpers that apply the storefront palette consistently across views.

use eframe::egui::{self, CornerRadius, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals = egui::Visuals::dark();
    style.visuals.panel_fill = colors::BG_DARK;
    style.visuals.window_fill = colors::CARD_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::CARD_BORDER);
    style.visuals.extreme_bg_color = colors::INPUT_BG;

    style.visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors::SEPARATOR);
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);
    style.visuals.widgets.hovered.bg_fill = colors::SELECTED_TAB;
    style.visuals.widgets.active.bg_fill = colors::BUTTON_PRIMARY;

    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Frame for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Frame for the bottom tab bar
pub fn tab_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TAB_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 6))
}

/// Frame for the main content area
pub fn content_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::symmetric(16, 12))
}

/// Frame for list rows and detail cards
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(12, 10))
}
