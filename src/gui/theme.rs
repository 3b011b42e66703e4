//! Custom theme for Meme Studio
//!
//! Light theme with pastel accents.

use eframe::egui::{self, Color32, Rounding, Visuals};

/// Meme Studio light color palette
pub mod colors {
    use super::Color32;

    pub const WINDOW_BG: Color32 = Color32::from_rgb(204, 235, 255); // #ccebff
    pub const PANEL_BG: Color32 = Color32::from_rgb(227, 242, 255); // #e3f2ff
    pub const HEADER: Color32 = Color32::from_rgb(255, 204, 219); // #ffccdb
    pub const HEADER_HOVER: Color32 = Color32::from_rgb(204, 255, 204); // #ccffcc
    pub const BUTTON: Color32 = Color32::from_rgb(135, 207, 250); // #87cffa
    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(140, 217, 252); // #8cd9fc
    pub const ERROR: Color32 = Color32::from_rgb(200, 40, 40);
    pub const TEXT_DIM: Color32 = Color32::from_rgb(90, 90, 110);
}

const WIDGET_ROUNDING: f32 = 5.0;

/// Install the light palette and rounded widgets
pub fn apply(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.window_fill = colors::WINDOW_BG;
    visuals.panel_fill = colors::PANEL_BG;
    visuals.faint_bg_color = colors::HEADER;
    visuals.selection.bg_fill = colors::HEADER;

    visuals.widgets.inactive.weak_bg_fill = colors::BUTTON;
    visuals.widgets.inactive.bg_fill = colors::BUTTON;
    visuals.widgets.hovered.weak_bg_fill = colors::BUTTON_HOVER;
    visuals.widgets.hovered.bg_fill = colors::HEADER_HOVER;

    let rounding = Rounding::same(WIDGET_ROUNDING);
    visuals.widgets.noninteractive.rounding = rounding;
    visuals.widgets.inactive.rounding = rounding;
    visuals.widgets.hovered.rounding = rounding;
    visuals.widgets.active.rounding = rounding;
    visuals.widgets.open.rounding = rounding;

    ctx.set_visuals(visuals);
}
