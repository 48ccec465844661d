//! Theme Module
//!
//! Color constants and frame builders for the vote board.

pub mod colors;

use eframe::egui::{self, CornerRadius, Stroke};

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.panel_fill = colors::BOARD_BG;
    style.visuals.window_fill = colors::CARD_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::CARD_BORDER);
    style.visuals.override_text_color = Some(colors::TEXT_DARK);
    ctx.set_style(style);
}

/// Frame around one topic's items
pub fn topic_card_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(egui::Margin::same(10))
}
