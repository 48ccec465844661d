use eframe::egui;

use crate::egui_app::commands::Command;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

pub mod forms;
pub mod topic_panel;

/// Something a view asked for while rendering
///
/// Views only read the state; actions are applied after the frame's UI is
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    Command(Command),
    DeleteTopic(String),
}

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let frame_style = egui::Frame::default()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8));

    egui::TopBottomPanel::top("top_panel")
        .frame(frame_style)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Topic Vote").size(18.0).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let publishing = state.client.is_publishing();
                    let pending = state.client.unpublished_len();

                    let publish = egui::Button::new(if publishing { "Publishing..." } else { "Publish" });
                    if ui.add_enabled(!publishing && pending > 0, publish).clicked() {
                        state.request_publish();
                    }
                    if ui.add_enabled(!state.is_busy(), egui::Button::new("Reload")).clicked() {
                        state.request_reload();
                    }

                    ui.add_space(16.0);
                    if pending > 0 {
                        ui.colored_label(colors::WARNING, format!("{} unpublished", pending));
                    } else {
                        ui.colored_label(colors::SUCCESS, "Up to date");
                    }
                });
            });
        });
}

pub fn render_status_bar(ctx: &egui::Context, state: &AppState) {
    egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            match &state.status {
                Some(status) => {
                    let color = if status.is_error { colors::ERROR } else { colors::TEXT_DARK };
                    ui.colored_label(color, &status.text);
                    ui.colored_label(colors::TEXT_MUTED, status.at.format("%H:%M:%S").to_string());
                }
                None => {
                    ui.label("Ready");
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = match state.client.last_published() {
                    Some(at) => format!(
                        "Last published {}",
                        at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
                    ),
                    None => "Not published this session".to_string(),
                };
                ui.colored_label(colors::TEXT_MUTED, label);
            });
        });
    });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let mut actions = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        forms::render_add_item(ui, state);
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for topic in state.client.display_topics() {
                topic_panel::render(ui, &state.client, &topic, &mut state.move_targets, &mut actions);
                ui.add_space(8.0);
            }
        });

        ui.separator();
        forms::render_add_topic(ui, state);
    });

    for action in actions {
        match action {
            ViewAction::Command(command) => state.run_command(command),
            ViewAction::DeleteTopic(topic) => state.request_delete_topic(&topic),
        }
    }
}
