use std::collections::HashMap;

use eframe::egui;

use crate::egui_app::commands::Command;
use crate::egui_app::state::ClientState;
use crate::egui_app::theme::{colors, topic_card_frame};
use crate::egui_app::views::ViewAction;

/// Render one topic card: header, then one row per item
pub fn render(
    ui: &mut egui::Ui,
    client: &ClientState,
    topic: &str,
    move_targets: &mut HashMap<String, String>,
    actions: &mut Vec<ViewAction>,
) {
    let items = client.cache().items(topic);
    let is_empty = items.map_or(true, |items| items.is_empty());
    let listed = client.topics().contains(topic);

    topic_card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.heading(topic);
            if !listed {
                ui.colored_label(colors::TEXT_MUTED, "(not in topics list)");
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let delete = ui
                    .add_enabled(listed && is_empty, egui::Button::new("Delete topic"))
                    .on_disabled_hover_text("Only empty topics can be deleted");
                if delete.clicked() {
                    actions.push(ViewAction::DeleteTopic(topic.to_string()));
                }
            });
        });

        let Some(items) = items.filter(|items| !items.is_empty()) else {
            ui.colored_label(colors::TEXT_MUTED, "No items");
            return;
        };

        for (text, item) in items {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(text).strong());
                ui.colored_label(colors::UPVOTE, format!("+{}", item.upvotes));
                ui.colored_label(colors::DOWNVOTE, format!("-{}", item.downvotes));

                if ui.small_button("Upvote").clicked() {
                    actions.push(ViewAction::Command(Command::upvote(text)));
                }
                if ui.small_button("Downvote").clicked() {
                    actions.push(ViewAction::Command(Command::downvote(text)));
                }

                let target = move_targets.entry(text.clone()).or_default();
                egui::ComboBox::from_id_salt(("move", text))
                    .selected_text(if target.is_empty() { "Move to..." } else { target.as_str() })
                    .show_ui(ui, |ui| {
                        for candidate in &client.topics().topics {
                            if candidate != topic {
                                ui.selectable_value(&mut *target, candidate.clone(), candidate);
                            }
                        }
                    });
                if ui.add_enabled(!target.is_empty(), egui::Button::new("Move")).clicked() {
                    actions.push(ViewAction::Command(Command::move_item(text, target.clone())));
                    target.clear();
                }

                if ui.small_button("Delete").clicked() {
                    actions.push(ViewAction::Command(Command::delete(text)));
                }
            });
        }
    });
}
