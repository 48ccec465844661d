use eframe::egui;

use crate::egui_app::state::AppState;

/// New item form: text, topic selector and an Add button
pub fn render_add_item(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("New item:");
        let response = ui.text_edit_singleline(&mut state.new_item_text);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let selected = if state.new_item_topic.is_empty() {
            "Pick a topic".to_string()
        } else {
            state.new_item_topic.clone()
        };
        egui::ComboBox::from_id_salt("new_item_topic")
            .selected_text(selected)
            .show_ui(ui, |ui| {
                for topic in &state.client.topics().topics {
                    ui.selectable_value(&mut state.new_item_topic, topic.clone(), topic);
                }
            });

        if ui.button("Add").clicked() || submitted {
            state.add_item();
        }
    });
}

/// New topic form. Topics are created on the server right away.
pub fn render_add_topic(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("New topic:");
        let response = ui.text_edit_singleline(&mut state.new_topic_name);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let add = ui.add_enabled(state.requests_in_flight == 0, egui::Button::new("Add topic"));
        if add.clicked() || submitted {
            state.request_add_topic();
        }
    });
}
