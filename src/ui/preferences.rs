//! Preferences window.

use eframe::egui;

use crate::app::RsiEditorApp;
use crate::config::LogLevel;
use crate::constants::ICON_SIZE_RANGE;
use crate::message::{Message, PreferencesMessage};

/// Largest frame edge offered for new RSIs
const MAX_NEW_RSI_EDGE: u32 = 1024;

impl RsiEditorApp {
    /// Show the preferences window while it is open.
    pub(crate) fn show_preferences(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let Some(pending) = &self.widget_state.preferences.pending else {
            return;
        };
        let mut edited = pending.clone();
        let mut open = true;

        egui::Window::new("Preferences")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Grid::new("preferences_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Dark theme");
                        ui.checkbox(&mut edited.dark_theme, "");
                        ui.end_row();

                        ui.label("Icon size");
                        ui.add(egui::Slider::new(&mut edited.icon_size, ICON_SIZE_RANGE).suffix(" px"));
                        ui.end_row();

                        ui.label("Label width");
                        ui.add(
                            egui::Slider::new(&mut edited.state_name_factor, 1.0..=3.0)
                                .suffix("× icon")
                                .fixed_decimals(1),
                        );
                        ui.end_row();

                        ui.label("New RSI size");
                        ui.horizontal(|ui| {
                            let [x, y] = &mut edited.default_rsi_size;
                            ui.add(egui::DragValue::new(x).range(1..=MAX_NEW_RSI_EDGE).prefix("x: "));
                            ui.add(egui::DragValue::new(y).range(1..=MAX_NEW_RSI_EDGE).prefix("y: "));
                        });
                        ui.end_row();

                        ui.label("Log level");
                        egui::ComboBox::from_id_salt("log_level")
                            .selected_text(edited.log_level.name())
                            .show_ui(ui, |ui| {
                                for level in LogLevel::all() {
                                    ui.selectable_value(&mut edited.log_level, *level, level.name());
                                }
                            });
                        ui.end_row();
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        messages.push(PreferencesMessage::Apply.into());
                    }
                    if ui.button("Cancel").clicked() {
                        messages.push(PreferencesMessage::Cancel.into());
                    }
                });
            });

        if edited != *pending {
            // Queue the edit ahead of an Apply pushed in the same frame
            let apply_index = messages
                .iter()
                .position(|m| *m == Message::Preferences(PreferencesMessage::Apply))
                .unwrap_or(messages.len());
            messages.insert(apply_index, PreferencesMessage::Edit(edited).into());
        }
        if !open {
            messages.push(PreferencesMessage::Cancel.into());
        }
    }
}
