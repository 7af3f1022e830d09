//! Status bar showing the document location and the last action's result.

use eframe::egui;

use crate::app::RsiEditorApp;

impl RsiEditorApp {
    /// Build the status bar at the very bottom of the window.
    pub(crate) fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.editor.document() {
                    Some(document) => {
                        let location = document
                            .path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "not saved yet".to_string());
                        ui.label(location);
                        if document.is_dirty() {
                            ui.colored_label(self.theme.dirty_color(), "● unsaved changes");
                        }
                    }
                    None => {
                        ui.weak("No RSI open");
                    }
                }

                if let Some(status) = &self.status {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if status.is_error {
                            ui.colored_label(self.theme.error_color(), &status.text);
                        } else {
                            ui.label(&status.text);
                        }
                    });
                }
            });
        });
    }
}
