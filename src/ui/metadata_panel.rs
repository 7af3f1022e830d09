//! Metadata form: size, license and copyright.

use eframe::egui;

use crate::app::RsiEditorApp;
use crate::message::{Message, MetadataMessage};

impl RsiEditorApp {
    /// Build the resizable metadata panel at the bottom of the window.
    pub(crate) fn show_metadata_panel(&mut self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let Some(view) = &mut self.view else {
            return;
        };
        let form = &mut view.metadata;

        egui::TopBottomPanel::bottom("metadata_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.heading("Metadata");
                ui.separator();

                egui::Grid::new("metadata_form")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Size:");
                        ui.label(&form.size_text);
                        ui.end_row();

                        ui.label("License:");
                        let license = ui.add(
                            egui::TextEdit::singleline(&mut form.license)
                                .desired_width(f32::INFINITY),
                        );
                        if license.changed() {
                            messages.push(MetadataMessage::LicenseChanged(form.license.clone()).into());
                        }
                        ui.end_row();

                        ui.label("Copyright:");
                        let copyright = ui.add(
                            egui::TextEdit::singleline(&mut form.copyright)
                                .desired_width(f32::INFINITY),
                        );
                        if copyright.changed() {
                            messages
                                .push(MetadataMessage::CopyrightChanged(form.copyright.clone()).into());
                        }
                        ui.end_row();
                    });
                ui.add_space(4.0);
            });
    }
}
