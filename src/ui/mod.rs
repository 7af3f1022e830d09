//! UI building modules for the RSI editor.
//!
//! Each module contains `impl RsiEditorApp` blocks that extend the main
//! application struct with the code drawing one part of the window. Drawing
//! never mutates the document: widgets push [`crate::message::Message`]s that
//! the app applies after the frame is laid out.

mod menu;
mod metadata_panel;
mod preferences;
mod states_panel;
mod status_bar;

use eframe::egui;

use crate::app::RsiEditorApp;
use crate::message::Message;

impl RsiEditorApp {
    /// Draw the document, or a hint when nothing is open.
    pub(crate) fn show_central(&mut self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        if self.view.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.weak("Use File > New or File > Open to start editing an RSI");
                });
            });
            return;
        }

        self.show_metadata_panel(ctx, messages);
        self.show_states_panel(ctx, messages);
    }
}
