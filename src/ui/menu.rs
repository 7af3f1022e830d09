//! File menu and keyboard shortcuts.

use eframe::egui::{self, Key, KeyboardShortcut, Modifiers};

use crate::app::RsiEditorApp;
use crate::message::{FileMessage, Message, PreferencesMessage};

/// Create a new RSI
pub const NEW_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::N);
/// Open an RSI directory
pub const OPEN_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
/// Save the current RSI
pub const SAVE_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
/// Open the preferences window
pub const PREFERENCES_SHORTCUT: KeyboardShortcut =
    KeyboardShortcut::new(Modifiers::COMMAND, Key::Comma);

impl RsiEditorApp {
    /// Turn shortcut presses into messages, consuming the key events.
    pub(crate) fn collect_shortcuts(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let bindings: [(KeyboardShortcut, Message); 4] = [
            (NEW_SHORTCUT, FileMessage::New.into()),
            (OPEN_SHORTCUT, FileMessage::Open.into()),
            (SAVE_SHORTCUT, FileMessage::Save.into()),
            (PREFERENCES_SHORTCUT, PreferencesMessage::Open.into()),
        ];

        ctx.input_mut(|input| {
            for (shortcut, msg) in bindings {
                if input.consume_shortcut(&shortcut) {
                    log::debug!("Shortcut {:?}", shortcut.logical_key);
                    messages.push(msg);
                }
            }
        });
    }

    /// Build the top menu bar.
    pub(crate) fn show_menu_bar(&self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let has_document = self.editor.document().is_some();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let item = |label: &'static str, shortcut: &KeyboardShortcut| {
                        egui::Button::new(label).shortcut_text(ctx.format_shortcut(shortcut))
                    };

                    if ui.add(item("New", &NEW_SHORTCUT)).clicked() {
                        messages.push(FileMessage::New.into());
                    }
                    if ui.add(item("Open", &OPEN_SHORTCUT)).clicked() {
                        messages.push(FileMessage::Open.into());
                    }
                    if ui.button("Open Archive...").clicked() {
                        messages.push(FileMessage::OpenArchive.into());
                    }
                    if ui
                        .add_enabled(has_document, item("Save", &SAVE_SHORTCUT))
                        .clicked()
                    {
                        messages.push(FileMessage::Save.into());
                    }
                    ui.separator();
                    if ui.add(item("Preferences", &PREFERENCES_SHORTCUT)).clicked() {
                        messages.push(PreferencesMessage::Open.into());
                    }
                });
            });
        });
    }
}
