//! States panel: one tile per state with a rename-in-place label.

use eframe::egui;

use crate::app::RsiEditorApp;
use crate::message::{Message, StateMessage};
use crate::view::StateTile;
use crate::widget_state::RenameState;

/// Gap between tiles
const TILE_SPACING: f32 = 8.0;

/// Height reserved for a label under its icon
const LABEL_HEIGHT: f32 = 22.0;

impl RsiEditorApp {
    /// Build the states panel filling the rest of the window.
    pub(crate) fn show_states_panel(&mut self, ctx: &egui::Context, messages: &mut Vec<Message>) {
        let Some(view) = &self.view else {
            return;
        };
        let textures = &self.textures;
        let rename = &mut self.widget_state.rename;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("States");
            ui.separator();

            if view.tiles.is_empty() {
                ui.weak("This RSI has no states");
                return;
            }

            let icon_size = view.icon_size as f32;
            let tile_size = egui::vec2(
                view.label_max_width.max(icon_size),
                icon_size + LABEL_HEIGHT + ui.spacing().item_spacing.y,
            );

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(TILE_SPACING, TILE_SPACING);
                    ui.horizontal_wrapped(|ui| {
                        for (index, tile) in view.tiles.iter().enumerate() {
                            let texture = textures.get(index).and_then(Option::as_ref);
                            ui.allocate_ui(tile_size, |ui| {
                                ui.vertical_centered(|ui| {
                                    show_icon(ui, texture, icon_size).on_hover_text(&tile.summary);
                                    show_label(ui, tile, view.label_max_width, rename, messages);
                                });
                            });
                        }
                    });
                });
        });
    }
}

fn show_icon(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    icon_size: f32,
) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(icon_size, icon_size), egui::Sense::hover());

    if let Some(texture) = texture {
        let image_rect = egui::Rect::from_center_size(rect.center(), texture.size_vec2());
        egui::Image::from_texture(egui::load::SizedTexture::new(texture.id(), texture.size_vec2()))
            .paint_at(ui, image_rect);
    }

    response
}

/// The name label, or an edit box while the label is being renamed.
fn show_label(
    ui: &mut egui::Ui,
    tile: &StateTile,
    max_width: f32,
    rename: &mut RenameState,
    messages: &mut Vec<Message>,
) {
    let Some(edit) = rename.editing.as_mut().filter(|e| e.original == tile.name) else {
        let response = ui.add(
            egui::Label::new(&tile.name)
                .truncate()
                .sense(egui::Sense::click()),
        );
        if response.double_clicked() {
            messages.push(StateMessage::BeginRename(tile.name.clone()).into());
        }
        response.on_hover_text("Double-click to rename");
        return;
    };

    let mut buffer = edit.buffer.clone();
    let response = ui.add(egui::TextEdit::singleline(&mut buffer).desired_width(max_width));

    if edit.wants_focus {
        response.request_focus();
        edit.wants_focus = false;
    }

    if response.changed() {
        messages.push(StateMessage::RenameInput(buffer).into());
    }

    if response.lost_focus() {
        let cancelled = ui.input(|i| i.key_pressed(egui::Key::Escape));
        let msg = if cancelled {
            StateMessage::CancelRename
        } else {
            StateMessage::CommitRename
        };
        messages.push(msg.into());
    }
}
