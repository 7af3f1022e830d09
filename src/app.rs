//! Main application struct and `eframe::App` implementation.

use std::path::PathBuf;

use eframe::egui;

use crate::config::{AppConfig, Preferences};
use crate::constants::WINDOW_TITLE;
use crate::dialogs::NativeFileChooser;
use crate::editor::Editor;
use crate::handlers::{self, Status};
use crate::message::Message;
use crate::theme::ThemeChoice;
use crate::view::EditorView;
use crate::widget_state::WidgetState;

/// The editor window.
pub struct RsiEditorApp {
    pub(crate) editor: Editor,
    pub(crate) config: AppConfig,
    pub(crate) chooser: NativeFileChooser,
    pub(crate) widget_state: WidgetState,
    /// View of the current revision; `None` while no document is open
    pub(crate) view: Option<EditorView>,
    /// Icon textures, parallel to `view.tiles`
    pub(crate) textures: Vec<Option<egui::TextureHandle>>,
    /// Forces a rebuild even if the revision is unchanged
    pub(crate) view_stale: bool,
    pub(crate) status: Option<Status>,
    pub(crate) theme: ThemeChoice,
    applied_theme: Option<ThemeChoice>,
    title: String,
}

impl RsiEditorApp {
    /// Create the application, optionally opening `initial` right away.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, initial: Option<PathBuf>) -> Self {
        let preferences = &config.preferences;
        let theme = ThemeChoice::from_dark_flag(preferences.dark_theme);
        theme.apply(&cc.egui_ctx);

        let mut app = Self {
            editor: Editor::new(preferences.new_rsi_size()),
            chooser: NativeFileChooser::new(preferences.last_directory.clone()),
            config,
            widget_state: WidgetState::new(),
            view: None,
            textures: Vec::new(),
            view_stale: false,
            status: None,
            theme,
            applied_theme: Some(theme),
            title: WINDOW_TITLE.to_string(),
        };

        if let Some(path) = initial {
            match app.editor.open_path(&path) {
                Ok(()) => app.status = Some(Status::info(format!("Opened {}", path.display()))),
                Err(e) => {
                    log::error!("Failed to open {:?}: {}", path, e);
                    app.status = Some(Status::error(e));
                }
            }
        }

        app
    }

    /// Apply one message collected while drawing.
    fn update_message(&mut self, msg: Message) {
        match msg {
            Message::File(msg) => {
                if let Some(status) = handlers::handle_file(msg, &mut self.editor, &mut self.chooser) {
                    self.status = Some(status);
                }
                self.remember_last_directory();
            }
            Message::State(msg) => {
                handlers::handle_state(msg, &mut self.editor, &mut self.widget_state.rename);
            }
            Message::Metadata(msg) => handlers::handle_metadata(msg, &mut self.editor),
            Message::Preferences(msg) => {
                if let Some(preferences) = handlers::handle_preferences(
                    msg,
                    &self.config.preferences,
                    &mut self.widget_state.preferences,
                ) {
                    self.apply_preferences(preferences);
                }
            }
        }
    }

    fn apply_preferences(&mut self, preferences: Preferences) {
        self.theme = ThemeChoice::from_dark_flag(preferences.dark_theme);
        self.editor.set_new_rsi_size(preferences.new_rsi_size());
        log::set_max_level(preferences.log_level.to_level_filter());

        if preferences.icon_size != self.config.preferences.icon_size
            || preferences.state_name_factor != self.config.preferences.state_name_factor
        {
            self.view_stale = true;
        }

        self.config.preferences = preferences;
        self.save_config();
    }

    fn remember_last_directory(&mut self) {
        let last = self.chooser.last_directory().map(PathBuf::from);
        if last.is_some() && last != self.config.preferences.last_directory {
            self.config.preferences.last_directory = last;
            self.save_config();
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save_to_default_path() {
            log::error!("Failed to save configuration: {}", e);
        }
    }

    /// Rebuild the view when the document changed structurally.
    fn sync_view(&mut self, ctx: &egui::Context) {
        let Some(document) = self.editor.document() else {
            self.view = None;
            self.textures.clear();
            return;
        };

        let revision = self.editor.revision();
        let current = self.view.as_ref().is_some_and(|v| v.revision == revision);
        if current && !self.view_stale {
            return;
        }

        let view = EditorView::build(document, revision, &self.config.preferences);
        self.textures = view
            .tiles
            .iter()
            .map(|tile| {
                tile.icon.as_ref().map(|icon| {
                    let size = [icon.width() as usize, icon.height() as usize];
                    let image = egui::ColorImage::from_rgba_unmultiplied(size, icon.as_raw());
                    ctx.load_texture(
                        format!("state-icon-{}", tile.name),
                        image,
                        egui::TextureOptions::NEAREST,
                    )
                })
            })
            .collect();
        self.view = Some(view);
        self.view_stale = false;
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = match self.editor.document() {
            Some(document) => format!("{} - {}", document.display_name(), WINDOW_TITLE),
            None => WINDOW_TITLE.to_string(),
        };
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    /// Run close gating when the window is asked to close.
    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }

        match self.editor.close_current(&mut self.chooser) {
            Ok(true) => log::info!("Closing editor"),
            Ok(false) => {
                log::debug!("Close cancelled: unsaved changes kept");
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            }
            Err(e) => {
                log::error!("Failed to save before closing: {}", e);
                self.status = Some(Status::error(e));
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            }
        }
    }
}

impl eframe::App for RsiEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.theme) {
            self.theme.apply(ctx);
            self.applied_theme = Some(self.theme);
        }
        self.handle_close_request(ctx);
        self.sync_view(ctx);
        self.sync_title(ctx);

        let mut messages = Vec::new();
        self.collect_shortcuts(ctx, &mut messages);
        self.show_menu_bar(ctx, &mut messages);
        self.show_status_bar(ctx);
        self.show_central(ctx, &mut messages);
        self.show_preferences(ctx, &mut messages);

        if !messages.is_empty() {
            for msg in messages {
                log::trace!("Message: {:?}", msg);
                self.update_message(msg);
            }
            ctx.request_repaint();
        }
    }
}
