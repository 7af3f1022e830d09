//! Message handlers for the RSI editor.
//!
//! Each handler processes one category of messages, keeping the app's update
//! function small. Handlers never touch egui, so they are tested directly.

use crate::config::Preferences;
use crate::dialogs::FileChooser;
use crate::editor::{Editor, RenameOutcome};
use crate::message::{FileMessage, MetadataMessage, PreferencesMessage, StateMessage};
use crate::widget_state::{PreferencesState, RenameState};

/// A status bar line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// A failure line, prefixed with "Error:".
    pub fn error(error: impl std::fmt::Display) -> Self {
        Self {
            text: format!("Error: {}", error),
            is_error: true,
        }
    }
}

/// Handle File menu messages.
///
/// Returns a line for the status bar when there is something to report.
pub fn handle_file(
    msg: FileMessage,
    editor: &mut Editor,
    chooser: &mut dyn FileChooser,
) -> Option<Status> {
    log::debug!("File action: {:?}", msg);

    let result = match msg {
        FileMessage::New => editor.new_rsi(chooser),
        FileMessage::Open => editor.open_rsi(chooser),
        FileMessage::OpenArchive => editor.open_archive(chooser),
        FileMessage::Save => editor.save_rsi(chooser),
    };

    match result {
        Ok(true) => {
            let name = editor
                .document()
                .map(|d| d.display_name())
                .unwrap_or_default();
            Some(Status::info(match msg {
                FileMessage::New => "Created new RSI".to_string(),
                FileMessage::Open | FileMessage::OpenArchive => format!("Opened {}", name),
                FileMessage::Save => format!("Saved {}", name),
            }))
        }
        Ok(false) => None,
        Err(e) => {
            log::error!("{:?} failed: {}", msg, e);
            Some(Status::error(e))
        }
    }
}

/// Handle state tile messages.
pub fn handle_state(msg: StateMessage, editor: &mut Editor, rename: &mut RenameState) {
    match msg {
        StateMessage::BeginRename(name) => {
            log::debug!("Editing label of '{}'", name);
            rename.begin(&name);
        }
        StateMessage::RenameInput(text) => rename.set_buffer(text),
        StateMessage::CancelRename => rename.cancel(),
        StateMessage::CommitRename => {
            let Some((old, new)) = rename.take() else {
                return;
            };
            if new.is_empty() {
                log::debug!("Ignoring empty name for '{}'", old);
                return;
            }
            let outcome = editor.rename_state(&old, &new);
            if outcome != RenameOutcome::Renamed {
                log::debug!("Rename '{}' -> '{}': {:?}", old, new, outcome);
            }
        }
    }
}

/// Handle metadata form edits.
pub fn handle_metadata(msg: MetadataMessage, editor: &mut Editor) {
    match msg {
        MetadataMessage::LicenseChanged(text) => editor.update_license(&text),
        MetadataMessage::CopyrightChanged(text) => editor.update_copyright(&text),
    }
}

/// Handle preferences window messages.
///
/// Returns the settings to apply when the user confirms the window.
pub fn handle_preferences(
    msg: PreferencesMessage,
    current: &Preferences,
    state: &mut PreferencesState,
) -> Option<Preferences> {
    match msg {
        PreferencesMessage::Open => {
            if !state.is_open() {
                state.pending = Some(current.clone());
            }
            None
        }
        PreferencesMessage::Edit(pending) => {
            if state.is_open() {
                state.pending = Some(pending);
            }
            None
        }
        PreferencesMessage::Apply => {
            let applied = state.pending.take().map(Preferences::sanitized);
            if applied.is_some() {
                log::info!("Applying preferences");
            }
            applied
        }
        PreferencesMessage::Cancel => {
            state.pending = None;
            None
        }
    }
}
