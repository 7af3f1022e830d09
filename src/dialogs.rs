//! File chooser and confirmation dialogs.
//!
//! Editor operations ask the user through [`FileChooser`] so they can run
//! against native dialogs in the application and scripted answers in tests.

use std::path::{Path, PathBuf};

use crate::constants::DISCARD_DIALOG_TITLE;

/// Source of user-chosen paths. `None` means the user cancelled.
pub trait FileChooser {
    /// Ask for an existing directory.
    fn pick_directory(&mut self, title: &str) -> Option<PathBuf>;

    /// Ask for an RSI archive file.
    fn pick_archive(&mut self, title: &str) -> Option<PathBuf>;

    /// Saving failed with `reason`; ask whether to throw the changes away.
    fn confirm_discard(&mut self, reason: &str) -> bool;
}

/// Native dialogs backed by `rfd`, remembering the last visited directory.
#[derive(Debug, Default)]
pub struct NativeFileChooser {
    last_directory: Option<PathBuf>,
}

impl NativeFileChooser {
    pub fn new(last_directory: Option<PathBuf>) -> Self {
        Self { last_directory }
    }

    /// Directory the next dialog will start in.
    pub fn last_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref()
    }

    fn dialog(&self, title: &str) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new().set_title(title);
        match &self.last_directory {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }

    fn remember(&mut self, picked: Option<PathBuf>) -> Option<PathBuf> {
        if let Some(path) = &picked {
            self.last_directory = path.parent().map(Path::to_path_buf);
        }
        picked
    }
}

impl FileChooser for NativeFileChooser {
    fn pick_directory(&mut self, title: &str) -> Option<PathBuf> {
        let picked = self.dialog(title).pick_folder();
        log::debug!("Directory chooser '{}' returned {:?}", title, picked);
        self.remember(picked)
    }

    fn pick_archive(&mut self, title: &str) -> Option<PathBuf> {
        let picked = self
            .dialog(title)
            .add_filter("Zipped RSI", &["zip"])
            .pick_file();
        log::debug!("Archive chooser '{}' returned {:?}", title, picked);
        self.remember(picked)
    }

    fn confirm_discard(&mut self, reason: &str) -> bool {
        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(DISCARD_DIALOG_TITLE)
            .set_description(format!(
                "The RSI could not be saved:\n{}\n\nDiscard the unsaved changes?",
                reason
            ))
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        log::debug!("Discard prompt returned {:?}", answer);
        answer == rfd::MessageDialogResult::Yes
    }
}

/// Chooser that replays queued answers; used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedChooser {
    answers: std::collections::VecDeque<Option<PathBuf>>,
    discard: bool,
    /// Titles of every dialog that was shown, in order
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedChooser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next dialog.
    pub fn answer(mut self, path: Option<PathBuf>) -> Self {
        self.answers.push_back(path);
        self
    }

    /// Answer every discard prompt with `discard`.
    pub fn discard_on_failure(mut self, discard: bool) -> Self {
        self.discard = discard;
        self
    }

    fn next(&mut self, title: &str) -> Option<PathBuf> {
        self.prompts.push(title.to_string());
        self.answers.pop_front().flatten()
    }
}

#[cfg(test)]
impl FileChooser for ScriptedChooser {
    fn pick_directory(&mut self, title: &str) -> Option<PathBuf> {
        self.next(title)
    }

    fn pick_archive(&mut self, title: &str) -> Option<PathBuf> {
        self.next(title)
    }

    fn confirm_discard(&mut self, _reason: &str) -> bool {
        self.prompts.push(DISCARD_DIALOG_TITLE.to_string());
        self.discard
    }
}
