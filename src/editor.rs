//! Document lifecycle: new, open, save, close gating and validated renames.
//!
//! [`Editor`] owns the single open [`Document`] and a revision counter. The
//! presentation layer rebuilds its view whenever the revision moves, so every
//! operation that changes the document's structure bumps it.

use std::path::Path;

use crate::constants::{OPEN_ARCHIVE_DIALOG_TITLE, OPEN_DIALOG_TITLE, SAVE_DIALOG_TITLE};
use crate::dialogs::FileChooser;
use crate::document::Document;

/// Result of a rename request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    /// The state now lives under the new name
    Renamed,
    /// Old and new names are equal; nothing happened
    Unchanged,
    /// Another state already uses the new name; nothing happened
    Collision,
    /// The new name cannot be stored as a sheet file; nothing happened
    Invalid,
    /// There is no open document or no state with the old name
    Missing,
}

/// Owner of the open document.
#[derive(Debug)]
pub struct Editor {
    document: Option<Document>,
    revision: u64,
    new_rsi_size: (u32, u32),
}

impl Editor {
    /// Create an editor with no document open.
    pub fn new(new_rsi_size: (u32, u32)) -> Self {
        Self {
            document: None,
            revision: 0,
            new_rsi_size,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Counter bumped on every structural change to the document.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Frame size used by [`Editor::new_rsi`].
    pub fn set_new_rsi_size(&mut self, size: (u32, u32)) {
        self.new_rsi_size = size;
    }

    fn replace_document(&mut self, document: Document) {
        self.document = Some(document);
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
        log::trace!("Editor revision {}", self.revision);
    }

    /// Replace the document with an empty one.
    ///
    /// Returns false if the current document refused to close.
    pub fn new_rsi(&mut self, chooser: &mut dyn FileChooser) -> rsi::Result<bool> {
        if !self.close_current(chooser)? {
            return Ok(false);
        }

        self.replace_document(Document::empty(self.new_rsi_size));
        log::info!(
            "Created new RSI ({}x{})",
            self.new_rsi_size.0,
            self.new_rsi_size.1
        );
        Ok(true)
    }

    /// Ask for a directory and open the RSI in it.
    ///
    /// Returns false if the current document refused to close or the user
    /// cancelled the chooser.
    pub fn open_rsi(&mut self, chooser: &mut dyn FileChooser) -> rsi::Result<bool> {
        if !self.close_current(chooser)? {
            return Ok(false);
        }

        let Some(path) = chooser.pick_directory(OPEN_DIALOG_TITLE) else {
            return Ok(false);
        };

        self.open_path(&path)?;
        Ok(true)
    }

    /// Ask for a zip archive and open the RSI inside it.
    pub fn open_archive(&mut self, chooser: &mut dyn FileChooser) -> rsi::Result<bool> {
        if !self.close_current(chooser)? {
            return Ok(false);
        }

        let Some(path) = chooser.pick_archive(OPEN_ARCHIVE_DIALOG_TITLE) else {
            return Ok(false);
        };

        self.open_path(&path)?;
        Ok(true)
    }

    /// Open `path` without asking the current document first.
    pub fn open_path(&mut self, path: &Path) -> rsi::Result<()> {
        let document = Document::open(path)?;
        self.replace_document(document);
        Ok(())
    }

    /// Save the document, asking for a directory when it has no path yet.
    ///
    /// Returns false when there is nothing to save or the user cancelled.
    pub fn save_rsi(&mut self, chooser: &mut dyn FileChooser) -> rsi::Result<bool> {
        let Some(document) = self.document.as_mut() else {
            return Ok(false);
        };

        if !document.has_path() {
            let Some(path) = chooser.pick_directory(SAVE_DIALOG_TITLE) else {
                return Ok(false);
            };
            document.set_path(path);
        }

        let saved = document.save()?;
        if saved {
            log::info!("Saved RSI to {:?}", document.path());
        }
        Ok(saved)
    }

    /// Check whether the current document may be replaced.
    ///
    /// A dirty document is saved first; declining the save keeps it open.
    /// If the save fails the user may discard the changes instead, otherwise
    /// the error is returned and the document stays open.
    pub fn close_current(&mut self, chooser: &mut dyn FileChooser) -> rsi::Result<bool> {
        let can_close = self.document.as_ref().is_none_or(Document::close);
        if can_close {
            return Ok(true);
        }

        log::debug!("Current document has unsaved changes, saving before close");
        match self.save_rsi(chooser) {
            Err(e) if chooser.confirm_discard(&e.to_string()) => {
                log::warn!("Discarding unsaved changes after failed save: {}", e);
                Ok(true)
            }
            result => result,
        }
    }

    /// Rename a state after checking the new name is usable.
    pub fn rename_state(&mut self, old: &str, new: &str) -> RenameOutcome {
        let Some(document) = self.document.as_mut() else {
            return RenameOutcome::Missing;
        };

        if old == new {
            return RenameOutcome::Unchanged;
        }

        if !rsi::is_valid_state_name(new) {
            log::warn!(
                "Not renaming '{}' to '{}': not usable as a file name",
                old,
                new
            );
            return RenameOutcome::Invalid;
        }

        if document.states().contains_key(new) {
            // No overwrite confirmation exists, so collisions are dropped
            log::warn!(
                "Not renaming '{}' to '{}': a state with that name exists",
                old,
                new
            );
            return RenameOutcome::Collision;
        }

        if !document.rename_state(old, new) {
            log::warn!("Not renaming '{}': no such state", old);
            return RenameOutcome::Missing;
        }

        self.touch();
        RenameOutcome::Renamed
    }

    /// Forward a license edit. Form edits do not trigger a rebuild.
    pub fn update_license(&mut self, text: &str) {
        if let Some(document) = self.document.as_mut() {
            document.update_license(text);
        }
    }

    /// Forward a copyright edit. Form edits do not trigger a rebuild.
    pub fn update_copyright(&mut self, text: &str) {
        if let Some(document) = self.document.as_mut() {
            document.update_copyright(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::ScriptedChooser;
    use crate::constants::DISCARD_DIALOG_TITLE;
    use rsi::{RgbaImage, Rsi, State};
    use std::io::Write;
    use std::path::PathBuf;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_sample(dir: &Path) -> PathBuf {
        let target = dir.join("mob.rsi");
        let mut rsi = Rsi::new((2, 2));
        rsi.set_state(State::single(RgbaImage::new(2, 2)), "idle");
        rsi.set_state(State::single(RgbaImage::new(2, 2)), "walk");
        rsi.write(&target).unwrap();
        target
    }

    #[test]
    fn test_new_rsi_from_nothing() {
        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new();

        assert!(editor.new_rsi(&mut chooser).unwrap());
        let doc = editor.document().unwrap();
        assert!(doc.states().is_empty());
        assert!(!doc.has_path());
        assert_eq!(doc.size(), (32, 32));
        assert_eq!(editor.revision(), 1);
        assert!(chooser.prompts.is_empty());
    }

    #[test]
    fn test_open_rsi() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_sample(dir.path());

        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new().answer(Some(target.clone()));

        assert!(editor.open_rsi(&mut chooser).unwrap());
        let doc = editor.document().unwrap();
        assert_eq!(doc.states().len(), 2);
        assert_eq!(doc.path(), Some(target.as_path()));
        assert!(!doc.is_dirty());
        assert_eq!(chooser.prompts, vec![OPEN_DIALOG_TITLE]);
    }

    #[test]
    fn test_open_cancelled_keeps_document() {
        let mut editor = Editor::new((16, 16));
        let mut chooser = ScriptedChooser::new().answer(None);
        editor.new_rsi(&mut chooser).unwrap();
        let revision = editor.revision();

        assert!(!editor.open_rsi(&mut chooser).unwrap());
        assert_eq!(editor.document().unwrap().size(), (16, 16));
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn test_open_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new().answer(Some(dir.path().to_path_buf()));

        assert!(editor.open_rsi(&mut chooser).is_err());
        assert!(editor.document().is_none());
    }

    #[test]
    fn test_save_prompts_for_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("new.rsi");

        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new().answer(Some(target.clone()));
        editor.new_rsi(&mut chooser).unwrap();
        editor.update_license("CC0-1.0");

        assert!(editor.save_rsi(&mut chooser).unwrap());
        assert_eq!(chooser.prompts, vec![SAVE_DIALOG_TITLE]);
        assert!(target.join("meta.json").is_file());
        assert!(!editor.document().unwrap().is_dirty());
    }

    #[test]
    fn test_save_cancelled() {
        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new().answer(None);
        editor.new_rsi(&mut chooser).unwrap();
        editor.update_copyright("me");

        assert!(!editor.save_rsi(&mut chooser).unwrap());
        let doc = editor.document().unwrap();
        assert!(doc.is_dirty());
        assert!(!doc.has_path());
    }

    #[test]
    fn test_save_without_document() {
        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new();
        assert!(!editor.save_rsi(&mut chooser).unwrap());
        assert!(chooser.prompts.is_empty());
    }

    #[test]
    fn test_close_clean_document_needs_no_prompt() {
        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new();
        editor.new_rsi(&mut chooser).unwrap();

        assert!(editor.close_current(&mut chooser).unwrap());
        assert!(chooser.prompts.is_empty());
    }

    #[test]
    fn test_new_over_dirty_document_saves_first() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("draft.rsi");

        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new().answer(Some(target.clone()));
        editor.new_rsi(&mut chooser).unwrap();
        editor.update_license("MIT");

        assert!(editor.new_rsi(&mut chooser).unwrap());
        assert!(target.join("meta.json").is_file());
        assert_eq!(editor.document().unwrap().license(), "");
    }

    #[test]
    fn test_new_over_dirty_document_declined() {
        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new().answer(None);
        editor.new_rsi(&mut chooser).unwrap();
        editor.update_license("MIT");
        let revision = editor.revision();

        assert!(!editor.new_rsi(&mut chooser).unwrap());
        let doc = editor.document().unwrap();
        assert_eq!(doc.license(), "MIT");
        assert!(doc.is_dirty());
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn test_rename_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_sample(dir.path());
        let mut editor = Editor::new((32, 32));
        editor.open_path(&target).unwrap();
        let revision = editor.revision();

        assert_eq!(editor.rename_state("idle", "idle"), RenameOutcome::Unchanged);
        assert_eq!(editor.rename_state("idle", "walk"), RenameOutcome::Collision);
        assert_eq!(editor.rename_state("ghost", "spirit"), RenameOutcome::Missing);
        assert_eq!(editor.revision(), revision);
        assert!(!editor.document().unwrap().is_dirty());

        assert_eq!(editor.rename_state("idle", "stand"), RenameOutcome::Renamed);
        assert_eq!(editor.revision(), revision + 1);
        let doc = editor.document().unwrap();
        assert!(doc.is_dirty());
        let names: Vec<&str> = doc.states().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["walk", "stand"]);
    }

    #[test]
    fn test_rename_rejects_file_unsafe_names() {
        let dir = tempfile::tempdir().unwrap();
        let target = write_sample(dir.path());
        let mut editor = Editor::new((32, 32));
        editor.open_path(&target).unwrap();
        let revision = editor.revision();

        for name in ["a/b", "a\\b", ".", ".."] {
            assert_eq!(editor.rename_state("idle", name), RenameOutcome::Invalid);
        }
        assert_eq!(editor.revision(), revision);
        let doc = editor.document().unwrap();
        assert!(doc.states().contains_key("idle"));
        assert!(!doc.is_dirty());

        let mut chooser = ScriptedChooser::new();
        assert!(editor.new_rsi(&mut chooser).unwrap());
        assert!(chooser.prompts.is_empty());
    }

    /// Open the sample, edit it, then replace its directory with a plain file
    /// so the next save fails.
    fn editor_with_unwritable_changes(dir: &Path) -> Editor {
        let target = write_sample(dir);
        let mut editor = Editor::new((32, 32));
        editor.open_path(&target).unwrap();
        editor.update_license("MIT");

        std::fs::remove_dir_all(&target).unwrap();
        std::fs::write(&target, "not a directory").unwrap();
        editor
    }

    #[test]
    fn test_failed_save_on_close_can_discard() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with_unwritable_changes(dir.path());
        let mut chooser = ScriptedChooser::new().discard_on_failure(true);

        assert!(editor.new_rsi(&mut chooser).unwrap());
        assert_eq!(chooser.prompts, vec![DISCARD_DIALOG_TITLE]);
        let doc = editor.document().unwrap();
        assert!(doc.states().is_empty());
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_failed_save_on_close_kept() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with_unwritable_changes(dir.path());
        let mut chooser = ScriptedChooser::new().discard_on_failure(false);

        assert!(editor.close_current(&mut chooser).is_err());
        assert_eq!(chooser.prompts, vec![DISCARD_DIALOG_TITLE]);
        let doc = editor.document().unwrap();
        assert_eq!(doc.license(), "MIT");
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_open_archive_has_no_save_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_sample(dir.path());
        let archive = dir.path().join("mob.zip");
        {
            let mut writer = ZipWriter::new(std::fs::File::create(&archive).unwrap());
            for name in ["meta.json", "idle.png", "walk.png"] {
                writer
                    .start_file(format!("mob.rsi/{}", name), SimpleFileOptions::default())
                    .unwrap();
                writer.write_all(&std::fs::read(source.join(name)).unwrap()).unwrap();
            }
            writer.finish().unwrap();
        }

        let target = dir.path().join("saved.rsi");
        let mut editor = Editor::new((32, 32));
        let mut chooser = ScriptedChooser::new()
            .answer(Some(archive))
            .answer(Some(target.clone()));

        assert!(editor.open_archive(&mut chooser).unwrap());
        let doc = editor.document().unwrap();
        assert!(!doc.has_path());
        assert_eq!(doc.states().len(), 2);

        assert!(editor.save_rsi(&mut chooser).unwrap());
        assert_eq!(chooser.prompts, vec![OPEN_ARCHIVE_DIALOG_TITLE, SAVE_DIALOG_TITLE]);
        assert_eq!(editor.document().unwrap().path(), Some(target.as_path()));
        assert!(target.join("walk.png").is_file());
    }

    #[test]
    fn test_rename_without_document() {
        let mut editor = Editor::new((32, 32));
        assert_eq!(editor.rename_state("a", "b"), RenameOutcome::Missing);
    }

    #[test]
    fn test_form_edits_do_not_bump_revision() {
        let mut editor = Editor::new((32, 32));
        editor.new_rsi(&mut ScriptedChooser::new()).unwrap();
        let revision = editor.revision();

        editor.update_license("MIT");
        editor.update_copyright("me");
        assert_eq!(editor.revision(), revision);
        assert!(editor.document().unwrap().is_dirty());
    }
}
