//! The open RSI document.
//!
//! A [`Document`] pairs a parsed [`Rsi`] with the directory it was loaded
//! from (or will be saved to) and tracks whether it has unsaved changes.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rsi::{Rsi, State};

use crate::constants::UNTITLED_NAME;

/// An RSI being edited, its save location and its dirty flag.
///
/// The dirty flag is only raised by mutations that change a stored value and
/// is cleared by a successful [`Document::save`].
#[derive(Debug, Clone)]
pub struct Document {
    rsi: Rsi,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Document {
    pub fn new(rsi: Rsi, path: Option<PathBuf>) -> Self {
        Self {
            rsi,
            path,
            dirty: false,
        }
    }

    /// A fresh document without states or save location.
    pub fn empty(size: (u32, u32)) -> Self {
        Self::new(Rsi::new(size), None)
    }

    /// Load a document from a directory, `meta.json` path or zip archive.
    ///
    /// Archives are read-only, so documents opened from one start without a
    /// save location.
    pub fn open(path: impl AsRef<Path>) -> rsi::Result<Self> {
        let path = path.as_ref();
        let rsi = Rsi::open(path)?;

        let save_path = if path.is_dir() {
            Some(path.to_path_buf())
        } else if rsi::archive::is_zip_path(path) {
            None
        } else {
            path.parent().map(Path::to_path_buf)
        };

        Ok(Self::new(rsi, save_path))
    }

    /// Whether the document can be discarded without losing work.
    pub fn close(&self) -> bool {
        !self.dirty
    }

    /// Write the document to its path.
    ///
    /// Returns `Ok(false)` without touching anything when no path is set.
    /// Write failures are returned as errors and leave the document dirty.
    pub fn save(&mut self) -> rsi::Result<bool> {
        let Some(path) = self.path.as_deref().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(false);
        };

        self.rsi.write(path)?;
        self.dirty = false;
        Ok(true)
    }

    pub fn states(&self) -> &IndexMap<String, State> {
        self.rsi.states()
    }

    pub fn size(&self) -> (u32, u32) {
        self.rsi.size()
    }

    /// License text, empty when unset.
    pub fn license(&self) -> &str {
        self.rsi.license().unwrap_or_default()
    }

    /// Copyright text, empty when unset.
    pub fn copyright(&self) -> &str {
        self.rsi.copyright().unwrap_or_default()
    }

    pub fn rsi(&self) -> &Rsi {
        &self.rsi
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether a save location is known. An empty path counts as none.
    pub fn has_path(&self) -> bool {
        self.path
            .as_deref()
            .is_some_and(|p| !p.as_os_str().is_empty())
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set the license, marking the document dirty only if it changed.
    ///
    /// An empty string clears the field.
    pub fn update_license(&mut self, text: &str) {
        if self.license() != text {
            self.rsi.set_license(non_empty(text));
            self.dirty = true;
            log::debug!("License changed to {:?}", text);
        }
    }

    /// Set the copyright, marking the document dirty only if it changed.
    ///
    /// An empty string clears the field.
    pub fn update_copyright(&mut self, text: &str) {
        if self.copyright() != text {
            self.rsi.set_copyright(non_empty(text));
            self.dirty = true;
            log::debug!("Copyright changed to {:?}", text);
        }
    }

    /// Move the state stored under `old` to `new`, keeping its frames.
    ///
    /// No collision check happens here: an existing `new` is overwritten.
    /// Renaming a state to its own name is a no-op. Returns false when `old`
    /// does not exist.
    pub fn rename_state(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.rsi.get_state(old).is_some();
        }
        if !self.rsi.rename_state(old, new) {
            return false;
        }
        self.dirty = true;
        log::info!("Renamed state '{}' to '{}'", old, new);
        true
    }

    /// File name of the save location, or "Untitled", with a `*` when dirty.
    pub fn display_name(&self) -> String {
        let name = self
            .path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED_NAME.to_string());

        if self.dirty {
            format!("{}*", name)
        } else {
            name
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsi::RgbaImage;

    fn state(shade: u8) -> State {
        State::single(RgbaImage::from_pixel(4, 4, image::Rgba([shade, shade, 0, 255])))
    }

    fn document_with(states: &[(&str, u8)]) -> Document {
        let mut rsi = Rsi::new((4, 4));
        for (name, shade) in states {
            rsi.set_state(state(*shade), *name);
        }
        Document::new(rsi, None)
    }

    #[test]
    fn test_new_document_is_clean() {
        let doc = Document::empty((32, 32));
        assert!(!doc.is_dirty());
        assert!(doc.close());
        assert!(!doc.has_path());
        assert!(doc.states().is_empty());
        assert_eq!(doc.size(), (32, 32));
        assert_eq!(doc.license(), "");
        assert_eq!(doc.copyright(), "");
    }

    #[test]
    fn test_save_without_path_returns_false() {
        let mut doc = document_with(&[("idle", 1)]);
        doc.update_license("CC0-1.0");
        assert!(doc.is_dirty());

        assert!(!doc.save().unwrap());
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_empty_path_counts_as_missing() {
        let mut doc = Document::empty((32, 32));
        doc.set_path("");
        assert!(!doc.has_path());
        assert!(!doc.save().unwrap());
    }

    #[test]
    fn test_save_clears_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("thing.rsi");

        let mut doc = document_with(&[("idle", 1)]);
        doc.update_copyright("Someone");
        doc.set_path(&target);

        assert!(doc.save().unwrap());
        assert!(!doc.is_dirty());
        assert!(doc.close());

        let reopened = Document::open(&target).unwrap();
        assert_eq!(reopened.copyright(), "Someone");
        assert_eq!(reopened.path(), Some(target.as_path()));
        assert!(!reopened.is_dirty());
    }

    #[test]
    fn test_directory_with_zip_extension_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("mob.zip");
        document_with(&[("idle", 1)]).rsi().write(&target).unwrap();

        let doc = Document::open(&target).unwrap();
        assert_eq!(doc.path(), Some(target.as_path()));
        assert_eq!(doc.states().len(), 1);
    }

    #[test]
    fn test_save_error_keeps_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut doc = document_with(&[("idle", 1)]);
        doc.update_license("MIT");
        doc.set_path(blocker.join("inner.rsi"));

        assert!(doc.save().is_err());
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_update_license_same_value_stays_clean() {
        let mut doc = document_with(&[]);
        doc.update_license("");
        assert!(!doc.is_dirty());

        let mut rsi = Rsi::new((32, 32));
        rsi.set_license(Some("MIT".to_string()));
        let mut doc = Document::new(rsi, None);
        doc.update_license("MIT");
        doc.update_license("MIT");
        assert!(!doc.is_dirty());
        assert!(doc.close());
    }

    #[test]
    fn test_update_license_change_marks_dirty() {
        let mut doc = document_with(&[]);
        doc.update_license("CC-BY-SA-3.0");
        assert!(doc.is_dirty());
        assert!(!doc.close());
        assert_eq!(doc.license(), "CC-BY-SA-3.0");
    }

    #[test]
    fn test_update_copyright_clears_with_empty_text() {
        let mut rsi = Rsi::new((32, 32));
        rsi.set_copyright(Some("Old".to_string()));
        let mut doc = Document::new(rsi, None);

        doc.update_copyright("");
        assert!(doc.is_dirty());
        assert_eq!(doc.copyright(), "");
        assert!(doc.rsi().copyright().is_none());
    }

    #[test]
    fn test_rename_to_same_name_is_noop() {
        let mut doc = document_with(&[("idle", 1)]);
        let before = doc.states().clone();

        assert!(doc.rename_state("idle", "idle"));
        assert_eq!(doc.states(), &before);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_rename_to_fresh_name() {
        let mut doc = document_with(&[("idle", 7)]);

        assert!(doc.rename_state("idle", "walking"));

        let mut expected = IndexMap::new();
        expected.insert("walking".to_string(), state(7));
        assert_eq!(doc.states(), &expected);
        assert!(doc.states().get("idle").is_none());
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_rename_missing_state() {
        let mut doc = document_with(&[("idle", 1)]);
        assert!(!doc.rename_state("ghost", "spirit"));
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_rename_does_not_check_collisions() {
        let mut doc = document_with(&[("idle", 1), ("walk", 2)]);
        assert!(doc.rename_state("idle", "walk"));
        assert_eq!(doc.states().len(), 1);
        assert_eq!(doc.states().get("walk"), Some(&state(1)));
    }

    #[test]
    fn test_display_name() {
        let mut doc = Document::empty((32, 32));
        assert_eq!(doc.display_name(), "Untitled");

        doc.set_path("/sprites/mob.rsi");
        doc.update_license("MIT");
        assert_eq!(doc.display_name(), "mob.rsi*");
    }
}
