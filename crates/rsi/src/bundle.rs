//! In-memory RSI bundle and directory I/O.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use indexmap::IndexMap;

use crate::archive;
use crate::error::{Result, RsiError};
use crate::meta::{MANIFEST_NAME, RsiMeta};
use crate::sheet;
use crate::state::{Directions, State};

/// A Robust Station Image: frame size, licensing and an ordered set of states.
#[derive(Debug, Clone, PartialEq)]
pub struct Rsi {
    size: (u32, u32),
    license: Option<String>,
    copyright: Option<String>,
    states: IndexMap<String, State>,
}

impl Rsi {
    /// Create an empty bundle with the given frame size.
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            license: None,
            copyright: None,
            states: IndexMap::new(),
        }
    }

    /// Open a bundle from a directory, a zip archive or a `meta.json` path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.is_dir() {
            return Self::open_dir(path);
        }

        if archive::is_zip_path(path) {
            return archive::open_zip(path);
        }

        let is_manifest = path
            .file_name()
            .is_some_and(|name| name == MANIFEST_NAME);
        match path.parent() {
            Some(parent) if is_manifest => Self::open_dir(parent),
            _ => Err(RsiError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not an RSI directory or archive", path.display()),
            ))),
        }
    }

    /// Open a bundle stored as a directory.
    pub fn open_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let json = fs::read_to_string(dir.join(MANIFEST_NAME))?;
        let meta = RsiMeta::from_json(&json)?;

        let rsi = Self::from_meta(meta, |name| {
            let path = dir.join(sheet_file_name(name));
            if !path.is_file() {
                return Err(RsiError::ImageNotFound { path });
            }
            Ok(image::open(&path)?.to_rgba8())
        })?;

        log::info!(
            "Opened RSI {:?} ({} states, {}x{})",
            dir,
            rsi.states.len(),
            rsi.size.0,
            rsi.size.1
        );
        Ok(rsi)
    }

    /// Build a bundle from a validated manifest, fetching each state's sheet
    /// through `load_sheet`.
    pub(crate) fn from_meta(
        meta: RsiMeta,
        mut load_sheet: impl FnMut(&str) -> Result<RgbaImage>,
    ) -> Result<Self> {
        meta.validate()?;

        let size = (meta.size.x, meta.size.y);
        let mut rsi = Self::new(size);
        rsi.license = meta.license;
        rsi.copyright = meta.copyright;

        for state_meta in meta.states {
            let sheet_image = load_sheet(&state_meta.name)?;
            let frames = sheet::slice_sheet(
                &state_meta.name,
                &sheet_image,
                size,
                &state_meta.frames_per_direction(),
            )?;
            let directions = Directions::try_from(state_meta.directions)?;
            let state = State::new(directions, frames, state_meta.delays)
                .map_err(|e| RsiError::invalid_sheet(&state_meta.name, e.to_string()))?
                .with_flags(state_meta.flags.unwrap_or_default());
            rsi.states.insert(state_meta.name, state);
        }

        Ok(rsi)
    }

    /// Manifest describing this bundle.
    pub fn to_meta(&self) -> RsiMeta {
        let mut meta = RsiMeta::new(self.size.0, self.size.1);
        meta.license = self.license.clone();
        meta.copyright = self.copyright.clone();
        meta.states = self
            .states
            .iter()
            .map(|(name, state)| state.to_meta(name))
            .collect();
        meta
    }

    /// Write the bundle as a directory: `meta.json` plus one sheet per state.
    ///
    /// The directory is created if needed and existing sheets are overwritten.
    /// Sheets listed by the manifest previously in `dir` whose states are no
    /// longer present (renamed or removed) are deleted. Other files are left
    /// alone.
    pub fn write(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();

        if let Some(name) = self.states.keys().find(|name| !is_valid_state_name(name)) {
            return Err(RsiError::invalid_format(format!(
                "state name '{}' cannot be used as a file name",
                name
            )));
        }

        let previous = previous_state_names(dir);
        fs::create_dir_all(dir)?;

        for (name, state) in &self.states {
            let sheet_image = sheet::pack_sheet(state.all_frames(), self.size);
            let path = dir.join(sheet_file_name(name));
            sheet_image.save_with_format(&path, ImageFormat::Png)?;
            log::debug!("Wrote sheet {:?} ({} frames)", path, state.frame_count());
        }

        fs::write(dir.join(MANIFEST_NAME), self.to_meta().to_json()?)?;

        for name in previous {
            if self.states.contains_key(&name) || !is_valid_state_name(&name) {
                continue;
            }
            let path = dir.join(sheet_file_name(&name));
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed stale sheet {:?}", path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        log::info!("Wrote RSI {:?} ({} states)", dir, self.states.len());
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn set_license(&mut self, license: Option<String>) {
        self.license = license;
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    pub fn set_copyright(&mut self, copyright: Option<String>) {
        self.copyright = copyright;
    }

    /// States in insertion order.
    pub fn states(&self) -> &IndexMap<String, State> {
        &self.states
    }

    pub fn get_state(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    pub fn get_state_mut(&mut self, name: &str) -> Option<&mut State> {
        self.states.get_mut(name)
    }

    /// Store `state` under `name`. An existing state with that name is
    /// replaced in place and returned.
    pub fn set_state(&mut self, state: State, name: impl Into<String>) -> Option<State> {
        self.states.insert(name.into(), state)
    }

    /// Remove a state, keeping the order of the remaining ones.
    pub fn remove_state(&mut self, name: &str) -> Option<State> {
        self.states.shift_remove(name)
    }

    /// Move the state stored under `old` to `new`.
    ///
    /// Equivalent to removing `old` and storing its state under `new`, so a
    /// state already named `new` is overwritten. Returns false if `old` does
    /// not exist.
    pub fn rename_state(&mut self, old: &str, new: &str) -> bool {
        if old == new {
            return self.states.contains_key(old);
        }
        match self.remove_state(old) {
            Some(state) => {
                self.set_state(state, new);
                true
            }
            None => false,
        }
    }
}

/// Whether `name` can be stored as a sheet file next to the manifest.
///
/// Names must be non-empty, must not be `.` or `..` and must not contain path
/// separators.
pub fn is_valid_state_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// State names listed by the manifest already in `dir`, if it has a readable one.
fn previous_state_names(dir: &Path) -> Vec<String> {
    let Ok(json) = fs::read_to_string(dir.join(MANIFEST_NAME)) else {
        return Vec::new();
    };
    match serde_json::from_str::<RsiMeta>(&json) {
        Ok(meta) => meta.states.into_iter().map(|state| state.name).collect(),
        Err(e) => {
            log::debug!("Ignoring unreadable manifest in {:?}: {}", dir, e);
            Vec::new()
        }
    }
}

/// Sheet file name for a state.
pub(crate) fn sheet_file_name(state: &str) -> PathBuf {
    PathBuf::from(format!("{}.png", state))
}
