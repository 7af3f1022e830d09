//! Reading RSI bundles packed into zip archives.
//!
//! Archives are read-only: the manifest may sit at the archive root or inside
//! a single top-level folder (`mob.rsi/meta.json`), and sheets are looked up
//! next to it.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::bundle::{Rsi, sheet_file_name};
use crate::error::{Result, RsiError};
use crate::meta::{MANIFEST_NAME, RsiMeta};

/// Check if a path has a zip extension.
pub fn is_zip_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// Open a zip archive from disk.
pub fn open_zip(path: &Path) -> Result<Rsi> {
    let file = File::open(path)?;
    let rsi = read_archive(file, &path.display().to_string())?;
    log::info!("Opened RSI archive {:?} ({} states)", path, rsi.states().len());
    Ok(rsi)
}

/// Read a bundle from any seekable zip stream.
pub fn read_archive<R: Read + Seek>(reader: R, archive_name: &str) -> Result<Rsi> {
    let mut archive = ZipArchive::new(reader)?;
    log::debug!("Archive '{}' contains {} entries", archive_name, archive.len());

    let manifest = find_manifest(&archive).ok_or_else(|| {
        RsiError::invalid_format(format!("no {} in archive '{}'", MANIFEST_NAME, archive_name))
    })?;
    let prefix = manifest
        .strip_suffix(MANIFEST_NAME)
        .unwrap_or_default()
        .to_string();

    let json = read_entry_to_string(&mut archive, &manifest)?;
    let meta = RsiMeta::from_json(&json)?;

    Rsi::from_meta(meta, |state| {
        let entry = format!("{}{}", prefix, sheet_file_name(state).display());
        let mut file = archive.by_name(&entry).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => RsiError::ImageNotFound {
                path: PathBuf::from(archive_name).join(&entry),
            },
            other => other.into(),
        })?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Ok(image::load_from_memory_with_format(&data, image::ImageFormat::Png)?.to_rgba8())
    })
}

/// Shallowest `meta.json` entry, skipping macOS metadata folders.
fn find_manifest<R: Read + Seek>(archive: &ZipArchive<R>) -> Option<String> {
    archive
        .file_names()
        .filter(|name| !name.to_lowercase().contains("__macosx"))
        .filter(|name| *name == MANIFEST_NAME || name.ends_with(&format!("/{}", MANIFEST_NAME)))
        .min_by_key(|name| name.matches('/').count())
        .map(str::to_string)
}

fn read_entry_to_string<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut file = archive.by_name(name)?;
    let mut json = String::new();
    file.read_to_string(&mut json)?;
    Ok(json)
}
