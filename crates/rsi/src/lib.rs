//! Robust Station Image (RSI) bundles.
//!
//! An RSI is a directory holding a `meta.json` manifest and one PNG sprite
//! sheet per animation state. This crate loads bundles from directories or zip
//! archives into an [`Rsi`], lets callers edit metadata and the state map, and
//! writes bundles back out as directories.

pub mod archive;
mod bundle;
pub mod error;
pub mod meta;
pub mod sheet;
mod state;

pub use bundle::{Rsi, is_valid_state_name};
pub use error::{Result, RsiError};
pub use meta::{MANIFEST_NAME, RSI_VERSION, RsiMeta, SizeMeta, StateMeta};
pub use state::{Directions, State};

/// Re-exported so callers can build frames without depending on `image`.
pub use image::RgbaImage;
