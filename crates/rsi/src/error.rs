//! Error types for RSI bundle operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing an RSI bundle.
#[derive(Error, Debug)]
pub enum RsiError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// PNG decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Zip archive error
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Manifest version this library does not understand
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Supported manifest version
        expected: u32,
        /// Version declared by the manifest
        found: u32,
    },

    /// Invalid manifest structure or content
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },

    /// Sprite sheet for a state is missing
    #[error("Image not found: {path:?}")]
    ImageNotFound {
        /// Path where the sheet was expected
        path: PathBuf,
    },

    /// Sprite sheet does not hold the frames the manifest declares
    #[error("Invalid sprite sheet for state '{state}': {message}")]
    InvalidSheet {
        /// The state whose sheet is malformed
        state: String,
        /// Description of the problem
        message: String,
    },
}

impl RsiError {
    /// Create an invalid format error with a message.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create an invalid sheet error.
    pub fn invalid_sheet(state: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSheet {
            state: state.into(),
            message: message.into(),
        }
    }
}

/// Result alias for RSI operations.
pub type Result<T> = std::result::Result<T, RsiError>;
