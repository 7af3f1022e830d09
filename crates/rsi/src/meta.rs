//! The `meta.json` manifest of an RSI bundle.
//!
//! The manifest describes the sprite size shared by every frame, the optional
//! license and copyright strings, and one entry per state. Frame pixels live in
//! one PNG sheet per state next to the manifest (see [`crate::sheet`]).

use serde::{Deserialize, Serialize};

use crate::error::{Result, RsiError};

/// Manifest version understood by this library.
pub const RSI_VERSION: u32 = 1;

/// File name of the manifest inside a bundle.
pub const MANIFEST_NAME: &str = "meta.json";

/// Frame size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeMeta {
    /// Frame width
    pub x: u32,
    /// Frame height
    pub y: u32,
}

/// Top-level manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiMeta {
    /// Manifest format version.
    pub version: u32,

    /// License identifier (usually an SPDX id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Free-form attribution text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    /// Size of every frame.
    pub size: SizeMeta,

    /// States in file order.
    #[serde(default)]
    pub states: Vec<StateMeta>,
}

/// A single state entry in the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMeta {
    /// State name, also the sheet file stem.
    pub name: String,

    /// Number of directions (1, 4 or 8).
    #[serde(default = "default_directions", skip_serializing_if = "is_single_direction")]
    pub directions: u32,

    /// Per-direction frame delays in seconds. Absent for unanimated states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delays: Option<Vec<Vec<f32>>>,

    /// Arbitrary flags, preserved untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<serde_json::Map<String, serde_json::Value>>,
}

fn default_directions() -> u32 {
    1
}

fn is_single_direction(directions: &u32) -> bool {
    *directions == 1
}

impl RsiMeta {
    /// Create an empty manifest for the given frame size.
    pub fn new(x: u32, y: u32) -> Self {
        Self {
            version: RSI_VERSION,
            license: None,
            copyright: None,
            size: SizeMeta { x, y },
            states: Vec::new(),
        }
    }

    /// Parse and validate a manifest.
    pub fn from_json(json: &str) -> Result<Self> {
        let meta: Self = serde_json::from_str(json)?;
        meta.validate()?;
        Ok(meta)
    }

    /// Serialize the manifest.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check structural constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.version != RSI_VERSION {
            return Err(RsiError::VersionMismatch {
                expected: RSI_VERSION,
                found: self.version,
            });
        }

        if self.size.x == 0 || self.size.y == 0 {
            return Err(RsiError::invalid_format(format!(
                "frame size must be non-zero, got {}x{}",
                self.size.x, self.size.y
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for state in &self.states {
            if !seen.insert(state.name.as_str()) {
                return Err(RsiError::invalid_format(format!(
                    "duplicate state '{}'",
                    state.name
                )));
            }
            state.validate()?;
        }

        Ok(())
    }
}

impl StateMeta {
    /// Number of frames in each direction, in direction order.
    pub fn frames_per_direction(&self) -> Vec<usize> {
        match &self.delays {
            Some(delays) => delays.iter().map(Vec::len).collect(),
            None => vec![1; self.directions as usize],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RsiError::invalid_format("state with empty name"));
        }

        if !matches!(self.directions, 1 | 4 | 8) {
            return Err(RsiError::invalid_format(format!(
                "state '{}' has {} directions, expected 1, 4 or 8",
                self.name, self.directions
            )));
        }

        if let Some(delays) = &self.delays {
            if delays.len() != self.directions as usize {
                return Err(RsiError::invalid_format(format!(
                    "state '{}' has {} delay lists for {} directions",
                    self.name,
                    delays.len(),
                    self.directions
                )));
            }
            if delays.iter().any(Vec::is_empty) {
                return Err(RsiError::invalid_format(format!(
                    "state '{}' has a direction without frames",
                    self.name
                )));
            }
        }

        Ok(())
    }
}
