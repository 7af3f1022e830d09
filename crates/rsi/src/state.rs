//! Animation states.

use image::RgbaImage;
use serde_json::{Map, Value};

use crate::error::{Result, RsiError};
use crate::meta::StateMeta;

/// How many facing directions a state is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directions {
    /// Same sprite regardless of facing
    #[default]
    One,
    /// South, north, east, west
    Four,
    /// The four cardinals plus diagonals
    Eight,
}

impl Directions {
    /// Number of directions.
    pub fn count(self) -> usize {
        match self {
            Directions::One => 1,
            Directions::Four => 4,
            Directions::Eight => 8,
        }
    }
}

impl TryFrom<u32> for Directions {
    type Error = RsiError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Directions::One),
            4 => Ok(Directions::Four),
            8 => Ok(Directions::Eight),
            other => Err(RsiError::invalid_format(format!(
                "unsupported direction count {}",
                other
            ))),
        }
    }
}

/// A named animation unit. The name is the key it is stored under in
/// [`crate::Rsi`], not part of the state itself.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    directions: Directions,
    /// Frames per direction; every direction holds at least one frame.
    frames: Vec<Vec<RgbaImage>>,
    delays: Option<Vec<Vec<f32>>>,
    flags: Map<String, Value>,
}

impl State {
    /// Build a state from per-direction frames.
    ///
    /// When `delays` is given it must hold one delay per frame for every
    /// direction.
    pub fn new(
        directions: Directions,
        frames: Vec<Vec<RgbaImage>>,
        delays: Option<Vec<Vec<f32>>>,
    ) -> Result<Self> {
        if frames.len() != directions.count() {
            return Err(RsiError::invalid_format(format!(
                "expected frames for {} directions, got {}",
                directions.count(),
                frames.len()
            )));
        }
        if frames.iter().any(Vec::is_empty) {
            return Err(RsiError::invalid_format("direction without frames"));
        }
        if let Some(delays) = &delays {
            let matches = delays.len() == frames.len()
                && delays.iter().zip(&frames).all(|(d, f)| d.len() == f.len());
            if !matches {
                return Err(RsiError::invalid_format(
                    "delays do not match the number of frames",
                ));
            }
        } else if frames.iter().any(|f| f.len() > 1) {
            return Err(RsiError::invalid_format("animated state without delays"));
        }

        Ok(Self {
            directions,
            frames,
            delays,
            flags: Map::new(),
        })
    }

    /// A single-direction, single-frame state.
    pub fn single(frame: RgbaImage) -> Self {
        Self {
            directions: Directions::One,
            frames: vec![vec![frame]],
            delays: None,
            flags: Map::new(),
        }
    }

    /// Replace the flags map.
    pub fn with_flags(mut self, flags: Map<String, Value>) -> Self {
        self.flags = flags;
        self
    }

    pub fn directions(&self) -> Directions {
        self.directions
    }

    pub fn delays(&self) -> Option<&[Vec<f32>]> {
        self.delays.as_deref()
    }

    pub fn flags(&self) -> &Map<String, Value> {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.flags
    }

    /// Frames of one direction (empty slice for an out of range index).
    pub fn frames(&self, direction: usize) -> &[RgbaImage] {
        self.frames.get(direction).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All frames in sheet order: direction-major.
    pub fn all_frames(&self) -> impl Iterator<Item = &RgbaImage> + '_ {
        self.frames.iter().flatten()
    }

    /// Total frame count across every direction.
    pub fn frame_count(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }

    /// The first frame facing the first direction; used as the state's icon.
    pub fn first_frame(&self) -> Option<&RgbaImage> {
        self.frames.first().and_then(|d| d.first())
    }

    /// Whether any direction has more than one frame.
    pub fn is_animated(&self) -> bool {
        self.frames.iter().any(|f| f.len() > 1)
    }

    /// Manifest entry for this state under `name`.
    pub fn to_meta(&self, name: &str) -> StateMeta {
        StateMeta {
            name: name.to_string(),
            directions: self.directions.count() as u32,
            delays: self.delays.clone(),
            flags: if self.flags.is_empty() {
                None
            } else {
                Some(self.flags.clone())
            },
        }
    }
}
