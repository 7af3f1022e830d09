//! View model for the editor window.
//!
//! [`EditorView::build`] turns the document into everything the window shows.
//! The window throws the previous view away and builds a new one whenever the
//! editor's revision or the display preferences change; nothing is patched in
//! place.

use image::imageops::{self, FilterType};
use rsi::{RgbaImage, State};

use crate::config::Preferences;
use crate::document::Document;

/// One state as shown in the states panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTile {
    /// State name, also the label text
    pub name: String,
    /// Thumbnail scaled to fit the icon box
    pub icon: Option<RgbaImage>,
    /// Hover text describing the state
    pub summary: String,
}

/// Contents of the metadata form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataForm {
    /// Read-only size line
    pub size_text: String,
    /// License field contents
    pub license: String,
    /// Copyright field contents
    pub copyright: String,
}

/// Everything the central panel draws for one document revision.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorView {
    /// Editor revision this view was built from
    pub revision: u64,
    /// One tile per state, in document order
    pub tiles: Vec<StateTile>,
    /// Metadata form
    pub metadata: MetadataForm,
    /// Edge length of the icon box
    pub icon_size: u32,
    /// Widest a state label may be
    pub label_max_width: f32,
}

impl EditorView {
    /// Build a fresh view of `document`.
    pub fn build(document: &Document, revision: u64, preferences: &Preferences) -> Self {
        let icon_size = preferences.icon_size.max(1);

        let tiles = document
            .states()
            .iter()
            .map(|(name, state)| StateTile {
                name: name.clone(),
                icon: state.first_frame().map(|frame| render_icon(frame, icon_size)),
                summary: summarize(state),
            })
            .collect();

        let (x, y) = document.size();
        let metadata = MetadataForm {
            size_text: format!("x: {}, y: {}", x, y),
            license: document.license().to_string(),
            copyright: document.copyright().to_string(),
        };

        log::debug!(
            "Built view for revision {} ({} states)",
            revision,
            document.states().len()
        );

        Self {
            revision,
            tiles,
            metadata,
            icon_size,
            label_max_width: icon_size as f32 * preferences.state_name_factor,
        }
    }
}

/// Scale a frame to fit an `icon_size` square, keeping its aspect ratio.
///
/// Nearest-neighbour filtering keeps pixel art crisp.
pub fn render_icon(frame: &RgbaImage, icon_size: u32) -> RgbaImage {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return RgbaImage::new(icon_size, icon_size);
    }

    let scale = f64::from(icon_size) / f64::from(width.max(height));
    let target_w = ((f64::from(width) * scale).round() as u32).max(1);
    let target_h = ((f64::from(height) * scale).round() as u32).max(1);

    imageops::resize(frame, target_w, target_h, FilterType::Nearest)
}

fn summarize(state: &State) -> String {
    let directions = state.directions().count();
    let frames = state.frame_count();
    let mut summary = format!(
        "{} direction{}, {} frame{}",
        directions,
        if directions == 1 { "" } else { "s" },
        frames,
        if frames == 1 { "" } else { "s" }
    );
    if !state.flags().is_empty() {
        summary.push_str(&format!(", flags: {}", serde_json::Value::Object(state.flags().clone())));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsi::{Directions, Rsi};

    fn sample_document() -> Document {
        let mut rsi = Rsi::new((32, 16));
        rsi.set_license(Some("CC-BY-SA-3.0".to_string()));
        rsi.set_state(State::single(RgbaImage::new(32, 16)), "idle");
        let frames = (0..4).map(|_| vec![RgbaImage::new(32, 16); 3]).collect();
        let walk = State::new(Directions::Four, frames, Some(vec![vec![0.1; 3]; 4])).unwrap();
        rsi.set_state(walk, "walk");
        Document::new(rsi, None)
    }

    #[test]
    fn test_build_tiles_in_order() {
        let view = EditorView::build(&sample_document(), 3, &Preferences::default());

        assert_eq!(view.revision, 3);
        let names: Vec<&str> = view.tiles.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["idle", "walk"]);
        assert_eq!(view.tiles[0].summary, "1 direction, 1 frame");
        assert_eq!(view.tiles[1].summary, "4 directions, 12 frames");
    }

    #[test]
    fn test_build_metadata_form() {
        let view = EditorView::build(&sample_document(), 0, &Preferences::default());

        assert_eq!(view.metadata.size_text, "x: 32, y: 16");
        assert_eq!(view.metadata.license, "CC-BY-SA-3.0");
        assert_eq!(view.metadata.copyright, "");
    }

    #[test]
    fn test_label_width_follows_icon_size() {
        let preferences = Preferences::default();
        let view = EditorView::build(&sample_document(), 0, &preferences);
        assert_eq!(view.icon_size, 50);
        assert!((view.label_max_width - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_icons_fit_box() {
        let view = EditorView::build(&sample_document(), 0, &Preferences::default());
        let icon = view.tiles[0].icon.as_ref().unwrap();
        assert_eq!(icon.dimensions(), (50, 25));
    }

    #[test]
    fn test_render_icon_upscales_square() {
        let frame = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let icon = render_icon(&frame, 50);
        assert_eq!(icon.dimensions(), (50, 50));
        assert_eq!(icon.get_pixel(49, 49), &image::Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_rebuild_after_rename_reflects_document() {
        let mut document = sample_document();
        let before = EditorView::build(&document, 0, &Preferences::default());

        document.rename_state("idle", "standing");
        let after = EditorView::build(&document, 1, &Preferences::default());

        assert_ne!(before, after);
        assert_eq!(after.tiles[1].name, "standing");
    }
}
