//! Sprite sheet slicing and packing.
//!
//! A sheet is a grid of equally sized cells read left to right, top to bottom.
//! Frames are laid out direction-major: every frame of the first direction,
//! then every frame of the second, and so on.

use image::{RgbaImage, imageops};

use crate::error::{Result, RsiError};

/// Grid dimensions `(columns, rows)` used when writing `total` frames.
///
/// Sheets are kept close to square so they stay within texture limits.
pub fn grid_dimensions(total: usize) -> (u32, u32) {
    if total == 0 {
        return (0, 0);
    }
    let columns = (total as f64).sqrt().ceil() as usize;
    let rows = total.div_ceil(columns);
    (columns as u32, rows as u32)
}

/// Cut a sheet into per-direction frames.
pub fn slice_sheet(
    state: &str,
    sheet: &RgbaImage,
    (width, height): (u32, u32),
    frames_per_direction: &[usize],
) -> Result<Vec<Vec<RgbaImage>>> {
    let columns = sheet.width() / width;
    let rows = sheet.height() / height;
    let capacity = (columns * rows) as usize;
    let total: usize = frames_per_direction.iter().sum();

    if total > capacity {
        return Err(RsiError::invalid_sheet(
            state,
            format!(
                "{}x{} sheet holds {} frames of {}x{}, manifest declares {}",
                sheet.width(),
                sheet.height(),
                capacity,
                width,
                height,
                total
            ),
        ));
    }

    let mut index = 0u32;
    let mut directions = Vec::with_capacity(frames_per_direction.len());
    for &count in frames_per_direction {
        let mut frames = Vec::with_capacity(count);
        for _ in 0..count {
            let x = (index % columns) * width;
            let y = (index / columns) * height;
            frames.push(imageops::crop_imm(sheet, x, y, width, height).to_image());
            index += 1;
        }
        directions.push(frames);
    }

    log::trace!("Sliced {} frames from sheet '{}'", total, state);
    Ok(directions)
}

/// Pack frames into a fresh sheet. Unused cells stay transparent.
pub fn pack_sheet<'a>(
    frames: impl IntoIterator<Item = &'a RgbaImage>,
    (width, height): (u32, u32),
) -> RgbaImage {
    let frames: Vec<&RgbaImage> = frames.into_iter().collect();
    let (columns, rows) = grid_dimensions(frames.len());
    let mut sheet = RgbaImage::new(columns * width, rows * height);

    for (index, frame) in frames.into_iter().enumerate() {
        let index = index as u32;
        let x = (index % columns) * width;
        let y = (index / columns) * height;
        imageops::replace(&mut sheet, frame, i64::from(x), i64::from(y));
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame(shade: u8) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([shade, 0, 0, 255]))
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions(0), (0, 0));
        assert_eq!(grid_dimensions(1), (1, 1));
        assert_eq!(grid_dimensions(2), (2, 1));
        assert_eq!(grid_dimensions(4), (2, 2));
        assert_eq!(grid_dimensions(5), (3, 2));
        assert_eq!(grid_dimensions(8), (3, 3));
        assert_eq!(grid_dimensions(9), (3, 3));
        assert_eq!(grid_dimensions(10), (4, 3));
    }

    #[test]
    fn test_pack_layout() {
        let frames: Vec<RgbaImage> = (1..=5).map(frame).collect();
        let sheet = pack_sheet(frames.iter(), (2, 2));

        assert_eq!(sheet.dimensions(), (6, 4));
        // Third frame ends the first row, fourth starts the second
        assert_eq!(sheet.get_pixel(4, 0)[0], 3);
        assert_eq!(sheet.get_pixel(0, 2)[0], 4);
        // Sixth cell is empty
        assert_eq!(sheet.get_pixel(4, 2)[3], 0);
    }

    #[test]
    fn test_slice_follows_sheet_width() {
        // A 4-wide single row, as written by other tools
        let mut sheet = RgbaImage::new(8, 2);
        for i in 0..4u8 {
            imageops::replace(&mut sheet, &frame(i + 1), i64::from(i) * 2, 0);
        }

        let frames = slice_sheet("walk", &sheet, (2, 2), &[2, 2]).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0][1].get_pixel(0, 0)[0], 2);
        assert_eq!(frames[1][0].get_pixel(0, 0)[0], 3);
    }

    #[test]
    fn test_slice_rejects_small_sheet() {
        let sheet = RgbaImage::new(2, 2);
        let err = slice_sheet("walk", &sheet, (2, 2), &[1, 1]).unwrap_err();
        assert!(matches!(err, RsiError::InvalidSheet { .. }));
    }

    #[test]
    fn test_pack_then_slice_preserves_order() {
        let frames: Vec<RgbaImage> = (1..=8).map(frame).collect();
        let sheet = pack_sheet(frames.iter(), (2, 2));
        let sliced = slice_sheet("s", &sheet, (2, 2), &[2, 2, 2, 2]).unwrap();
        let flat: Vec<RgbaImage> = sliced.into_iter().flatten().collect();
        assert_eq!(flat, frames);
    }
}
