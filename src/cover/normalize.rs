//! Decode, resize and re-encode cover images.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use super::CoverError;

/// Target pixel size every cover is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TargetSize {
    /// Creates a target size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self::new(200, 300)
    }
}

/// Decodes `bytes` (any enabled format), resizes to exactly `size` and
/// re-encodes as PNG.
///
/// Catmull-Rom is the bicubic filter; aspect ratio is not preserved, every
/// tile ends up the same size.
///
/// # Errors
///
/// Returns [`CoverError::Image`] when the bytes are not a decodable image.
pub fn normalize_cover(bytes: &[u8], size: TargetSize) -> Result<Vec<u8>, CoverError> {
    let decoded = image::load_from_memory(bytes)?;
    let resized = decoded.resize_exact(size.width, size.height, FilterType::CatmullRom);
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut out = Cursor::new(Vec::new());
    rgb.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
