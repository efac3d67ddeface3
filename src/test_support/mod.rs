//! Shared helpers for unit tests that need a local mock HTTP server.

#[path = "../../tests/support/socket_guard.rs"]
pub mod socket_guard;

/// Encodes a solid-colour PNG of the given size for use as a mock cover.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}
