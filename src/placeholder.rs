//! Placeholder profile image: drawn with the `image` crate when the `render`
//! feature is on, otherwise the minimal JPEG byte sequence.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

/// Minimal JPEG byte stream: SOI marker, JFIF APP0 segment with 1x1 density
/// and no thumbnail, EOI marker. Carries no scan data; it exists to satisfy
/// file-type sniffing where a real image is not available.
pub const MINIMAL_JPEG: [u8; 22] = [
    0xFF, 0xD8, // SOI
    0xFF, 0xE0, 0x00, 0x10, // APP0, length 16
    0x4A, 0x46, 0x49, 0x46, 0x00, // "JFIF\0"
    0x01, 0x01, // version 1.1
    0x00, // aspect ratio units
    0x00, 0x01, 0x00, 0x01, // density 1x1
    0x00, 0x00, // no thumbnail
    0xFF, 0xD9, // EOI
];

/// Which placeholder variant was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Flat-color square rendered through the `image` crate.
    Rendered,
    /// The fixed [`MINIMAL_JPEG`] bytes.
    MinimalJpeg,
}

impl fmt::Display for PlaceholderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderKind::Rendered => write!(f, "rendered"),
            PlaceholderKind::MinimalJpeg => write!(f, "minimal JPEG"),
        }
    }
}

/// Write [`MINIMAL_JPEG`] to `path`.
pub fn write_minimal_jpeg(path: &Path) -> Result<()> {
    std::fs::write(path, MINIMAL_JPEG)
        .with_context(|| format!("write placeholder to {}", path.display()))
}

/// Write a placeholder profile image to `path` and report which kind.
#[cfg(feature = "render")]
pub fn write_placeholder(path: &Path) -> Result<PlaceholderKind> {
    use crate::utils::config::{PLACEHOLDER_RGB, PLACEHOLDER_SIZE};
    use image::{ImageBuffer, Rgb, RgbImage};

    let (width, height) = PLACEHOLDER_SIZE;
    let img: RgbImage = ImageBuffer::from_pixel(width, height, Rgb(PLACEHOLDER_RGB));
    img.save(path)
        .with_context(|| format!("render placeholder to {}", path.display()))?;
    Ok(PlaceholderKind::Rendered)
}

/// Write a placeholder profile image to `path` and report which kind.
#[cfg(not(feature = "render"))]
pub fn write_placeholder(path: &Path) -> Result<PlaceholderKind> {
    write_minimal_jpeg(path)?;
    Ok(PlaceholderKind::MinimalJpeg)
}
