//! inkline DPI - Resolution Metadata Patcher
//!
//! Rewrites the physical resolution stored in already-encoded images
//! without touching pixel data:
//! - PNG: `pHYs` chunk (inserted or replaced)
//! - JPEG: JFIF `APP0` density fields and EXIF `APP1` resolution tags

pub mod jpeg;
pub mod png;

use std::fs;
use std::path::Path;

/// Container formats the patcher understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// Guess from a file extension (case-insensitive)
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// Inspect the leading bytes of an encoded image
pub fn detect_format(data: &[u8]) -> Result<ImageKind> {
    if data.starts_with(&png::SIGNATURE) {
        return Ok(ImageKind::Png);
    }
    if data.starts_with(&[0xFF, jpeg::SOI, 0xFF]) {
        return Ok(ImageKind::Jpeg);
    }
    Err(DpiError::UnsupportedFormat)
}

/// Patch the resolution of a PNG or JPEG buffer
pub fn change_dpi(data: &[u8], dpi: u32) -> Result<Vec<u8>> {
    match detect_format(data)? {
        ImageKind::Png => png::set_dpi(data, dpi),
        ImageKind::Jpeg => jpeg::set_dpi(data, dpi),
    }
}

/// Patch the resolution of an image file, writing the result to `output`
///
/// `output` may equal `input`. The patched file is written in one call,
/// so a failure never leaves a half-written image behind.
pub fn change_dpi_file(input: &Path, output: &Path, dpi: u32) -> Result<()> {
    if ImageKind::from_extension(input).is_none() {
        return Err(DpiError::UnsupportedFormat);
    }

    let data = fs::read(input)?;
    let patched = change_dpi(&data, dpi)?;
    fs::write(output, patched)?;

    tracing::debug!("Set {} DPI on {}", dpi, output.display());
    Ok(())
}

/// DPI patching errors
#[derive(Debug, thiserror::Error)]
pub enum DpiError {
    #[error("unsupported image format")]
    UnsupportedFormat,

    #[error("invalid PNG: {0}")]
    InvalidPng(&'static str),

    #[error("invalid JPEG: missing SOI marker")]
    InvalidJpeg,

    #[error("invalid JPEG segment at offset {offset}")]
    InvalidJpegSegment { offset: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DpiError>;
