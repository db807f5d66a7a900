//! inkline Render - Vector Canvas and Encoders
//!
//! A small display-list canvas that text composition draws into, and the
//! encoders that turn it into files:
//! - SVG (svg), PDF (pdf-writer)
//! - PNG/JPEG/TIFF (tiny-skia rasterization, image for containers)
//! - SVG post-processing for third-party vector editors
//! - SVG import through usvg

mod canvas;
pub mod export;
mod format;
pub mod import;
pub mod shapes;
pub mod svg_post;
mod transform;

pub use canvas::{Canvas, Context, DrawItem, DrawState, StrokeStyle};
pub use export::{encode, save, to_jpeg, to_pdf, to_pixmap, to_png, to_svg, to_tiff, write_file};
pub use format::{OutputFormat, SaveConfig};
pub use import::{import_svg, import_svg_file};
pub use transform::Transform2D;

pub use tiny_skia::{Path, PathBuilder, Rect};

use std::str::FromStr;

/// Color (RGBA)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (the `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Parse a color name or hex string, falling back to black
    pub fn resolve(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!("Unrecognized color {:?}, using black", value);
            Self::BLACK
        })
    }

    /// `#rrggbb`, alpha is exported separately
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha as 0.0-1.0
    pub fn alpha(&self) -> f32 {
        self.a as f32 / 255.0
    }

    pub fn to_tiny_skia(&self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        named(trimmed)
            .or_else(|| Self::from_hex(trimmed))
            .ok_or_else(|| RenderError::InvalidColor(s.to_string()))
    }
}

/// Look up a predefined color name (case-insensitive)
pub fn named(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "transparent" | "none" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::rgb(255, 0, 0),
        "green" => Color::rgb(0, 255, 0),
        "blue" => Color::rgb(0, 0, 255),
        "yellow" => Color::rgb(255, 255, 0),
        "orange" => Color::rgb(255, 165, 0),
        "purple" => Color::rgb(128, 0, 128),
        "pink" => Color::rgb(255, 192, 203),
        "brown" => Color::rgb(139, 69, 19),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "cyan" => Color::rgb(0, 255, 255),
        _ => return None,
    };
    Some(color)
}

/// Rendering error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("empty save path")]
    EmptySavePath,

    #[error("invalid canvas size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    #[error("encoding {format} failed: {reason}")]
    Encode { format: &'static str, reason: String },

    #[error("SVG parse failed: {0}")]
    SvgParse(#[from] usvg::Error),

    #[error("SVG rewrite failed: {0}")]
    SvgRewrite(#[from] quick_xml::Error),

    #[error("DPI update failed: {0}")]
    Dpi(#[from] inkline_dpi::DpiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
