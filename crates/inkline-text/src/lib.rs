//! inkline Text - Fonts and Glyph Outlines
//!
//! This crate turns text into vector outlines:
//! - Font loading from files or system families (fontdb)
//! - Per-glyph outlines with advances and bounds (ttf-parser)
//! - Whole-string outlines from shaped text (rustybuzz)

mod face;
pub mod font;
mod outline;

pub use face::{FontFace, GlyphOutline};
pub use font::{FileLoader, Font, FontDatabase, FontLoader, FontManager, SystemLoader};

/// Text error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("font load failed for {spec:?}: {last}")]
    FontLoad {
        spec: String,
        #[source]
        last: Box<TextError>,
    },

    #[error("Shaping failed: {0}")]
    ShapingFailed(String),

    #[error("No outline produced for {0:?}")]
    EmptyPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TextError>;
