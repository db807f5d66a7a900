//! inkline Engine
//!
//! Text to vector graphics: renders a string in a given font into a sized
//! canvas with per-character colours, stroke, background, annotations and
//! mirroring, stacks several lines, composes items on a fixed canvas, and
//! saves the result as SVG, PNG, JPEG, PDF or TIFF with correct DPI
//! metadata.
//!
//! # Example
//! ```rust,ignore
//! use inkline_engine::{Engine, Config, TextOptions, ColorSpec};
//!
//! let engine = Engine::new(Config::default());
//! let mut options = TextOptions::new("Hello", "DejaVu Sans", 48.0);
//! options.colors = ColorSpec::Palette(vec!["#e63946".into(), "#1d3557".into()]);
//! options.width = 400.0;
//! let svg = engine.convert(&options)?;
//! ```

mod compose;
mod config;
mod engine;
mod options;
mod output;

pub use compose::{Background, Rendered};
pub use config::Config;
pub use engine::Engine;
pub use options::{
    BackgroundOptions, BorderOptions, CanvasFile, CanvasItem, CanvasOptions, ColorSpec,
    ExtraText, LineSource, MultiLineOptions, RectOptions, RenderMode, SaveOptions,
    StrokeOptions, TextOptions,
};
pub use output::SvgOutput;

pub use inkline_dpi::{change_dpi, change_dpi_file};
pub use inkline_layout::{Alignment, Anchor, FitMode, Placement, VAlign};
pub use inkline_render::{Canvas, Color, OutputFormat};

// Re-export sub-crates for advanced usage
pub use inkline_dpi as dpi;
pub use inkline_layout as layout;
pub use inkline_render as render;
pub use inkline_text as text;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("text is empty")]
    EmptyText,

    #[error("empty save path")]
    EmptySavePath,

    #[error("no usable lines")]
    NoLines,

    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: f32, height: f32 },

    #[error("font load failed: {0}")]
    FontLoad(#[source] inkline_text::TextError),

    #[error(transparent)]
    Text(#[from] inkline_text::TextError),

    #[error(transparent)]
    Layout(#[from] inkline_layout::LayoutError),

    #[error(transparent)]
    Render(#[from] inkline_render::RenderError),

    #[error(transparent)]
    Dpi(#[from] inkline_dpi::DpiError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
