//! inkline Layout
//!
//! Closed-form geometry between glyph outlines and the final canvas:
//! glyph runs with colour slots, padding shorthand, canvas sizing,
//! vertical line stacking and item placement on a fixed canvas.

mod anchor;
mod dimensions;
mod multiline;
mod padding;
mod placement;
mod run;

pub use anchor::Anchor;
pub use dimensions::{FitMode, Frame, FrameSpec, Resolved, Size, lock_padding, resolve_size};
pub use multiline::{Alignment, MultiLineSpec, StackLayout, stack_lines};
pub use padding::EdgeSizes;
pub use placement::{Placed, Placement, VAlign};
pub use run::{ColorSlot, GlyphRun, PlacedGlyph};

/// Layout error types
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("text is empty")]
    EmptyText,

    #[error("colour palette is empty")]
    EmptyPalette,

    #[error("no lines to stack")]
    NoLines,

    #[error("no room for content in a {width}x{height} box")]
    InsufficientSpace { width: f32, height: f32 },

    #[error(transparent)]
    Text(#[from] inkline_text::TextError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
