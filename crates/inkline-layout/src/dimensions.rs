//! Canvas size and scale resolution for a single text

use serde::{Deserialize, Serialize};

use crate::EdgeSizes;

/// Width and height in points
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// How content reaches an explicit width *and* height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Independent x/y scales, content fills the box exactly
    #[default]
    Stretch,
    /// Uniform scale, content fits inside the box (CSS `object-fit: contain`)
    Contain,
    /// Uniform scale, content covers the box (CSS `object-fit: cover`)
    Cover,
}

/// Final size and the scales applied to the content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

/// Resolve the final size from optional target dimensions
///
/// Zero (or negative) targets are unset. With one target the other side
/// follows the content aspect ratio. With both, `fit` decides between
/// stretching and a uniform contain/cover scale; the size is the target
/// box either way.
pub fn resolve_size(content: Size, width: f32, height: f32, fit: FitMode) -> Resolved {
    let unscaled = Resolved {
        width: content.width,
        height: content.height,
        scale_x: 1.0,
        scale_y: 1.0,
    };
    if !content.has_area() {
        return unscaled;
    }

    let sx = width / content.width;
    let sy = height / content.height;
    let uniform = |scale: f32, width: f32, height: f32| Resolved {
        width,
        height,
        scale_x: scale,
        scale_y: scale,
    };

    match (width > 0.0, height > 0.0) {
        (false, false) => unscaled,
        (true, false) => uniform(sx, width, content.height * sx),
        (false, true) => uniform(sy, content.width * sy, height),
        (true, true) => match fit {
            FitMode::Stretch => Resolved {
                width,
                height,
                scale_x: sx,
                scale_y: sy,
            },
            FitMode::Contain => uniform(sx.min(sy), width, height),
            FitMode::Cover => uniform(sx.max(sy), width, height),
        },
    }
}

/// Grow or shrink padding so content + padding equals the locked sides
///
/// The difference is split evenly between opposing sides and never goes
/// below zero. Unset locks keep the given padding.
pub fn lock_padding(content: Size, padding: EdgeSizes, lock_width: f32, lock_height: f32) -> EdgeSizes {
    let mut padding = padding;
    if lock_width > 0.0 {
        let side = (lock_width - content.width).max(0.0) / 2.0;
        padding.left = side;
        padding.right = side;
    }
    if lock_height > 0.0 {
        let side = (lock_height - content.height).max(0.0) / 2.0;
        padding.top = side;
        padding.bottom = side;
    }
    padding
}

/// Inputs for placing one glyph run on a canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSpec {
    /// Glyph run bounds
    pub content: Size,
    /// Zero when the text is not stroked
    pub stroke_width: f32,
    pub padding: EdgeSizes,
    pub width: f32,
    pub height: f32,
    pub lock_width: f32,
    pub lock_height: f32,
    pub fit: FitMode,
}

/// Resolved placement of a glyph run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Top-left of the scaled padded box inside the canvas
    pub box_x: f32,
    pub box_y: f32,
    /// Effective padding after locking
    pub padding: EdgeSizes,
    /// Content size including stroke inflation
    pub content: Size,
    pub stroke_width: f32,
}

impl Frame {
    pub fn resolve(spec: FrameSpec) -> Self {
        let stroke_width = spec.stroke_width.max(0.0);
        let content = Size::new(
            spec.content.width + 2.0 * stroke_width,
            spec.content.height + 2.0 * stroke_width,
        );

        let padding = lock_padding(content, spec.padding.clamped(), spec.lock_width, spec.lock_height);
        let total = Size::new(
            content.width + padding.horizontal(),
            content.height + padding.vertical(),
        );

        let locked = spec.lock_width > 0.0 || spec.lock_height > 0.0;
        let resolved = if locked {
            let width = if spec.lock_width > 0.0 { spec.lock_width } else { total.width };
            let height = if spec.lock_height > 0.0 { spec.lock_height } else { total.height };
            Resolved {
                width,
                height,
                scale_x: ratio(width, total.width),
                scale_y: ratio(height, total.height),
            }
        } else {
            resolve_size(total, spec.width, spec.height, spec.fit)
        };

        let frame = Self {
            width: resolved.width,
            height: resolved.height,
            scale_x: resolved.scale_x,
            scale_y: resolved.scale_y,
            box_x: (resolved.width - total.width * resolved.scale_x) / 2.0,
            box_y: (resolved.height - total.height * resolved.scale_y) / 2.0,
            padding,
            content,
            stroke_width,
        };
        tracing::debug!(
            "Frame {}x{} scale ({}, {}) box at ({}, {})",
            frame.width,
            frame.height,
            frame.scale_x,
            frame.scale_y,
            frame.box_x,
            frame.box_y
        );
        frame
    }

    /// Offset of the glyph content box inside the unscaled padded box
    pub fn content_origin(&self) -> (f32, f32) {
        (
            self.padding.left + self.stroke_width,
            self.padding.top + self.stroke_width,
        )
    }
}

fn ratio(target: f32, actual: f32) -> f32 {
    if actual > 0.0 { target / actual } else { 1.0 }
}
