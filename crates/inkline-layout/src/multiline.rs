//! Vertical stacking of rendered lines

use serde::{Deserialize, Serialize};

use crate::{EdgeSizes, LayoutError, Result, Size};

/// Horizontal alignment of a line within the stack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Stack constraints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiLineSpec {
    /// Vertical gap between lines before scaling
    pub line_gap: f32,
    pub alignment: Alignment,
    pub width: f32,
    pub height: f32,
    pub padding: EdgeSizes,
    /// Add the padding outside a width x height box instead of inside it
    pub margin_padding: bool,
}

impl MultiLineSpec {
    pub const DEFAULT_LINE_GAP: f32 = 2.0;
}

impl Default for MultiLineSpec {
    fn default() -> Self {
        Self {
            line_gap: Self::DEFAULT_LINE_GAP,
            alignment: Alignment::default(),
            width: 0.0,
            height: 0.0,
            padding: EdgeSizes::default(),
            margin_padding: false,
        }
    }
}

/// Where every line goes on the final canvas
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    /// Final canvas size
    pub width: f32,
    pub height: f32,
    /// Uniform scale applied to the whole stack
    pub scale: f32,
    /// Unscaled stack size
    pub content: Size,
    /// Top-left of the scaled stack on the canvas
    pub offset_x: f32,
    pub offset_y: f32,
    /// Unscaled top-left of each line inside the stack, first line on top
    pub lines: Vec<(f32, f32)>,
    /// Rectangle a border or background is drawn in: x, y, width, height
    pub border_box: (f32, f32, f32, f32),
}

impl StackLayout {
    /// Canvas position of line `index`; the line is drawn at `scale`
    pub fn line_origin(&self, index: usize) -> Option<(f32, f32)> {
        let (x, y) = *self.lines.get(index)?;
        Some((self.offset_x + x * self.scale, self.offset_y + y * self.scale))
    }
}

/// Stack line sizes top to bottom and fit the block to the constraints
pub fn stack_lines(sizes: &[Size], spec: &MultiLineSpec) -> Result<StackLayout> {
    if sizes.is_empty() {
        return Err(LayoutError::NoLines);
    }

    let gap = spec.line_gap.max(0.0);
    let content_w = sizes.iter().map(|s| s.width).fold(0.0_f32, f32::max);
    let content_h = sizes.iter().map(|s| s.height).sum::<f32>() + gap * (sizes.len() - 1) as f32;

    let mut lines = Vec::with_capacity(sizes.len());
    let mut y = 0.0;
    for size in sizes {
        let x = match spec.alignment {
            Alignment::Left => 0.0,
            Alignment::Center => (content_w - size.width) / 2.0,
            Alignment::Right => content_w - size.width,
        };
        lines.push((x, y));
        y += size.height + gap;
    }

    let pad = spec.padding.clamped();
    let (w, h) = (spec.width, spec.height);
    let insufficient = || LayoutError::InsufficientSpace { width: w, height: h };
    if content_w <= 0.0 || content_h <= 0.0 {
        return Err(insufficient());
    }

    let (width, height, scale, offset_x, offset_y, border_box) = match (w > 0.0, h > 0.0) {
        (false, false) => {
            let width = content_w + pad.horizontal();
            let height = content_h + pad.vertical();
            (width, height, 1.0, pad.left, pad.top, (0.0, 0.0, width, height))
        }
        (true, false) => {
            let scale = (w - pad.horizontal()) / content_w;
            let height = content_h * scale + pad.vertical();
            (w, height, scale, pad.left, pad.top, (0.0, 0.0, w, height))
        }
        (false, true) => {
            let scale = (h - pad.vertical()) / content_h;
            let width = content_w * scale + pad.horizontal();
            (width, h, scale, pad.left, pad.top, (0.0, 0.0, width, h))
        }
        (true, true) if spec.margin_padding => {
            let scale = (w / content_w).min(h / content_h);
            let offset_x = pad.left + (w - content_w * scale) / 2.0;
            let offset_y = pad.top + (h - content_h * scale) / 2.0;
            let width = w + pad.horizontal();
            let height = h + pad.vertical();
            (width, height, scale, offset_x, offset_y, (pad.left, pad.top, w, h))
        }
        (true, true) => {
            let inner_w = w - pad.horizontal();
            let inner_h = h - pad.vertical();
            let scale = (inner_w / content_w).min(inner_h / content_h);
            let offset_x = pad.left + (inner_w - content_w * scale) / 2.0;
            let offset_y = pad.top + (inner_h - content_h * scale) / 2.0;
            (w, h, scale, offset_x, offset_y, (0.0, 0.0, w, h))
        }
    };

    if scale.is_nan() || scale <= 0.0 {
        return Err(insufficient());
    }

    let layout = StackLayout {
        width,
        height,
        scale,
        content: Size::new(content_w, content_h),
        offset_x,
        offset_y,
        lines,
        border_box,
    };
    tracing::debug!(
        "Stacked {} lines into {}x{} at scale {}",
        sizes.len(),
        layout.width,
        layout.height,
        layout.scale
    );
    Ok(layout)
}
