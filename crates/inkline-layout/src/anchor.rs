//! Annotation placement presets

use serde::{Deserialize, Serialize};

use crate::Size;

/// Named position for an annotation on the canvas
///
/// Positions are returned the way annotations are specified: x is the
/// left edge of the annotation and y the distance from the canvas bottom
/// to the annotation bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// `(x, y)` for an item of `item` size, `margin` away from the edges
    pub fn position(self, canvas: Size, item: Size, margin: f32) -> (f32, f32) {
        let left = margin;
        let center_x = (canvas.width - item.width) / 2.0;
        let right = canvas.width - item.width - margin;
        let bottom = margin;
        let center_y = (canvas.height - item.height) / 2.0;
        let top = canvas.height - item.height - margin;

        match self {
            Self::TopLeft => (left, top),
            Self::TopCenter => (center_x, top),
            Self::TopRight => (right, top),
            Self::Center => (center_x, center_y),
            Self::BottomLeft => (left, bottom),
            Self::BottomCenter => (center_x, bottom),
            Self::BottomRight => (right, bottom),
        }
    }
}
