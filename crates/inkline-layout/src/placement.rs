//! Placement of pre-rendered items on a fixed-size canvas

use serde::{Deserialize, Serialize};

use crate::{Alignment, Size};

/// Vertical alignment of an item on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Where an item goes and how large it is drawn
///
/// `width` and `height` are target sizes; zero means "derive it". `x` and
/// `y` shift the aligned position, y-down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub align: Alignment,
    pub valign: VAlign,
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

/// Resolved placement: draw at `(x, y)` scaled by `(scale_x, scale_y)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    /// Place an item of `natural` size on a `canvas` sized surface
    ///
    /// - neither size set: natural size, shrunk uniformly to fit the canvas
    /// - both set: each axis scaled independently
    /// - one set: uniform scale from that axis
    pub fn place(&self, natural: Size, canvas: Size) -> Placed {
        let (scale_x, scale_y) = match (self.width > 0.0, self.height > 0.0) {
            (false, false) => {
                let fit = (canvas.width / natural.width)
                    .min(canvas.height / natural.height)
                    .min(1.0);
                (fit, fit)
            }
            (true, true) => (self.width / natural.width, self.height / natural.height),
            (false, true) => {
                let s = self.height / natural.height;
                (s, s)
            }
            (true, false) => {
                let s = self.width / natural.width;
                (s, s)
            }
        };
        let width = natural.width * scale_x;
        let height = natural.height * scale_y;

        let x = match self.align {
            Alignment::Left => 0.0,
            Alignment::Center => (canvas.width - width) / 2.0,
            Alignment::Right => canvas.width - width,
        };
        let y = match self.valign {
            VAlign::Top => 0.0,
            VAlign::Center => (canvas.height - height) / 2.0,
            VAlign::Bottom => canvas.height - height,
        };

        Placed {
            x: x + self.x,
            y: y + self.y,
            scale_x,
            scale_y,
            width,
            height,
        }
    }
}
