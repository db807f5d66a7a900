//! ttf-parser outline to tiny-skia path conversion

use tiny_skia::{Path, PathBuilder};
use ttf_parser::OutlineBuilder;

/// Collects glyph outlines into one path
///
/// Font units are scaled to points and the y axis is flipped, so the
/// baseline sits at `origin_y` and ascenders extend to smaller y values.
pub(crate) struct OutlinePath {
    builder: PathBuilder,
    scale: f32,
    origin_x: f32,
    origin_y: f32,
}

impl OutlinePath {
    pub(crate) fn new(scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            scale,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }

    /// Move the pen for the next glyph, in points
    pub(crate) fn set_origin(&mut self, x: f32, y: f32) {
        self.origin_x = x;
        self.origin_y = y;
    }

    fn transform_x(&self, x: f32) -> f32 {
        self.origin_x + x * self.scale
    }

    fn transform_y(&self, y: f32) -> f32 {
        self.origin_y - y * self.scale // Flip Y axis
    }

    pub(crate) fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for OutlinePath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.transform_x(x), self.transform_y(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.transform_x(x), self.transform_y(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(
            self.transform_x(x1), self.transform_y(y1),
            self.transform_x(x), self.transform_y(y),
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.transform_x(x1), self.transform_y(y1),
            self.transform_x(x2), self.transform_y(y2),
            self.transform_x(x), self.transform_y(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
