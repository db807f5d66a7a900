//! Background shapes

use tiny_skia::{Path, PathBuilder, Rect};

/// Cubic control-point distance for a quarter circle
const KAPPA: f32 = 0.552_284_8;

/// Axis-aligned `width` x `height` rectangle at the origin
pub fn rectangle(width: f32, height: f32) -> Option<Path> {
    let rect = Rect::from_xywh(0.0, 0.0, width, height)?;
    Some(PathBuilder::from_rect(rect))
}

/// Clamp a corner radius to half of the shorter side
pub fn clamp_radius(width: f32, height: f32, radius: f32) -> f32 {
    radius.min(width / 2.0).min(height / 2.0).max(0.0)
}

/// Rounded rectangle at the origin, clockwise from the top edge
pub fn rounded_rectangle(width: f32, height: f32, radius: f32) -> Option<Path> {
    let r = clamp_radius(width, height, radius);
    if r <= 0.0 {
        return rectangle(width, height);
    }
    let k = r * KAPPA;
    let (w, h) = (width, height);

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(w - r, 0.0);
    pb.cubic_to(w - r + k, 0.0, w, r - k, w, r);
    pb.line_to(w, h - r);
    pb.cubic_to(w, h - r + k, w - r + k, h, w - r, h);
    pb.line_to(r, h);
    pb.cubic_to(r - k, h, 0.0, h - r + k, 0.0, h - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, r - k, r - k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}

/// SVG path data for a rounded rectangle using `A` arc commands
///
/// Numbers are written with one decimal place.
pub fn rounded_rect_svg_data(width: f32, height: f32, radius: f32) -> String {
    let r = clamp_radius(width, height, radius);
    let (w, h) = (width, height);
    let f = |v: f32| format!("{:.1}", v);

    format!(
        "M{r} 0.0 L{wr} 0.0 A{r} {r} 0 0 1 {w} {r} L{w} {hr} A{r} {r} 0 0 1 {wr} {h} \
         L{r} {h} A{r} {r} 0 0 1 0.0 {hr} L0.0 {r} A{r} {r} 0 0 1 {r} 0.0Z",
        r = f(r),
        w = f(w),
        h = f(h),
        wr = f(w - r),
        hr = f(h - r),
    )
}
