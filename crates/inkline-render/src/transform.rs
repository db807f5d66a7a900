//! Affine transforms applied to canvas items

/// Affine matrix in `matrix(a b c d e f)` order
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)` on a y-down surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self::scale_translate(1.0, 1.0, 0.0, 0.0)
    }

    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self::scale_translate(1.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::scale_translate(sx, sy, 0.0, 0.0)
    }

    const fn scale_translate(sx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, e: tx, f: ty }
    }

    /// Clockwise rotation by `degrees` about `(cx, cy)`
    pub fn rotate_about(degrees: f32, cx: f32, cy: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        // translate(cx, cy) * rotate * translate(-cx, -cy), folded
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: cx - cos * cx + sin * cy,
            f: cy - sin * cx - cos * cy,
        }
    }

    /// Flip a `width` x `height` surface onto itself along the chosen axes
    pub fn mirror(width: f32, height: f32, mirror_x: bool, mirror_y: bool) -> Self {
        let (sx, tx) = if mirror_x { (-1.0, width) } else { (1.0, 0.0) };
        let (sy, ty) = if mirror_y { (-1.0, height) } else { (1.0, 0.0) };
        Self::scale_translate(sx, sy, tx, ty)
    }

    /// `self * other`: `other` is applied first
    pub fn multiply(&self, other: &Transform2D) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.to_array()
            .iter()
            .zip(Self::identity().to_array())
            .all(|(v, id)| (v - id).abs() < 1e-6)
    }

    /// Coefficients in PDF/SVG `matrix()` order
    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn to_tiny_skia(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(self.a, self.b, self.c, self.d, self.e, self.f)
    }
}

impl From<tiny_skia::Transform> for Transform2D {
    fn from(ts: tiny_skia::Transform) -> Self {
        Self { a: ts.sx, b: ts.ky, c: ts.kx, d: ts.sy, e: ts.tx, f: ts.ty }
    }
}
