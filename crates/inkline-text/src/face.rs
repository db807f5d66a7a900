//! Sized font face producing outlines

use tiny_skia::{Path, Rect};
use ttf_parser::{Face, GlyphId};

use crate::outline::OutlinePath;
use crate::{Font, Result, TextError};

/// Outline of one glyph or a whole shaped string
///
/// Coordinates are in points, y-down, with the baseline at y = 0 and the
/// pen origin at x = 0.
#[derive(Debug, Clone)]
pub struct GlyphOutline {
    /// `None` for glyphs without contours (spaces, control characters)
    pub path: Option<Path>,
    /// Horizontal advance in points
    pub advance: f32,
    pub bounds: Option<Rect>,
}

impl GlyphOutline {
    fn new(path: Option<Path>, advance: f32) -> Self {
        let bounds = path.as_ref().and_then(|p| p.compute_tight_bounds());
        Self {
            path,
            advance,
            bounds,
        }
    }
}

/// A font face at a specific size
pub struct FontFace<'a> {
    font: &'a Font,
    face: Face<'a>,
    /// Points per font unit
    scale: f32,
}

impl<'a> FontFace<'a> {
    pub(crate) fn new(font: &'a Font, size: f32) -> Result<Self> {
        let face = font.face()?;
        let units = face.units_per_em().max(1) as f32;
        Ok(Self {
            font,
            face,
            scale: size / units,
        })
    }

    /// Outline and advance of a single character
    ///
    /// Characters missing from the font use glyph 0 (`.notdef`).
    pub fn glyph_outline(&self, c: char) -> GlyphOutline {
        let glyph = self.face.glyph_index(c).unwrap_or(GlyphId(0));
        let advance = self.face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * self.scale;

        let mut outline = OutlinePath::new(self.scale);
        let path = self
            .face
            .outline_glyph(glyph, &mut outline)
            .and_then(|_| outline.finish());

        GlyphOutline::new(path, advance)
    }

    /// Shape the whole string and merge every glyph into one outline
    pub fn text_outline(&self, text: &str) -> Result<GlyphOutline> {
        let face = rustybuzz::Face::from_slice(self.font.data(), self.font.index())
            .ok_or_else(|| TextError::ShapingFailed("Failed to parse font".into()))?;

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        let output = rustybuzz::shape(&face, &[], buffer);

        let mut outline = OutlinePath::new(self.scale);
        let (mut pen_x, mut pen_y) = (0.0_f32, 0.0_f32);
        for (info, pos) in output.glyph_infos().iter().zip(output.glyph_positions()) {
            outline.set_origin(
                pen_x + pos.x_offset as f32 * self.scale,
                pen_y - pos.y_offset as f32 * self.scale,
            );
            let glyph = GlyphId(info.glyph_id as u16);
            self.face.outline_glyph(glyph, &mut outline);

            pen_x += pos.x_advance as f32 * self.scale;
            pen_y -= pos.y_advance as f32 * self.scale;
        }

        let path = outline
            .finish()
            .ok_or_else(|| TextError::EmptyPath(text.to_string()))?;
        tracing::debug!("Shaped {:?} into {} glyphs", text, output.len());

        Ok(GlyphOutline::new(Some(path), pen_x))
    }
}
