//! Glyph runs
//!
//! A run is the outline geometry of one text, either one entry per
//! character or a single merged outline, together with the union of the
//! glyph bounds.

use inkline_text::FontFace;
use tiny_skia::{Path, Rect, Transform};

use crate::{LayoutError, Result};

/// Which fill a glyph takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    /// Index into the resolved colour list
    Palette(usize),
    /// Spaces are never painted
    Skip,
}

/// One glyph positioned on the baseline
#[derive(Debug, Clone)]
pub struct PlacedGlyph {
    /// Source character, `None` for a whole-string outline
    pub ch: Option<char>,
    /// Outline relative to the pen position
    pub path: Option<Path>,
    /// Pen x position in points
    pub x: f32,
    pub advance: f32,
    /// Outline bounds translated by the pen position
    pub bounds: Option<Rect>,
    pub slot: ColorSlot,
}

impl PlacedGlyph {
    /// Whether the glyph has a painted area
    pub fn is_renderable(&self) -> bool {
        self.slot != ColorSlot::Skip
            && self.path.is_some()
            && self.bounds.is_some_and(|b| b.width() > 0.0 && b.height() > 0.0)
    }
}

/// Laid-out glyphs of a single text
#[derive(Debug, Clone)]
pub struct GlyphRun {
    pub glyphs: Vec<PlacedGlyph>,
    /// Union of renderable glyph bounds, `None` when nothing is painted
    pub bounds: Option<Rect>,
    /// Final pen position
    pub advance: f32,
}

impl GlyphRun {
    /// Lay out each character separately so every glyph can take its own
    /// colour
    ///
    /// The i-th non-space character gets `Palette(i % palette_len)`.
    pub fn per_char(face: &FontFace<'_>, text: &str, palette_len: usize) -> Result<Self> {
        if text.is_empty() {
            return Err(LayoutError::EmptyText);
        }
        if palette_len == 0 {
            return Err(LayoutError::EmptyPalette);
        }

        let mut glyphs = Vec::with_capacity(text.chars().count());
        let mut bounds = BoundsAccumulator::default();
        let mut cursor = 0.0_f32;
        let mut painted = 0usize;

        for ch in text.chars() {
            let outline = face.glyph_outline(ch);

            let slot = if ch == ' ' {
                ColorSlot::Skip
            } else {
                let slot = ColorSlot::Palette(painted % palette_len);
                painted += 1;
                slot
            };

            let glyph = PlacedGlyph {
                ch: Some(ch),
                bounds: outline.bounds.and_then(|b| translate_rect(b, cursor)),
                path: outline.path,
                x: cursor,
                advance: outline.advance,
                slot,
            };
            if glyph.is_renderable() {
                bounds.add(glyph.bounds);
            }

            cursor += outline.advance;
            glyphs.push(glyph);
        }

        let run = Self {
            glyphs,
            bounds: bounds.finish(),
            advance: cursor,
        };
        tracing::debug!(
            "Per-character run of {} glyphs, content {}x{}",
            run.glyphs.len(),
            run.width(),
            run.height()
        );
        Ok(run)
    }

    /// Lay out the text as one shaped outline whose left edge sits at x = 0
    pub fn whole_string(face: &FontFace<'_>, text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(LayoutError::EmptyText);
        }

        let outline = face.text_outline(text)?;
        let left = outline.bounds.map_or(0.0, |b| b.left());
        let shift = Transform::from_translate(-left, 0.0);

        let path = outline.path.and_then(|p| p.transform(shift));
        let bounds = path.as_ref().and_then(|p| p.compute_tight_bounds());

        let glyph = PlacedGlyph {
            ch: None,
            path,
            x: 0.0,
            advance: outline.advance,
            bounds,
            slot: ColorSlot::Palette(0),
        };
        let bounds = glyph.bounds.filter(|_| glyph.is_renderable());

        Ok(Self {
            glyphs: vec![glyph],
            bounds,
            advance: outline.advance,
        })
    }

    /// Content width, zero for runs without painted glyphs
    pub fn width(&self) -> f32 {
        self.bounds.map_or(0.0, |b| b.width())
    }

    pub fn height(&self) -> f32 {
        self.bounds.map_or(0.0, |b| b.height())
    }

    /// Top-left corner of the content box in run coordinates
    pub fn origin(&self) -> (f32, f32) {
        self.bounds.map_or((0.0, 0.0), |b| (b.left(), b.top()))
    }

    /// Glyphs that should be drawn
    pub fn renderable(&self) -> impl Iterator<Item = &PlacedGlyph> {
        self.glyphs.iter().filter(|g| g.is_renderable())
    }
}

fn translate_rect(rect: Rect, dx: f32) -> Option<Rect> {
    Rect::from_ltrb(rect.left() + dx, rect.top(), rect.right() + dx, rect.bottom())
}

/// Running min/max over glyph bounds
#[derive(Default)]
struct BoundsAccumulator {
    ltrb: Option<(f32, f32, f32, f32)>,
}

impl BoundsAccumulator {
    fn add(&mut self, rect: Option<Rect>) {
        let Some(r) = rect else { return };
        self.ltrb = Some(match self.ltrb {
            None => (r.left(), r.top(), r.right(), r.bottom()),
            Some((l, t, rt, b)) => (
                l.min(r.left()),
                t.min(r.top()),
                rt.max(r.right()),
                b.max(r.bottom()),
            ),
        });
    }

    fn finish(self) -> Option<Rect> {
        let (l, t, r, b) = self.ltrb?;
        Rect::from_ltrb(l, t, r, b)
    }
}
