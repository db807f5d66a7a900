//! Display-list canvas and drawing context

use tiny_skia::{Path, Rect};

use crate::{Color, Transform2D};

/// Stroke paint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// One painted path
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Path in its own coordinate space
    pub path: Path,
    /// Maps the path into canvas coordinates
    pub transform: Transform2D,
    pub fill: Option<Color>,
    pub stroke: Option<StrokeStyle>,
    /// Group opacity, 0.0-1.0
    pub opacity: f32,
}

impl DrawItem {
    /// Whether painting this item can change any pixel
    pub fn is_visible(&self) -> bool {
        let fill = self.fill.is_some_and(|c| !c.is_transparent());
        let stroke = self
            .stroke
            .is_some_and(|s| s.width > 0.0 && !s.color.is_transparent());
        self.opacity > 0.0 && (fill || stroke)
    }

    /// Path bounds in canvas coordinates
    pub fn bounds(&self) -> Option<Rect> {
        self.path
            .clone()
            .transform(self.transform.to_tiny_skia())?
            .compute_tight_bounds()
    }
}

/// A sized drawing surface
///
/// Units are points (1/72 inch) with the origin at the top-left corner
/// and y growing downwards.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    width: f32,
    height: f32,
    items: Vec<DrawItem>,
}

impl Canvas {
    /// Create an empty canvas
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            items: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    /// Draw every item of `other` onto this canvas through `transform`
    pub fn draw_canvas(&mut self, other: &Canvas, transform: Transform2D) {
        self.items.extend(other.items.iter().map(|item| DrawItem {
            transform: transform.multiply(&item.transform),
            ..item.clone()
        }));
    }

    /// Apply `transform` after every item's own transform
    pub fn transform_all(&mut self, transform: Transform2D) {
        for item in &mut self.items {
            item.transform = transform.multiply(&item.transform);
        }
    }

    /// Flip the whole drawing horizontally and/or vertically in place
    pub fn mirror(&mut self, mirror_x: bool, mirror_y: bool) {
        if mirror_x || mirror_y {
            self.transform_all(Transform2D::mirror(self.width, self.height, mirror_x, mirror_y));
        }
    }

    /// Union of all item bounds
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<(f32, f32, f32, f32)> = None;
        for b in self.items.iter().filter_map(DrawItem::bounds) {
            bounds = Some(match bounds {
                None => (b.left(), b.top(), b.right(), b.bottom()),
                Some((l, t, r, btm)) => (
                    l.min(b.left()),
                    t.min(b.top()),
                    r.max(b.right()),
                    btm.max(b.bottom()),
                ),
            });
        }
        let (l, t, r, b) = bounds?;
        Rect::from_ltrb(l, t, r, b)
    }
}

/// Drawing state saved and restored by [`Context`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub transform: Transform2D,
    pub fill: Option<Color>,
    pub stroke: Option<StrokeStyle>,
    pub opacity: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform2D::identity(),
            fill: Some(Color::BLACK),
            stroke: None,
            opacity: 1.0,
        }
    }
}

/// Stateful drawing context over a canvas
pub struct Context<'a> {
    canvas: &'a mut Canvas,
    /// State stack, never empty
    states: Vec<DrawState>,
}

impl<'a> Context<'a> {
    /// Create a new context with a default state
    pub fn new(canvas: &'a mut Canvas) -> Self {
        Self {
            canvas,
            states: vec![DrawState::default()],
        }
    }

    pub fn width(&self) -> f32 {
        self.canvas.width()
    }

    pub fn height(&self) -> f32 {
        self.canvas.height()
    }

    /// Save the current state
    pub fn save(&mut self) {
        let state = self.state().clone();
        self.states.push(state);
    }

    /// Restore the last saved state
    pub fn restore(&mut self) {
        if self.states.len() > 1 {
            self.states.pop();
        }
    }

    /// Get current state
    pub fn state(&self) -> &DrawState {
        &self.states[self.states.len() - 1]
    }

    /// Get mutable current state
    pub fn state_mut(&mut self) -> &mut DrawState {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.concat(Transform2D::translate(tx, ty));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(Transform2D::scale(sx, sy));
    }

    /// Apply `transform` before the current transform
    pub fn concat(&mut self, transform: Transform2D) {
        let state = self.state_mut();
        state.transform = state.transform.multiply(&transform);
    }

    pub fn set_fill(&mut self, color: Option<Color>) {
        self.state_mut().fill = color;
    }

    pub fn set_stroke(&mut self, color: Color, width: f32) {
        self.state_mut().stroke = Some(StrokeStyle::new(color, width));
    }

    pub fn clear_stroke(&mut self) {
        self.state_mut().stroke = None;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.state_mut().opacity = opacity.clamp(0.0, 1.0);
    }

    /// Paint `path` at (x, y) with the current fill and stroke
    pub fn draw_path(&mut self, x: f32, y: f32, path: &Path) {
        let state = self.state();
        let item = DrawItem {
            path: path.clone(),
            transform: state.transform.multiply(&Transform2D::translate(x, y)),
            fill: state.fill,
            stroke: state.stroke,
            opacity: state.opacity,
        };
        self.canvas.push(item);
    }
}
