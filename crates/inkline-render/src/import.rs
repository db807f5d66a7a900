//! SVG import
//!
//! External SVG files are parsed with usvg and flattened into a [`Canvas`]
//! display list so they can be stacked next to rendered text.

use std::fs;
use std::path::Path;

use usvg::{Group, Node, Paint, Tree};

use crate::{Canvas, Color, DrawItem, Result, StrokeStyle, Transform2D};

/// Parse SVG bytes into a canvas of the document's size
pub fn import_svg(data: &[u8]) -> Result<Canvas> {
    let tree = Tree::from_data(data, &usvg::Options::default())?;
    let size = tree.size();

    let mut canvas = Canvas::new(size.width(), size.height());
    flatten_group(tree.root(), 1.0, &mut canvas);

    tracing::debug!(
        "Imported SVG {}x{} with {} paths",
        canvas.width(),
        canvas.height(),
        canvas.items().len()
    );
    Ok(canvas)
}

/// Read and parse an SVG file
pub fn import_svg_file(path: &Path) -> Result<Canvas> {
    let data = fs::read(path)?;
    import_svg(&data)
}

fn flatten_group(group: &Group, opacity: f32, canvas: &mut Canvas) {
    let opacity = opacity * group.opacity().get();

    for node in group.children() {
        match node {
            Node::Group(child) => flatten_group(child, opacity, canvas),
            Node::Path(path) => {
                if path.is_visible() {
                    push_path(path, opacity, canvas);
                }
            }
            Node::Text(text) => flatten_group(text.flattened(), opacity, canvas),
            Node::Image(_) => tracing::debug!("Skipping embedded image in imported SVG"),
        }
    }
}

fn push_path(path: &usvg::Path, opacity: f32, canvas: &mut Canvas) {
    let fill = path
        .fill()
        .and_then(|fill| solid_color(fill.paint(), fill.opacity().get()));
    let stroke = path.stroke().and_then(|stroke| {
        solid_color(stroke.paint(), stroke.opacity().get())
            .map(|color| StrokeStyle::new(color, stroke.width().get()))
    });

    if fill.is_none() && stroke.is_none() {
        return;
    }

    canvas.push(DrawItem {
        path: path.data().clone(),
        transform: Transform2D::from(path.abs_transform()),
        fill,
        stroke,
        opacity,
    });
}

/// Gradients and patterns are reduced to nothing; only flat colors survive
fn solid_color(paint: &Paint, opacity: f32) -> Option<Color> {
    match paint {
        Paint::Color(c) => Some(Color::rgba(
            c.red,
            c.green,
            c.blue,
            (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
        )),
        _ => None,
    }
}
