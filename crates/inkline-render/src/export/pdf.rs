//! Single-page PDF output

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};
use tiny_skia::{Path, PathSegment, Point};

use crate::Canvas;

/// Extended graphics state carrying item alpha
struct AlphaState {
    name: String,
    id: Ref,
    fill: f32,
    stroke: f32,
}

/// Serialize a canvas as a one-page PDF with a page box of the canvas size
pub fn to_pdf(canvas: &Canvas) -> Vec<u8> {
    let (width, height) = canvas.size();

    let catalog_id = Ref::new(1);
    let tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let mut next_id = 5;

    let mut content = Content::new();
    // Canvas y grows downwards, PDF user space grows upwards
    content.transform([1.0, 0.0, 0.0, -1.0, 0.0, height]);

    let mut states: Vec<AlphaState> = Vec::new();
    for item in canvas.items().iter().filter(|item| item.is_visible()) {
        let fill = item.fill.filter(|c| !c.is_transparent());
        let stroke = item
            .stroke
            .filter(|s| s.width > 0.0 && !s.color.is_transparent());

        content.save_state();
        content.transform(item.transform.to_array());

        let fill_alpha = fill.map_or(1.0, |c| c.alpha()) * item.opacity;
        let stroke_alpha = stroke.map_or(1.0, |s| s.color.alpha()) * item.opacity;
        if fill_alpha < 1.0 || stroke_alpha < 1.0 {
            let name = format!("GS{}", states.len());
            content.set_parameters(Name(name.as_bytes()));
            states.push(AlphaState {
                name,
                id: Ref::new(next_id),
                fill: fill_alpha,
                stroke: stroke_alpha,
            });
            next_id += 1;
        }

        if let Some(c) = fill {
            content.set_fill_rgb(unit(c.r), unit(c.g), unit(c.b));
        }
        if let Some(s) = stroke {
            content.set_stroke_rgb(unit(s.color.r), unit(s.color.g), unit(s.color.b));
            content.set_line_width(s.width);
        }

        write_path(&mut content, &item.path);
        match (fill.is_some(), stroke.is_some()) {
            (true, true) => content.fill_nonzero_and_stroke(),
            (true, false) => content.fill_nonzero(),
            (false, true) => content.stroke(),
            (false, false) => content.end_path(),
        };
        content.restore_state();
    }

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, width, height));
    page.parent(tree_id);
    page.contents(content_id);
    {
        let mut resources = page.resources();
        let mut ext_states = resources.ext_g_states();
        for state in &states {
            ext_states.pair(Name(state.name.as_bytes()), state.id);
        }
    }
    page.finish();

    pdf.stream(content_id, &content.finish());
    for state in &states {
        pdf.ext_graphics(state.id)
            .non_stroking_alpha(state.fill)
            .stroking_alpha(state.stroke);
    }

    pdf.finish()
}

fn unit(channel: u8) -> f32 {
    channel as f32 / 255.0
}

/// Emit path operators, raising quadratics to cubics
fn write_path(content: &mut Content, path: &Path) {
    let mut start = Point::zero();
    let mut last = Point::zero();

    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                content.move_to(p.x, p.y);
                start = p;
                last = p;
            }
            PathSegment::LineTo(p) => {
                content.line_to(p.x, p.y);
                last = p;
            }
            PathSegment::QuadTo(p1, p) => {
                let c1x = last.x + 2.0 / 3.0 * (p1.x - last.x);
                let c1y = last.y + 2.0 / 3.0 * (p1.y - last.y);
                let c2x = p.x + 2.0 / 3.0 * (p1.x - p.x);
                let c2y = p.y + 2.0 / 3.0 * (p1.y - p.y);
                content.cubic_to(c1x, c1y, c2x, c2y, p.x, p.y);
                last = p;
            }
            PathSegment::CubicTo(p1, p2, p) => {
                content.cubic_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y);
                last = p;
            }
            PathSegment::Close => {
                content.close_path();
                last = start;
            }
        }
    }
}
