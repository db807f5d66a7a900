//! SVG output

use svg::Document;
use svg::node::element::Path as SvgPath;
use svg::node::element::path::Data;
use tiny_skia::{Path, PathSegment};

use crate::{Canvas, DrawItem};

/// Serialize a canvas as an SVG document, one `<path>` per item
pub fn to_svg(canvas: &Canvas) -> String {
    let (width, height) = canvas.size();

    let document = canvas.items().iter().fold(
        Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height)),
        |doc, item| doc.add(path_element(item)),
    );

    document.to_string()
}

fn path_element(item: &DrawItem) -> SvgPath {
    let mut element = SvgPath::new().set("d", path_data(&item.path));

    element = match item.fill.filter(|c| !c.is_transparent()) {
        Some(fill) => {
            let element = element.set("fill", fill.to_hex());
            if fill.a < 255 { element.set("fill-opacity", fill.alpha()) } else { element }
        }
        None => element.set("fill", "none"),
    };

    if let Some(stroke) = item.stroke.filter(|s| s.width > 0.0) {
        element = element
            .set("stroke", stroke.color.to_hex())
            .set("stroke-width", stroke.width);
        if stroke.color.a < 255 {
            element = element.set("stroke-opacity", stroke.color.alpha());
        }
    }

    if item.opacity < 1.0 {
        element = element.set("opacity", item.opacity);
    }

    if !item.transform.is_identity() {
        let [a, b, c, d, e, f] = item.transform.to_array();
        element = element.set("transform", format!("matrix({a} {b} {c} {d} {e} {f})"));
    }

    element
}

fn path_data(path: &Path) -> Data {
    path.segments().fold(Data::new(), |data, segment| match segment {
        PathSegment::MoveTo(p) => data.move_to((p.x, p.y)),
        PathSegment::LineTo(p) => data.line_to((p.x, p.y)),
        PathSegment::QuadTo(p1, p) => data.quadratic_curve_to((p1.x, p1.y, p.x, p.y)),
        PathSegment::CubicTo(p1, p2, p) => {
            data.cubic_curve_to((p1.x, p1.y, p2.x, p2.y, p.x, p.y))
        }
        PathSegment::Close => data.close(),
    })
}
