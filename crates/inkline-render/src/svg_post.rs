//! SVG text post-processing
//!
//! Works on the serialized document so it applies equally to SVG produced
//! here and to SVG files read from disk.

use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::shapes::rounded_rect_svg_data;
use crate::{Color, Result, StrokeStyle};

/// State of the `d` attribute on a `<path>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathData {
    Missing,
    /// `d=""`, `d=''`, whitespace only or a bare `d`
    Empty,
    Present,
}

fn is_path(e: &BytesStart<'_>) -> bool {
    e.local_name().as_ref() == b"path"
}

fn path_data(e: &BytesStart<'_>) -> PathData {
    // html_attributes accepts a bare `d` without a value
    for attr in e.html_attributes().flatten() {
        if attr.key.local_name().as_ref() == b"d" {
            return if attr.value.iter().all(u8::is_ascii_whitespace) {
                PathData::Empty
            } else {
                PathData::Present
            };
        }
    }
    PathData::Missing
}

fn into_string(writer: Writer<Vec<u8>>) -> String {
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}

/// Remove `<path>` elements whose `d` attribute is empty
pub fn clean_svg(svg: &str) -> Result<String> {
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::with_capacity(svg.len()));
    let mut removed = 0;

    loop {
        let event = reader.read_event()?;
        let empty_path = match &event {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) => is_path(e) && path_data(e) == PathData::Empty,
            _ => false,
        };
        if empty_path {
            if let Event::Start(e) = &event {
                reader.read_to_end(e.name())?;
            }
            removed += 1;
            continue;
        }
        writer.write_event(event)?;
    }

    if removed > 0 {
        tracing::debug!("Removed {} empty path elements", removed);
    }
    Ok(into_string(writer))
}

/// Replace the first `<path>` carrying a `d` attribute with `tag`
///
/// When the document has no such path, `tag` is inserted right after the
/// `<svg ...>` start tag.
pub fn replace_first_path(svg: &str, tag: &str) -> Result<String> {
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::with_capacity(svg.len() + tag.len()));
    let mut replaced = false;

    loop {
        let event = reader.read_event()?;
        let target = match &event {
            Event::Eof => break,
            Event::Start(e) | Event::Empty(e) => {
                !replaced && is_path(e) && path_data(e) != PathData::Missing
            }
            _ => false,
        };
        if target {
            if let Event::Start(e) = &event {
                reader.read_to_end(e.name())?;
            }
            writer.get_mut().extend_from_slice(tag.as_bytes());
            replaced = true;
            continue;
        }
        writer.write_event(event)?;
    }

    if replaced {
        return Ok(into_string(writer));
    }
    insert_after_root(svg, tag)
}

fn insert_after_root(svg: &str, tag: &str) -> Result<String> {
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::with_capacity(svg.len() + tag.len() + 1));
    let mut inserted = false;

    loop {
        let event = reader.read_event()?;
        let root = match &event {
            Event::Eof => break,
            Event::Start(e) => !inserted && e.local_name().as_ref() == b"svg",
            _ => false,
        };
        writer.write_event(event)?;
        if root {
            let out = writer.get_mut();
            out.push(b'\n');
            out.extend_from_slice(tag.as_bytes());
            inserted = true;
        }
    }

    if !inserted {
        tracing::debug!("No <svg> start tag, leaving document unchanged");
        return Ok(svg.to_string());
    }
    Ok(into_string(writer))
}

/// Rounded background rectangle written with arc commands
pub fn background_path_tag(
    width: f32,
    height: f32,
    radius: f32,
    fill: Color,
    stroke: Option<StrokeStyle>,
) -> Result<String> {
    let mut style = format!("fill:{}", paint(fill));
    if fill.a < 255 && !fill.is_transparent() {
        style.push_str(&format!(";fill-opacity:{:.2}", fill.alpha()));
    }
    if let Some(stroke) = stroke {
        style.push_str(&format!(
            ";stroke:{};stroke-width:{:.1}",
            paint(stroke.color),
            stroke.width
        ));
    }

    let data = rounded_rect_svg_data(width, height, radius);
    let element = BytesStart::new("path")
        .with_attributes([("d", data.as_str()), ("style", style.as_str())]);

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Empty(element))?;
    Ok(into_string(writer))
}

fn paint(color: Color) -> String {
    if color.is_transparent() {
        "none".to_string()
    } else {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_empty_paths() {
        let svg = concat!(
            "<svg width=\"10\" height=\"10\">",
            "<path d=\"\"/>",
            "<path d=''></path>",
            "<path d></path>",
            "<path fill=\"red\" d=\"\" stroke=\"none\"/>",
            "<path d=\"M0 0 L1 1\"/>",
            "</svg>"
        );
        let cleaned = clean_svg(svg).unwrap();
        assert_eq!(
            cleaned,
            "<svg width=\"10\" height=\"10\"><path d=\"M0 0 L1 1\"/></svg>"
        );
    }

    #[test]
    fn test_clean_keeps_paths_without_d() {
        let svg = "<svg><path id=\"x\"/><pathology/></svg>";
        assert_eq!(clean_svg(svg).unwrap(), svg);
    }

    #[test]
    fn test_clean_paired_with_whitespace() {
        let svg = "<svg>\n<path d=\"\">\n</path>\n<path d=\"M1 1\"/></svg>";
        assert_eq!(clean_svg(svg).unwrap(), "<svg>\n\n<path d=\"M1 1\"/></svg>");
    }

    #[test]
    fn test_clean_leaves_comments_alone() {
        let svg = "<svg><!-- <path d=\"\"/> --><path d=\"\"/><path d=\"M0 0\"/></svg>";
        assert_eq!(
            clean_svg(svg).unwrap(),
            "<svg><!-- <path d=\"\"/> --><path d=\"M0 0\"/></svg>"
        );
    }

    #[test]
    fn test_replace_skips_commented_path() {
        let svg = "<svg><!-- <path d=\"M9 9\"/> --><path d=\"M1 1\"/></svg>";
        let replaced = replace_first_path(svg, "<path d=\"X\"/>").unwrap();
        assert_eq!(replaced, "<svg><!-- <path d=\"M9 9\"/> --><path d=\"X\"/></svg>");
    }

    #[test]
    fn test_replace_without_root_is_unchanged() {
        let svg = "<g><rect/></g>";
        assert_eq!(replace_first_path(svg, "<path d=\"X\"/>").unwrap(), svg);
    }

    #[test]
    fn test_replace_first_path() {
        let svg = "<svg><path d=\"M0 0\" fill=\"#fff\"/><path d=\"M1 1\"/></svg>";
        let replaced = replace_first_path(svg, "<path d=\"X\"/>").unwrap();
        assert_eq!(replaced, "<svg><path d=\"X\"/><path d=\"M1 1\"/></svg>");
    }

    #[test]
    fn test_replace_inserts_without_path() {
        let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\"><g/></svg>";
        let replaced = replace_first_path(svg, "<path d=\"X\"/>").unwrap();
        assert_eq!(
            replaced,
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n<path d=\"X\"/><g/></svg>"
        );
    }

    #[test]
    fn test_quoted_gt_in_attribute() {
        let svg = "<svg><path data-x=\"a>b\" d=\"\"/><path d=\"M0 0\"/></svg>";
        assert_eq!(clean_svg(svg).unwrap(), "<svg><path d=\"M0 0\"/></svg>");
    }

    #[test]
    fn test_background_tag() {
        let tag = background_path_tag(
            100.0,
            40.0,
            5.0,
            Color::WHITE,
            Some(StrokeStyle::new(Color::BLACK, 2.0)),
        )
        .unwrap();
        assert!(tag.starts_with("<path d=\"M5.0 0.0"));
        assert!(tag.ends_with("style=\"fill:#ffffff;stroke:#000000;stroke-width:2.0\"/>"));
    }
}
