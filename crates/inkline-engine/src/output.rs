//! Serialization of composed canvases

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use inkline_render::svg_post::{background_path_tag, clean_svg, replace_first_path};
use inkline_render::{Color, OutputFormat};

use crate::compose::Rendered;
use crate::options::SaveOptions;
use crate::{Config, Result};

const SVG_DATA_URI: &str = "data:image/svg+xml;base64,";

/// SVG document of a render, optionally as a data URI
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOutput {
    pub svg: String,
    pub width: f32,
    pub height: f32,
}

impl SvgOutput {
    pub(crate) fn new(rendered: &Rendered, base64: bool) -> Result<Self> {
        let svg = svg_document(rendered)?;
        Ok(Self {
            svg: if base64 { to_data_uri(&svg) } else { svg },
            width: rendered.width,
            height: rendered.height,
        })
    }

    pub fn is_data_uri(&self) -> bool {
        self.svg.starts_with(SVG_DATA_URI)
    }
}

/// Final SVG text for a render
///
/// A rounded background covering the whole canvas is written with arc
/// commands in place of the flattened outline.
pub(crate) fn svg_document(rendered: &Rendered) -> Result<String> {
    let svg = clean_svg(&inkline_render::to_svg(&rendered.canvas))?;

    match rendered.background() {
        Some(bg) if bg.radius > 0.0 && bg.full_canvas => {
            let tag = background_path_tag(
                rendered.width,
                rendered.height,
                bg.radius,
                bg.fill.unwrap_or(Color::TRANSPARENT),
                bg.stroke,
            )?;
            Ok(replace_first_path(&svg, &tag)?)
        }
        _ => Ok(svg),
    }
}

pub(crate) fn to_data_uri(svg: &str) -> String {
    format!("{}{}", SVG_DATA_URI, STANDARD.encode(svg.as_bytes()))
}

/// Write a render to disk in the requested format
pub(crate) fn save(rendered: &Rendered, options: &SaveOptions, config: &Config) -> Result<()> {
    let save_config = options.to_save_config(config)?;
    tracing::info!(
        "Saving {}x{} render as {} to {}",
        rendered.width,
        rendered.height,
        save_config.format,
        save_config.path.display()
    );

    match save_config.format {
        OutputFormat::Svg => {
            let svg = svg_document(rendered)?;
            inkline_render::write_file(&save_config, svg.as_bytes())?;
        }
        _ => inkline_render::save(&rendered.canvas, &save_config)?,
    }
    Ok(())
}
