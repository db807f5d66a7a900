//! Canvas serialization

mod pdf;
mod raster;
mod svg_writer;

pub use pdf::to_pdf;
pub use raster::{to_jpeg, to_pixmap, to_png, to_tiff};
pub use svg_writer::to_svg;

use std::fs;

use crate::{Canvas, OutputFormat, RenderError, Result, SaveConfig};

/// Serialize a canvas into a complete file image
pub fn encode(canvas: &Canvas, config: &SaveConfig) -> Result<Vec<u8>> {
    tracing::debug!(
        "Encoding {}x{} canvas ({} items) as {}",
        canvas.width(),
        canvas.height(),
        canvas.items().len(),
        config.format
    );

    match config.format {
        OutputFormat::Svg => Ok(to_svg(canvas).into_bytes()),
        OutputFormat::Png => to_png(canvas, config),
        OutputFormat::Jpeg => to_jpeg(canvas, config),
        OutputFormat::Tiff => to_tiff(canvas, config),
        OutputFormat::Pdf => Ok(to_pdf(canvas)),
    }
}

/// Encode and write a canvas to `config.path`
///
/// The file is only written once encoding fully succeeded.
pub fn save(canvas: &Canvas, config: &SaveConfig) -> Result<()> {
    let bytes = encode(canvas, config)?;
    write_file(config, &bytes)
}

/// Write an already-encoded file image to `config.path`
pub fn write_file(config: &SaveConfig, bytes: &[u8]) -> Result<()> {
    if config.path.as_os_str().is_empty() {
        return Err(RenderError::EmptySavePath);
    }
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config.path, bytes)?;

    tracing::info!("Saved {} ({} bytes)", config.path.display(), bytes.len());
    Ok(())
}
