//! Raster output through tiny-skia

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage, RgbaImage};
use tiny_skia::{FillRule, Paint, Pixmap, Stroke};

use crate::{Canvas, Color, RenderError, Result, SaveConfig, Transform2D};

/// Rasterize a canvas at `pixels_per_point`
pub fn to_pixmap(canvas: &Canvas, pixels_per_point: f32) -> Result<Pixmap> {
    let (width, height) = canvas.size();
    let px_w = (width * pixels_per_point).ceil() as u32;
    let px_h = (height * pixels_per_point).ceil() as u32;
    let mut pixmap = Pixmap::new(px_w, px_h).ok_or(RenderError::InvalidSize { width, height })?;

    let base = Transform2D::scale(pixels_per_point, pixels_per_point);
    for item in canvas.items().iter().filter(|item| item.is_visible()) {
        let transform = base.multiply(&item.transform).to_tiny_skia();

        if let Some(fill) = item.fill.filter(|c| !c.is_transparent()) {
            let paint = paint(fill, item.opacity);
            pixmap.fill_path(&item.path, &paint, FillRule::Winding, transform, None);
        }

        if let Some(style) = item.stroke.filter(|s| s.width > 0.0 && !s.color.is_transparent()) {
            let paint = paint(style.color, item.opacity);
            let stroke = Stroke {
                width: style.width,
                ..Stroke::default()
            };
            pixmap.stroke_path(&item.path, &paint, &stroke, transform, None);
        }
    }

    tracing::debug!("Rasterized {}x{} px", px_w, px_h);
    Ok(pixmap)
}

fn paint(color: Color, opacity: f32) -> Paint<'static> {
    let mut color = color.to_tiny_skia();
    color.apply_opacity(opacity);

    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// PNG with a pHYs chunk for the configured DPI
pub fn to_png(canvas: &Canvas, config: &SaveConfig) -> Result<Vec<u8>> {
    let pixmap = to_pixmap(canvas, config.pixels_per_point())?;
    let data = pixmap.encode_png().map_err(|e| RenderError::Encode {
        format: "png",
        reason: e.to_string(),
    })?;
    Ok(inkline_dpi::png::set_dpi(&data, dpi(config))?)
}

/// JPEG flattened onto white, with JFIF density for the configured DPI
pub fn to_jpeg(canvas: &Canvas, config: &SaveConfig) -> Result<Vec<u8>> {
    let pixmap = to_pixmap(canvas, config.pixels_per_point())?;

    // Premultiplied over white: c + (255 - a)
    let rgb: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let white = 255 - p.alpha();
            [p.red() + white, p.green() + white, p.blue() + white]
        })
        .collect();
    let image = RgbImage::from_raw(pixmap.width(), pixmap.height(), rgb).ok_or(
        RenderError::Encode {
            format: "jpeg",
            reason: "pixel buffer size mismatch".to_string(),
        },
    )?;

    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, config.resolved_quality())
        .encode_image(&image)
        .map_err(|e| RenderError::Encode {
            format: "jpeg",
            reason: e.to_string(),
        })?;

    Ok(inkline_dpi::jpeg::set_dpi(&data, dpi(config))?)
}

/// Uncompressed RGBA TIFF
pub fn to_tiff(canvas: &Canvas, config: &SaveConfig) -> Result<Vec<u8>> {
    let pixmap = to_pixmap(canvas, config.pixels_per_point())?;
    let rgba: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    let image = RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba).ok_or(
        RenderError::Encode {
            format: "tiff",
            reason: "pixel buffer size mismatch".to_string(),
        },
    )?;

    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Tiff)
        .map_err(|e| RenderError::Encode {
            format: "tiff",
            reason: e.to_string(),
        })?;
    Ok(cursor.into_inner())
}

fn dpi(config: &SaveConfig) -> u32 {
    config.resolved_dpi().round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::rectangle;
    use crate::{Context, OutputFormat};

    fn red_square() -> Canvas {
        let mut canvas = Canvas::new(20.0, 10.0);
        let mut ctx = Context::new(&mut canvas);
        ctx.set_fill(Some(Color::rgb(255, 0, 0)));
        ctx.draw_path(0.0, 0.0, &rectangle(10.0, 10.0).unwrap());
        canvas
    }

    #[test]
    fn test_pixmap_scales_with_dpi() {
        let canvas = red_square();
        let pixmap = to_pixmap(&canvas, 2.0).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (40, 20));

        let inside = pixmap.pixel(5, 5).unwrap();
        assert_eq!((inside.red(), inside.alpha()), (255, 255));
        let outside = pixmap.pixel(30, 5).unwrap();
        assert_eq!(outside.alpha(), 0);
    }

    #[test]
    fn test_zero_size_canvas_fails() {
        let canvas = Canvas::new(0.0, 10.0);
        assert!(matches!(
            to_pixmap(&canvas, 1.0),
            Err(RenderError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_png_carries_dpi() {
        let config = SaveConfig::new(OutputFormat::Png, "a.png").with_dpi(300.0);
        let data = to_png(&red_square(), &config).unwrap();
        let density = inkline_dpi::png::read_phys(&data).unwrap();
        assert_eq!(density.x, 11811);
    }

    #[test]
    fn test_jpeg_carries_dpi() {
        let config = SaveConfig::new(OutputFormat::Jpeg, "a.jpg").with_dpi(600.0);
        let data = to_jpeg(&red_square(), &config).unwrap();
        let density = inkline_dpi::jpeg::read_jfif_density(&data).unwrap();
        assert_eq!((density.units, density.x, density.y), (1, 600, 600));
    }

    #[test]
    fn test_tiff_signature() {
        let config = SaveConfig::new(OutputFormat::Tiff, "a.tiff");
        let data = to_tiff(&red_square(), &config).unwrap();
        assert!(data.starts_with(b"II*\0") || data.starts_with(b"MM\0*"));
    }
}
