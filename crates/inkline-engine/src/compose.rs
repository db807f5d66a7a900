//! Canvas composition for single texts, line stacks and fixed-size canvases

use inkline_layout::{
    ColorSlot, EdgeSizes, Frame, FrameSpec, GlyphRun, MultiLineSpec, Placement, Size,
    stack_lines,
};
use inkline_render::shapes::rounded_rectangle;
use inkline_render::{Canvas, Color, Context, StrokeStyle, Transform2D};
use inkline_text::{Font, FontManager, TextError};

use crate::options::{
    CanvasOptions, ExtraText, LineSource, MultiLineOptions, RectOptions, RenderMode, TextOptions,
};
use crate::{Config, EngineError, Result};

/// Background drawn behind the content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub fill: Option<Color>,
    pub stroke: Option<StrokeStyle>,
    pub radius: f32,
    /// Covers the whole canvas
    pub full_canvas: bool,
}

/// A composed canvas and its final size
#[derive(Debug, Clone)]
pub struct Rendered {
    pub canvas: Canvas,
    pub width: f32,
    pub height: f32,
    pub(crate) background: Option<Background>,
}

impl Rendered {
    fn new(canvas: Canvas, background: Option<Background>) -> Self {
        let (width, height) = canvas.size();
        Self {
            canvas,
            width,
            height,
            background,
        }
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }
}

/// Family tried for annotations when no text line supplies a font
const DEFAULT_FAMILY: &str = "sans-serif";

/// Font used by annotations that name none
struct FallbackFont {
    font: Option<Font>,
    size: f32,
}

pub(crate) fn render_text(
    fonts: &FontManager,
    config: &Config,
    options: &TextOptions,
) -> Result<Rendered> {
    if options.text.is_empty() {
        return Err(EngineError::EmptyText);
    }
    tracing::info!("Rendering {:?} with font {:?}", options.text, options.font);

    let font = fonts.load(&options.font).map_err(EngineError::FontLoad)?;
    let size = if options.font_size > 0.0 { options.font_size } else { config.font_size };
    let face = font.sized(size)?;

    let colors = options.colors.resolve();
    let run = match options.render_mode {
        RenderMode::PerChar => GlyphRun::per_char(&face, &options.text, colors.len())?,
        RenderMode::WholeString => GlyphRun::whole_string(&face, &options.text)?,
    };

    let stroke = options.stroke.as_ref().map(|s| s.resolve());
    let frame = Frame::resolve(FrameSpec {
        content: Size::new(run.width(), run.height()),
        stroke_width: stroke.map_or(0.0, |s| s.width),
        padding: EdgeSizes::from_shorthand(&options.padding),
        width: options.width,
        height: options.height,
        lock_width: options.lock_width,
        lock_height: options.lock_height,
        fit: options.fit,
    });

    let background = options.background.as_ref().map(|bg| Background {
        fill: Some(bg.fill()),
        stroke: bg.stroke(),
        radius: bg.radius,
        full_canvas: true,
    });

    let mut canvas = Canvas::new(frame.width, frame.height);
    {
        let mut ctx = Context::new(&mut canvas);
        if let Some(bg) = &background {
            draw_background(&mut ctx, bg, 0.0, 0.0, frame.width, frame.height);
        }

        ctx.save();
        ctx.translate(frame.box_x, frame.box_y);
        ctx.scale(frame.scale_x, frame.scale_y);
        let (content_x, content_y) = frame.content_origin();
        let (run_x, run_y) = run.origin();
        ctx.translate(content_x - run_x, content_y - run_y);

        for glyph in run.renderable() {
            let (ColorSlot::Palette(index), Some(path)) = (glyph.slot, &glyph.path) else {
                continue;
            };
            ctx.save();
            ctx.set_fill(Some(colors[index % colors.len()]));
            match stroke {
                Some(s) => ctx.set_stroke(s.color, s.width),
                None => ctx.clear_stroke(),
            }
            ctx.draw_path(glyph.x, 0.0, path);
            ctx.restore();
        }
        ctx.restore();

        let fallback = FallbackFont {
            font: Some(font.clone()),
            size,
        };
        draw_extra_texts(fonts, &fallback, &mut ctx, &options.extra_texts)?;
    }

    canvas.mirror(options.mirror_x, options.mirror_y);
    Ok(Rendered::new(canvas, background))
}

pub(crate) fn render_lines(
    fonts: &FontManager,
    config: &Config,
    sources: &[LineSource],
    options: &MultiLineOptions,
) -> Result<Rendered> {
    tracing::info!("Stacking {} lines", sources.len());

    let mut fallback = FallbackFont {
        font: None,
        size: config.font_size,
    };
    let mut lines = Vec::with_capacity(sources.len());
    for (index, source) in sources.iter().enumerate() {
        let canvas = match source_canvas(fonts, config, &mut fallback, source) {
            Ok(canvas) => canvas,
            Err(EngineError::Render(e)) if !matches!(source, LineSource::Text(_)) => {
                tracing::warn!("Skipping line {}: {}", index, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        if canvas.width() <= 0.0 || canvas.height() <= 0.0 {
            tracing::warn!("Skipping line {}: empty canvas", index);
            continue;
        }
        lines.push(canvas);
    }

    if lines.is_empty() {
        return Err(EngineError::NoLines);
    }

    let sizes: Vec<Size> = lines.iter().map(|c| Size::new(c.width(), c.height())).collect();
    let layout = stack_lines(
        &sizes,
        &MultiLineSpec {
            line_gap: options.line_gap.unwrap_or(config.line_gap),
            alignment: options.alignment,
            width: options.width,
            height: options.height,
            padding: EdgeSizes::from_shorthand(&options.padding),
            margin_padding: options.margin_padding,
        },
    )?;

    let (bx, by, bw, bh) = layout.border_box;
    let background = options.border.as_ref().map(|border| Background {
        fill: border.fill(),
        stroke: border.stroke(),
        radius: border.radius,
        full_canvas: bx == 0.0 && by == 0.0 && bw == layout.width && bh == layout.height,
    });

    let mut canvas = Canvas::new(layout.width, layout.height);
    if let Some(bg) = &background {
        let mut ctx = Context::new(&mut canvas);
        draw_background(&mut ctx, bg, bx, by, bw, bh);
    }

    for (index, line) in lines.iter().enumerate() {
        let Some((x, y)) = layout.line_origin(index) else {
            continue;
        };
        let transform = Transform2D::translate(x, y)
            .multiply(&Transform2D::scale(layout.scale, layout.scale));
        canvas.draw_canvas(line, transform);
    }

    // Annotations keep their reading direction on a mirrored stack
    canvas.mirror(options.mirror_x, options.mirror_y);
    {
        let mut ctx = Context::new(&mut canvas);
        draw_extra_texts(fonts, &fallback, &mut ctx, &options.extra_texts)?;
    }

    Ok(Rendered::new(canvas, background))
}

/// Compose items on a canvas of a fixed size
pub(crate) fn compose_canvas(
    fonts: &FontManager,
    config: &Config,
    options: &CanvasOptions,
) -> Result<Rendered> {
    let (width, height) = (options.width, options.height);
    if !(width > 0.0 && height > 0.0) {
        return Err(EngineError::InvalidCanvasSize { width, height });
    }
    tracing::info!(
        "Composing {}x{} canvas from {} items and {} files",
        width,
        height,
        options.items.len(),
        options.files.len()
    );

    let mut canvas = Canvas::new(width, height);
    {
        let mut ctx = Context::new(&mut canvas);
        for rect in &options.rects {
            draw_rect(&mut ctx, rect);
        }
    }

    let mut fallback = FallbackFont {
        font: None,
        size: config.font_size,
    };
    for item in &options.items {
        let source = source_canvas(fonts, config, &mut fallback, &item.source)?;
        place(&mut canvas, &source, &item.placement);
    }
    for file in &options.files {
        let source = inkline_render::import_svg_file(&file.path)?;
        place(&mut canvas, &source, &file.placement);
    }

    canvas.mirror(options.mirror_x, options.mirror_y);
    {
        let mut ctx = Context::new(&mut canvas);
        draw_extra_texts(fonts, &fallback, &mut ctx, &options.extra_texts)?;
    }

    Ok(Rendered::new(canvas, None))
}

/// Canvas for one line source
///
/// The first text source also supplies the annotation fallback font.
fn source_canvas(
    fonts: &FontManager,
    config: &Config,
    fallback: &mut FallbackFont,
    source: &LineSource,
) -> Result<Canvas> {
    Ok(match source {
        LineSource::Canvas(canvas) => canvas.clone(),
        LineSource::SvgFile(path) => inkline_render::import_svg_file(path)?,
        LineSource::SvgData(data) => inkline_render::import_svg(data)?,
        LineSource::Text(text) => {
            if fallback.font.is_none() {
                fallback.font = fonts.load(&text.font).ok();
                if text.font_size > 0.0 {
                    fallback.size = text.font_size;
                }
            }
            render_text(fonts, config, text)?.canvas
        }
    })
}

fn place(canvas: &mut Canvas, item: &Canvas, placement: &Placement) {
    let (item_w, item_h) = item.size();
    if item_w <= 0.0 || item_h <= 0.0 {
        tracing::warn!("Skipping empty canvas item");
        return;
    }
    let placed = placement.place(
        Size::new(item_w, item_h),
        Size::new(canvas.width(), canvas.height()),
    );
    tracing::debug!(
        "Item {}x{} placed at ({}, {}) as {}x{}",
        item_w,
        item_h,
        placed.x,
        placed.y,
        placed.width,
        placed.height
    );
    let transform = Transform2D::translate(placed.x, placed.y)
        .multiply(&Transform2D::scale(placed.scale_x, placed.scale_y));
    canvas.draw_canvas(item, transform);
}

fn draw_rect(ctx: &mut Context<'_>, rect: &RectOptions) {
    let w = if rect.width > 0.0 { rect.width } else { ctx.width() };
    let h = if rect.height > 0.0 { rect.height } else { ctx.height() };
    let bg = Background {
        fill: rect.fill(),
        stroke: rect.stroke(),
        radius: rect.radius,
        full_canvas: false,
    };
    // Bottom-up y as for annotations
    let y = ctx.height() - rect.y - h;
    draw_background(ctx, &bg, rect.x, y, w, h);
}

fn draw_background(ctx: &mut Context<'_>, bg: &Background, x: f32, y: f32, w: f32, h: f32) {
    let Some(path) = rounded_rectangle(w, h, bg.radius) else {
        return;
    };
    ctx.save();
    ctx.set_fill(bg.fill);
    match bg.stroke {
        Some(s) => ctx.set_stroke(s.color, s.width),
        None => ctx.clear_stroke(),
    }
    ctx.draw_path(x, y, &path);
    ctx.restore();
}

/// Draw annotations in canvas coordinates
///
/// Every font is loaded before anything is drawn so a failing annotation
/// leaves no partial drawing behind.
fn draw_extra_texts(
    fonts: &FontManager,
    fallback: &FallbackFont,
    ctx: &mut Context<'_>,
    extras: &[ExtraText],
) -> Result<()> {
    let mut loaded = Vec::with_capacity(extras.len());
    for extra in extras {
        if extra.text.is_empty() {
            tracing::warn!("Skipping empty annotation");
            continue;
        }
        let font = if extra.font.is_empty() {
            match &fallback.font {
                Some(font) => font.clone(),
                None => fonts.load(DEFAULT_FAMILY).map_err(EngineError::FontLoad)?,
            }
        } else {
            fonts.load(&extra.font).map_err(EngineError::FontLoad)?
        };
        loaded.push((extra, font));
    }

    let canvas_size = Size::new(ctx.width(), ctx.height());
    for (extra, font) in loaded {
        let size = if extra.font_size > 0.0 { extra.font_size } else { fallback.size };
        let face = font.sized(size)?;
        let outline = match face.text_outline(&extra.text) {
            Ok(outline) => outline,
            Err(TextError::EmptyPath(text)) => {
                tracing::debug!("Skipping annotation {:?} with no outline", text);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let (Some(path), Some(bounds)) = (outline.path, outline.bounds) else {
            continue;
        };

        let (x, y) = match extra.anchor {
            Some(anchor) => anchor.position(
                canvas_size,
                Size::new(bounds.width(), bounds.height()),
                extra.margin,
            ),
            None => (extra.x, extra.y),
        };

        // Left edge at x, bottom edge y above the canvas bottom
        let tx = x + extra.offset_x - bounds.left();
        let ty = canvas_size.height - y - extra.offset_y - bounds.bottom();
        let cx = (bounds.left() + bounds.right()) / 2.0;
        let cy = (bounds.top() + bounds.bottom()) / 2.0;

        ctx.save();
        ctx.translate(tx, ty);
        if extra.rotate != 0.0 {
            ctx.concat(Transform2D::rotate_about(extra.rotate, cx, cy));
        }
        ctx.set_fill(Some(extra.fill()));
        match extra.stroke.as_ref().map(|s| s.resolve()) {
            Some(s) => ctx.set_stroke(s.color, s.width),
            None => ctx.clear_stroke(),
        }
        ctx.set_opacity(extra.resolved_opacity());
        ctx.draw_path(0.0, 0.0, &path);
        ctx.restore();

        tracing::debug!("Annotation {:?} at ({}, {})", extra.text, x, y);
    }
    Ok(())
}
