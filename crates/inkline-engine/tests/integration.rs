//! Integration tests - Full pipeline from options to saved files
//!
//! Tests the complete workflow: options → font → layout → canvas → output

use std::fs::{self, File};
use std::path::PathBuf;

use inkline_engine::layout::GlyphRun;
use inkline_engine::text::{Font, FontDatabase, FontLoader, FontManager, TextError};
use inkline_engine::{
    Alignment, Anchor, BackgroundOptions, CanvasFile, CanvasItem, CanvasOptions, Color,
    ColorSpec, Config, Engine, EngineError, ExtraText, LineSource, MultiLineOptions, OutputFormat,
    Placement, RectOptions, RenderMode, SaveOptions, TextOptions, VAlign,
};

const FONT: &str = "fixture";

/// Serves one font under a fixed name
struct Fixed(Font);

impl FontLoader for Fixed {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn load(&self, spec: &str) -> inkline_engine::text::Result<Font> {
        if spec == FONT {
            Ok(self.0.clone())
        } else {
            Err(TextError::FontNotFound(spec.to_string()))
        }
    }
}

fn system_font() -> Option<Font> {
    FontDatabase::with_system_fonts().any_face_with('A')
}

/// Engine resolving only [`FONT`], `None` on machines without fonts
fn engine() -> Option<(Engine, Font)> {
    let Some(font) = system_font() else {
        eprintln!("skipping: no system font with a glyph for 'A'");
        return None;
    };
    let fonts = FontManager::with_loaders(vec![Box::new(Fixed(font.clone()))]);
    Some((Engine::new(Config::default()).with_fonts(fonts), font))
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("inkline-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

fn svg_data(width: u32, height: u32) -> Vec<u8> {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">
            <rect width="{width}" height="{height}" fill="blue"/>
        </svg>"#
    )
    .into_bytes()
}

// ============================================================================
// SINGLE TEXT
// ============================================================================

#[test]
fn test_two_colour_text_at_fixed_width() {
    let Some((engine, font)) = engine() else { return };

    let mut options = TextOptions::new("AB", FONT, 32.0);
    options.colors = ColorSpec::Palette(vec!["#FF0000".into(), "#00FF00".into()]);
    options.width = 100.0;
    let rendered = engine.render_text(&options).unwrap();

    let items = rendered.canvas.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].fill, Some(Color::rgb(255, 0, 0)));
    assert_eq!(items[1].fill, Some(Color::rgb(0, 255, 0)));

    let face = font.sized(32.0).unwrap();
    let run = GlyphRun::per_char(&face, "AB", 2).unwrap();
    assert!(approx(rendered.width, 100.0));
    assert!(
        approx(rendered.height, run.height() * 100.0 / run.width()),
        "height {} for content {}x{}",
        rendered.height,
        run.width(),
        run.height()
    );
}

#[test]
fn test_spaces_are_not_painted() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("A A A", FONT, 24.0);
    options.colors = ColorSpec::Palette(vec!["red".into(), "blue".into()]);
    let rendered = engine.render_text(&options).unwrap();

    let fills: Vec<_> = rendered.canvas.items().iter().map(|i| i.fill).collect();
    assert_eq!(
        fills,
        vec![
            Some(Color::rgb(255, 0, 0)),
            Some(Color::rgb(0, 0, 255)),
            Some(Color::rgb(255, 0, 0)),
        ]
    );
}

#[test]
fn test_whole_string_is_one_path() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("AAA", FONT, 24.0);
    options.render_mode = RenderMode::WholeString;
    let rendered = engine.render_text(&options).unwrap();
    assert_eq!(rendered.canvas.items().len(), 1);
}

#[test]
fn test_lock_width_is_exact() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("Label", FONT, 20.0);
    options.lock_width = 400.0;
    options.lock_height = 120.0;
    let rendered = engine.render_text(&options).unwrap();
    assert!(approx(rendered.width, 400.0));
    assert!(approx(rendered.height, 120.0));

    // Content centred inside the locked frame
    let bounds = rendered.canvas.content_bounds().unwrap();
    assert!(approx(bounds.left(), 400.0 - bounds.right()));
}

#[test]
fn test_mirror_x_flips_content() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("AB", FONT, 32.0);
    options.padding = vec![0.0, 30.0, 0.0, 0.0];
    let plain = engine.render_text(&options).unwrap();
    options.mirror_x = true;
    let mirrored = engine.render_text(&options).unwrap();

    let a = plain.canvas.content_bounds().unwrap();
    let b = mirrored.canvas.content_bounds().unwrap();
    assert!(approx(b.left(), plain.width - a.right()));
    assert!(approx(b.top(), a.top()));
}

#[test]
fn test_background_and_stroke() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("A", FONT, 32.0);
    options.background = Some(BackgroundOptions {
        color: "yellow".into(),
        radius: 6.0,
        ..BackgroundOptions::default()
    });
    options.stroke = Some(inkline_engine::StrokeOptions::new("", 0.0));
    let rendered = engine.render_text(&options).unwrap();

    let items = rendered.canvas.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].fill, Some(Color::rgb(255, 255, 0)));
    let stroke = items[1].stroke.unwrap();
    assert_eq!(stroke.color, Color::BLACK);
    assert_eq!(stroke.width, 1.0);
}

#[test]
fn test_empty_text_rejected() {
    let engine = Engine::new(Config::default());
    let options = TextOptions::new("", FONT, 32.0);
    assert!(matches!(engine.render_text(&options), Err(EngineError::EmptyText)));
}

#[test]
fn test_unknown_font_reports_font_load() {
    let engine = Engine::new(Config {
        system_fonts: false,
        ..Config::default()
    });
    let options = TextOptions::new("A", "/no/such/font.ttf", 32.0);
    let err = engine.render_text(&options).unwrap_err();
    assert!(matches!(err, EngineError::FontLoad(_)));
    assert!(err.to_string().contains("font load failed"));
}

// ============================================================================
// EXTRA TEXTS
// ============================================================================

#[test]
fn test_anchored_extra_text() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("AB", FONT, 32.0);
    options.lock_width = 300.0;
    options.lock_height = 100.0;
    let mut note = ExtraText::new("A", 0.0, 0.0);
    note.anchor = Some(Anchor::BottomLeft);
    note.font_size = 10.0;
    note.opacity = 3.0;
    options.extra_texts.push(note);
    let rendered = engine.render_text(&options).unwrap();

    let items = rendered.canvas.items();
    assert_eq!(items.len(), 3);
    let note = items.last().unwrap();
    assert_eq!(note.opacity, 1.0);
    let bounds = note.bounds().unwrap();
    assert!(approx(bounds.left(), 0.0), "left {}", bounds.left());
    assert!(approx(bounds.bottom(), 100.0), "bottom {}", bounds.bottom());
}

#[test]
fn test_extra_text_position_from_bottom() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("AB", FONT, 32.0);
    options.lock_width = 300.0;
    options.lock_height = 100.0;
    let mut note = ExtraText::new("A", 20.0, 30.0);
    note.offset_x = 5.0;
    note.offset_y = 5.0;
    options.extra_texts.push(note);
    let rendered = engine.render_text(&options).unwrap();

    let bounds = rendered.canvas.items().last().unwrap().bounds().unwrap();
    assert!(approx(bounds.left(), 25.0));
    assert!(approx(bounds.bottom(), 100.0 - 35.0));
}

#[test]
fn test_extra_text_font_failure_aborts() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("AB", FONT, 32.0);
    let mut note = ExtraText::new("note", 0.0, 0.0);
    note.font = "missing".into();
    options.extra_texts.push(note);
    assert!(matches!(engine.render_text(&options), Err(EngineError::FontLoad(_))));
}

#[test]
fn test_blank_extra_text_is_skipped() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("AB", FONT, 32.0);
    options.extra_texts.push(ExtraText::new(" ", 5.0, 5.0));
    let rendered = engine.render_text(&options).unwrap();
    assert_eq!(rendered.canvas.items().len(), 2);
}

#[test]
fn test_mirrored_stack_keeps_annotation_position() {
    let Some((engine, _)) = engine() else { return };

    let mut note = ExtraText::new("A", 10.0, 10.0);
    note.font = FONT.into();
    let options = MultiLineOptions {
        mirror_x: true,
        extra_texts: vec![note],
        ..MultiLineOptions::default()
    };
    let lines = vec![LineSource::SvgData(svg_data(200, 50))];
    let rendered = engine.render_lines(&lines, &options).unwrap();

    let items = rendered.canvas.items();
    assert_eq!(items.len(), 2);
    let bounds = items[1].bounds().unwrap();
    assert!(approx(bounds.left(), 10.0), "left {}", bounds.left());
    assert!(approx(bounds.bottom(), 40.0), "bottom {}", bounds.bottom());
}

// ============================================================================
// OUTPUT
// ============================================================================

#[test]
fn test_convert_rounded_background() {
    let Some((engine, _)) = engine() else { return };

    let mut options = TextOptions::new("A", FONT, 32.0);
    options.background = Some(BackgroundOptions {
        color: "#336699".into(),
        radius: 4.0,
        ..BackgroundOptions::default()
    });
    let out = engine.convert(&options).unwrap();
    assert!(out.svg.starts_with("<svg"));
    assert!(out.svg.contains("fill:#336699"));
    assert!(!out.svg.contains("d=\"\""));

    options.base64 = true;
    let uri = engine.convert(&options).unwrap();
    assert!(uri.is_data_uri());
    assert_eq!((uri.width, uri.height), (out.width, out.height));
}

#[test]
fn test_png_carries_dpi() {
    let Some((engine, _)) = engine() else { return };
    let dir = scratch_dir("png");

    let mut options = TextOptions::new("AB", FONT, 32.0);
    options.save = Some(SaveOptions::new(dir.join("label.png")).with_dpi(300.0));
    let rendered = engine.render_to_file(&options).unwrap();

    let decoder = png::Decoder::new(File::open(dir.join("label.png")).unwrap());
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    let dims = info.pixel_dims.unwrap();
    assert_eq!(dims.unit, png::Unit::Meter);
    assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
    assert_eq!(info.width, (rendered.width * 300.0 / 72.0).ceil() as u32);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_save_formats_from_extension() {
    let Some((engine, _)) = engine() else { return };
    let dir = scratch_dir("formats");

    for (name, magic) in [
        ("label.svg", b"<svg".as_slice()),
        ("label.pdf", b"%PDF".as_slice()),
        ("label.jpg", [0xFF, 0xD8].as_slice()),
        ("label.tiff", b"II".as_slice()),
    ] {
        let mut options = TextOptions::new("AB", FONT, 32.0);
        options.save = Some(SaveOptions::new(dir.join(name)));
        engine.render_to_file(&options).unwrap();

        let bytes = fs::read(dir.join(name)).unwrap();
        assert!(bytes.starts_with(magic), "{name}");
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_explicit_format_and_empty_path() {
    let Some((engine, _)) = engine() else { return };
    let dir = scratch_dir("explicit");

    let mut options = TextOptions::new("AB", FONT, 32.0);
    options.save = Some(SaveOptions {
        format: Some(OutputFormat::Svg),
        ..SaveOptions::new(dir.join("label.out"))
    });
    engine.render_to_file(&options).unwrap();
    assert!(fs::read_to_string(dir.join("label.out")).unwrap().starts_with("<svg"));

    options.save = Some(SaveOptions::default());
    assert!(matches!(
        engine.render_to_file(&options),
        Err(EngineError::EmptySavePath)
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_change_dpi_rejects_unknown_bytes() {
    assert!(matches!(
        Engine::change_dpi(b"GIF89a", 300),
        Err(EngineError::Dpi(_))
    ));
}

// ============================================================================
// MULTI-LINE
// ============================================================================

#[test]
fn test_stack_svg_lines() {
    let engine = Engine::new(Config {
        system_fonts: false,
        ..Config::default()
    });
    let lines = vec![
        LineSource::SvgData(svg_data(60, 20)),
        LineSource::SvgData(b"not svg".to_vec()),
        LineSource::SvgData(svg_data(40, 10)),
    ];
    let rendered = engine.render_lines(&lines, &MultiLineOptions::default()).unwrap();

    assert_eq!((rendered.width, rendered.height), (60.0, 32.0));
    let items = rendered.canvas.items();
    assert_eq!(items.len(), 2);
    let second = items[1].bounds().unwrap();
    assert!(approx(second.left(), 0.0));
    assert!(approx(second.top(), 22.0));

    let centered = MultiLineOptions {
        alignment: Alignment::Center,
        ..MultiLineOptions::default()
    };
    let rendered = engine.render_lines(&lines, &centered).unwrap();
    let second = rendered.canvas.items()[1].bounds().unwrap();
    assert!(approx(second.left(), 10.0));
}

#[test]
fn test_stack_with_border_and_margin_padding() {
    let engine = Engine::default();
    let lines = vec![LineSource::SvgData(svg_data(50, 25))];
    let options = MultiLineOptions {
        width: 100.0,
        height: 100.0,
        padding: vec![10.0],
        margin_padding: true,
        border: Some(inkline_engine::BorderOptions {
            color: "black".into(),
            width: 2.0,
            ..Default::default()
        }),
        ..MultiLineOptions::default()
    };
    let rendered = engine.render_lines(&lines, &options).unwrap();

    assert_eq!((rendered.width, rendered.height), (120.0, 120.0));
    let border = rendered.canvas.items()[0].bounds().unwrap();
    assert!(approx(border.left(), 10.0));
    assert!(approx(border.width(), 100.0));
    let line = rendered.canvas.items()[1].bounds().unwrap();
    assert!(approx(line.width(), 100.0));
    assert!(approx(line.top(), 35.0));
}

#[test]
fn test_no_usable_lines() {
    let engine = Engine::default();
    let lines = vec![
        LineSource::SvgData(Vec::new()),
        LineSource::SvgFile(PathBuf::from("/no/such/line.svg")),
    ];
    assert!(matches!(
        engine.render_lines(&lines, &MultiLineOptions::default()),
        Err(EngineError::NoLines)
    ));
}

#[test]
fn test_text_lines_share_font_for_annotations() {
    let Some((engine, _)) = engine() else { return };

    let lines = vec![
        LineSource::Text(TextOptions::new("AB", FONT, 32.0)),
        LineSource::Text(TextOptions::new("A", FONT, 16.0)),
    ];
    let options = MultiLineOptions {
        extra_texts: vec![ExtraText::new("B", 1.0, 1.0)],
        ..MultiLineOptions::default()
    };
    let rendered = engine.render_lines(&lines, &options).unwrap();
    assert_eq!(rendered.canvas.items().len(), 4);
}

// ============================================================================
// CANVAS COMPOSITION
// ============================================================================

fn files_only_engine() -> Engine {
    Engine::new(Config {
        system_fonts: false,
        ..Config::default()
    })
}

#[test]
fn test_compose_canvas_places_items() {
    let engine = files_only_engine();

    let mut options = CanvasOptions::new(300.0, 100.0);
    options.rects.push(RectOptions {
        width: 50.0,
        height: 20.0,
        x: 5.0,
        y: 10.0,
        color: "#eeeeee".into(),
        ..RectOptions::default()
    });
    options.items.push(CanvasItem::new(
        LineSource::SvgData(svg_data(60, 20)),
        Placement {
            align: Alignment::Right,
            valign: VAlign::Bottom,
            ..Placement::default()
        },
    ));
    options
        .items
        .push(CanvasItem::new(LineSource::SvgData(svg_data(400, 50)), Placement::default()));
    let rendered = engine.compose_canvas(&options).unwrap();

    assert_eq!((rendered.width, rendered.height), (300.0, 100.0));
    assert!(rendered.background().is_none());
    let items = rendered.canvas.items();
    assert_eq!(items.len(), 3);

    let rect = items[0].bounds().unwrap();
    assert_eq!(items[0].fill, Some(Color::rgb(0xee, 0xee, 0xee)));
    assert!(approx(rect.left(), 5.0));
    assert!(approx(rect.top(), 70.0));

    let corner = items[1].bounds().unwrap();
    assert!(approx(corner.left(), 240.0));
    assert!(approx(corner.top(), 80.0));

    // Wider than the canvas: shrunk uniformly
    let wide = items[2].bounds().unwrap();
    assert!(approx(wide.width(), 300.0));
    assert!(approx(wide.height(), 37.5));
}

#[test]
fn test_compose_canvas_from_file_mirrored_and_saved() {
    let engine = files_only_engine();
    let dir = scratch_dir("canvas");
    fs::create_dir_all(&dir).unwrap();
    let logo = dir.join("logo.svg");
    fs::write(&logo, svg_data(60, 20)).unwrap();

    let mut options = CanvasOptions::new(300.0, 100.0);
    options.files.push(CanvasFile {
        path: logo,
        placement: Placement {
            x: 10.0,
            height: 40.0,
            ..Placement::default()
        },
    });
    options.mirror_x = true;
    options.save = Some(SaveOptions::new(dir.join("canvas.svg")));
    let rendered = engine.compose_canvas(&options).unwrap();

    let logo = rendered.canvas.items()[0].bounds().unwrap();
    assert!(approx(logo.width(), 120.0));
    assert!(approx(logo.left(), 300.0 - 130.0));
    assert!(fs::read_to_string(dir.join("canvas.svg")).unwrap().starts_with("<svg"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_compose_canvas_errors() {
    let engine = files_only_engine();

    assert!(matches!(
        engine.compose_canvas(&CanvasOptions::default()),
        Err(EngineError::InvalidCanvasSize { .. })
    ));

    let mut options = CanvasOptions::new(100.0, 100.0);
    options.files.push(CanvasFile {
        path: PathBuf::from("/no/such/logo.svg"),
        placement: Placement::default(),
    });
    assert!(matches!(engine.compose_canvas(&options), Err(EngineError::Render(_))));
}

#[test]
fn test_compose_canvas_annotation_after_mirror() {
    let Some((engine, _)) = engine() else { return };

    let mut note = ExtraText::new("A", 10.0, 10.0);
    note.font = FONT.into();
    let mut options = CanvasOptions::new(200.0, 50.0);
    options.mirror_x = true;
    options.extra_texts.push(note);
    let rendered = engine.compose_canvas(&options).unwrap();

    let bounds = rendered.canvas.items()[0].bounds().unwrap();
    assert!(approx(bounds.left(), 10.0), "left {}", bounds.left());
}

// ============================================================================
// OPTIONS FROM JSON
// ============================================================================

#[test]
fn test_options_from_json() {
    let json = r##"{
        "text": "Hello",
        "font": "DejaVu Sans",
        "colors": "#112233",
        "padding": [4, 8],
        "render_mode": "whole-string",
        "fit": "contain",
        "extra_texts": [{ "text": "tm", "anchor": "top-right", "margin": 2 }],
        "save": { "path": "out/hello.png", "dpi": 300 }
    }"##;
    let options: TextOptions = serde_json::from_str(json).unwrap();

    assert_eq!(options.colors.resolve(), vec![Color::rgb(0x11, 0x22, 0x33)]);
    assert_eq!(options.padding, vec![4.0, 8.0]);
    assert_eq!(options.render_mode, RenderMode::WholeString);
    assert_eq!(options.extra_texts[0].anchor, Some(Anchor::TopRight));
    assert_eq!(options.font_size, 0.0);

    let save = options.save.unwrap().to_save_config(&Config::default()).unwrap();
    assert_eq!(save.format, OutputFormat::Png);
    assert_eq!(save.dpi, 300.0);
}
