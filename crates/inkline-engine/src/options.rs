//! Render options
//!
//! Every struct deserializes with defaults for missing fields, so a JSON
//! document only needs to name what it changes.

use std::path::PathBuf;

use inkline_layout::{Alignment, Anchor, FitMode, Placement};
use inkline_render::{Canvas, Color, OutputFormat, SaveConfig, StrokeStyle};
use serde::{Deserialize, Serialize};

use crate::{Config, EngineError, Result};

/// One colour or a palette cycled over the non-space characters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    Palette(Vec<String>),
}

impl Default for ColorSpec {
    fn default() -> Self {
        Self::Palette(Vec::new())
    }
}

impl ColorSpec {
    /// Non-empty colour list; nothing given means black
    pub fn resolve(&self) -> Vec<Color> {
        let values: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Palette(values) => values,
        };
        let colors: Vec<Color> = values
            .iter()
            .filter(|v| !v.trim().is_empty())
            .map(|v| Color::resolve(v))
            .collect();

        if colors.is_empty() { vec![Color::BLACK] } else { colors }
    }
}

impl From<&str> for ColorSpec {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

/// Whether glyphs are laid out one by one or as one shaped outline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// One path per character, colours cycle
    #[default]
    PerChar,
    /// A single path for the whole string, first colour only
    WholeString,
}

/// Text outline stroke
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeOptions {
    pub color: String,
    pub width: f32,
}

impl StrokeOptions {
    pub fn new(color: impl Into<String>, width: f32) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }

    /// Empty colour means black, a non-positive width means 1
    pub fn resolve(&self) -> StrokeStyle {
        StrokeStyle::new(color_or(&self.color, Color::BLACK), positive_or_one(self.width))
    }
}

/// Background rectangle behind a single text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundOptions {
    /// Fill, white when empty
    pub color: String,
    /// Outline colour, no outline when empty
    pub stroke_color: String,
    pub stroke_width: f32,
    /// Corner radius, square corners when zero
    pub radius: f32,
}

impl BackgroundOptions {
    pub fn fill(&self) -> Color {
        color_or(&self.color, Color::WHITE)
    }

    pub fn stroke(&self) -> Option<StrokeStyle> {
        (!self.stroke_color.trim().is_empty()).then(|| {
            StrokeStyle::new(Color::resolve(&self.stroke_color), positive_or_one(self.stroke_width))
        })
    }
}

/// Frame drawn behind a stack of lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderOptions {
    /// Outline colour, no outline when empty
    pub color: String,
    pub width: f32,
    /// Fill, none when empty
    pub background: String,
    pub radius: f32,
}

impl BorderOptions {
    pub fn fill(&self) -> Option<Color> {
        (!self.background.trim().is_empty()).then(|| Color::resolve(&self.background))
    }

    pub fn stroke(&self) -> Option<StrokeStyle> {
        (!self.color.trim().is_empty())
            .then(|| StrokeStyle::new(Color::resolve(&self.color), positive_or_one(self.width)))
    }
}

/// Free-standing annotation drawn on top of the main content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraText {
    pub text: String,
    /// Font spec, the main font when empty
    pub font: String,
    /// Size in points, the main size when zero
    pub font_size: f32,
    pub color: String,
    /// Left edge of the annotation
    pub x: f32,
    /// Distance from the canvas bottom to the annotation bottom
    pub y: f32,
    /// Clockwise degrees about the annotation centre
    pub rotate: f32,
    /// 0-1, values outside (0, 1] mean opaque
    pub opacity: f32,
    pub stroke: Option<StrokeOptions>,
    /// Added to x
    pub offset_x: f32,
    /// Added to y (moves up)
    pub offset_y: f32,
    /// Preset position replacing `x`/`y`
    pub anchor: Option<Anchor>,
    /// Edge distance used with `anchor`
    pub margin: f32,
}

impl ExtraText {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            ..Self::default()
        }
    }

    pub fn fill(&self) -> Color {
        color_or(&self.color, Color::BLACK)
    }

    pub fn resolved_opacity(&self) -> f32 {
        if self.opacity > 0.0 && self.opacity <= 1.0 { self.opacity } else { 1.0 }
    }
}

/// Where and how to write the result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    pub path: PathBuf,
    /// Taken from the path extension when unset
    pub format: Option<OutputFormat>,
    /// Falls back to the engine config when zero
    pub dpi: f32,
    pub dpmm: f32,
    pub quality: u8,
}

impl SaveOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Final serialization settings with config defaults applied
    pub fn to_save_config(&self, config: &Config) -> Result<SaveConfig> {
        if self.path.as_os_str().is_empty() {
            return Err(EngineError::EmptySavePath);
        }
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_path(&self.path)?,
        };

        let mut save = SaveConfig::new(format, self.path.clone());
        match (self.dpi > 0.0, self.dpmm > 0.0) {
            (true, _) => save.dpi = self.dpi,
            (false, true) => {
                save.dpi = 0.0;
                save.dpmm = self.dpmm;
            }
            (false, false) => {
                save.dpi = config.dpi;
                save.dpmm = config.dpmm;
            }
        }
        save.quality = if self.quality > 0 { self.quality } else { config.quality };
        Ok(save)
    }
}

/// Options for rendering one text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    pub text: String,
    /// Font file path or family name
    pub font: String,
    /// Size in points, the config default when zero
    pub font_size: f32,
    pub colors: ColorSpec,
    /// Target width, the height follows the aspect ratio when only this is set
    pub width: f32,
    pub height: f32,
    /// CSS shorthand, 1-4 values
    pub padding: Vec<f32>,
    /// Exact final width reached by adjusting padding
    pub lock_width: f32,
    pub lock_height: f32,
    /// Scaling when both `width` and `height` are set
    pub fit: FitMode,
    pub stroke: Option<StrokeOptions>,
    pub background: Option<BackgroundOptions>,
    pub render_mode: RenderMode,
    pub mirror_x: bool,
    pub mirror_y: bool,
    pub extra_texts: Vec<ExtraText>,
    pub save: Option<SaveOptions>,
    /// Return the SVG as a `data:` URI
    pub base64: bool,
}

impl TextOptions {
    pub fn new(text: impl Into<String>, font: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            font_size,
            ..Self::default()
        }
    }
}

/// Options for stacking several lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiLineOptions {
    /// Gap between lines, the config default when unset
    pub line_gap: Option<f32>,
    pub alignment: Alignment,
    pub width: f32,
    pub height: f32,
    pub padding: Vec<f32>,
    /// Place padding outside the `width` x `height` box
    pub margin_padding: bool,
    pub border: Option<BorderOptions>,
    pub mirror_x: bool,
    pub mirror_y: bool,
    pub extra_texts: Vec<ExtraText>,
    pub save: Option<SaveOptions>,
}

/// One line of a stack
#[derive(Debug, Clone)]
pub enum LineSource {
    /// An already rendered canvas
    Canvas(Canvas),
    /// An SVG file on disk
    SvgFile(PathBuf),
    /// SVG document bytes
    SvgData(Vec<u8>),
    /// Text rendered with its own options
    Text(TextOptions),
}

/// Rectangle drawn on a composed canvas before its items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectOptions {
    /// The canvas width when zero
    pub width: f32,
    /// The canvas height when zero
    pub height: f32,
    pub x: f32,
    /// Distance from the canvas bottom to the rectangle bottom
    pub y: f32,
    pub radius: f32,
    /// Fill, none when empty
    pub color: String,
    /// Outline colour, black when empty
    pub stroke_color: String,
    /// No outline unless positive
    pub stroke_width: f32,
}

impl RectOptions {
    pub fn fill(&self) -> Option<Color> {
        (!self.color.trim().is_empty()).then(|| Color::resolve(&self.color))
    }

    pub fn stroke(&self) -> Option<StrokeStyle> {
        (self.stroke_width > 0.0)
            .then(|| StrokeStyle::new(color_or(&self.stroke_color, Color::BLACK), self.stroke_width))
    }
}

/// An SVG file placed on a composed canvas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasFile {
    pub path: PathBuf,
    #[serde(flatten)]
    pub placement: Placement,
}

/// Any line source placed on a composed canvas
#[derive(Debug, Clone)]
pub struct CanvasItem {
    pub source: LineSource,
    pub placement: Placement,
}

impl CanvasItem {
    pub fn new(source: LineSource, placement: Placement) -> Self {
        Self { source, placement }
    }
}

/// Options for composing items on a fixed-size canvas
///
/// Rectangles are drawn first, then `items`, then `files`, then the
/// mirror is applied and the annotations drawn on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasOptions {
    pub width: f32,
    pub height: f32,
    pub rects: Vec<RectOptions>,
    #[serde(skip)]
    pub items: Vec<CanvasItem>,
    pub files: Vec<CanvasFile>,
    pub mirror_x: bool,
    pub mirror_y: bool,
    pub extra_texts: Vec<ExtraText>,
    pub save: Option<SaveOptions>,
}

impl CanvasOptions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

fn color_or(value: &str, fallback: Color) -> Color {
    if value.trim().is_empty() {
        fallback
    } else {
        Color::resolve(value)
    }
}

fn positive_or_one(width: f32) -> f32 {
    if width > 0.0 { width } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_spec_defaults() {
        assert_eq!(ColorSpec::default().resolve(), vec![Color::BLACK]);
        assert_eq!(ColorSpec::from("none").resolve(), vec![Color::TRANSPARENT]);
        assert_eq!(
            ColorSpec::Palette(vec!["#ff0000".into(), "".into(), "blue".into()]).resolve(),
            vec![Color::rgb(255, 0, 0), Color::rgb(0, 0, 255)]
        );
    }

    #[test]
    fn test_color_spec_accepts_string_or_list() {
        let single: TextOptions = serde_json::from_str(r#"{"colors": "red"}"#).unwrap();
        assert_eq!(single.colors, ColorSpec::Single("red".into()));

        let palette: TextOptions =
            serde_json::from_str(r##"{"colors": ["red", "#00ff00"]}"##).unwrap();
        assert_eq!(palette.colors.resolve().len(), 2);
    }

    #[test]
    fn test_stroke_defaults() {
        let stroke = StrokeOptions::default().resolve();
        assert_eq!(stroke.color, Color::BLACK);
        assert_eq!(stroke.width, 1.0);
    }

    #[test]
    fn test_background_defaults() {
        let bg = BackgroundOptions::default();
        assert_eq!(bg.fill(), Color::WHITE);
        assert!(bg.stroke().is_none());

        let bg = BackgroundOptions {
            stroke_color: "#000".into(),
            ..BackgroundOptions::default()
        };
        assert_eq!(bg.stroke().map(|s| s.width), Some(1.0));
    }

    #[test]
    fn test_extra_text_opacity() {
        let mut extra = ExtraText::new("x", 0.0, 0.0);
        assert_eq!(extra.resolved_opacity(), 1.0);
        extra.opacity = 0.4;
        assert_eq!(extra.resolved_opacity(), 0.4);
        extra.opacity = 1.5;
        assert_eq!(extra.resolved_opacity(), 1.0);
    }

    #[test]
    fn test_save_config_resolution() {
        let config = Config::default();
        assert!(matches!(
            SaveOptions::default().to_save_config(&config),
            Err(EngineError::EmptySavePath)
        ));

        let save = SaveOptions::new("out/label.png").to_save_config(&config).unwrap();
        assert_eq!(save.format, OutputFormat::Png);
        assert_eq!(save.resolved_dpi(), 72.0);
        assert_eq!(save.quality, 80);

        let save = SaveOptions {
            format: Some(OutputFormat::Pdf),
            dpmm: 10.0,
            ..SaveOptions::new("out/label.bin")
        }
        .to_save_config(&config)
        .unwrap();
        assert_eq!(save.format, OutputFormat::Pdf);
        assert!((save.resolved_dpi() - 254.0).abs() < 1e-3);
    }

    #[test]
    fn test_rect_defaults() {
        let rect = RectOptions::default();
        assert!(rect.fill().is_none());
        assert!(rect.stroke().is_none());

        let rect = RectOptions { stroke_width: 2.0, ..RectOptions::default() };
        assert_eq!(rect.stroke(), Some(StrokeStyle::new(Color::BLACK, 2.0)));
    }

    #[test]
    fn test_canvas_options_from_json() {
        let json = r##"{
            "width": 300,
            "height": 100,
            "rects": [{ "color": "#eeeeee", "radius": 8 }],
            "files": [{ "path": "logo.svg", "align": "right", "valign": "center", "height": 40 }],
            "mirror_y": true
        }"##;
        let options: CanvasOptions = serde_json::from_str(json).unwrap();
        assert_eq!((options.width, options.height), (300.0, 100.0));
        assert_eq!(options.rects[0].fill(), Some(Color::rgb(0xee, 0xee, 0xee)));
        let file = &options.files[0];
        assert_eq!(file.path, PathBuf::from("logo.svg"));
        assert_eq!(file.placement.align, Alignment::Right);
        assert_eq!(file.placement.height, 40.0);
        assert!(options.items.is_empty());
        assert!(options.mirror_y);
    }

    #[test]
    fn test_options_json_roundtrip() {
        let mut options = TextOptions::new("Hi", "DejaVu Sans", 24.0);
        options.fit = FitMode::Contain;
        options.render_mode = RenderMode::WholeString;
        options.extra_texts.push(ExtraText {
            anchor: Some(Anchor::BottomRight),
            ..ExtraText::new("v1", 0.0, 0.0)
        });

        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"whole-string\""));
        assert!(json.contains("\"bottom-right\""));
        let back: TextOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
