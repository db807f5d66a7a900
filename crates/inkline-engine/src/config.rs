//! Engine Configuration

use inkline_render::SaveConfig;

/// Engine configuration options
///
/// Values here fill in whatever a render call leaves unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Font size when the options give none
    pub font_size: f32,

    /// Raster resolution when a save request gives none
    pub dpi: f32,

    /// Dots per millimeter, used when `dpi` is zero
    pub dpmm: f32,

    /// JPEG quality 1-100
    pub quality: u8,

    /// Gap between stacked lines
    pub line_gap: f32,

    /// Resolve family names against installed fonts
    pub system_fonts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_size: 32.0,
            dpi: SaveConfig::DEFAULT_DPI,
            dpmm: SaveConfig::DEFAULT_DPMM,
            quality: SaveConfig::DEFAULT_QUALITY,
            line_gap: 2.0,
            system_fonts: true,
        }
    }
}
