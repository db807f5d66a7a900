//! Output formats and save configuration

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{RenderError, Result};

/// Points per inch of the canvas coordinate system
pub const POINTS_PER_INCH: f32 = 72.0;

const MM_PER_INCH: f32 = 25.4;

/// Serialization target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
    Pdf,
    Tiff,
}

impl OutputFormat {
    /// Infer from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| RenderError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
            Self::Tiff => "tiff",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            "tif" | "tiff" => Ok(Self::Tiff),
            _ => Err(RenderError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Final serialization settings
#[derive(Debug, Clone, PartialEq)]
pub struct SaveConfig {
    pub format: OutputFormat,
    pub path: PathBuf,
    /// Raster resolution, dots per inch
    pub dpi: f32,
    /// Raster resolution, dots per millimeter (used when `dpi` is zero)
    pub dpmm: f32,
    /// JPEG quality 1-100
    pub quality: u8,
}

impl SaveConfig {
    pub const DEFAULT_DPI: f32 = 72.0;
    pub const DEFAULT_DPMM: f32 = POINTS_PER_INCH / MM_PER_INCH;
    pub const DEFAULT_QUALITY: u8 = 80;

    /// Config for `path`, format taken from its extension
    pub fn for_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = OutputFormat::from_path(&path)?;
        Ok(Self::new(format, path))
    }

    pub fn new(format: OutputFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            path: path.into(),
            dpi: Self::DEFAULT_DPI,
            dpmm: Self::DEFAULT_DPMM,
            quality: Self::DEFAULT_QUALITY,
        }
    }

    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Effective DPI after applying defaults
    pub fn resolved_dpi(&self) -> f32 {
        if self.dpi > 0.0 {
            self.dpi
        } else if self.dpmm > 0.0 {
            self.dpmm * MM_PER_INCH
        } else {
            Self::DEFAULT_DPI
        }
    }

    /// Effective JPEG quality after applying defaults
    pub fn resolved_quality(&self) -> u8 {
        match self.quality {
            0 => Self::DEFAULT_QUALITY,
            q => q.min(100),
        }
    }

    /// Raster pixels per canvas point
    pub fn pixels_per_point(&self) -> f32 {
        self.resolved_dpi() / POINTS_PER_INCH
    }
}
