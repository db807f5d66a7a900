//! Engine - Main entry point

use std::path::Path;

use inkline_text::FontManager;

use crate::compose::{self, Rendered};
use crate::options::{CanvasOptions, LineSource, MultiLineOptions, TextOptions};
use crate::output::{self, SvgOutput};
use crate::{Config, Result};

/// The inkline text engine
pub struct Engine {
    config: Config,
    fonts: FontManager,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        let fonts = if config.system_fonts {
            FontManager::new()
        } else {
            FontManager::files_only()
        };
        tracing::info!("inkline Engine {} initialized", crate::VERSION);
        Self { config, fonts }
    }

    /// Replace the font loading strategies
    pub fn with_fonts(mut self, fonts: FontManager) -> Self {
        self.fonts = fonts;
        self
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compose a single text into a canvas
    pub fn render_text(&self, options: &TextOptions) -> Result<Rendered> {
        compose::render_text(&self.fonts, &self.config, options)
    }

    /// Render a text to an SVG document
    pub fn convert(&self, options: &TextOptions) -> Result<SvgOutput> {
        let rendered = self.render_text(options)?;
        SvgOutput::new(&rendered, options.base64)
    }

    /// Render a text and write it to `options.save`, if set
    pub fn render_to_file(&self, options: &TextOptions) -> Result<Rendered> {
        let rendered = self.render_text(options)?;
        match &options.save {
            Some(save) => output::save(&rendered, save, &self.config)?,
            None => tracing::warn!("No save target for {:?}, skipping write", options.text),
        }
        Ok(rendered)
    }

    /// Stack several lines into one canvas, saving it when requested
    pub fn render_lines(
        &self,
        lines: &[LineSource],
        options: &MultiLineOptions,
    ) -> Result<Rendered> {
        let rendered = compose::render_lines(&self.fonts, &self.config, lines, options)?;
        if let Some(save) = &options.save {
            output::save(&rendered, save, &self.config)?;
        }
        Ok(rendered)
    }

    /// Place items on a fixed-size canvas, saving it when requested
    pub fn compose_canvas(&self, options: &CanvasOptions) -> Result<Rendered> {
        let rendered = compose::compose_canvas(&self.fonts, &self.config, options)?;
        if let Some(save) = &options.save {
            output::save(&rendered, save, &self.config)?;
        }
        Ok(rendered)
    }

    /// Rewrite the resolution metadata of PNG or JPEG bytes
    pub fn change_dpi(data: &[u8], dpi: u32) -> Result<Vec<u8>> {
        Ok(inkline_dpi::change_dpi(data, dpi)?)
    }

    /// File variant of [`Engine::change_dpi`]
    pub fn change_dpi_file(input: &Path, output: &Path, dpi: u32) -> Result<()> {
        Ok(inkline_dpi::change_dpi_file(input, output, dpi)?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
