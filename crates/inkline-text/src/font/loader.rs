//! Font loading strategies
//!
//! A font spec is either a path to a font file or a family name. The
//! [`FontManager`] tries each [`FontLoader`] in order and keeps the last
//! failure for the error report.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use super::{Font, FontDatabase};
use crate::{Result, TextError};

/// One way of turning a font spec into a font
pub trait FontLoader: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn load(&self, spec: &str) -> Result<Font>;
}

/// Treats the spec as a path to a font file
#[derive(Debug, Default, Clone, Copy)]
pub struct FileLoader;

impl FontLoader for FileLoader {
    fn name(&self) -> &'static str {
        "file"
    }

    fn load(&self, spec: &str) -> Result<Font> {
        let path = Path::new(spec);
        if !path.is_file() {
            return Err(TextError::FontNotFound(spec.to_string()));
        }
        let data = fs::read(path)?;
        Font::from_data(data, 0)
    }
}

/// Treats the spec as a family name installed on the system
///
/// The system font database is scanned once, on first use.
#[derive(Default)]
pub struct SystemLoader {
    db: OnceLock<FontDatabase>,
}

impl SystemLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a prepared database instead of scanning system fonts
    pub fn with_database(db: FontDatabase) -> Self {
        Self {
            db: OnceLock::from(db),
        }
    }

    fn database(&self) -> &FontDatabase {
        self.db.get_or_init(FontDatabase::with_system_fonts)
    }
}

impl FontLoader for SystemLoader {
    fn name(&self) -> &'static str {
        "system"
    }

    fn load(&self, spec: &str) -> Result<Font> {
        let db = self.database();

        // "fonts/Roboto.ttf" falls back to the family "Roboto"
        let stem = Path::new(spec)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|stem| *stem != spec);

        std::iter::once(spec)
            .chain(stem)
            .find_map(|name| db.find_family(name))
            .and_then(|id| db.load(id))
            .unwrap_or_else(|| Err(TextError::FontNotFound(spec.to_string())))
    }
}

/// Ordered list of loading strategies
pub struct FontManager {
    loaders: Vec<Box<dyn FontLoader>>,
}

impl FontManager {
    /// File paths first, then system families
    pub fn new() -> Self {
        Self::with_loaders(vec![Box::new(FileLoader), Box::new(SystemLoader::new())])
    }

    pub fn with_loaders(loaders: Vec<Box<dyn FontLoader>>) -> Self {
        Self { loaders }
    }

    /// Only look at font files on disk
    pub fn files_only() -> Self {
        Self::with_loaders(vec![Box::new(FileLoader)])
    }

    /// Return the first font any loader produces
    pub fn load(&self, spec: &str) -> Result<Font> {
        let mut last = TextError::FontNotFound(spec.to_string());

        for loader in &self.loaders {
            match loader.load(spec) {
                Ok(font) => {
                    tracing::debug!(
                        "Loaded font {:?} via {} loader (family {:?})",
                        spec,
                        loader.name(),
                        font.family()
                    );
                    return Ok(font);
                }
                Err(e) => {
                    tracing::debug!("{} loader failed for {:?}: {}", loader.name(), spec, e);
                    last = e;
                }
            }
        }

        Err(TextError::FontLoad {
            spec: spec.to_string(),
            last: Box::new(last),
        })
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}
