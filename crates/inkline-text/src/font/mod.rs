//! Font loading

mod database;
mod loader;

pub use database::FontDatabase;
pub use loader::{FileLoader, FontLoader, FontManager, SystemLoader};

use std::fmt;
use std::sync::Arc;

use crate::{FontFace, Result, TextError};

/// An owned, validated font
#[derive(Clone)]
pub struct Font {
    data: Arc<Vec<u8>>,
    index: u32,
    family: String,
}

impl Font {
    /// Validate and wrap font data (TTF, OTF or a face of a collection)
    pub fn from_data(data: Vec<u8>, index: u32) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|e| TextError::FontParsing(e.to_string()))?;
        let family = family_name(&face).unwrap_or_default();

        Ok(Self {
            data: Arc::new(data),
            index,
            family,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Face index within a font collection
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Family name from the `name` table, empty when absent
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Parse the underlying face
    pub fn face(&self) -> Result<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index)
            .map_err(|e| TextError::FontParsing(e.to_string()))
    }

    /// Face scaled to `size` points per em
    pub fn sized(&self, size: f32) -> Result<FontFace<'_>> {
        FontFace::new(self, size)
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("family", &self.family)
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

fn family_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
        .find_map(|name| name.to_string())
}
