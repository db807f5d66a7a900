//! Font database for system family lookup

use fontdb::{Database, Family, ID, Query};

use super::Font;
use crate::Result;

/// Font database for loading and matching fonts
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Find a face by family name
    ///
    /// Generic names (`serif`, `sans-serif`, `monospace`, `cursive`,
    /// `fantasy`) map to fontdb's generic families. Names the regular query
    /// misses are retried case-insensitively against family and PostScript
    /// names.
    pub fn find_family(&self, name: &str) -> Option<ID> {
        let family = match name.to_ascii_lowercase().as_str() {
            "serif" => Family::Serif,
            "sans-serif" => Family::SansSerif,
            "monospace" => Family::Monospace,
            "cursive" => Family::Cursive,
            "fantasy" => Family::Fantasy,
            _ => Family::Name(name),
        };

        let query = Query {
            families: &[family],
            ..Query::default()
        };
        self.db.query(&query).or_else(|| {
            self.db
                .faces()
                .find(|face| {
                    face.post_script_name.eq_ignore_ascii_case(name)
                        || face
                            .families
                            .iter()
                            .any(|(family, _)| family.eq_ignore_ascii_case(name))
                })
                .map(|face| face.id)
        })
    }

    /// Copy a face out of the database
    pub fn load(&self, id: ID) -> Option<Result<Font>> {
        self.db
            .with_face_data(id, |data, index| Font::from_data(data.to_vec(), index))
    }

    /// Any face with an outline for `c`
    pub fn any_face_with(&self, c: char) -> Option<Font> {
        self.db.faces().find_map(|face| {
            let font = self.load(face.id)?.ok()?;
            let has_glyph = font
                .face()
                .ok()
                .and_then(|f| f.glyph_bounding_box(f.glyph_index(c)?))
                .is_some();
            has_glyph.then_some(font)
        })
    }

    /// List all loaded font families
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.db
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.as_str()))
    }

    /// Number of loaded fonts
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
