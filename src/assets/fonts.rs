use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ConfartError, ConfartResult};

/// Font weight requested by a text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Normal (400) weight.
    Regular,
    /// Bold (700) weight.
    Bold,
}

/// Candidate font files per weight, tried in order before the system fallback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Regular-weight candidates.
    pub regular: Vec<PathBuf>,
    /// Bold-weight candidates.
    pub bold: Vec<PathBuf>,
    /// Disable the system font fallback (useful for reproducible renders).
    pub no_system_fallback: bool,
}

impl FontConfig {
    fn candidates(&self, weight: FontWeight) -> &[PathBuf] {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Font bytes ready for shaping (parley) and glyph rendering (vello_cpu).
#[derive(Clone)]
pub struct LoadedFont {
    /// Raw font file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// Stable identity used for caches: the file path or system face name.
    pub key: String,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("key", &self.key)
            .field("index", &self.index)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

// Preferred system families, most portable first.
const SYSTEM_FAMILIES: &[&str] = &["DejaVu Sans", "Liberation Sans", "Arial", "Helvetica"];

/// Resolves [`FontWeight`]s to font data: configured files first, then system fonts.
pub struct FontResolver {
    base_dir: PathBuf,
    config: FontConfig,
    system: Option<usvg::fontdb::Database>,
    resolved: HashMap<FontWeight, LoadedFont>,
}

impl FontResolver {
    /// Relative candidate paths resolve against `base_dir`.
    pub fn new(config: FontConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            config,
            system: None,
            resolved: HashMap::new(),
        }
    }

    /// Resolve (and cache) the font for `weight`.
    pub fn resolve(&mut self, weight: FontWeight) -> ConfartResult<LoadedFont> {
        if let Some(font) = self.resolved.get(&weight) {
            return Ok(font.clone());
        }

        let font = match self.lookup_candidates(weight) {
            Some(font) => font,
            None if self.config.no_system_fallback => {
                return Err(ConfartError::missing_dependency(format!(
                    "no configured {weight:?} font could be read and system fallback is disabled"
                )));
            }
            None => self.lookup_system(weight)?,
        };
        tracing::debug!(?weight, key = %font.key, "resolved font");
        self.resolved.insert(weight, font.clone());
        Ok(font)
    }

    fn lookup_candidates(&self, weight: FontWeight) -> Option<LoadedFont> {
        for candidate in self.config.candidates(weight) {
            let path = if candidate.is_absolute() {
                candidate.clone()
            } else {
                self.base_dir.join(candidate)
            };
            match std::fs::read(&path) {
                Ok(bytes) => {
                    return Some(LoadedFont {
                        bytes: Arc::new(bytes),
                        index: 0,
                        key: path.display().to_string(),
                    });
                }
                Err(e) => tracing::debug!(path = %path.display(), error = %e, "font candidate skipped"),
            }
        }
        None
    }

    fn lookup_system(&mut self, weight: FontWeight) -> ConfartResult<LoadedFont> {
        let base_dir = self.base_dir.clone();
        let db = self.system.get_or_insert_with(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            crate::assets::svg_raster::load_fonts_from_dir(&mut db, &base_dir.join("fonts"));
            db
        });

        let mut families: Vec<usvg::fontdb::Family<'_>> = SYSTEM_FAMILIES
            .iter()
            .map(|&name| usvg::fontdb::Family::Name(name))
            .collect();
        families.push(usvg::fontdb::Family::SansSerif);

        let query = usvg::fontdb::Query {
            families: &families,
            weight: match weight {
                FontWeight::Regular => usvg::fontdb::Weight::NORMAL,
                FontWeight::Bold => usvg::fontdb::Weight::BOLD,
            },
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };

        let id = db
            .query(&query)
            .filter(|&id| face_covers_latin(db, id))
            .or_else(|| {
                db.faces()
                    .map(|f| f.id)
                    .find(|&id| face_covers_latin(db, id))
            })
            .ok_or_else(|| {
                ConfartError::missing_dependency(
                    "no usable font found; install a TrueType font (e.g. DejaVu Sans) or list \
                     font files under \"fonts\" in the job config",
                )
            })?;

        let key = db
            .face(id)
            .map(|f| f.post_script_name.clone())
            .unwrap_or_else(|| format!("{id:?}"));
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| ConfartError::missing_dependency(format!("font face {key} unreadable")))?;

        Ok(LoadedFont {
            bytes: Arc::new(bytes),
            index,
            key,
        })
    }

    /// Base directory for relative candidates.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn face_covers_latin(db: &usvg::fontdb::Database, id: usvg::fontdb::ID) -> bool {
    db.with_face_data(id, |data, index| has_latin_glyph(data, index))
        .unwrap_or(false)
}

/// Whether the face maps `'A'` to a real glyph; rules out symbol and emoji fonts.
pub(crate) fn has_latin_glyph(data: &[u8], index: u32) -> bool {
    parley::swash::FontRef::from_index(data, index as usize)
        .is_some_and(|font| font.charmap().map('A') != 0)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
