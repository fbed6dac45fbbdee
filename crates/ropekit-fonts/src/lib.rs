//! Font loading and glyph outline extraction.
//!
//! The planner works on decomposed path commands; this crate is the
//! collaborator that produces them. Fonts load from `.ttf` / `.otf` files
//! (or raw bytes), and a glyph is extracted at the font's own unit scale so
//! the planner controls all subsequent scaling.

pub mod error;
pub mod outline;

use std::fs;
use std::path::{Path, PathBuf};

use fontdb::{Database, Family, Query, Source};
use rusttype::{point, Font, Scale};
use tracing::{debug, info};

use ropekit_core::path::GlyphOutline;

pub use error::{FontError, Result};
pub use outline::OutlineRecorder;

/// A parsed font ready for glyph extraction.
#[derive(Debug)]
pub struct LoadedFont {
    font: Font<'static>,
    name: String,
}

impl LoadedFont {
    /// Parses a font from owned bytes.
    pub fn from_bytes(name: &str, bytes: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(bytes).ok_or(FontError::ParseFailed)?;
        debug!(name, "parsed font");
        Ok(Self {
            font,
            name: name.to_string(),
        })
    }

    /// Loads and parses a `.ttf` or `.otf` file. The display name is the
    /// file stem.
    pub fn from_file(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if extension != "ttf" && extension != "otf" {
            return Err(FontError::UnsupportedFormat { extension });
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_string();
        let bytes = fs::read(path)?;
        info!(path = %path.display(), "loading font file");
        Self::from_bytes(&name, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units_per_em(&self) -> u16 {
        self.font.units_per_em()
    }

    /// Extracts one glyph's outline in font units (y-down). Fails for
    /// characters the font does not cover and for glyphs with no outline,
    /// such as spaces.
    pub fn glyph_outline(&self, ch: char) -> Result<GlyphOutline> {
        let units_per_em = self.font.units_per_em();
        let glyph = self.font.glyph(ch);
        if glyph.id().0 == 0 {
            return Err(FontError::MissingGlyph { ch });
        }

        // Scaling by units-per-em keeps the outline in raw font units.
        let scaled = glyph.scaled(Scale::uniform(f32::from(units_per_em)));
        let advance_width = f64::from(scaled.h_metrics().advance_width);
        let positioned = scaled.positioned(point(0.0, 0.0));

        let mut recorder = OutlineRecorder::new();
        positioned.build_outline(&mut recorder);
        let commands = recorder.into_commands();
        if commands.is_empty() {
            return Err(FontError::EmptyOutline { ch });
        }
        debug!(ch = %ch, commands = commands.len(), "extracted glyph outline");

        Ok(GlyphOutline {
            commands,
            units_per_em,
            advance_width,
        })
    }
}

/// Looks up a font family in the system font database and returns the file
/// path of the best match, when that match is file-backed.
pub fn find_system_font(family: &str) -> Option<PathBuf> {
    let mut db = Database::new();
    db.load_system_fonts();

    let families = [match family.trim() {
        "" | "Sans" => Family::SansSerif,
        "Serif" => Family::Serif,
        "Monospace" => Family::Monospace,
        other => Family::Name(other),
    }];
    let query = Query {
        families: &families,
        ..Query::default()
    };

    let id = db.query(&query)?;
    let face = db.face(id)?;
    match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => Some(path.clone()),
        Source::Binary(_) => None,
    }
}

/// Loads a font by system family name.
pub fn load_system_font(family: &str) -> Result<LoadedFont> {
    let path = find_system_font(family).ok_or_else(|| FontError::FontNotFound {
        family: family.to_string(),
    })?;
    LoadedFont::from_file(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_extension() {
        let err = LoadedFont::from_file(Path::new("font.woff2")).unwrap_err();
        assert!(matches!(
            err,
            FontError::UnsupportedFormat { ref extension } if extension == "woff2"
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LoadedFont::from_file(&dir.path().join("nope.ttf")).unwrap_err();
        assert!(matches!(err, FontError::Io(_)));
    }

    #[test]
    fn test_garbage_bytes_fail_to_parse() {
        let err = LoadedFont::from_bytes("bad", vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, FontError::ParseFailed));
    }
}
