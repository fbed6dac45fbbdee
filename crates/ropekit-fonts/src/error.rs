use std::io;

use thiserror::Error;

/// Errors raised while loading fonts or extracting glyph outlines.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Font I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported font format '{extension}' (expected .ttf or .otf)")]
    UnsupportedFormat { extension: String },

    #[error("Font data could not be parsed")]
    ParseFailed,

    #[error("Font has no glyph for '{ch}'")]
    MissingGlyph { ch: char },

    #[error("Glyph for '{ch}' has an empty outline")]
    EmptyOutline { ch: char },

    #[error("No system font found for family '{family}'")]
    FontNotFound { family: String },
}

pub type Result<T> = std::result::Result<T, FontError>;
