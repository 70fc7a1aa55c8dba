use std::path::PathBuf;

use thiserror::Error;

use super::GlyphIndex;

/// Failures of the font / text pipeline.
///
/// Everything except [`TextError::GlyphLoad`] is raised during startup and is
/// fatal. `GlyphLoad` is recovered per glyph by the cache.
#[derive(Debug, Error)]
pub enum TextError {
    /// The shaping engine could not build a face context over the font data.
    #[error("could not initialize the shaping engine for the loaded font")]
    FontInit,

    /// The typeface file is missing, unreadable, or not a valid font.
    #[error("failed to load font {path}: {reason}")]
    FontLoad { path: PathBuf, reason: String },

    /// The requested nominal size cannot be applied.
    #[error("invalid font size {0}")]
    SizeConfig(f32),

    /// A specific glyph could not be loaded from the face.
    #[error("failed to load glyph {0}")]
    GlyphLoad(GlyphIndex),
}
