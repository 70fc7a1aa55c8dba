use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::TextError;

/// Points are converted to pixels at this resolution.
const DPI: f32 = 72.0;

/// Common system typefaces, tried in order when the configured font file is
/// missing.
pub const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// `preferred` if it is a file, otherwise the first of `fallbacks` that is.
pub fn find_font_file(preferred: &Path, fallbacks: &[&str]) -> Option<PathBuf> {
    if preferred.is_file() {
        return Some(preferred.to_path_buf());
    }
    fallbacks.iter().map(PathBuf::from).find(|p| p.is_file())
}

/// Identity of a glyph inside the loaded typeface.
///
/// This is a face-local glyph id, not a Unicode codepoint.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GlyphIndex(pub u16);

impl GlyphIndex {
    /// The `.notdef` glyph. Unmapped characters (including `'\n'` in most
    /// fonts) shape to this index.
    pub const NOTDEF: GlyphIndex = GlyphIndex(0);
}

impl fmt::Display for GlyphIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A rasterized glyph as produced by [`FontService::rasterize`].
///
/// `bitmap` holds one coverage byte per pixel, rows top to bottom, with no
/// row padding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterGlyph {
    pub bitmap: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the bitmap's left edge (x) and top edge
    /// above the baseline (y), in pixels.
    pub bearing: (i32, i32),
    /// Horizontal advance in 26.6 fixed point (1/64 px).
    pub advance: i32,
}

/// Owns the single typeface used for the session.
///
/// The face is loaded once at a fixed nominal size. Changing the size would
/// invalidate every cached glyph texture, so no setter exists.
pub struct FontService {
    font: fontdue::Font,
    bytes: Arc<[u8]>,
    size_px: f32,
    size_26_6: i32,
}

impl FontService {
    /// Reads and loads a TrueType/OpenType file at `size_pt` points.
    pub fn from_file(path: impl AsRef<Path>, size_pt: f32) -> Result<Self, TextError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| TextError::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::load(bytes, size_pt, path.to_path_buf())
    }

    /// Loads a typeface from raw bytes at `size_pt` points.
    pub fn from_bytes(bytes: Vec<u8>, size_pt: f32) -> Result<Self, TextError> {
        Self::load(bytes, size_pt, PathBuf::from("<memory>"))
    }

    fn load(bytes: Vec<u8>, size_pt: f32, path: PathBuf) -> Result<Self, TextError> {
        if !size_pt.is_finite() || size_pt <= 0.0 {
            return Err(TextError::SizeConfig(size_pt));
        }

        let size_px = size_pt * DPI / 72.0;
        let settings = fontdue::FontSettings { scale: size_px, ..fontdue::FontSettings::default() };
        let font = fontdue::Font::from_bytes(bytes.as_slice(), settings)
            .map_err(|e| TextError::FontLoad { path: path.clone(), reason: e.to_string() })?;

        let service = Self {
            font,
            bytes: Arc::from(bytes),
            size_px,
            size_26_6: (size_pt * 64.0).round() as i32,
        };

        // Rasterize one glyph so a broken face fails at startup, not mid-frame.
        let sample = service.glyph_index('A');
        if sample == GlyphIndex::NOTDEF {
            return Err(TextError::GlyphLoad(sample));
        }
        service.rasterize(sample)?;

        log::info!(
            "loaded font {} at {size_pt}pt ({} glyphs)",
            path.display(),
            service.glyph_count()
        );
        Ok(service)
    }

    /// Nominal size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Nominal size in 26.6 fixed point points.
    pub fn size_26_6(&self) -> i32 {
        self.size_26_6
    }

    pub fn glyph_count(&self) -> u16 {
        self.font.glyph_count()
    }

    /// Raw font data, shared with the shaper.
    pub fn font_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Maps a character to its glyph through the face's cmap.
    ///
    /// Returns [`GlyphIndex::NOTDEF`] for unmapped characters.
    pub fn glyph_index(&self, ch: char) -> GlyphIndex {
        GlyphIndex(self.font.lookup_glyph_index(ch))
    }

    /// Renders one glyph into a coverage bitmap with its metrics.
    pub fn rasterize(&self, glyph: GlyphIndex) -> Result<RasterGlyph, TextError> {
        if glyph.0 >= self.font.glyph_count() {
            return Err(TextError::GlyphLoad(glyph));
        }

        let (metrics, bitmap) = self.font.rasterize_indexed(glyph.0, self.size_px);
        let width = metrics.width as u32;
        let height = metrics.height as u32;
        if bitmap.len() != (width * height) as usize {
            return Err(TextError::GlyphLoad(glyph));
        }

        Ok(RasterGlyph {
            bitmap,
            width,
            height,
            bearing: (metrics.xmin, metrics.ymin + metrics.height as i32),
            advance: (metrics.advance_width * 64.0).round() as i32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::test_support::system_font;

    #[test]
    fn rejects_non_positive_size() {
        let err = FontService::from_bytes(Vec::new(), 0.0).err();
        assert!(matches!(err, Some(TextError::SizeConfig(_))));

        let err = FontService::from_bytes(Vec::new(), f32::NAN).err();
        assert!(matches!(err, Some(TextError::SizeConfig(_))));
    }

    #[test]
    fn rejects_garbage_bytes() {
        let err = FontService::from_bytes(vec![0u8; 64], 36.0).err();
        assert!(matches!(err, Some(TextError::FontLoad { .. })));
    }

    #[test]
    fn missing_file_is_font_load_error() {
        let err = FontService::from_file("/definitely/not/here.ttf", 36.0).err();
        match err {
            Some(TextError::FontLoad { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.ttf"));
            }
            other => panic!("expected FontLoad, got {other:?}"),
        }
    }

    #[test]
    fn existing_preferred_font_wins() {
        let dir = std::env::temp_dir().join(format!("tale-font-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let preferred = dir.join("story.ttf");
        let fallback = dir.join("system.ttf");
        std::fs::write(&preferred, b"x").unwrap();
        std::fs::write(&fallback, b"x").unwrap();
        let fallback_str = fallback.to_str().unwrap();

        assert_eq!(find_font_file(&preferred, &[fallback_str]), Some(preferred.clone()));

        std::fs::remove_file(&preferred).unwrap();
        assert_eq!(find_font_file(&preferred, &["/nope.ttf", fallback_str]), Some(fallback.clone()));

        std::fs::remove_file(&fallback).unwrap();
        assert_eq!(find_font_file(&preferred, &[fallback_str]), None);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn size_is_kept_in_26_6() {
        let Some(bytes) = system_font() else { return };
        let font = FontService::from_bytes(bytes, 36.0).unwrap();
        assert_eq!(font.size_26_6(), 36 * 64);
        assert_eq!(font.size_px(), 36.0);
    }

    #[test]
    fn rasterize_letter_has_ink_and_advance() {
        let Some(bytes) = system_font() else { return };
        let font = FontService::from_bytes(bytes, 36.0).unwrap();

        let g = font.rasterize(font.glyph_index('H')).unwrap();
        assert!(g.width > 0 && g.height > 0);
        assert_eq!(g.bitmap.len(), (g.width * g.height) as usize);
        assert!(g.advance > 0);
        // Capital letters sit on the baseline and rise above it.
        assert!(g.bearing.1 > 0);
    }

    #[test]
    fn space_has_advance_but_no_bitmap() {
        let Some(bytes) = system_font() else { return };
        let font = FontService::from_bytes(bytes, 36.0).unwrap();

        let g = font.rasterize(font.glyph_index(' ')).unwrap();
        assert!(g.bitmap.is_empty());
        assert!(g.advance > 0);
    }

    #[test]
    fn out_of_range_glyph_fails() {
        let Some(bytes) = system_font() else { return };
        let font = FontService::from_bytes(bytes, 36.0).unwrap();

        let bad = GlyphIndex(font.glyph_count());
        assert!(matches!(font.rasterize(bad), Err(TextError::GlyphLoad(g)) if g == bad));
    }
}
