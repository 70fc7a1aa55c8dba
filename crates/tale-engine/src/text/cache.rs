use std::collections::HashMap;

use super::{FontService, GlyphCanvas, GlyphIndex, TextureHandle};

/// Cached rasterization of one glyph.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlyphRecord {
    pub texture: TextureHandle,
    /// Bitmap size in pixels.
    pub size: (u32, u32),
    /// Offset from pen position to the bitmap's top-left corner.
    pub bearing: (i32, i32),
    /// Horizontal advance in 26.6 fixed point.
    pub advance: i32,
}

/// Glyph index → texture + metrics.
///
/// Entries are created on first use and never evicted: the alphabet of a
/// single fixed-size Latin face is a few hundred glyphs at most.
#[derive(Debug, Default)]
pub struct GlyphCache {
    entries: HashMap<GlyphIndex, GlyphRecord>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for `glyph`, rasterizing and uploading it on a miss.
    ///
    /// A glyph that fails to rasterize is replaced by `.notdef` (or by an
    /// empty raster if even that fails) and the substitute is cached under the
    /// failing index, so the failure is logged once and never retried.
    pub fn get_or_create<C: GlyphCanvas + ?Sized>(
        &mut self,
        glyph: GlyphIndex,
        font: &FontService,
        canvas: &mut C,
    ) -> GlyphRecord {
        if let Some(record) = self.entries.get(&glyph) {
            return *record;
        }

        let raster = font.rasterize(glyph).unwrap_or_else(|e| {
            log::warn!("glyph cache: {e}; substituting placeholder");
            font.rasterize(GlyphIndex::NOTDEF).unwrap_or_default()
        });

        let texture = canvas.create_glyph_texture(&raster);
        let record = GlyphRecord {
            texture,
            size: (raster.width, raster.height),
            bearing: raster.bearing,
            advance: raster.advance,
        };

        log::debug!(
            "glyph cache miss {glyph}: {}x{} -> {:?} ({} cached)",
            raster.width,
            raster.height,
            texture,
            self.entries.len() + 1
        );

        self.entries.insert(glyph, record);
        record
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::test_support::{system_font, RecordingCanvas};

    fn font() -> Option<FontService> {
        FontService::from_bytes(system_font()?, 36.0).ok()
    }

    #[test]
    fn miss_allocates_once_then_hits() {
        let Some(font) = font() else { return };
        let mut cache = GlyphCache::new();
        let mut canvas = RecordingCanvas::default();
        let g = font.glyph_index('H');

        let first = cache.get_or_create(g, &font, &mut canvas);
        let second = cache.get_or_create(g, &font, &mut canvas);

        assert_eq!(first, second);
        assert_eq!(canvas.textures.len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn record_matches_raster_metrics() {
        let Some(font) = font() else { return };
        let mut cache = GlyphCache::new();
        let mut canvas = RecordingCanvas::default();
        let g = font.glyph_index('g');

        let record = cache.get_or_create(g, &font, &mut canvas);
        let raster = font.rasterize(g).unwrap();

        assert_eq!(record.size, (raster.width, raster.height));
        assert_eq!(record.bearing, raster.bearing);
        assert_eq!(record.advance, raster.advance);
        assert_eq!(canvas.textures[0], (raster.width, raster.height));
    }

    #[test]
    fn distinct_glyphs_get_distinct_textures() {
        let Some(font) = font() else { return };
        let mut cache = GlyphCache::new();
        let mut canvas = RecordingCanvas::default();

        let a = cache.get_or_create(font.glyph_index('a'), &font, &mut canvas);
        let b = cache.get_or_create(font.glyph_index('b'), &font, &mut canvas);

        assert_ne!(a.texture, b.texture);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn bad_glyph_is_substituted_and_cached() {
        let Some(font) = font() else { return };
        let mut cache = GlyphCache::new();
        let mut canvas = RecordingCanvas::default();
        let bad = GlyphIndex(font.glyph_count());

        let record = cache.get_or_create(bad, &font, &mut canvas);
        let notdef = font.rasterize(GlyphIndex::NOTDEF).unwrap();
        assert_eq!(record.advance, notdef.advance);

        cache.get_or_create(bad, &font, &mut canvas);
        assert_eq!(canvas.textures.len(), 1);
    }
}
