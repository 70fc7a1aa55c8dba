use crate::coords::{ColorRgba, Point, Viewport};

use super::layout::{DEFAULT_LINE_HEIGHT, DEFAULT_MAX_WIDTH};
use super::{
    glyph_quad, layout, FontService, GlyphCache, GlyphCanvas, GlyphRecord, LayoutParams,
    TextError, TextShaper, TextUniforms,
};

/// Fixed logical canvas the text projection maps onto.
pub const TEXT_CANVAS: Viewport = Viewport::new(1280.0, 720.0);

/// Presentation settings shared by every `draw_text` call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub color: ColorRgba,
    /// Canvas used for the orthographic projection. This does not follow the
    /// window size.
    pub canvas: Viewport,
    pub max_width: f32,
    pub line_height: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: ColorRgba::white(),
            canvas: TEXT_CANVAS,
            max_width: DEFAULT_MAX_WIDTH,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

/// Public entry point of the text pipeline.
///
/// Owns the typeface, the shaper, and the glyph cache for the session. Each
/// [`draw_text`](Self::draw_text) call shapes, caches, lays out and draws one
/// string onto a [`GlyphCanvas`].
pub struct TextDrawer {
    font: FontService,
    shaper: TextShaper,
    cache: GlyphCache,
    style: TextStyle,
}

impl TextDrawer {
    pub fn new(font: FontService, style: TextStyle) -> Result<Self, TextError> {
        let shaper = TextShaper::new(font.font_bytes(), font.size_px())?;
        Ok(Self { font, shaper, cache: GlyphCache::new(), style })
    }

    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }

    pub fn set_color(&mut self, color: ColorRgba) {
        self.style.color = color;
    }

    /// Draws `text` with its first pen position at `(x, y)` in canvas pixels
    /// (bottom-left origin).
    pub fn draw_text<C: GlyphCanvas + ?Sized>(
        &mut self,
        canvas: &mut C,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
    ) {
        canvas.begin_text(&TextUniforms {
            color: self.style.color,
            projection: self.style.canvas.ortho_projection(),
        });

        let mut glyphs = self.shaper.shape(text);

        // Advances come from the rasterized metrics so pen movement matches
        // the bitmaps that get drawn.
        let records: Vec<GlyphRecord> = glyphs
            .iter_mut()
            .map(|g| {
                let record = self.cache.get_or_create(g.glyph, &self.font, &mut *canvas);
                g.advance = record.advance;
                record
            })
            .collect();

        let params = LayoutParams {
            origin: Point::new(x, y),
            max_width: self.style.max_width,
            scale,
            line_height: self.style.line_height,
        };

        for (placed, record) in layout(&glyphs, &params).iter().zip(&records) {
            canvas.draw_glyph(record.texture, &glyph_quad(record, placed.pen, scale));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::test_support::{system_font, RecordingCanvas};

    fn drawer() -> Option<TextDrawer> {
        let font = FontService::from_bytes(system_font()?, 36.0).ok()?;
        TextDrawer::new(font, TextStyle::default()).ok()
    }

    #[test]
    fn hi_misses_twice_then_only_draws() {
        let Some(mut drawer) = drawer() else { return };
        let mut canvas = RecordingCanvas::default();

        drawer.draw_text(&mut canvas, "Hi", 50.0, 650.0, 1.0);
        assert_eq!(canvas.textures.len(), 2);
        assert_eq!(canvas.draws.len(), 2);

        drawer.draw_text(&mut canvas, "Hi", 50.0, 650.0, 1.0);
        assert_eq!(canvas.textures.len(), 2);
        assert_eq!(canvas.draws.len(), 4);
        assert_eq!(drawer.cache().len(), 2);
    }

    #[test]
    fn repeated_glyphs_share_a_texture() {
        let Some(mut drawer) = drawer() else { return };
        let mut canvas = RecordingCanvas::default();

        drawer.draw_text(&mut canvas, "aaa", 0.0, 0.0, 1.0);
        assert_eq!(canvas.textures.len(), 1);
        assert_eq!(canvas.draws.len(), 3);
        assert!(canvas.draws.iter().all(|(t, _)| *t == canvas.draws[0].0));
    }

    #[test]
    fn binds_color_and_fixed_canvas_projection() {
        let Some(mut drawer) = drawer() else { return };
        let mut canvas = RecordingCanvas::default();
        let color = ColorRgba::new(0.7, 0.8, 0.47, 1.0);
        drawer.set_color(color);

        drawer.draw_text(&mut canvas, "x", 0.0, 0.0, 1.0);

        let uniforms = canvas.uniforms.last().copied().unwrap();
        assert_eq!(uniforms.color, color);
        assert_eq!(uniforms.projection, TEXT_CANVAS.ortho_projection());
    }

    #[test]
    fn glyphs_advance_left_to_right() {
        let Some(mut drawer) = drawer() else { return };
        let mut canvas = RecordingCanvas::default();

        drawer.draw_text(&mut canvas, "ab", 10.0, 100.0, 1.0);

        let a_pen = canvas.draws[0].1[1].pos[0];
        let b_pen = canvas.draws[1].1[1].pos[0];
        assert!(b_pen > a_pen);
    }

    #[test]
    fn newline_moves_next_glyph_down_one_line() {
        let Some(mut drawer) = drawer() else { return };
        let mut canvas = RecordingCanvas::default();
        let scale = 2.0;

        drawer.draw_text(&mut canvas, "H\nH", 50.0, 650.0, scale);

        // Same glyph, same bearing: the quads differ only by the pen move.
        let first = canvas.draws[0].1[1].pos;
        let last = canvas.draws[2].1[1].pos;
        assert_eq!(first[0], last[0]);
        assert_eq!(first[1] - last[1], DEFAULT_LINE_HEIGHT * scale);
    }

    #[test]
    fn empty_text_draws_nothing() {
        let Some(mut drawer) = drawer() else { return };
        let mut canvas = RecordingCanvas::default();
        drawer.draw_text(&mut canvas, "", 0.0, 0.0, 1.0);
        assert!(canvas.draws.is_empty());
        assert!(canvas.textures.is_empty());
    }
}
