//! Fixtures shared by the text pipeline tests.

use super::{GlyphCanvas, GlyphQuad, RasterGlyph, TextUniforms, TextureHandle, FALLBACK_FONTS};

/// Bytes of the first system font in [`FALLBACK_FONTS`] that exists.
///
/// Tests that need real glyphs return early when this is `None`; the notice
/// on stderr makes those skips visible with `--nocapture`.
pub(crate) fn system_font() -> Option<Vec<u8>> {
    let font = FALLBACK_FONTS.iter().find_map(|p| std::fs::read(p).ok());
    if font.is_none() {
        eprintln!("skipping font-dependent checks: none of {FALLBACK_FONTS:?} is installed");
    }
    font
}

/// [`GlyphCanvas`] that records every call instead of talking to a GPU.
#[derive(Default)]
pub(crate) struct RecordingCanvas {
    /// Size of each allocated texture, indexed by handle.
    pub textures: Vec<(u32, u32)>,
    pub uniforms: Vec<TextUniforms>,
    pub draws: Vec<(TextureHandle, GlyphQuad)>,
}

impl GlyphCanvas for RecordingCanvas {
    fn create_glyph_texture(&mut self, glyph: &RasterGlyph) -> TextureHandle {
        self.textures.push((glyph.width, glyph.height));
        TextureHandle(self.textures.len() as u32 - 1)
    }

    fn begin_text(&mut self, uniforms: &TextUniforms) {
        self.uniforms.push(*uniforms);
    }

    fn draw_glyph(&mut self, texture: TextureHandle, quad: &GlyphQuad) {
        self.draws.push((texture, *quad));
    }
}
