use crate::coords::ColorRgba;

use super::{GlyphQuad, RasterGlyph};

/// Opaque handle to a glyph texture owned by a [`GlyphCanvas`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub u32);

/// Uniform state bound once per `draw_text` call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextUniforms {
    pub color: ColorRgba,
    /// Column-major orthographic projection.
    pub projection: [[f32; 4]; 4],
}

/// GPU side of the text pipeline.
///
/// The pipeline never touches the graphics API directly; it allocates glyph
/// textures and issues per-glyph draws through this trait. The wgpu
/// implementation lives in [`crate::render::text`].
pub trait GlyphCanvas {
    /// Allocates a single-channel texture sized to the glyph bitmap and
    /// uploads it. The texture lives as long as the canvas.
    fn create_glyph_texture(&mut self, glyph: &RasterGlyph) -> TextureHandle;

    /// Binds the text program and its uniforms for the draws that follow.
    fn begin_text(&mut self, uniforms: &TextUniforms);

    /// Uploads one quad and draws it with `texture` bound.
    fn draw_glyph(&mut self, texture: TextureHandle, quad: &GlyphQuad);
}
