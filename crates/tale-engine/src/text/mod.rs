//! Glyph-by-glyph text pipeline.
//!
//! ```text
//! &str ─▶ TextShaper ─▶ [ShapedGlyph] ─▶ GlyphCache (FontService on miss)
//!                                   └──▶ layout ─▶ glyph_quad ─▶ GlyphCanvas::draw_glyph
//! ```
//!
//! [`TextDrawer`] composes the stages. GPU work goes through the
//! [`GlyphCanvas`] trait; [`crate::render::text`] provides the wgpu backend.

mod cache;
mod canvas;
mod draw;
mod error;
mod font;
mod layout;
mod quad;
mod shaper;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{GlyphCache, GlyphRecord};
pub use canvas::{GlyphCanvas, TextUniforms, TextureHandle};
pub use draw::{TextDrawer, TextStyle, TEXT_CANVAS};
pub use error::TextError;
pub use font::{find_font_file, FontService, GlyphIndex, RasterGlyph, FALLBACK_FONTS};
pub use layout::{layout, LayoutParams, PositionedGlyph, DEFAULT_LINE_HEIGHT, DEFAULT_MAX_WIDTH};
pub use quad::{glyph_quad, GlyphQuad, GlyphVertex};
pub use shaper::{ShapedGlyph, TextShaper};
