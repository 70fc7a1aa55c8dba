//! wgpu backend for the text pipeline.
//!
//! [`GlyphQuadRenderer`] owns every GPU resource the text needs. Each frame
//! it hands out a [`TextPass`], the [`GlyphCanvas`](crate::text::GlyphCanvas)
//! the drawer records into, and replays it onto the frame's [`RenderTarget`].

mod ctx;
pub mod text;

pub use ctx::{RenderCtx, RenderTarget};
pub use text::{GlyphQuadRenderer, TextPass};
