use bytemuck::{Pod, Zeroable};

use crate::coords::Point;

use super::GlyphRecord;

/// One text vertex: canvas position `xy` and texture coordinate `uv`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

impl GlyphVertex {
    const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self { pos: [x, y], uv: [u, v] }
    }
}

/// Two triangles covering one glyph bitmap.
pub type GlyphQuad = [GlyphVertex; 6];

/// Builds the quad for `record` drawn with its pen at `pen`.
///
/// The bitmap hangs `height - bearing.y` below the baseline. `v` runs from 0
/// at the top edge to 1 at the bottom to match the rasterizer's top-down rows.
pub fn glyph_quad(record: &GlyphRecord, pen: Point, scale: f32) -> GlyphQuad {
    let (bw, bh) = record.size;
    let (bx, by) = record.bearing;

    let x = pen.x + bx as f32 * scale;
    let y = pen.y - (bh as f32 - by as f32) * scale;
    let w = bw as f32 * scale;
    let h = bh as f32 * scale;

    [
        GlyphVertex::new(x,     y + h, 0.0, 0.0),
        GlyphVertex::new(x,     y,     0.0, 1.0),
        GlyphVertex::new(x + w, y,     1.0, 1.0),

        GlyphVertex::new(x,     y + h, 0.0, 0.0),
        GlyphVertex::new(x + w, y,     1.0, 1.0),
        GlyphVertex::new(x + w, y + h, 1.0, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextureHandle;

    fn record(size: (u32, u32), bearing: (i32, i32)) -> GlyphRecord {
        GlyphRecord { texture: TextureHandle(0), size, bearing, advance: 0 }
    }

    #[test]
    fn quad_spans_bitmap_from_bearing() {
        // 10x20 bitmap, 2px right of the pen, top 15px above the baseline.
        let q = glyph_quad(&record((10, 20), (2, 15)), Point::new(100.0, 200.0), 1.0);

        // Bottom edge sits 5px below the baseline.
        assert_eq!(q[1].pos, [102.0, 195.0]);
        assert_eq!(q[0].pos, [102.0, 215.0]);
        assert_eq!(q[2].pos, [112.0, 195.0]);
        assert_eq!(q[5].pos, [112.0, 215.0]);
    }

    #[test]
    fn scale_applies_to_bearing_and_size() {
        let q = glyph_quad(&record((10, 20), (2, 15)), Point::new(0.0, 0.0), 2.0);
        assert_eq!(q[1].pos, [4.0, -10.0]);
        assert_eq!(q[5].pos, [24.0, 30.0]);
    }

    #[test]
    fn uv_top_is_v0() {
        let q = glyph_quad(&record((4, 4), (0, 4)), Point::new(0.0, 0.0), 1.0);
        let top: Vec<_> = q.iter().filter(|v| v.pos[1] == 4.0).map(|v| v.uv[1]).collect();
        let bottom: Vec<_> = q.iter().filter(|v| v.pos[1] == 0.0).map(|v| v.uv[1]).collect();
        assert!(top.iter().all(|&v| v == 0.0));
        assert!(bottom.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn empty_bitmap_is_degenerate() {
        let q = glyph_quad(&record((0, 0), (0, 0)), Point::new(7.0, 9.0), 1.0);
        assert!(q.iter().all(|v| v.pos == [7.0, 9.0]));
    }

    #[test]
    fn vertex_is_four_floats() {
        assert_eq!(std::mem::size_of::<GlyphVertex>(), 16);
        assert_eq!(std::mem::size_of::<GlyphQuad>(), 6 * 16);
    }
}
