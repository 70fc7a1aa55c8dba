//! Greedy single-pass line layout.
//!
//! Coordinates are canvas pixels with the origin at the bottom-left and +Y
//! up, so each new line moves the pen *down* by decreasing y.

use crate::coords::Point;

use super::{GlyphIndex, ShapedGlyph};

/// Default width budget, in absolute canvas pixels.
pub const DEFAULT_MAX_WIDTH: f32 = 400.0;

/// Default distance between baselines at scale 1.
pub const DEFAULT_LINE_HEIGHT: f32 = 50.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutParams {
    /// Pen position of the first glyph; `origin.x` is also the line start.
    pub origin: Point,
    /// A soft break is taken once the pen x passes this value.
    pub max_width: f32,
    pub scale: f32,
    pub line_height: f32,
}

impl LayoutParams {
    pub fn new(origin: Point, scale: f32) -> Self {
        Self {
            origin,
            max_width: DEFAULT_MAX_WIDTH,
            scale,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

/// A glyph together with the pen position it is drawn at.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PositionedGlyph {
    pub glyph: GlyphIndex,
    pub pen: Point,
}

/// Assigns a pen position to every glyph of a shaped run.
///
/// After each glyph the pen advances by its whole-pixel advance. If the pen
/// has passed `max_width` and the glyph was a space, comma or period, or if
/// the glyph is a line terminator, the pen returns to `origin.x` one line
/// lower. There is no lookahead, so a word may run past the budget before the
/// next break opportunity.
pub fn layout(glyphs: &[ShapedGlyph], params: &LayoutParams) -> Vec<PositionedGlyph> {
    let mut pen = params.origin;
    let mut out = Vec::with_capacity(glyphs.len());

    for g in glyphs {
        out.push(PositionedGlyph { glyph: g.glyph, pen });

        pen.x += (g.advance >> 6) as f32 * params.scale;

        let soft_break = pen.x > params.max_width && g.is_breakable();
        if soft_break || g.is_line_terminator() {
            pen.x = params.origin.x;
            pen.y -= params.line_height * params.scale;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, advance_px: i32) -> Vec<ShapedGlyph> {
        text.char_indices()
            .map(|(i, ch)| ShapedGlyph {
                glyph: GlyphIndex(ch as u16),
                cluster: i,
                ch,
                advance: advance_px << 6,
            })
            .collect()
    }

    fn params(x: f32, y: f32, max_width: f32, scale: f32) -> LayoutParams {
        LayoutParams { max_width, ..LayoutParams::new(Point::new(x, y), scale) }
    }

    #[test]
    fn single_line_advances_in_whole_pixels() {
        let mut glyphs = run("abc", 10);
        // 10.5 px: the fractional part is dropped.
        glyphs[0].advance = 10 * 64 + 32;

        let out = layout(&glyphs, &params(5.0, 100.0, 400.0, 1.0));
        let xs: Vec<f32> = out.iter().map(|p| p.pen.x).collect();
        assert_eq!(xs, vec![5.0, 15.0, 25.0]);
        assert!(out.iter().all(|p| p.pen.y == 100.0));
    }

    #[test]
    fn scale_multiplies_advance() {
        let out = layout(&run("ab", 10), &params(0.0, 0.0, 400.0, 1.5));
        assert_eq!(out[1].pen.x, 15.0);
    }

    #[test]
    fn breaks_after_space_past_budget() {
        // Pen after "aaaa " is 50 > 45, and the last glyph is a space.
        let out = layout(&run("aaaa bb", 10), &params(0.0, 200.0, 45.0, 1.0));

        let b = out[5];
        assert_eq!(b.pen, Point::new(0.0, 150.0));
        assert_eq!(out[6].pen, Point::new(10.0, 150.0));
    }

    #[test]
    fn no_break_at_space_before_budget() {
        let out = layout(&run("ab cd", 10), &params(0.0, 0.0, 400.0, 1.0));
        assert!(out.iter().all(|p| p.pen.y == 0.0));
    }

    #[test]
    fn long_word_overflows_until_next_break() {
        let out = layout(&run("abcdefgh ij", 10), &params(0.0, 0.0, 30.0, 1.0));

        // The word keeps going past the budget on the first line...
        assert_eq!(out[7].pen, Point::new(70.0, 0.0));
        // ...and wraps after the following space.
        assert_eq!(out[9].pen, Point::new(0.0, -50.0));
    }

    #[test]
    fn comma_and_period_are_break_points() {
        let out = layout(&run("aaa,b", 10), &params(0.0, 0.0, 35.0, 1.0));
        assert_eq!(out[4].pen, Point::new(0.0, -50.0));

        let out = layout(&run("aaa.b", 10), &params(0.0, 0.0, 35.0, 1.0));
        assert_eq!(out[4].pen, Point::new(0.0, -50.0));
    }

    #[test]
    fn newline_always_breaks() {
        let out = layout(&run("a\nb", 10), &params(20.0, 0.0, 400.0, 1.0));
        assert_eq!(out[2].pen, Point::new(20.0, -50.0));
    }

    #[test]
    fn wrapped_lines_are_line_height_times_scale_apart() {
        let scale = 1.5;
        let out = layout(&run("a\nb\nc", 10), &params(0.0, 600.0, 400.0, scale));
        let ys: Vec<f32> = [0, 2, 4].iter().map(|&i| out[i].pen.y).collect();

        assert_eq!(ys[0] - ys[1], 50.0 * scale);
        assert_eq!(ys[1] - ys[2], 50.0 * scale);
    }

    #[test]
    fn layout_is_deterministic() {
        let glyphs = run("The quick brown fox, jumps. Over the lazy dog", 17);
        let p = params(50.0, 650.0, 400.0, 1.2);
        assert_eq!(layout(&glyphs, &p), layout(&glyphs, &p));
    }

    #[test]
    fn empty_run_yields_nothing() {
        assert!(layout(&[], &params(0.0, 0.0, 400.0, 1.0)).is_empty());
    }
}
