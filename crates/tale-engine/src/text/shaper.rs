//! Text shaping via `rustybuzz`.
//!
//! Policy is fixed: left-to-right, Latin script, English. For this scope
//! shaping is effectively a cmap lookup per codepoint, but going through the
//! shaping engine keeps the glyph ids consistent with what a real shaper
//! would produce.

use std::sync::Arc;

use super::{GlyphIndex, TextError};

/// One glyph of a shaped run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapedGlyph {
    pub glyph: GlyphIndex,
    /// Byte offset of the source cluster in the input string.
    pub cluster: usize,
    /// First character of the source cluster.
    pub ch: char,
    /// Horizontal advance in 26.6 fixed point.
    pub advance: i32,
}

impl ShapedGlyph {
    /// Space, comma, and period are the only soft break opportunities.
    pub fn is_breakable(&self) -> bool {
        matches!(self.ch, ' ' | ',' | '.')
    }

    /// Explicit line terminator: a newline in the source, or the `.notdef`
    /// glyph newlines shape to.
    pub fn is_line_terminator(&self) -> bool {
        self.ch == '\n' || self.glyph == GlyphIndex::NOTDEF
    }
}

pub struct TextShaper {
    bytes: Arc<[u8]>,
    size_px: f32,
    language: rustybuzz::Language,
}

impl TextShaper {
    /// Builds a shaper over the same font data the [`super::FontService`] loaded.
    pub fn new(bytes: Arc<[u8]>, size_px: f32) -> Result<Self, TextError> {
        if rustybuzz::Face::from_slice(&bytes, 0).is_none() {
            return Err(TextError::FontInit);
        }
        let language = "en".parse::<rustybuzz::Language>().map_err(|_| TextError::FontInit)?;
        Ok(Self { bytes, size_px, language })
    }

    /// Shapes `text` into an ordered glyph run.
    ///
    /// The face is rebuilt on each call; parsing the table directory is
    /// cheap compared to the shaping itself.
    pub fn shape(&self, text: &str) -> Vec<ShapedGlyph> {
        if text.is_empty() {
            return Vec::new();
        }

        let Some(face) = rustybuzz::Face::from_slice(&self.bytes, 0) else {
            log::warn!("shaper: font data no longer parses; emitting no glyphs");
            return Vec::new();
        };

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(rustybuzz::Direction::LeftToRight);
        buffer.set_script(rustybuzz::script::LATIN);
        buffer.set_language(self.language.clone());

        let shaped = rustybuzz::shape(&face, &[], buffer);
        let upem = face.units_per_em() as f32;
        let to_26_6 = self.size_px * 64.0 / upem;

        shaped
            .glyph_infos()
            .iter()
            .zip(shaped.glyph_positions())
            .map(|(info, pos)| {
                let cluster = info.cluster as usize;
                ShapedGlyph {
                    glyph: GlyphIndex(u16::try_from(info.glyph_id).unwrap_or(0)),
                    cluster,
                    ch: text.get(cluster..).and_then(|s| s.chars().next()).unwrap_or('\0'),
                    advance: (pos.x_advance as f32 * to_26_6).round() as i32,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FontService;
    use crate::text::test_support::system_font;

    fn shaper() -> Option<(FontService, TextShaper)> {
        let font = FontService::from_bytes(system_font()?, 36.0).ok()?;
        let shaper = TextShaper::new(font.font_bytes(), font.size_px()).ok()?;
        Some((font, shaper))
    }

    #[test]
    fn invalid_font_data_is_init_error() {
        let err = TextShaper::new(Arc::from(vec![1u8, 2, 3]), 36.0).err();
        assert!(matches!(err, Some(TextError::FontInit)));
    }

    #[test]
    fn one_glyph_per_ascii_codepoint() {
        let Some((_, shaper)) = shaper() else { return };
        for s in ["Hello", "Hi there, friend.", "a b c", "0123456789"] {
            assert_eq!(shaper.shape(s).len(), s.chars().count(), "{s:?}");
        }
    }

    #[test]
    fn empty_string_shapes_to_nothing() {
        let Some((_, shaper)) = shaper() else { return };
        assert!(shaper.shape("").is_empty());
    }

    #[test]
    fn glyphs_match_cmap_and_clusters_are_ordered() {
        let Some((font, shaper)) = shaper() else { return };
        let run = shaper.shape("Hey,");

        let chars: Vec<char> = run.iter().map(|g| g.ch).collect();
        assert_eq!(chars, vec!['H', 'e', 'y', ',']);
        assert_eq!(run[0].glyph, font.glyph_index('H'));
        assert!(run.windows(2).all(|w| w[0].cluster < w[1].cluster));
        assert!(run[3].is_breakable());
        assert!(!run[0].is_breakable());
    }

    #[test]
    fn advances_are_positive_for_printable_text() {
        let Some((_, shaper)) = shaper() else { return };
        assert!(shaper.shape("ab").iter().all(|g| g.advance > 0));
    }

    #[test]
    fn newline_is_a_line_terminator() {
        let g = ShapedGlyph { glyph: GlyphIndex(12), cluster: 0, ch: '\n', advance: 0 };
        assert!(g.is_line_terminator());

        let notdef = ShapedGlyph { glyph: GlyphIndex::NOTDEF, cluster: 0, ch: '\u{1}', advance: 0 };
        assert!(notdef.is_line_terminator());

        let letter = ShapedGlyph { glyph: GlyphIndex(40), cluster: 0, ch: 'x', advance: 0 };
        assert!(!letter.is_line_terminator());
    }
}
