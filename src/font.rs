//! The font/glyph collaborator boundary.
//!
//! The shaping core never touches font binaries; everything it needs from
//! the font comes through [`FontBackend`]. Composition passes call
//! [`FontBackend::can_render`] before folding characters together so that a
//! precomposed form is only chosen when the font can actually draw it.

/// Ink box and bearing of one glyph, in font units.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphMetrics {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

pub trait FontBackend {
    /// Map a character to a glyph index, or `None` when the font has no
    /// glyph for it.
    fn glyph_index(&self, ch: char) -> Option<u32>;

    /// True when every character in `chars` maps to a real glyph.
    fn can_render(&self, chars: &[char]) -> bool {
        chars.iter().all(|&ch| self.glyph_index(ch).is_some())
    }

    fn glyph_metrics(&self, glyph: u32) -> GlyphMetrics;

    fn advance(&self, glyph: u32) -> i32;

    /// Distance from the baseline to the top of the em box, positive up.
    fn ascent(&self) -> i32;

    /// Distance from the baseline to the bottom of the em box, positive down.
    fn descent(&self) -> i32;
}
