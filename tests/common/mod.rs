//! Mock collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashSet;

use textshaper::font::GlyphMetrics;
use textshaper::layout::{LayoutSelection, LayoutStatus};
use textshaper::{FontBackend, LayoutEngine, ShapingError};

/// A font that maps every character to its codepoint as glyph index, with a
/// configurable set of holes.
pub struct MockFont {
    missing: HashSet<char>,
}

impl MockFont {
    pub fn full() -> Self {
        MockFont {
            missing: HashSet::new(),
        }
    }

    pub fn without(chars: &[char]) -> Self {
        MockFont {
            missing: chars.iter().copied().collect(),
        }
    }
}

impl FontBackend for MockFont {
    fn glyph_index(&self, ch: char) -> Option<u32> {
        if self.missing.contains(&ch) {
            None
        } else {
            Some(ch as u32)
        }
    }

    fn glyph_metrics(&self, _glyph: u32) -> GlyphMetrics {
        GlyphMetrics {
            width: 100,
            height: 100,
            ..GlyphMetrics::default()
        }
    }

    fn advance(&self, _glyph: u32) -> i32 {
        100
    }

    fn ascent(&self) -> i32 {
        800
    }

    fn descent(&self) -> i32 {
        200
    }
}

/// A layout engine whose tables cover every script but substitute nothing
/// and position nothing, so shaping keeps base characters and the
/// heuristic positioner runs.
pub struct PassthroughLayout;

impl LayoutEngine for PassthroughLayout {
    fn select_script(&self, _selection: &LayoutSelection) -> bool {
        true
    }

    fn apply_substitution(
        &self,
        _selection: &LayoutSelection,
        _units: &mut Vec<textshaper::buffer::ShapeUnit>,
    ) -> Result<LayoutStatus, ShapingError> {
        Ok(LayoutStatus::Applied)
    }

    fn apply_positioning(
        &self,
        _selection: &LayoutSelection,
        _units: &mut [textshaper::buffer::ShapeUnit],
    ) -> Result<LayoutStatus, ShapingError> {
        Ok(LayoutStatus::NotCovered)
    }
}

pub fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}
