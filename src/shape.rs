//! The shaping pipeline.
//!
//! [`ShapeContext`] ties the collaborators together: it decodes a
//! [`TextRun`], runs the script-specific pass from [`scripts`], offers the
//! result to the [`LayoutEngine`], maps characters to glyphs through the
//! [`FontBackend`], positions (rich layout or the heuristic fallback),
//! mirrors and reverses right-to-left runs, and commits into the caller's
//! [`ShapeBuffers`].

use bitflags::bitflags;

use crate::buffer::{decode_units, GlyphFlags, ShapeBuffers, ShapeUnit, TextRun};
use crate::error::ShapingError;
use crate::font::FontBackend;
use crate::layout::{LayoutEngine, LayoutSelection, LayoutStatus};
use crate::position;
use crate::scripts::{self, ScriptType};
use crate::unicode;

bitflags! {
    /// Per-context shaping switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ShapeFlags: u8 {
        /// Never offer runs to the layout collaborator.
        const DISABLE_LAYOUT = 1 << 0;
        /// Keep base codepoints on the fallback path, for callers that
        /// substitute presentation forms themselves.
        const NO_PRESENTATION_FORMS = 1 << 1;
    }
}

/// A font/layout pairing that shapes runs. Holds no per-run state, so one
/// context shapes any number of runs and is freely shared.
pub struct ShapeContext<'a, F, L> {
    font: &'a F,
    layout: &'a L,
    flags: ShapeFlags,
}

impl<'a, F: FontBackend, L: LayoutEngine> ShapeContext<'a, F, L> {
    pub fn new(font: &'a F, layout: &'a L) -> Self {
        Self::with_flags(font, layout, ShapeFlags::empty())
    }

    pub fn with_flags(font: &'a F, layout: &'a L, flags: ShapeFlags) -> Self {
        ShapeContext {
            font,
            layout,
            flags,
        }
    }

    /// Build the selection for a run's script with that script's default
    /// feature set. Callers shaping many runs of one script build this once
    /// and pass it to every [`ShapeContext::shape`] call.
    pub fn selection(&self, script: u32) -> LayoutSelection {
        let features = ScriptType::from_tag(script).base_features();
        LayoutSelection::new(script, features)
    }

    /// Shape one run into `buffers`.
    ///
    /// On `Err(ShapingError::Capacity { required })` nothing has been
    /// written; retrying with buffers of at least `required` units succeeds.
    pub fn shape(
        &self,
        run: &TextRun<'_>,
        selection: &LayoutSelection,
        buffers: &mut ShapeBuffers,
    ) -> Result<(), ShapingError> {
        if run.len == 0 {
            return Err(ShapingError::EmptyRun);
        }

        let mut chars = decode_units(run.units());
        if run.is_rtl() {
            // Mirror paired characters before any shaping so layout and
            // metrics see the form that will be drawn.
            for info in chars.iter_mut() {
                if let Some(mirror) = unicode::mirrored(info.ch) {
                    info.ch = mirror;
                }
            }
        }
        let script = ScriptType::from_tag(run.script);
        let covered = !self.flags.contains(ShapeFlags::DISABLE_LAYOUT)
            && self.layout.select_script(selection);
        let fallback_forms =
            !covered && !self.flags.contains(ShapeFlags::NO_PRESENTATION_FORMS);

        let mut units = scripts::preprocess(script, &chars, self.font, fallback_forms);

        let mut positioned = false;
        if covered {
            match self.layout.apply_substitution(selection, &mut units)? {
                LayoutStatus::Applied => {
                    self.map_glyphs(&mut units);
                    match self.layout.apply_positioning(selection, &mut units)? {
                        LayoutStatus::Applied => positioned = true,
                        LayoutStatus::NotCovered => {}
                    }
                }
                LayoutStatus::NotCovered => {
                    // The tables cover the script but not this feature set.
                    // Redo the script pass with fallback codecs enabled.
                    log::debug!(
                        "layout tables do not cover run features, taking fallback path"
                    );
                    let forms = !self.flags.contains(ShapeFlags::NO_PRESENTATION_FORMS);
                    units = scripts::preprocess(script, &chars, self.font, forms);
                }
            }
        }

        self.map_glyphs(&mut units);

        if !positioned {
            position::position_units(&mut units, self.font);
        }

        if run.is_rtl() {
            units.reverse();
        }

        buffers.commit(&units, run.len)
    }

    fn map_glyphs(&self, units: &mut [ShapeUnit]) {
        for unit in units.iter_mut() {
            if unit.glyph != 0 {
                continue;
            }
            if unit.attr.flags.contains(GlyphFlags::DONT_PRINT) {
                continue;
            }
            unit.glyph = self.font.glyph_index(unit.ch).unwrap_or(0);
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::GlyphMetrics;
    use crate::layout::NoLayout;
    use crate::tag;

    struct TestFont;

    impl FontBackend for TestFont {
        fn glyph_index(&self, ch: char) -> Option<u32> {
            Some(ch as u32)
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

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn empty_run_is_an_error() {
        let text = utf16("abc");
        let run = TextRun::new(&text, 1, 0, tag::LATN, 0);
        let font = TestFont;
        let ctx = ShapeContext::new(&font, &NoLayout);
        let selection = ctx.selection(tag::LATN);
        let mut buffers = ShapeBuffers::with_capacity(8);
        assert_eq!(
            ctx.shape(&run, &selection, &mut buffers),
            Err(ShapingError::EmptyRun)
        );
    }

    #[test]
    fn latin_run_maps_one_to_one() {
        let text = utf16("abc");
        let run = TextRun::new(&text, 0, 3, tag::LATN, 0);
        let font = TestFont;
        let ctx = ShapeContext::new(&font, &NoLayout);
        let selection = ctx.selection(tag::LATN);
        let mut buffers = ShapeBuffers::with_capacity(3);
        ctx.shape(&run, &selection, &mut buffers).unwrap();
        assert_eq!(buffers.len(), 3);
        assert_eq!(buffers.glyphs, vec!['a' as u32, 'b' as u32, 'c' as u32]);
        assert_eq!(buffers.advances, vec![100, 100, 100]);
        assert_eq!(buffers.clusters, vec![0, 1, 2]);
    }

    #[test]
    fn rtl_run_is_reversed_and_mirrored() {
        // Hebrew alef, open paren, bet, at embedding level 1
        let text = utf16("\u{05D0}(\u{05D1}");
        let run = TextRun::new(&text, 0, 3, tag::HEBR, 1);
        let font = TestFont;
        let ctx = ShapeContext::new(&font, &NoLayout);
        let selection = ctx.selection(tag::HEBR);
        let mut buffers = ShapeBuffers::with_capacity(3);
        ctx.shape(&run, &selection, &mut buffers).unwrap();
        // Visual order is the logical reverse, with the paren mirrored
        assert_eq!(
            buffers.glyphs,
            vec![0x05D1, ')' as u32, 0x05D0]
        );
        // The cluster map points each input unit at its visual position
        assert_eq!(buffers.clusters, vec![2, 1, 0]);
    }

    struct CoveringLayout;

    impl LayoutEngine for CoveringLayout {
        fn select_script(&self, _selection: &LayoutSelection) -> bool {
            true
        }
        fn apply_substitution(
            &self,
            _selection: &LayoutSelection,
            _units: &mut Vec<ShapeUnit>,
        ) -> Result<LayoutStatus, ShapingError> {
            Ok(LayoutStatus::Applied)
        }
        fn apply_positioning(
            &self,
            _selection: &LayoutSelection,
            _units: &mut [ShapeUnit],
        ) -> Result<LayoutStatus, ShapingError> {
            Ok(LayoutStatus::NotCovered)
        }
    }

    #[test]
    fn disable_layout_forces_the_fallback_codec() {
        // Lone beh: isolated presentation form on the fallback path
        let text = utf16("\u{0628}");
        let run = TextRun::new(&text, 0, 1, tag::ARAB, 1);
        let font = TestFont;

        let ctx = ShapeContext::new(&font, &CoveringLayout);
        let selection = ctx.selection(tag::ARAB);
        let mut buffers = ShapeBuffers::with_capacity(1);
        ctx.shape(&run, &selection, &mut buffers).unwrap();
        assert_eq!(buffers.glyphs, vec![0x0628]);

        let ctx = ShapeContext::with_flags(&font, &CoveringLayout, ShapeFlags::DISABLE_LAYOUT);
        ctx.shape(&run, &selection, &mut buffers).unwrap();
        assert_eq!(buffers.glyphs, vec![0xFE8F]);
    }

    #[test]
    fn capacity_error_then_retry() {
        let text = utf16("abcd");
        let run = TextRun::new(&text, 0, 4, tag::LATN, 0);
        let font = TestFont;
        let ctx = ShapeContext::new(&font, &NoLayout);
        let selection = ctx.selection(tag::LATN);
        let mut buffers = ShapeBuffers::with_capacity(2);
        let required = match ctx.shape(&run, &selection, &mut buffers) {
            Err(ShapingError::Capacity { required }) => required,
            other => panic!("expected capacity error, got {:?}", other),
        };
        assert!(buffers.is_empty());
        let mut buffers = ShapeBuffers::with_capacity(required);
        ctx.shape(&run, &selection, &mut buffers).unwrap();
        assert_eq!(buffers.len(), 4);
    }
}
