//! The rich-layout collaborator boundary (OpenType GSUB/GPOS application
//! lives behind this trait, outside the core).
//!
//! Every script shaper first offers its run to the [`LayoutEngine`]; a
//! [`LayoutStatus::NotCovered`] answer routes the run (or syllable) through
//! the script's fallback codec and the heuristic positioner instead.

use bitflags::bitflags;

use crate::buffer::ShapeUnit;
use crate::error::ShapingError;

bitflags! {
    /// Shaping features a script shaper can request from the layout
    /// collaborator, one bit per feature tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FeatureMask: u32 {
        const ISOL = 1 << 0;
        const FINA = 1 << 1;
        const MEDI = 1 << 2;
        const INIT = 1 << 3;
        const FIN2 = 1 << 4;
        const FIN3 = 1 << 5;
        const MED2 = 1 << 6;
        const RLIG = 1 << 7;
        const CALT = 1 << 8;
        const LIGA = 1 << 9;
        const CCMP = 1 << 10;
        const LOCL = 1 << 11;
        // Syllabic scripts
        const NUKT = 1 << 12;
        const AKHN = 1 << 13;
        const RPHF = 1 << 14;
        const PREF = 1 << 15;
        const BLWF = 1 << 16;
        const HALF = 1 << 17;
        const PSTF = 1 << 18;
        const VATU = 1 << 19;
        const CJCT = 1 << 20;
        const PRES = 1 << 21;
        const ABVS = 1 << 22;
        const BLWS = 1 << 23;
        const PSTS = 1 << 24;
        const HALN = 1 << 25;
        const ABVF = 1 << 26;
    }
}

/// Outcome of offering work to the layout collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStatus {
    Applied,
    /// The font's layout tables do not cover this script/feature set. Not
    /// an error; the caller falls back to heuristics.
    NotCovered,
}

/// An explicit script/feature selection threaded through the shaping call.
///
/// Replaces the legacy hidden "current script" cache: a caller shaping many
/// runs of the same script builds one selection and reuses it, skipping
/// re-selection, without any cross-call mutable state in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSelection {
    pub script: u32,
    pub features: FeatureMask,
}

impl LayoutSelection {
    pub fn new(script: u32, features: FeatureMask) -> Self {
        LayoutSelection { script, features }
    }
}

pub trait LayoutEngine {
    /// True when the font's layout tables support `selection.script`.
    fn select_script(&self, selection: &LayoutSelection) -> bool;

    /// Apply substitution features to `units`. `features[i]` carries the
    /// per-unit requested features (pre/above/below/post forms etc.).
    /// May merge, split, or replace units; cluster values must be preserved.
    fn apply_substitution(
        &self,
        selection: &LayoutSelection,
        units: &mut Vec<ShapeUnit>,
    ) -> Result<LayoutStatus, ShapingError>;

    /// Apply positioning to `units`, writing advances and offsets. A
    /// `Capacity` error propagates the collaborator's space needs to the
    /// caller untouched.
    fn apply_positioning(
        &self,
        selection: &LayoutSelection,
        units: &mut [ShapeUnit],
    ) -> Result<LayoutStatus, ShapingError>;
}

/// A layout engine that covers nothing, for callers without OpenType
/// support. Every run takes the heuristic path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayout;

impl LayoutEngine for NoLayout {
    fn select_script(&self, _selection: &LayoutSelection) -> bool {
        false
    }

    fn apply_substitution(
        &self,
        _selection: &LayoutSelection,
        _units: &mut Vec<ShapeUnit>,
    ) -> Result<LayoutStatus, ShapingError> {
        Ok(LayoutStatus::NotCovered)
    }

    fn apply_positioning(
        &self,
        _selection: &LayoutSelection,
        _units: &mut [ShapeUnit],
    ) -> Result<LayoutStatus, ShapingError> {
        Ok(LayoutStatus::NotCovered)
    }
}
