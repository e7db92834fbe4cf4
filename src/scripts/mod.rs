//! Script-specific shaping knowledge.
//!
//! [`ScriptType`] is the closed set of behaviours the engine distinguishes;
//! every script tag maps onto exactly one variant and unknown tags take the
//! default path. Keeping the set closed makes the per-run dispatch a plain
//! `match` with no registry indirection.

pub(crate) mod arabic;
pub(crate) mod greek;
pub(crate) mod hangul;
pub(crate) mod hebrew;
pub(crate) mod indic;
pub(crate) mod khmer;
pub(crate) mod myanmar;
pub(crate) mod syllable;
pub(crate) mod syriac;
pub(crate) mod thai_lao;
pub(crate) mod tibetan;

use crate::buffer::{CharInfo, ShapeUnit};
use crate::font::FontBackend;
use crate::layout::FeatureMask;
use crate::tag;
use crate::unicode;

pub use indic::IndicScript;

/// Shaping behaviour selected by a run's script tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptType {
    /// Simple left-to-right scripts with no contextual shaping.
    Common,
    Arabic,
    Nko,
    Syriac,
    Greek,
    Hebrew,
    Hangul,
    Tibetan,
    Khmer,
    Myanmar,
    Thai,
    Lao,
    Indic(IndicScript),
}

impl ScriptType {
    pub fn from_tag(script: u32) -> ScriptType {
        match script {
            tag::ARAB => ScriptType::Arabic,
            tag::NKO => ScriptType::Nko,
            tag::SYRC => ScriptType::Syriac,
            tag::GREK => ScriptType::Greek,
            tag::HEBR => ScriptType::Hebrew,
            tag::HANG => ScriptType::Hangul,
            tag::TIBT => ScriptType::Tibetan,
            tag::KHMR => ScriptType::Khmer,
            tag::MYMR => ScriptType::Myanmar,
            tag::THAI => ScriptType::Thai,
            tag::LAO => ScriptType::Lao,
            tag::DEVA => ScriptType::Indic(IndicScript::Devanagari),
            tag::BENG => ScriptType::Indic(IndicScript::Bengali),
            tag::GURU => ScriptType::Indic(IndicScript::Gurmukhi),
            tag::GUJR => ScriptType::Indic(IndicScript::Gujarati),
            tag::ORYA => ScriptType::Indic(IndicScript::Oriya),
            tag::TAML => ScriptType::Indic(IndicScript::Tamil),
            tag::TELU => ScriptType::Indic(IndicScript::Telugu),
            tag::KNDA => ScriptType::Indic(IndicScript::Kannada),
            tag::MLYM => ScriptType::Indic(IndicScript::Malayalam),
            tag::SINH => ScriptType::Indic(IndicScript::Sinhala),
            _ => ScriptType::Common,
        }
    }

    /// Scripts written right to left. The bidi level still decides the
    /// run's direction; this only picks defaults for callers without one.
    pub fn is_rtl(self) -> bool {
        matches!(
            self,
            ScriptType::Arabic | ScriptType::Nko | ScriptType::Syriac | ScriptType::Hebrew
        )
    }

    /// Substitution features requested for every unit of a run, before the
    /// shaper adds per-unit form bits.
    pub(crate) fn base_features(self) -> FeatureMask {
        match self {
            ScriptType::Arabic | ScriptType::Nko | ScriptType::Syriac => {
                FeatureMask::CCMP | FeatureMask::LOCL | FeatureMask::LIGA
            }
            ScriptType::Indic(_) | ScriptType::Khmer | ScriptType::Myanmar => {
                FeatureMask::CCMP | FeatureMask::LOCL
            }
            _ => FeatureMask::CCMP | FeatureMask::LOCL | FeatureMask::LIGA | FeatureMask::CALT,
        }
    }
}

/// Run the script-specific pass over a decoded run.
///
/// `fallback` is true when no OpenType coverage exists for the run, which
/// enables codecs that bake shaping into characters (Arabic presentation
/// forms). Feature bits are always computed; the layout path consumes them
/// and the fallback path ignores them.
pub(crate) fn preprocess<F: FontBackend>(
    script: ScriptType,
    chars: &[CharInfo],
    font: &F,
    fallback: bool,
) -> Vec<ShapeUnit> {
    match script {
        ScriptType::Arabic => arabic::shape(chars, font, fallback),
        ScriptType::Nko => arabic::shape(chars, font, false),
        ScriptType::Syriac => syriac::shape(chars),
        ScriptType::Greek => greek::shape(chars, font),
        ScriptType::Hebrew => hebrew::shape(chars, font),
        ScriptType::Hangul => hangul::shape(chars, font),
        ScriptType::Tibetan => tibetan::shape(chars),
        ScriptType::Khmer => khmer::shape(chars),
        ScriptType::Myanmar => myanmar::shape(chars),
        ScriptType::Thai | ScriptType::Lao => thai_lao::shape(chars),
        ScriptType::Indic(indic_script) => indic::shape(indic_script, chars),
        ScriptType::Common => default_shape(chars),
    }
}

/// Syllable-start cursor stops for scripts whose clusters are bigger than
/// a base plus its marks. `None` means the default grapheme rule stands.
pub(crate) fn char_stops(script: ScriptType, chars: &[char]) -> Option<Vec<bool>> {
    match script {
        ScriptType::Tibetan => Some(tibetan::char_stops(chars)),
        ScriptType::Khmer => Some(khmer::char_stops(chars)),
        ScriptType::Myanmar => Some(myanmar::char_stops(chars)),
        ScriptType::Indic(indic_script) => Some(indic::char_stops(indic_script, chars)),
        _ => None,
    }
}

/// The default pass: bases open clusters, combining marks attach to the
/// preceding cluster.
fn default_shape(chars: &[CharInfo]) -> Vec<ShapeUnit> {
    let mut units = Vec::with_capacity(chars.len());
    for info in chars {
        if unicode::is_mark(info.ch) && !units.is_empty() {
            let cluster = units.last().map(|u: &ShapeUnit| u.cluster).unwrap_or(0);
            units.push(ShapeUnit::mark(
                info.ch,
                cluster,
                unicode::combining_class(info.ch),
            ));
        } else {
            units.push(ShapeUnit::new(info.ch, info.unit));
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_dispatch() {
        assert_eq!(ScriptType::from_tag(tag::ARAB), ScriptType::Arabic);
        assert_eq!(
            ScriptType::from_tag(tag::TAML),
            ScriptType::Indic(IndicScript::Tamil)
        );
        assert_eq!(ScriptType::from_tag(tag::LATN), ScriptType::Common);
    }

    #[test]
    fn default_shape_attaches_marks() {
        let chars = [
            CharInfo {
                ch: 'a',
                unit: 0,
                unit_len: 1,
            },
            CharInfo {
                ch: '\u{0301}',
                unit: 1,
                unit_len: 1,
            },
        ];
        let units = default_shape(&chars);
        assert_eq!(units.len(), 2);
        assert!(units[1].attr.is_mark());
        assert_eq!(units[1].cluster, 0);
    }
}
