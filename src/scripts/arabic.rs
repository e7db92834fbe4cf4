//! Arabic joining, presentation-form fallback, and kashida justification.
//!
//! Joining runs a five-state machine over the run's joining classes. Each
//! step looks at the previous letter's state and the current letter's class
//! and yields two things: the settled form of the previous letter and the
//! running state of the current one. A trailing step with
//! [`Joining::None`] settles the last letter. Transparent characters
//! (combining marks) are invisible to the machine; ZWJ and ZWNJ are not,
//! which is how they force or suppress joins.
//!
//! When the font has OpenType coverage the computed forms only drive the
//! `isol`/`fina`/`init`/`medi` feature bits. Without coverage the run falls
//! back to the Unicode presentation-form blocks (U+FB50 and U+FE70), with
//! lam-alef pairs folded into their dedicated ligatures.
//!
//! N'Ko rides on the same machine: its letters are dual-joining and carry
//! the same feature bits, but there is no presentation-form fallback.

use unicode_joining_type::{get_joining_type, JoiningType};

use crate::buffer::{CharInfo, GlyphFlags, Justification, ShapeUnit};
use crate::font::FontBackend;
use crate::layout::FeatureMask;
use crate::unicode;

/// Joining classes the state machine distinguishes. Transparent characters
/// never reach the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Joining {
    None = 0,
    Causing = 1,
    Dual = 2,
    Right = 3,
}

/// Contextual form of one letter. Doubles as the machine state, where it
/// describes the joining behaviour of the most recent letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Isolated = 0,
    Final = 1,
    Initial = 2,
    Medial = 3,
    Causing = 4,
}

use Joining as J;
use Shape as S;

// Rows are the previous letter's state, columns the current letter's
// joining class. Each cell is (settled form of the previous letter,
// new state for the current letter).
#[rustfmt::skip]
const JOINING_TABLE: [[(Shape, Shape); 4]; 5] = [
    //   None                      Causing                  Dual                    Right
    [(S::Isolated, S::Isolated), (S::Isolated, S::Causing), (S::Isolated, S::Initial), (S::Isolated, S::Isolated)], // Isolated
    [(S::Final,    S::Isolated), (S::Final,    S::Causing), (S::Final,    S::Initial), (S::Final,    S::Isolated)], // Final
    [(S::Isolated, S::Isolated), (S::Initial,  S::Causing), (S::Initial,  S::Medial),  (S::Initial,  S::Final)],    // Initial
    [(S::Final,    S::Isolated), (S::Medial,   S::Causing), (S::Medial,   S::Medial),  (S::Medial,   S::Final)],    // Medial
    [(S::Isolated, S::Isolated), (S::Isolated, S::Causing), (S::Isolated, S::Medial),  (S::Isolated, S::Final)],    // Causing
];

/// One transition of the joining machine. Pure: the caller owns the state.
pub(crate) fn joining_step(state: Shape, class: Joining) -> (Shape, Shape) {
    JOINING_TABLE[state as usize][class as usize]
}

/// Joining class of `ch`, or `None` for transparent characters.
pub(crate) fn joining_class(ch: char) -> Option<Joining> {
    match get_joining_type(ch) {
        JoiningType::Transparent => None,
        JoiningType::NonJoining => Some(J::None),
        JoiningType::JoinCausing => Some(J::Causing),
        JoiningType::RightJoining => Some(J::Right),
        // No Arabic-block character is left-joining; treat the class like
        // dual so unexpected ones still join on the sides they declare.
        JoiningType::LeftJoining | JoiningType::DualJoining => Some(J::Dual),
        // JoiningType is non-exhaustive; future classes break no joins.
        _ => Some(J::None),
    }
}

/// Settle the contextual form of every character. Entries are `None` for
/// transparent characters.
pub(crate) fn compute_shapes(chars: &[char]) -> Vec<Option<Shape>> {
    let mut shapes = vec![None; chars.len()];
    let mut state = S::Isolated;
    let mut prev: Option<usize> = None;
    for (i, &ch) in chars.iter().enumerate() {
        let Some(class) = joining_class(ch) else {
            continue;
        };
        let (settled, next) = joining_step(state, class);
        if let Some(p) = prev {
            shapes[p] = Some(settled);
        }
        state = next;
        prev = Some(i);
    }
    if let Some(p) = prev {
        let (settled, _) = joining_step(state, J::None);
        shapes[p] = Some(settled);
    }
    shapes
}

pub(crate) fn features_for(shape: Shape) -> FeatureMask {
    let form = match shape {
        S::Isolated | S::Causing => FeatureMask::ISOL,
        S::Final => FeatureMask::FINA,
        S::Initial => FeatureMask::INIT,
        S::Medial => FeatureMask::MEDI,
    };
    form | FeatureMask::RLIG | FeatureMask::CALT
}

/// Presentation-form codec: first shaped form of `ch` and the number of
/// additional forms following it. The forms are laid out base+0 isolated,
/// base+1 final, base+2 initial, base+3 medial; right-joining letters carry
/// `1`, dual-joining letters `3`, and non-joining letters `0`.
#[rustfmt::skip]
pub(crate) fn presentation_form(ch: char) -> Option<(u32, u8)> {
    let (base, count) = match ch as u32 {
        0x0621 => (0xFE80, 0), // HAMZA
        0x0622 => (0xFE81, 1), // ALEF WITH MADDA ABOVE
        0x0623 => (0xFE83, 1), // ALEF WITH HAMZA ABOVE
        0x0624 => (0xFE85, 1), // WAW WITH HAMZA ABOVE
        0x0625 => (0xFE87, 1), // ALEF WITH HAMZA BELOW
        0x0626 => (0xFE89, 3), // YEH WITH HAMZA ABOVE
        0x0627 => (0xFE8D, 1), // ALEF
        0x0628 => (0xFE8F, 3), // BEH
        0x0629 => (0xFE93, 1), // TEH MARBUTA
        0x062A => (0xFE95, 3), // TEH
        0x062B => (0xFE99, 3), // THEH
        0x062C => (0xFE9D, 3), // JEEM
        0x062D => (0xFEA1, 3), // HAH
        0x062E => (0xFEA5, 3), // KHAH
        0x062F => (0xFEA9, 1), // DAL
        0x0630 => (0xFEAB, 1), // THAL
        0x0631 => (0xFEAD, 1), // REH
        0x0632 => (0xFEAF, 1), // ZAIN
        0x0633 => (0xFEB1, 3), // SEEN
        0x0634 => (0xFEB5, 3), // SHEEN
        0x0635 => (0xFEB9, 3), // SAD
        0x0636 => (0xFEBD, 3), // DAD
        0x0637 => (0xFEC1, 3), // TAH
        0x0638 => (0xFEC5, 3), // ZAH
        0x0639 => (0xFEC9, 3), // AIN
        0x063A => (0xFECD, 3), // GHAIN
        0x0641 => (0xFED1, 3), // FEH
        0x0642 => (0xFED5, 3), // QAF
        0x0643 => (0xFED9, 3), // KAF
        0x0644 => (0xFEDD, 3), // LAM
        0x0645 => (0xFEE1, 3), // MEEM
        0x0646 => (0xFEE5, 3), // NOON
        0x0647 => (0xFEE9, 3), // HEH
        0x0648 => (0xFEED, 1), // WAW
        0x0649 => (0xFEEF, 1), // ALEF MAKSURA
        0x064A => (0xFEF1, 3), // YEH
        0x0671 => (0xFB50, 1), // ALEF WASLA
        0x0679 => (0xFB66, 3), // TTEH
        0x067E => (0xFB56, 3), // PEH
        0x0686 => (0xFB7A, 3), // TCHEH
        0x0688 => (0xFB88, 1), // DDAL
        0x0691 => (0xFB8C, 1), // RREH
        0x0698 => (0xFB8A, 1), // JEH
        0x06A9 => (0xFB8E, 3), // KEHEH
        0x06AF => (0xFB92, 3), // GAF
        0x06BA => (0xFB9E, 1), // NOON GHUNNA
        0x06BE => (0xFBAA, 3), // HEH DOACHASHMEE
        0x06C1 => (0xFBA6, 3), // HEH GOAL
        0x06C7 => (0xFBD7, 1), // U
        0x06CC => (0xFBFC, 3), // FARSI YEH
        0x06D2 => (0xFBAE, 1), // YEH BARREE
        _ => return None,
    };
    Some((base, count))
}

/// The shaped character for `(ch, shape)`, when the presentation block has
/// the form and `font` can draw it.
fn shaped_char<F: FontBackend>(ch: char, shape: Shape, font: &F) -> char {
    let Some((base, count)) = presentation_form(ch) else {
        return ch;
    };
    let offset = match shape {
        S::Isolated | S::Causing => 0,
        S::Final => 1,
        S::Initial => 2,
        S::Medial => 3,
    };
    if offset > count as u32 {
        return ch;
    }
    match char::from_u32(base + offset) {
        Some(form) if font.can_render(&[form]) => form,
        _ => ch,
    }
}

/// Lam-alef ligature for `alef`, in isolated form. The final form is the
/// next code point.
fn lam_alef_ligature(alef: char) -> Option<char> {
    match alef {
        '\u{0622}' => Some('\u{FEF5}'), // LAM WITH ALEF WITH MADDA ABOVE
        '\u{0623}' => Some('\u{FEF7}'), // LAM WITH ALEF WITH HAMZA ABOVE
        '\u{0625}' => Some('\u{FEF9}'), // LAM WITH ALEF WITH HAMZA BELOW
        '\u{0627}' => Some('\u{FEFB}'), // LAM WITH ALEF
        _ => None,
    }
}

/// Kashida desirability of a junction that follows `ch`, lowest to highest
/// stretch preference as seen by a justifier.
fn justification_group(ch: char) -> Justification {
    match ch {
        '\u{0648}' | '\u{0624}' => Justification::ArabicWaw,
        '\u{0628}' | '\u{0631}' | '\u{0632}' | '\u{0691}' | '\u{0698}' => {
            Justification::ArabicBaRa
        }
        '\u{062C}'..='\u{062F}' | '\u{0630}' => Justification::ArabicHahDal,
        '\u{0633}'..='\u{0636}' => Justification::ArabicSeen,
        _ => Justification::ArabicNormal,
    }
}

fn is_lam_alef_alef(ch: char) -> bool {
    lam_alef_ligature(ch).is_some()
}

/// Shape one Arabic (or N'Ko) run into logical-order units.
///
/// `apply_presentation` selects the fallback codec; the layout path leaves
/// characters untouched and relies on the feature bits alone.
pub(crate) fn shape<F: FontBackend>(
    chars: &[CharInfo],
    font: &F,
    apply_presentation: bool,
) -> Vec<ShapeUnit> {
    let cs: Vec<char> = chars.iter().map(|c| c.ch).collect();
    let shapes = compute_shapes(&cs);

    let mut units = Vec::with_capacity(chars.len());
    let mut prev_letter: Option<char> = None;
    let mut i = 0;
    while i < chars.len() {
        let info = chars[i];
        let ch = info.ch;
        let Some(shape) = shapes[i] else {
            // Transparent: attach to the current cluster
            let cluster = units
                .last()
                .map(|u: &ShapeUnit| u.cluster)
                .unwrap_or(info.unit);
            units.push(ShapeUnit::mark(ch, cluster, unicode::combining_class(ch)));
            i += 1;
            continue;
        };

        // Lam-alef ligature on the fallback path. The alef's own code units
        // fold into the lam's cluster; any marks between the pair reattach
        // to the ligature.
        if apply_presentation && ch == '\u{0644}' && matches!(shape, S::Initial | S::Medial) {
            if let Some((j, alef)) = next_letter(chars, &shapes, i + 1) {
                if is_lam_alef_alef(alef) {
                    let lig = lam_alef_ligature(alef).and_then(|iso| {
                        let form = if shape == S::Medial {
                            char::from_u32(iso as u32 + 1).unwrap_or(iso)
                        } else {
                            iso
                        };
                        font.can_render(&[form]).then_some(form)
                    });
                    if let Some(lig) = lig {
                        let mut unit = ShapeUnit::new(lig, info.unit);
                        unit.features = features_for(shape);
                        unit.attr.justification = junction_priority(prev_letter);
                        units.push(unit);
                        for marked in &chars[i + 1..j] {
                            units.push(ShapeUnit::mark(
                                marked.ch,
                                info.unit,
                                unicode::combining_class(marked.ch),
                            ));
                        }
                        prev_letter = Some(alef);
                        i = j + 1;
                        continue;
                    }
                }
            }
        }

        let rendered = if apply_presentation {
            shaped_char(ch, shape, font)
        } else {
            ch
        };
        let mut unit = ShapeUnit::new(rendered, info.unit);
        unit.features = features_for(shape);
        match ch {
            ' ' | '\u{00A0}' => unit.attr.justification = Justification::ArabicSpace,
            '\u{0640}' => unit.attr.justification = Justification::ArabicKashida,
            _ => {
                if matches!(shape, S::Final | S::Medial) {
                    unit.attr.justification = if is_lam_alef_alef(ch) && shape == S::Final {
                        Justification::ArabicAlef
                    } else {
                        prev_letter
                            .map(justification_group)
                            .unwrap_or(Justification::ArabicNormal)
                    };
                }
            }
        }
        if ch == '\u{200C}' || ch == '\u{200D}' {
            unit.attr.flags |= GlyphFlags::DONT_PRINT | GlyphFlags::ZERO_WIDTH;
        }
        units.push(unit);
        prev_letter = Some(ch);
        i += 1;
    }
    units
}

/// Next non-transparent character at or after `from`.
fn next_letter(
    chars: &[CharInfo],
    shapes: &[Option<Shape>],
    from: usize,
) -> Option<(usize, char)> {
    (from..chars.len()).find_map(|j| shapes[j].map(|_| (j, chars[j].ch)))
}

/// Priority of the junction formed in front of the unit being emitted.
fn junction_priority(prev_letter: Option<char>) -> Justification {
    prev_letter
        .map(justification_group)
        .unwrap_or(Justification::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllGlyphs;

    impl FontBackend for AllGlyphs {
        fn glyph_index(&self, _ch: char) -> Option<u32> {
            Some(1)
        }
        fn glyph_metrics(&self, _glyph: u32) -> crate::font::GlyphMetrics {
            crate::font::GlyphMetrics::default()
        }
        fn advance(&self, _glyph: u32) -> i32 {
            10
        }
        fn ascent(&self) -> i32 {
            8
        }
        fn descent(&self) -> i32 {
            2
        }
    }

    fn info(cs: &[char]) -> Vec<CharInfo> {
        cs.iter()
            .enumerate()
            .map(|(i, &ch)| CharInfo {
                ch,
                unit: i,
                unit_len: 1,
            })
            .collect()
    }

    #[test]
    fn lone_letter_is_isolated() {
        let shapes = compute_shapes(&['\u{0628}']);
        assert_eq!(shapes, vec![Some(S::Isolated)]);
    }

    #[test]
    fn beh_alef_forms() {
        // Dual-joining beh takes the initial form, right-joining alef the
        // final form.
        let shapes = compute_shapes(&['\u{0628}', '\u{0627}']);
        assert_eq!(shapes, vec![Some(S::Initial), Some(S::Final)]);

        let units = shape(&info(&['\u{0628}', '\u{0627}']), &AllGlyphs, true);
        assert_eq!(units[0].ch, '\u{FE91}');
        assert_eq!(units[1].ch, '\u{FE8E}');
    }

    #[test]
    fn three_letter_word() {
        let shapes = compute_shapes(&['\u{0628}', '\u{0628}', '\u{0628}']);
        assert_eq!(
            shapes,
            vec![Some(S::Initial), Some(S::Medial), Some(S::Final)]
        );
    }

    #[test]
    fn zwnj_breaks_joining() {
        let shapes = compute_shapes(&['\u{0628}', '\u{200C}', '\u{0628}']);
        assert_eq!(shapes[0], Some(S::Isolated));
        assert_eq!(shapes[2], Some(S::Isolated));
    }

    #[test]
    fn marks_are_transparent() {
        // Shadda between the letters must not break the join
        let shapes = compute_shapes(&['\u{0628}', '\u{0651}', '\u{0628}']);
        assert_eq!(shapes, vec![Some(S::Initial), None, Some(S::Final)]);
    }

    #[test]
    fn lam_alef_ligates() {
        let units = shape(&info(&['\u{0644}', '\u{0627}']), &AllGlyphs, true);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].ch, '\u{FEFB}');
        assert_eq!(units[0].cluster, 0);
    }

    #[test]
    fn lam_alef_after_letter_takes_final_form() {
        // Beh joins into the lam, so the ligature is in final form
        let units = shape(&info(&['\u{0628}', '\u{0644}', '\u{0627}']), &AllGlyphs, true);
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].ch, '\u{FEFC}');
    }

    #[test]
    fn hamza_has_only_the_isolated_form() {
        // Form count 0: every offset past isolated falls back to the base
        assert_eq!(shaped_char('\u{0621}', S::Isolated, &AllGlyphs), '\u{FE80}');
        assert_eq!(shaped_char('\u{0621}', S::Final, &AllGlyphs), '\u{0621}');
        assert_eq!(shaped_char('\u{0621}', S::Initial, &AllGlyphs), '\u{0621}');
    }

    #[test]
    fn right_joiner_rejects_initial_and_medial_offsets() {
        // Alef carries one extra form, so only isolated and final map
        assert_eq!(shaped_char('\u{0627}', S::Final, &AllGlyphs), '\u{FE8E}');
        assert_eq!(shaped_char('\u{0627}', S::Initial, &AllGlyphs), '\u{0627}');
        assert_eq!(shaped_char('\u{0627}', S::Medial, &AllGlyphs), '\u{0627}');
    }

    #[test]
    fn junction_after_seen_prefers_kashida_there() {
        // Seen then beh: the joined beh carries the seen-class priority
        let units = shape(&info(&['\u{0633}', '\u{0628}']), &AllGlyphs, true);
        assert_eq!(units[1].attr.justification, Justification::ArabicSeen);
    }

    #[test]
    fn feature_bits_follow_shape() {
        let units = shape(&info(&['\u{0628}', '\u{0627}']), &AllGlyphs, false);
        assert!(units[0].features.contains(FeatureMask::INIT));
        assert!(units[1].features.contains(FeatureMask::FINA));
        // Layout path leaves the characters alone
        assert_eq!(units[0].ch, '\u{0628}');
    }
}
