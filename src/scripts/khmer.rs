//! Khmer syllable shaping.
//!
//! Syllables follow the pattern base consonant, optional register shifter
//! or robat, coeng-stacked consonants, dependent vowels and final signs.
//! Three rewrites happen inside each syllable before output:
//!
//! * split vowels (U+17BE, U+17BF, U+17C0, U+17C4, U+17C5) decompose into a
//!   leading U+17C1 plus their remainder,
//! * the left-wrapping pieces move in front of the base: pre-base vowels
//!   first, then a coeng-Ro pair, and
//! * a register shifter followed by an above-base vowel converts to its
//!   below-base form.
//!
//! The whole syllable is one cluster. A vowel or sign that starts a
//! syllable is stood on a dotted circle.

use crate::buffer::{CharInfo, GlyphFlags, ShapeUnit};
use crate::layout::FeatureMask;
use crate::scripts::syllable::{next_syllable, push_with_dotted_circle};
use crate::unicode;

const OTHER: u8 = 0;
const CONSONANT: u8 = 1;
const COENG: u8 = 2;
const MATRA: u8 = 3;
const SHIFTER: u8 = 4;
const ROBAT: u8 = 5;
const SIGN: u8 = 6;
const JOINER: u8 = 7;

const RO: char = '\u{179A}';

fn class(ch: char) -> u8 {
    match ch as u32 {
        0x1780..=0x17A2 => CONSONANT,          // Ka..A
        0x17A5..=0x17B3 => CONSONANT,          // independent vowels
        0x17B6..=0x17C5 => MATRA,              // dependent vowels
        0x17C6..=0x17C8 => SIGN,               // Nikahit, Reahmuk, Yuukaleapintu
        0x17C9 | 0x17CA => SHIFTER,            // Muusikatoan, Triisap
        0x17CC => ROBAT,                       // Robat
        0x17CB | 0x17CD..=0x17D1 | 0x17DD => SIGN,
        0x17D2 => COENG,                       // invisible stacker
        0x200C | 0x200D => JOINER,
        _ => OTHER,
    }
}

#[rustfmt::skip]
const STATES: &[&[i16]] = &[
    //  Other  Cons  Coeng  Matra  Shift  Robat  Sign  Joiner
    &[  -1,    1,    -1,    -1,    -1,    -1,    -1,   -1], // start
    &[  -1,   -1,     3,     4,     2,     2,     5,    6], // base
    &[  -1,   -1,     3,     4,    -1,    -1,     5,   -1], // shifter / robat
    &[  -1,    1,    -1,    -1,    -1,    -1,    -1,   -1], // coeng pending
    &[  -1,   -1,     3,     4,     5,    -1,     5,    6], // vowels
    &[  -1,   -1,    -1,    -1,    -1,    -1,     5,   -1], // signs
    &[  -1,   -1,    -1,     4,    -1,    -1,    -1,   -1], // joiner
];

/// Split vowels decompose into U+17C1 plus the original character, which
/// then carries only its above/post part.
fn decompose_split_vowels(chars: &[CharInfo]) -> Vec<(char, usize)> {
    let mut seq = Vec::with_capacity(chars.len());
    for info in chars {
        match info.ch {
            '\u{17BE}' | '\u{17BF}' | '\u{17C0}' | '\u{17C4}' | '\u{17C5}' => {
                seq.push(('\u{17C1}', info.unit));
                seq.push((info.ch, info.unit));
            }
            _ => seq.push((info.ch, info.unit)),
        }
    }
    seq
}

fn is_prebase_vowel(ch: char) -> bool {
    matches!(ch, '\u{17C1}' | '\u{17C2}' | '\u{17C3}')
}

/// Dependent vowels that render above the base (I, II, Y, YY).
fn is_above_vowel(ch: char) -> bool {
    matches!(ch, '\u{17B7}'..='\u{17BA}')
}

fn is_spacing(ch: char) -> bool {
    matches!(ch, '\u{17B6}' | '\u{17C1}'..='\u{17C5}' | '\u{17C7}' | '\u{17C8}')
}

/// Unit that continues the syllable's cluster without being a mark.
fn continuation(ch: char, cluster: usize) -> ShapeUnit {
    let mut unit = ShapeUnit::new(ch, cluster);
    unit.attr.flags = GlyphFlags::empty();
    unit
}

fn push_part(units: &mut Vec<ShapeUnit>, ch: char, cluster: usize, features: FeatureMask) {
    let mut unit = if is_spacing(ch) || class(ch) == CONSONANT {
        continuation(ch, cluster)
    } else {
        ShapeUnit::mark(ch, cluster, unicode::combining_class(ch))
    };
    if class(ch) == COENG || class(ch) == JOINER {
        unit.attr.flags |= GlyphFlags::DONT_PRINT | GlyphFlags::ZERO_WIDTH;
    }
    unit.features = features;
    units.push(unit);
}

fn emit_syllable(units: &mut Vec<ShapeUnit>, syllable: &[(char, usize)]) {
    let cluster = syllable[0].1;

    // Pre-base vowels wrap to the very front
    for &(ch, _) in syllable.iter().filter(|&&(ch, _)| is_prebase_vowel(ch)) {
        push_part(units, ch, cluster, FeatureMask::PRES);
    }

    // Then a coeng-Ro pair, if the syllable has one
    let mut coeng_ro = None;
    for (i, w) in syllable.windows(2).enumerate() {
        if class(w[0].0) == COENG && w[1].0 == RO {
            coeng_ro = Some(i);
            break;
        }
    }
    if let Some(i) = coeng_ro {
        push_part(units, syllable[i].0, cluster, FeatureMask::PREF);
        push_part(units, syllable[i + 1].0, cluster, FeatureMask::PREF);
    }

    // Base consonant opens the cluster
    let mut base = ShapeUnit::new(syllable[0].0, cluster);
    base.features = FeatureMask::PRES | FeatureMask::ABVS | FeatureMask::BLWS | FeatureMask::PSTS;
    units.push(base);

    // Everything else stays in logical order
    let mut skip_next = false;
    for (i, &(ch, _)) in syllable.iter().enumerate().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if Some(i) == coeng_ro {
            skip_next = true;
            continue;
        }
        if is_prebase_vowel(ch) {
            continue;
        }
        if class(ch) == SHIFTER && syllable[i + 1..].iter().any(|&(v, _)| is_above_vowel(v)) {
            // Muusikatoan and triisap yield their spot to an above vowel
            // and render in the below-base form instead. Combining class
            // 220 routes the fallback placement under the base.
            let mut unit = ShapeUnit::mark(ch, cluster, 220);
            unit.features = FeatureMask::BLWF;
            units.push(unit);
            continue;
        }
        let features = match class(ch) {
            COENG | CONSONANT => FeatureMask::BLWF,
            MATRA => FeatureMask::ABVS | FeatureMask::BLWS | FeatureMask::PSTS,
            _ => FeatureMask::empty(),
        };
        push_part(units, ch, cluster, features);
    }
}

/// Mark syllable starts for cursor movement, one `true` per syllable.
pub(crate) fn char_stops(chars: &[char]) -> Vec<bool> {
    let classes: Vec<u8> = chars.iter().map(|&ch| class(ch)).collect();
    let mut stops = vec![false; chars.len()];
    let mut start = 0;
    while start < chars.len() {
        stops[start] = true;
        start += next_syllable(STATES, &classes[start..]);
    }
    stops
}

/// Shape one Khmer run.
pub(crate) fn shape(chars: &[CharInfo]) -> Vec<ShapeUnit> {
    let seq = decompose_split_vowels(chars);
    let classes: Vec<u8> = seq.iter().map(|&(ch, _)| class(ch)).collect();

    let mut units = Vec::with_capacity(seq.len());
    let mut start = 0;
    while start < seq.len() {
        let len = next_syllable(STATES, &classes[start..]);
        let syllable = &seq[start..start + len];
        if classes[start] == CONSONANT {
            emit_syllable(&mut units, syllable);
        } else {
            for &(ch, unit) in syllable {
                push_with_dotted_circle(&mut units, ch, unit);
            }
        }
        start += len;
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DOTTED_CIRCLE;

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
    fn prebase_vowel_moves_to_front() {
        // KA + E: the vowel renders before the consonant
        let units = shape(&info(&['\u{1780}', '\u{17C1}']));
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].ch, '\u{17C1}');
        assert_eq!(units[1].ch, '\u{1780}');
        assert_eq!(units[0].cluster, 0);
        assert!(units[1].attr.is_cluster_start());
    }

    #[test]
    fn coeng_ro_moves_before_base() {
        // TA + coeng + RO
        let units = shape(&info(&['\u{178F}', '\u{17D2}', '\u{179A}']));
        assert_eq!(units[0].ch, '\u{17D2}');
        assert_eq!(units[1].ch, '\u{179A}');
        assert_eq!(units[2].ch, '\u{178F}');
        assert!(units[0].features.contains(FeatureMask::PREF));
    }

    #[test]
    fn split_vowel_decomposes() {
        // KA + OE (17BE) -> 17C1 (front) + KA + 17BE remainder
        let units = shape(&info(&['\u{1780}', '\u{17BE}']));
        assert_eq!(units[0].ch, '\u{17C1}');
        assert_eq!(units[1].ch, '\u{1780}');
        assert_eq!(units[2].ch, '\u{17BE}');
        // All three account to the consonant's cluster
        assert!(units.iter().all(|u| u.cluster == 0));
    }

    #[test]
    fn coeng_stack_stays_in_place() {
        // KA + coeng + KA: non-Ro stacks keep logical order
        let units = shape(&info(&['\u{1780}', '\u{17D2}', '\u{1780}']));
        assert_eq!(units[0].ch, '\u{1780}');
        assert_eq!(units[1].ch, '\u{17D2}');
        assert_eq!(units[2].ch, '\u{1780}');
        assert!(units[1].features.contains(FeatureMask::BLWF));
    }

    #[test]
    fn lone_vowel_gets_dotted_circle() {
        let units = shape(&info(&['\u{17B7}']));
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].ch, DOTTED_CIRCLE);
        assert!(units[1].attr.is_mark());
    }

    #[test]
    fn shifter_is_a_mark_on_the_base() {
        let units = shape(&info(&['\u{1780}', '\u{17C9}', '\u{17B7}']));
        assert_eq!(units.len(), 3);
        assert!(units[1].attr.is_mark());
        assert_eq!(units[1].cluster, 0);
    }

    #[test]
    fn shifter_drops_below_before_an_above_vowel() {
        // KA + muusikatoan + vowel I: the shifter takes its below form
        let units = shape(&info(&['\u{1780}', '\u{17C9}', '\u{17B7}']));
        assert_eq!(units[1].ch, '\u{17C9}');
        assert_eq!(units[1].attr.combining_class, 220);
        assert!(units[1].features.contains(FeatureMask::BLWF));
    }

    #[test]
    fn shifter_keeps_its_place_without_an_above_vowel() {
        // KA + triisap + vowel U (below): no conversion
        let units = shape(&info(&['\u{1780}', '\u{17CA}', '\u{17BB}']));
        assert_eq!(units[1].ch, '\u{17CA}');
        assert_ne!(units[1].attr.combining_class, 220);
        assert!(!units[1].features.contains(FeatureMask::BLWF));
    }
}
