//! Myanmar syllable shaping.
//!
//! Three rewrites drive the visual order inside a syllable:
//!
//! * a kinzi prefix (Nga, asat, virama in front of the base) moves after
//!   the base it decorates,
//! * the pre-base vowel U+1031 moves to the very front, and
//! * medial Ra U+103C moves in front of the base, inside the vowel.
//!
//! The syllable cutter needs the machine's back-up facility here: a virama
//! that is not followed by a consonant is not a stack, so the machine backs
//! up one character and lets the virama open the next (invalid) syllable.

use crate::buffer::{CharInfo, GlyphFlags, ShapeUnit};
use crate::layout::FeatureMask;
use crate::scripts::syllable::{next_syllable, push_with_dotted_circle};
use crate::unicode;

const OTHER: u8 = 0;
const CONSONANT: u8 = 1;
const ASAT: u8 = 2;
const VIRAMA: u8 = 3;
const MEDIAL: u8 = 4;
const MATRA: u8 = 5;
const SIGN: u8 = 6;

const NGA: char = '\u{1004}';
const ASAT_SIGN: char = '\u{103A}';
const VIRAMA_SIGN: char = '\u{1039}';
const VOWEL_E: char = '\u{1031}';
const MEDIAL_RA: char = '\u{103C}';

fn class(ch: char) -> u8 {
    match ch as u32 {
        0x1000..=0x1020 => CONSONANT,
        0x1021..=0x102A => CONSONANT, // independent vowels
        0x103F => CONSONANT,          // great Sa
        0x102B..=0x1035 => MATRA,
        0x1036..=0x1038 => SIGN,
        0x1039 => VIRAMA,
        0x103A => ASAT,
        0x103B..=0x103E => MEDIAL,
        _ => OTHER,
    }
}

#[rustfmt::skip]
const STATES: &[&[i16]] = &[
    //  Other  Cons  Asat  Virama  Medial  Matra  Sign
    &[  -1,    1,    -1,   -1,     -1,     -1,    -1], // start
    &[  -1,   -1,     3,    2,      4,      5,     6], // base
    &[  -2,    1,    -1,   -2,     -2,     -2,    -2], // virama: consonant stacks, else back up
    &[  -1,   -1,    -1,    2,      4,      5,     6], // asat
    &[  -1,   -1,    -1,   -1,      4,      5,     6], // medials
    &[  -1,   -1,     6,   -1,     -1,      5,     6], // vowels
    &[  -1,   -1,    -1,   -1,     -1,     -1,     6], // signs
];

fn is_spacing(ch: char) -> bool {
    matches!(
        ch,
        '\u{102B}' | '\u{102C}' | '\u{1031}' | '\u{103B}' | '\u{1038}'
    ) || class(ch) == CONSONANT
}

fn continuation(ch: char, cluster: usize) -> ShapeUnit {
    let mut unit = ShapeUnit::new(ch, cluster);
    unit.attr.flags = GlyphFlags::empty();
    unit
}

fn push_part(units: &mut Vec<ShapeUnit>, ch: char, cluster: usize, features: FeatureMask) {
    let mut unit = if is_spacing(ch) {
        continuation(ch, cluster)
    } else {
        ShapeUnit::mark(ch, cluster, unicode::combining_class(ch))
    };
    if ch == VIRAMA_SIGN {
        unit.attr.flags |= GlyphFlags::DONT_PRINT | GlyphFlags::ZERO_WIDTH;
    }
    unit.features = features;
    units.push(unit);
}

fn has_kinzi(syllable: &[(char, usize)]) -> bool {
    syllable.len() > 3
        && syllable[0].0 == NGA
        && syllable[1].0 == ASAT_SIGN
        && syllable[2].0 == VIRAMA_SIGN
        && class(syllable[3].0) == CONSONANT
}

fn emit_syllable(units: &mut Vec<ShapeUnit>, syllable: &[(char, usize)]) {
    let cluster = syllable[0].1;
    let (kinzi, rest) = if has_kinzi(syllable) {
        (Some(&syllable[..3]), &syllable[3..])
    } else {
        (None, syllable)
    };

    // Vowel E first, then medial Ra, then the base
    for &(ch, _) in rest.iter().filter(|&&(ch, _)| ch == VOWEL_E) {
        push_part(units, ch, cluster, FeatureMask::PRES);
    }
    for &(ch, _) in rest.iter().filter(|&&(ch, _)| ch == MEDIAL_RA) {
        push_part(units, ch, cluster, FeatureMask::PREF);
    }
    units.push(ShapeUnit::new(rest[0].0, cluster));

    // Kinzi decorates the base from above
    if let Some(kinzi) = kinzi {
        for &(ch, _) in kinzi {
            let mut unit = ShapeUnit::mark(ch, cluster, unicode::combining_class(ch));
            if ch == VIRAMA_SIGN {
                unit.attr.flags |= GlyphFlags::DONT_PRINT;
            }
            unit.features = FeatureMask::ABVF;
            units.push(unit);
        }
    }

    for &(ch, _) in &rest[1..] {
        if ch == VOWEL_E || ch == MEDIAL_RA {
            continue;
        }
        let features = match class(ch) {
            VIRAMA | CONSONANT => FeatureMask::BLWF,
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

/// Shape one Myanmar run.
pub(crate) fn shape(chars: &[CharInfo]) -> Vec<ShapeUnit> {
    let seq: Vec<(char, usize)> = chars.iter().map(|c| (c.ch, c.unit)).collect();
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
