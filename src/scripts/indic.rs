//! Shaping for the nine ISCII-derived scripts plus Sinhala.
//!
//! The scripts share one engine parameterised per script: where the reph
//! lands, which matras render on which side of the base, and whether
//! below-base forms come from pre-base or only post-base consonants. The
//! engine cuts syllables with the shared state machine, tags every element
//! with a target position, and stable-sorts the syllable by position, which
//! realises the pre-base matra and reph moves in one step.
//!
//! Classification is block-uniform: the ISCII layout repeats every 0x80
//! code points, so one offset table covers the nine scripts, with per-script
//! exceptions (khanda ta, Malayalam dot reph and chillus, Assamese ra) on
//! top. Sinhala does not follow the ISCII layout and classifies separately.

use crate::buffer::{CharInfo, GlyphFlags, ShapeUnit};
use crate::layout::FeatureMask;
use crate::scripts::syllable::{next_syllable, push_with_dotted_circle, Scratch};
use crate::unicode;
use unicode_general_category::{get_general_category, GeneralCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicScript {
    Devanagari,
    Bengali,
    Gurmukhi,
    Gujarati,
    Oriya,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Sinhala,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RephMode {
    /// Ra + halant in front of another consonant forms the reph.
    Implicit,
    /// The reph must be requested with Ra + halant + ZWJ.
    Explicit,
    /// The script has a dedicated repha character.
    LogicalRepha,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlwfMode {
    PostOnly,
    PreAndPost,
}

/// Target slot of a syllable element. Reordering is a stable sort on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
enum Pos {
    Reph,
    PrebaseMatra,
    PrebaseConsonant,
    #[default]
    Base,
    AfterMain,
    BeforeSubjoined,
    BelowbaseConsonant,
    AfterSubjoined,
    BeforePost,
    AfterPost,
    Smvd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MatraPos {
    Left,
    Above,
    Below,
    Right,
}

impl IndicScript {
    fn block_base(self) -> u32 {
        match self {
            IndicScript::Devanagari => 0x0900,
            IndicScript::Bengali => 0x0980,
            IndicScript::Gurmukhi => 0x0A00,
            IndicScript::Gujarati => 0x0A80,
            IndicScript::Oriya => 0x0B00,
            IndicScript::Tamil => 0x0B80,
            IndicScript::Telugu => 0x0C00,
            IndicScript::Kannada => 0x0C80,
            IndicScript::Malayalam => 0x0D00,
            IndicScript::Sinhala => 0x0D80,
        }
    }

    fn ra(self) -> char {
        match self {
            IndicScript::Devanagari => '\u{0930}',
            IndicScript::Bengali => '\u{09B0}',
            IndicScript::Gurmukhi => '\u{0A30}',
            IndicScript::Gujarati => '\u{0AB0}',
            IndicScript::Oriya => '\u{0B30}',
            IndicScript::Tamil => '\u{0BB0}',
            IndicScript::Telugu => '\u{0C30}',
            IndicScript::Kannada => '\u{0CB0}',
            IndicScript::Malayalam => '\u{0D30}',
            IndicScript::Sinhala => '\u{0DBB}',
        }
    }

    fn halant(self) -> char {
        match self {
            IndicScript::Sinhala => '\u{0DCA}',
            _ => char::from_u32(self.block_base() + 0x4D)
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        }
    }

    fn reph_mode(self) -> RephMode {
        match self {
            IndicScript::Telugu | IndicScript::Sinhala => RephMode::Explicit,
            IndicScript::Malayalam => RephMode::LogicalRepha,
            _ => RephMode::Implicit,
        }
    }

    fn reph_position(self) -> Pos {
        match self {
            IndicScript::Devanagari | IndicScript::Gujarati => Pos::BeforePost,
            IndicScript::Bengali => Pos::AfterSubjoined,
            IndicScript::Gurmukhi => Pos::BeforeSubjoined,
            IndicScript::Oriya | IndicScript::Malayalam | IndicScript::Sinhala => Pos::AfterMain,
            IndicScript::Tamil | IndicScript::Telugu | IndicScript::Kannada => Pos::AfterPost,
        }
    }

    fn blwf_mode(self) -> BlwfMode {
        match self {
            IndicScript::Telugu | IndicScript::Kannada => BlwfMode::PostOnly,
            _ => BlwfMode::PreAndPost,
        }
    }

    fn belowbase_matra_pos(self) -> Pos {
        match self {
            IndicScript::Gurmukhi
            | IndicScript::Gujarati
            | IndicScript::Tamil
            | IndicScript::Malayalam => Pos::AfterPost,
            IndicScript::Telugu | IndicScript::Kannada => Pos::BeforeSubjoined,
            _ => Pos::AfterSubjoined,
        }
    }

    fn abovebase_matra_pos(self) -> Pos {
        match self {
            IndicScript::Gurmukhi => Pos::AfterPost,
            IndicScript::Oriya => Pos::AfterMain,
            IndicScript::Telugu | IndicScript::Kannada => Pos::BeforeSubjoined,
            _ => Pos::AfterSubjoined,
        }
    }

    fn rightside_matra_pos(self) -> Pos {
        match self {
            IndicScript::Devanagari | IndicScript::Sinhala => Pos::AfterSubjoined,
            _ => Pos::AfterPost,
        }
    }
}

// Machine classes
const OTHER: u8 = 0;
const CONSONANT: u8 = 1;
const VOWEL: u8 = 2;
const NUKTA: u8 = 3;
const HALANT: u8 = 4;
const MATRA: u8 = 5;
const SM: u8 = 6;
const JOINER: u8 = 7;

fn class(script: IndicScript, ch: char) -> u8 {
    if ch == '\u{200C}' || ch == '\u{200D}' {
        return JOINER;
    }
    if script == IndicScript::Sinhala {
        return match ch as u32 {
            0x0D82..=0x0D83 => SM,
            0x0D85..=0x0D96 => VOWEL,
            0x0D9A..=0x0DC6 => CONSONANT,
            0x0DCA => HALANT,
            0x0DCF..=0x0DDF | 0x0DF2..=0x0DF3 => MATRA,
            _ => OTHER,
        };
    }

    // Per-script departures from the uniform block layout
    match (script, ch as u32) {
        (IndicScript::Bengali, 0x09CE) => return CONSONANT, // khanda ta
        (IndicScript::Bengali, 0x09F0 | 0x09F1) => return CONSONANT,
        (IndicScript::Malayalam, 0x0D4E) => return CONSONANT, // dot reph
        (IndicScript::Malayalam, 0x0D7A..=0x0D7F) => return CONSONANT, // chillus
        (IndicScript::Gurmukhi, 0x0A71) => return SM,       // addak
        (IndicScript::Tamil, 0x0BD7) => return MATRA,       // au length mark
        _ => {}
    }

    let base = script.block_base();
    if !(base..base + 0x80).contains(&(ch as u32)) {
        return OTHER;
    }
    match ch as u32 - base {
        0x01..=0x03 => SM,
        0x04..=0x14 => VOWEL,
        0x15..=0x39 => CONSONANT,
        0x3C => NUKTA,
        0x3E..=0x4C => MATRA,
        0x4D => HALANT,
        0x55..=0x57 => MATRA, // length marks
        0x58..=0x5F => CONSONANT,
        0x60..=0x61 => VOWEL,
        0x62..=0x63 => MATRA,
        _ => OTHER,
    }
}

#[rustfmt::skip]
const STATES: &[&[i16]] = &[
    //  Other  Cons  Vowel  Nukta  Halant  Matra  SM  Joiner
    &[  -1,    1,    6,     -1,    -1,     -1,    -1,  -1], // start
    &[  -1,   -1,   -1,      1,     2,      4,     5,  -1], // consonant
    &[  -1,    1,   -1,     -1,    -1,     -1,    -1,   3], // halant
    &[  -1,    1,   -1,     -1,    -1,     -1,    -1,  -1], // joiner after halant
    &[  -1,   -1,   -1,     -1,    -1,      4,     5,  -1], // matras
    &[  -1,   -1,   -1,     -1,    -1,     -1,     5,  -1], // modifiers
    &[  -1,   -1,   -1,      6,     2,      4,     5,  -1], // independent vowel
];

/// Split matras decompose so the left part can reorder on its own.
fn decompose_matra(script: IndicScript, ch: char) -> Option<&'static [char]> {
    let parts: &[char] = match (script, ch) {
        (IndicScript::Bengali, '\u{09CB}') => &['\u{09C7}', '\u{09BE}'],
        (IndicScript::Bengali, '\u{09CC}') => &['\u{09C7}', '\u{09D7}'],
        (IndicScript::Oriya, '\u{0B48}') => &['\u{0B47}', '\u{0B56}'],
        (IndicScript::Oriya, '\u{0B4B}') => &['\u{0B47}', '\u{0B3E}'],
        (IndicScript::Oriya, '\u{0B4C}') => &['\u{0B47}', '\u{0B57}'],
        (IndicScript::Tamil, '\u{0BCA}') => &['\u{0BC6}', '\u{0BBE}'],
        (IndicScript::Tamil, '\u{0BCB}') => &['\u{0BC7}', '\u{0BBE}'],
        (IndicScript::Tamil, '\u{0BCC}') => &['\u{0BC6}', '\u{0BD7}'],
        (IndicScript::Telugu, '\u{0C48}') => &['\u{0C46}', '\u{0C56}'],
        (IndicScript::Kannada, '\u{0CC0}') => &['\u{0CBF}', '\u{0CD5}'],
        (IndicScript::Kannada, '\u{0CC7}') => &['\u{0CC6}', '\u{0CD5}'],
        (IndicScript::Kannada, '\u{0CC8}') => &['\u{0CC6}', '\u{0CD6}'],
        (IndicScript::Kannada, '\u{0CCA}') => &['\u{0CC6}', '\u{0CC2}'],
        (IndicScript::Kannada, '\u{0CCB}') => &['\u{0CC6}', '\u{0CC2}', '\u{0CD5}'],
        (IndicScript::Malayalam, '\u{0D4A}') => &['\u{0D46}', '\u{0D3E}'],
        (IndicScript::Malayalam, '\u{0D4B}') => &['\u{0D47}', '\u{0D3E}'],
        (IndicScript::Malayalam, '\u{0D4C}') => &['\u{0D46}', '\u{0D57}'],
        (IndicScript::Sinhala, '\u{0DDA}') => &['\u{0DD9}', '\u{0DCA}'],
        (IndicScript::Sinhala, '\u{0DDC}') => &['\u{0DD9}', '\u{0DCF}'],
        (IndicScript::Sinhala, '\u{0DDD}') => &['\u{0DD9}', '\u{0DCF}', '\u{0DCA}'],
        (IndicScript::Sinhala, '\u{0DDE}') => &['\u{0DD9}', '\u{0DDF}'],
        _ => return None,
    };
    Some(parts)
}

#[rustfmt::skip]
fn matra_placement(script: IndicScript, ch: char) -> MatraPos {
    use IndicScript::*;
    use MatraPos::*;
    match (script, ch as u32) {
        (Devanagari, 0x093F) => Left,
        (Devanagari, 0x0941..=0x0944 | 0x0962 | 0x0963) => Below,
        (Devanagari, 0x0945..=0x0948 | 0x0955) => Above,
        (Bengali, 0x09BF | 0x09C7 | 0x09C8) => Left,
        (Bengali, 0x09C1..=0x09C4 | 0x09E2 | 0x09E3) => Below,
        (Gurmukhi, 0x0A3F) => Left,
        (Gurmukhi, 0x0A41 | 0x0A42) => Below,
        (Gurmukhi, 0x0A47 | 0x0A48 | 0x0A4B | 0x0A4C) => Above,
        (Gujarati, 0x0ABF) => Left,
        (Gujarati, 0x0AC1..=0x0AC4) => Below,
        (Gujarati, 0x0AC5 | 0x0AC7 | 0x0AC8) => Above,
        (Oriya, 0x0B47) => Left,
        (Oriya, 0x0B41..=0x0B44 | 0x0B62 | 0x0B63) => Below,
        (Oriya, 0x0B3F | 0x0B56) => Above,
        (Tamil, 0x0BC6..=0x0BC8) => Left,
        (Tamil, 0x0BC0) => Above,
        (Telugu, 0x0C3E..=0x0C40 | 0x0C46..=0x0C48 | 0x0C55) => Above,
        (Telugu, 0x0C56 | 0x0C62 | 0x0C63) => Below,
        (Kannada, 0x0CBF | 0x0CC6) => Above,
        (Kannada, 0x0CE2 | 0x0CE3) => Below,
        (Malayalam, 0x0D46..=0x0D48) => Left,
        (Malayalam, 0x0D43 | 0x0D44 | 0x0D62 | 0x0D63) => Below,
        (Sinhala, 0x0DD9) => Left,
        (Sinhala, 0x0DD4 | 0x0DD6) => Below,
        (Sinhala, 0x0DD2 | 0x0DD3) => Above,
        _ => Right,
    }
}

#[derive(Clone, Copy, Default)]
struct Element {
    ch: char,
    unit: usize,
    pos: Pos,
    features: FeatureMask,
}

/// Decide the base consonant and tag every element of one valid syllable,
/// then stable-sort by target position. The scratch stays inline for any
/// realistic syllable and spills to the heap past that.
fn reorder_syllable(script: IndicScript, syllable: &[(char, usize)]) -> Scratch<Element> {
    let halant = script.halant();
    let ra = script.ra();
    let is_consonant = |ch: char| class(script, ch) == CONSONANT || class(script, ch) == VOWEL;

    // Reph candidate at the front of the syllable
    let reph_len = match script.reph_mode() {
        RephMode::Implicit => {
            let more_consonants = syllable
                .iter()
                .skip(2)
                .any(|&(ch, _)| is_consonant(ch));
            if syllable.len() > 2
                && syllable[0].0 == ra
                && syllable[1].0 == halant
                && more_consonants
            {
                2
            } else {
                0
            }
        }
        RephMode::Explicit => {
            if syllable.len() > 3
                && syllable[0].0 == ra
                && syllable[1].0 == halant
                && syllable[2].0 == '\u{200D}'
            {
                3
            } else {
                0
            }
        }
        RephMode::LogicalRepha => {
            if syllable[0].0 == '\u{0D4E}' {
                1
            } else {
                0
            }
        }
    };

    // Base consonant: the last consonant in the syllable
    let base = syllable
        .iter()
        .enumerate()
        .skip(reph_len)
        .rev()
        .find(|(_, &(ch, _))| is_consonant(ch))
        .map(|(i, _)| i)
        .unwrap_or(reph_len);

    let mut elements: Scratch<Element> = Scratch::with_capacity(syllable.len() + 1);
    let reph_pos = script.reph_position();
    for (i, &(ch, unit)) in syllable.iter().enumerate() {
        let (pos, features) = if i < reph_len {
            (reph_pos, FeatureMask::RPHF)
        } else if i == base {
            (Pos::Base, FeatureMask::empty())
        } else if i < base {
            // Pre-base consonants, their halants and nuktas
            let features = if script.blwf_mode() == BlwfMode::PreAndPost {
                FeatureMask::HALF
            } else {
                FeatureMask::BLWF
            };
            (Pos::PrebaseConsonant, features)
        } else {
            match class(script, ch) {
                CONSONANT => (Pos::BelowbaseConsonant, FeatureMask::BLWF),
                HALANT => {
                    if i == syllable.len() - 1 {
                        // Dead-consonant ending
                        (Pos::AfterMain, FeatureMask::HALN)
                    } else {
                        (Pos::BelowbaseConsonant, FeatureMask::BLWF)
                    }
                }
                NUKTA => (Pos::AfterMain, FeatureMask::NUKT),
                MATRA => match matra_placement(script, ch) {
                    MatraPos::Left => (Pos::PrebaseMatra, FeatureMask::PRES),
                    MatraPos::Above => (script.abovebase_matra_pos(), FeatureMask::ABVS),
                    MatraPos::Below => (script.belowbase_matra_pos(), FeatureMask::BLWS),
                    MatraPos::Right => (script.rightside_matra_pos(), FeatureMask::PSTS),
                },
                SM => (Pos::Smvd, FeatureMask::ABVS),
                _ => (Pos::Smvd, FeatureMask::empty()),
            }
        };
        elements.push(Element {
            ch,
            unit,
            pos,
            features,
        });
    }

    elements.sort_by_key(|e| e.pos);
    elements
}

fn is_nonspacing(ch: char) -> bool {
    get_general_category(ch) == GeneralCategory::NonspacingMark
}

fn emit_syllable(script: IndicScript, units: &mut Vec<ShapeUnit>, syllable: &[(char, usize)]) {
    let cluster = syllable[0].1;
    let elements = reorder_syllable(script, syllable);
    for element in elements {
        let mut unit = if element.pos == Pos::Base {
            ShapeUnit::new(element.ch, cluster)
        } else if is_nonspacing(element.ch) {
            ShapeUnit::mark(element.ch, cluster, unicode::combining_class(element.ch))
        } else {
            let mut u = ShapeUnit::new(element.ch, cluster);
            u.attr.flags = GlyphFlags::empty();
            u
        };
        if element.ch == '\u{200C}' || element.ch == '\u{200D}' {
            unit.attr.flags |= GlyphFlags::DONT_PRINT | GlyphFlags::ZERO_WIDTH;
        }
        unit.features = element.features
            | FeatureMask::AKHN
            | FeatureMask::CJCT
            | FeatureMask::PRES
            | FeatureMask::ABVS
            | FeatureMask::BLWS
            | FeatureMask::PSTS;
        units.push(unit);
    }
}

/// Mark syllable starts for cursor movement, one `true` per syllable.
pub(crate) fn char_stops(script: IndicScript, chars: &[char]) -> Vec<bool> {
    let classes: Vec<u8> = chars.iter().map(|&ch| class(script, ch)).collect();
    let mut stops = vec![false; chars.len()];
    let mut start = 0;
    while start < chars.len() {
        stops[start] = true;
        start += next_syllable(STATES, &classes[start..]);
    }
    stops
}

/// Shape one run of an Indic script.
pub(crate) fn shape(script: IndicScript, chars: &[CharInfo]) -> Vec<ShapeUnit> {
    // Split matras first so their left parts reorder independently
    let mut seq: Vec<(char, usize)> = Vec::with_capacity(chars.len());
    for info in chars {
        match decompose_matra(script, info.ch) {
            Some(parts) => seq.extend(parts.iter().map(|&p| (p, info.unit))),
            None => seq.push((info.ch, info.unit)),
        }
    }
    let classes: Vec<u8> = seq.iter().map(|&(ch, _)| class(script, ch)).collect();

    let mut units = Vec::with_capacity(seq.len());
    let mut start = 0;
    while start < seq.len() {
        let len = next_syllable(STATES, &classes[start..]);
        let syllable = &seq[start..start + len];
        if classes[start] == CONSONANT || classes[start] == VOWEL {
            emit_syllable(script, &mut units, syllable);
        } else {
            for &(ch, unit) in syllable {
                push_with_dotted_circle(&mut units, ch, unit);
            }
        }
        start += len;
    }
    units
}
