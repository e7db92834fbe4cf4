//! Hebrew point composition.
//!
//! Folds letter-plus-point pairs into the Alphabetic Presentation Forms
//! block (U+FB1D..U+FB4E) when the font has the precomposed glyph: dagesh
//! and mapiq forms, shin and sin dots, vav with holam, alef with patah or
//! qamats, and the rafe forms of bet, kaf and pe. The shin dots are only
//! meaningful on shin (plain or composed with dagesh); elsewhere they get a
//! dotted-circle base so the invalid sequence stays visible.

use crate::buffer::{CharInfo, ShapeUnit};
use crate::font::FontBackend;
use crate::unicode;
use crate::DOTTED_CIRCLE;

const SHIN: char = '\u{05E9}';
const SHIN_DAGESH: char = '\u{FB49}';

fn is_shin_dot(mark: char) -> bool {
    matches!(mark, '\u{05C1}' | '\u{05C2}')
}

/// Letters with no composed dagesh form leave a hole in U+FB30..U+FB4A.
fn dagesh_form(letter: u32) -> Option<u32> {
    match letter {
        // het, final mem, final nun, ayin, final tsadi
        0x05D7 | 0x05DD | 0x05DF | 0x05E2 | 0x05E5 => None,
        0x05D0..=0x05EA => Some(0xFB30 + (letter - 0x05D0)),
        _ => None,
    }
}

fn compose(base: char, mark: char) -> Option<char> {
    let b = base as u32;
    let composed = match mark {
        '\u{05BC}' => dagesh_form(b)?, // dagesh / mapiq
        '\u{05B9}' if base == '\u{05D5}' => 0xFB4B, // vav + holam
        '\u{05BF}' => match b {
            0x05D1 => 0xFB4C, // bet + rafe
            0x05DB => 0xFB4D, // kaf + rafe
            0x05E4 => 0xFB4E, // pe + rafe
            _ => return None,
        },
        '\u{05C1}' => match base {
            SHIN => 0xFB2A,
            SHIN_DAGESH => 0xFB2C,
            _ => return None,
        },
        '\u{05C2}' => match base {
            SHIN => 0xFB2B,
            SHIN_DAGESH => 0xFB2D,
            _ => return None,
        },
        '\u{05B7}' if base == '\u{05D0}' => 0xFB2E, // alef + patah
        '\u{05B8}' if base == '\u{05D0}' => 0xFB2F, // alef + qamats
        '\u{05B4}' if base == '\u{05D9}' => 0xFB1D, // yod + hiriq
        _ => return None,
    };
    char::from_u32(composed)
}

fn is_shin_base(ch: char) -> bool {
    ch == SHIN || ch == SHIN_DAGESH
}

/// Shape one Hebrew run.
pub(crate) fn shape<F: FontBackend>(chars: &[CharInfo], font: &F) -> Vec<ShapeUnit> {
    let mut units = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let info = chars[i];
        if unicode::is_mark(info.ch) {
            // Mark with no base: stand it on a dotted circle
            units.push(ShapeUnit::new(DOTTED_CIRCLE, info.unit));
            units.push(ShapeUnit::mark(
                info.ch,
                info.unit,
                unicode::combining_class(info.ch),
            ));
            i += 1;
            continue;
        }

        let cluster = info.unit;
        let mut current = info.ch;
        let mut pending: Vec<(char, usize)> = Vec::new();
        i += 1;
        while i < chars.len() && unicode::is_mark(chars[i].ch) {
            let mark = chars[i].ch;
            match compose(current, mark) {
                Some(folded) if font.can_render(&[folded]) => current = folded,
                _ if is_shin_dot(mark) && !is_shin_base(current) => {
                    // Shin dot on a non-shin base is malformed input; the
                    // dotted circle opens a cluster of its own so the dot
                    // maps back to its input unit, not the letter's
                    pending.push((DOTTED_CIRCLE, chars[i].unit));
                    pending.push((mark, chars[i].unit));
                }
                _ => pending.push((mark, cluster)),
            }
            i += 1;
        }

        units.push(ShapeUnit::new(current, cluster));
        for (ch, cl) in pending {
            if ch == DOTTED_CIRCLE {
                units.push(ShapeUnit::new(DOTTED_CIRCLE, cl));
            } else {
                units.push(ShapeUnit::mark(ch, cl, unicode::combining_class(ch)));
            }
        }
    }
    units
}
