//! Greek diacritic composition.
//!
//! Greek text often arrives decomposed while fonts only carry the
//! precomposed Greek Extended forms, so shaping folds base-plus-mark pairs
//! into precomposed characters wherever the font has a glyph for the
//! result. Composition chains: the output of one fold is the base for the
//! next mark, which is how psili + oxia or dialytika + perispomeni stacks
//! resolve. A mark that cannot be folded stays in the output as a
//! zero-width combining mark on the same cluster.

use crate::buffer::{CharInfo, ShapeUnit};
use crate::font::FontBackend;
use crate::scripts::syllable::push_with_dotted_circle;
use crate::unicode;

/// The marks composition understands. Everything else passes through as a
/// plain combining mark.
fn is_greek_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{0300}' // varia
            | '\u{0301}' // oxia / tonos
            | '\u{0304}' // macron
            | '\u{0306}' // vrachy
            | '\u{0308}' // dialytika
            | '\u{0313}' // psili
            | '\u{0314}' // dasia
            | '\u{0342}' // perispomeni
            | '\u{0345}' // ypogegrammeni
    )
}

/// Greek Extended rows 1F00-1F6F put the bare psili/dasia form in columns
/// 0/1 (8/9 upper case) and the varia, oxia and perispomeni stacks at
/// offsets +2, +4 and +6 from it.
fn chain(base: u32, offset: u32) -> Option<u32> {
    if !(0x1F00..=0x1F6F).contains(&base) || base & 0x7 >= 2 {
        return None;
    }
    // The epsilon and omicron rows have no perispomeni column
    if offset == 6 && matches!(base & 0xF0, 0x10 | 0x40) {
        return None;
    }
    Some(base + offset)
}

#[rustfmt::skip]
fn compose(base: char, mark: char) -> Option<char> {
    let b = base as u32;
    let composed = match mark {
        '\u{0300}' => match b {
            0x03B1 => 0x1F70, 0x03B5 => 0x1F72, 0x03B7 => 0x1F74, 0x03B9 => 0x1F76,
            0x03BF => 0x1F78, 0x03C5 => 0x1F7A, 0x03C9 => 0x1F7C,
            0x0391 => 0x1FBA, 0x0395 => 0x1FC8, 0x0397 => 0x1FCA, 0x0399 => 0x1FDA,
            0x039F => 0x1FF8, 0x03A5 => 0x1FEA, 0x03A9 => 0x1FFA,
            0x03CA => 0x1FD2, 0x03CB => 0x1FE2,
            _ => chain(b, 2)?,
        },
        '\u{0301}' => match b {
            0x03B1 => 0x03AC, 0x03B5 => 0x03AD, 0x03B7 => 0x03AE, 0x03B9 => 0x03AF,
            0x03BF => 0x03CC, 0x03C5 => 0x03CD, 0x03C9 => 0x03CE,
            0x0391 => 0x0386, 0x0395 => 0x0388, 0x0397 => 0x0389, 0x0399 => 0x038A,
            0x039F => 0x038C, 0x03A5 => 0x038E, 0x03A9 => 0x038F,
            0x03CA => 0x0390, 0x03CB => 0x03B0,
            _ => chain(b, 4)?,
        },
        '\u{0304}' => match b {
            0x03B1 => 0x1FB1, 0x0391 => 0x1FB9, 0x03B9 => 0x1FD1, 0x0399 => 0x1FD9,
            0x03C5 => 0x1FE1, 0x03A5 => 0x1FE9,
            _ => return None,
        },
        '\u{0306}' => match b {
            0x03B1 => 0x1FB0, 0x0391 => 0x1FB8, 0x03B9 => 0x1FD0, 0x0399 => 0x1FD8,
            0x03C5 => 0x1FE0, 0x03A5 => 0x1FE8,
            _ => return None,
        },
        '\u{0308}' => match b {
            0x03B9 => 0x03CA, 0x03C5 => 0x03CB, 0x0399 => 0x03AA, 0x03A5 => 0x03AB,
            _ => return None,
        },
        '\u{0313}' => match b {
            0x03B1 => 0x1F00, 0x03B5 => 0x1F10, 0x03B7 => 0x1F20, 0x03B9 => 0x1F30,
            0x03BF => 0x1F40, 0x03C5 => 0x1F50, 0x03C9 => 0x1F60,
            0x0391 => 0x1F08, 0x0395 => 0x1F18, 0x0397 => 0x1F28, 0x0399 => 0x1F38,
            0x039F => 0x1F48, 0x03A9 => 0x1F68,
            0x03C1 => 0x1FE4,
            _ => return None,
        },
        '\u{0314}' => match b {
            0x03B1 => 0x1F01, 0x03B5 => 0x1F11, 0x03B7 => 0x1F21, 0x03B9 => 0x1F31,
            0x03BF => 0x1F41, 0x03C5 => 0x1F51, 0x03C9 => 0x1F61,
            0x0391 => 0x1F09, 0x0395 => 0x1F19, 0x0397 => 0x1F29, 0x0399 => 0x1F39,
            0x039F => 0x1F49, 0x03A5 => 0x1F59, 0x03A9 => 0x1F69,
            0x03C1 => 0x1FE5, 0x03A1 => 0x1FEC,
            _ => return None,
        },
        '\u{0342}' => match b {
            0x03B1 => 0x1FB6, 0x03B7 => 0x1FC6, 0x03B9 => 0x1FD6, 0x03C5 => 0x1FE6,
            0x03C9 => 0x1FF6, 0x03CA => 0x1FD7, 0x03CB => 0x1FE7,
            _ => chain(b, 6)?,
        },
        '\u{0345}' => match b {
            0x03B1 => 0x1FB3, 0x03B7 => 0x1FC3, 0x03C9 => 0x1FF3,
            0x0391 => 0x1FBC, 0x0397 => 0x1FCC, 0x03A9 => 0x1FFC,
            0x1F70 => 0x1FB2, 0x03AC => 0x1FB4, 0x1F71 => 0x1FB4, 0x1FB6 => 0x1FB7,
            0x1F74 => 0x1FC2, 0x03AE => 0x1FC4, 0x1F75 => 0x1FC4, 0x1FC6 => 0x1FC7,
            0x1F7C => 0x1FF2, 0x03CE => 0x1FF4, 0x1F7D => 0x1FF4, 0x1FF6 => 0x1FF7,
            0x1F00..=0x1F0F => b + 0x80,
            0x1F20..=0x1F2F => b + 0x70,
            0x1F60..=0x1F6F => b + 0x40,
            _ => return None,
        },
        _ => return None,
    };
    char::from_u32(composed)
}

/// Shape one Greek run, folding decomposed diacritics into precomposed
/// characters the font can draw.
pub(crate) fn shape<F: FontBackend>(chars: &[CharInfo], font: &F) -> Vec<ShapeUnit> {
    let mut units = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let info = chars[i];
        if unicode::is_mark(info.ch) {
            // Mark with no base in this run
            push_with_dotted_circle(&mut units, info.ch, info.unit);
            i += 1;
            continue;
        }

        let cluster = info.unit;
        let mut current = info.ch;
        let mut pending: Vec<char> = Vec::new();
        i += 1;
        while i < chars.len() && unicode::is_mark(chars[i].ch) {
            let mark = chars[i].ch;
            match compose(current, mark) {
                Some(folded) if is_greek_mark(mark) && font.can_render(&[folded]) => {
                    current = folded;
                }
                _ => pending.push(mark),
            }
            i += 1;
        }

        units.push(ShapeUnit::new(current, cluster));
        for mark in pending {
            units.push(ShapeUnit::mark(mark, cluster, unicode::combining_class(mark)));
        }
    }
    units
}
