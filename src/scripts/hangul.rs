//! Hangul jamo composition.
//!
//! Modern Hangul syllables compose arithmetically: a leading consonant, a
//! vowel and an optional trailing consonant map onto the precomposed
//! syllables block. Each syllable (composed or not) is one cluster; when
//! the font lacks the precomposed glyph the conjoining jamo stay in the
//! output as separate units of the same cluster. The U+302E/U+302F tone
//! marks attach to the preceding syllable.

use crate::buffer::{CharInfo, GlyphFlags, ShapeUnit};
use crate::font::FontBackend;
use crate::unicode;

const S_BASE: u32 = 0xAC00;
const L_BASE: u32 = 0x1100;
const V_BASE: u32 = 0x1161;
const T_BASE: u32 = 0x11A7;
const L_COUNT: u32 = 19;
const V_COUNT: u32 = 21;
const T_COUNT: u32 = 28;

fn is_l(ch: char) -> bool {
    (L_BASE..L_BASE + L_COUNT).contains(&(ch as u32))
}

fn is_v(ch: char) -> bool {
    (V_BASE..V_BASE + V_COUNT).contains(&(ch as u32))
}

fn is_t(ch: char) -> bool {
    // T_BASE itself is the "no trailing consonant" slot, not a character
    (T_BASE + 1..T_BASE + T_COUNT).contains(&(ch as u32))
}

fn compose(l: char, v: char, t: Option<char>) -> Option<char> {
    let l_index = l as u32 - L_BASE;
    let v_index = v as u32 - V_BASE;
    let t_index = t.map(|t| t as u32 - T_BASE).unwrap_or(0);
    char::from_u32(S_BASE + (l_index * V_COUNT + v_index) * T_COUNT + t_index)
}

/// Unit that continues the cluster opened by a previous unit.
fn continuation(ch: char, cluster: usize) -> ShapeUnit {
    let mut unit = ShapeUnit::new(ch, cluster);
    unit.attr.flags = GlyphFlags::empty();
    unit
}

/// Shape one Hangul run.
pub(crate) fn shape<F: FontBackend>(chars: &[CharInfo], font: &F) -> Vec<ShapeUnit> {
    let mut units = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let info = chars[i];

        if unicode::is_mark(info.ch) {
            let cluster = units
                .last()
                .map(|u: &ShapeUnit| u.cluster)
                .unwrap_or(info.unit);
            units.push(ShapeUnit::mark(
                info.ch,
                cluster,
                unicode::combining_class(info.ch),
            ));
            i += 1;
            continue;
        }

        if is_l(info.ch) && i + 1 < chars.len() && is_v(chars[i + 1].ch) {
            let l = info.ch;
            let v = chars[i + 1].ch;
            let t = chars.get(i + 2).map(|c| c.ch).filter(|&c| is_t(c));
            let consumed = if t.is_some() { 3 } else { 2 };
            match compose(l, v, t).filter(|&s| font.can_render(&[s])) {
                Some(syllable) => units.push(ShapeUnit::new(syllable, info.unit)),
                None => {
                    units.push(ShapeUnit::new(l, info.unit));
                    units.push(continuation(v, info.unit));
                    if let Some(t) = t {
                        units.push(continuation(t, info.unit));
                    }
                }
            }
            i += consumed;
            continue;
        }

        units.push(ShapeUnit::new(info.ch, info.unit));
        i += 1;
    }
    units
}
