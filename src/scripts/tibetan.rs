//! Tibetan syllable grouping.
//!
//! A Tibetan stack is a head consonant followed by any number of subjoined
//! consonants and then vowel and modifier signs. Shaping groups each stack
//! into one cluster; a subjoined letter or sign that arrives without a head
//! consonant is stood on a dotted circle.

use crate::buffer::{CharInfo, ShapeUnit};
use crate::scripts::syllable::{next_syllable, push_with_dotted_circle};
use crate::unicode;

const OTHER: u8 = 0;
const HEAD: u8 = 1;
const SUBJOINED: u8 = 2;
const VOWEL: u8 = 3;

fn class(ch: char) -> u8 {
    match ch as u32 {
        0x0F40..=0x0F6C => HEAD,
        0x0F90..=0x0FBC => SUBJOINED,
        0x0F71..=0x0F84 => VOWEL,
        _ => OTHER,
    }
}

#[rustfmt::skip]
const STATES: &[&[i16]] = &[
    //  Other  Head  Subjoined  Vowel
    &[  -1,    1,    -1,        -1], // start
    &[  -1,   -1,     1,         2], // head consonant seen
    &[  -1,   -1,    -1,         2], // vowel signs
];

/// Mark stack starts for cursor movement, one `true` per stack.
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

/// Shape one Tibetan run.
pub(crate) fn shape(chars: &[CharInfo]) -> Vec<ShapeUnit> {
    let mut units = Vec::with_capacity(chars.len());
    let classes: Vec<u8> = chars.iter().map(|c| class(c.ch)).collect();

    let mut start = 0;
    while start < chars.len() {
        let len = next_syllable(STATES, &classes[start..]);
        let syllable = &chars[start..start + len];

        if classes[start] == HEAD {
            let cluster = syllable[0].unit;
            units.push(ShapeUnit::new(syllable[0].ch, cluster));
            for part in &syllable[1..] {
                units.push(ShapeUnit::mark(
                    part.ch,
                    cluster,
                    unicode::combining_class(part.ch),
                ));
            }
        } else {
            // Not a stack: plain character, or an orphaned sign
            for part in syllable {
                push_with_dotted_circle(&mut units, part.ch, part.unit);
            }
        }
        start += len;
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn stack_is_one_cluster() {
        // KA + subjoined YA + vowel U
        let units = shape(&info(&['\u{0F40}', '\u{0FB1}', '\u{0F74}']));
        assert_eq!(units.len(), 3);
        assert!(units[0].attr.is_cluster_start());
        assert_eq!(units[1].cluster, 0);
        assert_eq!(units[2].cluster, 0);
        assert!(units[1].attr.is_mark());
    }

    #[test]
    fn orphaned_vowel_gets_dotted_circle() {
        let units = shape(&info(&['\u{0F74}']));
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].ch, crate::DOTTED_CIRCLE);
    }

    #[test]
    fn two_stacks_two_clusters() {
        let units = shape(&info(&['\u{0F40}', '\u{0F74}', '\u{0F41}']));
        assert_eq!(units[0].cluster, 0);
        assert_eq!(units[2].cluster, 2);
        assert!(units[2].attr.is_cluster_start());
    }
}
