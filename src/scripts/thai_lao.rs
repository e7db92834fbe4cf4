//! Thai and Lao shaping, following the specification at:
//! <https://github.com/n8willis/opentype-shaping-documents/blob/master/opentype-shaping-thai-lao.md>.
//!
//! Thai and Lao need no contextual forms; shaping is mark bookkeeping. The
//! AM vowels split into a nikhahit/niggahita plus the trailing AA vowel,
//! and the nikhahit half must move in front of any tone marks already
//! sitting on the base. Phinthu ordering against Sara U comes out of the
//! modified combining class sort.

use crate::buffer::{CharInfo, ShapeUnit};
use crate::unicode;
use crate::unicode::mcc::{modified_combining_class, ModifiedCombiningClass};

fn split_am_vowel(c: char) -> Option<(char, char)> {
    match c {
        // Thai
        '\u{0E33}' => Some(('\u{0E4D}', '\u{0E32}')),
        // Lao
        '\u{0EB3}' => Some(('\u{0ECD}', '\u{0EB2}')),
        _ => None,
    }
}

fn is_abovebase_mark(c: char) -> bool {
    match c {
        // Thai
        '\u{0E31}' => true,
        '\u{0E34}'..='\u{0E37}' => true,
        '\u{0E47}'..='\u{0E4E}' => true,
        // Lao
        '\u{0EB1}' => true,
        '\u{0EB4}'..='\u{0EB7}' => true,
        '\u{0EBB}' => true,
        '\u{0EC8}'..='\u{0ECD}' => true,
        _ => false,
    }
}

/// Split AM vowels and put the nikhahit part in front of the above-base
/// marks that precede it, then sort mark runs by modified combining class.
/// Code-unit attribution travels with each character.
pub(crate) fn reorder_marks(cs: &mut Vec<(char, usize)>) {
    for i in 0..cs.len() {
        if let Some((c1, c2)) = split_am_vowel(cs[i].0) {
            let unit = cs[i].1;
            cs[i] = (c1, unit);
            cs.insert(i + 1, (c2, unit));

            let mut j = i;
            while j > 0 && is_abovebase_mark(cs[j - 1].0) {
                j -= 1;
            }
            cs[j..=i].rotate_right(1);
        }
    }

    // Stable sort of each non-starter run, starters are barriers
    let mut start = 0;
    while start < cs.len() {
        let end = (start..cs.len())
            .find(|&k| {
                modified_combining_class(cs[k].0) == ModifiedCombiningClass::NotReordered
            })
            .unwrap_or(cs.len());
        cs[start..end].sort_by_key(|&(ch, _)| modified_combining_class(ch));
        start = end.max(start) + 1;
    }
}

/// Shape one Thai or Lao run.
pub(crate) fn shape(chars: &[CharInfo]) -> Vec<ShapeUnit> {
    let mut cs: Vec<(char, usize)> = chars.iter().map(|c| (c.ch, c.unit)).collect();
    reorder_marks(&mut cs);

    let mut units = Vec::with_capacity(cs.len());
    for (ch, unit) in cs {
        if unicode::is_mark(ch) {
            let cluster = units
                .last()
                .map(|u: &ShapeUnit| u.cluster)
                .unwrap_or(unit);
            units.push(ShapeUnit::mark(ch, cluster, unicode::combining_class(ch)));
        } else {
            units.push(ShapeUnit::new(ch, unit));
        }
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(cs: &[char]) -> Vec<(char, usize)> {
        cs.iter().enumerate().map(|(i, &ch)| (ch, i)).collect()
    }

    fn text(cs: &[(char, usize)]) -> Vec<char> {
        cs.iter().map(|&(ch, _)| ch).collect()
    }

    #[test]
    fn am_splits() {
        let mut cs = chars(&['\u{0E33}']);
        reorder_marks(&mut cs);
        assert_eq!(text(&cs), vec!['\u{0E4D}', '\u{0E32}']);
        // Both halves keep the AM vowel's code unit
        assert_eq!(cs[0].1, 0);
        assert_eq!(cs[1].1, 0);
    }

    #[test]
    fn nikhahit_moves_before_tone_mark() {
        let mut cs = chars(&['\u{0E49}', '\u{0E33}']);
        reorder_marks(&mut cs);
        assert_eq!(text(&cs), vec!['\u{0E4D}', '\u{0E49}', '\u{0E32}']);
    }

    #[test]
    fn already_decomposed_is_untouched() {
        let mut cs = chars(&['\u{0E49}', '\u{0E4D}', '\u{0E32}']);
        let expected = text(&cs);
        reorder_marks(&mut cs);
        assert_eq!(text(&cs), expected);
    }

    #[test]
    fn am_after_full_syllable() {
        let mut cs = chars(&['\u{0E19}', '\u{0E49}', '\u{0E19}', '\u{0E49}', '\u{0E33}']);
        reorder_marks(&mut cs);
        assert_eq!(
            text(&cs),
            vec!['\u{0E19}', '\u{0E49}', '\u{0E19}', '\u{0E4D}', '\u{0E49}', '\u{0E32}']
        );
    }

    #[test]
    fn phinthu_sorts_after_sara_u() {
        let mut cs = chars(&['\u{0E19}', '\u{0E3A}', '\u{0E38}']);
        reorder_marks(&mut cs);
        assert_eq!(text(&cs), vec!['\u{0E19}', '\u{0E38}', '\u{0E3A}']);
    }

    #[test]
    fn marks_attach_to_base_cluster() {
        let units = shape(&[
            CharInfo {
                ch: '\u{0E19}',
                unit: 0,
                unit_len: 1,
            },
            CharInfo {
                ch: '\u{0E49}',
                unit: 1,
                unit_len: 1,
            },
        ]);
        assert_eq!(units.len(), 2);
        assert!(units[1].attr.is_mark());
        assert_eq!(units[1].cluster, 0);
    }
}
