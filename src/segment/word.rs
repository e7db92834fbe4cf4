//! Word boundary analysis.
//!
//! Runs after `char_stop` is final: positions that are not cursor stops are
//! transparent and never start a word. The MidLetter/MidNum rule needs
//! look-ahead, since "c:o" or "1,5" only merges when another letter or
//! digit follows the separator, possibly across Format characters.

use crate::buffer::CharInfo;
use crate::segment::CharAttributes;
use unicode_general_category::GeneralCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Other,
    Letter,
    Digit,
    MidLetter,
    MidNum,
    Format,
}

fn class(ch: char) -> Class {
    match ch {
        ':' | '\u{00B7}' | '\u{2019}' | '\'' => Class::MidLetter,
        ',' | '.' | ';' => Class::MidNum,
        '0'..='9' => Class::Digit,
        _ => match unicode_general_category::get_general_category(ch) {
            GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter => Class::Letter,
            GeneralCategory::DecimalNumber => Class::Digit,
            GeneralCategory::Format => Class::Format,
            _ => Class::Other,
        },
    }
}

fn merges(prev: Class, cur: Class) -> bool {
    matches!(
        (prev, cur),
        (Class::Letter, Class::Letter)
            | (Class::Digit, Class::Digit)
            | (Class::Letter, Class::Digit)
            | (Class::Digit, Class::Letter)
    )
}

pub(crate) fn analyze(chars: &[CharInfo], attrs: &mut [CharAttributes]) {
    let first = match chars.iter().position(|c| attrs[c.unit].char_stop) {
        Some(first) => first,
        None => return,
    };
    attrs[chars[first].unit].word_boundary = true;

    let mut prev = class(chars[first].ch);
    let mut k = first + 1;
    while k < chars.len() {
        let info = chars[k];
        if !attrs[info.unit].char_stop {
            k += 1;
            continue;
        }
        let cur = class(info.ch);
        if cur == Class::Format {
            k += 1;
            continue;
        }

        // MidLetter/MidNum straddle: look ahead past Format characters
        let straddles = (prev == Class::Letter && cur == Class::MidLetter)
            || (prev == Class::Digit && cur == Class::MidNum);
        if straddles {
            let mut j = k + 1;
            while j < chars.len() && class(chars[j].ch) == Class::Format {
                j += 1;
            }
            if j < chars.len() && class(chars[j].ch) == prev {
                // The separator and what follows stay in the word
                k += 1;
                continue;
            }
        }

        if !merges(prev, cur) {
            attrs[info.unit].word_boundary = true;
        }
        prev = cur;
        k += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::decode_units;
    use crate::segment::linebreak;

    fn attrs_for(s: &str) -> Vec<CharAttributes> {
        let units: Vec<u16> = s.encode_utf16().collect();
        let chars = decode_units(&units);
        let mut attrs = vec![CharAttributes::default(); units.len()];
        linebreak::analyze(&chars, &mut attrs);
        analyze(&chars, &mut attrs);
        attrs
    }

    #[test]
    fn words_split_at_spaces() {
        let attrs = attrs_for("one two");
        assert!(attrs[0].word_boundary);
        assert!(attrs[3].word_boundary);
        assert!(attrs[4].word_boundary);
        assert!(!attrs[1].word_boundary);
    }

    #[test]
    fn apostrophe_between_letters_merges() {
        let attrs = attrs_for("don't");
        assert!(attrs[0].word_boundary);
        assert!(!attrs[3].word_boundary);
        assert!(!attrs[4].word_boundary);
    }

    #[test]
    fn trailing_apostrophe_does_not_merge() {
        let attrs = attrs_for("its' ");
        assert!(attrs[3].word_boundary);
    }

    #[test]
    fn decimal_point_merges_digits() {
        let attrs = attrs_for("3.14");
        assert!(attrs[0].word_boundary);
        assert!(!attrs[1].word_boundary);
        assert!(!attrs[2].word_boundary);
    }

    #[test]
    fn letters_and_digits_share_a_word() {
        let attrs = attrs_for("utf16");
        assert!(attrs[0].word_boundary);
        assert!(!attrs[3].word_boundary);
    }

    #[test]
    fn marks_are_transparent() {
        let attrs = attrs_for("e\u{0301}f");
        assert!(attrs[0].word_boundary);
        assert!(!attrs[1].word_boundary);
        assert!(!attrs[2].word_boundary);
    }
}
