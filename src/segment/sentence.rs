//! Sentence boundary analysis.
//!
//! A terminator does not end a sentence by itself: an abbreviation period
//! followed by a lowercase letter, or a decimal point inside a number,
//! cancels the pending break. The decision is carried forward as pending
//! state across closing punctuation and spaces instead of re-scanning.

use crate::buffer::CharInfo;
use crate::segment::CharAttributes;
use unicode_general_category::GeneralCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    /// Paragraph separator, ends a sentence unconditionally.
    Sep,
    Space,
    Lower,
    Upper,
    /// Ambiguous terminator (full stop).
    ATerm,
    /// Unambiguous terminator.
    STerm,
    Close,
    Digit,
    Other,
    Format,
}

fn class(ch: char) -> Class {
    match ch {
        '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}' => Class::Sep,
        '.' => Class::ATerm,
        '!' | '?' | '\u{203C}' | '\u{2047}'..='\u{2049}' | '\u{3002}' => Class::STerm,
        '0'..='9' => Class::Digit,
        ' ' | '\t' => Class::Space,
        '"' | '\'' => Class::Close,
        _ => match unicode_general_category::get_general_category(ch) {
            GeneralCategory::LowercaseLetter => Class::Lower,
            GeneralCategory::UppercaseLetter | GeneralCategory::TitlecaseLetter => Class::Upper,
            GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation => Class::Close,
            GeneralCategory::SpaceSeparator => Class::Space,
            GeneralCategory::Format => Class::Format,
            _ => Class::Other,
        },
    }
}

/// What terminator is waiting for its sentence to be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    ATerm,
    STerm,
}

pub(crate) fn analyze(chars: &[CharInfo], attrs: &mut [CharAttributes]) {
    let first = match chars.iter().position(|c| attrs[c.unit].char_stop) {
        Some(first) => first,
        None => return,
    };
    attrs[chars[first].unit].sentence_boundary = true;

    let mut pending = Pending::None;
    let mut after_sep = false;

    for info in &chars[first + 1..] {
        if !attrs[info.unit].char_stop {
            continue;
        }
        let cls = class(info.ch);
        if cls == Class::Format {
            continue;
        }

        if after_sep && cls != Class::Sep {
            attrs[info.unit].sentence_boundary = true;
            after_sep = false;
            pending = Pending::None;
        }

        match cls {
            Class::ATerm => pending = Pending::ATerm,
            Class::STerm => pending = Pending::STerm,
            Class::Sep => after_sep = true,
            Class::Space | Class::Close | Class::Format => {}
            Class::Digit => {
                // Decimal point: "3.14" carries no boundary
                if pending == Pending::ATerm {
                    pending = Pending::None;
                }
            }
            Class::Lower => {
                // Lowercase after a full stop reads as an abbreviation
                if pending == Pending::ATerm {
                    pending = Pending::None;
                } else if pending == Pending::STerm {
                    attrs[info.unit].sentence_boundary = true;
                    pending = Pending::None;
                }
            }
            Class::Upper | Class::Other => {
                if pending != Pending::None {
                    attrs[info.unit].sentence_boundary = true;
                    pending = Pending::None;
                }
            }
        }
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
    fn full_stop_then_capital_starts_a_sentence() {
        let attrs = attrs_for("End. New");
        assert!(attrs[0].sentence_boundary);
        assert!(attrs[5].sentence_boundary);
    }

    #[test]
    fn lowercase_cancels_an_abbreviation() {
        let attrs = attrs_for("e.g. words");
        assert!(attrs[0].sentence_boundary);
        for attr in &attrs[1..] {
            assert!(!attr.sentence_boundary);
        }
    }

    #[test]
    fn decimal_point_is_not_a_terminator() {
        let attrs = attrs_for("pi is 3.14 here");
        assert!(attrs[0].sentence_boundary);
        for attr in &attrs[1..] {
            assert!(!attr.sentence_boundary);
        }
    }

    #[test]
    fn exclamation_ends_even_before_lowercase() {
        let attrs = attrs_for("Stop! go");
        assert!(attrs[6].sentence_boundary);
    }

    #[test]
    fn closing_quote_stays_with_the_sentence() {
        let attrs = attrs_for("\"End.\" Next");
        assert!(attrs[7].sentence_boundary);
        assert!(!attrs[5].sentence_boundary);
    }

    #[test]
    fn separator_forces_a_boundary() {
        let attrs = attrs_for("one\ntwo");
        assert!(attrs[4].sentence_boundary);
    }
}
