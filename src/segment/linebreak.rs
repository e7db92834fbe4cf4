//! Line-break and grapheme-cluster analysis.
//!
//! One left-to-right scan over the decoded scalars fills both the
//! line-break opportunities and the grapheme boundaries. The break pair
//! table follows the UAX #14 sample table except in the cells listed above
//! the table, where the published table breaks more aggressively than text
//! layout wants.

use crate::buffer::CharInfo;
use crate::segment::CharAttributes;
use crate::unicode;
use unicode_general_category::GeneralCategory;

/// Break opportunity before a code unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreak {
    /// Breaking here is prohibited.
    #[default]
    NoBreak,
    /// Optional break.
    Direct,
    /// Optional break that requires a visible hyphen when taken.
    SoftHyphen,
    /// Mandatory break (after BK, CR, LF, NEL).
    Forced,
}

// Classes 0..TABLE_CLASSES index the pair table; the rest are handled in
// the scan loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Op = 0, // opening punctuation
    Cl,     // closing punctuation
    Qu,     // ambiguous quote
    Gl,     // glue, non-breaking
    Ns,     // non-starter
    Ex,     // exclamation
    Sy,     // symbol allowing break after (solidus)
    Is,     // infix separator
    Pr,     // numeric prefix
    Po,     // numeric postfix
    Nu,     // numeric
    Al,     // alphabetic
    Id,     // ideographic
    In,     // inseparable
    Hy,     // hyphen
    Ba,     // break after
    Bb,     // break before
    B2,     // break on both sides
    Zw,     // zero-width space
    Cm,     // combining mark
    Sp,     // space
    Bk,     // mandatory break
    Cr,     // carriage return
    Lf,     // line feed
}

const TABLE_CLASSES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Break allowed.
    D,
    /// Break only when spaces intervene.
    I,
    /// Like `I`, and a mark without a space attaches to the left.
    Ci,
    /// No break even across spaces.
    Cp,
    /// No break.
    P,
}

use Action::{Ci, Cp, D, I, P};

// Pair table indexed [before][after]. Deviations from the published
// UAX #14 sample table, all Direct -> Indirect so the break only happens
// at a space:
//   AL*OP, NU*OP, ID*OP  (no break between a word and its opening bracket)
//   CL*AL, CL*NU         (no break straight after a closing bracket)
//   HY*AL, BA*AL, BA*NU  (no break straight after a hyphen or break-after)
#[rustfmt::skip]
static PAIRS: [[Action; TABLE_CLASSES]; TABLE_CLASSES] = [
    //         Op Cl Qu Gl Ns Ex Sy Is Pr Po Nu Al Id In Hy Ba Bb B2 Zw Cm
    /* Op */ [ P, P, P, P, P, P, P, P, P, P, P, P, P, P, P, P, P, P, P, Cp ],
    /* Cl */ [ D, P, I, I, P, P, P, P, I, I, I, I, D, D, I, I, D, D, P, Ci ],
    /* Qu */ [ P, P, I, I, I, P, P, P, I, I, I, I, I, I, I, I, I, I, P, Ci ],
    /* Gl */ [ I, P, I, I, I, P, P, P, I, I, I, I, I, I, I, I, I, I, P, Ci ],
    /* Ns */ [ D, P, I, I, I, P, P, P, D, D, D, D, D, D, I, I, D, D, P, Ci ],
    /* Ex */ [ D, P, I, I, I, P, P, P, D, D, D, D, D, D, I, I, D, D, P, Ci ],
    /* Sy */ [ D, P, I, I, I, P, P, P, D, D, I, D, D, D, I, I, D, D, P, Ci ],
    /* Is */ [ D, P, I, I, I, P, P, P, D, D, I, I, D, D, I, I, D, D, P, Ci ],
    /* Pr */ [ I, P, I, I, I, P, P, P, D, D, I, I, I, D, I, I, D, D, P, Ci ],
    /* Po */ [ D, P, I, I, I, P, P, P, D, D, I, I, D, D, I, I, D, D, P, Ci ],
    /* Nu */ [ I, P, I, I, I, P, P, P, I, I, I, I, D, I, I, I, D, D, P, Ci ],
    /* Al */ [ I, P, I, I, I, P, P, P, D, D, I, I, D, I, I, I, D, D, P, Ci ],
    /* Id */ [ I, P, I, I, I, P, P, P, D, I, D, D, D, I, I, I, D, D, P, Ci ],
    /* In */ [ D, P, I, I, I, P, P, P, D, D, D, D, D, I, I, I, D, D, P, Ci ],
    /* Hy */ [ D, P, I, I, I, P, P, P, D, D, I, I, D, D, I, I, D, D, P, Ci ],
    /* Ba */ [ D, P, I, I, I, P, P, P, D, D, I, I, D, D, I, I, D, D, P, Ci ],
    /* Bb */ [ I, P, I, I, I, P, P, P, I, I, I, I, I, I, I, I, I, I, P, Ci ],
    /* B2 */ [ D, P, I, I, I, P, P, P, D, D, D, D, D, D, I, I, D, P, P, Ci ],
    /* Zw */ [ D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, P, D  ],
    /* Cm */ [ D, P, I, I, I, P, P, P, D, D, I, I, D, I, I, I, D, D, P, Ci ],
];

fn class(ch: char) -> Class {
    match ch {
        '\u{000A}' => Class::Lf,
        '\u{000D}' => Class::Cr,
        '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => Class::Bk,
        ' ' => Class::Sp,
        '\u{200B}' => Class::Zw,
        // Word joiner and BOM act as glue on both sides
        '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\u{2011}' | '\u{2060}' | '\u{FEFF}' => Class::Gl,
        '(' | '[' | '{' => Class::Op,
        ')' | ']' | '}' | '\u{3001}' | '\u{3002}' => Class::Cl,
        '"' | '\'' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{00AB}'
        | '\u{00BB}' => Class::Qu,
        '!' | '?' => Class::Ex,
        '/' => Class::Sy,
        ',' | '.' | ':' | ';' => Class::Is,
        '$' | '+' | '\u{00A3}' | '\u{00A5}' | '\u{20AC}' | '\u{00B1}' => Class::Pr,
        '%' | '\u{00A2}' | '\u{00B0}' | '\u{2030}' => Class::Po,
        '-' => Class::Hy,
        '\t' | '\u{00AD}' | '\u{2010}' | '\u{2012}' | '\u{2013}' => Class::Ba,
        '\u{00B4}' => Class::Bb,
        '\u{2014}' => Class::B2,
        '\u{2024}'..='\u{2026}' => Class::In,
        '0'..='9' => Class::Nu,
        '\u{200C}' | '\u{200D}' => Class::Cm,
        '\u{1100}'..='\u{11FF}'
        | '\u{2E80}'..='\u{9FFF}'
        | '\u{A000}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF01}'..='\u{FF60}'
        | '\u{FFFC}'
        | '\u{20000}'..='\u{2FFFD}' => Class::Id,
        _ => {
            if unicode::is_mark(ch) || unicode::is_format(ch) {
                Class::Cm
            } else if unicode::category(ch) == GeneralCategory::DecimalNumber {
                Class::Nu
            } else {
                // Thai, Lao, Khmer, Myanmar need dictionaries for word
                // breaks; they take the alphabetic path here and get their
                // cursor stops from the script refinement pass.
                Class::Al
            }
        }
    }
}

fn table_index(cls: Class) -> Option<usize> {
    let idx = cls as usize;
    (idx < TABLE_CLASSES).then_some(idx)
}

// Grapheme classes for the boolean boundary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grapheme {
    Other = 0,
    Cr,
    Lf,
    Control,
    Extend,
    L,
    V,
    T,
    Lv,
    Lvt,
}

fn grapheme_class(ch: char) -> Grapheme {
    match ch {
        '\u{000D}' => Grapheme::Cr,
        '\u{000A}' => Grapheme::Lf,
        '\u{200C}' | '\u{200D}' => Grapheme::Extend,
        '\u{1100}'..='\u{115F}' => Grapheme::L,
        '\u{1160}'..='\u{11A7}' => Grapheme::V,
        '\u{11A8}'..='\u{11FF}' => Grapheme::T,
        '\u{AC00}'..='\u{D7A3}' => {
            if (ch as u32 - 0xAC00) % 28 == 0 {
                Grapheme::Lv
            } else {
                Grapheme::Lvt
            }
        }
        _ => match unicode::category(ch) {
            GeneralCategory::NonspacingMark
            | GeneralCategory::EnclosingMark
            | GeneralCategory::SpacingMark => Grapheme::Extend,
            GeneralCategory::Control | GeneralCategory::Format => Grapheme::Control,
            GeneralCategory::LineSeparator | GeneralCategory::ParagraphSeparator => {
                Grapheme::Control
            }
            _ => Grapheme::Other,
        },
    }
}

// True means a grapheme boundary between [row] and [column].
#[rustfmt::skip]
static GRAPHEME_BREAK: [[bool; 10]; 10] = [
    //            Oth    Cr     Lf     Ctl    Ext    L      V      T      Lv     Lvt
    /* Other */ [ true,  true,  true,  true,  false, true,  true,  true,  true,  true  ],
    /* Cr    */ [ true,  true,  false, true,  true,  true,  true,  true,  true,  true  ],
    /* Lf    */ [ true,  true,  true,  true,  true,  true,  true,  true,  true,  true  ],
    /* Ctl   */ [ true,  true,  true,  true,  true,  true,  true,  true,  true,  true  ],
    /* Ext   */ [ true,  true,  true,  true,  false, true,  true,  true,  true,  true  ],
    /* L     */ [ true,  true,  true,  true,  false, false, false, true,  false, false ],
    /* V     */ [ true,  true,  true,  true,  false, true,  false, false, true,  true  ],
    /* T     */ [ true,  true,  true,  true,  false, true,  true,  false, true,  true  ],
    /* Lv    */ [ true,  true,  true,  true,  false, true,  false, false, true,  true  ],
    /* Lvt   */ [ true,  true,  true,  true,  false, true,  true,  false, true,  true  ],
];

pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    ) || unicode::category(ch) == GeneralCategory::SpaceSeparator
}

/// Fill line-break, whitespace, grapheme and default char-stop fields.
/// `attrs` is indexed by code unit; only each scalar's first unit is
/// touched, so surrogate tails never acquire a boundary.
pub(crate) fn analyze(chars: &[CharInfo], attrs: &mut [CharAttributes]) {
    let first = match chars.first() {
        Some(first) => first,
        None => return,
    };
    attrs[first.unit].grapheme_boundary = true;
    attrs[first.unit].char_stop = true;
    attrs[first.unit].whitespace = is_whitespace(first.ch);

    let mut prev = class(first.ch);
    // Running class of the last non-space character, for the pair table
    let mut cls = table_index(prev).unwrap_or(Class::Al as usize);
    let mut gprev = grapheme_class(first.ch);
    let mut had_space = prev == Class::Sp;

    for k in 1..chars.len() {
        let info = chars[k];
        let cur = class(info.ch);
        let gcur = grapheme_class(info.ch);
        let attr = &mut attrs[info.unit];

        attr.whitespace = is_whitespace(info.ch);
        attr.grapheme_boundary = GRAPHEME_BREAK[gprev as usize][gcur as usize];
        attr.char_stop = attr.grapheme_boundary;
        gprev = gcur;

        if prev == Class::Bk || prev == Class::Lf || (prev == Class::Cr && cur != Class::Lf) {
            attr.line_break = LineBreak::Forced;
            prev = cur;
            cls = table_index(cur).unwrap_or(Class::Al as usize);
            had_space = cur == Class::Sp;
            continue;
        }

        match cur {
            Class::Sp => {
                // No break before a space; the opportunity moves past it
                had_space = true;
                prev = cur;
                continue;
            }
            Class::Bk | Class::Cr | Class::Lf => {
                prev = cur;
                continue;
            }
            _ => {}
        }

        // Sp/Bk/Cr/Lf were consumed above
        let cur_idx = match table_index(cur) {
            Some(idx) => idx,
            None => Class::Al as usize,
        };
        let action = PAIRS[cls][cur_idx];
        let can_break = match action {
            Action::D => true,
            Action::I | Action::Ci => had_space,
            Action::P | Action::Cp => false,
        };

        // A soft hyphen always offers its break, whatever the table says
        if chars[k - 1].ch == '\u{00AD}' {
            attr.line_break = LineBreak::SoftHyphen;
        } else if can_break {
            attr.line_break = LineBreak::Direct;
        }

        // Marks are transparent to the running class unless a space
        // detached them from their base
        if cur != Class::Cm || had_space {
            cls = cur_idx;
        }
        prev = cur;
        had_space = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::decode_units;

    fn attrs_for(s: &str) -> Vec<CharAttributes> {
        let units: Vec<u16> = s.encode_utf16().collect();
        let chars = decode_units(&units);
        let mut attrs = vec![CharAttributes::default(); units.len()];
        analyze(&chars, &mut attrs);
        attrs
    }

    #[test]
    fn break_after_space() {
        let attrs = attrs_for("foo bar");
        assert_eq!(attrs[3].line_break, LineBreak::NoBreak);
        assert_eq!(attrs[4].line_break, LineBreak::Direct);
        assert!(attrs[3].whitespace);
    }

    #[test]
    fn soft_hyphen_subtype() {
        let attrs = attrs_for("co\u{00AD}op");
        assert_eq!(attrs[3].line_break, LineBreak::SoftHyphen);
    }

    #[test]
    fn forced_after_newline() {
        let attrs = attrs_for("a\nb");
        assert_eq!(attrs[2].line_break, LineBreak::Forced);
    }

    #[test]
    fn crlf_is_one_break() {
        let attrs = attrs_for("a\r\nb");
        assert_eq!(attrs[2].line_break, LineBreak::NoBreak);
        assert_eq!(attrs[3].line_break, LineBreak::Forced);
    }

    #[test]
    fn no_break_before_closing_bracket() {
        let attrs = attrs_for("a)b");
        assert_eq!(attrs[1].line_break, LineBreak::NoBreak);
        // Deviation cell CL*AL: no break straight after the bracket either
        assert_eq!(attrs[2].line_break, LineBreak::NoBreak);
    }

    #[test]
    fn ideographs_break_anywhere() {
        let attrs = attrs_for("\u{6F22}\u{5B57}");
        assert_eq!(attrs[1].line_break, LineBreak::Direct);
    }

    #[test]
    fn marks_do_not_break_or_bound() {
        let attrs = attrs_for("e\u{0301}f");
        assert_eq!(attrs[1].line_break, LineBreak::NoBreak);
        assert!(!attrs[1].grapheme_boundary);
        assert!(attrs[2].grapheme_boundary);
    }

    #[test]
    fn surrogate_pair_is_opaque() {
        let attrs = attrs_for("a\u{10334}b");
        assert!(attrs[1].grapheme_boundary);
        // Trailing unit of the pair carries nothing
        assert!(!attrs[2].grapheme_boundary);
        assert_eq!(attrs[2].line_break, LineBreak::NoBreak);
        assert!(attrs[3].grapheme_boundary);
    }

    #[test]
    fn hangul_jamo_form_one_grapheme() {
        let attrs = attrs_for("\u{1100}\u{1161}\u{11A8}\u{1100}");
        assert!(attrs[0].grapheme_boundary);
        assert!(!attrs[1].grapheme_boundary);
        assert!(!attrs[2].grapheme_boundary);
        assert!(attrs[3].grapheme_boundary);
    }

    #[test]
    fn pass_is_idempotent() {
        let first = attrs_for("foo bar.\nNew line");
        let second = attrs_for("foo bar.\nNew line");
        assert_eq!(first, second);
    }
}
