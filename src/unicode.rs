//! Facade over the Unicode property oracles the engine consumes.
//!
//! General category and combining class come from ecosystem crates; the
//! mirrored-character mapping below covers the pairs a renderer meets in
//! practice (full BidiMirroring coverage belongs to the property oracle
//! collaborator, not the core).

pub mod mcc;

use unicode_general_category::{get_general_category, GeneralCategory};

pub use crate::unicode::mcc::{modified_combining_class, ModifiedCombiningClass};

pub fn category(ch: char) -> GeneralCategory {
    get_general_category(ch)
}

/// Combining class used for mark ordering and heuristic placement. This is
/// the modified class (see `mcc`), which only deviates from the canonical
/// one where the canonical value produces wrong mark stacking.
pub fn combining_class(ch: char) -> u8 {
    modified_combining_class(ch) as u8
}

pub fn is_mark(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::NonspacingMark
            | GeneralCategory::SpacingMark
            | GeneralCategory::EnclosingMark
    )
}

pub fn is_format(ch: char) -> bool {
    get_general_category(ch) == GeneralCategory::Format
}

/// Paired-bracket mirror for right-to-left rendering.
pub fn mirrored(ch: char) -> Option<char> {
    let m = match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '\u{00AB}' => '\u{00BB}',
        '\u{00BB}' => '\u{00AB}',
        '\u{2039}' => '\u{203A}',
        '\u{203A}' => '\u{2039}',
        '\u{2208}' => '\u{220B}',
        '\u{220B}' => '\u{2208}',
        '\u{2264}' => '\u{2265}',
        '\u{2265}' => '\u{2264}',
        '\u{2329}' => '\u{232A}',
        '\u{232A}' => '\u{2329}',
        '\u{27E8}' => '\u{27E9}',
        '\u{27E9}' => '\u{27E8}',
        '\u{3008}' => '\u{3009}',
        '\u{3009}' => '\u{3008}',
        '\u{300A}' => '\u{300B}',
        '\u{300B}' => '\u{300A}',
        '\u{300C}' => '\u{300D}',
        '\u{300D}' => '\u{300C}',
        '\u{FF08}' => '\u{FF09}',
        '\u{FF09}' => '\u{FF08}',
        _ => return None,
    };
    Some(m)
}
