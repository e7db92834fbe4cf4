use unicode_ccc::{get_canonical_combining_class, CanonicalCombiningClass};

/// The Unicode
/// [Canonical_Combining_Class values](http://www.unicode.org/reports/tr44/#Canonical_Combining_Class_Values),
/// adjusted where the canonical ordering misplaces marks:
///
/// * The Hebrew fixed-position classes are renumbered to the manuscript order
///   given in the SBL Hebrew Font User Manual.
/// * CCC84 and CCC91 (Telugu length marks) move to the unassigned slots 4 and
///   5 so they are not reordered past a Halant.
/// * CCC103 (Thai Sara U and Sara Uu) moves to slot 3 so Phinthu sorts after
///   it rather than before.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum ModifiedCombiningClass {
    NotReordered = 0,
    Overlay = 1,
    CCC3 = 3,
    CCC4 = 4,
    CCC5 = 5,
    HanReading = 6,
    Nukta = 7,
    KanaVoicing = 8,
    Virama = 9,
    CCC10 = 10,
    CCC11 = 11,
    CCC12 = 12,
    CCC13 = 13,
    CCC14 = 14,
    CCC15 = 15,
    CCC16 = 16,
    CCC17 = 17,
    CCC18 = 18,
    CCC19 = 19,
    CCC20 = 20,
    CCC21 = 21,
    CCC22 = 22,
    CCC23 = 23,
    CCC24 = 24,
    CCC25 = 25,
    CCC26 = 26,
    CCC27 = 27,
    CCC28 = 28,
    CCC29 = 29,
    CCC30 = 30,
    CCC31 = 31,
    CCC32 = 32,
    CCC33 = 33,
    CCC34 = 34,
    CCC35 = 35,
    CCC36 = 36,
    CCC107 = 107,
    CCC118 = 118,
    CCC122 = 122,
    CCC129 = 129,
    CCC130 = 130,
    CCC132 = 132,
    AttachedBelowLeft = 200,
    AttachedBelow = 202,
    AttachedAbove = 214,
    AttachedAboveRight = 216,
    BelowLeft = 218,
    Below = 220,
    BelowRight = 222,
    Left = 224,
    Right = 226,
    AboveLeft = 228,
    Above = 230,
    AboveRight = 232,
    DoubleBelow = 233,
    DoubleAbove = 234,
    IotaSubscript = 240,
}

impl From<CanonicalCombiningClass> for ModifiedCombiningClass {
    fn from(ccc: CanonicalCombiningClass) -> Self {
        use CanonicalCombiningClass as C;
        use ModifiedCombiningClass as M;

        match ccc {
            C::NotReordered => M::NotReordered,
            C::Overlay => M::Overlay,
            C::HanReading => M::HanReading,
            C::Nukta => M::Nukta,
            C::KanaVoicing => M::KanaVoicing,
            C::Virama => M::Virama,
            // Hebrew, renumbered per the SBL Hebrew manuscript order
            C::CCC10 => M::CCC22,
            C::CCC11 => M::CCC15,
            C::CCC12 => M::CCC16,
            C::CCC13 => M::CCC17,
            C::CCC14 => M::CCC23,
            C::CCC15 => M::CCC18,
            C::CCC16 => M::CCC19,
            C::CCC17 => M::CCC20,
            C::CCC18 => M::CCC21,
            C::CCC19 => M::CCC14,
            C::CCC20 => M::CCC24,
            C::CCC21 => M::CCC12,
            C::CCC22 => M::CCC25,
            C::CCC23 => M::CCC13,
            C::CCC24 => M::CCC10,
            C::CCC25 => M::CCC11,
            C::CCC26 => M::CCC26,
            // Arabic
            C::CCC27 => M::CCC27,
            C::CCC28 => M::CCC28,
            C::CCC29 => M::CCC29,
            C::CCC30 => M::CCC30,
            C::CCC31 => M::CCC31,
            C::CCC32 => M::CCC32,
            C::CCC33 => M::CCC33,
            C::CCC34 => M::CCC34,
            C::CCC35 => M::CCC35,
            // Syriac
            C::CCC36 => M::CCC36,
            // Telugu length marks U+0C55 and U+0C56 must stay before a Halant.
            // Test case: "\u{0C15}\u{0C4D}\u{0C56}" should not produce a
            // dotted circle.
            C::CCC84 => M::CCC4,
            C::CCC91 => M::CCC5,
            // Thai
            // Sara U and Sara Uu must not reorder past a Phinthu (ccc 9).
            // Test case: "\u{0E19}\u{0E3A}\u{0E38}" sorts the Phinthu last.
            C::CCC103 => M::CCC3,
            C::CCC107 => M::CCC107,
            // Lao
            C::CCC118 => M::CCC118,
            C::CCC122 => M::CCC122,
            // Tibetan
            C::CCC129 => M::CCC129,
            C::CCC130 => M::CCC130,
            C::CCC132 => M::CCC132,
            C::AttachedBelowLeft => M::AttachedBelowLeft,
            C::AttachedBelow => M::AttachedBelow,
            C::AttachedAbove => M::AttachedAbove,
            C::AttachedAboveRight => M::AttachedAboveRight,
            C::BelowLeft => M::BelowLeft,
            C::Below => M::Below,
            C::BelowRight => M::BelowRight,
            C::Left => M::Left,
            C::Right => M::Right,
            C::AboveLeft => M::AboveLeft,
            C::Above => M::Above,
            C::AboveRight => M::AboveRight,
            C::DoubleBelow => M::DoubleBelow,
            C::DoubleAbove => M::DoubleAbove,
            C::IotaSubscript => M::IotaSubscript,
        }
    }
}

/// Returns the modified combining class of `c`.
pub fn modified_combining_class(c: char) -> ModifiedCombiningClass {
    get_canonical_combining_class(c).into()
}

/// Stable-sorts each run of non-starters (combining class > 0) by modified
/// combining class, leaving starters in place.
pub fn sort_by_modified_combining_class(cs: &mut [char]) {
    fn comparator(c1: &char, c2: &char) -> std::cmp::Ordering {
        modified_combining_class(*c1).cmp(&modified_combining_class(*c2))
    }

    for css in
        cs.split_mut(|&c| modified_combining_class(c) == ModifiedCombiningClass::NotReordered)
    {
        css.sort_by(comparator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telugu_length_mark_sorts_before_virama() {
        let mut cs = ['\u{0C15}', '\u{0C4D}', '\u{0C56}'];
        sort_by_modified_combining_class(&mut cs);
        assert_eq!(cs, ['\u{0C15}', '\u{0C56}', '\u{0C4D}']);
    }

    #[test]
    fn starters_are_barriers() {
        let mut cs = ['a', '\u{0301}', 'b', '\u{0328}', '\u{0301}'];
        sort_by_modified_combining_class(&mut cs);
        assert_eq!(cs, ['a', '\u{0301}', 'b', '\u{0328}', '\u{0301}']);
    }
}
