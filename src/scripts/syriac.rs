//! Syriac joining-state computation.
//!
//! Follows the specification at:
//! <https://github.com/n8willis/opentype-shaping-documents/blob/master/opentype-shaping-syriac.md>
//!
//! Syriac shares the Arabic joining model but adds Alaph handling: a
//! word-final Alaph takes one of three final forms depending on the letter
//! in front of it, and a joined Alaph inside a word takes `med2`. There is
//! no presentation-form fallback block for Syriac; without OpenType
//! coverage the base letters render unjoined.

use unicode_joining_type::{get_joining_group, get_joining_type, JoiningGroup, JoiningType};

use crate::buffer::{CharInfo, ShapeUnit};
use crate::layout::FeatureMask;
use crate::unicode;

fn is_alaph(ch: char) -> bool {
    get_joining_group(ch) == JoiningGroup::Alaph
}

fn is_dalath_rish(ch: char) -> bool {
    get_joining_group(ch) == JoiningGroup::DalathRish
}

fn is_transparent(ch: char) -> bool {
    get_joining_type(ch) == JoiningType::Transparent
}

fn is_non_joining(ch: char) -> bool {
    get_joining_type(ch) == JoiningType::NonJoining
}

fn is_left_joining(ch: char) -> bool {
    matches!(
        get_joining_type(ch),
        JoiningType::LeftJoining | JoiningType::DualJoining | JoiningType::JoinCausing
    )
}

fn is_right_joining(ch: char) -> bool {
    matches!(
        get_joining_type(ch),
        JoiningType::RightJoining | JoiningType::DualJoining | JoiningType::JoinCausing
    )
}

fn form_of(mask: FeatureMask) -> FeatureMask {
    mask & (FeatureMask::ISOL
        | FeatureMask::FINA
        | FeatureMask::FIN2
        | FeatureMask::FIN3
        | FeatureMask::MEDI
        | FeatureMask::MED2
        | FeatureMask::INIT)
}

/// Shape one Syriac run into logical-order units with joining features set.
pub(crate) fn shape(chars: &[CharInfo]) -> Vec<ShapeUnit> {
    let mut units: Vec<ShapeUnit> = Vec::with_capacity(chars.len());
    for info in chars {
        if is_transparent(info.ch) && unicode::is_mark(info.ch) {
            let cluster = units
                .last()
                .map(|u: &ShapeUnit| u.cluster)
                .unwrap_or(info.unit);
            units.push(ShapeUnit::mark(
                info.ch,
                cluster,
                unicode::combining_class(info.ch),
            ));
        } else {
            let mut unit = ShapeUnit::new(info.ch, info.unit);
            unit.features = FeatureMask::ISOL | FeatureMask::RLIG | FeatureMask::CALT;
            units.push(unit);
        }
    }

    // Letter joining states. Walk adjacent non-transparent pairs: when the
    // left one joins forward and the right one joins backward, the right
    // takes fina (med2 for Alaph) and the left advances isol -> init,
    // fina -> medi.
    let letters: Vec<usize> = (0..units.len())
        .filter(|&i| !is_transparent(units[i].ch))
        .collect();
    for w in letters.windows(2) {
        let (p, i) = (w[0], w[1]);
        if is_left_joining(units[p].ch) && is_right_joining(units[i].ch) {
            let form = if is_alaph(units[i].ch) {
                FeatureMask::MED2
            } else {
                FeatureMask::FINA
            };
            set_form(&mut units[i], form);

            let current = form_of(units[p].features);
            let prev_form = if current == FeatureMask::ISOL {
                Some(FeatureMask::INIT)
            } else if current == FeatureMask::FINA {
                Some(FeatureMask::MEDI)
            } else {
                None
            };
            if let Some(prev_form) = prev_form {
                set_form(&mut units[p], prev_form);
            }
        }
    }

    // Word-final Alaph: fina after a letter that joins to it, fin3 after
    // Dalath/Rish, fin2 after any other non-joining letter.
    if let Some(&last) = letters
        .iter()
        .rev()
        .find(|&&i| !is_non_joining(units[i].ch))
    {
        let pos = letters.iter().position(|&i| i == last).unwrap_or(0);
        if pos > 0 && is_alaph(units[last].ch) {
            let prev = letters[pos - 1];
            let form = if is_left_joining(units[prev].ch) {
                FeatureMask::FINA
            } else if is_dalath_rish(units[prev].ch) {
                FeatureMask::FIN3
            } else {
                FeatureMask::FIN2
            };
            set_form(&mut units[last], form);
        }
    }

    units
}

fn set_form(unit: &mut ShapeUnit, form: FeatureMask) {
    unit.features = (unit.features - form_of(unit.features)) | form;
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

    const ALAPH: char = '\u{0710}';
    const BETH: char = '\u{0712}'; // dual-joining
    const DALATH: char = '\u{0715}'; // right-joining, Dalath/Rish group
    const SADHE: char = '\u{0728}'; // right-joining, not Dalath/Rish

    #[test]
    fn alaph_after_joining_letter() {
        let units = shape(&info(&[BETH, ALAPH]));
        assert_eq!(form_of(units[1].features), FeatureMask::FINA);
        assert_eq!(form_of(units[0].features), FeatureMask::INIT);
    }

    #[test]
    fn alaph_after_dalath_rish() {
        let units = shape(&info(&[DALATH, ALAPH]));
        assert_eq!(form_of(units[1].features), FeatureMask::FIN3);
    }

    #[test]
    fn alaph_after_other_non_left_joining() {
        let units = shape(&info(&[SADHE, ALAPH]));
        assert_eq!(form_of(units[1].features), FeatureMask::FIN2);
    }

    #[test]
    fn medial_alaph() {
        let units = shape(&info(&[BETH, ALAPH, BETH]));
        assert_eq!(form_of(units[1].features), FeatureMask::MED2);
    }

    #[test]
    fn lone_alaph_is_isolated() {
        let units = shape(&info(&[ALAPH]));
        assert_eq!(form_of(units[0].features), FeatureMask::ISOL);
    }
}
