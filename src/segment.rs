//! Per-character boundary analysis.
//!
//! Runs once over the whole string, independent of shaping. A first pass
//! fills line-break, whitespace and grapheme fields for every code unit;
//! a second pass refines `char_stop` per script run (syllabic scripts put
//! cursor stops at syllable boundaries, not at every base character); the
//! word and sentence passes run last and rely on `char_stop` being final.

pub mod linebreak;
pub mod sentence;
pub mod word;

use crate::buffer::{decode_units, TextRun};
use crate::error::ShapingError;
use crate::scripts::{self, ScriptType};
use crate::unicode;

pub use linebreak::LineBreak;

/// Boundary attributes of one UTF-16 code unit. The low code unit of a
/// surrogate pair carries the scalar's attributes; the trailing unit keeps
/// the zeroed defaults, so no boundary ever falls inside a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharAttributes {
    /// Break opportunity before this unit.
    pub line_break: LineBreak,
    pub whitespace: bool,
    /// Valid cursor position before this unit.
    pub char_stop: bool,
    /// A word begins at this unit.
    pub word_boundary: bool,
    /// A sentence begins at this unit.
    pub sentence_boundary: bool,
    /// A grapheme cluster begins at this unit.
    pub grapheme_boundary: bool,
}

/// Dictionary-based Thai word breaking, supplied by the caller. Receives
/// the run's scalars and a stop flag per scalar, pre-set to the default
/// rule; the breaker clears the flags inside words.
pub type ThaiBreaker = fn(&[char], &mut [bool]);

/// Compute attributes for every code unit of `text`.
///
/// `attrs` must hold at least `text.len()` entries or the call fails with
/// `Capacity` and writes nothing. `runs` lists the script runs of the
/// string; units outside every run keep the default script rules.
pub fn char_attributes(
    text: &[u16],
    runs: &[TextRun<'_>],
    attrs: &mut [CharAttributes],
    thai_breaker: Option<ThaiBreaker>,
) -> Result<(), ShapingError> {
    if attrs.len() < text.len() {
        return Err(ShapingError::Capacity {
            required: text.len(),
        });
    }
    for attr in attrs.iter_mut() {
        *attr = CharAttributes::default();
    }

    let chars = decode_units(text);
    linebreak::analyze(&chars, attrs);

    for run in runs {
        refine_char_stops(run, attrs, thai_breaker);
    }

    word::analyze(&chars, attrs);
    sentence::analyze(&chars, attrs);
    Ok(())
}

fn refine_char_stops(
    run: &TextRun<'_>,
    attrs: &mut [CharAttributes],
    thai_breaker: Option<ThaiBreaker>,
) {
    let script = ScriptType::from_tag(run.script);
    let infos = decode_units(run.units());
    let scalars: Vec<char> = infos.iter().map(|c| c.ch).collect();

    let stops = match script {
        ScriptType::Thai => {
            let mut stops: Vec<bool> = scalars.iter().map(|&ch| !unicode::is_mark(ch)).collect();
            if let Some(breaker) = thai_breaker {
                breaker(&scalars, &mut stops);
            }
            stops
        }
        _ => match scripts::char_stops(script, &scalars) {
            Some(stops) => stops,
            None => return,
        },
    };

    for (info, stop) in infos.iter().zip(stops) {
        attrs[run.offset + info.unit].char_stop = stop;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn capacity_checked_up_front() {
        let text = utf16("abc");
        let mut attrs = vec![CharAttributes::default(); 2];
        assert_eq!(
            char_attributes(&text, &[], &mut attrs, None),
            Err(ShapingError::Capacity { required: 3 })
        );
    }

    #[test]
    fn khmer_run_stops_at_syllable_starts() {
        // KA + COENG + KHA: one syllable, one cursor stop
        let text = utf16("\u{1780}\u{17D2}\u{1781}");
        let run = TextRun::new(&text, 0, 3, tag::KHMR, 0);
        let mut attrs = vec![CharAttributes::default(); 3];
        char_attributes(&text, &[run], &mut attrs, None).unwrap();
        assert!(attrs[0].char_stop);
        assert!(!attrs[1].char_stop);
        assert!(!attrs[2].char_stop);
    }

    #[test]
    fn thai_breaker_callback_overrides_default() {
        let text = utf16("\u{0E01}\u{0E02}");
        let run = TextRun::new(&text, 0, 2, tag::THAI, 0);
        let mut attrs = vec![CharAttributes::default(); 2];
        fn no_stops(_chars: &[char], stops: &mut [bool]) {
            for s in stops.iter_mut().skip(1) {
                *s = false;
            }
        }
        char_attributes(&text, &[run], &mut attrs, Some(no_stops)).unwrap();
        assert!(attrs[0].char_stop);
        assert!(!attrs[1].char_stop);
    }
}
