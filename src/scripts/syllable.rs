//! Shared machinery for the syllable-based shapers (Tibetan, Khmer,
//! Myanmar and the Indic scripts).
//!
//! Each script classifies its characters into a small set of numbered
//! classes and drives a per-script transition table over them. Shapers work
//! syllable by syllable: classify, cut the next syllable, rewrite it, and
//! move on.

use tinyvec::TinyVec;

use crate::buffer::ShapeUnit;
use crate::unicode;
use crate::DOTTED_CIRCLE;

/// Per-syllable scratch storage. Syllables are short; 32 inline slots cover
/// them without touching the heap, and longer runs spill transparently.
pub(crate) type Scratch<T> = TinyVec<[T; 32]>;

/// Cut the next syllable off the front of `classes`.
///
/// `table` is indexed by `[state][class]`. Entries `>= 0` name the next
/// state. A negative entry `-(n + 1)` ends the syllable and backs up over
/// the last `n` characters, so they start the following syllable (Myanmar
/// uses this for kinzi sequences that turn out not to attach). A character
/// that is invalid in the start state forms a one-character syllable of its
/// own, which the caller repairs with a dotted circle.
pub(crate) fn next_syllable(table: &[&[i16]], classes: &[u8]) -> usize {
    debug_assert!(!classes.is_empty());
    let mut state = 0usize;
    let mut i = 0;
    while i < classes.len() {
        let entry = table[state][classes[i] as usize];
        if entry < 0 {
            let back = (-entry - 1) as usize;
            return (i - back.min(i)).max(1);
        }
        state = entry as usize;
        i += 1;
    }
    i.max(1)
}

/// Append `ch` to `units` with a U+25CC base in front of it when `ch` is a
/// combining mark that arrived without a valid base.
pub(crate) fn push_with_dotted_circle(units: &mut Vec<ShapeUnit>, ch: char, cluster: usize) {
    if unicode::is_mark(ch) {
        log::debug!("mark U+{:04X} without a base, inserting dotted circle", ch as u32);
        units.push(ShapeUnit::new(DOTTED_CIRCLE, cluster));
        units.push(ShapeUnit::mark(ch, cluster, unicode::combining_class(ch)));
    } else {
        units.push(ShapeUnit::new(ch, cluster));
    }
}
