//! Input runs and caller-owned output buffers.
//!
//! The shaping engine reads a [`TextRun`] (a UTF-16 view into a caller-owned
//! buffer) and writes into a [`ShapeBuffers`] value constructed with a fixed
//! capacity. The engine never grows the buffers: when the shaped output (or
//! the per-code-unit cluster map) needs more room than the constructed
//! capacity, shaping fails with [`ShapingError::Capacity`] carrying the unit
//! count that will succeed on retry, and nothing is written.

use bitflags::bitflags;

use crate::error::ShapingError;
use crate::layout::FeatureMask;

/// An immutable view of one script run: a maximal substring sharing one
/// script tag and one bidi embedding level.
#[derive(Clone, Copy, Debug)]
pub struct TextRun<'a> {
    /// The whole paragraph, UTF-16 code units.
    pub text: &'a [u16],
    /// First code unit of the run.
    pub offset: usize,
    /// Length of the run in code units.
    pub len: usize,
    /// 4-byte script tag, e.g. `tag!(b"arab")`.
    pub script: u32,
    /// Resolved bidi embedding level. Odd levels are right-to-left.
    pub bidi_level: u8,
}

impl<'a> TextRun<'a> {
    pub fn new(text: &'a [u16], offset: usize, len: usize, script: u32, bidi_level: u8) -> Self {
        debug_assert!(offset + len <= text.len());
        TextRun {
            text,
            offset,
            len,
            script,
            bidi_level,
        }
    }

    pub fn units(&self) -> &'a [u16] {
        &self.text[self.offset..self.offset + self.len]
    }

    pub fn is_rtl(&self) -> bool {
        self.bidi_level & 1 == 1
    }
}

/// One decoded scalar of a run, with its position in code units.
///
/// Lone surrogates decode to U+FFFD but keep their code-unit accounting, so
/// they shape as their own single-unit cluster.
#[derive(Clone, Copy, Debug)]
pub struct CharInfo {
    pub ch: char,
    /// Run-relative index of the first code unit.
    pub unit: usize,
    /// 1 for BMP scalars and lone surrogates, 2 for surrogate pairs.
    pub unit_len: u8,
}

pub(crate) fn is_high_surrogate(u: u16) -> bool {
    (0xD800..=0xDBFF).contains(&u)
}

pub(crate) fn is_low_surrogate(u: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&u)
}

/// Decode UTF-16 code units into `CharInfo`s, pairing surrogates.
pub fn decode_units(units: &[u16]) -> Vec<CharInfo> {
    let mut out = Vec::with_capacity(units.len());
    let mut i = 0;
    while i < units.len() {
        let u = units[i];
        if is_high_surrogate(u) && i + 1 < units.len() && is_low_surrogate(units[i + 1]) {
            let scalar = 0x10000 + (((u as u32 - 0xD800) << 10) | (units[i + 1] as u32 - 0xDC00));
            // The pair is a valid scalar by construction
            let ch = char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER);
            out.push(CharInfo {
                ch,
                unit: i,
                unit_len: 2,
            });
            i += 2;
        } else {
            let ch = char::from_u32(u as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
            out.push(CharInfo {
                ch,
                unit: i,
                unit_len: 1,
            });
            i += 1;
        }
    }
    out
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GlyphFlags: u8 {
        /// Non-spacing mark attached to the nearest preceding cluster start.
        const MARK          = 0b0001;
        /// First unit of a logical cluster. Exactly one per cluster.
        const CLUSTER_START = 0b0010;
        /// Unit advances by zero width.
        const ZERO_WIDTH    = 0b0100;
        /// Unit must not produce visible output (e.g. ZWJ/ZWNJ, soft hyphen).
        const DONT_PRINT    = 0b1000;
    }
}

/// Per-glyph justification priority, highest last. The Arabic classes mark
/// kashida insertion points in decreasing desirability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Justification {
    #[default]
    None,
    Space,
    Character,
    ArabicSpace,
    ArabicNormal,
    ArabicWaw,
    ArabicBaRa,
    ArabicAlef,
    ArabicHahDal,
    ArabicSeen,
    ArabicKashida,
}

/// Attributes of one output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphAttributes {
    pub flags: GlyphFlags,
    /// Canonical combining class of the originating mark, 0 otherwise.
    pub combining_class: u8,
    pub justification: Justification,
}

impl GlyphAttributes {
    pub fn is_mark(&self) -> bool {
        self.flags.contains(GlyphFlags::MARK)
    }

    pub fn is_cluster_start(&self) -> bool {
        self.flags.contains(GlyphFlags::CLUSTER_START)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphOffset {
    pub x: i32,
    pub y: i32,
}

/// One output unit as it moves through the pipeline: the character to
/// render (possibly a presentation form), the glyph the font backend mapped
/// it to, per-unit attributes, position, and the cluster it accounts to.
#[derive(Debug, Clone)]
pub struct ShapeUnit {
    pub ch: char,
    /// Glyph index from the font backend; 0 when unmapped.
    pub glyph: u32,
    /// Run-relative index of the first code unit of this unit's cluster.
    pub cluster: usize,
    pub attr: GlyphAttributes,
    pub advance: i32,
    pub offset: GlyphOffset,
    /// Shaping features requested from the layout collaborator.
    pub features: FeatureMask,
}

impl ShapeUnit {
    pub fn new(ch: char, cluster: usize) -> Self {
        ShapeUnit {
            ch,
            glyph: 0,
            cluster,
            attr: GlyphAttributes {
                flags: GlyphFlags::CLUSTER_START,
                combining_class: 0,
                justification: Justification::None,
            },
            advance: 0,
            offset: GlyphOffset::default(),
            features: FeatureMask::empty(),
        }
    }

    pub fn mark(ch: char, cluster: usize, combining_class: u8) -> Self {
        ShapeUnit {
            ch,
            glyph: 0,
            cluster,
            attr: GlyphAttributes {
                flags: GlyphFlags::MARK | GlyphFlags::ZERO_WIDTH,
                combining_class,
                justification: Justification::None,
            },
            advance: 0,
            offset: GlyphOffset::default(),
            features: FeatureMask::empty(),
        }
    }
}

/// Caller-owned output arrays with a fixed capacity.
///
/// One capacity serves both the per-output-unit arrays and the
/// per-code-unit cluster map, so the required capacity for a run is
/// `max(output units, run length)`.
#[derive(Debug, Default)]
pub struct ShapeBuffers {
    pub glyphs: Vec<u32>,
    pub attributes: Vec<GlyphAttributes>,
    pub advances: Vec<i32>,
    pub offsets: Vec<GlyphOffset>,
    /// For each input code unit, the output index of its cluster's
    /// representative (cluster-start) unit.
    pub clusters: Vec<usize>,
    capacity: usize,
}

impl ShapeBuffers {
    pub fn with_capacity(capacity: usize) -> Self {
        ShapeBuffers {
            glyphs: Vec::with_capacity(capacity),
            attributes: Vec::with_capacity(capacity),
            advances: Vec::with_capacity(capacity),
            offsets: Vec::with_capacity(capacity),
            clusters: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of committed output units.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.attributes.clear();
        self.advances.clear();
        self.offsets.clear();
        self.clusters.clear();
    }

    /// Write the finished units and the cluster map, or report the required
    /// capacity without writing anything.
    pub(crate) fn commit(
        &mut self,
        units: &[ShapeUnit],
        run_len: usize,
    ) -> Result<(), ShapingError> {
        let required = units.len().max(run_len);
        if required > self.capacity {
            self.clear();
            return Err(ShapingError::Capacity { required });
        }

        self.clear();
        for unit in units {
            self.glyphs.push(unit.glyph);
            self.attributes.push(unit.attr);
            self.advances.push(unit.advance);
            self.offsets.push(unit.offset);
        }
        self.clusters = build_cluster_map(units, run_len);
        Ok(())
    }
}

/// Map every input code unit to the output index of its cluster's
/// representative unit. Works on the final (visual-order) unit sequence, so
/// the map is monotonic in visual order for both directions.
fn build_cluster_map(units: &[ShapeUnit], run_len: usize) -> Vec<usize> {
    let mut starts: Vec<(usize, usize)> = units
        .iter()
        .enumerate()
        .filter(|(_, u)| u.attr.is_cluster_start())
        .map(|(i, u)| (u.cluster, i))
        .collect();
    starts.sort_by_key(|&(input, _)| input);

    let mut map = vec![0; run_len];
    if starts.is_empty() {
        return map;
    }

    let mut si = 0;
    for (i, slot) in map.iter_mut().enumerate() {
        while si + 1 < starts.len() && starts[si + 1].0 <= i {
            si += 1;
        }
        *slot = starts[si].1;
    }
    map
}
