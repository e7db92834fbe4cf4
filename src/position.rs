//! Heuristic glyph positioning.
//!
//! Used whenever the font has no positioning tables for a run's script.
//! Bases advance by their metric width; marks advance zero and hang off the
//! cluster's base glyph at a spot chosen by combining class. Stacked marks
//! grow the cluster extent so each lands outside the previous one, and
//! below-base stacking is clamped at the font descent so deep stacks stay
//! inside the line box.

use crate::buffer::{GlyphFlags, ShapeUnit};
use crate::font::{FontBackend, GlyphMetrics};

/// Where a combining class wants its mark: the sixteen canonical
/// placements of the fixed combining classes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Placement {
    AboveLeft,
    Above,
    AboveRight,
    BelowLeft,
    Below,
    BelowRight,
    Left,
    Right,
    AttachedBelowLeft,
    AttachedBelow,
    AttachedAbove,
    AttachedAboveRight,
    DoubleBelow,
    DoubleAbove,
}

fn placement(combining_class: u8) -> Placement {
    match combining_class {
        200 => Placement::AttachedBelowLeft,
        202 => Placement::AttachedBelow,
        214 => Placement::AttachedAbove,
        216 => Placement::AttachedAboveRight,
        218 => Placement::BelowLeft,
        220 => Placement::Below,
        222 => Placement::BelowRight,
        224 => Placement::Left,
        226 => Placement::Right,
        228 => Placement::AboveLeft,
        230 => Placement::Above,
        232 => Placement::AboveRight,
        233 => Placement::DoubleBelow,
        234 => Placement::DoubleAbove,
        // Fixed-position classes (Hebrew points, Arabic vowels below)
        10..=26 => Placement::Below,
        103 | 118 => Placement::Below,
        _ => Placement::Above,
    }
}

/// Vertical gap between stacked marks, in font units.
const STACK_GAP: i32 = 40;

struct ClusterExtent {
    base_advance: i32,
    /// Top of everything placed so far, positive up.
    top: i32,
    /// Bottom of everything placed so far, negative below baseline.
    bottom: i32,
}

/// Position one run's units in place. Glyph indices must already be mapped.
pub(crate) fn position_units<F: FontBackend>(units: &mut [ShapeUnit], font: &F) {
    let descent = font.descent();
    let mut extent = ClusterExtent {
        base_advance: 0,
        top: 0,
        bottom: 0,
    };

    for unit in units.iter_mut() {
        if unit.attr.is_mark() {
            let metrics = font.glyph_metrics(unit.glyph);
            place_mark(unit, &metrics, &mut extent, descent);
            unit.advance = 0;
            continue;
        }

        if unit
            .attr
            .flags
            .intersects(GlyphFlags::DONT_PRINT | GlyphFlags::ZERO_WIDTH)
        {
            unit.advance = 0;
            continue;
        }

        let metrics = font.glyph_metrics(unit.glyph);
        unit.advance = font.advance(unit.glyph);
        extent = ClusterExtent {
            base_advance: unit.advance,
            top: metrics.y_offset + metrics.height,
            bottom: metrics.y_offset.min(0),
        };
    }
}

fn place_mark(unit: &mut ShapeUnit, metrics: &GlyphMetrics, extent: &mut ClusterExtent, descent: i32) {
    // The pen has already advanced past the base when a mark is placed, so
    // all x offsets pull back over it.
    let centre = -(extent.base_advance + metrics.width) / 2 - metrics.x_offset;
    let left = -extent.base_advance - metrics.x_offset;
    let right = -metrics.width - metrics.x_offset;

    let place = placement(unit.attr.combining_class);
    let x = match place {
        Placement::AboveLeft | Placement::BelowLeft | Placement::AttachedBelowLeft => left,
        Placement::AboveRight | Placement::BelowRight | Placement::AttachedAboveRight => right,
        Placement::Left => left - metrics.width,
        Placement::Right => 0,
        _ => centre,
    };

    match place {
        Placement::Above
        | Placement::AboveLeft
        | Placement::AboveRight
        | Placement::DoubleAbove => {
            let y = extent.top + STACK_GAP;
            unit.offset.x = x;
            unit.offset.y = y - metrics.y_offset;
            extent.top = y + metrics.height;
        }
        Placement::AttachedAbove | Placement::AttachedAboveRight => {
            let y = extent.top;
            unit.offset.x = x;
            unit.offset.y = y - metrics.y_offset;
            extent.top = y + metrics.height;
        }
        Placement::Below
        | Placement::BelowLeft
        | Placement::BelowRight
        | Placement::DoubleBelow => {
            let y = (extent.bottom - STACK_GAP - metrics.height).max(-descent);
            unit.offset.x = x;
            unit.offset.y = y - metrics.y_offset;
            extent.bottom = y;
        }
        Placement::AttachedBelow | Placement::AttachedBelowLeft => {
            let y = (extent.bottom - metrics.height).max(-descent);
            unit.offset.x = x;
            unit.offset.y = y - metrics.y_offset;
            extent.bottom = y;
        }
        Placement::Left => {
            unit.offset.x = x;
        }
        Placement::Right => {
            unit.offset.x = x;
        }
    }
}
