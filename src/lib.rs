//! Complex-text shaping engine.
//!
//! The engine turns runs of UTF-16 text into positioned glyph strings. Script
//! knowledge lives under [`scripts`]: joining and ligature logic for Arabic,
//! Syriac and N'Ko, canonical composition for Greek and Hebrew, and syllable
//! machines for Hangul, Tibetan, Khmer, Myanmar and the Indic scripts. Fonts
//! and OpenType layout are reached through the [`font::FontBackend`] and
//! [`layout::LayoutEngine`] traits so the core stays independent of any one
//! rasteriser. [`segment`] computes the per-character break attributes
//! (grapheme, word, sentence and line) that editors and line layout consume.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod buffer;
pub mod error;
pub mod font;
pub mod layout;
pub mod position;
pub mod scripts;
pub mod segment;
pub mod shape;
pub mod tag;
pub mod unicode;

pub use crate::buffer::{GlyphAttributes, GlyphFlags, Justification, ShapeBuffers, TextRun};
pub use crate::error::ShapingError;
pub use crate::font::FontBackend;
pub use crate::layout::{LayoutEngine, LayoutSelection};
pub use crate::segment::CharAttributes;
pub use crate::shape::{ShapeContext, ShapeFlags};

/// U+25CC, inserted as a stand-in base for orphaned combining marks.
pub const DOTTED_CIRCLE: char = '\u{25CC}';
