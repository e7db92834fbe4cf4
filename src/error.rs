//! Error types

use std::fmt;

/// Error returned from text shaping and segmentation entry points. Faults
/// local to one syllable or composition step never surface here; shapers
/// recover from them in place with a dotted-circle base and a debug log.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ShapingError {
    /// The caller-supplied output buffers are too small. Retrying with a
    /// capacity of `required` units is guaranteed to succeed for the same
    /// input. No partial output has been written.
    Capacity { required: usize },
    /// The run selects zero code units.
    EmptyRun,
}

impl fmt::Display for ShapingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapingError::Capacity { required } => {
                write!(f, "output capacity too small, {} units required", required)
            }
            ShapingError::EmptyRun => write!(f, "empty text run"),
        }
    }
}

impl std::error::Error for ShapingError {}
