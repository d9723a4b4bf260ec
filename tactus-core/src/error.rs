//! Core error types (deterministic only)

use thiserror::Error;

/// Core algorithm errors (no I/O, no collaborator failures)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Hyphenator output does not correspond to its input beyond inserted markers
    #[error("hyphenated text {hyphenated:?} does not align with {original:?} at code point {position}")]
    AlignmentInconsistency {
        /// The un-hyphenated text
        original: String,
        /// The hyphenator output
        hyphenated: String,
        /// Code point index in the original text where alignment failed
        position: usize,
    },

    /// Output-to-input index map cannot be applied to the texts
    #[error("invalid output index map: {reason}")]
    InvalidIndexMap {
        /// What is wrong with the map
        reason: String,
    },

    /// Child span widths do not add up to the parent's declared width
    #[error("attribute children cover {children} code points but the span declares {declared}")]
    WidthMismatch {
        /// Declared width of the parent span
        declared: usize,
        /// Sum of the children's widths
        children: usize,
    },
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
