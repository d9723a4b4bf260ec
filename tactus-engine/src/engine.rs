//! Translation engine collaborators
//!
//! Two kinds of engines are supported. A [`TranslationEngine`] receives the
//! text together with per character style masks and break classes and
//! reports where each output character came from. A [`StringFilter`] only
//! maps strings to strings; styles reach it as inline markers.

use crate::error::BoxError;
use tactus_core::{Breakpoint, LinearAttributes};

/// Input of one engine call
#[derive(Debug, Clone, Copy)]
pub struct EngineRequest<'a> {
    /// Text without break markers
    pub text: &'a str,
    /// Style masks, one per code point of `text`
    pub styles: Option<&'a LinearAttributes>,
    /// Break class of every gap of `text`; empty when not hyphenating
    pub breakpoints: &'a [Breakpoint],
}

/// Output of one engine call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// Translated text
    pub text: String,
    /// For every code point of `text`, the input code point it came from
    pub input_positions: Vec<usize>,
}

impl EngineOutput {
    /// Output with an empty index map
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append `cells` produced from input position `position`
    pub fn push(&mut self, cells: impl IntoIterator<Item = char>, position: usize) {
        for cell in cells {
            self.text.push(cell);
            self.input_positions.push(position);
        }
    }
}

/// Engine with positional output
pub trait TranslationEngine: Send + Sync {
    /// Translate one unit of text
    fn translate(&self, request: &EngineRequest<'_>) -> Result<EngineOutput, BoxError>;
}

/// Engine mapping strings to strings.
///
/// Implementations must keep `SOFT_HYPHEN`, `ZERO_WIDTH_SPACE` and
/// whitespace of the input in their output.
pub trait StringFilter: Send + Sync {
    /// Translate `text`
    fn filter(&self, text: &str) -> Result<String, BoxError>;
}
