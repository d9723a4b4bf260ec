//! Output formatting module

use anyhow::Result;
use serde::Serialize;

/// One translated document
#[derive(Debug, Clone, Serialize)]
pub struct TranslatedDocument {
    /// Where the text came from
    pub source: String,
    /// Print text as read
    pub text: String,
    /// Braille produced for it
    pub braille: String,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single document
    fn format_document(&mut self, document: &TranslatedDocument) -> Result<()>;

    /// Finalize output (e.g., close the JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
