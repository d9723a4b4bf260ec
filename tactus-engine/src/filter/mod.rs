//! Braille filters
//!
//! A filter takes text with its settings and returns braille in which the
//! input's whitespace and break opportunities survive. Two backends share
//! the same preparation: [`DelegatingFilter`] for string based engines and
//! [`TableFilter`] for engines with positional output.

mod delegating;
mod table;

pub use delegating::DelegatingFilter;
pub use table::TableFilter;

use crate::error::Result;
use crate::fragment::{Translatable, TranslatableWithContext};

/// Text to braille filter
pub trait BrailleFilter: Send + Sync {
    /// Translate a single text
    fn filter(&self, translatable: &Translatable) -> Result<String> {
        if translatable.text().is_empty() {
            return Ok(String::new());
        }
        self.filter_with_context(&translatable.to_context())
    }

    /// Translate the current fragments of a request.
    ///
    /// Returns an empty string, without calling any collaborator, when the
    /// request has no current fragments.
    fn filter_with_context(&self, request: &TranslatableWithContext) -> Result<String>;
}
