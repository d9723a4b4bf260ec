//! Capital letter handling
//!
//! Braille codes either mark capitals with a dedicated sign or ignore case
//! entirely. When capitals are not marked the text is folded to lower case
//! before translation.

use std::borrow::Cow;

/// Per-character case folding driven by the "mark capitals" flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseFolder {
    mark_capitals: bool,
}

impl CaseFolder {
    /// Create a folder for the given "mark capitals" setting
    pub fn new(mark_capitals: bool) -> Self {
        Self { mark_capitals }
    }

    /// Whether capitals are kept for the translation engine to mark
    pub fn marks_capitals(&self) -> bool {
        self.mark_capitals
    }

    /// Fold a single character.
    ///
    /// Characters whose lower case form spans several code points (for
    /// example `İ`) are returned unchanged so that folding never alters the
    /// code point count of a text.
    pub fn fold_char(&self, ch: char) -> char {
        if self.mark_capitals {
            return ch;
        }
        let mut lower = ch.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(single), None) => single,
            _ => ch,
        }
    }

    /// Fold a text, borrowing it when nothing changes
    pub fn fold<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.mark_capitals || !text.chars().any(|c| self.fold_char(c) != c) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text.chars().map(|c| self.fold_char(c)).collect())
    }
}
