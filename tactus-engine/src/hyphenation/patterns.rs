//! Liang style pattern hyphenation
//!
//! Patterns use the TeX notation: letters interleaved with digits, where the
//! digit between two letters is the priority of a break at that point and
//! `.` anchors a pattern to a word edge. `hy3ph` allows a break between `y`
//! and `p`. Every pattern matching a word contributes its digits; the
//! maximum per gap wins, and odd values allow a break.
//!
//! Tokens containing `-` are exceptions that list the breaks of one word
//! explicitly, for example `ta-ble`.

use super::Hyphenator;
use crate::error::{Result, TranslationError};
use std::collections::HashMap;
use std::path::Path;
use tactus_core::{SOFT_HYPHEN, ZERO_WIDTH_SPACE};

const DEFAULT_MIN_PREFIX: usize = 2;
const DEFAULT_MIN_SUFFIX: usize = 2;

/// Pattern based hyphenator
#[derive(Debug, Clone, Default)]
pub struct PatternHyphenator {
    patterns: HashMap<String, Vec<u8>>,
    exceptions: HashMap<String, Vec<usize>>,
    max_pattern_chars: usize,
    min_prefix: usize,
    min_suffix: usize,
}

impl PatternHyphenator {
    /// Parse patterns and exceptions.
    ///
    /// Tokens are separated by whitespace; `%` starts a comment that runs to
    /// the end of the line.
    pub fn parse(source: &str) -> Result<Self> {
        let mut hyphenator = Self {
            min_prefix: DEFAULT_MIN_PREFIX,
            min_suffix: DEFAULT_MIN_SUFFIX,
            ..Self::default()
        };

        for (line_number, line) in source.lines().enumerate() {
            let content = line.split('%').next().unwrap_or_default();
            for token in content.split_whitespace() {
                if token.contains('-') {
                    hyphenator.add_exception(token);
                } else {
                    hyphenator
                        .add_pattern(token)
                        .map_err(|reason| {
                            TranslationError::Configuration(format!(
                                "line {}: {reason}",
                                line_number + 1
                            ))
                        })?;
                }
            }
        }

        Ok(hyphenator)
    }

    /// Load patterns from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&source)
    }

    /// Minimum number of letters before the first break
    pub fn with_min_prefix(mut self, min_prefix: usize) -> Self {
        self.min_prefix = min_prefix.max(1);
        self
    }

    /// Minimum number of letters after the last break
    pub fn with_min_suffix(mut self, min_suffix: usize) -> Self {
        self.min_suffix = min_suffix.max(1);
        self
    }

    /// Number of patterns loaded
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Number of exception words loaded
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    fn add_pattern(&mut self, token: &str) -> std::result::Result<(), String> {
        let mut letters = String::new();
        let mut values = vec![0u8];
        for ch in token.chars() {
            if let Some(digit) = ch.to_digit(10) {
                if let Some(last) = values.last_mut() {
                    *last = digit as u8;
                }
            } else if ch.is_alphabetic() || ch == '.' {
                letters.extend(ch.to_lowercase());
                values.push(0);
            } else {
                return Err(format!("invalid character '{ch}' in pattern '{token}'"));
            }
        }
        if letters.is_empty() {
            return Err(format!("pattern '{token}' has no letters"));
        }
        // Lower casing may expand a letter; keep values in step with letters
        values.resize(letters.chars().count() + 1, 0);
        self.max_pattern_chars = self.max_pattern_chars.max(letters.chars().count());
        self.patterns.insert(letters, values);
        Ok(())
    }

    fn add_exception(&mut self, token: &str) {
        let mut word = String::new();
        let mut breaks = Vec::new();
        let mut count = 0;
        for ch in token.chars() {
            if ch == '-' {
                if count > 0 {
                    breaks.push(count);
                }
            } else {
                word.extend(ch.to_lowercase());
                count += 1;
            }
        }
        breaks.dedup();
        breaks.retain(|&b| b < count);
        self.exceptions.insert(word, breaks);
    }

    /// Break positions of a single word: `i` means a break before the
    /// `i`-th character
    pub fn word_breaks(&self, word: &[char]) -> Vec<usize> {
        let lower: String = word.iter().flat_map(|c| c.to_lowercase()).collect();
        if let Some(breaks) = self.exceptions.get(&lower) {
            return breaks.clone();
        }

        let n = word.len();
        // Pattern matching needs one lower case char per word char
        if lower.chars().count() != n || n < self.min_prefix + self.min_suffix {
            return Vec::new();
        }

        let mut padded = Vec::with_capacity(n + 2);
        padded.push('.');
        padded.extend(lower.chars());
        padded.push('.');

        let mut levels = vec![0u8; padded.len() + 1];
        let mut key = String::new();
        for start in 0..padded.len() {
            key.clear();
            let end = padded.len().min(start + self.max_pattern_chars);
            for &ch in &padded[start..end] {
                key.push(ch);
                if let Some(values) = self.patterns.get(&key) {
                    for (offset, &value) in values.iter().enumerate() {
                        let level = &mut levels[start + offset];
                        *level = (*level).max(value);
                    }
                }
            }
        }

        (self.min_prefix..=n - self.min_suffix)
            .filter(|&i| levels[i + 1] % 2 == 1)
            .collect()
    }
}

fn is_hyphen(ch: char) -> bool {
    matches!(ch, '-' | '\u{2010}')
}

impl Hyphenator for PatternHyphenator {
    fn hyphenate(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len() + text.len() / 4);
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            if !ch.is_alphabetic() {
                out.push(ch);
                // Explicit hyphens between letters break without a new hyphen
                if is_hyphen(ch)
                    && i > 0
                    && chars[i - 1].is_alphabetic()
                    && chars.get(i + 1).is_some_and(|c| c.is_alphabetic())
                {
                    out.push(ZERO_WIDTH_SPACE);
                }
                i += 1;
                continue;
            }

            let start = i;
            while i < chars.len() && (chars[i].is_alphabetic() || chars[i] == SOFT_HYPHEN) {
                i += 1;
            }
            let word = &chars[start..i];

            // Words with author supplied soft hyphens are left alone
            if word.contains(&SOFT_HYPHEN) {
                out.extend(word);
                continue;
            }

            let breaks = self.word_breaks(word);
            let mut next_break = breaks.iter().peekable();
            for (index, &letter) in word.iter().enumerate() {
                if next_break.peek() == Some(&&index) {
                    out.push(SOFT_HYPHEN);
                    next_break.next();
                }
                out.push(letter);
            }
        }

        out
    }
}
