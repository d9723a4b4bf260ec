//! Attribute linearization
//!
//! Flattens an attribute tree into one bitmask per code point ("type form").
//! Every distinct style name receives its own power of two, so nested styles
//! superimpose without losing information: with `italic = 1` and `bold = 2`
//! a bold run inside italics reads `3`.

use crate::attribute::AttributeSpan;
use std::collections::HashSet;
use std::ops::Range;
use tracing::warn;

/// Maximum number of distinct style ids in one linearization
pub const MAX_STYLES: usize = 62;

/// Style name to bit assignment, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleIdTable {
    entries: Vec<(String, u64)>,
    dropped: Vec<String>,
}

impl StyleIdTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Id previously assigned to `name`
    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    /// Look up `name`, assigning the next unused bit on first sight.
    ///
    /// Returns 0 (unstyled) once the table holds [`MAX_STYLES`] ids; each
    /// dropped name is reported once.
    pub fn assign(&mut self, name: &str) -> u64 {
        if let Some(id) = self.get(name) {
            return id;
        }
        if self.is_full() {
            if !self.dropped.iter().any(|d| d == name) {
                warn!(style = name, capacity = MAX_STYLES, "too many styles, ignoring style");
                self.dropped.push(name.to_string());
            }
            return 0;
        }
        let id = 1u64 << self.entries.len();
        self.entries.push((name.to_string(), id));
        id
    }

    /// Number of assigned ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no id has been assigned
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether further styles will be dropped
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_STYLES
    }

    /// Assigned `(name, id)` pairs in assignment order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(n, id)| (n.as_str(), *id))
    }

    /// Names of the styles set in `mask`
    pub fn names(&self, mask: u64) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |(_, id)| mask & id != 0)
            .map(|(n, _)| n)
    }
}

/// Result of a linearization: per code point masks plus the table that
/// gives the bits their meaning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearAttributes {
    values: Vec<u64>,
    styles: StyleIdTable,
}

impl LinearAttributes {
    /// All-zero masks for an unstyled text of `len` code points
    pub fn unstyled(len: usize) -> Self {
        Self {
            values: vec![0; len],
            styles: StyleIdTable::new(),
        }
    }

    /// Per code point masks
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Style table used to assign the bits
    pub fn styles(&self) -> &StyleIdTable {
        &self.styles
    }

    /// Number of code points covered
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no code point is covered
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every mask is zero
    pub fn is_unstyled(&self) -> bool {
        self.values.iter().all(|v| *v == 0)
    }

    /// Masks for a sub-range of code points, sharing the style table.
    ///
    /// The range is clamped to the covered length.
    pub fn slice(&self, range: Range<usize>) -> LinearAttributes {
        let end = range.end.min(self.values.len());
        let start = range.start.min(end);
        LinearAttributes {
            values: self.values[start..end].to_vec(),
            styles: self.styles.clone(),
        }
    }
}

/// Linearize `tree`, ignoring the style names in `excluded`.
///
/// The result has exactly `tree.width()` entries.
pub fn linearize(tree: &AttributeSpan, excluded: &HashSet<String>) -> LinearAttributes {
    let mut styles = StyleIdTable::new();
    let mut values = vec![0u64; tree.width()];
    fill(tree, 0, 0, excluded, &mut styles, &mut values);
    LinearAttributes { values, styles }
}

fn fill(
    span: &AttributeSpan,
    offset: usize,
    inherited: u64,
    excluded: &HashSet<String>,
    styles: &mut StyleIdTable,
    out: &mut [u64],
) {
    let id = match span.style() {
        Some(name) if !excluded.contains(name) => styles.assign(name),
        _ => 0,
    };
    let mask = inherited | id;

    if span.has_children() {
        for (child_offset, child) in span.children_with_offsets() {
            fill(child, offset + child_offset, mask, excluded, styles, out);
        }
    } else {
        let end = (offset + span.width()).min(out.len());
        out[offset.min(end)..end].fill(mask);
    }
}
