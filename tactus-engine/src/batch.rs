//! Fragment preparation and batching
//!
//! A request is processed in three steps:
//!
//! 1. [`ContextWindow`] resolves the texts of the request (peeking at the
//!    following context) and applies context-wide operations once: style
//!    markers or attribute linearization.
//! 2. [`FragmentPreparer`] folds case and hyphenates every fragment on its
//!    own, then restores breaks that only show up across fragment edges.
//! 3. [`SegmentBatcher`] merges consecutive fragments with identical
//!    settings into [`TranslationUnit`]s, one engine call each.

use crate::error::{Result, TranslationError};
use crate::fragment::{Fragment, TranslatableWithContext};
use crate::hyphenation::HyphenatorCache;
use crate::locale::normalize_locale;
use crate::marker::MarkerContextProcessor;
use std::collections::HashSet;
use std::ops::Range;
use tactus_core::{
    align, is_marker, linearize, AttributeSpan, Breakpoint, CaseFolder, LinearAttributes,
    SOFT_HYPHEN,
};
use tracing::{debug, trace};

/// Resolved texts of a request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow {
    preceding: Vec<String>,
    current: Vec<String>,
    following: Vec<String>,
}

impl ContextWindow {
    /// Resolve preceding and current fragments; peek at following ones
    pub fn resolve(request: &TranslatableWithContext) -> Self {
        Self {
            preceding: request
                .preceding()
                .iter()
                .map(|f| f.text().resolve())
                .collect(),
            current: request
                .current()
                .iter()
                .map(|f| f.text().resolve())
                .collect(),
            following: request
                .following()
                .iter()
                .map(|f| f.text().peek())
                .collect(),
        }
    }

    /// Window over already resolved texts
    pub fn from_texts(preceding: Vec<String>, current: Vec<String>, following: Vec<String>) -> Self {
        Self {
            preceding,
            current,
            following,
        }
    }

    /// Texts to translate
    pub fn current(&self) -> &[String] {
        &self.current
    }

    /// Consume the window, keeping the texts to translate
    pub fn into_current(self) -> Vec<String> {
        self.current
    }

    /// Code points before the current texts
    pub fn preceding_width(&self) -> usize {
        width(&self.preceding)
    }

    /// Code points of preceding, current and following texts
    pub fn total_width(&self) -> usize {
        width(&self.preceding) + width(&self.current) + width(&self.following)
    }

    fn check_width(&self, attributes: &AttributeSpan) -> Result<()> {
        let expected = self.total_width();
        if attributes.width() != expected {
            return Err(TranslationError::AttributeWidth {
                expected,
                actual: attributes.width(),
            });
        }
        Ok(())
    }

    /// Run `processor` once over the whole window and replace the current
    /// texts with its output
    pub fn apply_markers(
        &mut self,
        processor: &dyn MarkerContextProcessor,
        attributes: &AttributeSpan,
    ) -> Result<()> {
        self.check_width(attributes)?;
        let processed = processor
            .process(attributes, &self.preceding, &self.current, &self.following)
            .map_err(TranslationError::MarkerProcessing)?;
        if processed.len() != self.current.len() {
            return Err(TranslationError::MarkerProcessing(
                format!(
                    "processor returned {} texts for {} fragments",
                    processed.len(),
                    self.current.len()
                )
                .into(),
            ));
        }
        self.current = processed;
        Ok(())
    }

    /// Linearize `attributes` and keep the masks of the current texts.
    ///
    /// Offsets of the result are relative to the first current code point.
    pub fn linearize(
        &self,
        attributes: &AttributeSpan,
        excluded: &HashSet<String>,
    ) -> Result<LinearAttributes> {
        self.check_width(attributes)?;
        let start = self.preceding_width();
        let end = start + width(&self.current);
        Ok(linearize(attributes, excluded).slice(start..end))
    }
}

fn width(texts: &[String]) -> usize {
    texts.iter().map(|t| t.chars().count()).sum()
}

/// A fragment after case folding and hyphenation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedFragment {
    /// Case folded text
    pub text: String,
    /// `text` with break markers; equal to `text` when not hyphenating
    pub hyphenated: String,
    /// Explicit locale of the fragment
    pub locale: Option<String>,
    /// Whether the fragment is hyphenated
    pub hyphenate: bool,
    /// Whether capitals are marked
    pub mark_capitals: bool,
}

impl PreparedFragment {
    fn same_settings(&self, other: &PreparedFragment) -> bool {
        self.locale == other.locale
            && self.hyphenate == other.hyphenate
            && self.mark_capitals == other.mark_capitals
    }
}

/// Folds and hyphenates fragments
pub struct FragmentPreparer<'a> {
    hyphenators: &'a HyphenatorCache,
    default_locale: &'a str,
}

impl<'a> FragmentPreparer<'a> {
    /// Preparer using `hyphenators`, with `default_locale` for fragments
    /// without a locale
    pub fn new(hyphenators: &'a HyphenatorCache, default_locale: &'a str) -> Self {
        Self {
            hyphenators,
            default_locale,
        }
    }

    fn locale_of<'f>(&'f self, fragment: &'f PreparedFragment) -> &'f str {
        fragment.locale.as_deref().unwrap_or(self.default_locale)
    }

    /// Prepare `fragments` whose resolved texts are `texts`
    pub fn prepare(&self, fragments: &[Fragment], texts: Vec<String>) -> Result<Vec<PreparedFragment>> {
        let mut prepared = fragments
            .iter()
            .zip(texts)
            .map(|(fragment, text)| self.prepare_one(fragment, &text))
            .collect::<Result<Vec<_>>>()?;
        self.restore_edge_breaks(&mut prepared)?;
        Ok(prepared)
    }

    fn prepare_one(&self, fragment: &Fragment, text: &str) -> Result<PreparedFragment> {
        let folded = CaseFolder::new(fragment.mark_capitals()).fold(text).into_owned();
        let locale = fragment.locale().map(str::to_string);

        let hyphenated = if fragment.hyphenate() && folded.chars().nth(1).is_some() {
            let locale = locale.as_deref().unwrap_or(self.default_locale);
            self.hyphenators.get(locale)?.hyphenate(&folded)
        } else {
            folded.clone()
        };

        Ok(PreparedFragment {
            text: folded,
            hyphenated,
            locale,
            hyphenate: fragment.hyphenate(),
            mark_capitals: fragment.mark_capitals(),
        })
    }

    /// Add soft hyphens at fragment edges that split a word.
    ///
    /// A word split over two fragments is hyphenated once more as a whole;
    /// when that yields a soft hyphen exactly at the edge, one is appended
    /// to the first fragment.
    fn restore_edge_breaks(&self, prepared: &mut [PreparedFragment]) -> Result<()> {
        for i in 1..prepared.len() {
            let (head, tail) = prepared.split_at_mut(i);
            let (left, right) = (&mut head[i - 1], &tail[0]);

            let locale = normalize_locale(self.locale_of(left));
            if !left.hyphenate
                || !right.hyphenate
                || locale != normalize_locale(self.locale_of(right))
            {
                continue;
            }
            let left_word = trailing_word(&left.text);
            let right_word = leading_word(&right.text);
            if left_word.is_empty() || right_word.is_empty() {
                continue;
            }

            let word = format!("{left_word}{right_word}");
            let hyphenated = self.hyphenators.get(&locale)?.hyphenate(&word);
            let breaks = align(&word, &hyphenated)?;
            let edge = left_word.chars().count() - 1;
            if breaks.get(edge) == Some(&Breakpoint::SoftHyphen)
                && !left.hyphenated.ends_with(SOFT_HYPHEN)
            {
                trace!(word = %word, edge, "break across fragment edge");
                left.hyphenated.push(SOFT_HYPHEN);
            }
        }
        Ok(())
    }
}

fn trailing_word(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphabetic())
        .last()
        .map_or(text.len(), |(i, _)| i);
    &text[start..]
}

fn leading_word(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_alphabetic())
        .map_or(text.len(), |(i, _)| i);
    &text[..end]
}

/// Consecutive fragments sharing settings, translated in one engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationUnit {
    /// Concatenated case folded text
    pub text: String,
    /// Concatenated hyphenated text
    pub hyphenated: String,
    /// Explicit locale shared by the fragments
    pub locale: Option<String>,
    /// Whether the fragments are hyphenated
    pub hyphenate: bool,
    /// Whether capitals are marked
    pub mark_capitals: bool,
    /// Indices of the fragments in the request
    pub fragments: Range<usize>,
    /// Code point range of `text` within the concatenated current texts
    pub span: Range<usize>,
}

impl TranslationUnit {
    fn start(fragment: &PreparedFragment, index: usize, offset: usize) -> Self {
        let len = fragment.text.chars().count();
        Self {
            text: fragment.text.clone(),
            hyphenated: fragment.hyphenated.clone(),
            locale: fragment.locale.clone(),
            hyphenate: fragment.hyphenate,
            mark_capitals: fragment.mark_capitals,
            fragments: index..index + 1,
            span: offset..offset + len,
        }
    }

    fn extend(&mut self, fragment: &PreparedFragment) {
        self.text.push_str(&fragment.text);
        self.hyphenated.push_str(&fragment.hyphenated);
        self.fragments.end += 1;
        self.span.end += fragment.text.chars().count();
    }

    /// Break classes of the unit's gaps
    pub fn breakpoints(&self) -> Result<Vec<Breakpoint>> {
        if !self.hyphenate {
            return Ok(Vec::new());
        }
        Ok(align(&self.text, &self.hyphenated)?)
    }

    /// Class of the break markers the hyphenator left after the unit's last
    /// character.
    ///
    /// There is no gap inside the unit to carry them, so the backend emits
    /// this break after the unit's output.
    pub fn trailing_break(&self) -> Breakpoint {
        if !self.hyphenate {
            return Breakpoint::None;
        }
        let inserted = self.hyphenated.chars().rev().take_while(|c| is_marker(*c)).count();
        let present = self.text.chars().rev().take_while(|c| is_marker(*c)).count();
        if inserted <= present {
            return Breakpoint::None;
        }
        self.hyphenated
            .chars()
            .rev()
            .map_while(Breakpoint::from_marker)
            .fold(Breakpoint::None, Breakpoint::merge)
    }
}

/// Groups prepared fragments into translation units
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmentBatcher;

impl SegmentBatcher {
    /// Create a batcher
    pub fn new() -> Self {
        Self
    }

    /// Merge runs of fragments with equal locale, hyphenation and
    /// capital settings, preserving order
    pub fn batch(&self, fragments: &[PreparedFragment]) -> Vec<TranslationUnit> {
        let mut units: Vec<TranslationUnit> = Vec::new();
        let mut offset = 0;
        let mut previous: Option<&PreparedFragment> = None;

        for (index, fragment) in fragments.iter().enumerate() {
            match (units.last_mut(), previous) {
                (Some(unit), Some(prev)) if prev.same_settings(fragment) => unit.extend(fragment),
                _ => units.push(TranslationUnit::start(fragment, index, offset)),
            }
            offset += fragment.text.chars().count();
            previous = Some(fragment);
        }

        debug!(fragments = fragments.len(), units = units.len(), "batched fragments");
        units
    }
}
