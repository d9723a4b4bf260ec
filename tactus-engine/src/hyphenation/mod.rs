//! Hyphenation collaborators and their per-filter cache
//!
//! A [`Hyphenator`] inserts break markers into text. Hyphenators are built
//! per locale by a [`HyphenatorProvider`]; every filter keeps a
//! [`HyphenatorCache`] so that each locale is built at most once for the
//! filter's lifetime.

mod patterns;
mod registry;

pub use patterns::PatternHyphenator;
pub use registry::HyphenatorRegistry;

use crate::error::Result;
use crate::locale::normalize_locale;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Inserts break markers into text.
///
/// The output must equal the input once every `SOFT_HYPHEN` and
/// `ZERO_WIDTH_SPACE` is removed.
pub trait Hyphenator: Send + Sync {
    /// Return `text` with break markers inserted
    fn hyphenate(&self, text: &str) -> String;
}

/// Builds hyphenators for locales
pub trait HyphenatorProvider: Send + Sync {
    /// Build a hyphenator for `locale`.
    ///
    /// Fails with [`TranslationError::HyphenatorUnavailable`] when the
    /// locale is not supported.
    ///
    /// [`TranslationError::HyphenatorUnavailable`]: crate::TranslationError::HyphenatorUnavailable
    fn new_hyphenator(&self, locale: &str) -> Result<Arc<dyn Hyphenator>>;
}

/// Locale keyed hyphenator cache.
///
/// Concurrent lookups of a missing locale may both build a hyphenator; the
/// first one stored wins. Build failures are returned and not cached.
pub struct HyphenatorCache {
    provider: Arc<dyn HyphenatorProvider>,
    entries: RwLock<HashMap<String, Arc<dyn Hyphenator>>>,
}

impl HyphenatorCache {
    /// Create an empty cache backed by `provider`
    pub fn new(provider: Arc<dyn HyphenatorProvider>) -> Self {
        Self {
            provider,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Hyphenator for `locale`, building it on first use
    pub fn get(&self, locale: &str) -> Result<Arc<dyn Hyphenator>> {
        let key = normalize_locale(locale);
        if let Some(found) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(found));
        }

        let built = self.provider.new_hyphenator(&key)?;
        debug!(locale = %key, "created hyphenator");

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(key).or_insert(built)))
    }

    /// Number of cached locales
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for HyphenatorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyphenatorCache")
            .field("cached", &self.len())
            .finish_non_exhaustive()
    }
}
