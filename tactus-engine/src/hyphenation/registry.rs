//! Caller constructed hyphenator registry

use super::{Hyphenator, HyphenatorProvider, PatternHyphenator};
use crate::error::{Result, TranslationError};
use crate::locale::{fallback_chain, normalize_locale};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Patterns bundled with the crate
const BUILTIN_EN: &str = include_str!("../../configs/hyphenation/en.pat");

/// Hyphenators registered by locale.
///
/// Lookups fall back from specific to general tags, so a hyphenator
/// registered for `en` also serves `en-US`.
#[derive(Clone, Default)]
pub struct HyphenatorRegistry {
    entries: BTreeMap<String, Arc<dyn Hyphenator>>,
}

impl HyphenatorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled English patterns
    pub fn builtin() -> Result<Self> {
        let english = PatternHyphenator::parse(BUILTIN_EN)?;
        Ok(Self::new().with("en", Arc::new(english)))
    }

    /// Register `hyphenator` for `locale`, replacing any previous entry
    pub fn register(&mut self, locale: &str, hyphenator: Arc<dyn Hyphenator>) {
        self.entries.insert(normalize_locale(locale), hyphenator);
    }

    /// Builder style [`register`](Self::register)
    pub fn with(mut self, locale: &str, hyphenator: Arc<dyn Hyphenator>) -> Self {
        self.register(locale, hyphenator);
        self
    }

    /// Load a pattern file and register it for `locale`
    pub fn register_patterns(&mut self, locale: &str, path: impl AsRef<Path>) -> Result<()> {
        let hyphenator = PatternHyphenator::from_path(path)?;
        self.register(locale, Arc::new(hyphenator));
        Ok(())
    }

    /// Registered locales in sorted order
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Whether a lookup for `locale` would succeed
    pub fn supports(&self, locale: &str) -> bool {
        fallback_chain(locale)
            .iter()
            .any(|candidate| self.entries.contains_key(candidate))
    }
}

impl HyphenatorProvider for HyphenatorRegistry {
    fn new_hyphenator(&self, locale: &str) -> Result<Arc<dyn Hyphenator>> {
        fallback_chain(locale)
            .iter()
            .find_map(|candidate| self.entries.get(candidate))
            .map(Arc::clone)
            .ok_or_else(|| TranslationError::HyphenatorUnavailable {
                locale: locale.to_string(),
                reason: "no hyphenator registered".to_string(),
            })
    }
}

impl std::fmt::Debug for HyphenatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}
