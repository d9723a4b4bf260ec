//! Backend for string based engines

use super::BrailleFilter;
use crate::batch::{ContextWindow, FragmentPreparer, SegmentBatcher};
use crate::config::FilterConfig;
use crate::engine::StringFilter;
use crate::error::{Result, TranslationError};
use crate::fragment::TranslatableWithContext;
use crate::hyphenation::{HyphenatorCache, HyphenatorProvider};
use crate::marker::MarkerContextProcessor;
use std::sync::Arc;
use tracing::debug;

/// Filter delegating translation to a [`StringFilter`].
///
/// Styles are turned into inline markers by an optional
/// [`MarkerContextProcessor`]; hyphenated text, markers included, is passed
/// to the string filter unit by unit.
pub struct DelegatingFilter {
    config: FilterConfig,
    hyphenators: HyphenatorCache,
    string_filter: Arc<dyn StringFilter>,
    markers: Option<Arc<dyn MarkerContextProcessor>>,
}

impl DelegatingFilter {
    /// Create a filter
    pub fn new(
        config: FilterConfig,
        hyphenators: Arc<dyn HyphenatorProvider>,
        string_filter: Arc<dyn StringFilter>,
    ) -> Self {
        Self {
            config,
            hyphenators: HyphenatorCache::new(hyphenators),
            string_filter,
            markers: None,
        }
    }

    /// Insert style markers with `processor`
    pub fn with_markers(mut self, processor: Arc<dyn MarkerContextProcessor>) -> Self {
        self.markers = Some(processor);
        self
    }

    /// Configuration of this filter
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

impl BrailleFilter for DelegatingFilter {
    fn filter_with_context(&self, request: &TranslatableWithContext) -> Result<String> {
        if request.current().is_empty() {
            return Ok(String::new());
        }

        let mut window = ContextWindow::resolve(request);
        if let (Some(processor), Some(attributes)) = (&self.markers, request.attributes()) {
            window.apply_markers(processor.as_ref(), attributes)?;
        }

        let prepared = FragmentPreparer::new(&self.hyphenators, &self.config.locale)
            .prepare(request.current(), window.into_current())?;
        let units = SegmentBatcher::new().batch(&prepared);

        let mut out = String::new();
        for unit in units.iter().filter(|u| !u.hyphenated.is_empty()) {
            let translated = self
                .string_filter
                .filter(&unit.hyphenated)
                .map_err(TranslationError::Engine)?;
            debug!(
                fragments = unit.fragments.len(),
                input = unit.hyphenated.len(),
                output = translated.len(),
                "translated unit"
            );
            out.push_str(&translated);
        }
        Ok(out)
    }
}

impl std::fmt::Debug for DelegatingFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatingFilter")
            .field("config", &self.config)
            .field("markers", &self.markers.is_some())
            .finish_non_exhaustive()
    }
}
