//! Filter factory keyed by locale and translation mode

use crate::config::FilterConfig;
use crate::engine::{StringFilter, TranslationEngine};
use crate::error::{Result, TranslationError};
use crate::filter::{BrailleFilter, DelegatingFilter, TableFilter};
use crate::hyphenation::HyphenatorProvider;
use crate::locale::{fallback_chain, normalize_locale};
use crate::marker::MarkerContextProcessor;
use crate::table::CharTable;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Locale and translation mode a filter is registered for
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TranslatorSpecification {
    locale: String,
    mode: String,
}

impl TranslatorSpecification {
    /// Create a specification; the locale is normalized
    pub fn new(locale: &str, mode: &str) -> Self {
        Self {
            locale: normalize_locale(locale),
            mode: mode.trim().to_lowercase(),
        }
    }

    /// Locale tag
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translation mode
    pub fn mode(&self) -> &str {
        &self.mode
    }
}

impl fmt::Display for TranslatorSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.locale, self.mode)
    }
}

/// How a registered filter translates
#[derive(Clone)]
pub enum Backend {
    /// String based engine with optional style markers
    Delegating {
        /// The engine
        filter: Arc<dyn StringFilter>,
        /// Style marker processor
        markers: Option<Arc<dyn MarkerContextProcessor>>,
    },
    /// Engine with positional output
    Table {
        /// The engine
        engine: Arc<dyn TranslationEngine>,
        /// Styles the engine should not see
        excluded_styles: HashSet<String>,
    },
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Delegating { markers, .. } => f
                .debug_struct("Delegating")
                .field("markers", &markers.is_some())
                .finish_non_exhaustive(),
            Backend::Table {
                excluded_styles, ..
            } => f
                .debug_struct("Table")
                .field("excluded_styles", excluded_styles)
                .finish_non_exhaustive(),
        }
    }
}

/// Creates filters for registered specifications
pub struct FilterFactory {
    hyphenators: Arc<dyn HyphenatorProvider>,
    entries: Vec<(TranslatorSpecification, Backend)>,
}

impl FilterFactory {
    /// Create a factory whose filters hyphenate with `hyphenators`
    pub fn new(hyphenators: Arc<dyn HyphenatorProvider>) -> Self {
        Self {
            hyphenators,
            entries: Vec::new(),
        }
    }

    /// Register `backend` for `spec`, replacing an earlier registration
    pub fn register(mut self, spec: TranslatorSpecification, backend: Backend) -> Self {
        self.entries.retain(|(existing, _)| *existing != spec);
        debug!(spec = %spec, "registered filter");
        self.entries.push((spec, backend));
        self
    }

    /// Register `table` under its own locale and mode, once per backend.
    ///
    /// The table backend is registered as is; the string backend under the
    /// mode suffixed with `-markers`, using the table's emphasis indicators
    /// as inline markers.
    pub fn register_table(self, table: CharTable) -> Self {
        let table = Arc::new(table);
        let spec = TranslatorSpecification::new(table.locale(), table.mode());
        let marker_spec = TranslatorSpecification::new(
            table.locale(),
            &format!("{}-markers", table.mode()),
        );
        let markers: Arc<dyn MarkerContextProcessor> = Arc::new(table.style_markers());

        self.register(
            spec,
            Backend::Table {
                engine: table.clone(),
                excluded_styles: HashSet::new(),
            },
        )
        .register(
            marker_spec,
            Backend::Delegating {
                filter: table,
                markers: Some(markers),
            },
        )
    }

    /// Registered specifications in registration order
    pub fn specifications(&self) -> impl Iterator<Item = &TranslatorSpecification> {
        self.entries.iter().map(|(spec, _)| spec)
    }

    /// Whether a filter is registered for `locale` and `mode`
    pub fn supports(&self, locale: &str, mode: &str) -> bool {
        self.lookup(locale, mode).is_some()
    }

    /// Find the registration for `locale`, falling back to more general
    /// tags
    fn lookup(&self, locale: &str, mode: &str) -> Option<&(TranslatorSpecification, Backend)> {
        fallback_chain(locale).into_iter().find_map(|candidate| {
            let wanted = TranslatorSpecification::new(&candidate, mode);
            self.entries.iter().find(|(spec, _)| *spec == wanted)
        })
    }

    /// Create a filter for `locale` and `mode`
    pub fn new_filter(&self, locale: &str, mode: &str) -> Result<Box<dyn BrailleFilter>> {
        let (spec, backend) = self.lookup(locale, mode).ok_or_else(|| {
            TranslationError::UnsupportedSpecification {
                locale: locale.to_string(),
                mode: mode.to_string(),
            }
        })?;

        // Hyphenation uses the requested tag, not the one the table matched
        let config = FilterConfig::builder().locale(&normalize_locale(locale));
        let filter: Box<dyn BrailleFilter> = match backend {
            Backend::Delegating { filter, markers } => {
                let delegating = DelegatingFilter::new(
                    config.build()?,
                    Arc::clone(&self.hyphenators),
                    Arc::clone(filter),
                );
                match markers {
                    Some(markers) => Box::new(delegating.with_markers(Arc::clone(markers))),
                    None => Box::new(delegating),
                }
            }
            Backend::Table {
                engine,
                excluded_styles,
            } => Box::new(TableFilter::new(
                config.exclude_styles(excluded_styles.iter().cloned()).build()?,
                Arc::clone(&self.hyphenators),
                Arc::clone(engine),
            )),
        };
        debug!(spec = %spec, "created filter");
        Ok(filter)
    }
}

impl fmt::Debug for FilterFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterFactory")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Translatable;
    use crate::hyphenation::HyphenatorRegistry;
    use tactus_core::AttributeSpan;

    fn factory() -> FilterFactory {
        let registry = Arc::new(HyphenatorRegistry::builtin().unwrap());
        FilterFactory::new(registry).register_table(CharTable::builtin().unwrap())
    }

    #[test]
    fn test_specifications() {
        let factory = factory();
        let specs: Vec<String> = factory.specifications().map(|s| s.to_string()).collect();
        assert_eq!(specs, vec!["en (uncontracted)", "en (uncontracted-markers)"]);
        assert!(factory.supports("EN", "Uncontracted"));
        assert!(factory.supports("en_GB", "uncontracted-markers"));
        assert!(!factory.supports("sv", "uncontracted"));
        assert!(!factory.supports("en", "grade2"));
    }

    #[test]
    fn test_unsupported_specification() {
        let err = factory().new_filter("sv", "uncontracted").err().unwrap();
        assert!(matches!(err, TranslationError::UnsupportedSpecification { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_backends_agree_on_emphasis() {
        let factory = factory();
        let request = Translatable::new("Hi")
            .with_hyphenate(false)
            .with_attributes(AttributeSpan::styled("em", 2));

        let table = factory.new_filter("en", "uncontracted").unwrap();
        let delegating = factory.new_filter("en", "uncontracted-markers").unwrap();

        let expected = "⠨⠶⠠⠓⠊⠨⠄";
        assert_eq!(table.filter(&request).unwrap(), expected);
        assert_eq!(delegating.filter(&request).unwrap(), expected);
    }

    #[test]
    fn test_reregistering_replaces() {
        let factory = factory().register_table(CharTable::builtin().unwrap());
        assert_eq!(factory.specifications().count(), 2);
    }
}
