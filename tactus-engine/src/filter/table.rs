//! Backend for engines with positional output

use super::BrailleFilter;
use crate::batch::{ContextWindow, FragmentPreparer, SegmentBatcher};
use crate::config::FilterConfig;
use crate::engine::{EngineRequest, TranslationEngine};
use crate::error::{Result, TranslationError};
use crate::fragment::TranslatableWithContext;
use crate::hyphenation::{HyphenatorCache, HyphenatorProvider};
use std::sync::Arc;
use tactus_core::reassemble;
use tracing::debug;

/// Filter driving a [`TranslationEngine`].
///
/// Styles are linearized into per character masks and breaks into per gap
/// classes; the engine output is reassembled so that whitespace and break
/// markers of the input reappear in the result.
pub struct TableFilter {
    config: FilterConfig,
    hyphenators: HyphenatorCache,
    engine: Arc<dyn TranslationEngine>,
}

impl TableFilter {
    /// Create a filter
    pub fn new(
        config: FilterConfig,
        hyphenators: Arc<dyn HyphenatorProvider>,
        engine: Arc<dyn TranslationEngine>,
    ) -> Self {
        Self {
            config,
            hyphenators: HyphenatorCache::new(hyphenators),
            engine,
        }
    }

    /// Configuration of this filter
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

impl BrailleFilter for TableFilter {
    fn filter_with_context(&self, request: &TranslatableWithContext) -> Result<String> {
        if request.current().is_empty() {
            return Ok(String::new());
        }

        let window = ContextWindow::resolve(request);
        let styles = request
            .attributes()
            .map(|attributes| window.linearize(attributes, &self.config.excluded_styles))
            .transpose()?;

        let prepared = FragmentPreparer::new(&self.hyphenators, &self.config.locale)
            .prepare(request.current(), window.into_current())?;
        let units = SegmentBatcher::new().batch(&prepared);

        let mut out = String::new();
        for unit in units.iter().filter(|u| !u.text.is_empty()) {
            let breakpoints = unit.breakpoints()?;
            let unit_styles = styles.as_ref().map(|s| s.slice(unit.span.clone()));
            let output = self
                .engine
                .translate(&EngineRequest {
                    text: &unit.text,
                    styles: unit_styles.as_ref(),
                    breakpoints: &breakpoints,
                })
                .map_err(TranslationError::Engine)?;
            debug!(
                fragments = unit.fragments.len(),
                input = unit.text.len(),
                output = output.text.len(),
                "translated unit"
            );
            out.push_str(&reassemble(
                &unit.text,
                &output.text,
                &output.input_positions,
                &breakpoints,
            )?);
            if let Some(marker) = unit.trailing_break().marker() {
                out.push(marker);
            }
        }
        Ok(out)
    }
}

impl std::fmt::Debug for TableFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableFilter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineOutput;
    use crate::error::BoxError;
    use crate::fragment::{Fragment, Translatable};
    use crate::hyphenation::{HyphenatorRegistry, PatternHyphenator};
    use std::sync::Mutex;
    use tactus_core::{AttributeSpan, CoreError};

    /// Maps each character to itself in upper case, dropping spaces, and
    /// records the style masks it receives
    #[derive(Default)]
    struct Upper {
        masks: Mutex<Vec<Vec<u64>>>,
    }

    impl TranslationEngine for Upper {
        fn translate(&self, request: &EngineRequest<'_>) -> std::result::Result<EngineOutput, BoxError> {
            if let Some(styles) = request.styles {
                self.masks.lock().unwrap().push(styles.values().to_vec());
            }
            let mut output = EngineOutput::empty();
            for (i, ch) in request.text.chars().enumerate() {
                if ch != ' ' {
                    output.push(ch.to_uppercase(), i);
                }
            }
            Ok(output)
        }
    }

    /// Returns a broken index map
    struct Broken;

    impl TranslationEngine for Broken {
        fn translate(&self, _request: &EngineRequest<'_>) -> std::result::Result<EngineOutput, BoxError> {
            Ok(EngineOutput {
                text: "⠁".to_string(),
                input_positions: vec![],
            })
        }
    }

    fn registry() -> Arc<HyphenatorRegistry> {
        let hyphenator = PatternHyphenator::parse("hy3ph he2n hena4 hen5at 1na n2at 1tio 2io").unwrap();
        Arc::new(HyphenatorRegistry::new().with("en", Arc::new(hyphenator)))
    }

    fn filter(engine: Arc<dyn TranslationEngine>) -> TableFilter {
        TableFilter::new(FilterConfig::default(), registry(), engine)
    }

    #[test]
    fn test_breaks_and_spaces_are_restored() {
        let result = filter(Arc::new(Upper::default()))
            .filter(&Translatable::new("a hyphenation"))
            .unwrap();
        assert_eq!(result, "A HY\u{00AD}PHEN\u{00AD}ATION");
    }

    #[test]
    fn test_styles_are_sliced_per_unit() {
        let engine = Arc::new(Upper::default());
        let attributes = AttributeSpan::builder()
            .add(AttributeSpan::styled("em", 3))
            .add(AttributeSpan::styled("strong", 2))
            .build(5)
            .unwrap();
        let request = TranslatableWithContext::new(vec![
            Fragment::new("ab").with_hyphenate(false),
            Fragment::new("cd").with_locale("sv").with_hyphenate(false),
        ])
        .with_preceding(vec![Fragment::new("x")])
        .with_attributes(attributes);

        let result = filter(engine.clone()).filter_with_context(&request).unwrap();
        assert_eq!(result, "ABCD");
        assert_eq!(*engine.masks.lock().unwrap(), vec![vec![1, 1], vec![2, 2]]);
    }

    #[test]
    fn test_excluded_styles_are_unstyled() {
        let engine = Arc::new(Upper::default());
        let config = FilterConfig::builder().exclude_style("em").build().unwrap();
        let filter = TableFilter::new(config, registry(), engine.clone());
        let request = Translatable::new("ab")
            .with_hyphenate(false)
            .with_attributes(AttributeSpan::styled("em", 2));

        filter.filter(&request).unwrap();
        assert_eq!(*engine.masks.lock().unwrap(), vec![vec![0, 0]]);
    }

    #[test]
    fn test_attribute_width_mismatch() {
        let request = Translatable::new("abc").with_attributes(AttributeSpan::plain(2));
        let err = filter(Arc::new(Upper::default())).filter(&request).unwrap_err();
        assert!(matches!(err, TranslationError::AttributeWidth { .. }));
    }

    #[test]
    fn test_broken_index_map() {
        let err = filter(Arc::new(Broken))
            .filter(&Translatable::new("a").with_hyphenate(false))
            .unwrap_err();
        assert!(matches!(
            err,
            TranslationError::Core(CoreError::InvalidIndexMap { .. })
        ));
    }
}
