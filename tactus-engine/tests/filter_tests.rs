//! End to end tests of both filter backends

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tactus_engine::*;

/// Counts hyphenator builds and calls; inserts no breaks
#[derive(Default)]
struct CountingHyphenation {
    built: AtomicUsize,
    calls: Arc<AtomicUsize>,
}

struct CountingHyphenator {
    calls: Arc<AtomicUsize>,
}

impl Hyphenator for CountingHyphenator {
    fn hyphenate(&self, text: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        text.to_string()
    }
}

impl HyphenatorProvider for CountingHyphenation {
    fn new_hyphenator(&self, _locale: &str) -> Result<Arc<dyn Hyphenator>> {
        self.built.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(CountingHyphenator {
            calls: Arc::clone(&self.calls),
        }))
    }
}

/// Counts engine calls and translates through the bundled table
struct CountingEngine {
    table: CharTable,
    calls: AtomicUsize,
}

impl CountingEngine {
    fn new() -> Self {
        Self {
            table: CharTable::builtin().unwrap(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl TranslationEngine for CountingEngine {
    fn translate(&self, request: &EngineRequest<'_>) -> std::result::Result<EngineOutput, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table.translate(request)
    }
}

impl StringFilter for CountingEngine {
    fn filter(&self, text: &str) -> std::result::Result<String, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StringFilter::filter(&self.table, text)
    }
}

fn builtin_factory() -> FilterFactory {
    let hyphenators = Arc::new(HyphenatorRegistry::builtin().unwrap());
    FilterFactory::new(hyphenators).register_table(CharTable::builtin().unwrap())
}

#[test]
fn test_empty_input_calls_no_collaborator() {
    let hyphenation = Arc::new(CountingHyphenation::default());
    let engine = Arc::new(CountingEngine::new());

    let table = TableFilter::new(FilterConfig::default(), hyphenation.clone(), engine.clone());
    let delegating =
        DelegatingFilter::new(FilterConfig::default(), hyphenation.clone(), engine.clone());
    let filters: [&dyn BrailleFilter; 2] = [&table, &delegating];

    for filter in filters {
        assert_eq!(filter.filter(&Translatable::new("")).unwrap(), "");
        let empty = TranslatableWithContext::new(vec![])
            .with_preceding(vec![Fragment::new("before")])
            .with_following(vec![Fragment::new("after")]);
        assert_eq!(filter.filter_with_context(&empty).unwrap(), "");
    }

    assert_eq!(hyphenation.built.load(Ordering::SeqCst), 0);
    assert_eq!(hyphenation.calls.load(Ordering::SeqCst), 0);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_hyphenator_built_once_per_filter() {
    let hyphenation = Arc::new(CountingHyphenation::default());
    let engine = Arc::new(CountingEngine::new());
    let filter = TableFilter::new(FilterConfig::default(), hyphenation.clone(), engine.clone());

    for text in ["one", "two", "three"] {
        filter.filter(&Translatable::new(text)).unwrap();
    }
    filter
        .filter(&Translatable::new("fyra").with_locale("sv"))
        .unwrap();

    assert_eq!(hyphenation.built.load(Ordering::SeqCst), 2);
    assert_eq!(hyphenation.calls.load(Ordering::SeqCst), 4);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_one_engine_call_per_unit() {
    let hyphenation = Arc::new(CountingHyphenation::default());
    let engine = Arc::new(CountingEngine::new());
    let filter = TableFilter::new(FilterConfig::default(), hyphenation, engine.clone());

    let request = TranslatableWithContext::new(vec![
        Fragment::new("ab"),
        Fragment::new("cd"),
        Fragment::new("EF").with_mark_capitals(false),
        Fragment::new("gh"),
    ]);
    let result = filter.filter_with_context(&request).unwrap();

    assert_eq!(result, "⠁⠃⠉⠙⠑⠋⠛⠓");
    assert_eq!(engine.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_table_backend_end_to_end() {
    let filter = builtin_factory().new_filter("en", "uncontracted").unwrap();
    let result = filter
        .filter(&Translatable::new("A table, 42 times."))
        .unwrap();
    assert_eq!(
        result,
        format!("⠠⠁ ⠞⠁{SOFT_HYPHEN}⠃⠇⠑⠂ ⠼⠙⠃ ⠞⠊⠍⠑⠎⠲")
    );
}

#[test]
fn test_word_split_over_fragments() {
    let filter = builtin_factory().new_filter("en", "uncontracted").unwrap();
    let request =
        TranslatableWithContext::new(vec![Fragment::new("ta"), Fragment::new("ble")]);
    assert_eq!(
        filter.filter_with_context(&request).unwrap(),
        format!("⠞⠁{SOFT_HYPHEN}⠃⠇⠑")
    );
}

#[test]
fn test_emphasis_continues_from_preceding_text() {
    let factory = builtin_factory();
    // "ab" emphasized, "a" already translated before
    let attributes = AttributeSpan::builder()
        .add(AttributeSpan::styled("em", 2))
        .add_width(1)
        .build(3)
        .unwrap();
    let request = TranslatableWithContext::new(vec![Fragment::new("bc").with_hyphenate(false)])
        .with_preceding(vec![Fragment::new("a")])
        .with_attributes(attributes);

    let table = factory.new_filter("en", "uncontracted").unwrap();
    let delegating = factory.new_filter("en", "uncontracted-markers").unwrap();

    // Marker processors see the run open in the preceding text
    assert_eq!(delegating.filter_with_context(&request).unwrap(), "⠃⠨⠄⠉");
    // Table engines only see the masks of the unit, so the run reopens
    assert_eq!(table.filter_with_context(&request).unwrap(), "⠨⠶⠃⠨⠄⠉");
}

#[test]
fn test_deferred_text_is_resolved_once() {
    let resolved = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&resolved);
    let page = Fragment::deferred(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        "12".to_string()
    });

    let filter = builtin_factory().new_filter("en", "uncontracted").unwrap();
    let request = TranslatableWithContext::new(vec![Fragment::new("p "), page]);
    assert_eq!(filter.filter_with_context(&request).unwrap(), "⠏ ⠼⠁⠃");
    assert_eq!(resolved.load(Ordering::SeqCst), 1);
}

#[test]
fn test_misbehaving_hyphenator_is_reported() {
    struct Rewriting;
    impl Hyphenator for Rewriting {
        fn hyphenate(&self, text: &str) -> String {
            text.replace('a', "o")
        }
    }

    let hyphenators = Arc::new(HyphenatorRegistry::new().with("en", Arc::new(Rewriting)));
    let filter = TableFilter::new(
        FilterConfig::default(),
        hyphenators,
        Arc::new(CharTable::builtin().unwrap()),
    );
    let err = filter.filter(&Translatable::new("banana")).unwrap_err();
    assert!(matches!(err, TranslationError::Core(_)));
    assert!(!err.is_configuration());
}

#[test]
fn test_unknown_locale_fails_before_translation() {
    let engine = Arc::new(CountingEngine::new());
    let filter = TableFilter::new(
        FilterConfig::default(),
        Arc::new(HyphenatorRegistry::builtin().unwrap()),
        engine.clone(),
    );
    let err = filter
        .filter(&Translatable::new("ord").with_locale("sv"))
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

const LIANG: &str = "hy3ph he2n hena4 hen5at 1na n2at 1tio 2io";

/// Passes every character through unchanged
struct Identity;

impl TranslationEngine for Identity {
    fn translate(&self, request: &EngineRequest<'_>) -> std::result::Result<EngineOutput, BoxError> {
        let mut output = EngineOutput::empty();
        for (i, ch) in request.text.chars().enumerate() {
            output.push([ch], i);
        }
        Ok(output)
    }
}

impl StringFilter for Identity {
    fn filter(&self, text: &str) -> std::result::Result<String, BoxError> {
        Ok(text.to_string())
    }
}

fn identity_filters(hyphenators: Arc<dyn HyphenatorProvider>) -> (TableFilter, DelegatingFilter) {
    (
        TableFilter::new(FilterConfig::default(), hyphenators.clone(), Arc::new(Identity)),
        DelegatingFilter::new(FilterConfig::default(), hyphenators, Arc::new(Identity)),
    )
}

#[test]
fn test_edge_break_kept_between_units() {
    let hyphenator = Arc::new(PatternHyphenator::parse(LIANG).unwrap());
    let (table, delegating) =
        identity_filters(Arc::new(HyphenatorRegistry::new().with("en", hyphenator)));

    // Capital settings differ, so the word is split over two units
    let request = TranslatableWithContext::new(vec![
        Fragment::new("hyphen"),
        Fragment::new("ation").with_mark_capitals(false),
    ]);
    let expected = format!("hy{SOFT_HYPHEN}phen{SOFT_HYPHEN}ation");

    assert_eq!(table.filter_with_context(&request).unwrap(), expected);
    assert_eq!(delegating.filter_with_context(&request).unwrap(), expected);
}

#[test]
fn test_break_at_end_of_fragment_kept_by_both_backends() {
    /// Allows a break after every explicit hyphen, even at the end
    struct AfterHyphen;
    impl Hyphenator for AfterHyphen {
        fn hyphenate(&self, text: &str) -> String {
            text.replace('-', &format!("-{ZERO_WIDTH_SPACE}"))
        }
    }

    let (table, delegating) =
        identity_filters(Arc::new(HyphenatorRegistry::new().with("en", Arc::new(AfterHyphen))));
    let request = TranslatableWithContext::new(vec![
        Fragment::new("well-"),
        Fragment::new("known").with_mark_capitals(false),
    ]);
    let expected = format!("well-{ZERO_WIDTH_SPACE}known");

    assert_eq!(table.filter_with_context(&request).unwrap(), expected);
    assert_eq!(delegating.filter_with_context(&request).unwrap(), expected);
}

/// Records the context it is given and returns the current texts as is
#[derive(Default)]
struct RecordingMarkers {
    calls: std::sync::Mutex<Vec<(Vec<String>, Vec<String>, Vec<String>)>>,
}

impl MarkerContextProcessor for RecordingMarkers {
    fn process(
        &self,
        _attributes: &AttributeSpan,
        preceding: &[String],
        current: &[String],
        following: &[String],
    ) -> std::result::Result<Vec<String>, BoxError> {
        self.calls
            .lock()
            .unwrap()
            .push((preceding.to_vec(), current.to_vec(), following.to_vec()));
        Ok(current.to_vec())
    }
}

#[test]
fn test_markers_run_once_over_whole_context() {
    let hyphenation = Arc::new(CountingHyphenation::default());
    let markers = Arc::new(RecordingMarkers::default());
    let filter = DelegatingFilter::new(FilterConfig::default(), hyphenation, Arc::new(Identity))
        .with_markers(markers.clone());

    let request = TranslatableWithContext::new(vec![
        Fragment::new("ab"),
        Fragment::new("cd").with_hyphenate(false),
        Fragment::new("ef").with_locale("sv"),
    ])
    .with_preceding(vec![Fragment::new("x")])
    .with_following(vec![Fragment::new("yz")])
    .with_attributes(AttributeSpan::plain(9));

    assert_eq!(filter.filter_with_context(&request).unwrap(), "abcdef");

    let calls = markers.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (preceding, current, following) = &calls[0];
    assert_eq!(preceding, &vec!["x".to_string()]);
    assert_eq!(current, &vec!["ab".to_string(), "cd".to_string(), "ef".to_string()]);
    assert_eq!(following, &vec!["yz".to_string()]);
}
