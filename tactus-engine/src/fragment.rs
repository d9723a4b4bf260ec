//! Input types: text fragments and translation requests
//!
//! A [`Fragment`] is a piece of text plus the settings that apply to it.
//! Its text is either known up front or produced on demand, for example a
//! page number that is only known at layout time. Deferred text can be
//! *resolved* (the value is being consumed) or *peeked* (look-ahead context
//! that must not count as consumption).

use std::fmt;
use std::sync::Arc;
use tactus_core::AttributeSpan;

/// Text computed on demand
pub trait ResolvableText: Send + Sync {
    /// Produce the text for translation
    fn resolve(&self) -> String;

    /// Produce the text for look-ahead only.
    ///
    /// Implementations with side effects on resolution override this.
    fn peek(&self) -> String {
        self.resolve()
    }
}

impl<F> ResolvableText for F
where
    F: Fn() -> String + Send + Sync,
{
    fn resolve(&self) -> String {
        self()
    }
}

/// Text held by a fragment
#[derive(Clone)]
pub enum FragmentText {
    /// Text known when the fragment was created
    Static(String),
    /// Text produced on demand
    Deferred(Arc<dyn ResolvableText>),
}

impl FragmentText {
    /// Resolve the text for translation
    pub fn resolve(&self) -> String {
        match self {
            FragmentText::Static(text) => text.clone(),
            FragmentText::Deferred(source) => source.resolve(),
        }
    }

    /// Read the text as look-ahead context
    pub fn peek(&self) -> String {
        match self {
            FragmentText::Static(text) => text.clone(),
            FragmentText::Deferred(source) => source.peek(),
        }
    }
}

impl fmt::Debug for FragmentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentText::Static(text) => f.debug_tuple("Static").field(text).finish(),
            FragmentText::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// A piece of text with its translation settings
#[derive(Debug, Clone)]
pub struct Fragment {
    text: FragmentText,
    locale: Option<String>,
    hyphenate: bool,
    mark_capitals: bool,
}

impl Fragment {
    /// Fragment with static text, hyphenated and with capitals marked
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_text(FragmentText::Static(text.into()))
    }

    /// Fragment whose text is produced when it is translated
    pub fn deferred<R>(source: R) -> Self
    where
        R: ResolvableText + 'static,
    {
        Self::from_text(FragmentText::Deferred(Arc::new(source)))
    }

    fn from_text(text: FragmentText) -> Self {
        Self {
            text,
            locale: None,
            hyphenate: true,
            mark_capitals: true,
        }
    }

    /// Set the locale; fragments without one use the filter's locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Enable or disable hyphenation
    pub fn with_hyphenate(mut self, hyphenate: bool) -> Self {
        self.hyphenate = hyphenate;
        self
    }

    /// Enable or disable marking of capital letters
    pub fn with_mark_capitals(mut self, mark_capitals: bool) -> Self {
        self.mark_capitals = mark_capitals;
        self
    }

    /// The fragment text
    pub fn text(&self) -> &FragmentText {
        &self.text
    }

    /// Explicit locale, if any
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Whether the fragment should be hyphenated
    pub fn hyphenate(&self) -> bool {
        self.hyphenate
    }

    /// Whether capital letters should be marked
    pub fn mark_capitals(&self) -> bool {
        self.mark_capitals
    }
}

/// A single text to translate
#[derive(Debug, Clone)]
pub struct Translatable {
    fragment: Fragment,
    text: String,
    attributes: Option<AttributeSpan>,
}

impl Translatable {
    /// Translatable with default settings
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            fragment: Fragment::new(text.clone()),
            text,
            attributes: None,
        }
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.fragment = self.fragment.with_locale(locale);
        self
    }

    /// Enable or disable hyphenation
    pub fn with_hyphenate(mut self, hyphenate: bool) -> Self {
        self.fragment = self.fragment.with_hyphenate(hyphenate);
        self
    }

    /// Enable or disable marking of capital letters
    pub fn with_mark_capitals(mut self, mark_capitals: bool) -> Self {
        self.fragment = self.fragment.with_mark_capitals(mark_capitals);
        self
    }

    /// Attach an attribute tree covering the text
    pub fn with_attributes(mut self, attributes: AttributeSpan) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// The text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Settings of the text as a fragment
    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Attribute tree, if any
    pub fn attributes(&self) -> Option<&AttributeSpan> {
        self.attributes.as_ref()
    }

    /// The same request as a one-fragment context without neighbours
    pub fn to_context(&self) -> TranslatableWithContext {
        let context = TranslatableWithContext::new(vec![self.fragment.clone()]);
        match &self.attributes {
            Some(attributes) => context.with_attributes(attributes.clone()),
            None => context,
        }
    }
}

/// Fragments to translate, with the text around them.
///
/// Only `current` is translated. `preceding` and `following` give marker
/// processors and style runs the surrounding text; an attribute tree, if
/// present, covers the concatenation of all three.
#[derive(Debug, Clone, Default)]
pub struct TranslatableWithContext {
    preceding: Vec<Fragment>,
    current: Vec<Fragment>,
    following: Vec<Fragment>,
    attributes: Option<AttributeSpan>,
}

impl TranslatableWithContext {
    /// Request translating `current` without surrounding context
    pub fn new(current: Vec<Fragment>) -> Self {
        Self {
            current,
            ..Self::default()
        }
    }

    /// Set the text already translated before `current`
    pub fn with_preceding(mut self, preceding: Vec<Fragment>) -> Self {
        self.preceding = preceding;
        self
    }

    /// Set the text that follows `current`
    pub fn with_following(mut self, following: Vec<Fragment>) -> Self {
        self.following = following;
        self
    }

    /// Attach an attribute tree covering preceding, current and following
    pub fn with_attributes(mut self, attributes: AttributeSpan) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Fragments before the translated ones
    pub fn preceding(&self) -> &[Fragment] {
        &self.preceding
    }

    /// Fragments to translate
    pub fn current(&self) -> &[Fragment] {
        &self.current
    }

    /// Fragments after the translated ones
    pub fn following(&self) -> &[Fragment] {
        &self.following
    }

    /// Attribute tree, if any
    pub fn attributes(&self) -> Option<&AttributeSpan> {
        self.attributes.as_ref()
    }
}
