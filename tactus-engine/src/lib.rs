//! Braille filter orchestration
//!
//! This crate turns requests made of text fragments into braille by driving
//! external collaborators: hyphenators, marker processors and translation
//! engines. The deterministic steps in between come from `tactus-core`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tactus_engine::{CharTable, FilterFactory, HyphenatorRegistry, Translatable};
//!
//! let hyphenators = Arc::new(HyphenatorRegistry::builtin().unwrap());
//! let factory = FilterFactory::new(hyphenators).register_table(CharTable::builtin().unwrap());
//!
//! let filter = factory.new_filter("en", "uncontracted").unwrap();
//! let braille = filter.filter(&Translatable::new("Hi there")).unwrap();
//! assert_eq!(braille, "⠠⠓⠊ ⠞⠓⠑⠗⠑");
//! ```

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod filter;
pub mod fragment;
pub mod hyphenation;
pub mod locale;
pub mod marker;
pub mod table;

// Re-export key types
pub use batch::{ContextWindow, FragmentPreparer, PreparedFragment, SegmentBatcher, TranslationUnit};
pub use config::{defaults, FilterConfig, FilterConfigBuilder};
pub use engine::{EngineOutput, EngineRequest, StringFilter, TranslationEngine};
pub use error::{BoxError, Result, TranslationError};
pub use factory::{Backend, FilterFactory, TranslatorSpecification};
pub use filter::{BrailleFilter, DelegatingFilter, TableFilter};
pub use fragment::{Fragment, FragmentText, ResolvableText, Translatable, TranslatableWithContext};
pub use hyphenation::{
    Hyphenator, HyphenatorCache, HyphenatorProvider, HyphenatorRegistry, PatternHyphenator,
};
pub use marker::{MarkerContextProcessor, StyleMarker, StyleMarkers};
pub use table::CharTable;

// Re-export from core for convenience
pub use tactus_core::{AttributeSpan, Breakpoint, LinearAttributes, SOFT_HYPHEN, ZERO_WIDTH_SPACE};
