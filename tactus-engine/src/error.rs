//! Layered error types
//!
//! Collaborator failures (engines, string filters, marker processors) are
//! boxed and wrapped; deterministic failures come from `tactus-core`.

use tactus_core::CoreError;
use thiserror::Error;

/// Error type returned by external collaborators
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by filters and their configuration
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No hyphenator can be built for a locale
    #[error("no hyphenator available for locale '{locale}': {reason}")]
    HyphenatorUnavailable {
        /// The requested locale
        locale: String,
        /// Why the hyphenator could not be built
        reason: String,
    },

    /// No filter is registered for a locale/mode pair
    #[error("unsupported specification: locale '{locale}', mode '{mode}'")]
    UnsupportedSpecification {
        /// The requested locale
        locale: String,
        /// The requested translation mode
        mode: String,
    },

    /// Invalid configuration, table or pattern data
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Core algorithm error (alignment, reassembly, attribute widths)
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Attribute tree does not cover the translated context
    #[error("attributes cover {actual} code points but the context holds {expected}")]
    AttributeWidth {
        /// Code points in preceding, current and following text
        expected: usize,
        /// Width declared by the attribute tree
        actual: usize,
    },

    /// The translation engine or string filter failed
    #[error("translation engine failed: {0}")]
    Engine(#[source] BoxError),

    /// The marker processor failed or broke its contract
    #[error("marker processing failed: {0}")]
    MarkerProcessing(#[source] BoxError),

    /// I/O error while loading configuration data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranslationError {
    /// Whether the error stems from configuration rather than input text
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TranslationError::HyphenatorUnavailable { .. }
                | TranslationError::UnsupportedSpecification { .. }
                | TranslationError::Configuration(_)
                | TranslationError::Io(_)
        )
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(err: toml::de::Error) -> Self {
        TranslationError::Configuration(err.to_string())
    }
}

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: TranslationError = CoreError::InvalidIndexMap {
            reason: "empty".into(),
        }
        .into();
        assert_eq!(err.to_string(), "invalid output index map: empty");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_engine_error_keeps_source() {
        let source: BoxError = "table exploded".into();
        let err = TranslationError::Engine(source);
        assert_eq!(err.to_string(), "translation engine failed: table exploded");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_configuration_classification() {
        let err = TranslationError::HyphenatorUnavailable {
            locale: "xx".into(),
            reason: "no patterns".into(),
        };
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "no hyphenator available for locale 'xx': no patterns"
        );
    }
}
