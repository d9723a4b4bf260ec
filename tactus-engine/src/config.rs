//! Filter configuration

use crate::error::{Result, TranslationError};
use crate::locale::{is_valid_locale, normalize_locale};
use std::collections::HashSet;

/// Default values shared by filters and factories
pub mod defaults {
    /// Locale used when neither fragment nor configuration names one
    pub const LOCALE: &str = "en";
}

/// Settings of one filter instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Locale for fragments without an explicit one
    pub locale: String,
    /// Style names ignored during attribute linearization
    pub excluded_styles: HashSet<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            locale: defaults::LOCALE.to_string(),
            excluded_styles: HashSet::new(),
        }
    }
}

impl FilterConfig {
    /// Configuration for `locale` with no excluded styles
    pub fn new(locale: &str) -> Self {
        Self {
            locale: normalize_locale(locale),
            ..Default::default()
        }
    }

    /// Start building a configuration
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::new()
    }

    /// Check that the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if !is_valid_locale(&self.locale) {
            return Err(TranslationError::Configuration(format!(
                "invalid locale '{}'",
                self.locale
            )));
        }
        if self.excluded_styles.iter().any(|s| s.is_empty()) {
            return Err(TranslationError::Configuration(
                "excluded style names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`FilterConfig`]
#[derive(Debug, Default)]
pub struct FilterConfigBuilder {
    config: FilterConfig,
}

impl FilterConfigBuilder {
    /// Create a builder holding the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default locale
    pub fn locale(mut self, locale: &str) -> Self {
        self.config.locale = normalize_locale(locale);
        self
    }

    /// Exclude a style from linearization
    pub fn exclude_style(mut self, style: impl Into<String>) -> Self {
        self.config.excluded_styles.insert(style.into());
        self
    }

    /// Exclude several styles from linearization
    pub fn exclude_styles<I, S>(mut self, styles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .excluded_styles
            .extend(styles.into_iter().map(Into::into));
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<FilterConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert_eq!(config.locale, "en");
        assert!(config.excluded_styles.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = FilterConfig::builder()
            .locale("sv_SE")
            .exclude_styles(["em", "strong"])
            .exclude_style("sup")
            .build()
            .unwrap();
        assert_eq!(config.locale, "sv-se");
        assert_eq!(config.excluded_styles.len(), 3);
        assert!(config.excluded_styles.contains("strong"));
    }

    #[test]
    fn test_invalid_locale() {
        let err = FilterConfig::builder().locale("").build().unwrap_err();
        assert!(err.is_configuration());
        assert!(FilterConfig::builder().locale("en us").build().is_err());
    }

    #[test]
    fn test_empty_style_name() {
        assert!(FilterConfig::builder().exclude_style("").build().is_err());
    }
}
