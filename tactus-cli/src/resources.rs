//! Table and pattern sources for the CLI

use crate::config::{CliConfig, PatternResource};
use crate::error::CliError;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tactus_engine::{BrailleFilter, CharTable, FilterFactory, HyphenatorRegistry};

/// Source of a character table
#[derive(Debug, Clone, PartialEq)]
pub enum TableSource {
    /// Table bundled with the engine
    BuiltIn,
    /// External TOML table
    External(PathBuf),
}

impl TableSource {
    /// Get the display name for the table source
    pub fn display_name(&self) -> String {
        match self {
            TableSource::BuiltIn => "Built-in: en-uncontracted".to_string(),
            TableSource::External(path) => format!("External: {}", path.display()),
        }
    }

    /// Load the table
    pub fn load(&self) -> Result<CharTable> {
        match self {
            TableSource::BuiltIn => Ok(CharTable::builtin()?),
            TableSource::External(path) => CharTable::from_path(path)
                .with_context(|| format!("Failed to load table: {}", path.display())),
        }
    }
}

/// Everything needed to build a filter factory
#[derive(Debug, Clone)]
pub struct Resources {
    tables: Vec<TableSource>,
    patterns: Vec<PatternResource>,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            tables: vec![TableSource::BuiltIn],
            patterns: Vec::new(),
        }
    }
}

impl Resources {
    /// Bundled resources plus those named in `config`
    pub fn from_config(config: &CliConfig) -> Self {
        let mut resources = Self::default();
        for table in &config.resources.tables {
            resources.add_table(table.clone());
        }
        for pattern in &config.resources.patterns {
            resources.add_patterns(&pattern.locale, pattern.path.clone());
        }
        resources
    }

    /// Add an external table; later tables replace earlier ones with the
    /// same locale and mode
    pub fn add_table(&mut self, path: PathBuf) {
        self.tables.push(TableSource::External(path));
    }

    /// Add a pattern file for `locale`
    pub fn add_patterns(&mut self, locale: &str, path: PathBuf) {
        self.patterns.push(PatternResource {
            locale: locale.to_string(),
            path,
        });
    }

    /// Table sources in load order
    pub fn tables(&self) -> &[TableSource] {
        &self.tables
    }

    /// Hyphenators for every configured locale
    pub fn hyphenators(&self) -> Result<HyphenatorRegistry> {
        let mut registry = HyphenatorRegistry::builtin()?;
        for pattern in &self.patterns {
            log::debug!(
                "Loading patterns for {} from {}",
                pattern.locale,
                pattern.path.display()
            );
            registry
                .register_patterns(&pattern.locale, &pattern.path)
                .with_context(|| {
                    format!("Failed to load patterns: {}", pattern.path.display())
                })?;
        }
        Ok(registry)
    }

    /// Build a factory with every table registered
    pub fn factory(&self) -> Result<FilterFactory> {
        let mut factory = FilterFactory::new(Arc::new(self.hyphenators()?));
        for source in &self.tables {
            log::debug!("Loading table {}", source.display_name());
            factory = factory.register_table(source.load()?);
        }
        Ok(factory)
    }

    /// Build the filter for `locale` and `mode`
    pub fn filter(&self, locale: &str, mode: &str) -> Result<Box<dyn BrailleFilter>> {
        let factory = self.factory()?;
        if !factory.supports(locale, mode) {
            return Err(CliError::UnsupportedSpecification {
                locale: locale.to_string(),
                mode: mode.to_string(),
                available: factory.specifications().map(|s| s.to_string()).collect(),
            }
            .into());
        }
        Ok(factory.new_filter(locale, mode)?)
    }
}
