//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tactus_engine::defaults;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Translation defaults
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Tables and hyphenation patterns to load
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load a configuration file.
    ///
    /// Relative resource paths are resolved against the directory holding
    /// the file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: CliConfig =
            toml::from_str(&source).map_err(|e| CliError::ConfigError(e.to_string()))?;

        if let Some(base) = path.parent() {
            config.resources.rebase(base);
        }
        Ok(config)
    }
}

/// Translation defaults
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslationConfig {
    /// Locale of the input text
    pub locale: String,

    /// Translation mode
    pub mode: String,

    /// Insert hyphenation breakpoints
    pub hyphenate: bool,

    /// Mark capital letters
    pub mark_capitals: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            locale: defaults::LOCALE.to_string(),
            mode: "uncontracted".to_string(),
            hyphenate: true,
            mark_capitals: true,
        }
    }
}

/// External resources
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Character tables loaded in addition to the bundled one
    #[serde(default)]
    pub tables: Vec<PathBuf>,

    /// Hyphenation pattern files by locale
    #[serde(default)]
    pub patterns: Vec<PatternResource>,
}

impl ResourceConfig {
    fn rebase(&mut self, base: &Path) {
        for table in &mut self.tables {
            if table.is_relative() {
                *table = base.join(&*table);
            }
        }
        for pattern in &mut self.patterns {
            if pattern.path.is_relative() {
                pattern.path = base.join(&pattern.path);
            }
        }
    }
}

/// Pattern file registered for a locale
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PatternResource {
    /// Locale the patterns hyphenate
    pub locale: String,
    /// Path of the pattern file
    pub path: PathBuf,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}
