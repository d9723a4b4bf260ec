//! TOML schema of character tables

use serde::Deserialize;
use std::collections::BTreeMap;

/// Root table configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CharTableConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub signs: Signs,
    /// Single character keys mapped to their cells
    #[serde(default)]
    pub characters: BTreeMap<String, String>,
    /// Begin/end indicators by style name
    #[serde(default)]
    pub emphasis: BTreeMap<String, Emphasis>,
}

/// Table metadata
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub locale: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

/// Indicator signs
#[derive(Debug, Clone, Deserialize)]
pub struct Signs {
    pub capital: Option<String>,
    pub number: Option<String>,
    #[serde(default = "default_undefined")]
    pub undefined: String,
}

impl Default for Signs {
    fn default() -> Self {
        Self {
            capital: None,
            number: None,
            undefined: default_undefined(),
        }
    }
}

/// Emphasis indicators of one style
#[derive(Debug, Clone, Deserialize)]
pub struct Emphasis {
    pub begin: String,
    pub end: String,
}

fn default_mode() -> String {
    "uncontracted".to_string()
}

fn default_undefined() -> String {
    "⠿".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: CharTableConfig = toml::from_str(
            r#"
            [metadata]
            name = "tiny"
            locale = "en"

            [characters]
            a = "⠁"
            "#,
        )
        .unwrap();
        assert_eq!(config.metadata.mode, "uncontracted");
        assert_eq!(config.signs.undefined, "⠿");
        assert!(config.signs.capital.is_none());
        assert_eq!(config.characters["a"], "⠁");
        assert!(config.emphasis.is_empty());
    }

    #[test]
    fn test_emphasis_section() {
        let config: CharTableConfig = toml::from_str(
            r#"
            [metadata]
            name = "tiny"
            locale = "en"
            mode = "grade1"

            [emphasis.em]
            begin = "⠨⠂"
            end = "⠨⠄"
            "#,
        )
        .unwrap();
        assert_eq!(config.metadata.mode, "grade1");
        assert_eq!(config.emphasis["em"].begin, "⠨⠂");
    }
}
