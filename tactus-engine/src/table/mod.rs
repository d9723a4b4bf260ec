//! Character table translation engine
//!
//! A small uncontracted engine driven by a TOML table: every character maps
//! to a fixed cell sequence, capitals and digit runs receive indicator
//! signs, and styled runs are wrapped in emphasis indicators. It serves both
//! backends: as a [`TranslationEngine`] it reads style masks and reports
//! positions, as a [`StringFilter`] it passes braille cells and break
//! markers through untouched.

mod config;

pub use config::{CharTableConfig, Emphasis, Metadata, Signs};

use crate::engine::{EngineOutput, EngineRequest, StringFilter, TranslationEngine};
use crate::error::{BoxError, Result, TranslationError};
use crate::locale::{is_valid_locale, normalize_locale};
use crate::marker::StyleMarkers;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tactus_core::{is_marker, reassemble, LinearAttributes};
use tracing::debug;

type Cells = SmallVec<[char; 4]>;

const BRAILLE_PATTERNS: std::ops::RangeInclusive<char> = '\u{2800}'..='\u{28FF}';

/// Table bundled with the crate
const BUILTIN_EN: &str = include_str!("../../configs/tables/en-uncontracted.toml");

#[derive(Debug, Clone)]
struct EmphasisCells {
    begin: Cells,
    end: Cells,
}

/// Table driven braille engine
#[derive(Debug, Clone)]
pub struct CharTable {
    name: String,
    locale: String,
    mode: String,
    capital: Option<Cells>,
    number: Option<Cells>,
    undefined: Cells,
    characters: HashMap<char, Cells>,
    emphasis: BTreeMap<String, EmphasisCells>,
}

impl CharTable {
    /// Parse a table from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CharTableConfig = toml::from_str(source)?;
        Self::from_config(config)
    }

    /// Load a table from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let table = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), name = %table.name, "loaded table");
        Ok(table)
    }

    /// The table bundled with the crate (English, uncontracted)
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_EN)
    }

    /// Build a table from parsed configuration
    pub fn from_config(config: CharTableConfig) -> Result<Self> {
        if !is_valid_locale(&config.metadata.locale) {
            return Err(TranslationError::Configuration(format!(
                "table '{}' has invalid locale '{}'",
                config.metadata.name, config.metadata.locale
            )));
        }

        let mut characters = HashMap::with_capacity(config.characters.len());
        for (key, cells) in &config.characters {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(TranslationError::Configuration(format!(
                    "table key '{key}' must be a single character"
                )));
            };
            if cells.is_empty() && !ch.is_whitespace() {
                return Err(TranslationError::Configuration(format!(
                    "no cells for '{key}'; only whitespace may be dropped"
                )));
            }
            characters.insert(ch, cells.chars().collect());
        }

        let emphasis = config
            .emphasis
            .iter()
            .map(|(style, e)| {
                (
                    style.clone(),
                    EmphasisCells {
                        begin: e.begin.chars().collect(),
                        end: e.end.chars().collect(),
                    },
                )
            })
            .collect();

        Ok(Self {
            name: config.metadata.name,
            locale: normalize_locale(&config.metadata.locale),
            mode: config.metadata.mode,
            capital: config.signs.capital.map(|s| s.chars().collect()),
            number: config.signs.number.map(|s| s.chars().collect()),
            undefined: config.signs.undefined.chars().collect(),
            characters,
            emphasis,
        })
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locale the table is written for
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translation mode, for example `uncontracted`
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Styles with emphasis indicators
    pub fn emphasized_styles(&self) -> impl Iterator<Item = &str> {
        self.emphasis.keys().map(String::as_str)
    }

    /// Marker processor inserting this table's emphasis indicators
    pub fn style_markers(&self) -> StyleMarkers {
        self.emphasis
            .iter()
            .fold(StyleMarkers::new(), |markers, (style, cells)| {
                markers.with_style(
                    style.as_str(),
                    cells.begin.iter().collect::<String>(),
                    cells.end.iter().collect::<String>(),
                )
            })
    }

    fn cells_for(&self, ch: char) -> Cells {
        if let Some(cells) = self.characters.get(&ch) {
            return cells.clone();
        }
        if ch.is_whitespace() || is_marker(ch) || BRAILLE_PATTERNS.contains(&ch) {
            return Cells::from_elem(ch, 1);
        }
        self.undefined.clone()
    }

    /// Bits of the styles that have emphasis indicators
    fn emphasis_bits<'a>(
        &'a self,
        styles: Option<&'a LinearAttributes>,
    ) -> Vec<(u64, &'a EmphasisCells)> {
        let Some(styles) = styles else {
            return Vec::new();
        };
        self.emphasis
            .iter()
            .filter_map(|(name, cells)| styles.styles().get(name).map(|bit| (bit, cells)))
            .collect()
    }

    /// Translate `text`, with optional style masks
    pub fn translate_text(&self, text: &str, styles: Option<&LinearAttributes>) -> EngineOutput {
        let chars: Vec<char> = text.chars().collect();
        let emphasis = self.emphasis_bits(styles);
        let mask = |i: usize| -> u64 {
            styles
                .and_then(|s| s.values().get(i).copied())
                .unwrap_or(0)
        };

        let mut output = EngineOutput::empty();
        let mut in_number = false;

        for (i, &ch) in chars.iter().enumerate() {
            let current = mask(i);
            let previous = if i == 0 { 0 } else { mask(i - 1) };
            for (bit, cells) in &emphasis {
                if current & bit != 0 && previous & bit == 0 {
                    output.push(cells.begin.iter().copied(), i);
                }
            }

            if ch.is_ascii_digit() {
                if !in_number {
                    if let Some(number) = &self.number {
                        output.push(number.iter().copied(), i);
                    }
                    in_number = true;
                }
            } else {
                in_number = false;
            }

            if ch.is_uppercase() && !self.characters.contains_key(&ch) {
                let lower: String = ch.to_lowercase().collect();
                let mut lower_chars = lower.chars();
                if let (Some(l), None) = (lower_chars.next(), lower_chars.next()) {
                    if let Some(capital) = &self.capital {
                        output.push(capital.iter().copied(), i);
                    }
                    output.push(self.cells_for(l), i);
                } else {
                    output.push(self.undefined.iter().copied(), i);
                }
            } else {
                output.push(self.cells_for(ch), i);
            }

            let next = if i + 1 < chars.len() { mask(i + 1) } else { 0 };
            for (bit, cells) in emphasis.iter().rev() {
                if current & bit != 0 && next & bit == 0 {
                    output.push(cells.end.iter().copied(), i);
                }
            }
        }

        output
    }
}

impl TranslationEngine for CharTable {
    fn translate(&self, request: &EngineRequest<'_>) -> std::result::Result<EngineOutput, BoxError> {
        Ok(self.translate_text(request.text, request.styles))
    }
}

impl StringFilter for CharTable {
    fn filter(&self, text: &str) -> std::result::Result<String, BoxError> {
        let output = self.translate_text(text, None);
        Ok(reassemble(text, &output.text, &output.input_positions, &[])?)
    }
}
