//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

/// Where a document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Read the whole document
    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::Stdin => FileReader::read_stdin(),
            InputSource::File(path) => FileReader::read_text(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolve command line inputs; no patterns or a lone `-` mean stdin
pub fn resolve_inputs(patterns: &[String]) -> Result<Vec<InputSource>> {
    if patterns.is_empty() || (patterns.len() == 1 && patterns[0] == "-") {
        return Ok(vec![InputSource::Stdin]);
    }
    Ok(resolve_patterns(patterns)?
        .into_iter()
        .map(InputSource::File)
        .collect())
}
