//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads documents as UTF-8 text
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read all of standard input
    pub fn read_stdin() -> Result<String> {
        Self::read_from(io::stdin().lock())
    }

    /// Read a whole stream as UTF-8 text
    pub fn read_from(mut reader: impl Read) -> Result<String> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        Ok(text)
    }
}
