//! Plain text output formatter

use super::{OutputFormatter, TranslatedDocument};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - writes the braille of each document in turn
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, document: &TranslatedDocument) -> Result<()> {
        write!(self.writer, "{}", document.braille)?;
        if !document.braille.ends_with('\n') {
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(braille: &str) -> TranslatedDocument {
        TranslatedDocument {
            source: "<stdin>".to_string(),
            text: String::new(),
            braille: braille.to_string(),
        }
    }

    #[test]
    fn test_one_line_per_document() {
        let mut out = Vec::new();
        let mut formatter = TextFormatter::new(&mut out);
        formatter.format_document(&document("⠁⠃")).unwrap();
        formatter.format_document(&document("⠉\n")).unwrap();
        formatter.finish().unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "⠁⠃\n⠉\n");
    }
}
