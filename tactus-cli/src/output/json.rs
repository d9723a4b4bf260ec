//! JSON output formatter

use super::{OutputFormatter, TranslatedDocument};
use anyhow::Result;
use std::io::Write;

/// JSON formatter - outputs documents as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    documents: Vec<TranslatedDocument>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            documents: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, document: &TranslatedDocument) -> Result<()> {
        self.documents.push(document.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.documents)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_array() {
        let mut out = Vec::new();
        let mut formatter = JsonFormatter::new(&mut out, false);
        formatter
            .format_document(&TranslatedDocument {
                source: "a.txt".to_string(),
                text: "ab".to_string(),
                braille: "⠁⠃".to_string(),
            })
            .unwrap();
        formatter.finish().unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["source"], "a.txt");
        assert_eq!(value[0]["text"], "ab");
        assert_eq!(value[0]["braille"], "⠁⠃");
    }

    #[test]
    fn test_empty_array() {
        let mut out = Vec::new();
        JsonFormatter::new(&mut out, true).finish().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
