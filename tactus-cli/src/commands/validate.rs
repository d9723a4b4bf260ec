//! Validate command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tactus_engine::{CharTable, PatternHyphenator};

/// Arguments for the validate command
#[derive(Debug, Args)]
#[group(required = true, multiple = true)]
pub struct ValidateArgs {
    /// Character table (TOML) to validate
    #[arg(short, long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// Hyphenation pattern file to validate
    #[arg(short, long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        if let Some(path) = &self.table {
            println!("Validating character table: {}", path.display());
            match CharTable::from_path(path) {
                Ok(table) => {
                    println!("✓ Table is valid!");
                    println!("  Name: {}", table.name());
                    println!("  Locale: {}", table.locale());
                    println!("  Mode: {}", table.mode());
                    let styles: Vec<&str> = table.emphasized_styles().collect();
                    if !styles.is_empty() {
                        println!("  Styles: {}", styles.join(", "));
                    }
                }
                Err(e) => {
                    println!("✗ Table is invalid!");
                    println!("  Error: {e}");
                    return Err(anyhow::anyhow!("Validation failed: {}", e));
                }
            }
        }

        if let Some(path) = &self.patterns {
            println!("Validating hyphenation patterns: {}", path.display());
            match PatternHyphenator::from_path(path) {
                Ok(hyphenator) => {
                    println!("✓ Patterns are valid!");
                    println!("  Patterns: {}", hyphenator.pattern_count());
                    println!("  Exceptions: {}", hyphenator.exception_count());
                }
                Err(e) => {
                    println!("✗ Patterns are invalid!");
                    println!("  Error: {e}");
                    return Err(anyhow::anyhow!("Validation failed: {}", e));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            table: Some(PathBuf::from("test.toml")),
            patterns: None,
        };

        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("test.toml"));
    }

    #[test]
    fn test_validate_valid_table() {
        let toml_content = r#"
[metadata]
name = "Test table"
locale = "en"

[characters]
"a" = "⠁"

[emphasis.em]
begin = "⠨⠶"
end = "⠨⠄"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let args = ValidateArgs {
            table: Some(temp_file.path().to_path_buf()),
            patterns: None,
        };

        assert!(args.execute().is_ok());
    }

    #[test]
    fn test_validate_invalid_table() {
        let toml_content = r#"
[metadata]
name = "Test"
locale = "en"

[characters]
"ab" = "⠁"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", toml_content).unwrap();

        let args = ValidateArgs {
            table: Some(temp_file.path().to_path_buf()),
            patterns: None,
        };

        assert!(args.execute().is_err());
    }

    #[test]
    fn test_validate_patterns() {
        let mut valid = NamedTempFile::new().unwrap();
        writeln!(valid, "% comment\nhy3ph he2n ta-ble").unwrap();
        let mut invalid = NamedTempFile::new().unwrap();
        writeln!(invalid, "hy3ph\n12").unwrap();

        let args = ValidateArgs {
            table: None,
            patterns: Some(valid.path().to_path_buf()),
        };
        assert!(args.execute().is_ok());

        let args = ValidateArgs {
            table: None,
            patterns: Some(invalid.path().to_path_buf()),
        };
        assert!(args.execute().is_err());
    }
}
