//! Error handling for the CLI application

use std::fmt;

/// Errors raised by the CLI itself rather than the translation stack
#[derive(Debug)]
pub enum CliError {
    /// No input matched the given patterns
    NoInput(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// No filter is registered for the requested locale and mode
    UnsupportedSpecification {
        /// Requested locale
        locale: String,
        /// Requested mode
        mode: String,
        /// Registered specifications, for the message
        available: Vec<String>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInput(patterns) => write!(f, "No files found matching: {patterns}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::UnsupportedSpecification {
                locale,
                mode,
                available,
            } => {
                write!(f, "No translator for locale '{locale}' in mode '{mode}'")?;
                if !available.is_empty() {
                    write!(f, " (available: {})", available.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
