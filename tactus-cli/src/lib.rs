//! Tactus CLI library
//!
//! This library provides the command-line interface for the Tactus
//! braille translation system.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod resources;

pub use error::{CliError, CliResult};
