//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

pub mod hyphenate;
pub mod list;
pub mod translate;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Translate text files into braille
    Translate(translate::TranslateArgs),

    /// Show where text may be hyphenated
    Hyphenate(hyphenate::HyphenateArgs),

    /// Check a character table or pattern file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Translate(args) => args.execute(),
            Commands::Hyphenate(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List locales and modes that have a translator
    Specs {
        /// Additional character tables
        #[arg(short, long, value_name = "FILE")]
        table: Vec<PathBuf>,
    },

    /// List styles the bundled table renders
    Styles,

    /// List available output formats
    Formats,
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A logger may already be installed when commands run in-process
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
