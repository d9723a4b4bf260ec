//! Translate command implementation

use super::init_logging;
use crate::config::CliConfig;
use crate::input::{resolve_inputs, InputSource};
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter, TranslatedDocument};
use crate::progress::ProgressReporter;
use crate::resources::Resources;
use anyhow::{Context, Result};
use clap::Args;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tactus_engine::{AttributeSpan, BrailleFilter, Translatable};

/// Arguments for the translate command
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Input files or patterns (supports glob; default: stdin)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Locale of the input text
    #[arg(short, long, env = "TACTUS_LOCALE")]
    pub locale: Option<String>,

    /// Translation mode
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Additional character table (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub table: Vec<PathBuf>,

    /// Hyphenation patterns for the input locale
    #[arg(short, long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Style tree (JSON) covering each whole input
    #[arg(short, long, value_name = "FILE")]
    pub styles: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not insert hyphenation breakpoints
    #[arg(long)]
    pub no_hyphenate: bool,

    /// Do not mark capital letters
    #[arg(long)]
    pub no_capitals: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Braille of each input in turn
    Text,
    /// JSON array with source, print text and braille
    Json,
}

impl TranslateArgs {
    /// Execute the translate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_path(path)?,
            None => CliConfig::default(),
        };
        let locale = self
            .locale
            .clone()
            .unwrap_or_else(|| config.translation.locale.clone());
        let mode = self
            .mode
            .clone()
            .unwrap_or_else(|| config.translation.mode.clone());

        let mut resources = Resources::from_config(&config);
        for table in &self.table {
            resources.add_table(table.clone());
        }
        if let Some(patterns) = &self.patterns {
            resources.add_patterns(&locale, patterns.clone());
        }
        let filter = resources.filter(&locale, &mode)?;
        log::info!("Translating with {locale} ({mode})");

        let styles = self.styles.as_deref().map(load_styles).transpose()?;
        let options = TranslateOptions {
            hyphenate: config.translation.hyphenate && !self.no_hyphenate,
            mark_capitals: config.translation.mark_capitals && !self.no_capitals,
            styles,
        };

        let inputs = resolve_inputs(&self.input)?;
        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("Failed to create output: {}", path.display()))?,
            )),
            None => Box::new(io::stdout().lock()),
        };
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, config.output.pretty_json)),
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_documents(inputs.len() as u64);
        for input in &inputs {
            let document = translate_input(filter.as_ref(), input, &options)?;
            formatter.format_document(&document)?;
            progress.document_completed(&document.source);
        }
        progress.finish();
        formatter.finish()?;

        log::info!("Translated {} document(s)", inputs.len());
        Ok(())
    }
}

/// Per request settings shared by every input
#[derive(Debug, Default)]
pub struct TranslateOptions {
    /// Insert hyphenation breakpoints
    pub hyphenate: bool,
    /// Mark capital letters
    pub mark_capitals: bool,
    /// Style tree applied to each input
    pub styles: Option<AttributeSpan>,
}

/// Translate one input document
pub fn translate_input(
    filter: &dyn BrailleFilter,
    input: &InputSource,
    options: &TranslateOptions,
) -> Result<TranslatedDocument> {
    let text = input.read()?;
    let mut request = Translatable::new(text.clone())
        .with_hyphenate(options.hyphenate)
        .with_mark_capitals(options.mark_capitals);
    if let Some(styles) = &options.styles {
        request = request.with_attributes(styles.clone());
    }

    let braille = filter
        .filter(&request)
        .with_context(|| format!("Failed to translate {input}"))?;
    Ok(TranslatedDocument {
        source: input.to_string(),
        text,
        braille,
    })
}

fn load_styles(path: &Path) -> Result<AttributeSpan> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read styles: {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("Invalid styles: {}", path.display()))
}
