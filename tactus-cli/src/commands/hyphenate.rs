//! Hyphenate command implementation

use super::init_logging;
use crate::input::FileReader;
use crate::resources::Resources;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tactus_core::{align, Breakpoint};
use tactus_engine::HyphenatorProvider;

/// Arguments for the hyphenate command
#[derive(Debug, Args)]
pub struct HyphenateArgs {
    /// Text to hyphenate (default: stdin)
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Locale of the text
    #[arg(short, long, env = "TACTUS_LOCALE", default_value = "en")]
    pub locale: String,

    /// Hyphenation patterns for the locale
    #[arg(short, long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Print break markers as they are instead of `-` and `|`
    #[arg(long)]
    pub raw: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl HyphenateArgs {
    /// Execute the hyphenate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let mut resources = Resources::default();
        if let Some(patterns) = &self.patterns {
            resources.add_patterns(&self.locale, patterns.clone());
        }
        let hyphenator = resources.hyphenators()?.new_hyphenator(&self.locale)?;

        let text = if self.text.is_empty() {
            FileReader::read_stdin()?
        } else {
            self.text.join(" ")
        };

        let hyphenated = hyphenator.hyphenate(&text);
        if self.raw {
            print!("{hyphenated}");
        } else {
            let breakpoints = align(&text, &hyphenated)
                .with_context(|| format!("Hyphenator for {} changed the text", self.locale))?;
            print!("{}", render_breaks(&text, &breakpoints));
        }
        if !text.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}

/// Show every break of `text`: `-` where a hyphen would appear, `|` where
/// the line may break without one
pub fn render_breaks(text: &str, breakpoints: &[Breakpoint]) -> String {
    let mut out = String::with_capacity(text.len() + breakpoints.len());
    for (index, ch) in text.chars().enumerate() {
        out.push(ch);
        match breakpoints.get(index) {
            Some(Breakpoint::SoftHyphen) => out.push('-'),
            Some(Breakpoint::ZeroWidthSpace) => out.push('|'),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactus_engine::{Hyphenator, PatternHyphenator};

    const LIANG: &str = "hy3ph he2n hena4 hen5at 1na n2at 1tio 2io";

    fn visible(text: &str) -> String {
        let hyphenator = PatternHyphenator::parse(LIANG).unwrap();
        let breakpoints = align(text, &hyphenator.hyphenate(text)).unwrap();
        render_breaks(text, &breakpoints)
    }

    #[test]
    fn test_render_soft_hyphens() {
        assert_eq!(visible("hyphenation"), "hy-phen-ation");
    }

    #[test]
    fn test_render_explicit_hyphen() {
        assert_eq!(visible("well-known"), "well-|known");
    }

    #[test]
    fn test_render_without_breaks() {
        assert_eq!(render_breaks("abc", &[Breakpoint::None; 2]), "abc");
        assert_eq!(render_breaks("", &[]), "");
    }
}
