//! Tactus command-line interface

use anyhow::Result;
use clap::Parser;
use tactus_cli::commands::Commands;

/// Braille translation with hyphenation and style markers
#[derive(Debug, Parser)]
#[command(name = "tactus", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
