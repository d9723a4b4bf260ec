//! List command implementation

use super::ListCommands;
use crate::resources::Resources;
use anyhow::Result;
use tactus_engine::CharTable;

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Specs { table } => {
                let mut resources = Resources::default();
                for path in table {
                    resources.add_table(path.clone());
                }
                println!("Available translators:");
                for spec in resources.factory()?.specifications() {
                    println!("  {:<8} {}", spec.locale(), spec.mode());
                }
            }
            ListCommands::Styles => {
                let table = CharTable::builtin()?;
                println!("Styles rendered by {}:", table.name());
                for style in table.emphasized_styles() {
                    println!("  {style}");
                }
            }
            ListCommands::Formats => {
                println!("Available output formats:");
                println!("  text  - Braille of each input in turn");
                println!("  json  - JSON array with source, print text and braille");
            }
        }
        Ok(())
    }
}
