//! List command implementation

use super::ListCommands;
use anyhow::Result;
use tugaphone_core::{
    get_dialect, get_preset, list_available_dialects, list_presets, DialectRules, RuleRegistry,
};

/// Print the requested listing to stdout
pub fn execute(subcommand: ListCommands) -> Result<()> {
    for line in render(subcommand)? {
        println!("{line}");
    }
    Ok(())
}

/// Listing lines, without printing
pub fn render(subcommand: ListCommands) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    match subcommand {
        ListCommands::Dialects => {
            lines.push("Available dialects:".to_string());
            for code in list_available_dialects() {
                let dialect = get_dialect(code)?;
                lines.push(format!(
                    "  {:<6} - {} (lexicon region: {})",
                    code,
                    dialect.name(),
                    dialect.region()
                ));
            }
        }
        ListCommands::Presets => {
            lines.push("Available presets:".to_string());
            for name in list_presets()? {
                let preset = get_preset(name)?;
                lines.push(format!(
                    "  {:<15} - {} [{}; {} rules]",
                    name,
                    preset.description(),
                    preset.base_dialect(),
                    preset.rules().len()
                ));
            }
        }
        ListCommands::Rules => {
            lines.push("Available rules:".to_string());
            for rule in RuleRegistry::shared()?.iter() {
                lines.push(format!("  {:<32} - {}", rule.name(), rule.description()));
            }
        }
        ListCommands::Formats => {
            lines.push("Available output formats:".to_string());
            lines.push("  text     - One IPA transcription per line".to_string());
            lines.push("  json     - JSON array of lines with source, text and IPA".to_string());
            lines.push("  markdown - Markdown table of text and IPA".to_string());
        }
    }
    Ok(lines)
}
