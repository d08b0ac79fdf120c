//! Validate command implementation

use crate::input::FileReader;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use tugaphone_core::{Dialect, DialectRules, Lexicon, Preset, RuleRegistry};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Preset file to validate (TOML, or JSON by extension)
    #[arg(
        long,
        value_name = "FILE",
        required_unless_present_any = ["dialect_config", "lexicon"]
    )]
    pub preset_file: Option<PathBuf>,

    /// Dialect configuration file to validate
    #[arg(long, value_name = "FILE")]
    pub dialect_config: Option<PathBuf>,

    /// Lexicon CSV to validate
    #[arg(short, long, value_name = "CSV")]
    pub lexicon: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    ///
    /// Every given file is checked and reported; the command fails if any
    /// of them is invalid.
    pub fn execute(&self) -> Result<()> {
        let mut failures = 0;

        if let Some(path) = &self.preset_file {
            failures += report("preset", path, validate_preset(path));
        }
        if let Some(path) = &self.dialect_config {
            failures += report("dialect configuration", path, validate_dialect(path));
        }
        if let Some(path) = &self.lexicon {
            failures += report("lexicon", path, validate_lexicon(path));
        }

        if failures > 0 {
            anyhow::bail!("Validation failed: {failures} invalid file(s)");
        }
        Ok(())
    }
}

fn report(kind: &str, path: &Path, result: Result<Vec<String>>) -> usize {
    println!("Validating {kind}: {}", path.display());
    match result {
        Ok(details) => {
            println!("✓ {kind} is valid!");
            for detail in details {
                println!("  {detail}");
            }
            0
        }
        Err(e) => {
            println!("✗ {kind} is invalid!");
            println!("  Error: {e:#}");
            1
        }
    }
}

fn validate_preset(path: &Path) -> Result<Vec<String>> {
    let preset = Preset::from_file(path, RuleRegistry::shared()?)?;
    Ok(vec![
        format!("Name: {}", preset.name()),
        format!("Base dialect: {}", preset.base_dialect()),
        format!("Lexicon region: {}", preset.base_region()),
        format!("Rules: {}", preset.rule_names().join(", ")),
    ])
}

fn validate_dialect(path: &Path) -> Result<Vec<String>> {
    let dialect = Dialect::from_file(path, None)?;
    Ok(vec![
        format!("Dialect code: {}", dialect.code()),
        format!("Dialect name: {}", dialect.name()),
        format!("Lexicon region: {}", dialect.region()),
    ])
}

fn validate_lexicon(path: &Path) -> Result<Vec<String>> {
    let lexicon = Lexicon::from_csv_str(&FileReader::read_text(path)?)?;
    Ok(vec![
        format!("Entries: {}", lexicon.len()),
        format!("Regions: {}", lexicon.regions().join(", ")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn args() -> ValidateArgs {
        ValidateArgs {
            preset_file: None,
            dialect_config: None,
            lexicon: None,
        }
    }

    #[test]
    fn test_validate_preset() {
        let valid = temp_file(
            ".toml",
            "name = \"norte\"\nipa_rules = [\"rhotic_realization\"]\n",
        );
        let details = validate_preset(valid.path()).unwrap();
        assert!(details.contains(&"Rules: rhotic_realization".to_string()));

        let unknown = temp_file(".json", r#"{"name": "x", "ipa_rules": ["no_such_rule"]}"#);
        let err = validate_preset(unknown.path()).unwrap_err();
        assert!(err.to_string().contains("no_such_rule"));
    }

    #[test]
    fn test_validate_dialect() {
        let valid = temp_file(
            ".toml",
            "[metadata]\ncode = \"pt-XX\"\nname = \"Test\"\nregion = \"tst\"\n",
        );
        assert!(validate_dialect(valid.path()).is_ok());

        let invalid = temp_file(".toml", "[phonemes]\nab = \"x\"\n");
        assert!(validate_dialect(invalid.path()).is_err());
    }

    #[test]
    fn test_execute_counts_failures() {
        let valid = temp_file(".toml", "name = \"vazio\"\n");
        let broken = temp_file(".csv", "header\n1,casa\n");

        let ok = ValidateArgs {
            preset_file: Some(valid.path().to_path_buf()),
            ..args()
        };
        assert!(ok.execute().is_ok());

        let mixed = ValidateArgs {
            preset_file: Some(valid.path().to_path_buf()),
            lexicon: Some(broken.path().to_path_buf()),
            ..args()
        };
        let err = mixed.execute().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: 1 invalid file(s)");
    }

    #[test]
    fn test_validate_args_debug() {
        let args = ValidateArgs {
            dialect_config: Some(PathBuf::from("minhoto.toml")),
            ..args()
        };
        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("ValidateArgs"));
        assert!(debug_str.contains("minhoto.toml"));
    }
}
