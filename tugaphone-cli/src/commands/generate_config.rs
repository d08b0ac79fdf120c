//! Generate config command implementation

use crate::dialect_source::DialectCode;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tugaphone_core::get_dialect;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Dialect code for the new configuration
    #[arg(short = 'c', long, value_name = "CODE", required = true)]
    pub dialect_code: String,

    /// Embedded dialect whose toggles seed the template
    #[arg(short, long, value_enum, ignore_case = true, default_value = "pt-pt")]
    pub base: DialectCode,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating dialect configuration template...");
        println!("  Dialect code: {}", self.dialect_code);
        println!("  Based on: {}", self.base.code());
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;
        std::fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the toggles and tables for your variety");
        println!("2. Validate your configuration:");
        println!(
            "   tugaphone validate --dialect-config {}",
            self.output.display()
        );
        println!("3. Use it for phonemization:");
        println!(
            "   tugaphone phonemize -t \"Olá mundo\" --dialect-config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Template content: metadata, the base dialect's toggles and commented
    /// table examples
    fn generate_template(&self) -> Result<String> {
        let base = get_dialect(self.base.code())?;
        let toggles = toml::to_string(&base.config().toggles)
            .context("Failed to serialize base dialect toggles")?;

        Ok(format!(
            r#"# Dialect configuration for {code}
# Tables not listed here are inherited from the shared base inventory.

[metadata]
code = "{code}"
name = "Custom Portuguese variety"
# Region key used for reference lexicon lookups
region = "{region}"

# Named switches, copied from {base_code}
#   coda_l_semivowel: vocalize coda l ("Portugal" -> ...w)
#   strong_rhotic:    uvular | glottal | alveolar
#   vowel_reduction:  none | weak | strong
#   final_sibilant:   postalveolar | alveolar
#   pre_nasal_a:      keep | raise | nasalize
[toggles]
{toggles}
# Default phoneme per letter (single-character keys)
[phonemes]
# a = "a"

# Vowel qualities by position (single-character keys)
[vowels.final]
# e = "i"
# o = "u"

[vowels.reduced]
# e = "ɨ"

# Grapheme tables map spellings to IPA
[graphemes.digraphs]
# lh = "ʎ"

# Words with a fixed pronunciation
[lexical.irregular_words]
# muito = "ˈmũj·tu"

# Part-of-speech dependent readings
[homographs]
# sede = {{ NOUN = "ˈse·dɨ", VERB = "ˈsɛ·dɨ" }}
"#,
            code = self.dialect_code,
            region = base.config().metadata.region,
            base_code = self.base.code(),
            toggles = toggles,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tugaphone_core::{Dialect, DialectRules};

    #[test]
    fn test_generate_template() {
        let args = GenerateConfigArgs {
            dialect_code: "pt-MI".to_string(),
            base: DialectCode::PtBr,
            output: PathBuf::from("minhoto.toml"),
        };

        let template = args.generate_template().unwrap();
        assert!(template.contains("code = \"pt-MI\""));
        assert!(template.contains("region = \"rjx\""));
        assert!(template.contains("strong_rhotic = \"glottal\""));
        assert!(template.contains("[graphemes.digraphs]"));
    }

    #[test]
    fn test_generated_template_loads() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("pt-mi.toml");

        let args = GenerateConfigArgs {
            dialect_code: "pt-MI".to_string(),
            base: DialectCode::PtPt,
            output: output_path.clone(),
        };
        args.execute().unwrap();

        let dialect = Dialect::from_file(&output_path, None).unwrap();
        assert_eq!(dialect.code(), "pt-MI");
        assert_eq!(dialect.region(), "lbx");
        assert!(!dialect.coda_l_semivowel());
    }
}
