//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Phonemization defaults
    #[serde(default)]
    pub phonemize: PhonemizeConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Phonemization defaults used when no flag overrides them
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhonemizeConfig {
    /// Dialect code used when neither `--dialect` nor a preset picks one
    pub default_dialect: String,

    /// Built-in preset applied by default
    pub default_preset: Option<String>,

    /// Reference lexicon CSV consulted for overrides
    pub lexicon: Option<String>,

    /// Skip malformed lexicon rows instead of failing
    pub lenient_lexicon: bool,
}

impl Default for PhonemizeConfig {
    fn default() -> Self {
        Self {
            default_dialect: "pt-PT".to_string(),
            default_preset: None,
            lexicon: None,
            lenient_lexicon: false,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Prefix text output with the source line and a tab
    pub include_text: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            include_text: false,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Line count from which batches run in parallel
    pub parallel_threshold_lines: usize,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threshold_lines: 256,
            worker_threads: 0,
        }
    }
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// The default configuration, or the file's when one is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.phonemize.default_dialect, "pt-PT");
        assert_eq!(config.output.default_format, "text");
        assert!(config.output.pretty_json);
        assert_eq!(config.performance.worker_threads, 0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[phonemize]
default_dialect = "pt-BR"
default_preset = "sao-paulo"

[output]
pretty_json = false
"#
        )
        .unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.phonemize.default_dialect, "pt-BR");
        assert_eq!(config.phonemize.default_preset.as_deref(), Some("sao-paulo"));
        assert!(!config.output.pretty_json);
        assert_eq!(config.output.default_format, "text");
        assert_eq!(config.performance, PerformanceConfig::default());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[phonemize\ndefault_dialect = 3").unwrap();
        let err = CliConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let err = CliConfig::from_file(Path::new("/nonexistent/tugaphone.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_serializes_back() {
        let text = toml::to_string(&CliConfig::default()).unwrap();
        assert!(text.contains("[phonemize]"));
        assert!(text.contains("[performance]"));
        let parsed: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }
}
