//! Phonemize command implementation

use super::init_logging;
use crate::config::{CliConfig, OutputConfig};
use crate::dialect_source::{DialectCode, DialectSource};
use crate::error::CliError;
use crate::input::{resolve_patterns, sentences, FileReader};
use crate::output::{
    JsonFormatter, MarkdownFormatter, OutputFormatter, PhonemizedLine, TextFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tugaphone_core::{get_preset, Dialect, Lexicon, Phonemizer, Preset, RuleRegistry};

/// Source name used for `--text` input
pub const TEXT_SOURCE: &str = "<text>";

/// Arguments for the phonemize command
#[derive(Debug, Args)]
pub struct PhonemizeArgs {
    /// Text to phonemize, one sentence per line
    #[arg(
        short,
        long,
        value_name = "TEXT",
        required_unless_present = "input",
        conflicts_with = "input"
    )]
    pub text: Option<String>,

    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Embedded dialect
    #[arg(short, long, value_enum, ignore_case = true)]
    pub dialect: Option<DialectCode>,

    /// External dialect configuration file
    #[arg(long, value_name = "FILE", conflicts_with = "dialect")]
    pub dialect_config: Option<PathBuf>,

    /// Dialect code override for the external configuration
    #[arg(long, value_name = "CODE", requires = "dialect_config")]
    pub dialect_code: Option<String>,

    /// Built-in regional preset
    #[arg(short, long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Preset file (TOML, or JSON by extension)
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    pub preset_file: Option<PathBuf>,

    /// Reference lexicon CSV
    #[arg(short, long, value_name = "CSV")]
    pub lexicon: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Force parallel phonemization even for short inputs
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

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
    /// One IPA transcription per line
    Text,
    /// JSON array of lines with source, text and IPA
    Json,
    /// Markdown table of text and IPA
    Markdown,
}

impl OutputFormat {
    /// Parse a format name from a configuration file
    pub fn from_name(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| CliError::ConfigError(format!("Unknown output format: {name}")).into())
    }
}

impl PhonemizeArgs {
    /// Execute the phonemize command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let config = CliConfig::load(self.config.as_deref())?;
        log::info!("Starting phonemization");
        log::debug!("Arguments: {:?}", self);

        self.configure_threads(&config);

        let preset = self.load_preset(&config)?;
        let source = self.dialect_source(&config, preset.as_ref())?;
        let dialect = source.load()?;
        log::info!("Dialect: {}", source.display_name());
        if let Some(preset) = &preset {
            log::info!("Preset: {} ({} rules)", preset.name(), preset.rules().len());
        }

        let phonemizer = self.build_phonemizer(&config)?;
        let inputs = self.collect_inputs()?;
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_name(&config.output.default_format)?,
        };

        let mut formatter = create_formatter(format, self.open_output()?, &config.output);
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(inputs.len() as u64);

        for (source_name, content) in &inputs {
            let lines = sentences(content);
            let parallel =
                self.parallel || lines.len() >= config.performance.parallel_threshold_lines;
            let ipas = phonemize_lines(&phonemizer, &dialect, preset.as_ref(), &lines, parallel);

            for ((line_no, text), ipa) in lines.iter().zip(ipas) {
                formatter.format_line(&PhonemizedLine {
                    source: source_name.clone(),
                    line: *line_no,
                    text: text.to_string(),
                    ipa,
                })?;
            }
            progress.file_completed(source_name, lines.len());
        }

        progress.finish();
        formatter.finish()?;
        log::info!("Phonemized {} input(s)", inputs.len());
        Ok(())
    }

    fn configure_threads(&self, config: &CliConfig) {
        let requested = self.threads.unwrap_or(config.performance.worker_threads);
        let threads = if requested == 0 {
            num_cpus::get()
        } else {
            requested
        };
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            log::debug!("Keeping the existing thread pool: {e}");
        }
        log::debug!("Using {threads} worker threads");
    }

    /// `--preset`, `--preset-file`, then the configured default
    fn load_preset(&self, config: &CliConfig) -> Result<Option<Preset>> {
        if let Some(path) = &self.preset_file {
            let preset = Preset::from_file(path, RuleRegistry::shared()?)
                .with_context(|| format!("Failed to load preset file: {}", path.display()))?;
            return Ok(Some(preset));
        }
        match self
            .preset
            .as_deref()
            .or(config.phonemize.default_preset.as_deref())
        {
            Some(name) => Ok(Some(get_preset(name)?)),
            None => Ok(None),
        }
    }

    /// `--dialect-config`, `--dialect`, the preset's base dialect, then
    /// the configured default
    fn dialect_source(&self, config: &CliConfig, preset: Option<&Preset>) -> Result<DialectSource> {
        if let Some(path) = &self.dialect_config {
            return Ok(DialectSource::External {
                path: path.clone(),
                dialect_code: self.dialect_code.clone(),
            });
        }
        let code = match (self.dialect, preset) {
            (Some(code), _) => code,
            (None, Some(preset)) => DialectCode::from_code(preset.base_dialect())?,
            (None, None) => DialectCode::from_code(&config.phonemize.default_dialect)?,
        };
        if let Some(preset) = preset {
            if preset.base_dialect() != code.code() {
                log::warn!(
                    "Preset {} targets {} but {} was requested",
                    preset.name(),
                    preset.base_dialect(),
                    code.code()
                );
            }
        }
        Ok(DialectSource::BuiltIn(code))
    }

    fn build_phonemizer(&self, config: &CliConfig) -> Result<Phonemizer> {
        let phonemizer = Phonemizer::new()?;
        let path = self
            .lexicon
            .clone()
            .or_else(|| config.phonemize.lexicon.as_ref().map(PathBuf::from));
        let Some(path) = path else {
            return Ok(phonemizer);
        };

        let lexicon = load_lexicon(&path, config.phonemize.lenient_lexicon)?;
        log::info!(
            "Lexicon: {} entries in regions {:?}",
            lexicon.len(),
            lexicon.regions()
        );
        Ok(phonemizer.with_lexicon(lexicon))
    }

    /// `(source name, content)` pairs in input order
    fn collect_inputs(&self) -> Result<Vec<(String, String)>> {
        if let Some(text) = &self.text {
            return Ok(vec![(TEXT_SOURCE.to_string(), text.clone())]);
        }
        if self.input.is_empty() {
            return Err(CliError::NoInput.into());
        }

        resolve_patterns(&self.input)?
            .into_iter()
            .map(|path| -> Result<(String, String)> {
                log::debug!(
                    "Reading {} ({} bytes)",
                    path.display(),
                    FileReader::file_size(&path)?
                );
                let content = FileReader::read_text(&path)?;
                Ok((path.display().to_string(), content))
            })
            .collect()
    }

    fn open_output(&self) -> Result<Box<dyn Write + Send + Sync>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }
}

fn load_lexicon(path: &Path, lenient: bool) -> Result<Lexicon> {
    let content = FileReader::read_text(path)?;
    let lexicon = if lenient {
        Lexicon::from_csv_str_lenient(&content)
    } else {
        Lexicon::from_csv_str(&content)
    };
    lexicon.with_context(|| format!("Failed to load lexicon: {}", path.display()))
}

fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    config: &OutputConfig,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer).with_text(config.include_text)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer).with_pretty(config.pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

fn phonemize_lines(
    phonemizer: &Phonemizer,
    dialect: &Dialect,
    preset: Option<&Preset>,
    lines: &[(usize, &str)],
    parallel: bool,
) -> Vec<String> {
    if parallel {
        lines
            .par_iter()
            .map(|(_, text)| phonemizer.phonemize_with_dialect(text, dialect, preset))
            .collect()
    } else {
        lines
            .iter()
            .map(|(_, text)| phonemizer.phonemize_with_dialect(text, dialect, preset))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> PhonemizeArgs {
        PhonemizeArgs {
            text: None,
            input: Vec::new(),
            output: None,
            format: None,
            dialect: None,
            dialect_config: None,
            dialect_code: None,
            preset: None,
            preset_file: None,
            lexicon: None,
            config: None,
            parallel: false,
            threads: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_output_format_from_name() {
        assert_eq!(OutputFormat::from_name("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_name("yaml").is_err());
    }

    #[test]
    fn test_dialect_resolution_order() {
        let config = CliConfig::default();
        let rio = get_preset("rio-de-janeiro").unwrap();

        let source = args().dialect_source(&config, None).unwrap();
        assert!(matches!(source, DialectSource::BuiltIn(DialectCode::PtPt)));

        let source = args().dialect_source(&config, Some(&rio)).unwrap();
        assert!(matches!(source, DialectSource::BuiltIn(DialectCode::PtBr)));

        let explicit = PhonemizeArgs {
            dialect: Some(DialectCode::PtAo),
            ..args()
        };
        let source = explicit.dialect_source(&config, Some(&rio)).unwrap();
        assert!(matches!(source, DialectSource::BuiltIn(DialectCode::PtAo)));
    }

    #[test]
    fn test_preset_from_config() {
        let mut config = CliConfig::default();
        assert!(args().load_preset(&config).unwrap().is_none());

        config.phonemize.default_preset = Some("minho".to_string());
        let preset = args().load_preset(&config).unwrap().unwrap();
        assert_eq!(preset.name(), "minho");

        config.phonemize.default_preset = Some("atlantis".to_string());
        assert!(args().load_preset(&config).is_err());
    }

    #[test]
    fn test_no_input() {
        let err = args().collect_inputs().unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::NoInput)));
    }

    #[test]
    fn test_execute_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("frases.txt");
        let output = dir.path().join("out.json");
        fs::write(&input, "casa\n\ncasa, casa.\n").unwrap();

        let run = PhonemizeArgs {
            input: vec![input.display().to_string()],
            output: Some(output.clone()),
            format: Some(OutputFormat::Json),
            ..args()
        };
        run.execute().unwrap();

        let lines: Vec<PhonemizedLine> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].ipa, "ˈka·zɐ");
        assert_eq!(lines[1].line, 3);
        assert_eq!(lines[1].ipa, "ˈka·zɐ , ˈka·zɐ .");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let phonemizer = Phonemizer::new().unwrap();
        let dialect = tugaphone_core::get_dialect("pt-BR").unwrap();
        let lines = vec![(1, "o gato"), (2, "a casa"), (3, "bom dia")];
        assert_eq!(
            phonemize_lines(&phonemizer, dialect, None, &lines, true),
            phonemize_lines(&phonemizer, dialect, None, &lines, false)
        );
    }
}
