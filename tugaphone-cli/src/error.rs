//! Error handling for the CLI application

use std::fmt;

/// Failures specific to the command line surface
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Phonemization error from core
    PhonemizationError(String),
    /// Nothing to phonemize
    NoInput,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::PhonemizationError(msg) => write!(f, "Phonemization error: {msg}"),
            CliError::NoInput => write!(f, "No input: pass --text or --input"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<tugaphone_core::PhonemizerError> for CliError {
    fn from(err: tugaphone_core::PhonemizerError) -> Self {
        match err {
            tugaphone_core::PhonemizerError::ConfigurationError(msg) => CliError::ConfigError(msg),
            other => CliError::PhonemizationError(other.to_string()),
        }
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use tugaphone_core::PhonemizerError;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::FileNotFound("texto.txt".to_string()).to_string(),
            "File not found: texto.txt"
        );
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("missing field 'name'".to_string()).to_string(),
            "Configuration error: missing field 'name'"
        );
        assert_eq!(
            CliError::NoInput.to_string(),
            "No input: pass --text or --input"
        );
    }

    #[test]
    fn test_from_core_error() {
        let err: CliError = PhonemizerError::UnsupportedDialect("pt-XX".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Phonemization error: Unsupported dialect: pt-XX"
        );

        let err: CliError = PhonemizerError::ConfigurationError("bad toml".to_string()).into();
        assert!(matches!(err, CliError::ConfigError(ref msg) if msg == "bad toml"));
    }

    #[test]
    fn test_cli_result_wraps_cli_error() {
        let failure: CliResult<()> = Err(CliError::NoInput.into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert!(err.to_string().contains("No input"));
    }

    #[test]
    fn test_error_with_non_ascii_path() {
        let error = CliError::FileNotFound("textos/ação e coração.txt".to_string());
        assert_eq!(
            error.to_string(),
            "File not found: textos/ação e coração.txt"
        );
    }
}
