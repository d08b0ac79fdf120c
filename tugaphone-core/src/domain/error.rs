use thiserror::Error;

/// Domain-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhonemizerError {
    /// Configuration loading or parsing error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Unsupported dialect requested
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// A character token was built from anything other than one character
    #[error("Character token must contain exactly one character, got: {0:?}")]
    InvalidCharToken(String),

    /// A preset referenced a rule name missing from the registry
    #[error("Unknown ipa transform rule: {0}")]
    UnknownRule(String),

    /// A lexicon row did not have the expected number of columns
    #[error("Malformed lexicon row at line {line}: expected 7 columns, got {columns}")]
    MalformedLexiconRow { line: usize, columns: usize },

    /// A rewrite pattern failed to compile
    #[error("Invalid rewrite pattern: {0}")]
    InvalidPattern(String),
}

impl From<regex::Error> for PhonemizerError {
    fn from(err: regex::Error) -> Self {
        PhonemizerError::InvalidPattern(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PhonemizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PhonemizerError::UnsupportedDialect("pt-XX".to_string());
        assert_eq!(err.to_string(), "Unsupported dialect: pt-XX");

        let err = PhonemizerError::UnknownRule("made_up_rule".to_string());
        assert_eq!(err.to_string(), "Unknown ipa transform rule: made_up_rule");

        let err = PhonemizerError::MalformedLexiconRow {
            line: 3,
            columns: 5,
        };
        assert_eq!(
            err.to_string(),
            "Malformed lexicon row at line 3: expected 7 columns, got 5"
        );
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: PhonemizerError = regex_err.into();
        assert!(matches!(err, PhonemizerError::InvalidPattern(_)));
    }
}
