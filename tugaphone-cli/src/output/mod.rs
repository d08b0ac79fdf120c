//! Output formatting module

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One phonemized line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemizedLine {
    /// Input file, or `<text>` for `--text`
    pub source: String,
    /// 1-based line number in the source
    pub line: usize,
    /// The orthographic input
    pub text: String,
    /// Its IPA transcription
    pub ipa: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single phonemized line
    fn format_line(&mut self, line: &PhonemizedLine) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
