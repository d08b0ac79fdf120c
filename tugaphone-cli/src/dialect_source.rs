//! Dialect source management for CLI

use anyhow::{Context, Result};
use std::borrow::Cow;
use std::path::PathBuf;
use tugaphone_core::{canonical_code, get_dialect, Dialect};

/// Embedded dialects selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DialectCode {
    /// European Portuguese
    #[value(name = "pt-pt")]
    PtPt,
    /// Brazilian Portuguese
    #[value(name = "pt-br")]
    PtBr,
    /// Angolan Portuguese
    #[value(name = "pt-ao")]
    PtAo,
    /// Mozambican Portuguese
    #[value(name = "pt-mz")]
    PtMz,
    /// Timorese Portuguese
    #[value(name = "pt-tl")]
    PtTl,
}

impl DialectCode {
    pub const ALL: [DialectCode; 5] = [
        DialectCode::PtPt,
        DialectCode::PtBr,
        DialectCode::PtAo,
        DialectCode::PtMz,
        DialectCode::PtTl,
    ];

    /// Canonical dialect code
    pub fn code(&self) -> &'static str {
        match self {
            DialectCode::PtPt => "pt-PT",
            DialectCode::PtBr => "pt-BR",
            DialectCode::PtAo => "pt-AO",
            DialectCode::PtMz => "pt-MZ",
            DialectCode::PtTl => "pt-TL",
        }
    }

    /// Parse a dialect code in any letter case
    pub fn from_code(code: &str) -> Result<Self> {
        let canonical = canonical_code(code)?;
        Self::ALL
            .into_iter()
            .find(|d| d.code() == canonical)
            .with_context(|| format!("No command line name for dialect {canonical}"))
    }
}

/// Source of the dialect inventory
#[derive(Debug, Clone)]
pub enum DialectSource {
    /// Embedded dialect
    BuiltIn(DialectCode),
    /// External configuration file
    External {
        /// Path to the configuration file
        path: PathBuf,
        /// Optional dialect code override
        dialect_code: Option<String>,
    },
}

impl DialectSource {
    /// Get the display name for the dialect source
    pub fn display_name(&self) -> String {
        match self {
            DialectSource::BuiltIn(code) => format!("Built-in: {}", code.code()),
            DialectSource::External { path, dialect_code } => match dialect_code {
                Some(code) => format!("External: {} (code: {})", path.display(), code),
                None => format!("External: {}", path.display()),
            },
        }
    }

    /// Load the dialect; embedded ones are borrowed from the shared registry
    pub fn load(&self) -> Result<Cow<'static, Dialect>> {
        match self {
            DialectSource::BuiltIn(code) => Ok(Cow::Borrowed(get_dialect(code.code())?)),
            DialectSource::External { path, dialect_code } => {
                let dialect = Dialect::from_file(path, dialect_code.as_deref()).with_context(
                    || format!("Failed to load dialect config: {}", path.display()),
                )?;
                Ok(Cow::Owned(dialect))
            }
        }
    }
}
