//! Dialect inventories for Portuguese phonemization
//!
//! Every regional variety is one [`Dialect`] built from TOML tables merged
//! over a shared base inventory. Varieties differ only in table contents and
//! a handful of named toggles; the algorithms that consult them are shared.
//!
//! # Usage
//!
//! ```rust
//! use tugaphone_core::domain::dialect::{get_dialect, DialectRules, TextWindow};
//!
//! let br = get_dialect("pt-BR").unwrap();
//! assert!(br.is_diphthong(&TextWindow::new("portug", "al", "")));
//!
//! let pt = get_dialect("pt-PT").unwrap();
//! assert!(!pt.is_diphthong(&TextWindow::new("portug", "al", "")));
//! ```

pub mod config;
pub mod configurable;
pub mod traits;

pub use config::{
    base_config, get_dialect_config, list_available_dialects, CharactersConfig, DialectConfig,
    FinalSibilant, GraphemesConfig, LexicalConfig, MetadataConfig, PreNasalA, StrongRhotic,
    TogglesConfig, VowelReduction, VowelsConfig,
};
pub use configurable::{get_dialect, Dialect};
pub use traits::{DialectRules, GraphemeKind, TextWindow};

use crate::domain::error::PhonemizerError;

/// Dialect code and the region key of its reference lexicon
const REGIONS: &[(&str, &str)] = &[
    ("pt-PT", "lbx"),
    ("pt-BR", "rjx"),
    ("pt-AO", "lda"),
    ("pt-MZ", "mpx"),
    ("pt-TL", "dli"),
];

/// Canonical spelling of a dialect code, matched case-insensitively
pub fn canonical_code(code: &str) -> Result<&'static str, PhonemizerError> {
    REGIONS
        .iter()
        .map(|(c, _)| *c)
        .find(|c| c.eq_ignore_ascii_case(code))
        .ok_or_else(|| PhonemizerError::UnsupportedDialect(code.to_string()))
}

/// Region key for a dialect code ("pt-PT" -> "lbx")
pub fn region_for_dialect(code: &str) -> Result<&'static str, PhonemizerError> {
    REGIONS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, region)| *region)
        .ok_or_else(|| PhonemizerError::UnsupportedDialect(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_mapping() {
        assert_eq!(region_for_dialect("pt-PT").unwrap(), "lbx");
        assert_eq!(region_for_dialect("pt-BR").unwrap(), "rjx");
        assert_eq!(region_for_dialect("pt-AO").unwrap(), "lda");
        assert_eq!(region_for_dialect("pt-MZ").unwrap(), "mpx");
        assert_eq!(region_for_dialect("pt-tl").unwrap(), "dli");
        assert!(matches!(
            region_for_dialect("es-ES"),
            Err(PhonemizerError::UnsupportedDialect(_))
        ));
    }

    #[test]
    fn test_canonical_code() {
        assert_eq!(canonical_code("pt-br").unwrap(), "pt-BR");
        assert_eq!(canonical_code("PT-PT").unwrap(), "pt-PT");
        assert!(canonical_code("pt").is_err());
    }

    #[test]
    fn test_embedded_regions_agree() {
        for (code, region) in REGIONS {
            assert_eq!(get_dialect(code).unwrap().region(), *region);
        }
    }
}
