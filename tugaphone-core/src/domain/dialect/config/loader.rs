use super::types::DialectConfig;
use crate::domain::error::PhonemizerError;
use std::collections::HashMap;
use std::sync::OnceLock;

type ConfigRegistry = Result<HashMap<String, DialectConfig>, PhonemizerError>;

static BASE_CONFIG: OnceLock<Result<DialectConfig, PhonemizerError>> = OnceLock::new();
static DIALECT_CONFIGS: OnceLock<ConfigRegistry> = OnceLock::new();

macro_rules! embed_dialect_config {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

const BASE_TOML: &str = include_str!("../../../../configs/dialects/base.toml");

fn parse_config(code: &str, toml_content: &str) -> Result<DialectConfig, PhonemizerError> {
    toml::from_str(toml_content).map_err(|e| {
        PhonemizerError::ConfigurationError(format!("Failed to parse {code} config: {e}"))
    })
}

fn load_base_config() -> Result<DialectConfig, PhonemizerError> {
    parse_config("base", BASE_TOML)
}

/// Shared tables every dialect is merged onto
pub fn base_config() -> Result<&'static DialectConfig, PhonemizerError> {
    BASE_CONFIG
        .get_or_init(load_base_config)
        .as_ref()
        .map_err(Clone::clone)
}

fn load_embedded_configs() -> ConfigRegistry {
    let base = base_config()?;
    let mut configs = HashMap::new();

    let embedded_configs = [
        embed_dialect_config!("pt-PT", "../../../../configs/dialects/pt-PT.toml"),
        embed_dialect_config!("pt-BR", "../../../../configs/dialects/pt-BR.toml"),
        embed_dialect_config!("pt-AO", "../../../../configs/dialects/pt-AO.toml"),
        embed_dialect_config!("pt-MZ", "../../../../configs/dialects/pt-MZ.toml"),
        embed_dialect_config!("pt-TL", "../../../../configs/dialects/pt-TL.toml"),
    ];

    for (code, toml_content) in embedded_configs {
        let overlay = parse_config(code, toml_content)?;

        if overlay.metadata.code != code {
            return Err(PhonemizerError::ConfigurationError(format!(
                "Config code mismatch: expected {}, got {}",
                code, overlay.metadata.code
            )));
        }

        let merged = overlay.merged_over(base);
        merged.validate()?;
        configs.insert(code.to_string(), merged);
    }

    Ok(configs)
}

fn registry() -> Result<&'static HashMap<String, DialectConfig>, PhonemizerError> {
    DIALECT_CONFIGS
        .get_or_init(load_embedded_configs)
        .as_ref()
        .map_err(Clone::clone)
}

/// Merged configuration of an embedded dialect, by exact code
pub fn get_dialect_config(code: &str) -> Result<&'static DialectConfig, PhonemizerError> {
    registry()?
        .get(code)
        .ok_or_else(|| PhonemizerError::UnsupportedDialect(code.to_string()))
}

/// Codes of all embedded dialects, sorted
pub fn list_available_dialects() -> Vec<&'static str> {
    let mut codes: Vec<&'static str> = match registry() {
        Ok(configs) => configs.keys().map(|s| s.as_str()).collect(),
        Err(e) => {
            log::error!("Embedded dialect configs failed to load: {e}");
            Vec::new()
        }
    };
    codes.sort_unstable();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialect::config::{FinalSibilant, StrongRhotic, VowelReduction};

    #[test]
    fn test_get_dialect_config_unsupported() {
        match get_dialect_config("pt-XX") {
            Err(PhonemizerError::UnsupportedDialect(code)) => {
                assert_eq!(code, "pt-XX");
            }
            _ => panic!("Expected UnsupportedDialect error"),
        }
    }

    #[test]
    fn test_get_dialect_config_european() {
        let config = get_dialect_config("pt-PT").expect("pt-PT config should exist");
        assert_eq!(config.metadata.code, "pt-PT");
        assert_eq!(config.metadata.region, "lbx");
        assert_eq!(config.toggles.coda_l_semivowel, Some(false));
        assert_eq!(config.toggles.strong_rhotic, Some(StrongRhotic::Uvular));
        assert!(config.homographs.contains_key("sede"));
        // Inherited from the base tables
        assert_eq!(config.graphemes.digraphs["nh"], "ɲ");
    }

    #[test]
    fn test_get_dialect_config_brazilian() {
        let config = get_dialect_config("pt-BR").unwrap();
        assert_eq!(config.metadata.region, "rjx");
        assert_eq!(config.toggles.coda_l_semivowel, Some(true));
        assert_eq!(config.toggles.vowel_reduction, Some(VowelReduction::Weak));
        assert_eq!(config.toggles.final_sibilant, Some(FinalSibilant::Alveolar));
        assert_eq!(config.vowels.final_["e"], "i");
    }

    #[test]
    fn test_list_available_dialects() {
        let dialects = list_available_dialects();
        assert_eq!(dialects, vec!["pt-AO", "pt-BR", "pt-MZ", "pt-PT", "pt-TL"]);
    }

    #[test]
    fn test_get_dialect_config_multiple_times() {
        let config1 = get_dialect_config("pt-PT").unwrap();
        let config2 = get_dialect_config("pt-PT").unwrap();
        assert!(std::ptr::eq(config1, config2));
    }

    #[test]
    fn test_base_config_is_complete() {
        let base = base_config().unwrap();
        assert_eq!(base.metadata.code, "base");
        assert!(!base.phonemes.is_empty());
        assert_eq!(base.lexical.irregular_words["muito"], "ˈmũj·tu");
    }
}
