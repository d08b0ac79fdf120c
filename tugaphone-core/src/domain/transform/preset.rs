//! Regional presets: a base dialect plus an ordered list of rules

use super::registry::RuleRegistry;
use super::rules::IpaTransform;
use crate::domain::dialect::{canonical_code, region_for_dialect};
use crate::domain::error::{PhonemizerError, Result};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const PRESETS_TOML: &str = include_str!("../../../configs/presets.toml");

static BUILTIN_SPECS: OnceLock<Result<Vec<PresetSpec>>> = OnceLock::new();

fn default_base_dialect() -> String {
    "pt-PT".to_string()
}

fn default_base_region() -> String {
    "lbx".to_string()
}

/// Serialized form of a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_base_dialect")]
    pub base_dialect: String,
    /// Lexicon region consulted for overrides
    #[serde(default = "default_base_region")]
    pub base_region: String,
    #[serde(default)]
    pub ipa_rules: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PresetsFile {
    #[serde(default)]
    presets: Vec<PresetSpec>,
}

fn parse_builtin_specs() -> Result<Vec<PresetSpec>> {
    let file: PresetsFile = toml::from_str(PRESETS_TOML).map_err(|e| {
        PhonemizerError::ConfigurationError(format!("Failed to parse built-in presets: {e}"))
    })?;
    Ok(file.presets)
}

/// Specs of every built-in preset, in file order
pub fn builtin_preset_specs() -> Result<&'static [PresetSpec]> {
    BUILTIN_SPECS
        .get_or_init(parse_builtin_specs)
        .as_ref()
        .map(Vec::as_slice)
        .map_err(Clone::clone)
}

/// Names of the built-in presets
pub fn list_presets() -> Result<Vec<&'static str>> {
    Ok(builtin_preset_specs()?
        .iter()
        .map(|spec| spec.name.as_str())
        .collect())
}

/// A built-in preset by name, resolved against the shared registry
pub fn get_preset(name: &str) -> Result<Preset> {
    let spec = builtin_preset_specs()?
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| PhonemizerError::ConfigurationError(format!("Unknown preset: {name}")))?;
    Preset::from_spec(spec, RuleRegistry::shared()?)
}

/// An ordered rule chain applied over a base dialect's output
///
/// Applying a preset folds its rules over the IPA in list order. Each rule
/// sees the previous rule's output and the original word; an empty preset
/// returns the IPA unchanged.
#[derive(Clone)]
pub struct Preset {
    name: String,
    description: String,
    base_dialect: String,
    base_region: String,
    rules: Vec<Arc<dyn IpaTransform>>,
}

impl fmt::Debug for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preset")
            .field("name", &self.name)
            .field("base_dialect", &self.base_dialect)
            .field("base_region", &self.base_region)
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl Preset {
    /// An empty preset over `base_dialect`, using that dialect's region
    pub fn new(name: &str, base_dialect: &str) -> Result<Self> {
        let code = canonical_code(base_dialect)?;
        Ok(Self {
            name: name.to_string(),
            description: String::new(),
            base_dialect: code.to_string(),
            base_region: region_for_dialect(code)?.to_string(),
            rules: Vec::new(),
        })
    }

    /// Resolve a spec; unknown dialects and rule names are errors
    pub fn from_spec(spec: &PresetSpec, registry: &RuleRegistry) -> Result<Self> {
        let code = canonical_code(&spec.base_dialect)?;
        let rules = registry.resolve(&spec.ipa_rules)?;
        debug!(
            "preset {} over {} with {} rules",
            spec.name,
            code,
            rules.len()
        );
        Ok(Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            base_dialect: code.to_string(),
            base_region: spec.base_region.to_lowercase(),
            rules,
        })
    }

    pub fn to_spec(&self) -> PresetSpec {
        PresetSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            base_dialect: self.base_dialect.clone(),
            base_region: self.base_region.clone(),
            ipa_rules: self.rule_names().into_iter().map(str::to_string).collect(),
        }
    }

    /// Append a rule to the end of the chain
    pub fn with_rule(mut self, rule: Arc<dyn IpaTransform>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.base_region = region.to_lowercase();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn base_dialect(&self) -> &str {
        &self.base_dialect
    }

    pub fn base_region(&self) -> &str {
        &self.base_region
    }

    pub fn rules(&self) -> &[Arc<dyn IpaTransform>] {
        &self.rules
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fold the rules over `ipa` in list order
    pub fn apply(&self, word: &str, ipa: &str, postag: &str) -> String {
        let out = self
            .rules
            .iter()
            .fold(ipa.to_string(), |acc, rule| rule.apply(word, &acc, postag));
        if out != ipa {
            trace!("preset {}: {} {} -> {}", self.name, word, ipa, out);
        }
        out
    }

    pub fn from_toml_str(content: &str, registry: &RuleRegistry) -> Result<Self> {
        let spec: PresetSpec = toml::from_str(content).map_err(|e| {
            PhonemizerError::ConfigurationError(format!("Failed to parse preset TOML: {e}"))
        })?;
        Self::from_spec(&spec, registry)
    }

    pub fn from_json_str(content: &str, registry: &RuleRegistry) -> Result<Self> {
        let spec: PresetSpec = serde_json::from_str(content).map_err(|e| {
            PhonemizerError::ConfigurationError(format!("Failed to parse preset JSON: {e}"))
        })?;
        Self::from_spec(&spec, registry)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(&self.to_spec()).map_err(|e| {
            PhonemizerError::ConfigurationError(format!("Failed to serialize preset: {e}"))
        })
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_spec()).map_err(|e| {
            PhonemizerError::ConfigurationError(format!("Failed to serialize preset: {e}"))
        })
    }

    /// Load a preset file; `.json` files are JSON, anything else TOML
    pub fn from_file(path: &Path, registry: &RuleRegistry) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PhonemizerError::ConfigurationError(format!(
                "Failed to read file '{}': {}",
                path.display(),
                e
            ))
        })?;
        if is_json(path) {
            Self::from_json_str(&content, registry)
        } else {
            Self::from_toml_str(&content, registry)
        }
    }

    /// Write the preset in the format its extension names
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            self.to_json_string()?
        } else {
            self.to_toml_string()?
        };
        std::fs::write(path, content).map_err(|e| {
            PhonemizerError::ConfigurationError(format!(
                "Failed to write file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
