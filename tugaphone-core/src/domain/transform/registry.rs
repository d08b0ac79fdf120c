//! Name to rule registry

use super::rules::{builtin_rules, IpaTransform};
use crate::domain::error::{PhonemizerError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

static BUILTIN: OnceLock<Result<RuleRegistry>> = OnceLock::new();

/// Rules addressable by name
///
/// Presets store rule names; the registry turns them back into rules. A
/// rule's own [`IpaTransform::name`] is the reverse direction.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Arc<dyn IpaTransform>>,
}

impl RuleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry holding every built-in rule
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for rule in builtin_rules()? {
            registry.register(Arc::from(rule));
        }
        Ok(registry)
    }

    /// The shared built-in registry, compiled on first use
    pub fn shared() -> Result<&'static RuleRegistry> {
        BUILTIN
            .get_or_init(RuleRegistry::builtin)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Add a rule, replacing any rule with the same name
    pub fn register(&mut self, rule: Arc<dyn IpaTransform>) -> Option<Arc<dyn IpaTransform>> {
        self.rules.insert(rule.name().to_string(), rule)
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn IpaTransform>> {
        self.rules
            .get(name)
            .cloned()
            .ok_or_else(|| PhonemizerError::UnknownRule(name.to_string()))
    }

    /// Look up every name in order, failing on the first unknown one
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Arc<dyn IpaTransform>>> {
        names.iter().map(|name| self.get(name.as_ref())).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn IpaTransform>> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
