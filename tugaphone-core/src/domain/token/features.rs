//! Flat feature export shared by every token level

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One exported feature value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Int(i64),
    Str(String),
    Null,
}

/// Feature name to value, ordered by name
pub type FeatureMap = BTreeMap<String, FeatureValue>;

impl FeatureValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FeatureValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FeatureValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeatureValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FeatureValue::Null)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Bool(b) => write!(f, "{b}"),
            FeatureValue::Int(i) => write!(f, "{i}"),
            FeatureValue::Str(s) => write!(f, "{s}"),
            FeatureValue::Null => write!(f, "null"),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<usize> for FeatureValue {
    fn from(value: usize) -> Self {
        FeatureValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Int(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Str(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Str(value)
    }
}

impl<T: Into<FeatureValue>> From<Option<T>> for FeatureValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FeatureValue::Null, Into::into)
    }
}

/// Insert `name = value` into `map`
pub(crate) fn put(map: &mut FeatureMap, name: &str, value: impl Into<FeatureValue>) {
    map.insert(name.to_string(), value.into());
}

/// Copy every child feature into `map` under `prefix`
pub(crate) fn nest(map: &mut FeatureMap, prefix: &str, child: FeatureMap) {
    for (key, value) in child {
        map.insert(format!("{prefix}{key}"), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(FeatureValue::from(true), FeatureValue::Bool(true));
        assert_eq!(FeatureValue::from(3usize), FeatureValue::Int(3));
        assert_eq!(FeatureValue::from("ʃ"), FeatureValue::Str("ʃ".to_string()));
        assert_eq!(FeatureValue::from(None::<&str>), FeatureValue::Null);
        assert_eq!(FeatureValue::from(Some("close")).as_str(), Some("close"));
    }

    #[test]
    fn test_untagged_json() {
        let mut map = FeatureMap::new();
        put(&mut map, "is_vowel", true);
        put(&mut map, "n_chars", 2usize);
        put(&mut map, "ipa", "ɐ̃w");
        put(&mut map, "prev_syllable", None::<String>);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"ipa":"ɐ̃w","is_vowel":true,"n_chars":2,"prev_syllable":null}"#
        );

        let back: FeatureMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_nest_prefixes_keys() {
        let mut child = FeatureMap::new();
        put(&mut child, "text", "c");
        let mut parent = FeatureMap::new();
        nest(&mut parent, "char_0_", child);
        assert_eq!(parent.get("char_0_text").and_then(|v| v.as_str()), Some("c"));
    }
}
