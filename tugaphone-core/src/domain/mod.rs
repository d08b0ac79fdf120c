//! Domain layer: dialect inventories and the phonological analysis
//!
//! Everything here is a deterministic function of the input text and an
//! immutable [`dialect::Dialect`]. Orchestration (tagging, lexicon
//! overrides, batches) lives in the application layer.

pub mod dialect;
pub mod error;
pub mod ipa;
pub mod phonology;
pub mod token;
pub mod transform;

pub use dialect::{get_dialect, Dialect, DialectRules};
pub use error::{PhonemizerError, Result};
pub use token::{CharToken, FeatureMap, FeatureValue, GraphemeToken, Sentence, WordToken};
pub use transform::{IpaTransform, Preset, PresetSpec, RuleRegistry};
