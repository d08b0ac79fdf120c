//! Regional IPA transforms
//!
//! Regional accents are expressed as rewrites of the base dialect's output
//! rather than as separate inventories. A [`Preset`] names a base dialect
//! and an ordered chain of [`IpaTransform`] rules looked up by name in a
//! [`RuleRegistry`].
//!
//! # Example
//!
//! ```rust
//! use tugaphone_core::domain::transform::get_preset;
//!
//! let minho = get_preset("minho").unwrap();
//! assert_eq!(minho.base_dialect(), "pt-PT");
//! assert_eq!(minho.apply("rato", "ˈʁa·tu", "NOUN"), "ˈra·tu");
//! ```

pub mod preset;
pub mod registry;
pub mod rules;

pub use preset::{builtin_preset_specs, get_preset, list_presets, Preset, PresetSpec};
pub use registry::RuleRegistry;
pub use rules::{builtin_rules, IpaTransform, OuDiphthongRetention, Rewrite, RewriteRule, WordGuard};
