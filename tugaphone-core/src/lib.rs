//! Dialect-aware Portuguese grapheme-to-phoneme conversion
//!
//! This crate turns Portuguese orthography into IPA for five national
//! varieties (pt-PT, pt-BR, pt-AO, pt-MZ, pt-TL). Every word is analyzed
//! into a tree of graphemes and characters with syllables, stress and
//! articulatory features, and the IPA is composed bottom-up from that tree.
//! Regional accents on top of a national variety are ordered chains of IPA
//! rewrite rules.
//!
//! # Architecture
//!
//! - **Domain layer**: dialect inventories, syllabification, stress,
//!   feature resolution, the token hierarchy, IPA composition and the
//!   regional rewrite rules. Pure functions of text and dialect.
//! - **Application layer**: part-of-speech tagging, the reference lexicon
//!   and the [`Phonemizer`] facade that ties them together.
//!
//! # Example
//!
//! ```rust
//! use tugaphone_core::{get_preset, Phonemizer};
//!
//! let phonemizer = Phonemizer::new().unwrap();
//!
//! // Same word, three varieties
//! assert_eq!(phonemizer.phonemize("bonito", "pt-PT").unwrap(), "bu·ˈni·tu");
//! assert_eq!(phonemizer.phonemize("bonito", "pt-BR").unwrap(), "bo·ˈni·tu");
//! assert_eq!(phonemizer.phonemize("bonito", "pt-TL").unwrap(), "bo·ˈni·to");
//!
//! // A northern Portuguese accent
//! let minho = get_preset("minho").unwrap();
//! assert_eq!(phonemizer.phonemize_with_preset("rato", &minho).unwrap(), "ˈra·tu");
//! ```
//!
//! The token tree is available directly for feature extraction:
//!
//! ```rust
//! use tugaphone_core::{get_dialect, Sentence};
//!
//! let br = get_dialect("pt-BR").unwrap();
//! let sentence = Sentence::new("Portugal", br);
//! let word = sentence.word(0).unwrap();
//!
//! assert_eq!(word.stressed_syllable_idx(), 2);
//! assert!(word.graphemes().last().unwrap().is_diphthong());
//! ```

pub mod application;
pub mod domain;

pub use application::{DictionaryTagger, Lexicon, Phonemizer, Tagger, WhitespaceTagger};
pub use domain::dialect::{
    canonical_code, get_dialect, list_available_dialects, region_for_dialect, Dialect,
    DialectRules,
};
pub use domain::error::{PhonemizerError, Result};
pub use domain::token::{
    CharToken, FeatureMap, FeatureValue, GraphemeToken, Sentence, SyllablePosition, WordToken,
};
pub use domain::transform::{
    get_preset, list_presets, IpaTransform, Preset, PresetSpec, RuleRegistry,
};
