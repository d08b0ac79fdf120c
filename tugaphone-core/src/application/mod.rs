//! Application layer: tagging, lexicon overrides and the phonemizer facade
//!
//! The domain layer turns one tagged sentence into tokens and IPA. This
//! layer decides where the tags come from, which gold pronunciations
//! override the generated ones and which regional preset rewrites the
//! result.
//!
//! # Example
//!
//! ```rust
//! use tugaphone_core::application::Phonemizer;
//!
//! let phonemizer = Phonemizer::new().unwrap();
//! assert_eq!(phonemizer.phonemize("casa", "pt-PT").unwrap(), "ˈka·zɐ");
//! ```

pub mod lexicon;
pub mod phonemizer;
pub mod tagger;

pub use lexicon::Lexicon;
pub use phonemizer::Phonemizer;
pub use tagger::{DictionaryTagger, Tagger, WhitespaceTagger, DEFAULT_TAG};
