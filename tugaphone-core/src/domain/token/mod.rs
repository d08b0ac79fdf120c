//! Token hierarchy: sentence, word, grapheme, character
//!
//! A [`Sentence`] owns its [`WordToken`]s, a word owns its
//! [`GraphemeToken`]s and a grapheme owns its [`CharToken`]s. Children refer
//! back to their parents by index only, so the tree has a single owner and
//! every token is immutable once built.
//!
//! # Example
//!
//! ```rust
//! use tugaphone_core::domain::dialect::get_dialect;
//! use tugaphone_core::domain::token::Sentence;
//!
//! let pt = get_dialect("pt-PT").unwrap();
//! let sentence = Sentence::new("a chave", pt);
//!
//! let chave = sentence.word(1).unwrap();
//! assert_eq!(chave.graphemes()[0].text(), "ch");
//! assert_eq!(chave.graphemes()[0].ipa(), "ʃ");
//! ```

pub mod character;
pub mod features;
pub mod grapheme;
pub mod sentence;
pub mod word;

pub use character::CharToken;
pub use features::{FeatureMap, FeatureValue};
pub use grapheme::{GraphemeToken, SyllablePosition};
pub use sentence::{split_words, Sentence};
pub use word::WordToken;
