//! Phonological analysis of single words
//!
//! Each submodule is a pure function of its inputs and the active dialect:
//!
//! - **syllabifier**: orthographic syllable boundaries and doubled-consonant
//!   normalization
//! - **segmenter**: grapheme spans inside each syllable
//! - **stress**: primary stress placement
//! - **silent**: letters without phonetic realization
//! - **resolver**: per-character IPA in word context
//! - **features**: articulatory features of IPA symbols

pub mod features;
pub mod resolver;
pub mod segmenter;
pub mod silent;
pub mod stress;
pub mod syllabifier;

pub use features::{
    consonant_features, vowel_features, ConsonantFeatures, Manner, Place, Roundedness,
    VowelBackness, VowelFeatures, VowelHeight, Voicing,
};
pub use resolver::{resolve_char_ipa, CharContext};
pub use segmenter::{segment, segment_word, GraphemeSpan};
pub use silent::is_silent;
pub use stress::{stressed_syllable, StressPattern};
pub use syllabifier::{char_to_syllable_map, normalize_syllables, syllabify};

pub const ACUTE_VOWELS: &str = "áéíóú";
pub const GRAVE_VOWELS: &str = "àèìòù";
pub const CIRCUMFLEX_VOWELS: &str = "âêôîû";
pub const TILDE_VOWELS: &str = "ãõẽĩũ";

/// Vowel letters, including accented forms and the nucleus use of "y"
pub fn is_vowel_letter(c: char) -> bool {
    "aeiouy".contains(c)
        || ACUTE_VOWELS.contains(c)
        || GRAVE_VOWELS.contains(c)
        || CIRCUMFLEX_VOWELS.contains(c)
        || TILDE_VOWELS.contains(c)
        || "äëïöüÿ".contains(c)
}

/// Accents that mark the stressed syllable
pub fn is_stress_accent(c: char) -> bool {
    ACUTE_VOWELS.contains(c) || CIRCUMFLEX_VOWELS.contains(c) || GRAVE_VOWELS.contains(c)
}

pub fn is_tilde_vowel(c: char) -> bool {
    TILDE_VOWELS.contains(c)
}

/// Any orthographic diacritic, cedilla and trema included
pub fn has_diacritic(c: char) -> bool {
    is_stress_accent(c) || is_tilde_vowel(c) || "çüäëïöÿ".contains(c)
}
