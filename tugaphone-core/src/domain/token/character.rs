//! Character tokens

use super::features::{put, FeatureMap};
use super::word::WordToken;
use crate::domain::dialect::Dialect;
use crate::domain::error::PhonemizerError;
use crate::domain::phonology::{is_vowel_letter, ConsonantFeatures, Manner, VowelFeatures};
use serde::Serialize;

/// One orthographic character of a word
///
/// Position fields are indices into the owning structures: the character's
/// word inside its sentence, its grapheme inside the word and its place
/// inside that grapheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharToken {
    pub(crate) surface: char,
    pub(crate) lower: char,
    pub(crate) canonical: char,
    pub(crate) idx: usize,
    pub(crate) sentence_idx: usize,
    pub(crate) word_idx: usize,
    pub(crate) grapheme_idx: usize,
    pub(crate) idx_in_grapheme: usize,
    pub(crate) syllable_idx: usize,
    pub(crate) prev: Option<char>,
    pub(crate) next: Option<char>,
    pub(crate) prefix: String,
    pub(crate) suffix: String,
    pub(crate) ipa: String,

    pub(crate) is_first_letter: bool,
    pub(crate) is_last_letter: bool,
    pub(crate) is_punct: bool,
    pub(crate) is_vowel: bool,
    pub(crate) is_consonant: bool,
    pub(crate) is_foreign: bool,
    pub(crate) is_silent: bool,
    pub(crate) is_semivowel: bool,
    pub(crate) is_nasal_vowel: bool,
    pub(crate) is_prepalatal_vowel: bool,
    pub(crate) has_diacritics: bool,
    pub(crate) has_primary_stress: bool,
    pub(crate) has_secondary_stress: bool,

    pub(crate) vowel: Option<VowelFeatures>,
    pub(crate) consonant: Option<ConsonantFeatures>,
}

impl CharToken {
    /// Analyze a lone character as a one-letter word
    ///
    /// Anything other than exactly one character is rejected.
    pub fn new(text: &str, dialect: &Dialect) -> Result<Self, PhonemizerError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => {}
            _ => return Err(PhonemizerError::InvalidCharToken(text.to_string())),
        }

        let word = WordToken::new(text, 0, 0, None, dialect);
        let first = word.chars().next().cloned();
        first.ok_or_else(|| PhonemizerError::InvalidCharToken(text.to_string()))
    }

    pub fn surface(&self) -> char {
        self.surface
    }

    /// Lowercased character
    pub fn normalized(&self) -> char {
        self.lower
    }

    /// Lowercased character with archaic diacritics folded
    pub fn canonical(&self) -> char {
        self.canonical
    }

    pub fn idx_in_word(&self) -> usize {
        self.idx
    }

    pub fn idx_in_sentence(&self) -> usize {
        self.sentence_idx
    }

    pub fn word_idx(&self) -> usize {
        self.word_idx
    }

    /// Index of the parent grapheme in the word
    pub fn grapheme_idx(&self) -> usize {
        self.grapheme_idx
    }

    pub fn idx_in_grapheme(&self) -> usize {
        self.idx_in_grapheme
    }

    pub fn syllable_idx(&self) -> usize {
        self.syllable_idx
    }

    pub fn prev_char(&self) -> Option<char> {
        self.prev
    }

    pub fn next_char(&self) -> Option<char> {
        self.next
    }

    /// Lowercased word text before this character
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Lowercased word text after this character
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn ipa(&self) -> &str {
        &self.ipa
    }

    pub fn is_first_letter(&self) -> bool {
        self.is_first_letter
    }

    pub fn is_last_letter(&self) -> bool {
        self.is_last_letter
    }

    pub fn is_punct(&self) -> bool {
        self.is_punct
    }

    pub fn is_vowel(&self) -> bool {
        self.is_vowel
    }

    pub fn is_consonant(&self) -> bool {
        self.is_consonant
    }

    pub fn is_foreign(&self) -> bool {
        self.is_foreign
    }

    pub fn is_silent(&self) -> bool {
        self.is_silent
    }

    /// Realized as the glide of a diphthong
    pub fn is_semivowel(&self) -> bool {
        self.is_semivowel
    }

    /// The vowel heading its syllable
    pub fn is_nucleus(&self) -> bool {
        self.is_vowel && !self.is_semivowel && !self.is_silent
    }

    pub fn is_nasal_vowel(&self) -> bool {
        self.is_nasal_vowel
    }

    pub fn is_open_vowel(&self) -> bool {
        self.vowel.is_some_and(|v| v.is_open())
    }

    pub fn is_closed_vowel(&self) -> bool {
        self.vowel.is_some_and(|v| v.is_closed())
    }

    pub fn is_front_vowel(&self) -> bool {
        self.vowel.is_some_and(|v| v.is_front())
    }

    pub fn is_back_vowel(&self) -> bool {
        self.vowel.is_some_and(|v| v.is_back())
    }

    pub fn is_rounded_vowel(&self) -> bool {
        self.vowel.is_some_and(|v| v.is_rounded())
    }

    pub fn vowel_features(&self) -> Option<VowelFeatures> {
        self.vowel
    }

    pub fn consonant_features(&self) -> Option<ConsonantFeatures> {
        self.consonant
    }

    pub fn is_sonorant(&self) -> bool {
        self.consonant.is_some_and(|c| c.is_sonorant())
    }

    pub fn is_obstruent(&self) -> bool {
        self.consonant.is_some_and(|c| c.is_obstruent())
    }

    pub fn is_liquid(&self) -> bool {
        self.consonant.is_some_and(|c| c.is_liquid())
    }

    pub fn is_fricative(&self) -> bool {
        self.consonant.is_some_and(|c| c.manner == Manner::Fricative)
    }

    pub fn is_plosive(&self) -> bool {
        self.consonant.is_some_and(|c| c.manner == Manner::Plosive)
    }

    pub fn is_nasal_consonant(&self) -> bool {
        self.consonant.is_some_and(|c| c.manner == Manner::Nasal)
    }

    pub fn is_sibilant(&self) -> bool {
        self.consonant.is_some_and(|c| c.is_sibilant())
    }

    pub fn is_rhotic(&self) -> bool {
        self.consonant.is_some_and(|c| c.is_rhotic())
    }

    fn neighbour_is_vowel(c: Option<char>) -> bool {
        c.is_some_and(is_vowel_letter)
    }

    fn neighbour_is_consonant(c: Option<char>) -> bool {
        c.is_some_and(|c| c.is_alphabetic() && !is_vowel_letter(c))
    }

    pub fn is_intervocalic(&self) -> bool {
        Self::neighbour_is_vowel(self.prev) && Self::neighbour_is_vowel(self.next)
    }

    /// Preceded by a consonant and followed by a vowel
    pub fn is_between_consonant_vowel(&self) -> bool {
        Self::neighbour_is_consonant(self.prev) && Self::neighbour_is_vowel(self.next)
    }

    /// Preceded by a vowel and followed by a consonant
    pub fn is_between_vowel_consonant(&self) -> bool {
        Self::neighbour_is_vowel(self.prev) && Self::neighbour_is_consonant(self.next)
    }

    /// A vowel directly before a palatal or postalveolar consonant
    pub fn is_prepalatal_vowel(&self) -> bool {
        self.is_prepalatal_vowel
    }

    pub fn has_diacritics(&self) -> bool {
        self.has_diacritics
    }

    pub fn has_primary_stress(&self) -> bool {
        self.has_primary_stress
    }

    pub fn has_secondary_stress(&self) -> bool {
        self.has_secondary_stress
    }

    /// Flat feature export
    pub fn features(&self) -> FeatureMap {
        let mut f = FeatureMap::new();
        put(&mut f, "text", self.lower.to_string());
        put(&mut f, "ipa", self.ipa.as_str());
        put(&mut f, "is_first_letter", self.is_first_letter);
        put(&mut f, "is_last_letter", self.is_last_letter);
        put(&mut f, "is_punct", self.is_punct);
        put(&mut f, "is_vowel", self.is_vowel);
        put(&mut f, "is_consonant", self.is_consonant);
        put(&mut f, "is_foreign", self.is_foreign);
        put(&mut f, "is_silent", self.is_silent);
        put(&mut f, "is_semivowel", self.is_semivowel);
        put(&mut f, "is_nucleus", self.is_nucleus());
        put(&mut f, "is_nasal_vowel", self.is_nasal_vowel);
        put(&mut f, "is_open_vowel", self.is_open_vowel());
        put(&mut f, "is_closed_vowel", self.is_closed_vowel());
        put(&mut f, "is_front_vowel", self.is_front_vowel());
        put(&mut f, "is_back_vowel", self.is_back_vowel());
        put(&mut f, "is_rounded_vowel", self.is_rounded_vowel());
        put(&mut f, "vowel_height", self.vowel.map(|v| v.height.as_str()));
        put(&mut f, "vowel_backness", self.vowel.map(|v| v.backness.as_str()));
        put(&mut f, "vowel_roundedness", self.vowel.map(|v| v.roundedness.as_str()));
        put(&mut f, "manner_of_articulation", self.consonant.map(|c| c.manner.as_str()));
        put(&mut f, "place_of_articulation", self.consonant.map(|c| c.place.as_str()));
        put(&mut f, "voicing", self.consonant.map(|c| c.voicing.as_str()));
        put(&mut f, "is_sonorant", self.is_sonorant());
        put(&mut f, "is_obstruent", self.is_obstruent());
        put(&mut f, "is_liquid", self.is_liquid());
        put(&mut f, "is_fricative", self.is_fricative());
        put(&mut f, "is_plosive", self.is_plosive());
        put(&mut f, "is_nasal_consonant", self.is_nasal_consonant());
        put(&mut f, "is_sibilant", self.is_sibilant());
        put(&mut f, "is_rhotic", self.is_rhotic());
        put(&mut f, "is_intervocalic", self.is_intervocalic());
        put(&mut f, "is_between_consonant_vowel", self.is_between_consonant_vowel());
        put(&mut f, "is_between_vowel_consonant", self.is_between_vowel_consonant());
        put(&mut f, "is_prepalatal_vowel", self.is_prepalatal_vowel);
        put(&mut f, "has_diacritics", self.has_diacritics);
        put(&mut f, "has_primary_stress", self.has_primary_stress);
        put(&mut f, "has_secondary_stress", self.has_secondary_stress);
        f
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialect::get_dialect;

    #[test]
    fn test_single_char_only() {
        let pt = get_dialect("pt-PT").unwrap();
        assert!(CharToken::new("a", pt).is_ok());
        assert!(matches!(
            CharToken::new("ab", pt),
            Err(PhonemizerError::InvalidCharToken(_))
        ));
        assert!(matches!(
            CharToken::new("", pt),
            Err(PhonemizerError::InvalidCharToken(_))
        ));
    }

    #[test]
    fn test_lone_consonant_with_cedilla() {
        let pt = get_dialect("pt-PT").unwrap();
        let c = CharToken::new("ç", pt).unwrap();
        assert_eq!(c.surface(), 'ç');
        assert_eq!(c.idx_in_word(), 0);
        assert!(c.is_consonant());
        assert!(!c.is_vowel());
        assert!(c.has_diacritics());
        assert!(c.is_first_letter() && c.is_last_letter());
    }

    #[test]
    fn test_lone_vowel() {
        let pt = get_dialect("pt-PT").unwrap();
        let e = CharToken::new("É", pt).unwrap();
        assert_eq!(e.surface(), 'É');
        assert_eq!(e.normalized(), 'é');
        assert_eq!(e.ipa(), "ɛ");
        assert!(e.is_vowel());
        assert!(e.is_front_vowel());
        assert!(e.is_open_vowel());
        assert!(e.has_diacritics());
        assert!(e.is_first_letter() && e.is_last_letter());
    }

    #[test]
    fn test_lone_consonant() {
        let pt = get_dialect("pt-PT").unwrap();
        let s = CharToken::new("s", pt).unwrap();
        assert!(s.is_consonant());
        assert!(s.is_sibilant());
        assert!(s.is_fricative());
        assert!(!s.is_vowel());

        let h = CharToken::new("h", pt).unwrap();
        assert!(h.is_silent());
        assert_eq!(h.ipa(), "");
    }

    #[test]
    fn test_punct_and_foreign() {
        let pt = get_dialect("pt-PT").unwrap();
        let comma = CharToken::new(",", pt).unwrap();
        assert!(comma.is_punct());
        assert!(!comma.is_vowel() && !comma.is_consonant());
        assert_eq!(comma.ipa(), "");

        let k = CharToken::new("k", pt).unwrap();
        assert!(k.is_foreign());
    }

    #[test]
    fn test_feature_export_keys() {
        let pt = get_dialect("pt-PT").unwrap();
        let features = CharToken::new("a", pt).unwrap().features();
        assert_eq!(features.get("text").and_then(|v| v.as_str()), Some("a"));
        assert_eq!(features.get("is_vowel").and_then(|v| v.as_bool()), Some(true));
        assert!(features.get("manner_of_articulation").is_some_and(|v| v.is_null()));
        assert!(features.contains_key("has_secondary_stress"));
    }
}
