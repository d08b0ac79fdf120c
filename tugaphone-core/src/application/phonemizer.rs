//! Sentence phonemization facade

use super::lexicon::Lexicon;
use super::tagger::{Tagger, WhitespaceTagger, DEFAULT_TAG};
use crate::domain::dialect::{canonical_code, get_dialect, Dialect, DialectRules};
use crate::domain::error::Result;
use crate::domain::ipa::{sentence_ipa, PUNCT_TAG};
use crate::domain::token::Sentence;
use crate::domain::transform::{Preset, PresetSpec, RuleRegistry};
use log::debug;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tags text, builds the token tree and composes the final IPA
///
/// Per word, a lexicon entry for (word, tag, region) replaces the generated
/// IPA, then the preset's rules rewrite the result. PUNCT tokens pass
/// through as written.
#[derive(Clone)]
pub struct Phonemizer {
    tagger: Arc<dyn Tagger>,
    lexicon: Option<Arc<Lexicon>>,
    registry: RuleRegistry,
}

impl std::fmt::Debug for Phonemizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Phonemizer")
            .field("tagger", &self.tagger.name())
            .field("lexicon_entries", &self.lexicon.as_ref().map(|l| l.len()))
            .field("rules", &self.registry.len())
            .finish()
    }
}

impl Phonemizer {
    /// Whitespace tagging, no lexicon, built-in rules
    pub fn new() -> Result<Self> {
        Ok(Self {
            tagger: Arc::new(WhitespaceTagger),
            lexicon: None,
            registry: RuleRegistry::shared()?.clone(),
        })
    }

    pub fn with_tagger<T: Tagger + 'static>(mut self, tagger: T) -> Self {
        self.tagger = Arc::new(tagger);
        self
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(Arc::new(lexicon));
        self
    }

    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn tagger(&self) -> &dyn Tagger {
        self.tagger.as_ref()
    }

    pub fn lexicon(&self) -> Option<&Lexicon> {
        self.lexicon.as_deref()
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Resolve a preset spec against this phonemizer's registry
    pub fn preset(&self, spec: &PresetSpec) -> Result<Preset> {
        Preset::from_spec(spec, &self.registry)
    }

    /// Phonemize with one of the embedded dialects ("pt-PT", "pt-br", ...)
    pub fn phonemize(&self, text: &str, dialect_code: &str) -> Result<String> {
        let dialect = get_dialect(canonical_code(dialect_code)?)?;
        Ok(self.phonemize_with_dialect(text, dialect, None))
    }

    /// Phonemize with the preset's base dialect, lexicon region and rules
    pub fn phonemize_with_preset(&self, text: &str, preset: &Preset) -> Result<String> {
        let dialect = get_dialect(preset.base_dialect())?;
        Ok(self.phonemize_with_dialect(text, dialect, Some(preset)))
    }

    /// Phonemize with any dialect, including ones loaded from files
    ///
    /// The lexicon region is the preset's when one is given, otherwise the
    /// dialect's own.
    pub fn phonemize_with_dialect(
        &self,
        text: &str,
        dialect: &Dialect,
        preset: Option<&Preset>,
    ) -> String {
        let region = match preset {
            Some(p) => p.base_region(),
            None => dialect.region(),
        };
        let sentence = self.analyze_with_dialect(text, dialect);

        let ipas: Vec<String> = sentence
            .words()
            .iter()
            .map(|word| {
                let pos = word.postag().unwrap_or(DEFAULT_TAG);
                if pos == PUNCT_TAG {
                    return String::new();
                }
                let base = self
                    .lexicon
                    .as_ref()
                    .and_then(|lex| lex.get_phonemes(word.normalized(), pos, region))
                    .unwrap_or_else(|| word.ipa());
                match preset {
                    Some(p) => p.apply(word.normalized(), base, pos),
                    None => base.to_string(),
                }
            })
            .collect();

        debug!(
            "phonemized {} tokens with {} (region {})",
            ipas.len(),
            dialect.code(),
            region
        );

        sentence_ipa(
            sentence
                .words()
                .iter()
                .zip(&ipas)
                .map(|(w, ipa)| (w.surface(), w.postag(), ipa.as_str())),
        )
    }

    /// Phonemize many texts with one dialect, in parallel when enabled
    pub fn phonemize_batch<S>(&self, texts: &[S], dialect_code: &str) -> Result<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        let dialect = get_dialect(canonical_code(dialect_code)?)?;
        Ok(self.batch(texts, dialect, None))
    }

    /// Batch form of [`Self::phonemize_with_preset`]
    pub fn phonemize_batch_with_preset<S>(&self, texts: &[S], preset: &Preset) -> Result<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        let dialect = get_dialect(preset.base_dialect())?;
        Ok(self.batch(texts, dialect, Some(preset)))
    }

    #[cfg(feature = "parallel")]
    fn batch<S>(&self, texts: &[S], dialect: &Dialect, preset: Option<&Preset>) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|t| self.phonemize_with_dialect(t.as_ref(), dialect, preset))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn batch<S>(&self, texts: &[S], dialect: &Dialect, preset: Option<&Preset>) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .iter()
            .map(|t| self.phonemize_with_dialect(t.as_ref(), dialect, preset))
            .collect()
    }

    /// Tag and analyze text with an embedded dialect
    pub fn analyze(&self, text: &str, dialect_code: &str) -> Result<Sentence<'static>> {
        let dialect = get_dialect(canonical_code(dialect_code)?)?;
        Ok(self.analyze_with_dialect(text, dialect))
    }

    pub fn analyze_with_dialect<'d>(&self, text: &str, dialect: &'d Dialect) -> Sentence<'d> {
        let tagged = self.tagger.tag(text);
        Sentence::from_postagged(&tagged, dialect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tagger::DictionaryTagger;
    use crate::domain::error::PhonemizerError;
    use crate::domain::transform::get_preset;

    #[test]
    fn test_phonemize_basic() {
        let phonemizer = Phonemizer::new().unwrap();
        assert_eq!(phonemizer.phonemize("casa", "pt-PT").unwrap(), "ˈka·zɐ");
        assert_eq!(phonemizer.phonemize("casa", "PT-pt").unwrap(), "ˈka·zɐ");
        assert_eq!(phonemizer.phonemize("", "pt-PT").unwrap(), "");
    }

    #[test]
    fn test_punctuation_passes_through() {
        let phonemizer = Phonemizer::new().unwrap();
        let ipa = phonemizer.phonemize("casa, casa.", "pt-PT").unwrap();
        assert_eq!(ipa, "ˈka·zɐ , ˈka·zɐ .");
    }

    #[test]
    fn test_unsupported_dialect() {
        let phonemizer = Phonemizer::new().unwrap();
        assert_eq!(
            phonemizer.phonemize("casa", "pt-XX").unwrap_err(),
            PhonemizerError::UnsupportedDialect("pt-XX".to_string())
        );
    }

    #[test]
    fn test_lexicon_override_by_region() {
        let mut lexicon = Lexicon::new();
        lexicon.insert("casa", "NOUN", "ˈKA·ZA", "lbx", vec![]);
        let phonemizer = Phonemizer::new().unwrap().with_lexicon(lexicon);

        assert_eq!(phonemizer.phonemize("Casa", "pt-PT").unwrap(), "ˈKA·ZA");
        // Other regions keep the generated IPA
        assert_ne!(phonemizer.phonemize("casa", "pt-BR").unwrap(), "ˈKA·ZA");
    }

    #[test]
    fn test_tagger_selects_homograph() {
        let phonemizer = Phonemizer::new()
            .unwrap()
            .with_tagger(DictionaryTagger::new([("para", "ADP")]));
        assert_eq!(phonemizer.phonemize("para", "pt-PT").unwrap(), "ˈpɐ·ɾɐ");
    }

    #[test]
    fn test_preset_rules_applied() {
        let phonemizer = Phonemizer::new().unwrap();
        let lisbon = get_preset("lisbon").unwrap();
        let minho = get_preset("minho").unwrap();

        let base = phonemizer.phonemize("rato", "pt-PT").unwrap();
        assert_eq!(base, "ˈʁa·tu");
        assert_eq!(phonemizer.phonemize_with_preset("rato", &lisbon).unwrap(), base);
        assert_eq!(phonemizer.phonemize_with_preset("rato", &minho).unwrap(), "ˈra·tu");
    }

    #[test]
    fn test_preset_uses_its_region() {
        let mut lexicon = Lexicon::new();
        lexicon.insert("casa", "NOUN", "ˈka·za", "spx", vec![]);
        let phonemizer = Phonemizer::new().unwrap().with_lexicon(lexicon);
        let sao_paulo = get_preset("sao-paulo").unwrap();
        assert_eq!(
            phonemizer.phonemize_with_preset("casa", &sao_paulo).unwrap(),
            "ˈka·za"
        );
    }

    #[test]
    fn test_batch_preserves_order() {
        let phonemizer = Phonemizer::new().unwrap();
        let texts = ["casa", "rato", "", "mão"];
        let out = phonemizer.phonemize_batch(&texts, "pt-PT").unwrap();
        let expected: Vec<String> = texts
            .iter()
            .map(|t| phonemizer.phonemize(t, "pt-PT").unwrap())
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_analyze() {
        let phonemizer = Phonemizer::new().unwrap();
        let sentence = phonemizer.analyze("O gato.", "pt-pt").unwrap();
        assert_eq!(sentence.n_words(), 3);
        assert_eq!(sentence.word(2).and_then(|w| w.postag()), Some("PUNCT"));
        assert_eq!(sentence.dialect().code(), "pt-PT");
    }
}
