//! Sentences: the root of the token hierarchy

use super::features::{nest, put, FeatureMap};
use super::word::WordToken;
use crate::domain::dialect::{Dialect, DialectRules};
use crate::domain::ipa::sentence_ipa;
use crate::domain::phonology::is_vowel_letter;
use log::debug;

/// Split text into words on whitespace and hyphens
///
/// Returns each word with the character offset where it starts.
pub fn split_words(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (char_idx, (byte_idx, c)) in text.char_indices().enumerate() {
        if c.is_whitespace() || c == '-' {
            if let Some((char_start, byte_start)) = start.take() {
                words.push((char_start, &text[byte_start..byte_idx]));
            }
        } else if start.is_none() {
            start = Some((char_idx, byte_idx));
        }
    }
    if let Some((char_start, byte_start)) = start {
        words.push((char_start, &text[byte_start..]));
    }
    words
}

/// A sentence analyzed against one dialect
#[derive(Debug, Clone)]
pub struct Sentence<'d> {
    surface: String,
    dialect: &'d Dialect,
    words: Vec<WordToken>,
}

impl<'d> Sentence<'d> {
    /// Analyze raw text; words carry no part-of-speech tags
    pub fn new(text: &str, dialect: &'d Dialect) -> Self {
        let words = split_words(text)
            .into_iter()
            .enumerate()
            .map(|(idx, (offset, word))| WordToken::new(word, idx, offset, None, dialect))
            .collect();
        Self::assemble(text.to_string(), dialect, words)
    }

    /// Analyze already tagged tokens, one word per `(surface, tag)` pair
    ///
    /// The sentence surface is the tokens joined by single spaces.
    pub fn from_postagged<S, T>(tokens: &[(S, T)], dialect: &'d Dialect) -> Self
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut surface = String::new();
        let mut offset = 0;
        let mut words = Vec::with_capacity(tokens.len());

        for (idx, (word, tag)) in tokens.iter().enumerate() {
            let word = word.as_ref();
            if idx > 0 {
                surface.push(' ');
                offset += 1;
            }
            surface.push_str(word);
            words.push(WordToken::new(word, idx, offset, Some(tag.as_ref()), dialect));
            offset += word.chars().count();
        }
        Self::assemble(surface, dialect, words)
    }

    fn assemble(surface: String, dialect: &'d Dialect, mut words: Vec<WordToken>) -> Self {
        mark_liaison(&mut words);
        debug!(
            "analyzed {} words for {} in {:?}",
            words.len(),
            dialect.code(),
            surface
        );
        Self {
            surface,
            dialect,
            words,
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Lowercased surface without edge punctuation or whitespace
    pub fn normalized(&self) -> String {
        self.surface
            .to_lowercase()
            .trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
            .to_string()
    }

    pub fn dialect(&self) -> &'d Dialect {
        self.dialect
    }

    pub fn words(&self) -> &[WordToken] {
        &self.words
    }

    pub fn word(&self, idx: usize) -> Option<&WordToken> {
        self.words.get(idx)
    }

    pub fn prev_word(&self, idx: usize) -> Option<&WordToken> {
        idx.checked_sub(1).and_then(|i| self.words.get(i))
    }

    pub fn next_word(&self, idx: usize) -> Option<&WordToken> {
        self.words.get(idx + 1)
    }

    pub fn n_words(&self) -> usize {
        self.words.len()
    }

    pub fn n_whitespaces(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Word IPA joined by single spaces, PUNCT tokens verbatim
    pub fn ipa(&self) -> String {
        sentence_ipa(
            self.words
                .iter()
                .map(|w| (w.surface(), w.postag(), w.ipa())),
        )
    }

    /// Flat feature export with nested `word_{i}_` entries
    pub fn features(&self) -> FeatureMap {
        let mut f = FeatureMap::new();
        put(&mut f, "dialect", self.dialect.code());
        put(&mut f, "n_words", self.n_words());
        put(&mut f, "n_whitespaces", self.n_whitespaces());
        for w in &self.words {
            nest(&mut f, &format!("word_{}_", w.idx()), w.features());
        }
        f
    }
}

/// Flag word-final s/z/r graphemes followed by a vowel-initial word
fn mark_liaison(words: &mut [WordToken]) {
    for i in 1..words.len() {
        let next_starts_with_vowel = words[i]
            .chars()
            .next()
            .is_some_and(|c| is_vowel_letter(c.canonical()) || c.normalized() == 'h');
        if !next_starts_with_vowel {
            continue;
        }
        if let Some(last) = words[i - 1].graphemes.last_mut() {
            if matches!(last.canonical.chars().last(), Some('s' | 'z' | 'r')) {
                last.requires_liaison = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialect::get_dialect;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("o guarda-chuva"), vec![(0, "o"), (2, "guarda"), (9, "chuva")]);
        assert_eq!(split_words("  olá   mundo "), vec![(2, "olá"), (8, "mundo")]);
        assert!(split_words("").is_empty());
        assert!(split_words(" - ").is_empty());
    }

    #[test]
    fn test_sentence_ipa_shape() {
        let pt = get_dialect("pt-PT").unwrap();
        let sentence = Sentence::new("o gato come peixe", pt);
        assert_eq!(sentence.n_words(), 4);
        assert_eq!(sentence.ipa().split(' ').count(), 4);
        assert_eq!(sentence.n_whitespaces(), 3);
    }

    #[test]
    fn test_hyphenated_compounds() {
        let pt = get_dialect("pt-PT").unwrap();
        let sentence = Sentence::new("guarda-chuva", pt);
        let surfaces: Vec<&str> = sentence.words().iter().map(WordToken::surface).collect();
        assert_eq!(surfaces, vec!["guarda", "chuva"]);
        assert_eq!(sentence.word(1).map(WordToken::idx_in_sentence), Some(7));
    }

    #[test]
    fn test_from_postagged_punct_passthrough() {
        let pt = get_dialect("pt-PT").unwrap();
        let tokens = [("Olá", "INTJ"), (",", "PUNCT"), ("mundo", "NOUN"), ("!", "PUNCT")];
        let sentence = Sentence::from_postagged(&tokens, pt);
        assert_eq!(sentence.surface(), "Olá , mundo !");
        let ipa = sentence.ipa();
        let parts: Vec<&str> = ipa.split(' ').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1], ",");
        assert_eq!(parts[3], "!");
    }

    #[test]
    fn test_homograph_by_tag() {
        let pt = get_dialect("pt-PT").unwrap();
        let sentence = Sentence::from_postagged(&[("ele", "PRON"), ("joga", "VERB"), ("para", "ADP")], pt);
        assert_eq!(sentence.word(2).map(WordToken::ipa), Some("ˈpɐ·ɾɐ"));
    }

    #[test]
    fn test_navigation() {
        let pt = get_dialect("pt-PT").unwrap();
        let sentence = Sentence::new("as casas antigas", pt);
        assert_eq!(sentence.prev_word(1).map(WordToken::surface), Some("as"));
        assert_eq!(sentence.next_word(1).map(WordToken::surface), Some("antigas"));
        assert!(sentence.prev_word(0).is_none());
        assert!(sentence.next_word(2).is_none());
        // "casas" links to "antigas", "as" does not link to "casas"
        assert!(sentence.word(1).and_then(|w| w.graphemes().last()).unwrap().requires_liaison());
        assert!(!sentence.word(0).and_then(|w| w.graphemes().last()).unwrap().requires_liaison());
    }

    #[test]
    fn test_empty_and_normalized() {
        let pt = get_dialect("pt-PT").unwrap();
        let empty = Sentence::new("", pt);
        assert_eq!(empty.n_words(), 0);
        assert_eq!(empty.ipa(), "");
        assert_eq!(empty.n_whitespaces(), 0);

        let sentence = Sentence::new("  Olá, Mundo! ", pt);
        assert_eq!(sentence.normalized(), "olá, mundo");
    }

    #[test]
    fn test_features_nest_words() {
        let pt = get_dialect("pt-PT").unwrap();
        let f = Sentence::new("bom dia", pt).features();
        assert_eq!(f.get("n_words").and_then(|v| v.as_int()), Some(2));
        assert_eq!(f.get("n_whitespaces").and_then(|v| v.as_int()), Some(1));
        assert_eq!(f.get("word_1_text").and_then(|v| v.as_str()), Some("dia"));
        assert!(f.contains_key("word_0_graph_0_char_0_ipa"));
    }
}
