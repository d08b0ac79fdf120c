//! Part-of-speech tagging seam
//!
//! The phonemizer only needs a tag per token: "PUNCT" makes a token pass
//! through untouched and every other tag selects homograph readings and
//! lexicon entries. Real taggers plug in through [`Tagger`]; the built-in
//! ones cover plain text without a model.

use crate::domain::ipa::PUNCT_TAG;
use crate::domain::token::split_words;
use std::collections::HashMap;

/// Tag assigned to words no tagger knows anything about
pub const DEFAULT_TAG: &str = "NOUN";

/// Splits a sentence into `(token, tag)` pairs
pub trait Tagger: Send + Sync {
    fn tag(&self, sentence: &str) -> Vec<(String, String)>;

    fn name(&self) -> &str;
}

fn is_punct(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Split one whitespace token into leading punctuation, word, trailing
/// punctuation. Tokens made only of punctuation come back as one piece.
fn split_edge_punct(token: &str) -> Vec<(&str, bool)> {
    if token.chars().all(is_punct) {
        return vec![(token, true)];
    }
    let start = token
        .char_indices()
        .find(|(_, c)| !is_punct(*c))
        .map_or(0, |(i, _)| i);
    let end = token
        .char_indices()
        .rev()
        .find(|(_, c)| !is_punct(*c))
        .map_or(token.len(), |(i, c)| i + c.len_utf8());

    let mut pieces = Vec::with_capacity(3);
    if start > 0 {
        pieces.push((&token[..start], true));
    }
    pieces.push((&token[start..end], false));
    if end < token.len() {
        pieces.push((&token[end..], true));
    }
    pieces
}

/// Tags every word NOUN and splits edge punctuation into PUNCT tokens
///
/// Tokens are split on whitespace and hyphens, the same way
/// [`crate::domain::token::Sentence::new`] splits words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTagger;

impl WhitespaceTagger {
    pub fn new() -> Self {
        Self
    }
}

impl Tagger for WhitespaceTagger {
    fn tag(&self, sentence: &str) -> Vec<(String, String)> {
        split_words(sentence)
            .into_iter()
            .flat_map(|(_, token)| split_edge_punct(token))
            .map(|(piece, punct)| {
                let tag = if punct { PUNCT_TAG } else { DEFAULT_TAG };
                (piece.to_string(), tag.to_string())
            })
            .collect()
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

/// Looks tags up in a word list, falling back to a default tag
#[derive(Debug, Clone)]
pub struct DictionaryTagger {
    tags: HashMap<String, String>,
    default_tag: String,
}

impl Default for DictionaryTagger {
    fn default() -> Self {
        Self {
            tags: HashMap::new(),
            default_tag: DEFAULT_TAG.to_string(),
        }
    }
}

impl DictionaryTagger {
    pub fn new<I, W, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, T)>,
        W: AsRef<str>,
        T: AsRef<str>,
    {
        let mut tagger = Self::default();
        for (word, tag) in entries {
            tagger.insert(word.as_ref(), tag.as_ref());
        }
        tagger
    }

    pub fn with_default_tag(mut self, tag: &str) -> Self {
        self.default_tag = tag.to_uppercase();
        self
    }

    /// Words are matched case-insensitively; tags are stored uppercase
    pub fn insert(&mut self, word: &str, tag: &str) {
        self.tags.insert(word.to_lowercase(), tag.to_uppercase());
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Tagger for DictionaryTagger {
    fn tag(&self, sentence: &str) -> Vec<(String, String)> {
        WhitespaceTagger
            .tag(sentence)
            .into_iter()
            .map(|(token, tag)| {
                if tag == PUNCT_TAG {
                    return (token, tag);
                }
                let tag = self
                    .tags
                    .get(&token.to_lowercase())
                    .unwrap_or(&self.default_tag)
                    .clone();
                (token, tag)
            })
            .collect()
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(tagged: &[(String, String)]) -> Vec<(&str, &str)> {
        tagged.iter().map(|(w, t)| (w.as_str(), t.as_str())).collect()
    }

    #[test]
    fn test_whitespace_tagger() {
        let tagged = WhitespaceTagger.tag("O gato dorme.");
        assert_eq!(
            pairs(&tagged),
            vec![("O", "NOUN"), ("gato", "NOUN"), ("dorme", "NOUN"), (".", "PUNCT")]
        );
    }

    #[test]
    fn test_edge_punctuation() {
        let tagged = WhitespaceTagger.tag("«Olá», disse... — e saiu!");
        assert_eq!(
            pairs(&tagged),
            vec![
                ("«", "PUNCT"),
                ("Olá", "NOUN"),
                ("»,", "PUNCT"),
                ("disse", "NOUN"),
                ("...", "PUNCT"),
                ("—", "PUNCT"),
                ("e", "NOUN"),
                ("saiu", "NOUN"),
                ("!", "PUNCT"),
            ]
        );
    }

    #[test]
    fn test_hyphen_splits_words() {
        let tagged = WhitespaceTagger.tag("pequeno-almoço");
        assert_eq!(pairs(&tagged), vec![("pequeno", "NOUN"), ("almoço", "NOUN")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(WhitespaceTagger.tag("").is_empty());
        assert!(WhitespaceTagger.tag("   ").is_empty());
    }

    #[test]
    fn test_dictionary_tagger() {
        let tagger = DictionaryTagger::new([("para", "adp"), ("Sede", "VERB")]);
        assert_eq!(tagger.len(), 2);
        let tagged = tagger.tag("Vou para a sede.");
        assert_eq!(
            pairs(&tagged),
            vec![
                ("Vou", "NOUN"),
                ("para", "ADP"),
                ("a", "NOUN"),
                ("sede", "VERB"),
                (".", "PUNCT"),
            ]
        );

        let tagger = DictionaryTagger::default().with_default_tag("x");
        assert_eq!(pairs(&tagger.tag("casa")), vec![("casa", "X")]);
    }
}
