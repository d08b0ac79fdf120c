//! IPA composition from characters up to sentences
//!
//! Token construction resolves every character first, then asks this module
//! to compose grapheme, word and sentence strings from the parts. Lexical
//! overrides (grapheme exceptions, irregular words, homographs) are applied
//! here so that every level goes through one priority order.

use crate::domain::dialect::{Dialect, GraphemeKind};
use smallvec::SmallVec;

/// Primary stress marker, placed before the stressed syllable
pub const STRESS_MARK: char = 'ˈ';

/// Separator between syllables of a word
pub const SYLLABLE_SEPARATOR: char = '·';

/// Part-of-speech tag of tokens that pass through unchanged
pub const PUNCT_TAG: &str = "PUNCT";

/// IPA of a grapheme
///
/// `span` is the canonical spelling of the grapheme and `char_ipas` the IPA
/// each of its characters would have on its own, used when no table covers
/// the span.
pub fn grapheme_ipa(
    word: &str,
    span: &str,
    kind: GraphemeKind,
    at_word_end: bool,
    dialect: &Dialect,
    char_ipas: &[String],
) -> String {
    if let Some(ipa) = dialect.grapheme_exception(word, span) {
        return ipa.to_string();
    }
    if let Some(ipa) = dialect.grapheme_ipa(kind, span, at_word_end) {
        return ipa.to_string();
    }
    char_ipas.concat()
}

/// Distribute the IPA of a multi-character grapheme over its characters
///
/// Digraphs and nasal vowels give everything to their first character.
/// Diphthongs give the final symbol (the glide) to their last character and
/// the rest to the first; triphthongs split glide, nucleus, glide.
pub fn split_grapheme_ipa(kind: GraphemeKind, ipa: &str, n_chars: usize) -> SmallVec<[String; 3]> {
    let mut parts: SmallVec<[String; 3]> = SmallVec::new();
    if n_chars == 0 {
        return parts;
    }
    parts.push(ipa.to_string());
    parts.extend((1..n_chars).map(|_| String::new()));

    let segments = segments(ipa);
    match kind {
        GraphemeKind::OralDiphthong | GraphemeKind::NasalDiphthong | GraphemeKind::CodaLateral
            if n_chars == 2 && segments.len() >= 2 =>
        {
            let (nucleus, glide) = segments.split_at(segments.len() - 1);
            parts[0] = nucleus.concat();
            parts[1] = glide.concat();
        }
        GraphemeKind::Triphthong if n_chars == 3 && segments.len() >= 3 => {
            let last = segments.len() - 1;
            parts[0] = segments[0].to_string();
            parts[1] = segments[1..last].concat();
            parts[2] = segments[last].to_string();
        }
        _ => {}
    }
    parts
}

/// Split IPA into base symbols, each with its combining marks
fn segments(ipa: &str) -> Vec<&str> {
    let mut bounds: Vec<usize> = ipa
        .char_indices()
        .filter(|(_, c)| !is_combining(*c))
        .map(|(i, _)| i)
        .collect();
    bounds.push(ipa.len());
    bounds.windows(2).map(|w| &ipa[w[0]..w[1]]).collect()
}

fn is_combining(c: char) -> bool {
    ('\u{300}'..='\u{36f}').contains(&c)
}

/// Number of phonetic segments in an IPA string, ignoring stress and separators
pub fn count_segments(ipa: &str) -> usize {
    ipa.chars()
        .filter(|&c| c != STRESS_MARK && c != SYLLABLE_SEPARATOR && !c.is_whitespace())
        .filter(|&c| !is_combining(c))
        .count()
}

/// IPA of a word from the IPA of its syllables
///
/// Irregular words win over homographs, which win over composition. An
/// all-empty composition (punctuation, lone silent letters) yields "".
pub fn word_ipa(
    word: &str,
    postag: Option<&str>,
    syllable_ipas: &[String],
    stressed: usize,
    dialect: &Dialect,
) -> String {
    if let Some(ipa) = dialect.irregular_word(word) {
        return ipa.to_string();
    }
    if let Some(ipa) = postag.and_then(|pos| dialect.homograph(word, pos)) {
        return ipa.to_string();
    }
    if syllable_ipas.iter().all(String::is_empty) {
        return String::new();
    }

    let mut out = String::new();
    for (idx, syllable) in syllable_ipas.iter().enumerate() {
        if idx > 0 {
            out.push(SYLLABLE_SEPARATOR);
        }
        if idx == stressed {
            out.push(STRESS_MARK);
        }
        out.push_str(syllable);
    }
    out
}

/// Join word IPA with single spaces, passing PUNCT tokens through verbatim
///
/// Each item is `(surface, postag, ipa)`. Words with empty IPA, such as a
/// lone silent "h", still take a slot, so they leave doubled spaces.
pub fn sentence_ipa<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>, &'a str)>,
{
    words
        .into_iter()
        .map(|(surface, postag, ipa)| if postag == Some(PUNCT_TAG) { surface } else { ipa })
        .collect::<Vec<_>>()
        .join(" ")
}
