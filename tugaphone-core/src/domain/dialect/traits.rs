//! Classification interface shared by all dialect inventories

use crate::domain::phonology::features::{Roundedness, VowelBackness, VowelHeight};
use serde::{Deserialize, Serialize};

/// A candidate span inside a word, with the word text around it
///
/// All three parts are expected in canonical form (lowercased, archaic
/// diacritics folded) so that table lookups are spelling-variant agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextWindow<'a> {
    pub prefix: &'a str,
    pub span: &'a str,
    pub suffix: &'a str,
}

impl<'a> TextWindow<'a> {
    pub fn new(prefix: &'a str, span: &'a str, suffix: &'a str) -> Self {
        Self {
            prefix,
            span,
            suffix,
        }
    }

    /// Window over a lone span with no surrounding context
    pub fn isolated(span: &'a str) -> Self {
        Self::new("", span, "")
    }

    pub fn next_char(&self) -> Option<char> {
        self.suffix.chars().next()
    }

    pub fn prev_char(&self) -> Option<char> {
        self.prefix.chars().next_back()
    }

    /// Full text the window was cut from
    pub fn word(&self) -> String {
        let mut word =
            String::with_capacity(self.prefix.len() + self.span.len() + self.suffix.len());
        word.push_str(self.prefix);
        word.push_str(self.span);
        word.push_str(self.suffix);
        word
    }
}

/// What kind of spelling unit a grapheme is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphemeKind {
    /// A single character
    Letter,
    /// Native consonant digraph (ch, nh, lh, rr, ss, qu/gu before e/i)
    Digraph,
    /// Loanword digraph (sh, th, ff, ll)
    ForeignDigraph,
    Trigraph,
    /// Vowel + m/n in coda position (am, en, om)
    NasalVowel,
    OralDiphthong,
    NasalDiphthong,
    /// Vowel + l where coda /l/ vocalizes
    CodaLateral,
    Triphthong,
}

impl GraphemeKind {
    pub fn is_digraph(self) -> bool {
        matches!(self, GraphemeKind::Digraph | GraphemeKind::ForeignDigraph)
    }

    pub fn is_diphthong(self) -> bool {
        matches!(
            self,
            GraphemeKind::OralDiphthong | GraphemeKind::NasalDiphthong | GraphemeKind::CodaLateral
        )
    }

    pub fn is_nasal(self) -> bool {
        matches!(self, GraphemeKind::NasalVowel | GraphemeKind::NasalDiphthong)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GraphemeKind::Letter => "letter",
            GraphemeKind::Digraph => "digraph",
            GraphemeKind::ForeignDigraph => "foreign_digraph",
            GraphemeKind::Trigraph => "trigraph",
            GraphemeKind::NasalVowel => "nasal_vowel",
            GraphemeKind::OralDiphthong => "oral_diphthong",
            GraphemeKind::NasalDiphthong => "nasal_diphthong",
            GraphemeKind::CodaLateral => "coda_lateral",
            GraphemeKind::Triphthong => "triphthong",
        }
    }
}

/// Queries a dialect inventory answers about spelling and sound
///
/// Implementations must be thread-safe so that independent sentences can
/// be analyzed in parallel against one shared inventory.
pub trait DialectRules: Send + Sync {
    /// ISO-style dialect code (e.g. "pt-PT")
    fn code(&self) -> &str;

    /// Human-readable dialect name
    fn name(&self) -> &str;

    /// Region key of the reference lexicon
    fn region(&self) -> &str;

    /// Classify a multi-character span in context
    ///
    /// Returns `None` when the span does not form a unit here.
    fn classify_span(&self, window: &TextWindow<'_>) -> Option<GraphemeKind>;

    fn is_digraph(&self, window: &TextWindow<'_>) -> bool {
        self.classify_span(window)
            .is_some_and(GraphemeKind::is_digraph)
    }

    fn is_diphthong(&self, window: &TextWindow<'_>) -> bool {
        self.classify_span(window)
            .is_some_and(GraphemeKind::is_diphthong)
    }

    fn vowel_height(&self, ch: char) -> Option<VowelHeight>;

    fn vowel_backness(&self, ch: char) -> Option<VowelBackness>;

    fn vowel_roundedness(&self, ch: char) -> Option<Roundedness>;

    /// Whether the character itself marks nasality (ã, õ, ...)
    fn nasal_marker(&self, ch: char) -> bool;

    /// Whether a span or whole word uses pre-reform spelling
    fn is_archaic(&self, text: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_window_navigation() {
        let window = TextWindow::new("ca", "nh", "a");
        assert_eq!(window.prev_char(), Some('a'));
        assert_eq!(window.next_char(), Some('a'));
        assert_eq!(window.word(), "canha");

        let isolated = TextWindow::isolated("ch");
        assert_eq!(isolated.prev_char(), None);
        assert_eq!(isolated.next_char(), None);
    }

    #[test]
    fn test_grapheme_kind_groups() {
        assert!(GraphemeKind::Digraph.is_digraph());
        assert!(GraphemeKind::ForeignDigraph.is_digraph());
        assert!(!GraphemeKind::NasalVowel.is_digraph());

        assert!(GraphemeKind::CodaLateral.is_diphthong());
        assert!(GraphemeKind::NasalDiphthong.is_diphthong());
        assert!(!GraphemeKind::Triphthong.is_diphthong());

        assert!(GraphemeKind::NasalVowel.is_nasal());
        assert!(!GraphemeKind::OralDiphthong.is_nasal());
    }
}
