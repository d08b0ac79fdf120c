//! Grapheme tokens

use super::character::CharToken;
use super::features::{nest, put, FeatureMap};
use crate::domain::dialect::GraphemeKind;
use serde::Serialize;
use smallvec::SmallVec;

/// Where a grapheme sits inside its syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyllablePosition {
    Onset,
    Nucleus,
    Coda,
}

impl SyllablePosition {
    pub fn as_str(self) -> &'static str {
        match self {
            SyllablePosition::Onset => "onset",
            SyllablePosition::Nucleus => "nucleus",
            SyllablePosition::Coda => "coda",
        }
    }
}

/// A minimal spelling unit of one to three characters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphemeToken {
    pub(crate) text: String,
    pub(crate) canonical: String,
    pub(crate) idx: usize,
    pub(crate) word_idx: usize,
    pub(crate) start: usize,
    pub(crate) kind: GraphemeKind,
    pub(crate) syllable_idx: usize,
    pub(crate) parent_syllable: String,
    pub(crate) prev_syllable: Option<String>,
    pub(crate) next_syllable: Option<String>,
    pub(crate) prev: Option<String>,
    pub(crate) next: Option<String>,
    pub(crate) prefix: String,
    pub(crate) suffix: String,
    pub(crate) chars: SmallVec<[CharToken; 3]>,
    pub(crate) ipa: String,

    pub(crate) position: SyllablePosition,
    pub(crate) is_archaism: bool,
    pub(crate) is_consonant_hiatus: bool,
    pub(crate) is_vocalic_hiatus: bool,
    pub(crate) is_onset_cluster: bool,
    pub(crate) triggers_palatalization: bool,
    pub(crate) requires_liaison: bool,
    pub(crate) has_primary_stress: bool,
}

impl GraphemeToken {
    /// Lowercased spelling
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Spelling used for table lookups
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Index in the parent word
    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn word_idx(&self) -> usize {
        self.word_idx
    }

    /// Character offset of the first character in the word
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn kind(&self) -> GraphemeKind {
        self.kind
    }

    pub fn syllable_idx(&self) -> usize {
        self.syllable_idx
    }

    pub fn parent_syllable(&self) -> &str {
        &self.parent_syllable
    }

    pub fn prev_syllable(&self) -> Option<&str> {
        self.prev_syllable.as_deref()
    }

    pub fn next_syllable(&self) -> Option<&str> {
        self.next_syllable.as_deref()
    }

    pub fn prev_grapheme(&self) -> Option<&str> {
        self.prev.as_deref()
    }

    pub fn next_grapheme(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn chars(&self) -> &[CharToken] {
        &self.chars
    }

    pub fn n_chars(&self) -> usize {
        self.chars.len()
    }

    pub fn first_char(&self) -> Option<&CharToken> {
        self.chars.first()
    }

    pub fn last_char(&self) -> Option<&CharToken> {
        self.chars.last()
    }

    pub fn ipa(&self) -> &str {
        &self.ipa
    }

    pub fn syllable_position(&self) -> SyllablePosition {
        self.position
    }

    pub fn is_digraph(&self) -> bool {
        self.kind == GraphemeKind::Digraph
    }

    pub fn is_foreign_digraph(&self) -> bool {
        self.kind == GraphemeKind::ForeignDigraph
    }

    pub fn is_trigraph(&self) -> bool {
        self.kind == GraphemeKind::Trigraph
    }

    pub fn is_diphthong(&self) -> bool {
        self.kind.is_diphthong()
    }

    pub fn is_triphthong(&self) -> bool {
        self.kind == GraphemeKind::Triphthong
    }

    /// Nucleus first, glide second (pai, céu, and vocalized coda l)
    pub fn is_falling_diphthong(&self) -> bool {
        self.is_diphthong() && self.chars.first().is_some_and(|c| !c.is_semivowel)
    }

    /// Glide first, nucleus second
    pub fn is_rising_diphthong(&self) -> bool {
        self.is_diphthong() && self.chars.first().is_some_and(|c| c.is_semivowel)
    }

    pub fn is_nasal_diphthong(&self) -> bool {
        self.kind == GraphemeKind::NasalDiphthong
    }

    pub fn is_oral_diphthong(&self) -> bool {
        matches!(self.kind, GraphemeKind::OralDiphthong | GraphemeKind::CodaLateral)
    }

    pub fn is_nasal(&self) -> bool {
        self.kind.is_nasal() || self.chars.iter().any(|c| c.is_nasal_vowel)
    }

    /// Spelled with a pre-reform grapheme (ü, non-crasis grave accents, ph)
    pub fn is_archaism(&self) -> bool {
        self.is_archaism
    }

    /// Last consonant of a cluster split across syllables (c·ç, p·t)
    pub fn is_consonant_hiatus(&self) -> bool {
        self.is_consonant_hiatus
    }

    /// A nucleus followed by another nucleus in the next syllable
    pub fn is_vocalic_hiatus(&self) -> bool {
        self.is_vocalic_hiatus
    }

    /// First member of an obstruent + liquid onset (pr, bl, ...)
    pub fn is_onset_cluster(&self) -> bool {
        self.is_onset_cluster
    }

    /// Realized with a palatal consonant or glide
    pub fn is_palatal(&self) -> bool {
        self.ipa.chars().any(|c| matches!(c, 'ɲ' | 'ʎ' | 'j' | 'ʃ' | 'ʒ'))
    }

    /// A high front vowel that palatalizes a preceding t/d
    pub fn triggers_palatalization(&self) -> bool {
        self.triggers_palatalization
    }

    /// Word-final consonant that links to a following vowel-initial word
    pub fn requires_liaison(&self) -> bool {
        self.requires_liaison
    }

    /// Morae: nucleus vowels count one per segment, codas count one
    pub fn phonological_weight(&self) -> usize {
        match self.position {
            SyllablePosition::Onset => 0,
            SyllablePosition::Coda => usize::from(!self.ipa.is_empty()),
            SyllablePosition::Nucleus => match self.kind {
                GraphemeKind::Triphthong => 3,
                k if k.is_diphthong() || k.is_nasal() => 2,
                _ => 1,
            },
        }
    }

    pub fn has_primary_stress(&self) -> bool {
        self.has_primary_stress
    }

    pub fn has_secondary_stress(&self) -> bool {
        !self.has_primary_stress && self.chars.iter().any(|c| c.has_secondary_stress)
    }

    /// Flat feature export with nested `char_{i}_` entries
    pub fn features(&self) -> FeatureMap {
        let mut f = FeatureMap::new();
        put(&mut f, "n_chars", self.n_chars());
        put(&mut f, "text", self.text.as_str());
        put(&mut f, "ipa", self.ipa.as_str());
        put(&mut f, "kind", self.kind.as_str());
        put(&mut f, "parent_syllable", self.parent_syllable.as_str());
        put(&mut f, "prev_syllable", self.prev_syllable.clone());
        put(&mut f, "next_syllable", self.next_syllable.clone());
        put(&mut f, "syllable_position", self.position.as_str());
        put(&mut f, "phonological_weight", self.phonological_weight());
        put(&mut f, "is_archaism", self.is_archaism);
        put(&mut f, "is_nasal", self.is_nasal());
        put(&mut f, "is_digraph", self.is_digraph());
        put(&mut f, "is_trigraph", self.is_trigraph());
        put(&mut f, "is_foreign_digraph", self.is_foreign_digraph());
        put(&mut f, "is_consonant_hiatus", self.is_consonant_hiatus);
        put(&mut f, "is_vocalic_hiatus", self.is_vocalic_hiatus);
        put(&mut f, "is_onset_cluster", self.is_onset_cluster);
        put(&mut f, "is_palatal", self.is_palatal());
        put(&mut f, "triggers_palatalization", self.triggers_palatalization);
        put(&mut f, "requires_liaison", self.requires_liaison);
        put(&mut f, "is_diphthong", self.is_diphthong());
        put(&mut f, "is_triphthong", self.is_triphthong());
        put(&mut f, "is_falling_diphthong", self.is_falling_diphthong());
        put(&mut f, "is_rising_diphthong", self.is_rising_diphthong());
        put(&mut f, "is_nasal_diphthong", self.is_nasal_diphthong());
        put(&mut f, "is_oral_diphthong", self.is_oral_diphthong());
        put(&mut f, "has_primary_stress", self.has_primary_stress);
        put(&mut f, "has_secondary_stress", self.has_secondary_stress());

        for (i, c) in self.chars.iter().enumerate() {
            nest(&mut f, &format!("char_{i}_"), c.features());
        }
        f
    }
}
