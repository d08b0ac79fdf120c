//! Word tokens and the per-word analysis pipeline

use super::character::CharToken;
use super::features::{nest, put, FeatureMap};
use super::grapheme::{GraphemeToken, SyllablePosition};
use crate::domain::dialect::{Dialect, DialectRules, GraphemeKind};
use crate::domain::ipa::{count_segments, grapheme_ipa, split_grapheme_ipa, word_ipa, PUNCT_TAG};
use crate::domain::phonology::{
    char_to_syllable_map, consonant_features, has_diacritic, is_vowel_letter, normalize_syllables,
    resolve_char_ipa, segment_word, stressed_syllable, syllabify,
    vowel_features, CharContext, GraphemeSpan, Place, StressPattern, VowelFeatures,
    CIRCUMFLEX_VOWELS, GRAVE_VOWELS,
};
use serde::Serialize;
use smallvec::SmallVec;

const TREMA_VOWELS: &str = "äëïöüÿ";

/// One word with its graphemes, syllables, stress and IPA
///
/// Everything is computed once in [`WordToken::new`]; the token is never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordToken {
    pub(crate) surface: String,
    pub(crate) normalized: String,
    pub(crate) idx: usize,
    pub(crate) offset: usize,
    pub(crate) postag: Option<String>,
    pub(crate) graphemes: Vec<GraphemeToken>,
    pub(crate) syllables: Vec<String>,
    pub(crate) normalized_syllables: Vec<String>,
    pub(crate) char_to_syllable: Vec<usize>,
    pub(crate) stressed_idx: usize,
    pub(crate) ipa: String,
    pub(crate) is_irregular: bool,
    pub(crate) is_homograph: bool,
    pub(crate) is_archaic: bool,
}

/// Syllable index per character, taken from the spans when the syllables
/// do not partition the word exactly
fn syllable_map(syllables: &[String], spans: &[GraphemeSpan], n_chars: usize) -> Vec<usize> {
    let map = char_to_syllable_map(syllables);
    if map.len() == n_chars {
        return map;
    }
    spans
        .iter()
        .flat_map(|s| std::iter::repeat(s.syllable_idx).take(s.len))
        .collect()
}

fn letter_vowel_features(ch: char, dialect: &Dialect) -> Option<VowelFeatures> {
    Some(VowelFeatures {
        height: dialect.vowel_height(ch)?,
        backness: dialect.vowel_backness(ch)?,
        roundedness: dialect.vowel_roundedness(ch)?,
        nasal: dialect.nasal_marker(ch),
    })
}

fn is_glide(ipa: &str) -> bool {
    matches!(ipa.chars().next(), Some('j' | 'w'))
}

fn is_palatal_consonant(ipa: &str) -> bool {
    consonant_features(ipa).is_some_and(|c| matches!(c.place, Place::Palatal | Place::Postalveolar))
}

impl WordToken {
    /// Analyze one surface word
    ///
    /// `idx` is the word's position in its sentence and `offset` the
    /// character offset of its first character there. `postag` selects
    /// homograph readings.
    pub fn new(
        surface: &str,
        idx: usize,
        offset: usize,
        postag: Option<&str>,
        dialect: &Dialect,
    ) -> Self {
        let normalized = surface.to_lowercase();
        let chars: Vec<char> = normalized.chars().collect();
        let surface_chars: Vec<char> = surface.chars().collect();
        let canonical: Vec<char> = chars.iter().map(|&c| dialect.canonical_char(c)).collect();
        let canonical_text: String = canonical.iter().collect();
        let n = chars.len();

        let syllables = syllabify(&normalized);
        let normalized_syllables = normalize_syllables(&syllables);
        let spans = segment_word(&canonical_text, &normalized_syllables, dialect);
        let char_to_syllable = syllable_map(&normalized_syllables, &spans, n);
        let n_syllables = normalized_syllables.len().max(1);
        let stressed_idx = stressed_syllable(&normalized, &syllables, dialect).min(n_syllables - 1);

        let contexts: Vec<CharContext<'_>> = (0..n)
            .map(|i| CharContext {
                word: &normalized,
                chars: &chars,
                canonical: &canonical,
                char_to_syllable: &char_to_syllable,
                idx: i,
                stressed_syllable: stressed_idx,
                n_syllables,
            })
            .collect();
        let letter_ipa: Vec<String> = contexts.iter().map(|ctx| resolve_char_ipa(ctx, dialect)).collect();

        // Grapheme IPA, then its share on every character
        let mut char_ipa = letter_ipa.clone();
        let mut span_ipa = Vec::with_capacity(spans.len());
        for span in &spans {
            let text: String = canonical[span.start..span.end()].iter().collect();
            let ipa = grapheme_ipa(
                &normalized,
                &text,
                span.kind,
                span.end() == n,
                dialect,
                &letter_ipa[span.start..span.end()],
            );
            for (k, part) in split_grapheme_ipa(span.kind, &ipa, span.len).into_iter().enumerate() {
                char_ipa[span.start + k] = part;
            }
            span_ipa.push(ipa);
        }

        let mut syllable_ipas = vec![String::new(); n_syllables];
        for (span, ipa) in spans.iter().zip(&span_ipa) {
            if let Some(slot) = syllable_ipas.get_mut(span.syllable_idx) {
                slot.push_str(ipa);
            }
        }
        let ipa = if n == 0 {
            String::new()
        } else {
            word_ipa(&normalized, postag, &syllable_ipas, stressed_idx, dialect)
        };

        let text_of = |start: usize, end: usize| -> String { chars[start..end].iter().collect() };

        // Character tokens
        let mut char_tokens: Vec<CharToken> = Vec::with_capacity(n);
        for (gi, span) in spans.iter().enumerate() {
            let grapheme_stressed = span.syllable_idx == stressed_idx
                && chars[span.start..span.end()].iter().any(|&c| is_vowel_letter(c));

            for k in 0..span.len {
                let i = span.start + k;
                let lower = chars[i];
                let ipa = char_ipa[i].clone();
                let is_vowel = is_vowel_letter(lower);
                let is_consonant = lower.is_alphabetic() && !is_vowel;
                let is_semivowel = is_glide(&ipa) && (is_vowel || span.kind == GraphemeKind::CodaLateral);

                let vowel = if is_vowel {
                    vowel_features(&ipa)
                        .or_else(|| letter_vowel_features(lower, dialect))
                        .map(|mut v| {
                            v.nasal |= span.kind.is_nasal() || dialect.nasal_marker(lower);
                            v
                        })
                } else {
                    None
                };
                let consonant = if is_consonant { consonant_features(&ipa) } else { None };

                let has_primary_stress = is_vowel && grapheme_stressed;
                let has_secondary_stress = is_vowel
                    && !has_primary_stress
                    && (GRAVE_VOWELS.contains(lower)
                        || CIRCUMFLEX_VOWELS.contains(lower)
                        || TREMA_VOWELS.contains(lower));

                let is_prepalatal_vowel = is_vowel
                    && chars.get(i + 1).is_some_and(|&c| !is_vowel_letter(c))
                    && char_ipa.get(i + 1).is_some_and(|next| is_palatal_consonant(next));

                char_tokens.push(CharToken {
                    surface: if surface_chars.len() == n { surface_chars[i] } else { lower },
                    lower,
                    canonical: canonical[i],
                    idx: i,
                    sentence_idx: offset + i,
                    word_idx: idx,
                    grapheme_idx: gi,
                    idx_in_grapheme: k,
                    syllable_idx: span.syllable_idx,
                    prev: i.checked_sub(1).map(|p| canonical[p]),
                    next: canonical.get(i + 1).copied(),
                    prefix: text_of(0, i),
                    suffix: text_of(i + 1, n),
                    is_first_letter: i == 0,
                    is_last_letter: i + 1 == n,
                    is_punct: !lower.is_alphanumeric() && !lower.is_whitespace(),
                    is_vowel,
                    is_consonant,
                    is_foreign: dialect.is_foreign_char(lower),
                    is_silent: contexts[i].is_silent(dialect),
                    is_semivowel,
                    is_nasal_vowel: vowel.is_some_and(|v| v.nasal),
                    is_prepalatal_vowel,
                    has_diacritics: has_diacritic(lower),
                    has_primary_stress,
                    has_secondary_stress,
                    vowel,
                    consonant,
                    ipa,
                });
            }
        }

        // Grapheme tokens
        let is_nucleus: Vec<bool> = spans
            .iter()
            .map(|s| char_tokens[s.start..s.end()].iter().any(CharToken::is_nucleus))
            .collect();

        let mut char_iter = char_tokens.into_iter();
        let mut graphemes = Vec::with_capacity(spans.len());
        for (gi, span) in spans.iter().enumerate() {
            let members: SmallVec<[CharToken; 3]> = char_iter.by_ref().take(span.len).collect();
            let text = text_of(span.start, span.end());
            let syllable = span.syllable_idx;
            let prev_span = gi.checked_sub(1).map(|p| &spans[p]);
            let next_span = spans.get(gi + 1);

            let position = if is_nucleus[gi] {
                SyllablePosition::Nucleus
            } else if spans[..gi]
                .iter()
                .zip(&is_nucleus)
                .any(|(s, &nucleus)| nucleus && s.syllable_idx == syllable)
            {
                SyllablePosition::Coda
            } else {
                SyllablePosition::Onset
            };

            let is_consonant_hiatus = next_span.is_some_and(|next| {
                let pair: String = [canonical[span.end() - 1], canonical[next.start]].iter().collect();
                next.syllable_idx != syllable && dialect.is_heterosyllabic_cluster(&pair)
            });

            let is_vocalic_hiatus = is_nucleus[gi]
                && next_span.is_some_and(|next| next.syllable_idx != syllable && is_nucleus[gi + 1]);

            // Obstruent + liquid inside one syllable (pr, bl, vr)
            let is_onset_cluster = span.len == 1
                && matches!(canonical[span.start], 'p' | 'b' | 't' | 'd' | 'c' | 'g' | 'f' | 'v' | 'k')
                && next_span.is_some_and(|next| {
                    next.len == 1
                        && next.syllable_idx == syllable
                        && matches!(canonical[next.start], 'l' | 'r')
                });

            let triggers_palatalization = matches!(span_ipa[gi].chars().next(), Some('i' | 'ĩ'))
                && prev_span.is_some_and(|prev| prev.len == 1 && matches!(canonical[prev.start], 't' | 'd'));

            let has_primary_stress = members.iter().any(|c| c.has_primary_stress);

            graphemes.push(GraphemeToken {
                canonical: canonical[span.start..span.end()].iter().collect(),
                is_archaism: dialect.is_archaic(&text),
                text,
                idx: gi,
                word_idx: idx,
                start: span.start,
                kind: span.kind,
                syllable_idx: syllable,
                parent_syllable: normalized_syllables.get(syllable).cloned().unwrap_or_default(),
                prev_syllable: syllable
                    .checked_sub(1)
                    .and_then(|p| normalized_syllables.get(p).cloned()),
                next_syllable: normalized_syllables.get(syllable + 1).cloned(),
                prev: prev_span.map(|s| text_of(s.start, s.end())),
                next: next_span.map(|s| text_of(s.start, s.end())),
                prefix: text_of(0, span.start),
                suffix: text_of(span.end(), n),
                chars: members,
                ipa: span_ipa[gi].clone(),
                position,
                is_consonant_hiatus,
                is_vocalic_hiatus,
                is_onset_cluster,
                triggers_palatalization,
                requires_liaison: false,
                has_primary_stress,
            });
        }

        Self {
            surface: surface.to_string(),
            is_irregular: dialect.irregular_word(&normalized).is_some(),
            is_homograph: dialect.is_homograph(&normalized),
            is_archaic: dialect.is_archaic(&normalized),
            normalized,
            idx,
            offset,
            postag: postag.map(str::to_string),
            graphemes,
            syllables,
            normalized_syllables,
            char_to_syllable,
            stressed_idx,
            ipa,
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Lowercased surface
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Position in the parent sentence
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Character offset of the word in the parent sentence
    pub fn idx_in_sentence(&self) -> usize {
        self.offset
    }

    pub fn postag(&self) -> Option<&str> {
        self.postag.as_deref()
    }

    pub fn is_punct(&self) -> bool {
        self.postag.as_deref() == Some(PUNCT_TAG)
            || (!self.graphemes.is_empty() && self.chars().all(CharToken::is_punct))
    }

    pub fn graphemes(&self) -> &[GraphemeToken] {
        &self.graphemes
    }

    pub fn grapheme(&self, idx: usize) -> Option<&GraphemeToken> {
        self.graphemes.get(idx)
    }

    pub fn chars(&self) -> impl Iterator<Item = &CharToken> {
        self.graphemes.iter().flat_map(|g| g.chars().iter())
    }

    pub fn char_at(&self, idx: usize) -> Option<&CharToken> {
        self.chars().nth(idx)
    }

    pub fn n_chars(&self) -> usize {
        self.char_to_syllable.len()
    }

    /// Parent grapheme of a character
    pub fn grapheme_of(&self, c: &CharToken) -> Option<&GraphemeToken> {
        self.graphemes.get(c.grapheme_idx())
    }

    /// Raw syllables as produced by the syllabifier
    pub fn syllables(&self) -> &[String] {
        &self.syllables
    }

    /// Syllables after doubled-consonant normalization
    pub fn normalized_syllables(&self) -> &[String] {
        &self.normalized_syllables
    }

    pub fn char_to_syllable(&self) -> &[usize] {
        &self.char_to_syllable
    }

    pub fn n_syllables(&self) -> usize {
        self.normalized_syllables.len()
    }

    pub fn stressed_syllable_idx(&self) -> usize {
        self.stressed_idx
    }

    pub fn stress_pattern(&self) -> StressPattern {
        StressPattern::from_position(self.n_syllables(), self.stressed_idx)
    }

    pub fn ipa(&self) -> &str {
        &self.ipa
    }

    /// Consonant/vowel skeleton of the pronounced characters ("casa" -> CVCV)
    ///
    /// Glides are written G; silent characters and digraph tails are skipped.
    pub fn cv_pattern(&self) -> String {
        self.chars()
            .filter(|c| !c.is_silent() && !c.ipa().is_empty())
            .filter_map(|c| {
                if c.is_semivowel() {
                    Some('G')
                } else if c.is_vowel() {
                    Some('V')
                } else if c.is_consonant() {
                    Some('C')
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn has_diphthong(&self) -> bool {
        self.graphemes
            .iter()
            .any(|g| g.is_diphthong() || g.is_triphthong())
    }

    pub fn has_nasal(&self) -> bool {
        self.graphemes.iter().any(GraphemeToken::is_nasal)
    }

    pub fn has_palatal(&self) -> bool {
        self.graphemes.iter().any(GraphemeToken::is_palatal)
    }

    pub fn has_consonant_cluster(&self) -> bool {
        self.graphemes
            .iter()
            .any(|g| g.is_onset_cluster() || g.is_consonant_hiatus())
    }

    /// Syllable nuclei in order
    pub fn vowels(&self) -> Vec<char> {
        self.chars()
            .filter(|c| c.is_nucleus())
            .map(CharToken::normalized)
            .collect()
    }

    /// Pronounced consonant letters in order
    pub fn consonants(&self) -> Vec<char> {
        self.chars()
            .filter(|c| c.is_consonant() && !c.is_silent())
            .map(CharToken::normalized)
            .collect()
    }

    pub fn n_phonemes(&self) -> usize {
        count_segments(&self.ipa)
    }

    pub fn is_irregular(&self) -> bool {
        self.is_irregular
    }

    pub fn is_homograph(&self) -> bool {
        self.is_homograph
    }

    pub fn is_archaic(&self) -> bool {
        self.is_archaic
    }

    /// Flat feature export with nested `graph_{i}_` entries
    pub fn features(&self) -> FeatureMap {
        let mut f = FeatureMap::new();
        put(&mut f, "text", self.normalized.as_str());
        put(&mut f, "ipa", self.ipa.as_str());
        put(&mut f, "postag", self.postag.clone());
        put(&mut f, "n_syllables", self.n_syllables());
        put(&mut f, "idx_in_sentence", self.offset);
        put(&mut f, "stressed_syllable_idx", self.stressed_idx);
        put(&mut f, "stress_pattern", self.stress_pattern().as_str());
        put(&mut f, "cv_pattern", self.cv_pattern());
        put(&mut f, "n_phonemes", self.n_phonemes());
        put(&mut f, "has_diphthong", self.has_diphthong());
        put(&mut f, "has_nasal", self.has_nasal());
        put(&mut f, "has_palatal", self.has_palatal());
        put(&mut f, "has_consonant_cluster", self.has_consonant_cluster());
        put(&mut f, "is_irregular", self.is_irregular);
        put(&mut f, "is_homograph", self.is_homograph);
        put(&mut f, "is_archaic", self.is_archaic);

        for g in &self.graphemes {
            nest(&mut f, &format!("graph_{}_", g.idx()), g.features());
        }
        f
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialect::get_dialect;

    fn word(text: &str, code: &str) -> WordToken {
        WordToken::new(text, 0, 0, None, get_dialect(code).unwrap())
    }

    fn grapheme_texts(w: &WordToken) -> Vec<&str> {
        w.graphemes().iter().map(GraphemeToken::text).collect()
    }

    #[test]
    fn test_casa() {
        let w = word("casa", "pt-PT");
        assert_eq!(w.syllables(), ["ca", "sa"]);
        assert_eq!(w.stressed_syllable_idx(), 0);
        assert_eq!(w.ipa(), "ˈka·zɐ");
        assert_eq!(w.cv_pattern(), "CVCV");
        assert_eq!(w.stress_pattern(), StressPattern::Paroxytone);
        assert_eq!(w.vowels(), vec!['a', 'a']);
    }

    #[test]
    fn test_dialect_vowel_reduction() {
        assert_eq!(word("bonito", "pt-PT").ipa(), "bu·ˈni·tu");
        assert_eq!(word("bonito", "pt-BR").ipa(), "bo·ˈni·tu");
        assert_eq!(word("bonito", "pt-TL").ipa(), "bo·ˈni·to");
    }

    #[test]
    fn test_digraph_ipa() {
        let w = word("chave", "pt-PT");
        let ch = w.grapheme(0).unwrap();
        assert_eq!(ch.text(), "ch");
        assert_eq!(ch.ipa(), "ʃ");
        assert!(ch.is_digraph());
        assert_eq!(ch.chars()[0].ipa(), "ʃ");
        assert_eq!(ch.chars()[1].ipa(), "");

        let w = word("vinho", "pt-PT");
        assert_eq!(w.grapheme(2).map(GraphemeToken::ipa), Some("ɲ"));
        let w = word("filho", "pt-PT");
        assert_eq!(w.grapheme(2).map(GraphemeToken::ipa), Some("ʎ"));
    }

    #[test]
    fn test_silent_h() {
        let w = word("hoje", "pt-PT");
        let h = w.char_at(0).unwrap();
        assert_eq!(h.ipa(), "");
        assert!(h.is_silent());
        assert_eq!(w.ipa(), "ˈɔ·ʒɨ");
    }

    #[test]
    fn test_partition_and_map() {
        for text in ["carro", "extraordinário", "pharmacia", "saída", "quando"] {
            let w = word(text, "pt-PT");
            assert_eq!(grapheme_texts(&w).concat(), text);
            assert_eq!(w.syllables().concat(), text);
            assert_eq!(w.char_to_syllable().len(), text.chars().count());
            assert!(w.char_to_syllable().windows(2).all(|p| p[0] <= p[1]));
            assert!(w.stressed_syllable_idx() < w.n_syllables());
        }
    }

    #[test]
    fn test_doubled_consonant_normalization() {
        let w = word("carro", "pt-PT");
        assert_eq!(w.syllables(), ["car", "ro"]);
        assert_eq!(w.normalized_syllables(), ["ca", "rro"]);
        assert_eq!(grapheme_texts(&w), vec!["c", "a", "rr", "o"]);
        assert_eq!(w.ipa(), "ˈka·ʁu");
        assert_eq!(word("carro", "pt-BR").ipa(), "ˈka·hu");
    }

    #[test]
    fn test_coda_l_divergence() {
        let br = word("Portugal", "pt-BR");
        let last = br.graphemes().last().unwrap();
        assert_eq!(last.text(), "al");
        assert!(last.is_diphthong());
        assert!(last.is_falling_diphthong());
        assert!(last.chars()[1].is_semivowel());

        let pt = word("Portugal", "pt-PT");
        let last = pt.graphemes().last().unwrap();
        assert_eq!(last.text(), "l");
        assert!(!last.is_diphthong());
        assert!(!last.chars()[0].is_semivowel());
    }

    #[test]
    fn test_nasal_and_diphthong_words() {
        let w = word("mão", "pt-PT");
        assert_eq!(w.ipa(), "ˈmɐ̃w");
        assert!(w.has_nasal());
        assert!(w.graphemes()[1].is_nasal_diphthong());
        assert!(w.char_at(1).unwrap().is_nasal_vowel());

        let w = word("campo", "pt-PT");
        assert_eq!(w.ipa(), "ˈkɐ̃·pu");
        assert_eq!(w.char_at(2).unwrap().ipa(), "");

        let w = word("pai", "pt-PT");
        assert_eq!(w.ipa(), "ˈpaj");
        assert!(w.has_diphthong());
        assert_eq!(w.cv_pattern(), "CVG");
    }

    #[test]
    fn test_irregular_and_homograph() {
        let w = word("muito", "pt-PT");
        assert!(w.is_irregular());
        assert_eq!(w.ipa(), "ˈmũj·tu");

        let pt = get_dialect("pt-PT").unwrap();
        let noun = WordToken::new("sede", 0, 0, Some("NOUN"), pt);
        let verb = WordToken::new("sede", 0, 0, Some("VERB"), pt);
        assert!(noun.is_homograph());
        assert_eq!(noun.ipa(), "ˈsɛ·dɨ");
        assert_eq!(verb.ipa(), "ˈse·dɨ");
    }

    #[test]
    fn test_archaic_spelling() {
        let w = word("pharmacia", "pt-PT");
        assert!(w.is_archaic());
        assert!(w.grapheme(0).unwrap().is_archaism());
        assert!(!word("farmácia", "pt-PT").is_archaic());
    }

    #[test]
    fn test_stress_flags() {
        let w = word("café", "pt-PT");
        assert_eq!(w.stressed_syllable_idx(), 1);
        let e = w.char_at(3).unwrap();
        assert!(e.has_primary_stress());
        assert!(!w.char_at(1).unwrap().has_primary_stress());
        assert_eq!(w.stress_pattern(), StressPattern::Oxytone);
    }

    #[test]
    fn test_degenerate_words() {
        let empty = word("", "pt-PT");
        assert_eq!(empty.ipa(), "");
        assert_eq!(empty.n_chars(), 0);
        assert_eq!(empty.stressed_syllable_idx(), 0);

        let comma = word(",", "pt-PT");
        assert_eq!(comma.ipa(), "");
        assert!(comma.is_punct());

        let a = word("a", "pt-PT");
        assert_eq!(a.n_syllables(), 1);
        assert_eq!(a.ipa(), "ˈɐ");
    }

    #[test]
    fn test_syllable_positions() {
        let w = word("mar", "pt-PT");
        let positions: Vec<SyllablePosition> =
            w.graphemes().iter().map(GraphemeToken::syllable_position).collect();
        assert_eq!(
            positions,
            vec![SyllablePosition::Onset, SyllablePosition::Nucleus, SyllablePosition::Coda]
        );
    }

    #[test]
    fn test_onset_cluster_and_hiatus() {
        let w = word("livro", "pt-PT");
        assert!(w.grapheme(2).unwrap().is_onset_cluster());
        assert!(w.has_consonant_cluster());

        let w = word("saída", "pt-PT");
        assert!(w.grapheme(1).unwrap().is_vocalic_hiatus());
    }

    #[test]
    fn test_features_nest_graphemes() {
        let w = word("chá", "pt-PT");
        let f = w.features();
        assert_eq!(f.get("n_syllables").and_then(|v| v.as_int()), Some(1));
        assert_eq!(f.get("graph_0_text").and_then(|v| v.as_str()), Some("ch"));
        assert_eq!(f.get("graph_0_char_1_text").and_then(|v| v.as_str()), Some("h"));
        assert_eq!(f.get("graph_1_has_primary_stress").and_then(|v| v.as_bool()), Some(true));
    }
}
