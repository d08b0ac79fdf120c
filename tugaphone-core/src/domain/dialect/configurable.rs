use crate::domain::{
    dialect::{
        config::{
            base_config, get_dialect_config, list_available_dialects, DialectConfig,
            FinalSibilant, PreNasalA, StrongRhotic, VowelReduction,
        },
        traits::{DialectRules, GraphemeKind, TextWindow},
    },
    error::PhonemizerError,
    phonology::{
        features::{vowel_features, Roundedness, VowelBackness, VowelFeatures, VowelHeight},
        is_vowel_letter,
    },
};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

static DIALECTS: OnceLock<Result<HashMap<String, Dialect>, PhonemizerError>> = OnceLock::new();

fn first_char(s: &str) -> Option<char> {
    s.chars().next()
}

fn char_set(entries: &[String]) -> HashSet<char> {
    entries.iter().filter_map(|s| first_char(s)).collect()
}

fn char_map(table: &std::collections::BTreeMap<String, String>) -> HashMap<char, String> {
    table
        .iter()
        .filter_map(|(k, v)| first_char(k).map(|c| (c, v.clone())))
        .collect()
}

fn string_map(table: &std::collections::BTreeMap<String, String>) -> HashMap<String, String> {
    table.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Grapheme tables of one dialect
#[derive(Debug, Clone, Default)]
struct GraphemeTables {
    heterosyllabic_clusters: HashSet<String>,
    digraphs: HashMap<String, String>,
    front_vowel_digraphs: HashMap<String, String>,
    foreign_digraphs: HashMap<String, String>,
    trigraphs: HashMap<String, String>,
    nasal_digraphs: HashMap<String, String>,
    final_nasal_digraphs: HashMap<String, String>,
    oral_diphthongs: HashMap<String, String>,
    nasal_diphthongs: HashMap<String, String>,
    coda_lateral_diphthongs: HashMap<String, String>,
    triphthongs: HashMap<String, String>,
}

/// A dialect inventory built from TOML tables and toggles
///
/// All five standard dialects are instances of this one type; they differ
/// only in the data they were built from.
#[derive(Debug, Clone)]
pub struct Dialect {
    code: String,
    name: String,
    region: String,

    coda_l_semivowel: bool,
    strong_rhotic: StrongRhotic,
    vowel_reduction: VowelReduction,
    final_sibilant: FinalSibilant,
    pre_nasal_a: PreNasalA,

    front_vowels: HashSet<char>,
    nasal_vowels: HashSet<char>,
    foreign_chars: HashSet<char>,
    archaic_graphemes: Vec<String>,
    clitics: HashSet<String>,
    normalized_vowels: HashMap<char, char>,

    phonemes: HashMap<char, String>,
    stressed: HashMap<char, String>,
    reduced: HashMap<char, String>,
    unreduced: HashMap<char, String>,
    final_vowels: HashMap<char, String>,
    clitic_vowels: HashMap<char, String>,
    single_letter_words: HashMap<String, String>,

    graphemes: GraphemeTables,

    oxytone_endings: Vec<String>,
    u_pronounced: HashSet<String>,
    archaic_words: HashSet<String>,
    archaic_mute_p: Vec<(String, HashSet<String>)>,
    irregular_words: HashMap<String, String>,
    grapheme_exceptions: HashMap<String, HashMap<String, String>>,
    homographs: HashMap<String, HashMap<String, String>>,

    config: DialectConfig,
}

impl Dialect {
    /// Build an embedded dialect by its exact code
    pub fn from_code(code: &str) -> Result<Self, PhonemizerError> {
        let config = get_dialect_config(code)?;
        Self::from_config(config)
    }

    /// Build a dialect from an external TOML file merged onto the base tables
    pub fn from_file(path: &Path, dialect_code: Option<&str>) -> Result<Self, PhonemizerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PhonemizerError::ConfigurationError(format!(
                "Failed to read file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let overlay: DialectConfig = toml::from_str(&content).map_err(|e| {
            PhonemizerError::ConfigurationError(format!(
                "Failed to parse TOML from '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = overlay.merged_over(base_config()?);

        // Override dialect code if provided
        if let Some(code) = dialect_code {
            config.metadata.code = code.to_string();
        }

        config.validate()?;

        Self::from_config(&config)
    }

    /// Build a dialect from a fully merged configuration
    pub fn from_config(config: &DialectConfig) -> Result<Self, PhonemizerError> {
        let t = &config.toggles;
        let missing = |name: &str| {
            PhonemizerError::ConfigurationError(format!(
                "Dialect '{}' has no value for toggle '{name}'",
                config.metadata.code
            ))
        };
        let coda_l_semivowel = t.coda_l_semivowel.ok_or_else(|| missing("coda_l_semivowel"))?;
        let strong_rhotic = t.strong_rhotic.ok_or_else(|| missing("strong_rhotic"))?;
        let vowel_reduction = t.vowel_reduction.ok_or_else(|| missing("vowel_reduction"))?;
        let final_sibilant = t.final_sibilant.ok_or_else(|| missing("final_sibilant"))?;
        let pre_nasal_a = t.pre_nasal_a.ok_or_else(|| missing("pre_nasal_a"))?;

        let g = &config.graphemes;
        // The strong R of "rr"/"rh" follows the rhotic toggle
        let digraphs = g
            .digraphs
            .iter()
            .map(|(k, v)| {
                let ipa = if v == StrongRhotic::Uvular.symbol() {
                    strong_rhotic.symbol().to_string()
                } else {
                    v.clone()
                };
                (k.clone(), ipa)
            })
            .collect();

        let graphemes = GraphemeTables {
            heterosyllabic_clusters: g.heterosyllabic_clusters.iter().cloned().collect(),
            digraphs,
            front_vowel_digraphs: string_map(&g.front_vowel_digraphs),
            foreign_digraphs: string_map(&g.foreign_digraphs),
            trigraphs: string_map(&g.trigraphs),
            nasal_digraphs: string_map(&g.nasal_digraphs),
            final_nasal_digraphs: string_map(&g.final_nasal_digraphs),
            oral_diphthongs: string_map(&g.oral_diphthongs),
            nasal_diphthongs: string_map(&g.nasal_diphthongs),
            coda_lateral_diphthongs: string_map(&g.coda_lateral_diphthongs),
            triphthongs: string_map(&g.triphthongs),
        };

        let c = &config.characters;
        let normalized_vowels = c
            .normalized_vowels
            .iter()
            .filter_map(|(k, v)| Some((first_char(k)?, first_char(v)?)))
            .collect();

        let v = &config.vowels;
        let l = &config.lexical;

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            region: config.metadata.region.clone(),
            coda_l_semivowel,
            strong_rhotic,
            vowel_reduction,
            final_sibilant,
            pre_nasal_a,
            front_vowels: char_set(&c.front_vowels),
            nasal_vowels: char_set(&c.nasal_vowels),
            foreign_chars: char_set(&c.foreign_chars),
            archaic_graphemes: c.archaic_graphemes.clone(),
            clitics: c.clitics.iter().cloned().collect(),
            normalized_vowels,
            phonemes: char_map(&config.phonemes),
            stressed: char_map(&v.stressed),
            reduced: char_map(&v.reduced),
            unreduced: char_map(&v.unreduced),
            final_vowels: char_map(&v.final_),
            clitic_vowels: char_map(&v.clitic),
            single_letter_words: string_map(&v.single_letter_words),
            graphemes,
            oxytone_endings: l.oxytone_endings.clone(),
            u_pronounced: l.u_pronounced.iter().cloned().collect(),
            archaic_words: l.archaic_words.iter().cloned().collect(),
            archaic_mute_p: l
                .archaic_mute_p
                .iter()
                .map(|(cluster, words)| (cluster.clone(), words.iter().cloned().collect()))
                .collect(),
            irregular_words: string_map(&l.irregular_words),
            grapheme_exceptions: l
                .grapheme_exceptions
                .iter()
                .map(|(word, table)| (word.clone(), string_map(table)))
                .collect(),
            homographs: config
                .homographs
                .iter()
                .map(|(word, table)| (word.clone(), string_map(table)))
                .collect(),
            config: config.clone(),
        })
    }

    /// The merged configuration this dialect was built from
    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    pub fn coda_l_semivowel(&self) -> bool {
        self.coda_l_semivowel
    }

    pub fn strong_rhotic(&self) -> StrongRhotic {
        self.strong_rhotic
    }

    pub fn vowel_reduction(&self) -> VowelReduction {
        self.vowel_reduction
    }

    pub fn final_sibilant(&self) -> FinalSibilant {
        self.final_sibilant
    }

    pub fn pre_nasal_a(&self) -> PreNasalA {
        self.pre_nasal_a
    }

    /// Lowercase a character and fold archaic or rare diacritics
    pub fn canonical_char(&self, ch: char) -> char {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        self.normalized_vowels.get(&lower).copied().unwrap_or(lower)
    }

    pub fn canonicalize(&self, text: &str) -> String {
        text.chars().map(|c| self.canonical_char(c)).collect()
    }

    pub fn is_front_vowel(&self, ch: char) -> bool {
        self.front_vowels.contains(&ch)
    }

    pub fn is_foreign_char(&self, ch: char) -> bool {
        self.foreign_chars.contains(&ch)
    }

    /// Default phoneme of a character, looked up on its own and then canonical form
    pub fn phoneme(&self, ch: char) -> Option<&str> {
        self.phonemes
            .get(&ch)
            .or_else(|| self.phonemes.get(&self.canonical_char(ch)))
            .map(String::as_str)
    }

    pub fn stressed_vowel(&self, ch: char) -> Option<&str> {
        self.stressed.get(&ch).map(String::as_str)
    }

    pub fn reduced_vowel(&self, ch: char) -> Option<&str> {
        self.reduced.get(&ch).map(String::as_str)
    }

    pub fn unreduced_vowel(&self, ch: char) -> Option<&str> {
        self.unreduced.get(&ch).map(String::as_str)
    }

    pub fn final_vowel(&self, ch: char) -> Option<&str> {
        self.final_vowels.get(&ch).map(String::as_str)
    }

    pub fn clitic_vowel(&self, ch: char) -> Option<&str> {
        self.clitic_vowels.get(&ch).map(String::as_str)
    }

    pub fn single_letter_word(&self, word: &str) -> Option<&str> {
        self.single_letter_words.get(word).map(String::as_str)
    }

    pub fn is_clitic(&self, word: &str) -> bool {
        self.clitics.contains(word)
    }

    pub fn oxytone_endings(&self) -> &[String] {
        &self.oxytone_endings
    }

    /// Words where "u" after q/g is pronounced before e/i
    pub fn pronounces_u(&self, word: &str) -> bool {
        self.u_pronounced.contains(word)
    }

    /// Whether the "p" of an m-p-consonant cluster is mute in this word
    pub fn has_mute_p(&self, word: &str) -> bool {
        self.archaic_mute_p
            .iter()
            .any(|(cluster, words)| word.contains(cluster.as_str()) && words.contains(word))
    }

    pub fn is_heterosyllabic_cluster(&self, pair: &str) -> bool {
        self.graphemes.heterosyllabic_clusters.contains(pair)
    }

    pub fn irregular_word(&self, word: &str) -> Option<&str> {
        self.irregular_words.get(word).map(String::as_str)
    }

    pub fn homograph(&self, word: &str, pos: &str) -> Option<&str> {
        self.homographs
            .get(word)
            .and_then(|table| table.get(pos))
            .map(String::as_str)
    }

    pub fn is_homograph(&self, word: &str) -> bool {
        self.homographs.contains_key(word)
    }

    pub fn grapheme_exception(&self, word: &str, span: &str) -> Option<&str> {
        self.grapheme_exceptions
            .get(word)
            .and_then(|table| table.get(span))
            .map(String::as_str)
    }

    /// IPA of a multi-character grapheme as listed in this dialect's tables
    pub fn grapheme_ipa(&self, kind: GraphemeKind, span: &str, at_word_end: bool) -> Option<&str> {
        let g = &self.graphemes;
        let table = match kind {
            GraphemeKind::Letter => return None,
            GraphemeKind::Digraph => {
                return g
                    .digraphs
                    .get(span)
                    .or_else(|| g.front_vowel_digraphs.get(span))
                    .map(String::as_str)
            }
            GraphemeKind::ForeignDigraph => &g.foreign_digraphs,
            GraphemeKind::Trigraph => &g.trigraphs,
            GraphemeKind::NasalVowel => &g.nasal_digraphs,
            GraphemeKind::NasalDiphthong => {
                if at_word_end {
                    if let Some(ipa) = g.final_nasal_digraphs.get(span) {
                        return Some(ipa.as_str());
                    }
                }
                &g.nasal_diphthongs
            }
            GraphemeKind::OralDiphthong => &g.oral_diphthongs,
            GraphemeKind::CodaLateral => &g.coda_lateral_diphthongs,
            GraphemeKind::Triphthong => &g.triphthongs,
        };
        table.get(span).map(String::as_str)
    }

    /// Vowel features of a letter's default realization
    fn letter_vowel_features(&self, ch: char) -> Option<VowelFeatures> {
        let canonical = self.canonical_char(ch);
        let ipa = self
            .stressed_vowel(canonical)
            .or_else(|| self.phoneme(ch))?;
        vowel_features(ipa)
    }
}

/// "m"/"n" closes a nasal span when followed by a consonant other than "h" or nothing
fn coda_follows(window: &TextWindow<'_>) -> bool {
    match window.next_char() {
        None => true,
        Some('h') => false,
        Some(c) => !is_vowel_letter(c),
    }
}

/// The glide of a diphthong cannot be followed by a coda m/n ("cai·bam" but not "ai" in "ainda")
fn glide_blocked_by_nasal(window: &TextWindow<'_>) -> bool {
    let mut rest = window.suffix.chars();
    match rest.next() {
        Some('m' | 'n') => match rest.next() {
            None => true,
            Some('h') => false,
            Some(c) => !is_vowel_letter(c),
        },
        _ => false,
    }
}

impl DialectRules for Dialect {
    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn classify_span(&self, window: &TextWindow<'_>) -> Option<GraphemeKind> {
        let g = &self.graphemes;
        let span = window.span;

        match span.chars().count() {
            3 => {
                if g.trigraphs.contains_key(span) {
                    return Some(GraphemeKind::Trigraph);
                }
                if g.triphthongs.contains_key(span) && !glide_blocked_by_nasal(window) {
                    return Some(GraphemeKind::Triphthong);
                }
                None
            }
            2 => {
                if g.digraphs.contains_key(span) {
                    return Some(GraphemeKind::Digraph);
                }
                if g.front_vowel_digraphs.contains_key(span)
                    && window.next_char().is_some_and(|c| self.is_front_vowel(c))
                    && !self.pronounces_u(&window.word())
                {
                    return Some(GraphemeKind::Digraph);
                }
                if g.foreign_digraphs.contains_key(span) {
                    return Some(GraphemeKind::ForeignDigraph);
                }
                if window.suffix.is_empty() && g.final_nasal_digraphs.contains_key(span) {
                    return Some(GraphemeKind::NasalDiphthong);
                }
                if g.nasal_digraphs.contains_key(span) && coda_follows(window) {
                    return Some(GraphemeKind::NasalVowel);
                }
                if self.coda_l_semivowel
                    && span != "lh"
                    && g.coda_lateral_diphthongs.contains_key(span)
                    && coda_follows(window)
                {
                    return Some(GraphemeKind::CodaLateral);
                }
                if glide_blocked_by_nasal(window) {
                    return None;
                }
                if g.oral_diphthongs.contains_key(span) {
                    return Some(GraphemeKind::OralDiphthong);
                }
                if g.nasal_diphthongs.contains_key(span) {
                    return Some(GraphemeKind::NasalDiphthong);
                }
                None
            }
            _ => None,
        }
    }

    fn vowel_height(&self, ch: char) -> Option<VowelHeight> {
        self.letter_vowel_features(ch).map(|f| f.height)
    }

    fn vowel_backness(&self, ch: char) -> Option<VowelBackness> {
        self.letter_vowel_features(ch).map(|f| f.backness)
    }

    fn vowel_roundedness(&self, ch: char) -> Option<Roundedness> {
        self.letter_vowel_features(ch).map(|f| f.roundedness)
    }

    fn nasal_marker(&self, ch: char) -> bool {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        self.nasal_vowels.contains(&lower)
    }

    fn is_archaic(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        if self.archaic_words.contains(&lower) {
            return true;
        }
        // Single-letter marks match anywhere, longer marks only as the whole span
        self.archaic_graphemes.iter().any(|mark| {
            if mark.chars().count() == 1 {
                lower.contains(mark.as_str())
            } else {
                lower == *mark
            }
        })
    }
}

fn load_embedded_dialects() -> Result<HashMap<String, Dialect>, PhonemizerError> {
    let mut dialects = HashMap::new();
    for code in list_available_dialects() {
        dialects.insert(code.to_string(), Dialect::from_code(code)?);
    }
    Ok(dialects)
}

/// Shared instance of an embedded dialect, by exact code
pub fn get_dialect(code: &str) -> Result<&'static Dialect, PhonemizerError> {
    let dialects = DIALECTS
        .get_or_init(load_embedded_dialects)
        .as_ref()
        .map_err(Clone::clone)?;

    dialects
        .get(code)
        .ok_or_else(|| PhonemizerError::UnsupportedDialect(code.to_string()))
}
