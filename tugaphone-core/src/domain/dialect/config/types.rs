use crate::domain::error::PhonemizerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root dialect configuration, as found in `configs/dialects/*.toml`
///
/// Every section is optional so that a dialect file only needs to carry
/// what differs from the shared base inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    pub metadata: MetadataConfig,
    pub toggles: TogglesConfig,
    pub characters: CharactersConfig,
    pub phonemes: BTreeMap<String, String>,
    pub vowels: VowelsConfig,
    pub graphemes: GraphemesConfig,
    pub lexical: LexicalConfig,
    pub homographs: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
    /// Region key of the reference lexicon (e.g. "lbx")
    pub region: String,
}

/// Named switches that distinguish dialects sharing one algorithm
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TogglesConfig {
    pub coda_l_semivowel: Option<bool>,
    pub strong_rhotic: Option<StrongRhotic>,
    pub vowel_reduction: Option<VowelReduction>,
    pub final_sibilant: Option<FinalSibilant>,
    pub pre_nasal_a: Option<PreNasalA>,
}

/// Realization of the strong R ("rr", word-initial "r", "r" after l/n/s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrongRhotic {
    Uvular,
    Glottal,
    Alveolar,
}

impl StrongRhotic {
    pub fn symbol(self) -> &'static str {
        match self {
            StrongRhotic::Uvular => "ʁ",
            StrongRhotic::Glottal => "h",
            StrongRhotic::Alveolar => "r",
        }
    }
}

/// How strongly unstressed a/e/o are reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VowelReduction {
    None,
    Weak,
    Strong,
}

impl VowelReduction {
    pub fn as_str(self) -> &'static str {
        match self {
            VowelReduction::None => "none",
            VowelReduction::Weak => "weak",
            VowelReduction::Strong => "strong",
        }
    }
}

/// Realization of coda "s" and word-final "z"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalSibilant {
    Postalveolar,
    Alveolar,
}

impl FinalSibilant {
    pub fn symbol(self) -> &'static str {
        match self {
            FinalSibilant::Postalveolar => "ʃ",
            FinalSibilant::Alveolar => "s",
        }
    }
}

/// Quality of a stressed "a" followed by a nasal onset ("cama")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreNasalA {
    Keep,
    Raise,
    Nasalize,
}

impl PreNasalA {
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            PreNasalA::Keep => None,
            PreNasalA::Raise => Some("ɐ"),
            PreNasalA::Nasalize => Some("ɐ̃"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharactersConfig {
    pub front_vowels: Vec<String>,
    pub nasal_vowels: Vec<String>,
    pub foreign_chars: Vec<String>,
    /// Spellings abolished by the orthographic reforms (ü, grave accents, ph)
    pub archaic_graphemes: Vec<String>,
    pub clitics: Vec<String>,
    pub normalized_vowels: BTreeMap<String, String>,
}

/// Realizations of plain a/e/o by prosodic position
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VowelsConfig {
    pub stressed: BTreeMap<String, String>,
    pub reduced: BTreeMap<String, String>,
    pub unreduced: BTreeMap<String, String>,
    #[serde(rename = "final")]
    pub final_: BTreeMap<String, String>,
    pub clitic: BTreeMap<String, String>,
    pub single_letter_words: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphemesConfig {
    pub heterosyllabic_clusters: Vec<String>,
    pub digraphs: BTreeMap<String, String>,
    pub front_vowel_digraphs: BTreeMap<String, String>,
    pub foreign_digraphs: BTreeMap<String, String>,
    pub trigraphs: BTreeMap<String, String>,
    pub nasal_digraphs: BTreeMap<String, String>,
    pub final_nasal_digraphs: BTreeMap<String, String>,
    pub oral_diphthongs: BTreeMap<String, String>,
    pub nasal_diphthongs: BTreeMap<String, String>,
    pub coda_lateral_diphthongs: BTreeMap<String, String>,
    pub triphthongs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    pub oxytone_endings: Vec<String>,
    pub u_pronounced: Vec<String>,
    pub archaic_words: Vec<String>,
    pub archaic_mute_p: BTreeMap<String, Vec<String>>,
    pub irregular_words: BTreeMap<String, String>,
    pub grapheme_exceptions: BTreeMap<String, BTreeMap<String, String>>,
}

fn extend_map<V: Clone>(base: &BTreeMap<String, V>, overlay: &BTreeMap<String, V>) -> BTreeMap<String, V> {
    let mut merged = base.clone();
    merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

fn replace_list(base: &[String], overlay: &[String]) -> Vec<String> {
    if overlay.is_empty() {
        base.to_vec()
    } else {
        overlay.to_vec()
    }
}

impl DialectConfig {
    /// Merge this configuration on top of `base`
    ///
    /// Metadata comes from `self`. Toggles fall back to the base value,
    /// maps are extended key by key and lists are replaced when non-empty.
    pub fn merged_over(&self, base: &DialectConfig) -> DialectConfig {
        let toggles = TogglesConfig {
            coda_l_semivowel: self.toggles.coda_l_semivowel.or(base.toggles.coda_l_semivowel),
            strong_rhotic: self.toggles.strong_rhotic.or(base.toggles.strong_rhotic),
            vowel_reduction: self.toggles.vowel_reduction.or(base.toggles.vowel_reduction),
            final_sibilant: self.toggles.final_sibilant.or(base.toggles.final_sibilant),
            pre_nasal_a: self.toggles.pre_nasal_a.or(base.toggles.pre_nasal_a),
        };

        let characters = CharactersConfig {
            front_vowels: replace_list(&base.characters.front_vowels, &self.characters.front_vowels),
            nasal_vowels: replace_list(&base.characters.nasal_vowels, &self.characters.nasal_vowels),
            foreign_chars: replace_list(
                &base.characters.foreign_chars,
                &self.characters.foreign_chars,
            ),
            archaic_graphemes: replace_list(
                &base.characters.archaic_graphemes,
                &self.characters.archaic_graphemes,
            ),
            clitics: replace_list(&base.characters.clitics, &self.characters.clitics),
            normalized_vowels: extend_map(
                &base.characters.normalized_vowels,
                &self.characters.normalized_vowels,
            ),
        };

        let vowels = VowelsConfig {
            stressed: extend_map(&base.vowels.stressed, &self.vowels.stressed),
            reduced: extend_map(&base.vowels.reduced, &self.vowels.reduced),
            unreduced: extend_map(&base.vowels.unreduced, &self.vowels.unreduced),
            final_: extend_map(&base.vowels.final_, &self.vowels.final_),
            clitic: extend_map(&base.vowels.clitic, &self.vowels.clitic),
            single_letter_words: extend_map(
                &base.vowels.single_letter_words,
                &self.vowels.single_letter_words,
            ),
        };

        let (b, o) = (&base.graphemes, &self.graphemes);
        let graphemes = GraphemesConfig {
            heterosyllabic_clusters: replace_list(
                &b.heterosyllabic_clusters,
                &o.heterosyllabic_clusters,
            ),
            digraphs: extend_map(&b.digraphs, &o.digraphs),
            front_vowel_digraphs: extend_map(&b.front_vowel_digraphs, &o.front_vowel_digraphs),
            foreign_digraphs: extend_map(&b.foreign_digraphs, &o.foreign_digraphs),
            trigraphs: extend_map(&b.trigraphs, &o.trigraphs),
            nasal_digraphs: extend_map(&b.nasal_digraphs, &o.nasal_digraphs),
            final_nasal_digraphs: extend_map(&b.final_nasal_digraphs, &o.final_nasal_digraphs),
            oral_diphthongs: extend_map(&b.oral_diphthongs, &o.oral_diphthongs),
            nasal_diphthongs: extend_map(&b.nasal_diphthongs, &o.nasal_diphthongs),
            coda_lateral_diphthongs: extend_map(
                &b.coda_lateral_diphthongs,
                &o.coda_lateral_diphthongs,
            ),
            triphthongs: extend_map(&b.triphthongs, &o.triphthongs),
        };

        let (b, o) = (&base.lexical, &self.lexical);
        let lexical = LexicalConfig {
            oxytone_endings: replace_list(&b.oxytone_endings, &o.oxytone_endings),
            u_pronounced: replace_list(&b.u_pronounced, &o.u_pronounced),
            archaic_words: replace_list(&b.archaic_words, &o.archaic_words),
            archaic_mute_p: extend_map(&b.archaic_mute_p, &o.archaic_mute_p),
            irregular_words: extend_map(&b.irregular_words, &o.irregular_words),
            grapheme_exceptions: extend_map(&b.grapheme_exceptions, &o.grapheme_exceptions),
        };

        DialectConfig {
            metadata: self.metadata.clone(),
            toggles,
            characters,
            phonemes: extend_map(&base.phonemes, &self.phonemes),
            vowels,
            graphemes,
            lexical,
            homographs: extend_map(&base.homographs, &self.homographs),
        }
    }

    /// Validate a fully merged configuration
    pub fn validate(&self) -> Result<(), PhonemizerError> {
        if self.metadata.code.trim().is_empty() {
            return Err(PhonemizerError::ConfigurationError(
                "Dialect code must not be empty".to_string(),
            ));
        }

        let t = &self.toggles;
        if t.coda_l_semivowel.is_none()
            || t.strong_rhotic.is_none()
            || t.vowel_reduction.is_none()
            || t.final_sibilant.is_none()
            || t.pre_nasal_a.is_none()
        {
            return Err(PhonemizerError::ConfigurationError(format!(
                "Dialect '{}' leaves some toggles unset",
                self.metadata.code
            )));
        }

        if self.phonemes.is_empty() {
            return Err(PhonemizerError::ConfigurationError(format!(
                "Dialect '{}' defines no phonemes",
                self.metadata.code
            )));
        }

        let v = &self.vowels;
        for (table, entries) in [
            ("phonemes", &self.phonemes),
            ("vowels.stressed", &v.stressed),
            ("vowels.reduced", &v.reduced),
            ("vowels.unreduced", &v.unreduced),
            ("vowels.final", &v.final_),
            ("vowels.clitic", &v.clitic),
        ] {
            if let Some(key) = entries.keys().find(|k| k.chars().count() != 1) {
                return Err(PhonemizerError::ConfigurationError(format!(
                    "Key '{key}' in [{table}] must be a single character"
                )));
            }
        }

        let c = &self.characters;
        for entry in c.front_vowels.iter().chain(&c.nasal_vowels).chain(&c.foreign_chars) {
            if entry.chars().count() != 1 {
                return Err(PhonemizerError::ConfigurationError(format!(
                    "Character set entries must be single characters, got '{entry}'"
                )));
            }
        }

        for (from, to) in &self.characters.normalized_vowels {
            if from.chars().count() != 1 || to.chars().count() != 1 {
                return Err(PhonemizerError::ConfigurationError(format!(
                    "Normalized vowel mapping must be char to char, got '{from}' -> '{to}'"
                )));
            }
        }

        let g = &self.graphemes;
        let sized_tables: [(&str, &BTreeMap<String, String>, usize); 10] = [
            ("digraphs", &g.digraphs, 2),
            ("front_vowel_digraphs", &g.front_vowel_digraphs, 2),
            ("foreign_digraphs", &g.foreign_digraphs, 2),
            ("nasal_digraphs", &g.nasal_digraphs, 2),
            ("final_nasal_digraphs", &g.final_nasal_digraphs, 2),
            ("oral_diphthongs", &g.oral_diphthongs, 2),
            ("nasal_diphthongs", &g.nasal_diphthongs, 2),
            ("coda_lateral_diphthongs", &g.coda_lateral_diphthongs, 2),
            ("trigraphs", &g.trigraphs, 3),
            ("triphthongs", &g.triphthongs, 3),
        ];
        for (table, entries, len) in sized_tables {
            if let Some(key) = entries.keys().find(|k| k.chars().count() != len) {
                return Err(PhonemizerError::ConfigurationError(format!(
                    "Grapheme '{key}' in [graphemes.{table}] must have {len} characters"
                )));
            }
        }

        if let Some(cluster) = g
            .heterosyllabic_clusters
            .iter()
            .find(|c| c.chars().count() != 2)
        {
            return Err(PhonemizerError::ConfigurationError(format!(
                "Heterosyllabic cluster '{cluster}' must have 2 characters"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_config_deserialize() {
        let toml_str = r#"
            [metadata]
            code = "pt-XX"
            name = "Test Portuguese"
            region = "tst"

            [toggles]
            strong_rhotic = "glottal"
            vowel_reduction = "weak"

            [phonemes]
            a = "a"

            [graphemes.digraphs]
            nh = "ɲ"

            [homographs.sede]
            NOUN = "ˈsɛ·dɨ"
        "#;

        let config: DialectConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.metadata.code, "pt-XX");
        assert_eq!(config.toggles.strong_rhotic, Some(StrongRhotic::Glottal));
        assert_eq!(config.toggles.vowel_reduction, Some(VowelReduction::Weak));
        assert_eq!(config.toggles.final_sibilant, None);
        assert_eq!(config.graphemes.digraphs.get("nh").map(String::as_str), Some("ɲ"));
        assert_eq!(config.homographs["sede"]["NOUN"], "ˈsɛ·dɨ");
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let base: DialectConfig = toml::from_str(
            r#"
            [toggles]
            coda_l_semivowel = false
            strong_rhotic = "uvular"
            [phonemes]
            a = "ɐ"
            e = "ɨ"
            [lexical]
            oxytone_endings = ["r", "l"]
            "#,
        )
        .unwrap();
        let overlay: DialectConfig = toml::from_str(
            r#"
            [metadata]
            code = "pt-XX"
            [toggles]
            coda_l_semivowel = true
            [phonemes]
            a = "a"
            "#,
        )
        .unwrap();

        let merged = overlay.merged_over(&base);
        assert_eq!(merged.metadata.code, "pt-XX");
        assert_eq!(merged.toggles.coda_l_semivowel, Some(true));
        assert_eq!(merged.toggles.strong_rhotic, Some(StrongRhotic::Uvular));
        assert_eq!(merged.phonemes["a"], "a");
        assert_eq!(merged.phonemes["e"], "ɨ");
        assert_eq!(merged.lexical.oxytone_endings, vec!["r", "l"]);
    }

    #[test]
    fn test_validate_rejects_missing_toggles() {
        let config: DialectConfig = toml::from_str(
            r#"
            [metadata]
            code = "pt-XX"
            [phonemes]
            a = "a"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(PhonemizerError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_grapheme_length() {
        let mut config: DialectConfig = toml::from_str(
            r#"
            [metadata]
            code = "pt-XX"
            [toggles]
            coda_l_semivowel = false
            strong_rhotic = "uvular"
            vowel_reduction = "strong"
            final_sibilant = "postalveolar"
            pre_nasal_a = "keep"
            [phonemes]
            a = "a"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());

        config
            .graphemes
            .digraphs
            .insert("nhh".to_string(), "ɲ".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("nhh"));
    }

    #[test]
    fn test_toggle_symbols() {
        assert_eq!(StrongRhotic::Uvular.symbol(), "ʁ");
        assert_eq!(StrongRhotic::Glottal.symbol(), "h");
        assert_eq!(StrongRhotic::Alveolar.symbol(), "r");
        assert_eq!(FinalSibilant::Postalveolar.symbol(), "ʃ");
        assert_eq!(FinalSibilant::Alveolar.symbol(), "s");
        assert_eq!(PreNasalA::Keep.symbol(), None);
        assert_eq!(PreNasalA::Nasalize.symbol(), Some("ɐ̃"));
    }
}
