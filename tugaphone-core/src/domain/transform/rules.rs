//! Regional IPA rewrite rules
//!
//! Each rule models one phenomenon of a regional accent as a rewrite of the
//! IPA produced for a word. Rules see the orthographic word, the current IPA
//! and the part-of-speech tag, and nothing else; they hold no state between
//! calls.
//!
//! Generated IPA marks stress before the stressed syllable and separates
//! syllables with "·", so patterns skip over those marks where a phenomenon
//! crosses a syllable boundary.

use crate::domain::error::Result;
use log::trace;
use regex::Regex;
use std::fmt;

/// Consonant symbols that can condition a rewrite
const CONSONANTS: &str = "pbtdkɡgfvszʃʒmnɲlɫrɾʁʎβ";

/// Vowel symbols, precomposed nasal vowels included
const VOWELS: &str = "aeiouɐɛɔɨãẽĩõũ";

/// A named rewrite of word IPA
pub trait IpaTransform: Send + Sync {
    /// Registry name, used when presets are serialized
    fn name(&self) -> &str;

    /// One-line summary for listings
    fn description(&self) -> &str {
        ""
    }

    /// Rewrite `ipa`, the current transcription of `word`
    fn apply(&self, word: &str, ipa: &str, postag: &str) -> String;
}

impl fmt::Debug for dyn IpaTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IpaTransform").field(&self.name()).finish()
    }
}

/// One compiled pattern and its replacement
#[derive(Debug, Clone)]
pub struct Rewrite {
    regex: Regex,
    replacement: String,
    until_stable: bool,
}

impl Rewrite {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            replacement: replacement.to_string(),
            until_stable: false,
        })
    }

    /// Reapply until nothing changes, for patterns whose context overlaps
    /// the next match
    pub fn until_stable(mut self) -> Self {
        self.until_stable = true;
        self
    }

    pub fn apply(&self, ipa: &str) -> String {
        let mut current = self
            .regex
            .replace_all(ipa, self.replacement.as_str())
            .into_owned();
        if !self.until_stable {
            return current;
        }
        // Every pass that changes the string rewrites at least one symbol
        for _ in 0..ipa.chars().count() {
            let next = self
                .regex
                .replace_all(&current, self.replacement.as_str())
                .into_owned();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

/// Condition on the orthographic word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordGuard {
    Always,
    StartsWith(&'static str),
    EndsWith(&'static str),
    Contains(&'static str),
}

impl WordGuard {
    pub fn admits(self, word: &str) -> bool {
        match self {
            WordGuard::Always => true,
            WordGuard::StartsWith(s) => word.starts_with(s),
            WordGuard::EndsWith(s) => word.ends_with(s),
            WordGuard::Contains(s) => word.contains(s),
        }
    }
}

/// A guard plus an ordered list of rewrites
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: &'static str,
    description: &'static str,
    guard: WordGuard,
    rewrites: Vec<Rewrite>,
}

impl RewriteRule {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            guard: WordGuard::Always,
            rewrites: Vec::new(),
        }
    }

    pub fn guarded(mut self, guard: WordGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn rewrite(mut self, rewrite: Rewrite) -> Self {
        self.rewrites.push(rewrite);
        self
    }
}

impl IpaTransform for RewriteRule {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn apply(&self, word: &str, ipa: &str, _postag: &str) -> String {
        if !self.guard.admits(word) {
            return ipa.to_string();
        }
        let out = self
            .rewrites
            .iter()
            .fold(ipa.to_string(), |acc, rewrite| rewrite.apply(&acc));
        if out != ipa {
            trace!("{}: {} {} -> {}", self.name, word, ipa, out);
        }
        out
    }
}

/// Keeps "ou" as [ow] where the base output collapsed it to [o]
#[derive(Debug, Clone)]
pub struct OuDiphthongRetention {
    stressed_o: Rewrite,
}

impl OuDiphthongRetention {
    pub const NAME: &'static str = "retain_ou_diphthong";

    pub fn new() -> Result<Self> {
        Ok(Self {
            stressed_o: Rewrite::new(
                &format!("ˈ([^·ˈ{VOWELS}]*)o([^w\u{303}]|$)"),
                "ˈ${1}ow${2}",
            )?,
        })
    }
}

impl IpaTransform for OuDiphthongRetention {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Keep <ou> as the diphthong [ow]"
    }

    fn apply(&self, word: &str, ipa: &str, _postag: &str) -> String {
        let out = if word.starts_with("ou") && ipa.starts_with("ˈo") && !ipa.starts_with("ˈow") {
            format!("ˈow{}", &ipa["ˈo".len()..])
        } else if word.contains('ô') {
            ipa.to_string()
        } else if word.contains("ou") {
            self.stressed_o.apply(ipa)
        } else if word == "boa" {
            "ˈbow·ɐ".to_string()
        } else {
            ipa.to_string()
        };
        if out != ipa {
            trace!("{}: {} {} -> {}", Self::NAME, word, ipa, out);
        }
        out
    }
}

/// Every built-in rule, in registry order
pub fn builtin_rules() -> Result<Vec<Box<dyn IpaTransform>>> {
    let c = CONSONANTS;
    let v = VOWELS;
    let nasal = "(?:[ãẽĩõũ]|[aeiouɐɛɔ]\u{303})";
    let vowel = format!("[{v}]\u{303}?");
    let onset = format!("[^·ˈ{v}]*");

    let rules: Vec<Box<dyn IpaTransform>> = vec![
        Box::new(
            RewriteRule::new(
                "reduce_vowel_centralization",
                "Realize [ɨ] between consonants as [e]",
            )
            .rewrite(Rewrite::new(&format!("([{c}])ɨ([·ˈ]*[{c}])"), "${1}e${2}")?.until_stable()),
        ),
        // The ɐ -> a opening before final nasals and laterals over-applies
        // across syllables, so this rule stays an identity.
        Box::new(RewriteRule::new(
            "open_vowel_preference",
            "Prefer open [a] over [ɐ] (currently a no-op)",
        )),
        Box::new(OuDiphthongRetention::new()?),
        Box::new(
            RewriteRule::new("retain_ei_diphthong", "Keep stressed <ei> as [ej] instead of [ɐj]")
                .rewrite(Rewrite::new(&format!("ˈ({onset})ɐj"), "ˈ${1}ej")?),
        ),
        Box::new(
            RewriteRule::new(
                "conservative_o_nasal_retention",
                "Realize stressed final -ão as [õ]",
            )
            .guarded(WordGuard::EndsWith("ão"))
            .rewrite(Rewrite::new("(ˈ[^·ˈ]*)ɐ\u{303}w$", "${1}õ")?)
            .rewrite(Rewrite::new("(ˈ[^·ˈ]*)ɐ\u{303}ʊ\u{303}$", "${1}õ")?),
        ),
        Box::new(
            RewriteRule::new(
                "labial_fricative_stop_merger",
                "Realize word-initial [v] as [β]",
            )
            .guarded(WordGuard::StartsWith("v"))
            .rewrite(Rewrite::new("^ˈv", "ˈβ")?)
            .rewrite(Rewrite::new("^vɨ", "βɨ")?),
        ),
        Box::new(
            RewriteRule::new("palatal_affrication_ch", "Realize <ch> as the affricate [tʃ]")
                .guarded(WordGuard::Contains("ch"))
                .rewrite(Rewrite::new("t?ʃ", "tʃ")?),
        ),
        Box::new(
            RewriteRule::new(
                "rhotic_realization",
                "Realize onset [ʁ] as the alveolar trill [r]",
            )
            .rewrite(Rewrite::new("^(ˈ?)ʁ", "${1}r")?)
            .rewrite(Rewrite::new(&format!("([{c}][·ˈ]*)ʁ"), "${1}r")?),
        ),
        Box::new(
            RewriteRule::new(
                "epenthetic_j_before_palatal",
                "Insert [j] between a stressed vowel and a palatal",
            )
            .rewrite(Rewrite::new(&format!("(ˈ{onset}[aɐeɛ])(·?[ʎɲʃ])"), "${1}j${2}")?),
        ),
        Box::new(
            RewriteRule::new(
                "nasal_diphthongization_e",
                "Diphthongize [ẽ] to [eĩ] before consonants",
            )
            .rewrite(Rewrite::new("(?:ẽ|e\u{303})([^aeiouɐɛɔẽɲʎ]|$)", "eĩ${1}")?),
        ),
        Box::new(
            RewriteRule::new(
                "nasal_diphthongization_o",
                "Diphthongize [õ] to [oũ] before consonants",
            )
            .rewrite(Rewrite::new("(?:õ|o\u{303})([^aeiouɐɛɔẽɲʎ]|$)", "oũ${1}")?),
        ),
        Box::new(
            RewriteRule::new("rising_diphthong_o", "Realize stressed [o] as [uo]")
                .rewrite(Rewrite::new(&format!("ˈ({onset})o([^\u{303}]|$)"), "ˈ${1}uo${2}")?),
        ),
        Box::new(
            RewriteRule::new(
                "nasal_glide_palatalization",
                "Reinforce a final nasal glide as [ɲ]",
            )
            .rewrite(Rewrite::new(&format!("({nasal})[jw]\u{303}$"), "${1}ɲ")?)
            .rewrite(Rewrite::new(&format!("({nasal})j$"), "${1}jɲ")?)
            .rewrite(Rewrite::new(&format!("({nasal})ĩ\u{32f}$"), "${1}ɲ")?),
        ),
        Box::new(
            RewriteRule::new("nasal_vowel_raising", "Raise nasal [ɐ̃] to [ã]")
                .rewrite(Rewrite::new("ɐ\u{303}", "ã")?),
        ),
        Box::new(
            RewriteRule::new(
                "intervocalic_s_voicing",
                "Voice [s] between vowels and after a final vowel",
            )
            .rewrite(
                Rewrite::new(&format!("({vowel}[·ˈ]*)s([·ˈ]*{vowel})"), "${1}z${2}")?
                    .until_stable(),
            )
            .rewrite(Rewrite::new(&format!("({vowel})s$"), "${1}z")?),
        ),
        Box::new(
            RewriteRule::new("initial_z_devoicing", "Devoice word-initial [z] before a vowel")
                .rewrite(Rewrite::new(&format!("^(ˈ?)z({vowel})"), "${1}s${2}")?),
        ),
        Box::new(
            RewriteRule::new(
                "final_nasal_denasalization",
                "Denasalize the final vowel after [ʒ]",
            )
            .rewrite(Rewrite::new("ʒẽj?$", "ʒe")?)
            .rewrite(Rewrite::new("ʒɐ\u{303}$", "ʒɐ")?)
            .rewrite(Rewrite::new("ʒõ$", "ʒo")?),
        ),
    ];
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> Box<dyn IpaTransform> {
        builtin_rules()
            .unwrap()
            .into_iter()
            .find(|r| r.name() == name)
            .unwrap_or_else(|| panic!("missing rule {name}"))
    }

    fn apply(name: &str, word: &str, ipa: &str) -> String {
        rule(name).apply(word, ipa, "NOUN")
    }

    #[test]
    fn test_all_rules_compile_with_unique_names() {
        let rules = builtin_rules().unwrap();
        assert_eq!(rules.len(), 17);
        let mut names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 17);
    }

    #[test]
    fn test_reduce_vowel_centralization() {
        assert_eq!(apply("reduce_vowel_centralization", "pedir", "pɨ·ˈdiɾ"), "pe·ˈdiɾ");
        // Word-final ɨ has no following consonant
        assert_eq!(apply("reduce_vowel_centralization", "noite", "ˈnoj·tɨ"), "ˈnoj·tɨ");
        assert_eq!(
            apply("reduce_vowel_centralization", "pequeno", "pɨ·ˈkɨ·nu"),
            "pe·ˈke·nu"
        );
    }

    #[test]
    fn test_open_vowel_preference_is_identity() {
        assert_eq!(apply("open_vowel_preference", "cama", "ˈkɐ·mɐ"), "ˈkɐ·mɐ");
    }

    #[test]
    fn test_retain_ou_diphthong() {
        assert_eq!(apply("retain_ou_diphthong", "ouro", "ˈo·ɾu"), "ˈow·ɾu");
        assert_eq!(apply("retain_ou_diphthong", "touro", "ˈto·ɾu"), "ˈtow·ɾu");
        assert_eq!(apply("retain_ou_diphthong", "touro", "ˈtow·ɾu"), "ˈtow·ɾu");
        assert_eq!(apply("retain_ou_diphthong", "pôs", "ˈpoʃ"), "ˈpoʃ");
        assert_eq!(apply("retain_ou_diphthong", "boa", "ˈbo·ɐ"), "ˈbow·ɐ");
        assert_eq!(apply("retain_ou_diphthong", "bolo", "ˈbo·lu"), "ˈbo·lu");
    }

    #[test]
    fn test_retain_ei_diphthong() {
        assert_eq!(apply("retain_ei_diphthong", "leite", "ˈlɐj·tɨ"), "ˈlej·tɨ");
        // Only the stressed syllable is restored
        assert_eq!(apply("retain_ei_diphthong", "x", "lɐj·ˈta"), "lɐj·ˈta");
    }

    #[test]
    fn test_conservative_o_nasal_retention() {
        assert_eq!(apply("conservative_o_nasal_retention", "pão", "ˈpɐ̃w"), "ˈpõ");
        assert_eq!(apply("conservative_o_nasal_retention", "irmão", "iɾ·ˈmɐ̃w"), "iɾ·ˈmõ");
        // Unstressed -ão (órgão) is left alone
        assert_eq!(apply("conservative_o_nasal_retention", "órgão", "ˈɔɾ·ɡɐ̃w"), "ˈɔɾ·ɡɐ̃w");
        assert_eq!(apply("conservative_o_nasal_retention", "mãe", "ˈmɐ̃j"), "ˈmɐ̃j");
    }

    #[test]
    fn test_labial_fricative_stop_merger() {
        assert_eq!(apply("labial_fricative_stop_merger", "vaca", "ˈva·kɐ"), "ˈβa·kɐ");
        assert_eq!(apply("labial_fricative_stop_merger", "verdade", "vɨɾ·ˈda·dɨ"), "βɨɾ·ˈda·dɨ");
        assert_eq!(apply("labial_fricative_stop_merger", "uva", "ˈu·vɐ"), "ˈu·vɐ");
    }

    #[test]
    fn test_palatal_affrication_ch() {
        assert_eq!(apply("palatal_affrication_ch", "chuva", "ˈʃu·vɐ"), "ˈtʃu·vɐ");
        assert_eq!(apply("palatal_affrication_ch", "chuva", "ˈtʃu·vɐ"), "ˈtʃu·vɐ");
        assert_eq!(apply("palatal_affrication_ch", "xaile", "ˈʃaj·lɨ"), "ˈʃaj·lɨ");
    }

    #[test]
    fn test_rhotic_realization() {
        assert_eq!(apply("rhotic_realization", "rato", "ˈʁa·tu"), "ˈra·tu");
        assert_eq!(apply("rhotic_realization", "honra", "ˈõ·ʁɐ"), "ˈõ·ʁɐ");
        assert_eq!(apply("rhotic_realization", "melro", "ˈmɛl·ʁu"), "ˈmɛl·ru");
        assert_eq!(apply("rhotic_realization", "carro", "ˈka·ʁu"), "ˈka·ʁu");
    }

    #[test]
    fn test_epenthetic_j_before_palatal() {
        assert_eq!(apply("epenthetic_j_before_palatal", "velho", "ˈvɛ·ʎu"), "ˈvɛj·ʎu");
        assert_eq!(apply("epenthetic_j_before_palatal", "banha", "ˈbɐ·ɲɐ"), "ˈbɐj·ɲɐ");
        assert_eq!(apply("epenthetic_j_before_palatal", "filho", "ˈfi·ʎu"), "ˈfi·ʎu");
    }

    #[test]
    fn test_nasal_diphthongization() {
        assert_eq!(apply("nasal_diphthongization_e", "gente", "ˈʒẽ·tɨ"), "ˈʒeĩ·tɨ");
        assert_eq!(apply("nasal_diphthongization_e", "x", "ẽɐ"), "ẽɐ");
        assert_eq!(apply("nasal_diphthongization_o", "ponte", "ˈpõ·tɨ"), "ˈpoũ·tɨ");
    }

    #[test]
    fn test_rising_diphthong_o() {
        assert_eq!(apply("rising_diphthong_o", "porto", "ˈpoɾ·tu"), "ˈpuoɾ·tu");
        assert_eq!(apply("rising_diphthong_o", "bolo", "ˈbo·lu"), "ˈbuo·lu");
        assert_eq!(apply("rising_diphthong_o", "ponte", "ˈpõ·tɨ"), "ˈpõ·tɨ");
    }

    #[test]
    fn test_nasal_glide_palatalization() {
        assert_eq!(apply("nasal_glide_palatalization", "mãe", "ˈmɐ̃j"), "ˈmɐ̃jɲ");
        assert_eq!(apply("nasal_glide_palatalization", "põe", "ˈpõj̃"), "ˈpõɲ");
        assert_eq!(apply("nasal_glide_palatalization", "pai", "ˈpaj"), "ˈpaj");
    }

    #[test]
    fn test_nasal_vowel_raising() {
        assert_eq!(apply("nasal_vowel_raising", "mãe", "ˈmɐ̃j"), "ˈmãj");
    }

    #[test]
    fn test_intervocalic_s_voicing() {
        assert_eq!(apply("intervocalic_s_voicing", "moço", "ˈmo·su"), "ˈmo·zu");
        assert_eq!(apply("intervocalic_s_voicing", "x", "ˈsa·sa·sa"), "ˈsa·za·za");
        assert_eq!(apply("intervocalic_s_voicing", "seis", "ˈsejs"), "ˈsejs");
        assert_eq!(apply("intervocalic_s_voicing", "lás", "ˈlas"), "ˈlaz");
    }

    #[test]
    fn test_initial_z_devoicing() {
        assert_eq!(apply("initial_z_devoicing", "zero", "ˈzɛ·ɾu"), "ˈsɛ·ɾu");
        assert_eq!(apply("initial_z_devoicing", "casa", "ˈka·zɐ"), "ˈka·zɐ");
    }

    #[test]
    fn test_final_nasal_denasalization() {
        assert_eq!(
            apply("final_nasal_denasalization", "viagem", "vi·ˈa·ʒẽj"),
            "vi·ˈa·ʒe"
        );
        assert_eq!(apply("final_nasal_denasalization", "x", "ˈa·ʒɐ̃"), "ˈa·ʒɐ");
        assert_eq!(apply("final_nasal_denasalization", "hoje", "ˈo·ʒɨ"), "ˈo·ʒɨ");
    }

    #[test]
    fn test_rewrite_until_stable() {
        let once = Rewrite::new("aa", "a").unwrap();
        assert_eq!(once.apply("aaaa"), "aa");
        let stable = Rewrite::new("aa", "a").unwrap().until_stable();
        assert_eq!(stable.apply("aaaa"), "a");
    }
}
