//! Primary stress placement

use super::{is_stress_accent, is_tilde_vowel};
use crate::domain::dialect::Dialect;
use serde::{Deserialize, Serialize};

/// Position of the stressed syllable counted from the end of the word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressPattern {
    Monosyllable,
    /// Stress on the last syllable
    Oxytone,
    /// Stress on the penultimate syllable
    Paroxytone,
    /// Stress on the antepenultimate syllable or earlier
    Proparoxytone,
}

impl StressPattern {
    pub fn from_position(n_syllables: usize, stressed: usize) -> Self {
        if n_syllables <= 1 {
            return StressPattern::Monosyllable;
        }
        match n_syllables - 1 - stressed.min(n_syllables - 1) {
            0 => StressPattern::Oxytone,
            1 => StressPattern::Paroxytone,
            _ => StressPattern::Proparoxytone,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StressPattern::Monosyllable => "monosyllable",
            StressPattern::Oxytone => "oxytone",
            StressPattern::Paroxytone => "paroxytone",
            StressPattern::Proparoxytone => "proparoxytone",
        }
    }
}

/// Index of the stressed syllable
///
/// Rules in priority order: monosyllables are stressed on their only
/// syllable; an acute, circumflex or grave accent marks its syllable; a
/// tilde marks its syllable; an oxytone ending stresses the last syllable;
/// otherwise the penultimate syllable is stressed.
pub fn stressed_syllable(word: &str, syllables: &[String], dialect: &Dialect) -> usize {
    let n = syllables.len();
    if n <= 1 {
        return 0;
    }

    let find = |pred: fn(char) -> bool| syllables.iter().position(|s| s.chars().any(pred));

    if let Some(idx) = find(is_stress_accent) {
        return idx;
    }
    if let Some(idx) = find(is_tilde_vowel) {
        return idx;
    }

    let word = word.to_lowercase();
    if dialect
        .oxytone_endings()
        .iter()
        .any(|ending| word.ends_with(ending.as_str()))
    {
        return n - 1;
    }

    n - 2
}
