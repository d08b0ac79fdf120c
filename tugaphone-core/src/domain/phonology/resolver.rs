//! Context-sensitive IPA for single-letter graphemes
//!
//! Letters that belong to a multi-character grapheme take their share of the
//! grapheme's table IPA instead; this module only decides what a letter
//! sounds like on its own, given its neighbours in the word, its syllable and
//! the word's stress.

use super::{is_silent, is_vowel_letter, ACUTE_VOWELS};
use crate::domain::dialect::{Dialect, VowelReduction};

/// A character position inside a word, with everything needed to realize it
#[derive(Debug, Clone, Copy)]
pub struct CharContext<'a> {
    /// Lowercased word
    pub word: &'a str,
    /// Lowercased characters of the word
    pub chars: &'a [char],
    /// Canonical characters of the word (see `Dialect::canonical_char`)
    pub canonical: &'a [char],
    /// Syllable index of every character
    pub char_to_syllable: &'a [usize],
    pub idx: usize,
    pub stressed_syllable: usize,
    pub n_syllables: usize,
}

impl<'a> CharContext<'a> {
    pub fn char(&self) -> char {
        self.chars[self.idx]
    }

    pub fn canonical_char(&self) -> char {
        self.canonical[self.idx]
    }

    pub fn prev(&self) -> Option<char> {
        self.idx.checked_sub(1).map(|i| self.canonical[i])
    }

    pub fn next(&self) -> Option<char> {
        self.canonical.get(self.idx + 1).copied()
    }

    pub fn is_first(&self) -> bool {
        self.idx == 0
    }

    pub fn is_last(&self) -> bool {
        self.idx + 1 == self.chars.len()
    }

    pub fn prefix(&self) -> String {
        self.chars[..self.idx].iter().collect()
    }

    pub fn suffix(&self) -> String {
        self.chars[self.idx + 1..].iter().collect()
    }

    pub fn syllable_idx(&self) -> usize {
        self.char_to_syllable.get(self.idx).copied().unwrap_or(0)
    }

    pub fn is_stressed(&self) -> bool {
        self.syllable_idx() == self.stressed_syllable
    }

    pub fn in_last_syllable(&self) -> bool {
        self.syllable_idx() + 1 >= self.n_syllables
    }

    pub fn prev_is_vowel(&self) -> bool {
        self.prev().is_some_and(is_vowel_letter)
    }

    pub fn next_is_vowel(&self) -> bool {
        self.next().is_some_and(is_vowel_letter)
    }

    /// Whether the next character opens the following syllable
    fn next_starts_syllable(&self) -> bool {
        self.char_to_syllable
            .get(self.idx + 1)
            .is_some_and(|&s| s == self.syllable_idx() + 1)
    }

    /// Whether another vowel shares this character's syllable
    fn syllable_has_other_vowel(&self) -> bool {
        let syllable = self.syllable_idx();
        self.canonical
            .iter()
            .zip(self.char_to_syllable)
            .enumerate()
            .any(|(i, (&c, &s))| i != self.idx && s == syllable && is_vowel_letter(c) && c != 'y')
    }

    pub fn is_silent(&self, dialect: &Dialect) -> bool {
        is_silent(
            self.char(),
            &self.prefix(),
            &self.suffix(),
            self.word,
            dialect,
        )
    }
}

/// IPA of a character realized on its own
pub fn resolve_char_ipa(ctx: &CharContext<'_>, dialect: &Dialect) -> String {
    if ctx.is_silent(dialect) {
        return String::new();
    }

    if is_vowel_letter(ctx.canonical_char()) {
        vowel_ipa(ctx, dialect)
    } else {
        consonant_ipa(ctx, dialect)
    }
}

fn vowel_ipa(ctx: &CharContext<'_>, dialect: &Dialect) -> String {
    let ch = ctx.char();
    let c = ctx.canonical_char();

    if ctx.chars.len() == 1 {
        if let Some(ipa) = dialect.single_letter_word(ctx.word) {
            return ipa.to_string();
        }
    }

    if dialect.is_clitic(ctx.word) {
        if let Some(ipa) = dialect.clitic_vowel(c) {
            return ipa.to_string();
        }
    }

    let ipa = match c {
        'a' | 'e' | 'o' => plain_vowel(ctx, dialect, c),
        'y' if ctx.syllable_has_other_vowel() => Some("j"),
        'y' => Some("i"),
        'u' if matches!(ctx.prev(), Some('q' | 'g')) && ctx.next_is_vowel() => Some("w"),
        _ => None,
    };

    ipa.or_else(|| dialect.phoneme(ch))
        .unwrap_or_default()
        .to_string()
}

/// Realization of an unaccented a/e/o by stress and reduction level
fn plain_vowel<'d>(ctx: &CharContext<'_>, dialect: &'d Dialect, c: char) -> Option<&'d str> {
    if ctx.is_stressed() {
        if c == 'a' && ctx.next_starts_syllable() && matches!(ctx.next(), Some('m' | 'n')) {
            if let Some(symbol) = dialect.pre_nasal_a().symbol() {
                return Some(symbol);
            }
        }
        return dialect.stressed_vowel(c);
    }

    match dialect.vowel_reduction() {
        VowelReduction::Strong => dialect.reduced_vowel(c),
        VowelReduction::Weak if ctx.in_last_syllable() => dialect.final_vowel(c),
        VowelReduction::Weak | VowelReduction::None => dialect.unreduced_vowel(c),
    }
}

fn consonant_ipa(ctx: &CharContext<'_>, dialect: &Dialect) -> String {
    let ch = ctx.char();
    let front_follows = ctx.next().is_some_and(|n| dialect.is_front_vowel(n));

    let ipa = match ctx.canonical_char() {
        'c' if front_follows => Some("s"),
        'g' if front_follows => Some("ʒ"),
        'r' if ctx.is_first() || matches!(ctx.prev(), Some('l' | 'n' | 's')) => {
            Some(dialect.strong_rhotic().symbol())
        }
        's' => Some(sibilant_s(ctx, dialect)),
        'x' => x_ipa(ctx),
        'z' if ctx.is_last() && !ctx.is_first() => Some(dialect.final_sibilant().symbol()),
        _ => None,
    };

    ipa.or_else(|| dialect.phoneme(ch))
        .unwrap_or_default()
        .to_string()
}

fn sibilant_s(ctx: &CharContext<'_>, dialect: &Dialect) -> &'static str {
    if ctx.prev_is_vowel() && ctx.next_is_vowel() {
        return "z";
    }
    let word = ctx.word;
    if ctx.idx == 4 && ctx.next_is_vowel() && (word.starts_with("trans") || word.starts_with("trâns"))
    {
        return "z";
    }
    if !ctx.is_first() && !ctx.next_is_vowel() {
        return dialect.final_sibilant().symbol();
    }
    "s"
}

/// The letter x: [ʃ], [ks], [s], [z] or [gz] depending on position and stem
fn x_ipa(ctx: &CharContext<'_>) -> Option<&'static str> {
    let word = ctx.word;
    if ctx.is_first() {
        return Some("ʃ");
    }
    if ctx.is_last() {
        return Some("ks");
    }
    if !(ctx.prev_is_vowel() && ctx.next_is_vowel()) {
        return None;
    }
    if ctx.idx == 2 && (word.starts_with("hexa") || word.starts_with("hexá")) {
        return Some("gz");
    }
    if ctx.idx == 3 && (word.starts_with("próxim") || word.starts_with("proxim")) {
        return Some("s");
    }
    if (ctx.idx == 1 && word.starts_with("ex")) || (ctx.idx == 3 && word.starts_with("inex")) {
        return Some("z");
    }
    match ctx.chars[ctx.idx - 1] {
        // esdrúxulo
        'ú' => None,
        prev if prev == 'e' || ACUTE_VOWELS.contains(prev) => Some("ks"),
        _ => None,
    }
}
