//! Letters without phonetic realization
//!
//! Digraph members ("h" of "ch", "u" of "qu") are silenced by grapheme
//! classification instead; this predicate only covers letters that are
//! silent on their own.

use crate::domain::dialect::Dialect;

/// Whether `ch` is silent between `before` and `after` in `word`
///
/// All strings are expected lowercased.
pub fn is_silent(ch: char, before: &str, after: &str, word: &str, dialect: &Dialect) -> bool {
    let prev = before.chars().next_back();
    let next = after.chars().next();

    match ch {
        'h' => true,
        'u' => {
            matches!(prev, Some('q' | 'g'))
                && next.is_some_and(|c| dialect.is_front_vowel(c))
                && !dialect.pronounces_u(word)
        }
        'p' => {
            prev == Some('m')
                && matches!(next, Some('c' | 'ç' | 't'))
                && dialect.has_mute_p(word)
        }
        _ => false,
    }
}
