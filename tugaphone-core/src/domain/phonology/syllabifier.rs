//! Orthographic syllabification
//!
//! A two-pass scanner. The first pass walks the word character by
//! character and decides after each one whether the current syllable ends,
//! looking at most two characters ahead. The second pass repairs a closed
//! set of systematic mistakes of the first (hiatus inside known stems,
//! stranded consonants, stray glides).
//!
//! Inseparable digraphs are replaced by single placeholder characters before
//! scanning so that they are never split, and restored when a character is
//! appended to the syllable being built. Raw syllables therefore always
//! concatenate back to the input.

use log::{debug, trace};

const ACUTE: &str = "áéíóúèìòù";
const NASAL: &str = "ãõẽĩũ";
const CIRCUMFLEX: &str = "âêôîû";
const SEMIVOWELS: &str = "iuyw";

/// Digraphs that are scanned as one placeholder character
const SPECIAL_TOKENS: [(char, &str); 8] = [
    ('C', "ch"),
    ('L', "lh"),
    ('N', "nh"),
    ('G', "gu"),
    ('Q', "qu"),
    ('S', "sh"),
    ('T', "th"),
    ('F', "ff"),
];

/// Consonant pairs that always straddle a syllable boundary
const SEPARABLE_PAIRS: [&str; 15] = [
    "rr", "ss", "sc", "sç", "xs", "xc", "sl", "rl", "nl", "ct", "ll", "dl", "lr", "sr", "nr",
];

/// Pairs that open a syllable
const ONSET_CLUSTERS: [&str; 20] = [
    "ch", "lh", "nh", "gu", "qu", "sh", "th", "ff", "pr", "br", "tr", "dr", "cr", "gr", "fr",
    "pl", "bl", "cl", "gl", "fl",
];

/// Vowel pairs that never form a diphthong
const ALWAYS_HIATUS: [&str; 13] = [
    "ae", "ea", "eo", "io", "ia", "ie", "ía", "oa", "oe", "ua", "ue", "ui", "uo",
];

/// Known first-pass syllables and their correct split
const SPLIT_REPAIRS: [(&str, &[&str]); 60] = [
    ("boen", &["bo", "en"]),
    ("atle", &["a", "tle"]),
    ("atlo", &["a", "tlo"]),
    ("atlan", &["a", "tlan"]),
    ("catlo", &["ca", "tlo"]),
    ("tatlo", &["ta", "tlo"]),
    ("hitle", &["hi", "tle"]),
    ("atlân", &["a", "tlân"]),
    ("atlé", &["a", "tlé"]),
    ("satlân", &["sa", "tlân"]),
    ("atlas", &["a", "tlas"]),
    ("voyeu", &["voy", "eu"]),
    ("doei", &["do", "ei"]),
    ("lein", &["le", "in"]),
    ("leim", &["le", "im"]),
    ("rein", &["re", "in"]),
    ("reim", &["re", "im"]),
    ("toei", &["to", "ei"]),
    ("noes", &["no", "es"]),
    ("moer", &["mo", "er"]),
    ("soer", &["so", "er"]),
    ("soez", &["so", "ez"]),
    ("oins", &["o", "ins"]),
    ("brein", &["bre", "in"]),
    ("breir", &["bre", "ir"]),
    ("vair", &["va", "ir"]),
    ("bair", &["ba", "ir"]),
    ("sain", &["sa", "in"]),
    ("joei", &["jo", "ei"]),
    ("cair", &["ca", "ir"]),
    ("sair", &["sa", "ir"]),
    ("pain", &["pa", "in"]),
    ("paim", &["pa", "im"]),
    ("seun", &["se", "un"]),
    ("taois", &["ta", "ois"]),
    ("maois", &["ma", "ois"]),
    ("gao", &["ga", "o"]),
    ("maun", &["ma", "un"]),
    ("oim", &["o", "im"]),
    ("dium", &["di", "um"]),
    ("tiun", &["ti", "un"]),
    ("tium", &["ti", "um"]),
    ("tiul", &["ti", "ul"]),
    ("diur", &["di", "ur"]),
    ("miur", &["mi", "ur"]),
    ("maius", &["mai", "us"]),
    ("doin", &["do", "in"]),
    ("doim", &["do", "im"]),
    ("toin", &["to", "in"]),
    ("toim", &["to", "im"]),
    ("coir", &["co", "ir"]),
    ("coin", &["co", "in"]),
    ("coim", &["co", "im"]),
    ("laus", &["la", "us"]),
    ("naum", &["na", "um"]),
    ("nya", &["ny", "a"]),
    ("móa", &["mó", "a"]),
    ("faim", &["fa", "im"]),
    ("feiu", &["fei", "u"]),
    ("frui", &["fru", "i"]),
];

/// Stems after which a final i/u stays in the same syllable
const GLIDE_HOSTS: [&str; 6] = ["tro", "tra", "ro", "re", "ra", "to"];

/// Consonants whose doubling marks a coda + onset boundary
const DOUBLED_CONSONANTS: [char; 4] = ['r', 's', 'f', 'l'];

fn is_vowel(c: char) -> bool {
    "aeiouyw".contains(c)
        || ACUTE.contains(c)
        || NASAL.contains(c)
        || CIRCUMFLEX.contains(c)
        || c == 'à'
}

fn starts_syllable(c: char) -> bool {
    c == 'ç' || c == 'w' || SPECIAL_TOKENS.iter().any(|(token, _)| *token == c)
}

fn restore(c: char) -> &'static str {
    SPECIAL_TOKENS
        .iter()
        .find(|(token, _)| *token == c)
        .map(|(_, digraph)| *digraph)
        .unwrap_or("")
}

fn is_valid_triphthong(a: char, b: char, c: char) -> bool {
    if !(is_vowel(a) && is_vowel(b) && is_vowel(c)) {
        return false;
    }
    if !SEMIVOWELS.contains(a) {
        return false;
    }
    if ACUTE.contains(a) || NASAL.contains(a) || ACUTE.contains(c) || NASAL.contains(c) {
        return false;
    }
    if !NASAL.contains(b) && !SEMIVOWELS.contains(c) {
        return false;
    }
    !(b == 'e' && c == 'i')
}

fn is_valid_diphthong(a: char, b: char) -> bool {
    if !(is_vowel(a) && is_vowel(b)) {
        return false;
    }
    if ACUTE.contains(b) || NASAL.contains(b) || CIRCUMFLEX.contains(b) {
        return false;
    }
    if ACUTE.contains(a) && !(a == 'á' && b == 'u') {
        return false;
    }
    let mut pair = String::with_capacity(4);
    pair.push(a);
    pair.push(b);
    !ALWAYS_HIATUS.contains(&pair.as_str())
}

fn is_hiatus(a: char, b: char, prev: Option<char>) -> bool {
    if !is_valid_diphthong(a, b) || NASAL.contains(a) {
        return false;
    }
    if a == b || b == 'ã' || b == 'õ' {
        return true;
    }
    prev == Some('r') && !(a == 'e' && b == 'i')
}

fn is_onset_cluster(a: Option<char>, b: Option<char>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            let mut pair = String::with_capacity(4);
            pair.push(a);
            pair.push(b);
            ONSET_CLUSTERS.contains(&pair.as_str())
        }
        _ => false,
    }
}

fn is_separable(a: char, b: Option<char>) -> bool {
    b.is_some_and(|b| {
        let mut pair = String::with_capacity(4);
        pair.push(a);
        pair.push(b);
        SEPARABLE_PAIRS.contains(&pair.as_str())
    })
}

/// First pass over one hyphen-free subword in placeholder form
fn scan(chars: &[char]) -> Vec<String> {
    let mut syllables: Vec<String> = Vec::new();
    let mut syl = String::new();
    let len = chars.len();

    for (idx, &ch) in chars.iter().enumerate() {
        let is_last = idx + 1 == len;
        let is_penultimate = idx + 2 == len;
        let prev = idx.checked_sub(1).map(|i| chars[i]);
        let next = chars.get(idx + 1).copied();
        let nnext = if is_last || is_penultimate {
            None
        } else {
            chars.get(idx + 2).copied()
        };

        let next_is_vowel = next.is_some_and(is_vowel);
        let next_is_consonant = !next_is_vowel;
        let next_is_soft = next.map_or(true, |n| n == 'l' || n == 'r');
        let is_first_syllable = syllables.is_empty();
        let syl_has_vowel = syl.chars().any(is_vowel);

        let triphthong = match (prev, next) {
            (Some(p), Some(n)) => is_valid_triphthong(p, ch, n),
            _ => false,
        };
        let diphthong = next.is_some_and(|n| is_valid_diphthong(ch, n));
        let hiatus = next.is_some_and(|n| is_hiatus(ch, n, prev));
        let starts_cluster = is_onset_cluster(next, nnext);

        // "gu"/"qu" before a consonant behave as a nucleus
        let is_vowel_char = is_vowel(ch) || ((ch == 'G' || ch == 'Q') && next_is_consonant);
        let is_consonant = !is_vowel_char;

        let ends_syllable = if next.is_some_and(starts_syllable) || starts_cluster {
            true
        } else if is_consonant && next_is_consonant {
            if is_separable(ch, next) {
                true
            } else if is_first_syllable && !syl_has_vowel {
                false
            } else {
                !next_is_soft
            }
        } else if is_consonant && next_is_vowel {
            false
        } else if hiatus {
            true
        } else if triphthong || diphthong {
            false
        } else if is_vowel_char && next_is_vowel {
            true
        } else if is_penultimate {
            false
        } else {
            // A vowel before two consonants keeps the first one as its coda
            !nnext.is_some_and(|n| !is_vowel(n))
        };

        trace!("syllable scan {ch:?} -> {next:?}: boundary={ends_syllable}");

        match restore(ch) {
            "" => syl.push(ch),
            digraph => syl.push_str(digraph),
        }

        if ends_syllable || is_last {
            syllables.push(std::mem::take(&mut syl));
        }
    }

    syllables
}

fn last_char(s: &str) -> Option<char> {
    s.chars().next_back()
}

fn append_to_last(clean: &mut Vec<String>, tok: &str) {
    match clean.last_mut() {
        Some(last) => last.push_str(tok),
        None => clean.push(tok.to_string()),
    }
}

/// Second pass: repair systematic first-pass mistakes
fn repair(mut raw: Vec<String>) -> Vec<String> {
    let mut clean: Vec<String> = Vec::with_capacity(raw.len());
    let count = raw.len();

    for idx in 0..count {
        let tok = std::mem::take(&mut raw[idx]);
        if tok.is_empty() {
            continue;
        }
        let next_tok = raw.get(idx + 1).cloned().unwrap_or_default();
        let is_final = idx + 1 == count;
        let prev_tok = clean.last().cloned().unwrap_or_default();
        let ends_vowel = last_char(&prev_tok).is_some_and(is_vowel);

        if let Some((_, split)) = SPLIT_REPAIRS.iter().find(|(stem, _)| *stem == tok) {
            clean.extend(split.iter().map(|s| s.to_string()));
        } else if tok == "w" {
            if ends_vowel || is_final {
                append_to_last(&mut clean, &tok);
            } else {
                raw[idx + 1] = format!("{tok}{next_tok}");
            }
        } else if let Some(at) = tok.find("vr").or_else(|| tok.find("vl")).filter(|&at| at > 0) {
            let (head, tail) = tok.split_at(at);
            clean.push(head.to_string());
            clean.push(tail.to_string());
        } else if next_tok.starts_with("nh") && (tok.ends_with("ai") || tok.ends_with("oi")) {
            let (head, tail) = tok.split_at(tok.len() - 1);
            clean.push(head.to_string());
            clean.push(tail.to_string());
        } else if tok.chars().count() == 1 && !tok.chars().all(is_vowel) {
            // Stranded consonant joins a neighbour
            if (idx > 0 && !clean.is_empty()) || is_final {
                append_to_last(&mut clean, &tok);
            } else {
                raw[idx + 1] = format!("{tok}{next_tok}");
            }
        } else if is_final && ends_vowel && matches!(tok.as_str(), "u" | "i" | "ui") {
            append_to_last(&mut clean, &tok);
        } else if idx == 1 && ends_vowel && prev_tok.ends_with('u') && tok == "i" {
            append_to_last(&mut clean, &tok);
        } else if prev_tok == "cu"
            && tok == "i"
            && (next_tok.starts_with('d') || next_tok.starts_with('t'))
        {
            append_to_last(&mut clean, &tok);
        } else if ends_vowel
            && idx > 0
            && GLIDE_HOSTS.contains(&prev_tok.as_str())
            && matches!(tok.as_str(), "i" | "u" | "iu")
        {
            append_to_last(&mut clean, &tok);
        } else {
            clean.push(tok);
        }
    }

    clean.retain(|s| !s.is_empty());
    clean
}

/// Split a word into raw orthographic syllables
///
/// The syllables concatenate to the lowercased input. Hyphens stay attached
/// to the syllable before them.
pub fn syllabify(word: &str) -> Vec<String> {
    let lower = word.to_lowercase();

    if lower.chars().count() == 1 && lower.is_ascii() {
        return vec![lower];
    }
    if matches!(lower.as_str(), "ao" | "ui" | "ei" | "ai") {
        return vec![lower];
    }

    let mut placeholder = lower.clone();
    for (token, digraph) in SPECIAL_TOKENS {
        placeholder = placeholder.replace(digraph, &token.to_string());
    }

    let subwords: Vec<&str> = placeholder.split('-').collect();
    let mut syllables = Vec::new();
    for (i, subword) in subwords.iter().enumerate() {
        let chars: Vec<char> = subword.chars().collect();
        let mut part = repair(scan(&chars));
        if i + 1 < subwords.len() {
            match part.last_mut() {
                Some(last) => last.push('-'),
                None => part.push("-".to_string()),
            }
        }
        syllables.extend(part);
    }

    if syllables.is_empty() {
        syllables.push(lower);
    }

    debug!("syllabified {word:?} -> {syllables:?}");
    syllables
}

/// Move a doubled consonant straddling a boundary into the next onset
///
/// `car·ro` becomes `ca·rro` and `pas·so` becomes `pa·sso`, so that the
/// doubled letter can be read as one grapheme.
pub fn normalize_syllables(syllables: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = syllables.to_vec();

    for i in 0..normalized.len().saturating_sub(1) {
        let Some(last) = last_char(&normalized[i]) else {
            continue;
        };
        if !DOUBLED_CONSONANTS.contains(&last) || normalized[i].chars().count() < 2 {
            continue;
        }
        if normalized[i + 1].starts_with(last) {
            normalized[i].pop();
            normalized[i + 1].insert(0, last);
        }
    }

    normalized
}

/// Syllable index of every character, given syllables that partition a word
pub fn char_to_syllable_map(syllables: &[String]) -> Vec<usize> {
    syllables
        .iter()
        .enumerate()
        .flat_map(|(idx, syl)| std::iter::repeat(idx).take(syl.chars().count()))
        .collect()
}
