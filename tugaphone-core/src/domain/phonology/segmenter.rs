//! Grapheme segmentation
//!
//! Greedy longest match, left to right, inside each normalized syllable:
//! three-character units first, then two-character units, then single
//! characters. Eligibility of a span is decided by the dialect, which sees
//! the whole word around it, so a unit never crosses a syllable boundary but
//! can still depend on what follows it.

use super::syllabifier::{normalize_syllables, syllabify};
use crate::domain::dialect::{Dialect, DialectRules, GraphemeKind, TextWindow};
use log::debug;

/// One grapheme inside a word, in character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphemeSpan {
    pub start: usize,
    pub len: usize,
    pub kind: GraphemeKind,
    pub syllable_idx: usize,
}

impl GraphemeSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Byte offset of every character boundary, the text length included
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

fn longest_match(
    text: &str,
    bounds: &[usize],
    pos: usize,
    end: usize,
    dialect: &Dialect,
) -> (usize, GraphemeKind) {
    for len in [3, 2] {
        if pos + len > end {
            continue;
        }
        let window = TextWindow::new(
            &text[..bounds[pos]],
            &text[bounds[pos]..bounds[pos + len]],
            &text[bounds[pos + len]..],
        );
        if let Some(kind) = dialect.classify_span(&window) {
            return (len, kind);
        }
    }
    (1, GraphemeKind::Letter)
}

/// Segment a canonical word into graphemes, syllable by syllable
///
/// `canonical` is the word after [`Dialect::canonicalize`]; `syllables`
/// must partition it by character count. Characters not covered by the
/// syllables are emitted as letters of the last syllable.
pub fn segment_word(canonical: &str, syllables: &[String], dialect: &Dialect) -> Vec<GraphemeSpan> {
    let bounds = char_boundaries(canonical);
    let n_chars = bounds.len() - 1;
    let mut spans = Vec::with_capacity(n_chars);
    let mut offset = 0;

    for (syllable_idx, syllable) in syllables.iter().enumerate() {
        let end = (offset + syllable.chars().count()).min(n_chars);
        let mut pos = offset;
        while pos < end {
            let (len, kind) = longest_match(canonical, &bounds, pos, end, dialect);
            spans.push(GraphemeSpan {
                start: pos,
                len,
                kind,
                syllable_idx,
            });
            pos += len;
        }
        offset = end;
    }

    let last_syllable = syllables.len().saturating_sub(1);
    for start in offset..n_chars {
        spans.push(GraphemeSpan {
            start,
            len: 1,
            kind: GraphemeKind::Letter,
            syllable_idx: last_syllable,
        });
    }

    debug!(
        "segmented {canonical:?} -> {:?}",
        spans
            .iter()
            .map(|s| &canonical[bounds[s.start]..bounds[s.end()]])
            .collect::<Vec<_>>()
    );
    spans
}

/// Grapheme strings of a whole word, in its lowercased spelling
pub fn segment(word: &str, dialect: &Dialect) -> Vec<String> {
    let lower = word.to_lowercase();
    let syllables = normalize_syllables(&syllabify(&lower));
    let canonical = dialect.canonicalize(&lower);
    let chars: Vec<char> = lower.chars().collect();

    segment_word(&canonical, &syllables, dialect)
        .into_iter()
        .map(|span| chars[span.start..span.end()].iter().collect())
        .collect()
}
