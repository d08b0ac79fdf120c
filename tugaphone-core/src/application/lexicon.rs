//! Reference pronunciation lexicon
//!
//! The lexicon is a CSV table with seven columns:
//!
//! ```text
//! id,word,pos,source,phonemes,syllables,region
//! ```
//!
//! Only `word`, `pos`, `phonemes`, `syllables` and `region` are read. The
//! first line is a header. Fields may be double-quoted; a row with any
//! other number of fields is malformed. Phonemes use `|` between syllables,
//! stored here with the `·` separator the generator uses; words and regions
//! are case-folded and tags uppercased.
//!
//! A lexicon is an explicit value: load it once and hand it to the
//! [`super::Phonemizer`] that should consult it.

use crate::domain::error::{PhonemizerError, Result};
use crate::domain::ipa::SYLLABLE_SEPARATOR;
use csv_core::ReadFieldResult;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

const COLUMNS: usize = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Entry {
    /// IPA by part-of-speech tag
    phonemes: HashMap<String, String>,
    syllables: Vec<String>,
}

/// Gold pronunciations keyed by region, word and tag
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    regions: HashMap<String, HashMap<String, Entry>>,
}

struct Row {
    word: String,
    pos: String,
    phonemes: String,
    syllables: String,
    region: String,
}

/// Split one CSV record into its unquoted fields
fn parse_csv_row(row: &str) -> Vec<String> {
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 1024];
    let mut field = Vec::new();
    let mut fields = Vec::new();
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        bytes = &bytes[nin..];
        field.extend_from_slice(&output[..nout]);
        let end = match result {
            ReadFieldResult::OutputFull => continue,
            ReadFieldResult::Field { record_end } => record_end,
            ReadFieldResult::InputEmpty | ReadFieldResult::End => true,
        };
        fields.push(String::from_utf8_lossy(&field).trim().to_string());
        field.clear();
        if end {
            break;
        }
    }
    fields
}

fn parse_row(line: &str, line_no: usize) -> Result<Row> {
    let mut columns = parse_csv_row(line);
    if columns.len() != COLUMNS {
        return Err(PhonemizerError::MalformedLexiconRow {
            line: line_no,
            columns: columns.len(),
        });
    }
    let mut take = |idx: usize| std::mem::take(&mut columns[idx]);
    Ok(Row {
        word: take(1),
        pos: take(2),
        phonemes: take(4),
        syllables: take(5),
        region: take(6),
    })
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse CSV content, failing on the first malformed row
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::parse(content, true)
    }

    /// Parse CSV content, skipping malformed rows with a warning
    pub fn from_csv_str_lenient(content: &str) -> Result<Self> {
        Self::parse(content, false)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PhonemizerError::ConfigurationError(format!(
                "Failed to read lexicon '{}': {}",
                path.display(),
                e
            ))
        })?;
        let lexicon = Self::from_csv_str(&content)?;
        debug!(
            "loaded {} lexicon entries from {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    fn parse(content: &str, strict: bool) -> Result<Self> {
        let mut lexicon = Self::new();
        // Line 1 is the header
        for (idx, line) in content.lines().enumerate().skip(1) {
            let line_no = idx + 1;
            if line.trim().is_empty() {
                continue;
            }
            match parse_row(line, line_no) {
                Ok(row) => lexicon.insert_row(&row),
                Err(err) if !strict => warn!("skipping lexicon row: {err}"),
                Err(err) => return Err(err),
            }
        }
        Ok(lexicon)
    }

    fn insert_row(&mut self, row: &Row) {
        let phonemes = row.phonemes.replace('|', &SYLLABLE_SEPARATOR.to_string());
        let syllables = row
            .syllables
            .split(['|', ' '])
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        self.insert(&row.word, &row.pos, &phonemes, &row.region, syllables);
    }

    /// Add or replace one entry
    pub fn insert(
        &mut self,
        word: &str,
        pos: &str,
        phonemes: &str,
        region: &str,
        syllables: Vec<String>,
    ) {
        let entry = self
            .regions
            .entry(region.to_lowercase())
            .or_default()
            .entry(word.to_lowercase())
            .or_default();
        entry
            .phonemes
            .insert(pos.to_uppercase(), phonemes.to_string());
        entry.syllables = syllables;
    }

    /// Gold IPA for a word read with a given tag in a region
    pub fn get_phonemes(&self, word: &str, pos: &str, region: &str) -> Option<&str> {
        self.entry(word, region)?
            .phonemes
            .get(&pos.to_uppercase())
            .map(String::as_str)
    }

    pub fn get_syllables(&self, word: &str, region: &str) -> Option<&[String]> {
        self.entry(word, region).map(|e| e.syllables.as_slice())
    }

    fn entry(&self, word: &str, region: &str) -> Option<&Entry> {
        self.regions
            .get(&region.to_lowercase())?
            .get(&word.to_lowercase())
    }

    pub fn contains(&self, word: &str, region: &str) -> bool {
        self.entry(word, region).is_some()
    }

    /// Sorted words of one region
    pub fn wordlist(&self, region: &str) -> Vec<&str> {
        let mut words: Vec<&str> = self
            .regions
            .get(&region.to_lowercase())
            .map(|words| words.keys().map(String::as_str).collect())
            .unwrap_or_default();
        words.sort_unstable();
        words
    }

    /// Sorted region keys
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        regions.sort_unstable();
        regions
    }

    /// Number of (region, word) entries
    pub fn len(&self) -> usize {
        self.regions.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id,word,pos,source,phonemes,syllables,region
1,Casa,noun,x,ˈka|zɐ,ca|sa,LBX
2,casa,noun,x,ˈka|za,ca sa,rjx
3,para,ADP,x,ˈpɐ|ɾɐ,pa|ra,lbx
4,para,VERB,x,ˈpa|ɾɐ,pa|ra,lbx
";

    #[test]
    fn test_parse_and_lookup() {
        let lexicon = Lexicon::from_csv_str(CSV).unwrap();
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.regions(), vec!["lbx", "rjx"]);
        assert_eq!(lexicon.get_phonemes("casa", "NOUN", "lbx"), Some("ˈka·zɐ"));
        assert_eq!(lexicon.get_phonemes("CASA", "noun", "rjx"), Some("ˈka·za"));
        assert_eq!(lexicon.get_phonemes("para", "ADP", "lbx"), Some("ˈpɐ·ɾɐ"));
        assert_eq!(lexicon.get_phonemes("para", "NOUN", "lbx"), None);
        assert_eq!(lexicon.get_phonemes("casa", "NOUN", "lda"), None);
        assert_eq!(
            lexicon.get_syllables("casa", "rjx"),
            Some(&["ca".to_string(), "sa".to_string()][..])
        );
        assert_eq!(lexicon.wordlist("lbx"), vec!["casa", "para"]);
        assert!(lexicon.wordlist("dli").is_empty());
    }

    #[test]
    fn test_malformed_row() {
        let csv = "header\n1,casa,NOUN,x,ˈka|zɐ,ca|sa,lbx\n2,casa,NOUN\n";
        assert_eq!(
            Lexicon::from_csv_str(csv).unwrap_err(),
            PhonemizerError::MalformedLexiconRow {
                line: 3,
                columns: 3
            }
        );

        let lexicon = Lexicon::from_csv_str_lenient(csv).unwrap();
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn test_extra_columns_rejected() {
        let csv = "id,word,pos,source,phonemes,syllables,region\n\
                   1,casa,NOUN,x,ˈka|zɐ,ca|sa,lbx,EXTRA,MORE\n\
                   2,gato,NOUN,x,ˈga|tu,ga|to,lbx\n";
        assert_eq!(
            Lexicon::from_csv_str(csv).unwrap_err(),
            PhonemizerError::MalformedLexiconRow {
                line: 2,
                columns: 9
            }
        );

        let lexicon = Lexicon::from_csv_str_lenient(csv).unwrap();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.regions(), vec!["lbx"]);
        assert!(!lexicon.contains("casa", "lbx"));
        assert_eq!(lexicon.get_phonemes("gato", "NOUN", "lbx"), Some("ˈga·tu"));
    }

    #[test]
    fn test_quoted_fields() {
        let csv = "id,word,pos,source,phonemes,syllables,region\n\
                   1,\"casa\",NOUN,\"wiki, 2020\",ˈka|zɐ,\"ca|sa\",lbx\n";
        let lexicon = Lexicon::from_csv_str(csv).unwrap();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.get_phonemes("casa", "NOUN", "lbx"), Some("ˈka·zɐ"));
    }

    #[test]
    fn test_header_and_blank_lines_ignored() {
        let lexicon = Lexicon::from_csv_str("id,word,pos,source,phonemes,syllables,region\n\n").unwrap();
        assert!(lexicon.is_empty());
        assert!(Lexicon::from_csv_str("").unwrap().is_empty());
    }

    #[test]
    fn test_insert() {
        let mut lexicon = Lexicon::new();
        lexicon.insert("Sede", "verb", "ˈsɛ·dɨ", "LBX", vec![]);
        assert!(lexicon.contains("sede", "lbx"));
        assert_eq!(lexicon.get_phonemes("sede", "VERB", "lbx"), Some("ˈsɛ·dɨ"));
    }
}
