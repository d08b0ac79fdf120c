//! Analyze command implementation

use super::init_logging;
use crate::dialect_source::{DialectCode, DialectSource};
use anyhow::Result;
use clap::Args;
use serde_json::{json, Value};
use std::path::PathBuf;
use tugaphone_core::{Phonemizer, Sentence};

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Sentence to analyze
    #[arg(short, long, value_name = "TEXT", required = true)]
    pub text: String,

    /// Embedded dialect
    #[arg(short, long, value_enum, ignore_case = true, default_value = "pt-pt")]
    pub dialect: DialectCode,

    /// External dialect configuration file
    #[arg(long, value_name = "FILE")]
    pub dialect_config: Option<PathBuf>,

    /// Granularity of the exported features
    #[arg(long, value_enum, default_value = "sentence")]
    pub level: AnalysisLevel,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Token level whose features are exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AnalysisLevel {
    /// One flat map with nested `word_{i}_` keys
    Sentence,
    /// One map per word
    Word,
    /// One map per grapheme, across all words
    Grapheme,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, false);

        let source = match &self.dialect_config {
            Some(path) => DialectSource::External {
                path: path.clone(),
                dialect_code: None,
            },
            None => DialectSource::BuiltIn(self.dialect),
        };
        let dialect = source.load()?;
        log::info!("Dialect: {}", source.display_name());

        let sentence = Phonemizer::new()?.analyze_with_dialect(&self.text, &dialect);
        let value = export(&sentence, self.level)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }
}

/// Feature export of a sentence at the given level
pub fn export(sentence: &Sentence<'_>, level: AnalysisLevel) -> Result<Value> {
    let value = match level {
        AnalysisLevel::Sentence => json!({
            "text": sentence.surface(),
            "ipa": sentence.ipa(),
            "features": sentence.features(),
        }),
        AnalysisLevel::Word => Value::Array(
            sentence
                .words()
                .iter()
                .map(|word| {
                    json!({
                        "text": word.surface(),
                        "ipa": word.ipa(),
                        "features": word.features(),
                    })
                })
                .collect(),
        ),
        AnalysisLevel::Grapheme => Value::Array(
            sentence
                .words()
                .iter()
                .flat_map(|word| word.graphemes())
                .map(|grapheme| {
                    json!({
                        "text": grapheme.text(),
                        "ipa": grapheme.ipa(),
                        "features": grapheme.features(),
                    })
                })
                .collect(),
        ),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tugaphone_core::get_dialect;

    fn sentence() -> Sentence<'static> {
        Phonemizer::new()
            .unwrap()
            .analyze_with_dialect("chá verde", get_dialect("pt-PT").unwrap())
    }

    #[test]
    fn test_sentence_level() {
        let value = export(&sentence(), AnalysisLevel::Sentence).unwrap();
        assert_eq!(value["text"], "chá verde");
        assert_eq!(value["features"]["n_words"], 2);
        assert_eq!(value["features"]["word_0_graph_0_text"], "ch");
    }

    #[test]
    fn test_word_level() {
        let value = export(&sentence(), AnalysisLevel::Word).unwrap();
        let words = value.as_array().unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[1]["text"], "verde");
    }

    #[test]
    fn test_grapheme_level() {
        let s = sentence();
        let value = export(&s, AnalysisLevel::Grapheme).unwrap();
        let expected: usize = s.words().iter().map(|w| w.graphemes().len()).sum();
        assert_eq!(value.as_array().unwrap().len(), expected);
        assert_eq!(value[0]["text"], "ch");
        assert_eq!(value[0]["ipa"], "ʃ");
    }
}
