//! Plain text output formatter

use super::{OutputFormatter, PhonemizedLine};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - outputs one transcription per line
pub struct TextFormatter<W: Write> {
    writer: W,
    include_text: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_text: false,
        }
    }

    /// Prefix every transcription with its source text and a tab
    pub fn with_text(mut self, include_text: bool) -> Self {
        self.include_text = include_text;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_line(&mut self, line: &PhonemizedLine) -> Result<()> {
        if self.include_text {
            writeln!(self.writer, "{}\t{}", line.text, line.ipa)?;
        } else {
            writeln!(self.writer, "{}", line.ipa)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, ipa: &str) -> PhonemizedLine {
        PhonemizedLine {
            source: "<text>".to_string(),
            line: 1,
            text: text.to_string(),
            ipa: ipa.to_string(),
        }
    }

    #[test]
    fn test_text_output() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.format_line(&line("casa", "ˈka·zɐ")).unwrap();
        formatter.format_line(&line("gato", "ˈɡa·tu")).unwrap();
        formatter.finish().unwrap();
        assert_eq!(String::from_utf8(formatter.writer).unwrap(), "ˈka·zɐ\nˈɡa·tu\n");
    }

    #[test]
    fn test_text_output_with_source() {
        let mut formatter = TextFormatter::new(Vec::new()).with_text(true);
        formatter.format_line(&line("casa", "ˈka·zɐ")).unwrap();
        assert_eq!(String::from_utf8(formatter.writer).unwrap(), "casa\tˈka·zɐ\n");
    }
}
