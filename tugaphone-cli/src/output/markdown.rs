//! Markdown output formatter

use super::{OutputFormatter, PhonemizedLine};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs a text/IPA table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    line_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line_count: 0,
        }
    }
}

/// Pipes would end the table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_line(&mut self, line: &PhonemizedLine) -> Result<()> {
        if self.line_count == 0 {
            writeln!(self.writer, "| # | Text | IPA |")?;
            writeln!(self.writer, "|---|------|-----|")?;
        }
        self.line_count += 1;
        writeln!(
            self.writer,
            "| {} | {} | /{}/ |",
            self.line_count,
            escape_cell(&line.text),
            escape_cell(&line.ipa)
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total lines: {}*", self.line_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
