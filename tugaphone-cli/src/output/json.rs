//! JSON output formatter

use super::{OutputFormatter, PhonemizedLine};
use anyhow::Result;
use std::io::Write;

/// JSON formatter - outputs all lines as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    lines: Vec<PhonemizedLine>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines: Vec::new(),
            pretty: true,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_line(&mut self, line: &PhonemizedLine) -> Result<()> {
        self.lines.push(line.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.lines)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.lines)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
