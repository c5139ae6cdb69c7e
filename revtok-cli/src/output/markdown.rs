//! Markdown output formatter

use super::{escape_text, OutputFormatter};
use anyhow::Result;
use revtok_core::TokenStream;
use std::io::Write;

/// Markdown formatter - outputs a token table per stream
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    token_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            token_count: 0,
        }
    }
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn format_stream(&mut self, source: &str, stream: &TokenStream) -> Result<()> {
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| # | Token | Class | Id | Digit | Backend |")?;
        writeln!(self.writer, "|---|-------|-------|----|-------|---------|")?;

        for (ordinal, token) in stream.iter().enumerate() {
            writeln!(
                self.writer,
                "| {ordinal} | `{}` | {} | {:016x} | {} | {} |",
                escape_text(token).replace('|', "\\|"),
                token.class.name(),
                token.content_id,
                token.frontend_digit,
                token.backend_scaled
            )?;
        }
        writeln!(self.writer)?;

        self.token_count += stream.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total tokens: {}*", self.token_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
