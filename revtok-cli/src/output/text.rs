//! Plain text output formatter

use super::{escape_text, OutputFormatter};
use anyhow::Result;
use revtok_core::TokenStream;
use std::io::{self, Write};

/// Plain text formatter - outputs one token per line
///
/// Columns: ordinal, start, length, class, id (hex), frontend digit, backend
/// number, escaped text.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_stream(&mut self, source: &str, stream: &TokenStream) -> Result<()> {
        writeln!(
            self.writer,
            "# {source} ({}, {} tokens, {} bytes)",
            stream.strategy(),
            stream.len(),
            stream.source_length()
        )?;

        for (ordinal, token) in stream.iter().enumerate() {
            writeln!(
                self.writer,
                "{ordinal}\t{}\t{}\t{}\t{:016x}\t{}\t{}\t{}",
                token.start_offset,
                token.length,
                token.class.name(),
                token.content_id,
                token.frontend_digit,
                token.backend_scaled,
                escape_text(token)
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
