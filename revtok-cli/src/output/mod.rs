//! Output formatting module

use anyhow::{Context, Result};
use revtok_core::TokenStream;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for token stream formatters
pub trait OutputFormatter: Send {
    /// Format and output one stream
    fn format_stream(&mut self, source: &str, stream: &TokenStream) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::{JsonFormatter, StreamDocument, StreamDocuments};
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One token per line, tab separated
    Text,
    /// JSON documents that `revtok reconstruct` accepts
    Json,
    /// Markdown table per stream
    Markdown,
}

impl OutputFormat {
    /// Parses a format name from a configuration file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }

    pub fn formatter(self, writer: Box<dyn Write + Send>, pretty: bool) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}

/// Opens the output file, or stdout when none is given
pub fn open_writer(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Writes any serializable report as JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Token text with control characters escaped, for line-oriented output
pub(crate) fn escape_text(token: &revtok_core::Token) -> String {
    token.text_lossy().escape_debug().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("TEXT"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_name("yaml"), None);
    }

    #[test]
    fn test_write_json_compact() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &vec![1, 2], false).unwrap();
        assert_eq!(buffer, b"[1,2]\n");
    }
}
