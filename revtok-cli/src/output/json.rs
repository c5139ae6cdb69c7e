//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use revtok_core::domain::StreamManifest;
use revtok_core::TokenStream;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs every stream as one array of documents
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    documents: Vec<StreamDocument>,
}

/// One tokenized input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDocument {
    /// Input name (file path, `<text>` or `<stdin>`)
    pub source: String,
    pub manifest: StreamManifest,
    pub stream: TokenStream,
}

/// What `revtok reconstruct` accepts: the formatter's array, or a single
/// document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StreamDocuments {
    Many(Vec<StreamDocument>),
    One(Box<StreamDocument>),
}

impl StreamDocuments {
    pub fn into_vec(self) -> Vec<StreamDocument> {
        match self {
            StreamDocuments::Many(documents) => documents,
            StreamDocuments::One(document) => vec![*document],
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn format_stream(&mut self, source: &str, stream: &TokenStream) -> Result<()> {
        self.documents.push(StreamDocument {
            source: source.to_string(),
            manifest: stream.manifest(),
            stream: stream.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        super::write_json(&mut self.writer, &self.documents, self.pretty)
    }
}
