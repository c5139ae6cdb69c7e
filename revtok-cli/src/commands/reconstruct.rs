//! Reconstruct command implementation

use anyhow::{Context, Result};
use clap::Args;
use revtok_core::{api, Strategy};
use std::io::Write;
use std::path::PathBuf;

use super::LogArgs;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::{open_writer, StreamDocument, StreamDocuments};

/// Arguments for the reconstruct command
#[derive(Debug, Args)]
pub struct ReconstructArgs {
    /// JSON produced by `revtok tokenize -f json` (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Reconstruct only the document at this position
    #[arg(long, value_name = "N")]
    pub index: Option<usize>,

    /// Strategy to verify against instead of the one recorded in each stream
    #[arg(short, long, value_name = "NAME")]
    pub strategy: Option<String>,

    #[command(flatten)]
    pub log: LogArgs,
}

impl ReconstructArgs {
    /// Execute the reconstruct command
    pub fn execute(&self) -> Result<()> {
        self.log.init_logging();

        let raw = match &self.input {
            Some(path) => FileReader::read_bytes(path)?,
            None => FileReader::read_stdin()?,
        };
        let documents: StreamDocuments =
            serde_json::from_slice(&raw).context("Input is not a revtok token stream document")?;
        let mut documents = documents.into_vec();

        if let Some(index) = self.index {
            if index >= documents.len() {
                return Err(CliError::ProcessingError(format!(
                    "Document index {index} out of range ({} documents)",
                    documents.len()
                ))
                .into());
            }
            documents = vec![documents.swap_remove(index)];
        }

        let override_strategy = self
            .strategy
            .as_deref()
            .map(str::parse::<Strategy>)
            .transpose()?;

        let mut writer = open_writer(self.output.as_deref())?;
        for document in &documents {
            let bytes = restore(document, override_strategy)?;
            log::info!("{}: restored {} bytes", document.source, bytes.len());
            writer.write_all(&bytes)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Verifies a document and returns the bytes its stream covers
fn restore(document: &StreamDocument, strategy: Option<Strategy>) -> Result<Vec<u8>> {
    if document.manifest != document.stream.manifest() {
        return Err(CliError::ProcessingError(format!(
            "{}: manifest does not match its token stream",
            document.source
        ))
        .into());
    }

    let strategy = strategy.unwrap_or_else(|| document.stream.strategy());
    api::reconstruct(&document.stream, strategy)
        .map_err(|e| CliError::ProcessingError(format!("{}: {e}", document.source)).into())
}
