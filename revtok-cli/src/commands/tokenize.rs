//! Tokenize command implementation

use anyhow::{Context, Result};
use clap::Args;
use revtok_core::{Input, TokenProcessor};
use std::path::PathBuf;

use super::{resolve_strategy, LogArgs, TokenizerArgs};
use crate::error::CliError;
use crate::input::InputArgs;
use crate::output::{open_writer, OutputFormat};
use crate::progress::ProgressReporter;

/// Arguments for the tokenize command
#[derive(Debug, Args)]
pub struct TokenizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Segmentation strategy (see `revtok list strategies`)
    #[arg(short, long, value_name = "NAME")]
    pub strategy: Option<String>,

    /// Output format (default from configuration, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Apply the configured preprocessing before segmenting
    #[arg(long)]
    pub preprocess: bool,

    #[command(flatten)]
    pub tokenizer: TokenizerArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

impl TokenizeArgs {
    /// Execute the tokenize command
    pub fn execute(&self) -> Result<()> {
        self.log.init_logging();

        let (file, config) = self.tokenizer.load()?;
        let strategy = resolve_strategy(self.strategy.as_deref(), &file)?;
        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_name(&file.output.default_format).ok_or_else(|| {
                CliError::ConfigError(format!(
                    "Unknown output format: {}",
                    file.output.default_format
                ))
            })?,
        };

        let inputs = self.input.load()?;
        log::info!(
            "Tokenizing {} input(s) with strategy {strategy}",
            inputs.len()
        );

        let processor = TokenProcessor::with_config(strategy, config)?;
        let writer = open_writer(self.output.as_deref())?;
        let mut formatter = format.formatter(writer, file.output.pretty_json);

        let mut progress = ProgressReporter::new(self.log.quiet);
        progress.init(inputs.len() as u64, "inputs");

        for input in &inputs {
            let stream = if self.preprocess {
                let (processed, stream) = processor
                    .tokenizer()
                    .segment_preprocessed(input.text()?, strategy)
                    .with_context(|| format!("Failed to tokenize {}", input.name))?;
                if !processed.is_reversible() {
                    log::warn!(
                        "{}: preprocessing is lossy, reconstruction yields the preprocessed text",
                        input.name
                    );
                }
                stream
            } else {
                let output = processor
                    .process(Input::from_bytes(input.bytes.clone()))
                    .map_err(|e| CliError::ProcessingError(format!("{}: {e}", input.name)))?;
                log::debug!(
                    "{}: {} tokens in {:?} ({})",
                    input.name,
                    output.metadata.stats.token_count,
                    output.metadata.duration,
                    output.metadata.execution
                );
                output.stream
            };

            formatter.format_stream(&input.name, &stream)?;
            progress.completed(&input.name);
        }

        formatter.finish()?;
        progress.finish();
        Ok(())
    }
}
