//! Input-driven processor

use std::io::Read;
use std::time::Instant;

use crate::api::{Input, Output};
use crate::application::{Tokenizer, TokenizerConfig};
use crate::domain::Strategy;
use crate::error::Result;

/// Reads an [`Input`] and segments it with a fixed strategy
#[derive(Debug, Clone)]
pub struct TokenProcessor {
    tokenizer: Tokenizer,
    strategy: Strategy,
}

impl TokenProcessor {
    /// Creates a processor with default configuration
    pub fn new(strategy: Strategy) -> Result<Self> {
        Self::with_config(strategy, TokenizerConfig::default())
    }

    /// Creates a processor with custom configuration
    pub fn with_config(strategy: Strategy, config: TokenizerConfig) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::with_config(config)?,
            strategy,
        })
    }

    /// Creates a processor from a strategy name such as `"subword-bpe"`
    pub fn for_strategy(name: &str) -> Result<Self> {
        Self::new(name.parse()?)
    }

    /// Segments the input and reports how it was done
    pub fn process(&self, input: Input) -> Result<Output> {
        let bytes = input.into_bytes()?;
        let start = Instant::now();
        let stream = self.tokenizer.segment_bytes(&bytes, self.strategy)?;
        let duration = start.elapsed();

        log::info!(
            "{} bytes -> {} {} tokens in {duration:?}",
            bytes.len(),
            stream.len(),
            self.strategy
        );

        let chunks = self.tokenizer.planned_chunks(bytes.len());
        Ok(Output::new(stream, &bytes, chunks, duration))
    }

    /// Segments everything a reader yields
    pub fn process_stream<R: Read + Send + Sync + 'static>(&self, reader: R) -> Result<Output> {
        self.process(Input::from_reader(reader))
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn config(&self) -> &TokenizerConfig {
        self.tokenizer.config()
    }
}
