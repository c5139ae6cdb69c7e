//! Tokenizer orchestration
//!
//! [`Tokenizer`] ties the pieces together: it decides between sequential and
//! chunked execution, runs the segmenters, and builds the addressed stream.
//! Both execution paths feed the same range list into the same token builder,
//! which is why they agree exactly.

use crate::application::chunking::{ChunkManager, TextChunk};
use crate::application::config::TokenizerConfig;
#[cfg(feature = "parallel")]
use crate::application::parallel::ParallelProcessor;
use crate::application::reconstruct;
use crate::domain::segmenter::{split_bytes, split_text};
use crate::domain::{preprocess, Preprocessed, Strategy, TokenStream};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::ops::Range;

/// Deterministic, reversible tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    #[cfg(feature = "parallel")]
    parallel: ParallelProcessor,
}

impl Tokenizer {
    /// Creates a tokenizer with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(TokenizerConfig::default())
    }

    /// Creates a tokenizer with custom configuration
    pub fn with_config(config: TokenizerConfig) -> Result<Self> {
        config.validate()?;

        #[cfg(feature = "parallel")]
        let parallel = ParallelProcessor::with_config(config.thread_pool_config())?;

        Ok(Self {
            config,
            #[cfg(feature = "parallel")]
            parallel,
        })
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Segments text, choosing the execution path from the configuration
    pub fn segment(&self, text: &str, strategy: Strategy) -> Result<TokenStream> {
        self.segment_bytes(text.as_bytes(), strategy)
    }

    /// Number of chunks the configured execution mode uses for `input_len` bytes
    ///
    /// One means the input is segmented sequentially.
    pub fn planned_chunks(&self, input_len: usize) -> usize {
        self.config.execution_mode.determine_thread_count(
            input_len,
            self.config.parallel_threshold,
            self.config.chunk_size,
        )
    }

    /// Segments raw input; only the byte strategy accepts invalid UTF-8
    pub fn segment_bytes(&self, input: &[u8], strategy: Strategy) -> Result<TokenStream> {
        let threads = self.planned_chunks(input.len());

        if threads <= 1 {
            return self.segment_sequential(input, strategy);
        }

        let chunk_size = self.config.chunk_size.min(input.len().div_ceil(threads));
        self.segment_chunked(input, strategy, &ChunkManager::new(chunk_size))
    }

    /// Segments in a single pass on the calling thread
    pub fn segment_sequential(&self, input: &[u8], strategy: Strategy) -> Result<TokenStream> {
        let ranges = split_input(input, strategy, &self.config)?;
        Ok(TokenStream::build(
            input,
            &ranges,
            strategy,
            self.config.seed,
            self.config.embedding,
        ))
    }

    /// Segments `input` cut into roughly `chunk_count` strategy-safe chunks
    ///
    /// The result equals [`Tokenizer::segment_sequential`] for every chunk count.
    pub fn segment_parallel(
        &self,
        input: &[u8],
        strategy: Strategy,
        chunk_count: usize,
    ) -> Result<TokenStream> {
        if chunk_count == 0 {
            return Err(Error::invalid_config("Chunk count must be greater than 0"));
        }
        let manager = ChunkManager::for_chunk_count(input.len(), chunk_count);
        self.segment_chunked(input, strategy, &manager)
    }

    fn segment_chunked(
        &self,
        input: &[u8],
        strategy: Strategy,
        manager: &ChunkManager,
    ) -> Result<TokenStream> {
        let chunks = manager.chunk(input, strategy)?;
        log::debug!(
            "{} bytes split into {} chunks for {strategy}",
            input.len(),
            chunks.len()
        );

        self.assemble_chunks(input, &chunks, strategy)
    }

    #[cfg(feature = "parallel")]
    fn assemble_chunks(
        &self,
        input: &[u8],
        chunks: &[TextChunk<'_>],
        strategy: Strategy,
    ) -> Result<TokenStream> {
        let ranges = self
            .parallel
            .segment_chunks(chunks, strategy, &self.config.segment)?;
        let tokens = self.parallel.build_tokens(
            input,
            &ranges,
            strategy,
            self.config.seed,
            self.config.embedding,
        );
        Ok(TokenStream::from_parts(
            tokens,
            strategy,
            input.len(),
            self.config.seed,
            self.config.embedding,
        ))
    }

    #[cfg(not(feature = "parallel"))]
    fn assemble_chunks(
        &self,
        input: &[u8],
        chunks: &[TextChunk<'_>],
        strategy: Strategy,
    ) -> Result<TokenStream> {
        let mut ranges = Vec::new();
        for chunk in chunks {
            let local = split_input(chunk.content, strategy, &self.config)?;
            ranges.extend(
                local
                    .into_iter()
                    .map(|r| r.start + chunk.start_offset..r.end + chunk.start_offset),
            );
        }
        Ok(TokenStream::build(
            input,
            &ranges,
            strategy,
            self.config.seed,
            self.config.embedding,
        ))
    }

    /// Segments text under every strategy
    pub fn segment_all(&self, text: &str) -> Result<BTreeMap<Strategy, TokenStream>> {
        Strategy::ALL
            .iter()
            .map(|&strategy| Ok((strategy, self.segment(text, strategy)?)))
            .collect()
    }

    /// Applies the configured preprocessing, then segments the result
    pub fn segment_preprocessed(
        &self,
        text: &str,
        strategy: Strategy,
    ) -> Result<(Preprocessed, TokenStream)> {
        let processed = preprocess(text, &self.config.preprocess);
        if !processed.is_reversible() {
            log::debug!("preprocessing was lossy: {:?}", processed.lossy);
        }
        let stream = self.segment(&processed.text, strategy)?;
        Ok((processed, stream))
    }

    /// Reassembles the bytes a stream was produced from
    pub fn reconstruct(&self, stream: &TokenStream, strategy: Strategy) -> Result<Vec<u8>> {
        reconstruct::reconstruct(stream, strategy)
    }
}

/// Splits input into byte ranges, decoding first for text strategies
fn split_input(
    input: &[u8],
    strategy: Strategy,
    config: &TokenizerConfig,
) -> Result<Vec<Range<usize>>> {
    if strategy.is_byte_level() {
        return Ok(split_bytes(input));
    }
    let text = std::str::from_utf8(input)?;
    Ok(split_text(text, strategy, &config.segment))
}
