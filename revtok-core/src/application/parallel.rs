//! Parallel processing coordination
//!
//! Chunks are segmented concurrently on a dedicated rayon pool. Results are
//! collected in chunk order, so the merged output never depends on which
//! worker finishes first. Any failing chunk fails the whole call.

use crate::application::{chunking::TextChunk, config::ThreadPoolConfig};
use crate::domain::segmenter::{split_bytes, split_text};
use crate::domain::types::{address, make_token};
use crate::domain::{SegmentOptions, Strategy, Token};
use crate::error::{Error, Result};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::Arc;

/// Manages parallel execution of segmentation
#[derive(Debug, Clone)]
pub struct ParallelProcessor {
    /// Thread pool for parallel execution
    thread_pool: Arc<rayon::ThreadPool>,

    /// Minimum chunk count to justify parallel processing
    min_chunks_for_parallel: usize,
}

impl ParallelProcessor {
    /// Creates a new parallel processor with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ThreadPoolConfig::default())
    }

    /// Creates a new parallel processor with custom configuration
    pub fn with_config(config: ThreadPoolConfig) -> Result<Self> {
        let mut pool_builder = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .thread_name(move |i| format!("{}-{i}", config.thread_name_prefix));

        if let Some(stack_size) = config.stack_size {
            pool_builder = pool_builder.stack_size(stack_size);
        }

        let thread_pool = pool_builder.build().map_err(|e| Error::Parallel {
            source: Box::new(e),
        })?;

        Ok(Self {
            thread_pool: Arc::new(thread_pool),
            min_chunks_for_parallel: 2,
        })
    }

    /// Segments chunks concurrently and returns global byte ranges in order
    pub fn segment_chunks(
        &self,
        chunks: &[TextChunk<'_>],
        strategy: Strategy,
        options: &SegmentOptions,
    ) -> Result<Vec<Range<usize>>> {
        if chunks.len() < self.min_chunks_for_parallel {
            // Fall back to sequential processing for small chunk counts
            let per_chunk = chunks
                .iter()
                .map(|chunk| segment_chunk(chunk, strategy, options))
                .collect::<Result<Vec<_>>>()?;
            return Ok(per_chunk.concat());
        }

        log::debug!(
            "segmenting {} chunks on {} threads",
            chunks.len(),
            self.thread_count()
        );

        let per_chunk = self.thread_pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| segment_chunk(chunk, strategy, options))
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(per_chunk.concat())
    }

    /// Assigns ids and builds tokens for already merged ranges
    pub fn build_tokens(
        &self,
        source: &[u8],
        ranges: &[Range<usize>],
        strategy: Strategy,
        seed: u64,
        embedding: bool,
    ) -> Vec<Token> {
        self.thread_pool.install(|| {
            let ids: Vec<u64> = ranges
                .par_iter()
                .enumerate()
                .map(|(ordinal, range)| address(source, range, ordinal, strategy, seed))
                .collect();

            (0..ranges.len())
                .into_par_iter()
                .map(|ordinal| make_token(source, ranges, &ids, ordinal, strategy, embedding))
                .collect()
        })
    }

    /// Returns the number of threads in the pool
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

/// Segments one chunk and re-bases its ranges to global offsets
fn segment_chunk(
    chunk: &TextChunk<'_>,
    strategy: Strategy,
    options: &SegmentOptions,
) -> Result<Vec<Range<usize>>> {
    let local = if strategy.is_byte_level() {
        split_bytes(chunk.content)
    } else {
        let text = std::str::from_utf8(chunk.content).map_err(|e| Error::Encoding {
            position: chunk.start_offset + e.valid_up_to(),
        })?;
        split_text(text, strategy, options)
    };

    log::trace!(
        "chunk {}/{} produced {} pieces",
        chunk.index + 1,
        chunk.total_chunks,
        local.len()
    );

    Ok(local
        .into_iter()
        .map(|r| r.start + chunk.start_offset..r.end + chunk.start_offset)
        .collect())
}
