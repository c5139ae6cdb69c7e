//! Output types for the public API

use crate::domain::{Script, TokenStream};
use std::time::Duration;

/// A token stream plus what it took to produce it
#[derive(Debug, Clone)]
pub struct Output {
    pub stream: TokenStream,
    pub metadata: ProcessingMetadata,
}

/// Metadata about one segmentation call
#[derive(Debug, Clone)]
pub struct ProcessingMetadata {
    /// Total processing duration
    pub duration: Duration,
    /// "sequential" or "parallel (N chunks)"
    pub execution: String,
    /// Dominant script of the input; `Unknown` for binary input
    pub script: Script,
    pub stats: ProcessingStats,
}

/// Size statistics of the input and the stream
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingStats {
    pub bytes_processed: usize,
    /// Character count, when the input is valid UTF-8
    pub chars_processed: Option<usize>,
    pub token_count: usize,
    /// Average token length in bytes
    pub avg_token_length: f32,
}

impl Output {
    pub(crate) fn new(
        stream: TokenStream,
        input: &[u8],
        chunks: usize,
        duration: Duration,
    ) -> Self {
        let text = std::str::from_utf8(input).ok();
        let token_count = stream.len();
        let avg_token_length = if token_count > 0 {
            input.len() as f32 / token_count as f32
        } else {
            0.0
        };

        let execution = if chunks > 1 {
            format!("parallel ({chunks} chunks)")
        } else {
            "sequential".to_string()
        };

        Self {
            stream,
            metadata: ProcessingMetadata {
                duration,
                execution,
                script: text.map_or(Script::Unknown, Script::detect),
                stats: ProcessingStats {
                    bytes_processed: input.len(),
                    chars_processed: text.map(|t| t.chars().count()),
                    token_count,
                    avg_token_length,
                },
            },
        }
    }
}
