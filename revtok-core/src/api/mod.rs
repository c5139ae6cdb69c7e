//! Public API for revtok-core
//!
//! This module offers one-call functions over text and streams, an
//! [`Input`]-driven [`TokenProcessor`], and re-exports of the pure operations
//! that need no configuration.

mod functions;
mod input;
mod output;
mod processor;

#[cfg(test)]
mod tests;

pub use crate::application::{
    compress, compression_report, decompress, validate_unique_ids, CompressedStream,
    CompressionAlgorithm, CompressionReport,
};
pub use crate::domain::{fingerprint, fingerprint_run_aware, TextSummary};
pub use functions::{
    analyze_compression, benchmark, reconstruct, reconstruct_text, segment, segment_bytes,
    stability_check, validate_all, validate_determinism, validate_reversibility,
};
pub use input::Input;
pub use output::{Output, ProcessingMetadata, ProcessingStats};
pub use processor::TokenProcessor;
