//! Application layer for orchestrating tokenization
//!
//! This module sits between the pure domain logic and the public API. It
//! owns configuration, chunking, the thread pool, stream reconstruction and
//! the compression and validation harness.
//!
//! # Example
//!
//! ```rust
//! use revtok_core::application::Tokenizer;
//! use revtok_core::Strategy;
//!
//! let tokenizer = Tokenizer::new().unwrap();
//! let stream = tokenizer.segment("Hello world!", Strategy::Word).unwrap();
//! let bytes = tokenizer.reconstruct(&stream, Strategy::Word).unwrap();
//! assert_eq!(bytes, b"Hello world!");
//! ```

pub mod chunking;
pub mod compression;
pub mod config;
pub mod execution_mode;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod processor;
pub mod reconstruct;
pub mod validation;

pub use chunking::{ChunkManager, TextChunk};
pub use compression::{
    compress, compression_report, decompress, CompressedStream, CompressedUnit,
    CompressionAlgorithm, CompressionReport, CompressionStats,
};
#[cfg(feature = "parallel")]
pub use config::ThreadPoolConfig;
pub use config::{TokenizerConfig, TokenizerConfigBuilder, DEFAULT_SEED};
pub use execution_mode::ExecutionMode;
pub use processor::Tokenizer;
pub use reconstruct::{rebuild_stream, reconstruct, reconstruct_text, verify_stream};
pub use validation::{
    benchmark, stability_check, validate_all, validate_compression, validate_determinism,
    validate_parallel_consistency, validate_reversibility, validate_unique_ids,
    BenchmarkReport, StabilityReport, StabilityResult, StrategyValidation, TimingStats,
    ValidationReport,
};
