//! Deterministic, reversible text tokenization
//!
//! This crate splits text (or raw bytes) into token streams under a closed set
//! of segmentation strategies. Every stream satisfies a strict round-trip law:
//! concatenating its token texts yields the input byte for byte. Each token
//! carries a content-addressed id that is unique within the stream and
//! reproducible without any persisted table, plus digital-root fingerprint
//! digits derived from that id and its neighbours.
//!
//! # Architecture
//!
//! The crate is layered:
//! - **Domain layer**: character classes, segmenters, addressing, fingerprints
//!   and preprocessing, all pure functions
//! - **Application layer**: configuration, chunking, the thread pool, stream
//!   reconstruction and the compression and validation harness
//! - **API layer**: one-call functions and an input-driven processor
//!
//! Chunked parallel execution produces exactly the stream a sequential pass
//! produces, for any chunk count.
//!
//! # Example
//!
//! ```rust
//! use revtok_core::{Strategy, Tokenizer};
//!
//! let tokenizer = Tokenizer::new().unwrap();
//! let stream = tokenizer.segment("Hello world!", Strategy::Word).unwrap();
//!
//! let texts: Vec<_> = stream.iter().map(|t| t.text_lossy()).collect();
//! assert_eq!(texts, ["Hello", " ", "world", "!"]);
//!
//! let restored = tokenizer.reconstruct(&stream, Strategy::Word).unwrap();
//! assert_eq!(restored, b"Hello world!");
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod error;

pub use api::{Input, Output, TokenProcessor};
pub use application::{
    CompressionAlgorithm, CompressionReport, ExecutionMode, Tokenizer, TokenizerConfig,
    TokenizerConfigBuilder,
};
pub use domain::{
    fingerprint, Script, SegmentOptions, Strategy, TextSummary, Token, TokenClass, TokenStream,
};
pub use error::{Error, Result};
