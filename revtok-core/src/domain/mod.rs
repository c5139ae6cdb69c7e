//! Domain layer for reversible tokenization
//!
//! Pure functions and plain data: character classes, segmenters, content
//! addressing, fingerprints and preprocessing. Nothing here allocates threads
//! or reads configuration.

pub mod addressing;
pub mod classifier;
pub mod fingerprint;
pub mod preprocess;
pub mod segmenter;
pub mod strategy;
pub mod types;

pub use addressing::{content_hash, content_id, ContentAddress};
pub use classifier::{CharClass, Script};
pub use fingerprint::{
    compat_digits, digital_root, fingerprint, fingerprint_run_aware, TextSummary,
};
pub use preprocess::{
    preprocess, CollapsedRun, LossyStep, PreprocessOptions, Preprocessed, WhitespaceMode,
};
pub use segmenter::SegmentOptions;
pub use strategy::Strategy;
pub use types::{StreamManifest, Token, TokenClass, TokenStream};
