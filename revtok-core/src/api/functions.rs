//! One-call entry points
//!
//! Each function builds a [`Tokenizer`] from the given configuration. Callers
//! making many calls should hold a [`Tokenizer`] instead.

use crate::application::{self, compression_report, CompressionReport, Tokenizer, TokenizerConfig};
use crate::application::{BenchmarkReport, StabilityReport, ValidationReport};
use crate::domain::{Strategy, TokenStream};
use crate::error::Result;

/// Segments text with a strategy given by name
///
/// Fails with [`Error::UnknownStrategy`](crate::Error::UnknownStrategy) for
/// names that do not map to a strategy.
pub fn segment(text: &str, strategy: &str, config: &TokenizerConfig) -> Result<TokenStream> {
    segment_bytes(text.as_bytes(), strategy, config)
}

/// Segments raw bytes with a strategy given by name
pub fn segment_bytes(input: &[u8], strategy: &str, config: &TokenizerConfig) -> Result<TokenStream> {
    let strategy: Strategy = strategy.parse()?;
    Tokenizer::with_config(config.clone())?.segment_bytes(input, strategy)
}

/// Reassembles the bytes a stream was produced from
pub fn reconstruct(stream: &TokenStream, strategy: Strategy) -> Result<Vec<u8>> {
    application::reconstruct(stream, strategy)
}

/// Reassembles a stream into text
pub fn reconstruct_text(stream: &TokenStream, strategy: Strategy) -> Result<String> {
    application::reconstruct_text(stream, strategy)
}

/// Segments text and runs every compression technique on the stream
pub fn analyze_compression(
    text: &str,
    strategy: Strategy,
    config: &TokenizerConfig,
) -> Result<CompressionReport> {
    let stream = Tokenizer::with_config(config.clone())?.segment(text, strategy)?;
    Ok(compression_report(&stream))
}

/// Round-trip check with the default configuration
pub fn validate_reversibility(input: &[u8], strategy: Strategy) -> bool {
    with_default(|tk| application::validate_reversibility(tk, input, strategy))
}

/// Repeat-run check with the default configuration
pub fn validate_determinism(input: &[u8], strategy: Strategy) -> bool {
    with_default(|tk| application::validate_determinism(tk, input, strategy))
}

/// Runs every strategy `iterations` times and compares the runs
pub fn stability_check(text: &str, iterations: usize) -> Result<StabilityReport> {
    Ok(application::stability_check(
        &Tokenizer::new()?,
        text,
        iterations,
    ))
}

/// Times every strategy over `iterations` round trips
pub fn benchmark(text: &str, iterations: usize) -> Result<BenchmarkReport> {
    Ok(application::benchmark(&Tokenizer::new()?, text, iterations))
}

/// Runs every check for every strategy
pub fn validate_all(text: &str, config: &TokenizerConfig) -> Result<ValidationReport> {
    Ok(application::validate_all(
        &Tokenizer::with_config(config.clone())?,
        text,
    ))
}

fn with_default(check: impl FnOnce(&Tokenizer) -> bool) -> bool {
    match Tokenizer::new() {
        Ok(tokenizer) => check(&tokenizer),
        Err(e) => {
            log::warn!("could not build a tokenizer: {e}");
            false
        }
    }
}
