//! Self-checks over the tokenizer
//!
//! None of these functions return errors. A failure to segment counts as a
//! failed check and is logged (and, where a report has room for it, recorded).

use crate::application::compression::{compress, decompress, CompressionAlgorithm};
use crate::application::processor::Tokenizer;
use crate::domain::{Strategy, TokenStream};
use std::collections::{BTreeMap, HashSet};
use std::time::{Duration, Instant};

/// Chunk counts tried by the parallel consistency check
const PARALLEL_CHUNK_COUNTS: [usize; 4] = [1, 2, 3, 8];

/// Segments then reconstructs, and compares against the input
pub fn validate_reversibility(tokenizer: &Tokenizer, input: &[u8], strategy: Strategy) -> bool {
    let result = tokenizer
        .segment_bytes(input, strategy)
        .and_then(|stream| tokenizer.reconstruct(&stream, strategy));

    match result {
        Ok(bytes) => bytes == input,
        Err(e) => {
            log::debug!("{strategy} round trip failed: {e}");
            false
        }
    }
}

/// True when no two tokens in the stream share an id
pub fn validate_unique_ids(stream: &TokenStream) -> bool {
    let mut seen = HashSet::with_capacity(stream.len());
    stream.iter().all(|token| seen.insert(token.content_id))
}

/// Segments twice and compares the streams, ids and digits included
pub fn validate_determinism(tokenizer: &Tokenizer, input: &[u8], strategy: Strategy) -> bool {
    match (
        tokenizer.segment_bytes(input, strategy),
        tokenizer.segment_bytes(input, strategy),
    ) {
        (Ok(first), Ok(second)) => first == second,
        (Err(e), _) | (_, Err(e)) => {
            log::debug!("{strategy} determinism check failed: {e}");
            false
        }
    }
}

/// Compares chunked execution at several chunk counts with a single pass
pub fn validate_parallel_consistency(
    tokenizer: &Tokenizer,
    input: &[u8],
    strategy: Strategy,
) -> bool {
    let sequential = match tokenizer.segment_sequential(input, strategy) {
        Ok(stream) => stream,
        Err(e) => {
            log::debug!("{strategy} sequential pass failed: {e}");
            return false;
        }
    };

    PARALLEL_CHUNK_COUNTS.iter().all(|&count| {
        match tokenizer.segment_parallel(input, strategy, count) {
            Ok(stream) => stream == sequential,
            Err(e) => {
                log::debug!("{strategy} with {count} chunks failed: {e}");
                false
            }
        }
    })
}

/// True when every compression technique restores the stream exactly
pub fn validate_compression(stream: &TokenStream) -> bool {
    CompressionAlgorithm::ALL.iter().all(|&algorithm| {
        decompress(&compress(stream, algorithm)).is_ok_and(|restored| restored == *stream)
    })
}

// ============================================================================
// Stability
// ============================================================================

/// Outcome of repeated runs of one strategy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilityResult {
    pub stable: bool,
    pub iterations: usize,
    pub token_count: usize,
    pub errors: Vec<String>,
}

/// Stability results for every strategy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StabilityReport {
    pub per_strategy: BTreeMap<Strategy, StabilityResult>,
}

impl StabilityReport {
    /// True when every strategy was stable and error free
    pub fn stable(&self) -> bool {
        self.per_strategy
            .values()
            .all(|result| result.stable && result.errors.is_empty())
    }

    /// All recorded errors, prefixed with their strategy
    pub fn errors(&self) -> Vec<String> {
        self.per_strategy
            .iter()
            .flat_map(|(strategy, result)| {
                result
                    .errors
                    .iter()
                    .map(move |error| format!("{strategy}: {error}"))
            })
            .collect()
    }
}

/// Segments `text` `iterations` times per strategy and compares every run
/// with the first
pub fn stability_check(tokenizer: &Tokenizer, text: &str, iterations: usize) -> StabilityReport {
    let per_strategy = Strategy::ALL
        .iter()
        .map(|&strategy| (strategy, check_strategy(tokenizer, text, strategy, iterations)))
        .collect();

    StabilityReport { per_strategy }
}

fn check_strategy(
    tokenizer: &Tokenizer,
    text: &str,
    strategy: Strategy,
    iterations: usize,
) -> StabilityResult {
    let mut baseline: Option<TokenStream> = None;
    let mut stable = true;
    let mut errors = Vec::new();

    for i in 0..iterations {
        match tokenizer.segment(text, strategy) {
            Ok(stream) => {
                if let Some(first) = &baseline {
                    if *first != stream {
                        errors.push(format!("iteration {i}: stream differs from the first run"));
                        stable = false;
                        break;
                    }
                } else {
                    baseline = Some(stream);
                }
            }
            Err(e) => errors.push(format!("iteration {i}: {e}")),
        }
    }

    if !stable {
        log::warn!("{strategy} is unstable on a {} byte input", text.len());
    }

    StabilityResult {
        stable,
        iterations,
        token_count: baseline.as_ref().map_or(0, TokenStream::len),
        errors,
    }
}

// ============================================================================
// Benchmark
// ============================================================================

/// Timing of one strategy over repeated runs
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingStats {
    pub avg_time: Duration,
    pub min_time: Duration,
    pub max_time: Duration,
    /// Fraction of runs that segmented and reconstructed exactly
    pub success_rate: f64,
    pub iterations: usize,
}

/// Timings for every strategy
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BenchmarkReport {
    pub text_length: usize,
    pub per_strategy: BTreeMap<Strategy, TimingStats>,
}

/// Times a segment and reconstruct round trip per strategy
///
/// Failed runs are excluded from the timings and lower the success rate.
pub fn benchmark(tokenizer: &Tokenizer, text: &str, iterations: usize) -> BenchmarkReport {
    let per_strategy = Strategy::ALL
        .iter()
        .map(|&strategy| (strategy, time_strategy(tokenizer, text, strategy, iterations)))
        .collect();

    BenchmarkReport {
        text_length: text.len(),
        per_strategy,
    }
}

fn time_strategy(
    tokenizer: &Tokenizer,
    text: &str,
    strategy: Strategy,
    iterations: usize,
) -> TimingStats {
    let mut times = Vec::with_capacity(iterations);

    for _ in 0..iterations {
        let start = Instant::now();
        let ok = tokenizer
            .segment(text, strategy)
            .and_then(|stream| tokenizer.reconstruct(&stream, strategy))
            .is_ok_and(|bytes| bytes == text.as_bytes());
        if ok {
            times.push(start.elapsed());
        }
    }

    let total: Duration = times.iter().sum();
    let avg_time = u32::try_from(times.len())
        .ok()
        .filter(|&n| n > 0)
        .map_or(Duration::ZERO, |n| total / n);

    TimingStats {
        avg_time,
        min_time: times.iter().min().copied().unwrap_or_default(),
        max_time: times.iter().max().copied().unwrap_or_default(),
        success_rate: if iterations == 0 {
            0.0
        } else {
            times.len() as f64 / iterations as f64
        },
        iterations,
    }
}

// ============================================================================
// Combined validation
// ============================================================================

/// Every check for one strategy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyValidation {
    pub reversible: bool,
    pub unique_ids: bool,
    pub deterministic: bool,
    pub parallel_consistent: bool,
    pub compression_reversible: bool,
    pub token_count: usize,
    pub errors: Vec<String>,
}

impl StrategyValidation {
    pub fn passed(&self) -> bool {
        self.reversible
            && self.unique_ids
            && self.deterministic
            && self.parallel_consistent
            && self.compression_reversible
            && self.errors.is_empty()
    }
}

/// Validation results for every strategy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationReport {
    pub text_length: usize,
    pub per_strategy: BTreeMap<Strategy, StrategyValidation>,
}

impl ValidationReport {
    pub fn all_passed(&self) -> bool {
        self.per_strategy.values().all(StrategyValidation::passed)
    }

    /// Strategies with at least one failed check
    pub fn failures(&self) -> Vec<Strategy> {
        self.per_strategy
            .iter()
            .filter(|(_, result)| !result.passed())
            .map(|(strategy, _)| *strategy)
            .collect()
    }
}

/// Runs every check for every strategy
pub fn validate_all(tokenizer: &Tokenizer, text: &str) -> ValidationReport {
    let input = text.as_bytes();
    let per_strategy = Strategy::ALL
        .iter()
        .map(|&strategy| {
            let mut result = StrategyValidation {
                reversible: validate_reversibility(tokenizer, input, strategy),
                unique_ids: false,
                deterministic: validate_determinism(tokenizer, input, strategy),
                parallel_consistent: validate_parallel_consistency(tokenizer, input, strategy),
                compression_reversible: false,
                token_count: 0,
                errors: Vec::new(),
            };

            match tokenizer.segment(text, strategy) {
                Ok(stream) => {
                    result.unique_ids = validate_unique_ids(&stream);
                    result.compression_reversible = validate_compression(&stream);
                    result.token_count = stream.len();
                }
                Err(e) => result.errors.push(e.to_string()),
            }

            if !result.passed() {
                log::warn!("{strategy} failed validation: {result:?}");
            }
            (strategy, result)
        })
        .collect();

    ValidationReport {
        text_length: text.len(),
        per_strategy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TokenStream;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new().unwrap()
    }

    #[test]
    fn test_reversibility_for_all_strategies() {
        let tk = tokenizer();
        for strategy in Strategy::ALL {
            assert!(validate_reversibility(&tk, "Héllo, wörld! 123".as_bytes(), strategy));
        }
    }

    #[test]
    fn test_empty_byte_input_is_reversible() {
        assert!(validate_reversibility(&tokenizer(), b"", Strategy::Byte));
    }

    #[test]
    fn test_invalid_utf8_fails_text_strategies_only() {
        let tk = tokenizer();
        let input = [0xffu8, b'a'];
        assert!(!validate_reversibility(&tk, &input, Strategy::Word));
        assert!(validate_reversibility(&tk, &input, Strategy::Byte));
    }

    #[test]
    fn test_unique_ids_for_repeated_chars() {
        let stream = tokenizer().segment("aaa", Strategy::Char).unwrap();
        assert_eq!(stream.len(), 3);
        assert!(validate_unique_ids(&stream));
    }

    #[test]
    fn test_duplicate_ids_detected() {
        let stream = tokenizer().segment("ab", Strategy::Char).unwrap();
        let mut tokens = stream.tokens().to_vec();
        tokens[1].content_id = tokens[0].content_id;
        let tampered = TokenStream::from_parts(tokens, Strategy::Char, 2, stream.seed(), false);
        assert!(!validate_unique_ids(&tampered));
    }

    #[test]
    fn test_determinism_and_parallel_consistency() {
        let tk = tokenizer();
        let text = "It was the best of times, it was the worst of times.";
        for strategy in Strategy::ALL {
            assert!(validate_determinism(&tk, text.as_bytes(), strategy));
            assert!(validate_parallel_consistency(&tk, text.as_bytes(), strategy));
        }
    }

    #[test]
    fn test_stability_check() {
        let report = stability_check(&tokenizer(), "stable input, stable output", 5);
        assert!(report.stable());
        assert!(report.errors().is_empty());
        assert_eq!(report.per_strategy.len(), Strategy::ALL.len());
        assert!(report.per_strategy.values().all(|r| r.iterations == 5));
    }

    #[test]
    fn test_stability_on_empty_text() {
        let report = stability_check(&tokenizer(), "", 3);
        assert!(report.stable());
        assert!(report.per_strategy.values().all(|r| r.token_count == 0));
    }

    #[test]
    fn test_benchmark_reports_every_strategy() {
        let report = benchmark(&tokenizer(), "a short benchmark text", 3);
        assert_eq!(report.per_strategy.len(), Strategy::ALL.len());
        for stats in report.per_strategy.values() {
            assert_eq!(stats.success_rate, 1.0);
            assert!(stats.min_time <= stats.avg_time);
            assert!(stats.avg_time <= stats.max_time);
        }
    }

    #[test]
    fn test_benchmark_zero_iterations() {
        let report = benchmark(&tokenizer(), "x", 0);
        for stats in report.per_strategy.values() {
            assert_eq!(stats.success_rate, 0.0);
            assert_eq!(stats.avg_time, Duration::ZERO);
        }
    }

    #[test]
    fn test_validate_all() {
        let report = validate_all(&tokenizer(), "The rain in Spain stays mainly in the plain.");
        assert!(report.all_passed(), "{:?}", report.failures());
        assert_eq!(report.per_strategy.len(), Strategy::ALL.len());
    }
}
