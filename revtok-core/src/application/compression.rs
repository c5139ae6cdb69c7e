//! Token-level compression harness
//!
//! Each technique folds a [`TokenStream`] into a smaller list of
//! [`CompressedUnit`]s. Only token texts are stored: ids and digits are pure
//! functions of the texts, strategy, seed and embedding flag, so
//! [`decompress`] re-derives them and returns a stream equal to the input.
//!
//! Size is measured in units, so a technique that only shortens token
//! representations (dictionary coding) reports a ratio of 1.0.

use crate::application::reconstruct::rebuild_stream;
use crate::domain::{Strategy, TokenStream};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Shortest repeated n-gram the pattern technique considers
const MIN_PATTERN_LEN: usize = 2;
/// Longest repeated n-gram the pattern technique considers
const MAX_PATTERN_LEN: usize = 4;

/// Available compression techniques
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompressionAlgorithm {
    /// Adjacent duplicate folding
    Rle,
    /// Most frequent repeated n-gram replaced by a reference
    Pattern,
    /// Repeated texts replaced by dictionary codes
    Dictionary,
    /// Whichever of the others yields the fewest units
    Adaptive,
}

impl CompressionAlgorithm {
    pub const ALL: [CompressionAlgorithm; 4] = [
        CompressionAlgorithm::Rle,
        CompressionAlgorithm::Pattern,
        CompressionAlgorithm::Dictionary,
        CompressionAlgorithm::Adaptive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CompressionAlgorithm::Rle => "rle",
            CompressionAlgorithm::Pattern => "pattern",
            CompressionAlgorithm::Dictionary => "dictionary",
            CompressionAlgorithm::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CompressionAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rle" => Ok(CompressionAlgorithm::Rle),
            "pattern" => Ok(CompressionAlgorithm::Pattern),
            "dictionary" | "frequency" => Ok(CompressionAlgorithm::Dictionary),
            "adaptive" => Ok(CompressionAlgorithm::Adaptive),
            _ => Err(Error::invalid_config(format!(
                "Unknown compression algorithm: {s}"
            ))),
        }
    }
}

/// One element of a compressed stream
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CompressedUnit {
    /// A token text stored as is
    Literal(Vec<u8>),
    /// `count` consecutive tokens with the same text
    Run { text: Vec<u8>, count: usize },
    /// Index into [`CompressedStream::patterns`]
    Pattern(usize),
    /// Index into [`CompressedStream::dictionary`]
    Code(usize),
}

/// A compressed token stream with everything needed to rebuild it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressedStream {
    /// Technique that produced the units (never `Adaptive`)
    pub algorithm: CompressionAlgorithm,
    pub strategy: Strategy,
    pub seed: u64,
    pub embedding_enabled: bool,
    /// Token count of the stream before compression
    pub original_count: usize,
    /// Token text sequences referenced by [`CompressedUnit::Pattern`]
    pub patterns: Vec<Vec<Vec<u8>>>,
    /// Token texts referenced by [`CompressedUnit::Code`]
    pub dictionary: Vec<Vec<u8>>,
    pub units: Vec<CompressedUnit>,
}

impl CompressedStream {
    fn empty(stream: &TokenStream, algorithm: CompressionAlgorithm) -> Self {
        Self {
            algorithm,
            strategy: stream.strategy(),
            seed: stream.seed(),
            embedding_enabled: stream.embedding_enabled(),
            original_count: stream.len(),
            patterns: Vec::new(),
            dictionary: Vec::new(),
            units: Vec::new(),
        }
    }

    /// Number of units after compression
    pub fn compressed_len(&self) -> usize {
        self.units.len()
    }

    /// Compressed size over original size; 1.0 for an empty stream
    pub fn ratio(&self) -> f64 {
        if self.original_count == 0 {
            1.0
        } else {
            self.units.len() as f64 / self.original_count as f64
        }
    }
}

/// Compresses a stream with one technique
pub fn compress(stream: &TokenStream, algorithm: CompressionAlgorithm) -> CompressedStream {
    match algorithm {
        CompressionAlgorithm::Rle => compress_rle(stream),
        CompressionAlgorithm::Pattern => compress_pattern(stream),
        CompressionAlgorithm::Dictionary => compress_dictionary(stream),
        CompressionAlgorithm::Adaptive => compress_adaptive(stream),
    }
}

fn compress_rle(stream: &TokenStream) -> CompressedStream {
    let mut out = CompressedStream::empty(stream, CompressionAlgorithm::Rle);

    for token in stream {
        if let Some(CompressedUnit::Run { text, count }) = out.units.last_mut() {
            if *text == token.text {
                *count += 1;
                continue;
            }
        }
        out.units.push(CompressedUnit::Run {
            text: token.text.clone(),
            count: 1,
        });
    }

    out
}

/// Replaces occurrences of the most frequent repeated n-gram
///
/// Candidates are 2..=4 token windows at every position. The winner has the
/// most occurrences; ties go to the candidate seen first (earliest start, then
/// shortest). Occurrences are replaced left to right without overlap.
fn compress_pattern(stream: &TokenStream) -> CompressedStream {
    let mut out = CompressedStream::empty(stream, CompressionAlgorithm::Pattern);
    let texts = stream.texts();

    let mut index: HashMap<&[&[u8]], usize> = HashMap::new();
    let mut candidates: Vec<(&[&[u8]], Vec<usize>)> = Vec::new();
    for start in 0..texts.len() {
        for len in MIN_PATTERN_LEN..=MAX_PATTERN_LEN {
            let Some(window) = texts.get(start..start + len) else {
                break;
            };
            match index.get(window) {
                Some(&slot) => candidates[slot].1.push(start),
                None => {
                    index.insert(window, candidates.len());
                    candidates.push((window, vec![start]));
                }
            }
        }
    }

    let mut best: Option<&(&[&[u8]], Vec<usize>)> = None;
    for candidate in candidates.iter().filter(|(_, at)| at.len() > 1) {
        if best.map_or(true, |(_, at)| candidate.1.len() > at.len()) {
            best = Some(candidate);
        }
    }

    let Some((pattern, positions)) = best else {
        out.units = texts
            .iter()
            .map(|text| CompressedUnit::Literal(text.to_vec()))
            .collect();
        return out;
    };

    log::trace!(
        "pattern of {} tokens occurs {} times",
        pattern.len(),
        positions.len()
    );
    out.patterns
        .push(pattern.iter().map(|text| text.to_vec()).collect());

    let mut i = 0;
    while i < texts.len() {
        if positions.binary_search(&i).is_ok() {
            out.units.push(CompressedUnit::Pattern(0));
            i += pattern.len();
        } else {
            out.units.push(CompressedUnit::Literal(texts[i].to_vec()));
            i += 1;
        }
    }

    out
}

/// Codes every text that occurs more than once
///
/// Codes are assigned by descending count, ties by first occurrence.
fn compress_dictionary(stream: &TokenStream) -> CompressedStream {
    let mut out = CompressedStream::empty(stream, CompressionAlgorithm::Dictionary);
    let texts = stream.texts();

    let mut counts: HashMap<&[u8], (usize, usize)> = HashMap::new();
    for (position, &text) in texts.iter().enumerate() {
        counts.entry(text).or_insert((0, position)).0 += 1;
    }

    let mut frequent: Vec<(&[u8], usize, usize)> = counts
        .into_iter()
        .filter(|(_, (count, _))| *count > 1)
        .map(|(text, (count, first))| (text, count, first))
        .collect();
    frequent.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let codes: HashMap<&[u8], usize> = frequent
        .iter()
        .enumerate()
        .map(|(code, (text, _, _))| (*text, code))
        .collect();
    out.dictionary = frequent.iter().map(|(text, _, _)| text.to_vec()).collect();

    out.units = texts
        .iter()
        .map(|text| match codes.get(text) {
            Some(&code) => CompressedUnit::Code(code),
            None => CompressedUnit::Literal(text.to_vec()),
        })
        .collect();

    out
}

fn compress_adaptive(stream: &TokenStream) -> CompressedStream {
    let rle = compress_rle(stream);
    let pattern = compress_pattern(stream);
    let dictionary = compress_dictionary(stream);

    if rle.units.len() <= pattern.units.len() && rle.units.len() <= dictionary.units.len() {
        rle
    } else if pattern.units.len() <= dictionary.units.len() {
        pattern
    } else {
        dictionary
    }
}

/// Expands a compressed stream back into the exact original stream
pub fn decompress(compressed: &CompressedStream) -> Result<TokenStream> {
    let mut texts: Vec<&[u8]> = Vec::with_capacity(compressed.original_count);

    for unit in &compressed.units {
        match unit {
            CompressedUnit::Literal(text) => texts.push(text),
            CompressedUnit::Run { text, count } => {
                texts.extend(std::iter::repeat(text.as_slice()).take(*count))
            }
            CompressedUnit::Pattern(idx) => {
                let pattern = compressed.patterns.get(*idx).ok_or_else(|| {
                    Error::mismatch(format!("pattern reference {idx} is out of range"))
                })?;
                texts.extend(pattern.iter().map(Vec::as_slice));
            }
            CompressedUnit::Code(code) => {
                let text = compressed.dictionary.get(*code).ok_or_else(|| {
                    Error::mismatch(format!("dictionary code {code} is out of range"))
                })?;
                texts.push(text);
            }
        }
    }

    if texts.len() != compressed.original_count {
        return Err(Error::mismatch(format!(
            "expanded to {} tokens but {} were compressed",
            texts.len(),
            compressed.original_count
        )));
    }

    Ok(rebuild_stream(
        &texts,
        compressed.strategy,
        compressed.seed,
        compressed.embedding_enabled,
    ))
}

/// Outcome of one technique on one stream
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressionStats {
    /// Technique actually applied (differs from the key for `adaptive`)
    pub applied: CompressionAlgorithm,
    pub compressed_units: usize,
    pub compression_ratio: f64,
    pub tokens_saved: usize,
    pub percentage_saved: f64,
    /// Whether decompression reproduced the stream exactly
    pub is_reversible: bool,
}

/// Per-technique compression results for one stream
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressionReport {
    pub strategy: Strategy,
    pub original_token_count: usize,
    pub per_algorithm: BTreeMap<CompressionAlgorithm, CompressionStats>,
}

impl CompressionReport {
    /// The technique with the lowest ratio among those that round-trip
    pub fn best(&self) -> Option<(CompressionAlgorithm, &CompressionStats)> {
        self.per_algorithm
            .iter()
            .filter(|(_, stats)| stats.is_reversible)
            .min_by(|a, b| a.1.compression_ratio.total_cmp(&b.1.compression_ratio))
            .map(|(algorithm, stats)| (*algorithm, stats))
    }
}

/// Runs every technique on a stream and measures it
pub fn compression_report(stream: &TokenStream) -> CompressionReport {
    let per_algorithm = CompressionAlgorithm::ALL
        .iter()
        .map(|&algorithm| (algorithm, measure(stream, algorithm)))
        .collect();

    CompressionReport {
        strategy: stream.strategy(),
        original_token_count: stream.len(),
        per_algorithm,
    }
}

fn measure(stream: &TokenStream, algorithm: CompressionAlgorithm) -> CompressionStats {
    let compressed = compress(stream, algorithm);
    let is_reversible = match decompress(&compressed) {
        Ok(restored) => restored == *stream,
        Err(e) => {
            log::debug!("{algorithm} failed to decompress: {e}");
            false
        }
    };
    let compression_ratio = compressed.ratio();

    CompressionStats {
        applied: compressed.algorithm,
        compressed_units: compressed.compressed_len(),
        compression_ratio,
        tokens_saved: stream.len().saturating_sub(compressed.compressed_len()),
        percentage_saved: (1.0 - compression_ratio) * 100.0,
        is_reversible,
    }
}
