//! Strategy segmenters
//!
//! Segmenters are pure functions from text to an ordered list of byte ranges.
//! The ranges always tile the input: they start at 0, end at `text.len()`,
//! and each range starts where the previous one ended. Everything else about
//! a token (ids, digits, class) is derived later from these ranges.

mod basic;
mod subword;

use crate::domain::strategy::Strategy;
use std::ops::Range;

pub use subword::{
    bpe_pieces, fixed_pieces, frequency_pieces, is_vowel, syllable_pieces, Pieces, MAX_WINDOW,
};

/// Default width for fixed subword pieces, in code points
pub const DEFAULT_SUBWORD_WIDTH: usize = 3;

/// Strategy parameters shared by all segmenters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentOptions {
    /// Width of fixed subword pieces, and of the fallback cuts used by the
    /// frequency strategy
    pub subword_width: usize,

    /// Upper bound on BPE merge iterations per window
    /// (None = half the window length)
    pub bpe_merges: Option<usize>,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            subword_width: DEFAULT_SUBWORD_WIDTH,
            bpe_merges: None,
        }
    }
}

impl SegmentOptions {
    /// Sets the fixed subword width
    pub fn with_subword_width(mut self, width: usize) -> Self {
        self.subword_width = width;
        self
    }

    /// Sets the BPE merge limit
    pub fn with_bpe_merges(mut self, merges: usize) -> Self {
        self.bpe_merges = Some(merges);
        self
    }

    pub(crate) fn width(&self) -> usize {
        self.subword_width.max(1)
    }
}

/// Splits decoded text into byte ranges according to `strategy`
pub fn split_text(text: &str, strategy: Strategy, options: &SegmentOptions) -> Vec<Range<usize>> {
    if text.is_empty() {
        return Vec::new();
    }

    match strategy {
        Strategy::Space => basic::space(text),
        Strategy::Word => basic::word(text),
        Strategy::Char => basic::chars(text),
        Strategy::Grammar => basic::grammar(text),
        Strategy::SubwordFixed
        | Strategy::SubwordBpe
        | Strategy::SubwordSyllable
        | Strategy::SubwordFrequency => subword::split(text, strategy, options),
        Strategy::Byte => split_bytes(text.as_bytes()),
    }
}

/// Splits raw bytes into single-byte ranges
pub fn split_bytes(bytes: &[u8]) -> Vec<Range<usize>> {
    (0..bytes.len()).map(|i| i..i + 1).collect()
}

/// Maximal runs of characters that share the same key
pub(crate) fn runs_by<K, F>(text: &str, key: F) -> Vec<Range<usize>>
where
    K: PartialEq,
    F: Fn(char) -> K,
{
    let mut runs = Vec::new();
    let mut current: Option<(usize, K)> = None;

    for (idx, ch) in text.char_indices() {
        let k = key(ch);
        if matches!(&current, Some((_, run_key)) if *run_key == k) {
            continue;
        }
        if let Some((start, _)) = current.take() {
            runs.push(start..idx);
        }
        current = Some((idx, k));
    }

    if let Some((start, _)) = current {
        runs.push(start..text.len());
    }

    runs
}
