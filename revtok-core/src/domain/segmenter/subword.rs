//! Subword segmentation
//!
//! Each subword strategy only ever cuts inside maximal word runs. Non-word
//! runs pass through as single pieces. Inside a word run a splitter sees the
//! run as a slice of code points and returns piece lengths in code points, so
//! every cut lands on a code-point boundary by construction.
//!
//! Pinned rules for the data-driven splitters:
//!
//! * **BPE** starts from single code points and repeatedly merges the
//!   adjacent pair with the highest count, where a pair is counted at every
//!   adjacent position it occupies. Ties go to the pair whose first
//!   occurrence is leftmost. Occurrences are merged left to right without
//!   overlap. Merging stops when the best pair occurs fewer than twice, or
//!   after `bpe_merges` iterations (default: half the window length).
//! * **Frequency** ranks every substring of 2 to 4 code points that occurs at
//!   least twice by count (descending), length (descending) and first
//!   occurrence (ascending). Substrings are claimed in rank order, scanning
//!   left to right and skipping occurrences that overlap an earlier claim.
//!   Unclaimed gaps are cut at the fixed subword width.
//!
//! Both operate on windows of at most [`MAX_WINDOW`] code points, so very long
//! runs stay bounded in cost.

use super::{runs_by, SegmentOptions};
use crate::domain::classifier::is_word_char;
use crate::domain::strategy::Strategy;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::ops::Range;

/// Largest run slice the data-driven splitters look at in one pass
pub const MAX_WINDOW: usize = 256;

/// Piece lengths in code points
pub type Pieces = SmallVec<[usize; 8]>;

pub(super) fn split(text: &str, strategy: Strategy, options: &SegmentOptions) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();

    for run in runs_by(text, is_word_char) {
        let run_text = &text[run.clone()];
        if !run_text.chars().next().is_some_and(is_word_char) {
            ranges.push(run);
            continue;
        }

        let chars: Vec<char> = run_text.chars().collect();
        let lengths = match strategy {
            Strategy::SubwordBpe => windowed(&chars, |w| bpe_pieces(w, options.bpe_merges)),
            Strategy::SubwordSyllable => syllable_pieces(&chars),
            Strategy::SubwordFrequency => {
                windowed(&chars, |w| frequency_pieces(w, options.width()))
            }
            _ => fixed_pieces(chars.len(), options.width()),
        };

        let mut offset = run.start;
        let mut remaining = chars.iter();
        for len in lengths {
            let bytes: usize = remaining.by_ref().take(len).map(|c| c.len_utf8()).sum();
            ranges.push(offset..offset + bytes);
            offset += bytes;
        }
        debug_assert_eq!(offset, run.end);
    }

    ranges
}

fn windowed<F>(chars: &[char], splitter: F) -> Pieces
where
    F: Fn(&[char]) -> Pieces,
{
    chars.chunks(MAX_WINDOW).flat_map(splitter).collect()
}

/// Cuts `len` code points into pieces of `width`, the last one possibly shorter
pub fn fixed_pieces(len: usize, width: usize) -> Pieces {
    let width = width.max(1);
    (0..len).step_by(width).map(|start| width.min(len - start)).collect()
}

/// Pairwise merging by in-window pair frequency
pub fn bpe_pieces(chars: &[char], max_merges: Option<usize>) -> Pieces {
    // (start, len) in code points
    let mut symbols: Vec<(usize, usize)> = (0..chars.len()).map(|i| (i, 1)).collect();
    let limit = max_merges.unwrap_or(chars.len() / 2);

    for _ in 0..limit {
        let Some((left, right)) = most_frequent_pair(chars, &symbols) else {
            break;
        };
        symbols = merge_pair(chars, &symbols, left, right);
    }

    symbols.into_iter().map(|(_, len)| len).collect()
}

fn symbol(chars: &[char], (start, len): (usize, usize)) -> &[char] {
    &chars[start..start + len]
}

fn most_frequent_pair<'a>(
    chars: &'a [char],
    symbols: &[(usize, usize)],
) -> Option<(&'a [char], &'a [char])> {
    let mut counts: HashMap<(&[char], &[char]), (usize, usize)> = HashMap::new();
    for (pos, pair) in symbols.windows(2).enumerate() {
        let key = (symbol(chars, pair[0]), symbol(chars, pair[1]));
        counts.entry(key).or_insert((0, pos)).0 += 1;
    }

    counts
        .into_iter()
        .filter(|(_, (count, _))| *count >= 2)
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(pair, _)| pair)
}

fn merge_pair(
    chars: &[char],
    symbols: &[(usize, usize)],
    left: &[char],
    right: &[char],
) -> Vec<(usize, usize)> {
    let mut merged = Vec::with_capacity(symbols.len());
    let mut i = 0;
    while i < symbols.len() {
        if i + 1 < symbols.len()
            && symbol(chars, symbols[i]) == left
            && symbol(chars, symbols[i + 1]) == right
        {
            merged.push((symbols[i].0, symbols[i].1 + symbols[i + 1].1));
            i += 2;
        } else {
            merged.push(symbols[i]);
            i += 1;
        }
    }
    merged
}

/// Vowels recognised by the syllable splitter
pub fn is_vowel(ch: char) -> bool {
    matches!(
        ch,
        'a' | 'e' | 'i' | 'o' | 'u'
            | 'A' | 'E' | 'I' | 'O' | 'U'
            | 'à'..='å'
            | 'è'..='ë'
            | 'ì'..='ï'
            | 'ò'..='ö'
            | 'ù'..='ü'
            | 'À'..='Å'
            | 'È'..='Ë'
            | 'Ì'..='Ï'
            | 'Ò'..='Ö'
            | 'Ù'..='Ü'
    )
}

/// Cuts after every vowel; trailing consonants join the last syllable
pub fn syllable_pieces(chars: &[char]) -> Pieces {
    let mut pieces = Pieces::new();
    let mut pending = 0;

    for &ch in chars {
        pending += 1;
        if is_vowel(ch) {
            pieces.push(pending);
            pending = 0;
        }
    }

    if pending > 0 {
        match pieces.last_mut() {
            Some(last) => *last += pending,
            None => pieces.push(pending),
        }
    }

    pieces
}

/// Claims the most repeated substrings first, fixed-width cuts elsewhere
pub fn frequency_pieces(chars: &[char], width: usize) -> Pieces {
    let n = chars.len();

    let mut stats: HashMap<&[char], (usize, usize)> = HashMap::new();
    for len in 2..=4.min(n) {
        for start in 0..=n - len {
            stats.entry(&chars[start..start + len]).or_insert((0, start)).0 += 1;
        }
    }

    let mut ranked: Vec<(&[char], usize, usize)> = stats
        .into_iter()
        .filter(|(_, (count, _))| *count >= 2)
        .map(|(sub, (count, first))| (sub, count, first))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then(b.0.len().cmp(&a.0.len()))
            .then(a.2.cmp(&b.2))
    });

    let mut claimed = vec![false; n];
    let mut segments: Vec<(usize, usize)> = Vec::new();
    for (sub, _, first) in ranked {
        let len = sub.len();
        let mut start = first;
        while start + len <= n {
            if &chars[start..start + len] == sub && !claimed[start..start + len].contains(&true) {
                claimed[start..start + len].fill(true);
                segments.push((start, len));
                start += len;
            } else {
                start += 1;
            }
        }
    }
    segments.sort_unstable();

    let mut pieces = Pieces::new();
    let mut pos = 0;
    for (start, len) in segments {
        if start > pos {
            pieces.extend(fixed_pieces(start - pos, width));
        }
        pieces.push(len);
        pos = start + len;
    }
    if pos < n {
        pieces.extend(fixed_pieces(n - pos, width));
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn apply(s: &str, lengths: &[usize]) -> Vec<String> {
        let cs = chars(s);
        let mut out = Vec::new();
        let mut pos = 0;
        for &len in lengths {
            out.push(cs[pos..pos + len].iter().collect());
            pos += len;
        }
        assert_eq!(pos, cs.len());
        out
    }

    fn split_strs(text: &str, strategy: Strategy) -> Vec<&str> {
        split(text, strategy, &SegmentOptions::default())
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn test_fixed_pieces() {
        assert_eq!(fixed_pieces(4, 3).as_slice(), &[3, 1]);
        assert_eq!(fixed_pieces(6, 3).as_slice(), &[3, 3]);
        assert!(fixed_pieces(0, 3).is_empty());
        assert_eq!(fixed_pieces(2, 0).as_slice(), &[1, 1]);
    }

    #[test]
    fn test_fixed_split_keeps_non_word_runs_whole() {
        assert_eq!(
            split_strs("aaaa bbbb", Strategy::SubwordFixed),
            vec!["aaa", "a", " ", "bbb", "b"]
        );
        assert_eq!(
            split_strs("ab, -- cd", Strategy::SubwordFixed),
            vec!["ab", ", -- ", "cd"]
        );
    }

    #[test]
    fn test_bpe_banana() {
        let pieces = bpe_pieces(&chars("banana"), None);
        assert_eq!(apply("banana", &pieces), vec!["b", "an", "an", "a"]);
    }

    #[test]
    fn test_bpe_tie_goes_to_leftmost_pair() {
        // "ab" and "cd" both occur twice; "ab" appears first
        let pieces = bpe_pieces(&chars("abcdabcd"), Some(1));
        assert_eq!(apply("abcdabcd", &pieces), vec!["ab", "c", "d", "ab", "c", "d"]);
    }

    #[test]
    fn test_bpe_stops_without_repeats() {
        let pieces = bpe_pieces(&chars("abc"), None);
        assert_eq!(pieces.as_slice(), &[1, 1, 1]);
    }

    #[test]
    fn test_bpe_counts_overlapping_positions() {
        let pieces = bpe_pieces(&chars("aaa"), None);
        assert_eq!(apply("aaa", &pieces), vec!["aa", "a"]);
    }

    #[test]
    fn test_syllables() {
        assert_eq!(
            apply("banana", &syllable_pieces(&chars("banana"))),
            vec!["ba", "na", "na"]
        );
        assert_eq!(
            apply("strength", &syllable_pieces(&chars("strength"))),
            vec!["strength"]
        );
        assert_eq!(
            apply("rhythm", &syllable_pieces(&chars("rhythm"))),
            vec!["rhythm"]
        );
        assert_eq!(
            apply("café", &syllable_pieces(&chars("café"))),
            vec!["ca", "fé"]
        );
        assert_eq!(
            apply("tests", &syllable_pieces(&chars("tests"))),
            vec!["tests"]
        );
    }

    #[test]
    fn test_frequency_claims_longest_repeat_first() {
        let pieces = frequency_pieces(&chars("banana"), 3);
        assert_eq!(apply("banana", &pieces), vec!["b", "ana", "na"]);
    }

    #[test]
    fn test_frequency_falls_back_to_fixed_width() {
        let pieces = frequency_pieces(&chars("abcdefg"), 3);
        assert_eq!(pieces.as_slice(), &[3, 3, 1]);
    }

    #[test]
    fn test_long_runs_are_windowed() {
        let run: String = std::iter::repeat("ab").take(300).collect();
        let text = run.as_str();
        let pieces = split_strs(text, Strategy::SubwordBpe);
        assert_eq!(pieces.concat(), text);
        let pieces = split_strs(text, Strategy::SubwordFrequency);
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn test_multibyte_runs_cut_on_code_points() {
        let text = "日本語テキスト";
        for strategy in [
            Strategy::SubwordFixed,
            Strategy::SubwordBpe,
            Strategy::SubwordSyllable,
            Strategy::SubwordFrequency,
        ] {
            let pieces = split_strs(text, strategy);
            assert_eq!(pieces.concat(), text);
        }
        assert_eq!(
            split_strs(text, Strategy::SubwordFixed),
            vec!["日本語", "テキス", "ト"]
        );
    }
}
