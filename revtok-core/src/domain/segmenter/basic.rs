//! Space, word, char and grammar segmentation

use super::runs_by;
use crate::domain::classifier::{is_word_char, CharClass};
use std::ops::Range;

/// Maximal whitespace runs and maximal non-whitespace runs
pub(super) fn space(text: &str) -> Vec<Range<usize>> {
    runs_by(text, char::is_whitespace)
}

/// Maximal word runs; every non-word character is a token of its own
pub(super) fn word(text: &str) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if is_word_char(ch) {
            word_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = word_start.take() {
            pieces.push(start..idx);
        }
        pieces.push(idx..idx + ch.len_utf8());
    }

    if let Some(start) = word_start {
        pieces.push(start..text.len());
    }

    pieces
}

/// One range per code point
pub(super) fn chars(text: &str) -> Vec<Range<usize>> {
    text.char_indices()
        .map(|(idx, ch)| idx..idx + ch.len_utf8())
        .collect()
}

/// Maximal runs of a single character class
pub(super) fn grammar(text: &str) -> Vec<Range<usize>> {
    runs_by(text, CharClass::of)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slices<'a>(text: &'a str, ranges: Vec<Range<usize>>) -> Vec<&'a str> {
        ranges.into_iter().map(|r| &text[r]).collect()
    }

    #[test]
    fn test_space_keeps_whitespace_runs() {
        let text = "  hello   world\t\n";
        assert_eq!(
            slices(text, space(text)),
            vec!["  ", "hello", "   ", "world", "\t\n"]
        );
    }

    #[test]
    fn test_word_emits_each_separator() {
        let text = "Hello, world!!";
        assert_eq!(
            slices(text, word(text)),
            vec!["Hello", ",", " ", "world", "!", "!"]
        );
    }

    #[test]
    fn test_word_multiscript() {
        let text = "Hello 世界";
        assert_eq!(slices(text, word(text)), vec!["Hello", " ", "世界"]);
    }

    #[test]
    fn test_chars_are_code_points() {
        let text = "aé世🎉";
        assert_eq!(slices(text, chars(text)), vec!["a", "é", "世", "🎉"]);
    }

    #[test]
    fn test_grammar_separates_classes() {
        let text = "Wait... what?! ok";
        assert_eq!(
            slices(text, grammar(text)),
            vec!["Wait", "...", " ", "what", "?!", " ", "ok"]
        );
    }
}
