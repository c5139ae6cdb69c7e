//! Token and token stream types
//!
//! Tokens are plain data. All derived fields (ids, digits, class) are pure
//! functions of the stream's source bytes, its strategy, its seed and its
//! embedding flag, which is what lets a stream be rebuilt exactly from its
//! texts alone.

use crate::domain::addressing::{content_hash, ContentAddress};
use crate::domain::classifier::CharClass;
use crate::domain::fingerprint::{backend_number, frontend_digit, BACKEND_SCALE};
use crate::domain::strategy::Strategy;
use std::ops::Range;

// ============================================================================
// Token Types
// ============================================================================

/// Content class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenClass {
    /// Only word characters
    Word,
    /// Only whitespace
    Space,
    /// Only punctuation or symbols
    Punctuation,
    /// A mix of classes
    Mixed,
    /// A raw byte from the byte strategy
    Byte,
}

impl TokenClass {
    /// Classifies a token's text under a strategy
    pub fn classify(strategy: Strategy, text: &[u8]) -> Self {
        if strategy.is_byte_level() {
            return TokenClass::Byte;
        }
        let Ok(s) = std::str::from_utf8(text) else {
            return TokenClass::Byte;
        };

        let mut classes = s.chars().map(CharClass::of);
        let Some(first) = classes.next() else {
            return TokenClass::Mixed;
        };
        if classes.any(|c| c != first) {
            return TokenClass::Mixed;
        }

        match first {
            CharClass::Word => TokenClass::Word,
            CharClass::Space => TokenClass::Space,
            CharClass::Punctuation => TokenClass::Punctuation,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenClass::Word => "word",
            TokenClass::Space => "space",
            TokenClass::Punctuation => "punctuation",
            TokenClass::Mixed => "mixed",
            TokenClass::Byte => "byte",
        }
    }
}

/// A contiguous labeled slice of the input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Exact bytes of the slice
    pub text: Vec<u8>,
    /// Byte offset of the slice in the stream's source
    pub start_offset: usize,
    /// Byte length of the slice
    pub length: usize,
    /// Strategy that produced the token
    pub kind: Strategy,
    /// Content class of the slice
    pub class: TokenClass,
    /// Unique id within the stream
    pub content_id: u64,
    /// Digital root of the id, 1..=9
    pub frontend_digit: u8,
    /// Backend number reduced to five digits
    pub backend_scaled: u64,
}

impl Token {
    /// Byte offset one past the end of the slice
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }

    /// Text as a string slice, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.text).ok()
    }

    /// Text with invalid sequences replaced
    pub fn text_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// Ordinal recovered from the id
    pub fn ordinal(&self) -> u64 {
        ContentAddress::decode(self.content_id).ordinal
    }
}

// ============================================================================
// Stream Types
// ============================================================================

/// Ordered tokens plus the parameters that produced them
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenStream {
    tokens: Vec<Token>,
    strategy: Strategy,
    source_length: usize,
    seed: u64,
    embedding_enabled: bool,
}

/// Compact description of a stream for regression baselines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamManifest {
    pub strategy: Strategy,
    pub length: usize,
    pub checksum: u8,
}

impl TokenStream {
    /// Builds a stream from the byte ranges a segmenter produced over `source`
    ///
    /// Ranges must tile `source`. Ids are assigned by position in `ranges`.
    pub fn build(
        source: &[u8],
        ranges: &[Range<usize>],
        strategy: Strategy,
        seed: u64,
        embedding_enabled: bool,
    ) -> Self {
        let ids: Vec<u64> = ranges
            .iter()
            .enumerate()
            .map(|(ordinal, range)| address(source, range, ordinal, strategy, seed))
            .collect();

        let tokens = (0..ranges.len())
            .map(|ordinal| make_token(source, ranges, &ids, ordinal, strategy, embedding_enabled))
            .collect();

        Self::from_parts(tokens, strategy, source.len(), seed, embedding_enabled)
    }

    /// Assembles a stream from externally supplied parts without checking it
    ///
    /// Streams imported this way should be passed through reconstruction,
    /// which verifies their consistency.
    pub fn from_parts(
        tokens: Vec<Token>,
        strategy: Strategy,
        source_length: usize,
        seed: u64,
        embedding_enabled: bool,
    ) -> Self {
        Self {
            tokens,
            strategy,
            source_length,
            seed,
            embedding_enabled,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn source_length(&self) -> usize {
        self.source_length
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn embedding_enabled(&self) -> bool {
        self.embedding_enabled
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token texts in order
    pub fn texts(&self) -> Vec<&[u8]> {
        self.tokens.iter().map(|t| t.text.as_slice()).collect()
    }

    /// Byte ranges of the tokens in order
    pub fn ranges(&self) -> Vec<Range<usize>> {
        self.tokens
            .iter()
            .map(|t| t.start_offset..t.end_offset())
            .collect()
    }

    /// Sum of front-end digits modulo 10
    pub fn checksum(&self) -> u8 {
        let total: u64 = self.tokens.iter().map(|t| u64::from(t.frontend_digit)).sum();
        (total % 10) as u8
    }

    pub fn manifest(&self) -> StreamManifest {
        StreamManifest {
            strategy: self.strategy,
            length: self.tokens.len(),
            checksum: self.checksum(),
        }
    }
}

/// Id of the token covering `range` at position `ordinal`
pub(crate) fn address(
    source: &[u8],
    range: &Range<usize>,
    ordinal: usize,
    strategy: Strategy,
    seed: u64,
) -> u64 {
    let hash = content_hash(&source[range.clone()], strategy, seed);
    ContentAddress::new(hash, ordinal as u64).encode()
}

/// Token at `ordinal`, given the ids of every token in the stream
pub(crate) fn make_token(
    source: &[u8],
    ranges: &[Range<usize>],
    ids: &[u64],
    ordinal: usize,
    strategy: Strategy,
    embedding_enabled: bool,
) -> Token {
    let range = &ranges[ordinal];
    let text = &source[range.clone()];
    let id = ids[ordinal];
    let prev = ordinal.checked_sub(1).map(|i| ids[i]);
    let next = ids.get(ordinal + 1).copied();
    let backend = backend_number(text, ordinal as u64, id, prev, next, embedding_enabled);

    Token {
        text: text.to_vec(),
        start_offset: range.start,
        length: range.len(),
        kind: strategy,
        class: TokenClass::classify(strategy, text),
        content_id: id,
        frontend_digit: frontend_digit(id, embedding_enabled),
        backend_scaled: backend % BACKEND_SCALE,
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tokens() {
        assert_eq!(TokenClass::classify(Strategy::Word, b"abc"), TokenClass::Word);
        assert_eq!(TokenClass::classify(Strategy::Space, b"  "), TokenClass::Space);
        assert_eq!(
            TokenClass::classify(Strategy::Grammar, b"?!"),
            TokenClass::Punctuation
        );
        assert_eq!(TokenClass::classify(Strategy::Space, b"a,b"), TokenClass::Mixed);
        assert_eq!(TokenClass::classify(Strategy::Byte, b"a"), TokenClass::Byte);
        assert_eq!(TokenClass::classify(Strategy::Word, &[0xff]), TokenClass::Byte);
    }

    #[test]
    fn test_build_assigns_offsets_and_ids() {
        let source = b"aaa";
        let ranges = vec![0..1, 1..2, 2..3];
        let stream = TokenStream::build(source, &ranges, Strategy::Char, 12345, false);

        assert_eq!(stream.len(), 3);
        assert_eq!(stream.source_length(), 3);
        for (ordinal, token) in stream.iter().enumerate() {
            assert_eq!(token.start_offset, ordinal);
            assert_eq!(token.length, 1);
            assert_eq!(token.ordinal(), ordinal as u64);
            assert!((1..=9).contains(&token.frontend_digit));
            assert!(token.backend_scaled < BACKEND_SCALE);
        }
        assert_ne!(stream.tokens()[0].content_id, stream.tokens()[1].content_id);
    }

    #[test]
    fn test_build_is_deterministic() {
        let source = "Hello world".as_bytes();
        let ranges = vec![0..5, 5..6, 6..11];
        let a = TokenStream::build(source, &ranges, Strategy::Word, 1, true);
        let b = TokenStream::build(source, &ranges, Strategy::Word, 1, true);
        assert_eq!(a, b);
        assert_eq!(a.manifest(), b.manifest());
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::build(b"", &[], Strategy::Byte, 0, false);
        assert!(stream.is_empty());
        assert_eq!(stream.checksum(), 0);
    }
}
