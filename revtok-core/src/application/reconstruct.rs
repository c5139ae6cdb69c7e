//! Stream verification and reconstruction

use crate::domain::{Strategy, TokenStream};
use crate::error::{Error, Result};
use std::ops::Range;

/// Checks that a stream tiles its declared source exactly
pub fn verify_stream(stream: &TokenStream, strategy: Strategy) -> Result<()> {
    if stream.strategy() != strategy {
        return Err(Error::mismatch(format!(
            "stream was produced by {} but {} was requested",
            stream.strategy(),
            strategy
        )));
    }

    let mut expected_offset = 0;
    for (ordinal, token) in stream.iter().enumerate() {
        if token.kind != strategy {
            return Err(Error::mismatch(format!(
                "token {ordinal} has kind {} in a {strategy} stream",
                token.kind
            )));
        }
        if token.start_offset != expected_offset {
            return Err(Error::mismatch(format!(
                "token {ordinal} starts at {} but previous token ended at {expected_offset}",
                token.start_offset
            )));
        }
        if token.length != token.text.len() {
            return Err(Error::mismatch(format!(
                "token {ordinal} declares length {} but holds {} bytes",
                token.length,
                token.text.len()
            )));
        }
        if token.length == 0 {
            return Err(Error::mismatch(format!("token {ordinal} is empty")));
        }
        expected_offset += token.length;
    }

    if expected_offset != stream.source_length() {
        return Err(Error::mismatch(format!(
            "tokens cover {expected_offset} bytes but source length is {}",
            stream.source_length()
        )));
    }

    Ok(())
}

/// Reassembles the exact bytes a stream was produced from
pub fn reconstruct(stream: &TokenStream, strategy: Strategy) -> Result<Vec<u8>> {
    verify_stream(stream, strategy)?;

    let mut out = Vec::with_capacity(stream.source_length());
    for token in stream {
        out.extend_from_slice(&token.text);
    }
    Ok(out)
}

/// Reassembles a stream into text
pub fn reconstruct_text(stream: &TokenStream, strategy: Strategy) -> Result<String> {
    let bytes = reconstruct(stream, strategy)?;
    String::from_utf8(bytes).map_err(|e| Error::Encoding {
        position: e.utf8_error().valid_up_to(),
    })
}

/// Rebuilds a full stream from token texts alone
///
/// Ids and digits are pure functions of the source, strategy, seed and
/// embedding flag, so the result equals the stream the texts came from.
pub fn rebuild_stream<T: AsRef<[u8]>>(
    texts: &[T],
    strategy: Strategy,
    seed: u64,
    embedding: bool,
) -> TokenStream {
    let mut source = Vec::new();
    let mut ranges: Vec<Range<usize>> = Vec::with_capacity(texts.len());
    for text in texts {
        let start = source.len();
        source.extend_from_slice(text.as_ref());
        ranges.push(start..source.len());
    }
    TokenStream::build(&source, &ranges, strategy, seed, embedding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Token;

    fn word_stream() -> TokenStream {
        let source = b"Hello world";
        TokenStream::build(source, &[0..5, 5..6, 6..11], Strategy::Word, 1, false)
    }

    #[test]
    fn test_reconstruct_round_trip() {
        let stream = word_stream();
        assert_eq!(reconstruct(&stream, Strategy::Word).unwrap(), b"Hello world");
        assert_eq!(
            reconstruct_text(&stream, Strategy::Word).unwrap(),
            "Hello world"
        );
    }

    #[test]
    fn test_strategy_mismatch() {
        let err = reconstruct(&word_stream(), Strategy::Char).unwrap_err();
        assert!(matches!(err, Error::StreamMismatch { .. }));
    }

    #[test]
    fn test_tampered_offsets_rejected() {
        let mut tokens: Vec<Token> = word_stream().into_tokens();
        tokens[2].start_offset += 1;
        let stream = TokenStream::from_parts(tokens, Strategy::Word, 11, 1, false);
        assert!(matches!(
            reconstruct(&stream, Strategy::Word),
            Err(Error::StreamMismatch { .. })
        ));
    }

    #[test]
    fn test_tampered_source_length_rejected() {
        let tokens = word_stream().into_tokens();
        let stream = TokenStream::from_parts(tokens, Strategy::Word, 12, 1, false);
        assert!(reconstruct(&stream, Strategy::Word).is_err());
    }

    #[test]
    fn test_tampered_text_rejected() {
        let mut tokens = word_stream().into_tokens();
        tokens[0].text.push(b'!');
        let stream = TokenStream::from_parts(tokens, Strategy::Word, 11, 1, false);
        assert!(reconstruct(&stream, Strategy::Word).is_err());
    }

    #[test]
    fn test_rebuild_matches_original() {
        let original = word_stream();
        let texts = original.texts();
        let rebuilt = rebuild_stream(&texts, Strategy::Word, 1, false);
        assert_eq!(rebuilt, original);
    }
}
