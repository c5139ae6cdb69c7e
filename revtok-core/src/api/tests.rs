//! Tests for the public API

#[cfg(test)]
mod api_tests {
    use crate::api::*;
    use crate::application::TokenizerConfig;
    use crate::domain::{Script, Strategy};
    use crate::Error;

    #[test]
    fn test_segment_by_name() {
        let config = TokenizerConfig::default();
        let stream = segment("Hello world!", "word", &config).unwrap();
        let texts: Vec<_> = stream.iter().map(|t| t.text_lossy().into_owned()).collect();
        assert_eq!(texts, ["Hello", " ", "world", "!"]);
        assert_eq!(reconstruct_text(&stream, Strategy::Word).unwrap(), "Hello world!");
    }

    #[test]
    fn test_unknown_strategy() {
        let err = segment("x", "sentence", &TokenizerConfig::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownStrategy { .. }));
    }

    #[test]
    fn test_processor_with_inputs() {
        let processor = TokenProcessor::for_strategy("char").unwrap();
        assert_eq!(processor.strategy(), Strategy::Char);

        let output = processor.process(Input::from_text("abc")).unwrap();
        assert_eq!(output.stream.len(), 3);
        assert_eq!(output.metadata.stats.bytes_processed, 3);
        assert_eq!(output.metadata.stats.chars_processed, Some(3));
        assert_eq!(output.metadata.execution, "sequential");
        assert_eq!(output.metadata.script, Script::Latin);

        let output = processor
            .process_stream(std::io::Cursor::new(b"xy".to_vec()))
            .unwrap();
        assert_eq!(output.stream.len(), 2);
    }

    #[test]
    fn test_binary_input_with_byte_strategy() {
        let processor = TokenProcessor::new(Strategy::Byte).unwrap();
        let output = processor.process(Input::from_bytes(vec![0xff, 0x00])).unwrap();
        assert_eq!(output.stream.len(), 2);
        assert_eq!(output.metadata.stats.chars_processed, None);
        assert_eq!(output.metadata.script, Script::Unknown);
    }

    #[test]
    fn test_missing_file() {
        let err = Input::from_file("/definitely/not/here.txt")
            .into_bytes()
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_input_into_text_rejects_invalid_utf8() {
        let err = Input::from_bytes(vec![b'a', 0xc3]).into_text().unwrap_err();
        assert!(matches!(err, Error::Encoding { position: 1 }));
    }

    #[test]
    fn test_analyze_compression() {
        let report =
            analyze_compression("la la la land", Strategy::Word, &TokenizerConfig::default())
                .unwrap();
        assert_eq!(report.original_token_count, 7);
        assert_eq!(report.per_algorithm.len(), CompressionAlgorithm::ALL.len());
        assert!(report.per_algorithm.values().all(|s| s.is_reversible));
    }

    #[test]
    fn test_free_validation_functions() {
        assert!(validate_reversibility(b"", Strategy::Byte));
        assert!(validate_determinism("déjà vu".as_bytes(), Strategy::SubwordSyllable));
        assert!(stability_check("again and again", 3).unwrap().stable());
        assert!(validate_all("Short text.", &TokenizerConfig::default())
            .unwrap()
            .all_passed());
    }

    #[test]
    fn test_fingerprint_reexport() {
        let plain = fingerprint("hello", false);
        let embedded = fingerprint("hello", true);
        assert_eq!(plain.weighted_sum, embedded.weighted_sum);
        assert_eq!(embedded.signature_digit, plain.signature_digit % 9 + 1);
    }
}
