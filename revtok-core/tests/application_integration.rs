//! Integration tests for the application layer

use revtok_core::application::{
    compress, compression_report, decompress, validate_all, ChunkManager, CompressionAlgorithm,
};
use revtok_core::{ExecutionMode, Strategy, Tokenizer, TokenizerConfig};

fn large_text() -> String {
    let paragraph = "The quick brown fox jumps over the lazy dog. \
                     Pack my box with five dozen liquor jugs!\n\
                     日本語のテキストも含まれています。Ünïcödé wörds too.\n\n";
    paragraph.repeat(300)
}

#[test]
fn test_adaptive_mode_switches_to_chunks_above_threshold() {
    let config = TokenizerConfig::builder()
        .chunk_size(4 * 1024)
        .parallel_threshold(8 * 1024)
        .max_threads(Some(4))
        .build()
        .unwrap();
    let tokenizer = Tokenizer::with_config(config).unwrap();
    let text = large_text();

    assert_eq!(tokenizer.planned_chunks(100), 1);
    assert!(tokenizer.planned_chunks(text.len()) >= 1);

    for strategy in Strategy::ALL {
        let adaptive = tokenizer.segment(&text, strategy).unwrap();
        let sequential = tokenizer
            .segment_sequential(text.as_bytes(), strategy)
            .unwrap();
        assert_eq!(adaptive, sequential, "{strategy}");
    }
}

#[test]
fn test_thread_counts_do_not_change_output() {
    let text = large_text();
    let baseline = Tokenizer::with_config(TokenizerConfig::small_text())
        .unwrap()
        .segment(&text, Strategy::SubwordBpe)
        .unwrap();

    for threads in [1, 2, 4, 8] {
        let config = TokenizerConfig::builder()
            .max_threads(Some(threads))
            .chunk_size(2048)
            .execution_mode(ExecutionMode::Parallel {
                threads: Some(threads),
            })
            .build()
            .unwrap();
        let stream = Tokenizer::with_config(config)
            .unwrap()
            .segment(&text, Strategy::SubwordBpe)
            .unwrap();
        assert_eq!(stream, baseline, "{threads} threads");
    }
}

#[test]
fn test_chunks_are_safe_for_each_strategy() {
    let text = large_text();
    for strategy in Strategy::ALL {
        let chunks = ChunkManager::new(1000)
            .chunk(text.as_bytes(), strategy)
            .unwrap();
        assert!(chunks.len() > 1, "{strategy} produced a single chunk");
        let total: usize = chunks.iter().map(|c| c.len()).sum();
        assert_eq!(total, text.len());
    }
}

#[test]
fn test_compression_round_trip_on_large_stream() {
    let tokenizer = Tokenizer::new().unwrap();
    let stream = tokenizer.segment(&large_text(), Strategy::Word).unwrap();

    for algorithm in CompressionAlgorithm::ALL {
        let compressed = compress(&stream, algorithm);
        assert!(compressed.compressed_len() <= stream.len());
        assert_eq!(decompress(&compressed).unwrap(), stream, "{algorithm}");
    }

    let report = compression_report(&stream);
    let (_, best) = report.best().unwrap();
    assert!(best.compression_ratio < 1.0);
}

#[test]
fn test_validate_all_on_mixed_text() {
    let tokenizer = Tokenizer::new().unwrap();
    let report = validate_all(&tokenizer, "Mixed: ASCII, Ελληνικά, 中文, emoji 🎉!");
    assert!(report.all_passed(), "{:?}", report.failures());
}

#[test]
fn test_embedding_changes_digits_only() {
    let plain = Tokenizer::new().unwrap();
    let embedded =
        Tokenizer::with_config(TokenizerConfig::builder().embedding(true).build().unwrap())
            .unwrap();

    let a = plain.segment("digits differ", Strategy::Word).unwrap();
    let b = embedded.segment("digits differ", Strategy::Word).unwrap();

    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.content_id, y.content_id);
        assert_eq!(x.text, y.text);
        assert_ne!(x.frontend_digit, y.frontend_digit);
    }
}
