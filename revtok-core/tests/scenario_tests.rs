//! End-to-end checks of the documented behaviour

use revtok_core::api;
use revtok_core::application::{validate_reversibility, validate_unique_ids};
use revtok_core::domain::fingerprint::perturb;
use revtok_core::{fingerprint, Strategy, TokenClass, Tokenizer, TokenizerConfig};

fn texts(stream: &revtok_core::TokenStream) -> Vec<String> {
    stream.iter().map(|t| t.text_lossy().into_owned()).collect()
}

#[test]
fn test_word_split_of_greeting() {
    let tokenizer = Tokenizer::new().unwrap();
    let stream = tokenizer.segment("Hello world!", Strategy::Word).unwrap();

    assert_eq!(texts(&stream), ["Hello", " ", "world", "!"]);
    assert_eq!(
        stream.iter().map(|t| t.class).collect::<Vec<_>>(),
        [
            TokenClass::Word,
            TokenClass::Space,
            TokenClass::Word,
            TokenClass::Punctuation
        ]
    );
    assert_eq!(
        tokenizer.reconstruct(&stream, Strategy::Word).unwrap(),
        b"Hello world!"
    );
}

#[test]
fn test_fixed_subword_split() {
    let config = TokenizerConfig::builder().subword_width(3).build().unwrap();
    let stream = api::segment("aaaa bbbb", "subword_fixed", &config).unwrap();

    assert_eq!(texts(&stream), ["aaa", "a", " ", "bbb", "b"]);
    assert_eq!(
        api::reconstruct_text(&stream, Strategy::SubwordFixed).unwrap(),
        "aaaa bbbb"
    );
}

#[test]
fn test_embedding_perturbs_signature_by_one_step() {
    let plain = fingerprint("Hello world!", false);
    let embedded = fingerprint("Hello world!", true);

    assert_ne!(plain.signature_digit, embedded.signature_digit);
    assert_eq!(embedded.signature_digit, perturb(plain.signature_digit));
    assert_eq!(plain.weighted_sum, embedded.weighted_sum);
    assert_eq!(plain.compat_digit, embedded.compat_digit);
}

#[test]
fn test_empty_byte_input_and_repeated_chars() {
    let tokenizer = Tokenizer::new().unwrap();
    assert!(validate_reversibility(&tokenizer, b"", Strategy::Byte));

    let stream = tokenizer.segment("aaa", Strategy::Char).unwrap();
    assert_eq!(texts(&stream), ["a", "a", "a"]);
    assert!(validate_unique_ids(&stream));
}

#[test]
fn test_strategy_aliases() {
    let config = TokenizerConfig::default();
    for (name, strategy) in [
        ("space", Strategy::Space),
        ("whitespace", Strategy::Space),
        ("subword", Strategy::SubwordFixed),
        ("subword-bpe", Strategy::SubwordBpe),
        ("bpe", Strategy::SubwordBpe),
        ("subword_syllable", Strategy::SubwordSyllable),
        ("frequency", Strategy::SubwordFrequency),
        ("byte", Strategy::Byte),
    ] {
        let stream = api::segment("one two", name, &config).unwrap();
        assert_eq!(stream.strategy(), strategy, "{name}");
    }
}

#[test]
fn test_seed_changes_ids_not_texts() {
    let a = Tokenizer::with_config(TokenizerConfig::builder().seed(1).build().unwrap()).unwrap();
    let b = Tokenizer::with_config(TokenizerConfig::builder().seed(2).build().unwrap()).unwrap();

    let sa = a.segment("same text here", Strategy::Word).unwrap();
    let sb = b.segment("same text here", Strategy::Word).unwrap();

    assert_eq!(texts(&sa), texts(&sb));
    assert!(sa
        .iter()
        .zip(sb.iter())
        .any(|(x, y)| x.content_id != y.content_id));
}

#[test]
fn test_stream_mismatch_on_wrong_strategy() {
    let tokenizer = Tokenizer::new().unwrap();
    let stream = tokenizer.segment("abc", Strategy::Char).unwrap();
    assert!(matches!(
        tokenizer.reconstruct(&stream, Strategy::Byte),
        Err(revtok_core::Error::StreamMismatch { .. })
    ));
}

#[test]
fn test_stream_serializes_to_json() {
    let tokenizer = Tokenizer::new().unwrap();
    let stream = tokenizer.segment("Hi, you.", Strategy::Grammar).unwrap();

    let json = serde_json::to_value(&stream).unwrap();
    let first = &json["tokens"][0];
    for field in [
        "text",
        "start_offset",
        "length",
        "kind",
        "class",
        "content_id",
        "frontend_digit",
        "backend_scaled",
    ] {
        assert!(first.get(field).is_some(), "missing {field}");
    }
    assert_eq!(first["kind"], "grammar");

    let restored: revtok_core::TokenStream = serde_json::from_value(json).unwrap();
    assert_eq!(restored, stream);
    assert_eq!(
        tokenizer.reconstruct(&restored, Strategy::Grammar).unwrap(),
        b"Hi, you."
    );
}

#[test]
fn test_manifest_is_stable_across_runs() {
    let tokenizer = Tokenizer::new().unwrap();
    let first = tokenizer.segment("manifest me", Strategy::Word).unwrap();
    let second = tokenizer.segment("manifest me", Strategy::Word).unwrap();
    assert_eq!(first.manifest(), second.manifest());
    assert_eq!(first.manifest().length, 3);
}
