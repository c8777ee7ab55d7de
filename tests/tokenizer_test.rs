//! Tokenizer Integration Tests
//!
//! Tests for the word vocabulary and text normalizer.

mod common;

use verse_llm::{TextNormalizer, WordVocab, PAD_ID};

#[test]
fn test_ids_positive_pad_reserved() {
    let vocab = common::test_vocab();

    for word in vocab.words() {
        let id = vocab.id_of(word).expect("fitted word has an id");
        assert!(id >= 1, "id 0 is reserved for padding, got it for {}", word);
    }
    assert_eq!(PAD_ID, 0);
    assert!(vocab.decode(PAD_ID).is_none(), "pad id must not decode");
}

#[test]
fn test_encode_decode_roundtrip() {
    let vocab = common::test_vocab();

    for word in ["the", "cat", "sat", "dog", "ran"] {
        let ids = vocab.encode(word);
        assert_eq!(ids.len(), 1, "single known word encodes to one id");
        assert_eq!(vocab.decode(ids[0]), Some(word));
    }
}

#[test]
fn test_frequency_order() {
    // b occurs 3 times, a twice, c once
    let vocab = WordVocab::fit(["b b b", "a a", "c"]);

    assert_eq!(vocab.id_of("b"), Some(1));
    assert_eq!(vocab.id_of("a"), Some(2));
    assert_eq!(vocab.id_of("c"), Some(3));
    assert_eq!(vocab.corpus_count("b"), Some(3));
    assert_eq!(vocab.corpus_count("a"), Some(2));
    assert_eq!(vocab.corpus_count("c"), Some(1));
}

#[test]
fn test_unknown_words_dropped() {
    let vocab = common::test_vocab();

    let ids = vocab.encode("the zebra cat");
    assert_eq!(ids.len(), 2);
    assert_eq!(vocab.decode(ids[0]), Some("the"));
    assert_eq!(vocab.decode(ids[1]), Some("cat"));
}

#[test]
fn test_encode_empty_and_unknown_only() {
    let vocab = common::test_vocab();

    assert!(vocab.encode("").is_empty());
    assert!(vocab.encode("xyzzy plugh").is_empty());
}

#[test]
fn test_decode_out_of_range() {
    let vocab = common::test_vocab();

    assert!(vocab.decode(9999).is_none());
    assert!(vocab.decode(vocab.num_words() as u16 + 1).is_none());
}

#[test]
fn test_vocab_size_includes_pad() {
    let vocab = common::test_vocab();
    assert_eq!(vocab.vocab_size(), vocab.num_words() + 1);
}

#[test]
fn test_normalizer_strips_punctuation() {
    let normalizer = TextNormalizer::new();

    assert_eq!(normalizer.normalize("Hello, World!"), "hello world");
    assert_eq!(
        normalizer.words("roses; (red)   violets: blue"),
        vec!["roses", "red", "violets", "blue"]
    );
}

#[test]
fn test_normalizer_keeps_apostrophes() {
    let normalizer = TextNormalizer::new();

    assert_eq!(normalizer.words("Don't stop"), vec!["don't", "stop"]);
}

#[test]
fn test_vocab_json_roundtrip() {
    let vocab = common::test_vocab();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("vocab.json");

    vocab.save(&path).expect("save vocab");
    let reloaded = WordVocab::from_file(&path).expect("load vocab");

    assert_eq!(reloaded.num_words(), vocab.num_words());
    for word in vocab.words() {
        assert_eq!(reloaded.id_of(word), vocab.id_of(word));
        assert_eq!(reloaded.corpus_count(word), vocab.corpus_count(word));
    }
}
