//! Window Preparation Integration Tests
//!
//! Tests for fixed-window next-word training examples.

mod common;

use std::io::Write;

use verse_llm::{load_lines, pad_left, VerseError, WindowSet, WordVocab};

#[test]
fn test_pad_left() {
    assert_eq!(pad_left(&[5, 6], 4), vec![0, 0, 5, 6]);
    assert_eq!(pad_left(&[1, 2, 3, 4, 5], 3), vec![3, 4, 5]);
    assert_eq!(pad_left(&[], 3), vec![0, 0, 0]);
    assert_eq!(pad_left(&[7, 8, 9], 3), vec![7, 8, 9]);
}

#[test]
fn test_two_line_corpus_window_4() {
    let vocab = WordVocab::fit(["the cat sat", "the dog ran"]);

    // "the" twice, the rest once each
    assert_eq!(vocab.num_words(), 5);
    for word in ["the", "cat", "sat", "dog", "ran"] {
        assert!(vocab.id_of(word).is_some(), "missing {}", word);
    }

    let line = vocab.encode("the cat sat");
    assert_eq!(line.len(), 3);
    let (the, cat, sat) = (line[0], line[1], line[2]);

    // Prefixes of length 2 and 3 only
    let windows = WindowSet::prepare(&[line.clone()], 4).expect("prepare");
    assert_eq!(windows.len(), 2);

    let (ctx, label) = windows.get(0).expect("first window");
    assert_eq!(ctx, &[0, 0, the]);
    assert_eq!(label, cat);

    let (ctx, label) = windows.get(1).expect("second window");
    assert_eq!(ctx, &[0, the, cat]);
    assert_eq!(label, sat);
}

#[test]
fn test_context_width_is_window_minus_one() {
    let vocab = common::test_vocab();
    let encoded: Vec<Vec<u16>> = common::test_corpus().iter().map(|l| vocab.encode(l)).collect();

    for window_size in [2, 4, 9] {
        let windows = WindowSet::prepare(&encoded, window_size).expect("prepare");
        assert_eq!(windows.context_len(), window_size - 1);
        for idx in 0..windows.len() {
            let (ctx, _) = windows.get(idx).expect("window");
            assert_eq!(ctx.len(), window_size - 1);
        }
    }
}

#[test]
fn test_long_lines_keep_trailing_window() {
    let line: Vec<u16> = (1..=8).collect();
    let windows = WindowSet::prepare(&[line.clone()], 4).expect("prepare");

    // Prefix lengths 2..=8
    assert_eq!(windows.len(), 7);

    // The full-line prefix keeps only the trailing window: context 5,6,7
    let (ctx, label) = windows.get(windows.len() - 1).expect("last window");
    assert_eq!(ctx, &[5, 6, 7]);
    assert_eq!(label, 8);
}

#[test]
fn test_short_lines_are_skipped() {
    let lines = vec![vec![3u16], vec![4, 5, 6]];
    let windows = WindowSet::prepare(&lines, 4).expect("prepare");
    // Only the second line contributes
    assert_eq!(windows.len(), 2);
}

#[test]
fn test_no_usable_lines_is_an_error() {
    let lines = vec![vec![3u16], vec![]];
    match WindowSet::prepare(&lines, 4) {
        Err(VerseError::NoTrainingWindows) => {}
        other => panic!("expected NoTrainingWindows, got {:?}", other.map(|w| w.len())),
    }
}

#[test]
fn test_window_too_small_rejected() {
    let lines = vec![vec![1u16, 2, 3]];
    for window_size in [0, 1] {
        match WindowSet::prepare(&lines, window_size) {
            Err(VerseError::WindowTooSmall(got)) => assert_eq!(got, window_size),
            other => panic!("expected WindowTooSmall, got {:?}", other.map(|w| w.len())),
        }
    }
}

#[test]
fn test_batcher_covers_all_windows() {
    let vocab = common::test_vocab();
    let encoded: Vec<Vec<u16>> = common::test_corpus().iter().map(|l| vocab.encode(l)).collect();
    let windows = WindowSet::prepare(&encoded, 6).expect("prepare");

    let mut seen = 0;
    for (contexts, labels) in windows.batches(4) {
        assert_eq!(contexts.len(), labels.len());
        assert!(contexts.len() <= 4);
        seen += contexts.len();
    }
    assert_eq!(seen, windows.len());
}

#[test]
fn test_load_lines_skips_blanks() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("corpus.txt");
    let mut file = std::fs::File::create(&path).expect("create corpus");
    writeln!(file, "the cat sat").expect("write");
    writeln!(file).expect("write");
    writeln!(file, "   ").expect("write");
    writeln!(file, "the dog ran").expect("write");
    drop(file);

    let lines = load_lines(&path).expect("load corpus");
    assert_eq!(lines, vec!["the cat sat", "the dog ran"]);
}

#[test]
fn test_load_lines_missing_and_empty() {
    let dir = tempfile::tempdir().expect("tempdir");

    match load_lines(&dir.path().join("absent.txt")) {
        Err(VerseError::FileNotFound(_)) => {}
        _ => panic!("missing corpus must be FileNotFound"),
    }

    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "\n  \n").expect("write empty corpus");
    match load_lines(&path) {
        Err(VerseError::CorpusEmpty(_)) => {}
        _ => panic!("blank corpus must be CorpusEmpty"),
    }
}

#[test]
fn test_shuffle_is_deterministic() {
    let lines = vec![(1u16..=10).collect::<Vec<u16>>()];

    let mut a = WindowSet::prepare(&lines, 4).expect("prepare");
    let mut b = WindowSet::prepare(&lines, 4).expect("prepare");
    a.shuffle(7);
    b.shuffle(7);

    for idx in 0..a.len() {
        assert_eq!(a.get(idx), b.get(idx));
    }
}
