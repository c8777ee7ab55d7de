//! Training Smoke Test
//!
//! End-to-end: fit vocabulary, prepare windows, train a tiny model, persist
//! the artifact directory, reload it and generate words.

mod common;

use burn::config::Config;

use verse_llm::agent::{PoetryAgent, SamplerConfig, CONFIG_FILE, MODEL_FILE, VOCAB_FILE};
use verse_llm::{Trainer, TrainingConfig, WindowSet, WordVocab, UNKNOWN_WORD};

#[test]
fn test_train_save_reload_generate() {
    let device = common::test_device();

    let lines = common::test_corpus();
    let vocab = WordVocab::fit(&lines);
    let encoded: Vec<Vec<u16>> = lines.iter().map(|l| vocab.encode(l)).collect();
    let mut windows = WindowSet::prepare(&encoded, 6).expect("prepare windows");

    let model_config = common::test_model_config(vocab.vocab_size());
    let train_config = TrainingConfig {
        learning_rate: 1e-2,
        batch_size: 4,
        epochs: 2,
        ..Default::default()
    };

    let mut trainer: Trainer<common::TestAutodiffBackend> =
        Trainer::new(&model_config, train_config, device)
            .expect("trainer construction");

    let history = trainer.fit(&mut windows, None);
    assert_eq!(history.len(), 2);
    for stats in &history {
        assert!(stats.loss.is_finite(), "epoch {} loss diverged", stats.epoch);
    }
    assert!(trainer.step() > 0);

    // Persist the artifact triple
    let dir = tempfile::tempdir().expect("tempdir");
    let model_stem = dir.path().join(MODEL_FILE);
    trainer
        .save_checkpoint(model_stem.to_str().expect("utf-8 path"))
        .expect("save checkpoint");
    model_config
        .save(dir.path().join(CONFIG_FILE))
        .expect("save config");
    vocab.save(&dir.path().join(VOCAB_FILE)).expect("save vocab");

    // Reload on the inference backend and generate
    let mut agent = PoetryAgent::<common::TestBackend>::load(
        dir.path(),
        SamplerConfig::default(),
        common::test_device(),
    )
    .expect("reload agent");

    let first = agent.next_word("");
    assert!(first.error >= 0.0);
    assert!(first.word == UNKNOWN_WORD || agent.vocab().id_of(&first.word).is_some());

    for _ in 0..5 {
        agent.add_word();
    }
    agent.add_line_break();
    assert_eq!(agent.current_poem().len(), 6);

    let saved = agent.save_poem();
    assert!(saved.score >= 0.0);
    assert_eq!(agent.saved_poems().len(), 1);
}

#[test]
fn test_trainer_rejects_bad_config() {
    let device = common::test_device();

    let config = common::test_model_config(12).with_window_size(1);
    let result: Result<Trainer<common::TestAutodiffBackend>, _> =
        Trainer::new(&config, TrainingConfig::default(), device);
    assert!(result.is_err(), "window_size 1 must be rejected at init");
}
