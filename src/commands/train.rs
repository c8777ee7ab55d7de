//! Train Command
//!
//! Fits the vocabulary, prepares training windows and trains the next-word
//! model, then writes the model directory (`model.mpk` + `config.json` +
//! `vocab.json`).

use std::path::PathBuf;
use std::time::Instant;

use burn::config::Config;

use verse_llm::agent::{PoetryAgent, SamplerConfig, CONFIG_FILE, MODEL_FILE, VOCAB_FILE};
use verse_llm::data::{load_lines, WindowSet};
use verse_llm::error::{Result, VerseError};
use verse_llm::logger::TrainLogger;
use verse_llm::model::{LstmLmConfig, Trainer, TrainingConfig};
use verse_llm::tokenizer::WordVocab;
use verse_llm::utils::{format_duration, format_number, format_params};

use crate::backend::{get_device, MyBackend, TrainBackend};

pub fn execute(
    corpus: &PathBuf,
    output: &PathBuf,
    window_size: usize,
    epochs: usize,
    batch_size: usize,
    learning_rate: f64,
    embed_dim: usize,
    hidden_dim: usize,
    layers: usize,
) -> Result<()> {
    println!("═══════════════════════════════════════════════════════════");
    println!("  🚀 Training next-word model");
    println!("═══════════════════════════════════════════════════════════");

    let device = get_device();

    let lines = load_lines(corpus)?;
    let vocab = WordVocab::fit(&lines);
    if vocab.is_empty() {
        return Err(VerseError::VocabEmpty);
    }

    let encoded: Vec<Vec<u16>> = lines.iter().map(|l| vocab.encode(l)).collect();
    let mut windows = WindowSet::prepare(&encoded, window_size)?;

    println!("  Corpus: {} lines", format_number(lines.len()));
    println!("  Vocabulary: {} words", format_number(vocab.num_words()));
    println!("  Training windows: {}", format_number(windows.len()));

    let model_config = LstmLmConfig::new(vocab.vocab_size())
        .with_d_embed(embed_dim)
        .with_d_hidden(hidden_dim)
        .with_n_layers(layers)
        .with_window_size(window_size);

    println!(
        "  Model: {} parameters",
        format_params(model_config.num_parameters())
    );
    println!("  Epochs: {} | Batch: {} | LR: {:.2e}", epochs, batch_size, learning_rate);
    println!();

    let train_config = TrainingConfig {
        learning_rate,
        batch_size,
        epochs,
        ..Default::default()
    };

    let mut trainer: Trainer<TrainBackend> =
        Trainer::new(&model_config, train_config, device.clone())?;
    let mut logger = TrainLogger::new(output)?;

    let start = Instant::now();
    let history = trainer.fit(&mut windows, Some(&mut logger));
    for stats in &history {
        println!("  Epoch {:>3} | Loss: {:.4}", stats.epoch, stats.loss);
    }

    // Persist the artifact triple the agent loads from
    std::fs::create_dir_all(output)?;
    let model_stem = output.join(MODEL_FILE);
    trainer.save_checkpoint(model_stem.to_str().unwrap())?;
    logger.log_checkpoint(model_stem.to_str().unwrap());

    let config_path = output.join(CONFIG_FILE);
    model_config
        .save(&config_path)
        .map_err(|source| VerseError::FileWrite {
            path: config_path,
            source,
        })?;
    vocab.save(&output.join(VOCAB_FILE))?;

    println!();
    println!("  ✅ Training complete in {}", format_duration(start.elapsed().as_secs()));
    println!("  💾 Model directory: {:?}", output);

    // Short preview through the saved artifact
    let mut agent = PoetryAgent::<MyBackend>::load(output, SamplerConfig::default(), device)?;
    for _ in 0..12 {
        agent.add_word();
    }
    println!("  📝 Preview: {}", agent.poem_text());
    println!("═══════════════════════════════════════════════════════════");

    Ok(())
}
