//! Info Command
//!
//! Shows the configuration and vocabulary of a saved model directory.

use std::path::PathBuf;

use burn::config::Config;

use verse_llm::agent::{CONFIG_FILE, VOCAB_FILE};
use verse_llm::error::{Result, VerseError};
use verse_llm::model::LstmLmConfig;
use verse_llm::tokenizer::WordVocab;
use verse_llm::utils::{format_number, format_params};

pub fn execute(model_dir: &PathBuf) -> Result<()> {
    let config_path = model_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Err(VerseError::FileNotFound(config_path));
    }

    let config = LstmLmConfig::load(&config_path)
        .map_err(|e| VerseError::ConfigError(e.to_string()))?;
    let vocab = WordVocab::from_file(&model_dir.join(VOCAB_FILE))?;

    println!("═══════════════════════════════════════════════════════════");
    println!("  📊 Model: {:?}", model_dir);
    println!("═══════════════════════════════════════════════════════════");
    println!("  Parameters: {}", format_params(config.num_parameters()));
    println!("  vocab_size: {}", config.vocab_size);
    println!("  d_embed: {}", config.d_embed);
    println!("  d_hidden: {}", config.d_hidden);
    println!("  n_layers: {}", config.n_layers);
    println!("  window_size: {}", config.window_size);
    println!();
    println!("  Vocabulary: {} words", format_number(vocab.num_words()));

    let preview: Vec<&str> = vocab.words().iter().take(10).map(|w| w.as_str()).collect();
    if !preview.is_empty() {
        println!("  Most frequent: {}", preview.join(", "));
    }
    println!("═══════════════════════════════════════════════════════════");

    Ok(())
}
