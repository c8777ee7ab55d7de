//! Common test utilities and helpers
//!
//! Shared helpers for integration tests.

use burn::backend::ndarray::{NdArray, NdArrayDevice};
use burn::backend::Autodiff;

use verse_llm::{LstmLm, LstmLmConfig, WordVocab};

pub type TestBackend = NdArray;
#[allow(dead_code)]
pub type TestAutodiffBackend = Autodiff<NdArray>;

pub fn test_device() -> NdArrayDevice {
    NdArrayDevice::Cpu
}

/// Small fixed corpus: one document per line.
pub fn test_corpus() -> Vec<String> {
    vec![
        "the cat sat on the mat".to_string(),
        "the dog ran over the hill".to_string(),
        "a cat and a dog met at dawn".to_string(),
        "the moon rose over the quiet sea".to_string(),
    ]
}

pub fn test_vocab() -> WordVocab {
    WordVocab::fit(test_corpus())
}

/// Minimal model configuration for fast tests.
pub fn test_model_config(vocab_size: usize) -> LstmLmConfig {
    LstmLmConfig::new(vocab_size)
        .with_d_embed(8)
        .with_d_hidden(8)
        .with_n_layers(2)
        .with_window_size(6)
}

#[allow(dead_code)]
pub fn test_model(vocab_size: usize) -> LstmLm<TestBackend> {
    LstmLm::new(&test_model_config(vocab_size), &test_device())
}
