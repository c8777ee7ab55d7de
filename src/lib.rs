//! verse-llm: interactive word-level poetry generation with an LSTM
//! next-word model, top-k sampling, and a repetition-capped session.

pub mod agent;
pub mod data;
pub mod error;
pub mod logger;
pub mod model;
pub mod tokenizer;
pub mod utils;

// Main re-exports
pub use agent::{
    NextWord, PoemSession, PoemToken, PoetryAgent, RepetitionScope, SampledWord, SamplerConfig,
    SavedPoem, SharedAgent, TopKSampler,
};
pub use data::{load_lines, pad_left, WindowBatcher, WindowSet};
pub use error::{Result, VerseError};
pub use logger::TrainLogger;
pub use model::{EpochStats, LstmLm, LstmLmConfig, Trainer, TrainingConfig};
pub use tokenizer::{TextNormalizer, WordVocab, WordVocabData, PAD_ID, UNKNOWN_WORD};
