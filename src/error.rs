use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerseError {
    // --- I/O ---
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // --- Corpus / data ---
    #[error("Corpus empty: {0}")]
    CorpusEmpty(PathBuf),

    #[error("Window size must be at least 2, got {0}")]
    WindowTooSmall(usize),

    #[error("No training windows produced (no corpus line has 2 or more known words)")]
    NoTrainingWindows,

    // --- Model ---
    #[error("Checkpoint load failed: {0}")]
    CheckpointLoad(String),

    #[error("Checkpoint save failed: {0}")]
    CheckpointSave(String),

    // --- Vocabulary ---
    #[error("Vocabulary is empty; fit it on a corpus before use")]
    VocabEmpty,

    #[error("Vocabulary load failed: {0}")]
    VocabLoad(String),

    // --- Config ---
    #[error("Invalid config: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, VerseError>;
