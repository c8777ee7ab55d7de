// src/data/corpus.rs

use std::fs;
use std::path::Path;

use crate::error::{Result, VerseError};

/// Reads a training corpus: one document per line, blank lines skipped.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(VerseError::FileNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path).map_err(|source| VerseError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    if lines.is_empty() {
        return Err(VerseError::CorpusEmpty(path.to_path_buf()));
    }

    Ok(lines)
}
