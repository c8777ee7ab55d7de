use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::normalize::TextNormalizer;
use crate::error::{Result, VerseError};

/// Id reserved for left-padding. Never assigned to a real word.
pub const PAD_ID: u16 = 0;

/// Printable stand-in for a sampled id with no vocabulary entry. The
/// normalizer strips `<` and `>`, so no fitted word can ever collide with it.
pub const UNKNOWN_WORD: &str = "<unknown>";

/// Serialized form of the vocabulary (`vocab.json`).
#[derive(Serialize, Deserialize, Clone)]
pub struct WordVocabData {
    /// Index `i` holds the word assigned id `i + 1`; id 0 is the pad id.
    pub id_to_word: Vec<String>,
    /// Corpus occurrence counts, index-aligned with `id_to_word`.
    pub counts: Vec<u32>,
}

/// Word-level vocabulary fitted once over the training corpus.
///
/// Ids are assigned in corpus frequency order (most frequent word gets id 1),
/// ties broken by first occurrence. The per-word counts recorded here are the
/// corpus frequencies; they are unrelated to the session repetition table the
/// sampler keeps.
pub struct WordVocab {
    id_to_word: Vec<String>,
    word_to_id: HashMap<String, u16>,
    counts: Vec<u32>,
    normalizer: TextNormalizer,
}

impl WordVocab {
    /// Builds the word↔id mapping and occurrence counts from corpus lines.
    pub fn fit<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let normalizer = TextNormalizer::new();

        let mut occurrences: HashMap<String, u32> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for line in lines {
            for word in normalizer.words(line.as_ref()) {
                match occurrences.get_mut(&word) {
                    Some(count) => *count += 1,
                    None => {
                        occurrences.insert(word.clone(), 1);
                        first_seen.push(word);
                    }
                }
            }
        }

        // Frequency-descending order; the stable sort keeps first-seen order
        // among equal counts.
        let mut id_to_word = first_seen;
        id_to_word.sort_by_key(|w| std::cmp::Reverse(occurrences[w]));

        let word_to_id = id_to_word
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), (i + 1) as u16))
            .collect();
        let counts = id_to_word.iter().map(|w| occurrences[w]).collect();

        Self {
            id_to_word,
            word_to_id,
            counts,
            normalizer,
        }
    }

    pub fn from_data(data: WordVocabData) -> Self {
        let word_to_id = data
            .id_to_word
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), (i + 1) as u16))
            .collect();
        Self {
            id_to_word: data.id_to_word,
            word_to_id,
            counts: data.counts,
            normalizer: TextNormalizer::new(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| VerseError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let data: WordVocabData =
            serde_json::from_reader(reader).map_err(|e| VerseError::VocabLoad(e.to_string()))?;
        Ok(Self::from_data(data))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| VerseError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = BufWriter::new(file);
        let data = WordVocabData {
            id_to_word: self.id_to_word.clone(),
            counts: self.counts.clone(),
        };
        serde_json::to_writer_pretty(writer, &data)
            .map_err(|e| VerseError::FileWrite {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e),
            })
    }

    /// Maps each word of `text` to its id. Unknown words are dropped, so the
    /// empty string and all-unknown text both encode to an empty sequence.
    pub fn encode(&self, text: &str) -> Vec<u16> {
        self.normalizer
            .words(text)
            .iter()
            .filter_map(|w| self.word_to_id.get(w).copied())
            .collect()
    }

    /// Reverse lookup. `None` for the pad id and for unassigned ids.
    pub fn decode(&self, id: u16) -> Option<&str> {
        if id == PAD_ID {
            return None;
        }
        self.id_to_word.get(id as usize - 1).map(|w| w.as_str())
    }

    pub fn id_of(&self, word: &str) -> Option<u16> {
        self.word_to_id.get(word).copied()
    }

    /// How often `word` occurred in the training corpus.
    pub fn corpus_count(&self, word: &str) -> Option<u32> {
        self.id_of(word).map(|id| self.counts[id as usize - 1])
    }

    /// All real words, id order (index `i` ↔ id `i + 1`).
    pub fn words(&self) -> &[String] {
        &self.id_to_word
    }

    /// Number of real words (pad excluded).
    pub fn num_words(&self) -> usize {
        self.id_to_word.len()
    }

    /// Model output dimension: one slot per assigned id plus the pad id.
    pub fn vocab_size(&self) -> usize {
        self.id_to_word.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_word.is_empty()
    }
}
