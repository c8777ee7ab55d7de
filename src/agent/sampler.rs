//! Top-k next-word selection with a session repetition cap.

use std::cmp::Ordering;
use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::tokenizer::WordVocab;

/// How long the repetition table lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepetitionScope {
    /// Counts accumulate for the life of the agent.
    Process,
    /// Counts reset every time a poem is finalized.
    Poem,
}

#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Candidates drawn uniformly from the `top_k` most probable ids.
    pub top_k: usize,
    /// Emissions of one word before the hard override kicks in.
    pub max_repeats: u32,
    pub scope: RepetitionScope,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            max_repeats: 4,
            scope: RepetitionScope::Process,
        }
    }
}

/// Outcome of one sampling step.
#[derive(Debug, Clone)]
pub struct SampledWord {
    /// `None` when the sampled id has no vocabulary entry.
    pub word: Option<String>,
    /// Absolute id distance between the sampled id and the argmax id.
    pub surprise: f32,
}

/// Picks the next word from a predicted distribution.
///
/// The emission table here counts words sampled in this session; it is not
/// the corpus frequency table the vocabulary carries.
pub struct TopKSampler {
    config: SamplerConfig,
    emitted: HashMap<String, u32>,
    rng: StdRng,
}

impl TopKSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            emitted: HashMap::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sampler for tests.
    pub fn with_seed(config: SamplerConfig, seed: u64) -> Self {
        Self {
            config,
            emitted: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selects a next word from `dist`, a probability vector indexed by
    /// token id (index 0 = pad id).
    ///
    /// A word that has already been emitted `max_repeats` times is replaced
    /// by a uniform draw over the whole vocabulary; the replacement bypasses
    /// the emission table and keeps the surprise of the discarded pick.
    pub fn choose(&mut self, dist: &[f32], vocab: &WordVocab) -> SampledWord {
        let best = argmax(dist);

        let mut indexed: Vec<(usize, f32)> = dist.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        indexed.truncate(self.config.top_k.max(1));

        let candidate = indexed
            .choose(&mut self.rng)
            .map(|(id, _)| *id)
            .unwrap_or(best);

        let surprise = (candidate as i64 - best as i64).unsigned_abs() as f32;

        let word = match vocab.decode(candidate as u16) {
            Some(w) => w.to_string(),
            None => return SampledWord { word: None, surprise },
        };

        match self.emitted.get_mut(&word) {
            Some(count) if *count >= self.config.max_repeats => {
                let replacement = vocab.words().choose(&mut self.rng).cloned();
                SampledWord {
                    word: replacement,
                    surprise,
                }
            }
            Some(count) => {
                *count += 1;
                SampledWord {
                    word: Some(word),
                    surprise,
                }
            }
            None => {
                self.emitted.insert(word.clone(), 1);
                SampledWord {
                    word: Some(word),
                    surprise,
                }
            }
        }
    }

    /// How many times `word` has been emitted through the normal path.
    pub fn emission_count(&self, word: &str) -> u32 {
        self.emitted.get(word).copied().unwrap_or(0)
    }

    /// Clears the emission table.
    pub fn reset(&mut self) {
        self.emitted.clear();
    }

    pub fn scope(&self) -> RepetitionScope {
        self.config.scope
    }
}

fn argmax(dist: &[f32]) -> usize {
    dist.iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
        .map(|(id, _)| id)
        .unwrap_or(0)
}
