//! The poetry agent: vocabulary + sequence model + sampler + session state
//! behind one handle.

mod sampler;
mod session;

pub use sampler::{RepetitionScope, SampledWord, SamplerConfig, TopKSampler};
pub use session::{PoemSession, PoemToken, SavedPoem};

use std::path::Path;
use std::sync::Arc;

use burn::config::Config;
use burn::module::Module;
use burn::record::CompactRecorder;
use burn::tensor::backend::Backend;
use parking_lot::{Mutex, MutexGuard};

use crate::error::{Result, VerseError};
use crate::model::{LstmLm, LstmLmConfig};
use crate::tokenizer::{WordVocab, UNKNOWN_WORD};

/// File names inside a saved agent directory. The recorder appends its own
/// extension to the model stem.
pub const MODEL_FILE: &str = "model";
pub const CONFIG_FILE: &str = "config.json";
pub const VOCAB_FILE: &str = "vocab.json";

/// One sampled next word and its surprise value. A decode miss surfaces as
/// [`UNKNOWN_WORD`], never as a panic.
#[derive(Debug, Clone)]
pub struct NextWord {
    pub word: String,
    pub error: f32,
}

pub struct PoetryAgent<B: Backend> {
    vocab: WordVocab,
    model: LstmLm<B>,
    sampler: TopKSampler,
    session: PoemSession,
    device: B::Device,
}

impl<B: Backend> PoetryAgent<B> {
    pub fn new(
        vocab: WordVocab,
        model: LstmLm<B>,
        sampler_config: SamplerConfig,
        device: B::Device,
    ) -> Result<Self> {
        Self::with_sampler(vocab, model, TopKSampler::new(sampler_config), device)
    }

    /// Construction with a caller-built sampler (seeded RNG in tests).
    pub fn with_sampler(
        vocab: WordVocab,
        model: LstmLm<B>,
        sampler: TopKSampler,
        device: B::Device,
    ) -> Result<Self> {
        if vocab.is_empty() {
            return Err(VerseError::VocabEmpty);
        }
        if model.window_size() < 2 {
            return Err(VerseError::WindowTooSmall(model.window_size()));
        }

        Ok(Self {
            vocab,
            model,
            sampler,
            session: PoemSession::new(),
            device,
        })
    }

    /// Restores an agent from a directory written by [`PoetryAgent::save`].
    pub fn load(dir: &Path, sampler_config: SamplerConfig, device: B::Device) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(VerseError::FileNotFound(config_path));
        }

        let config = LstmLmConfig::load(&config_path)
            .map_err(|e| VerseError::CheckpointLoad(e.to_string()))?;
        config.validate()?;

        let vocab = WordVocab::from_file(&dir.join(VOCAB_FILE))?;
        if vocab.is_empty() {
            return Err(VerseError::VocabEmpty);
        }

        let model = LstmLm::new(&config, &device)
            .load_file(dir.join(MODEL_FILE), &CompactRecorder::new(), &device)
            .map_err(|e| VerseError::CheckpointLoad(e.to_string()))?;

        Self::new(vocab, model, sampler_config, device)
    }

    /// Writes `config.json`, `vocab.json` and the model record into `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        self.model
            .config()
            .save(&config_path)
            .map_err(|source| VerseError::FileWrite {
                path: config_path,
                source,
            })?;

        self.vocab.save(&dir.join(VOCAB_FILE))?;

        self.model
            .clone()
            .save_file(dir.join(MODEL_FILE), &CompactRecorder::new())
            .map_err(|e| VerseError::CheckpointSave(e.to_string()))?;

        Ok(())
    }

    /// Samples a next word conditioned on `seed_text`. An empty seed yields
    /// the model's unconditioned distribution.
    pub fn next_word(&mut self, seed_text: &str) -> NextWord {
        let ids = self.vocab.encode(seed_text);
        let dist = self.model.predict(&ids, &self.device);
        let sampled = self.sampler.choose(&dist, &self.vocab);

        NextWord {
            word: sampled.word.unwrap_or_else(|| UNKNOWN_WORD.to_string()),
            error: sampled.surprise,
        }
    }

    /// Samples from the current poem's own tail and appends the result,
    /// word and surprise both.
    pub fn add_word(&mut self) -> NextWord {
        let seed = self.session.seed_text().to_string();
        let next = self.next_word(&seed);
        self.session.push_word(next.word.clone(), next.error);
        next
    }

    /// Best-effort user insertion; never fails.
    pub fn add_manual_word(&mut self, word: &str) {
        self.session.push_manual(word);
    }

    pub fn add_line_break(&mut self) {
        self.session.push_break();
    }

    /// Finalizes the current poem into the saved collection and resets the
    /// working state. With [`RepetitionScope::Poem`], the repetition table
    /// resets too.
    pub fn save_poem(&mut self) -> SavedPoem {
        if self.sampler.scope() == RepetitionScope::Poem {
            self.sampler.reset();
        }
        self.session.finalize().clone()
    }

    pub fn current_poem(&self) -> &[PoemToken] {
        self.session.current()
    }

    pub fn poem_text(&self) -> String {
        self.session.to_text()
    }

    pub fn saved_poems(&self) -> &[SavedPoem] {
        self.session.saved()
    }

    pub fn vocab(&self) -> &WordVocab {
        &self.vocab
    }

    pub fn sampler(&self) -> &TopKSampler {
        &self.sampler
    }

    pub fn session(&self) -> &PoemSession {
        &self.session
    }
}

/// Single-lock handle for embedders that serve the agent to concurrent
/// callers. Every operation mutates shared state, so access must serialize.
pub struct SharedAgent<B: Backend> {
    inner: Arc<Mutex<PoetryAgent<B>>>,
}

impl<B: Backend> SharedAgent<B> {
    pub fn new(agent: PoetryAgent<B>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(agent)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, PoetryAgent<B>> {
        self.inner.lock()
    }
}

impl<B: Backend> Clone for SharedAgent<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
