// src/model/config.rs
//! Model and training hyperparameters.

use burn::config::Config;

use crate::error::VerseError;

#[derive(Config, Debug)]
pub struct LstmLmConfig {
    pub vocab_size: usize,

    #[config(default = "50")]
    pub d_embed: usize,

    #[config(default = "100")]
    pub d_hidden: usize,

    #[config(default = "2")]
    pub n_layers: usize,

    /// Token positions per training window; the model consumes
    /// `window_size - 1` context ids per prediction.
    #[config(default = "20")]
    pub window_size: usize,
}

impl LstmLmConfig {
    /// Context width the network consumes per prediction.
    pub fn context_len(&self) -> usize {
        self.window_size.saturating_sub(1)
    }

    /// Preconditions checked once, before any model is built.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.vocab_size < 2 {
            return Err(VerseError::ConfigError(format!(
                "vocab_size must cover at least one real word plus the pad id, got {}",
                self.vocab_size
            )));
        }
        if self.window_size < 2 {
            return Err(VerseError::WindowTooSmall(self.window_size));
        }
        if self.n_layers == 0 {
            return Err(VerseError::ConfigError(
                "n_layers must be at least 1".to_string(),
            ));
        }
        if self.d_embed == 0 || self.d_hidden == 0 {
            return Err(VerseError::ConfigError(
                "d_embed and d_hidden must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn num_parameters(&self) -> usize {
        let embed = self.vocab_size * self.d_embed;

        // Per LSTM layer: input projection (d_in x 4h + bias) plus hidden
        // projection (h x 4h, no bias).
        let mut recurrent = 0;
        for layer in 0..self.n_layers {
            let d_in = if layer == 0 { self.d_embed } else { self.d_hidden };
            recurrent += d_in * 4 * self.d_hidden + 4 * self.d_hidden;
            recurrent += self.d_hidden * 4 * self.d_hidden;
        }

        let fc = self.d_hidden * self.d_hidden + self.d_hidden;
        let head = self.d_hidden * self.vocab_size + self.vocab_size;

        embed + recurrent + fc + head
    }
}

#[derive(Config, Debug)]
pub struct TrainingConfig {
    #[config(default = "1e-2")]
    pub learning_rate: f64,

    #[config(default = "32")]
    pub batch_size: usize,

    #[config(default = "5")]
    pub epochs: usize,

    #[config(default = "42")]
    pub shuffle_seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-2,
            batch_size: 32,
            epochs: 5,
            shuffle_seed: 42,
        }
    }
}
