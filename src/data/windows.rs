// src/data/windows.rs

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{Result, VerseError};
use crate::tokenizer::PAD_ID;

/// Left-pads `ids` with the pad id up to `width` entries, keeping the
/// trailing ids when the input is longer.
pub fn pad_left(ids: &[u16], width: usize) -> Vec<u16> {
    if ids.len() >= width {
        return ids[ids.len() - width..].to_vec();
    }
    let mut padded = vec![PAD_ID; width - ids.len()];
    padded.extend_from_slice(ids);
    padded
}

/// Fixed-window next-word training examples derived from the encoded corpus.
///
/// Every prefix of length 2..=n of each encoded line becomes one example:
/// the context is the prefix minus its last id, left-padded to
/// `window_size - 1`, and the label is that last id.
pub struct WindowSet {
    contexts: Vec<Vec<u16>>,
    labels: Vec<u16>,
    order: Vec<usize>,
    window_size: usize,
}

impl WindowSet {
    pub fn prepare(encoded_lines: &[Vec<u16>], window_size: usize) -> Result<Self> {
        if window_size < 2 {
            return Err(VerseError::WindowTooSmall(window_size));
        }

        let mut contexts = Vec::new();
        let mut labels = Vec::new();

        for line in encoded_lines {
            if line.len() < 2 {
                continue;
            }
            for end in 2..=line.len() {
                let (label, ctx) = line[..end].split_last().expect("prefix length >= 2");
                contexts.push(pad_left(ctx, window_size - 1));
                labels.push(*label);
            }
        }

        if contexts.is_empty() {
            return Err(VerseError::NoTrainingWindows);
        }

        let order = (0..contexts.len()).collect();
        Ok(Self {
            contexts,
            labels,
            order,
            window_size,
        })
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Context width consumed by the model per prediction.
    pub fn context_len(&self) -> usize {
        self.window_size - 1
    }

    pub fn get(&self, idx: usize) -> Option<(&[u16], u16)> {
        let i = *self.order.get(idx)?;
        Some((&self.contexts[i], self.labels[i]))
    }

    /// Deterministic reordering, one seed per epoch.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.order.shuffle(&mut rng);
    }

    pub fn batches(&self, batch_size: usize) -> WindowBatcher<'_> {
        WindowBatcher {
            windows: self,
            batch_size: batch_size.max(1),
            current_idx: 0,
        }
    }
}

/// Batched iterator over a [`WindowSet`], in its current order.
pub struct WindowBatcher<'a> {
    windows: &'a WindowSet,
    batch_size: usize,
    current_idx: usize,
}

impl<'a> Iterator for WindowBatcher<'a> {
    type Item = (Vec<Vec<u16>>, Vec<u16>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_idx >= self.windows.len() {
            return None;
        }

        let end_idx = (self.current_idx + self.batch_size).min(self.windows.len());

        let mut contexts = Vec::with_capacity(end_idx - self.current_idx);
        let mut labels = Vec::with_capacity(end_idx - self.current_idx);

        for idx in self.current_idx..end_idx {
            if let Some((ctx, label)) = self.windows.get(idx) {
                contexts.push(ctx.to_vec());
                labels.push(label);
            }
        }

        self.current_idx = end_idx;

        if contexts.is_empty() {
            None
        } else {
            Some((contexts, labels))
        }
    }
}
