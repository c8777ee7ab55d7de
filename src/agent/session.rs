//! Mutable poem state: the poem under construction, its per-word surprise
//! history, and the finalized poem collection.

use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoemToken {
    Word(String),
    Break,
}

#[derive(Debug, Clone)]
pub struct SavedPoem {
    pub tokens: Vec<PoemToken>,
    /// Aggregate surprise score computed at finalize time.
    pub score: f64,
}

impl SavedPoem {
    pub fn to_text(&self) -> String {
        render_tokens(&self.tokens)
    }
}

#[derive(Debug, Default)]
pub struct PoemSession {
    current: Vec<PoemToken>,
    errors: Vec<f32>,
    saved: Vec<SavedPoem>,
}

impl PoemSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sampled word and its surprise value.
    pub fn push_word(&mut self, word: impl Into<String>, error: f32) {
        self.current.push(PoemToken::Word(word.into()));
        self.errors.push(error);
    }

    /// Appends a line break, which carries an implicit zero surprise.
    pub fn push_break(&mut self) {
        self.current.push(PoemToken::Break);
        self.errors.push(0.0);
    }

    /// Appends a user-supplied word. Best-effort: degenerate input is logged
    /// and dropped, never surfaced as a failure. Manual words carry no model
    /// surprise, so the error history is untouched.
    pub fn push_manual(&mut self, word: &str) {
        let trimmed = word.trim();
        if trimmed.is_empty() {
            warn!("ignoring empty manual word");
            return;
        }
        self.current.push(PoemToken::Word(trimmed.to_string()));
    }

    /// Seed for the next sampled word: the last word of the poem, scanning
    /// back past line breaks. Empty string for an empty poem.
    pub fn seed_text(&self) -> &str {
        self.current
            .iter()
            .rev()
            .find_map(|token| match token {
                PoemToken::Word(w) => Some(w.as_str()),
                PoemToken::Break => None,
            })
            .unwrap_or("")
    }

    /// Scores and stores the current poem, then resets the working state.
    /// Always appends exactly one saved entry, even for an empty poem.
    pub fn finalize(&mut self) -> &SavedPoem {
        let score = round3(rms(&self.errors));
        self.saved.push(SavedPoem {
            tokens: std::mem::take(&mut self.current),
            score,
        });
        self.errors.clear();
        self.saved.last().expect("entry pushed above")
    }

    pub fn current(&self) -> &[PoemToken] {
        &self.current
    }

    pub fn errors(&self) -> &[f32] {
        &self.errors
    }

    pub fn saved(&self) -> &[SavedPoem] {
        &self.saved
    }

    pub fn to_text(&self) -> String {
        render_tokens(&self.current)
    }
}

fn render_tokens(tokens: &[PoemToken]) -> String {
    let mut text = String::new();
    for token in tokens {
        match token {
            PoemToken::Word(w) => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push(' ');
                }
                text.push_str(w);
            }
            PoemToken::Break => text.push('\n'),
        }
    }
    text
}

/// Root mean square over the surprise history. The divisor is `n + 1`, not
/// `n`; an empty history scores 0.
fn rms(errors: &[f32]) -> f64 {
    let sum: f64 = errors.iter().map(|&e| (e as f64) * (e as f64)).sum();
    (sum / (errors.len() as f64 + 1.0)).sqrt()
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
