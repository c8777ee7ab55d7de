// src/tokenizer/normalize.rs

/// Punctuation stripped before word splitting. The apostrophe is deliberately
/// absent so contractions ("don't", "o'er") survive as single words.
const FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n\r";

/// Normalizer applied to every corpus line and seed text before tokenizing.
pub struct TextNormalizer {
    lowercase: bool,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self { lowercase: true }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut result: String = text
            .chars()
            .map(|c| if FILTERS.contains(c) { ' ' } else { c })
            .collect();

        if self.lowercase {
            result = result.to_lowercase();
        }

        // Collapse runs of whitespace left behind by stripped punctuation
        result.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Normalized whitespace-delimited words of `text`.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(|w| w.to_string())
            .collect()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
