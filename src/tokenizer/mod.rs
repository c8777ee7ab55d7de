mod normalize;
mod words;

pub use normalize::TextNormalizer;
pub use words::{WordVocab, WordVocabData, PAD_ID, UNKNOWN_WORD};
