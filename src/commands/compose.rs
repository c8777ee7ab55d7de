//! Compose Command
//!
//! Generates a poem word-by-word from a trained model: each sampled word
//! seeds the next prediction, with periodic line breaks.

use std::path::PathBuf;

use verse_llm::agent::{PoetryAgent, RepetitionScope, SamplerConfig};
use verse_llm::error::Result;

use crate::backend::{get_device, MyBackend};

pub fn execute(
    model_dir: &PathBuf,
    seed: &str,
    words: usize,
    break_every: usize,
    reset_per_poem: bool,
) -> Result<()> {
    println!("═══════════════════════════════════════════════════════════");
    println!("  ✨ Composing a poem");
    println!("═══════════════════════════════════════════════════════════");

    let device = get_device();

    let sampler_config = SamplerConfig {
        scope: if reset_per_poem {
            RepetitionScope::Poem
        } else {
            RepetitionScope::Process
        },
        ..Default::default()
    };

    let mut agent = PoetryAgent::<MyBackend>::load(model_dir, sampler_config, device)?;

    if !seed.trim().is_empty() {
        agent.add_manual_word(seed);
    }

    for i in 0..words {
        agent.add_word();
        if break_every > 0 && (i + 1) % break_every == 0 && i + 1 < words {
            agent.add_line_break();
        }
    }

    println!();
    println!("{}", agent.poem_text());
    println!();

    let saved = agent.save_poem();
    println!("  Surprise score: {:.3}", saved.score);
    println!("═══════════════════════════════════════════════════════════");

    Ok(())
}
