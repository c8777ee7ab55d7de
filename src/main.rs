mod backend;
mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// ============ CLI ============
#[derive(Parser)]
#[command(name = "verse-llm")]
#[command(version = "0.1.0")]
#[command(about = "Interactive word-level poetry language model")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the next-word model on a corpus (one document per line)
    Train {
        #[arg(short, long)]
        corpus: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value = "20")]
        window_size: usize,
        #[arg(long, default_value = "5")]
        epochs: usize,
        #[arg(long, default_value = "32")]
        batch_size: usize,
        #[arg(long, default_value = "1e-2")]
        learning_rate: f64,
        #[arg(long, default_value = "50")]
        embed_dim: usize,
        #[arg(long, default_value = "100")]
        hidden_dim: usize,
        #[arg(long, default_value = "2")]
        layers: usize,
    },

    /// Compose a poem word-by-word from a trained model
    Compose {
        #[arg(short, long)]
        model: PathBuf,
        #[arg(short, long, default_value = "")]
        seed: String,
        #[arg(long, default_value = "50")]
        words: usize,
        #[arg(long, default_value = "6")]
        break_every: usize,
        /// Reset the repetition table per poem instead of per process
        #[arg(long)]
        reset_per_poem: bool,
    },

    /// Show information about a saved model directory
    Info {
        #[arg(short, long)]
        model: PathBuf,
    },
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Train {
            corpus,
            output,
            window_size,
            epochs,
            batch_size,
            learning_rate,
            embed_dim,
            hidden_dim,
            layers,
        } => commands::train::execute(
            &corpus,
            &output,
            window_size,
            epochs,
            batch_size,
            learning_rate,
            embed_dim,
            hidden_dim,
            layers,
        ),
        Commands::Compose {
            model,
            seed,
            words,
            break_every,
            reset_per_poem,
        } => commands::compose::execute(&model, &seed, words, break_every, reset_per_poem),
        Commands::Info { model } => commands::info::execute(&model),
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}
