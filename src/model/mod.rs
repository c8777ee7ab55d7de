mod config;
mod lstm;
mod trainer;

pub use config::{LstmLmConfig, TrainingConfig};
pub use lstm::{LstmCell, LstmLm};
pub use trainer::{EpochStats, Trainer};
