// src/logger/metrics.rs
//! File-based training log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Appends training progress lines to `training.log` in the output directory.
pub struct TrainLogger {
    file: File,
    start_time: Instant,
}

impl TrainLogger {
    pub fn new(output_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        let log_path = output_dir.join("training.log");

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            file,
            start_time: Instant::now(),
        })
    }

    pub fn log_epoch(&mut self, epoch: usize, loss: f32) {
        let elapsed = self.start_time.elapsed().as_secs();
        let ppl = (loss as f64).exp();

        let line = format!(
            "[{:>6}s] Epoch {:>3} | Loss: {:.4} | PPL: {:>8.2}\n",
            elapsed, epoch, loss, ppl
        );

        let _ = self.file.write_all(line.as_bytes());
        let _ = self.file.flush();
    }

    pub fn log_checkpoint(&mut self, path: &str) {
        let elapsed = self.start_time.elapsed().as_secs();
        let line = format!("[{:>6}s] CHECKPOINT -> {}\n", elapsed, path);
        let _ = self.file.write_all(line.as_bytes());
        let _ = self.file.flush();
    }

    pub fn log_message(&mut self, msg: &str) {
        let elapsed = self.start_time.elapsed().as_secs();
        let line = format!("[{:>6}s] {}\n", elapsed, msg);
        let _ = self.file.write_all(line.as_bytes());
        let _ = self.file.flush();
    }
}
