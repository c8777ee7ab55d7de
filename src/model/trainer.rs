use burn::{
    module::Module,
    optim::{adaptor::OptimizerAdaptor, AdamW, AdamWConfig, GradientsParams, Optimizer},
    record::CompactRecorder,
    tensor::{activation, backend::AutodiffBackend, ElementConversion, Int, Tensor},
};

use super::config::{LstmLmConfig, TrainingConfig};
use super::lstm::LstmLm;
use crate::data::WindowSet;
use crate::error::{Result, VerseError};
use crate::logger::TrainLogger;

/// Per-epoch training summary.
#[derive(Debug, Clone, Copy)]
pub struct EpochStats {
    pub epoch: usize,
    pub loss: f32,
}

pub struct Trainer<B: AutodiffBackend> {
    pub model: LstmLm<B>,
    optimizer: OptimizerAdaptor<AdamW, LstmLm<B>, B>,
    config: TrainingConfig,

    step: usize,

    device: B::Device,
}

impl<B: AutodiffBackend> Trainer<B> {
    pub fn new(
        model_config: &LstmLmConfig,
        train_config: TrainingConfig,
        device: B::Device,
    ) -> Result<Self> {
        model_config.validate()?;

        let model = LstmLm::new(model_config, &device);
        // Weight decay 0: plain Adam behavior.
        let optimizer = AdamWConfig::new().with_weight_decay(0.0).init();

        tracing::info!(
            parameters = model_config.num_parameters(),
            "model initialized"
        );

        Ok(Self {
            model,
            optimizer,
            config: train_config,
            step: 0,
            device,
        })
    }

    /// One optimizer step over a batch of (context, label) windows.
    pub fn train_step(
        &mut self,
        contexts: Tensor<B, 2, Int>,
        labels: Tensor<B, 1, Int>,
    ) -> f32 {
        let logits = self.model.forward(contexts);

        let loss = self.cross_entropy_loss(logits, labels);
        let loss_value: f32 = loss.clone().into_scalar().elem();

        if !loss_value.is_finite() {
            panic!("Loss diverged (NaN/Inf) at step {}", self.step);
        }

        let grads = loss.backward();
        let grad_params = GradientsParams::from_grads(grads, &self.model);

        self.model = self
            .optimizer
            .step(self.config.learning_rate, self.model.clone(), grad_params);
        self.step += 1;

        loss_value
    }

    /// Full training run: `epochs` passes over the window set, reshuffled
    /// each epoch. Returns one [`EpochStats`] per epoch.
    pub fn fit(
        &mut self,
        windows: &mut WindowSet,
        mut logger: Option<&mut TrainLogger>,
    ) -> Vec<EpochStats> {
        let mut history = Vec::with_capacity(self.config.epochs);

        for epoch in 0..self.config.epochs {
            windows.shuffle(self.config.shuffle_seed + epoch as u64);

            let mut loss_sum = 0.0f32;
            let mut batches = 0usize;

            for (contexts, labels) in windows.batches(self.config.batch_size) {
                let (ctx_tensor, label_tensor) = self.batch_tensors(&contexts, &labels);
                loss_sum += self.train_step(ctx_tensor, label_tensor);
                batches += 1;
            }

            let stats = EpochStats {
                epoch,
                loss: loss_sum / batches.max(1) as f32,
            };
            tracing::info!(epoch = stats.epoch, loss = stats.loss, "epoch complete");
            if let Some(log) = logger.as_deref_mut() {
                log.log_epoch(stats.epoch, stats.loss);
            }
            history.push(stats);
        }

        history
    }

    fn batch_tensors(
        &self,
        contexts: &[Vec<u16>],
        labels: &[u16],
    ) -> (Tensor<B, 2, Int>, Tensor<B, 1, Int>) {
        let batch_size = contexts.len();
        let context_len = contexts[0].len();

        // Int tensors are built from i32 on every burn backend.
        let flat: Vec<i32> = contexts.iter().flatten().map(|&id| id as i32).collect();
        let ctx: Tensor<B, 1, Int> = Tensor::from_ints(flat.as_slice(), &self.device);
        let ctx = ctx.reshape([batch_size, context_len]);

        let flat_labels: Vec<i32> = labels.iter().map(|&id| id as i32).collect();
        let labels: Tensor<B, 1, Int> = Tensor::from_ints(flat_labels.as_slice(), &self.device);

        (ctx, labels)
    }

    fn cross_entropy_loss(&self, logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        // Log softmax for numerical stability
        let log_probs = activation::log_softmax(logits, 1);

        // Gather the log-prob of the correct next word
        let targets_idx = targets.unsqueeze_dim(1);
        let selected = log_probs.gather(1, targets_idx);

        selected.mean().neg()
    }

    pub fn save_checkpoint(&self, path: &str) -> Result<()> {
        let path = path.trim_end_matches(".mpk");
        let recorder = CompactRecorder::new();
        self.model
            .clone()
            .save_file(path, &recorder)
            .map_err(|e| VerseError::CheckpointSave(e.to_string()))?;
        Ok(())
    }

    pub fn load_checkpoint(&mut self, path: &str) -> Result<()> {
        let path = path.trim_end_matches(".mpk");
        let recorder = CompactRecorder::new();
        self.model = self
            .model
            .clone()
            .load_file(path, &recorder, &self.device)
            .map_err(|e| VerseError::CheckpointLoad(e.to_string()))?;
        Ok(())
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }
}
