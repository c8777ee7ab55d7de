//! Word-level LSTM language model.
//!
//! Embedding → stacked LSTM cells → ReLU projection → vocab head. The model
//! consumes a left-padded context of `window_size - 1` token ids and emits
//! one logit per vocabulary id (pad id included) for the next word.

use super::config::LstmLmConfig;
use crate::data::pad_left;
use burn::{
    module::Module,
    nn::{Embedding, EmbeddingConfig, Linear, LinearConfig},
    tensor::{activation, backend::Backend, Int, Tensor},
};

// ============================================================
// LSTM CELL
// ============================================================

/// Single LSTM cell. Gate order inside the fused projection: input, forget,
/// candidate, output.
#[derive(Module, Debug)]
pub struct LstmCell<B: Backend> {
    input_gates: Linear<B>,
    hidden_gates: Linear<B>,
    #[module(skip)]
    d_hidden: usize,
}

impl<B: Backend> LstmCell<B> {
    pub fn new(d_input: usize, d_hidden: usize, device: &B::Device) -> Self {
        Self {
            input_gates: LinearConfig::new(d_input, 4 * d_hidden).init(device),
            hidden_gates: LinearConfig::new(d_hidden, 4 * d_hidden)
                .with_bias(false)
                .init(device),
            d_hidden,
        }
    }

    /// One timestep: `x` is `[batch, d_input]`, hidden and cell are
    /// `[batch, d_hidden]`. Returns the next (hidden, cell) pair.
    pub fn forward_step(
        &self,
        x: Tensor<B, 2>,
        hidden: Tensor<B, 2>,
        cell: Tensor<B, 2>,
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let [b, _] = x.dims();
        let h = self.d_hidden;

        let gates = self.input_gates.forward(x) + self.hidden_gates.forward(hidden);

        let input_gate = activation::sigmoid(gates.clone().slice([0..b, 0..h]));
        let forget_gate = activation::sigmoid(gates.clone().slice([0..b, h..2 * h]));
        let candidate = activation::tanh(gates.clone().slice([0..b, 2 * h..3 * h]));
        let output_gate = activation::sigmoid(gates.slice([0..b, 3 * h..4 * h]));

        let cell = forget_gate * cell + input_gate * candidate;
        let hidden = output_gate * activation::tanh(cell.clone());

        (hidden, cell)
    }
}

// ============================================================
// LANGUAGE MODEL
// ============================================================

#[derive(Module, Debug)]
pub struct LstmLm<B: Backend> {
    embedding: Embedding<B>,
    cells: Vec<LstmCell<B>>,
    fc: Linear<B>,
    head: Linear<B>,
    #[module(skip)]
    vocab_size: usize,
    #[module(skip)]
    d_embed: usize,
    #[module(skip)]
    d_hidden: usize,
    #[module(skip)]
    window_size: usize,
}

impl<B: Backend> LstmLm<B> {
    pub fn new(config: &LstmLmConfig, device: &B::Device) -> Self {
        let embedding = EmbeddingConfig::new(config.vocab_size, config.d_embed).init(device);

        let cells: Vec<LstmCell<B>> = (0..config.n_layers)
            .map(|layer| {
                let d_in = if layer == 0 {
                    config.d_embed
                } else {
                    config.d_hidden
                };
                LstmCell::new(d_in, config.d_hidden, device)
            })
            .collect();

        let fc = LinearConfig::new(config.d_hidden, config.d_hidden).init(device);
        let head = LinearConfig::new(config.d_hidden, config.vocab_size).init(device);

        Self {
            embedding,
            cells,
            fc,
            head,
            vocab_size: config.vocab_size,
            d_embed: config.d_embed,
            d_hidden: config.d_hidden,
            window_size: config.window_size,
        }
    }

    /// Next-word logits for a batch of contexts.
    /// Input: `[batch, context_len]` token ids. Output: `[batch, vocab_size]`.
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [b, t] = input_ids.dims();
        let device = input_ids.device();

        let x = self.embedding.forward(input_ids);

        let mut hidden: Vec<Tensor<B, 2>> = self
            .cells
            .iter()
            .map(|_| Tensor::zeros([b, self.d_hidden], &device))
            .collect();
        let mut cell_state = hidden.clone();

        for step in 0..t {
            let mut xt = x
                .clone()
                .slice([0..b, step..step + 1, 0..self.d_embed])
                .reshape([b, self.d_embed]);

            for (layer, lstm_cell) in self.cells.iter().enumerate() {
                let (h, c) =
                    lstm_cell.forward_step(xt, hidden[layer].clone(), cell_state[layer].clone());
                xt = h.clone();
                hidden[layer] = h;
                cell_state[layer] = c;
            }
        }

        let top = hidden
            .last()
            .expect("model has at least one recurrent layer")
            .clone();

        let out = activation::relu(self.fc.forward(top));
        self.head.forward(out)
    }

    /// Probability distribution over all vocabulary ids for one context.
    ///
    /// The context is left-padded (or front-truncated) to `window_size - 1`
    /// ids, so an empty context is valid and yields the model's
    /// unconditioned next-word distribution.
    pub fn predict(&self, context: &[u16], device: &B::Device) -> Vec<f32> {
        let ctx = pad_left(context, self.context_len());
        let ids: Vec<i32> = ctx.iter().map(|&t| t as i32).collect();

        let input: Tensor<B, 1, Int> = Tensor::from_ints(ids.as_slice(), device);
        let input = input.reshape([1, self.context_len()]);

        let probs = activation::softmax(self.forward(input), 1);
        probs.into_data().iter::<f32>().collect()
    }

    /// Reconstructs the configuration this model was built from, for
    /// persisting next to the checkpoint.
    pub fn config(&self) -> LstmLmConfig {
        LstmLmConfig::new(self.vocab_size)
            .with_d_embed(self.d_embed)
            .with_d_hidden(self.d_hidden)
            .with_n_layers(self.cells.len())
            .with_window_size(self.window_size)
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Context ids consumed per prediction.
    pub fn context_len(&self) -> usize {
        self.window_size.saturating_sub(1)
    }

    pub fn num_parameters(&self) -> usize {
        let per_cell = |d_in: usize| {
            d_in * 4 * self.d_hidden + 4 * self.d_hidden + self.d_hidden * 4 * self.d_hidden
        };
        let mut total = self.vocab_size * self.d_embed;
        for (layer, _) in self.cells.iter().enumerate() {
            total += per_cell(if layer == 0 { self.d_embed } else { self.d_hidden });
        }
        total += self.d_hidden * self.d_hidden + self.d_hidden;
        total += self.d_hidden * self.vocab_size + self.vocab_size;
        total
    }
}
