use burn::{
    nn::{
        gru::{Gru, GruConfig},
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::log_softmax,
};

// ─── HiddenState ──────────────────────────────────────────────────────────────
/// The recurrent memory threaded between timesteps: one
/// [1, hidden_size] tensor per GRU layer (batch size is 1
/// throughout — one example is processed at a time).
///
/// A state is created zeroed at the start of an example, handed
/// forward step by step, and dropped at example end. It is a
/// plain value, not a Module — it carries activations, not
/// parameters.
#[derive(Debug, Clone)]
pub struct HiddenState<B: Backend> {
    pub layers: Vec<Tensor<B, 2>>,
}

impl<B: Backend> HiddenState<B> {
    /// A zeroed state for a stack of `num_layers` cells.
    pub fn zeros(num_layers: usize, hidden_size: usize, device: &B::Device) -> Self {
        let layers = (0..num_layers)
            .map(|_| Tensor::zeros([1, hidden_size], device))
            .collect();
        Self { layers }
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn device(&self) -> B::Device {
        self.layers[0].device()
    }
}

// ─── GruStack ─────────────────────────────────────────────────────────────────
/// A stack of GRU cells stepped one token at a time. Layer 0
/// consumes the embedded token; layer i consumes layer i-1's
/// output. Both networks share this block.
#[derive(Module, Debug)]
pub struct GruStack<B: Backend> {
    layers: Vec<Gru<B>>,
    hidden_size: usize,
}

impl<B: Backend> GruStack<B> {
    /// Advance every layer by one timestep.
    /// `input` is the embedded token, shape [1, 1, embedding_size].
    /// Returns the top layer's output [1, hidden_size] and the
    /// updated per-layer state.
    fn step(&self, input: Tensor<B, 3>, hidden: HiddenState<B>) -> (Tensor<B, 2>, HiddenState<B>) {
        debug_assert_eq!(self.layers.len(), hidden.num_layers());

        let mut x = input;
        let mut next_layers = Vec::with_capacity(self.layers.len());

        for (gru, state) in self.layers.iter().zip(hidden.layers) {
            // Gru consumes [1, seq=1, d_in] and the layer's previous
            // state, and emits the hidden-state sequence [1, 1, hidden]
            x = gru.forward(x, Some(state));
            next_layers.push(x.clone().reshape([1, self.hidden_size]));
        }

        let output = x.reshape([1, self.hidden_size]);
        (output, HiddenState { layers: next_layers })
    }

    fn num_layers(&self) -> usize {
        self.layers.len()
    }

    fn init_state(&self, device: &B::Device) -> HiddenState<B> {
        HiddenState::zeros(self.num_layers(), self.hidden_size, device)
    }
}

fn build_gru_stack<B: Backend>(
    embedding_size: usize,
    hidden_size: usize,
    num_layers: usize,
    device: &B::Device,
) -> GruStack<B> {
    let layers = (0..num_layers)
        .map(|i| {
            // Only the bottom layer sees the embedding width
            let d_input = if i == 0 { embedding_size } else { hidden_size };
            GruConfig::new(d_input, hidden_size, true).init(device)
        })
        .collect();
    GruStack { layers, hidden_size }
}

// ─── Encoder ──────────────────────────────────────────────────────────────────
// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct EncoderConfig {
    pub vocab_size: usize,
    pub hidden_size: usize,
    pub embedding_size: usize,
    #[config(default = 1)]
    pub num_layers: usize,
}

impl EncoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Encoder<B> {
        Encoder {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            gru: build_gru_stack(self.embedding_size, self.hidden_size, self.num_layers, device),
        }
    }
}

/// Reads the source sequence one token at a time into a hidden
/// state. The terminal state is the only channel carrying source
/// information into the decoder — there is no attention.
#[derive(Module, Debug)]
pub struct Encoder<B: Backend> {
    embedding: Embedding<B>,
    gru: GruStack<B>,
}

impl<B: Backend> Encoder<B> {
    /// One encoder timestep: embed `token_id`, run the GRU stack.
    /// Precondition: token_id < vocab_size (the corpus guarantees
    /// every id it produces is in range).
    pub fn advance(
        &self,
        token_id: usize,
        hidden: HiddenState<B>,
    ) -> (Tensor<B, 2>, HiddenState<B>) {
        let device = hidden.device();
        let token = Tensor::<B, 1, Int>::from_ints([token_id as i32], &device).reshape([1, 1]);
        let embedded = self.embedding.forward(token);
        self.gru.step(embedded, hidden)
    }

    /// Run the full ENCODE phase: start from a zeroed state and
    /// advance over every source token in order, discarding the
    /// per-step outputs. Returns the terminal hidden state.
    pub fn consume(&self, token_ids: &[usize], device: &B::Device) -> HiddenState<B> {
        let mut hidden = self.init_state(device);
        for &token_id in token_ids {
            let (_output, next) = self.advance(token_id, hidden);
            hidden = next;
        }
        hidden
    }

    /// A zeroed state shaped for this network's stack.
    pub fn init_state(&self, device: &B::Device) -> HiddenState<B> {
        self.gru.init_state(device)
    }
}

// ─── Decoder ──────────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct DecoderConfig {
    pub vocab_size: usize,
    pub hidden_size: usize,
    pub embedding_size: usize,
    #[config(default = 1)]
    pub num_layers: usize,
}

impl DecoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Decoder<B> {
        Decoder {
            embedding: EmbeddingConfig::new(self.vocab_size, self.embedding_size).init(device),
            gru: build_gru_stack(self.embedding_size, self.hidden_size, self.num_layers, device),
            projection: LinearConfig::new(self.hidden_size, self.vocab_size).init(device),
        }
    }
}

/// One decoder step: embedding → GRU stack → linear projection
/// to vocabulary logits → log-softmax. The same step serves both
/// training (supervised loss against the known next token) and
/// inference (greedy argmax selection).
#[derive(Module, Debug)]
pub struct Decoder<B: Backend> {
    embedding: Embedding<B>,
    gru: GruStack<B>,
    projection: Linear<B>,
}

impl<B: Backend> Decoder<B> {
    /// Advance by one token. Returns a [1, vocab_size] row of
    /// log-probabilities over the target vocabulary and the
    /// updated hidden state.
    pub fn advance(
        &self,
        token_id: usize,
        hidden: HiddenState<B>,
    ) -> (Tensor<B, 2>, HiddenState<B>) {
        let device = hidden.device();
        let token = Tensor::<B, 1, Int>::from_ints([token_id as i32], &device).reshape([1, 1]);
        let embedded = self.embedding.forward(token);

        let (output, hidden) = self.gru.step(embedded, hidden);
        let logits = self.projection.forward(output);
        (log_softmax(logits, 1), hidden)
    }
}

// ─── DecoderStep ──────────────────────────────────────────────────────────────
/// The step signature the greedy-decoding loop depends on.
/// Decoder implements it; tests drive the loop with stubs.
pub trait DecoderStep<B: Backend> {
    /// See Decoder::advance.
    fn advance(&self, token_id: usize, hidden: HiddenState<B>)
        -> (Tensor<B, 2>, HiddenState<B>);
}

impl<B: Backend> DecoderStep<B> for Decoder<B> {
    fn advance(
        &self,
        token_id: usize,
        hidden: HiddenState<B>,
    ) -> (Tensor<B, 2>, HiddenState<B>) {
        Decoder::advance(self, token_id, hidden)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn device() -> <TestBackend as Backend>::Device {
        Default::default()
    }

    #[test]
    fn test_encoder_advance_shapes() {
        let device = device();
        let encoder: Encoder<TestBackend> =
            EncoderConfig::new(10, 8, 4).init(&device);

        let hidden = encoder.init_state(&device);
        let (output, next) = encoder.advance(3, hidden);

        assert_eq!(output.dims(), [1, 8]);
        assert_eq!(next.num_layers(), 1);
        assert_eq!(next.layers[0].dims(), [1, 8]);
    }

    #[test]
    fn test_multi_layer_state_shape() {
        let device = device();
        let encoder: Encoder<TestBackend> =
            EncoderConfig::new(10, 8, 4).with_num_layers(3).init(&device);

        let hidden = encoder.consume(&[1, 2, 3], &device);
        assert_eq!(hidden.num_layers(), 3);
        for layer in &hidden.layers {
            assert_eq!(layer.dims(), [1, 8]);
        }
    }

    #[test]
    fn test_decoder_emits_log_probabilities() {
        let device = device();
        let decoder: Decoder<TestBackend> =
            DecoderConfig::new(6, 8, 4).init(&device);

        let hidden = HiddenState::zeros(1, 8, &device);
        let (log_probs, _) = decoder.advance(2, hidden);
        assert_eq!(log_probs.dims(), [1, 6]);

        // exp of a log-softmax row must sum to one
        let probs: Vec<f32> = log_probs.exp().into_data().to_vec::<f32>().unwrap();
        let total: f32 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-4, "probabilities sum to {}", total);
        assert!(probs.iter().all(|&p| p > 0.0));
    }

    #[test]
    fn test_advance_is_deterministic() {
        let device = device();
        let decoder: Decoder<TestBackend> =
            DecoderConfig::new(5, 4, 3).init(&device);

        let (a, _) = decoder.advance(2, HiddenState::zeros(1, 4, &device));
        let (b, _) = decoder.advance(2, HiddenState::zeros(1, 4, &device));
        assert_eq!(a.into_data(), b.into_data());
    }

    #[test]
    fn test_consume_threads_state_forward() {
        let device = device();
        let encoder: Encoder<TestBackend> =
            EncoderConfig::new(10, 8, 4).init(&device);

        // Consuming different sequences must leave different states
        let short = encoder.consume(&[1], &device);
        let long = encoder.consume(&[1, 2], &device);
        assert_ne!(
            short.layers[0].clone().into_data(),
            long.layers[0].clone().into_data(),
        );
    }
}
