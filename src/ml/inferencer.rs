// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Greedy autoregressive generation with the trained networks.
// No teacher forcing here: after the <GO> seed, the decoder is
// fed its own previous argmax prediction.
//
// The generation loop is bounded with an explicit termination
// predicate — it stops on the first <EOS> prediction or once
// max_len tokens have been generated, whichever comes first.
// Every call starts fresh and returns a finite Vec.
//
// Runs on the inner (non-autodiff) backend: the trainer hands
// over `model.valid()` copies, so no gradient bookkeeping is
// paid during generation.
//
// Reference: Burn Book §5 (Inference)

use burn::prelude::*;

use crate::domain::traits::Translator;
use crate::ml::model::{Decoder, DecoderStep, Encoder, HiddenState};

/// Greedy translation with a trained encoder/decoder pair.
pub struct Inferencer<B: Backend> {
    encoder: Encoder<B>,
    decoder: Decoder<B>,
    go_id: usize,
    eos_id: usize,
    max_len: usize,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(
        encoder: Encoder<B>,
        decoder: Decoder<B>,
        go_id: usize,
        eos_id: usize,
        max_len: usize,
        device: B::Device,
    ) -> Self {
        Self { encoder, decoder, go_id, eos_id, max_len, device }
    }
}

impl<B: Backend> Translator for Inferencer<B> {
    /// ENCODE the source exactly as in training, then generate.
    fn translate(&self, source_ids: &[usize]) -> Vec<usize> {
        let hidden = self.encoder.consume(source_ids, &self.device);
        greedy_decode(&self.decoder, hidden, self.go_id, self.eos_id, self.max_len)
    }
}

/// The bounded greedy loop. Seeds the decoder with <GO>, then
/// repeatedly advances it on its own previous prediction. The
/// returned sequence never contains the <EOS> id and never
/// exceeds `max_len` tokens.
pub fn greedy_decode<B: Backend, D: DecoderStep<B>>(
    decoder: &D,
    hidden: HiddenState<B>,
    go_id: usize,
    eos_id: usize,
    max_len: usize,
) -> Vec<usize> {
    let mut generated = Vec::new();
    let mut token = go_id;
    let mut hidden = hidden;

    while generated.len() < max_len {
        let (log_probs, next_hidden) = decoder.advance(token, hidden);
        hidden = next_hidden;

        let predicted = log_probs.argmax(1).into_scalar().elem::<i64>() as usize;
        if predicted == eos_id {
            break;
        }
        generated.push(predicted);
        token = predicted;
    }

    generated
}
