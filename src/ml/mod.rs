// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn's nn/optim modules —
// only this one.
//
// What's in this layer:
//
//   model.rs      — The two recurrent networks
//                   • Encoder: embedding → GRU stack; reads the
//                     source sequence one token at a time into a
//                     hidden state
//                   • Decoder: embedding → GRU stack → linear
//                     projection → log-softmax over the target
//                     vocabulary
//                   • HiddenState: the per-layer recurrent memory
//                     threaded between steps
//
//   trainer.rs    — The per-example training loop
//                   Encode, teacher-forced decode with summed
//                   negative-log-likelihood, one backward pass,
//                   one SGD step per network
//
//   inferencer.rs — Greedy autoregressive generation
//                   Feeds the decoder its own argmax prediction
//                   until <EOS> or the length cap
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Cho et al. (2014) Learning Phrase Representations
//            using RNN Encoder-Decoder
//            Sutskever et al. (2014) Sequence to Sequence Learning

/// Encoder and decoder network architectures
pub mod model;

/// Per-example training loop with loss/accuracy bookkeeping
pub mod trainer;

/// Greedy decoding — translates one source sequence
pub mod inferencer;
