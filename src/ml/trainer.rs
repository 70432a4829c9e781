// ============================================================
// Layer 5 — Training Loop
// ============================================================
// One gradient update per example, `n_iter` examples per epoch.
// Each example walks the same state machine:
//
//   INIT    zero hidden state        (Encoder::consume)
//   ENCODE  read every source token  (Encoder::consume)
//   DECODE  teacher-forced steps, summed NLL
//   UPDATE  one backward pass, one SGD step per network
//
// Key Burn insight:
//   - Gradients exist per backward() call, so there is no stale
//     gradient to zero before the next example
//   - One backward pass serves both networks: GradientsParams
//     extracts each module's slice of the same gradient set
//
// The summed loss drives the gradient; the history, CSV and
// console only ever see the per-token average. Keeping the two
// apart changes the effective step size per example length, so
// both forms are computed exactly where they are used.
//
// Reference: Burn Book §5, Sutskever et al. (2014)

use anyhow::Result;
use burn::{
    optim::{GradientsParams, Optimizer, SgdConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use rand::Rng;

use crate::application::train_use_case::TrainConfig;
use crate::data::sampler::{ExampleSampler, TrainingTriple};
use crate::infra::metrics::{LossHistory, MetricsLogger};
use crate::ml::model::{Decoder, DecoderConfig, Encoder, EncoderConfig};

/// What one processed example reports back to the epoch loop.
pub struct ExampleStats {
    /// NLL summed over every decode position (the backward input)
    pub summed_loss: f64,

    /// Number of decode positions — always the full
    /// decoder_inputs length, never a partial decode
    pub decode_steps: usize,

    /// How many positions the argmax already gets right.
    /// Bookkeeping only — gradients never see this.
    pub correct: usize,
}

impl ExampleStats {
    pub fn average_loss(&self) -> f64 {
        self.summed_loss / self.decode_steps as f64
    }

    pub fn accuracy(&self) -> f64 {
        self.correct as f64 / self.decode_steps as f64
    }
}

/// The trained networks plus the full loss trajectory.
pub struct TrainedNetworks<B: AutodiffBackend> {
    pub encoder: Encoder<B>,
    pub decoder: Decoder<B>,
    pub history: LossHistory,
}

/// Forward pass over one example: ENCODE then teacher-forced
/// DECODE. Returns the summed-NLL loss tensor over the FULL
/// decode sequence and the argmax-correct count.
fn teacher_forced_loss<B: Backend>(
    encoder: &Encoder<B>,
    decoder: &Decoder<B>,
    triple: &TrainingTriple,
    device: &B::Device,
) -> (Tensor<B, 1>, usize) {
    // The terminal encoder state is the decoder's initial state —
    // the sole channel carrying source information forward.
    let mut hidden = encoder.consume(&triple.encoder_inputs, device);

    let mut loss: Tensor<B, 1> = Tensor::zeros([1], device);
    let mut correct = 0usize;

    for (&input_id, &target_id) in triple
        .decoder_inputs
        .iter()
        .zip(triple.decoder_targets.iter())
    {
        let (log_probs, next_hidden) = decoder.advance(input_id, hidden);
        hidden = next_hidden;

        let predicted: i64 = log_probs.clone().argmax(1).into_scalar().elem::<i64>();
        if predicted as usize == target_id {
            correct += 1;
        }

        // NLL of the known next token under the returned
        // distribution, summed (not averaged) across positions
        let target =
            Tensor::<B, 1, Int>::from_ints([target_id as i32], device).reshape([1, 1]);
        let step_nll = log_probs.gather(1, target).neg().reshape([1]);
        loss = loss + step_nll;
    }

    (loss, correct)
}

/// The summed per-example NLL without any parameter update.
/// Used to probe a network's loss on a fixed example.
pub fn example_loss<B: Backend>(
    encoder: &Encoder<B>,
    decoder: &Decoder<B>,
    triple: &TrainingTriple,
    device: &B::Device,
) -> f64 {
    let (loss, _) = teacher_forced_loss(encoder, decoder, triple, device);
    loss.into_scalar().elem::<f64>()
}

/// Process one example end to end: forward, loss, backward, one
/// optimizer step per network. Takes and returns the networks by
/// value because Burn's Optimizer::step consumes the module.
pub fn train_example<B, OE, OD>(
    encoder: Encoder<B>,
    decoder: Decoder<B>,
    encoder_optim: &mut OE,
    decoder_optim: &mut OD,
    triple: &TrainingTriple,
    lr: f64,
    device: &B::Device,
) -> (Encoder<B>, Decoder<B>, ExampleStats)
where
    B: AutodiffBackend,
    OE: Optimizer<Encoder<B>, B>,
    OD: Optimizer<Decoder<B>, B>,
{
    let (loss, correct) = teacher_forced_loss(&encoder, &decoder, triple, device);

    let stats = ExampleStats {
        summed_loss: loss.clone().into_scalar().elem::<f64>(),
        decode_steps: triple.decoder_inputs.len(),
        correct,
    };

    // One backward over the summed loss; each network then gets
    // its own slice of the gradients and its own SGD step
    let mut grads = loss.backward();
    let encoder_grads = GradientsParams::from_module(&mut grads, &encoder);
    let decoder_grads = GradientsParams::from_module(&mut grads, &decoder);

    let encoder = encoder_optim.step(lr, encoder, encoder_grads);
    let decoder = decoder_optim.step(lr, decoder, decoder_grads);

    (encoder, decoder, stats)
}

/// Run the full training schedule: `epochs` epochs of `n_iter`
/// random draws each, one gradient update per draw.
pub fn run_training<B: AutodiffBackend, R: Rng>(
    cfg: &TrainConfig,
    sampler: &mut ExampleSampler<'_, R>,
    metrics: Option<&MetricsLogger>,
    device: &B::Device,
) -> Result<TrainedNetworks<B>> {
    let corpus = sampler.corpus();

    // ── Build the two networks ────────────────────────────────────────────────
    let mut encoder: Encoder<B> = EncoderConfig::new(
        corpus.source.vocabulary.len(),
        cfg.hidden_size,
        cfg.embedding_size,
    )
    .with_num_layers(cfg.num_layers)
    .init(device);

    let mut decoder: Decoder<B> = DecoderConfig::new(
        corpus.target.vocabulary.len(),
        cfg.hidden_size,
        cfg.embedding_size,
    )
    .with_num_layers(cfg.num_layers)
    .init(device);

    tracing::info!(
        "Networks ready: hidden={}, embedding={}, layers={}, vocab {}→{}",
        cfg.hidden_size,
        cfg.embedding_size,
        cfg.num_layers,
        corpus.source.vocabulary.len(),
        corpus.target.vocabulary.len(),
    );

    // ── Two independent SGD optimisers, same fixed rate ───────────────────────
    // θ = θ - lr * g
    let mut encoder_optim = SgdConfig::new().init();
    let mut decoder_optim = SgdConfig::new().init();

    let mut history = LossHistory::new();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        for triple in sampler.stream(cfg.n_iter) {
            let (next_encoder, next_decoder, stats) = train_example(
                encoder,
                decoder,
                &mut encoder_optim,
                &mut decoder_optim,
                &triple,
                cfg.lr,
                device,
            );
            encoder = next_encoder;
            decoder = next_decoder;

            history.push(stats.average_loss());

            if let Some(logger) = metrics {
                logger.log_iteration(
                    history.len(),
                    stats.average_loss(),
                    history.min_loss(),
                    stats.accuracy(),
                )?;
            }

            // Progress line every log_every TOTAL iterations,
            // counted across epochs
            if history.should_report(cfg.log_every) {
                println!(
                    "Epoch {:>2}/{} | iter {:>4} | loss={:.4} | min_loss={:.4}",
                    epoch,
                    cfg.epochs,
                    history.len() % cfg.n_iter,
                    stats.average_loss(),
                    history.min_loss(),
                );
            }
        }
    }

    tracing::info!("Training complete: {} iterations", history.len());

    Ok(TrainedNetworks { encoder, decoder, history })
}
