// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full pipeline in order:
//
//   Step 1: Load aligned sentence pairs   (Layer 4 - data)
//   Step 2: Tokenise, build the corpus    (Layer 4 - data)
//   Step 3: Create the example sampler    (Layer 4 - data)
//   Step 4: Open the metrics run record   (Layer 6 - infra)
//   Step 5: Run the training loop         (Layer 5 - ml)
//   Step 6: Greedy-translate one example  (Layer 5 - ml)
//   Step 7: Print source and prediction
//
// Everything with state — networks, optimizers, the loss
// history — is constructed here or below here, never ambient:
// two TrainUseCases in one process are fully independent.
//
// Reference: Burn Book §5 (Training)
//            Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use burn::module::AutodiffModule;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::ParallelTextLoader,
    sampler::ExampleSampler,
    tokenizer::CharTokenizer,
};
use crate::domain::traits::{CorpusSource, Translator};
use crate::infra::metrics::MetricsLogger;
use crate::ml::{inferencer::Inferencer, trainer::run_training};

// Training runs on the autodiff-wrapped WGPU backend; the demo
// translation uses the valid() copies on the inner backend.
type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for one run. Serialisable so the metrics
// logger can snapshot it next to the CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub source_file: String,
    pub target_file: String,
    pub metrics_dir: String,
    pub epochs: usize,
    pub n_iter: usize,
    pub hidden_size: usize,
    pub embedding_size: usize,
    pub num_layers: usize,
    pub lr: f64,
    pub max_gen_len: usize,
    pub log_every: usize,
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            source_file: "data/eng.txt".to_string(),
            target_file: "data/fra.txt".to_string(),
            metrics_dir: "metrics".to_string(),
            epochs: 30,
            n_iter: 500,
            hidden_size: 512,
            embedding_size: 300,
            num_layers: 1,
            lr: 1e-3,
            max_gen_len: 20,
            log_every: 50,
            seed: None,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full train-then-translate pipeline.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load aligned sentence pairs ───────────────────────────────
        let loader = ParallelTextLoader::new(&cfg.source_file, &cfg.target_file);
        let pairs = loader.load_all()?;
        anyhow::ensure!(!pairs.is_empty(), "corpus is empty — nothing to train on");

        // ── Step 2: Tokenise and build the two-sided corpus ───────────────────
        let corpus = CharTokenizer::build_corpus(&pairs);

        // ── Step 3: Example sampler ───────────────────────────────────────────
        // A fixed seed makes example selection reproducible
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut sampler = ExampleSampler::new(&corpus, rng);

        // ── Step 4: Metrics / run record ──────────────────────────────────────
        let metrics = MetricsLogger::new(&cfg.metrics_dir)?;
        metrics.save_config(cfg)?;

        // ── Step 5: Run the training loop (Layer 5) ───────────────────────────
        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        let trained =
            run_training::<TrainBackend, _>(cfg, &mut sampler, Some(&metrics), &device)?;

        // ── Step 6: Greedy-translate one fresh example ────────────────────────
        // Drawn from the same sampler the trainer used, after
        // training finished
        let demo = sampler
            .stream(1)
            .next()
            .expect("a stream of one triple yields one triple");

        let inferencer = Inferencer::new(
            trained.encoder.valid(),
            trained.decoder.valid(),
            corpus.target.vocabulary.go_id(),
            corpus.target.vocabulary.eos_id(),
            cfg.max_gen_len,
            device,
        );
        let predicted = inferencer.translate(&demo.encoder_inputs);

        // ── Step 7: Render both sentences ─────────────────────────────────────
        println!("{}", corpus.source.vocabulary.render(&demo.encoder_inputs));
        println!("{}", corpus.target.vocabulary.render(&predicted));

        Ok(())
    }
}
