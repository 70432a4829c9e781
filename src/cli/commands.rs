// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `train` subcommand and all its configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the translation model, then translate one sample sentence
    Train(TrainArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Source-language corpus: one sentence per line
    #[arg(long, default_value = "data/eng.txt")]
    pub source_file: String,

    /// Target-language corpus: line i translates line i of the source file
    #[arg(long, default_value = "data/fra.txt")]
    pub target_file: String,

    /// Directory for the metrics CSV and run-config snapshot
    #[arg(long, default_value = "metrics")]
    pub metrics_dir: String,

    /// Number of training epochs (n-iter random draws each)
    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    /// Training iterations per epoch — each is one random example
    /// and one gradient update
    #[arg(long, default_value_t = 500)]
    pub n_iter: usize,

    /// Width of each GRU layer's hidden state
    #[arg(long, default_value_t = 512)]
    pub hidden_size: usize,

    /// Width of the token embedding vectors
    #[arg(long, default_value_t = 300)]
    pub embedding_size: usize,

    /// Number of stacked GRU layers in each network
    #[arg(long, default_value_t = 1)]
    pub num_layers: usize,

    /// Learning rate shared by both SGD optimisers
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Generation cap: greedy decoding stops after this many
    /// tokens even if <EOS> is never predicted
    #[arg(long, default_value_t = 20)]
    pub max_gen_len: usize,

    /// Print a progress line every this many total iterations
    #[arg(long, default_value_t = 50)]
    pub log_every: usize,

    /// Seed for example selection — set for reproducible draws
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            source_file: a.source_file,
            target_file: a.target_file,
            metrics_dir: a.metrics_dir,
            epochs: a.epochs,
            n_iter: a.n_iter,
            hidden_size: a.hidden_size,
            embedding_size: a.embedding_size,
            num_layers: a.num_layers,
            lr: a.lr,
            max_gen_len: a.max_gen_len,
            log_every: a.log_every,
            seed: a.seed,
        }
    }
}
