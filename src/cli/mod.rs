// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// One command is supported:
//   `train` — trains the model on two parallel text files and
//             prints a greedy demo translation at the end
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "seq2seq-translate",
    version = "0.1.0",
    about = "Train a character-level GRU translation model on parallel text, then translate a sample sentence."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!(
            "Starting training on '{}' / '{}'",
            args.source_file,
            args.target_file,
        );

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training and demo translation complete.");
        Ok(())
    }
}
