// ============================================================
// Layer 6 — Metrics
// ============================================================
// Two pieces:
//
//   LossHistory   — the append-only sequence of per-example
//                   average losses, one entry per training
//                   iteration. Owns the "when do we print a
//                   progress line" cadence predicate.
//
//   MetricsLogger — writes one CSV row per iteration plus a
//                   JSON snapshot of the run configuration.
//
// Example CSV output:
//   iteration,avg_loss,min_loss,accuracy
//   1,1.386294,1.386294,0.333333
//   2,1.384120,1.384120,0.333333
//   ...
//
// The CSV is the data feed for out-of-process plotting — no
// chart is rendered here.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::application::train_use_case::TrainConfig;

// ─── LossHistory ──────────────────────────────────────────────────────────────
/// Append-only record of per-example average losses.
/// Its length doubles as the total-iteration counter.
#[derive(Debug, Clone, Default)]
pub struct LossHistory {
    losses: Vec<f64>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self { losses: Vec::new() }
    }

    /// Record one iteration's per-token-average loss.
    pub fn push(&mut self, average_loss: f64) {
        self.losses.push(average_loss);
    }

    /// Total iterations seen so far, across all epochs.
    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    /// The most recently recorded loss.
    pub fn latest(&self) -> Option<f64> {
        self.losses.last().copied()
    }

    /// The minimum per-example average loss seen so far.
    /// Infinite on an empty history — callers only ask after
    /// at least one push.
    pub fn min_loss(&self) -> f64 {
        self.losses.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// True exactly when a progress line is due: every
    /// `interval` total iterations.
    pub fn should_report(&self, interval: usize) -> bool {
        interval > 0 && !self.is_empty() && self.len() % interval == 0
    }

    /// The full trajectory, oldest first.
    pub fn values(&self) -> &[f64] {
        &self.losses
    }
}

// ─── MetricsLogger ────────────────────────────────────────────────────────────
/// Logs per-iteration metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,

    /// Directory holding the CSV and the config snapshot
    dir: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header, replacing any previous run's file.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("training_loss.csv");
        let mut f = fs::File::create(&csv_path)?;
        writeln!(f, "iteration,avg_loss,min_loss,accuracy")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path, dir })
    }

    /// Append one iteration's metrics as a new CSV row.
    pub fn log_iteration(
        &self,
        iteration: usize,
        avg_loss: f64,
        min_loss: f64,
        accuracy: f64,
    ) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{:.6},{:.6},{:.6}",
            iteration, avg_loss, min_loss, accuracy,
        )?;
        Ok(())
    }

    /// Write a JSON snapshot of the run configuration next to
    /// the CSV, so a run's numbers can always be traced back to
    /// the hyperparameters that produced them.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("run_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)?;
        tracing::debug!("Saved run config: '{}'", path.display());
        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_cadence() {
        let mut history = LossHistory::new();
        for _ in 0..49 {
            history.push(1.0);
        }
        // After 49 iterations: no progress line yet
        assert!(!history.should_report(50));

        history.push(1.0);
        // After exactly 50: one is due
        assert!(history.should_report(50));

        history.push(1.0);
        assert!(!history.should_report(50));
    }

    #[test]
    fn test_empty_history_never_reports() {
        let history = LossHistory::new();
        assert!(!history.should_report(50));
        assert!(!history.should_report(0));
    }

    #[test]
    fn test_min_and_latest_track_pushes() {
        let mut history = LossHistory::new();
        history.push(2.0);
        history.push(0.5);
        history.push(1.5);
        assert_eq!(history.latest(), Some(1.5));
        assert_eq!(history.min_loss(), 0.5);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_csv_gets_one_row_per_iteration() {
        let dir = std::env::temp_dir().join(format!(
            "seq2seq-metrics-{}",
            std::process::id()
        ));
        let logger = MetricsLogger::new(dir.to_str().unwrap()).unwrap();
        logger.log_iteration(1, 1.5, 1.5, 0.0).unwrap();
        logger.log_iteration(2, 1.2, 1.2, 0.5).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "iteration,avg_loss,min_loss,accuracy");
        assert!(lines[1].starts_with("1,1.5"));
    }
}
