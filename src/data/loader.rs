// ============================================================
// Layer 4 — Parallel Text Loader
// ============================================================
// Reads two plain-text files where line i of the source file is
// the translation of line i of the target file. Produces the
// aligned SentencePair list the tokenizer consumes.
//
// Alignment is positional, so the two files MUST have the same
// number of lines — a mismatch means the corpora are not really
// parallel and loading fails outright. A pair where one side is
// empty is skipped with a warning instead: the decoder has
// nothing to predict for it and the encoder nothing to read.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::sentence::SentencePair;
use crate::domain::traits::CorpusSource;

/// Loads aligned sentence pairs from two line-aligned files.
/// Implements the CorpusSource trait from Layer 3.
pub struct ParallelTextLoader {
    /// Path to the source-language file
    source_path: String,

    /// Path to the target-language file
    target_path: String,
}

impl ParallelTextLoader {
    /// Create a new loader pointed at two parallel files
    pub fn new(source_path: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
        }
    }
}

impl CorpusSource for ParallelTextLoader {
    fn load_all(&self) -> Result<Vec<SentencePair>> {
        let source_lines = read_lines(&self.source_path)?;
        let target_lines = read_lines(&self.target_path)?;

        // Positional alignment only works if the files agree on length
        if source_lines.len() != target_lines.len() {
            anyhow::bail!(
                "Corpora are not aligned: '{}' has {} lines, '{}' has {}",
                self.source_path,
                source_lines.len(),
                self.target_path,
                target_lines.len(),
            );
        }

        let mut pairs = Vec::with_capacity(source_lines.len());

        for (line_no, (source, target)) in
            source_lines.into_iter().zip(target_lines).enumerate()
        {
            let pair = SentencePair::new(source, target);

            // Log a warning but continue — don't fail on one bad line
            if pair.has_empty_side() {
                tracing::warn!("Skipping empty pair at line {}", line_no + 1);
                continue;
            }
            pairs.push(pair);
        }

        tracing::info!(
            "Loaded {} aligned sentence pairs from '{}' / '{}'",
            pairs.len(),
            self.source_path,
            self.target_path,
        );
        Ok(pairs)
    }
}

/// Read one file into trimmed lines.
fn read_lines(path: &str) -> Result<Vec<String>> {
    let text = fs::read_to_string(Path::new(path))
        .with_context(|| format!("Cannot read corpus file '{}'", path))?;
    Ok(text.lines().map(|l| l.trim_end().to_string()).collect())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Write `contents` to a unique file under the OS temp dir.
    fn temp_file(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!(
            "seq2seq-loader-{}-{}",
            std::process::id(),
            name
        ));
        let mut f = fs::File::create(&path).unwrap();
        write!(f, "{}", contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_loads_aligned_pairs() {
        let src = temp_file("src-ok", "hello\nworld\n");
        let tgt = temp_file("tgt-ok", "bonjour\nmonde\n");
        let pairs = ParallelTextLoader::new(&src, &tgt).load_all().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].source, "hello");
        assert_eq!(pairs[0].target, "bonjour");
        assert_eq!(pairs[1].target, "monde");
    }

    #[test]
    fn test_rejects_mismatched_line_counts() {
        let src = temp_file("src-bad", "one\ntwo\nthree\n");
        let tgt = temp_file("tgt-bad", "un\ndeux\n");
        assert!(ParallelTextLoader::new(&src, &tgt).load_all().is_err());
    }

    #[test]
    fn test_skips_empty_sided_pairs() {
        let src = temp_file("src-empty", "one\n\nthree\n");
        let tgt = temp_file("tgt-empty", "un\ndeux\ntrois\n");
        let pairs = ParallelTextLoader::new(&src, &tgt).load_all().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].source, "three");
    }
}
