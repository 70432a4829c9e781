// ============================================================
// Layer 3 — SentencePair Domain Type
// ============================================================
// One aligned line pair from the parallel corpora: the same
// sentence expressed in the source language and the target
// language. Plain data — by the time a SentencePair exists the
// text has already been read off disk, but not yet tokenised.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A raw aligned translation pair, before tokenisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentencePair {
    /// Source-language sentence, exactly as read from disk
    pub source: String,

    /// Target-language sentence from the matching line
    pub target: String,
}

impl SentencePair {
    /// Create a new SentencePair.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True when either side carries no text at all.
    /// Such pairs are skipped by the loader.
    pub fn has_empty_side(&self) -> bool {
        self.source.is_empty() || self.target.is_empty()
    }
}
