// ============================================================
// Layer 3 — TranslationExample Domain Type
// ============================================================
// One tokenised training example: the source sentence and its
// aligned target sentence as token-id sequences. The two sides
// express the same sentence but need not have equal length.
//
// Ids index into the owning corpus side's Vocabulary and are
// guaranteed in range by construction — the networks treat an
// out-of-range id as a precondition violation, not an error.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// An aligned pair of token-id sequences. Immutable once the
/// corpus is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationExample {
    /// Source-side token ids, fed to the encoder unchanged
    pub source_ids: Vec<usize>,

    /// Target-side token ids, without <GO>/<EOS> markers —
    /// the sampler adds those when it builds a training triple
    pub target_ids: Vec<usize>,
}

impl TranslationExample {
    pub fn new(source_ids: Vec<usize>, target_ids: Vec<usize>) -> Self {
        Self { source_ids, target_ids }
    }
}
