// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - ParallelTextLoader implements CorpusSource
//   - A future TsvLoader could also implement CorpusSource
//   - The application layer only sees CorpusSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::sentence::SentencePair;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce aligned sentence pairs.
///
/// Implementations:
///   - ParallelTextLoader → two line-aligned plain-text files
///   - (future) TsvLoader → one tab-separated file per pair
pub trait CorpusSource {
    /// Load every aligned pair from this source.
    /// Pair i of the result is translation pair i in both corpora.
    fn load_all(&self) -> Result<Vec<SentencePair>>;
}

// ─── Translator ───────────────────────────────────────────────────────────────
/// Any component that can map a source token-id sequence to a
/// predicted target token-id sequence.
///
/// Implementations:
///   - Inferencer → greedy decoding with the trained networks
pub trait Translator {
    /// Translate one source sequence. The result never exceeds
    /// the implementation's generation cap and never contains
    /// the <EOS> id.
    fn translate(&self, source_ids: &[usize]) -> Vec<usize>;
}
