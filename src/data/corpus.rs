// ============================================================
// Layer 4 — Corpus View
// ============================================================
// The tokenised view of one language side (vocabulary + encoded
// lines) and the aligned two-sided ParallelCorpus.
//
// ParallelCorpus implements Burn's Dataset trait so the sampler
// can address examples by index through the same interface the
// rest of the ecosystem uses: get(i) returns translation pair i
// with both sides already encoded.
//
// Invariants, guaranteed at construction and never revisited:
//   - both sides hold the same number of examples
//   - every id in text_as_ids is < its side's vocabulary length
//
// Reference: Burn Book §4 (Datasets)

use burn::data::dataset::Dataset;

use crate::domain::example::TranslationExample;
use crate::domain::vocabulary::Vocabulary;

/// One language side: the fixed vocabulary and every example
/// line encoded as token ids. Immutable once built.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub vocabulary: Vocabulary,
    pub text_as_ids: Vec<Vec<usize>>,
}

impl Corpus {
    pub fn new(vocabulary: Vocabulary, text_as_ids: Vec<Vec<usize>>) -> Self {
        Self { vocabulary, text_as_ids }
    }
}

/// The aligned pair of corpus sides. Example i of `source` and
/// example i of `target` are translations of each other.
#[derive(Debug, Clone)]
pub struct ParallelCorpus {
    pub source: Corpus,
    pub target: Corpus,
}

impl ParallelCorpus {
    /// Pair up two sides. Panics if the sides disagree on the
    /// number of examples — the loader already rejected that,
    /// so getting here with a mismatch is a programming error.
    pub fn new(source: Corpus, target: Corpus) -> Self {
        assert_eq!(
            source.text_as_ids.len(),
            target.text_as_ids.len(),
            "parallel corpus sides must hold the same number of examples",
        );
        Self { source, target }
    }

    pub fn example_count(&self) -> usize {
        self.source.text_as_ids.len()
    }
}

impl Dataset<TranslationExample> for ParallelCorpus {
    fn get(&self, index: usize) -> Option<TranslationExample> {
        let source_ids = self.source.text_as_ids.get(index)?.clone();
        let target_ids = self.target.text_as_ids.get(index)?.clone();
        Some(TranslationExample::new(source_ids, target_ids))
    }

    fn len(&self) -> usize {
        self.example_count()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_corpus() -> ParallelCorpus {
        let mut sv = Vocabulary::new();
        let mut tv = Vocabulary::new();
        let a = sv.intern("a");
        let b = sv.intern("b");
        let x = tv.intern("x");
        ParallelCorpus::new(
            Corpus::new(sv, vec![vec![a, b], vec![b]]),
            Corpus::new(tv, vec![vec![x], vec![x, x]]),
        )
    }

    #[test]
    fn test_dataset_get_pairs_by_index() {
        let corpus = tiny_corpus();
        assert_eq!(corpus.len(), 2);

        let first = corpus.get(0).unwrap();
        assert_eq!(first.source_ids, vec![2, 3]);
        assert_eq!(first.target_ids, vec![2]);
        assert!(corpus.get(2).is_none());
    }

    #[test]
    #[should_panic(expected = "same number of examples")]
    fn test_mismatched_sides_panic() {
        let sv = Vocabulary::new();
        let tv = Vocabulary::new();
        ParallelCorpus::new(
            Corpus::new(sv, vec![vec![0]]),
            Corpus::new(tv, vec![]),
        );
    }
}
