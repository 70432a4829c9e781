// ============================================================
// Layer 4 — Character Tokenizer
// ============================================================
// Turns aligned SentencePairs into the two-sided ParallelCorpus
// the sampler and networks consume.
//
// Tokenisation is character level: every distinct character on
// a side (spaces included) becomes one vocabulary entry. Each
// side gets its OWN vocabulary — source and target languages do
// not share ids. Characters are interned in encounter order, so
// ids are dense and start right after the reserved markers:
//
//   <GO> = 0, <EOS> = 1, first seen char = 2, next = 3, ...
//
// The encoded sequences carry no markers; the sampler adds
// <GO>/<EOS> when it builds decoder inputs and targets.
//
// Reference: Rust Book §8 (Strings and Chars)

use crate::data::corpus::{Corpus, ParallelCorpus};
use crate::domain::sentence::SentencePair;
use crate::domain::vocabulary::Vocabulary;

/// Builds character vocabularies and id sequences from raw pairs.
pub struct CharTokenizer;

impl CharTokenizer {
    /// Encode every pair, building both corpus sides in one pass.
    pub fn build_corpus(pairs: &[SentencePair]) -> ParallelCorpus {
        let mut source_vocab = Vocabulary::new();
        let mut target_vocab = Vocabulary::new();
        let mut source_ids = Vec::with_capacity(pairs.len());
        let mut target_ids = Vec::with_capacity(pairs.len());

        for pair in pairs {
            source_ids.push(encode_line(&pair.source, &mut source_vocab));
            target_ids.push(encode_line(&pair.target, &mut target_vocab));
        }

        tracing::info!(
            "Built corpus: {} examples, {} source tokens, {} target tokens",
            pairs.len(),
            source_vocab.len(),
            target_vocab.len(),
        );

        ParallelCorpus::new(
            Corpus::new(source_vocab, source_ids),
            Corpus::new(target_vocab, target_ids),
        )
    }
}

/// Encode one line, interning unseen characters as it goes.
fn encode_line(line: &str, vocab: &mut Vocabulary) -> Vec<usize> {
    line.chars()
        .map(|c| vocab.intern(&c.to_string()))
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_encounter_order() {
        let pairs = vec![SentencePair::new("ab", "ba")];
        let corpus = CharTokenizer::build_corpus(&pairs);

        // Source side: 'a' seen first → 2, 'b' → 3
        assert_eq!(corpus.source.text_as_ids[0], vec![2, 3]);
        // Target side has its own table: 'b' seen first → 2
        assert_eq!(corpus.target.text_as_ids[0], vec![2, 3]);
        assert_eq!(corpus.target.vocabulary.token_of(2), Some("b"));
    }

    #[test]
    fn test_round_trip_through_vocabulary() {
        let pairs = vec![SentencePair::new("hi there", "la bas")];
        let corpus = CharTokenizer::build_corpus(&pairs);

        let decoded: String = corpus.source.text_as_ids[0]
            .iter()
            .map(|&id| corpus.source.vocabulary.token_of(id).unwrap())
            .collect();
        assert_eq!(decoded, "hi there");
    }

    #[test]
    fn test_repeated_characters_share_one_id() {
        let pairs = vec![SentencePair::new("aaa", "bb")];
        let corpus = CharTokenizer::build_corpus(&pairs);
        assert_eq!(corpus.source.text_as_ids[0], vec![2, 2, 2]);
        // <GO>, <EOS>, 'a' — nothing else
        assert_eq!(corpus.source.vocabulary.len(), 3);
    }
}
