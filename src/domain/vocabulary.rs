// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// A bidirectional mapping between dense 0-based token ids and
// surface tokens. Two entries are reserved at construction:
//
//   <GO>  = 0   marks the start of a decoded sequence
//   <EOS> = 1   marks the end of a decoded sequence
//
// Regular tokens are interned in encounter order starting at
// id 2, so ids stay dense and the two maps stay exact inverses.
//
// Reference: Rust Book §8 (HashMaps)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Surface form of the start-of-sequence marker
pub const GO_TOKEN: &str = "<GO>";

/// Surface form of the end-of-sequence marker
pub const EOS_TOKEN: &str = "<EOS>";

/// Bidirectional id <-> token table for one language side.
///
/// Invariant: `vocab2id[id2vocab[id]] == id` for every id in
/// `0..len()`. The size is fixed once the corpus is built —
/// nothing interns new tokens after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// id → token (index is the id)
    id2vocab: Vec<String>,

    /// token → id
    vocab2id: HashMap<String, usize>,
}

impl Vocabulary {
    /// Create a vocabulary containing only the two reserved markers.
    pub fn new() -> Self {
        let mut vocab = Self {
            id2vocab: Vec::new(),
            vocab2id: HashMap::new(),
        };
        // Reserved ids: <GO> gets 0, <EOS> gets 1
        vocab.intern(GO_TOKEN);
        vocab.intern(EOS_TOKEN);
        vocab
    }

    /// Return the id for `token`, interning it if unseen.
    /// Ids are handed out densely in encounter order.
    pub fn intern(&mut self, token: &str) -> usize {
        if let Some(&id) = self.vocab2id.get(token) {
            return id;
        }
        let id = self.id2vocab.len();
        self.id2vocab.push(token.to_string());
        self.vocab2id.insert(token.to_string(), id);
        id
    }

    /// Look up the id of an already-interned token.
    pub fn id_of(&self, token: &str) -> Option<usize> {
        self.vocab2id.get(token).copied()
    }

    /// Look up the surface token for an id.
    pub fn token_of(&self, id: usize) -> Option<&str> {
        self.id2vocab.get(id).map(String::as_str)
    }

    /// Id of the start-of-sequence marker (always 0).
    pub fn go_id(&self) -> usize {
        self.vocab2id[GO_TOKEN]
    }

    /// Id of the end-of-sequence marker (always 1).
    pub fn eos_id(&self) -> usize {
        self.vocab2id[EOS_TOKEN]
    }

    /// Number of distinct tokens, reserved markers included.
    pub fn len(&self) -> usize {
        self.id2vocab.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id2vocab.is_empty()
    }

    /// Render a token-id sequence as a human-readable string,
    /// one surface token per id, joined by spaces.
    /// Ids outside the table render as the <EOS> marker rather
    /// than panicking — the corpus never produces them.
    pub fn render(&self, ids: &[usize]) -> String {
        ids.iter()
            .map(|&id| self.token_of(id).unwrap_or(EOS_TOKEN))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_ids() {
        let vocab = Vocabulary::new();
        assert_eq!(vocab.go_id(), 0);
        assert_eq!(vocab.eos_id(), 1);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_intern_is_stable() {
        let mut vocab = Vocabulary::new();
        let a = vocab.intern("a");
        let b = vocab.intern("b");
        // Re-interning must return the same id, not a new one
        assert_eq!(vocab.intern("a"), a);
        assert_eq!((a, b), (2, 3));
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    fn test_maps_are_exact_inverses() {
        let mut vocab = Vocabulary::new();
        for token in ["x", "y", "z", " "] {
            vocab.intern(token);
        }
        for id in 0..vocab.len() {
            let token = vocab.token_of(id).unwrap();
            assert_eq!(vocab.id_of(token), Some(id));
        }
    }

    #[test]
    fn test_render_joins_with_spaces() {
        let mut vocab = Vocabulary::new();
        vocab.intern("a");
        vocab.intern("b");
        assert_eq!(vocab.render(&[2, 3, 2]), "a b a");
        assert_eq!(vocab.render(&[]), "");
    }
}
