// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or tensor math
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no GPU needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Bidirectional token-id <-> surface-token mapping with the
// reserved start/end-of-sequence entries
pub mod vocabulary;

// One raw aligned sentence pair, before tokenisation
pub mod sentence;

// One aligned pair of token-id sequences
pub mod example;

// Core abstractions (traits) that other layers implement
pub mod traits;
