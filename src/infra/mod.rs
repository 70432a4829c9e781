// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   metrics.rs — The append-only loss history plus a CSV logger
//                that records every training iteration (loss,
//                running minimum, accuracy) for later analysis
//                and plotting, and a JSON snapshot of the run's
//                configuration.
//
// There is deliberately NO checkpointing here: the process
// trains, translates one demo example, and exits — nothing is
// persisted except the run record.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Loss history and training metrics CSV logger
pub mod metrics;
