// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// the one goal of the program: train a translation model and
// demo-translate a freshly drawn example.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No argument parsing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The train-then-translate workflow
pub mod train_use_case;
