//! Domain layer - Core pricing math.
//!
//! Pure LMSR kernel: no logging, no I/O, no shared state.
//! All types are serializable and testable in isolation.

pub mod lmsr;

// Re-export core types for convenience
pub use lmsr::{LmsrModel, PriceBounds};
