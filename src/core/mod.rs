//! Core deterministic primitives.
//!
//! All types in this module are designed for perfect cross-platform
//! determinism. They are the foundation that makes a session's crash
//! sequence reproducible from its seed.

pub mod fixed;
pub mod hash;
pub mod rng;

// Re-export core types
pub use fixed::{Fixed, FIXED_ONE, FIXED_SCALE};
pub use hash::compute_state_hash;
pub use rng::DeterministicRng;
