//! # Aviator Engine
//!
//! Deterministic round engine for a crash-style multiplier game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      AVIATOR ENGINE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Decimal fixed-point (hundredths)          │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for replay verification     │
//! │                                                              │
//! │  game/           - Round engine (deterministic)              │
//! │  ├── config.rs   - Injectable timing/economic constants      │
//! │  ├── crash.rs    - Crash-point generation                    │
//! │  ├── state.rs    - Round phase, round, session state         │
//! │  ├── tick.rs     - Authoritative transition function         │
//! │  ├── wager.rs    - Balance, bets, cash-out                   │
//! │  ├── history.rs  - Bounded recent-rounds record              │
//! │  └── events.rs   - Discrete events for presentation          │
//! │                                                              │
//! │  session/        - Async driver (non-deterministic)          │
//! │  └── mod.rs      - Tokio task, commands, event fan-out       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No floating-point arithmetic in game logic
//! - No system time dependencies (the engine counts ticks)
//! - All randomness from seeded Xorshift128+
//!
//! Given the same seed and configuration, replaying the same number of
//! ticks with the same command schedule produces an **identical** event
//! stream, history, and state hash on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use crate::core::fixed::{Fixed, FIXED_ONE, FIXED_SCALE};
pub use crate::core::rng::{derive_session_seed, DeterministicRng};
pub use game::{
    CrashDistribution, GameConfig, GameEvent, GameEventData, GameState, RoundPhase, WagerError,
};
pub use session::{GameSession, SessionError, SessionHandle, Snapshot};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
