//! Game Logic Module
//!
//! The round engine. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `config`: injectable timing and economic constants
//! - `crash`: crash-point generation
//! - `state`: round phase, round, and session state
//! - `tick`: authoritative transition function
//! - `wager`: balance, bet placement, cash-out
//! - `history`: bounded recent-rounds record
//! - `events`: discrete events for the presentation layer

pub mod config;
pub mod crash;
pub mod events;
pub mod history;
pub mod state;
pub mod tick;
pub mod wager;

// Re-export key types
pub use config::{CrashDistribution, GameConfig};
pub use events::{GameEvent, GameEventData};
pub use history::HistoryLog;
pub use state::{GameState, Round, RoundPhase};
pub use tick::TickResult;
pub use wager::{WagerError, WagerState};
