//! Engine Configuration
//!
//! Every timing and economic constant the round engine uses is injected
//! through `GameConfig` so the state machine can be driven by a virtual
//! clock in tests. Nothing in `game/` reads wall-clock time or hard-codes
//! a rate.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{to_fixed, Fixed, FIXED_ONE};

/// Crash-point distribution strategy.
///
/// The instant-crash branch (see [`GameConfig::instant_bps`]) applies to
/// both variants; the distribution only decides the non-instant outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashDistribution {
    /// Heavy-tailed inverse-uniform: `floor((1 / (1 - r)) * 100) / 100`.
    /// Most rounds crash low, rare rounds climb very high;
    /// `P(crash >= m) ~ 1/m`.
    InverseUniform,
    /// Every non-instant round crashes at a fixed multiplier.
    /// Used for rehearsal/demo builds and tests.
    Pinned(Fixed),
}

/// Configuration for the round engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Tick period in milliseconds. Only the session driver reads this;
    /// the engine itself counts ticks.
    pub tick_ms: u64,
    /// Multiplier growth per tick, in basis points (100 = +1% per tick).
    pub growth_bps: u32,
    /// Waiting-phase countdown length in ticks.
    pub countdown_ticks: u32,
    /// Crashed-phase cool-down length in ticks.
    pub cooldown_ticks: u32,
    /// Probability of an instant 1.00x crash, in basis points (100 = 1%).
    pub instant_bps: u32,
    /// Maximum number of past crash points kept.
    pub history_capacity: usize,
    /// Player balance at session start.
    pub starting_balance: Fixed,
    /// Crash-point distribution.
    pub distribution: CrashDistribution,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            growth_bps: 100,         // +1% per tick
            countdown_ticks: 200,    // 10 seconds at 50ms
            cooldown_ticks: 40,      // 2 seconds at 50ms
            instant_bps: 100,        // 1% instant crash
            history_capacity: 10,
            starting_balance: to_fixed(3000.0),
            distribution: CrashDistribution::InverseUniform,
        }
    }
}

impl GameConfig {
    /// Remaining countdown in whole seconds, rounded up, for display.
    pub fn ticks_to_secs(&self, ticks: u32) -> u32 {
        let ms = ticks as u64 * self.tick_ms;
        ms.div_ceil(1000) as u32
    }
}

// Compile-time style sanity: the default multiplier floor.
const _: () = assert!(FIXED_ONE == 100);
