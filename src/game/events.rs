//! Game Events
//!
//! Discrete events generated during simulation, consumed by the session
//! layer for logging and presentation. Per-tick multiplier movement is not
//! an event; renderers read it from the observable state instead.

use serde::{Deserialize, Serialize};

use crate::core::fixed::Fixed;

/// Event data.
///
/// The crash point appears only in `RoundCrashed`: a round's crash point is
/// hidden until the crash reveals it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A new round is armed and its countdown started.
    RoundArmed {
        /// Countdown length in ticks.
        countdown_ticks: u32,
    },

    /// Countdown expired; the multiplier is climbing.
    RoundStarted {
        /// Sequence number of the round (1-based).
        round: u64,
    },

    /// The round crashed.
    RoundCrashed {
        /// Sequence number of the round.
        round: u64,
        /// Terminal multiplier, now public.
        crash_point: Fixed,
    },

    /// A bet was accepted.
    BetPlaced {
        /// Stake amount.
        amount: Fixed,
        /// Balance after the debit.
        balance: Fixed,
    },

    /// The player cashed out before the crash.
    CashedOut {
        /// Credited payout.
        payout: Fixed,
        /// Multiplier the payout locked in.
        multiplier: Fixed,
        /// Balance after the credit.
        balance: Fixed,
    },

    /// The round crashed with an uncollected bet; the stake is lost.
    BetForfeited {
        /// Forfeited stake.
        amount: Fixed,
    },
}

/// A game event with the tick it occurred on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred.
    pub tick: u64,
    /// Event data.
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create a round-armed event.
    pub fn round_armed(tick: u64, countdown_ticks: u32) -> Self {
        Self::new(tick, GameEventData::RoundArmed { countdown_ticks })
    }

    /// Create a round-started event.
    pub fn round_started(tick: u64, round: u64) -> Self {
        Self::new(tick, GameEventData::RoundStarted { round })
    }

    /// Create a round-crashed event.
    pub fn round_crashed(tick: u64, round: u64, crash_point: Fixed) -> Self {
        Self::new(tick, GameEventData::RoundCrashed { round, crash_point })
    }

    /// Create a bet-placed event.
    pub fn bet_placed(tick: u64, amount: Fixed, balance: Fixed) -> Self {
        Self::new(tick, GameEventData::BetPlaced { amount, balance })
    }

    /// Create a cashed-out event.
    pub fn cashed_out(tick: u64, payout: Fixed, multiplier: Fixed, balance: Fixed) -> Self {
        Self::new(
            tick,
            GameEventData::CashedOut {
                payout,
                multiplier,
                balance,
            },
        )
    }

    /// Create a bet-forfeited event.
    pub fn bet_forfeited(tick: u64, amount: Fixed) -> Self {
        Self::new(tick, GameEventData::BetForfeited { amount })
    }
}
