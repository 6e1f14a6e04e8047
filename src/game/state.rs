//! Game State Definitions
//!
//! The complete engine state: round phase, current round, wager ledger,
//! round history, and the deterministic RNG. All mutation happens in
//! `tick::tick` or in the command methods below, so every state change is
//! auditable without a rendering harness.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{Fixed, FIXED_ONE};
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::DeterministicRng;
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::history::HistoryLog;
use crate::game::wager::{WagerError, WagerState};

// =============================================================================
// ROUND PHASE
// =============================================================================

/// Current phase of the round cycle.
///
/// The phase owns its own tick counter, so there is exactly one pending
/// timer at any moment and leaving a phase implicitly cancels it - a stale
/// countdown can never fire into a running round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Betting window; counts down to the next round.
    Waiting {
        /// Ticks until the round starts.
        ticks_remaining: u32,
    },
    /// Multiplier is climbing.
    Running,
    /// Round crashed; cool-down before the next betting window.
    Crashed {
        /// Ticks until the next betting window opens.
        ticks_remaining: u32,
    },
}

impl RoundPhase {
    /// Short name for logs and snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            RoundPhase::Waiting { .. } => "waiting",
            RoundPhase::Running => "running",
            RoundPhase::Crashed { .. } => "crashed",
        }
    }

    /// True while bets may be placed.
    pub fn is_waiting(&self) -> bool {
        matches!(self, RoundPhase::Waiting { .. })
    }

    /// True while cash-out is possible.
    pub fn is_running(&self) -> bool {
        matches!(self, RoundPhase::Running)
    }

    /// True between crash and the next betting window.
    pub fn is_crashed(&self) -> bool {
        matches!(self, RoundPhase::Crashed { .. })
    }
}

// =============================================================================
// ROUND
// =============================================================================

/// One play cycle. Created when a round starts, replaced when the next one
/// starts; its terminal multiplier is copied into history at crash time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Round {
    /// Hidden terminal multiplier, fixed at round start.
    pub crash_point: Fixed,

    /// Current multiplier; monotonically non-decreasing while running,
    /// frozen at `crash_point` on crash.
    pub multiplier: Fixed,

    /// Engine tick at which the round started.
    pub started_tick: u64,
}

impl Round {
    /// Create a fresh round at 1.00x.
    pub fn new(crash_point: Fixed, started_tick: u64) -> Self {
        Self {
            crash_point,
            multiplier: FIXED_ONE,
            started_tick,
        }
    }
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete engine state for one session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Current tick (monotonic across rounds).
    pub tick: u64,

    /// Current round phase.
    pub phase: RoundPhase,

    /// RNG seed (for verification).
    pub rng_seed: u64,

    /// Deterministic RNG state.
    #[serde(skip)]
    pub rng: DeterministicRng,

    /// Current round, if one has started this session. Kept through the
    /// crash and the following betting window so the last crash stays
    /// visible; replaced when the next round starts.
    pub round: Option<Round>,

    /// Player ledger.
    pub wager: WagerState,

    /// Recent crash points, newest first.
    pub history: HistoryLog,

    /// Rounds started so far.
    pub rounds_played: u64,

    /// Events generated since the last drain.
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session state in the Waiting phase.
    pub fn new(rng_seed: u64, config: &GameConfig) -> Self {
        Self {
            tick: 0,
            phase: RoundPhase::Waiting {
                ticks_remaining: config.countdown_ticks,
            },
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            round: None,
            wager: WagerState::new(config.starting_balance),
            history: HistoryLog::new(config.history_capacity),
            rounds_played: 0,
            pending_events: Vec::new(),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Place a bet for the upcoming round.
    ///
    /// Valid only while Waiting; the stake is debited immediately.
    pub fn place_bet(&mut self, amount: Fixed) -> Result<(), WagerError> {
        if !self.phase.is_waiting() {
            return Err(WagerError::WrongPhase);
        }

        self.wager.place_bet(amount)?;
        self.push_event(GameEvent::bet_placed(self.tick, amount, self.wager.balance));
        Ok(())
    }

    /// Cash out the pending bet at the current multiplier.
    ///
    /// Valid only while Running. Returns the payout.
    pub fn cash_out(&mut self) -> Result<Fixed, WagerError> {
        if !self.phase.is_running() {
            return Err(WagerError::WrongPhase);
        }

        let multiplier = self.multiplier();
        let payout = self.wager.cash_out(multiplier)?;
        self.push_event(GameEvent::cashed_out(
            self.tick,
            payout,
            multiplier,
            self.wager.balance,
        ));
        Ok(payout)
    }

    // =========================================================================
    // Observable state
    // =========================================================================

    /// Current multiplier; 1.00x before the first round starts.
    pub fn multiplier(&self) -> Fixed {
        self.round.map(|r| r.multiplier).unwrap_or(FIXED_ONE)
    }

    /// Crash point of the finished round. `None` until the crash reveals it.
    pub fn crash_point(&self) -> Option<Fixed> {
        match self.phase {
            RoundPhase::Crashed { .. } => self.round.map(|r| r.crash_point),
            _ => None,
        }
    }

    /// Remaining countdown ticks, zero outside Waiting.
    pub fn countdown_ticks(&self) -> u32 {
        match self.phase {
            RoundPhase::Waiting { ticks_remaining } => ticks_remaining,
            _ => 0,
        }
    }

    /// Current balance.
    pub fn balance(&self) -> Fixed {
        self.wager.balance
    }

    /// Pending stake, if a bet is live.
    pub fn pending_bet(&self) -> Option<Fixed> {
        self.wager.pending_bet
    }

    /// True once the player cashed out this round.
    pub fn has_cashed_out(&self) -> bool {
        self.wager.has_cashed_out
    }

    // =========================================================================
    // Events & verification
    // =========================================================================

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Compute a hash of the current state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |hasher| {
            match self.phase {
                RoundPhase::Waiting { ticks_remaining } => {
                    hasher.update_u8(0);
                    hasher.update_u32(ticks_remaining);
                }
                RoundPhase::Running => hasher.update_u8(1),
                RoundPhase::Crashed { ticks_remaining } => {
                    hasher.update_u8(2);
                    hasher.update_u32(ticks_remaining);
                }
            }

            hasher.update_bool(self.round.is_some());
            if let Some(round) = self.round {
                hasher.update_fixed(round.crash_point);
                hasher.update_fixed(round.multiplier);
                hasher.update_u64(round.started_tick);
            }

            hasher.update_fixed(self.wager.balance);
            hasher.update_bool(self.wager.pending_bet.is_some());
            hasher.update_fixed(self.wager.pending_bet.unwrap_or(0));
            hasher.update_bool(self.wager.has_cashed_out);

            hasher.update_u64(self.rounds_played);
            for entry in self.history.iter() {
                hasher.update_fixed(entry);
            }
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
