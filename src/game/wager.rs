//! Wager Ledger
//!
//! Tracks the player's balance, the pending bet for the current round, and
//! the cash-out flag. Every rejected operation is a no-op that leaves the
//! ledger untouched; nothing here can panic or drive the balance negative
//! (balance is unsigned and only debited after the amount check).
//!
//! Settlement invariant: for any round, exactly one of
//! {cash-out payout, forfeiture, no bet placed} holds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::fixed::{fixed_mul, Fixed};

/// Why a bet or cash-out was rejected.
///
/// All variants are locally recoverable: the caller gates on the visible
/// phase, and an out-of-phase call simply does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum WagerError {
    /// Bet amount is zero or exceeds the current balance.
    #[error("Invalid bet amount")]
    InvalidBetAmount,

    /// A bet has already been placed this round.
    #[error("Bet already placed")]
    BetAlreadyPlaced,

    /// No pending bet to cash out (never placed, or already cashed out).
    #[error("No active bet to cash out")]
    NoActiveBet,

    /// Operation is not valid in the current round phase.
    #[error("Wrong phase for operation")]
    WrongPhase,
}

/// Per-player wager state. Persists across rounds; only the round flags
/// reset when a new round arms.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WagerState {
    /// Current balance in hundredths. Never negative by construction.
    pub balance: Fixed,

    /// Stake for the current round, already debited from `balance`.
    pub pending_bet: Option<Fixed>,

    /// Set exactly once per round, only while the round is running.
    pub has_cashed_out: bool,
}

impl WagerState {
    /// Create a ledger with the given starting balance.
    pub fn new(starting_balance: Fixed) -> Self {
        Self {
            balance: starting_balance,
            pending_bet: None,
            has_cashed_out: false,
        }
    }

    /// Debit `amount` and hold it as the round's stake.
    ///
    /// Phase gating (Waiting only) is enforced by the caller
    /// (`GameState::place_bet`); this checks the ledger's own rules.
    pub fn place_bet(&mut self, amount: Fixed) -> Result<(), WagerError> {
        if self.pending_bet.is_some() {
            return Err(WagerError::BetAlreadyPlaced);
        }
        if amount == 0 || amount > self.balance {
            return Err(WagerError::InvalidBetAmount);
        }

        self.balance -= amount;
        self.pending_bet = Some(amount);
        Ok(())
    }

    /// Cash out the pending bet at `multiplier`, returning the payout.
    ///
    /// A second call in the same round fails with `NoActiveBet`: the first
    /// cash-out cleared the pending bet.
    pub fn cash_out(&mut self, multiplier: Fixed) -> Result<Fixed, WagerError> {
        let stake = self.pending_bet.take().ok_or(WagerError::NoActiveBet)?;

        let payout = fixed_mul(stake, multiplier);
        self.balance += payout;
        self.has_cashed_out = true;
        Ok(payout)
    }

    /// Forfeit the pending bet on crash. The stake was debited at
    /// placement, so no balance movement happens here.
    ///
    /// Returns the forfeited amount, if a bet was still live.
    pub fn forfeit(&mut self) -> Option<Fixed> {
        self.pending_bet.take()
    }

    /// Reset the per-round flags when a new round arms.
    pub fn begin_round(&mut self) {
        self.has_cashed_out = false;
    }
}
