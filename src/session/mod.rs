//! Session Driver
//!
//! The non-deterministic shell around the deterministic engine: a tokio
//! task that owns the `GameState`, drives it from a single periodic
//! interval, and applies player commands between ticks. Because every
//! mutation happens on this one task, there is no locking and no way for a
//! stale timer to fire into the wrong phase.
//!
//! Wall-clock time lives only here (round start timestamps for
//! presentation); the engine itself counts ticks.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::core::fixed::{format_fixed, Fixed};
use crate::game::config::GameConfig;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::state::GameState;
use crate::game::tick::tick;
use crate::game::wager::WagerError;

/// Read-only view of the engine for a renderer.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    /// Engine tick the snapshot was taken on.
    pub tick: u64,
    /// Phase name: "waiting", "running", or "crashed".
    pub phase: &'static str,
    /// Current multiplier (frozen at the crash point after a crash).
    pub multiplier: Fixed,
    /// Crash point of the finished round; `None` until revealed.
    pub crash_point: Option<Fixed>,
    /// Remaining countdown in whole seconds (zero outside Waiting).
    pub countdown_secs: u32,
    /// Current balance.
    pub balance: Fixed,
    /// Live stake, if any.
    pub pending_bet: Option<Fixed>,
    /// Whether the player already cashed out this round.
    pub has_cashed_out: bool,
    /// Recent crash points, newest first.
    pub history: Vec<Fixed>,
    /// Wall-clock start of the current round, if one has started.
    pub round_started_at: Option<DateTime<Utc>>,
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The driver task has stopped.
    #[error("Session closed")]
    Closed,

    /// The engine rejected the operation.
    #[error(transparent)]
    Wager(#[from] WagerError),
}

enum Command {
    PlaceBet {
        amount: Fixed,
        reply: oneshot::Sender<Result<(), WagerError>>,
    },
    CashOut {
        reply: oneshot::Sender<Result<Fixed, WagerError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
    Shutdown,
}

/// Handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// Place a bet for the upcoming round.
    pub async fn place_bet(&self, amount: Fixed) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::PlaceBet { amount, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)??;
        Ok(())
    }

    /// Cash out the pending bet; returns the payout.
    pub async fn cash_out(&self) -> Result<Fixed, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::CashOut { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        let payout = rx.await.map_err(|_| SessionError::Closed)??;
        Ok(payout)
    }

    /// Take a snapshot of the observable state.
    pub async fn snapshot(&self) -> Result<Snapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Stop the driver task.
    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(Command::Shutdown).await;
    }
}

/// A running game session.
pub struct GameSession;

impl GameSession {
    /// Spawn the driver task for a new session.
    ///
    /// Returns the command handle and a receiver for the event stream.
    pub fn spawn(config: GameConfig, seed: u64) -> (SessionHandle, broadcast::Receiver<GameEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (event_tx, event_rx) = broadcast::channel(256);

        let state = GameState::new(seed, &config);
        tokio::spawn(drive(state, config, cmd_rx, event_tx));

        (SessionHandle { cmd_tx }, event_rx)
    }
}

/// Driver loop: one authoritative interval, commands applied between ticks.
async fn drive(
    mut state: GameState,
    config: GameConfig,
    mut cmd_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<GameEvent>,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_ms));
    // Never burst after a stall: one update per tick, no duplicates.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut round_started_at: Option<DateTime<Utc>> = None;

    info!(seed = state.rng_seed, tick_ms = config.tick_ms, "session started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = tick(&mut state, &config);
                for event in result.events {
                    if matches!(event.data, GameEventData::RoundStarted { .. }) {
                        round_started_at = Some(Utc::now());
                    }
                    log_event(&event);
                    // Ignore send errors: no subscribers is fine.
                    let _ = event_tx.send(event);
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(Command::PlaceBet { amount, reply }) => {
                        let _ = reply.send(state.place_bet(amount));
                    }
                    Some(Command::CashOut { reply }) => {
                        let _ = reply.send(state.cash_out());
                    }
                    Some(Command::Snapshot { reply }) => {
                        let _ = reply.send(snapshot(&state, &config, round_started_at));
                    }
                    Some(Command::Shutdown) | None => break,
                }
            }
        }
    }

    info!(
        tick = state.tick,
        rounds = state.rounds_played,
        balance = %format_fixed(state.balance()),
        "session stopped"
    );
}

fn snapshot(state: &GameState, config: &GameConfig, started_at: Option<DateTime<Utc>>) -> Snapshot {
    Snapshot {
        tick: state.tick,
        phase: state.phase.name(),
        multiplier: state.multiplier(),
        crash_point: state.crash_point(),
        countdown_secs: config.ticks_to_secs(state.countdown_ticks()),
        balance: state.balance(),
        pending_bet: state.pending_bet(),
        has_cashed_out: state.has_cashed_out(),
        history: state.history.to_vec(),
        round_started_at: started_at,
    }
}

fn log_event(event: &GameEvent) {
    match &event.data {
        GameEventData::RoundArmed { countdown_ticks } => {
            debug!(tick = event.tick, countdown_ticks, "round armed");
        }
        GameEventData::RoundStarted { round } => {
            info!(tick = event.tick, round, "round started");
        }
        GameEventData::RoundCrashed { round, crash_point } => {
            info!(
                tick = event.tick,
                round,
                crash_point = %format_fixed(*crash_point),
                "round crashed"
            );
        }
        GameEventData::BetPlaced { amount, balance } => {
            info!(
                tick = event.tick,
                amount = %format_fixed(*amount),
                balance = %format_fixed(*balance),
                "bet placed"
            );
        }
        GameEventData::CashedOut {
            payout,
            multiplier,
            balance,
        } => {
            info!(
                tick = event.tick,
                payout = %format_fixed(*payout),
                multiplier = %format_fixed(*multiplier),
                balance = %format_fixed(*balance),
                "cashed out"
            );
        }
        GameEventData::BetForfeited { amount } => {
            info!(tick = event.tick, amount = %format_fixed(*amount), "bet forfeited");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;
    use crate::game::config::CrashDistribution;

    fn test_config() -> GameConfig {
        GameConfig {
            tick_ms: 10,
            countdown_ticks: 50,
            cooldown_ticks: 5,
            instant_bps: 0,
            distribution: CrashDistribution::Pinned(to_fixed(3.0)),
            starting_balance: to_fixed(100.0),
            ..GameConfig::default()
        }
    }

    async fn wait_for<F: Fn(&GameEventData) -> bool>(
        rx: &mut broadcast::Receiver<GameEvent>,
        pred: F,
    ) -> GameEvent {
        loop {
            let event = rx.recv().await.expect("event stream closed");
            if pred(&event.data) {
                return event;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_bet_and_cash_out_round_trip() {
        let (handle, mut events) = GameSession::spawn(test_config(), 42);

        // Betting window is open at spawn.
        handle.place_bet(to_fixed(10.0)).await.unwrap();
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.phase, "waiting");
        assert_eq!(snap.pending_bet, Some(to_fixed(10.0)));
        assert_eq!(snap.balance, to_fixed(90.0));

        wait_for(&mut events, |d| {
            matches!(d, GameEventData::RoundStarted { .. })
        })
        .await;

        // Cash out while the multiplier climbs toward 3.00.
        let payout = handle.cash_out().await.unwrap();
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.balance, to_fixed(90.0) + payout);
        assert!(snap.has_cashed_out);
        assert_eq!(snap.pending_bet, None);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_bet_rejected_while_running() {
        let (handle, mut events) = GameSession::spawn(test_config(), 42);

        wait_for(&mut events, |d| {
            matches!(d, GameEventData::RoundStarted { .. })
        })
        .await;

        let err = handle.place_bet(to_fixed(10.0)).await.unwrap_err();
        assert_eq!(err, SessionError::Wager(WagerError::WrongPhase));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_forfeit_and_history() {
        let (handle, mut events) = GameSession::spawn(test_config(), 42);

        handle.place_bet(to_fixed(10.0)).await.unwrap();

        let crashed = wait_for(&mut events, |d| {
            matches!(d, GameEventData::RoundCrashed { .. })
        })
        .await;
        let GameEventData::RoundCrashed { crash_point, .. } = crashed.data else {
            unreachable!()
        };
        assert_eq!(crash_point, to_fixed(3.0));

        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.balance, to_fixed(90.0));
        assert_eq!(snap.history.first(), Some(&to_fixed(3.0)));

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_reveals_crash_point_only_after_crash() {
        let (handle, mut events) = GameSession::spawn(test_config(), 7);

        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.crash_point, None);

        wait_for(&mut events, |d| {
            matches!(d, GameEventData::RoundCrashed { .. })
        })
        .await;

        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.phase, "crashed");
        assert_eq!(snap.crash_point, Some(to_fixed(3.0)));
        assert!(snap.round_started_at.is_some());

        handle.shutdown().await;
    }
}
