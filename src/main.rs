//! Aviator Engine
//!
//! Runs a live demo session with a scripted player, then verifies that the
//! engine replays deterministically from its seed.

use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use aviator::{
    core::fixed::{format_fixed, to_fixed},
    derive_session_seed,
    game::{
        state::GameState,
        tick::run_ticks,
    },
    GameConfig, GameEventData, GameSession, SessionError, VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Aviator Engine v{}", VERSION);

    let config = GameConfig::default();
    info!(
        "Tick: {}ms, countdown: {}s, growth: +{}bps/tick",
        config.tick_ms,
        config.ticks_to_secs(config.countdown_ticks),
        config.growth_bps
    );

    let seed = derive_session_seed("demo", 1);
    info!("Session seed: {}", seed);

    demo_session(config.clone(), seed).await?;
    verify_determinism(&config, seed);

    Ok(())
}

/// Run a live session for a few rounds with a scripted player that bets
/// every round and tries to cash out at 1.50x.
async fn demo_session(config: GameConfig, seed: u64) -> Result<()> {
    info!("=== Live Session ===");

    let tick_ms = config.tick_ms;
    let target = to_fixed(1.5);
    let stake = to_fixed(10.0);

    let (handle, mut events) = GameSession::spawn(config, seed);

    let mut rounds = 0;
    while rounds < 10 {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(err) => {
                warn!("event stream ended: {err}");
                break;
            }
        };

        match event.data {
            GameEventData::RoundArmed { .. } => {
                if let Err(err) = handle.place_bet(stake).await {
                    warn!("bet rejected: {err}");
                }
            }
            GameEventData::RoundStarted { .. } => {
                // Watch the multiplier and bail out at the target.
                loop {
                    let snap = handle.snapshot().await?;
                    if snap.phase != "running" {
                        break;
                    }
                    if snap.multiplier >= target {
                        match handle.cash_out().await {
                            Ok(payout) => {
                                info!("bot cashed out {}", format_fixed(payout));
                            }
                            Err(SessionError::Wager(_)) => {} // crashed under us
                            Err(err) => return Err(err.into()),
                        }
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(tick_ms)).await;
                }
            }
            GameEventData::RoundCrashed { .. } => {
                rounds += 1;
            }
            _ => {}
        }
    }

    let snap = handle.snapshot().await?;
    info!(
        "Session over: {} rounds, balance {}",
        rounds,
        format_fixed(snap.balance)
    );
    info!("Final snapshot: {}", serde_json::to_string(&snap)?);

    handle.shutdown().await;
    Ok(())
}

/// Replay the same seed twice and compare state hashes.
fn verify_determinism(config: &GameConfig, seed: u64) {
    info!("=== Verifying Determinism ===");

    const TICKS: u64 = 20_000;

    let mut a = GameState::new(seed, config);
    let events_a = run_ticks(&mut a, config, TICKS);
    let hash_a = a.compute_hash();

    let mut b = GameState::new(seed, config);
    let events_b = run_ticks(&mut b, config, TICKS);
    let hash_b = b.compute_hash();

    info!("Run A hash: {}", hex::encode(hash_a));
    info!("Run B hash: {}", hex::encode(hash_b));
    info!(
        "Rounds played: {}, events: {}",
        a.rounds_played,
        events_a.len()
    );

    if hash_a == hash_b && events_a == events_b {
        info!("DETERMINISM VERIFIED: Hashes match!");
    } else {
        warn!("DETERMINISM FAILURE: Hashes differ!");
    }
}
