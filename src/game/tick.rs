//! Authoritative Round Tick
//!
//! The single transition function for the round state machine. One call per
//! tick period; every phase change, multiplier step, crash detection, and
//! settlement happens here, which is what makes the engine reproducible
//! from a seed.

use crate::core::fixed::fixed_compound;
use crate::game::config::GameConfig;
use crate::game::crash::draw_crash_point;
use crate::game::events::GameEvent;
use crate::game::state::{GameState, Round, RoundPhase};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated since the previous tick (including command events).
    pub events: Vec<GameEvent>,
    /// Whether a round crashed on this tick.
    pub round_over: bool,
}

/// Run one engine tick.
///
/// # Determinism
///
/// This function is 100% deterministic:
/// - All timing is tick counts carried in the phase itself
/// - Fixed-point math only
/// - All randomness from the seeded RNG in `state`
pub fn tick(state: &mut GameState, config: &GameConfig) -> TickResult {
    let mut result = TickResult::default();

    state.tick += 1;

    match state.phase {
        RoundPhase::Waiting { ticks_remaining } => {
            if ticks_remaining == 0 {
                start_round(state, config);
            } else {
                state.phase = RoundPhase::Waiting {
                    ticks_remaining: ticks_remaining - 1,
                };
            }
        }
        RoundPhase::Running => {
            advance_multiplier(state, config, &mut result);
        }
        RoundPhase::Crashed { ticks_remaining } => {
            if ticks_remaining == 0 {
                arm_round(state, config);
            } else {
                state.phase = RoundPhase::Crashed {
                    ticks_remaining: ticks_remaining - 1,
                };
            }
        }
    }

    result.events = state.take_events();
    result
}

/// Waiting -> Running: draw the hidden crash point and reset the multiplier.
fn start_round(state: &mut GameState, config: &GameConfig) {
    let crash_point = draw_crash_point(&mut state.rng, config.instant_bps, config.distribution);

    state.round = Some(Round::new(crash_point, state.tick));
    state.rounds_played += 1;
    state.wager.begin_round();
    state.phase = RoundPhase::Running;

    state.push_event(GameEvent::round_started(state.tick, state.rounds_played));
}

/// One multiplier step while Running; detects the crash.
fn advance_multiplier(state: &mut GameState, config: &GameConfig, result: &mut TickResult) {
    let Some(round) = state.round.as_mut() else {
        // Running without a round cannot happen through the public API.
        state.phase = RoundPhase::Waiting {
            ticks_remaining: config.countdown_ticks,
        };
        return;
    };

    let next = fixed_compound(round.multiplier, config.growth_bps);

    if next >= round.crash_point {
        // Clamp to the crash point exactly - no overshoot. An instant
        // 1.00x crash satisfies this on the very first tick.
        round.multiplier = round.crash_point;
        let crash_point = round.crash_point;

        state.phase = RoundPhase::Crashed {
            ticks_remaining: config.cooldown_ticks,
        };
        state.history.record(crash_point);

        if let Some(amount) = state.wager.forfeit() {
            state.push_event(GameEvent::bet_forfeited(state.tick, amount));
        }
        state.push_event(GameEvent::round_crashed(
            state.tick,
            state.rounds_played,
            crash_point,
        ));
        result.round_over = true;
    } else {
        round.multiplier = next;
    }
}

/// Crashed -> Waiting: open the next betting window with clean round flags.
fn arm_round(state: &mut GameState, config: &GameConfig) {
    state.phase = RoundPhase::Waiting {
        ticks_remaining: config.countdown_ticks,
    };
    state.wager.begin_round();

    state.push_event(GameEvent::round_armed(state.tick, config.countdown_ticks));
}

/// Drive `count` ticks, collecting all events.
///
/// Used for replay verification and tests; the async session driver calls
/// `tick` directly.
pub fn run_ticks(state: &mut GameState, config: &GameConfig, count: u64) -> Vec<GameEvent> {
    let mut all_events = Vec::new();
    for _ in 0..count {
        let result = tick(state, config);
        all_events.extend(result.events);
    }
    all_events
}
