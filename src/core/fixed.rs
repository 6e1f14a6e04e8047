//! 2-Decimal Fixed-Point Arithmetic
//!
//! This module provides deterministic fixed-point math for the round engine.
//! All money and multiplier values are integers scaled by 100 - no floats in
//! game logic.
//!
//! ## Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Decimal fixed point, scale 100 (u64)                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  1.00x  = 100        10.00 credits = 1000                   │
//! │  1.01x  = 101        3000.00 credits = 300000               │
//! │                                                             │
//! │  Range: 0.00 to ~1.8e17                                     │
//! │  Precision: 0.01 (one cent / one multiplier step)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why scale 100?
//!
//! The crash multiplier and the wager ledger are both displayed with exactly
//! two decimal places, and the crash comparison (`next >= crash_point`) must
//! be exact. Truncating to hundredths at the point of computation makes the
//! comparison reproducible instead of depending on display formatting.

/// Fixed-point number in hundredths, stored as u64.
pub type Fixed = u64;

/// Scale factor (two decimal places).
pub const FIXED_SCALE: Fixed = 100;

/// 1.00 in fixed-point.
pub const FIXED_ONE: Fixed = FIXED_SCALE;

/// Growth rates are expressed in basis points (1/10000).
pub const BPS_SCALE: u64 = 10_000;

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use at compile-time or in tests. NEVER in the tick loop.
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_SCALE as f64)) as Fixed
}

/// Multiply two fixed-point numbers, truncating toward zero.
///
/// Used for payout computation: `bet * multiplier`.
/// Uses a u128 intermediate; results past the u64 range saturate at
/// `Fixed::MAX` rather than wrapping.
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    let wide = (a as u128) * (b as u128) / (FIXED_SCALE as u128);
    Fixed::try_from(wide).unwrap_or(Fixed::MAX)
}

/// Apply one compounding growth tick: `x * (1 + rate)`, truncated to
/// hundredths.
///
/// `rate_bps` is the per-tick growth rate in basis points (100 = 1%).
/// Truncation toward zero on the scaled value matches the fixed-point
/// display the multiplier feed drives. Saturates at `Fixed::MAX`, which
/// keeps growth monotone even past the representable range.
#[inline]
pub fn fixed_compound(x: Fixed, rate_bps: u32) -> Fixed {
    let wide = (x as u128) * ((BPS_SCALE + rate_bps as u64) as u128) / (BPS_SCALE as u128);
    Fixed::try_from(wide).unwrap_or(Fixed::MAX)
}

/// Format a fixed-point value with exactly two decimals.
///
/// Integer formatting only - this is the one place display precision is
/// allowed to exist, and it cannot drift from the stored value.
pub fn format_fixed(x: Fixed) -> String {
    format!("{}.{:02}", x / FIXED_SCALE, x % FIXED_SCALE)
}
