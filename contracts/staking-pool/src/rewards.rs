//! Reward vesting through the share exchange rate.
//!
//! A notified reward amount is released linearly over a fixed seven-day
//! period. Vested reward is folded into the pool's exchange rate, repricing
//! every outstanding share at once, so the engine is O(1) per operation
//! regardless of how many depositors join and leave. Because a share's
//! value includes previously vested reward, accrued reward itself keeps
//! earning: a depositor staked since inception ends up with a compounded
//! claim rather than a flat time-proportional one. All values are
//! 18-decimal fixed point and every division truncates, producing sub-1e-13
//! relative dust when rewards split unevenly.

use common::{math, Error};
use soroban_sdk::Env;

/// Length of one reward-release period: 7 days in seconds.
pub const REWARD_DURATION: u64 = 604_800;

/// Reward accrues only up to the end of the running period.
pub fn applicable_time(now: u64, period_finish: u64) -> u64 {
    now.min(period_finish)
}

/// Reward newly released since the last checkpoint, clamped to the
/// outstanding balance so truncation drift in the rate can never vest more
/// than was notified.
pub fn vested_amount(
    env: &Env,
    rate: i128,
    last_update: u64,
    applicable: u64,
    reward_left: i128,
) -> Result<i128, Error> {
    let elapsed = applicable.saturating_sub(last_update) as i128;
    let vested = math::mul_div(env, rate, elapsed, math::UNIT)?;
    Ok(vested.min(reward_left))
}

/// How much the exchange rate rises when `vested` reward is spread over
/// `total_shares` outstanding shares.
pub fn rate_increment(env: &Env, vested: i128, total_shares: i128) -> Result<i128, Error> {
    math::mul_div(env, vested, math::UNIT, total_shares)
}

/// Fold a newly notified `amount` into the emission rate for a fresh
/// period. If the previous period is still running, its undistributed
/// remainder is combined with the new amount before the rate is recomputed.
pub fn new_reward_rate(
    env: &Env,
    amount: i128,
    current_rate: i128,
    period_finish: u64,
    now: u64,
) -> Result<i128, Error> {
    let duration = REWARD_DURATION as i128;

    if now >= period_finish {
        return math::mul_div(env, amount, math::UNIT, duration);
    }

    let remaining = (period_finish - now) as i128;
    let leftover = math::mul_div(env, current_rate, remaining, math::UNIT)?;
    math::mul_div(env, math::checked_add(amount, leftover)?, math::UNIT, duration)
}

// ── Tests ────────────────────────────────────────────────────────────────────
