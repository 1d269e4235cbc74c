//! 18-decimal fixed-point arithmetic.
//!
//! All reward and exchange-rate ratios are scaled by [`UNIT`], matching the
//! 18-decimal convention of the underlying token. Every division truncates
//! toward zero and every addition/subtraction is checked: the small residual
//! dust this produces when rewards are split unevenly is expected and
//! test-tolerated, while silent wrap-around is never acceptable.

use soroban_sdk::{Env, I256};

use crate::Error;

/// Fixed-point scaling factor: 10^18.
pub const UNIT: i128 = 1_000_000_000_000_000_000;

/// `a × b / denominator` with a 256-bit intermediate product.
///
/// Reward math routinely multiplies three ~10^18-sized values before
/// dividing, which overflows `i128`; the widening keeps the computation
/// exact and only the final quotient must fit back into `i128`.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    if denominator == 0 {
        return Err(Error::DivisionByZero);
    }

    let product = I256::from_i128(env, a).mul(&I256::from_i128(env, b));
    let quotient = product.div(&I256::from_i128(env, denominator));

    quotient.to_i128().ok_or(Error::Overflow)
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}

/// Checked subtraction that also rejects negative results, since every
/// balance and accumulator in the system is non-negative by construction.
pub fn checked_sub(a: i128, b: i128) -> Result<i128, Error> {
    match a.checked_sub(b) {
        Some(v) if v >= 0 => Ok(v),
        _ => Err(Error::Underflow),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
