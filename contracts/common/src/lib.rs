//! Shared building blocks for the staking-pool contract suite.
//!
//! This crate provides:
//! - [`Error`] — standardised error codes used by every contract.
//! - [`ownable`] — the two-step (nominate/accept) ownership-transfer
//!   primitive every stateful contract is built on.
//! - [`math`] — 18-decimal fixed-point helpers with checked arithmetic.
//! - [`interfaces`] — narrow capability clients for the collaborator
//!   contracts (share token, vault, pool, registry, proxy), so the core
//!   logic never depends on a concrete implementation.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod interfaces;
pub mod math;
pub mod ownable;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by every contract in the suite.
///
/// # Code ranges
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Lifecycle / initialisation     |
/// | 10 – 19 | Authorisation                  |
/// | 20 – 29 | Invalid argument               |
/// | 30 – 39 | Arithmetic                     |
/// | 40 – 49 | Contract state machine         |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// The contract has not been initialised yet.
    NotInitialized = 1,

    /// The contract has already been initialised.
    AlreadyInitialized = 2,

    // ── Authorisation (10–19) ────────────────────────────────
    /// The caller is not allowed to perform the requested operation.
    Unauthorized = 10,

    /// The caller is not the contract owner.
    OnlyOwner = 11,

    /// The caller is not the nominated owner.
    OnlyNominatedOwner = 12,

    /// The caller is not the staking-pool factory.
    OnlyFactory = 13,

    /// The caller is not the designated reward-distribution identity.
    OnlyRewardDistribution = 14,

    // ── Invalid argument (20–29) ─────────────────────────────
    /// An amount argument is zero or negative.
    InvalidAmount = 20,

    /// A registry index is past the end of the pool list.
    IndexOutOfBounds = 21,

    /// The pool address is not listed in the registry.
    PoolNotListed = 22,

    /// The pool address is already listed in the registry.
    PoolAlreadyListed = 23,

    /// There is no pending ownership nomination to act on.
    NoNomination = 24,

    /// A ledger balance is too small for the requested movement.
    InsufficientBalance = 25,

    /// A spender allowance is too small for the requested movement.
    InsufficientAllowance = 26,

    // ── Arithmetic (30–39) ───────────────────────────────────
    /// An addition or multiplication exceeded the representable range.
    Overflow = 30,

    /// A subtraction went below zero.
    Underflow = 31,

    /// Division by zero in fixed-point math.
    DivisionByZero = 32,

    // ── Contract state (40–49) ───────────────────────────────
    /// The pool was superseded by an upgrade; mutation is disabled.
    PoolUpgraded = 40,

    /// The operation requires the pool to have been superseded first.
    PoolNotUpgraded = 41,

    /// The factory was upgraded; mutation moved to its successor.
    FactoryUpgraded = 42,
}
