#![allow(deprecated)]

use soroban_sdk::{symbol_short, Address, Env, String};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub name: String,
    pub factory: Address,
    pub vault: Address,
    pub lp_token: Address,
    pub version: u32,
    pub timestamp: u64,
}

/// Fired when a depositor stakes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub shares_minted: i128,
    pub timestamp: u64,
}

/// Fired when a depositor withdraws.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub shares_burned: i128,
    pub amount_released: i128,
    pub timestamp: u64,
}

/// Fired when accrued reward is claimed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub staker: Address,
    pub reward: i128,
    pub timestamp: u64,
}

/// Fired when the distributor queues a new reward tranche.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAddedEvent {
    pub amount: i128,
    pub new_rate: i128,
    pub period_finish: u64,
    pub timestamp: u64,
}

/// Fired when the factory supersedes this pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradedEvent {
    pub old_pool: Address,
    pub new_pool: Address,
    pub timestamp: u64,
}

/// Fired when the exchange rate changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExchangeRateSetEvent {
    pub rate: i128,
    pub timestamp: u64,
}

/// Fired when residual balances are swept to the successor pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceSweptEvent {
    pub token: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    name: String,
    factory: Address,
    vault: Address,
    lp_token: Address,
    version: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            name,
            factory,
            vault,
            lp_token,
            version,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, shares_minted: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            shares_minted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, shares_burned: i128, amount_released: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            shares_burned,
            amount_released,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, staker: Address, reward: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), staker.clone()),
        RewardPaidEvent {
            staker,
            reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_added(env: &Env, amount: i128, new_rate: i128, period_finish: u64) {
    env.events().publish(
        (symbol_short!("RWD_ADDED"),),
        RewardAddedEvent {
            amount,
            new_rate,
            period_finish,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgraded(env: &Env, old_pool: Address, new_pool: Address) {
    env.events().publish(
        (symbol_short!("UPGRADED"),),
        UpgradedEvent {
            old_pool,
            new_pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_exchange_rate_set(env: &Env, rate: i128) {
    env.events().publish(
        (symbol_short!("EXCH_SET"),),
        ExchangeRateSetEvent {
            rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_balance_swept(env: &Env, token: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SWEPT"), token.clone()),
        BalanceSweptEvent {
            token,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
