//! Pool registry.
//!
//! An ordered, indexed set of the currently active pool addresses plus a
//! couple of ecosystem pointers, held apart from the factory so the factory
//! logic can be replaced without losing the pool list. The factory becomes
//! the registry's owner through the two-step ownership hand-off and is the
//! only identity allowed to mutate it.

#![no_std]
#![allow(deprecated)]

use common::{ownable, Error};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

// ── Storage keys ─────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKING_TOKEN: Symbol = symbol_short!("OKS");
const ORACLE_FACTORY: Symbol = symbol_short!("ORACLE_FC");
const POOLS: Symbol = symbol_short!("POOLS");

// Reverse index, persistent: (prefix, pool address) -> position in POOLS.
const POOL_INDEX: Symbol = symbol_short!("POOL_IDX");

#[contract]
pub struct FactoryStorage;

#[contractimpl]
impl FactoryStorage {
    pub fn initialize(env: Env, owner: Address, staking_token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKING_TOKEN, &staking_token);
        env.storage()
            .instance()
            .set(&POOLS, &Vec::<Address>::new(&env));
        ownable::init_owner(&env, &owner);

        env.events().publish(
            (symbol_short!("INIT"),),
            (owner, staking_token, env.ledger().timestamp()),
        );
        Ok(())
    }

    // ── Registry mutation (owner only) ──────────────────────────────────────

    /// Append `pool` and record its position. Duplicates are rejected.
    pub fn add_pool(env: Env, caller: Address, pool: Address) -> Result<(), Error> {
        Self::require_owner(&env, &caller)?;

        if env.storage().persistent().has(&(POOL_INDEX, pool.clone())) {
            return Err(Error::PoolAlreadyListed);
        }

        let mut pools = Self::pools(&env);
        env.storage()
            .persistent()
            .set(&(POOL_INDEX, pool.clone()), &pools.len());
        pools.push_back(pool.clone());
        env.storage().instance().set(&POOLS, &pools);

        env.events().publish(
            (symbol_short!("POOL_ADD"), pool),
            (pools.len(), env.ledger().timestamp()),
        );
        Ok(())
    }

    /// Remove `pool` in O(1): the last entry takes its slot and the
    /// vector shrinks by one.
    pub fn remove_pool(env: Env, caller: Address, pool: Address) -> Result<(), Error> {
        Self::require_owner(&env, &caller)?;

        let index: u32 = env
            .storage()
            .persistent()
            .get(&(POOL_INDEX, pool.clone()))
            .ok_or(Error::PoolNotListed)?;

        let mut pools = Self::pools(&env);
        let last_index = pools.len() - 1;
        if index != last_index {
            // `get` is within bounds: last_index < len.
            let moved = pools.get(last_index).ok_or(Error::IndexOutOfBounds)?;
            pools.set(index, moved.clone());
            env.storage()
                .persistent()
                .set(&(POOL_INDEX, moved), &index);
        }
        pools.pop_back();
        env.storage().instance().set(&POOLS, &pools);
        env.storage()
            .persistent()
            .remove(&(POOL_INDEX, pool.clone()));

        env.events().publish(
            (symbol_short!("POOL_RM"), pool),
            (pools.len(), env.ledger().timestamp()),
        );
        Ok(())
    }

    // ── Ecosystem pointers (owner only) ─────────────────────────────────────

    pub fn set_staking_token(env: Env, caller: Address, token: Address) -> Result<(), Error> {
        Self::require_owner(&env, &caller)?;
        env.storage().instance().set(&STAKING_TOKEN, &token);

        env.events()
            .publish((symbol_short!("TOKEN_SET"),), (token, env.ledger().timestamp()));
        Ok(())
    }

    /// Store the price-oracle factory pointer. Opaque to the registry; it
    /// is exposed for integrators and never dereferenced here.
    pub fn set_price_oracle_factory(
        env: Env,
        caller: Address,
        oracle_factory: Address,
    ) -> Result<(), Error> {
        Self::require_owner(&env, &caller)?;
        env.storage().instance().set(&ORACLE_FACTORY, &oracle_factory);

        env.events().publish(
            (symbol_short!("ORACLE_ST"),),
            (oracle_factory, env.ledger().timestamp()),
        );
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn get_pool(env: Env, index: u32) -> Result<Address, Error> {
        Self::pools(&env).get(index).ok_or(Error::IndexOutOfBounds)
    }

    pub fn get_pool_index(env: Env, pool: Address) -> Result<u32, Error> {
        env.storage()
            .persistent()
            .get(&(POOL_INDEX, pool))
            .ok_or(Error::PoolNotListed)
    }

    pub fn get_pools(env: Env) -> Vec<Address> {
        Self::pools(&env)
    }

    pub fn pool_count(env: Env) -> u32 {
        Self::pools(&env).len()
    }

    pub fn get_staking_token(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&STAKING_TOKEN)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_price_oracle_factory(env: Env) -> Option<Address> {
        env.storage().instance().get(&ORACLE_FACTORY)
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    pub fn nominate_owner(env: Env, caller: Address, nominee: Address) -> Result<(), Error> {
        caller.require_auth();
        ownable::nominate_owner(&env, &caller, &nominee)
    }

    pub fn accept_owner(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        ownable::accept_owner(&env, &caller).map(|_| ())
    }

    pub fn cancel_nomination(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        ownable::cancel_nomination(&env, &caller).map(|_| ())
    }

    pub fn get_owner(env: Env) -> Result<Address, Error> {
        ownable::owner(&env)
    }

    pub fn get_nominated_owner(env: Env) -> Option<Address> {
        ownable::nominated_owner(&env)
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(Error::NotInitialized);
        }
        caller.require_auth();
        ownable::require_owner(env, caller)
    }

    fn pools(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&POOLS)
            .unwrap_or_else(|| Vec::new(env))
    }
}

#[cfg(test)]
mod test;
