//! Owner-gated custody wrapper.
//!
//! The vault holds a pool's deposited tokens and forwards transfer,
//! transfer-from, and approve calls to the underlying token contracts. Every
//! mutating entry point is restricted to the owner — the staking pool —
//! and ownership moves between pool versions through the two-step protocol.
//! The configured native-asset contract stands in for the chain's base
//! currency.

#![no_std]
#![allow(deprecated)]

use common::{ownable, Error};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

// ── Storage keys ─────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NATIVE: Symbol = symbol_short!("NATIVE");

#[contract]
pub struct Vault;

#[contractimpl]
impl Vault {
    pub fn initialize(env: Env, owner: Address, native_token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&NATIVE, &native_token);
        ownable::init_owner(&env, &owner);

        Ok(())
    }

    // ── Custody operations (owner only) ─────────────────────────────────────

    pub fn safe_transfer(
        env: Env,
        caller: Address,
        token: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_owner(&env, &caller)?;

        token::Client::new(&env, &token).transfer(&env.current_contract_address(), &to, &amount);

        env.events().publish(
            (symbol_short!("VLT_XFER"), token, to),
            (amount, env.ledger().timestamp()),
        );
        Ok(())
    }

    pub fn safe_transfer_from(
        env: Env,
        caller: Address,
        token: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_owner(&env, &caller)?;

        token::Client::new(&env, &token).transfer_from(
            &env.current_contract_address(),
            &from,
            &to,
            &amount,
        );

        env.events().publish(
            (symbol_short!("VLT_XFRM"), token, to),
            (from, amount, env.ledger().timestamp()),
        );
        Ok(())
    }

    pub fn safe_approve(
        env: Env,
        caller: Address,
        token: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_owner(&env, &caller)?;

        // Allowances on Soroban tokens expire; one week of ledgers is enough
        // for any single administrative flow.
        let expiration = env.ledger().sequence() + 120_960;
        token::Client::new(&env, &token).approve(
            &env.current_contract_address(),
            &spender,
            &amount,
            &expiration,
        );

        env.events().publish(
            (symbol_short!("VLT_APRV"), token, spender),
            (amount, env.ledger().timestamp()),
        );
        Ok(())
    }

    /// Transfer the base currency (the configured native-asset contract).
    pub fn safe_transfer_native(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::require_owner(&env, &caller)?;

        let native = Self::native_token(env.clone())?;
        token::Client::new(&env, &native).transfer(&env.current_contract_address(), &to, &amount);

        env.events().publish(
            (symbol_short!("VLT_NATV"), to),
            (amount, env.ledger().timestamp()),
        );
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn native_token(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&NATIVE)
            .ok_or(Error::NotInitialized)
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
}

#[cfg(test)]
mod test;
