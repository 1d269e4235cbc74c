//! Forwarding proxy.
//!
//! A stable address in front of a replaceable target contract. Inbound
//! calls go through [`Proxy::forward`], which dispatches to whatever the
//! current target is; the target itself uses [`Proxy::relay`] to make
//! outbound calls under the proxy's identity, so contracts that authorise
//! "the factory" keep working across factory replacements — they only ever
//! see the proxy's address.

#![no_std]
#![allow(deprecated)]

use common::Error;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Val, Vec};

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const TARGET: Symbol = symbol_short!("TARGET");

#[contract]
pub struct Proxy;

#[contractimpl]
impl Proxy {
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&ADMIN) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        Ok(())
    }

    /// Point the proxy at a new target. Admin only.
    pub fn set_target(env: Env, caller: Address, target: Address) -> Result<(), Error> {
        caller.require_auth();
        if caller != Self::get_admin(env.clone())? {
            return Err(Error::Unauthorized);
        }

        env.storage().instance().set(&TARGET, &target);

        env.events().publish(
            (symbol_short!("TGT_SET"),),
            (target, env.ledger().timestamp()),
        );
        Ok(())
    }

    /// Dispatch `func(args)` on the current target.
    pub fn forward(env: Env, func: Symbol, args: Vec<Val>) -> Result<Val, Error> {
        let target = Self::get_target(env.clone())?;
        Ok(env.invoke_contract(&target, &func, args))
    }

    /// Make an outbound call under the proxy's identity. Only the current
    /// target may relay; the called contract observes the proxy as the
    /// invoking contract.
    pub fn relay(env: Env, contract: Address, func: Symbol, args: Vec<Val>) -> Result<Val, Error> {
        let target = Self::get_target(env.clone())?;
        target.require_auth();

        Ok(env.invoke_contract(&contract, &func, args))
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        env.storage().instance().get(&ADMIN).ok_or(Error::NotInitialized)
    }

    pub fn get_target(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&TARGET)
            .ok_or(Error::NotInitialized)
    }
}
