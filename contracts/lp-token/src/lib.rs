//! Receipt token representing a depositor's proportional claim on pooled
//! custody. Minting and burning are reserved for the contract owner — the
//! staking pool that holds the deposits — while transfers and allowances
//! follow standard fungible-ledger semantics.

#![no_std]
#![allow(deprecated)]

use common::{math, ownable, Error};
use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Env, String, Symbol,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NAME: Symbol = symbol_short!("NAME");
const TOKEN_SYM: Symbol = symbol_short!("TOKEN_SYM");
const DECIMALS: Symbol = symbol_short!("DECIMALS");
const SUPPLY: Symbol = symbol_short!("SUPPLY");

// Per-account persistent storage uses tuple keys: (prefix, address...)
const BALANCE: Symbol = symbol_short!("BAL");
const ALLOWANCE: Symbol = symbol_short!("ALLOW");

#[contract]
pub struct LpToken;

#[contractimpl]
impl LpToken {
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        decimals: u32,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&TOKEN_SYM, &symbol);
        env.storage().instance().set(&DECIMALS, &decimals);
        ownable::init_owner(&env, &owner);

        Ok(())
    }

    // ── Owner-gated supply management ───────────────────────────────────────

    /// Mint `amount` receipt tokens to `to`. Owner only.
    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::require_owner(&env, &caller)?;
        require_positive(amount)?;

        let balance = Self::balance(env.clone(), to.clone());
        let supply = Self::total_supply(env.clone());
        env.storage()
            .persistent()
            .set(&(BALANCE, to.clone()), &math::checked_add(balance, amount)?);
        env.storage()
            .instance()
            .set(&SUPPLY, &math::checked_add(supply, amount)?);

        env.events()
            .publish((symbol_short!("MINT"), to), (amount, env.ledger().timestamp()));
        Ok(())
    }

    /// Burn `amount` receipt tokens from `from`. Owner only.
    pub fn burn(env: Env, caller: Address, from: Address, amount: i128) -> Result<(), Error> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        ownable::require_owner(&env, &caller)?;
        require_positive(amount)?;

        let balance = Self::balance(env.clone(), from.clone());
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }
        let supply = Self::total_supply(env.clone());
        env.storage()
            .persistent()
            .set(&(BALANCE, from.clone()), &math::checked_sub(balance, amount)?);
        env.storage()
            .instance()
            .set(&SUPPLY, &math::checked_sub(supply, amount)?);

        env.events()
            .publish((symbol_short!("BURN"), from), (amount, env.ledger().timestamp()));
        Ok(())
    }

    // ── Fungible ledger ─────────────────────────────────────────────────────

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        require_positive(amount)?;
        Self::move_balance(&env, &from, &to, amount)?;

        env.events().publish(
            (symbol_short!("TRANSFER"), from, to),
            (amount, env.ledger().timestamp()),
        );
        Ok(())
    }

    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        env.storage()
            .persistent()
            .set(&(ALLOWANCE, from.clone(), spender.clone()), &amount);

        env.events().publish(
            (symbol_short!("APPROVE"), from, spender),
            (amount, env.ledger().timestamp()),
        );
        Ok(())
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        spender.require_auth();
        require_positive(amount)?;

        let allowance = Self::allowance(env.clone(), from.clone(), spender.clone());
        if allowance < amount {
            return Err(Error::InsufficientAllowance);
        }
        env.storage().persistent().set(
            &(ALLOWANCE, from.clone(), spender),
            &math::checked_sub(allowance, amount)?,
        );
        Self::move_balance(&env, &from, &to, amount)?;

        env.events().publish(
            (symbol_short!("TRANSFER"), from, to),
            (amount, env.ledger().timestamp()),
        );
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage().persistent().get(&(BALANCE, id)).unwrap_or(0)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(ALLOWANCE, from, spender))
            .unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&SUPPLY).unwrap_or(0)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        env.storage().instance().get(&NAME).ok_or(Error::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&TOKEN_SYM)
            .ok_or(Error::NotInitialized)
    }

    pub fn decimals(env: Env) -> u32 {
        env.storage().instance().get(&DECIMALS).unwrap_or(0)
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

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&(BALANCE, from.clone()), &math::checked_sub(from_balance, amount)?);
        env.storage()
            .persistent()
            .set(&(BALANCE, to.clone()), &math::checked_add(to_balance, amount)?);
        Ok(())
    }
}

fn require_positive(amount: i128) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}
