//! Two-step ownership transfer.
//!
//! The current owner nominates a successor; only the nominee can finalise
//! the transfer, which atomically clears the nomination and replaces the
//! owner. At most one nomination is pending at any time. Contracts embed
//! these helpers and re-export them as entry points with identical
//! signatures, so a single generic client can drive ownership transfers on
//! any contract in the suite.

#![allow(deprecated)]

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::Error;

const OWNER: Symbol = symbol_short!("OWNER");
const NOMINATED: Symbol = symbol_short!("NOMINATED");

/// Record the initial owner. Call once, from `initialize`.
pub fn init_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// The current owner, or `NotInitialized` before construction.
pub fn owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(Error::NotInitialized)
}

/// The pending nominee, if any.
pub fn nominated_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&NOMINATED)
}

/// Guard: fail unless `caller` is the current owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    if *caller != owner(env)? {
        return Err(Error::OnlyOwner);
    }
    Ok(())
}

/// Propose `nominee` as the next owner. Overwrites any earlier nomination.
pub fn nominate_owner(env: &Env, caller: &Address, nominee: &Address) -> Result<(), Error> {
    require_owner(env, caller)?;

    env.storage().instance().set(&NOMINATED, nominee);

    env.events().publish(
        (symbol_short!("OWN_NOM"), caller.clone()),
        (nominee.clone(), env.ledger().timestamp()),
    );
    Ok(())
}

/// Finalise the pending transfer. Only the nominee may call; the
/// nomination is cleared and the owner replaced in one step.
/// Returns the previous owner.
pub fn accept_owner(env: &Env, caller: &Address) -> Result<Address, Error> {
    let nominee = nominated_owner(env).ok_or(Error::NoNomination)?;
    if *caller != nominee {
        return Err(Error::OnlyNominatedOwner);
    }

    let previous = owner(env)?;
    env.storage().instance().set(&OWNER, &nominee);
    env.storage().instance().remove(&NOMINATED);

    env.events().publish(
        (symbol_short!("OWN_ACPT"), nominee),
        (previous.clone(), env.ledger().timestamp()),
    );
    Ok(previous)
}

/// Drop the pending nomination without transferring anything.
/// Returns the cancelled nominee.
pub fn cancel_nomination(env: &Env, caller: &Address) -> Result<Address, Error> {
    require_owner(env, caller)?;

    let nominee = nominated_owner(env).ok_or(Error::NoNomination)?;
    env.storage().instance().remove(&NOMINATED);

    env.events().publish(
        (symbol_short!("OWN_CNCL"), caller.clone()),
        (nominee.clone(), env.ledger().timestamp()),
    );
    Ok(nominee)
}

// ── Tests ────────────────────────────────────────────────────────────────────
