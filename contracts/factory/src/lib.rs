//! Pool factory.
//!
//! Commissions pools, supersedes them with replacement instances, and
//! retires itself in favour of a successor factory. The factory owns the
//! registry and administers pools through the forwarding proxy: pools
//! authorise the proxy's stable address, so replacing the factory behind
//! the proxy does not invalidate any pool's notion of who administers it.
//!
//! Lifecycle: Live until `upgrade_factory`, then terminally Upgraded —
//! every mutating entry point on the retired instance fails and mutation
//! moves to the successor.

#![no_std]
#![allow(deprecated)]

use common::{
    interfaces::{OwnableClient, PoolClient, ProxyRelayClient, RegistryClient},
    ownable, Error,
};
use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Env, IntoVal, String, Symbol, Val, Vec,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const STORAGE: Symbol = symbol_short!("STORAGE");
const PROXY: Symbol = symbol_short!("PROXY");
const VERSION: Symbol = symbol_short!("VERSION");
const UPGRADED: Symbol = symbol_short!("UPGRADED");

#[contract]
pub struct Factory;

#[contractimpl]
impl Factory {
    /// Bootstrap a factory generation. A successor factory is initialized
    /// with the same storage and proxy and a bumped `version`.
    pub fn initialize(
        env: Env,
        owner: Address,
        storage: Address,
        proxy: Address,
        version: u32,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(Error::AlreadyInitialized);
        }
        if version == 0 {
            return Err(Error::InvalidAmount);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STORAGE, &storage);
        env.storage().instance().set(&PROXY, &proxy);
        env.storage().instance().set(&VERSION, &version);
        ownable::init_owner(&env, &owner);

        env.events().publish(
            (symbol_short!("INIT"),),
            (owner, storage, proxy, version, env.ledger().timestamp()),
        );
        Ok(())
    }

    // ── Pool administration (owner only, while Live) ────────────────────────

    /// Commission a pre-deployed pool instance: bind it to the proxy, hand
    /// it the vault and share token this factory owns, and list it in the
    /// registry.
    #[allow(clippy::too_many_arguments)]
    pub fn deploy_pool(
        env: Env,
        caller: Address,
        pool: Address,
        name: String,
        vault: Address,
        lp_token: Address,
        reward_token: Address,
        reward_distribution: Address,
        pool_owner: Address,
    ) -> Result<(), Error> {
        Self::require_live_owner(&env, &caller)?;

        let this = env.current_contract_address();
        PoolClient::new(&env, &pool).initialize(
            &name,
            &Self::get_proxy(env.clone())?,
            // A fresh pool's history starts at the factory.
            &this,
            &vault,
            &lp_token,
            &reward_token,
            &reward_distribution,
            &1,
            &pool_owner,
        );

        // The factory owns the collaborators until here; the pool takes
        // them over through the two-step transfer.
        OwnableClient::new(&env, &vault).nominate_owner(&this, &pool);
        OwnableClient::new(&env, &lp_token).nominate_owner(&this, &pool);
        Self::relay(&env, &pool, Symbol::new(&env, "accept_ownership"), |args| {
            args.push_back(vault.into_val(&env));
        })?;
        Self::relay(&env, &pool, Symbol::new(&env, "accept_ownership"), |args| {
            args.push_back(lp_token.into_val(&env));
        })?;

        let storage = Self::get_factory_storage(env.clone())?;
        RegistryClient::new(&env, &storage).add_pool(&this, &pool);

        env.events().publish(
            (symbol_short!("POOL_NEW"), pool),
            (name, env.ledger().timestamp()),
        );
        Ok(())
    }

    /// Supersede `old_pool` with a pre-deployed replacement. The new pool
    /// inherits the old pool's configuration at the next version, takes
    /// over the vault and share token, and replaces the registry entry.
    pub fn upgrade_pool(
        env: Env,
        caller: Address,
        old_pool: Address,
        new_pool: Address,
    ) -> Result<(), Error> {
        Self::require_live_owner(&env, &caller)?;

        let storage = Self::get_factory_storage(env.clone())?;
        let registry = RegistryClient::new(&env, &storage);
        if !matches!(registry.try_get_pool_index(&old_pool), Ok(Ok(_))) {
            return Err(Error::PoolNotListed);
        }

        let old = PoolClient::new(&env, &old_pool);
        let vault = old.get_vault();
        let lp_token = old.get_lp_token();
        let proxy = Self::get_proxy(env.clone())?;

        PoolClient::new(&env, &new_pool).initialize(
            &old.get_name(),
            &proxy,
            &old_pool,
            &vault,
            &lp_token,
            &old.get_reward_token(),
            &old.get_reward_distribution(),
            &(old.get_version() + 1),
            &old.get_owner(),
        );

        // The pool only takes administrative calls from the proxy's
        // address, so both halves of the hand-off are relayed through it.
        Self::relay(&env, &old_pool, symbol_short!("upgrade"), |args| {
            args.push_back(new_pool.into_val(&env));
        })?;
        Self::relay(&env, &new_pool, Symbol::new(&env, "accept_ownership"), |args| {
            args.push_back(vault.into_val(&env));
        })?;
        Self::relay(&env, &new_pool, Symbol::new(&env, "accept_ownership"), |args| {
            args.push_back(lp_token.into_val(&env));
        })?;

        let this = env.current_contract_address();
        registry.remove_pool(&this, &old_pool);
        registry.add_pool(&this, &new_pool);

        env.events().publish(
            (symbol_short!("POOL_UPG"), old_pool),
            (new_pool, env.ledger().timestamp()),
        );
        Ok(())
    }

    /// Reprice a pool's shares. Relayed so the pool sees the proxy.
    pub fn set_pool_exchange_rate(
        env: Env,
        caller: Address,
        pool: Address,
        rate: i128,
    ) -> Result<(), Error> {
        Self::require_live_owner(&env, &caller)?;

        Self::relay(&env, &pool, Symbol::new(&env, "set_exchange_rate"), |args| {
            args.push_back(rate.into_val(&env));
        })
    }

    // ── Factory lifecycle ───────────────────────────────────────────────────

    /// Retire this factory in favour of `new_factory`. Terminal: after
    /// this, every mutating entry point here fails. Registry ownership is
    /// nominated to the successor, which accepts it once the proxy has
    /// been retargeted.
    pub fn upgrade_factory(env: Env, caller: Address, new_factory: Address) -> Result<(), Error> {
        Self::require_live_owner(&env, &caller)?;

        env.storage().instance().set(&UPGRADED, &new_factory);

        let storage = Self::get_factory_storage(env.clone())?;
        OwnableClient::new(&env, &storage)
            .nominate_owner(&env.current_contract_address(), &new_factory);

        env.events().publish(
            (symbol_short!("FACT_UPG"),),
            (new_factory, env.ledger().timestamp()),
        );
        Ok(())
    }

    /// Accept a pending ownership nomination on any Ownable collaborator
    /// (registry, vault, share token) on this factory's behalf.
    pub fn accept_ownership(env: Env, caller: Address, contract: Address) -> Result<(), Error> {
        Self::require_live_owner(&env, &caller)?;

        OwnableClient::new(&env, &contract).accept_owner(&env.current_contract_address());
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn get_factory_storage(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&STORAGE)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_proxy(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&PROXY)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_version(env: Env) -> Result<u32, Error> {
        env.storage()
            .instance()
            .get(&VERSION)
            .ok_or(Error::NotInitialized)
    }

    /// The successor factory, once retired.
    pub fn get_upgraded_factory(env: Env) -> Option<Address> {
        env.storage().instance().get(&UPGRADED)
    }

    pub fn get_pools(env: Env) -> Result<Vec<Address>, Error> {
        let storage = Self::get_factory_storage(env.clone())?;
        Ok(RegistryClient::new(&env, &storage).get_pools())
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

    fn require_live_owner(env: &Env, caller: &Address) -> Result<(), Error> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(Error::NotInitialized);
        }
        if env.storage().instance().has(&UPGRADED) {
            return Err(Error::FactoryUpgraded);
        }
        caller.require_auth();
        ownable::require_owner(env, caller)
    }

    /// Relay a pool-gated call through the proxy, with the proxy's own
    /// address as the authorised caller argument.
    fn relay(
        env: &Env,
        pool: &Address,
        func: Symbol,
        push_args: impl FnOnce(&mut Vec<Val>),
    ) -> Result<(), Error> {
        let proxy = Self::get_proxy(env.clone())?;

        let mut args: Vec<Val> = Vec::new(env);
        args.push_back(proxy.into_val(env));
        push_args(&mut args);

        ProxyRelayClient::new(env, &proxy).relay(pool, &func, &args);
        Ok(())
    }
}

#[cfg(test)]
mod test;
