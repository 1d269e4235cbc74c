//! Capability clients for the collaborator contracts.
//!
//! Each trait is the narrow slice of a collaborator's surface that the core
//! logic actually consumes. The pool and factory depend only on these
//! clients, never on concrete contract crates, so collaborators can be
//! substituted freely in tests.

use soroban_sdk::{contractclient, Address, Env, String, Symbol, Val, Vec};

/// Two-step ownership surface shared by every stateful contract.
#[contractclient(name = "OwnableClient")]
pub trait OwnableInterface {
    fn nominate_owner(env: Env, caller: Address, nominee: Address);
    fn accept_owner(env: Env, caller: Address);
    fn get_owner(env: Env) -> Address;
    fn get_nominated_owner(env: Env) -> Option<Address>;
}

/// The receipt-token ledger operations the pool drives.
#[contractclient(name = "ShareTokenClient")]
pub trait ShareTokenInterface {
    fn mint(env: Env, caller: Address, to: Address, amount: i128);
    fn burn(env: Env, caller: Address, from: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
    fn total_supply(env: Env) -> i128;
}

/// The custody operations the pool drives.
#[contractclient(name = "VaultClient")]
pub trait VaultInterface {
    fn safe_transfer(env: Env, caller: Address, token: Address, to: Address, amount: i128);
    fn safe_transfer_from(
        env: Env,
        caller: Address,
        token: Address,
        from: Address,
        to: Address,
        amount: i128,
    );
    fn safe_approve(env: Env, caller: Address, token: Address, spender: Address, amount: i128);
    fn safe_transfer_native(env: Env, caller: Address, to: Address, amount: i128);
    fn native_token(env: Env) -> Address;
}

/// The pool surface the factory drives directly (initialisation and the
/// views needed to rewire an upgrade). Factory-gated pool mutations go
/// through the proxy instead, so the pool observes the stable proxy
/// identity as invoker.
#[contractclient(name = "PoolClient")]
pub trait PoolInterface {
    #[allow(clippy::too_many_arguments)]
    fn initialize(
        env: Env,
        name: String,
        factory: Address,
        old_address: Address,
        vault: Address,
        lp_token: Address,
        reward_token: Address,
        reward_distribution: Address,
        version: u32,
        owner: Address,
    );
    fn get_name(env: Env) -> String;
    fn get_vault(env: Env) -> Address;
    fn get_lp_token(env: Env) -> Address;
    fn get_reward_token(env: Env) -> Address;
    fn get_reward_distribution(env: Env) -> Address;
    fn get_version(env: Env) -> u32;
    fn get_owner(env: Env) -> Address;
}

/// The registry surface the factory drives.
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn add_pool(env: Env, caller: Address, pool: Address);
    fn remove_pool(env: Env, caller: Address, pool: Address);
    fn get_pool(env: Env, index: u32) -> Address;
    fn get_pool_index(env: Env, pool: Address) -> u32;
    fn get_pools(env: Env) -> Vec<Address>;
    fn pool_count(env: Env) -> u32;
}

/// Outbound routing through the forwarding proxy.
#[contractclient(name = "ProxyRelayClient")]
pub trait ProxyRelayInterface {
    fn relay(env: Env, contract: Address, func: Symbol, args: Vec<Val>) -> Val;
}
