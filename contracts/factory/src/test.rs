extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token::StellarAssetClient,
    vec, Address, Env, IntoVal, String,
};

use crate::{Factory, FactoryClient};
use common::{math::UNIT, Error};

use factory_storage::FactoryStorageClient;
use lp_token::LpTokenClient;
use proxy::ProxyClient;
use staking_pool::StakingPoolClient;
use vault::VaultClient;

struct Setup {
    env: Env,
    admin: Address,
    distribution: Address,
    reward_token: Address,
    native_token: Address,
    factory: FactoryClient<'static>,
    storage: FactoryStorageClient<'static>,
    proxy: ProxyClient<'static>,
}

struct DeployedPool {
    pool: StakingPoolClient<'static>,
    vault: VaultClient<'static>,
    lp: LpTokenClient<'static>,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let distribution = Address::generate(&env);
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let native_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let storage = FactoryStorageClient::new(&env, &env.register(factory_storage::FactoryStorage, ()));
    storage.initialize(&admin, &reward_token);

    let proxy = ProxyClient::new(&env, &env.register(proxy::Proxy, ()));
    proxy.initialize(&admin);

    let factory = FactoryClient::new(&env, &env.register(Factory, ()));
    factory.initialize(&admin, &storage.address, &proxy.address, &1);
    proxy.set_target(&admin, &factory.address);

    // The registry moves under the factory's administration.
    storage.nominate_owner(&admin, &factory.address);
    factory.accept_ownership(&admin, &storage.address);

    Setup {
        env,
        admin,
        distribution,
        reward_token,
        native_token,
        factory,
        storage,
        proxy,
    }
}

fn deploy_pool(s: &Setup, name: &str) -> DeployedPool {
    let pool_id = s.env.register(staking_pool::StakingPool, ());

    // Collaborators start out under the factory, which hands them to the
    // pool during commissioning.
    let vault = VaultClient::new(&s.env, &s.env.register(vault::Vault, ()));
    vault.initialize(&s.factory.address, &s.native_token);

    let lp = LpTokenClient::new(&s.env, &s.env.register(lp_token::LpToken, ()));
    lp.initialize(
        &s.factory.address,
        &String::from_str(&s.env, name),
        &String::from_str(&s.env, "POOL"),
        &18,
    );

    s.factory.deploy_pool(
        &s.admin,
        &pool_id,
        &String::from_str(&s.env, name),
        &vault.address,
        &lp.address,
        &s.reward_token,
        &s.distribution,
        &s.admin,
    );

    DeployedPool {
        pool: StakingPoolClient::new(&s.env, &pool_id),
        vault,
        lp,
    }
}

#[test]
fn test_initialize() {
    let s = setup();

    assert_eq!(s.factory.get_owner(), s.admin);
    assert_eq!(s.factory.get_factory_storage(), s.storage.address);
    assert_eq!(s.factory.get_proxy(), s.proxy.address);
    assert_eq!(s.factory.get_version(), 1);
    assert_eq!(s.factory.get_upgraded_factory(), None);
    assert_eq!(s.storage.get_owner(), s.factory.address);

    let result = s
        .factory
        .try_initialize(&s.admin, &s.storage.address, &s.proxy.address, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::AlreadyInitialized),
        _ => unreachable!("Expected AlreadyInitialized error"),
    }
}

#[test]
fn test_initialize_publishes_record() {
    let s = setup();

    let fresh = FactoryClient::new(&s.env, &s.env.register(Factory, ()));
    fresh.initialize(&s.admin, &s.storage.address, &s.proxy.address, &3);

    assert_eq!(
        s.env.events().all(),
        vec![
            &s.env,
            (
                fresh.address.clone(),
                (symbol_short!("INIT"),).into_val(&s.env),
                (
                    s.admin.clone(),
                    s.storage.address.clone(),
                    s.proxy.address.clone(),
                    3u32,
                    0u64,
                )
                    .into_val(&s.env),
            ),
        ]
    );
}

#[test]
fn test_deploy_pool_wires_collaborators() {
    let s = setup();
    let d = deploy_pool(&s, "OKS Pool");

    // The pool authorises the proxy, not the factory implementation.
    assert_eq!(d.pool.get_factory(), s.proxy.address);
    assert_eq!(d.pool.get_old_address(), s.factory.address);
    assert_eq!(d.pool.get_version(), 1);
    assert_eq!(d.pool.get_vault(), d.vault.address);
    assert_eq!(d.pool.get_lp_token(), d.lp.address);

    // The pool took over its collaborators during commissioning.
    assert_eq!(d.vault.get_owner(), d.pool.address);
    assert_eq!(d.lp.get_owner(), d.pool.address);

    assert_eq!(s.storage.pool_count(), 1);
    assert_eq!(s.storage.get_pool(&0), d.pool.address);
    assert_eq!(s.factory.get_pools().len(), 1);
}

#[test]
fn test_deploy_pool_restricted_to_owner() {
    let s = setup();
    let intruder = Address::generate(&s.env);
    let pool_id = s.env.register(staking_pool::StakingPool, ());

    let result = s.factory.try_deploy_pool(
        &intruder,
        &pool_id,
        &String::from_str(&s.env, "OKS Pool"),
        &pool_id,
        &pool_id,
        &s.reward_token,
        &s.distribution,
        &intruder,
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::OnlyOwner),
        _ => unreachable!("Expected OnlyOwner error"),
    }
}

#[test]
fn test_upgrade_pool_hands_off_to_successor() {
    let s = setup();
    let d = deploy_pool(&s, "OKS Pool");

    // Live deposits that must survive the hand-off.
    let staker = Address::generate(&s.env);
    StellarAssetClient::new(&s.env, &s.reward_token).mint(&staker, &(100 * UNIT));
    d.pool.stake(&staker, &(100 * UNIT));

    let new_pool_id = s.env.register(staking_pool::StakingPool, ());
    s.factory.upgrade_pool(&s.admin, &d.pool.address, &new_pool_id);
    let new_pool = StakingPoolClient::new(&s.env, &new_pool_id);

    // Linked version history.
    assert_eq!(d.pool.get_new_address(), Some(new_pool_id.clone()));
    assert_eq!(new_pool.get_old_address(), d.pool.address);
    assert_eq!(new_pool.get_version(), 2);
    assert_eq!(new_pool.get_name(), d.pool.get_name());

    // Collaborators belong to the successor.
    assert_eq!(d.vault.get_owner(), new_pool_id);
    assert_eq!(d.lp.get_owner(), new_pool_id);

    // The registry tracks exactly the active instance.
    assert_eq!(s.storage.pool_count(), 1);
    assert_eq!(s.storage.get_pool(&0), new_pool_id);

    // The superseded pool refuses staking, the successor accepts it.
    match d.pool.try_stake(&staker, &UNIT) {
        Err(Ok(e)) => assert_eq!(e, Error::PoolUpgraded),
        _ => unreachable!("Expected PoolUpgraded error"),
    }
    StellarAssetClient::new(&s.env, &s.reward_token).mint(&staker, &UNIT);
    new_pool.stake(&staker, &UNIT);
}

#[test]
fn test_upgrade_pool_requires_listed_pool() {
    let s = setup();
    let stranger = Address::generate(&s.env);
    let new_pool_id = s.env.register(staking_pool::StakingPool, ());

    let result = s.factory.try_upgrade_pool(&s.admin, &stranger, &new_pool_id);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::PoolNotListed),
        _ => unreachable!("Expected PoolNotListed error"),
    }
}

#[test]
fn test_exchange_rate_set_through_proxy() {
    let s = setup();
    let d = deploy_pool(&s, "OKS Pool");

    s.factory
        .set_pool_exchange_rate(&s.admin, &d.pool.address, &(2 * UNIT));
    assert_eq!(d.pool.get_exchange_rate(), 2 * UNIT);

    // Nobody short of the proxy reaches the pool directly.
    let result = d.pool.try_set_exchange_rate(&s.admin, &(3 * UNIT));
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::OnlyFactory),
        _ => unreachable!("Expected OnlyFactory error"),
    }
}

#[test]
fn test_upgrade_factory_is_terminal() {
    let s = setup();
    let d = deploy_pool(&s, "OKS Pool");
    let successor = Address::generate(&s.env);

    s.factory.upgrade_factory(&s.admin, &successor);

    assert_eq!(s.factory.get_upgraded_factory(), Some(successor.clone()));
    assert_eq!(s.storage.get_nominated_owner(), Some(successor));

    let pool_id = s.env.register(staking_pool::StakingPool, ());
    let result = s.factory.try_deploy_pool(
        &s.admin,
        &pool_id,
        &String::from_str(&s.env, "Another"),
        &pool_id,
        &pool_id,
        &s.reward_token,
        &s.distribution,
        &s.admin,
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::FactoryUpgraded),
        _ => unreachable!("Expected FactoryUpgraded error"),
    }
    match s.factory.try_upgrade_pool(&s.admin, &d.pool.address, &pool_id) {
        Err(Ok(e)) => assert_eq!(e, Error::FactoryUpgraded),
        _ => unreachable!("Expected FactoryUpgraded error"),
    }
    match s.factory.try_accept_ownership(&s.admin, &s.storage.address) {
        Err(Ok(e)) => assert_eq!(e, Error::FactoryUpgraded),
        _ => unreachable!("Expected FactoryUpgraded error"),
    }
    match s
        .factory
        .try_set_pool_exchange_rate(&s.admin, &d.pool.address, &(2 * UNIT))
    {
        Err(Ok(e)) => assert_eq!(e, Error::FactoryUpgraded),
        _ => unreachable!("Expected FactoryUpgraded error"),
    }
    match s.factory.try_upgrade_factory(&s.admin, &d.pool.address) {
        Err(Ok(e)) => assert_eq!(e, Error::FactoryUpgraded),
        _ => unreachable!("Expected FactoryUpgraded error"),
    }
}

#[test]
fn test_factory_succession_keeps_pools_administrable() {
    let s = setup();
    let d = deploy_pool(&s, "OKS Pool");

    // Stand up the successor, retire the old factory, swing the proxy.
    let factory2 = FactoryClient::new(&s.env, &s.env.register(Factory, ()));
    factory2.initialize(&s.admin, &s.storage.address, &s.proxy.address, &2);

    s.factory.upgrade_factory(&s.admin, &factory2.address);
    s.proxy.set_target(&s.admin, &factory2.address);
    factory2.accept_ownership(&s.admin, &s.storage.address);

    assert_eq!(s.storage.get_owner(), factory2.address);

    // A pool commissioned by the old factory never knew its address, only
    // the proxy's, so the successor administers it without rewiring.
    let new_pool_id = s.env.register(staking_pool::StakingPool, ());
    factory2.upgrade_pool(&s.admin, &d.pool.address, &new_pool_id);

    assert_eq!(d.pool.get_new_address(), Some(new_pool_id.clone()));
    assert_eq!(d.vault.get_owner(), new_pool_id);
    assert_eq!(s.storage.get_pool(&0), new_pool_id);
}
