extern crate std;

use proptest::prelude::*;
use soroban_sdk::{
    symbol_short, testutils::Address as _, testutils::Events, vec, Address, Env, IntoVal,
    Vec as SorobanVec,
};

use crate::{FactoryStorage, FactoryStorageClient};
use common::Error;

fn setup() -> (Env, FactoryStorageClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let client = FactoryStorageClient::new(&env, &env.register(FactoryStorage, ()));
    let owner = Address::generate(&env);
    let staking_token = Address::generate(&env);
    client.initialize(&owner, &staking_token);

    (env, client, owner, staking_token)
}

#[test]
fn test_initialize() {
    let (_env, client, owner, staking_token) = setup();

    assert_eq!(client.get_owner(), owner);
    assert_eq!(client.get_staking_token(), staking_token);
    assert_eq!(client.pool_count(), 0);
    assert_eq!(client.get_price_oracle_factory(), None);

    let result = client.try_initialize(&owner, &staking_token);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::AlreadyInitialized),
        _ => unreachable!("Expected AlreadyInitialized error"),
    }
}

#[test]
fn test_initialize_publishes_record() {
    let env = Env::default();
    env.mock_all_auths();

    let client = FactoryStorageClient::new(&env, &env.register(FactoryStorage, ()));
    let owner = Address::generate(&env);
    let staking_token = Address::generate(&env);
    client.initialize(&owner, &staking_token);

    assert_eq!(
        env.events().all(),
        vec![
            &env,
            (
                client.address.clone(),
                (symbol_short!("INIT"),).into_val(&env),
                (owner, staking_token, 0u64).into_val(&env),
            ),
        ]
    );
}

#[test]
fn test_add_pool_appends_and_indexes() {
    let (env, client, owner, _) = setup();
    let pool_a = Address::generate(&env);
    let pool_b = Address::generate(&env);

    client.add_pool(&owner, &pool_a);
    client.add_pool(&owner, &pool_b);

    assert_eq!(client.pool_count(), 2);
    assert_eq!(client.get_pool(&0), pool_a);
    assert_eq!(client.get_pool(&1), pool_b);
    assert_eq!(client.get_pool_index(&pool_a), 0);
    assert_eq!(client.get_pool_index(&pool_b), 1);
}

#[test]
fn test_add_pool_rejects_duplicate() {
    let (env, client, owner, _) = setup();
    let pool = Address::generate(&env);
    client.add_pool(&owner, &pool);

    let result = client.try_add_pool(&owner, &pool);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::PoolAlreadyListed),
        _ => unreachable!("Expected PoolAlreadyListed error"),
    }
}

#[test]
fn test_mutations_restricted_to_owner() {
    let (env, client, _owner, _) = setup();
    let intruder = Address::generate(&env);
    let pool = Address::generate(&env);

    let result = client.try_add_pool(&intruder, &pool);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::OnlyOwner),
        _ => unreachable!("Expected OnlyOwner error"),
    }
    let result = client.try_set_staking_token(&intruder, &pool);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::OnlyOwner),
        _ => unreachable!("Expected OnlyOwner error"),
    }
    let result = client.try_set_price_oracle_factory(&intruder, &pool);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::OnlyOwner),
        _ => unreachable!("Expected OnlyOwner error"),
    }
}

#[test]
fn test_remove_pool_swaps_in_last_entry() {
    let (env, client, owner, _) = setup();
    let pools: [Address; 3] = [
        Address::generate(&env),
        Address::generate(&env),
        Address::generate(&env),
    ];
    for pool in &pools {
        client.add_pool(&owner, pool);
    }

    client.remove_pool(&owner, &pools[0]);

    // The tail element backfills the vacated slot.
    assert_eq!(client.pool_count(), 2);
    assert_eq!(client.get_pool(&0), pools[2]);
    assert_eq!(client.get_pool(&1), pools[1]);
    assert_eq!(client.get_pool_index(&pools[2]), 0);
    assert_eq!(client.get_pool_index(&pools[1]), 1);

    let result = client.try_get_pool_index(&pools[0]);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::PoolNotListed),
        _ => unreachable!("Expected PoolNotListed error"),
    }
}

#[test]
fn test_remove_absent_pool_fails() {
    let (env, client, owner, _) = setup();
    let pool = Address::generate(&env);

    let result = client.try_remove_pool(&owner, &pool);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::PoolNotListed),
        _ => unreachable!("Expected PoolNotListed error"),
    }
}

#[test]
fn test_get_pool_out_of_bounds() {
    let (env, client, owner, _) = setup();
    client.add_pool(&owner, &Address::generate(&env));

    let result = client.try_get_pool(&1);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::IndexOutOfBounds),
        _ => unreachable!("Expected IndexOutOfBounds error"),
    }
}

#[test]
fn test_ecosystem_pointers_roundtrip() {
    let (env, client, owner, _) = setup();
    let token = Address::generate(&env);
    let oracle_factory = Address::generate(&env);

    client.set_staking_token(&owner, &token);
    client.set_price_oracle_factory(&owner, &oracle_factory);

    assert_eq!(client.get_staking_token(), token);
    assert_eq!(client.get_price_oracle_factory(), Some(oracle_factory));
}

#[test]
fn test_ownership_handoff_to_factory() {
    let (env, client, owner, _) = setup();
    let factory = Address::generate(&env);
    let pool = Address::generate(&env);

    client.nominate_owner(&owner, &factory);
    client.accept_owner(&factory);

    // The previous owner is locked out, the factory administers the list.
    let result = client.try_add_pool(&owner, &pool);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::OnlyOwner),
        _ => unreachable!("Expected OnlyOwner error"),
    }
    client.add_pool(&factory, &pool);
    assert_eq!(client.pool_count(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // For any interleaving of adds and removes the reverse index stays
    // consistent with the vector and the length tracks adds minus removes.
    #[test]
    fn registry_stays_consistent(ops in prop::collection::vec(any::<(bool, u8)>(), 1..40)) {
        let (env, client, owner, _) = setup();
        let mut model: std::vec::Vec<Address> = std::vec::Vec::new();

        for (is_add, selector) in ops {
            if is_add || model.is_empty() {
                let pool = Address::generate(&env);
                client.add_pool(&owner, &pool);
                model.push(pool);
            } else {
                let victim = model[selector as usize % model.len()].clone();
                client.remove_pool(&owner, &victim);
                // Mirror the swap-pop.
                let at = model.iter().position(|p| *p == victim).unwrap();
                model.swap_remove(at);
            }
        }

        prop_assert_eq!(client.pool_count() as usize, model.len());
        let listed: SorobanVec<Address> = client.get_pools();
        for (i, pool) in model.iter().enumerate() {
            prop_assert_eq!(listed.get(i as u32).unwrap(), pool.clone());
            prop_assert_eq!(client.get_pool_index(pool), i as u32);
        }
    }
}
