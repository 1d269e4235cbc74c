extern crate std;

use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};

use crate::{Vault, VaultClient};

use common::Error;

fn setup() -> (Env, VaultClient<'static>, Address, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let native = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(Vault, ());
    let client = VaultClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &native);

    (env, client, owner, token, native)
}

#[test]
fn test_initialize() {
    let (_env, client, owner, _token, native) = setup();

    assert_eq!(client.get_owner(), owner);
    assert_eq!(client.native_token(), native);

    let result = client.try_initialize(&owner, &native);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::AlreadyInitialized),
        _ => unreachable!("Expected AlreadyInitialized error"),
    }
}

#[test]
fn test_safe_transfer_by_owner() {
    let (env, client, owner, token, _native) = setup();
    let recipient = Address::generate(&env);

    StellarAssetClient::new(&env, &token).mint(&client.address, &1_000);

    client.safe_transfer(&owner, &token, &recipient, &400);

    assert_eq!(TokenClient::new(&env, &token).balance(&recipient), 400);
    assert_eq!(TokenClient::new(&env, &token).balance(&client.address), 600);
}

#[test]
fn test_safe_transfer_by_non_owner_fails() {
    let (env, client, _owner, token, _native) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_safe_transfer(&intruder, &token, &intruder, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::OnlyOwner),
        _ => unreachable!("Expected OnlyOwner error"),
    }
}

#[test]
fn test_safe_transfer_native() {
    let (env, client, owner, _token, native) = setup();
    let recipient = Address::generate(&env);

    StellarAssetClient::new(&env, &native).mint(&client.address, &500);

    client.safe_transfer_native(&owner, &recipient, &500);
    assert_eq!(TokenClient::new(&env, &native).balance(&recipient), 500);
}

#[test]
fn test_safe_transfer_from_pulls_approved_funds() {
    let (env, client, owner, token, _native) = setup();
    let depositor = Address::generate(&env);
    let destination = Address::generate(&env);

    StellarAssetClient::new(&env, &token).mint(&depositor, &1_000);
    // The depositor approves the vault to pull funds.
    let expiration = env.ledger().sequence() + 1_000;
    TokenClient::new(&env, &token).approve(&depositor, &client.address, &700, &expiration);

    client.safe_transfer_from(&owner, &token, &depositor, &destination, &700);
    assert_eq!(TokenClient::new(&env, &token).balance(&destination), 700);
}

#[test]
fn test_ownership_handoff_moves_gate() {
    let (env, client, owner, token, _native) = setup();
    let next = Address::generate(&env);
    let recipient = Address::generate(&env);

    StellarAssetClient::new(&env, &token).mint(&client.address, &100);

    client.nominate_owner(&owner, &next);
    client.accept_owner(&next);

    // Old owner is locked out, the new owner operates the vault.
    let result = client.try_safe_transfer(&owner, &token, &recipient, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, Error::OnlyOwner),
        _ => unreachable!("Expected OnlyOwner error"),
    }
    client.safe_transfer(&next, &token, &recipient, &100);
    assert_eq!(TokenClient::new(&env, &token).balance(&recipient), 100);
}
