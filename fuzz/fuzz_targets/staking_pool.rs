#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::StellarAssetClient,
    Address, Env, String,
};
use staking_pool::{StakingPool, StakingPoolClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64 },
    Withdraw { shares: u64 },
    Claim,
    Notify { amount: u64 },
    AdvanceTime { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let native_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let sac = StellarAssetClient::new(&env, &reward_token);

    let pool_id = env.register(StakingPool, ());
    let pool = StakingPoolClient::new(&env, &pool_id);

    let lp = lp_token::LpTokenClient::new(&env, &env.register(lp_token::LpToken, ()));
    lp.initialize(
        &pool_id,
        &String::from_str(&env, "Fuzz Share"),
        &String::from_str(&env, "FZS"),
        &18,
    );
    let vault = vault::VaultClient::new(&env, &env.register(vault::Vault, ()));
    vault.initialize(&pool_id, &native_token);

    let factory = Address::generate(&env);
    let distribution = Address::generate(&env);
    let owner = Address::generate(&env);
    pool.initialize(
        &String::from_str(&env, "Fuzz Pool"),
        &factory,
        &factory,
        &vault.address,
        &lp.address,
        &reward_token,
        &distribution,
        &1,
        &owner,
    );

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        sac.mint(&user, &(u64::MAX as i128));
        users.push(user);
    }
    // Reward payouts draw on the pool's own balance.
    sac.mint(&pool_id, &(u64::MAX as i128));

    // Looking for arithmetic panics and accounting that goes negative;
    // typed errors from try_ calls are expected and ignored.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount } => {
                let _ = pool.try_stake(caller, &(amount as i128));
            }
            FuzzAction::Withdraw { shares } => {
                let _ = pool.try_withdraw(caller, &(shares as i128));
            }
            FuzzAction::Claim => {
                let _ = pool.try_claim_reward(caller);
            }
            FuzzAction::Notify { amount } => {
                let _ = pool.try_notify_reward_amount(&distribution, &(amount as i128));
            }
            FuzzAction::AdvanceTime { seconds } => {
                env.ledger().with_mut(|l| {
                    l.timestamp = l.timestamp.saturating_add(seconds as u64);
                });
            }
        }
    }

    assert!(pool.reward_left() >= 0);
    assert!(lp.total_supply() >= 0);
});
