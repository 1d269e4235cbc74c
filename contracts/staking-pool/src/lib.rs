//! Upgradeable staking pool.
//!
//! Deposits are pulled into an owner-gated vault and receipted with share
//! tokens minted at the pool's exchange rate. Rewards released through
//! [`rewards`] vest into that exchange rate, so every outstanding share
//! appreciates and accrued reward compounds. The pool is Active until the
//! factory supersedes it with a replacement instance; a superseded pool
//! refuses further mutation but gains balance-sweep operations that forward
//! stragglers to the successor.

#![no_std]
#![allow(deprecated)]

use common::{
    interfaces::{OwnableClient, ShareTokenClient, VaultClient},
    math, ownable, Error,
};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, String, Symbol};

mod events;
pub mod rewards;

pub use rewards::REWARD_DURATION;

// ── Storage keys ─────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const NAME: Symbol = symbol_short!("NAME");
const VERSION: Symbol = symbol_short!("VERSION");
const FACTORY: Symbol = symbol_short!("FACTORY");
const OLD_ADDRESS: Symbol = symbol_short!("OLD_ADDR");
const NEW_ADDRESS: Symbol = symbol_short!("NEW_ADDR");
const VAULT: Symbol = symbol_short!("VAULT");
const LP_TOKEN: Symbol = symbol_short!("LP_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const REWARD_DISTRIBUTION: Symbol = symbol_short!("RWD_DIST");
const EXCHANGE_RATE: Symbol = symbol_short!("EXCH_RATE");
const REWARD_RATE: Symbol = symbol_short!("RWD_RATE");
const PERIOD_FINISH: Symbol = symbol_short!("PERIOD_FN");
const LAST_UPDATE: Symbol = symbol_short!("LAST_UPD");
const REWARDS_LEFT: Symbol = symbol_short!("RWD_LEFT");

// Per-account persistent storage uses tuple keys: (prefix, address)
const DEPOSITED: Symbol = symbol_short!("DEPOSITED");

#[contract]
pub struct StakingPool;

#[contractimpl]
impl StakingPool {
    /// Bootstrap a pool instance. For a fresh pool `old_address` is the
    /// factory itself and `version` is 1; for an upgrade the factory passes
    /// the superseded pool and its version plus one.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
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
    ) -> Result<(), Error> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(Error::AlreadyInitialized);
        }
        if version == 0 {
            return Err(Error::InvalidAmount);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&VERSION, &version);
        env.storage().instance().set(&FACTORY, &factory);
        env.storage().instance().set(&OLD_ADDRESS, &old_address);
        env.storage().instance().set(&VAULT, &vault);
        env.storage().instance().set(&LP_TOKEN, &lp_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage()
            .instance()
            .set(&REWARD_DISTRIBUTION, &reward_distribution);
        // Shares start at par with the underlying.
        env.storage().instance().set(&EXCHANGE_RATE, &math::UNIT);
        ownable::init_owner(&env, &owner);

        events::publish_initialized(&env, name, factory, vault, lp_token, version);
        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Pull `amount` of the reward token from the caller into the vault and
    /// mint shares at the current exchange rate.
    pub fn stake(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        caller.require_auth();
        Self::require_active(&env)?;
        require_positive(amount)?;
        Self::vest_reward(&env)?;

        let vault = Self::get_vault(env.clone())?;
        let reward_token = Self::get_reward_token(env.clone())?;
        token::Client::new(&env, &reward_token).transfer(&caller, &vault, &amount);

        let shares = math::mul_div(&env, amount, math::UNIT, Self::get_exchange_rate(env.clone())?)?;
        let lp_token = Self::get_lp_token(env.clone())?;
        ShareTokenClient::new(&env, &lp_token).mint(
            &env.current_contract_address(),
            &caller,
            &shares,
        );

        let deposit = math::checked_add(Self::deposit_of(&env, &caller), amount)?;
        env.storage()
            .persistent()
            .set(&(DEPOSITED, caller.clone()), &deposit);

        events::publish_staked(&env, caller, amount, shares);
        Ok(())
    }

    /// Burn `shares` and release their full value, principal plus vested
    /// reward, from the vault at the current exchange rate.
    pub fn withdraw(env: Env, caller: Address, shares: i128) -> Result<(), Error> {
        caller.require_auth();
        Self::require_active(&env)?;
        require_positive(shares)?;
        Self::vest_reward(&env)?;

        let lp_token = Self::get_lp_token(env.clone())?;
        let lp = ShareTokenClient::new(&env, &lp_token);
        let balance = lp.balance(&caller);
        if balance < shares {
            return Err(Error::InsufficientBalance);
        }

        // Retire the proportional slice of the caller's recorded deposit.
        let deposit = Self::deposit_of(&env, &caller);
        let retired = math::mul_div(&env, deposit, shares, balance)?;
        env.storage()
            .persistent()
            .set(&(DEPOSITED, caller.clone()), &(deposit - retired));

        lp.burn(&env.current_contract_address(), &caller, &shares);

        let released = math::mul_div(&env, shares, Self::get_exchange_rate(env.clone())?, math::UNIT)?;
        let vault = Self::get_vault(env.clone())?;
        let reward_token = Self::get_reward_token(env.clone())?;
        VaultClient::new(&env, &vault).safe_transfer(
            &env.current_contract_address(),
            &reward_token,
            &caller,
            &released,
        );

        events::publish_withdrawn(&env, caller, shares, released);
        Ok(())
    }

    /// Realise accrued reward without touching the deposit: burns exactly
    /// the shares whose value exceeds the caller's recorded deposit and
    /// pays that value out, leaving the remaining shares worth the deposit.
    pub fn claim_reward(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_active(&env)?;
        Self::vest_reward(&env)?;

        let lp_token = Self::get_lp_token(env.clone())?;
        let lp = ShareTokenClient::new(&env, &lp_token);
        let rate = Self::get_exchange_rate(env.clone())?;
        let value = math::mul_div(&env, lp.balance(&caller), rate, math::UNIT)?;
        let deposit = Self::deposit_of(&env, &caller);
        if value <= deposit {
            return Ok(());
        }

        let reward = math::checked_sub(value, deposit)?;
        let burned = math::mul_div(&env, reward, math::UNIT, rate)?;
        if burned <= 0 {
            return Ok(());
        }
        let paid = math::mul_div(&env, burned, rate, math::UNIT)?;

        lp.burn(&env.current_contract_address(), &caller, &burned);
        let vault = Self::get_vault(env.clone())?;
        let reward_token = Self::get_reward_token(env.clone())?;
        VaultClient::new(&env, &vault).safe_transfer(
            &env.current_contract_address(),
            &reward_token,
            &caller,
            &paid,
        );

        events::publish_reward_paid(&env, caller, paid);
        Ok(())
    }

    /// Queue `amount` of reward for release over the next period. Restricted
    /// to the reward-distribution identity. An unfinished period's remainder
    /// is folded into the new rate.
    pub fn notify_reward_amount(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        caller.require_auth();
        Self::require_active(&env)?;
        if caller != Self::get_reward_distribution(env.clone())? {
            return Err(Error::OnlyRewardDistribution);
        }
        require_positive(amount)?;
        Self::vest_reward(&env)?;

        let now = env.ledger().timestamp();
        let rate = rewards::new_reward_rate(
            &env,
            amount,
            Self::reward_rate(&env),
            Self::period_finish(&env),
            now,
        )?;
        let finish = now + REWARD_DURATION;

        env.storage().instance().set(&REWARD_RATE, &rate);
        env.storage().instance().set(&LAST_UPDATE, &now);
        env.storage().instance().set(&PERIOD_FINISH, &finish);
        let left = math::checked_add(Self::reward_left(env.clone()), amount)?;
        env.storage().instance().set(&REWARDS_LEFT, &left);

        events::publish_reward_added(&env, amount, rate, finish);
        Ok(())
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    /// Supersede this pool. Factory only, once. Records the successor and
    /// nominates vault and share-token ownership to it; the successor
    /// finalises the hand-off through [`Self::accept_ownership`].
    pub fn upgrade(env: Env, caller: Address, new_pool: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_active(&env)?;
        if caller != Self::get_factory(env.clone())? {
            return Err(Error::OnlyFactory);
        }

        env.storage().instance().set(&NEW_ADDRESS, &new_pool);

        let this = env.current_contract_address();
        let vault = Self::get_vault(env.clone())?;
        let lp_token = Self::get_lp_token(env.clone())?;
        OwnableClient::new(&env, &vault).nominate_owner(&this, &new_pool);
        OwnableClient::new(&env, &lp_token).nominate_owner(&this, &new_pool);

        events::publish_upgraded(&env, this, new_pool);
        Ok(())
    }

    /// Accept a pending ownership nomination on an Ownable collaborator —
    /// the receiving half of the upgrade hand-off.
    pub fn accept_ownership(env: Env, caller: Address, contract: Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        Self::require_factory_or_owner(&env, &caller)?;

        OwnableClient::new(&env, &contract).accept_owner(&env.current_contract_address());
        Ok(())
    }

    /// Reprice shares against the underlying. Factory only.
    pub fn set_exchange_rate(env: Env, caller: Address, rate: i128) -> Result<(), Error> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        if caller != Self::get_factory(env.clone())? {
            return Err(Error::OnlyFactory);
        }
        require_positive(rate)?;

        env.storage().instance().set(&EXCHANGE_RATE, &rate);
        events::publish_exchange_rate_set(&env, rate);
        Ok(())
    }

    // ── Post-upgrade sweeps ─────────────────────────────────────────────────

    /// Forward this instance's residual balance of `token` to the successor.
    /// Enabled only once superseded; covers funds arriving after hand-off.
    pub fn transfer_token_balance(env: Env, caller: Address, token: Address) -> Result<(), Error> {
        caller.require_auth();
        ownable::require_owner(&env, &caller)?;
        let successor = Self::require_superseded(&env)?;

        let this = env.current_contract_address();
        let client = token::Client::new(&env, &token);
        let amount = client.balance(&this);
        if amount > 0 {
            client.transfer(&this, &successor, &amount);
        }

        events::publish_balance_swept(&env, token, successor, amount);
        Ok(())
    }

    /// Forward this instance's residual base-currency balance to the
    /// successor. The native-asset contract is resolved through the vault.
    pub fn transfer_native_balance(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        ownable::require_owner(&env, &caller)?;
        let successor = Self::require_superseded(&env)?;

        let vault = Self::get_vault(env.clone())?;
        let native = VaultClient::new(&env, &vault).native_token();

        let this = env.current_contract_address();
        let client = token::Client::new(&env, &native);
        let amount = client.balance(&this);
        if amount > 0 {
            client.transfer(&this, &successor, &amount);
        }

        events::publish_balance_swept(&env, native, successor, amount);
        Ok(())
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn get_name(env: Env) -> Result<String, Error> {
        env.storage().instance().get(&NAME).ok_or(Error::NotInitialized)
    }

    pub fn get_version(env: Env) -> Result<u32, Error> {
        env.storage()
            .instance()
            .get(&VERSION)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_factory(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&FACTORY)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_old_address(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&OLD_ADDRESS)
            .ok_or(Error::NotInitialized)
    }

    /// The successor, once this pool has been superseded.
    pub fn get_new_address(env: Env) -> Option<Address> {
        env.storage().instance().get(&NEW_ADDRESS)
    }

    pub fn get_vault(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&VAULT)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_lp_token(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&LP_TOKEN)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_reward_distribution(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&REWARD_DISTRIBUTION)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_exchange_rate(env: Env) -> Result<i128, Error> {
        env.storage()
            .instance()
            .get(&EXCHANGE_RATE)
            .ok_or(Error::NotInitialized)
    }

    /// Reward notified but not yet vested into the exchange rate.
    pub fn reward_left(env: Env) -> i128 {
        env.storage().instance().get(&REWARDS_LEFT).unwrap_or(0)
    }

    /// Raw amount `account` has deposited and not yet withdrawn.
    pub fn deposited(env: Env, account: Address) -> i128 {
        Self::deposit_of(&env, &account)
    }

    /// Reward claimable by `account` as of now: the value of its shares at
    /// the projected exchange rate beyond its recorded deposit.
    pub fn earned(env: Env, account: Address) -> Result<i128, Error> {
        let lp_token = Self::get_lp_token(env.clone())?;
        let balance = ShareTokenClient::new(&env, &lp_token).balance(&account);
        let rate = Self::projected_exchange_rate(&env)?;
        let value = math::mul_div(&env, balance, rate, math::UNIT)?;
        let deposit = Self::deposit_of(&env, &account);
        if value <= deposit {
            return Ok(0);
        }
        math::checked_sub(value, deposit)
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

    /// The checkpoint discipline: runs first in every mutating entry point.
    /// Moves reward vested since the last checkpoint from this contract's
    /// own balance into the vault and folds it into the exchange rate, so
    /// share values are current before the entry point's own logic reads
    /// them. With zero supply nothing vests and the checkpoint still
    /// advances, so the skipped slice stays in `reward_left`.
    fn vest_reward(env: &Env) -> Result<(), Error> {
        let applicable =
            rewards::applicable_time(env.ledger().timestamp(), Self::period_finish(env));

        let lp_token = Self::get_lp_token(env.clone())?;
        let total = ShareTokenClient::new(env, &lp_token).total_supply();
        if total > 0 {
            let vested = rewards::vested_amount(
                env,
                Self::reward_rate(env),
                Self::last_update(env),
                applicable,
                Self::reward_left(env.clone()),
            )?;
            if vested > 0 {
                let reward_token = Self::get_reward_token(env.clone())?;
                let vault = Self::get_vault(env.clone())?;
                token::Client::new(env, &reward_token).transfer(
                    &env.current_contract_address(),
                    &vault,
                    &vested,
                );

                let rate = math::checked_add(
                    Self::get_exchange_rate(env.clone())?,
                    rewards::rate_increment(env, vested, total)?,
                )?;
                env.storage().instance().set(&EXCHANGE_RATE, &rate);

                let left = math::checked_sub(Self::reward_left(env.clone()), vested)?;
                env.storage().instance().set(&REWARDS_LEFT, &left);
            }
        }

        env.storage().instance().set(&LAST_UPDATE, &applicable);
        Ok(())
    }

    /// The stored exchange rate plus whatever has vested since the last
    /// checkpoint. View-side only; mutators checkpoint instead.
    fn projected_exchange_rate(env: &Env) -> Result<i128, Error> {
        let rate = Self::get_exchange_rate(env.clone())?;

        let lp_token = Self::get_lp_token(env.clone())?;
        let total = ShareTokenClient::new(env, &lp_token).total_supply();
        if total <= 0 {
            return Ok(rate);
        }

        let applicable =
            rewards::applicable_time(env.ledger().timestamp(), Self::period_finish(env));
        let vested = rewards::vested_amount(
            env,
            Self::reward_rate(env),
            Self::last_update(env),
            applicable,
            Self::reward_left(env.clone()),
        )?;
        if vested <= 0 {
            return Ok(rate);
        }
        math::checked_add(rate, rewards::rate_increment(env, vested, total)?)
    }

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn require_active(env: &Env) -> Result<(), Error> {
        Self::require_initialized(env)?;
        if env.storage().instance().has(&NEW_ADDRESS) {
            return Err(Error::PoolUpgraded);
        }
        Ok(())
    }

    fn require_superseded(env: &Env) -> Result<Address, Error> {
        Self::require_initialized(env)?;
        Self::get_new_address(env.clone()).ok_or(Error::PoolNotUpgraded)
    }

    fn require_factory_or_owner(env: &Env, caller: &Address) -> Result<(), Error> {
        if *caller == Self::get_factory(env.clone())? {
            return Ok(());
        }
        ownable::require_owner(env, caller)
    }

    fn reward_rate(env: &Env) -> i128 {
        env.storage().instance().get(&REWARD_RATE).unwrap_or(0)
    }

    fn period_finish(env: &Env) -> u64 {
        env.storage().instance().get(&PERIOD_FINISH).unwrap_or(0)
    }

    fn last_update(env: &Env) -> u64 {
        env.storage().instance().get(&LAST_UPDATE).unwrap_or(0)
    }

    fn deposit_of(env: &Env, account: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(DEPOSITED, account.clone()))
            .unwrap_or(0)
    }
}

fn require_positive(amount: i128) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}
