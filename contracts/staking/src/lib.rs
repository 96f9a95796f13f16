#![no_std]

pub mod events;
pub mod guard;
pub mod interest;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const FIXED_APR: Symbol = symbol_short!("APR");
const INTEREST_START: Symbol = symbol_short!("INT_STRT");
const POOL_END: Symbol = symbol_short!("POOL_END");
const LOCKIN_PERIOD: Symbol = symbol_short!("LOCKIN");
const MAX_POOL_SIZE: Symbol = symbol_short!("MAX_POOL");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const CLAIM_ENABLED: Symbol = symbol_short!("CLAIM_ON");

// Per-user persistent storage uses a tuple key:  (STK, user_address)
const USER_STAKE: Symbol = symbol_short!("STK");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InvalidConfig = 5,
    WindowClosed = 6,
    CapacityExceeded = 7,
    InsufficientBalance = 8,
    ClaimDisabled = 9,
    NothingToClaim = 10,
    NoStakeFound = 11,
    NothingToSweep = 12,
    Reentrant = 13,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// A user's staking position, as of their last settlement.
///
/// Created zeroed on first stake, removed entirely on full withdrawal.
/// `accrued_reward` is the reward owed but not yet paid; it only reflects
/// time up to `last_updated` — use `get_pending_reward` for a live figure.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeRecord {
    pub amount: i128,
    pub last_updated: u64,
    pub accrued_reward: i128,
}

impl StakeRecord {
    fn zeroed() -> Self {
        StakeRecord {
            amount: 0,
            last_updated: 0,
            accrued_reward: 0,
        }
    }
}

/// Immutable pool parameters, set once at construction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub stake_token: Address,
    pub reward_token: Address,
    pub fixed_apr: u32,
    pub interest_start: u64,
    pub pool_end: u64,
    pub lockin_period: u64,
    pub max_pool_size: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolContract;

#[contractimpl]
impl StakingPoolContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `stake_token`    – SAC address of the token users lock up.
    /// * `reward_token`   – SAC address of the token interest is paid in.
    /// * `fixed_apr`      – annual rate in whole percentage points (10 = 10%).
    /// * `interest_start` – instant after which staking closes and accrual
    ///                      may begin; must be in the future.
    /// * `pool_end`       – hard stop for accrual; must be after
    ///                      `interest_start`.
    /// * `lockin_period`  – seconds after `interest_start` before withdrawal
    ///                      opens; also caps the accrual window.
    /// * `max_pool_size`  – hard cap on aggregate staked principal.
    ///
    /// Claiming starts disabled; the admin opts in via `set_claim_enabled`.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        reward_token: Address,
        fixed_apr: u32,
        interest_start: u64,
        pool_end: u64,
        lockin_period: u64,
        max_pool_size: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if stake_token == reward_token {
            return Err(ContractError::InvalidConfig);
        }
        if fixed_apr == 0 || max_pool_size <= 0 {
            return Err(ContractError::InvalidConfig);
        }

        let now = env.ledger().timestamp();
        if interest_start <= now || pool_end <= interest_start {
            return Err(ContractError::InvalidConfig);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&FIXED_APR, &fixed_apr);
        env.storage().instance().set(&INTEREST_START, &interest_start);
        env.storage().instance().set(&POOL_END, &pool_end);
        env.storage().instance().set(&LOCKIN_PERIOD, &lockin_period);
        env.storage().instance().set(&MAX_POOL_SIZE, &max_pool_size);
        env.storage().instance().set(&CLAIM_ENABLED, &false);
        // TOTAL_STAKED starts at zero; unwrap_or(0) handles the absent key,
        // so no explicit init needed.

        events::publish_initialized(
            &env,
            admin,
            stake_token,
            reward_token,
            fixed_apr,
            interest_start,
            pool_end,
            lockin_period,
            max_pool_size,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens. Only possible strictly before
    /// `interest_start`; repeat stakes accumulate into one record.
    ///
    /// Accrual is settled before the balance changes so interest is never
    /// computed over the wrong principal.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || {
            if amount <= 0 {
                return Err(ContractError::InvalidAmount);
            }

            let cfg = Self::read_config(&env)?;
            let now = env.ledger().timestamp();
            if now >= cfg.interest_start {
                return Err(ContractError::WindowClosed);
            }

            let prev_total: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
            let new_total = prev_total.saturating_add(amount);
            if new_total > cfg.max_pool_size {
                return Err(ContractError::CapacityExceeded);
            }

            // 1. Settle before touching the principal (a no-op for a
            //    first-time staker).
            let mut record = Self::load_record(&env, &staker);
            Self::settle(&mut record, &cfg, now);

            // 2. Pull tokens from the staker into custody. The balance
            //    pre-check turns an underfunded stake into a typed error
            //    instead of a host trap.
            let stake_client = token::Client::new(&env, &cfg.stake_token);
            if stake_client.balance(&staker) < amount {
                return Err(ContractError::InsufficientBalance);
            }
            stake_client.transfer(&staker, &env.current_contract_address(), &amount);

            // 3. Increase the user's principal and the global total.
            record.amount = record.amount.saturating_add(amount);
            Self::store_record(&env, &staker, &record);
            env.storage().instance().set(&TOTAL_STAKED, &new_total);

            events::publish_staked(&env, staker.clone(), amount, new_total);

            Ok(())
        })
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out the staker's settled reward. Principal and the global total
    /// are untouched; the position keeps accruing until the window cap.
    ///
    /// Returns the amount paid.
    pub fn claim_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || {
            let claim_enabled: bool = env.storage().instance().get(&CLAIM_ENABLED).unwrap_or(false);
            if !claim_enabled {
                return Err(ContractError::ClaimDisabled);
            }

            let cfg = Self::read_config(&env)?;
            let now = env.ledger().timestamp();

            let mut record = Self::load_record(&env, &staker);
            Self::settle(&mut record, &cfg, now);

            let reward = record.accrued_reward;
            if reward <= 0 {
                return Err(ContractError::NothingToClaim);
            }

            // Zero the owed amount before the transfer.
            record.accrued_reward = 0;
            Self::store_record(&env, &staker, &record);

            token::Client::new(&env, &cfg.reward_token).transfer(
                &env.current_contract_address(),
                &staker,
                &reward,
            );

            events::publish_reward_claimed(&env, staker.clone(), reward);

            Ok(reward)
        })
    }

    // ── Withdrawal ──────────────────────────────────────────────────────────

    /// Return the staker's full principal plus all accrued reward and delete
    /// the record. All-or-nothing: no partial withdrawal exists.
    ///
    /// Gated on the lock-in: fails with `WindowClosed` before
    /// `interest_start + lockin_period`.
    pub fn withdraw_all(env: Env, staker: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || {
            let cfg = Self::read_config(&env)?;
            let now = env.ledger().timestamp();
            if now < cfg.interest_start.saturating_add(cfg.lockin_period) {
                return Err(ContractError::WindowClosed);
            }

            let mut record = Self::load_record(&env, &staker);
            Self::settle(&mut record, &cfg, now);

            let principal = record.amount;
            if principal <= 0 {
                return Err(ContractError::NoStakeFound);
            }
            let reward = record.accrued_reward;

            // Remove the record and fix the books before any tokens move.
            env.storage().persistent().remove(&(USER_STAKE, staker.clone()));

            let prev_total: i128 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
            let new_total = prev_total.saturating_sub(principal);
            env.storage().instance().set(&TOTAL_STAKED, &new_total);

            token::Client::new(&env, &cfg.stake_token).transfer(
                &env.current_contract_address(),
                &staker,
                &principal,
            );
            if reward > 0 {
                token::Client::new(&env, &cfg.reward_token).transfer(
                    &env.current_contract_address(),
                    &staker,
                    &reward,
                );
            }

            events::publish_withdrawn(&env, staker.clone(), principal, reward, new_total);

            Ok(())
        })
    }

    // ── Admin functions ─────────────────────────────────────────────────────

    /// Sweep the pool's entire stake-token custody to the admin and reset
    /// the global total to zero.
    ///
    /// Individual stake records are NOT cleared: after a sweep they are
    /// stale and unbacked, and a later `withdraw_all` fails at the token
    /// transfer. Returns the swept amount.
    pub fn emergency_withdraw(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        guard::non_reentrant(&env, || {
            let stake_token: Address = env
                .storage()
                .instance()
                .get(&STAKE_TOKEN)
                .ok_or(ContractError::NotInitialized)?;

            let stake_client = token::Client::new(&env, &stake_token);
            let held = stake_client.balance(&env.current_contract_address());
            if held <= 0 {
                return Err(ContractError::NothingToSweep);
            }

            // Custody leaves, so the accounted total must follow it.
            env.storage().instance().set(&TOTAL_STAKED, &0i128);

            stake_client.transfer(&env.current_contract_address(), &caller, &held);

            events::publish_emergency_sweep(&env, caller.clone(), held);

            Ok(held)
        })
    }

    /// Unconditionally set the global claim gate.
    pub fn set_claim_enabled(
        env: Env,
        caller: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&CLAIM_ENABLED, &enabled);

        events::publish_claim_toggled(&env, enabled);

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Return the stored record as of the user's last settlement.
    ///
    /// Does NOT settle: `accrued_reward` can lag behind real time. A user
    /// without a live position gets a zeroed record.
    pub fn get_stake(env: Env, staker: Address) -> StakeRecord {
        Self::load_record(&env, &staker)
    }

    /// Return the reward the staker would hold if settled right now,
    /// without mutating anything.
    pub fn get_pending_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        let cfg = Self::read_config(&env)?;
        let record = Self::load_record(&env, &staker);
        let pending = interest::pending_reward(
            record.amount,
            cfg.fixed_apr,
            record.last_updated,
            env.ledger().timestamp(),
            cfg.interest_start,
            cfg.lockin_period,
            cfg.pool_end,
        );
        Ok(record.accrued_reward.saturating_add(pending))
    }

    /// Return the sum of all live stake records.
    ///
    /// Desynchronized from custody only after an emergency sweep, which
    /// resets it to zero while leaving the records behind.
    pub fn get_total_staked(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    pub fn is_claim_enabled(env: Env) -> bool {
        env.storage().instance().get(&CLAIM_ENABLED).unwrap_or(false)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Return the immutable pool parameters as one snapshot.
    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        Self::read_config(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: fail if the pool is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: fail closed if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn read_config(env: &Env) -> Result<PoolConfig, ContractError> {
        let instance = env.storage().instance();
        Ok(PoolConfig {
            stake_token: instance
                .get(&STAKE_TOKEN)
                .ok_or(ContractError::NotInitialized)?,
            reward_token: instance
                .get(&REWARD_TOKEN)
                .ok_or(ContractError::NotInitialized)?,
            fixed_apr: instance
                .get(&FIXED_APR)
                .ok_or(ContractError::NotInitialized)?,
            interest_start: instance
                .get(&INTEREST_START)
                .ok_or(ContractError::NotInitialized)?,
            pool_end: instance
                .get(&POOL_END)
                .ok_or(ContractError::NotInitialized)?,
            lockin_period: instance
                .get(&LOCKIN_PERIOD)
                .ok_or(ContractError::NotInitialized)?,
            max_pool_size: instance
                .get(&MAX_POOL_SIZE)
                .ok_or(ContractError::NotInitialized)?,
        })
    }

    fn load_record(env: &Env, staker: &Address) -> StakeRecord {
        env.storage()
            .persistent()
            .get(&(USER_STAKE, staker.clone()))
            .unwrap_or_else(StakeRecord::zeroed)
    }

    fn store_record(env: &Env, staker: &Address, record: &StakeRecord) {
        env.storage()
            .persistent()
            .set(&(USER_STAKE, staker.clone()), record);
    }

    /// Accrual step: fold the pending reward for `[last_updated, window_end]`
    /// into `accrued_reward`, then advance `last_updated` to `now`.
    ///
    /// Runs at the top of every state-changing operation, before the
    /// principal moves, so interest is never lost or double-counted.
    /// `last_updated` never goes backwards.
    fn settle(record: &mut StakeRecord, cfg: &PoolConfig, now: u64) {
        let pending = interest::pending_reward(
            record.amount,
            cfg.fixed_apr,
            record.last_updated,
            now,
            cfg.interest_start,
            cfg.lockin_period,
            cfg.pool_end,
        );
        record.accrued_reward = record.accrued_reward.saturating_add(pending);
        record.last_updated = record.last_updated.max(now);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
