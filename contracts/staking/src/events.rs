use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub fixed_apr: u32,
    pub interest_start: u64,
    pub pool_end: u64,
    pub lockin_period: u64,
    pub max_pool_size: i128,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user claims accrued reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws their full position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub principal: i128,
    pub reward: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when the admin sweeps the pool's stake-token custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencySweepEvent {
    pub admin: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the admin toggles the global claim gate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimToggledEvent {
    pub enabled: bool,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    reward_token: Address,
    fixed_apr: u32,
    interest_start: u64,
    pool_end: u64,
    lockin_period: u64,
    max_pool_size: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            reward_token,
            fixed_apr,
            interest_start,
            pool_end,
            lockin_period,
            max_pool_size,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardClaimedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    staker: Address,
    principal: i128,
    reward: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            principal,
            reward,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_sweep(env: &Env, admin: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SWEEP"), admin.clone()),
        EmergencySweepEvent {
            admin,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claim_toggled(env: &Env, enabled: bool) {
    env.events().publish(
        (symbol_short!("CLM_TGL"),),
        ClaimToggledEvent {
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}
