/// Seconds in the interest year. Exactly 365 days — no leap-year adjustment.
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Combined divisor for the APR formula: a full year of seconds times the
/// percentage scale (APR is expressed in whole percentage points).
pub const APR_DIVISOR: i128 = (SECONDS_PER_YEAR as i128) * 100;

// ── Core accrual engine ─────────────────────────────────────────────────────

/// Compute the end of the accrual window for a settlement at `now`.
///
/// The pool pays interest only up to the earliest of:
/// - `now` itself,
/// - the end of the lock-in period (`interest_start + lockin_period`),
/// - the pool end time.
///
/// `saturating_add` keeps a pathological `lockin_period` from wrapping;
/// the window then simply caps at `pool_end`.
pub fn accrual_window_end(now: u64, interest_start: u64, lockin_period: u64, pool_end: u64) -> u64 {
    let lockin_end = interest_start.saturating_add(lockin_period);
    now.min(lockin_end).min(pool_end)
}

/// Reward owed for the span between `last_updated` and the accrual window
/// end, at a fixed annual rate:
///
/// ```text
/// window_end = min(now, interest_start + lockin_period, pool_end)
/// pending    = amount × fixed_apr × (window_end − last_updated)
///              / (365 × 86_400 × 100)
/// ```
///
/// Returns zero before `interest_start`, with nothing staked, or when the
/// window has already been settled through (`window_end <= last_updated`).
/// Integer floor division: the sub-unit fraction is dropped, not carried
/// forward to the next settlement.
#[allow(clippy::arithmetic_side_effects)]
pub fn pending_reward(
    amount: i128,
    fixed_apr: u32,
    last_updated: u64,
    now: u64,
    interest_start: u64,
    lockin_period: u64,
    pool_end: u64,
) -> i128 {
    if now < interest_start || amount <= 0 {
        return 0;
    }

    let window_end = accrual_window_end(now, interest_start, lockin_period, pool_end);
    if window_end <= last_updated {
        return 0;
    }
    let elapsed = window_end - last_updated;

    // amount and fixed_apr are validated positive upstream; elapsed is u64,
    // so every factor fits in i128. saturating_mul clamps instead of
    // wrapping for absurd inputs.
    amount
        .saturating_mul(fixed_apr as i128)
        .saturating_mul(elapsed as i128)
        / APR_DIVISOR
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
