//! Pure accrual math. This is the single place offline-accrual amounts are
//! computed; clients run the same function for their local display tick so
//! both sides converge on identical numbers for identical inputs.

/// Resource produced by a constant rate over an elapsed wall-clock window.
///
/// `elapsed_secs` beyond `cap_secs` is forfeited. Negative elapsed time
/// (clock skew, clock rollback) is clamped to zero and never produces
/// negative accrual.
pub fn compute_accrual(rate_micro_per_sec: u64, elapsed_secs: i64, cap_secs: i64) -> u64 {
    if elapsed_secs <= 0 || cap_secs <= 0 {
        return 0;
    }
    let effective_secs = elapsed_secs.min(cap_secs) as u128;
    let amount = (rate_micro_per_sec as u128).saturating_mul(effective_secs);
    amount.min(u64::MAX as u128) as u64
}

/// Seconds left before a 24h-style window reopens. Zero means the guard
/// passes. A `last` of zero is treated as "never granted".
pub fn remaining_cooldown(now: i64, last: i64, cooldown_secs: i64) -> i64 {
    if last <= 0 {
        return 0;
    }
    last.saturating_add(cooldown_secs).saturating_sub(now).max(0)
}
