pub const GLOBAL_STATE_SEED: &[u8] = b"global_state";
pub const MINER_SEED: &[u8] = b"miner";
pub const LEADERBOARD_SEED: &[u8] = b"leaderboard";

// Fixed variables
pub const MICRO_PER_COIN: u64 = 1_000_000; // 6 decimals

// === Accrual economics =====================================================
// Rates are micro-coins produced per second of wall-clock time.
pub const BASE_ACCRUAL_RATE: u64 = 1_000; // 0.001 coins/s for a fresh account
pub const BOOSTER_RATE_DELTA: u64 = 3_000; // +0.003 coins/s per activated channel
pub const REFERRAL_RATE_DELTA: u64 = 1_000; // +0.001 coins/s, both parties
pub const ACCRUAL_RATE_CEILING: u64 = 100_000; // 0.1 coins/s; anything above is corrupted state

// Maximum offline span ever credited. Elapsed time beyond the cap is
// forfeited, never banked.
pub const OFFLINE_CAP_SECS: i64 = 4 * 60 * 60; // 4 hours

pub const MIN_CLAIM_MICRO: u64 = 100_000; // 0.1 coin claim threshold

// === Daily bonus ===========================================================
// 10-day cycle, indexed by cycle_day - 1, wraps 10 -> 1.
pub const DAILY_BONUS_TABLE: [u64; 10] = [
    1_000_000,  // day 1
    1_000_000,  // day 2
    2_000_000,  // day 3
    3_000_000,  // day 4
    5_000_000,  // day 5
    8_000_000,  // day 6
    13_000_000, // day 7
    21_000_000, // day 8
    34_000_000, // day 9
    55_000_000, // day 10
];

pub const BONUS_COOLDOWN_SECS: i64 = 24 * 60 * 60; // rolling 24h window

pub const VIDEO_REWARD_MICRO: u64 = 5_000_000; // flat 5 coins, once per 24h

// === Bounds ================================================================
pub const MAX_BOOSTER_CHANNELS: u8 = 16; // booster_bitset is a u16
pub const MAX_REFERRALS: usize = 64;
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_LINK_LEN: usize = 128;

pub const LEADERBOARD_CAPACITY: usize = 100; // rank beyond this reports "100+"

// Helper to get the bonus amount for a cycle day (1..=10)
pub fn daily_bonus_for_day(cycle_day: u8) -> Option<u64> {
    if cycle_day == 0 {
        return None;
    }
    DAILY_BONUS_TABLE.get(cycle_day as usize - 1).copied()
}
