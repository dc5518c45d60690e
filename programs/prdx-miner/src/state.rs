use anchor_lang::prelude::*;

use crate::{constants::*, errors::MinerError, helpers::*};

#[account]
pub struct GlobalState {
    /* ── governance ─────────────────────────────── */
    pub authority: Pubkey,        // Governance authority
    pub production_enabled: bool, // Global kill-switch

    /* ── accrual params ─────────────────────────── */
    pub base_accrual_rate: u64,    // micro/s for a fresh account
    pub booster_rate_delta: u64,   // micro/s per activated booster channel
    pub referral_rate_delta: u64,  // micro/s for each referral party
    pub accrual_rate_ceiling: u64, // rates above this are corrupted state
    pub offline_cap_secs: i64,     // max offline span ever credited
    pub min_claim_micro: u64,      // claim threshold
    pub video_reward_micro: u64,   // flat once-per-day video reward
    pub bonus_cooldown_secs: i64,  // daily bonus / video window

    /* ── global stats ───────────────────────────── */
    pub total_miners: u64,
    pub total_claimed_micro: u64,
    pub total_bonuses_granted: u64,
    pub total_referrals: u64,
    pub total_videos_submitted: u64,
}

impl GlobalState {
    pub const SPACE: usize = 32 // authority
        + 1                     // production_enabled
        + 8 * 6                 // rate params + min_claim + video_reward
        + 8 * 2                 // offline_cap_secs + bonus_cooldown_secs
        + 8 * 5                 // stats
        + 64; // padding for future expansion
}

/// One ledger record per authenticated wallet. All mutations happen inside
/// instructions, which the runtime serializes per account.
#[account]
pub struct Miner {
    pub authority: Pubkey,
    pub display_name: String, // last-write-wins label

    /* ── balances ───────────────────────────────── */
    pub unclaimed_accrued: u64, // accrued since the last claim
    pub lifetime_mined: u64,    // total ever produced, never decreases
    pub balance: u64,           // spendable, never decreases

    /* ── accrual ────────────────────────────────── */
    pub accrual_rate: u64,   // micro/s
    pub last_accrual_ts: i64, // last instant accrual was credited from
    pub last_login_ts: i64,   // last session start

    /* ── grants ─────────────────────────────────── */
    pub booster_bitset: u16,       // activated booster channels
    pub daily_bonus_day: u8,       // 0 = never granted, else 1..=10
    pub last_daily_bonus_ts: i64,  // 0 = unset
    pub referrals: Vec<ReferralEntry>,
    pub referred_by: Option<Pubkey>, // one-time settable
    pub last_video_ts: i64,          // 0 = unset

    /* ── stats ──────────────────────────────────── */
    pub total_claims: u64,
    pub created_ts: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct ReferralEntry {
    pub miner: Pubkey,
    pub display_name: String,
    pub mined_amount: u64,
}

impl Miner {
    pub const SPACE: usize = 32 // authority
        + 4 + MAX_NAME_LEN      // display_name
        + 8 + 8 + 8             // unclaimed_accrued + lifetime_mined + balance
        + 8 + 8 + 8             // accrual_rate + last_accrual_ts + last_login_ts
        + 2 + 1 + 8             // booster_bitset + daily_bonus_day + last_daily_bonus_ts
        + 4 + MAX_REFERRALS * ReferralEntry::SPACE // referrals
        + 33                    // referred_by: Option<Pubkey>
        + 8                     // last_video_ts
        + 8 + 8                 // total_claims + created_ts
        + 64; // padding for future expansion

    /// Persisted rates above the ceiling are treated as corruption, not as a
    /// big number to keep honoring.
    pub fn validate_rate(&self, ceiling: u64) -> Result<()> {
        require!(
            self.accrual_rate <= ceiling,
            MinerError::InvalidAccrualRate
        );
        Ok(())
    }

    /// Credit accrual for the wall-clock interval since the last credit and
    /// advance the accrual timestamp in the same step, so no interval can be
    /// credited twice. Returns the credited amount.
    pub fn credit_accrual(&mut self, now: i64, cap_secs: i64, ceiling: u64) -> Result<u64> {
        self.validate_rate(ceiling)?;
        let elapsed = now.saturating_sub(self.last_accrual_ts);
        let credited = compute_accrual(self.accrual_rate, elapsed, cap_secs);
        if credited > 0 {
            self.unclaimed_accrued = self
                .unclaimed_accrued
                .checked_add(credited)
                .ok_or(MinerError::MathOverflow)?;
            self.lifetime_mined = self
                .lifetime_mined
                .checked_add(credited)
                .ok_or(MinerError::MathOverflow)?;
        }
        // A rolled-back clock must not move the credit point backwards, or
        // the same interval could be credited again once the clock recovers.
        if now > self.last_accrual_ts {
            self.last_accrual_ts = now;
        }
        Ok(credited)
    }

    /// Convert the whole unclaimed amount into spendable balance. The second
    /// of two racing claims re-reads `unclaimed_accrued == 0` and fails the
    /// threshold guard, so an amount is never credited twice.
    pub fn settle_claim(&mut self, now: i64, min_claim: u64) -> Result<u64> {
        require!(
            self.unclaimed_accrued >= min_claim,
            MinerError::InsufficientClaimAmount
        );
        let amount = self.unclaimed_accrued;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(MinerError::MathOverflow)?;
        self.unclaimed_accrued = 0;
        self.last_accrual_ts = self.last_accrual_ts.max(now);
        self.total_claims = self.total_claims.saturating_add(1);
        Ok(amount)
    }

    /// Advance the 10-day cycle and credit the bonus for the new day.
    /// Returns (amount, new cycle day).
    pub fn grant_daily_bonus(&mut self, now: i64, cooldown_secs: i64) -> Result<(u64, u8)> {
        require!(
            remaining_cooldown(now, self.last_daily_bonus_ts, cooldown_secs) == 0,
            MinerError::DailyBonusCooldown
        );
        let day = (self.daily_bonus_day % 10) + 1;
        let amount = daily_bonus_for_day(day).ok_or(MinerError::MathOverflow)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(MinerError::MathOverflow)?;
        self.daily_bonus_day = day;
        self.last_daily_bonus_ts = now;
        Ok((amount, day))
    }

    /// One-shot booster grant. A repeat activation for the same channel is
    /// rejected with the rate untouched.
    pub fn activate_booster(&mut self, channel_index: u8, delta: u64, ceiling: u64) -> Result<u64> {
        require!(
            channel_index < MAX_BOOSTER_CHANNELS,
            MinerError::InvalidBoosterChannel
        );
        let bit = 1u16 << channel_index;
        require!(
            self.booster_bitset & bit == 0,
            MinerError::AlreadySubscribed
        );
        self.booster_bitset |= bit;
        self.raise_rate(delta, ceiling)
    }

    /// Raise the accrual rate by a grant delta, never past the ceiling.
    pub fn raise_rate(&mut self, delta: u64, ceiling: u64) -> Result<u64> {
        let next = self
            .accrual_rate
            .checked_add(delta)
            .ok_or(MinerError::MathOverflow)?;
        self.accrual_rate = next.min(ceiling);
        Ok(self.accrual_rate)
    }

    pub fn grant_video_reward(&mut self, now: i64, cooldown_secs: i64, reward: u64) -> Result<u64> {
        require!(
            remaining_cooldown(now, self.last_video_ts, cooldown_secs) == 0,
            MinerError::VideoCooldown
        );
        self.balance = self
            .balance
            .checked_add(reward)
            .ok_or(MinerError::MathOverflow)?;
        self.last_video_ts = now;
        Ok(reward)
    }

    /// Append-only referral list, unique by referred miner.
    pub fn record_referral(&mut self, entry: ReferralEntry) -> Result<()> {
        require!(
            self.referrals.len() < MAX_REFERRALS,
            MinerError::ReferralListFull
        );
        require!(
            !self.referrals.iter().any(|r| r.miner == entry.miner),
            MinerError::DuplicateReferral
        );
        self.referrals.push(entry);
        Ok(())
    }

    pub fn set_display_name(&mut self, name: &str) -> Result<()> {
        require!(name.len() <= MAX_NAME_LEN, MinerError::NameTooLong);
        self.display_name = name.to_string();
        Ok(())
    }
}

impl ReferralEntry {
    pub const SPACE: usize = 32 // miner
        + 4 + MAX_NAME_LEN      // display_name
        + 8; // mined_amount
}

/// Bounded projection over the ledger, ordered by balance. Updated in the
/// same transaction as every balance change, so it always reflects the
/// authoritative balances it was derived from. Reads are plain snapshot
/// reads and take no locks.
#[account]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct LeaderboardEntry {
    pub miner: Pubkey,
    pub display_name: String,
    pub balance: u64,
}

impl LeaderboardEntry {
    pub const SPACE: usize = 32 // miner
        + 4 + MAX_NAME_LEN      // display_name
        + 8; // balance
}

impl Leaderboard {
    pub const SPACE: usize = 4 + LEADERBOARD_CAPACITY * LeaderboardEntry::SPACE // entries
        + 64; // padding for future expansion

    /// Upsert a miner's entry and restore ordering: balance descending,
    /// ties broken deterministically by pubkey. Entries past capacity fall
    /// off and report the overflow sentinel through `rank_of`.
    pub fn record(&mut self, miner: Pubkey, display_name: &str, balance: u64) {
        match self.entries.iter_mut().find(|e| e.miner == miner) {
            Some(entry) => {
                entry.balance = balance;
                entry.display_name = display_name.to_string();
            }
            None => self.entries.push(LeaderboardEntry {
                miner,
                display_name: display_name.to_string(),
                balance,
            }),
        }
        self.entries
            .sort_by(|a, b| b.balance.cmp(&a.balance).then(a.miner.cmp(&b.miner)));
        self.entries.truncate(LEADERBOARD_CAPACITY);
    }

    pub fn top_n(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// `1 + count(entries with strictly greater balance)` for a tracked
    /// miner. `None` for miners that fell off the projection; display maps
    /// that to the "100+" sentinel instead of computing an exact rank.
    pub fn rank_of(&self, miner: &Pubkey) -> Option<u64> {
        let entry = self.entries.iter().find(|e| e.miner == *miner)?;
        let ahead = self
            .entries
            .iter()
            .filter(|e| e.balance > entry.balance)
            .count();
        Some(ahead as u64 + 1)
    }
}
