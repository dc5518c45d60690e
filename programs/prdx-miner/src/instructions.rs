use anchor_lang::prelude::*;

use crate::{constants::*, errors::MinerError, helpers::*, state::*};

#[event]
pub struct ProgramInitialized {
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Authoritative snapshot pushed to the client after every reconcile. The
/// client overwrites its local projection with these numbers.
#[event]
pub struct AccountSynced {
    pub miner: Pubkey,
    pub created: bool,
    pub credited: u64,
    pub unclaimed_accrued: u64,
    pub balance: u64,
    pub accrual_rate: u64,
    pub timestamp: i64,
}

#[event]
pub struct AccountSaved {
    pub miner: Pubkey,
    pub display_name: String,
    pub timestamp: i64,
}

/// Outbound claim notification. Consumers that miss it cannot roll back the
/// committed claim.
#[event]
pub struct RewardsClaimed {
    pub miner: Pubkey,
    pub amount: u64,
    pub claimed_amount_hint: u64,
    pub new_balance: u64,
    pub timestamp: i64,
}

#[event]
pub struct DailyBonusGranted {
    pub miner: Pubkey,
    pub amount: u64,
    pub cycle_day: u8,
    pub timestamp: i64,
}

#[event]
pub struct BoosterActivated {
    pub miner: Pubkey,
    pub channel_index: u8,
    pub new_rate: u64,
    pub timestamp: i64,
}

#[event]
pub struct ReferralRegistered {
    pub referrer: Pubkey,
    pub referred: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct VideoSubmitted {
    pub miner: Pubkey,
    pub reward: u64,
    pub link: String,
    pub timestamp: i64,
}

/// ────────────────────────────────────────────────────────────────────────────
/// INTERNAL: bring a miner's accrual current
/// ────────────────────────────────────────────────────────────────────────────
fn sync_miner(miner: &mut Miner, gs: &GlobalState, now: i64) -> Result<u64> {
    let credited = miner.credit_accrual(now, gs.offline_cap_secs, gs.accrual_rate_ceiling)?;

    #[cfg(feature = "verbose")]
    msg!(
        "accrual credit: {} micro at {} micro/s, unclaimed now {}",
        credited,
        miner.accrual_rate,
        miner.unclaimed_accrued
    );

    Ok(credited)
}

/* ──────────────────────────
INITIALIZE
────────────────────────── */
#[derive(Accounts)]
pub struct InitializeProgram<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,
    #[account(
        init,
        payer = authority,
        space = 8 + GlobalState::SPACE,
        seeds = [GLOBAL_STATE_SEED],
        bump
    )]
    pub global_state: Account<'info, GlobalState>,
    #[account(
        init,
        payer = authority,
        space = 8 + Leaderboard::SPACE,
        seeds = [LEADERBOARD_SEED],
        bump
    )]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_program(ctx: Context<InitializeProgram>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let gs = &mut ctx.accounts.global_state;

    gs.authority = ctx.accounts.authority.key();
    gs.production_enabled = true;

    gs.base_accrual_rate = BASE_ACCRUAL_RATE;
    gs.booster_rate_delta = BOOSTER_RATE_DELTA;
    gs.referral_rate_delta = REFERRAL_RATE_DELTA;
    gs.accrual_rate_ceiling = ACCRUAL_RATE_CEILING;
    gs.offline_cap_secs = OFFLINE_CAP_SECS;
    gs.min_claim_micro = MIN_CLAIM_MICRO;
    gs.video_reward_micro = VIDEO_REWARD_MICRO;
    gs.bonus_cooldown_secs = BONUS_COOLDOWN_SECS;

    gs.total_miners = 0;
    gs.total_claimed_micro = 0;
    gs.total_bonuses_granted = 0;
    gs.total_referrals = 0;
    gs.total_videos_submitted = 0;

    emit!(ProgramInitialized {
        authority: gs.authority,
        timestamp: now,
    });

    Ok(())
}

/// ────────────────────────────────────────────────────────────────────────────
///  SYNC ACCOUNT (load-or-create + reconcile)
/// ────────────────────────────────────────────────────────────────────────────
#[derive(Accounts)]
pub struct SyncAccount<'info> {
    #[account(mut)]
    pub miner_wallet: Signer<'info>,
    #[account(
        init_if_needed,
        payer = miner_wallet,
        space = 8 + Miner::SPACE,
        seeds = [MINER_SEED, miner_wallet.key().as_ref()],
        bump
    )]
    pub miner: Box<Account<'info, Miner>>,
    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump,
    )]
    pub global_state: Account<'info, GlobalState>,
    pub system_program: Program<'info, System>,
}

pub fn sync_account(ctx: Context<SyncAccount>, display_name_hint: Option<String>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let gs = &mut ctx.accounts.global_state;
    let miner = &mut ctx.accounts.miner;

    require!(gs.production_enabled, MinerError::ProductionDisabled);

    let created = miner.authority == Pubkey::default();
    let credited = if created {
        // Lazy bootstrap: zeroed balances, base rate, both clocks at now.
        miner.authority = ctx.accounts.miner_wallet.key();
        miner.accrual_rate = gs.base_accrual_rate;
        miner.last_accrual_ts = now;
        miner.created_ts = now;
        gs.total_miners = gs.total_miners.saturating_add(1);
        0
    } else {
        sync_miner(miner, gs, now)?
    };

    if let Some(name) = display_name_hint.as_deref() {
        miner.set_display_name(name)?;
    }
    miner.last_login_ts = now;

    emit!(AccountSynced {
        miner: miner.authority,
        created,
        credited,
        unclaimed_accrued: miner.unclaimed_accrued,
        balance: miner.balance,
        accrual_rate: miner.accrual_rate,
        timestamp: now,
    });

    Ok(())
}

/// ────────────────────────────────────────────────────────────────────────────
///  SAVE ACCOUNT (client-submitted snapshot, revalidated)
/// ────────────────────────────────────────────────────────────────────────────

/// Full snapshot as the client holds it. Everything numeric in here is an
/// untrusted optimistic projection; only the allow-listed fields are ever
/// persisted verbatim.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct SubmittedSnapshot {
    pub display_name: String,
    pub balance: u64,
    pub unclaimed_accrued: u64,
    pub lifetime_mined: u64,
    pub accrual_rate: u64,
}

#[derive(Accounts)]
pub struct SaveAccount<'info> {
    pub miner_wallet: Signer<'info>,
    #[account(
        mut,
        constraint = miner.authority == miner_wallet.key() @ MinerError::Unauthorized,
        seeds = [MINER_SEED, miner_wallet.key().as_ref()],
        bump
    )]
    pub miner: Box<Account<'info, Miner>>,
    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump,
    )]
    pub global_state: Account<'info, GlobalState>,
}

pub fn save_account(ctx: Context<SaveAccount>, submitted: SubmittedSnapshot) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let gs = &ctx.accounts.global_state;
    let miner = &mut ctx.accounts.miner;

    require!(gs.production_enabled, MinerError::ProductionDisabled);
    require!(
        submitted.accrual_rate <= gs.accrual_rate_ceiling,
        MinerError::InvalidAccrualRate
    );

    // The server recomputes every numeric field itself; the submission only
    // carries the mutable profile data.
    sync_miner(miner, gs, now)?;
    miner.set_display_name(&submitted.display_name)?;

    if submitted.balance != miner.balance || submitted.unclaimed_accrued != miner.unclaimed_accrued
    {
        msg!(
            "client snapshot diverged (balance {} vs {}, unclaimed {} vs {}), keeping server values",
            submitted.balance,
            miner.balance,
            submitted.unclaimed_accrued,
            miner.unclaimed_accrued
        );
    }

    emit!(AccountSaved {
        miner: miner.authority,
        display_name: miner.display_name.clone(),
        timestamp: now,
    });

    Ok(())
}

/// ────────────────────────────────────────────────────────────────────────────
///  CLAIM
/// ────────────────────────────────────────────────────────────────────────────
#[derive(Accounts)]
pub struct Claim<'info> {
    pub miner_wallet: Signer<'info>,
    #[account(
        mut,
        constraint = miner.authority == miner_wallet.key() @ MinerError::Unauthorized,
        seeds = [MINER_SEED, miner_wallet.key().as_ref()],
        bump
    )]
    pub miner: Box<Account<'info, Miner>>,
    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump,
    )]
    pub global_state: Account<'info, GlobalState>,
    #[account(
        mut,
        seeds = [LEADERBOARD_SEED],
        bump,
    )]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
}

pub fn claim(ctx: Context<Claim>, claimed_amount_hint: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let gs = &mut ctx.accounts.global_state;
    let miner = &mut ctx.accounts.miner;

    require!(gs.production_enabled, MinerError::ProductionDisabled);

    // Credit whatever accrued since the last sync, then settle the whole
    // unclaimed amount. The server never trusts the client's number for the
    // credited amount; the hint only rides the notification event.
    sync_miner(miner, gs, now)?;
    let amount = miner.settle_claim(now, gs.min_claim_micro)?;

    gs.total_claimed_micro = gs.total_claimed_micro.saturating_add(amount);

    let leaderboard = &mut ctx.accounts.leaderboard;
    leaderboard.record(miner.authority, &miner.display_name, miner.balance);

    emit!(RewardsClaimed {
        miner: miner.authority,
        amount,
        claimed_amount_hint,
        new_balance: miner.balance,
        timestamp: now,
    });

    Ok(())
}

/// ────────────────────────────────────────────────────────────────────────────
///  DAILY BONUS
/// ────────────────────────────────────────────────────────────────────────────
#[derive(Accounts)]
pub struct DailyBonus<'info> {
    pub miner_wallet: Signer<'info>,
    #[account(
        mut,
        constraint = miner.authority == miner_wallet.key() @ MinerError::Unauthorized,
        seeds = [MINER_SEED, miner_wallet.key().as_ref()],
        bump
    )]
    pub miner: Box<Account<'info, Miner>>,
    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump,
    )]
    pub global_state: Account<'info, GlobalState>,
    #[account(
        mut,
        seeds = [LEADERBOARD_SEED],
        bump,
    )]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
}

pub fn daily_bonus(ctx: Context<DailyBonus>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let gs = &mut ctx.accounts.global_state;
    let miner = &mut ctx.accounts.miner;

    require!(gs.production_enabled, MinerError::ProductionDisabled);

    let remaining = remaining_cooldown(now, miner.last_daily_bonus_ts, gs.bonus_cooldown_secs);
    if remaining > 0 {
        msg!("daily bonus cooldown active: {}s remaining", remaining);
    }

    sync_miner(miner, gs, now)?;
    let (amount, cycle_day) = miner.grant_daily_bonus(now, gs.bonus_cooldown_secs)?;

    gs.total_bonuses_granted = gs.total_bonuses_granted.saturating_add(1);

    let leaderboard = &mut ctx.accounts.leaderboard;
    leaderboard.record(miner.authority, &miner.display_name, miner.balance);

    emit!(DailyBonusGranted {
        miner: miner.authority,
        amount,
        cycle_day,
        timestamp: now,
    });

    Ok(())
}

/// ────────────────────────────────────────────────────────────────────────────
///  SUBSCRIBE BOOSTER
/// ────────────────────────────────────────────────────────────────────────────
#[derive(Accounts)]
pub struct SubscribeBooster<'info> {
    pub miner_wallet: Signer<'info>,
    #[account(
        mut,
        constraint = miner.authority == miner_wallet.key() @ MinerError::Unauthorized,
        seeds = [MINER_SEED, miner_wallet.key().as_ref()],
        bump
    )]
    pub miner: Box<Account<'info, Miner>>,
    #[account(
        seeds = [GLOBAL_STATE_SEED],
        bump,
    )]
    pub global_state: Account<'info, GlobalState>,
}

pub fn subscribe_booster(ctx: Context<SubscribeBooster>, channel_index: u8) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let gs = &ctx.accounts.global_state;
    let miner = &mut ctx.accounts.miner;

    require!(gs.production_enabled, MinerError::ProductionDisabled);

    // Settle at the old rate before the grant raises it, so the raise never
    // applies retroactively to already-elapsed time.
    sync_miner(miner, gs, now)?;
    let new_rate =
        miner.activate_booster(channel_index, gs.booster_rate_delta, gs.accrual_rate_ceiling)?;

    emit!(BoosterActivated {
        miner: miner.authority,
        channel_index,
        new_rate,
        timestamp: now,
    });

    Ok(())
}

/// ────────────────────────────────────────────────────────────────────────────
///  REGISTER REFERRAL
/// ────────────────────────────────────────────────────────────────────────────
#[derive(Accounts)]
pub struct RegisterReferral<'info> {
    pub miner_wallet: Signer<'info>,
    #[account(
        mut,
        constraint = miner.authority == miner_wallet.key() @ MinerError::Unauthorized,
        seeds = [MINER_SEED, miner_wallet.key().as_ref()],
        bump
    )]
    pub miner: Box<Account<'info, Miner>>,
    /// CHECK: referrer's wallet, only used to derive their miner PDA.
    pub referrer_wallet: AccountInfo<'info>,
    #[account(
        mut,
        seeds = [MINER_SEED, referrer_wallet.key().as_ref()],
        bump
    )]
    pub referrer: Box<Account<'info, Miner>>,
    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump,
    )]
    pub global_state: Account<'info, GlobalState>,
}

pub fn register_referral(ctx: Context<RegisterReferral>, display_name: String) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let gs = &mut ctx.accounts.global_state;
    let miner = &mut ctx.accounts.miner;
    let referrer = &mut ctx.accounts.referrer;

    require!(gs.production_enabled, MinerError::ProductionDisabled);
    require!(
        ctx.accounts.referrer_wallet.key() != ctx.accounts.miner_wallet.key(),
        MinerError::SelfReferralNotAllowed
    );
    require!(miner.referred_by.is_none(), MinerError::AlreadyReferred);
    require!(display_name.len() <= MAX_NAME_LEN, MinerError::NameTooLong);

    // Both ledgers are locked by this transaction; settle both at their old
    // rates before raising them.
    sync_miner(miner, gs, now)?;
    sync_miner(referrer, gs, now)?;

    miner.referred_by = Some(referrer.authority);
    miner.raise_rate(gs.referral_rate_delta, gs.accrual_rate_ceiling)?;
    referrer.raise_rate(gs.referral_rate_delta, gs.accrual_rate_ceiling)?;
    referrer.record_referral(ReferralEntry {
        miner: miner.authority,
        display_name,
        mined_amount: 0,
    })?;

    gs.total_referrals = gs.total_referrals.saturating_add(1);

    emit!(ReferralRegistered {
        referrer: referrer.authority,
        referred: miner.authority,
        timestamp: now,
    });

    Ok(())
}

/// ────────────────────────────────────────────────────────────────────────────
///  SUBMIT VIDEO
/// ────────────────────────────────────────────────────────────────────────────
#[derive(Accounts)]
pub struct SubmitVideo<'info> {
    pub miner_wallet: Signer<'info>,
    #[account(
        mut,
        constraint = miner.authority == miner_wallet.key() @ MinerError::Unauthorized,
        seeds = [MINER_SEED, miner_wallet.key().as_ref()],
        bump
    )]
    pub miner: Box<Account<'info, Miner>>,
    #[account(
        mut,
        seeds = [GLOBAL_STATE_SEED],
        bump,
    )]
    pub global_state: Account<'info, GlobalState>,
    #[account(
        mut,
        seeds = [LEADERBOARD_SEED],
        bump,
    )]
    pub leaderboard: Box<Account<'info, Leaderboard>>,
}

pub fn submit_video(ctx: Context<SubmitVideo>, link: String) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let gs = &mut ctx.accounts.global_state;
    let miner = &mut ctx.accounts.miner;

    require!(gs.production_enabled, MinerError::ProductionDisabled);
    require!(
        !link.is_empty() && link.len() <= MAX_LINK_LEN,
        MinerError::InvalidVideoLink
    );

    let remaining = remaining_cooldown(now, miner.last_video_ts, gs.bonus_cooldown_secs);
    if remaining > 0 {
        msg!("video reward cooldown active: {}s remaining", remaining);
    }

    sync_miner(miner, gs, now)?;
    let reward = miner.grant_video_reward(now, gs.bonus_cooldown_secs, gs.video_reward_micro)?;

    gs.total_videos_submitted = gs.total_videos_submitted.saturating_add(1);

    let leaderboard = &mut ctx.accounts.leaderboard;
    leaderboard.record(miner.authority, &miner.display_name, miner.balance);

    emit!(VideoSubmitted {
        miner: miner.authority,
        reward,
        link,
        timestamp: now,
    });

    Ok(())
}

/// ────────────────────────────────────────────────────────────────────────────
///  ADMIN
/// ────────────────────────────────────────────────────────────────────────────
#[derive(Accounts)]
pub struct ToggleProduction<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,
    #[account(
        mut,
        has_one = authority @ MinerError::Unauthorized
    )]
    pub global_state: Account<'info, GlobalState>,
}

pub fn toggle_production(ctx: Context<ToggleProduction>, enable: bool) -> Result<()> {
    let global_state = &mut ctx.accounts.global_state;
    global_state.production_enabled = enable;
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateParameters<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,
    #[account(
        mut,
        has_one = authority @ MinerError::Unauthorized
    )]
    pub global_state: Account<'info, GlobalState>,
}

/// Updates a single parameter in the global state.
///
/// # Arguments
///
/// * `parameter_index` - The index of the parameter to update:
///     - 0: BaseAccrualRate (micro/s)
///     - 1: BoosterRateDelta (micro/s)
///     - 2: ReferralRateDelta (micro/s)
///     - 3: AccrualRateCeiling (micro/s)
///     - 4: OfflineCapSecs
///     - 5: MinClaimMicro
///     - 6: VideoRewardMicro
///     - 7: BonusCooldownSecs
/// * `parameter_value` - The new value for the parameter.
pub fn update_parameter(
    ctx: Context<UpdateParameters>,
    parameter_index: u8,
    parameter_value: u64,
) -> Result<()> {
    let global_state = &mut ctx.accounts.global_state;

    match parameter_index {
        0 => {
            // BaseAccrualRate
            require!(
                parameter_value > 0 && parameter_value <= global_state.accrual_rate_ceiling,
                MinerError::InvalidParameterValue
            );
            global_state.base_accrual_rate = parameter_value;
        }
        1 => {
            // BoosterRateDelta
            require!(
                parameter_value <= global_state.accrual_rate_ceiling,
                MinerError::InvalidParameterValue
            );
            global_state.booster_rate_delta = parameter_value;
        }
        2 => {
            // ReferralRateDelta
            require!(
                parameter_value <= global_state.accrual_rate_ceiling,
                MinerError::InvalidParameterValue
            );
            global_state.referral_rate_delta = parameter_value;
        }
        3 => {
            // AccrualRateCeiling
            require!(
                parameter_value >= global_state.base_accrual_rate,
                MinerError::InvalidParameterValue
            );
            global_state.accrual_rate_ceiling = parameter_value;
        }
        4 => {
            // OfflineCapSecs
            require!(parameter_value > 0, MinerError::InvalidParameterValue);
            global_state.offline_cap_secs = parameter_value as i64;
        }
        5 => {
            // MinClaimMicro
            require!(parameter_value > 0, MinerError::InvalidParameterValue);
            global_state.min_claim_micro = parameter_value;
        }
        6 => {
            // VideoRewardMicro
            global_state.video_reward_micro = parameter_value;
        }
        7 => {
            // BonusCooldownSecs
            require!(parameter_value > 0, MinerError::InvalidParameterValue);
            global_state.bonus_cooldown_secs = parameter_value as i64;
        }
        _ => return err!(MinerError::InvalidParameterIndex),
    }

    Ok(())
}
