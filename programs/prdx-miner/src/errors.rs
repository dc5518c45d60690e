use anchor_lang::prelude::*;

#[error_code]
pub enum MinerError {
    #[msg("Unauthorized access")]
    Unauthorized,
    #[msg("Production is disabled")]
    ProductionDisabled,
    #[msg("Unclaimed amount is below the claim minimum")]
    InsufficientClaimAmount,
    #[msg("Daily bonus already claimed in the last 24 hours")]
    DailyBonusCooldown,
    #[msg("Video already submitted in the last 24 hours")]
    VideoCooldown,
    #[msg("Booster channel already activated")]
    AlreadySubscribed,
    #[msg("Invalid booster channel index")]
    InvalidBoosterChannel,
    #[msg("Self-referral is not allowed")]
    SelfReferralNotAllowed,
    #[msg("A referral code was already applied to this account")]
    AlreadyReferred,
    #[msg("Referral already recorded for this account")]
    DuplicateReferral,
    #[msg("Referral list is full")]
    ReferralListFull,
    #[msg("Accrual rate exceeds the allowed ceiling")]
    InvalidAccrualRate,
    #[msg("Display name exceeds the maximum length")]
    NameTooLong,
    #[msg("Video link is empty or exceeds the maximum length")]
    InvalidVideoLink,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Invalid parameter index")]
    InvalidParameterIndex,
    #[msg("Invalid parameter value")]
    InvalidParameterValue,
}
