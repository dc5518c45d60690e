use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod helpers;
pub mod instructions;
pub mod state;


use errors::MinerError;
use instructions::*;
use std::str::FromStr;

const ADMIN: &str = "2FKjWV4zh7AVsmXonL7AM9Lh9zfpcE3e1dCYejWvd5W8";

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

#[program]
pub mod prdx_miner {
    use super::*;

    #[access_control(enforce_admin(ctx.accounts.authority.key))]
    pub fn initialize_program(ctx: Context<InitializeProgram>) -> Result<()> {
        instructions::initialize_program(ctx)
    }
    /// ────────────────────────────────────────────────────────────────────────────
    ///  ALL ADMIN FUNCTIONS ENFORCED BY AUTHORITY SIGNING IXS
    /// ────────────────────────────────────────────────────────────────────────────
    pub fn toggle_production(ctx: Context<ToggleProduction>, enable: bool) -> Result<()> {
        instructions::toggle_production(ctx, enable)
    }
    pub fn update_parameter(
        ctx: Context<UpdateParameters>,
        parameter_index: u8,
        parameter_value: u64,
    ) -> Result<()> {
        instructions::update_parameter(ctx, parameter_index, parameter_value)
    }

    // ────────────────────────────────────────────────────────────────────────────
    ///  NON ADMIN FUNCTIONS
    // ────────────────────────────────────────────────────────────────────────────
    pub fn sync_account(
        ctx: Context<SyncAccount>,
        display_name_hint: Option<String>,
    ) -> Result<()> {
        instructions::sync_account(ctx, display_name_hint)
    }

    pub fn save_account(ctx: Context<SaveAccount>, submitted: SubmittedSnapshot) -> Result<()> {
        instructions::save_account(ctx, submitted)
    }

    pub fn claim(ctx: Context<Claim>, claimed_amount_hint: u64) -> Result<()> {
        instructions::claim(ctx, claimed_amount_hint)
    }

    pub fn daily_bonus(ctx: Context<DailyBonus>) -> Result<()> {
        instructions::daily_bonus(ctx)
    }

    pub fn subscribe_booster(ctx: Context<SubscribeBooster>, channel_index: u8) -> Result<()> {
        instructions::subscribe_booster(ctx, channel_index)
    }

    pub fn register_referral(ctx: Context<RegisterReferral>, display_name: String) -> Result<()> {
        instructions::register_referral(ctx, display_name)
    }

    pub fn submit_video(ctx: Context<SubmitVideo>, link: String) -> Result<()> {
        instructions::submit_video(ctx, link)
    }
}

fn enforce_admin(key: &Pubkey) -> Result<()> {
    #[cfg(not(feature = "test"))]
    require!(
        *key == Pubkey::from_str(ADMIN).unwrap(),
        MinerError::Unauthorized
    );
    Ok(())
}
