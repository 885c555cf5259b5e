use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod fees;
pub mod instructions;
pub mod math;
pub mod pricing;
pub mod state;

use instructions::*;

declare_id!("7xFH8yGpJk4BubhFb1WsdCpL7Vjz9dkPxsF4aKug6iHk");

#[program]
pub mod tranche_vault {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        min_cr_bps: u64,
        target_cr_bps: u64,
        init_sol_usd: u64,
        init_lst_rate: u64,
        sol_usd_pyth_feed: Pubkey,
        pyth_program_id: Pubkey,
    ) -> Result<()> {
        instructions::initialize::initialize(
            ctx,
            min_cr_bps,
            target_cr_bps,
            init_sol_usd,
            init_lst_rate,
            sol_usd_pyth_feed,
            pyth_program_id,
        )
    }

    pub fn mint_stable(
        ctx: Context<MintStable>,
        lst_in: u64,
        min_stable_out: u64,
    ) -> Result<()> {
        instructions::mint_stable::mint_stable(ctx, lst_in, min_stable_out)
    }

    pub fn redeem_stable(
        ctx: Context<RedeemStable>,
        stable_in: u64,
        min_lst_out: u64,
    ) -> Result<()> {
        instructions::redeem_stable::redeem_stable(ctx, stable_in, min_lst_out)
    }

    pub fn mint_lever(ctx: Context<MintLever>, lst_in: u64, min_lever_out: u64) -> Result<()> {
        instructions::mint_lever::mint_lever(ctx, lst_in, min_lever_out)
    }

    pub fn redeem_lever(ctx: Context<RedeemLever>, lever_in: u64, min_lst_out: u64) -> Result<()> {
        instructions::redeem_lever::redeem_lever(ctx, lever_in, min_lst_out)
    }

    pub fn update_parameters(
        ctx: Context<UpdateParameters>,
        new_min_cr_bps: u64,
        new_target_cr_bps: u64,
    ) -> Result<()> {
        instructions::update_parameters::update_parameters(ctx, new_min_cr_bps, new_target_cr_bps)
    }

    pub fn update_prices(
        ctx: Context<UpdatePrices>,
        sol_usd: u64,
        lst_rate: u64,
        conf_usd: u64,
    ) -> Result<()> {
        instructions::update_prices::update_prices(ctx, sol_usd, lst_rate, conf_usd)
    }

    pub fn refresh_pyth_price(ctx: Context<RefreshPythPrice>) -> Result<()> {
        instructions::refresh_pyth_price::refresh_pyth_price(ctx)
    }

    pub fn sync_exchange_rate(ctx: Context<SyncExchangeRate>) -> Result<()> {
        instructions::sync_exchange_rate::sync_exchange_rate(ctx)
    }

    pub fn emergency_pause(
        ctx: Context<EmergencyPause>,
        mint_paused: bool,
        redeem_paused: bool,
    ) -> Result<()> {
        instructions::emergency_pause::emergency_pause(ctx, mint_paused, redeem_paused)
    }
}
