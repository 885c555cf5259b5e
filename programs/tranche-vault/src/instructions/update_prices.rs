use anchor_lang::prelude::*;

use crate::constants::PROTOCOL_SEED;
use crate::engine;
use crate::errors::ErrorCode;
use crate::events::PricesUpdated;
use crate::state::ProtocolState;

pub fn update_prices(
    ctx: Context<UpdatePrices>,
    sol_usd: u64,
    lst_rate: u64,
    conf_usd: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let state = &mut ctx.accounts.protocol_state;
    engine::update_prices(
        state,
        &ctx.accounts.authority.key(),
        clock.slot,
        sol_usd,
        lst_rate,
        conf_usd,
    )?;

    emit!(PricesUpdated {
        source: ctx.accounts.authority.key(),
        sol_usd_price: sol_usd,
        lst_sol_rate: lst_rate,
        sol_usd_conf: conf_usd,
        slot: clock.slot,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdatePrices<'info> {
    #[account(
        constraint = authority.key() == protocol_state.authority @ ErrorCode::Unauthorized
    )]
    pub authority: Signer<'info>,
    #[account(mut, seeds = [PROTOCOL_SEED], bump = protocol_state.bump)]
    pub protocol_state: Account<'info, ProtocolState>,
}
