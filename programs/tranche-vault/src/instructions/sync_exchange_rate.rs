use anchor_lang::prelude::*;

use crate::constants::PROTOCOL_SEED;
use crate::engine;
use crate::events::ExchangeRateSynced;
use crate::state::ProtocolState;

/// Permissionless freshness attestation for the cached LST rate.
pub fn sync_exchange_rate(ctx: Context<SyncExchangeRate>) -> Result<()> {
    let clock = Clock::get()?;
    let state = &mut ctx.accounts.protocol_state;
    engine::sync_exchange_rate(state, clock.slot, clock.epoch)?;

    emit!(ExchangeRateSynced {
        slot: clock.slot,
        epoch: clock.epoch,
        lst_sol_rate: state.lst_sol_rate,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SyncExchangeRate<'info> {
    #[account(mut, seeds = [PROTOCOL_SEED], bump = protocol_state.bump)]
    pub protocol_state: Account<'info, ProtocolState>,
}
