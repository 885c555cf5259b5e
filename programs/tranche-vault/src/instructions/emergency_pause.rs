use anchor_lang::prelude::*;

use crate::constants::PROTOCOL_SEED;
use crate::engine;
use crate::errors::ErrorCode;
use crate::events::PauseToggled;
use crate::state::ProtocolState;

pub fn emergency_pause(
    ctx: Context<EmergencyPause>,
    mint_paused: bool,
    redeem_paused: bool,
) -> Result<()> {
    let state = &mut ctx.accounts.protocol_state;
    engine::set_pause(
        state,
        &ctx.accounts.authority.key(),
        mint_paused,
        redeem_paused,
    )?;

    emit!(PauseToggled {
        authority: ctx.accounts.authority.key(),
        mint_paused,
        redeem_paused,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmergencyPause<'info> {
    #[account(
        constraint = authority.key() == protocol_state.authority @ ErrorCode::Unauthorized
    )]
    pub authority: Signer<'info>,
    #[account(mut, seeds = [PROTOCOL_SEED], bump = protocol_state.bump)]
    pub protocol_state: Account<'info, ProtocolState>,
}
