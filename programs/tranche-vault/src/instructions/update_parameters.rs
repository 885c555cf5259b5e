use anchor_lang::prelude::*;

use crate::constants::PROTOCOL_SEED;
use crate::engine;
use crate::errors::ErrorCode;
use crate::events::ParametersUpdated;
use crate::state::ProtocolState;

pub fn update_parameters(
    ctx: Context<UpdateParameters>,
    new_min_cr_bps: u64,
    new_target_cr_bps: u64,
) -> Result<()> {
    let state = &mut ctx.accounts.protocol_state;
    engine::update_parameters(
        state,
        &ctx.accounts.authority.key(),
        new_min_cr_bps,
        new_target_cr_bps,
    )?;

    emit!(ParametersUpdated {
        authority: ctx.accounts.authority.key(),
        min_cr_bps: new_min_cr_bps,
        target_cr_bps: new_target_cr_bps,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct UpdateParameters<'info> {
    #[account(
        constraint = authority.key() == protocol_state.authority @ ErrorCode::Unauthorized
    )]
    pub authority: Signer<'info>,
    #[account(mut, seeds = [PROTOCOL_SEED], bump = protocol_state.bump)]
    pub protocol_state: Account<'info, ProtocolState>,
}
