use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{PROTOCOL_SEED, VAULT_AUTHORITY_SEED, VAULT_SEED};
use crate::engine::{self, InitParams};
use crate::errors::ErrorCode;
use crate::events::ProtocolInitialized;
use crate::state::ProtocolState;

pub fn initialize(
    ctx: Context<Initialize>,
    min_cr_bps: u64,
    target_cr_bps: u64,
    init_sol_usd: u64,
    init_lst_rate: u64,
    sol_usd_pyth_feed: Pubkey,
    pyth_program_id: Pubkey,
) -> Result<()> {
    require!(
        ctx.accounts.lst_mint.decimals == 9,
        ErrorCode::UnsupportedCollateral
    );

    let clock = Clock::get()?;
    let state = &mut ctx.accounts.protocol_state;

    state.bump = ctx.bumps.protocol_state;
    state.vault_authority_bump = ctx.bumps.vault_authority;
    state.authority = ctx.accounts.authority.key();
    state.treasury = ctx.accounts.authority.key();
    state.stable_mint = ctx.accounts.stable_mint.key();
    state.lever_mint = ctx.accounts.lever_mint.key();
    state.supported_lst_mint = ctx.accounts.lst_mint.key();
    state.vault = ctx.accounts.vault.key();
    state.vault_authority = ctx.accounts.vault_authority.key();
    state.sol_usd_pyth_feed = sol_usd_pyth_feed;
    state.pyth_program_id = pyth_program_id;

    engine::initialize_state(
        state,
        clock.slot,
        clock.epoch,
        &InitParams {
            min_cr_bps,
            target_cr_bps,
            init_sol_usd,
            init_lst_rate,
        },
    )?;

    emit!(ProtocolInitialized {
        authority: state.authority,
        stable_mint: state.stable_mint,
        lever_mint: state.lever_mint,
        supported_lst_mint: state.supported_lst_mint,
        min_cr_bps,
        target_cr_bps,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,
    #[account(
        init,
        payer = authority,
        space = 8 + ProtocolState::LEN,
        seeds = [PROTOCOL_SEED],
        bump
    )]
    pub protocol_state: Account<'info, ProtocolState>,
    #[account(
        init,
        payer = authority,
        mint::decimals = 6,
        mint::authority = vault_authority
    )]
    pub stable_mint: Account<'info, Mint>,
    #[account(
        init,
        payer = authority,
        mint::decimals = 9,
        mint::authority = vault_authority
    )]
    pub lever_mint: Account<'info, Mint>,
    pub lst_mint: Account<'info, Mint>,
    #[account(
        init,
        payer = authority,
        seeds = [VAULT_SEED],
        bump,
        token::mint = lst_mint,
        token::authority = vault_authority
    )]
    pub vault: Account<'info, TokenAccount>,
    /// CHECK: PDA signer, validated by seeds.
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
