use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::ID as INSTRUCTIONS_SYSVAR_ID;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{PROTOCOL_SEED, VAULT_AUTHORITY_SEED};
use crate::engine;
use crate::errors::ErrorCode;
use crate::events::LeverMinted;
use crate::instructions::port::CpiPort;
use crate::state::ProtocolState;

pub fn mint_lever(ctx: Context<MintLever>, lst_in: u64, min_lever_out: u64) -> Result<()> {
    let mut staged = ProtocolState::clone(&ctx.accounts.protocol_state);
    let mut port = CpiPort {
        token_program: ctx.accounts.token_program.to_account_info(),
        instructions_sysvar: ctx.accounts.instructions_sysvar.to_account_info(),
        user: ctx.accounts.user.to_account_info(),
        user_lst: ctx.accounts.user_lst_account.to_account_info(),
        vault: ctx.accounts.vault.to_account_info(),
        vault_authority: ctx.accounts.vault_authority.to_account_info(),
        vault_authority_bump: ctx.accounts.protocol_state.vault_authority_bump,
        stable_mint: ctx.accounts.stable_mint.to_account_info(),
        lever_mint: ctx.accounts.lever_mint.to_account_info(),
        treasury_lst: None,
        user_stable: None,
        treasury_stable: None,
        user_lever: Some(ctx.accounts.user_lever_account.to_account_info()),
        treasury_lever: Some(ctx.accounts.treasury_lever_account.to_account_info()),
    };

    let plan = engine::execute_lever_mint(&mut staged, &mut port, lst_in, min_lever_out)?;
    ctx.accounts.protocol_state.set_inner(staged);

    emit!(LeverMinted {
        user: ctx.accounts.user.key(),
        lst_in,
        lever_to_user: plan.lever_to_user,
        fee: plan.lever_fee,
        fee_bps: plan.fee_bps,
        nav: plan.nav,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct MintLever<'info> {
    #[account(mut)]
    pub user: Signer<'info>,
    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol_state.bump,
        has_one = stable_mint,
        has_one = lever_mint,
        has_one = treasury,
        has_one = vault
    )]
    pub protocol_state: Box<Account<'info, ProtocolState>>,
    pub stable_mint: Box<Account<'info, Mint>>,
    #[account(mut)]
    pub lever_mint: Box<Account<'info, Mint>>,
    #[account(mut, token::mint = lever_mint, token::authority = user)]
    pub user_lever_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = lever_mint,
        associated_token::authority = treasury
    )]
    pub treasury_lever_account: Box<Account<'info, TokenAccount>>,
    /// CHECK: validated by has_one on protocol_state.
    pub treasury: UncheckedAccount<'info>,
    #[account(
        constraint = lst_mint.key() == protocol_state.supported_lst_mint
            @ ErrorCode::UnsupportedCollateral
    )]
    pub lst_mint: Box<Account<'info, Mint>>,
    #[account(mut, token::mint = lst_mint, token::authority = user)]
    pub user_lst_account: Box<Account<'info, TokenAccount>>,
    #[account(mut, token::mint = lst_mint, token::authority = vault_authority)]
    pub vault: Box<Account<'info, TokenAccount>>,
    /// CHECK: PDA signer, validated by seeds.
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump = protocol_state.vault_authority_bump)]
    pub vault_authority: UncheckedAccount<'info>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    /// CHECK: address-constrained to the instructions sysvar.
    #[account(address = INSTRUCTIONS_SYSVAR_ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,
}
