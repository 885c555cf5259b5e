//! CPI-backed [`AccountPort`]. All vault outflows and tranche mints are
//! signed by the vault-authority PDA; burns and collateral pulls are
//! authorized by the user's own signature on the transaction. Both tranche
//! mints are always present so the post-operation supply sync can read
//! them; the token accounts of the untouched tranche stay `None`.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use anchor_spl::token::{self, Burn, Mint, MintTo, Transfer};

use crate::constants::VAULT_AUTHORITY_SEED;
use crate::engine::{AccountPort, Payee, TrancheToken};
use crate::errors::ErrorCode;

pub struct CpiPort<'info> {
    pub token_program: AccountInfo<'info>,
    pub instructions_sysvar: AccountInfo<'info>,
    pub user: AccountInfo<'info>,
    pub user_lst: AccountInfo<'info>,
    pub vault: AccountInfo<'info>,
    pub vault_authority: AccountInfo<'info>,
    pub vault_authority_bump: u8,
    pub stable_mint: AccountInfo<'info>,
    pub lever_mint: AccountInfo<'info>,
    pub treasury_lst: Option<AccountInfo<'info>>,
    pub user_stable: Option<AccountInfo<'info>>,
    pub treasury_stable: Option<AccountInfo<'info>>,
    pub user_lever: Option<AccountInfo<'info>>,
    pub treasury_lever: Option<AccountInfo<'info>>,
}

impl<'info> CpiPort<'info> {
    fn mint_of(&self, tranche: TrancheToken) -> &AccountInfo<'info> {
        match tranche {
            TrancheToken::Stable => &self.stable_mint,
            TrancheToken::Lever => &self.lever_mint,
        }
    }

    fn token_account(&self, tranche: TrancheToken, payee: Payee) -> Result<AccountInfo<'info>> {
        let account = match (tranche, payee) {
            (TrancheToken::Stable, Payee::User) => &self.user_stable,
            (TrancheToken::Stable, Payee::Treasury) => &self.treasury_stable,
            (TrancheToken::Lever, Payee::User) => &self.user_lever,
            (TrancheToken::Lever, Payee::Treasury) => &self.treasury_lever,
        };
        account
            .clone()
            .ok_or_else(|| error!(ErrorCode::InvalidParameter))
    }

    fn with_vault_signer<T>(&self, f: impl FnOnce(&[&[&[u8]]]) -> Result<T>) -> Result<T> {
        let bump = [self.vault_authority_bump];
        let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, &bump];
        f(&[seeds])
    }
}

impl<'info> AccountPort for CpiPort<'info> {
    fn pull_collateral(&mut self, amount: u64) -> Result<()> {
        let cpi = CpiContext::new(
            self.token_program.clone(),
            Transfer {
                from: self.user_lst.clone(),
                to: self.vault.clone(),
                authority: self.user.clone(),
            },
        );
        token::transfer(cpi, amount)
    }

    fn release_collateral(&mut self, to: Payee, amount: u64) -> Result<()> {
        let dest = match to {
            Payee::User => self.user_lst.clone(),
            Payee::Treasury => self
                .treasury_lst
                .clone()
                .ok_or_else(|| error!(ErrorCode::InvalidParameter))?,
        };
        self.with_vault_signer(|signer| {
            let cpi = CpiContext::new_with_signer(
                self.token_program.clone(),
                Transfer {
                    from: self.vault.clone(),
                    to: dest,
                    authority: self.vault_authority.clone(),
                },
                signer,
            );
            token::transfer(cpi, amount)
        })
    }

    fn mint_tranche(&mut self, tranche: TrancheToken, to: Payee, amount: u64) -> Result<()> {
        let dest = self.token_account(tranche, to)?;
        let mint = self.mint_of(tranche).clone();
        self.with_vault_signer(|signer| {
            let cpi = CpiContext::new_with_signer(
                self.token_program.clone(),
                MintTo {
                    mint,
                    to: dest,
                    authority: self.vault_authority.clone(),
                },
                signer,
            );
            token::mint_to(cpi, amount)
        })
    }

    fn burn_tranche(&mut self, tranche: TrancheToken, amount: u64) -> Result<()> {
        let from = self.token_account(tranche, Payee::User)?;
        let cpi = CpiContext::new(
            self.token_program.clone(),
            Burn {
                mint: self.mint_of(tranche).clone(),
                from,
                authority: self.user.clone(),
            },
        );
        token::burn(cpi, amount)
    }

    fn tranche_supply(&self, tranche: TrancheToken) -> Result<u64> {
        let data = self.mint_of(tranche).try_borrow_data()?;
        let mut slice: &[u8] = &data;
        let mint = Mint::try_deserialize(&mut slice)?;
        Ok(mint.supply)
    }

    fn vault_balance(&self) -> Result<u64> {
        token::accessor::amount(&self.vault)
    }

    fn current_slot(&self) -> Result<u64> {
        Ok(Clock::get()?.slot)
    }

    fn current_epoch(&self) -> Result<u64> {
        Ok(Clock::get()?.epoch)
    }

    fn instruction_index(&self) -> Result<u16> {
        let current = load_current_index_checked(&self.instructions_sysvar)? as usize;

        // A CPI keeps the sysvar pointed at the wrapping top-level
        // instruction, which then belongs to the caller, not to us.
        let top = load_instruction_at_checked(current, &self.instructions_sysvar)?;
        if top.program_id != crate::ID {
            return Ok(u16::MAX);
        }

        let mut prior_self_invocations: u16 = 0;
        for index in 0..current {
            let ix = load_instruction_at_checked(index, &self.instructions_sysvar)?;
            if ix.program_id == crate::ID {
                prior_self_invocations += 1;
            }
        }
        Ok(prior_self_invocations)
    }
}
