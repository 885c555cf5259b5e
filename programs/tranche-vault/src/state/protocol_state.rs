use anchor_lang::prelude::*;

use crate::fees::FeeCurve;
use crate::math::MathError;
use crate::pricing::BalanceSheet;

/// Singleton protocol account: the full balance sheet, risk parameters,
/// fee curve, freshness policy, and oracle snapshot. One record, one PDA.
#[account]
#[derive(Default)]
pub struct ProtocolState {
    pub version: u8,
    pub bump: u8,
    pub vault_authority_bump: u8,

    pub authority: Pubkey,
    pub treasury: Pubkey,
    pub stable_mint: Pubkey,
    pub lever_mint: Pubkey,
    pub supported_lst_mint: Pubkey,
    pub vault: Pubkey,
    pub vault_authority: Pubkey,
    pub sol_usd_pyth_feed: Pubkey,
    pub pyth_program_id: Pubkey,

    /// Authoritative LST balance of the vault, in LST base units.
    pub total_lst_amount: u64,
    /// Outstanding stable supply, 6-decimal USD units.
    pub stable_supply: u64,
    /// Outstanding lever supply, 9-decimal SOL units.
    pub lever_supply: u64,

    pub min_cr_bps: u64,
    pub target_cr_bps: u64,

    pub fee_stable_mint_bps: u64,
    pub fee_stable_redeem_bps: u64,
    pub fee_lever_mint_bps: u64,
    pub fee_lever_redeem_bps: u64,
    pub fee_min_multiplier_bps: u64,
    pub fee_max_multiplier_bps: u64,

    /// Oracle confidence relative to price, in bps; derived on every
    /// snapshot write.
    pub uncertainty_index_bps: u64,
    pub uncertainty_max_bps: u64,

    pub rounding_reserve_lamports: u64,
    pub max_rounding_reserve_lamports: u64,

    pub max_oracle_staleness_slots: u64,
    pub max_conf_bps: u64,
    pub max_lst_stale_epochs: u64,

    pub last_tvl_update_slot: u64,
    pub last_oracle_update_slot: u64,
    pub last_lst_sync_epoch: u64,

    /// SOL/USD snapshot, 6-decimal USD per SOL.
    pub sol_usd_price: u64,
    /// LST to SOL exchange rate, 9-decimal SOL per LST.
    pub lst_sol_rate: u64,
    /// Oracle confidence at snapshot time, 6-decimal USD.
    pub sol_usd_conf: u64,

    pub mint_paused: bool,
    pub redeem_paused: bool,

    pub operation_counter: u64,
}

impl ProtocolState {
    pub const LEN: usize = 1 // version
        + 1 // bump
        + 1 // vault_authority_bump
        + 32 * 9 // pubkeys
        + 8 * 3 // balance sheet
        + 8 * 2 // cr params
        + 8 * 6 // fee params
        + 8 * 2 // uncertainty
        + 8 * 2 // rounding reserve
        + 8 * 3 // freshness policy
        + 8 * 3 // cursors
        + 8 * 3 // snapshot
        + 1 // mint_paused
        + 1 // redeem_paused
        + 8; // operation_counter

    pub fn fee_curve(&self) -> FeeCurve {
        FeeCurve {
            min_cr_bps: self.min_cr_bps,
            target_cr_bps: self.target_cr_bps,
            fee_min_multiplier_bps: self.fee_min_multiplier_bps,
            fee_max_multiplier_bps: self.fee_max_multiplier_bps,
            uncertainty_index_bps: self.uncertainty_index_bps,
            uncertainty_max_bps: self.uncertainty_max_bps,
        }
    }

    pub fn balance_sheet(&self) -> std::result::Result<BalanceSheet, MathError> {
        BalanceSheet::derive(
            self.total_lst_amount,
            self.lst_sol_rate,
            self.stable_supply,
            self.sol_usd_price,
            self.lever_supply,
        )
    }
}
