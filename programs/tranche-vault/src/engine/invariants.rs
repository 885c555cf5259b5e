//! Post-operation assertions. Violations abort the whole operation; there
//! is no partial commit to unwind.

use anchor_lang::prelude::*;

use crate::constants::{BPS_PRECISION, CR_SENTINEL, MIN_ROUNDING_TOLERANCE_LAMPORTS};
use crate::errors::ErrorCode;
use crate::state::ProtocolState;

/// Allowed accounting residue: one bp of TVL, floored at a constant so
/// tiny vaults are not held to sub-lamport precision.
pub fn rounding_tolerance_lamports(tvl_sol: u64) -> u64 {
    (tvl_sol / BPS_PRECISION).max(MIN_ROUNDING_TOLERANCE_LAMPORTS)
}

pub fn check_cr_floor(cr_bps: u64, min_cr_bps: u64) -> Result<()> {
    if cr_bps == CR_SENTINEL {
        return Ok(());
    }
    require!(cr_bps >= min_cr_bps, ErrorCode::CollateralRatioTooLow);
    Ok(())
}

pub fn check_cr_params(min_cr_bps: u64, target_cr_bps: u64) -> Result<()> {
    require!(min_cr_bps >= BPS_PRECISION, ErrorCode::InvalidParameter);
    require!(target_cr_bps >= min_cr_bps, ErrorCode::InvalidParameter);
    Ok(())
}

/// TVL = Liability + Equity within the rounding tolerance, and the
/// rounding reserve within its cap. While insolvent the equity term is
/// pinned at zero and the identity cannot hold; the haircut path is the
/// sanctioned exception, so only the floor and the cap are asserted.
pub fn check_balance_sheet(state: &ProtocolState) -> Result<()> {
    require!(
        state.rounding_reserve_lamports <= state.max_rounding_reserve_lamports,
        ErrorCode::BalanceSheetViolation
    );

    let sheet = state.balance_sheet()?;
    if sheet.solvent() {
        let claims = sheet
            .liability_sol
            .checked_add(sheet.equity_sol)
            .ok_or(ErrorCode::MathOverflow)?;
        require!(
            sheet.tvl_sol.abs_diff(claims) <= rounding_tolerance_lamports(sheet.tvl_sol),
            ErrorCode::BalanceSheetViolation
        );
    } else {
        require!(sheet.equity_sol == 0, ErrorCode::BalanceSheetViolation);
    }
    Ok(())
}
