//! Pure per-operation planners. A planner validates inputs against the
//! current snapshot, derives every amount with explicit rounding (user
//! receipts round down, protocol accruals round up), simulates the post
//! state, and returns a plan the executor applies verbatim. No planner
//! mutates anything.

use anchor_lang::prelude::*;

use super::invariants::check_cr_floor;
use crate::constants::{
    BPS_PRECISION, MIN_LEVER_MINT, MIN_LST_DEPOSIT, MIN_LST_OUT, MIN_PROTOCOL_TVL,
    MIN_STABLE_MINT, SOL_PRECISION,
};
use crate::errors::ErrorCode;
use crate::fees::{effective_fee_bps, FeeDirection};
use crate::math::{mul_div_down, mul_div_up};
use crate::pricing::BalanceSheet;
use crate::state::ProtocolState;

#[derive(Clone, Copy, Debug)]
pub struct StableMintPlan {
    pub stable_gross: u64,
    pub stable_to_user: u64,
    pub stable_fee: u64,
    pub fee_bps: u64,
    pub new_total_lst: u64,
    pub new_stable_supply: u64,
    pub new_reserve: u64,
    pub cr_post: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct StableRedeemPlan {
    pub lst_total_out: u64,
    pub lst_to_user: u64,
    pub lst_fee: u64,
    pub fee_bps: u64,
    /// Set when the senior tranche exits through the pro-rata path.
    pub haircut_bps: Option<u64>,
    pub new_total_lst: u64,
    pub new_stable_supply: u64,
    pub new_reserve: u64,
    pub cr_post: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct LeverMintPlan {
    pub lever_gross: u64,
    pub lever_to_user: u64,
    pub lever_fee: u64,
    pub fee_bps: u64,
    pub nav: u64,
    pub new_total_lst: u64,
    pub new_lever_supply: u64,
    pub new_reserve: u64,
    pub cr_post: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct LeverRedeemPlan {
    pub lst_total_out: u64,
    pub lst_to_user: u64,
    pub lst_fee: u64,
    pub fee_bps: u64,
    pub nav: u64,
    pub new_total_lst: u64,
    pub new_lever_supply: u64,
    pub new_reserve: u64,
    pub cr_post: u64,
}

pub fn plan_stable_mint(
    state: &ProtocolState,
    sheet: &BalanceSheet,
    lst_in: u64,
    min_stable_out: u64,
) -> Result<StableMintPlan> {
    require!(lst_in > 0, ErrorCode::ZeroAmount);
    require!(lst_in >= MIN_LST_DEPOSIT, ErrorCode::AmountTooSmall);

    let sol_in = mul_div_down(lst_in, state.lst_sol_rate, SOL_PRECISION)?;
    let stable_gross = mul_div_down(sol_in, state.sol_usd_price, SOL_PRECISION)?;
    require!(stable_gross >= MIN_STABLE_MINT, ErrorCode::AmountTooSmall);

    let fee_bps = effective_fee_bps(
        state.fee_stable_mint_bps,
        FeeDirection::RiskIncreasing,
        sheet.cr_bps,
        &state.fee_curve(),
    )
    .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    let stable_fee = mul_div_up(stable_gross, fee_bps, BPS_PRECISION)?;
    let stable_to_user = stable_gross
        .checked_sub(stable_fee)
        .ok_or(ErrorCode::MathOverflow)?;
    require!(stable_to_user >= min_stable_out, ErrorCode::SlippageExceeded);

    let new_total_lst = state
        .total_lst_amount
        .checked_add(lst_in)
        .ok_or(ErrorCode::MathOverflow)?;
    let new_stable_supply = state
        .stable_supply
        .checked_add(stable_gross)
        .ok_or(ErrorCode::MathOverflow)?;

    let post = BalanceSheet::derive(
        new_total_lst,
        state.lst_sol_rate,
        new_stable_supply,
        state.sol_usd_price,
        state.lever_supply,
    )?;
    check_cr_floor(post.cr_bps, state.min_cr_bps)?;

    // Residue between the protocol-favoring and user-facing rounding
    // chains, valued in lamports.
    let sol_in_up = mul_div_up(lst_in, state.lst_sol_rate, SOL_PRECISION)?;
    let stable_gross_up = mul_div_up(sol_in_up, state.sol_usd_price, SOL_PRECISION)?;
    let delta_usd = stable_gross_up
        .checked_sub(stable_gross)
        .ok_or(ErrorCode::MathOverflow)?;
    let credit = if delta_usd == 0 {
        0
    } else {
        mul_div_up(delta_usd, SOL_PRECISION, state.sol_usd_price)?
    };

    Ok(StableMintPlan {
        stable_gross,
        stable_to_user,
        stable_fee,
        fee_bps,
        new_total_lst,
        new_stable_supply,
        new_reserve: credit_reserve(state, credit),
        cr_post: post.cr_bps,
    })
}

pub fn plan_stable_redeem(
    state: &ProtocolState,
    sheet: &BalanceSheet,
    stable_in: u64,
    min_lst_out: u64,
) -> Result<StableRedeemPlan> {
    require!(stable_in > 0, ErrorCode::ZeroAmount);
    require!(
        stable_in <= state.stable_supply,
        ErrorCode::InsufficientSupply
    );

    if !sheet.solvent() {
        return plan_stable_redeem_haircut(state, sheet, stable_in, min_lst_out);
    }

    let sol_out = mul_div_down(stable_in, SOL_PRECISION, state.sol_usd_price)?;
    let lst_gross = mul_div_down(sol_out, SOL_PRECISION, state.lst_sol_rate)?;

    let fee_bps = effective_fee_bps(
        state.fee_stable_redeem_bps,
        FeeDirection::RiskReducing,
        sheet.cr_bps,
        &state.fee_curve(),
    )
    .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    let lst_fee = mul_div_up(lst_gross, fee_bps, BPS_PRECISION)?;
    let lst_to_user = lst_gross.checked_sub(lst_fee).ok_or(ErrorCode::MathOverflow)?;

    require!(lst_to_user >= MIN_LST_OUT, ErrorCode::AmountTooSmall);
    require!(lst_to_user >= min_lst_out, ErrorCode::SlippageExceeded);
    require!(
        lst_gross <= state.total_lst_amount,
        ErrorCode::InsufficientCollateral
    );

    let new_total_lst = state.total_lst_amount - lst_gross;
    require!(
        new_total_lst >= MIN_PROTOCOL_TVL || new_total_lst == 0,
        ErrorCode::BelowMinimumTVL
    );
    let new_stable_supply = state.stable_supply - stable_in;

    let post = BalanceSheet::derive(
        new_total_lst,
        state.lst_sol_rate,
        new_stable_supply,
        state.sol_usd_price,
        state.lever_supply,
    )?;

    let sol_out_up = mul_div_up(stable_in, SOL_PRECISION, state.sol_usd_price)?;
    let lst_up = mul_div_up(sol_out_up, SOL_PRECISION, state.lst_sol_rate)?;
    let delta_lst = lst_up.checked_sub(lst_gross).ok_or(ErrorCode::MathOverflow)?;
    let credit = if delta_lst == 0 {
        0
    } else {
        mul_div_up(delta_lst, state.lst_sol_rate, SOL_PRECISION)?
    };

    Ok(StableRedeemPlan {
        lst_total_out: lst_gross,
        lst_to_user,
        lst_fee,
        fee_bps,
        haircut_bps: None,
        new_total_lst,
        new_stable_supply,
        new_reserve: credit_reserve(state, credit),
        cr_post: post.cr_bps,
    })
}

/// Senior exit while CR < 100%: pro-rata payout at the current ratio,
/// zero fee. The only path allowed to leave CR below the minimum.
fn plan_stable_redeem_haircut(
    state: &ProtocolState,
    sheet: &BalanceSheet,
    stable_in: u64,
    min_lst_out: u64,
) -> Result<StableRedeemPlan> {
    let haircut_bps = sheet.cr_bps.min(BPS_PRECISION);

    let sol_par = mul_div_down(stable_in, SOL_PRECISION, state.sol_usd_price)?;
    let sol_after_haircut = mul_div_down(sol_par, haircut_bps, BPS_PRECISION)?;
    let lst_out = mul_div_down(sol_after_haircut, SOL_PRECISION, state.lst_sol_rate)?;

    require!(lst_out >= MIN_LST_OUT, ErrorCode::AmountTooSmall);
    require!(lst_out >= min_lst_out, ErrorCode::SlippageExceeded);
    require!(
        lst_out <= state.total_lst_amount,
        ErrorCode::InsufficientCollateral
    );

    let new_total_lst = state.total_lst_amount - lst_out;
    require!(
        new_total_lst >= MIN_PROTOCOL_TVL || new_total_lst == 0,
        ErrorCode::BelowMinimumTVL
    );
    let new_stable_supply = state.stable_supply - stable_in;

    let post = BalanceSheet::derive(
        new_total_lst,
        state.lst_sol_rate,
        new_stable_supply,
        state.sol_usd_price,
        state.lever_supply,
    )?;

    Ok(StableRedeemPlan {
        lst_total_out: lst_out,
        lst_to_user: lst_out,
        lst_fee: 0,
        fee_bps: 0,
        haircut_bps: Some(haircut_bps),
        new_total_lst,
        new_stable_supply,
        new_reserve: state.rounding_reserve_lamports,
        cr_post: post.cr_bps,
    })
}

pub fn plan_lever_mint(
    state: &ProtocolState,
    sheet: &BalanceSheet,
    lst_in: u64,
    min_lever_out: u64,
) -> Result<LeverMintPlan> {
    require!(lst_in > 0, ErrorCode::ZeroAmount);
    require!(lst_in >= MIN_LST_DEPOSIT, ErrorCode::AmountTooSmall);

    let sol_in = mul_div_down(lst_in, state.lst_sol_rate, SOL_PRECISION)?;

    // First mint bootstraps 1:1 with the SOL value of the deposit, so a
    // donation into the vault cannot inflate the entry price.
    let (nav, lever_gross) = if state.lever_supply == 0 {
        (SOL_PRECISION, sol_in)
    } else {
        let nav = sheet.lever_nav;
        require!(nav > 0, ErrorCode::InsolventProtocol);
        (nav, mul_div_down(sol_in, SOL_PRECISION, nav)?)
    };
    require!(lever_gross >= MIN_LEVER_MINT, ErrorCode::AmountTooSmall);

    let fee_bps = effective_fee_bps(
        state.fee_lever_mint_bps,
        FeeDirection::RiskReducing,
        sheet.cr_bps,
        &state.fee_curve(),
    )
    .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    let lever_fee = mul_div_up(lever_gross, fee_bps, BPS_PRECISION)?;
    let lever_to_user = lever_gross
        .checked_sub(lever_fee)
        .ok_or(ErrorCode::MathOverflow)?;
    require!(lever_to_user >= min_lever_out, ErrorCode::SlippageExceeded);

    let new_total_lst = state
        .total_lst_amount
        .checked_add(lst_in)
        .ok_or(ErrorCode::MathOverflow)?;
    let new_lever_supply = state
        .lever_supply
        .checked_add(lever_gross)
        .ok_or(ErrorCode::MathOverflow)?;

    let post = BalanceSheet::derive(
        new_total_lst,
        state.lst_sol_rate,
        state.stable_supply,
        state.sol_usd_price,
        new_lever_supply,
    )?;

    let sol_in_up = mul_div_up(lst_in, state.lst_sol_rate, SOL_PRECISION)?;
    let lever_ref_up = if state.lever_supply == 0 {
        sol_in_up
    } else {
        mul_div_up(sol_in_up, SOL_PRECISION, nav)?
    };
    let delta_lever = lever_ref_up
        .checked_sub(lever_gross)
        .ok_or(ErrorCode::MathOverflow)?;
    let credit = if delta_lever == 0 {
        0
    } else if state.lever_supply == 0 {
        delta_lever
    } else {
        mul_div_up(delta_lever, nav, SOL_PRECISION)?
    };

    Ok(LeverMintPlan {
        lever_gross,
        lever_to_user,
        lever_fee,
        fee_bps,
        nav,
        new_total_lst,
        new_lever_supply,
        new_reserve: credit_reserve(state, credit),
        cr_post: post.cr_bps,
    })
}

pub fn plan_lever_redeem(
    state: &ProtocolState,
    sheet: &BalanceSheet,
    lever_in: u64,
    min_lst_out: u64,
) -> Result<LeverRedeemPlan> {
    require!(lever_in > 0, ErrorCode::ZeroAmount);
    require!(lever_in <= state.lever_supply, ErrorCode::InsufficientSupply);

    // The junior tranche has no claim while the senior tranche is
    // under water.
    require!(sheet.solvent(), ErrorCode::InsolventProtocol);

    let nav = sheet.lever_nav;
    let sol_out = mul_div_down(lever_in, nav, SOL_PRECISION)?;
    let lst_gross = mul_div_down(sol_out, SOL_PRECISION, state.lst_sol_rate)?;

    let fee_bps = effective_fee_bps(
        state.fee_lever_redeem_bps,
        FeeDirection::RiskIncreasing,
        sheet.cr_bps,
        &state.fee_curve(),
    )
    .ok_or_else(|| error!(ErrorCode::MathOverflow))?;
    let lst_fee = mul_div_up(lst_gross, fee_bps, BPS_PRECISION)?;
    let lst_to_user = lst_gross.checked_sub(lst_fee).ok_or(ErrorCode::MathOverflow)?;

    require!(lst_to_user >= MIN_LST_OUT, ErrorCode::AmountTooSmall);
    require!(lst_to_user >= min_lst_out, ErrorCode::SlippageExceeded);
    require!(
        lst_gross <= state.total_lst_amount,
        ErrorCode::InsufficientCollateral
    );

    let new_total_lst = state.total_lst_amount - lst_gross;
    require!(
        new_total_lst >= MIN_PROTOCOL_TVL || new_total_lst == 0,
        ErrorCode::BelowMinimumTVL
    );
    let new_lever_supply = state.lever_supply - lever_in;

    let post = BalanceSheet::derive(
        new_total_lst,
        state.lst_sol_rate,
        state.stable_supply,
        state.sol_usd_price,
        new_lever_supply,
    )?;
    check_cr_floor(post.cr_bps, state.min_cr_bps)?;

    let sol_out_up = mul_div_up(lever_in, nav, SOL_PRECISION)?;
    let lst_up = mul_div_up(sol_out_up, SOL_PRECISION, state.lst_sol_rate)?;
    let delta_lst = lst_up.checked_sub(lst_gross).ok_or(ErrorCode::MathOverflow)?;
    let credit = if delta_lst == 0 {
        0
    } else {
        mul_div_up(delta_lst, state.lst_sol_rate, SOL_PRECISION)?
    };

    Ok(LeverRedeemPlan {
        lst_total_out: lst_gross,
        lst_to_user,
        lst_fee,
        fee_bps,
        nav,
        new_total_lst,
        new_lever_supply,
        new_reserve: credit_reserve(state, credit),
        cr_post: post.cr_bps,
    })
}

/// Residues accumulate in the vault's favor, saturating at the configured
/// cap; past the cap the residue simply accrues to equity.
fn credit_reserve(state: &ProtocolState, credit: u64) -> u64 {
    state
        .rounding_reserve_lamports
        .saturating_add(credit)
        .min(state.max_rounding_reserve_lamports)
}
