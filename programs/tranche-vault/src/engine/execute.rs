//! Operation executors and admin state transitions. Executors run the
//! entry gates, plan, apply effects through the port, commit the staged
//! fields, and re-read the runtime to enforce the sync invariants. Any
//! error aborts the whole operation.

use anchor_lang::prelude::*;

use super::gates::{check_entry, Gate, OpKind};
use super::invariants::{check_balance_sheet, check_cr_params};
use super::plan::{
    plan_lever_mint, plan_lever_redeem, plan_stable_mint, plan_stable_redeem, LeverMintPlan,
    LeverRedeemPlan, StableMintPlan, StableRedeemPlan,
};
use super::{AccountPort, Payee, TrancheToken};
use crate::constants::{
    BPS_PRECISION, DEFAULT_FEE_MAX_MULTIPLIER_BPS, DEFAULT_FEE_MIN_MULTIPLIER_BPS,
    DEFAULT_LEVER_MINT_FEE_BPS, DEFAULT_LEVER_REDEEM_FEE_BPS, DEFAULT_MAX_CONF_BPS,
    DEFAULT_MAX_LST_STALE_EPOCHS, DEFAULT_MAX_ORACLE_STALENESS_SLOTS,
    DEFAULT_MAX_ROUNDING_RESERVE_LAMPORTS, DEFAULT_STABLE_MINT_FEE_BPS,
    DEFAULT_STABLE_REDEEM_FEE_BPS, DEFAULT_UNCERTAINTY_MAX_BPS, MAX_BASE_FEE_BPS, STATE_VERSION,
};
use crate::errors::ErrorCode;
use crate::math::mul_div_down;
use crate::state::ProtocolState;

pub fn execute_stable_mint<P: AccountPort>(
    state: &mut ProtocolState,
    port: &mut P,
    lst_in: u64,
    min_stable_out: u64,
) -> Result<StableMintPlan> {
    let gate = Gate::load(port)?;
    check_entry(state, &gate, OpKind::Mint)?;

    let sheet = state.balance_sheet()?;
    let plan = plan_stable_mint(state, &sheet, lst_in, min_stable_out)?;

    port.pull_collateral(lst_in)?;
    port.mint_tranche(TrancheToken::Stable, Payee::User, plan.stable_to_user)?;
    if plan.stable_fee > 0 {
        port.mint_tranche(TrancheToken::Stable, Payee::Treasury, plan.stable_fee)?;
    }

    state.total_lst_amount = plan.new_total_lst;
    state.stable_supply = plan.new_stable_supply;
    state.rounding_reserve_lamports = plan.new_reserve;
    finish_op(state, port, gate.slot)?;

    Ok(plan)
}

pub fn execute_stable_redeem<P: AccountPort>(
    state: &mut ProtocolState,
    port: &mut P,
    stable_in: u64,
    min_lst_out: u64,
) -> Result<StableRedeemPlan> {
    let gate = Gate::load(port)?;
    check_entry(state, &gate, OpKind::Redeem)?;

    let sheet = state.balance_sheet()?;
    let plan = plan_stable_redeem(state, &sheet, stable_in, min_lst_out)?;

    port.burn_tranche(TrancheToken::Stable, stable_in)?;
    port.release_collateral(Payee::User, plan.lst_to_user)?;
    if plan.lst_fee > 0 {
        port.release_collateral(Payee::Treasury, plan.lst_fee)?;
    }

    state.total_lst_amount = plan.new_total_lst;
    state.stable_supply = plan.new_stable_supply;
    state.rounding_reserve_lamports = plan.new_reserve;
    finish_op(state, port, gate.slot)?;

    Ok(plan)
}

pub fn execute_lever_mint<P: AccountPort>(
    state: &mut ProtocolState,
    port: &mut P,
    lst_in: u64,
    min_lever_out: u64,
) -> Result<LeverMintPlan> {
    let gate = Gate::load(port)?;
    check_entry(state, &gate, OpKind::Mint)?;

    let sheet = state.balance_sheet()?;
    let plan = plan_lever_mint(state, &sheet, lst_in, min_lever_out)?;

    port.pull_collateral(lst_in)?;
    port.mint_tranche(TrancheToken::Lever, Payee::User, plan.lever_to_user)?;
    if plan.lever_fee > 0 {
        port.mint_tranche(TrancheToken::Lever, Payee::Treasury, plan.lever_fee)?;
    }

    state.total_lst_amount = plan.new_total_lst;
    state.lever_supply = plan.new_lever_supply;
    state.rounding_reserve_lamports = plan.new_reserve;
    finish_op(state, port, gate.slot)?;

    Ok(plan)
}

pub fn execute_lever_redeem<P: AccountPort>(
    state: &mut ProtocolState,
    port: &mut P,
    lever_in: u64,
    min_lst_out: u64,
) -> Result<LeverRedeemPlan> {
    let gate = Gate::load(port)?;
    check_entry(state, &gate, OpKind::Redeem)?;

    let sheet = state.balance_sheet()?;
    let plan = plan_lever_redeem(state, &sheet, lever_in, min_lst_out)?;

    port.burn_tranche(TrancheToken::Lever, lever_in)?;
    port.release_collateral(Payee::User, plan.lst_to_user)?;
    if plan.lst_fee > 0 {
        port.release_collateral(Payee::Treasury, plan.lst_fee)?;
    }

    state.total_lst_amount = plan.new_total_lst;
    state.lever_supply = plan.new_lever_supply;
    state.rounding_reserve_lamports = plan.new_reserve;
    finish_op(state, port, gate.slot)?;

    Ok(plan)
}

/// Counter bump, TVL cursor, then the sync and balance-sheet asserts
/// against what the runtime actually holds.
fn finish_op<P: AccountPort>(state: &mut ProtocolState, port: &P, slot: u64) -> Result<()> {
    state.last_tvl_update_slot = slot;
    bump_counter(state)?;

    require!(
        port.vault_balance()? == state.total_lst_amount,
        ErrorCode::BalanceSheetViolation
    );
    require!(
        port.tranche_supply(TrancheToken::Stable)? == state.stable_supply,
        ErrorCode::BalanceSheetViolation
    );
    require!(
        port.tranche_supply(TrancheToken::Lever)? == state.lever_supply,
        ErrorCode::BalanceSheetViolation
    );
    check_balance_sheet(state)
}

fn bump_counter(state: &mut ProtocolState) -> Result<()> {
    state.operation_counter = state
        .operation_counter
        .checked_add(1)
        .ok_or(ErrorCode::MathOverflow)?;
    Ok(())
}

fn require_authority(state: &ProtocolState, caller: &Pubkey) -> Result<()> {
    require_keys_eq!(*caller, state.authority, ErrorCode::Unauthorized);
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub struct InitParams {
    pub min_cr_bps: u64,
    pub target_cr_bps: u64,
    pub init_sol_usd: u64,
    pub init_lst_rate: u64,
}

/// Numeric half of `initialize`; key wiring belongs to the caller. Fails
/// closed on a second call.
pub fn initialize_state(
    state: &mut ProtocolState,
    slot: u64,
    epoch: u64,
    params: &InitParams,
) -> Result<()> {
    require!(state.version == 0, ErrorCode::AlreadyInitialized);
    check_cr_params(params.min_cr_bps, params.target_cr_bps)?;
    require!(params.init_sol_usd > 0, ErrorCode::ZeroAmount);
    require!(params.init_lst_rate > 0, ErrorCode::ZeroAmount);

    state.version = STATE_VERSION;
    state.min_cr_bps = params.min_cr_bps;
    state.target_cr_bps = params.target_cr_bps;

    state.fee_stable_mint_bps = DEFAULT_STABLE_MINT_FEE_BPS;
    state.fee_stable_redeem_bps = DEFAULT_STABLE_REDEEM_FEE_BPS;
    state.fee_lever_mint_bps = DEFAULT_LEVER_MINT_FEE_BPS;
    state.fee_lever_redeem_bps = DEFAULT_LEVER_REDEEM_FEE_BPS;
    for fee in [
        state.fee_stable_mint_bps,
        state.fee_stable_redeem_bps,
        state.fee_lever_mint_bps,
        state.fee_lever_redeem_bps,
    ] {
        require!(fee <= MAX_BASE_FEE_BPS, ErrorCode::InvalidParameter);
    }
    state.fee_min_multiplier_bps = DEFAULT_FEE_MIN_MULTIPLIER_BPS;
    state.fee_max_multiplier_bps = DEFAULT_FEE_MAX_MULTIPLIER_BPS;
    state.uncertainty_max_bps = DEFAULT_UNCERTAINTY_MAX_BPS;

    state.max_rounding_reserve_lamports = DEFAULT_MAX_ROUNDING_RESERVE_LAMPORTS;
    state.max_oracle_staleness_slots = DEFAULT_MAX_ORACLE_STALENESS_SLOTS;
    state.max_conf_bps = DEFAULT_MAX_CONF_BPS;
    state.max_lst_stale_epochs = DEFAULT_MAX_LST_STALE_EPOCHS;

    state.sol_usd_price = params.init_sol_usd;
    state.lst_sol_rate = params.init_lst_rate;
    state.sol_usd_conf = 0;
    state.uncertainty_index_bps = 0;

    state.last_oracle_update_slot = slot;
    state.last_tvl_update_slot = slot;
    state.last_lst_sync_epoch = epoch;

    Ok(())
}

pub fn update_parameters(
    state: &mut ProtocolState,
    caller: &Pubkey,
    new_min_cr_bps: u64,
    new_target_cr_bps: u64,
) -> Result<()> {
    require_authority(state, caller)?;
    check_cr_params(new_min_cr_bps, new_target_cr_bps)?;

    state.min_cr_bps = new_min_cr_bps;
    state.target_cr_bps = new_target_cr_bps;
    bump_counter(state)
}

pub fn update_prices(
    state: &mut ProtocolState,
    caller: &Pubkey,
    slot: u64,
    sol_usd: u64,
    lst_rate: u64,
    conf_usd: u64,
) -> Result<()> {
    require_authority(state, caller)?;
    require!(lst_rate > 0, ErrorCode::ZeroAmount);

    state.lst_sol_rate = lst_rate;
    apply_oracle_snapshot(state, slot, sol_usd, conf_usd)?;
    bump_counter(state)
}

/// Shared snapshot write for the manual and Pyth-fed paths. Derives the
/// uncertainty index as confidence over price in bps, capped at 100%.
pub fn apply_oracle_snapshot(
    state: &mut ProtocolState,
    slot: u64,
    sol_usd: u64,
    conf_usd: u64,
) -> Result<()> {
    require!(sol_usd > 0, ErrorCode::ZeroAmount);

    state.sol_usd_price = sol_usd;
    state.sol_usd_conf = conf_usd;
    state.uncertainty_index_bps =
        mul_div_down(conf_usd, BPS_PRECISION, sol_usd)?.min(BPS_PRECISION);
    state.last_oracle_update_slot = slot;
    Ok(())
}

/// Permissionless snapshot refresh from an external oracle read.
pub fn record_oracle_refresh(
    state: &mut ProtocolState,
    slot: u64,
    sol_usd: u64,
    conf_usd: u64,
) -> Result<()> {
    apply_oracle_snapshot(state, slot, sol_usd, conf_usd)?;
    bump_counter(state)
}

/// Refreshes the LST-rate freshness cursor. Permissionless: it attests
/// that the cached rate is current, it cannot move the rate.
pub fn sync_exchange_rate(state: &mut ProtocolState, slot: u64, epoch: u64) -> Result<()> {
    require!(state.lst_sol_rate > 0, ErrorCode::InvalidParameter);
    require!(
        slot >= state.last_tvl_update_slot,
        ErrorCode::InvalidParameter
    );

    state.last_lst_sync_epoch = epoch;
    state.last_tvl_update_slot = slot;
    bump_counter(state)
}

pub fn set_pause(
    state: &mut ProtocolState,
    caller: &Pubkey,
    mint_paused: bool,
    redeem_paused: bool,
) -> Result<()> {
    require_authority(state, caller)?;
    state.mint_paused = mint_paused;
    state.redeem_paused = redeem_paused;
    bump_counter(state)
}
