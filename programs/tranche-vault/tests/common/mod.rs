//! In-memory ledger double standing in for the on-chain runtime: token
//! balances, supplies, clock, and instruction index. The `run_*` wrappers
//! mirror the handlers' staged-commit semantics, rolling both state and
//! ledger back when an operation fails.

#![allow(dead_code)]

use anchor_lang::prelude::*;

use tranche_vault::engine::{
    self, AccountPort, InitParams, LeverMintPlan, LeverRedeemPlan, Payee, StableMintPlan,
    StableRedeemPlan, TrancheToken,
};
use tranche_vault::errors::ErrorCode;
use tranche_vault::state::ProtocolState;

pub const SLOT0: u64 = 1_000;
pub const EPOCH0: u64 = 10;

pub const SOL: u64 = 1_000_000_000;
pub const USD: u64 = 1_000_000;

#[derive(Clone, Debug)]
pub struct MemoryPort {
    pub vault_lst: u64,
    pub user_lst: u64,
    pub treasury_lst: u64,
    pub user_stable: u64,
    pub treasury_stable: u64,
    pub stable_supply: u64,
    pub user_lever: u64,
    pub treasury_lever: u64,
    pub lever_supply: u64,
    pub slot: u64,
    pub epoch: u64,
    pub instruction_index: u16,
}

impl MemoryPort {
    pub fn new(user_lst: u64) -> Self {
        Self {
            vault_lst: 0,
            user_lst,
            treasury_lst: 0,
            user_stable: 0,
            treasury_stable: 0,
            stable_supply: 0,
            user_lever: 0,
            treasury_lever: 0,
            lever_supply: 0,
            slot: SLOT0,
            epoch: EPOCH0,
            instruction_index: 0,
        }
    }

    fn balance_mut(&mut self, token: TrancheToken, payee: Payee) -> &mut u64 {
        match (token, payee) {
            (TrancheToken::Stable, Payee::User) => &mut self.user_stable,
            (TrancheToken::Stable, Payee::Treasury) => &mut self.treasury_stable,
            (TrancheToken::Lever, Payee::User) => &mut self.user_lever,
            (TrancheToken::Lever, Payee::Treasury) => &mut self.treasury_lever,
        }
    }
}

impl AccountPort for MemoryPort {
    fn pull_collateral(&mut self, amount: u64) -> Result<()> {
        self.user_lst = self
            .user_lst
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientCollateral)?;
        self.vault_lst += amount;
        Ok(())
    }

    fn release_collateral(&mut self, to: Payee, amount: u64) -> Result<()> {
        self.vault_lst = self
            .vault_lst
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientCollateral)?;
        match to {
            Payee::User => self.user_lst += amount,
            Payee::Treasury => self.treasury_lst += amount,
        }
        Ok(())
    }

    fn mint_tranche(&mut self, token: TrancheToken, to: Payee, amount: u64) -> Result<()> {
        match token {
            TrancheToken::Stable => self.stable_supply += amount,
            TrancheToken::Lever => self.lever_supply += amount,
        }
        *self.balance_mut(token, to) += amount;
        Ok(())
    }

    fn burn_tranche(&mut self, token: TrancheToken, amount: u64) -> Result<()> {
        let balance = self.balance_mut(token, Payee::User);
        *balance = balance
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientSupply)?;
        match token {
            TrancheToken::Stable => self.stable_supply -= amount,
            TrancheToken::Lever => self.lever_supply -= amount,
        }
        Ok(())
    }

    fn tranche_supply(&self, token: TrancheToken) -> Result<u64> {
        Ok(match token {
            TrancheToken::Stable => self.stable_supply,
            TrancheToken::Lever => self.lever_supply,
        })
    }

    fn vault_balance(&self) -> Result<u64> {
        Ok(self.vault_lst)
    }

    fn current_slot(&self) -> Result<u64> {
        Ok(self.slot)
    }

    fn current_epoch(&self) -> Result<u64> {
        Ok(self.epoch)
    }

    fn instruction_index(&self) -> Result<u16> {
        Ok(self.instruction_index)
    }
}

pub fn authority() -> Pubkey {
    Pubkey::new_from_array([7u8; 32])
}

pub fn init_state(sol_usd: u64, lst_rate: u64) -> ProtocolState {
    let mut state = ProtocolState {
        authority: authority(),
        treasury: authority(),
        ..Default::default()
    };
    engine::initialize_state(
        &mut state,
        SLOT0,
        EPOCH0,
        &InitParams {
            min_cr_bps: 13_000,
            target_cr_bps: 15_000,
            init_sol_usd: sol_usd,
            init_lst_rate: lst_rate,
        },
    )
    .unwrap();
    state
}

/// Initialized protocol at $100/SOL and a 1.05 LST rate, with a funded
/// user.
pub fn seeded() -> (ProtocolState, MemoryPort) {
    (init_state(100 * USD, 1_050_000_000), MemoryPort::new(1_000_000 * SOL))
}

pub fn assert_op_effects(pre: &ProtocolState, post: &ProtocolState, port: &MemoryPort) {
    assert_eq!(post.operation_counter, pre.operation_counter + 1);
    assert_eq!(port.vault_lst, post.total_lst_amount, "vault sync");
    assert_eq!(port.stable_supply, post.stable_supply, "stable supply sync");
    assert_eq!(port.lever_supply, post.lever_supply, "lever supply sync");

    assert!(post.rounding_reserve_lamports >= pre.rounding_reserve_lamports);
    assert!(post.rounding_reserve_lamports <= post.max_rounding_reserve_lamports);

    let sheet = post.balance_sheet().unwrap();
    if sheet.solvent() {
        let claims = sheet.liability_sol + sheet.equity_sol;
        let tolerance = (sheet.tvl_sol / 10_000).max(1_000);
        assert!(
            sheet.tvl_sol.abs_diff(claims) <= tolerance,
            "balance sheet residue {} over tolerance {}",
            sheet.tvl_sol.abs_diff(claims),
            tolerance
        );
    } else {
        assert_eq!(sheet.equity_sol, 0);
    }
}

pub fn assert_err<T: std::fmt::Debug>(res: Result<T>, code: ErrorCode) {
    let err = res.expect_err("expected operation to fail");
    assert_eq!(error_code_number(&err), error_code_number(&code.into()));
}

fn error_code_number(err: &Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        other => panic!("unexpected error kind: {other:?}"),
    }
}

pub fn run_stable_mint(
    state: &mut ProtocolState,
    port: &mut MemoryPort,
    lst_in: u64,
    min_out: u64,
) -> Result<StableMintPlan> {
    let mut staged = state.clone();
    let rollback = port.clone();
    match engine::execute_stable_mint(&mut staged, port, lst_in, min_out) {
        Ok(plan) => {
            *state = staged;
            Ok(plan)
        }
        Err(e) => {
            *port = rollback;
            Err(e)
        }
    }
}

pub fn run_stable_redeem(
    state: &mut ProtocolState,
    port: &mut MemoryPort,
    stable_in: u64,
    min_out: u64,
) -> Result<StableRedeemPlan> {
    let mut staged = state.clone();
    let rollback = port.clone();
    match engine::execute_stable_redeem(&mut staged, port, stable_in, min_out) {
        Ok(plan) => {
            *state = staged;
            Ok(plan)
        }
        Err(e) => {
            *port = rollback;
            Err(e)
        }
    }
}

pub fn run_lever_mint(
    state: &mut ProtocolState,
    port: &mut MemoryPort,
    lst_in: u64,
    min_out: u64,
) -> Result<LeverMintPlan> {
    let mut staged = state.clone();
    let rollback = port.clone();
    match engine::execute_lever_mint(&mut staged, port, lst_in, min_out) {
        Ok(plan) => {
            *state = staged;
            Ok(plan)
        }
        Err(e) => {
            *port = rollback;
            Err(e)
        }
    }
}

pub fn run_lever_redeem(
    state: &mut ProtocolState,
    port: &mut MemoryPort,
    lever_in: u64,
    min_out: u64,
) -> Result<LeverRedeemPlan> {
    let mut staged = state.clone();
    let rollback = port.clone();
    match engine::execute_lever_redeem(&mut staged, port, lever_in, min_out) {
        Ok(plan) => {
            *state = staged;
            Ok(plan)
        }
        Err(e) => {
            *port = rollback;
            Err(e)
        }
    }
}
