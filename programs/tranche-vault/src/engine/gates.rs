use anchor_lang::prelude::*;

use super::AccountPort;
use crate::errors::ErrorCode;
use crate::state::ProtocolState;

/// Environment snapshot taken once at operation entry.
#[derive(Clone, Copy, Debug)]
pub struct Gate {
    pub slot: u64,
    pub epoch: u64,
    pub instruction_index: u16,
}

impl Gate {
    pub fn load<P: AccountPort>(port: &P) -> Result<Self> {
        Ok(Self {
            slot: port.current_slot()?,
            epoch: port.current_epoch()?,
            instruction_index: port.instruction_index()?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Mint,
    Redeem,
}

/// Ordered entry gates shared by all four user operations. The order is
/// part of the interface: callers observe the first failing gate.
pub fn check_entry(state: &ProtocolState, gate: &Gate, kind: OpKind) -> Result<()> {
    require!(gate.instruction_index == 0, ErrorCode::InvalidCPIContext);

    match kind {
        OpKind::Mint => require!(!state.mint_paused, ErrorCode::MintPaused),
        OpKind::Redeem => require!(!state.redeem_paused, ErrorCode::RedeemPaused),
    }

    let oracle_age = gate.slot.saturating_sub(state.last_oracle_update_slot);
    require!(
        oracle_age <= state.max_oracle_staleness_slots,
        ErrorCode::OraclePriceStale
    );
    require!(
        state.uncertainty_index_bps <= state.max_conf_bps,
        ErrorCode::OracleConfidenceTooWide
    );

    let rate_age = gate.epoch.saturating_sub(state.last_lst_sync_epoch);
    require!(
        rate_age <= state.max_lst_stale_epochs,
        ErrorCode::LstRateStale
    );

    Ok(())
}
