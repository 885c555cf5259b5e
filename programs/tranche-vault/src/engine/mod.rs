//! Portable operation engine. Every gate, every amount, every state write
//! lives here; the runtime only supplies an [`AccountPort`] implementation
//! (CPI-backed on-chain, in-memory in tests) and commits the staged state
//! on success.

pub mod execute;
pub mod gates;
pub mod invariants;
pub mod plan;

pub use execute::*;
pub use gates::*;
pub use plan::*;

use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrancheToken {
    Stable,
    Lever,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payee {
    User,
    Treasury,
}

/// Capabilities the engine needs from the surrounding runtime. Token moves
/// are fallible (balance checks live behind the port); reads are used for
/// the post-operation sync assertions.
pub trait AccountPort {
    /// Move LST from the user into the vault.
    fn pull_collateral(&mut self, amount: u64) -> Result<()>;
    /// Move LST out of the vault.
    fn release_collateral(&mut self, to: Payee, amount: u64) -> Result<()>;
    fn mint_tranche(&mut self, token: TrancheToken, to: Payee, amount: u64) -> Result<()>;
    /// Burn from the user's token account.
    fn burn_tranche(&mut self, token: TrancheToken, amount: u64) -> Result<()>;

    fn tranche_supply(&self, token: TrancheToken) -> Result<u64>;
    fn vault_balance(&self) -> Result<u64>;

    fn current_slot(&self) -> Result<u64>;
    fn current_epoch(&self) -> Result<u64>;
    /// Position of this invocation among the program's own top-level
    /// instructions in the transaction. Foreign preamble instructions
    /// (e.g. compute-budget) do not count; an invocation reached via CPI
    /// reports `u16::MAX`.
    fn instruction_index(&self) -> Result<u16>;
}
