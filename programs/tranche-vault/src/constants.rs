pub const SOL_PRECISION: u64 = 1_000_000_000;
pub const USD_PRECISION: u64 = 1_000_000;
pub const BPS_PRECISION: u64 = 10_000;

/// Collateral ratio reported when no stable debt exists.
pub const CR_SENTINEL: u64 = u64::MAX;

pub const STATE_VERSION: u8 = 1;

// Dust floors. Inputs below these are rejected to keep rounding residue
// bounded per operation.
pub const MIN_LST_DEPOSIT: u64 = 1_000_000;
pub const MIN_STABLE_MINT: u64 = 1_000;
pub const MIN_LEVER_MINT: u64 = 1_000_000;
pub const MIN_LST_OUT: u64 = 1_000;

/// Redemptions may not strand the vault below this many LST base units
/// unless they empty it entirely.
pub const MIN_PROTOCOL_TVL: u64 = 1_000_000;

pub const MAX_BASE_FEE_BPS: u64 = 500;
pub const DEFAULT_STABLE_MINT_FEE_BPS: u64 = 50;
pub const DEFAULT_STABLE_REDEEM_FEE_BPS: u64 = 25;
pub const DEFAULT_LEVER_MINT_FEE_BPS: u64 = 30;
pub const DEFAULT_LEVER_REDEEM_FEE_BPS: u64 = 15;

pub const DEFAULT_FEE_MIN_MULTIPLIER_BPS: u64 = 10_000;
pub const DEFAULT_FEE_MAX_MULTIPLIER_BPS: u64 = 40_000;

/// Divisor converting the oracle uncertainty index into a fee boost.
pub const UNCERTAINTY_K: u64 = 1_000;
pub const DEFAULT_UNCERTAINTY_MAX_BPS: u64 = 20_000;

pub const DEFAULT_MAX_ORACLE_STALENESS_SLOTS: u64 = 300;
pub const DEFAULT_MAX_CONF_BPS: u64 = 200;
pub const DEFAULT_MAX_LST_STALE_EPOCHS: u64 = 2;

pub const DEFAULT_MAX_ROUNDING_RESERVE_LAMPORTS: u64 = 1_000_000_000;
pub const MIN_ROUNDING_TOLERANCE_LAMPORTS: u64 = 1_000;

pub const PYTH_MAX_AGE_SECS: u64 = 60;

pub const PROTOCOL_SEED: &[u8] = b"protocol";
pub const VAULT_SEED: &[u8] = b"vault";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
